//! Feature table mapping.

use crate::repository::{Record, Repository};
use rusqlite::types::Value;
use rusqlite::Row;

/// Feature row from database.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureRow {
    pub id: Option<i64>,
    pub name: String,
    pub kind: String,
    pub wkt: String,
}

impl FeatureRow {
    /// A row that has not been stored yet.
    pub fn new(name: impl Into<String>, kind: impl Into<String>, wkt: impl Into<String>) -> Self {
        Self {
            id: None,
            name: name.into(),
            kind: kind.into(),
            wkt: wkt.into(),
        }
    }

    /// Same as [`FeatureRow::new`] for an existing id.
    pub fn with_id(mut self, id: i64) -> Self {
        self.id = Some(id);
        self
    }
}

impl Record for FeatureRow {
    const TABLE: &'static str = "features";
    const ENTITY: &'static str = "Feature";
    const COLUMNS: &'static [&'static str] = &["name", "kind", "wkt"];

    fn id(&self) -> Option<i64> {
        self.id
    }

    fn set_id(&mut self, id: i64) {
        self.id = Some(id);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: Some(row.get(0)?),
            name: row.get(1)?,
            kind: row.get(2)?,
            wkt: row.get(3)?,
        })
    }

    fn values(&self) -> Vec<Value> {
        vec![
            Value::Text(self.name.clone()),
            Value::Text(self.kind.clone()),
            Value::Text(self.wkt.clone()),
        ]
    }
}

/// Repository over the `features` table.
pub type FeatureRepository<'a> = Repository<'a, FeatureRow>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{init_memory_pool, DbError};

    fn row(name: &str) -> FeatureRow {
        FeatureRow::new(name, "point", "POINT(1 2)")
    }

    #[tokio::test]
    async fn test_add_assigns_increasing_ids() {
        let pool = init_memory_pool().await.unwrap();
        let uow = pool.begin().await.unwrap();
        let repo = uow.features();

        let a = repo.add(row("A")).unwrap();
        let b = repo.add(row("B")).unwrap();
        assert!(a.id.unwrap() < b.id.unwrap());
    }

    #[tokio::test]
    async fn test_update_overwrites_fields() {
        let pool = init_memory_pool().await.unwrap();
        let uow = pool.begin().await.unwrap();
        let repo = uow.features();

        let saved = repo.add(row("A")).unwrap();
        let id = saved.id.unwrap();
        let updated = repo
            .update(FeatureRow::new("B", "linestring", "LINESTRING(0 0, 1 1)").with_id(id))
            .unwrap();

        assert_eq!(updated.id, Some(id));
        assert_eq!(updated.name, "B");
        assert_eq!(updated.kind, "linestring");
        assert_eq!(repo.get_by_id(id).unwrap(), updated);
    }

    #[tokio::test]
    async fn test_update_missing_is_not_found() {
        let pool = init_memory_pool().await.unwrap();
        let uow = pool.begin().await.unwrap();

        let result = uow.features().update(row("A").with_id(42));
        assert!(matches!(result, Err(DbError::NotFound(_))));
        assert_eq!(uow.pending(), 0);
    }

    #[tokio::test]
    async fn test_update_without_id() {
        let pool = init_memory_pool().await.unwrap();
        let uow = pool.begin().await.unwrap();

        let result = uow.features().update(row("A"));
        assert!(matches!(result, Err(DbError::MissingId("Feature"))));
    }

    #[tokio::test]
    async fn test_delete_returns_last_value() {
        let pool = init_memory_pool().await.unwrap();
        let uow = pool.begin().await.unwrap();
        let repo = uow.features();

        let saved = repo.add(row("A")).unwrap();
        let id = saved.id.unwrap();
        assert_eq!(repo.delete(id).unwrap(), saved);
        assert!(matches!(repo.get_by_id(id), Err(DbError::NotFound(_))));
        assert!(matches!(repo.delete(id), Err(DbError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_get_between_ids_is_inclusive() {
        let pool = init_memory_pool().await.unwrap();
        let uow = pool.begin().await.unwrap();
        let repo = uow.features();

        let saved = repo
            .add_range((0..6).map(|i| row(&format!("F{}", i))).collect())
            .unwrap();
        let ids: Vec<i64> = saved.iter().filter_map(|r| r.id).collect();
        repo.delete(ids[2]).unwrap();

        let found: Vec<i64> = repo
            .get_between_ids(ids[1], ids[4])
            .unwrap()
            .iter()
            .filter_map(|r| r.id)
            .collect();
        assert_eq!(found, vec![ids[1], ids[3], ids[4]]);

        assert!(repo.get_between_ids(ids[4], ids[1]).unwrap().is_empty());
        assert_eq!(repo.get_all().unwrap().len(), 5);
    }
}
