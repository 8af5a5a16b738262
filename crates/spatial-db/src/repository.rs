//! Generic CRUD repository over any table-backed record.

use crate::pool::{DbError, DbResult};
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, OptionalExtension, Row};
use std::cell::Cell;
use std::marker::PhantomData;

/// A row type the repository can persist.
///
/// The id column is always named `id` and is assigned by the store; every
/// other column is listed in [`Record::COLUMNS`].
pub trait Record: Sized {
    /// Table holding the records.
    const TABLE: &'static str;

    /// Human-readable entity name used in error messages.
    const ENTITY: &'static str;

    /// Mutable columns, in the order [`Record::values`] yields them.
    const COLUMNS: &'static [&'static str];

    /// Store-assigned id, `None` until the record is inserted.
    fn id(&self) -> Option<i64>;

    fn set_id(&mut self, id: i64);

    /// Decode a row selected as `id, COLUMNS...`.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;

    /// Values for [`Record::COLUMNS`].
    fn values(&self) -> Vec<Value>;
}

/// CRUD and range queries for one record type.
///
/// A repository borrows a connection. When it is handed out by a
/// [`UnitOfWork`](crate::UnitOfWork) its writes are counted towards the
/// unit's commit; a bare repository is meant for reads.
pub struct Repository<'a, T> {
    conn: &'a Connection,
    writes: Option<&'a Cell<usize>>,
    _record: PhantomData<T>,
}

impl<'a, T: Record> Repository<'a, T> {
    /// A repository for reads outside of a unit of work.
    pub fn new(conn: &'a Connection) -> Self {
        Self {
            conn,
            writes: None,
            _record: PhantomData,
        }
    }

    pub(crate) fn tracked(conn: &'a Connection, writes: &'a Cell<usize>) -> Self {
        Self {
            conn,
            writes: Some(writes),
            _record: PhantomData,
        }
    }

    /// Insert a record and return it with its assigned id.
    pub fn add(&self, mut entity: T) -> DbResult<T> {
        let placeholders = (1..=T::COLUMNS.len())
            .map(|i| format!("?{}", i))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::COLUMNS.join(", "),
            placeholders
        );

        self.conn
            .prepare_cached(&sql)?
            .execute(params_from_iter(entity.values()))?;
        entity.set_id(self.conn.last_insert_rowid());
        self.record_write();
        Ok(entity)
    }

    /// Insert every record. Atomic only inside a unit of work.
    pub fn add_range(&self, entities: Vec<T>) -> DbResult<Vec<T>> {
        entities.into_iter().map(|e| self.add(e)).collect()
    }

    /// Overwrite the mutable columns of an existing record.
    pub fn update(&self, entity: T) -> DbResult<T> {
        let id = entity.id().ok_or(DbError::MissingId(T::ENTITY))?;
        let assignments = T::COLUMNS
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{} = ?{}", col, i + 1))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "UPDATE {} SET {} WHERE id = ?{}",
            T::TABLE,
            assignments,
            T::COLUMNS.len() + 1
        );

        let mut values = entity.values();
        values.push(Value::Integer(id));
        let changed = self
            .conn
            .prepare_cached(&sql)?
            .execute(params_from_iter(values))?;
        if changed == 0 {
            return Err(self.not_found(id));
        }
        self.record_write();

        self.get_by_id(id)
    }

    /// Remove a record, returning its last stored value.
    pub fn delete(&self, id: i64) -> DbResult<T> {
        let entity = self.get_by_id(id)?;
        let sql = format!("DELETE FROM {} WHERE id = ?1", T::TABLE);
        self.conn.prepare_cached(&sql)?.execute(params![id])?;
        self.record_write();
        Ok(entity)
    }

    /// Get a record by id.
    pub fn get_by_id(&self, id: i64) -> DbResult<T> {
        let sql = format!("{} WHERE id = ?1", self.select());
        self.conn
            .prepare_cached(&sql)?
            .query_row(params![id], T::from_row)
            .optional()?
            .ok_or_else(|| self.not_found(id))
    }

    /// All records in id order.
    pub fn get_all(&self) -> DbResult<Vec<T>> {
        let sql = format!("{} ORDER BY id", self.select());
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map([], T::from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    /// Records whose id lies in `start..=end`, in id order.
    pub fn get_between_ids(&self, start: i64, end: i64) -> DbResult<Vec<T>> {
        let sql = format!("{} WHERE id BETWEEN ?1 AND ?2 ORDER BY id", self.select());
        let mut stmt = self.conn.prepare_cached(&sql)?;
        let rows = stmt.query_map(params![start, end], T::from_row)?;
        rows.collect::<Result<Vec<_>, _>>().map_err(DbError::from)
    }

    fn select(&self) -> String {
        format!("SELECT id, {} FROM {}", T::COLUMNS.join(", "), T::TABLE)
    }

    fn not_found(&self, id: i64) -> DbError {
        DbError::NotFound(format!("{} {}", T::ENTITY, id))
    }

    fn record_write(&self) {
        if let Some(writes) = self.writes {
            writes.set(writes.get() + 1);
        }
    }
}
