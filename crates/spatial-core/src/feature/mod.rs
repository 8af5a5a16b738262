//! Feature service: validation, persistence and commit for each operation.
//!
//! Every write runs inside one unit of work. A failure at any step drops the
//! unit before it is completed, so nothing partial reaches the store.

pub mod model;

use crate::error::{SpatialError, SpatialResult};
use crate::validation;
use model::{to_row, Feature, FeatureInput};
use spatial_db::{DbPool, FeatureRepository, FeatureRow};

/// Validate and store a new feature.
pub async fn add_feature(pool: &DbPool, name: &str, wkt: &str) -> SpatialResult<Feature> {
    let geometry = validation::validate(name, wkt)?;

    let uow = pool.begin().await?;
    let row = uow.features().add(to_row(name, &geometry))?;
    uow.complete_async().await?;

    let feature = Feature::try_from(row)?;
    tracing::info!(id = feature.id, kind = %feature.kind(), "feature added");
    Ok(feature)
}

/// Validate every item, then store all of them or none.
pub async fn add_range(pool: &DbPool, items: &[FeatureInput]) -> SpatialResult<Vec<Feature>> {
    let geometries = validation::validate_batch(items).inspect_err(|e| {
        tracing::debug!(failures = e.failures.len(), "batch rejected");
    })?;
    let rows: Vec<FeatureRow> = items
        .iter()
        .zip(&geometries)
        .map(|(item, geometry)| to_row(&item.name, geometry))
        .collect();

    let uow = pool.begin().await?;
    let rows = uow.features().add_range(rows)?;
    let written = uow.complete_async().await?;

    tracing::info!(count = written, "features added");
    rows.into_iter().map(Feature::try_from).collect()
}

/// Replace the name and geometry of an existing feature.
pub async fn update_feature(
    pool: &DbPool,
    id: i64,
    name: &str,
    wkt: &str,
) -> SpatialResult<Feature> {
    let geometry = validation::validate(name, wkt)?;

    let uow = pool.begin().await?;
    let row = uow
        .features()
        .update(to_row(name, &geometry).with_id(id))
        .map_err(SpatialError::not_found(id))?;
    uow.complete_async().await?;

    tracing::info!(id, "feature updated");
    Feature::try_from(row)
}

/// Delete a feature, returning its last stored value.
pub async fn delete_feature(pool: &DbPool, id: i64) -> SpatialResult<Feature> {
    let uow = pool.begin().await?;
    let row = uow
        .features()
        .delete(id)
        .map_err(SpatialError::not_found(id))?;
    uow.complete_async().await?;

    tracing::info!(id, "feature deleted");
    Feature::try_from(row)
}

/// Get a feature by ID.
pub async fn get_feature(pool: &DbPool, id: i64) -> SpatialResult<Feature> {
    let row = pool
        .with_conn(|conn| FeatureRepository::new(conn).get_by_id(id))
        .await
        .map_err(SpatialError::not_found(id))?;
    Feature::try_from(row)
}

/// List all features in id order.
pub async fn list_features(pool: &DbPool) -> SpatialResult<Vec<Feature>> {
    let rows = pool
        .with_conn(|conn| FeatureRepository::new(conn).get_all())
        .await?;
    rows.into_iter().map(Feature::try_from).collect()
}

/// List features with `start <= id <= end`.
pub async fn list_between(pool: &DbPool, start: i64, end: i64) -> SpatialResult<Vec<Feature>> {
    let rows = pool
        .with_conn(|conn| FeatureRepository::new(conn).get_between_ids(start, end))
        .await?;
    rows.into_iter().map(Feature::try_from).collect()
}
