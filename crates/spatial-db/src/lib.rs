//! Spatial Database Layer
//!
//! SQLite persistence for stored features: the connection pool, schema
//! migrations, a generic repository and the unit of work that commits it.

pub mod features;
pub mod migrations;
pub mod pool;
pub mod repository;
pub mod unit_of_work;

pub use features::{FeatureRepository, FeatureRow};
pub use pool::{DbError, DbPool, DbResult};
pub use repository::{Record, Repository};
pub use unit_of_work::UnitOfWork;

use std::path::Path;

/// Open the database at `path` and bring its schema up to date.
pub async fn init_pool(path: &Path) -> DbResult<DbPool> {
    let pool = DbPool::open(path)?;
    migrations::run_migrations(&pool).await?;
    tracing::debug!(path = %path.display(), "database ready");
    Ok(pool)
}

/// Open a migrated in-memory database. Used by tests across the workspace.
pub async fn init_memory_pool() -> DbResult<DbPool> {
    let pool = DbPool::in_memory()?;
    migrations::run_migrations(&pool).await?;
    Ok(pool)
}
