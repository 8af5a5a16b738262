//! Transactional boundary around repository writes.

use crate::features::FeatureRow;
use crate::pool::{DbPool, DbResult};
use crate::repository::{Record, Repository};
use rusqlite::Connection;
use std::cell::Cell;
use tokio::sync::MutexGuard;

/// Groups repository writes into one atomic commit.
///
/// The unit holds the pooled connection inside an open transaction. Nothing
/// is visible to other callers until [`UnitOfWork::complete`]; dropping the
/// unit without completing it rolls every write back.
pub struct UnitOfWork<'p> {
    conn: MutexGuard<'p, Connection>,
    writes: Cell<usize>,
    finished: bool,
}

impl DbPool {
    /// Take the connection and open a write transaction on it.
    pub async fn begin(&self) -> DbResult<UnitOfWork<'_>> {
        let conn = self.lock().await;
        conn.execute_batch("BEGIN IMMEDIATE")?;
        Ok(UnitOfWork {
            conn,
            writes: Cell::new(0),
            finished: false,
        })
    }
}

impl<'p> UnitOfWork<'p> {
    /// Repository for any record type, bound to this transaction.
    pub fn repository<T: Record>(&self) -> Repository<'_, T> {
        Repository::tracked(&self.conn, &self.writes)
    }

    /// Repository for stored features.
    pub fn features(&self) -> Repository<'_, FeatureRow> {
        self.repository()
    }

    /// Rows written so far.
    pub fn pending(&self) -> usize {
        self.writes.get()
    }

    /// Commit, returning the number of rows written.
    pub fn complete(mut self) -> DbResult<usize> {
        self.conn.execute_batch("COMMIT")?;
        self.finished = true;
        let written = self.writes.get();
        tracing::debug!(rows = written, "unit of work committed");
        Ok(written)
    }

    /// Awaitable form of [`UnitOfWork::complete`].
    pub async fn complete_async(self) -> DbResult<usize> {
        tokio::task::yield_now().await;
        self.complete()
    }
}

impl Drop for UnitOfWork<'_> {
    fn drop(&mut self) {
        if self.finished {
            return;
        }
        match self.conn.execute_batch("ROLLBACK") {
            Ok(()) => tracing::debug!(rows = self.writes.get(), "unit of work rolled back"),
            Err(e) => tracing::warn!(error = %e, "rollback failed"),
        }
    }
}
