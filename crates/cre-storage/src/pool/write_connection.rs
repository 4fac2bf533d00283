//! Single write connection behind `tokio::sync::Mutex`.
//! Every mutation in the engine goes through here, which makes the lock the
//! global critical section for trust, override, and review writes.

use std::path::Path;

use rusqlite::Connection;
use tokio::sync::Mutex;

use cre_core::errors::CreResult;

use super::pragmas::apply_pragmas;
use crate::to_storage_err;

/// A single write connection protected by an async mutex.
pub struct WriteConnection {
    conn: Mutex<Connection>,
}

impl WriteConnection {
    /// Open a write connection to `path` and run `init` (migrations, checks) on it
    /// before it goes behind the lock. Safe to call from inside a runtime.
    pub fn open_with<F>(path: &Path, init: F) -> CreResult<Self>
    where
        F: FnOnce(&Connection) -> CreResult<()>,
    {
        let conn = Connection::open(path).map_err(|e| to_storage_err(e.to_string()))?;
        Self::prepare(conn, init)
    }

    /// In-memory variant of [`open_with`](Self::open_with) (for testing).
    pub fn open_in_memory_with<F>(init: F) -> CreResult<Self>
    where
        F: FnOnce(&Connection) -> CreResult<()>,
    {
        let conn = Connection::open_in_memory().map_err(|e| to_storage_err(e.to_string()))?;
        Self::prepare(conn, init)
    }

    fn prepare<F>(conn: Connection, init: F) -> CreResult<Self>
    where
        F: FnOnce(&Connection) -> CreResult<()>,
    {
        apply_pragmas(&conn)?;
        init(&conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Acquire the write lock and execute a closure with the connection.
    pub async fn with_conn<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        let guard = self.conn.lock().await;
        f(&guard)
    }

    /// Acquire the write lock and run the closure inside one transaction.
    /// The transaction rolls back if the closure fails, so a mutation and its
    /// audit rows are written together or not at all.
    pub async fn with_tx<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        let guard = self.conn.lock().await;
        run_in_tx(&guard, f)
    }

    /// Synchronous access for non-async contexts.
    ///
    /// # Panics
    /// Panics when called from inside a tokio runtime; use
    /// [`with_conn`](Self::with_conn) there.
    pub fn with_conn_sync<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        let guard = self.conn.blocking_lock();
        f(&guard)
    }

    /// Synchronous variant of [`with_tx`](Self::with_tx). Same runtime
    /// restriction as [`with_conn_sync`](Self::with_conn_sync).
    pub fn with_tx_sync<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        let guard = self.conn.blocking_lock();
        run_in_tx(&guard, f)
    }
}

fn run_in_tx<F, T>(conn: &Connection, f: F) -> CreResult<T>
where
    F: FnOnce(&Connection) -> CreResult<T>,
{
    let tx = conn
        .unchecked_transaction()
        .map_err(|e| to_storage_err(e.to_string()))?;
    let out = f(&tx)?;
    tx.commit().map_err(|e| to_storage_err(e.to_string()))?;
    Ok(out)
}
