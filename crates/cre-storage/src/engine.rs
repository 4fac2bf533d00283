//! StorageEngine: owns the ConnectionPool, runs migrations at startup, and
//! routes reads and transactional writes.

use std::path::Path;

use rusqlite::Connection;

use cre_core::config::StorageConfig;
use cre_core::errors::CreResult;

use crate::migrations;
use crate::pool::pragmas::verify_wal_mode;
use crate::pool::ConnectionPool;

/// The storage engine shared by every ledger component.
pub struct StorageEngine {
    pool: ConnectionPool,
    /// When true, use the read pool for read operations (file-backed mode).
    /// When false, route all reads through the writer (in-memory mode,
    /// because in-memory read pool connections are isolated databases).
    use_read_pool: bool,
}

impl StorageEngine {
    /// Open a storage engine backed by a file on disk.
    pub fn open(path: &Path) -> CreResult<Self> {
        Self::open_with_pool_size(path, 4)
    }

    pub fn open_with_pool_size(path: &Path, read_pool_size: usize) -> CreResult<Self> {
        let pool = ConnectionPool::open(path, read_pool_size, |conn| {
            migrations::run_migrations(conn)?;
            if !verify_wal_mode(conn)? {
                tracing::warn!(path = %path.display(), "WAL mode not active");
            }
            Ok(())
        })?;
        tracing::info!(path = %path.display(), readers = pool.readers.size(), "storage opened");
        Ok(Self {
            pool,
            use_read_pool: true,
        })
    }

    /// Open using the `[storage]` config section.
    pub fn from_config(config: &StorageConfig) -> CreResult<Self> {
        Self::open_with_pool_size(Path::new(&config.db_path), config.read_pool_size)
    }

    /// Open an in-memory storage engine (for testing).
    pub fn open_in_memory() -> CreResult<Self> {
        let pool = ConnectionPool::open_in_memory(1, |conn| {
            migrations::run_migrations(conn)?;
            Ok(())
        })?;
        Ok(Self {
            pool,
            use_read_pool: false,
        })
    }

    /// Get a reference to the connection pool (for advanced operations).
    pub fn pool(&self) -> &ConnectionPool {
        &self.pool
    }

    /// Snapshot read on the best available connection.
    pub async fn read<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn(f).await
        }
    }

    /// Run a mutation inside one transaction on the writer. Holding the
    /// writer serializes every trust, override, and review mutation.
    pub async fn write<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        self.pool.writer.with_tx(f).await
    }

    /// Blocking variant of [`read`](Self::read) for non-async callers.
    pub fn read_sync<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        if self.use_read_pool {
            self.pool.readers.with_conn(f)
        } else {
            self.pool.writer.with_conn_sync(f)
        }
    }

    /// Blocking variant of [`write`](Self::write) for non-async callers.
    pub fn write_sync<F, T>(&self, f: F) -> CreResult<T>
    where
        F: FnOnce(&Connection) -> CreResult<T>,
    {
        self.pool.writer.with_tx_sync(f)
    }
}
