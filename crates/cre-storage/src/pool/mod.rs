//! Connection pool managing read/write connections.

pub mod pragmas;
pub mod read_pool;
pub mod write_connection;

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use cre_core::errors::CreResult;

pub use read_pool::ReadPool;
pub use write_connection::WriteConnection;

/// Manages the single write connection and the read connection pool.
pub struct ConnectionPool {
    pub writer: WriteConnection,
    pub readers: ReadPool,
    pub db_path: Option<PathBuf>,
}

impl ConnectionPool {
    /// Open a connection pool for the given database file. `init` runs on the
    /// writer before any reader is opened.
    pub fn open<F>(path: &Path, read_pool_size: usize, init: F) -> CreResult<Self>
    where
        F: FnOnce(&Connection) -> CreResult<()>,
    {
        let writer = WriteConnection::open_with(path, init)?;
        let readers = ReadPool::open(path, read_pool_size)?;
        Ok(Self {
            writer,
            readers,
            db_path: Some(path.to_path_buf()),
        })
    }

    /// Open an in-memory connection pool (for testing).
    /// Readers are isolated databases here; the storage engine routes reads
    /// through the writer in this mode.
    pub fn open_in_memory<F>(read_pool_size: usize, init: F) -> CreResult<Self>
    where
        F: FnOnce(&Connection) -> CreResult<()>,
    {
        let writer = WriteConnection::open_in_memory_with(init)?;
        let readers = ReadPool::open_in_memory(read_pool_size)?;
        Ok(Self {
            writer,
            readers,
            db_path: None,
        })
    }
}
