use crate::common::error::{Result, StoreError};
use libsql::{Builder, Connection, Database};
use tracing::info;

/// In-memory database location understood by [`DatabaseManager::open`].
pub const IN_MEMORY: &str = ":memory:";

pub struct DatabaseManager {
    // Kept alive for the lifetime of the connection.
    _db: Database,
    conn: Connection,
}

impl DatabaseManager {
    /// Open (or create) a local libSQL database file, or `:memory:`.
    ///
    /// A single connection is held for the manager's lifetime so that an
    /// in-memory database is the same database on every call.
    pub async fn open(path: &str) -> Result<Self> {
        info!("Opening activity database at {}", path);

        let db = Builder::new_local(path)
            .build()
            .await
            .map_err(|e| StoreError::Database {
                message: format!("Failed to open database '{path}': {e}"),
            })?;

        let conn = db.connect().map_err(|e| StoreError::Database {
            message: format!("Failed to get database connection: {e}"),
        })?;

        Ok(Self { _db: db, conn })
    }

    pub async fn in_memory() -> Result<Self> {
        Self::open(IN_MEMORY).await
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Run database migrations
    pub async fn run_migrations(&self) -> Result<()> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../migrations/001_create_activities.sql");
        self.conn
            .execute_batch(migration_sql)
            .await
            .map_err(|e| StoreError::Database {
                message: format!("Failed to run migrations: {e}"),
            })?;

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Clear all data from the database (useful for development)
    pub async fn clear_all_data(&self) -> Result<u64> {
        let deleted = self
            .conn
            .execute("DELETE FROM activities", libsql::params![])
            .await
            .map_err(|e| StoreError::Database {
                message: format!("Failed to clear activities: {e}"),
            })?;

        info!("Cleared {} activities from database", deleted);
        Ok(deleted)
    }
}
