//! Database connection management using Diesel ORM.
//!
//! Provides connection pooling, migration support and per-connection
//! pragmas for SQLite databases.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::SqliteConnection;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};

use crate::error::{Error, Result};

/// Embedded database migrations compiled from the migrations/ directory.
pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Type alias for a SQLite connection pool.
pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;

const IN_MEMORY: &str = ":memory:";

/// Applied to every connection the pool hands out.
#[derive(Debug, Clone, Copy)]
struct SqlitePragmas;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> std::result::Result<(), diesel::r2d2::Error> {
        conn.batch_execute("PRAGMA busy_timeout = 5000;")
            .map_err(diesel::r2d2::Error::QueryError)
    }
}

/// Sizing and recycling rules for a pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PoolSettings {
    max_size: u32,
    min_idle: Option<u32>,
    idle_timeout: Option<Duration>,
    max_lifetime: Option<Duration>,
}

impl PoolSettings {
    /// Each `:memory:` connection is its own database, so that pool holds
    /// exactly one connection and never recycles it.
    fn for_database(database_path: &str) -> Self {
        if database_path == IN_MEMORY {
            Self {
                max_size: 1,
                min_idle: Some(1),
                idle_timeout: None,
                max_lifetime: None,
            }
        } else {
            Self {
                max_size: 5,
                min_idle: None,
                idle_timeout: Some(Duration::from_secs(600)),
                max_lifetime: Some(Duration::from_secs(1800)),
            }
        }
    }
}

/// Create a connection pool for the SQLite file at `database_path`.
///
/// `:memory:` gets a single pinned connection so every caller sees the same
/// database for the life of the process.
///
/// # Errors
/// Returns an error if the pool cannot be created.
pub fn create_pool(database_path: &str) -> Result<DbPool> {
    let settings = PoolSettings::for_database(database_path);
    let manager = ConnectionManager::<SqliteConnection>::new(database_path);
    Pool::builder()
        .max_size(settings.max_size)
        .min_idle(settings.min_idle)
        .idle_timeout(settings.idle_timeout)
        .max_lifetime(settings.max_lifetime)
        .connection_customizer(Box::new(SqlitePragmas))
        .build(manager)
        .map_err(|e| Error::Connection(e.to_string()))
}

/// Run all pending database migrations.
///
/// # Errors
/// Returns an error if migrations fail.
pub fn run_migrations(pool: &DbPool) -> Result<()> {
    let mut conn = pool.get().map_err(|e| Error::Connection(e.to_string()))?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| Error::Database(e.to_string()))?;
    Ok(())
}
