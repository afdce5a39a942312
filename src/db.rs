//! Database connection helpers.
//!
//! Wraps the Diesel r2d2 pool for the SQLite database and applies the
//! embedded schema migrations.

use std::time::Duration;

use diesel::connection::SimpleConnection;
use diesel::r2d2::{
    ConnectionManager, CustomizeConnection, Error as R2D2Error, Pool, PoolError, PooledConnection,
};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

pub type DbPool = Pool<ConnectionManager<SqliteConnection>>;
pub type DbConnection = PooledConnection<ConnectionManager<SqliteConnection>>;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// SQLite pragmas set on every pooled connection.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SqlitePragmas {
    pub journal_wal: bool,
    pub foreign_keys: bool,
    pub busy_timeout: Option<Duration>,
}

impl Default for SqlitePragmas {
    fn default() -> Self {
        Self {
            journal_wal: true,
            foreign_keys: true,
            busy_timeout: Some(Duration::from_secs(30)),
        }
    }
}

impl SqlitePragmas {
    /// Renders the enabled pragmas as one batch.
    pub fn to_sql(&self) -> String {
        let mut statements = Vec::new();
        if self.journal_wal {
            statements.push("PRAGMA journal_mode = WAL;".to_string());
            statements.push("PRAGMA synchronous = NORMAL;".to_string());
        }
        if self.foreign_keys {
            statements.push("PRAGMA foreign_keys = ON;".to_string());
        }
        if let Some(timeout) = self.busy_timeout {
            statements.push(format!("PRAGMA busy_timeout = {};", timeout.as_millis()));
        }
        statements.join(" ")
    }
}

impl CustomizeConnection<SqliteConnection, R2D2Error> for SqlitePragmas {
    fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), R2D2Error> {
        let sql = self.to_sql();
        if sql.is_empty() {
            return Ok(());
        }
        conn.batch_execute(&sql).map_err(R2D2Error::QueryError)
    }
}

/// Create a Diesel connection pool for the given database URL.
pub fn establish_connection_pool(database_url: &str) -> Result<DbPool, PoolError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    Pool::builder()
        .connection_customizer(Box::new(SqlitePragmas::default()))
        .build(manager)
}

/// Apply any pending embedded migrations.
pub fn run_migrations(pool: &DbPool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let mut conn = pool.get()?;
    let applied = conn.run_pending_migrations(MIGRATIONS)?;
    for version in applied {
        log::info!("Applied migration {version}");
    }
    Ok(())
}
