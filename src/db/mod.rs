// The league database.
mod channel;
mod fixture;
mod player;
mod result;
mod standings;
mod team;

use std::{str::FromStr, time::Duration};

use sqlx::{Sqlite, Transaction, sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}};

use crate::logic::{error::Result, types::Db};

// Open (or create) the database at `url` and bring the schema up to date.
pub async fn setup(url: &str) -> Result<Db> {
    let options = SqliteConnectOptions::from_str(url)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5));

    let db = SqlitePoolOptions::new().connect_with(options).await?;
    migrate(&db).await?;

    log::info!("database ready at {url}");
    return Ok(db);
}

// A private in-memory database. Every connection to `sqlite::memory:` is its own
// database, so the pool is pinned to a single connection that never expires.
pub async fn setup_in_memory() -> Result<Db> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?
        .foreign_keys(true);

    let db = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options).await?;

    migrate(&db).await?;
    return Ok(db);
}

// Start a transaction that holds the write lock from its first statement.
// Concurrent writers then wait out the busy timeout instead of failing when a
// deferred read lock cannot be upgraded.
pub async fn begin_write(db: &Db) -> Result<Transaction<'static, Sqlite>> {
    Ok(db.begin_with("BEGIN IMMEDIATE").await?)
}

async fn migrate(db: &Db) -> Result<()> {
    sqlx::migrate!("sql/migrations").run(db).await?;
    Ok(())
}

// The constraint message of a UNIQUE violation, if that is what the error is.
pub(crate) fn unique_violation(err: &sqlx::Error) -> Option<String> {
    match err {
        sqlx::Error::Database(e) if e.is_unique_violation() => Some(e.message().to_string()),
        _ => None,
    }
}
