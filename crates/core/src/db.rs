//! SQLite store: connection setup, schema migrations and the unit of work.
//!
//! Every service call opens its own connection and runs inside a single transaction. The
//! transaction is committed only when the closure succeeds; on any error (or panic) it is
//! dropped and SQLite rolls it back, so a failed call leaves the store untouched.

use crate::config::CoreConfig;
use crate::error::{RecordError, RecordResult};
use rusqlite::{Connection, Transaction};

/// Ordered schema migrations. Versions must be strictly increasing.
const MIGRATIONS: &[(i64, &str)] = &[(1, include_str!("../migrations/001_initial.sql"))];

/// Latest schema version known to this build.
#[cfg(test)]
fn latest_schema_version() -> i64 {
    MIGRATIONS.last().map(|(v, _)| *v).unwrap_or(0)
}

/// Open a connection to the configured database with foreign keys enforced.
///
/// Creates the parent directory of the database file if it does not exist yet.
pub fn open_connection(cfg: &CoreConfig) -> RecordResult<Connection> {
    if let Some(parent) = cfg.database_path().parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(RecordError::DatabaseDirCreation)?;
        }
    }

    let conn = Connection::open(cfg.database_path())?;
    conn.busy_timeout(cfg.busy_timeout())?;
    configure_pragmas(&conn)?;
    Ok(conn)
}

fn configure_pragmas(conn: &Connection) -> RecordResult<()> {
    conn.execute_batch(
        "PRAGMA journal_mode=WAL;
         PRAGMA foreign_keys=ON;",
    )?;
    Ok(())
}

/// Bring the configured database up to the latest schema version.
///
/// Safe to call on every startup: already-applied migrations are skipped.
///
/// # Returns
/// The schema version after migrating.
pub fn migrate(cfg: &CoreConfig) -> RecordResult<i64> {
    let mut conn = open_connection(cfg)?;
    run_migrations(&mut conn)
}

/// Apply all pending migrations on an open connection, each in its own transaction.
pub fn run_migrations(conn: &mut Connection) -> RecordResult<i64> {
    let mut current = current_version(conn)?;

    for (version, sql) in MIGRATIONS {
        if *version <= current {
            continue;
        }
        tracing::info!("running migration v{version}");

        let tx = conn.transaction()?;
        tx.execute_batch(sql)
            .and_then(|_| {
                tx.execute(
                    "INSERT INTO schema_version (version) VALUES (?1)",
                    [version],
                )
            })
            .map_err(|e| RecordError::MigrationFailed {
                version: *version,
                reason: e.to_string(),
            })?;
        tx.commit()?;
        current = *version;
    }

    Ok(current)
}

/// Current schema version, or 0 for a database that has never been migrated.
pub fn current_version(conn: &Connection) -> RecordResult<i64> {
    let has_table: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = 'schema_version')",
        [],
        |row| row.get(0),
    )?;
    if !has_table {
        return Ok(0);
    }

    let version: i64 = conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_version",
        [],
        |row| row.get(0),
    )?;
    Ok(version)
}

/// Run `work` inside one transaction on a fresh connection.
///
/// The transaction is committed only if `work` returns `Ok`.
pub(crate) fn with_unit_of_work<T, F>(cfg: &CoreConfig, work: F) -> RecordResult<T>
where
    F: FnOnce(&Transaction<'_>) -> RecordResult<T>,
{
    let mut conn = open_connection(cfg)?;
    let tx = conn.transaction()?;
    let out = work(&tx)?;
    tx.commit()?;
    Ok(out)
}
