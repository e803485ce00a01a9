// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Connection setup for `SQLite`.

use diesel::dsl::sql;
use diesel::prelude::*;
use diesel::sql_types::{BigInt, Integer};
use diesel::{Connection, RunQueryDsl, SqliteConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use crate::error::PersistenceError;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Milliseconds a writer waits on a locked database before failing.
const BUSY_TIMEOUT_MS: u32 = 5_000;

/// Where the database lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageMode {
    /// Shared-cache in-memory database, gone when the last connection closes.
    Memory,
    /// A database file on disk, opened in WAL mode.
    File,
}

// NOTE: PRAGMA is raw SQL; Diesel has no PRAGMA DSL.
#[derive(QueryableByName)]
struct ForeignKeysPragma {
    #[diesel(sql_type = Integer)]
    foreign_keys: i32,
}

/// Retrieves the row ID assigned by the most recent insert.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn get_last_insert_rowid(conn: &mut SqliteConnection) -> Result<i64, PersistenceError> {
    Ok(diesel::select(sql::<BigInt>("last_insert_rowid()")).get_result(conn)?)
}

/// Fails unless `PRAGMA foreign_keys` reports enforcement as active.
///
/// # Errors
///
/// Returns `PersistenceError::ForeignKeyEnforcementNotEnabled` when it is off.
pub fn verify_foreign_key_enforcement(conn: &mut SqliteConnection) -> Result<(), PersistenceError> {
    let pragma: ForeignKeysPragma =
        diesel::sql_query("PRAGMA foreign_keys").get_result::<ForeignKeysPragma>(conn)?;

    if pragma.foreign_keys == 0 {
        return Err(PersistenceError::ForeignKeyEnforcementNotEnabled);
    }

    debug!("SQLite foreign key enforcement is enabled");
    Ok(())
}

fn apply_pragmas(conn: &mut SqliteConnection, mode: StorageMode) -> Result<(), PersistenceError> {
    let mut pragmas: Vec<String> = vec![
        "PRAGMA foreign_keys = ON".to_string(),
        format!("PRAGMA busy_timeout = {BUSY_TIMEOUT_MS}"),
    ];
    if mode == StorageMode::File {
        pragmas.push("PRAGMA journal_mode = WAL".to_string());
    }

    for pragma in &pragmas {
        diesel::sql_query(pragma.as_str())
            .execute(conn)
            .map_err(|e| PersistenceError::QueryFailed(format!("{pragma}: {e}")))?;
    }
    Ok(())
}

/// Opens `database_url`, configures the connection and brings the schema
/// up to date.
///
/// # Errors
///
/// Returns an error if the connection, a PRAGMA or a migration fails.
pub fn open(database_url: &str, mode: StorageMode) -> Result<SqliteConnection, PersistenceError> {
    info!(database_url, ?mode, "Opening SQLite database");

    let mut conn: SqliteConnection = SqliteConnection::establish(database_url)?;
    apply_pragmas(&mut conn, mode)?;

    let applied: usize = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|e| PersistenceError::MigrationFailed(e.to_string()))?
        .len();
    info!(applied, "SQLite migrations complete");

    verify_foreign_key_enforcement(&mut conn)?;
    Ok(conn)
}
