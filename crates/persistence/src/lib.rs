// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the SIGPAE workflow engine.
//!
//! Requests, their dated occurrences, the transition log and the
//! notification outbox are stored in `SQLite` through Diesel. Migrations
//! are embedded and applied when a connection is opened.
//!
//! ## Guarantees
//!
//! - An engine outcome is written in one transaction: status, dates, log
//!   row and outbox rows land together or not at all.
//! - Status updates are version-checked. Of two changes computed from the
//!   same version, only the first is stored; the second fails with
//!   [`PersistenceError::ConcurrentModification`] and leaves no log row.
//! - The transition log is append-only. Triggers abort any `UPDATE` or
//!   `DELETE` on `logs_transicao`.
//!
//! ## Testing
//!
//! Tests run against shared-cache in-memory databases, one per call to
//! [`Persistence::new_in_memory`].

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use diesel::SqliteConnection;
use sigpae::{Outcome, Solicitacao};
use sigpae_audit::AuditEvent;
use sigpae_domain::{SolicitacaoId, Status, Workflow};
use std::collections::BTreeSet;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::{PersistOutcomeResult, StoredNotification};
pub use error::PersistenceError;

use backend::PersistenceBackend;
use backend::sqlite::StorageMode;

/// Generates unique in-memory database names so tests stay isolated.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Persistence adapter over a single `SQLite` connection.
pub struct Persistence {
    pub(crate) conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives its own shared-cache database.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let shared_memory_url: String = format!("file:sigpae_memdb_{db_id}?mode=memory&cache=shared");

        let conn: SqliteConnection = backend::sqlite::open(&shared_memory_url, StorageMode::Memory)?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter backed by a database file.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError("Invalid database path".to_string())
        })?;

        let conn: SqliteConnection = backend::sqlite::open(path_str, StorageMode::File)?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        self.conn.verify_foreign_key_enforcement()
    }

    // ========================================================================
    // Solicitações
    // ========================================================================

    /// Stores a newly created request.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_solicitacao(&mut self, solicitacao: &Solicitacao) -> Result<(), PersistenceError> {
        self.conn
            .immediate_transaction(|conn| mutations::insert_solicitacao(conn, solicitacao))
    }

    /// Loads a request by id.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::SolicitacaoNotFound` if the id is unknown.
    pub fn load_solicitacao(&mut self, id: SolicitacaoId) -> Result<Solicitacao, PersistenceError> {
        queries::load_solicitacao(&mut self.conn, id)
    }

    /// Loads every request sitting in a state from which it can be
    /// cancelled automatically once its date has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_pending_solicitacoes(&mut self) -> Result<Vec<Solicitacao>, PersistenceError> {
        let statuses: BTreeSet<Status> = Workflow::ALL
            .iter()
            .flat_map(|workflow| workflow.pending_states().iter().copied())
            .collect();
        let statuses: Vec<Status> = statuses.into_iter().collect();

        let candidates: Vec<Solicitacao> =
            queries::list_solicitacoes_in_status(&mut self.conn, &statuses)?;
        Ok(candidates
            .into_iter()
            .filter(|solicitacao| {
                solicitacao
                    .workflow()
                    .pending_states()
                    .contains(&solicitacao.status())
            })
            .collect())
    }

    // ========================================================================
    // Outcomes
    // ========================================================================

    /// Persists an engine outcome computed from `expected_version`.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::ConcurrentModification` if the stored
    /// version moved on; nothing is written in that case.
    pub fn persist_outcome(
        &mut self,
        outcome: &Outcome,
        expected_version: u64,
    ) -> Result<PersistOutcomeResult, PersistenceError> {
        mutations::persist_outcome(&mut self.conn, outcome, expected_version)
    }

    // ========================================================================
    // Transition log
    // ========================================================================

    /// The transition log of a request, ordered by time then event id.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_logs(&mut self, id: SolicitacaoId) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::list_logs(&mut self.conn, id)
    }

    // ========================================================================
    // Outbox
    // ========================================================================

    /// Notifications waiting to be delivered.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn pending_notifications(&mut self) -> Result<Vec<StoredNotification>, PersistenceError> {
        queries::pending_notifications(&mut self.conn)
    }

    /// Marks an outbox entry as delivered.
    ///
    /// # Errors
    ///
    /// Returns `PersistenceError::NotificationNotFound` for an unknown id.
    pub fn mark_notification_dispatched(
        &mut self,
        notificacao_id: i64,
    ) -> Result<(), PersistenceError> {
        mutations::mark_notification_dispatched(&mut self.conn, notificacao_id)
    }
}
