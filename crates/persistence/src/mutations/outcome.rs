// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sigpae::{Outcome, Solicitacao};
use tracing::{debug, info};

use crate::data_models::PersistOutcomeResult;
use crate::error::PersistenceError;
use crate::mutations::log::insert_log;
use crate::mutations::outbox::insert_notification;
use crate::mutations::solicitacao::{sync_occurrences, update_status_checked};

/// Persists an engine outcome atomically.
///
/// The status update is checked against `expected_version`, the version
/// the outcome was computed from. Dates, the log row and the outbox rows
/// are written in the same transaction, so a conflict leaves no trace.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` if another change
/// landed first, or any database error; nothing is written in either case.
pub fn persist_outcome(
    conn: &mut SqliteConnection,
    outcome: &Outcome,
    expected_version: u64,
) -> Result<PersistOutcomeResult, PersistenceError> {
    conn.transaction::<PersistOutcomeResult, PersistenceError, _>(|conn| {
        let new_state: &Solicitacao = outcome.new_state();

        update_status_checked(conn, new_state, expected_version)?;
        sync_occurrences(conn, new_state)?;

        let event_id: Option<i64> = outcome
            .audit_event()
            .map(|event| insert_log(conn, event))
            .transpose()?;
        if let Some(event_id) = event_id {
            debug!(event_id, "Persisted transition log");
        }

        let notification_ids: Vec<i64> = outcome
            .notifications()
            .into_iter()
            .map(|notification| insert_notification(conn, notification))
            .collect::<Result<_, _>>()?;

        info!(
            solicitacao_id = %new_state.id(),
            status = %new_state.status(),
            version = new_state.version(),
            ?event_id,
            notifications = notification_ids.len(),
            "Persisted outcome"
        );

        Ok(PersistOutcomeResult {
            event_id,
            notification_ids,
            version: expected_version + 1,
        })
    })
}
