// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sigpae_audit::AuditEvent;

use crate::backend::PersistenceBackend;
use crate::data_models::format_timestamp;
use crate::diesel_schema::logs_transicao;
use crate::error::PersistenceError;

/// Appends `event` to the transition log.
///
/// Rows are never updated or deleted afterwards; triggers on the table
/// reject both.
///
/// # Returns
///
/// The event ID assigned by the database.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_log(conn: &mut SqliteConnection, event: &AuditEvent) -> Result<i64, PersistenceError> {
    let actor_json: String = serde_json::to_string(&event.actor)?;

    diesel::insert_into(logs_transicao::table)
        .values((
            logs_transicao::uuid_original.eq(event.uuid_original.to_string()),
            logs_transicao::status_evento.eq(event.status_evento.as_str()),
            logs_transicao::actor_json.eq(actor_json),
            logs_transicao::justificativa.eq(&event.justificativa),
            logs_transicao::resposta_sim_nao.eq(event.resposta_sim_nao),
            logs_transicao::before_status.eq(event.before.status.as_str()),
            logs_transicao::before_data.eq(&event.before.data),
            logs_transicao::after_status.eq(event.after.status.as_str()),
            logs_transicao::after_data.eq(&event.after.data),
            logs_transicao::criado_em.eq(format_timestamp(event.criado_em)?),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}
