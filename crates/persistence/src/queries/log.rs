// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sigpae_audit::AuditEvent;
use sigpae_domain::SolicitacaoId;

use crate::data_models::LogTransicaoRow;
use crate::diesel_schema::logs_transicao;
use crate::error::PersistenceError;

/// The transition log of a request, in the order it was written.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn list_logs(
    conn: &mut SqliteConnection,
    id: SolicitacaoId,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    logs_transicao::table
        .filter(logs_transicao::uuid_original.eq(id.to_string()))
        .order((logs_transicao::criado_em.asc(), logs_transicao::event_id.asc()))
        .select(LogTransicaoRow::as_select())
        .load::<LogTransicaoRow>(conn)?
        .into_iter()
        .map(LogTransicaoRow::into_audit_event)
        .collect()
}
