// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sigpae::Solicitacao;
use sigpae_domain::{SolicitacaoId, Status};
use tracing::debug;

use crate::data_models::{DataOcorrenciaRow, SolicitacaoRow};
use crate::diesel_schema::{datas_ocorrencia, solicitacoes};
use crate::error::PersistenceError;

/// Returns true if a request row with this id exists.
///
/// # Errors
///
/// Returns an error if the query fails.
pub fn solicitacao_exists(conn: &mut SqliteConnection, id: &str) -> Result<bool, PersistenceError> {
    let count: i64 = solicitacoes::table
        .filter(solicitacoes::id.eq(id))
        .count()
        .get_result(conn)?;
    Ok(count > 0)
}

fn load_occurrences(
    conn: &mut SqliteConnection,
    id: &str,
) -> Result<Vec<DataOcorrenciaRow>, PersistenceError> {
    Ok(datas_ocorrencia::table
        .filter(datas_ocorrencia::solicitacao_id.eq(id))
        .order(datas_ocorrencia::data.asc())
        .select(DataOcorrenciaRow::as_select())
        .load::<DataOcorrenciaRow>(conn)?)
}

/// Loads a request and its dates.
///
/// # Errors
///
/// Returns `PersistenceError::SolicitacaoNotFound` if the id is unknown, or
/// a reconstruction error if the stored row no longer validates.
pub fn load_solicitacao(
    conn: &mut SqliteConnection,
    id: SolicitacaoId,
) -> Result<Solicitacao, PersistenceError> {
    let key: String = id.to_string();

    let row: SolicitacaoRow = solicitacoes::table
        .filter(solicitacoes::id.eq(&key))
        .select(SolicitacaoRow::as_select())
        .first::<SolicitacaoRow>(conn)
        .optional()?
        .ok_or(PersistenceError::SolicitacaoNotFound(id))?;

    let dates: Vec<DataOcorrenciaRow> = load_occurrences(conn, &key)?;
    debug!(solicitacao_id = %key, status = %row.status, "Loaded solicitação");
    row.into_solicitacao(dates)
}

/// Loads every request whose status is one of `statuses`, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row no longer validates.
pub fn list_solicitacoes_in_status(
    conn: &mut SqliteConnection,
    statuses: &[Status],
) -> Result<Vec<Solicitacao>, PersistenceError> {
    let names: Vec<&str> = statuses.iter().map(Status::as_str).collect();

    let rows: Vec<SolicitacaoRow> = solicitacoes::table
        .filter(solicitacoes::status.eq_any(names))
        .order((solicitacoes::criado_em.asc(), solicitacoes::id.asc()))
        .select(SolicitacaoRow::as_select())
        .load::<SolicitacaoRow>(conn)?;
    debug!(count = rows.len(), "Listed solicitações by status");

    rows.into_iter()
        .map(|row| {
            let dates: Vec<DataOcorrenciaRow> = load_occurrences(conn, &row.id)?;
            row.into_solicitacao(dates)
        })
        .collect()
}
