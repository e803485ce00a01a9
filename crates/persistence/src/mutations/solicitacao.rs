// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sigpae::Solicitacao;
use sigpae_domain::{DataOcorrencia, InstitutionId, Rastro};
use tracing::debug;

use crate::data_models::{format_date, format_timestamp, version_to_column};
use crate::diesel_schema::{datas_ocorrencia, solicitacoes};
use crate::error::PersistenceError;
use crate::queries::solicitacao::solicitacao_exists;

/// Inserts a new request and its dates.
///
/// # Errors
///
/// Returns an error if the insert fails, including when the id is taken.
pub fn insert_solicitacao(
    conn: &mut SqliteConnection,
    solicitacao: &Solicitacao,
) -> Result<(), PersistenceError> {
    let id: String = solicitacao.id().to_string();
    let rastro: &Rastro = solicitacao.rastro();

    diesel::insert_into(solicitacoes::table)
        .values((
            solicitacoes::id.eq(&id),
            solicitacoes::kind.eq(solicitacao.kind().as_str()),
            solicitacoes::status.eq(solicitacao.status().as_str()),
            solicitacoes::escola.eq(rastro.escola.as_ref().map(InstitutionId::as_str)),
            solicitacoes::diretoria_regional.eq(rastro.diretoria_regional.as_str()),
            solicitacoes::terceirizada.eq(rastro.terceirizada.as_ref().map(InstitutionId::as_str)),
            solicitacoes::criado_por.eq(solicitacao.criado_por()),
            solicitacoes::criado_em.eq(format_timestamp(solicitacao.criado_em())?),
            solicitacoes::foi_solicitado_fora_do_prazo
                .eq(solicitacao.foi_solicitado_fora_do_prazo()),
            solicitacoes::lanche_emergencial.eq(solicitacao.lanche_emergencial()),
            solicitacoes::version.eq(version_to_column(solicitacao.version())?),
        ))
        .execute(conn)?;

    for occurrence in solicitacao.datas().as_slice() {
        insert_occurrence(conn, &id, occurrence)?;
    }

    debug!(solicitacao_id = %id, dates = solicitacao.datas().len(), "Inserted solicitação");
    Ok(())
}

fn insert_occurrence(
    conn: &mut SqliteConnection,
    solicitacao_id: &str,
    occurrence: &DataOcorrencia,
) -> Result<(), PersistenceError> {
    diesel::insert_into(datas_ocorrencia::table)
        .values((
            datas_ocorrencia::solicitacao_id.eq(solicitacao_id),
            datas_ocorrencia::data.eq(format_date(occurrence.data)?),
            datas_ocorrencia::cancelado.eq(occurrence.cancelado),
            datas_ocorrencia::cancelado_justificativa
                .eq(occurrence.cancelado_justificativa.as_deref()),
        ))
        .execute(conn)?;
    Ok(())
}

/// Writes the new status and flags of `solicitacao`, bumping the stored
/// version only if it still equals `expected_version`.
///
/// # Errors
///
/// Returns `PersistenceError::ConcurrentModification` when the stored
/// version moved on, or `PersistenceError::SolicitacaoNotFound` when the
/// row is gone.
pub fn update_status_checked(
    conn: &mut SqliteConnection,
    solicitacao: &Solicitacao,
    expected_version: u64,
) -> Result<(), PersistenceError> {
    let id: String = solicitacao.id().to_string();
    let expected: i64 = version_to_column(expected_version)?;

    let updated: usize = diesel::update(
        solicitacoes::table
            .filter(solicitacoes::id.eq(&id))
            .filter(solicitacoes::version.eq(expected)),
    )
    .set((
        solicitacoes::status.eq(solicitacao.status().as_str()),
        solicitacoes::foi_solicitado_fora_do_prazo.eq(solicitacao.foi_solicitado_fora_do_prazo()),
        solicitacoes::version.eq(solicitacoes::version + 1),
    ))
    .execute(conn)?;

    if updated == 0 {
        if solicitacao_exists(conn, &id)? {
            return Err(PersistenceError::ConcurrentModification {
                id: solicitacao.id(),
                expected_version,
            });
        }
        return Err(PersistenceError::SolicitacaoNotFound(solicitacao.id()));
    }
    Ok(())
}

/// Copies the cancellation flags of every date of `solicitacao` to storage.
///
/// # Errors
///
/// Returns an error if an update fails.
pub fn sync_occurrences(
    conn: &mut SqliteConnection,
    solicitacao: &Solicitacao,
) -> Result<(), PersistenceError> {
    let id: String = solicitacao.id().to_string();

    for occurrence in solicitacao.datas().as_slice() {
        diesel::update(
            datas_ocorrencia::table
                .filter(datas_ocorrencia::solicitacao_id.eq(&id))
                .filter(datas_ocorrencia::data.eq(format_date(occurrence.data)?)),
        )
        .set((
            datas_ocorrencia::cancelado.eq(occurrence.cancelado),
            datas_ocorrencia::cancelado_justificativa
                .eq(occurrence.cancelado_justificativa.as_deref()),
        ))
        .execute(conn)?;
    }
    Ok(())
}
