// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use serde::{Deserialize, Serialize};
use sigpae::{Notification, NotificationKind, Recipient, Solicitacao, SolicitacaoParts};
use sigpae_audit::{Actor, AuditEvent, EventKind, StateSnapshot};
use sigpae_domain::{
    DataOcorrencia, Datas, InstitutionId, Rastro, SolicitacaoId, SolicitacaoKind, Status,
};
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::diesel_schema::{datas_ocorrencia, logs_transicao, notificacoes, solicitacoes};
use crate::error::PersistenceError;

/// A notification as stored in the outbox.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredNotification {
    pub notificacao_id: i64,
    pub dispatched: bool,
    pub notification: Notification,
}

/// What a persisted outcome was assigned by the database.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistOutcomeResult {
    /// The log row written, absent for partial cancellations.
    pub event_id: Option<i64>,
    /// Outbox rows, in insertion order.
    pub notification_ids: Vec<i64>,
    /// The stored version after the change.
    pub version: u64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = solicitacoes)]
pub(crate) struct SolicitacaoRow {
    pub id: String,
    pub kind: String,
    pub status: String,
    pub escola: Option<String>,
    pub diretoria_regional: String,
    pub terceirizada: Option<String>,
    pub criado_por: String,
    pub criado_em: String,
    pub foi_solicitado_fora_do_prazo: bool,
    pub lanche_emergencial: bool,
    pub version: i64,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = datas_ocorrencia)]
pub(crate) struct DataOcorrenciaRow {
    #[allow(dead_code)]
    pub solicitacao_id: String,
    pub data: String,
    pub cancelado: bool,
    pub cancelado_justificativa: Option<String>,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = logs_transicao)]
pub(crate) struct LogTransicaoRow {
    pub event_id: i64,
    pub uuid_original: String,
    pub status_evento: String,
    pub actor_json: String,
    pub justificativa: String,
    pub resposta_sim_nao: Option<bool>,
    pub before_status: String,
    pub before_data: String,
    pub after_status: String,
    pub after_data: String,
    pub criado_em: String,
}

#[derive(Queryable, Selectable)]
#[diesel(table_name = notificacoes)]
pub(crate) struct NotificacaoRow {
    pub notificacao_id: i64,
    pub solicitacao_id: String,
    pub kind: String,
    pub recipients_json: String,
    pub subject: String,
    pub title: String,
    pub dispatched: bool,
}

// ========================================================================
// Column encodings
// ========================================================================

/// Timestamps are stored as RFC 3339 text in UTC so they sort as text.
pub(crate) fn format_timestamp(value: OffsetDateTime) -> Result<String, PersistenceError> {
    value
        .to_offset(UtcOffset::UTC)
        .format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub(crate) fn parse_timestamp(value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339)
        .map_err(|e| PersistenceError::ReconstructionError(format!("timestamp '{value}': {e}")))
}

pub(crate) fn format_date(value: Date) -> Result<String, PersistenceError> {
    value
        .format(format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

pub(crate) fn parse_date(value: &str) -> Result<Date, PersistenceError> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| PersistenceError::ReconstructionError(format!("date '{value}': {e}")))
}

pub(crate) fn version_to_column(version: u64) -> Result<i64, PersistenceError> {
    version
        .to_i64()
        .ok_or_else(|| PersistenceError::SerializationError(format!("version {version} out of range")))
}

fn version_from_column(version: i64) -> Result<u64, PersistenceError> {
    version
        .to_u64()
        .ok_or_else(|| PersistenceError::ReconstructionError(format!("version {version} is negative")))
}

fn optional_institution(value: Option<&str>) -> Result<Option<InstitutionId>, PersistenceError> {
    Ok(value.map(InstitutionId::new).transpose()?)
}

// ========================================================================
// Row to domain
// ========================================================================

impl SolicitacaoRow {
    pub(crate) fn into_solicitacao(
        self,
        dates: Vec<DataOcorrenciaRow>,
    ) -> Result<Solicitacao, PersistenceError> {
        let occurrences: Vec<DataOcorrencia> = dates
            .into_iter()
            .map(DataOcorrenciaRow::into_occurrence)
            .collect::<Result<_, _>>()?;

        let parts: SolicitacaoParts = SolicitacaoParts {
            id: self.id.parse::<SolicitacaoId>()?,
            kind: self.kind.parse::<SolicitacaoKind>()?,
            status: self.status.parse::<Status>()?,
            rastro: Rastro {
                escola: optional_institution(self.escola.as_deref())?,
                diretoria_regional: InstitutionId::new(&self.diretoria_regional)?,
                terceirizada: optional_institution(self.terceirizada.as_deref())?,
            },
            datas: Datas::new(occurrences)?,
            criado_por: self.criado_por,
            criado_em: parse_timestamp(&self.criado_em)?,
            foi_solicitado_fora_do_prazo: self.foi_solicitado_fora_do_prazo,
            lanche_emergencial: self.lanche_emergencial,
            version: version_from_column(self.version)?,
        };

        Ok(Solicitacao::restore(parts)?)
    }
}

impl DataOcorrenciaRow {
    fn into_occurrence(self) -> Result<DataOcorrencia, PersistenceError> {
        Ok(DataOcorrencia {
            data: parse_date(&self.data)?,
            cancelado: self.cancelado,
            cancelado_justificativa: self.cancelado_justificativa,
        })
    }
}

impl LogTransicaoRow {
    pub(crate) fn into_audit_event(self) -> Result<AuditEvent, PersistenceError> {
        let actor: Actor = serde_json::from_str(&self.actor_json)?;
        let before: StateSnapshot =
            StateSnapshot::new(self.before_status.parse::<Status>()?, self.before_data);
        let after: StateSnapshot =
            StateSnapshot::new(self.after_status.parse::<Status>()?, self.after_data);

        let mut event: AuditEvent = AuditEvent::new(
            self.uuid_original.parse::<SolicitacaoId>()?,
            self.status_evento.parse::<EventKind>()?,
            actor,
            before,
            after,
            parse_timestamp(&self.criado_em)?,
        )
        .with_justificativa(&self.justificativa)
        .with_event_id(self.event_id);

        if let Some(resposta) = self.resposta_sim_nao {
            event = event.with_resposta_sim_nao(resposta);
        }
        Ok(event)
    }
}

impl NotificacaoRow {
    pub(crate) fn into_stored(self) -> Result<StoredNotification, PersistenceError> {
        let recipients: Vec<Recipient> = serde_json::from_str(&self.recipients_json)?;
        Ok(StoredNotification {
            notificacao_id: self.notificacao_id,
            dispatched: self.dispatched,
            notification: Notification {
                solicitacao_id: self.solicitacao_id.parse::<SolicitacaoId>()?,
                kind: self.kind.parse::<NotificationKind>()?,
                recipients,
                subject: self.subject,
                title: self.title,
            },
        })
    }
}
