// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use serde::{Deserialize, Serialize};
use time::Date;

/// API request to file a new request.
///
/// Kinds and institutions arrive as text and are validated by the handler.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateSolicitacaoRequest {
    /// The request kind, e.g. `inversao_cardapio`.
    pub kind: String,
    /// The school, absent for directorate requests.
    pub escola: Option<String>,
    pub diretoria_regional: String,
    pub terceirizada: Option<String>,
    /// The dated occurrences; at least one.
    pub datas: Vec<Date>,
    /// Emergency snack alterations skip the notice rules.
    #[serde(default)]
    pub lanche_emergencial: bool,
}

/// API request for a named transition.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionRequest {
    #[serde(default)]
    pub justificativa: Option<String>,
    /// Required when the caterer answers a question.
    #[serde(default)]
    pub resposta_sim_nao: Option<bool>,
}

/// API request for a CODAE decision, routed by the current status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodaeDecisionRequest {
    /// `autoriza` or `nega`.
    pub decision: String,
    #[serde(default)]
    pub justificativa: Option<String>,
}

/// API request to cancel a request or some of its dates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelRequest {
    pub justificativa: String,
    /// Dates to cancel; empty cancels the whole request.
    #[serde(default)]
    pub datas: Vec<Date>,
}

/// One dated occurrence of a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataOcorrenciaInfo {
    pub data: Date,
    pub cancelado: bool,
    pub cancelado_justificativa: Option<String>,
}

/// A request as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SolicitacaoResponse {
    pub id: String,
    /// Short identifier shown to users.
    pub id_externo: String,
    pub kind: String,
    pub workflow: String,
    pub status: String,
    /// Human-readable status.
    pub status_label: String,
    pub escola: Option<String>,
    pub diretoria_regional: String,
    pub terceirizada: Option<String>,
    pub datas: Vec<DataOcorrenciaInfo>,
    pub data_inicial: Date,
    pub data_final: Date,
    pub prioridade: String,
    pub foi_solicitado_fora_do_prazo: bool,
    pub lanche_emergencial: bool,
    pub version: u64,
    /// Transitions the workflow offers from the current status.
    pub available_transitions: Vec<String>,
}

/// API response for a command that was applied and stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionResponse {
    pub solicitacao: SolicitacaoResponse,
    /// The log row written; absent for partial cancellations.
    pub event_id: Option<i64>,
    /// Dates cancelled without a status change.
    pub cancelled_dates: Vec<Date>,
    pub notification_ids: Vec<i64>,
    pub message: String,
}

/// One row of a request's transition log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogEntryResponse {
    pub event_id: Option<i64>,
    pub status_evento: String,
    pub actor_id: String,
    pub usuario: String,
    pub justificativa: String,
    pub resposta_sim_nao: Option<bool>,
    pub status_anterior: String,
    pub status_posterior: String,
    /// RFC 3339.
    pub criado_em: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientInfo {
    pub kind: String,
    pub institution: String,
}

/// An outbox entry waiting for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotificationResponse {
    pub notificacao_id: i64,
    pub solicitacao_id: String,
    pub kind: String,
    pub subject: String,
    pub title: String,
    pub recipients: Vec<RecipientInfo>,
}

/// API response for an expiry sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CancelExpiredResponse {
    /// Requests cancelled by this sweep.
    pub cancelled: Vec<String>,
    /// Requests skipped because they changed during the sweep.
    pub conflicts: Vec<String>,
}
