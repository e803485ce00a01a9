// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

//! Transition log types.
//!
//! Every successful transition produces exactly one [`AuditEvent`].
//! Events are values: nothing in this crate mutates one after it is built,
//! and the storage layer refuses updates and deletes on the log table.

#[cfg(test)]
mod tests;

use serde::{Deserialize, Serialize};
use sigpae_domain::{DomainError, InstitutionId, InstitutionKind, SolicitacaoId, Status};
use std::str::FromStr;
use time::OffsetDateTime;

/// Identifier of the system actor used for automatic transitions.
pub const SYSTEM_ACTOR_ID: &str = "sistema";

/// The institution an actor works for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vinculo {
    pub kind: InstitutionKind,
    pub institution: InstitutionId,
}

impl Vinculo {
    #[must_use]
    pub const fn new(kind: InstitutionKind, institution: InstitutionId) -> Self {
        Self { kind, institution }
    }
}

/// The person or process that performed a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// Display name.
    pub name: String,
    /// Absent for the system actor.
    pub vinculo: Option<Vinculo>,
}

impl Actor {
    /// Creates a human actor.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidActor` if the id or the name is blank.
    pub fn new(id: &str, name: &str, vinculo: Vinculo) -> Result<Self, DomainError> {
        if id.trim().is_empty() {
            return Err(DomainError::InvalidActor(String::from("id vazio")));
        }
        if name.trim().is_empty() {
            return Err(DomainError::InvalidActor(String::from("nome vazio")));
        }
        Ok(Self {
            id: id.trim().to_string(),
            name: name.trim().to_string(),
            vinculo: Some(vinculo),
        })
    }

    /// The actor recorded for automatic transitions.
    #[must_use]
    pub fn system() -> Self {
        Self {
            id: String::from(SYSTEM_ACTOR_ID),
            name: String::from("Sistema"),
            vinculo: None,
        }
    }

    #[must_use]
    pub const fn is_system(&self) -> bool {
        self.vinculo.is_none()
    }

    #[must_use]
    pub fn institution_kind(&self) -> Option<InstitutionKind> {
        self.vinculo.as_ref().map(|vinculo| vinculo.kind)
    }
}

/// What a log entry records (`status_evento`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EventKind {
    InicioFluxo,
    DreValidou,
    DrePediuRevisao,
    DreNaoValidou,
    EscolaRevisou,
    CodaeAutorizou,
    CodaeQuestionou,
    CodaeNegou,
    CodaePediuRevisao,
    DreRevisou,
    TerceirizadaRespondeuQuestionamento,
    TerceirizadaTomouCiencia,
    EscolaCancelou,
    DreCancelou,
    CanceladoAutomaticamente,
    CodaeNegouCancelamento,
    InicioFluxoInativacao,
    CodaeAutorizouInativacao,
    CodaeNegouInativacao,
    TerceirizadaTomouCienciaInativacao,
    TerminadaAutomaticamenteSistema,
    CanceladoAlunoMudouEscola,
    CanceladoAlunoNaoPertenceRede,
    DilogEnviaSolicitacao,
    DistribuidorConfirmaSolicitacao,
    DistribuidorSolicitaAlteracaoSolicitacao,
    DilogAceitaAlteracao,
    DilogNegaAlteracao,
    PapaAguardaConfirmacaoCancelamentoSolicitacao,
    PapaCancelaSolicitacao,
    DistribuidorConfirmaCancelamento,
}

impl EventKind {
    pub const ALL: [Self; 31] = [
        Self::InicioFluxo,
        Self::DreValidou,
        Self::DrePediuRevisao,
        Self::DreNaoValidou,
        Self::EscolaRevisou,
        Self::CodaeAutorizou,
        Self::CodaeQuestionou,
        Self::CodaeNegou,
        Self::CodaePediuRevisao,
        Self::DreRevisou,
        Self::TerceirizadaRespondeuQuestionamento,
        Self::TerceirizadaTomouCiencia,
        Self::EscolaCancelou,
        Self::DreCancelou,
        Self::CanceladoAutomaticamente,
        Self::CodaeNegouCancelamento,
        Self::InicioFluxoInativacao,
        Self::CodaeAutorizouInativacao,
        Self::CodaeNegouInativacao,
        Self::TerceirizadaTomouCienciaInativacao,
        Self::TerminadaAutomaticamenteSistema,
        Self::CanceladoAlunoMudouEscola,
        Self::CanceladoAlunoNaoPertenceRede,
        Self::DilogEnviaSolicitacao,
        Self::DistribuidorConfirmaSolicitacao,
        Self::DistribuidorSolicitaAlteracaoSolicitacao,
        Self::DilogAceitaAlteracao,
        Self::DilogNegaAlteracao,
        Self::PapaAguardaConfirmacaoCancelamentoSolicitacao,
        Self::PapaCancelaSolicitacao,
        Self::DistribuidorConfirmaCancelamento,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::InicioFluxo => "INICIO_FLUXO",
            Self::DreValidou => "DRE_VALIDOU",
            Self::DrePediuRevisao => "DRE_PEDIU_REVISAO",
            Self::DreNaoValidou => "DRE_NAO_VALIDOU",
            Self::EscolaRevisou => "ESCOLA_REVISOU",
            Self::CodaeAutorizou => "CODAE_AUTORIZOU",
            Self::CodaeQuestionou => "CODAE_QUESTIONOU",
            Self::CodaeNegou => "CODAE_NEGOU",
            Self::CodaePediuRevisao => "CODAE_PEDIU_REVISAO",
            Self::DreRevisou => "DRE_REVISOU",
            Self::TerceirizadaRespondeuQuestionamento => "TERCEIRIZADA_RESPONDEU_QUESTIONAMENTO",
            Self::TerceirizadaTomouCiencia => "TERCEIRIZADA_TOMOU_CIENCIA",
            Self::EscolaCancelou => "ESCOLA_CANCELOU",
            Self::DreCancelou => "DRE_CANCELOU",
            Self::CanceladoAutomaticamente => "CANCELADO_AUTOMATICAMENTE",
            Self::CodaeNegouCancelamento => "CODAE_NEGOU_CANCELAMENTO",
            Self::InicioFluxoInativacao => "INICIO_FLUXO_INATIVACAO",
            Self::CodaeAutorizouInativacao => "CODAE_AUTORIZOU_INATIVACAO",
            Self::CodaeNegouInativacao => "CODAE_NEGOU_INATIVACAO",
            Self::TerceirizadaTomouCienciaInativacao => "TERCEIRIZADA_TOMOU_CIENCIA_INATIVACAO",
            Self::TerminadaAutomaticamenteSistema => "TERMINADA_AUTOMATICAMENTE_SISTEMA",
            Self::CanceladoAlunoMudouEscola => "CANCELADO_ALUNO_MUDOU_ESCOLA",
            Self::CanceladoAlunoNaoPertenceRede => "CANCELADO_ALUNO_NAO_PERTENCE_REDE",
            Self::DilogEnviaSolicitacao => "DILOG_ENVIA_SOLICITACAO",
            Self::DistribuidorConfirmaSolicitacao => "DISTRIBUIDOR_CONFIRMA_SOLICITACAO",
            Self::DistribuidorSolicitaAlteracaoSolicitacao => "DISTRIBUIDOR_SOLICITA_ALTERACAO_SOLICITACAO",
            Self::DilogAceitaAlteracao => "DILOG_ACEITA_ALTERACAO",
            Self::DilogNegaAlteracao => "DILOG_NEGA_ALTERACAO",
            Self::PapaAguardaConfirmacaoCancelamentoSolicitacao => "PAPA_AGUARDA_CONFIRMACAO_CANCELAMENTO_SOLICITACAO",
            Self::PapaCancelaSolicitacao => "PAPA_CANCELA_SOLICITACAO",
            Self::DistribuidorConfirmaCancelamento => "DISTRIBUIDOR_CONFIRMA_CANCELAMENTO",
        }
    }
}

impl std::fmt::Display for EventKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EventKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownEventKind(s.to_string()))
    }
}

/// The request as seen on one side of a transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StateSnapshot {
    pub status: Status,
    /// Free-form summary, e.g. `datas=3,canceladas=1`.
    pub data: String,
}

impl StateSnapshot {
    #[must_use]
    pub const fn new(status: Status, data: String) -> Self {
        Self { status, data }
    }
}

/// An immutable transition log entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuditEvent {
    /// Assigned by storage; `None` until persisted.
    pub event_id: Option<i64>,
    /// The request this entry belongs to.
    pub uuid_original: SolicitacaoId,
    pub status_evento: EventKind,
    pub actor: Actor,
    /// Empty when the transition takes no justification.
    pub justificativa: String,
    /// The caterer's yes/no answer to a challenge.
    pub resposta_sim_nao: Option<bool>,
    pub before: StateSnapshot,
    pub after: StateSnapshot,
    pub criado_em: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new `AuditEvent` without justification or answer.
    ///
    /// # Arguments
    ///
    /// * `uuid_original` - The request the transition was applied to
    /// * `status_evento` - What happened
    /// * `actor` - Who did it
    /// * `before` - The request before the transition
    /// * `after` - The request after the transition
    /// * `criado_em` - When it happened
    #[must_use]
    pub fn new(
        uuid_original: SolicitacaoId,
        status_evento: EventKind,
        actor: Actor,
        before: StateSnapshot,
        after: StateSnapshot,
        criado_em: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            uuid_original,
            status_evento,
            actor,
            justificativa: String::new(),
            resposta_sim_nao: None,
            before,
            after,
            criado_em,
        }
    }

    #[must_use]
    pub fn with_justificativa(self, justificativa: &str) -> Self {
        Self {
            justificativa: justificativa.to_string(),
            ..self
        }
    }

    #[must_use]
    pub fn with_resposta_sim_nao(self, resposta_sim_nao: bool) -> Self {
        Self {
            resposta_sim_nao: Some(resposta_sim_nao),
            ..self
        }
    }

    /// Attaches the identifier assigned by storage.
    #[must_use]
    pub fn with_event_id(self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self
        }
    }
}
