// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Status codes shared by every request workflow.
//!
//! A status is only meaningful together with the workflow that owns it.
//! Which codes a given request may hold is decided by
//! [`Workflow::states`](crate::Workflow::states).

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// A request status as stored and exchanged on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    /// Draft, not yet submitted
    Rascunho,
    /// Waiting for the regional directorate to validate
    DreAValidar,
    /// Validated by the regional directorate
    DreValidado,
    /// The regional directorate asked the school to revise
    DrePediuEscolaRevisar,
    /// Rejected by the regional directorate
    DreNaoValidouPedidoEscola,
    /// Waiting for the central authority (directorate-originated requests)
    CodaeAAutorizar,
    /// The central authority asked the directorate to revise.
    ///
    /// The stored code is `DRE_PEDE_ESCOLA_REVISAR` for historical reasons.
    #[serde(rename = "DRE_PEDE_ESCOLA_REVISAR")]
    CodaePediuDreRevisar,
    /// The central authority opened a challenge to the caterer
    CodaeQuestionado,
    /// The caterer answered the challenge
    TerceirizadaRespondeuQuestionamento,
    /// Authorized by the central authority
    CodaeAutorizado,
    /// Denied by the central authority
    CodaeNegouPedido,
    /// The caterer acknowledged the request
    TerceirizadaTomouCiencia,
    /// Informational request delivered to the caterer
    Informado,
    /// Cancelled by the school
    EscolaCancelou,
    /// Cancelled by the regional directorate
    DreCancelou,
    /// Cancelled by the system after the event date passed
    CanceladoAutomaticamente,
    /// Cancelled by the system (directorate-originated requests)
    CancelamentoAutomatico,
    /// CODAE refused to cancel a special diet
    CodaeNegouCancelamento,
    /// The school asked to deactivate an authorized special diet
    EscolaSolicitouInativacao,
    CodaeNegouInativacao,
    CodaeAutorizouInativacao,
    TerceirizadaTomouCienciaInativacao,
    /// The diet reached its end date
    TerminadaAutomaticamenteSistema,
    /// The student moved to another school
    CanceladoAlunoMudouEscola,
    /// The student left the municipal network
    CanceladoAlunoNaoPertenceRede,
    /// Delivery requisition received from the procurement system
    AguardandoEnvio,
    /// Sent by the logistics division to the distributor
    DilogEnvia,
    /// Cancellation requested, waiting for the distributor to confirm
    AguardandoCancelamento,
    /// Delivery requisition cancelled
    Cancelada,
    DistribuidorConfirma,
    DistribuidorSolicitaAlteracao,
    DilogAceitaAlteracao,
}

impl Status {
    /// Every known status code.
    pub const ALL: [Self; 32] = [
        Self::Rascunho,
        Self::DreAValidar,
        Self::DreValidado,
        Self::DrePediuEscolaRevisar,
        Self::DreNaoValidouPedidoEscola,
        Self::CodaeAAutorizar,
        Self::CodaePediuDreRevisar,
        Self::CodaeQuestionado,
        Self::TerceirizadaRespondeuQuestionamento,
        Self::CodaeAutorizado,
        Self::CodaeNegouPedido,
        Self::TerceirizadaTomouCiencia,
        Self::Informado,
        Self::EscolaCancelou,
        Self::DreCancelou,
        Self::CanceladoAutomaticamente,
        Self::CancelamentoAutomatico,
        Self::CodaeNegouCancelamento,
        Self::EscolaSolicitouInativacao,
        Self::CodaeNegouInativacao,
        Self::CodaeAutorizouInativacao,
        Self::TerceirizadaTomouCienciaInativacao,
        Self::TerminadaAutomaticamenteSistema,
        Self::CanceladoAlunoMudouEscola,
        Self::CanceladoAlunoNaoPertenceRede,
        Self::AguardandoEnvio,
        Self::DilogEnvia,
        Self::AguardandoCancelamento,
        Self::Cancelada,
        Self::DistribuidorConfirma,
        Self::DistribuidorSolicitaAlteracao,
        Self::DilogAceitaAlteracao,
    ];

    /// Returns the stored code of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Rascunho => "RASCUNHO",
            Self::DreAValidar => "DRE_A_VALIDAR",
            Self::DreValidado => "DRE_VALIDADO",
            Self::DrePediuEscolaRevisar => "DRE_PEDIU_ESCOLA_REVISAR",
            Self::DreNaoValidouPedidoEscola => "DRE_NAO_VALIDOU_PEDIDO_ESCOLA",
            Self::CodaeAAutorizar => "CODAE_A_AUTORIZAR",
            Self::CodaePediuDreRevisar => "DRE_PEDE_ESCOLA_REVISAR",
            Self::CodaeQuestionado => "CODAE_QUESTIONADO",
            Self::TerceirizadaRespondeuQuestionamento => "TERCEIRIZADA_RESPONDEU_QUESTIONAMENTO",
            Self::CodaeAutorizado => "CODAE_AUTORIZADO",
            Self::CodaeNegouPedido => "CODAE_NEGOU_PEDIDO",
            Self::TerceirizadaTomouCiencia => "TERCEIRIZADA_TOMOU_CIENCIA",
            Self::Informado => "INFORMADO",
            Self::EscolaCancelou => "ESCOLA_CANCELOU",
            Self::DreCancelou => "DRE_CANCELOU",
            Self::CanceladoAutomaticamente => "CANCELADO_AUTOMATICAMENTE",
            Self::CancelamentoAutomatico => "CANCELAMENTO_AUTOMATICO",
            Self::CodaeNegouCancelamento => "CODAE_NEGOU_CANCELAMENTO",
            Self::EscolaSolicitouInativacao => "ESCOLA_SOLICITOU_INATIVACAO",
            Self::CodaeNegouInativacao => "CODAE_NEGOU_INATIVACAO",
            Self::CodaeAutorizouInativacao => "CODAE_AUTORIZOU_INATIVACAO",
            Self::TerceirizadaTomouCienciaInativacao => "TERCEIRIZADA_TOMOU_CIENCIA_INATIVACAO",
            Self::TerminadaAutomaticamenteSistema => "TERMINADA_AUTOMATICAMENTE_SISTEMA",
            Self::CanceladoAlunoMudouEscola => "CANCELADO_ALUNO_MUDOU_ESCOLA",
            Self::CanceladoAlunoNaoPertenceRede => "CANCELADO_ALUNO_NAO_PERTENCE_REDE",
            Self::AguardandoEnvio => "AGUARDANDO_ENVIO",
            Self::DilogEnvia => "DILOG_ENVIA",
            Self::AguardandoCancelamento => "AGUARDANDO_CANCELAMENTO",
            Self::Cancelada => "CANCELADA",
            Self::DistribuidorConfirma => "DISTRIBUIDOR_CONFIRMA",
            Self::DistribuidorSolicitaAlteracao => "DISTRIBUIDOR_SOLICITA_ALTERACAO",
            Self::DilogAceitaAlteracao => "DILOG_ACEITA_ALTERACAO",
        }
    }

    /// Human-readable label, as shown to school staff.
    #[must_use]
    pub const fn label(&self) -> &'static str {
        match self {
            Self::Rascunho => "Rascunho",
            Self::DreAValidar => "Aguardando validação da DRE",
            Self::DreValidado => "Validado pela DRE",
            Self::DrePediuEscolaRevisar => "Escola tem que revisar o pedido",
            Self::DreNaoValidouPedidoEscola => "DRE não validou pedido da escola",
            Self::CodaeAAutorizar => "Aguardando autorização da CODAE",
            Self::CodaePediuDreRevisar => "DRE tem que revisar o pedido",
            Self::CodaeQuestionado => "Questionado pela CODAE",
            Self::TerceirizadaRespondeuQuestionamento => "Terceirizada respondeu questionamento",
            Self::CodaeAutorizado => "CODAE autorizou pedido",
            Self::CodaeNegouPedido => "CODAE negou pedido",
            Self::TerceirizadaTomouCiencia => "Terceirizada tomou ciência",
            Self::Informado => "Informado",
            Self::EscolaCancelou => "Escola cancelou",
            Self::DreCancelou => "DRE cancelou",
            Self::CanceladoAutomaticamente | Self::CancelamentoAutomatico => {
                "Cancelamento automático"
            }
            Self::CodaeNegouCancelamento | Self::CodaeNegouInativacao => {
                "CODAE negou o cancelamento"
            }
            Self::EscolaSolicitouInativacao => "Escola solicitou cancelamento",
            Self::CodaeAutorizouInativacao => "CODAE autorizou o cancelamento",
            Self::TerceirizadaTomouCienciaInativacao => {
                "Terceirizada tomou ciência do cancelamento"
            }
            Self::TerminadaAutomaticamenteSistema => "Data de término atingida",
            Self::CanceladoAlunoMudouEscola => "Cancelamento por alteração de unidade educacional",
            Self::CanceladoAlunoNaoPertenceRede => {
                "Cancelamento para aluno não matriculado na rede municipal"
            }
            Self::AguardandoEnvio => "Aguardando envio",
            Self::DilogEnvia => "Enviada",
            Self::AguardandoCancelamento => "Aguardando cancelamento",
            Self::Cancelada => "Cancelada",
            Self::DistribuidorConfirma => "Confirmada",
            Self::DistribuidorSolicitaAlteracao => "Em análise",
            Self::DilogAceitaAlteracao => "Alterada",
        }
    }
}

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Status {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == s)
            .ok_or_else(|| DomainError::UnknownStatus(s.to_string()))
    }
}
