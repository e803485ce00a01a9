// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Workflow definitions.
//!
//! Each workflow is a closed set of states plus a static transition table.
//! A rule names the transition, the states it may start from, and the
//! state it produces. Guards that depend on the request itself (notice
//! windows, justification, late authorization) live outside the table
//! and are evaluated by the engine before the target is adopted.

use crate::error::DomainError;
use crate::status::Status;
use crate::transition::TransitionName;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// One row of a transition table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionRule {
    pub name: TransitionName,
    pub sources: &'static [Status],
    pub target: Status,
}

const fn rule(
    name: TransitionName,
    sources: &'static [Status],
    target: Status,
) -> TransitionRule {
    TransitionRule {
        name,
        sources,
        target,
    }
}

const ESCOLA_STATES: &[Status] = &[
    Status::Rascunho,
    Status::DreAValidar,
    Status::DreValidado,
    Status::DrePediuEscolaRevisar,
    Status::DreNaoValidouPedidoEscola,
    Status::CodaeQuestionado,
    Status::TerceirizadaRespondeuQuestionamento,
    Status::CodaeAutorizado,
    Status::CodaeNegouPedido,
    Status::TerceirizadaTomouCiencia,
    Status::EscolaCancelou,
    Status::CanceladoAutomaticamente,
];

const ESCOLA_PENDING: &[Status] = &[
    Status::DreAValidar,
    Status::DreValidado,
    Status::DrePediuEscolaRevisar,
    Status::CodaeQuestionado,
    Status::TerceirizadaRespondeuQuestionamento,
];

const ESCOLA_TRANSITIONS: &[TransitionRule] = &[
    rule(
        TransitionName::IniciaFluxo,
        &[Status::Rascunho],
        Status::DreAValidar,
    ),
    rule(
        TransitionName::DreValida,
        &[Status::DreAValidar],
        Status::DreValidado,
    ),
    rule(
        TransitionName::DrePedeRevisao,
        &[Status::DreAValidar],
        Status::DrePediuEscolaRevisar,
    ),
    rule(
        TransitionName::DreNaoValida,
        &[Status::DreAValidar],
        Status::DreNaoValidouPedidoEscola,
    ),
    rule(
        TransitionName::EscolaRevisa,
        &[Status::DrePediuEscolaRevisar],
        Status::DreAValidar,
    ),
    rule(
        TransitionName::CodaeAutoriza,
        &[Status::DreValidado],
        Status::CodaeAutorizado,
    ),
    rule(
        TransitionName::CodaeQuestiona,
        &[Status::DreValidado],
        Status::CodaeQuestionado,
    ),
    rule(
        TransitionName::CodaeAutorizaQuestionamento,
        &[
            Status::DreValidado,
            Status::TerceirizadaRespondeuQuestionamento,
        ],
        Status::CodaeAutorizado,
    ),
    rule(
        TransitionName::CodaeNegaQuestionamento,
        &[Status::TerceirizadaRespondeuQuestionamento],
        Status::CodaeNegouPedido,
    ),
    rule(
        TransitionName::CodaeNega,
        &[Status::DreValidado, Status::CodaeQuestionado],
        Status::CodaeNegouPedido,
    ),
    rule(
        TransitionName::TerceirizadaRespondeQuestionamento,
        &[Status::CodaeQuestionado],
        Status::TerceirizadaRespondeuQuestionamento,
    ),
    rule(
        TransitionName::TerceirizadaTomaCiencia,
        &[Status::CodaeAutorizado],
        Status::TerceirizadaTomouCiencia,
    ),
    rule(
        TransitionName::EscolaCancela,
        &[
            Status::DreAValidar,
            Status::DreValidado,
            Status::DrePediuEscolaRevisar,
            Status::CodaeQuestionado,
            Status::TerceirizadaRespondeuQuestionamento,
            Status::CodaeAutorizado,
            Status::TerceirizadaTomouCiencia,
        ],
        Status::EscolaCancelou,
    ),
    rule(
        TransitionName::CancelaAutomaticamente,
        ESCOLA_PENDING,
        Status::CanceladoAutomaticamente,
    ),
];

const DRE_STATES: &[Status] = &[
    Status::Rascunho,
    Status::CodaeAAutorizar,
    Status::CodaePediuDreRevisar,
    Status::CodaeNegouPedido,
    Status::CodaeAutorizado,
    Status::CodaeQuestionado,
    Status::TerceirizadaRespondeuQuestionamento,
    Status::TerceirizadaTomouCiencia,
    Status::DreCancelou,
    Status::CancelamentoAutomatico,
];

const DRE_PENDING: &[Status] = &[
    Status::CodaeAAutorizar,
    Status::CodaePediuDreRevisar,
    Status::CodaeQuestionado,
    Status::TerceirizadaRespondeuQuestionamento,
];

const DRE_TRANSITIONS: &[TransitionRule] = &[
    rule(
        TransitionName::IniciaFluxo,
        &[Status::Rascunho],
        Status::CodaeAAutorizar,
    ),
    rule(
        TransitionName::CodaePedeRevisao,
        &[Status::CodaeAAutorizar],
        Status::CodaePediuDreRevisar,
    ),
    rule(
        TransitionName::CodaeNega,
        &[Status::CodaeAAutorizar, Status::CodaeQuestionado],
        Status::CodaeNegouPedido,
    ),
    rule(
        TransitionName::DreRevisa,
        &[Status::CodaePediuDreRevisar],
        Status::CodaeAAutorizar,
    ),
    rule(
        TransitionName::CodaeAutoriza,
        &[Status::CodaeAAutorizar],
        Status::CodaeAutorizado,
    ),
    rule(
        TransitionName::CodaeQuestiona,
        &[Status::CodaeAAutorizar],
        Status::CodaeQuestionado,
    ),
    rule(
        TransitionName::CodaeAutorizaQuestionamento,
        &[Status::TerceirizadaRespondeuQuestionamento],
        Status::CodaeAutorizado,
    ),
    rule(
        TransitionName::CodaeNegaQuestionamento,
        &[Status::TerceirizadaRespondeuQuestionamento],
        Status::CodaeNegouPedido,
    ),
    rule(
        TransitionName::TerceirizadaTomaCiencia,
        &[Status::CodaeAutorizado],
        Status::TerceirizadaTomouCiencia,
    ),
    rule(
        TransitionName::TerceirizadaRespondeQuestionamento,
        &[Status::CodaeQuestionado],
        Status::TerceirizadaRespondeuQuestionamento,
    ),
    rule(
        TransitionName::DreCancela,
        &[
            Status::CodaeAAutorizar,
            Status::CodaePediuDreRevisar,
            Status::CodaeQuestionado,
            Status::TerceirizadaRespondeuQuestionamento,
            Status::CodaeAutorizado,
            Status::TerceirizadaTomouCiencia,
        ],
        Status::DreCancelou,
    ),
    rule(
        TransitionName::CancelaAutomaticamente,
        DRE_PENDING,
        Status::CancelamentoAutomatico,
    ),
];

const INFORMATIVO_STATES: &[Status] = &[
    Status::Rascunho,
    Status::Informado,
    Status::TerceirizadaTomouCiencia,
    Status::EscolaCancelou,
];

const INFORMATIVO_TRANSITIONS: &[TransitionRule] = &[
    rule(
        TransitionName::Informa,
        &[Status::Rascunho],
        Status::Informado,
    ),
    rule(
        TransitionName::TerceirizadaTomaCiencia,
        &[Status::Informado],
        Status::TerceirizadaTomouCiencia,
    ),
    rule(
        TransitionName::EscolaCancela,
        &[Status::Informado, Status::TerceirizadaTomouCiencia],
        Status::EscolaCancelou,
    ),
];

const DIETA_STATES: &[Status] = &[
    Status::Rascunho,
    Status::CodaeAAutorizar,
    Status::CodaeNegouPedido,
    Status::CodaeAutorizado,
    Status::TerceirizadaTomouCiencia,
    Status::EscolaCancelou,
    Status::CodaeNegouCancelamento,
    Status::EscolaSolicitouInativacao,
    Status::CodaeNegouInativacao,
    Status::CodaeAutorizouInativacao,
    Status::TerceirizadaTomouCienciaInativacao,
    Status::TerminadaAutomaticamenteSistema,
    Status::CanceladoAlunoMudouEscola,
    Status::CanceladoAlunoNaoPertenceRede,
];

const DIETA_TRANSITIONS: &[TransitionRule] = &[
    rule(
        TransitionName::IniciaFluxo,
        &[Status::Rascunho],
        Status::CodaeAAutorizar,
    ),
    rule(
        TransitionName::CodaeNega,
        &[Status::CodaeAAutorizar],
        Status::CodaeNegouPedido,
    ),
    rule(
        TransitionName::CodaeAutoriza,
        &[Status::Rascunho, Status::CodaeAAutorizar],
        Status::CodaeAutorizado,
    ),
    rule(
        TransitionName::TerceirizadaTomaCiencia,
        &[Status::CodaeAutorizado],
        Status::TerceirizadaTomouCiencia,
    ),
    rule(
        TransitionName::CancelarPedido,
        &[
            Status::CodaeAAutorizar,
            Status::EscolaSolicitouInativacao,
            Status::CodaeAutorizado,
        ],
        Status::EscolaCancelou,
    ),
    rule(
        TransitionName::NegarCancelamentoPedido,
        &[Status::CodaeAAutorizar, Status::EscolaSolicitouInativacao],
        Status::CodaeNegouCancelamento,
    ),
    rule(
        TransitionName::IniciaFluxoInativacao,
        &[
            Status::Rascunho,
            Status::CodaeAutorizado,
            Status::TerceirizadaTomouCiencia,
        ],
        Status::EscolaSolicitouInativacao,
    ),
    rule(
        TransitionName::CodaeNegaInativacao,
        &[Status::EscolaSolicitouInativacao],
        Status::CodaeNegouInativacao,
    ),
    rule(
        TransitionName::CodaeAutorizaInativacao,
        &[Status::EscolaSolicitouInativacao],
        Status::CodaeAutorizouInativacao,
    ),
    rule(
        TransitionName::TerceirizadaTomaCienciaInativacao,
        &[Status::CodaeAutorizouInativacao],
        Status::TerceirizadaTomouCienciaInativacao,
    ),
    rule(
        TransitionName::CancelarAlunoMudouEscola,
        &[Status::CodaeAutorizado],
        Status::CanceladoAlunoMudouEscola,
    ),
    rule(
        TransitionName::CancelarAlunoNaoPertenceRede,
        &[Status::CodaeAutorizado],
        Status::CanceladoAlunoNaoPertenceRede,
    ),
    rule(
        TransitionName::Termina,
        &[
            Status::CodaeAutorizado,
            Status::TerceirizadaTomouCiencia,
            Status::EscolaSolicitouInativacao,
            Status::CodaeNegouInativacao,
        ],
        Status::TerminadaAutomaticamenteSistema,
    ),
];

const REMESSA_STATES: &[Status] = &[
    Status::AguardandoEnvio,
    Status::DilogEnvia,
    Status::AguardandoCancelamento,
    Status::Cancelada,
    Status::DistribuidorConfirma,
    Status::DistribuidorSolicitaAlteracao,
    Status::DilogAceitaAlteracao,
];

const REMESSA_TRANSITIONS: &[TransitionRule] = &[
    rule(
        TransitionName::IniciaFluxo,
        &[Status::AguardandoEnvio],
        Status::DilogEnvia,
    ),
    rule(
        TransitionName::EmpresaAtende,
        &[Status::DilogEnvia],
        Status::DistribuidorConfirma,
    ),
    rule(
        TransitionName::SolicitaAlteracao,
        &[Status::DilogEnvia],
        Status::DistribuidorSolicitaAlteracao,
    ),
    rule(
        TransitionName::CancelaSolicitacao,
        &[
            Status::AguardandoEnvio,
            Status::DilogEnvia,
            Status::DistribuidorConfirma,
            Status::DistribuidorSolicitaAlteracao,
            Status::Cancelada,
            Status::DilogAceitaAlteracao,
        ],
        Status::Cancelada,
    ),
    rule(
        TransitionName::DilogAceitaAlteracao,
        &[Status::DistribuidorSolicitaAlteracao],
        Status::DilogAceitaAlteracao,
    ),
    rule(
        TransitionName::DilogNegaAlteracao,
        &[Status::DistribuidorSolicitaAlteracao],
        Status::DilogEnvia,
    ),
    // Once the distributor has confirmed, cancelling needs its agreement.
    rule(
        TransitionName::AguardaConfirmacaoDeCancelamento,
        &[
            Status::DistribuidorConfirma,
            Status::DistribuidorSolicitaAlteracao,
        ],
        Status::AguardandoCancelamento,
    ),
    rule(
        TransitionName::DistribuidorConfirmaCancelamento,
        &[Status::AguardandoCancelamento],
        Status::Cancelada,
    ),
];

/// The state machine a request follows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Workflow {
    /// Requests raised by a school: DRE validates, CODAE decides.
    PedidoAPartirDaEscola,
    /// Requests raised by a regional directorate: CODAE decides directly.
    PedidoAPartirDaDiretoriaRegional,
    /// Informational notices from a school: no approval required.
    InformativoPartindoDaEscola,
    /// Special diets requested by a school: CODAE decides, and an active
    /// diet can later be deactivated or ended.
    DietaEspecial,
    /// Delivery requisitions: the logistics division sends them to the
    /// distributor, who confirms or asks for changes.
    SolicitacaoRemessa,
}

impl Workflow {
    pub const ALL: [Self; 5] = [
        Self::PedidoAPartirDaEscola,
        Self::PedidoAPartirDaDiretoriaRegional,
        Self::InformativoPartindoDaEscola,
        Self::DietaEspecial,
        Self::SolicitacaoRemessa,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PedidoAPartirDaEscola => "pedido_a_partir_da_escola",
            Self::PedidoAPartirDaDiretoriaRegional => "pedido_a_partir_da_diretoria_regional",
            Self::InformativoPartindoDaEscola => "informativo_partindo_da_escola",
            Self::DietaEspecial => "dieta_especial",
            Self::SolicitacaoRemessa => "solicitacao_remessa",
        }
    }

    /// The declared state set.
    #[must_use]
    pub const fn states(&self) -> &'static [Status] {
        match self {
            Self::PedidoAPartirDaEscola => ESCOLA_STATES,
            Self::PedidoAPartirDaDiretoriaRegional => DRE_STATES,
            Self::InformativoPartindoDaEscola => INFORMATIVO_STATES,
            Self::DietaEspecial => DIETA_STATES,
            Self::SolicitacaoRemessa => REMESSA_STATES,
        }
    }

    /// The transition table.
    #[must_use]
    pub const fn transitions(&self) -> &'static [TransitionRule] {
        match self {
            Self::PedidoAPartirDaEscola => ESCOLA_TRANSITIONS,
            Self::PedidoAPartirDaDiretoriaRegional => DRE_TRANSITIONS,
            Self::InformativoPartindoDaEscola => INFORMATIVO_TRANSITIONS,
            Self::DietaEspecial => DIETA_TRANSITIONS,
            Self::SolicitacaoRemessa => REMESSA_TRANSITIONS,
        }
    }

    #[must_use]
    pub const fn initial_state(&self) -> Status {
        match self {
            Self::SolicitacaoRemessa => Status::AguardandoEnvio,
            _ => Status::Rascunho,
        }
    }

    /// The transition that submits a draft.
    #[must_use]
    pub const fn submission(&self) -> TransitionName {
        match self {
            Self::InformativoPartindoDaEscola => TransitionName::Informa,
            _ => TransitionName::IniciaFluxo,
        }
    }

    /// The transition used when the requester cancels.
    #[must_use]
    pub const fn cancellation(&self) -> TransitionName {
        match self {
            Self::PedidoAPartirDaEscola | Self::InformativoPartindoDaEscola => {
                TransitionName::EscolaCancela
            }
            Self::PedidoAPartirDaDiretoriaRegional => TransitionName::DreCancela,
            Self::DietaEspecial => TransitionName::CancelarPedido,
            Self::SolicitacaoRemessa => TransitionName::CancelaSolicitacao,
        }
    }

    /// The state reached when the requester cancels.
    #[must_use]
    pub const fn cancelled_state(&self) -> Status {
        match self {
            Self::PedidoAPartirDaEscola
            | Self::InformativoPartindoDaEscola
            | Self::DietaEspecial => Status::EscolaCancelou,
            Self::PedidoAPartirDaDiretoriaRegional => Status::DreCancelou,
            Self::SolicitacaoRemessa => Status::Cancelada,
        }
    }

    /// States that are still awaiting a decision and expire once the event
    /// date has passed. Informational notices, diets and delivery
    /// requisitions never expire.
    #[must_use]
    pub const fn pending_states(&self) -> &'static [Status] {
        match self {
            Self::PedidoAPartirDaEscola => ESCOLA_PENDING,
            Self::PedidoAPartirDaDiretoriaRegional => DRE_PENDING,
            Self::InformativoPartindoDaEscola | Self::DietaEspecial | Self::SolicitacaoRemessa => {
                &[]
            }
        }
    }

    /// Returns true if CODAE must question a late request before it may
    /// authorize it. Directorate requests are authorized directly.
    #[must_use]
    pub const fn guards_late_requests(&self) -> bool {
        matches!(self, Self::PedidoAPartirDaEscola)
    }

    /// Returns true if submission classifies the request by lead time and
    /// records whether it came in late.
    #[must_use]
    pub const fn classifies_priority(&self) -> bool {
        matches!(
            self,
            Self::PedidoAPartirDaEscola | Self::PedidoAPartirDaDiretoriaRegional
        )
    }

    /// Returns true if the status belongs to this workflow.
    #[must_use]
    pub fn contains(&self, status: Status) -> bool {
        self.states().contains(&status)
    }

    /// Returns true if no approval-path transition leaves the status.
    #[must_use]
    pub const fn is_terminal(&self, status: Status) -> bool {
        match self {
            Self::PedidoAPartirDaEscola => matches!(
                status,
                Status::CodaeNegouPedido
                    | Status::DreNaoValidouPedidoEscola
                    | Status::EscolaCancelou
                    | Status::CanceladoAutomaticamente
                    | Status::TerceirizadaTomouCiencia
            ),
            Self::PedidoAPartirDaDiretoriaRegional => matches!(
                status,
                Status::CodaeNegouPedido
                    | Status::DreCancelou
                    | Status::CancelamentoAutomatico
                    | Status::TerceirizadaTomouCiencia
            ),
            Self::InformativoPartindoDaEscola => matches!(
                status,
                Status::EscolaCancelou | Status::TerceirizadaTomouCiencia
            ),
            Self::DietaEspecial => matches!(
                status,
                Status::CodaeNegouPedido
                    | Status::EscolaCancelou
                    | Status::CodaeNegouCancelamento
                    | Status::TerceirizadaTomouCienciaInativacao
                    | Status::TerminadaAutomaticamenteSistema
                    | Status::CanceladoAlunoMudouEscola
                    | Status::CanceladoAlunoNaoPertenceRede
            ),
            Self::SolicitacaoRemessa => matches!(status, Status::Cancelada),
        }
    }

    /// Looks up the rule for a transition name.
    #[must_use]
    pub fn rule(&self, name: TransitionName) -> Option<&'static TransitionRule> {
        self.transitions().iter().find(|rule| rule.name == name)
    }

    /// Returns the state produced by `name` when fired from `from`, if legal.
    #[must_use]
    pub fn target(&self, from: Status, name: TransitionName) -> Option<Status> {
        self.rule(name)
            .filter(|rule| rule.sources.contains(&from))
            .map(|rule| rule.target)
    }

    /// Transitions that may fire from `from`, in table order.
    #[must_use]
    pub fn available_transitions(&self, from: Status) -> Vec<TransitionName> {
        self.transitions()
            .iter()
            .filter(|rule| rule.sources.contains(&from))
            .map(|rule| rule.name)
            .collect()
    }

    /// Checks that a status belongs to this workflow.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StatusNotInWorkflow` if it does not.
    pub fn validate_status(&self, status: Status) -> Result<(), DomainError> {
        if self.contains(status) {
            Ok(())
        } else {
            Err(DomainError::StatusNotInWorkflow {
                status,
                workflow: *self,
            })
        }
    }
}

impl std::fmt::Display for Workflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Workflow {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pedido_a_partir_da_escola" => Ok(Self::PedidoAPartirDaEscola),
            "pedido_a_partir_da_diretoria_regional" => Ok(Self::PedidoAPartirDaDiretoriaRegional),
            "informativo_partindo_da_escola" => Ok(Self::InformativoPartindoDaEscola),
            "dieta_especial" => Ok(Self::DietaEspecial),
            "solicitacao_remessa" => Ok(Self::SolicitacaoRemessa),
            _ => Err(DomainError::UnknownWorkflow(s.to_string())),
        }
    }
}
