// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sigpae_domain::{TransitionName, Workflow};
use time::Date;

/// A command represents caller intent as data only.
///
/// There is one variant per named transition. Commands are the only way to
/// change the status of a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Submit a draft for approval.
    IniciaFluxo,
    /// Deliver an informational notice.
    Informa,
    DreValida,
    DreNaoValida {
        justificativa: String,
    },
    DrePedeRevisao {
        justificativa: String,
    },
    EscolaRevisa {
        justificativa: String,
    },
    /// Authorize a request that has not been challenged.
    CodaeAutoriza {
        justificativa: String,
    },
    /// Authorize after a challenge round.
    CodaeAutorizaQuestionamento {
        justificativa: String,
    },
    CodaeNega {
        justificativa: String,
    },
    CodaeNegaQuestionamento {
        justificativa: String,
    },
    CodaeQuestiona {
        justificativa: String,
    },
    CodaePedeRevisao {
        justificativa: String,
    },
    DreRevisa {
        justificativa: String,
    },
    TerceirizadaRespondeQuestionamento {
        justificativa: String,
        resposta_sim_nao: bool,
    },
    TerceirizadaTomaCiencia,
    /// Cancel the whole request, or only `datas` when the request has
    /// dated occurrences and the dates do not cover what remains.
    EscolaCancelaPedido {
        justificativa: String,
        datas: Vec<Date>,
    },
    /// System cancellation of a request whose event date has passed.
    CancelaAutomaticamente,
    /// CODAE refuses a school's request to cancel a special diet.
    NegarCancelamentoPedido {
        justificativa: String,
    },
    /// The school asks to deactivate an active special diet.
    IniciaFluxoInativacao {
        justificativa: String,
    },
    CodaeNegaInativacao {
        justificativa: String,
    },
    CodaeAutorizaInativacao {
        justificativa: String,
    },
    TerceirizadaTomaCienciaInativacao,
    CancelarAlunoMudouEscola,
    CancelarAlunoNaoPertenceRede,
    /// System end of a special diet whose last date has been reached.
    Termina,
    /// The distributor confirms a delivery requisition.
    EmpresaAtende {
        justificativa: String,
    },
    /// The distributor asks to change a delivery requisition.
    SolicitaAlteracao {
        justificativa: String,
    },
    DilogAceitaAlteracao {
        justificativa: String,
    },
    DilogNegaAlteracao {
        justificativa: String,
    },
    /// Cancelling a confirmed requisition waits for the distributor.
    AguardaConfirmacaoDeCancelamento {
        justificativa: String,
    },
    DistribuidorConfirmaCancelamento {
        justificativa: String,
    },
}

impl Command {
    /// The transition this command fires in `workflow`.
    #[must_use]
    pub const fn transition_name(&self, workflow: Workflow) -> TransitionName {
        match self {
            Self::IniciaFluxo => TransitionName::IniciaFluxo,
            Self::Informa => TransitionName::Informa,
            Self::DreValida => TransitionName::DreValida,
            Self::DreNaoValida { .. } => TransitionName::DreNaoValida,
            Self::DrePedeRevisao { .. } => TransitionName::DrePedeRevisao,
            Self::EscolaRevisa { .. } => TransitionName::EscolaRevisa,
            Self::CodaeAutoriza { .. } => TransitionName::CodaeAutoriza,
            Self::CodaeAutorizaQuestionamento { .. } => {
                TransitionName::CodaeAutorizaQuestionamento
            }
            Self::CodaeNega { .. } => TransitionName::CodaeNega,
            Self::CodaeNegaQuestionamento { .. } => TransitionName::CodaeNegaQuestionamento,
            Self::CodaeQuestiona { .. } => TransitionName::CodaeQuestiona,
            Self::CodaePedeRevisao { .. } => TransitionName::CodaePedeRevisao,
            Self::DreRevisa { .. } => TransitionName::DreRevisa,
            Self::TerceirizadaRespondeQuestionamento { .. } => {
                TransitionName::TerceirizadaRespondeQuestionamento
            }
            Self::TerceirizadaTomaCiencia => TransitionName::TerceirizadaTomaCiencia,
            Self::EscolaCancelaPedido { .. } => workflow.cancellation(),
            Self::CancelaAutomaticamente => TransitionName::CancelaAutomaticamente,
            Self::NegarCancelamentoPedido { .. } => TransitionName::NegarCancelamentoPedido,
            Self::IniciaFluxoInativacao { .. } => TransitionName::IniciaFluxoInativacao,
            Self::CodaeNegaInativacao { .. } => TransitionName::CodaeNegaInativacao,
            Self::CodaeAutorizaInativacao { .. } => TransitionName::CodaeAutorizaInativacao,
            Self::TerceirizadaTomaCienciaInativacao => {
                TransitionName::TerceirizadaTomaCienciaInativacao
            }
            Self::CancelarAlunoMudouEscola => TransitionName::CancelarAlunoMudouEscola,
            Self::CancelarAlunoNaoPertenceRede => TransitionName::CancelarAlunoNaoPertenceRede,
            Self::Termina => TransitionName::Termina,
            Self::EmpresaAtende { .. } => TransitionName::EmpresaAtende,
            Self::SolicitaAlteracao { .. } => TransitionName::SolicitaAlteracao,
            Self::DilogAceitaAlteracao { .. } => TransitionName::DilogAceitaAlteracao,
            Self::DilogNegaAlteracao { .. } => TransitionName::DilogNegaAlteracao,
            Self::AguardaConfirmacaoDeCancelamento { .. } => {
                TransitionName::AguardaConfirmacaoDeCancelamento
            }
            Self::DistribuidorConfirmaCancelamento { .. } => {
                TransitionName::DistribuidorConfirmaCancelamento
            }
        }
    }

    /// The justification carried by the command, empty when it takes none.
    #[must_use]
    pub fn justificativa(&self) -> &str {
        match self {
            Self::DreNaoValida { justificativa }
            | Self::DrePedeRevisao { justificativa }
            | Self::EscolaRevisa { justificativa }
            | Self::CodaeAutoriza { justificativa }
            | Self::CodaeAutorizaQuestionamento { justificativa }
            | Self::CodaeNega { justificativa }
            | Self::CodaeNegaQuestionamento { justificativa }
            | Self::CodaeQuestiona { justificativa }
            | Self::CodaePedeRevisao { justificativa }
            | Self::DreRevisa { justificativa }
            | Self::TerceirizadaRespondeQuestionamento { justificativa, .. }
            | Self::EscolaCancelaPedido { justificativa, .. }
            | Self::NegarCancelamentoPedido { justificativa }
            | Self::IniciaFluxoInativacao { justificativa }
            | Self::CodaeNegaInativacao { justificativa }
            | Self::CodaeAutorizaInativacao { justificativa }
            | Self::EmpresaAtende { justificativa }
            | Self::SolicitaAlteracao { justificativa }
            | Self::DilogAceitaAlteracao { justificativa }
            | Self::DilogNegaAlteracao { justificativa }
            | Self::AguardaConfirmacaoDeCancelamento { justificativa }
            | Self::DistribuidorConfirmaCancelamento { justificativa } => justificativa,
            Self::IniciaFluxo
            | Self::Informa
            | Self::DreValida
            | Self::TerceirizadaTomaCiencia
            | Self::CancelaAutomaticamente
            | Self::TerceirizadaTomaCienciaInativacao
            | Self::CancelarAlunoMudouEscola
            | Self::CancelarAlunoNaoPertenceRede
            | Self::Termina => "",
        }
    }

    /// Builds the command for a transition that takes at most a
    /// justification and an answer.
    ///
    /// Returns `None` for cancellation, which needs dates, and for names
    /// that are not commands of their own.
    #[must_use]
    pub fn from_transition(
        name: TransitionName,
        justificativa: String,
        resposta_sim_nao: Option<bool>,
    ) -> Option<Self> {
        let command: Self = match name {
            TransitionName::IniciaFluxo => Self::IniciaFluxo,
            TransitionName::Informa => Self::Informa,
            TransitionName::DreValida => Self::DreValida,
            TransitionName::DreNaoValida => Self::DreNaoValida { justificativa },
            TransitionName::DrePedeRevisao => Self::DrePedeRevisao { justificativa },
            TransitionName::EscolaRevisa => Self::EscolaRevisa { justificativa },
            TransitionName::CodaeAutoriza => Self::CodaeAutoriza { justificativa },
            TransitionName::CodaeAutorizaQuestionamento => {
                Self::CodaeAutorizaQuestionamento { justificativa }
            }
            TransitionName::CodaeNega => Self::CodaeNega { justificativa },
            TransitionName::CodaeNegaQuestionamento => {
                Self::CodaeNegaQuestionamento { justificativa }
            }
            TransitionName::CodaeQuestiona => Self::CodaeQuestiona { justificativa },
            TransitionName::CodaePedeRevisao => Self::CodaePedeRevisao { justificativa },
            TransitionName::DreRevisa => Self::DreRevisa { justificativa },
            TransitionName::TerceirizadaRespondeQuestionamento => {
                Self::TerceirizadaRespondeQuestionamento {
                    justificativa,
                    resposta_sim_nao: resposta_sim_nao?,
                }
            }
            TransitionName::TerceirizadaTomaCiencia => Self::TerceirizadaTomaCiencia,
            TransitionName::CancelaAutomaticamente => Self::CancelaAutomaticamente,
            TransitionName::NegarCancelamentoPedido => {
                Self::NegarCancelamentoPedido { justificativa }
            }
            TransitionName::IniciaFluxoInativacao => Self::IniciaFluxoInativacao { justificativa },
            TransitionName::CodaeNegaInativacao => Self::CodaeNegaInativacao { justificativa },
            TransitionName::CodaeAutorizaInativacao => {
                Self::CodaeAutorizaInativacao { justificativa }
            }
            TransitionName::TerceirizadaTomaCienciaInativacao => {
                Self::TerceirizadaTomaCienciaInativacao
            }
            TransitionName::CancelarAlunoMudouEscola => Self::CancelarAlunoMudouEscola,
            TransitionName::CancelarAlunoNaoPertenceRede => Self::CancelarAlunoNaoPertenceRede,
            TransitionName::Termina => Self::Termina,
            TransitionName::EmpresaAtende => Self::EmpresaAtende { justificativa },
            TransitionName::SolicitaAlteracao => Self::SolicitaAlteracao { justificativa },
            TransitionName::DilogAceitaAlteracao => Self::DilogAceitaAlteracao { justificativa },
            TransitionName::DilogNegaAlteracao => Self::DilogNegaAlteracao { justificativa },
            TransitionName::AguardaConfirmacaoDeCancelamento => {
                Self::AguardaConfirmacaoDeCancelamento { justificativa }
            }
            TransitionName::DistribuidorConfirmaCancelamento => {
                Self::DistribuidorConfirmaCancelamento { justificativa }
            }
            TransitionName::EscolaCancela
            | TransitionName::DreCancela
            | TransitionName::CancelarPedido
            | TransitionName::CancelaSolicitacao => return None,
        };
        Some(command)
    }
}
