// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// The name of a workflow transition.
///
/// Names are stable: they appear in error messages returned to callers
/// and are accepted verbatim by the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionName {
    IniciaFluxo,
    DreValida,
    DreNaoValida,
    DrePedeRevisao,
    EscolaRevisa,
    CodaeAutoriza,
    CodaeAutorizaQuestionamento,
    CodaeNega,
    CodaeNegaQuestionamento,
    CodaeQuestiona,
    CodaePedeRevisao,
    DreRevisa,
    TerceirizadaRespondeQuestionamento,
    TerceirizadaTomaCiencia,
    Informa,
    EscolaCancela,
    DreCancela,
    CancelaAutomaticamente,
    CancelarPedido,
    NegarCancelamentoPedido,
    IniciaFluxoInativacao,
    CodaeNegaInativacao,
    CodaeAutorizaInativacao,
    TerceirizadaTomaCienciaInativacao,
    CancelarAlunoMudouEscola,
    CancelarAlunoNaoPertenceRede,
    Termina,
    EmpresaAtende,
    SolicitaAlteracao,
    CancelaSolicitacao,
    DilogAceitaAlteracao,
    DilogNegaAlteracao,
    AguardaConfirmacaoDeCancelamento,
    DistribuidorConfirmaCancelamento,
}

impl TransitionName {
    /// Every known transition name.
    pub const ALL: [Self; 34] = [
        Self::IniciaFluxo,
        Self::DreValida,
        Self::DreNaoValida,
        Self::DrePedeRevisao,
        Self::EscolaRevisa,
        Self::CodaeAutoriza,
        Self::CodaeAutorizaQuestionamento,
        Self::CodaeNega,
        Self::CodaeNegaQuestionamento,
        Self::CodaeQuestiona,
        Self::CodaePedeRevisao,
        Self::DreRevisa,
        Self::TerceirizadaRespondeQuestionamento,
        Self::TerceirizadaTomaCiencia,
        Self::Informa,
        Self::EscolaCancela,
        Self::DreCancela,
        Self::CancelaAutomaticamente,
        Self::CancelarPedido,
        Self::NegarCancelamentoPedido,
        Self::IniciaFluxoInativacao,
        Self::CodaeNegaInativacao,
        Self::CodaeAutorizaInativacao,
        Self::TerceirizadaTomaCienciaInativacao,
        Self::CancelarAlunoMudouEscola,
        Self::CancelarAlunoNaoPertenceRede,
        Self::Termina,
        Self::EmpresaAtende,
        Self::SolicitaAlteracao,
        Self::CancelaSolicitacao,
        Self::DilogAceitaAlteracao,
        Self::DilogNegaAlteracao,
        Self::AguardaConfirmacaoDeCancelamento,
        Self::DistribuidorConfirmaCancelamento,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::IniciaFluxo => "inicia_fluxo",
            Self::DreValida => "dre_valida",
            Self::DreNaoValida => "dre_nao_valida",
            Self::DrePedeRevisao => "dre_pede_revisao",
            Self::EscolaRevisa => "escola_revisa",
            Self::CodaeAutoriza => "codae_autoriza",
            Self::CodaeAutorizaQuestionamento => "codae_autoriza_questionamento",
            Self::CodaeNega => "codae_nega",
            Self::CodaeNegaQuestionamento => "codae_nega_questionamento",
            Self::CodaeQuestiona => "codae_questiona",
            Self::CodaePedeRevisao => "codae_pede_revisao",
            Self::DreRevisa => "dre_revisa",
            Self::TerceirizadaRespondeQuestionamento => "terceirizada_responde_questionamento",
            Self::TerceirizadaTomaCiencia => "terceirizada_toma_ciencia",
            Self::Informa => "informa",
            Self::EscolaCancela => "escola_cancela",
            Self::DreCancela => "dre_cancela",
            Self::CancelaAutomaticamente => "cancela_automaticamente",
            Self::CancelarPedido => "cancelar_pedido",
            Self::NegarCancelamentoPedido => "negar_cancelamento_pedido",
            Self::IniciaFluxoInativacao => "inicia_fluxo_inativacao",
            Self::CodaeNegaInativacao => "codae_nega_inativacao",
            Self::CodaeAutorizaInativacao => "codae_autoriza_inativacao",
            Self::TerceirizadaTomaCienciaInativacao => "terceirizada_toma_ciencia_inativacao",
            Self::CancelarAlunoMudouEscola => "cancelar_aluno_mudou_escola",
            Self::CancelarAlunoNaoPertenceRede => "cancelar_aluno_nao_pertence_rede",
            Self::Termina => "termina",
            Self::EmpresaAtende => "empresa_atende",
            Self::SolicitaAlteracao => "solicita_alteracao",
            Self::CancelaSolicitacao => "cancela_solicitacao",
            Self::DilogAceitaAlteracao => "dilog_aceita_alteracao",
            Self::DilogNegaAlteracao => "dilog_nega_alteracao",
            Self::AguardaConfirmacaoDeCancelamento => "aguarda_confirmacao_de_cancelamento",
            Self::DistribuidorConfirmaCancelamento => "distribuidor_confirma_cancelamento",
        }
    }

    /// Returns true if the transition records a decision that must be justified.
    #[must_use]
    pub const fn requires_justification(&self) -> bool {
        matches!(
            self,
            Self::DreNaoValida
                | Self::CodaeNega
                | Self::CodaeNegaQuestionamento
                | Self::NegarCancelamentoPedido
        )
    }

    /// Returns true if the transition is a requester cancellation, which
    /// carries dates and goes through its own command.
    #[must_use]
    pub const fn is_cancellation(&self) -> bool {
        matches!(
            self,
            Self::EscolaCancela | Self::DreCancela | Self::CancelarPedido | Self::CancelaSolicitacao
        )
    }
}

impl std::fmt::Display for TransitionName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransitionName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        // Accept the kebab-case form used by command lines as well.
        let normalized: String = s.replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|name| name.as_str() == normalized)
            .ok_or_else(|| DomainError::UnknownTransition(s.to_string()))
    }
}
