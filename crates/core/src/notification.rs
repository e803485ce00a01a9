// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Outbox entries produced by transitions.
//!
//! The engine only decides who must be told what. Rendering and delivery
//! happen elsewhere, from the stored outbox.

use crate::state::Solicitacao;
use serde::{Deserialize, Serialize};
use sigpae_domain::{DomainError, InstitutionId, InstitutionKind, SolicitacaoId};
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    NaoValidada,
    Autorizada,
    Negada,
    Cancelada,
    CanceladaParcialmente,
    Informada,
    /// A delivery requisition reached the distributor.
    Enviada,
    /// The distributor must confirm a cancellation.
    CancelamentoSolicitado,
}

impl NotificationKind {
    pub const ALL: [Self; 8] = [
        Self::NaoValidada,
        Self::Autorizada,
        Self::Negada,
        Self::Cancelada,
        Self::CanceladaParcialmente,
        Self::Informada,
        Self::Enviada,
        Self::CancelamentoSolicitado,
    ];

    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::NaoValidada => "nao_validada",
            Self::Autorizada => "autorizada",
            Self::Negada => "negada",
            Self::Cancelada => "cancelada",
            Self::CanceladaParcialmente => "cancelada_parcialmente",
            Self::Informada => "informada",
            Self::Enviada => "enviada",
            Self::CancelamentoSolicitado => "cancelamento_solicitado",
        }
    }

    const fn title_suffix(self) -> &'static str {
        match self {
            Self::NaoValidada => "Não Validada",
            Self::Autorizada => "Autorizada",
            Self::Negada => "Negada",
            Self::Cancelada => "Cancelada",
            Self::CanceladaParcialmente => "Cancelada Parcialmente",
            Self::Informada => "Informada",
            Self::Enviada => "Enviada",
            Self::CancelamentoSolicitado => "Cancelamento Solicitado",
        }
    }
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for NotificationKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| DomainError::UnknownNotificationKind(s.to_string()))
    }
}

/// An institution that must receive a notification.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Recipient {
    pub kind: InstitutionKind,
    pub institution: InstitutionId,
}

/// A queued notification about a request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub solicitacao_id: SolicitacaoId,
    pub kind: NotificationKind,
    pub recipients: Vec<Recipient>,
    pub subject: String,
    pub title: String,
}

impl Notification {
    /// Builds the notification of `kind` for `solicitacao`.
    ///
    /// Recipients come from the request's institution links; a link that
    /// is not set yields no recipient.
    #[must_use]
    pub fn for_solicitacao(solicitacao: &Solicitacao, kind: NotificationKind) -> Self {
        let id_externo: String = solicitacao.id().id_externo();
        let (requester_kind, requester) = solicitacao.requester();
        let requester: Recipient = Recipient {
            kind: requester_kind,
            institution: requester.clone(),
        };
        let terceirizada: Option<Recipient> =
            solicitacao
                .rastro()
                .terceirizada
                .clone()
                .map(|institution| Recipient {
                    kind: InstitutionKind::Terceirizada,
                    institution,
                });

        let recipients: Vec<Recipient> = match kind {
            NotificationKind::NaoValidada | NotificationKind::Negada => vec![requester],
            NotificationKind::Autorizada | NotificationKind::CanceladaParcialmente => {
                std::iter::once(requester).chain(terceirizada).collect()
            }
            NotificationKind::Cancelada
            | NotificationKind::Informada
            | NotificationKind::Enviada
            | NotificationKind::CancelamentoSolicitado => terceirizada.into_iter().collect(),
        };

        Self {
            solicitacao_id: solicitacao.id(),
            kind,
            recipients,
            subject: format!("[SIGPAE] Status de solicitação - #{id_externo}"),
            title: format!(
                "Solicitação de {} #{id_externo} - {}",
                solicitacao.kind().descricao(),
                kind.title_suffix()
            ),
        }
    }

    #[must_use]
    pub const fn has_recipients(&self) -> bool {
        !self.recipients.is_empty()
    }
}
