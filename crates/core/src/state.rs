// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::notification::Notification;
use sigpae_audit::{Actor, AuditEvent, StateSnapshot};
use sigpae_domain::{
    Datas, DomainError, InstitutionId, InstitutionKind, Rastro, SolicitacaoId, SolicitacaoKind,
    Status, Workflow,
};
use std::collections::BTreeSet;
use time::{Date, OffsetDateTime};

/// A request progressing through its workflow.
///
/// The status is private: it only changes through [`crate::apply`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Solicitacao {
    id: SolicitacaoId,
    kind: SolicitacaoKind,
    pub(crate) status: Status,
    rastro: Rastro,
    pub(crate) datas: Datas,
    criado_por: String,
    criado_em: OffsetDateTime,
    pub(crate) foi_solicitado_fora_do_prazo: bool,
    lanche_emergencial: bool,
    pub(crate) version: u64,
}

/// Every stored field of a request, used to rebuild one from storage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SolicitacaoParts {
    pub id: SolicitacaoId,
    pub kind: SolicitacaoKind,
    pub status: Status,
    pub rastro: Rastro,
    pub datas: Datas,
    pub criado_por: String,
    pub criado_em: OffsetDateTime,
    pub foi_solicitado_fora_do_prazo: bool,
    pub lanche_emergencial: bool,
    pub version: u64,
}

fn validate_rastro(kind: SolicitacaoKind, rastro: &Rastro) -> Result<(), DomainError> {
    match kind.workflow() {
        Workflow::PedidoAPartirDaEscola
        | Workflow::InformativoPartindoDaEscola
        | Workflow::DietaEspecial
            if rastro.escola.is_none() =>
        {
            Err(DomainError::MissingEscola)
        }
        Workflow::SolicitacaoRemessa if rastro.terceirizada.is_none() => {
            Err(DomainError::MissingTerceirizada)
        }
        _ => Ok(()),
    }
}

impl Solicitacao {
    /// Creates a draft request.
    ///
    /// # Arguments
    ///
    /// * `kind` - The request type, which selects the workflow
    /// * `rastro` - The institutions the request passes through
    /// * `datas` - The dated occurrences
    /// * `criado_por` - The actor filing the request
    /// * `criado_em` - Creation timestamp
    /// * `lanche_emergencial` - Emergency snack alterations skip notice rules
    ///
    /// # Errors
    ///
    /// Returns `DomainError::MissingEscola` if a school workflow has no school,
    /// or `DomainError::MissingTerceirizada` if a delivery requisition has
    /// no distributor.
    pub fn new(
        kind: SolicitacaoKind,
        rastro: Rastro,
        datas: Datas,
        criado_por: &Actor,
        criado_em: OffsetDateTime,
        lanche_emergencial: bool,
    ) -> Result<Self, DomainError> {
        validate_rastro(kind, &rastro)?;
        Ok(Self {
            id: SolicitacaoId::new(),
            kind,
            status: kind.workflow().initial_state(),
            rastro,
            datas,
            criado_por: criado_por.id.clone(),
            criado_em,
            foi_solicitado_fora_do_prazo: false,
            lanche_emergencial,
            version: 0,
        })
    }

    /// Rebuilds a request from stored fields.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::StatusNotInWorkflow` if the stored status does
    /// not belong to the workflow of the kind, or a missing-link error if
    /// the stored links are incomplete.
    pub fn restore(parts: SolicitacaoParts) -> Result<Self, DomainError> {
        parts.kind.workflow().validate_status(parts.status)?;
        validate_rastro(parts.kind, &parts.rastro)?;
        Ok(Self {
            id: parts.id,
            kind: parts.kind,
            status: parts.status,
            rastro: parts.rastro,
            datas: parts.datas,
            criado_por: parts.criado_por,
            criado_em: parts.criado_em,
            foi_solicitado_fora_do_prazo: parts.foi_solicitado_fora_do_prazo,
            lanche_emergencial: parts.lanche_emergencial,
            version: parts.version,
        })
    }

    #[must_use]
    pub const fn id(&self) -> SolicitacaoId {
        self.id
    }

    #[must_use]
    pub const fn kind(&self) -> SolicitacaoKind {
        self.kind
    }

    #[must_use]
    pub const fn workflow(&self) -> Workflow {
        self.kind.workflow()
    }

    #[must_use]
    pub const fn status(&self) -> Status {
        self.status
    }

    #[must_use]
    pub const fn rastro(&self) -> &Rastro {
        &self.rastro
    }

    #[must_use]
    pub const fn datas(&self) -> &Datas {
        &self.datas
    }

    #[must_use]
    pub fn criado_por(&self) -> &str {
        &self.criado_por
    }

    #[must_use]
    pub const fn criado_em(&self) -> OffsetDateTime {
        self.criado_em
    }

    /// Set when the request was submitted too close to its event date.
    #[must_use]
    pub const fn foi_solicitado_fora_do_prazo(&self) -> bool {
        self.foi_solicitado_fora_do_prazo
    }

    #[must_use]
    pub const fn lanche_emergencial(&self) -> bool {
        self.lanche_emergencial
    }

    /// Incremented on every stored change.
    #[must_use]
    pub const fn version(&self) -> u64 {
        self.version
    }

    #[must_use]
    pub fn event_date(&self) -> Date {
        self.datas.event_date()
    }

    /// The institution that filed the request: the school, or the
    /// directorate for directorate-originated requests.
    #[must_use]
    pub fn requester(&self) -> (InstitutionKind, &InstitutionId) {
        self.rastro.escola.as_ref().map_or(
            (
                InstitutionKind::DiretoriaRegional,
                &self.rastro.diretoria_regional,
            ),
            |escola| (InstitutionKind::Escola, escola),
        )
    }

    /// Returns true if the request sits in its workflow's cancelled state.
    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.status == self.workflow().cancelled_state()
    }

    pub(crate) fn snapshot(&self) -> StateSnapshot {
        StateSnapshot::new(
            self.status,
            format!(
                "datas={},canceladas={}",
                self.datas.len(),
                self.datas.cancelled_dates().len()
            ),
        )
    }
}

/// The result of a successful transition.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The request after the transition.
    pub new_state: Solicitacao,
    /// The single log entry the transition produced.
    pub audit_event: AuditEvent,
    /// Outbox entries to queue alongside the change.
    pub notifications: Vec<Notification>,
}

/// Dates cancelled without changing the status of the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PartialCancellation {
    pub new_state: Solicitacao,
    pub cancelled_dates: BTreeSet<Date>,
    pub notification: Notification,
}

/// What a command produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Transitioned(TransitionResult),
    PartiallyCancelled(PartialCancellation),
}

impl Outcome {
    /// The request after the command.
    #[must_use]
    pub const fn new_state(&self) -> &Solicitacao {
        match self {
            Self::Transitioned(result) => &result.new_state,
            Self::PartiallyCancelled(partial) => &partial.new_state,
        }
    }

    /// The log entry, if the command changed the status.
    #[must_use]
    pub const fn audit_event(&self) -> Option<&AuditEvent> {
        match self {
            Self::Transitioned(result) => Some(&result.audit_event),
            Self::PartiallyCancelled(_) => None,
        }
    }

    #[must_use]
    pub fn notifications(&self) -> Vec<&Notification> {
        match self {
            Self::Transitioned(result) => result.notifications.iter().collect(),
            Self::PartiallyCancelled(partial) => vec![&partial.notification],
        }
    }
}
