// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::status::Status;
use crate::workflow::Workflow;
use time::Date;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// A status code is not recognised.
    UnknownStatus(String),
    /// A transition name is not recognised.
    UnknownTransition(String),
    /// A workflow name is not recognised.
    UnknownWorkflow(String),
    /// A request kind is not recognised.
    UnknownSolicitacaoKind(String),
    /// An institution kind is not recognised.
    UnknownInstitutionKind(String),
    /// A log event kind is not recognised.
    UnknownEventKind(String),
    /// A notification kind is not recognised.
    UnknownNotificationKind(String),
    /// A request identifier is not a UUID.
    InvalidSolicitacaoId(String),
    /// An institution identifier is blank.
    InvalidInstitution(String),
    /// An actor is missing an identifier or a name.
    InvalidActor(String),
    /// A status does not belong to the workflow of the request.
    StatusNotInWorkflow {
        /// The offending status.
        status: Status,
        /// The workflow that was expected to contain it.
        workflow: Workflow,
    },
    /// A request must carry at least one date.
    EmptyDates,
    /// A date appears more than once in a request.
    DuplicateDate {
        /// The repeated date.
        date: Date,
    },
    /// A date to cancel is not part of the request.
    DateNotInRequest {
        /// The unknown date.
        date: Date,
    },
    /// A date to cancel was already cancelled.
    DateAlreadyCancelled {
        /// The date.
        date: Date,
    },
    /// A request from a school is missing the school.
    MissingEscola,
    /// A delivery requisition is missing its distributor.
    MissingTerceirizada,
    /// Date arithmetic overflow.
    DateArithmeticOverflow {
        /// Description of the operation that failed.
        operation: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::UnknownStatus(status) => write!(f, "Status desconhecido: {status}"),
            Self::UnknownTransition(name) => write!(f, "Transição desconhecida: {name}"),
            Self::UnknownWorkflow(name) => write!(f, "Fluxo desconhecido: {name}"),
            Self::UnknownSolicitacaoKind(kind) => {
                write!(f, "Tipo de solicitação desconhecido: {kind}")
            }
            Self::UnknownInstitutionKind(kind) => {
                write!(f, "Tipo de instituição desconhecido: {kind}")
            }
            Self::UnknownEventKind(kind) => write!(f, "Evento desconhecido: {kind}"),
            Self::UnknownNotificationKind(kind) => {
                write!(f, "Tipo de notificação desconhecido: {kind}")
            }
            Self::InvalidSolicitacaoId(id) => write!(f, "Identificador inválido: {id}"),
            Self::InvalidInstitution(id) => write!(f, "Instituição inválida: '{id}'"),
            Self::InvalidActor(msg) => write!(f, "Usuário inválido: {msg}"),
            Self::StatusNotInWorkflow { status, workflow } => {
                write!(f, "Status {status} não pertence ao fluxo {workflow}")
            }
            Self::EmptyDates => write!(f, "A solicitação deve ter ao menos uma data"),
            Self::DuplicateDate { date } => write!(f, "Data repetida na solicitação: {date}"),
            Self::DateNotInRequest { date } => {
                write!(f, "Data {date} não pertence à solicitação")
            }
            Self::DateAlreadyCancelled { date } => write!(f, "Data {date} já está cancelada"),
            Self::MissingEscola => write!(f, "Solicitação de escola sem escola associada"),
            Self::MissingTerceirizada => {
                write!(f, "Requisição de entrega sem distribuidor associado")
            }
            Self::DateArithmeticOverflow { operation } => {
                write!(f, "Date arithmetic overflow: {operation}")
            }
        }
    }
}

impl std::error::Error for DomainError {}
