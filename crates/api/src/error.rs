// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use sigpae::TransitionError;
use sigpae_domain::DomainError;
use sigpae_persistence::PersistenceError;

/// Authorization errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The caller's role may not perform the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The caller acts for an institution the request is not linked to.
    InstitutionMismatch {
        /// The action that was attempted.
        action: String,
        /// The caller's institution.
        institution: String,
    },
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InstitutionMismatch {
                action,
                institution,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' is not allowed for institution '{institution}'"
                )
            }
        }
    }
}

impl std::error::Error for AuthError {}

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authorization failed - the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The caller's institution is not linked to the request.
    InstitutionMismatch {
        action: String,
        institution: String,
    },
    /// The workflow refused the command.
    TransitionFailed {
        /// The engine's message, without the user-facing prefix.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The request changed between load and save.
    Conflict {
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl ApiError {
    /// The HTTP status code this error maps to.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        match self {
            Self::TransitionFailed { .. } | Self::InvalidInput { .. } => 400,
            Self::Unauthorized { .. } | Self::InstitutionMismatch { .. } => 403,
            Self::ResourceNotFound { .. } => 404,
            Self::Conflict { .. } => 409,
            Self::Internal { .. } => 500,
        }
    }

    /// The JSON body returned to callers: `{"detail": "..."}`.
    #[must_use]
    pub fn detail_body(&self) -> serde_json::Value {
        serde_json::json!({ "detail": self.to_string() })
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::InstitutionMismatch {
                action,
                institution,
            } => {
                write!(
                    f,
                    "Unauthorized: '{action}' is not allowed for institution '{institution}'"
                )
            }
            Self::TransitionFailed { message } => {
                write!(f, "Erro de transição de estado: {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Unauthorized {
                action,
                required_role,
            } => Self::Unauthorized {
                action,
                required_role,
            },
            AuthError::InstitutionMismatch {
                action,
                institution,
            } => Self::InstitutionMismatch {
                action,
                institution,
            },
        }
    }
}

/// Translates a domain error raised while reading caller input.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    let field: &str = match &err {
        DomainError::UnknownStatus(_) | DomainError::StatusNotInWorkflow { .. } => "status",
        DomainError::UnknownTransition(_) => "transition",
        DomainError::UnknownWorkflow(_) => "workflow",
        DomainError::UnknownSolicitacaoKind(_) => "kind",
        DomainError::UnknownInstitutionKind(_) | DomainError::InvalidInstitution(_) => {
            "institution"
        }
        DomainError::UnknownEventKind(_) => "status_evento",
        DomainError::UnknownNotificationKind(_) => "notification_kind",
        DomainError::InvalidSolicitacaoId(_) => "id",
        DomainError::InvalidActor(_) => "actor",
        DomainError::EmptyDates
        | DomainError::DuplicateDate { .. }
        | DomainError::DateNotInRequest { .. }
        | DomainError::DateAlreadyCancelled { .. }
        | DomainError::DateArithmeticOverflow { .. } => "datas",
        DomainError::MissingEscola => "escola",
        DomainError::MissingTerceirizada => "terceirizada",
    };
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates an engine refusal.
///
/// Every refusal, including payload problems such as an unknown date,
/// surfaces as a transition failure so callers see a single message shape.
#[must_use]
pub fn translate_transition_error(err: &TransitionError) -> ApiError {
    ApiError::TransitionFailed {
        message: err.to_string(),
    }
}

/// Translates a storage failure.
#[must_use]
pub fn translate_persistence_error(err: PersistenceError) -> ApiError {
    match err {
        PersistenceError::SolicitacaoNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Solicitação"),
            message: format!("Solicitação {id} não existe"),
        },
        PersistenceError::NotificationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {id} does not exist"),
        },
        PersistenceError::ConcurrentModification { .. } => ApiError::Conflict {
            message: err.to_string(),
        },
        _ => ApiError::Internal {
            message: err.to_string(),
        },
    }
}
