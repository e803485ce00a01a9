// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use sigpae_domain::{DomainError, GuardError, GuardViolation, Status, TransitionName};

/// Why a command was refused.
///
/// The `Display` form is the message shown to callers; wrap it with
/// [`TransitionError::detail`] for the user-facing text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TransitionError {
    /// The transition is not defined from the current state.
    #[error("Transition '{transition}' isn't available from state '{from}'.")]
    IllegalTransition {
        transition: TransitionName,
        from: Status,
    },
    /// A business rule refused the transition.
    #[error("{0}")]
    GuardViolation(#[from] GuardViolation),
    /// The request is already cancelled.
    #[error("Solicitação já está cancelada")]
    AlreadyTerminal,
    /// The command payload does not fit the request.
    #[error("{0}")]
    Domain(#[from] DomainError),
}

impl TransitionError {
    /// The message returned to callers.
    #[must_use]
    pub fn detail(&self) -> String {
        format!("Erro de transição de estado: {self}")
    }
}

impl From<GuardError> for TransitionError {
    fn from(err: GuardError) -> Self {
        match err {
            GuardError::Violation(violation) => Self::GuardViolation(violation),
            GuardError::Domain(domain) => Self::Domain(domain),
        }
    }
}
