// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::calendar::BusinessCalendar;
use crate::error::DomainError;
use time::Date;

/// A business rule that refused a transition.
///
/// Messages are fixed literals; callers match on them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuardViolation {
    /// The target date is too close for a cancellation.
    InsufficientNotice {
        /// The configured minimum, without suspension days.
        minimum_business_days: u32,
    },
    /// A denial or rejection was submitted without a justification.
    JustificationRequired,
    /// A late request must be questioned before it can be authorized.
    LateRequestRequiresQuestioning,
    /// Automatic cancellation was requested before the event date passed.
    NotYetExpired,
    /// A special diet was ended before its last date.
    NotYetEnded,
}

impl std::fmt::Display for GuardViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InsufficientNotice {
                minimum_business_days,
            } => write!(
                f,
                "Só pode cancelar com no mínimo {minimum_business_days} dia(s) úteis de antecedência"
            ),
            Self::JustificationRequired => write!(f, "Justificativa é obrigatória"),
            Self::LateRequestRequiresQuestioning => write!(
                f,
                "CODAE não pode autorizar direto caso seja em cima da hora, deve questionar"
            ),
            Self::NotYetExpired => write!(f, "Solicitação ainda não venceu"),
            Self::NotYetEnded => write!(f, "Não pode terminar uma dieta antes da data"),
        }
    }
}

impl std::error::Error for GuardViolation {}

/// Outcome of a guard that can also fail on date arithmetic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GuardError {
    Violation(GuardViolation),
    Domain(DomainError),
}

impl From<GuardViolation> for GuardError {
    fn from(violation: GuardViolation) -> Self {
        Self::Violation(violation)
    }
}

impl From<DomainError> for GuardError {
    fn from(err: DomainError) -> Self {
        Self::Domain(err)
    }
}

/// Checks that `target` is far enough from `today` to be cancelled.
///
/// Cancellation is allowed only when at least `minimum_business_days`
/// business days lie strictly between `today` and `target`. Suspension
/// days inside the window push the deadline further out. Targets on or
/// before `today` are always refused.
///
/// # Errors
///
/// Returns `GuardViolation::InsufficientNotice` when the window is too
/// short, or a `DomainError` if date arithmetic overflows.
pub fn check_minimum_notice(
    today: Date,
    target: Date,
    minimum_business_days: u32,
    calendar: &BusinessCalendar,
) -> Result<(), GuardError> {
    let deadline: Date = calendar.add_business_days_with_suspensions(today, minimum_business_days)?;
    if deadline >= target {
        return Err(GuardViolation::InsufficientNotice {
            minimum_business_days,
        }
        .into());
    }
    Ok(())
}

/// Checks that a justification carries some text.
///
/// # Errors
///
/// Returns `GuardViolation::JustificationRequired` for blank input.
pub fn check_justification(justificativa: &str) -> Result<(), GuardViolation> {
    if justificativa.trim().is_empty() {
        Err(GuardViolation::JustificationRequired)
    } else {
        Ok(())
    }
}
