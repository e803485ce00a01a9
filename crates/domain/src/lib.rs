// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

mod calendar;
mod error;
mod guard;
mod priority;
mod status;
mod transition;
mod types;
mod workflow;

#[cfg(test)]
mod tests;

pub use calendar::BusinessCalendar;
pub use error::DomainError;
pub use guard::{GuardError, GuardViolation, check_justification, check_minimum_notice};
pub use priority::{LIMITE_INFERIOR, LIMITE_SUPERIOR, PRIORITARIO, Priority, classify_priority};
pub use status::Status;
pub use transition::TransitionName;
pub use types::{
    DataOcorrencia, Datas, InstitutionId, InstitutionKind, Rastro, SolicitacaoId, SolicitacaoKind,
};
pub use workflow::{TransitionRule, Workflow};
