// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Routing of CODAE decisions to transitions.
//!
//! Callers that only know "authorize" or "deny" pick the concrete
//! transition here, from an explicit table, instead of the engine
//! guessing from the current status.

use crate::command::Command;
use serde::{Deserialize, Serialize};
use sigpae_domain::{Status, TransitionName};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CodaeDecision {
    Autoriza,
    Nega,
}

const CODAE_ROUTES: &[(Status, CodaeDecision, TransitionName)] = &[
    (
        Status::DreValidado,
        CodaeDecision::Autoriza,
        TransitionName::CodaeAutoriza,
    ),
    (
        Status::CodaeAAutorizar,
        CodaeDecision::Autoriza,
        TransitionName::CodaeAutoriza,
    ),
    (
        Status::TerceirizadaRespondeuQuestionamento,
        CodaeDecision::Autoriza,
        TransitionName::CodaeAutorizaQuestionamento,
    ),
    (
        Status::DreValidado,
        CodaeDecision::Nega,
        TransitionName::CodaeNega,
    ),
    (
        Status::CodaeAAutorizar,
        CodaeDecision::Nega,
        TransitionName::CodaeNega,
    ),
    (
        Status::CodaeQuestionado,
        CodaeDecision::Nega,
        TransitionName::CodaeNega,
    ),
    (
        Status::TerceirizadaRespondeuQuestionamento,
        CodaeDecision::Nega,
        TransitionName::CodaeNegaQuestionamento,
    ),
];

/// Picks the transition for a CODAE decision on a request in `status`.
///
/// Statuses without a route fall through to the post-challenge variant,
/// which the engine then rejects as an illegal transition.
#[must_use]
pub fn route_codae_decision(status: Status, decision: CodaeDecision) -> TransitionName {
    CODAE_ROUTES
        .iter()
        .find(|(from, routed, _)| *from == status && *routed == decision)
        .map_or(
            match decision {
                CodaeDecision::Autoriza => TransitionName::CodaeAutorizaQuestionamento,
                CodaeDecision::Nega => TransitionName::CodaeNegaQuestionamento,
            },
            |(_, _, name)| *name,
        )
}

/// Builds the command for a CODAE decision.
#[must_use]
pub fn codae_decision_command(
    status: Status,
    decision: CodaeDecision,
    justificativa: String,
) -> Command {
    match route_codae_decision(status, decision) {
        TransitionName::CodaeAutoriza => Command::CodaeAutoriza { justificativa },
        TransitionName::CodaeNega => Command::CodaeNega { justificativa },
        TransitionName::CodaeNegaQuestionamento => {
            Command::CodaeNegaQuestionamento { justificativa }
        }
        _ => Command::CodaeAutorizaQuestionamento { justificativa },
    }
}
