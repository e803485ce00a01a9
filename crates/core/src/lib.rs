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

//! The SIGPAE request-approval workflow engine.
//!
//! [`apply`] is a pure function from a request, a command, an actor and a
//! clock to an [`Outcome`]: the new request, its single log entry and the
//! notifications to queue. Nothing here touches storage or the wall clock.

mod apply;
mod cancellation;
mod command;
mod context;
mod error;
mod expiry;
mod notification;
mod routing;
mod state;

#[cfg(test)]
mod tests;

pub use apply::apply;
pub use command::Command;
pub use context::TransitionContext;
pub use error::TransitionError;
pub use expiry::is_expired;
pub use notification::{Notification, NotificationKind, Recipient};
pub use routing::{CodaeDecision, codae_decision_command, route_codae_decision};
pub use state::{Outcome, PartialCancellation, Solicitacao, SolicitacaoParts, TransitionResult};
