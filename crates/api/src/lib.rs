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

//! API boundary for the SIGPAE workflow engine.
//!
//! Callers hand in text and an [`AuthenticatedActor`]; handlers check the
//! caller's role and institution, run the engine, store the outcome and
//! answer with plain DTOs. Errors carry an HTTP-style status code and a
//! `{"detail": ...}` body so any transport can relay them unchanged.

mod auth;
mod error;
mod handlers;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticatedActor, AuthorizationService, Role};
pub use error::{
    ApiError, AuthError, translate_domain_error, translate_persistence_error,
    translate_transition_error,
};
pub use handlers::{
    cancel_expired, codae_decide, create_solicitacao, escola_cancela_pedido, execute_transition,
    get_solicitacao, list_logs, mark_notification_dispatched, pending_notifications,
};
pub use request_response::{
    CancelExpiredResponse, CancelRequest, CodaeDecisionRequest, CreateSolicitacaoRequest,
    DataOcorrenciaInfo, LogEntryResponse, NotificationResponse, RecipientInfo,
    SolicitacaoResponse, TransitionRequest, TransitionResponse,
};
