// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries.
//!
//! - `solicitacao`: loading requests with their dates
//! - `log`: the transition log of a request
//! - `outbox`: undispatched notifications

pub mod log;
pub mod outbox;
pub mod solicitacao;

pub use log::list_logs;
pub use outbox::pending_notifications;
pub use solicitacao::{list_solicitacoes_in_status, load_solicitacao};
