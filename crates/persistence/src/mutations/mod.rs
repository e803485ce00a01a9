// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations.
//!
//! - `solicitacao`: request rows, their dates, and version-checked updates
//! - `log`: inserts into the append-only transition log
//! - `outbox`: notification queueing and dispatch marking
//! - `outcome`: applies a whole engine outcome in one transaction

pub mod log;
pub mod outbox;
pub mod outcome;
pub mod solicitacao;

pub use outbox::mark_notification_dispatched;
pub use outcome::persist_outcome;
pub use solicitacao::insert_solicitacao;
