// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::Solicitacao;
use time::Date;

/// Returns true if the request is still awaiting a decision and its event
/// date is before `today`.
#[must_use]
pub fn is_expired(solicitacao: &Solicitacao, today: Date) -> bool {
    solicitacao
        .workflow()
        .pending_states()
        .contains(&solicitacao.status())
        && solicitacao.event_date() < today
}
