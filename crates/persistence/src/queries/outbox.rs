// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;

use crate::data_models::{NotificacaoRow, StoredNotification};
use crate::diesel_schema::notificacoes;
use crate::error::PersistenceError;

/// Outbox entries not yet dispatched, oldest first.
///
/// # Errors
///
/// Returns an error if the query fails or a row cannot be deserialized.
pub fn pending_notifications(
    conn: &mut SqliteConnection,
) -> Result<Vec<StoredNotification>, PersistenceError> {
    notificacoes::table
        .filter(notificacoes::dispatched.eq(false))
        .order(notificacoes::notificacao_id.asc())
        .select(NotificacaoRow::as_select())
        .load::<NotificacaoRow>(conn)?
        .into_iter()
        .map(NotificacaoRow::into_stored)
        .collect()
}
