// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use diesel::prelude::*;
use diesel::SqliteConnection;
use sigpae::Notification;
use tracing::info;

use crate::backend::PersistenceBackend;
use crate::diesel_schema::notificacoes;
use crate::error::PersistenceError;

/// Queues `notification` in the outbox, undispatched.
///
/// # Errors
///
/// Returns an error if serialization or the insert fails.
pub fn insert_notification(
    conn: &mut SqliteConnection,
    notification: &Notification,
) -> Result<i64, PersistenceError> {
    let recipients_json: String = serde_json::to_string(&notification.recipients)?;

    diesel::insert_into(notificacoes::table)
        .values((
            notificacoes::solicitacao_id.eq(notification.solicitacao_id.to_string()),
            notificacoes::kind.eq(notification.kind.as_str()),
            notificacoes::recipients_json.eq(recipients_json),
            notificacoes::subject.eq(&notification.subject),
            notificacoes::title.eq(&notification.title),
            notificacoes::dispatched.eq(false),
        ))
        .execute(conn)?;

    conn.get_last_insert_rowid()
}

/// Flags an outbox entry as delivered.
///
/// Marking an already dispatched entry is a no-op.
///
/// # Errors
///
/// Returns `PersistenceError::NotificationNotFound` if no entry has this id.
pub fn mark_notification_dispatched(
    conn: &mut SqliteConnection,
    notificacao_id: i64,
) -> Result<(), PersistenceError> {
    let updated: usize = diesel::update(
        notificacoes::table.filter(notificacoes::notificacao_id.eq(notificacao_id)),
    )
    .set(notificacoes::dispatched.eq(true))
    .execute(conn)?;

    if updated == 0 {
        return Err(PersistenceError::NotificationNotFound(notificacao_id));
    }

    info!(notificacao_id, "Marked notification as dispatched");
    Ok(())
}
