// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Requester cancellation: whole request or individual dates.

use crate::apply::event_kind;
use crate::context::TransitionContext;
use crate::error::TransitionError;
use crate::notification::{Notification, NotificationKind};
use crate::state::{Outcome, PartialCancellation, Solicitacao, TransitionResult};
use sigpae_audit::{Actor, AuditEvent};
use sigpae_domain::{
    DataOcorrencia, DomainError, Status, TransitionName, Workflow, check_minimum_notice,
};
use std::collections::BTreeSet;
use time::Date;

/// Cancels the request, or only the requested dates.
///
/// The whole request is cancelled when the kind has no dated occurrences,
/// when no dates are given, when the request spans a single date, or when
/// the requested dates together with those already cancelled cover every
/// date. Otherwise only the requested dates are flagged, the status stays
/// put and no log entry is written.
///
/// Every named date must respect the notice window. A whole cancellation
/// must also respect it for the event date, whichever dates were named.
pub(crate) fn apply_cancellation(
    solicitacao: &Solicitacao,
    justificativa: &str,
    datas: &[Date],
    actor: &Actor,
    ctx: &TransitionContext<'_>,
) -> Result<Outcome, TransitionError> {
    let workflow: Workflow = solicitacao.workflow();
    if solicitacao.is_cancelled() {
        return Err(TransitionError::AlreadyTerminal);
    }

    let name: TransitionName = workflow.cancellation();
    let from: Status = solicitacao.status();
    let target: Status = workflow
        .target(from, name)
        .ok_or(TransitionError::IllegalTransition {
            transition: name,
            from,
        })?;

    let requested: BTreeSet<Date> = datas.iter().copied().collect();
    let notice: Option<u32> = solicitacao
        .kind()
        .minimum_cancellation_notice()
        .filter(|_| !solicitacao.lanche_emergencial());

    for date in &requested {
        let occurrence: &DataOcorrencia = solicitacao
            .datas()
            .get(*date)
            .ok_or(DomainError::DateNotInRequest { date: *date })?;
        if occurrence.cancelado {
            return Err(DomainError::DateAlreadyCancelled { date: *date }.into());
        }
        if let Some(minimum) = notice {
            check_minimum_notice(ctx.today, *date, minimum, ctx.calendar)?;
        }
    }

    let already_cancelled: BTreeSet<Date> = solicitacao.datas().cancelled_dates();
    let covered: usize = requested.union(&already_cancelled).count();
    let is_total: bool = !solicitacao.kind().has_dated_occurrences()
        || requested.is_empty()
        || solicitacao.datas().data_inicial() == solicitacao.datas().data_final()
        || covered == solicitacao.datas().len();

    let mut new_state: Solicitacao = solicitacao.clone();
    new_state.datas.cancel(&requested, justificativa);
    new_state.version += 1;

    if !is_total {
        let notification: Notification =
            Notification::for_solicitacao(&new_state, NotificationKind::CanceladaParcialmente);
        return Ok(Outcome::PartiallyCancelled(PartialCancellation {
            new_state,
            cancelled_dates: requested,
            notification,
        }));
    }

    if let Some(minimum) = notice {
        check_minimum_notice(ctx.today, solicitacao.event_date(), minimum, ctx.calendar)?;
    }

    new_state.status = target;
    let audit_event: AuditEvent = AuditEvent::new(
        solicitacao.id(),
        event_kind(workflow, name),
        actor.clone(),
        solicitacao.snapshot(),
        new_state.snapshot(),
        ctx.now,
    )
    .with_justificativa(justificativa);

    let notifications: Vec<Notification> = Some(Notification::for_solicitacao(
        &new_state,
        NotificationKind::Cancelada,
    ))
    .filter(Notification::has_recipients)
    .into_iter()
    .collect();

    Ok(Outcome::Transitioned(TransitionResult {
        new_state,
        audit_event,
        notifications,
    }))
}
