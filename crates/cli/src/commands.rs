// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Maps subcommands onto API handlers.

use serde_json::Value;
use sigpae::TransitionContext;
use sigpae_api::{
    ApiError, AuthenticatedActor, CancelRequest, CodaeDecisionRequest, CreateSolicitacaoRequest,
    TransitionRequest, cancel_expired, codae_decide, create_solicitacao, escola_cancela_pedido,
    execute_transition, get_solicitacao, list_logs, mark_notification_dispatched,
    pending_notifications,
};
use sigpae_persistence::Persistence;
use tracing::debug;

use crate::cli::{Command, OutboxCommand};

/// Runs one subcommand and returns its JSON output.
///
/// # Errors
///
/// Returns the handler's error unchanged.
pub fn run(
    persistence: &mut Persistence,
    command: Command,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<Value, ApiError> {
    debug!(?command, role = %actor.role, "Running command");

    match command {
        Command::Create {
            kind,
            escola,
            dre,
            terceirizada,
            dates,
            lanche_emergencial,
        } => {
            let request: CreateSolicitacaoRequest = CreateSolicitacaoRequest {
                kind,
                escola,
                diretoria_regional: dre,
                terceirizada,
                datas: dates,
                lanche_emergencial,
            };
            to_json(&create_solicitacao(persistence, request, actor, ctx)?)
        }
        Command::Transition {
            id,
            name,
            justificativa,
            resposta,
        } => {
            let request: TransitionRequest = TransitionRequest {
                justificativa,
                resposta_sim_nao: resposta,
            };
            to_json(&execute_transition(
                persistence,
                &id,
                &name,
                request,
                actor,
                ctx,
            )?)
        }
        Command::CodaeDecide {
            id,
            decision,
            justificativa,
        } => {
            let request: CodaeDecisionRequest = CodaeDecisionRequest {
                decision,
                justificativa,
            };
            to_json(&codae_decide(persistence, &id, request, actor, ctx)?)
        }
        Command::Cancel {
            id,
            justificativa,
            dates,
        } => {
            let request: CancelRequest = CancelRequest {
                justificativa,
                datas: dates,
            };
            to_json(&escola_cancela_pedido(
                persistence,
                &id,
                request,
                actor,
                ctx,
            )?)
        }
        Command::Show { id } => to_json(&get_solicitacao(persistence, &id, actor, ctx)?),
        Command::Logs { id } => to_json(&list_logs(persistence, &id, actor)?),
        Command::Outbox(OutboxCommand::List) => {
            to_json(&pending_notifications(persistence, actor)?)
        }
        Command::Outbox(OutboxCommand::Dispatch { notificacao_id }) => {
            mark_notification_dispatched(persistence, notificacao_id, actor)?;
            Ok(serde_json::json!({ "dispatched": notificacao_id }))
        }
        Command::Expire => to_json(&cancel_expired(persistence, actor, ctx)?),
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<Value, ApiError> {
    serde_json::to_value(value).map_err(|e| ApiError::Internal {
        message: e.to_string(),
    })
}

/// Process exit code for an API error.
#[must_use]
pub const fn exit_code(err: &ApiError) -> u8 {
    match err.status_code() {
        400 => 2,
        403 => 3,
        404 => 4,
        409 => 5,
        _ => 1,
    }
}
