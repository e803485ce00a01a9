// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API handlers.
//!
//! Each handler authorizes, loads, applies, persists and returns DTOs, in
//! that order. Nothing is stored when any step fails.

use sigpae::{
    CodaeDecision, Command, Outcome, Solicitacao, TransitionContext, apply, codae_decision_command,
    is_expired, route_codae_decision,
};
use sigpae_audit::{Actor, AuditEvent};
use sigpae_domain::{
    DataOcorrencia, Datas, InstitutionId, Priority, Rastro, SolicitacaoId, SolicitacaoKind,
    TransitionName, classify_priority,
};
use sigpae_persistence::{
    PersistOutcomeResult, Persistence, PersistenceError, StoredNotification,
};
use time::Date;
use time::format_description::well_known::Rfc3339;
use tracing::{debug, info, warn};

use crate::auth::{AuthenticatedActor, AuthorizationService};
use crate::error::{
    ApiError, translate_domain_error, translate_persistence_error, translate_transition_error,
};
use crate::request_response::{
    CancelExpiredResponse, CancelRequest, CodaeDecisionRequest, CreateSolicitacaoRequest,
    DataOcorrenciaInfo, LogEntryResponse, NotificationResponse, RecipientInfo,
    SolicitacaoResponse, TransitionRequest, TransitionResponse,
};

// ============================================================================
// Conversions
// ============================================================================

fn parse_id(id: &str) -> Result<SolicitacaoId, ApiError> {
    id.parse::<SolicitacaoId>().map_err(translate_domain_error)
}

fn parse_institution(value: &str) -> Result<InstitutionId, ApiError> {
    InstitutionId::new(value).map_err(translate_domain_error)
}

fn parse_optional_institution(value: Option<&str>) -> Result<Option<InstitutionId>, ApiError> {
    value.map(parse_institution).transpose()
}

fn parse_decision(value: &str) -> Result<CodaeDecision, ApiError> {
    match value.to_ascii_lowercase().as_str() {
        "autoriza" | "autorizar" => Ok(CodaeDecision::Autoriza),
        "nega" | "negar" => Ok(CodaeDecision::Nega),
        _ => Err(ApiError::InvalidInput {
            field: String::from("decision"),
            message: format!("Decisão desconhecida: {value}"),
        }),
    }
}

fn audit_actor(actor: &AuthenticatedActor) -> Result<Actor, ApiError> {
    actor.to_audit_actor().map_err(translate_domain_error)
}

fn load(persistence: &mut Persistence, id: SolicitacaoId) -> Result<Solicitacao, ApiError> {
    persistence
        .load_solicitacao(id)
        .map_err(translate_persistence_error)
}

fn to_response(
    solicitacao: &Solicitacao,
    ctx: &TransitionContext<'_>,
) -> Result<SolicitacaoResponse, ApiError> {
    let datas: &Datas = solicitacao.datas();
    let prioridade: Priority = classify_priority(ctx.today, datas.event_date(), ctx.calendar)
        .map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?;
    let rastro: &Rastro = solicitacao.rastro();

    Ok(SolicitacaoResponse {
        id: solicitacao.id().to_string(),
        id_externo: solicitacao.id().id_externo(),
        kind: solicitacao.kind().as_str().to_string(),
        workflow: solicitacao.workflow().as_str().to_string(),
        status: solicitacao.status().as_str().to_string(),
        status_label: solicitacao.status().label().to_string(),
        escola: rastro.escola.as_ref().map(|id| id.as_str().to_string()),
        diretoria_regional: rastro.diretoria_regional.as_str().to_string(),
        terceirizada: rastro.terceirizada.as_ref().map(|id| id.as_str().to_string()),
        datas: datas
            .as_slice()
            .iter()
            .map(|occurrence: &DataOcorrencia| DataOcorrenciaInfo {
                data: occurrence.data,
                cancelado: occurrence.cancelado,
                cancelado_justificativa: occurrence.cancelado_justificativa.clone(),
            })
            .collect(),
        data_inicial: datas.data_inicial(),
        data_final: datas.data_final(),
        prioridade: prioridade.as_str().to_string(),
        foi_solicitado_fora_do_prazo: solicitacao.foi_solicitado_fora_do_prazo(),
        lanche_emergencial: solicitacao.lanche_emergencial(),
        version: solicitacao.version(),
        available_transitions: solicitacao
            .workflow()
            .available_transitions(solicitacao.status())
            .into_iter()
            .map(|name| name.as_str().to_string())
            .collect(),
    })
}

fn to_log_entry(event: &AuditEvent) -> Result<LogEntryResponse, ApiError> {
    Ok(LogEntryResponse {
        event_id: event.event_id,
        status_evento: event.status_evento.as_str().to_string(),
        actor_id: event.actor.id.clone(),
        usuario: event.actor.name.clone(),
        justificativa: event.justificativa.clone(),
        resposta_sim_nao: event.resposta_sim_nao,
        status_anterior: event.before.status.as_str().to_string(),
        status_posterior: event.after.status.as_str().to_string(),
        criado_em: event.criado_em.format(&Rfc3339).map_err(|e| ApiError::Internal {
            message: e.to_string(),
        })?,
    })
}

fn to_notification_response(stored: StoredNotification) -> NotificationResponse {
    NotificationResponse {
        notificacao_id: stored.notificacao_id,
        solicitacao_id: stored.notification.solicitacao_id.to_string(),
        kind: stored.notification.kind.as_str().to_string(),
        subject: stored.notification.subject,
        title: stored.notification.title,
        recipients: stored
            .notification
            .recipients
            .into_iter()
            .map(|recipient| RecipientInfo {
                kind: recipient.kind.as_str().to_string(),
                institution: recipient.institution.as_str().to_string(),
            })
            .collect(),
    }
}

/// Applies `command` to the loaded request, stores the outcome against the
/// loaded version and builds the response.
fn run_command(
    persistence: &mut Persistence,
    solicitacao: &Solicitacao,
    command: Command,
    actor: &Actor,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResponse, ApiError> {
    let transition: TransitionName = command.transition_name(solicitacao.workflow());
    let outcome: Outcome =
        apply(solicitacao, command, actor, ctx).map_err(|e| translate_transition_error(&e))?;
    let persisted: PersistOutcomeResult = persistence
        .persist_outcome(&outcome, solicitacao.version())
        .map_err(translate_persistence_error)?;

    let (cancelled_dates, message): (Vec<Date>, String) = match &outcome {
        Outcome::Transitioned(result) => (
            Vec::new(),
            format!(
                "Solicitação #{} em {}",
                result.new_state.id().id_externo(),
                result.new_state.status().label()
            ),
        ),
        Outcome::PartiallyCancelled(partial) => (
            partial.cancelled_dates.iter().copied().collect(),
            format!(
                "{} dia(s) cancelado(s) na solicitação #{}",
                partial.cancelled_dates.len(),
                partial.new_state.id().id_externo()
            ),
        ),
    };

    info!(
        solicitacao_id = %solicitacao.id(),
        transition = transition.as_str(),
        status = %outcome.new_state().status(),
        "Applied command"
    );

    Ok(TransitionResponse {
        solicitacao: to_response(outcome.new_state(), ctx)?,
        event_id: persisted.event_id,
        cancelled_dates,
        notification_ids: persisted.notification_ids,
        message,
    })
}

// ============================================================================
// Handlers
// ============================================================================

/// Files a new request as a draft.
///
/// # Errors
///
/// Returns an error if the caller is not the requesting institution, the
/// input does not validate, or the insert fails.
pub fn create_solicitacao(
    persistence: &mut Persistence,
    request: CreateSolicitacaoRequest,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<SolicitacaoResponse, ApiError> {
    let kind: SolicitacaoKind = request
        .kind
        .parse::<SolicitacaoKind>()
        .map_err(translate_domain_error)?;
    let rastro: Rastro = Rastro {
        escola: parse_optional_institution(request.escola.as_deref())?,
        diretoria_regional: parse_institution(&request.diretoria_regional)?,
        terceirizada: parse_optional_institution(request.terceirizada.as_deref())?,
    };

    AuthorizationService::authorize_create(actor, kind, &rastro)?;

    let datas: Datas = Datas::from_dates(request.datas).map_err(translate_domain_error)?;
    let solicitacao: Solicitacao = Solicitacao::new(
        kind,
        rastro,
        datas,
        &audit_actor(actor)?,
        ctx.now,
        request.lanche_emergencial,
    )
    .map_err(translate_domain_error)?;

    persistence
        .create_solicitacao(&solicitacao)
        .map_err(translate_persistence_error)?;

    info!(
        solicitacao_id = %solicitacao.id(),
        kind = kind.as_str(),
        status = %solicitacao.status(),
        "Created solicitação"
    );
    to_response(&solicitacao, ctx)
}

/// Fires a named transition that takes at most a justification and an
/// answer.
///
/// Cancellation has its own handler, [`escola_cancela_pedido`], since it
/// carries dates.
///
/// # Errors
///
/// Returns an error if the name is unknown, the caller may not fire it,
/// the workflow refuses it, or the request changed meanwhile.
pub fn execute_transition(
    persistence: &mut Persistence,
    id: &str,
    transition: &str,
    request: TransitionRequest,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResponse, ApiError> {
    let name: TransitionName = transition
        .parse::<TransitionName>()
        .map_err(translate_domain_error)?;
    let solicitacao: Solicitacao = load(persistence, parse_id(id)?)?;

    AuthorizationService::authorize_transition(actor, name, &solicitacao)?;

    let command: Command = Command::from_transition(
        name,
        request.justificativa.unwrap_or_default(),
        request.resposta_sim_nao,
    )
    .ok_or_else(|| {
        if name.is_cancellation() {
            ApiError::InvalidInput {
                field: String::from("transition"),
                message: String::from("Cancelamentos usam escola_cancela_pedido"),
            }
        } else {
            ApiError::InvalidInput {
                field: String::from("resposta_sim_nao"),
                message: String::from("Resposta sim/não é obrigatória"),
            }
        }
    })?;

    run_command(persistence, &solicitacao, command, &audit_actor(actor)?, ctx)
}

/// Authorizes or denies a request, picking the transition from the
/// current status.
///
/// # Errors
///
/// Returns an error if the decision is unknown, the caller is not CODAE,
/// or the routed transition is refused.
pub fn codae_decide(
    persistence: &mut Persistence,
    id: &str,
    request: CodaeDecisionRequest,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResponse, ApiError> {
    let decision: CodaeDecision = parse_decision(&request.decision)?;
    let solicitacao: Solicitacao = load(persistence, parse_id(id)?)?;

    let routed: TransitionName = route_codae_decision(solicitacao.status(), decision);
    debug!(
        solicitacao_id = %solicitacao.id(),
        status = %solicitacao.status(),
        transition = routed.as_str(),
        "Routed CODAE decision"
    );
    AuthorizationService::authorize_transition(actor, routed, &solicitacao)?;

    let command: Command = codae_decision_command(
        solicitacao.status(),
        decision,
        request.justificativa.unwrap_or_default(),
    );
    run_command(persistence, &solicitacao, command, &audit_actor(actor)?, ctx)
}

/// Cancels a request, or only some of its dates.
///
/// # Errors
///
/// Returns an error if the caller is not the requester, a date is unknown
/// or too close, or the request is already cancelled.
pub fn escola_cancela_pedido(
    persistence: &mut Persistence,
    id: &str,
    request: CancelRequest,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResponse, ApiError> {
    let solicitacao: Solicitacao = load(persistence, parse_id(id)?)?;
    AuthorizationService::authorize_transition(
        actor,
        solicitacao.workflow().cancellation(),
        &solicitacao,
    )?;

    let command: Command = Command::EscolaCancelaPedido {
        justificativa: request.justificativa,
        datas: request.datas,
    };
    run_command(persistence, &solicitacao, command, &audit_actor(actor)?, ctx)
}

/// Returns a request.
///
/// # Errors
///
/// Returns an error if the request does not exist or the caller may not
/// see it.
pub fn get_solicitacao(
    persistence: &mut Persistence,
    id: &str,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<SolicitacaoResponse, ApiError> {
    let solicitacao: Solicitacao = load(persistence, parse_id(id)?)?;
    AuthorizationService::authorize_read(actor, &solicitacao)?;
    to_response(&solicitacao, ctx)
}

/// Returns the transition log of a request, oldest first.
///
/// # Errors
///
/// Returns an error if the request does not exist or the caller may not
/// see it.
pub fn list_logs(
    persistence: &mut Persistence,
    id: &str,
    actor: &AuthenticatedActor,
) -> Result<Vec<LogEntryResponse>, ApiError> {
    let solicitacao: Solicitacao = load(persistence, parse_id(id)?)?;
    AuthorizationService::authorize_read(actor, &solicitacao)?;

    let events: Vec<AuditEvent> = persistence
        .list_logs(solicitacao.id())
        .map_err(translate_persistence_error)?;
    events.iter().map(to_log_entry).collect()
}

/// Returns the notifications waiting for delivery.
///
/// # Errors
///
/// Returns an error if the caller is not the system.
pub fn pending_notifications(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
) -> Result<Vec<NotificationResponse>, ApiError> {
    AuthorizationService::authorize_system(actor, "pending_notifications")?;
    let pending: Vec<StoredNotification> = persistence
        .pending_notifications()
        .map_err(translate_persistence_error)?;
    Ok(pending.into_iter().map(to_notification_response).collect())
}

/// Marks a notification as delivered.
///
/// # Errors
///
/// Returns an error if the caller is not the system or the id is unknown.
pub fn mark_notification_dispatched(
    persistence: &mut Persistence,
    notificacao_id: i64,
    actor: &AuthenticatedActor,
) -> Result<(), ApiError> {
    AuthorizationService::authorize_system(actor, "mark_notification_dispatched")?;
    persistence
        .mark_notification_dispatched(notificacao_id)
        .map_err(translate_persistence_error)
}

/// Cancels every pending request whose event date is before `ctx.today`.
///
/// A request that changes while the sweep runs is skipped and reported in
/// `conflicts`; the next sweep picks it up again if still expired.
///
/// # Errors
///
/// Returns an error if the caller is not the system or storage fails.
pub fn cancel_expired(
    persistence: &mut Persistence,
    actor: &AuthenticatedActor,
    ctx: &TransitionContext<'_>,
) -> Result<CancelExpiredResponse, ApiError> {
    AuthorizationService::authorize_system(actor, "cancel_expired")?;
    let system: Actor = audit_actor(actor)?;

    let candidates: Vec<Solicitacao> = persistence
        .list_pending_solicitacoes()
        .map_err(translate_persistence_error)?;

    let mut response: CancelExpiredResponse = CancelExpiredResponse::default();
    for solicitacao in candidates
        .iter()
        .filter(|solicitacao| is_expired(solicitacao, ctx.today))
    {
        let outcome: Outcome = apply(solicitacao, Command::CancelaAutomaticamente, &system, ctx)
            .map_err(|e| translate_transition_error(&e))?;

        match persistence.persist_outcome(&outcome, solicitacao.version()) {
            Ok(_) => {
                info!(solicitacao_id = %solicitacao.id(), "Cancelled expired solicitação");
                response.cancelled.push(solicitacao.id().to_string());
            }
            Err(PersistenceError::ConcurrentModification { id, .. }) => {
                warn!(solicitacao_id = %id, "Skipped expired solicitação changed during sweep");
                response.conflicts.push(id.to_string());
            }
            Err(err) => return Err(translate_persistence_error(err)),
        }
    }

    info!(
        cancelled = response.cancelled.len(),
        conflicts = response.conflicts.len(),
        "Expiry sweep complete"
    );
    Ok(response)
}
