// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::cancellation::apply_cancellation;
use crate::command::Command;
use crate::context::TransitionContext;
use crate::error::TransitionError;
use crate::expiry::is_expired;
use crate::notification::{Notification, NotificationKind};
use crate::state::{Outcome, Solicitacao, TransitionResult};
use sigpae_audit::{Actor, AuditEvent, EventKind};
use sigpae_domain::{
    GuardViolation, Priority, Status, TransitionName, Workflow, check_justification,
    classify_priority,
};

/// Applies a command to a request, producing the new request, its log
/// entry and the notifications to queue.
///
/// The input is never modified. Either the whole outcome is returned or
/// an error is, so a caller that persists the outcome atomically never
/// stores a status change without its log entry.
///
/// # Arguments
///
/// * `solicitacao` - The current request (immutable)
/// * `command` - The command to apply
/// * `actor` - Who is applying it; authorization is checked by the caller
/// * `ctx` - Clock and calendar
///
/// # Errors
///
/// Returns an error if:
/// - The transition is not defined from the current status
/// - A guard refuses it (notice window, missing justification, late
///   authorization, not yet expired, diet not yet ended)
/// - The request is already cancelled
/// - The command names dates that do not fit the request
pub fn apply(
    solicitacao: &Solicitacao,
    command: Command,
    actor: &Actor,
    ctx: &TransitionContext<'_>,
) -> Result<Outcome, TransitionError> {
    match command {
        Command::EscolaCancelaPedido {
            justificativa,
            datas,
        } => apply_cancellation(solicitacao, &justificativa, &datas, actor, ctx),
        other => apply_transition(solicitacao, &other, actor, ctx).map(Outcome::Transitioned),
    }
}

fn apply_transition(
    solicitacao: &Solicitacao,
    command: &Command,
    actor: &Actor,
    ctx: &TransitionContext<'_>,
) -> Result<TransitionResult, TransitionError> {
    let workflow: Workflow = solicitacao.workflow();
    let name: TransitionName = command.transition_name(workflow);
    let from: Status = solicitacao.status();
    let target: Status = workflow
        .target(from, name)
        .ok_or(TransitionError::IllegalTransition {
            transition: name,
            from,
        })?;

    if name.requires_justification() {
        check_justification(command.justificativa())?;
    }

    match command {
        Command::CodaeAutoriza { .. } if workflow.guards_late_requests() => {
            check_late_authorization(solicitacao)?;
        }
        Command::CodaeAutorizaQuestionamento { .. }
            if workflow.guards_late_requests()
                && from != Status::TerceirizadaRespondeuQuestionamento =>
        {
            check_late_authorization(solicitacao)?;
        }
        Command::CancelaAutomaticamente if !is_expired(solicitacao, ctx.today) => {
            return Err(GuardViolation::NotYetExpired.into());
        }
        Command::Termina if solicitacao.datas().data_final() > ctx.today => {
            return Err(GuardViolation::NotYetEnded.into());
        }
        _ => {}
    }

    let mut new_state: Solicitacao = solicitacao.clone();
    new_state.status = target;
    new_state.version += 1;

    if name == TransitionName::IniciaFluxo && workflow.classifies_priority() {
        let priority: Priority =
            classify_priority(ctx.today, solicitacao.event_date(), ctx.calendar)?;
        new_state.foi_solicitado_fora_do_prazo = priority.is_late();
    }

    let mut audit_event: AuditEvent = AuditEvent::new(
        solicitacao.id(),
        event_kind(workflow, name),
        actor.clone(),
        solicitacao.snapshot(),
        new_state.snapshot(),
        ctx.now,
    )
    .with_justificativa(command.justificativa());
    if let Command::TerceirizadaRespondeQuestionamento {
        resposta_sim_nao, ..
    } = command
    {
        audit_event = audit_event.with_resposta_sim_nao(*resposta_sim_nao);
    }

    let notifications: Vec<Notification> = notification_kind(workflow, name)
        .map(|kind| Notification::for_solicitacao(&new_state, kind))
        .filter(Notification::has_recipients)
        .into_iter()
        .collect();

    Ok(TransitionResult {
        new_state,
        audit_event,
        notifications,
    })
}

/// CODAE may not authorize a late school request without questioning the
/// caterer first. Emergency snack alterations are exempt.
fn check_late_authorization(solicitacao: &Solicitacao) -> Result<(), GuardViolation> {
    if solicitacao.foi_solicitado_fora_do_prazo() && !solicitacao.lanche_emergencial() {
        return Err(GuardViolation::LateRequestRequiresQuestioning);
    }
    Ok(())
}

/// The log event recorded for a transition.
pub(crate) const fn event_kind(workflow: Workflow, name: TransitionName) -> EventKind {
    match name {
        TransitionName::IniciaFluxo if matches!(workflow, Workflow::SolicitacaoRemessa) => {
            EventKind::DilogEnviaSolicitacao
        }
        TransitionName::IniciaFluxo | TransitionName::Informa => EventKind::InicioFluxo,
        TransitionName::DreValida => EventKind::DreValidou,
        TransitionName::DreNaoValida => EventKind::DreNaoValidou,
        TransitionName::DrePedeRevisao => EventKind::DrePediuRevisao,
        TransitionName::EscolaRevisa => EventKind::EscolaRevisou,
        TransitionName::CodaeAutoriza | TransitionName::CodaeAutorizaQuestionamento => {
            EventKind::CodaeAutorizou
        }
        TransitionName::CodaeNega | TransitionName::CodaeNegaQuestionamento => {
            EventKind::CodaeNegou
        }
        TransitionName::CodaeQuestiona => EventKind::CodaeQuestionou,
        TransitionName::CodaePedeRevisao => EventKind::CodaePediuRevisao,
        TransitionName::DreRevisa => EventKind::DreRevisou,
        TransitionName::TerceirizadaRespondeQuestionamento => {
            EventKind::TerceirizadaRespondeuQuestionamento
        }
        TransitionName::TerceirizadaTomaCiencia => EventKind::TerceirizadaTomouCiencia,
        TransitionName::EscolaCancela | TransitionName::CancelarPedido => {
            EventKind::EscolaCancelou
        }
        TransitionName::DreCancela => EventKind::DreCancelou,
        TransitionName::CancelaAutomaticamente => EventKind::CanceladoAutomaticamente,
        TransitionName::NegarCancelamentoPedido => EventKind::CodaeNegouCancelamento,
        TransitionName::IniciaFluxoInativacao => EventKind::InicioFluxoInativacao,
        TransitionName::CodaeNegaInativacao => EventKind::CodaeNegouInativacao,
        TransitionName::CodaeAutorizaInativacao => EventKind::CodaeAutorizouInativacao,
        TransitionName::TerceirizadaTomaCienciaInativacao => {
            EventKind::TerceirizadaTomouCienciaInativacao
        }
        TransitionName::CancelarAlunoMudouEscola => EventKind::CanceladoAlunoMudouEscola,
        TransitionName::CancelarAlunoNaoPertenceRede => EventKind::CanceladoAlunoNaoPertenceRede,
        TransitionName::Termina => EventKind::TerminadaAutomaticamenteSistema,
        TransitionName::EmpresaAtende => EventKind::DistribuidorConfirmaSolicitacao,
        TransitionName::SolicitaAlteracao => EventKind::DistribuidorSolicitaAlteracaoSolicitacao,
        TransitionName::CancelaSolicitacao => EventKind::PapaCancelaSolicitacao,
        TransitionName::DilogAceitaAlteracao => EventKind::DilogAceitaAlteracao,
        TransitionName::DilogNegaAlteracao => EventKind::DilogNegaAlteracao,
        TransitionName::AguardaConfirmacaoDeCancelamento => {
            EventKind::PapaAguardaConfirmacaoCancelamentoSolicitacao
        }
        TransitionName::DistribuidorConfirmaCancelamento => {
            EventKind::DistribuidorConfirmaCancelamento
        }
    }
}

const fn notification_kind(workflow: Workflow, name: TransitionName) -> Option<NotificationKind> {
    match name {
        TransitionName::IniciaFluxo if matches!(workflow, Workflow::SolicitacaoRemessa) => {
            Some(NotificationKind::Enviada)
        }
        TransitionName::DreNaoValida => Some(NotificationKind::NaoValidada),
        TransitionName::CodaeAutoriza | TransitionName::CodaeAutorizaQuestionamento => {
            Some(NotificationKind::Autorizada)
        }
        TransitionName::CodaeNega | TransitionName::CodaeNegaQuestionamento => {
            Some(NotificationKind::Negada)
        }
        TransitionName::EscolaCancela
        | TransitionName::DreCancela
        | TransitionName::CancelarPedido
        | TransitionName::CancelaSolicitacao
        | TransitionName::DistribuidorConfirmaCancelamento => Some(NotificationKind::Cancelada),
        TransitionName::AguardaConfirmacaoDeCancelamento => {
            Some(NotificationKind::CancelamentoSolicitado)
        }
        TransitionName::Informa => Some(NotificationKind::Informada),
        _ => None,
    }
}
