// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{DomainError, Status, TransitionName, Workflow};

// ============================================================================
// Table Consistency
// ============================================================================

#[test]
fn test_every_rule_stays_inside_its_state_set() {
    for workflow in Workflow::ALL {
        for rule in workflow.transitions() {
            assert!(
                workflow.contains(rule.target),
                "{workflow}: {} targets foreign state {}",
                rule.name,
                rule.target
            );
            for source in rule.sources {
                assert!(
                    workflow.contains(*source),
                    "{workflow}: {} starts from foreign state {source}",
                    rule.name
                );
            }
        }
    }
}

#[test]
fn test_transition_names_are_unique_per_workflow() {
    for workflow in Workflow::ALL {
        let transitions = workflow.transitions();
        for (index, rule) in transitions.iter().enumerate() {
            assert!(
                transitions[index + 1..]
                    .iter()
                    .all(|other| other.name != rule.name),
                "{workflow}: duplicate rule {}",
                rule.name
            );
        }
    }
}

#[test]
fn test_initial_and_cancelled_states_are_declared() {
    for workflow in Workflow::ALL {
        assert!(workflow.contains(workflow.initial_state()));
        assert!(workflow.contains(workflow.cancelled_state()));
        assert_eq!(
            workflow
                .rule(workflow.cancellation())
                .map(|rule| rule.target),
            Some(workflow.cancelled_state())
        );
    }
}

#[test]
fn test_no_transition_leaves_cancelled_state() {
    for workflow in Workflow::ALL {
        let cancelled: Status = workflow.cancelled_state();
        assert!(workflow.is_terminal(cancelled), "{workflow}");
        for name in workflow.available_transitions(cancelled) {
            assert_eq!(workflow.target(cancelled, name), Some(cancelled), "{workflow}: {name}");
        }
    }
}

#[test]
fn test_every_workflow_parses_from_its_code() {
    for workflow in Workflow::ALL {
        assert_eq!(workflow.as_str().parse::<Workflow>().unwrap(), workflow);
    }
}

#[test]
fn test_denial_and_automatic_cancellation_are_dead_ends() {
    let escola: Workflow = Workflow::PedidoAPartirDaEscola;
    for status in [
        Status::CodaeNegouPedido,
        Status::DreNaoValidouPedidoEscola,
        Status::CanceladoAutomaticamente,
    ] {
        assert!(escola.is_terminal(status));
        assert!(escola.available_transitions(status).is_empty());
    }
}

// ============================================================================
// School Workflow
// ============================================================================

#[test]
fn test_escola_happy_path() {
    let workflow: Workflow = Workflow::PedidoAPartirDaEscola;
    let path: [(TransitionName, Status); 4] = [
        (TransitionName::IniciaFluxo, Status::DreAValidar),
        (TransitionName::DreValida, Status::DreValidado),
        (TransitionName::CodaeAutoriza, Status::CodaeAutorizado),
        (
            TransitionName::TerceirizadaTomaCiencia,
            Status::TerceirizadaTomouCiencia,
        ),
    ];

    let mut current: Status = workflow.initial_state();
    for (name, expected) in path {
        current = workflow.target(current, name).unwrap();
        assert_eq!(current, expected);
    }
}

#[test]
fn test_escola_challenge_path() {
    let workflow: Workflow = Workflow::PedidoAPartirDaEscola;
    assert_eq!(
        workflow.target(Status::DreValidado, TransitionName::CodaeQuestiona),
        Some(Status::CodaeQuestionado)
    );
    assert_eq!(
        workflow.target(
            Status::CodaeQuestionado,
            TransitionName::TerceirizadaRespondeQuestionamento
        ),
        Some(Status::TerceirizadaRespondeuQuestionamento)
    );
    assert_eq!(
        workflow.target(
            Status::TerceirizadaRespondeuQuestionamento,
            TransitionName::CodaeAutorizaQuestionamento
        ),
        Some(Status::CodaeAutorizado)
    );
    assert_eq!(
        workflow.target(
            Status::TerceirizadaRespondeuQuestionamento,
            TransitionName::CodaeNegaQuestionamento
        ),
        Some(Status::CodaeNegouPedido)
    );
}

#[test]
fn test_escola_revision_loop() {
    let workflow: Workflow = Workflow::PedidoAPartirDaEscola;
    let revisar: Status = workflow
        .target(Status::DreAValidar, TransitionName::DrePedeRevisao)
        .unwrap();
    assert_eq!(revisar, Status::DrePediuEscolaRevisar);
    assert_eq!(
        workflow.target(revisar, TransitionName::EscolaRevisa),
        Some(Status::DreAValidar)
    );
}

#[test]
fn test_responding_twice_is_not_available() {
    let workflow: Workflow = Workflow::PedidoAPartirDaEscola;
    assert_eq!(
        workflow.target(
            Status::TerceirizadaRespondeuQuestionamento,
            TransitionName::TerceirizadaRespondeQuestionamento
        ),
        None
    );
}

#[test]
fn test_inicia_fluxo_only_from_draft() {
    let workflow: Workflow = Workflow::PedidoAPartirDaEscola;
    for status in workflow.states() {
        let target: Option<Status> = workflow.target(*status, TransitionName::IniciaFluxo);
        if *status == Status::Rascunho {
            assert_eq!(target, Some(Status::DreAValidar));
        } else {
            assert_eq!(target, None, "inicia_fluxo allowed from {status}");
        }
    }
}

#[test]
fn test_transitions_foreign_to_workflow_are_rejected() {
    let workflow: Workflow = Workflow::PedidoAPartirDaEscola;
    assert!(workflow.rule(TransitionName::Informa).is_none());
    assert!(workflow.rule(TransitionName::DreRevisa).is_none());
    assert_eq!(
        workflow.target(Status::Rascunho, TransitionName::Informa),
        None
    );
}

// ============================================================================
// Directorate Workflow
// ============================================================================

#[test]
fn test_dre_workflow_goes_straight_to_codae() {
    let workflow: Workflow = Workflow::PedidoAPartirDaDiretoriaRegional;
    assert_eq!(
        workflow.target(Status::Rascunho, TransitionName::IniciaFluxo),
        Some(Status::CodaeAAutorizar)
    );
    assert_eq!(
        workflow.target(Status::CodaeAAutorizar, TransitionName::CodaePedeRevisao),
        Some(Status::CodaePediuDreRevisar)
    );
    assert_eq!(
        workflow.target(Status::CodaePediuDreRevisar, TransitionName::DreRevisa),
        Some(Status::CodaeAAutorizar)
    );
    assert_eq!(
        workflow.target(Status::CodaeAAutorizar, TransitionName::DreValida),
        None
    );
}

#[test]
fn test_dre_workflow_cancels_to_dre_cancelou() {
    let workflow: Workflow = Workflow::PedidoAPartirDaDiretoriaRegional;
    assert_eq!(workflow.cancellation(), TransitionName::DreCancela);
    assert_eq!(
        workflow.target(Status::CodaeAutorizado, TransitionName::DreCancela),
        Some(Status::DreCancelou)
    );
}

// ============================================================================
// Informational Workflow
// ============================================================================

#[test]
fn test_informativo_workflow() {
    let workflow: Workflow = Workflow::InformativoPartindoDaEscola;
    assert_eq!(workflow.submission(), TransitionName::Informa);
    assert_eq!(
        workflow.target(Status::Rascunho, TransitionName::Informa),
        Some(Status::Informado)
    );
    assert_eq!(
        workflow.target(Status::Informado, TransitionName::EscolaCancela),
        Some(Status::EscolaCancelou)
    );
    assert_eq!(
        workflow.target(Status::Rascunho, TransitionName::EscolaCancela),
        None
    );
    assert!(workflow.pending_states().is_empty());
}

#[test]
fn test_only_school_workflow_guards_late_requests() {
    for workflow in Workflow::ALL {
        assert_eq!(
            workflow.guards_late_requests(),
            workflow == Workflow::PedidoAPartirDaEscola,
            "{workflow}"
        );
    }
    assert!(Workflow::PedidoAPartirDaDiretoriaRegional.classifies_priority());
    assert!(!Workflow::DietaEspecial.classifies_priority());
    assert!(!Workflow::SolicitacaoRemessa.classifies_priority());
    assert!(!Workflow::InformativoPartindoDaEscola.classifies_priority());
}

#[test]
fn test_validate_status_rejects_foreign_status() {
    let workflow: Workflow = Workflow::InformativoPartindoDaEscola;
    assert_eq!(
        workflow.validate_status(Status::DreValidado),
        Err(DomainError::StatusNotInWorkflow {
            status: Status::DreValidado,
            workflow,
        })
    );
    assert!(workflow.validate_status(Status::Informado).is_ok());
}

// ============================================================================
// Special Diet Workflow
// ============================================================================

#[test]
fn test_dieta_happy_path() {
    let workflow: Workflow = Workflow::DietaEspecial;
    assert_eq!(workflow.initial_state(), Status::Rascunho);
    assert_eq!(workflow.submission(), TransitionName::IniciaFluxo);
    let path: [(TransitionName, Status); 3] = [
        (TransitionName::IniciaFluxo, Status::CodaeAAutorizar),
        (TransitionName::CodaeAutoriza, Status::CodaeAutorizado),
        (
            TransitionName::TerceirizadaTomaCiencia,
            Status::TerceirizadaTomouCiencia,
        ),
    ];

    let mut current: Status = workflow.initial_state();
    for (name, expected) in path {
        current = workflow.target(current, name).unwrap();
        assert_eq!(current, expected);
    }
    assert_eq!(
        workflow.target(Status::Rascunho, TransitionName::CodaeAutoriza),
        Some(Status::CodaeAutorizado)
    );
}

#[test]
fn test_dieta_inactivation_path() {
    let workflow: Workflow = Workflow::DietaEspecial;
    assert_eq!(
        workflow.target(
            Status::TerceirizadaTomouCiencia,
            TransitionName::IniciaFluxoInativacao
        ),
        Some(Status::EscolaSolicitouInativacao)
    );
    assert_eq!(
        workflow.target(
            Status::EscolaSolicitouInativacao,
            TransitionName::CodaeNegaInativacao
        ),
        Some(Status::CodaeNegouInativacao)
    );
    assert_eq!(
        workflow.target(
            Status::EscolaSolicitouInativacao,
            TransitionName::CodaeAutorizaInativacao
        ),
        Some(Status::CodaeAutorizouInativacao)
    );
    assert_eq!(
        workflow.target(
            Status::CodaeAutorizouInativacao,
            TransitionName::TerceirizadaTomaCienciaInativacao
        ),
        Some(Status::TerceirizadaTomouCienciaInativacao)
    );
    assert!(workflow.is_terminal(Status::TerceirizadaTomouCienciaInativacao));
}

#[test]
fn test_dieta_cancellation_and_end() {
    let workflow: Workflow = Workflow::DietaEspecial;
    assert_eq!(workflow.cancellation(), TransitionName::CancelarPedido);
    assert_eq!(workflow.cancelled_state(), Status::EscolaCancelou);
    assert_eq!(
        workflow.target(Status::CodaeAAutorizar, TransitionName::NegarCancelamentoPedido),
        Some(Status::CodaeNegouCancelamento)
    );
    assert_eq!(
        workflow.target(Status::TerceirizadaTomouCiencia, TransitionName::CancelarPedido),
        None
    );
    for status in [
        Status::CodaeAutorizado,
        Status::TerceirizadaTomouCiencia,
        Status::EscolaSolicitouInativacao,
        Status::CodaeNegouInativacao,
    ] {
        assert_eq!(
            workflow.target(status, TransitionName::Termina),
            Some(Status::TerminadaAutomaticamenteSistema)
        );
    }
    assert_eq!(
        workflow.target(Status::CodaeAAutorizar, TransitionName::Termina),
        None
    );
    for status in [
        Status::CanceladoAlunoMudouEscola,
        Status::CanceladoAlunoNaoPertenceRede,
        Status::TerminadaAutomaticamenteSistema,
    ] {
        assert!(workflow.is_terminal(status));
        assert!(workflow.available_transitions(status).is_empty());
    }
    assert!(workflow.pending_states().is_empty());
}

// ============================================================================
// Delivery Requisition Workflow
// ============================================================================

#[test]
fn test_remessa_happy_path() {
    let workflow: Workflow = Workflow::SolicitacaoRemessa;
    assert_eq!(workflow.initial_state(), Status::AguardandoEnvio);
    assert_eq!(
        workflow.target(Status::AguardandoEnvio, TransitionName::IniciaFluxo),
        Some(Status::DilogEnvia)
    );
    assert_eq!(
        workflow.target(Status::DilogEnvia, TransitionName::EmpresaAtende),
        Some(Status::DistribuidorConfirma)
    );
    assert!(workflow.pending_states().is_empty());
    assert!(!workflow.contains(Status::Rascunho));
}

#[test]
fn test_remessa_change_request() {
    let workflow: Workflow = Workflow::SolicitacaoRemessa;
    let changed: Status = workflow
        .target(Status::DilogEnvia, TransitionName::SolicitaAlteracao)
        .unwrap();
    assert_eq!(changed, Status::DistribuidorSolicitaAlteracao);
    assert_eq!(
        workflow.target(changed, TransitionName::DilogAceitaAlteracao),
        Some(Status::DilogAceitaAlteracao)
    );
    assert_eq!(
        workflow.target(changed, TransitionName::DilogNegaAlteracao),
        Some(Status::DilogEnvia)
    );
}

#[test]
fn test_remessa_cancellation_after_confirmation_needs_distributor() {
    let workflow: Workflow = Workflow::SolicitacaoRemessa;
    assert_eq!(workflow.cancellation(), TransitionName::CancelaSolicitacao);
    assert_eq!(workflow.cancelled_state(), Status::Cancelada);
    assert_eq!(
        workflow.target(
            Status::DistribuidorConfirma,
            TransitionName::AguardaConfirmacaoDeCancelamento
        ),
        Some(Status::AguardandoCancelamento)
    );
    assert_eq!(
        workflow.target(
            Status::AguardandoCancelamento,
            TransitionName::DistribuidorConfirmaCancelamento
        ),
        Some(Status::Cancelada)
    );
    assert_eq!(
        workflow.target(Status::AguardandoCancelamento, TransitionName::CancelaSolicitacao),
        None
    );
    assert_eq!(
        workflow.target(Status::Cancelada, TransitionName::CancelaSolicitacao),
        Some(Status::Cancelada)
    );
}

// ============================================================================
// Codes
// ============================================================================

#[test]
fn test_status_codes_parse() {
    for status in Status::ALL {
        assert_eq!(status.as_str().parse::<Status>().unwrap(), status);
    }
    assert_eq!(
        "DRE_PEDE_ESCOLA_REVISAR".parse::<Status>().unwrap(),
        Status::CodaePediuDreRevisar
    );
    assert!(matches!(
        "BOGUS".parse::<Status>(),
        Err(DomainError::UnknownStatus(_))
    ));
}

#[test]
fn test_status_serde_matches_stored_code() {
    for status in Status::ALL {
        let json: String = serde_json::to_string(&status).unwrap();
        assert_eq!(json, format!("\"{}\"", status.as_str()));
    }
}

#[test]
fn test_transition_names_accept_kebab_case() {
    assert_eq!(
        "codae-autoriza-questionamento"
            .parse::<TransitionName>()
            .unwrap(),
        TransitionName::CodaeAutorizaQuestionamento
    );
    assert_eq!(
        "inicia_fluxo".parse::<TransitionName>().unwrap(),
        TransitionName::IniciaFluxo
    );
    assert!("voa".parse::<TransitionName>().is_err());
}

#[test]
fn test_justification_required_transitions() {
    assert!(TransitionName::DreNaoValida.requires_justification());
    assert!(TransitionName::CodaeNega.requires_justification());
    assert!(TransitionName::CodaeNegaQuestionamento.requires_justification());
    assert!(!TransitionName::CodaeAutoriza.requires_justification());
    assert!(!TransitionName::EscolaCancela.requires_justification());
}

#[test]
fn test_cancellation_transitions() {
    for name in TransitionName::ALL {
        assert_eq!(
            name.is_cancellation(),
            matches!(
                name,
                TransitionName::EscolaCancela
                    | TransitionName::DreCancela
                    | TransitionName::CancelarPedido
                    | TransitionName::CancelaSolicitacao
            ),
            "{name}"
        );
    }
    assert!(TransitionName::NegarCancelamentoPedido.requires_justification());
}
