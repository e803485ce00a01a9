// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::tests::{
    EVENT_DATE, NOW, create_test_codae, create_test_dre, create_test_escola,
    create_test_other_escola, create_test_terceirizada,
};
use crate::{AuthError, AuthenticatedActor, AuthorizationService, Role};
use sigpae::Solicitacao;
use sigpae_audit::Actor;
use sigpae_domain::{
    Datas, InstitutionId, InstitutionKind, Rastro, SolicitacaoKind, TransitionName, Workflow,
};

fn create_rastro() -> Rastro {
    Rastro {
        escola: Some(InstitutionId::new("EMEF-001").unwrap()),
        diretoria_regional: InstitutionId::new("DRE-IP").unwrap(),
        terceirizada: Some(InstitutionId::new("TERC-01").unwrap()),
    }
}

fn create_solicitacao(kind: SolicitacaoKind) -> Solicitacao {
    let rastro: Rastro = if kind.workflow() == Workflow::PedidoAPartirDaDiretoriaRegional {
        Rastro {
            escola: None,
            ..create_rastro()
        }
    } else {
        create_rastro()
    };
    let creator: Actor = if kind.workflow() == Workflow::PedidoAPartirDaDiretoriaRegional {
        create_test_dre().to_audit_actor().unwrap()
    } else {
        create_test_escola().to_audit_actor().unwrap()
    };
    Solicitacao::new(
        kind,
        rastro,
        Datas::from_dates([EVENT_DATE]).unwrap(),
        &creator,
        NOW,
        false,
    )
    .unwrap()
}

// ============================================================================
// Roles
// ============================================================================

#[test]
fn test_role_parses_aliases() {
    assert_eq!("escola".parse::<Role>(), Ok(Role::Escola));
    assert_eq!("DRE".parse::<Role>(), Ok(Role::DiretoriaRegional));
    assert_eq!("diretoria-regional".parse::<Role>(), Ok(Role::DiretoriaRegional));
    assert_eq!("system".parse::<Role>(), Ok(Role::Sistema));
    assert!("admin".parse::<Role>().is_err());
}

#[test]
fn test_submission_role_follows_workflow() {
    assert_eq!(
        AuthorizationService::required_role(
            TransitionName::IniciaFluxo,
            Workflow::PedidoAPartirDaEscola
        ),
        Role::Escola
    );
    assert_eq!(
        AuthorizationService::required_role(
            TransitionName::IniciaFluxo,
            Workflow::PedidoAPartirDaDiretoriaRegional
        ),
        Role::DiretoriaRegional
    );
    assert_eq!(
        AuthorizationService::required_role(
            TransitionName::CancelaAutomaticamente,
            Workflow::PedidoAPartirDaEscola
        ),
        Role::Sistema
    );
}

#[test]
fn test_diet_and_requisition_roles() {
    let dieta: Workflow = Workflow::DietaEspecial;
    let remessa: Workflow = Workflow::SolicitacaoRemessa;
    let cases: [(TransitionName, Workflow, Role); 9] = [
        (TransitionName::IniciaFluxo, dieta, Role::Escola),
        (TransitionName::CancelarPedido, dieta, Role::Escola),
        (TransitionName::CodaeAutorizaInativacao, dieta, Role::Codae),
        (TransitionName::Termina, dieta, Role::Sistema),
        (TransitionName::IniciaFluxo, remessa, Role::Codae),
        (TransitionName::EmpresaAtende, remessa, Role::Terceirizada),
        (TransitionName::DilogNegaAlteracao, remessa, Role::Codae),
        (TransitionName::CancelaSolicitacao, remessa, Role::Sistema),
        (
            TransitionName::DistribuidorConfirmaCancelamento,
            remessa,
            Role::Terceirizada,
        ),
    ];
    for (name, workflow, role) in cases {
        assert_eq!(
            AuthorizationService::required_role(name, workflow),
            role,
            "{name} on {workflow}"
        );
    }
}

#[test]
fn test_cancellation_role_matches_requester() {
    assert_eq!(
        AuthorizationService::required_role(
            TransitionName::DreCancela,
            Workflow::PedidoAPartirDaDiretoriaRegional
        ),
        Role::DiretoriaRegional
    );
    assert_eq!(
        AuthorizationService::required_role(
            TransitionName::EscolaCancela,
            Workflow::PedidoAPartirDaEscola
        ),
        Role::Escola
    );
}

#[test]
fn test_audit_actor_carries_institution_link() {
    let actor: Actor = create_test_dre().to_audit_actor().unwrap();

    assert_eq!(actor.id, "dre-1");
    assert_eq!(
        actor.institution_kind(),
        Some(InstitutionKind::DiretoriaRegional)
    );
}

#[test]
fn test_system_caller_maps_to_system_actor() {
    let actor: Actor = AuthenticatedActor::system().to_audit_actor().unwrap();
    assert!(actor.is_system());
}

#[test]
fn test_caller_without_institution_is_rejected() {
    let actor: AuthenticatedActor = AuthenticatedActor {
        institution: None,
        ..create_test_escola()
    };
    assert!(actor.to_audit_actor().is_err());
}

// ============================================================================
// Transitions
// ============================================================================

#[test]
fn test_linked_school_may_submit() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::InversaoCardapio);
    assert!(
        AuthorizationService::authorize_transition(
            &create_test_escola(),
            TransitionName::IniciaFluxo,
            &solicitacao
        )
        .is_ok()
    );
}

#[test]
fn test_wrong_role_is_unauthorized() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::InversaoCardapio);
    let err: AuthError = AuthorizationService::authorize_transition(
        &create_test_escola(),
        TransitionName::CodaeAutoriza,
        &solicitacao,
    )
    .unwrap_err();

    assert_eq!(
        err,
        AuthError::Unauthorized {
            action: String::from("codae_autoriza"),
            required_role: String::from("Codae"),
        }
    );
}

#[test]
fn test_unlinked_school_is_rejected() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::InversaoCardapio);
    let err: AuthError = AuthorizationService::authorize_transition(
        &create_test_other_escola(),
        TransitionName::IniciaFluxo,
        &solicitacao,
    )
    .unwrap_err();

    assert!(matches!(err, AuthError::InstitutionMismatch { .. }));
}

#[test]
fn test_codae_needs_no_link() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::InversaoCardapio);
    assert!(
        AuthorizationService::authorize_transition(
            &create_test_codae(),
            TransitionName::CodaeQuestiona,
            &solicitacao
        )
        .is_ok()
    );
}

#[test]
fn test_caterer_must_be_linked() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::InversaoCardapio);
    let other: AuthenticatedActor = AuthenticatedActor::new(
        "terc-2",
        "terc-2",
        Role::Terceirizada,
        InstitutionId::new("TERC-99").unwrap(),
    );

    assert!(
        AuthorizationService::authorize_transition(
            &create_test_terceirizada(),
            TransitionName::TerceirizadaTomaCiencia,
            &solicitacao
        )
        .is_ok()
    );
    assert!(
        AuthorizationService::authorize_transition(
            &other,
            TransitionName::TerceirizadaTomaCiencia,
            &solicitacao
        )
        .is_err()
    );
}

#[test]
fn test_dre_request_is_submitted_by_dre() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::KitLancheUnificado);

    assert!(
        AuthorizationService::authorize_transition(
            &create_test_dre(),
            TransitionName::IniciaFluxo,
            &solicitacao
        )
        .is_ok()
    );
    assert!(
        AuthorizationService::authorize_transition(
            &create_test_escola(),
            TransitionName::IniciaFluxo,
            &solicitacao
        )
        .is_err()
    );
}

// ============================================================================
// Creation, reads and jobs
// ============================================================================

#[test]
fn test_create_requires_requesting_institution() {
    let rastro: Rastro = create_rastro();

    assert!(
        AuthorizationService::authorize_create(
            &create_test_escola(),
            SolicitacaoKind::KitLanche,
            &rastro
        )
        .is_ok()
    );
    assert!(
        AuthorizationService::authorize_create(
            &create_test_other_escola(),
            SolicitacaoKind::KitLanche,
            &rastro
        )
        .is_err()
    );
    assert!(
        AuthorizationService::authorize_create(
            &create_test_dre(),
            SolicitacaoKind::KitLanche,
            &rastro
        )
        .is_err()
    );
}

#[test]
fn test_requisition_is_filed_by_logistics() {
    let rastro: Rastro = Rastro {
        escola: None,
        ..create_rastro()
    };

    assert!(
        AuthorizationService::authorize_create(
            &create_test_codae(),
            SolicitacaoKind::SolicitacaoRemessa,
            &rastro
        )
        .is_ok()
    );
    assert!(
        AuthorizationService::authorize_create(
            &create_test_terceirizada(),
            SolicitacaoKind::SolicitacaoRemessa,
            &rastro
        )
        .is_err()
    );
}

#[test]
fn test_school_cannot_cancel_dre_request() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::KitLancheUnificado);
    let name: TransitionName = solicitacao.workflow().cancellation();

    assert!(
        AuthorizationService::authorize_transition(&create_test_escola(), name, &solicitacao)
            .is_err()
    );
    assert!(
        AuthorizationService::authorize_transition(&create_test_dre(), name, &solicitacao).is_ok()
    );
}

#[test]
fn test_read_access() {
    let solicitacao: Solicitacao = create_solicitacao(SolicitacaoKind::InversaoCardapio);

    assert!(AuthorizationService::authorize_read(&create_test_codae(), &solicitacao).is_ok());
    assert!(AuthorizationService::authorize_read(&create_test_dre(), &solicitacao).is_ok());
    assert!(
        AuthorizationService::authorize_read(&AuthenticatedActor::system(), &solicitacao).is_ok()
    );
    assert!(
        AuthorizationService::authorize_read(&create_test_other_escola(), &solicitacao).is_err()
    );
}

#[test]
fn test_jobs_require_system() {
    assert!(
        AuthorizationService::authorize_system(&AuthenticatedActor::system(), "cancel_expired")
            .is_ok()
    );
    assert!(AuthorizationService::authorize_system(&create_test_codae(), "cancel_expired").is_err());
}
