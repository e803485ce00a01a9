// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApiError, AuthError, translate_domain_error, translate_persistence_error,
    translate_transition_error,
};
use sigpae::TransitionError;
use sigpae_domain::{DomainError, GuardViolation, SolicitacaoId, Status, TransitionName};
use sigpae_persistence::PersistenceError;

#[test]
fn test_status_codes() {
    let cases: Vec<(ApiError, u16)> = vec![
        (
            ApiError::TransitionFailed {
                message: String::new(),
            },
            400,
        ),
        (
            ApiError::InvalidInput {
                field: String::from("datas"),
                message: String::new(),
            },
            400,
        ),
        (
            ApiError::Unauthorized {
                action: String::from("codae_nega"),
                required_role: String::from("Codae"),
            },
            403,
        ),
        (
            ApiError::InstitutionMismatch {
                action: String::from("inicia_fluxo"),
                institution: String::from("EMEF-999"),
            },
            403,
        ),
        (
            ApiError::ResourceNotFound {
                resource_type: String::from("Solicitação"),
                message: String::new(),
            },
            404,
        ),
        (
            ApiError::Conflict {
                message: String::new(),
            },
            409,
        ),
        (
            ApiError::Internal {
                message: String::new(),
            },
            500,
        ),
    ];

    for (err, expected) in cases {
        assert_eq!(err.status_code(), expected, "{err}");
    }
}

#[test]
fn test_illegal_transition_detail_body() {
    let err: ApiError = translate_transition_error(&TransitionError::IllegalTransition {
        transition: TransitionName::CodaeAutoriza,
        from: Status::Rascunho,
    });

    assert_eq!(err.status_code(), 400);
    assert_eq!(
        err.detail_body(),
        serde_json::json!({
            "detail": "Erro de transição de estado: Transition 'codae_autoriza' isn't available from state 'RASCUNHO'."
        })
    );
}

#[test]
fn test_guard_message_matches_engine_detail() {
    let engine: TransitionError =
        TransitionError::GuardViolation(GuardViolation::JustificationRequired);
    let err: ApiError = translate_transition_error(&engine);

    assert_eq!(err.to_string(), engine.detail());
}

#[test]
fn test_auth_error_converts() {
    let err: ApiError = AuthError::InstitutionMismatch {
        action: String::from("read_solicitacao"),
        institution: String::from("EMEF-999"),
    }
    .into();

    assert_eq!(err.status_code(), 403);
}

#[test]
fn test_domain_error_names_field() {
    let err: ApiError = translate_domain_error(DomainError::EmptyDates);
    assert!(matches!(err, ApiError::InvalidInput { ref field, .. } if field == "datas"));
}

#[test]
fn test_persistence_errors_map_to_contract() {
    let id: SolicitacaoId = SolicitacaoId::new();

    assert_eq!(
        translate_persistence_error(PersistenceError::SolicitacaoNotFound(id)).status_code(),
        404
    );
    assert_eq!(
        translate_persistence_error(PersistenceError::ConcurrentModification {
            id,
            expected_version: 3,
        })
        .status_code(),
        409
    );
    assert_eq!(
        translate_persistence_error(PersistenceError::QueryFailed(String::from("boom")))
            .status_code(),
        500
    );
}
