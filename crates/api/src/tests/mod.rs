// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

mod authorization_tests;
mod error_tests;

use crate::{
    AuthenticatedActor, CreateSolicitacaoRequest, Role, SolicitacaoResponse, TransitionRequest,
    create_solicitacao, execute_transition,
};
use sigpae::TransitionContext;
use sigpae_domain::{BusinessCalendar, InstitutionId};
use sigpae_persistence::Persistence;
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

/// A Friday.
pub const TODAY: Date = date!(2022 - 01 - 28);
pub const NOW: OffsetDateTime = datetime!(2022-01-28 09:30 -3);
pub const EVENT_DATE: Date = date!(2022 - 02 - 14);
pub const SECOND_DATE: Date = date!(2022 - 02 - 15);

fn create_actor(id: &str, role: Role, institution: &str) -> AuthenticatedActor {
    AuthenticatedActor::new(id, id, role, InstitutionId::new(institution).unwrap())
}

pub fn create_test_escola() -> AuthenticatedActor {
    create_actor("escola-1", Role::Escola, "EMEF-001")
}

pub fn create_test_other_escola() -> AuthenticatedActor {
    create_actor("escola-2", Role::Escola, "EMEF-999")
}

pub fn create_test_dre() -> AuthenticatedActor {
    create_actor("dre-1", Role::DiretoriaRegional, "DRE-IP")
}

pub fn create_test_codae() -> AuthenticatedActor {
    create_actor("codae-1", Role::Codae, "CODAE")
}

pub fn create_test_terceirizada() -> AuthenticatedActor {
    create_actor("terc-1", Role::Terceirizada, "TERC-01")
}

pub fn create_test_context(calendar: &BusinessCalendar) -> TransitionContext<'_> {
    TransitionContext::new(NOW, TODAY, calendar)
}

pub fn create_test_request(kind: &str, datas: &[Date]) -> CreateSolicitacaoRequest {
    CreateSolicitacaoRequest {
        kind: kind.to_string(),
        escola: Some(String::from("EMEF-001")),
        diretoria_regional: String::from("DRE-IP"),
        terceirizada: Some(String::from("TERC-01")),
        datas: datas.to_vec(),
        lanche_emergencial: false,
    }
}

/// Files a school request and carries it through submission and DRE
/// validation.
pub fn create_validated_solicitacao(
    persistence: &mut Persistence,
    kind: &str,
    datas: &[Date],
) -> SolicitacaoResponse {
    let calendar: BusinessCalendar = BusinessCalendar::new();
    let ctx: TransitionContext<'_> = create_test_context(&calendar);

    let created: SolicitacaoResponse = create_solicitacao(
        persistence,
        create_test_request(kind, datas),
        &create_test_escola(),
        &ctx,
    )
    .unwrap();
    execute_transition(
        persistence,
        &created.id,
        "inicia_fluxo",
        TransitionRequest::default(),
        &create_test_escola(),
        &ctx,
    )
    .unwrap();
    execute_transition(
        persistence,
        &created.id,
        "dre_valida",
        TransitionRequest::default(),
        &create_test_dre(),
        &ctx,
    )
    .unwrap()
    .solicitacao
}
