// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Command, Outcome, Solicitacao, TransitionContext, TransitionResult, apply};
use sigpae_audit::{Actor, Vinculo};
use sigpae_domain::{
    BusinessCalendar, Datas, InstitutionId, InstitutionKind, Rastro, SolicitacaoKind,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

/// A Friday.
pub const TODAY: Date = date!(2022 - 01 - 28);
pub const NOW: OffsetDateTime = datetime!(2022-01-28 09:30 -3);
/// Far enough ahead to be a regular request.
pub const EVENT_DATE: Date = date!(2022 - 02 - 14);

pub fn fixed_context(calendar: &BusinessCalendar) -> TransitionContext<'_> {
    TransitionContext::new(NOW, TODAY, calendar)
}

fn create_actor(id: &str, name: &str, kind: InstitutionKind, institution: &str) -> Actor {
    Actor::new(
        id,
        name,
        Vinculo::new(kind, InstitutionId::new(institution).unwrap()),
    )
    .unwrap()
}

pub fn create_test_escola_actor() -> Actor {
    create_actor(
        "escola-1",
        "Diretora Escolar",
        InstitutionKind::Escola,
        "EMEF-001",
    )
}

pub fn create_test_dre_actor() -> Actor {
    create_actor(
        "dre-1",
        "Cogestor DRE",
        InstitutionKind::DiretoriaRegional,
        "DRE-IP",
    )
}

pub fn create_test_codae_actor() -> Actor {
    create_actor(
        "codae-1",
        "Nutricionista CODAE",
        InstitutionKind::Codae,
        "CODAE",
    )
}

pub fn create_test_terceirizada_actor() -> Actor {
    create_actor(
        "terc-1",
        "Nutricionista Terceirizada",
        InstitutionKind::Terceirizada,
        "TERC-01",
    )
}

pub fn create_test_rastro() -> Rastro {
    Rastro {
        escola: Some(InstitutionId::new("EMEF-001").unwrap()),
        diretoria_regional: InstitutionId::new("DRE-IP").unwrap(),
        terceirizada: Some(InstitutionId::new("TERC-01").unwrap()),
    }
}

pub fn create_test_solicitacao(kind: SolicitacaoKind, dates: &[Date]) -> Solicitacao {
    let mut rastro: Rastro = create_test_rastro();
    if kind == SolicitacaoKind::KitLancheUnificado {
        rastro.escola = None;
    }
    Solicitacao::new(
        kind,
        rastro,
        Datas::from_dates(dates.iter().copied()).unwrap(),
        &create_test_escola_actor(),
        NOW,
        false,
    )
    .unwrap()
}

pub fn expect_transitioned(outcome: Outcome) -> TransitionResult {
    match outcome {
        Outcome::Transitioned(result) => result,
        Outcome::PartiallyCancelled(partial) => {
            panic!("expected a transition, got partial cancellation {partial:?}")
        }
    }
}

/// Applies each `(command, actor)` in order, panicking on the first error.
pub fn drive(solicitacao: &Solicitacao, steps: Vec<(Command, Actor)>) -> Solicitacao {
    let calendar: BusinessCalendar = BusinessCalendar::new();
    let ctx: TransitionContext<'_> = fixed_context(&calendar);
    let mut current: Solicitacao = solicitacao.clone();
    for (command, actor) in steps {
        let outcome: Outcome = apply(&current, command.clone(), &actor, &ctx)
            .unwrap_or_else(|err| panic!("{command:?} failed: {err}"));
        current = outcome.new_state().clone();
    }
    current
}

/// A school request validated by the DRE.
pub fn create_validated_solicitacao(kind: SolicitacaoKind, dates: &[Date]) -> Solicitacao {
    drive(
        &create_test_solicitacao(kind, dates),
        vec![
            (Command::IniciaFluxo, create_test_escola_actor()),
            (Command::DreValida, create_test_dre_actor()),
        ],
    )
}

/// A school request challenged by CODAE.
pub fn create_questioned_solicitacao() -> Solicitacao {
    drive(
        &create_validated_solicitacao(SolicitacaoKind::InversaoCardapio, &[EVENT_DATE]),
        vec![(
            Command::CodaeQuestiona {
                justificativa: String::from("Há cardápio para a data?"),
            },
            create_test_codae_actor(),
        )],
    )
}
