// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]


use crate::Persistence;
use sigpae::{Command, Outcome, Solicitacao, TransitionContext, apply};
use sigpae_audit::{Actor, Vinculo};
use sigpae_domain::{
    BusinessCalendar, Datas, InstitutionId, InstitutionKind, Rastro, SolicitacaoKind,
};
use time::macros::{date, datetime};
use time::{Date, OffsetDateTime};

/// A Friday.
pub const TODAY: Date = date!(2022 - 01 - 28);
pub const NOW: OffsetDateTime = datetime!(2022-01-28 09:30 -3);
pub const EVENT_DATE: Date = date!(2022 - 02 - 14);

fn create_actor(id: &str, kind: InstitutionKind, institution: &str) -> Actor {
    Actor::new(
        id,
        id,
        Vinculo::new(kind, InstitutionId::new(institution).unwrap()),
    )
    .unwrap()
}

pub fn create_test_escola_actor() -> Actor {
    create_actor("escola-1", InstitutionKind::Escola, "EMEF-001")
}

pub fn create_test_dre_actor() -> Actor {
    create_actor("dre-1", InstitutionKind::DiretoriaRegional, "DRE-IP")
}

pub fn create_test_codae_actor() -> Actor {
    create_actor("codae-1", InstitutionKind::Codae, "CODAE")
}

pub fn create_test_solicitacao(kind: SolicitacaoKind, dates: &[Date]) -> Solicitacao {
    let rastro: Rastro = Rastro {
        escola: Some(InstitutionId::new("EMEF-001").unwrap()),
        diretoria_regional: InstitutionId::new("DRE-IP").unwrap(),
        terceirizada: Some(InstitutionId::new("TERC-01").unwrap()),
    };
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

/// Runs `command` against the stored copy of `solicitacao` and persists
/// the outcome, returning the reloaded request.
pub fn apply_and_persist(
    persistence: &mut Persistence,
    solicitacao: &Solicitacao,
    command: Command,
    actor: &Actor,
) -> Solicitacao {
    let calendar: BusinessCalendar = BusinessCalendar::new();
    let ctx: TransitionContext<'_> = TransitionContext::new(NOW, TODAY, &calendar);
    let current: Solicitacao = persistence.load_solicitacao(solicitacao.id()).unwrap();
    let outcome: Outcome = apply(&current, command, actor, &ctx).unwrap();
    persistence
        .persist_outcome(&outcome, current.version())
        .unwrap();
    persistence.load_solicitacao(solicitacao.id()).unwrap()
}

/// A stored school request, submitted and validated by the DRE.
pub fn create_stored_validated_solicitacao(
    persistence: &mut Persistence,
    kind: SolicitacaoKind,
    dates: &[Date],
) -> Solicitacao {
    let solicitacao: Solicitacao = create_test_solicitacao(kind, dates);
    persistence.create_solicitacao(&solicitacao).unwrap();
    apply_and_persist(
        persistence,
        &solicitacao,
        Command::IniciaFluxo,
        &create_test_escola_actor(),
    );
    apply_and_persist(
        persistence,
        &solicitacao,
        Command::DreValida,
        &create_test_dre_actor(),
    )
}
