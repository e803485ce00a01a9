// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use crate::cli::{Args, Command, OutboxCommand, parse_date};
use crate::clock::Clock;
use crate::commands::{exit_code, run};
use chrono::{TimeZone, Utc};
use clap::Parser;
use serde_json::Value;
use sigpae::TransitionContext;
use sigpae_api::{ApiError, AuthenticatedActor, Role};
use sigpae_domain::BusinessCalendar;
use sigpae_persistence::Persistence;
use time::macros::{date, datetime};

fn parse(args: &[&str]) -> Args {
    Args::try_parse_from(std::iter::once("sigpae").chain(args.iter().copied())).unwrap()
}

fn actor(role: &str, institution: &str) -> AuthenticatedActor {
    parse(&[
        "--actor-id",
        "user-1",
        "--role",
        role,
        "--institution",
        institution,
        "expire",
    ])
    .actor()
    .unwrap()
}

// ============================================================================
// Arguments
// ============================================================================

#[test]
fn test_parse_create_with_repeated_dates() {
    let args: Args = parse(&[
        "--today",
        "2022-01-28",
        "--holiday",
        "2022-02-01",
        "--holiday",
        "2022-02-02",
        "create",
        "--kind",
        "alteracao_cardapio",
        "--escola",
        "EMEF-001",
        "--dre",
        "DRE-IP",
        "--date",
        "2022-02-14",
        "--date",
        "2022-02-15",
    ]);

    assert_eq!(args.today, Some(date!(2022 - 01 - 28)));
    assert_eq!(args.holidays.len(), 2);
    match args.command {
        Command::Create {
            dates, terceirizada, ..
        } => {
            assert_eq!(dates, vec![date!(2022 - 02 - 14), date!(2022 - 02 - 15)]);
            assert_eq!(terceirizada, None);
        }
        other => panic!("unexpected command: {other:?}"),
    }
}

#[test]
fn test_parse_transition_answer() {
    let args: Args = parse(&[
        "transition",
        "some-id",
        "terceirizada_responde_questionamento",
        "--resposta",
        "nao",
    ]);
    assert!(matches!(
        args.command,
        Command::Transition {
            resposta: Some(false),
            ..
        }
    ));
}

#[test]
fn test_parse_outbox_dispatch() {
    let args: Args = parse(&["outbox", "dispatch", "7"]);
    assert_eq!(
        args.command,
        Command::Outbox(OutboxCommand::Dispatch { notificacao_id: 7 })
    );
}

#[test]
fn test_bad_date_is_rejected() {
    assert!(parse_date("14/02/2022").is_err());
    assert!(Args::try_parse_from(["sigpae", "--today", "2022-13-01", "expire"]).is_err());
}

#[test]
fn test_default_actor_is_system() {
    let actor: AuthenticatedActor = parse(&["expire"]).actor().unwrap();
    assert_eq!(actor, AuthenticatedActor::system());
}

#[test]
fn test_non_system_actor_needs_institution() {
    let args: Args = parse(&["--role", "codae", "outbox", "list"]);
    assert!(args.actor().is_err());

    let codae: AuthenticatedActor = actor("codae", "CODAE");
    assert_eq!(codae.role, Role::Codae);
    assert_eq!(codae.name, "user-1");
}

// ============================================================================
// Clock
// ============================================================================

#[test]
fn test_clock_uses_sao_paulo_date() {
    // 01:30 UTC is still the previous evening in Sao Paulo
    let clock: Clock = Clock::at(Utc.with_ymd_and_hms(2022, 1, 29, 1, 30, 0).unwrap()).unwrap();

    assert_eq!(clock.today, date!(2022 - 01 - 28));
    assert_eq!(clock.now, datetime!(2022-01-28 22:30 -3));
}

#[test]
fn test_pinned_clock_starts_the_day() {
    let clock: Clock = Clock::pinned(date!(2022 - 02 - 16)).unwrap();

    assert_eq!(clock.today, date!(2022 - 02 - 16));
    assert_eq!(clock.now, datetime!(2022-02-16 00:00 -3));
}

// ============================================================================
// Commands
// ============================================================================

#[test]
fn test_exit_codes() {
    let forbidden: ApiError = ApiError::Unauthorized {
        action: String::from("cancel_expired"),
        required_role: String::from("Sistema"),
    };
    let internal: ApiError = ApiError::Internal {
        message: String::new(),
    };

    assert_eq!(exit_code(&forbidden), 3);
    assert_eq!(exit_code(&internal), 1);
}

#[test]
fn test_commands_drive_a_request_to_authorization() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let calendar: BusinessCalendar = BusinessCalendar::new();
    let clock: Clock = Clock::pinned(date!(2022 - 01 - 28)).unwrap();
    let ctx: TransitionContext<'_> = TransitionContext::new(clock.now, clock.today, &calendar);
    let escola: AuthenticatedActor = actor("escola", "EMEF-001");

    let created: Value = run(
        &mut persistence,
        parse(&[
            "create",
            "--kind",
            "inversao_cardapio",
            "--escola",
            "EMEF-001",
            "--dre",
            "DRE-IP",
            "--terceirizada",
            "TERC-01",
            "--date",
            "2022-02-14",
        ])
        .command,
        &escola,
        &ctx,
    )
    .unwrap();
    let id: String = created["id"].as_str().unwrap().to_string();
    assert_eq!(created["status"], "RASCUNHO");
    assert_eq!(created["datas"][0]["data"], "2022-02-14");

    run(
        &mut persistence,
        parse(&["transition", &id, "inicia_fluxo"]).command,
        &escola,
        &ctx,
    )
    .unwrap();
    run(
        &mut persistence,
        parse(&["transition", &id, "dre_valida"]).command,
        &actor("dre", "DRE-IP"),
        &ctx,
    )
    .unwrap();
    let decided: Value = run(
        &mut persistence,
        parse(&["codae-decide", &id, "autoriza"]).command,
        &actor("codae", "CODAE"),
        &ctx,
    )
    .unwrap();
    assert_eq!(decided["solicitacao"]["status"], "CODAE_AUTORIZADO");

    let system: AuthenticatedActor = AuthenticatedActor::system();
    let outbox: Value = run(
        &mut persistence,
        parse(&["outbox", "list"]).command,
        &system,
        &ctx,
    )
    .unwrap();
    let notificacao_id: i64 = outbox[0]["notificacao_id"].as_i64().unwrap();
    let dispatched: Value = run(
        &mut persistence,
        Command::Outbox(OutboxCommand::Dispatch { notificacao_id }),
        &system,
        &ctx,
    )
    .unwrap();
    assert_eq!(dispatched["dispatched"], notificacao_id);

    let logs: Value = run(
        &mut persistence,
        parse(&["logs", &id]).command,
        &escola,
        &ctx,
    )
    .unwrap();
    assert_eq!(logs.as_array().unwrap().len(), 3);
}

#[test]
fn test_command_errors_surface_unchanged() {
    let mut persistence: Persistence = Persistence::new_in_memory().unwrap();
    let calendar: BusinessCalendar = BusinessCalendar::new();
    let clock: Clock = Clock::pinned(date!(2022 - 01 - 28)).unwrap();
    let ctx: TransitionContext<'_> = TransitionContext::new(clock.now, clock.today, &calendar);

    let err: ApiError = run(
        &mut persistence,
        Command::Expire,
        &actor("codae", "CODAE"),
        &ctx,
    )
    .unwrap_err();

    assert_eq!(err.status_code(), 403);
    assert_eq!(exit_code(&err), 3);
}
