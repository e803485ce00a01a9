// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use clap::Parser;
use color_eyre::Result;
use serde_json::Value;
use sigpae::TransitionContext;
use sigpae_api::AuthenticatedActor;
use sigpae_domain::BusinessCalendar;
use sigpae_persistence::Persistence;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_log::AsTrace;
use tracing_subscriber::EnvFilter;

mod cli;
mod clock;
mod commands;

#[cfg(test)]
mod tests;

use cli::Args;
use clock::Clock;

fn main() -> Result<ExitCode> {
    color_eyre::install()?;
    let args: Args = Args::parse();

    // RUST_LOG wins over -v/-q
    let fallback: String = args.verbosity.log_level_filter().as_trace().to_string();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback)),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let clock: Clock = match args.today {
        Some(today) => Clock::pinned(today)?,
        None => Clock::now()?,
    };
    let calendar: BusinessCalendar = BusinessCalendar::new()
        .with_holidays(args.holidays.iter().copied())
        .with_suspensions(args.suspensions.iter().copied());
    let ctx: TransitionContext<'_> = TransitionContext::new(clock.now, clock.today, &calendar);
    let actor: AuthenticatedActor = args.actor()?;

    match commands::run(&mut persistence, args.command, &actor, &ctx) {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(ExitCode::SUCCESS)
        }
        Err(err) => {
            error!(status = err.status_code(), "{err}");
            let body: Value = err.detail_body();
            eprintln!("{body}");
            Ok(ExitCode::from(commands::exit_code(&err)))
        }
    }
}
