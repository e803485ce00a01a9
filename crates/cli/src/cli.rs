// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use clap::{Parser, Subcommand};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use sigpae_api::{AuthenticatedActor, Role};
use sigpae_domain::{DomainError, InstitutionId};
use time::Date;
use time::macros::format_description;

/// SIGPAE - drives the request-approval workflow against a `SQLite` database
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long)]
    pub database: Option<String>,

    /// Business date to act on (YYYY-MM-DD); defaults to today in America/Sao_Paulo
    #[arg(long, value_parser = parse_date)]
    pub today: Option<Date>,

    /// A holiday (YYYY-MM-DD); repeatable
    #[arg(long = "holiday", value_parser = parse_date)]
    pub holidays: Vec<Date>,

    /// A school-calendar suspension day (YYYY-MM-DD); repeatable
    #[arg(long = "suspension", value_parser = parse_date)]
    pub suspensions: Vec<Date>,

    /// Caller id, recorded in the transition log
    #[arg(long, default_value = "sistema")]
    pub actor_id: String,

    /// Caller display name; defaults to the id
    #[arg(long)]
    pub actor_name: Option<String>,

    /// Caller role: escola, dre, codae, terceirizada or sistema
    #[arg(long, default_value = "sistema")]
    pub role: Role,

    /// Institution the caller acts for; required unless the role is sistema
    #[arg(long)]
    pub institution: Option<String>,

    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    #[command(subcommand)]
    pub command: Command,
}

impl Args {
    /// The caller described by the actor flags.
    ///
    /// # Errors
    ///
    /// Returns an error if a non-system role has no valid institution.
    pub fn actor(&self) -> Result<AuthenticatedActor, DomainError> {
        if self.role == Role::Sistema {
            return Ok(AuthenticatedActor::system());
        }
        let institution: &str = self.institution.as_deref().ok_or_else(|| {
            DomainError::InvalidActor(format!("--institution é obrigatório para {}", self.role))
        })?;

        Ok(AuthenticatedActor::new(
            &self.actor_id,
            self.actor_name.as_deref().unwrap_or(&self.actor_id),
            self.role,
            InstitutionId::new(institution)?,
        ))
    }
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// File a new request as a draft
    Create {
        /// Request kind, e.g. inversao_cardapio
        #[arg(long)]
        kind: String,
        #[arg(long)]
        escola: Option<String>,
        #[arg(long)]
        dre: String,
        #[arg(long)]
        terceirizada: Option<String>,
        /// An occurrence date (YYYY-MM-DD); repeatable
        #[arg(long = "date", required = true, value_parser = parse_date)]
        dates: Vec<Date>,
        /// Emergency snack alteration, exempt from notice rules
        #[arg(long)]
        lanche_emergencial: bool,
    },

    /// Fire a named transition
    #[command(visible_alias = "t")]
    Transition {
        id: String,
        /// e.g. inicia_fluxo, dre_valida, codae_questiona
        name: String,
        #[arg(long)]
        justificativa: Option<String>,
        /// The caterer's answer to a challenge
        #[arg(long, value_parser = parse_answer)]
        resposta: Option<bool>,
    },

    /// Authorize or deny, routed by the current status
    CodaeDecide {
        id: String,
        /// autoriza or nega
        decision: String,
        #[arg(long)]
        justificativa: Option<String>,
    },

    /// Cancel a request, or only the given dates
    Cancel {
        id: String,
        #[arg(long)]
        justificativa: String,
        /// A date to cancel (YYYY-MM-DD); repeatable, none cancels everything
        #[arg(long = "date", value_parser = parse_date)]
        dates: Vec<Date>,
    },

    /// Show a request
    Show { id: String },

    /// Show the transition log of a request
    Logs { id: String },

    /// Inspect or drain the notification outbox
    #[command(subcommand)]
    Outbox(OutboxCommand),

    /// Cancel every pending request whose date has passed
    Expire,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum OutboxCommand {
    /// List notifications waiting for delivery
    List,
    /// Mark a notification as delivered
    Dispatch { notificacao_id: i64 },
}

/// Parses an ISO calendar date.
///
/// # Errors
///
/// Returns a message naming the expected format.
pub fn parse_date(value: &str) -> Result<Date, String> {
    Date::parse(value, format_description!("[year]-[month]-[day]"))
        .map_err(|e| format!("expected YYYY-MM-DD: {e}"))
}

fn parse_answer(value: &str) -> Result<bool, String> {
    match value.to_ascii_lowercase().as_str() {
        "sim" | "s" | "yes" | "true" => Ok(true),
        "nao" | "não" | "n" | "no" | "false" => Ok(false),
        _ => Err(format!("expected sim or nao, got {value}")),
    }
}
