// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask - Project Automation
//!
//! - `cargo xtask ci` runs lint, deny, machete, build, test and the
//!   migration check.
//! - `cargo xtask verify-migrations` applies the embedded `SQLite`
//!   migrations to a scratch database, checks the resulting schema against
//!   the tables, indexes and triggers the persistence layer relies on, then
//!   reverts every migration and checks that nothing is left behind.
//!
//! Standard `cargo test` needs no infrastructure; everything runs against
//! in-memory `SQLite`.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::{fmt::Debug, io, process::Output, vec};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{eyre::Context, Result};
use diesel::sql_types::{Integer, Text};
use diesel::{QueryableByName, SqliteConnection};
use duct::cmd;
use std::collections::{BTreeMap, BTreeSet};
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    match args.run() {
        Ok(()) => (),
        Err(err) => {
            tracing::error!("{err}");
            std::process::exit(1);
        }
    }
    Ok(())
}

#[derive(Debug, Parser)]
#[command(bin_name = "cargo xtask", styles = clap_cargo::style::CLAP_STYLING)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    verbosity: Verbosity<InfoLevel>,
}

impl Args {
    fn run(self) -> Result<()> {
        self.command.run()
    }

    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, build, test, migrations)
    CI,

    /// Build the project
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate code coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies
    #[command(visible_alias = "cd")]
    Deny,

    // Check unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy on the project
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Check documentation for errors and warnings
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check for formatting issues in the project
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Check for typos in the project
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Fix clippy warnings in the project
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Fix formatting issues in the project
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Run tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Apply and revert the `SQLite` migrations and check the schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => build(),
            Self::Check => check(),
            Self::Coverage => coverage(),
            Self::Deny => deny(),
            Self::Machete => machete(),
            Self::Lint => lint(),
            Self::LintClippy => lint_clippy(),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => lint_format(),
            Self::LintTypos => lint_typos(),
            Self::FixClippy => fix_clippy(),
            Self::FixFormatting => fix_format(),
            Self::Test => test(),
            Self::TestDocs => test_docs(),
            Self::TestLibs => test_libs(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

/// Run CI checks (lint, build, test, migrations)
fn ci() -> Result<()> {
    lint()?;
    deny()?;
    machete()?;
    build()?;
    test()?;
    verify_migrations()?;
    Ok(())
}

fn deny() -> Result<()> {
    run_cargo(vec!["deny", "check"])
}

fn machete() -> Result<()> {
    cmd!("cargo-machete").run_with_trace()?;
    Ok(())
}

/// Build the project
fn build() -> Result<()> {
    run_cargo(vec!["build", "--all-targets", "--all-features"])
}

/// Run cargo check
fn check() -> Result<()> {
    run_cargo(vec!["check", "--all-targets", "--all-features"])
}

/// Generate code coverage report
fn coverage() -> Result<()> {
    run_cargo(vec![
        "llvm-cov",
        "--lcov",
        "--output-path",
        "target/lcov.info",
        "--all-features",
    ])
}

/// Lint formatting, typos, clippy, and docs
fn lint() -> Result<()> {
    lint_clippy()?;
    lint_docs()?;
    lint_format()?;
    lint_typos()?;
    Ok(())
}

/// Run clippy on the project
fn lint_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--",
        "-D",
        "warnings",
    ])
}

/// Fix clippy warnings in the project
fn fix_clippy() -> Result<()> {
    run_cargo(vec![
        "clippy",
        "--all-targets",
        "--all-features",
        "--fix",
        "--allow-dirty",
        "--allow-staged",
        "--",
        "-D",
        "warnings",
    ])
}

/// Check that docs build without errors using docs.rs-equivalent flags
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        cmd(
            "cargo",
            [
                "doc",
                "--no-deps",
                "--all-features",
                "--package",
                &package.name,
            ],
        )
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings")
        .run_with_trace()?;
    }

    Ok(())
}

/// Lint formatting issues in the project
fn lint_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all", "--check"])
}

/// Fix formatting issues in the project
fn fix_format() -> Result<()> {
    run_cargo_nightly(vec!["fmt", "--all"])
}

/// Check for typos in the project using [typos-cli](https://github.com/crate-ci/typos/)
fn lint_typos() -> Result<()> {
    cmd!("typos").run_with_trace()?;
    Ok(())
}

/// Run tests for libs and docs
fn test() -> Result<()> {
    test_libs()?;
    test_docs()?; // run last because it's slow
    Ok(())
}

/// Run doc tests for the workspace's default packages
fn test_docs() -> Result<()> {
    run_cargo(vec!["test", "--doc", "--all-features"])
}

/// Run lib tests for the workspace's default packages
fn test_libs() -> Result<()> {
    run_cargo(vec!["test", "--all-targets", "--all-features"])
}

/// Run a cargo subcommand with the default toolchain
fn run_cargo(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args).run_with_trace()?;
    Ok(())
}

/// Run a cargo subcommand with the nightly toolchain
fn run_cargo_nightly(args: Vec<&str>) -> Result<()> {
    cmd("cargo", args)
        // CARGO env var is set because we're running in a cargo subcommand
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly")
        .run_with_trace()?;
    Ok(())
}

// ============================================================================
// Migration verification
// ============================================================================

/// Tables the persistence layer reads and writes.
const EXPECTED_TABLES: &[&str] = &[
    "datas_ocorrencia",
    "logs_transicao",
    "notificacoes",
    "solicitacoes",
];

/// Triggers that keep the transition log append-only.
const EXPECTED_TRIGGERS: &[&str] = &["logs_transicao_no_delete", "logs_transicao_no_update"];

/// Apply every migration, check the schema, then revert and check that the
/// database is empty again.
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{embed_migrations, MigrationHarness};

    const SQLITE_MIGRATIONS: diesel_migrations::EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");

    tracing::info!("Starting migration verification");

    let mut conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;

    {
        use diesel::RunQueryDsl;
        diesel::sql_query("PRAGMA foreign_keys = ON")
            .execute(&mut conn)
            .wrap_err("Failed to enable foreign keys on SQLite")?;
    }

    conn.run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to apply SQLite migrations: {}", e))?;
    tracing::info!("SQLite migrations applied successfully");

    let schema = introspect_sqlite_schema(&mut conn)?;
    check_schema(&schema)?;

    let triggers = list_objects(&mut conn, "trigger")?;
    for trigger in EXPECTED_TRIGGERS {
        if !triggers.contains(*trigger) {
            return Err(color_eyre::eyre::eyre!("Missing trigger: {trigger}"));
        }
    }
    tracing::info!("Schema matches the persistence layer");

    conn.revert_all_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| color_eyre::eyre::eyre!("Failed to revert SQLite migrations: {}", e))?;

    let leftover = introspect_sqlite_schema(&mut conn)?;
    if !leftover.tables.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "Down migrations left tables behind: {:?}",
            leftover.tables.keys().collect::<Vec<_>>()
        ));
    }
    let leftover_triggers = list_objects(&mut conn, "trigger")?;
    if !leftover_triggers.is_empty() {
        return Err(color_eyre::eyre::eyre!(
            "Down migrations left triggers behind: {leftover_triggers:?}"
        ));
    }

    tracing::info!("✓ Migration verification passed");
    Ok(())
}

/// Normalized schema representation
#[derive(Debug, Clone, PartialEq, Eq)]
struct Schema {
    tables: BTreeMap<String, Table>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Table {
    columns: BTreeMap<String, Column>,
    primary_keys: BTreeSet<String>,
    foreign_keys: BTreeSet<ForeignKey>,
    indexes: BTreeSet<Index>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Column {
    normalized_type: String,
    nullable: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct ForeignKey {
    from_column: String,
    to_table: String,
    to_column: String,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
struct Index {
    name: String,
    columns: Vec<String>,
}

/// Names of `sqlite_master` objects of one type.
fn list_objects(conn: &mut SqliteConnection, object_type: &str) -> Result<BTreeSet<String>> {
    use diesel::RunQueryDsl;

    #[derive(QueryableByName)]
    struct ObjectName {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let names: Vec<ObjectName> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = ? AND name NOT LIKE 'sqlite_%' ORDER BY name",
    )
    .bind::<Text, _>(object_type)
    .load(conn)
    .wrap_err(format!("Failed to list SQLite {object_type}s"))?;

    Ok(names.into_iter().map(|object| object.name).collect())
}

/// Introspect `SQLite` schema
fn introspect_sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    use diesel::RunQueryDsl;

    #[derive(QueryableByName)]
    struct ColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        r#type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyInfo {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnInfo {
        #[diesel(sql_type = Text)]
        name: String,
    }

    let mut schema = Schema {
        tables: BTreeMap::new(),
    };

    let tables: BTreeSet<String> = list_objects(conn, "table")?
        .into_iter()
        .filter(|name| name != "__diesel_schema_migrations")
        .collect();

    for table in tables {
        let mut table_info = Table {
            columns: BTreeMap::new(),
            primary_keys: BTreeSet::new(),
            foreign_keys: BTreeSet::new(),
            indexes: BTreeSet::new(),
        };

        let columns: Vec<ColumnInfo> = diesel::sql_query(format!("PRAGMA table_info({table})"))
            .load(conn)
            .wrap_err(format!("Failed to get columns for table {table}"))?;

        for col in columns {
            let normalized_type = normalize_sqlite_type(&col.r#type);
            table_info.columns.insert(
                col.name.clone(),
                Column {
                    normalized_type,
                    nullable: col.notnull == 0,
                },
            );

            if col.pk > 0 {
                table_info.primary_keys.insert(col.name);
            }
        }

        let fks: Vec<ForeignKeyInfo> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({table})"))
                .load(conn)
                .wrap_err(format!("Failed to get foreign keys for table {table}"))?;

        for fk in fks {
            table_info.foreign_keys.insert(ForeignKey {
                from_column: fk.from,
                to_table: fk.table,
                to_column: fk.to,
            });
        }

        let indexes: Vec<IndexInfo> = diesel::sql_query(format!("PRAGMA index_list({table})"))
            .load(conn)
            .wrap_err(format!("Failed to get indexes for table {table}"))?;

        // Auto-generated indexes back primary keys and are covered above
        for idx in indexes
            .into_iter()
            .filter(|idx| !idx.name.starts_with("sqlite_autoindex_"))
        {
            let index_columns: Vec<IndexColumnInfo> =
                diesel::sql_query(format!("PRAGMA index_info({})", idx.name))
                    .load(conn)
                    .wrap_err(format!("Failed to get index columns for {}", idx.name))?;

            table_info.indexes.insert(Index {
                name: idx.name,
                columns: index_columns.into_iter().map(|c| c.name).collect(),
            });
        }

        schema.tables.insert(table, table_info);
    }

    Ok(schema)
}

fn normalize_sqlite_type(sqlite_type: &str) -> String {
    let upper = sqlite_type.to_uppercase();
    if upper.contains("INT") {
        "INTEGER".to_string()
    } else if upper.contains("BOOL") {
        "BOOLEAN".to_string()
    } else if upper.contains("CHAR") || upper.contains("TEXT") || upper.contains("CLOB") {
        "TEXT".to_string()
    } else {
        upper
    }
}

/// Checks the structural facts the persistence layer depends on.
fn check_schema(schema: &Schema) -> Result<()> {
    let actual: BTreeSet<&str> = schema.tables.keys().map(String::as_str).collect();
    let expected: BTreeSet<&str> = EXPECTED_TABLES.iter().copied().collect();
    if actual != expected {
        return Err(color_eyre::eyre::eyre!(
            "Table set mismatch: expected {expected:?}, found {actual:?}"
        ));
    }

    let table = |name: &str| {
        schema
            .tables
            .get(name)
            .ok_or_else(|| color_eyre::eyre::eyre!("Missing table: {name}"))
    };

    let solicitacoes = table("solicitacoes")?;
    require_column(solicitacoes, "solicitacoes", "version", "INTEGER", false)?;
    require_column(solicitacoes, "solicitacoes", "escola", "TEXT", true)?;
    require_primary_key(solicitacoes, "solicitacoes", &["id"])?;
    if !solicitacoes
        .indexes
        .iter()
        .any(|idx| idx.name == "idx_solicitacoes_status" && idx.columns == ["status"])
    {
        return Err(color_eyre::eyre::eyre!(
            "solicitacoes is missing its status index"
        ));
    }

    let datas = table("datas_ocorrencia")?;
    require_primary_key(datas, "datas_ocorrencia", &["data", "solicitacao_id"])?;
    require_foreign_key(datas, "datas_ocorrencia", "solicitacao_id", "solicitacoes")?;

    let logs = table("logs_transicao")?;
    require_primary_key(logs, "logs_transicao", &["event_id"])?;
    require_column(logs, "logs_transicao", "resposta_sim_nao", "BOOLEAN", true)?;
    require_foreign_key(logs, "logs_transicao", "uuid_original", "solicitacoes")?;

    let outbox = table("notificacoes")?;
    require_column(outbox, "notificacoes", "dispatched", "BOOLEAN", false)?;
    require_foreign_key(outbox, "notificacoes", "solicitacao_id", "solicitacoes")?;

    Ok(())
}

fn require_column(
    table: &Table,
    table_name: &str,
    column: &str,
    normalized_type: &str,
    nullable: bool,
) -> Result<()> {
    let found = table
        .columns
        .get(column)
        .ok_or_else(|| color_eyre::eyre::eyre!("{table_name}.{column} is missing"))?;
    if found.normalized_type != normalized_type || found.nullable != nullable {
        return Err(color_eyre::eyre::eyre!(
            "{table_name}.{column}: expected {normalized_type} (nullable: {nullable}), found {} (nullable: {})",
            found.normalized_type,
            found.nullable
        ));
    }
    Ok(())
}

fn require_primary_key(table: &Table, table_name: &str, columns: &[&str]) -> Result<()> {
    let expected: BTreeSet<String> = columns.iter().map(ToString::to_string).collect();
    if table.primary_keys != expected {
        return Err(color_eyre::eyre::eyre!(
            "{table_name}: expected primary key {expected:?}, found {:?}",
            table.primary_keys
        ));
    }
    Ok(())
}

fn require_foreign_key(table: &Table, table_name: &str, column: &str, target: &str) -> Result<()> {
    if table
        .foreign_keys
        .iter()
        .any(|fk| fk.from_column == column && fk.to_table == target && fk.to_column == "id")
    {
        Ok(())
    } else {
        Err(color_eyre::eyre::eyre!(
            "{table_name}.{column} does not reference {target}"
        ))
    }
}

/// An extension trait for `duct::Expression` that logs the command being run
/// before running it.
trait ExpressionExt {
    /// Run the command and log the command being run
    fn run_with_trace(&self) -> io::Result<Output>;
}

impl ExpressionExt for duct::Expression {
    fn run_with_trace(&self) -> io::Result<Output> {
        tracing::info!("running command: {:?}", self);
        self.run().inspect_err(|_| {
            // The command that was run may have scrolled off the screen, so repeat it here
            tracing::error!("failed to run command: {:?}", self);
        })
    }
}
