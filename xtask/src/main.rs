// Copyright (C) 2024-2025 Fred Clausen and the ratatui project contributors
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! # xtask
//!
//! Automation for the hunterboard workspace: lint, build, test, and the
//! opt-in `MariaDB` checks.
//!
//! `cargo test` only ever touches in-memory `SQLite`. The `MariaDB` commands
//! start a throwaway Docker container, point the ignored persistence tests
//! (or the migration parity check) at it, and remove the container again
//! whether or not the run succeeded.

#![deny(
    clippy::pedantic,
    //clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use std::collections::{BTreeMap, BTreeSet};
use std::{io, process::Output};

use cargo_metadata::MetadataCommand;
use clap::{Parser, Subcommand};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use color_eyre::{Result, eyre::Context, eyre::eyre};
use diesel::sql_types::{BigInt, Integer, Text};
use diesel::{MysqlConnection, QueryableByName, RunQueryDsl, SqliteConnection};
use duct::cmd;
use tracing::level_filters::LevelFilter;
use tracing_log::AsTrace;

/// Database name of the parity check container.
const VERIFY_DATABASE: &str = "hunterboard_verify";

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();
    tracing_subscriber::fmt()
        .with_max_level(args.log_level())
        .without_time()
        .init();

    if let Err(err) = args.command.run() {
        tracing::error!("{err}");
        std::process::exit(1);
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
    fn log_level(&self) -> LevelFilter {
        self.verbosity.log_level_filter().as_trace()
    }
}

#[derive(Clone, Copy, Debug, Subcommand)]
enum Command {
    /// Run CI checks (lint, deny, machete, build, test, `MariaDB`)
    CI,

    /// Build the workspace
    #[command(visible_alias = "b")]
    Build,

    /// Run cargo check
    #[command(visible_alias = "c")]
    Check,

    /// Generate an lcov coverage report
    #[command(visible_alias = "cov")]
    Coverage,

    /// Check dependencies with cargo-deny
    #[command(visible_alias = "cd")]
    Deny,

    /// Check for unused dependencies
    #[command(visible_alias = "m")]
    Machete,

    /// Lint formatting, typos, clippy, and docs
    #[command(visible_alias = "l")]
    Lint,

    /// Run clippy with warnings denied
    #[command(visible_alias = "cl")]
    LintClippy,

    /// Build docs with docs.rs flags
    #[command(visible_alias = "d")]
    LintDocs,

    /// Check formatting
    #[command(visible_alias = "lf")]
    LintFormatting,

    /// Lint markdown files
    #[command(visible_alias = "md")]
    LintMarkdown,

    /// Check for typos
    #[command(visible_alias = "lt")]
    LintTypos,

    /// Apply clippy fixes
    #[command(visible_alias = "fc")]
    FixClippy,

    /// Apply formatting
    #[command(visible_alias = "fmt")]
    FixFormatting,

    /// Fix typos in place
    #[command(visible_alias = "typos")]
    FixTypos,

    /// Run lib and doc tests
    #[command(visible_alias = "t")]
    Test,

    /// Run doc tests
    #[command(visible_alias = "td")]
    TestDocs,

    /// Run lib tests
    #[command(visible_alias = "tl")]
    TestLibs,

    /// Run the ignored persistence tests against `MariaDB`
    #[command(visible_alias = "tm")]
    TestMariadb,

    /// Check that `SQLite` and `MySQL` migrations build the same schema
    #[command(visible_alias = "vm")]
    VerifyMigrations,
}

impl Command {
    fn run(self) -> Result<()> {
        match self {
            Self::CI => ci(),
            Self::Build => run_cargo(&["build", "--all-targets", "--all-features"]),
            Self::Check => run_cargo(&["check", "--all-targets", "--all-features"]),
            Self::Coverage => run_cargo(&[
                "llvm-cov",
                "--lcov",
                "--output-path",
                "target/lcov.info",
                "--all-features",
            ]),
            Self::Deny => run_cargo(&["deny", "check"]),
            Self::Machete => run(&cmd!("cargo-machete")),
            Self::Lint => lint(),
            Self::LintClippy => run_cargo(&CLIPPY),
            Self::LintDocs => lint_docs(),
            Self::LintFormatting => run_cargo_nightly(&["fmt", "--all", "--check"]),
            Self::LintMarkdown => run(&cmd!("markdownlint-cli2", "**/*.md", "!target", "!**/target")),
            Self::LintTypos => run(&cmd!("typos")),
            Self::FixClippy => run_cargo(&[
                "clippy",
                "--all-targets",
                "--all-features",
                "--fix",
                "--allow-dirty",
                "--allow-staged",
                "--",
                "-D",
                "warnings",
            ]),
            Self::FixFormatting => run_cargo_nightly(&["fmt", "--all"]),
            Self::FixTypos => run(&cmd!("typos", "-w")),
            Self::Test => {
                Self::TestLibs.run()?;
                // Slowest, so last
                Self::TestDocs.run()
            }
            Self::TestDocs => run_cargo(&["test", "--doc", "--all-features"]),
            Self::TestLibs => run_cargo(&["test", "--all-targets", "--all-features"]),
            Self::TestMariadb => test_mariadb(),
            Self::VerifyMigrations => verify_migrations(),
        }
    }
}

const CLIPPY: [&str; 6] = [
    "clippy",
    "--all-targets",
    "--all-features",
    "--",
    "-D",
    "warnings",
];

fn ci() -> Result<()> {
    for step in [
        Command::Lint,
        Command::Deny,
        Command::Machete,
        Command::Build,
        Command::Test,
        Command::TestMariadb,
        Command::VerifyMigrations,
    ] {
        tracing::info!(?step, "CI step");
        step.run()?;
    }
    Ok(())
}

/// Clippy, docs, formatting and typos. Markdown lint failures only warn.
fn lint() -> Result<()> {
    for step in [
        Command::LintClippy,
        Command::LintDocs,
        Command::LintFormatting,
        Command::LintTypos,
    ] {
        step.run()?;
    }
    if let Err(err) = Command::LintMarkdown.run() {
        tracing::warn!("markdownlint reported issues: {err}");
    }
    Ok(())
}

/// Builds docs for every default workspace package with docs.rs flags.
fn lint_docs() -> Result<()> {
    let meta = MetadataCommand::new()
        .exec()
        .wrap_err("failed to get cargo metadata")?;

    for package in meta.workspace_default_packages() {
        run(&cmd(
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
        .env("RUSTDOCFLAGS", "--cfg docsrs -D warnings"))?;
    }
    Ok(())
}

fn run(expression: &duct::Expression) -> Result<()> {
    expression.run_with_trace()?;
    Ok(())
}

fn run_cargo(args: &[&str]) -> Result<()> {
    run(&cmd("cargo", args))
}

fn run_cargo_nightly(args: &[&str]) -> Result<()> {
    // CARGO is set because we run as a cargo subcommand
    run(&cmd("cargo", args)
        .env_remove("CARGO")
        .env("RUSTUP_TOOLCHAIN", "nightly"))
}

/// A throwaway `MariaDB` 11 container, removed on drop.
struct MariadbContainer {
    name: &'static str,
    database: &'static str,
    user: &'static str,
    password: &'static str,
    port: &'static str,
}

impl MariadbContainer {
    /// Starts the container and blocks until it answers queries.
    fn start(
        name: &'static str,
        database: &'static str,
        password: &'static str,
        port: &'static str,
    ) -> Result<Self> {
        use std::thread::sleep;
        use std::time::Duration;

        cmd!("docker", "--version")
            .run_with_trace()
            .wrap_err("Docker is not available. Please install Docker.")?;

        let container = Self {
            name,
            database,
            user: "hunterboard",
            password,
            port,
        };

        // Leftovers from an interrupted run
        container.remove();

        tracing::info!("Starting MariaDB container: {}", container.name);
        cmd!(
            "docker",
            "run",
            "--name",
            container.name,
            "-e",
            format!("MARIADB_DATABASE={}", container.database),
            "-e",
            format!("MARIADB_USER={}", container.user),
            "-e",
            format!("MARIADB_PASSWORD={}", container.password),
            "-e",
            "MARIADB_ROOT_PASSWORD=root_password",
            "-p",
            format!("{}:3306", container.port),
            "-d",
            "mariadb:11"
        )
        .run_with_trace()
        .wrap_err("Failed to start MariaDB container")?;

        tracing::info!("Waiting for MariaDB to be ready...");
        for attempt in 1..=30 {
            sleep(Duration::from_secs(1));
            tracing::debug!("Connection attempt {attempt}/30");

            let probe = cmd!(
                "docker",
                "exec",
                container.name,
                "mariadb",
                "-u",
                container.user,
                format!("-p{}", container.password),
                "-e",
                "SELECT 1"
            )
            .stdout_null()
            .stderr_null()
            .run();

            if probe.is_ok() {
                tracing::info!("MariaDB is ready");
                return Ok(container);
            }
        }

        Err(eyre!("MariaDB did not become ready within timeout"))
    }

    fn database_url(&self) -> String {
        format!(
            "mysql://{}:{}@127.0.0.1:{}/{}",
            self.user, self.password, self.port, self.database
        )
    }

    fn remove(&self) {
        let _ = cmd!("docker", "stop", self.name)
            .stdout_null()
            .stderr_null()
            .run();
        let _ = cmd!("docker", "rm", self.name)
            .stdout_null()
            .stderr_null()
            .run();
    }
}

impl Drop for MariadbContainer {
    fn drop(&mut self) {
        tracing::info!("Removing MariaDB container {}", self.name);
        self.remove();
    }
}

/// Run `MariaDB` backend validation tests
///
/// Starts a container on port 3307 and runs the ignored
/// `backend_validation_tests` of `hunterboard-persistence` against it with
/// `DATABASE_URL` and `HUNTERBOARD_TEST_BACKEND=mariadb` set. The container
/// is removed whatever the outcome.
///
/// Requires Docker and the `MySQL` client libraries.
fn test_mariadb() -> Result<()> {
    tracing::info!("Starting MariaDB backend validation");

    let container = MariadbContainer::start(
        "hunterboard-test-mariadb",
        "hunterboard_test",
        "test_password",
        "3307",
    )?;

    cmd!(
        "cargo",
        "test",
        "--package",
        "hunterboard-persistence",
        "backend_validation_tests",
        "--",
        "--ignored",
        "--test-threads=1"
    )
    .env("DATABASE_URL", container.database_url())
    .env("HUNTERBOARD_TEST_BACKEND", "mariadb")
    .run_with_trace()
    .wrap_err("MariaDB backend validation tests failed")?;

    tracing::info!("MariaDB backend validation completed successfully");
    Ok(())
}

/// Verify schema parity between `SQLite` and `MySQL` migrations
///
/// Applies `migrations/` to an in-memory `SQLite` database and
/// `migrations_mysql/` to a `MariaDB` container on port 3308, introspects
/// both, and fails on any structural difference in tables, columns, keys or
/// indexes.
fn verify_migrations() -> Result<()> {
    use diesel::Connection;
    use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

    const SQLITE_MIGRATIONS: EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations");
    const MYSQL_MIGRATIONS: EmbeddedMigrations =
        embed_migrations!("../crates/persistence/migrations_mysql");

    tracing::info!("Starting schema parity verification");

    let container = MariadbContainer::start(
        "hunterboard-verify-migrations",
        VERIFY_DATABASE,
        "verify_password",
        "3308",
    )?;

    let mut sqlite_conn = SqliteConnection::establish(":memory:")
        .wrap_err("Failed to create SQLite in-memory database")?;
    diesel::sql_query("PRAGMA foreign_keys = ON")
        .execute(&mut sqlite_conn)
        .wrap_err("Failed to enable foreign keys on SQLite")?;
    sqlite_conn
        .run_pending_migrations(SQLITE_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply SQLite migrations: {e}"))?;

    let mut mysql_conn = MysqlConnection::establish(&container.database_url())
        .wrap_err("Failed to connect to MariaDB")?;
    mysql_conn
        .run_pending_migrations(MYSQL_MIGRATIONS)
        .map_err(|e| eyre!("Failed to apply MySQL migrations: {e}"))?;

    let sqlite_schema = sqlite_schema(&mut sqlite_conn)?;
    let mysql_schema = mysql_schema(&mut mysql_conn)?;
    compare_schemas(&sqlite_schema, &mysql_schema)?;

    tracing::info!("✓ Schema parity verification passed");
    Ok(())
}

/// One table reduced to what must match across backends.
///
/// Indexes are compared by their column lists; names are backend noise.
#[derive(Debug, Default, PartialEq, Eq)]
struct TableShape {
    /// Column name to (normalized type, nullable).
    columns: BTreeMap<String, (&'static str, bool)>,
    primary_key: BTreeSet<String>,
    /// (column, referenced table, referenced column)
    foreign_keys: BTreeSet<(String, String, String)>,
    unique: BTreeSet<Vec<String>>,
    indexes: BTreeSet<Vec<String>>,
}

type Schema = BTreeMap<String, TableShape>;

#[derive(QueryableByName)]
struct NameRow {
    #[diesel(sql_type = Text)]
    name: String,
}

fn sqlite_schema(conn: &mut SqliteConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text, column_name = "type")]
        declared_type: String,
        #[diesel(sql_type = Integer)]
        notnull: i32,
        #[diesel(sql_type = Integer)]
        pk: i32,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyRow {
        #[diesel(sql_type = Text)]
        table: String,
        #[diesel(sql_type = Text)]
        from: String,
        #[diesel(sql_type = Text)]
        to: String,
    }

    #[derive(QueryableByName)]
    struct IndexRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        origin: String,
        #[diesel(sql_type = Integer)]
        unique: i32,
    }

    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT name FROM sqlite_master WHERE type = 'table' \
         AND name NOT LIKE 'sqlite_%' AND name != '__diesel_schema_migrations'",
    )
    .load(conn)
    .wrap_err("Failed to list SQLite tables")?;

    let mut schema = Schema::new();
    for table in tables {
        let mut shape = TableShape::default();

        let columns: Vec<ColumnRow> =
            diesel::sql_query(format!("PRAGMA table_info({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read columns of {}", table.name))?;
        for col in columns {
            if col.pk > 0 {
                shape.primary_key.insert(col.name.clone());
            }
            shape
                .columns
                .insert(col.name, (normalize_type(&col.declared_type), col.notnull == 0));
        }

        let foreign_keys: Vec<ForeignKeyRow> =
            diesel::sql_query(format!("PRAGMA foreign_key_list({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read foreign keys of {}", table.name))?;
        shape.foreign_keys = foreign_keys
            .into_iter()
            .map(|fk| (fk.from, fk.table, fk.to))
            .collect();

        let indexes: Vec<IndexRow> =
            diesel::sql_query(format!("PRAGMA index_list({})", table.name))
                .load(conn)
                .wrap_err_with(|| format!("Failed to read indexes of {}", table.name))?;
        for index in indexes {
            // Primary key autoindexes are covered by `primary_key`
            if index.origin == "pk" {
                continue;
            }
            let columns: Vec<String> =
                diesel::sql_query(format!("PRAGMA index_info({})", index.name))
                    .load::<NameRow>(conn)
                    .wrap_err_with(|| format!("Failed to read index {}", index.name))?
                    .into_iter()
                    .map(|row| row.name)
                    .collect();
            if index.unique != 0 {
                shape.unique.insert(columns);
            } else {
                shape.indexes.insert(columns);
            }
        }

        schema.insert(table.name, shape);
    }
    Ok(schema)
}

fn mysql_schema(conn: &mut MysqlConnection) -> Result<Schema> {
    #[derive(QueryableByName)]
    struct ColumnRow {
        #[diesel(sql_type = Text)]
        name: String,
        #[diesel(sql_type = Text)]
        data_type: String,
        #[diesel(sql_type = Text)]
        is_nullable: String,
        #[diesel(sql_type = Text)]
        column_key: String,
    }

    #[derive(QueryableByName)]
    struct ForeignKeyRow {
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = Text)]
        referenced_table: String,
        #[diesel(sql_type = Text)]
        referenced_column: String,
    }

    #[derive(QueryableByName)]
    struct IndexColumnRow {
        #[diesel(sql_type = Text)]
        index_name: String,
        #[diesel(sql_type = Text)]
        column_name: String,
        #[diesel(sql_type = BigInt)]
        non_unique: i64,
    }

    let tables: Vec<NameRow> = diesel::sql_query(
        "SELECT table_name AS name FROM information_schema.tables \
         WHERE table_schema = ? AND table_name != '__diesel_schema_migrations'",
    )
    .bind::<Text, _>(VERIFY_DATABASE)
    .load(conn)
    .wrap_err("Failed to list MySQL tables")?;

    let mut schema = Schema::new();
    for table in tables {
        let mut shape = TableShape::default();

        let columns: Vec<ColumnRow> = diesel::sql_query(
            "SELECT column_name AS name, data_type AS data_type, \
             is_nullable AS is_nullable, column_key AS column_key \
             FROM information_schema.columns WHERE table_schema = ? AND table_name = ?",
        )
        .bind::<Text, _>(VERIFY_DATABASE)
        .bind::<Text, _>(&table.name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to read columns of {}", table.name))?;
        for col in columns {
            if col.column_key == "PRI" {
                shape.primary_key.insert(col.name.clone());
            }
            shape.columns.insert(
                col.name,
                (normalize_type(&col.data_type), col.is_nullable == "YES"),
            );
        }

        let foreign_keys: Vec<ForeignKeyRow> = diesel::sql_query(
            "SELECT column_name AS column_name, referenced_table_name AS referenced_table, \
             referenced_column_name AS referenced_column \
             FROM information_schema.key_column_usage \
             WHERE table_schema = ? AND table_name = ? AND referenced_table_name IS NOT NULL",
        )
        .bind::<Text, _>(VERIFY_DATABASE)
        .bind::<Text, _>(&table.name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to read foreign keys of {}", table.name))?;
        shape.foreign_keys = foreign_keys
            .into_iter()
            .map(|fk| (fk.column_name, fk.referenced_table, fk.referenced_column))
            .collect();

        let index_columns: Vec<IndexColumnRow> = diesel::sql_query(
            "SELECT index_name AS index_name, column_name AS column_name, \
             CAST(non_unique AS SIGNED) AS non_unique \
             FROM information_schema.statistics \
             WHERE table_schema = ? AND table_name = ? AND index_name != 'PRIMARY' \
             ORDER BY index_name, seq_in_index",
        )
        .bind::<Text, _>(VERIFY_DATABASE)
        .bind::<Text, _>(&table.name)
        .load(conn)
        .wrap_err_with(|| format!("Failed to read indexes of {}", table.name))?;

        let mut grouped: BTreeMap<String, (bool, Vec<String>)> = BTreeMap::new();
        for row in index_columns {
            grouped
                .entry(row.index_name)
                .or_insert_with(|| (row.non_unique == 0, Vec::new()))
                .1
                .push(row.column_name);
        }
        for (unique, columns) in grouped.into_values() {
            if unique {
                shape.unique.insert(columns);
            } else {
                shape.indexes.insert(columns);
            }
        }

        schema.insert(table.name, shape);
    }
    Ok(schema)
}

/// Maps backend type names onto integer, real, blob or text.
fn normalize_type(raw: &str) -> &'static str {
    let upper = raw.to_uppercase();
    if upper.contains("INT") {
        "integer"
    } else if ["REAL", "FLOA", "DOUB", "DECIMAL", "NUMERIC"]
        .iter()
        .any(|t| upper.contains(t))
    {
        "real"
    } else if upper.contains("BLOB") || upper.contains("BINARY") {
        "blob"
    } else {
        "text"
    }
}

/// Fails on the first structural difference between the two schemas.
///
/// `MySQL` may carry extra single-column indexes on foreign key columns,
/// since `InnoDB` creates them implicitly.
fn compare_schemas(sqlite: &Schema, mysql: &Schema) -> Result<()> {
    let sqlite_tables: BTreeSet<&String> = sqlite.keys().collect();
    let mysql_tables: BTreeSet<&String> = mysql.keys().collect();
    if sqlite_tables != mysql_tables {
        return Err(eyre!(
            "❌ Schema parity check FAILED: tables differ\n  SQLite: {sqlite_tables:?}\n  MySQL: {mysql_tables:?}"
        ));
    }

    for (name, lite) in sqlite {
        let my = &mysql[name];
        let mismatch = |what: &str, a: &dyn std::fmt::Debug, b: &dyn std::fmt::Debug| {
            eyre!(
                "❌ Schema parity check FAILED: {what} mismatch in table '{name}'\n  SQLite: {a:?}\n  MySQL: {b:?}"
            )
        };

        if lite.columns != my.columns {
            return Err(mismatch("column", &lite.columns, &my.columns));
        }
        if lite.primary_key != my.primary_key {
            return Err(mismatch("primary key", &lite.primary_key, &my.primary_key));
        }
        if lite.foreign_keys != my.foreign_keys {
            return Err(mismatch("foreign key", &lite.foreign_keys, &my.foreign_keys));
        }
        if lite.unique != my.unique {
            return Err(mismatch("unique constraint", &lite.unique, &my.unique));
        }

        let fk_columns: BTreeSet<&String> = my.foreign_keys.iter().map(|(col, _, _)| col).collect();
        let missing = lite.indexes.difference(&my.indexes).next();
        let unexpected = my
            .indexes
            .difference(&lite.indexes)
            .find(|cols| !(cols.len() == 1 && fk_columns.contains(&cols[0])));
        if missing.is_some() || unexpected.is_some() {
            return Err(mismatch("index", &lite.indexes, &my.indexes));
        }
    }
    Ok(())
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
