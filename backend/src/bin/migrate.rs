//! Apply the embedded SQL migrations to a PostgreSQL database.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::env;

use clap::Parser;
use color_eyre::eyre::{Context, Result, eyre};
use diesel::migration::Migration;
use diesel::pg::Pg;
use diesel::{Connection, PgConnection};
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// `migrate` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "migrate",
    about = "Apply pending loan desk database migrations",
    version
)]
struct CliArgs {
    /// Database connection URL. Falls back to `DATABASE_URL` when omitted.
    #[arg(long = "database-url", value_name = "url")]
    database_url: Option<String>,
    /// List pending migrations without applying them.
    #[arg(long)]
    dry_run: bool,
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = CliArgs::parse();
    let database_url = resolve_database_url(args.database_url, env::var("DATABASE_URL").ok())?;

    let mut conn = PgConnection::establish(&database_url)
        .wrap_err("connect to database for migrations")?;

    if args.dry_run {
        let pending: Vec<Box<dyn Migration<Pg>>> = conn
            .pending_migrations(MIGRATIONS)
            .map_err(|error| eyre!("list pending migrations: {error}"))?;
        for migration in pending {
            println!("pending={}", migration.name());
        }
        return Ok(());
    }

    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|error| eyre!("apply migrations: {error}"))?;
    for version in &applied {
        println!("applied={version}");
    }
    println!("applied_count={}", applied.len());
    Ok(())
}

fn resolve_database_url(explicit: Option<String>, from_env: Option<String>) -> Result<String> {
    if let Some(value) = explicit {
        if value.trim().is_empty() {
            return Err(eyre!("--database-url must not be empty when provided"));
        }
        return Ok(value);
    }

    let value =
        from_env.ok_or_else(|| eyre!("database URL missing: set --database-url or DATABASE_URL"))?;
    if value.trim().is_empty() {
        return Err(eyre!("DATABASE_URL must not be empty"));
    }
    Ok(value)
}
