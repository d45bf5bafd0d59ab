//! CLI administration tool for shorturl.
//!
//! Provides codec inspection and storage maintenance without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show the short code for a record id
//! cargo run --bin admin -- encode 4538735
//!
//! # Show the record id behind a short code
//! cargo run --bin admin -- decode j2Jp
//!
//! # Purge expired short URLs now
//! cargo run --bin admin -- purge
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required for `purge` and `db`): PostgreSQL connection string

use shorturl::domain::clock::{Clock, SystemClock};
use shorturl::domain::expiry_reaper::ExpiryReaper;
use shorturl::domain::repositories::UrlRepository;
use shorturl::infrastructure::persistence::PgUrlRepository;
use shorturl::utils::base62;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;
use std::time::Duration;

/// CLI tool for managing shorturl.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Print the short code for a record id
    Encode {
        /// Non-negative record id
        id: i64,
    },

    /// Print the record id behind a short code
    Decode {
        /// Base-62 short code
        code: String,
    },

    /// Delete every short URL whose expiry has passed
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Encode { id } => encode(id),
        Commands::Decode { code } => decode(&code),
        Commands::Purge { yes } => purge(&connect().await?, yes).await,
        Commands::Db {
            action: DbAction::Check,
        } => check_database(&connect().await?).await,
    }
}

async fn connect() -> Result<PgPool> {
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")
}

fn encode(id: i64) -> Result<()> {
    let code = base62::encode(id)?;
    println!("  {} {} {}", id.to_string().bright_white(), "→".bright_black(), code.green().bold());
    Ok(())
}

fn decode(code: &str) -> Result<()> {
    let id = base62::decode(code)?;
    println!("  {} {} {}", code.green().bold(), "→".bright_black(), id.to_string().bright_white());
    Ok(())
}

/// Runs a single expiry purge against PostgreSQL.
///
/// Uses the same cutoff rule as the background reaper: records whose expiry
/// is strictly before the current local time are deleted.
async fn purge(pool: &PgPool, skip_confirm: bool) -> Result<()> {
    println!("{}", "🧹 Purge Expired Short URLs".bright_blue().bold());
    println!();

    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    println!(
        "  Cutoff: {}",
        clock.now().format("%Y-%m-%d %H:%M:%S").to_string().cyan()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete all expired short URLs?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let repository: Arc<dyn UrlRepository> =
        Arc::new(PgUrlRepository::new(Arc::new(pool.clone()), clock.clone()));
    let reaper = ExpiryReaper::new(repository, clock, Duration::ZERO);

    let purged = reaper
        .run_once()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge expired URLs: {}", e))?;

    println!(
        "{} {}",
        "✅ Purged".green().bold(),
        format!("{purged} expired short URL(s)").bright_white()
    );

    Ok(())
}

async fn check_database(pool: &PgPool) -> Result<()> {
    let repository = PgUrlRepository::new(Arc::new(pool.clone()), Arc::new(SystemClock));

    repository
        .ping()
        .await
        .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

    let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
        .fetch_one(pool)
        .await
        .context("Failed to count short URLs")?;

    println!("{}", "✅ Database connection OK".green().bold());
    println!("  Short URLs stored: {}", total.to_string().bright_white());

    Ok(())
}
