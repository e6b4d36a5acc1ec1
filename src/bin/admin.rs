//! CLI administration tool for linkpulse.
//!
//! Provides commands for inspecting and removing links, reading visit analytics,
//! and checking the database without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List all stored links (expired ones included)
//! cargo run --bin admin -- links list
//!
//! # Delete a link (asks for confirmation)
//! cargo run --bin admin -- links delete abc123
//!
//! # Show visits for a code
//! cargo run --bin admin -- analytics abc123
//!
//! # Show totals
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST` / `DB_PORT` / `DB_USER` / `DB_PASSWORD` / `DB_NAME`

use linkpulse::application::services::LinkService;
use linkpulse::config::{Config, mask_connection_string};
use linkpulse::domain::repositories::{LinkRepository, VisitRepository};
use linkpulse::infrastructure::persistence::{PgLinkRepository, PgVisitRepository};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing linkpulse.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinksAction,
    },

    /// Show visits recorded for a short code
    Analytics {
        /// Short code
        code: String,
    },

    /// Show totals
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinksAction {
    /// List all links, expired ones included
    List,

    /// Permanently delete a link (visits are kept)
    Delete {
        /// Short code to delete
        code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = Config::load_database_url()?;

    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database at {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Links { action } => handle_links_action(action, &pool).await?,
        Commands::Analytics { code } => show_analytics(&pool, &code).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_links_action(action: LinksAction, pool: &PgPool) -> Result<()> {
    let repository = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    match action {
        LinksAction::List => list_links(&repository).await,
        LinksAction::Delete { code, yes } => {
            delete_link(&LinkService::new(repository), &code, yes).await
        }
    }
}

/// Lists every stored link with its status.
///
/// # Output Format
///
/// ```text
/// 🔗 Links
///
///   Code       Visibility  Created           Status    Destination
///   ──────────────────────────────────────────────────────────────────────
///   abc123     public      2025-01-15 10:30  ACTIVE    https://example.com
///   promo      private     2025-01-10 09:00  EXPIRED   https://example.org/sale
/// ```
async fn list_links(repository: &PgLinkRepository) -> Result<()> {
    println!("{}", "🔗 Links".bright_blue().bold());
    println!();

    // Straight from the repository: the service listing hides expired links.
    let links = repository
        .get_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if links.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<10} {:<11} {:<17} {:<9} {}",
        "Code".bright_white().bold(),
        "Visibility".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold(),
        "Destination".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    let now = Utc::now();
    for link in &links {
        let status = if link.is_expired_at(now) {
            "EXPIRED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<10} {:<11} {:<17} {:<9} {}",
            link.code.cyan(),
            link.visibility.to_string(),
            link.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status,
            link.long_url
        );
    }

    println!();
    println!("  Total: {}", links.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Deletes a link after showing it and asking for confirmation (default: No).
async fn delete_link(
    service: &LinkService<PgLinkRepository>,
    code: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🗑  Delete Link".bright_blue().bold());
    println!();

    let link = service
        .get_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("  Code:        {}", link.code.cyan());
    println!("  Destination: {}", link.long_url);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this link?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete link: {}", e))?;

    println!();
    println!("{}", "✅ Link deleted".green().bold());
    println!();

    Ok(())
}

/// Prints every visit for a code, oldest first.
async fn show_analytics(pool: &PgPool, code: &str) -> Result<()> {
    println!(
        "{} {}",
        "📈 Analytics for".bright_blue().bold(),
        code.cyan().bold()
    );
    println!();

    let repo = PgVisitRepository::new(Arc::new(pool.clone()));
    let visits = repo
        .get_analytics(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load visits: {}", e))?;

    if visits.is_empty() {
        println!("{}", "  No visits recorded".yellow());
        return Ok(());
    }

    println!(
        "  {:<20} {:<40} {:<16} {:<8} {}",
        "Time".bright_white().bold(),
        "IP".bright_white().bold(),
        "Country".bright_white().bold(),
        "Browser".bright_white().bold(),
        "Device".bright_white().bold()
    );
    println!("  {}", "─".repeat(95).bright_black());

    for visit in &visits {
        println!(
            "  {:<20} {:<40} {:<16} {:<8} {}",
            visit
                .timestamp
                .format("%Y-%m-%d %H:%M:%S")
                .to_string()
                .bright_black(),
            visit.ip,
            visit.country,
            visit.browser,
            visit.device
        );
    }

    println!();
    println!("  Total: {}", visits.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Displays link and visit totals.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let expired_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM links WHERE expires_at <= NOW()")
            .fetch_one(pool)
            .await?;

    let visits_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits")
        .fetch_one(pool)
        .await?;

    println!(
        "  Links:   {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Expired: {}",
        expired_count.to_string().bright_yellow().bold()
    );
    println!(
        "  Visits:  {}",
        visits_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
