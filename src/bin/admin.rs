//! CLI administration tool for shrtn.
//!
//! Creates and inspects short links and performs database operations
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when --url is omitted)
//! cargo run --bin admin -- link create --url https://www.example.com
//!
//! # Resolve a short code
//! cargo run --bin admin -- link show 4cQk2Bn0
//!
//! # List the newest links
//! cargo run --bin admin -- link recent --limit 20
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate --yes
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` or `DB_*` components: PostgreSQL connection
//! - `BASE_URL`: prefix for printed short URLs

use shrtn::application::services::{RedirectService, ShorteningService};
use shrtn::config::{load_postgres_from_env, mask_connection_string};
use shrtn::domain::repositories::UrlRepository;
use shrtn::infrastructure::persistence::PgUrlRepository;
use shrtn::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shrtn.
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
    /// Create and inspect short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        /// URL to shorten (prompted if omitted)
        #[arg(short, long)]
        url: Option<String>,
    },

    /// Show the record behind a short code
    Show {
        /// Eight-character short code
        code: String,
    },

    /// List the most recently created links
    Recent {
        /// Number of links to show
        #[arg(short, long, default_value_t = 10)]
        limit: i64,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if std::env::var("STORAGE_BACKEND").is_ok_and(|v| v.eq_ignore_ascii_case("memory")) {
        println!(
            "{}",
            "⚠️  STORAGE_BACKEND=memory is ignored, admin always uses PostgreSQL".yellow()
        );
    }
    let config = load_postgres_from_env()?;
    let database_url = config
        .database_url
        .clone()
        .context("DATABASE_URL must be set")?;

    let pool = connect_pool(&config, &database_url).await?;

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &pool, &config.base_url).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &database_url).await?,
    }

    Ok(())
}

/// Dispatches link commands.
async fn handle_link_action(action: LinkAction, pool: &PgPool, base_url: &str) -> Result<()> {
    let repo: Arc<dyn UrlRepository> = Arc::new(PgUrlRepository::new(Arc::new(pool.clone())));

    match action {
        LinkAction::Create { url } => create_link(repo, base_url, url).await?,
        LinkAction::Show { code } => show_link(repo, base_url, &code).await?,
        LinkAction::Recent { limit } => list_recent(repo, base_url, limit).await?,
    }

    Ok(())
}

/// Shortens a URL through the same service the HTTP API uses.
async fn create_link(
    repo: Arc<dyn UrlRepository>,
    base_url: &str,
    url: Option<String>,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    let service = ShorteningService::new(repo, base_url);
    let record = service
        .create_short_url(&url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to shorten URL: {}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  ID:        {}", record.id.to_string().bright_black());
    println!("  Code:      {}", record.short_code.bright_yellow().bold());
    println!("  Short URL: {}", service.short_url(&record.short_code).cyan());
    println!("  Target:    {}", record.original_url);
    println!();

    Ok(())
}

/// Resolves a short code the way the redirect endpoint does.
async fn show_link(repo: Arc<dyn UrlRepository>, base_url: &str, code: &str) -> Result<()> {
    let service = RedirectService::new(repo);

    let record = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Short code '{}' not found", code))?;

    println!("{}", "🔎 Short Link".bright_blue().bold());
    println!();
    println!("  ID:        {}", record.id.to_string().bright_black());
    println!("  Code:      {}", record.short_code.bright_yellow().bold());
    println!(
        "  Short URL: {}",
        format!("{}/{}", base_url.trim_end_matches('/'), record.short_code).cyan()
    );
    println!("  Target:    {}", record.original_url);
    println!(
        "  Created:   {}",
        record.created_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!();

    Ok(())
}

/// Lists the newest links.
///
/// # Output Format
///
/// ```text
/// 📋 Recent Links
///
///   ID    Code       Created            Target
///   ─────────────────────────────────────────────────────────────────
///   42    4cQk2Bn0   2025-01-15 10:30   https://www.example.com
/// ```
async fn list_recent(repo: Arc<dyn UrlRepository>, base_url: &str, limit: i64) -> Result<()> {
    println!("{}", "📋 Recent Links".bright_blue().bold());
    println!();

    let records = repo
        .list_recent(limit)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if records.is_empty() {
        println!("{}", "  No links found".yellow());
        println!();
        println!(
            "  Create one with: {} admin link create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<5} {:<10} {:<18} {}",
        "ID".bright_white().bold(),
        "Code".bright_white().bold(),
        "Created".bright_white().bold(),
        "Target".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for record in &records {
        println!(
            "  {:<5} {:<10} {:<18} {}",
            record.id.to_string().bright_black(),
            record.short_code.cyan(),
            record
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            truncate(&record.original_url, 60)
        );
    }

    println!();
    println!(
        "  Showing {} (short URLs under {})",
        records.len().to_string().bright_white().bold(),
        base_url.bright_cyan()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgUrlRepository::new(Arc::new(pool.clone()));
    let links_count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;

    let newest: Option<chrono::DateTime<chrono::Utc>> =
        sqlx::query_scalar("SELECT MAX(created_at) FROM urls")
            .fetch_one(pool)
            .await?;

    println!(
        "  Links:        {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Last created: {}",
        newest
            .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
            .unwrap_or_else(|| "never".to_string())
            .bright_white()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool, database_url: &str) -> Result<()> {
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

            let table_size: Option<String> = sqlx::query_scalar(
                "SELECT pg_size_pretty(pg_total_relation_size(to_regclass('urls')))",
            )
            .fetch_one(pool)
            .await?;

            println!("  Connection: {}", mask_connection_string(database_url));
            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  urls table: {}",
                table_size.unwrap_or_else(|| "missing".to_string())
            );
            println!();
        }
        DbAction::Migrate { yes } => {
            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Apply pending migrations?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_chars.saturating_sub(1)).collect();
        format!("{head}…")
    }
}
