//! CLI administration tool for library-service.
//!
//! Provides database maintenance, statistics and destructive operations that
//! should not be exposed over HTTP without a confirmation step.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # View row counts
//! cargo run --bin admin -- stats
//!
//! # Delete an author and everything that depends on it
//! cargo run --bin admin -- author delete 42
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL`, or `DB_HOST`/`DB_PORT`/`DB_USER`/`DB_PASSWORD`/`DB_NAME`

use library_service::application::services::AuthorService;
use library_service::config::{DatabaseConfig, mask_connection_string};
use library_service::infrastructure::persistence::{PgAuthorRepository, PgBookRepository};
use library_service::server;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing library-service.
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
    /// Show row counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Author maintenance
    Author {
        #[command(subcommand)]
        action: AuthorAction,
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
    Migrate,
}

/// Author maintenance subcommands.
#[derive(Subcommand)]
enum AuthorAction {
    /// Delete an author with its books, their loans and borrowed-book links
    Delete {
        /// Author ID
        id: i64,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = DatabaseConfig::url_from_env()?;
    let pool = PgPool::connect(&database_url)
        .await
        .with_context(|| {
            format!(
                "Failed to connect to database {}",
                mask_connection_string(&database_url)
            )
        })?;

    match cli.command {
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
        Commands::Author { action } => handle_author_action(action, pool).await?,
    }

    Ok(())
}

/// Displays row counts for every table.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let rows = [
        ("Authors", "SELECT COUNT(*) FROM authors"),
        ("Books", "SELECT COUNT(*) FROM books"),
        ("Members", "SELECT COUNT(*) FROM members"),
        ("Profiles", "SELECT COUNT(*) FROM member_profiles"),
        ("Borrowed books", "SELECT COUNT(*) FROM member_borrowed_books"),
        ("Borrowing records", "SELECT COUNT(*) FROM borrowing_records"),
        (
            "Open loans",
            "SELECT COUNT(*) FROM borrowing_records WHERE return_date IS NULL",
        ),
    ];

    for (label, sql) in rows {
        let count: i64 = sqlx::query_scalar(sql).fetch_one(pool).await?;
        println!(
            "  {:<18} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
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
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            server::migrate(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Dispatches author maintenance commands.
async fn handle_author_action(action: AuthorAction, pool: PgPool) -> Result<()> {
    match action {
        AuthorAction::Delete { id, yes } => delete_author(pool, id, yes).await,
    }
}

/// Rows removed alongside an author.
struct CascadeImpact {
    books: i64,
    borrowed_links: i64,
    records: i64,
}

async fn cascade_impact(pool: &PgPool, author_id: i64) -> Result<CascadeImpact> {
    let books: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM books WHERE author_id = $1")
        .bind(author_id)
        .fetch_one(pool)
        .await?;

    let borrowed_links: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM member_borrowed_books mb JOIN books b ON b.id = mb.book_id WHERE b.author_id = $1",
    )
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    let records: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM borrowing_records r JOIN books b ON b.id = r.book_id WHERE b.author_id = $1",
    )
    .bind(author_id)
    .fetch_one(pool)
    .await?;

    Ok(CascadeImpact {
        books,
        borrowed_links,
        records,
    })
}

/// Deletes an author after showing what the cascade will remove.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes` is given
/// - Runs the same transactional cascade as `DELETE /api/authors/{id}`
async fn delete_author(pool: PgPool, id: i64, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑  Delete Author".bright_blue().bold());
    println!();

    let pool = Arc::new(pool);
    let service = AuthorService::new(
        Arc::new(PgAuthorRepository::new(pool.clone())),
        Arc::new(PgBookRepository::new(pool.clone())),
    );

    let author = service
        .get_author(id)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;
    let impact = cascade_impact(&pool, id).await?;

    println!("  Author: {}", author.name.cyan());
    println!("  ID:     {}", author.id.to_string().bright_black());
    println!();
    println!("{}", "This will also remove:".bright_white().bold());
    println!("  Books:               {}", impact.books.to_string().yellow());
    println!(
        "  Borrowed-book links: {}",
        impact.borrowed_links.to_string().yellow()
    );
    println!("  Borrowing records:   {}", impact.records.to_string().yellow());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this author?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service
        .delete_author(id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to delete author: {}", e))?;

    println!();
    println!("{}", "✅ Author deleted".green().bold());
    println!();

    Ok(())
}
