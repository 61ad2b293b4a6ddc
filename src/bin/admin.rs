//! CLI administration tool for playground-registry.
//!
//! Provides commands for managing realms, users, and API tokens, and for
//! performing database operations without requiring HTTP API access.
//!
//! # Usage
//!
//! ```bash
//! # Create a realm
//! cargo run --bin admin -- realm create --name zulip
//!
//! # Create an administrator in a realm
//! cargo run --bin admin -- user create --realm zulip --email iago@example.com --role administrator
//!
//! # Create an API token for a user
//! cargo run --bin admin -- token create --email iago@example.com
//!
//! # List all tokens
//! cargo run --bin admin -- token list
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke "Production API"
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for token commands): HMAC key matching
//!   the server's configuration
//!
//! # Security
//!
//! Only the HMAC-SHA256 of a token is stored; the raw token is displayed once
//! at creation time and cannot be retrieved later.

use playground_registry::domain::entities::RealmRole;
use playground_registry::domain::repositories::TokenRepository;
use playground_registry::infrastructure::persistence::PgTokenRepository;
use playground_registry::utils::token_generator::generate_token;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use hmac::{Hmac, Mac};
use sha2::Sha256;
use sqlx::PgPool;
use sqlx::Row;
use std::str::FromStr;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

/// CLI tool for managing playground-registry.
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
    /// Manage realms
    Realm {
        #[command(subcommand)]
        action: RealmAction,
    },

    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Realm management subcommands.
#[derive(Subcommand)]
enum RealmAction {
    /// Create a new realm
    Create {
        /// Realm name (e.g., "zulip")
        #[arg(short, long)]
        name: Option<String>,
    },

    /// List all realms
    List,
}

/// User management subcommands.
#[derive(Subcommand)]
enum UserAction {
    /// Create a new user in a realm
    Create {
        /// Realm name the user belongs to
        #[arg(long)]
        realm: String,

        /// User email address
        #[arg(long)]
        email: String,

        /// Realm role: member, moderator, administrator, owner
        #[arg(long, default_value = "member")]
        role: String,
    },

    /// List users of a realm
    List {
        /// Realm name
        #[arg(long)]
        realm: String,
    },
}

/// Token management subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token for a user
    Create {
        /// Email of the user the token belongs to
        #[arg(short, long)]
        email: Option<String>,

        /// Token name (e.g., "Production API", "Mobile App")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List all tokens
    List,

    /// Revoke a token
    Revoke {
        /// Token name or ID to revoke
        name_or_id: String,
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
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Connect to database
    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Realm { action } => handle_realm_action(action, &pool).await?,
        Commands::User { action } => handle_user_action(action, &pool).await?,
        Commands::Token { action } => handle_token_action(action, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches realm management commands.
async fn handle_realm_action(action: RealmAction, pool: &PgPool) -> Result<()> {
    match action {
        RealmAction::Create { name } => {
            let realm_name = match name {
                Some(n) => n,
                None => Input::new().with_prompt("Realm name").interact_text()?,
            };

            let id: i64 =
                sqlx::query_scalar("INSERT INTO realms (name) VALUES ($1) RETURNING id")
                    .bind(&realm_name)
                    .fetch_one(pool)
                    .await
                    .context("Failed to create realm (name taken?)")?;

            println!(
                "{} Realm {} created with id {}",
                "✅".green(),
                realm_name.cyan(),
                id.to_string().bright_white().bold()
            );
        }
        RealmAction::List => {
            let rows = sqlx::query("SELECT id, name FROM realms ORDER BY id")
                .fetch_all(pool)
                .await?;

            println!("{}", "🏰 Realms".bright_blue().bold());
            println!();

            if rows.is_empty() {
                println!("{}", "  No realms found".yellow());
                return Ok(());
            }

            for row in &rows {
                let id: i64 = row.get("id");
                let name: String = row.get("name");
                println!("  {:<5} {}", id.to_string().bright_black(), name.cyan());
            }
        }
    }

    Ok(())
}

/// Dispatches user management commands.
async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::Create { realm, email, role } => {
            // Fail early on a bad role value, before touching the database.
            let role = RealmRole::from_str(&role).map_err(|e| anyhow::anyhow!(e))?;

            let realm_id = find_realm_id(pool, &realm).await?;

            let id: i64 = sqlx::query_scalar(
                "INSERT INTO users (realm_id, email, role) VALUES ($1, $2, $3) RETURNING id",
            )
            .bind(realm_id)
            .bind(&email)
            .bind(role.as_str())
            .fetch_one(pool)
            .await
            .context("Failed to create user (email taken in this realm?)")?;

            println!(
                "{} User {} ({}) created in realm {} with id {}",
                "✅".green(),
                email.cyan(),
                role.as_str().bright_yellow(),
                realm.cyan(),
                id.to_string().bright_white().bold()
            );
        }
        UserAction::List { realm } => {
            let realm_id = find_realm_id(pool, &realm).await?;

            let rows = sqlx::query(
                "SELECT id, email, role FROM users WHERE realm_id = $1 ORDER BY id",
            )
            .bind(realm_id)
            .fetch_all(pool)
            .await?;

            println!("{}", format!("👥 Users of {realm}").bright_blue().bold());
            println!();

            if rows.is_empty() {
                println!("{}", "  No users found".yellow());
                return Ok(());
            }

            for row in &rows {
                let id: i64 = row.get("id");
                let email: String = row.get("email");
                let role: String = row.get("role");
                println!(
                    "  {:<5} {:<40} {}",
                    id.to_string().bright_black(),
                    email.cyan(),
                    role.bright_yellow()
                );
            }
        }
    }

    Ok(())
}

/// Resolves a realm name to its id.
async fn find_realm_id(pool: &PgPool, name: &str) -> Result<i64> {
    sqlx::query_scalar("SELECT id FROM realms WHERE name = $1")
        .bind(name)
        .fetch_optional(pool)
        .await?
        .context(format!("Realm '{name}' not found"))
}

/// Dispatches token management commands.
async fn handle_token_action(action: TokenAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgTokenRepository::new(Arc::new(pool.clone())));

    match action {
        TokenAction::Create { email, name, yes } => {
            create_token(repo, pool, email, name, yes).await?;
        }
        TokenAction::List => {
            list_tokens(repo).await?;
        }
        TokenAction::Revoke { name_or_id } => {
            revoke_token(repo, name_or_id).await?;
        }
    }

    Ok(())
}

/// Creates a new API token with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for user email and token name (or use provided)
/// 2. Generate a random token
/// 3. Display token details with warning
/// 4. Confirm creation (unless `--yes` flag)
/// 5. Hash token with HMAC-SHA256 and store the hash
/// 6. Display usage instructions
async fn create_token(
    repo: Arc<PgTokenRepository>,
    pool: &PgPool,
    email: Option<String>,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let user_email = match email {
        Some(e) => e,
        None => Input::new().with_prompt("User email").interact_text()?,
    };

    let user_id: i64 = sqlx::query_scalar("SELECT id FROM users WHERE email = $1")
        .bind(&user_email)
        .fetch_optional(pool)
        .await?
        .context(format!("User '{user_email}' not found"))?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Production API")
            .interact_text()?,
    };

    let token_value = generate_token();

    println!();
    println!("{}", "Token details:".bright_white().bold());
    println!("  User:  {}", user_email.cyan());
    println!("  Name:  {}", token_name.cyan());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  IMPORTANT: Save this token now! You won't be able to see it again."
            .red()
            .bold()
    );
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this token?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_hash = hash_token(&token_value)?;

    repo.create_token(user_id, &token_name, &token_hash)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created successfully!".green().bold());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token_value.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/v1/realm/playgrounds",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists all API tokens with status indicators.
///
/// # Output Format
///
/// ```text
/// 📋 API Tokens
///
///   ID  User  Name                           Created              Status
///   ─────────────────────────────────────────────────────────────────────
///   1   3     Production API                 2026-01-15 10:30     ACTIVE
///   2   4     Mobile App                     2026-01-16 14:20     REVOKED
/// ```
async fn list_tokens(repo: Arc<PgTokenRepository>) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let tokens = repo
        .list_tokens()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if tokens.is_empty() {
        println!("{}", "  No tokens found".yellow());
        println!();
        println!(
            "  Create one with: {} admin token create",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<3} {:<5} {:<30} {:<20} {:<10}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for token in &tokens {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };

        println!(
            "  {:<3} {:<5} {:<30} {:<20} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            status
        );
    }

    println!();
    println!(
        "  Total: {}",
        tokens.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Revokes a token by name or ID with confirmation prompt.
///
/// # Lookup
///
/// - If input is numeric, lookup by ID
/// - Otherwise, lookup by name (exact match)
///
/// # Safety
///
/// - Requires confirmation (default: No)
/// - Prevents double-revocation
async fn revoke_token(repo: Arc<PgTokenRepository>, name_or_id: String) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = match name_or_id.parse::<i64>() {
        Ok(id) => repo
            .find_by_id(id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
        Err(_) => repo
            .find_by_name(&name_or_id)
            .await
            .map_err(|e| anyhow::anyhow!("Database error: {}", e))?,
    };

    let token = token.context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  ID:    {}", token.id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    repo.revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!();
    println!("{}", "✅ Token revoked successfully!".green().bold());
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Number of realms and users
/// - Number of configured playgrounds
/// - Number of audit log entries
/// - Number of active API tokens
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let realms_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM realms")
        .fetch_one(pool)
        .await?;

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let playgrounds_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM playgrounds")
        .fetch_one(pool)
        .await?;

    let audit_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM realm_audit_log")
        .fetch_one(pool)
        .await?;

    let tokens_count: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM api_tokens WHERE revoked_at IS NULL")
            .fetch_one(pool)
            .await?;

    println!(
        "  Realms:        {}",
        realms_count.to_string().bright_green().bold()
    );
    println!(
        "  Users:         {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Playgrounds:   {}",
        playgrounds_count.to_string().bright_green().bold()
    );
    println!(
        "  Audit entries: {}",
        audit_count.to_string().bright_green().bold()
    );
    println!(
        "  Active tokens: {}",
        tokens_count.to_string().bright_green().bold()
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

/// Hashes a token with HMAC-SHA256 using `TOKEN_SIGNING_SECRET`.
///
/// Must match the hashing performed by the server's authentication service.
fn hash_token(token: &str) -> Result<String> {
    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let mut mac = HmacSha256::new_from_slice(secret.as_bytes())
        .expect("HMAC accepts any key length");
    mac.update(token.as_bytes());

    Ok(hex::encode(mac.finalize().into_bytes()))
}
