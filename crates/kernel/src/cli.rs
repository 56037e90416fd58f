//! Operator command line.
//!
//! `fithub` with no subcommand runs the server.

use anyhow::{Context, Result, bail};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::{ApiToken, CreateUser, Role, User};

/// FitHub storefront server and operator tools.
#[derive(Parser, Debug)]
#[command(name = "fithub", author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Run the HTTP server (default).
    Serve,

    /// Apply pending database migrations and exit.
    Migrate,

    /// Manage accounts.
    User {
        #[command(subcommand)]
        command: UserCommand,
    },

    /// Manage API tokens.
    Token {
        #[command(subcommand)]
        command: TokenCommand,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum UserCommand {
    /// Create an account.
    Create {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        /// Grant the admin role.
        #[arg(long)]
        admin: bool,
    },
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum TokenCommand {
    /// Issue a token and print it once.
    Create {
        /// Email of the owning account.
        #[arg(long)]
        email: String,

        /// Label shown in token listings.
        #[arg(long)]
        name: String,

        /// Days until the token expires; never expires when omitted.
        #[arg(long)]
        expires_days: Option<i64>,
    },

    /// List an account's tokens.
    List {
        #[arg(long)]
        email: String,
    },

    /// Revoke a token by id.
    Revoke { id: Uuid },
}

/// Run a `user` subcommand.
pub async fn run_user(pool: &PgPool, command: UserCommand) -> Result<()> {
    match command {
        UserCommand::Create { name, email, admin } => {
            let role = if admin { Role::Admin } else { Role::User };
            let user = User::create(
                pool,
                CreateUser {
                    name,
                    email,
                    role,
                },
            )
            .await?;

            info!(user_id = %user.id, role = %role, "user created");
            println!("{}\t{}\t{}", user.id, user.email, user.role);
        }
    }
    Ok(())
}

/// Run a `token` subcommand.
pub async fn run_token(pool: &PgPool, command: TokenCommand) -> Result<()> {
    match command {
        TokenCommand::Create {
            email,
            name,
            expires_days,
        } => {
            let user = find_user(pool, &email).await?;

            let expires_at = match expires_days {
                Some(days) if days < 1 => bail!("--expires-days must be at least 1"),
                Some(days) => Some(Utc::now() + Duration::days(days)),
                None => None,
            };

            let issued = ApiToken::issue(pool, user.id, &name, expires_at).await?;

            info!(token_id = %issued.token.id, user_id = %user.id, "API token issued");
            println!("{}", issued.secret);
            eprintln!("Store this token now; it cannot be shown again.");
        }
        TokenCommand::List { email } => {
            let user = find_user(pool, &email).await?;
            for token in ApiToken::list_for_user(pool, user.id).await? {
                let expires = token
                    .expires_at
                    .map_or_else(|| "never".to_string(), |at| at.to_rfc3339());
                let last_used = token
                    .last_used
                    .map_or_else(|| "never".to_string(), |at| at.to_rfc3339());
                println!(
                    "{}\t{}\texpires={expires}\tlast_used={last_used}",
                    token.id, token.name
                );
            }
        }
        TokenCommand::Revoke { id } => {
            if !ApiToken::revoke(pool, id).await? {
                bail!("no API token with id {id}");
            }
            info!(token_id = %id, "API token revoked");
        }
    }
    Ok(())
}

async fn find_user(pool: &PgPool, email: &str) -> Result<User> {
    User::find_by_email(pool, email)
        .await?
        .with_context(|| format!("no user with email {email}"))
}
