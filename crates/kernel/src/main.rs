//! FitHub storefront kernel.
//!
//! Catalog API server and operator commands.

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use fithub_kernel::cli::{self, Cli, Command};
use fithub_kernel::{Config, db, server};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let cli = Cli::parse();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(port = config.port, "Configuration loaded");

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            info!("Starting FitHub storefront kernel");
            server::serve(config).await
        }
        Command::Migrate => {
            let pool = db::create_pool(&config).await?;
            db::run_migrations(&pool).await?;
            info!("Database migrations complete");
            Ok(())
        }
        Command::User { command } => {
            let pool = db::create_pool(&config).await?;
            db::run_migrations(&pool).await?;
            cli::run_user(&pool, command).await
        }
        Command::Token { command } => {
            let pool = db::create_pool(&config).await?;
            db::run_migrations(&pool).await?;
            cli::run_token(&pool, command).await
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug,sqlx=warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
