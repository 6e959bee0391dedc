//! QuickSnip - snippet-sharing API server.
//!
//! # Usage
//!
//! ```bash
//! # Start with environment overrides
//! DATABASE_URL=postgres://localhost/quicksnip \
//! JWT_ACCESS_SECRET=... JWT_REFRESH_SECRET=... quicksnip
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use quicksnip_api::{AppState, CookiePolicy, ServerConfig};
use quicksnip_auth::{BcryptHasher, JwtTokenManager};
use quicksnip_storage::{Database, DatabaseConfig, PgRepositories};
use tokio::signal;
use tracing::{debug, info};
use tracing_subscriber::{fmt, EnvFilter};

/// Deployment environment; controls the `Secure` flag on session cookies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Environment {
    Development,
    Production,
}

/// QuickSnip CLI.
#[derive(Parser, Debug)]
#[command(name = "quicksnip")]
#[command(about = "QuickSnip - snippet-sharing API server")]
#[command(version)]
struct Cli {
    /// HTTP server port.
    #[arg(long, env = "PORT", default_value = "3001")]
    port: u16,

    /// PostgreSQL database URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost/quicksnip"
    )]
    database_url: String,

    /// Secret for signing access tokens.
    #[arg(long, env = "JWT_ACCESS_SECRET", hide_env_values = true)]
    jwt_access_secret: String,

    /// Secret for signing refresh tokens.
    #[arg(long, env = "JWT_REFRESH_SECRET", hide_env_values = true)]
    jwt_refresh_secret: String,

    /// Frontend origin allowed for credentialed CORS requests.
    #[arg(
        long,
        env = "FRONTEND_ORIGIN",
        default_value = "http://localhost:5173"
    )]
    frontend_origin: String,

    /// Deployment environment: development or production.
    #[arg(long, env = "NODE_ENV", default_value = "development", value_parser = parse_environment)]
    environment: Environment,

    /// Enable JSON log output.
    #[arg(long, env = "JSON_LOGS")]
    json_logs: bool,

    /// Run database migrations and exit.
    #[arg(long)]
    migrate_only: bool,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, env = "LOG_LEVEL", default_value = "info")]
    log_level: String,
}

/// Parse the deployment environment from string.
fn parse_environment(s: &str) -> Result<Environment, String> {
    match s.to_lowercase().as_str() {
        "development" | "dev" => Ok(Environment::Development),
        "production" | "prod" => Ok(Environment::Production),
        _ => Err(format!(
            "Invalid environment '{}'. Use 'development' or 'production'.",
            s
        )),
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(&cli.log_level, cli.json_logs);

    // ─────────────────────────────────────────────────────────────────────────
    // 🚀 STARTUP
    // ─────────────────────────────────────────────────────────────────────────
    info!("🚀 Starting QuickSnip API");
    debug!(database_url = %mask_password(&cli.database_url), "Database endpoint");
    debug!(origin = %cli.frontend_origin, "Frontend origin");

    // ─────────────────────────────────────────────────────────────────────────
    // 🗄️ DATABASE
    // ─────────────────────────────────────────────────────────────────────────
    let db_config = DatabaseConfig::for_api(&cli.database_url);

    info!("🗄️  Connecting to database...");
    let db = Database::connect(&db_config)
        .await
        .context("Failed to connect to database")?;

    db.migrate().await.context("Failed to run migrations")?;
    info!("🗄️  Database ready (migrations applied)");

    if cli.migrate_only {
        info!("🛑 --migrate-only flag set, exiting");
        return Ok(());
    }

    let db = Arc::new(db);
    let repositories = Arc::new(PgRepositories::new(db.clone()));

    // ─────────────────────────────────────────────────────────────────────────
    // 🔐 AUTH WIRING
    // ─────────────────────────────────────────────────────────────────────────
    let tokens = Arc::new(JwtTokenManager::new(
        &cli.jwt_access_secret,
        &cli.jwt_refresh_secret,
    ));
    let passwords = Arc::new(BcryptHasher::new());
    let secure_cookies = cli.environment == Environment::Production;

    let state = AppState::new(
        repositories,
        tokens,
        passwords,
        CookiePolicy::new(secure_cookies),
    );

    // ─────────────────────────────────────────────────────────────────────────
    // ⚡ SERVER START
    // ─────────────────────────────────────────────────────────────────────────
    let server_config = ServerConfig {
        port: cli.port,
        frontend_origin: cli.frontend_origin.clone(),
    };

    info!("✅ QuickSnip ready");
    info!("   ⚡ API:     http://localhost:{}/api", cli.port);
    info!("   ❤️ Health:  http://localhost:{}/health", cli.port);
    info!("   Press Ctrl+C to stop");

    quicksnip_api::serve(server_config, state, shutdown_signal()).await?;

    // ─────────────────────────────────────────────────────────────────────────
    // 🛑 SHUTDOWN
    // ─────────────────────────────────────────────────────────────────────────
    info!("🛑 Shutting down...");
    db.close().await;
    info!("🛑 Shutdown complete");
    Ok(())
}

/// Initialize tracing subscriber.
fn init_tracing(level: &str, json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    if json {
        fmt().with_env_filter(filter).json().init();
    } else {
        fmt()
            .with_env_filter(filter)
            .with_target(false)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .init();
    }
}

/// Mask password in database URL for logging.
fn mask_password(url_str: &str) -> String {
    match url::Url::parse(url_str) {
        Ok(mut url) => {
            if url.password().is_some() {
                let _ = url.set_password(Some("****"));
            }
            url.to_string()
        }
        Err(_) => url_str.to_string(),
    }
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
