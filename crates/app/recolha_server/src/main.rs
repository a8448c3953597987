//! Recolha API server binary.
//!
//! Binds the HTTP listener, runs migrations, and keeps the rate limiter
//! swept in the background. Expects a reverse proxy in front, which is
//! where the `X-Forwarded-For` the limiter keys on comes from.

use std::sync::Arc;

use clap::Parser;
use recolha_core::ratelimit::{RateLimitConfig, RateLimiter};
use sqlx::postgres::PgPoolOptions;
use tokio_util::sync::CancellationToken;
use tracing::info;

/// CLI arguments for the API server.
#[derive(Parser, Debug)]
#[command(name = "recolha_server", about = "Recolha API server")]
struct Args {
    /// Port to listen on.
    #[arg(long, env = "PORT", default_value_t = 3100)]
    port: u16,

    /// PostgreSQL connection URL.
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "postgres://localhost:5432/recolha"
    )]
    database_url: String,

    /// Maximum number of database connections in the pool.
    #[arg(long, default_value_t = 5)]
    max_connections: u32,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,recolha_api=debug,recolha_core=debug".parse().unwrap()),
        )
        .init();

    let args = Args::parse();

    info!(database_url = %args.database_url, port = args.port, "starting recolha_server");

    let pool = PgPoolOptions::new()
        .max_connections(args.max_connections)
        .acquire_timeout(std::time::Duration::from_secs(30))
        .connect(&args.database_url)
        .await?;

    // Run database migrations.
    info!("running database migrations");
    recolha_api::migrate(&pool).await?;

    let config = recolha_api::config::ApiConfig {
        bind_addr: format!("127.0.0.1:{}", args.port),
        pg_connection_url: args.database_url,
        jwt_secret: recolha_core::auth::jwt::resolve_jwt_secret(),
    };

    let limiter = Arc::new(RateLimiter::new(RateLimitConfig::default()));

    // Sweep stale rate limit entries in the background.
    let sweep_ct = CancellationToken::new();
    let sweeper = tokio::spawn({
        let limiter = limiter.clone();
        let sweep_ct = sweep_ct.clone();
        async move {
            let period = limiter
                .config()
                .sweep_interval
                .to_std()
                .unwrap_or(std::time::Duration::from_secs(3600));
            let mut ticker = tokio::time::interval(period);
            // The first tick fires immediately; nothing to sweep yet.
            ticker.tick().await;
            loop {
                tokio::select! {
                    _ = sweep_ct.cancelled() => break,
                    _ = ticker.tick() => limiter.sweep(),
                }
            }
        }
    });

    let state = recolha_api::AppState {
        pool,
        config: config.clone(),
        limiter,
    };

    let app = recolha_api::router(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    let local_addr = listener.local_addr()?;
    info!(addr = %local_addr, "REST API listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    sweep_ct.cancel();
    let _ = sweeper.await;

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("shutdown signal received");
}
