use std::sync::Arc;

use anyhow::Context;
use importer::{AdventOfCodeSource, AocConfig, sync};
use storage::Database;
use web::config::Config;
use web::github::GithubClient;
use web::state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()),
        )
        .with_target(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    tracing::info!("Starting Advent of Code leaderboard");

    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Configuration loaded successfully (event year {})", config.year);

    let db = Database::new(&config.database_url)
        .await
        .context("Failed to initialize database")?;
    tracing::info!("Database connection established");

    tracing::info!("Running database migrations");
    db.run_migrations()
        .await
        .context("Failed to run migrations")?;
    tracing::info!("Database migrations completed successfully");

    let fetcher = match &config.aoc {
        Some(credentials) => {
            let source = AdventOfCodeSource::new(AocConfig {
                session: credentials.session.clone(),
                leaderboard_id: credentials.leaderboard_id.clone(),
                year: config.year,
            })
            .context("Failed to build Advent of Code client")?;
            Some(sync::spawn(Arc::new(source), db.clone(), config.fetch_interval))
        }
        None => {
            tracing::warn!("AOC_SESSION_ID or AOC_LEADERBOARD_ID missing, leaderboard fetching disabled");
            None
        }
    };

    let identity = GithubClient::new(config.github.clone()).context("Failed to build GitHub client")?;
    let state = AppState {
        db,
        identity: Arc::new(identity),
        oauth: config.github.clone(),
        default_year: config.year,
    };

    let bind_address = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&bind_address)
        .await
        .with_context(|| format!("Failed to bind {}", bind_address))?;

    tracing::info!("Starting server at http://{}", bind_address);
    tracing::info!("Swagger UI available at http://{}/swagger-ui/", bind_address);

    axum::serve(listener, web::app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    if let Some(handle) = fetcher {
        handle.abort();
    }
    tracing::info!("Shut down");

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
