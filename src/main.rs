use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use notes_api::config::{self, AppConfig};
use notes_api::database::{DatabaseManager, MemoryNoteStore, NoteStore, PgNoteStore};
use notes_api::drive::DriveClient;
use notes_api::{app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, JWT_SECRET, etc.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("notes_api=info,tower_http=info")),
        )
        .init();

    let config = config::config();
    tracing::info!("Starting Notes API in {:?} mode", config.environment);

    if config.security.jwt_secret.is_empty() {
        anyhow::bail!("JWT_SECRET must be set when APP_ENV is {:?}", config.environment);
    }

    let notes = open_store(config).await?;
    let drive = DriveClient::new(&config.drive.api_base_url)
        .context("invalid DRIVE_API_URL")?;
    let state = AppState::new(notes, drive, &config.security.jwt_secret);

    let bind_addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    tracing::info!("Notes API listening on http://{}", bind_addr);

    axum::serve(listener, app(state, config))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    tracing::info!("Notes API stopped");
    Ok(())
}

async fn open_store(config: &AppConfig) -> anyhow::Result<Arc<dyn NoteStore>> {
    if config.database.url.is_none() {
        tracing::warn!("DATABASE_URL not set; notes are kept in memory and lost on restart");
        return Ok(Arc::new(MemoryNoteStore::new()));
    }

    let pool = DatabaseManager::connect(&config.database)
        .await
        .context("failed to connect to the notes database")?;
    DatabaseManager::migrate(&pool)
        .await
        .context("failed to prepare the notes schema")?;

    Ok(Arc::new(PgNoteStore::new(pool)))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
