//! Lumacast API server entry point.

use std::error::Error;
use std::net::SocketAddr;
use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lumacast_api::app;
use lumacast_api::state::AppState;
use lumacast_core::clock::SystemClock;
use lumacast_store::PgShowStore;
use lumacast_store::schema::CREATE_SHOWS_TABLE;

/// Playlist length accepted by a sync when `PLAYLIST_SYNC_LIMIT` is unset.
const DEFAULT_PLAYLIST_SYNC_LIMIT: usize = 200;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Initialize tracing subscriber.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .json()
        .init();

    tracing::info!("Starting Lumacast API server");

    // Read configuration from environment.
    let database_url = std::env::var("DATABASE_URL")
        .map_err(|_| "DATABASE_URL environment variable must be set")?;
    let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string());
    let port: u16 = std::env::var("PORT")
        .unwrap_or_else(|_| "3000".to_string())
        .parse()
        .map_err(|e| format!("PORT must be a valid u16: {e}"))?;
    let playlist_sync_limit: usize = match std::env::var("PLAYLIST_SYNC_LIMIT") {
        Ok(raw) => raw
            .parse()
            .map_err(|e| format!("PLAYLIST_SYNC_LIMIT must be a valid usize: {e}"))?,
        Err(_) => DEFAULT_PLAYLIST_SYNC_LIMIT,
    };

    // Create database connection pool and ensure the schema exists.
    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(&database_url)
        .await?;
    sqlx::query(CREATE_SHOWS_TABLE).execute(&pool).await?;

    // Build application state.
    let state = AppState::new(
        Arc::new(PgShowStore::new(pool)),
        Arc::new(SystemClock),
        playlist_sync_limit,
    );

    // Build router.
    // TODO: Replace CorsLayer::permissive() with restricted origins for production.
    let app = app(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    // Start server.
    let addr: SocketAddr = format!("{host}:{port}")
        .parse()
        .map_err(|e| format!("invalid HOST:PORT combination: {e}"))?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    axum::serve(listener, app).await?;

    Ok(())
}
