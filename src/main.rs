//! RegIntel Backend - Main Entry Point

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::{header, Method};
use axum::Router;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use regintel_backend::{api, config::Config, db, error::Result, telemetry};

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration and initialize tracing
    let config = Config::from_env()?;
    telemetry::init_tracing(&config.log_level);
    tracing::info!("Starting RegIntel backend");

    // Connect to database. Schema and migrations are managed by the data
    // platform; this binary only reads and appends.
    let db_pool = db::create_pool(&config.database_url).await?;
    tracing::info!("Connected to database");

    // Create application state
    let state = Arc::new(api::AppState::new(config.clone(), db_pool));

    // Build router
    let app = Router::new()
        .merge(api::routes::create_router(state))
        .layer({
            // In production the frontend is served from the same origin. In
            // development the Next.js dev server runs on a different port, so
            // that origin must be whitelisted with credentials enabled.
            if std::env::var("ENVIRONMENT").unwrap_or_default() == "development" {
                let origins: Vec<_> = std::env::var("CORS_ORIGINS")
                    .unwrap_or_else(|_| "http://localhost:3000".into())
                    .split(',')
                    .filter_map(|s| s.trim().parse().ok())
                    .collect();
                CorsLayer::new()
                    .allow_origin(AllowOrigin::list(origins))
                    .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
                    .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION, header::ACCEPT])
                    .allow_credentials(true)
            } else {
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods(Any)
                    .allow_headers(Any)
            }
        })
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr: SocketAddr = config.bind_address.parse()?;
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
