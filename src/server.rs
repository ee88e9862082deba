use anyhow::Result;
use arc_swap::ArcSwap;
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderValue, Method},
    routing::{get, post},
    Router,
};
use std::{net::SocketAddr, path::PathBuf, sync::Arc};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

use crate::{
    config::{Config, CorsConfig},
    handlers::{self, calculate::AppState},
    signals::setup_signal_handlers,
    tariffs::Tariffs,
};

/// Start the EV savings server
///
/// This function:
/// 1. Builds the immutable tariff tables
/// 2. Sets up signal handlers for graceful shutdown and config reload
/// 3. Creates the Axum application
/// 4. Binds to the configured address
/// 5. Serves requests with graceful shutdown support
pub async fn start_server(config: Config, config_path: PathBuf) -> Result<()> {
    // Wrap config in ArcSwap for atomic reload support
    let config_swap = Arc::new(ArcSwap::from_pointee(config.clone()));

    // Setup signal handlers (SIGTERM, SIGINT for shutdown; SIGHUP for reload)
    let (shutdown_tx, signal_handle) = setup_signal_handlers(config_swap.clone(), config_path);
    let mut shutdown_rx = shutdown_tx.subscribe();

    // Tariff tables are read-only for the life of the process
    let tariffs = Arc::new(Tariffs::default());

    let app_state = AppState {
        config: config_swap.clone(),
        tariffs: tariffs.clone(),
    };

    // Build the Axum router
    let app = create_router(&config, app_state);

    // Create socket address
    let addr = SocketAddr::from((
        config.server.host.parse::<std::net::IpAddr>()?,
        config.server.port,
    ));

    info!("Starting EV savings service on {}", addr);
    info!(
        "Configuration: {} fuel types, {} carbon-tax years, {} allowed origins",
        tariffs.fuel_prices.len(),
        tariffs.carbon_tax.len(),
        config.cors.allowed_origins.len()
    );

    // Bind to address
    let listener = tokio::net::TcpListener::bind(addr).await?;

    // Serve with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // Wait for shutdown signal
            let _ = shutdown_rx.recv().await;
            info!("Shutdown signal received, draining connections...");
        })
        .await?;

    // Wait for signal handler task to complete
    signal_handle.await?;
    info!("Server stopped gracefully");

    Ok(())
}

/// Create the Axum router with all routes and middleware
///
/// CORS is scoped to the calculation endpoint; health endpoints are
/// server-to-server and need none.
pub fn create_router(config: &Config, app_state: AppState) -> Router {
    let calculate_routes = Router::new()
        .route("/calculate", post(handlers::calculate::handle_calculate))
        .layer(build_cors_layer(&config.cors))
        .with_state(app_state);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .merge(calculate_routes)
        // Calculation bodies are a handful of fields; 1MB is generous
        .layer(DefaultBodyLimit::max(1024 * 1024))
        .layer(TraceLayer::new_for_http())
}

fn build_cors_layer(cors: &CorsConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = cors
        .allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse::<HeaderValue>() {
            Ok(value) => Some(value),
            Err(_) => {
                warn!("Ignoring unparseable CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(cors.allow_credentials)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_state() -> AppState {
        AppState {
            config: Arc::new(ArcSwap::from_pointee(Config::default())),
            tariffs: Arc::new(Tariffs::default()),
        }
    }

    #[test]
    fn test_create_router() {
        let config = Config::default();
        let _app = create_router(&config, create_test_state());
        // Router created successfully - no panic
    }

    #[test]
    fn test_build_cors_layer_skips_bad_origins() {
        let cors = CorsConfig {
            allowed_origins: vec![
                "http://localhost:5173".to_string(),
                "http://bad origin".to_string(),
            ],
            allow_credentials: true,
        };
        let _layer = build_cors_layer(&cors);
    }
}
