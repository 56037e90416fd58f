//! HTTP server assembly and lifecycle.

use std::net::SocketAddr;

use anyhow::{Context, Result};
use axum::error_handling::HandleErrorLayer;
use axum::http::{HeaderValue, Method, header};
use axum::{BoxError, Router};
use tokio::signal;
use tower::ServiceBuilder;
use tower::timeout::error::Elapsed;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use crate::config::Config;
use crate::error::AppError;
use crate::routes;
use crate::state::AppState;

/// Build the full application router with its middleware stack.
pub fn app(state: AppState, config: &Config) -> Router {
    Router::new()
        .merge(routes::health::router())
        .merge(routes::product::router())
        .merge(routes::admin::router())
        // Last added runs first: trace → CORS → timeout → routes
        .layer(
            ServiceBuilder::new()
                .layer(HandleErrorLayer::new(handle_timeout))
                .timeout(config.request_timeout),
        )
        .layer(build_cors_layer(config))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Turn a stalled request into the standard error envelope.
async fn handle_timeout(err: BoxError) -> AppError {
    if err.is::<Elapsed>() {
        AppError::Timeout("Request timed out")
    } else {
        AppError::Internal {
            message: "Unhandled middleware error",
            source: anyhow::anyhow!(err),
        }
    }
}

/// Connect, migrate and serve until Ctrl+C or SIGTERM.
pub async fn serve(config: Config) -> Result<()> {
    let state = AppState::new(&config)
        .await
        .context("failed to initialize application state")?;

    let app = app(state, &config);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .context("failed to bind to address")?;

    info!(%addr, "Server listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server shut down");
    Ok(())
}

/// CORS for the storefront frontend. `*` alone admits any origin.
///
/// Bearer tokens travel in a header, so credentials mode is never enabled.
pub fn build_cors_layer(config: &Config) -> CorsLayer {
    let origin = match config.cors_allowed_origins.as_slice() {
        [only] if only == "*" => AllowOrigin::any(),
        origins => AllowOrigin::list(origins.iter().filter_map(|origin| {
            HeaderValue::from_str(origin)
                .inspect_err(|_| warn!(%origin, "skipping malformed CORS origin"))
                .ok()
        })),
    };

    CorsLayer::new()
        .allow_origin(origin)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE, header::ACCEPT])
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
        info!("Received Ctrl+C, shutting down");
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
