use crate::config::ServerConfig;
use crate::youtube::PlayerSource;
use anyhow::Result;
use axum::{
    Router,
    http::{Method, Response},
    response::IntoResponse,
    routing::get,
};
use std::any::Any;
use std::sync::Arc;
use tokio::signal;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    trace::TraceLayer,
};

pub mod error;
pub mod routes;

pub use error::{ApiError, ApiResult};

/// Shared application context
#[derive(Clone)]
pub struct AppContext {
    pub source: Arc<dyn PlayerSource>,
}

impl AppContext {
    pub fn new(source: impl PlayerSource + 'static) -> Self {
        Self {
            source: Arc::new(source),
        }
    }
}

/// Create the Axum router with all routes
pub fn create_router(ctx: AppContext) -> Router {
    // Credentials are allowed, so origins and headers are echoed instead of `*`
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods([Method::GET])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    Router::new()
        .route("/stream", get(routes::get_stream))
        .route("/health", get(routes::health_check))
        .fallback(routes::not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(ctx)
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response<axum::body::Body> {
    let detail = err
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| err.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    tracing::error!("Unexpected error: handler panicked: {}", detail);
    ApiError::internal().into_response()
}

/// Start the HTTP server and run until a shutdown signal arrives
pub async fn start_server(config: &ServerConfig, ctx: AppContext) -> Result<()> {
    let addr = config.socket_addr()?;
    let app = create_router(ctx);

    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    tracing::info!("Shutdown signal received");
}
