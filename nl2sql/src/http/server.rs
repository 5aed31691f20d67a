// nl2sql/src/http/server.rs

use std::sync::Arc;

use anyhow::Context;
use axum::{
    Router,
    http::{HeaderValue, Method, header},
    routing::{get, post},
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use nl2sql_core::Nl2SqlGateway;
use nl2sql_core::infrastructure::config::ServerConfig;

use super::handlers;

/// Shared across requests. The gateway itself holds no per-request state.
#[derive(Clone)]
pub struct AppState {
    pub gateway: Arc<Nl2SqlGateway>,
}

pub fn router(state: AppState, cors: Option<CorsLayer>) -> Router {
    let app = Router::new()
        .route("/api/ai-query", post(handlers::post_ai_query))
        .route("/health", get(handlers::get_health))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    match cors {
        Some(layer) => app.layer(layer),
        None => app,
    }
}

/// CORS for the configured front-end origins. `None` when the list is empty.
pub fn build_cors(allowed_origins: &[String]) -> anyhow::Result<Option<CorsLayer>> {
    if allowed_origins.is_empty() {
        return Ok(None);
    }

    let origins = allowed_origins
        .iter()
        .map(|o| {
            HeaderValue::from_str(o).with_context(|| format!("Invalid CORS origin '{}'", o))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    Ok(Some(
        CorsLayer::new()
            .allow_origin(AllowOrigin::list(origins))
            .allow_methods([Method::GET, Method::POST])
            .allow_headers([header::CONTENT_TYPE]),
    ))
}

pub async fn start_server(config: &ServerConfig, state: AppState) -> anyhow::Result<()> {
    let cors = build_cors(&config.allowed_origins)?;
    let app = router(state, cors);

    let addr = config.bind_address();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind gateway to {}", addr))?;

    info!("🌐 NL2SQL gateway listening on http://{}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Gateway server error")?;

    info!("Gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_err() {
        // No signal handler available; run until killed.
        std::future::pending::<()>().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cors_from_config() -> anyhow::Result<()> {
        assert!(build_cors(&[])?.is_none());
        assert!(build_cors(&["http://localhost:3000".to_string()])?.is_some());
        Ok(())
    }

    #[test]
    fn test_invalid_origin_is_an_error() {
        assert!(build_cors(&["http://bad\norigin".to_string()]).is_err());
    }
}
