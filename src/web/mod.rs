use anyhow::{Context, Result};
use axum::Json;
use axum::Router;
use axum::body::Bytes;
use axum::http::{Method, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{any, post};
use serde_json::{Value, json};
use thiserror::Error;
use tower_http::cors::{Any, CorsLayer};
use tracing::{info, warn};

use crate::parser::patterns::catalog;
use crate::query::{AnalysisResult, AnalyzeRequest, analyze};

pub const ANALYZE_ROUTE: &str = "/api/bridge/analyze";
pub const HEALTH_ROUTE: &str = "/api/health";

/// Failures surfaced to HTTP clients.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid request body")]
    InvalidBody(#[source] serde_json::Error),
    #[error("analysis task failed")]
    Task(#[from] tokio::task::JoinError),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            ApiError::Task(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status(), self.to_string()).into_response()
    }
}

/// Build the application router.
///
/// Unlisted methods on the analyze route get 405 from axum; CORS is
/// permissive (any origin, POST/OPTIONS, Content-Type).
pub fn router() -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::POST, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route(ANALYZE_ROUTE, post(analyze_handler).options(preflight))
        .route(HEALTH_ROUTE, any(health))
        .layer(cors)
}

/// Bind `0.0.0.0:port` and serve until the process is stopped.
pub async fn serve(port: u16) -> Result<()> {
    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .with_context(|| format!("failed to bind port {port}"))?;
    info!("bridge analyzer listening on port {port}");
    axum::serve(listener, router())
        .await
        .context("server terminated")?;
    Ok(())
}

/// Body is parsed by hand so every malformed payload maps to 400, whatever
/// the Content-Type header says.
async fn analyze_handler(body: Bytes) -> Result<Json<AnalysisResult>, ApiError> {
    let request: AnalyzeRequest = serde_json::from_slice(&body).map_err(|err| {
        warn!("rejected analyze request: {err}");
        ApiError::InvalidBody(err)
    })?;

    let result = tokio::task::spawn_blocking(move || analyze(catalog(), &request)).await?;
    Ok(Json(result))
}

async fn preflight() -> StatusCode {
    StatusCode::OK
}

async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
