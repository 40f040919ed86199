//! HTTP Server
//!
//! `GET /` (service info and capability flags), `GET /health` and
//! `POST /analyze`.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;
use std::collections::BTreeMap;
use std::sync::Arc;
use tower_http::trace::TraceLayer;
use tracing::{error, info, Instrument};

use crate::analysis::pipeline::AnalysisPipeline;
use crate::analysis::types::{AnalysisRequest, AnalysisResponse};
use crate::capabilities::Capabilities;
use crate::config::ServiceConfig;

pub struct AppState {
    pub service_name: String,
    pub features: BTreeMap<&'static str, bool>,
    pub pipeline: AnalysisPipeline,
}

impl AppState {
    pub fn new(service_name: impl Into<String>, capabilities: &Capabilities, concurrency: usize) -> Self {
        Self {
            service_name: service_name.into(),
            features: capabilities.availability(),
            pipeline: AnalysisPipeline::new(capabilities).with_concurrency(concurrency),
        }
    }
}

/// Batch failure: 500 with an empty result list
pub struct ServerError(anyhow::Error);

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let body = AnalysisResponse::failure(format!("Analysis failed: {}", self.0));
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}

impl<E> From<E> for ServerError
where
    E: Into<anyhow::Error>,
{
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_handler))
        .route("/analyze", post(analyze_handler))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

pub async fn run_server(config: &ServiceConfig, capabilities: &Capabilities) -> anyhow::Result<()> {
    let state = Arc::new(AppState::new(
        config.service_name.clone(),
        capabilities,
        config.concurrency,
    ));
    let app = router(state);

    let addr = config.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("🚀 {} listening at http://{}", config.service_name, addr);
    axum::serve(listener, app).await?;

    Ok(())
}

async fn root_handler(State(state): State<Arc<AppState>>) -> Json<serde_json::Value> {
    Json(json!({
        "status": "ok",
        "service": state.service_name,
        "features": state.features,
    }))
}

async fn health_handler() -> Json<serde_json::Value> {
    Json(json!({ "status": "healthy" }))
}

async fn analyze_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalysisRequest>,
) -> Result<Json<AnalysisResponse>, ServerError> {
    let request_id = uuid::Uuid::new_v4();
    let segments = request.segments.len();
    let span = tracing::info_span!("analyze", %request_id, segments);

    let results = state
        .pipeline
        .analyze(request.segments)
        .instrument(span)
        .await
        .map_err(|e| {
            error!(%request_id, "Analysis failed: {}", e);
            e
        })?;

    Ok(Json(AnalysisResponse::success(results)))
}
