//! HTTP server for scoring posted samples

use axum::{extract::State, http::StatusCode, routing::post, Json, Router};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

use crate::{Corpus, Sample, ScoreReport, ScoringEngine};

/// Samples to score; the vocabulary is built from these samples only
#[derive(Debug, Deserialize)]
pub struct ScoreRequestHttp {
    pub samples: Vec<Sample>,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: Option<String>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
}

type HandlerError = (StatusCode, Json<ErrorResponse>);

/// Score handler
pub async fn score_handler(
    State(engine): State<Arc<ScoringEngine>>,
    Json(req): Json<ScoreRequestHttp>,
) -> Result<Json<ScoreReport>, HandlerError> {
    info!("Received score request: {} samples", req.samples.len());

    if req.samples.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse {
                error: "No samples to score".to_string(),
                details: None,
            }),
        ));
    }

    let corpus = Corpus::from_samples(req.samples);

    match engine.score_corpus(&corpus).await {
        Ok(report) => {
            info!("Scoring successful: {} samples", report.samples.len());
            Ok(Json(report))
        }
        Err(e) => {
            error!("Scoring failed: {:?}", e);
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Scoring failed".to_string(),
                    details: Some(e.to_string()),
                }),
            ))
        }
    }
}

/// Health check handler
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        service: "novelscore".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

/// Create and configure the HTTP server
pub fn create_router(engine: Arc<ScoringEngine>) -> Router {
    Router::new()
        .route("/health", axum::routing::get(health_handler))
        .route("/score", post(score_handler))
        .with_state(engine)
}

/// Run the HTTP server
pub async fn run_server(engine: Arc<ScoringEngine>, port: u16) -> anyhow::Result<()> {
    let addr = format!("0.0.0.0:{}", port);
    info!("Starting novelscore server on {}", addr);

    let app = create_router(engine);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("Server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
