//! HTTP surface: `/predict`, `/search` and `/health`.
//!
//! Every pipeline failure is converted here into a status code and an
//! `{"error": ...}` body; nothing below this layer knows about HTTP.

use std::sync::Arc;

use axum::extract::rejection::JsonRejection;
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower_http::cors::CorsLayer;

use crate::error::PredictError;
use crate::pipeline::PredictionPipeline;
use crate::provider::SymbolSearch;

#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<PredictionPipeline>,
    pub search: Arc<dyn SymbolSearch>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/predict", post(predict))
        .route("/search", get(search))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[derive(Debug, Deserialize)]
pub struct PredictRequest {
    #[serde(default)]
    pub ticker: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub quotes: Vec<Value>,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub model_loaded: bool,
}

pub fn status_for(err: &PredictError) -> StatusCode {
    match err {
        PredictError::MissingInput => StatusCode::BAD_REQUEST,
        PredictError::NoData => StatusCode::NOT_FOUND,
        PredictError::InsufficientHistory(_)
        | PredictError::ModelUnavailable
        | PredictError::Provider(_)
        | PredictError::Inference(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

impl IntoResponse for PredictError {
    fn into_response(self) -> Response {
        let status = status_for(&self);
        (
            status,
            Json(ErrorBody {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

fn bad_request(message: String) -> Response {
    (StatusCode::BAD_REQUEST, Json(ErrorBody { error: message })).into_response()
}

async fn predict(
    State(state): State<AppState>,
    body: Result<Json<PredictRequest>, JsonRejection>,
) -> Response {
    let request_id = uuid::Uuid::new_v4();

    // A missing model is reported before the body is even looked at.
    if let Err(err) = state.pipeline.ensure_model() {
        tracing::error!(%request_id, error = %err, "predict rejected");
        return err.into_response();
    }

    let request = match body {
        Ok(Json(request)) => request,
        Err(rejection) => {
            tracing::warn!(%request_id, error = %rejection.body_text(), "malformed predict body");
            return bad_request(rejection.body_text());
        }
    };
    let ticker = request.ticker.unwrap_or_default();

    match state.pipeline.predict(&ticker).await {
        Ok(result) => {
            tracing::info!(%request_id, ticker = %result.ticker, "predict ok");
            Json(result).into_response()
        }
        Err(err) => {
            match &err {
                PredictError::MissingInput | PredictError::NoData => {
                    tracing::info!(%request_id, ticker = %ticker, kind = err.kind(), error = %err, "predict failed")
                }
                _ => {
                    tracing::error!(%request_id, ticker = %ticker, kind = err.kind(), error = %err, "predict failed")
                }
            }
            err.into_response()
        }
    }
}

async fn search(State(state): State<AppState>, Query(params): Query<SearchParams>) -> Response {
    let query = params.q.unwrap_or_default();
    let query = query.trim();
    if query.is_empty() {
        return Json(SearchResponse { quotes: Vec::new() }).into_response();
    }

    match state.search.search_equities(query).await {
        Ok(quotes) => Json(SearchResponse { quotes }).into_response(),
        Err(err) => {
            tracing::warn!(query, error = %err, "search proxy failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(SearchResponse { quotes: Vec::new() }),
            )
                .into_response()
        }
    }
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        model_loaded: state.pipeline.model_loaded(),
    })
}
