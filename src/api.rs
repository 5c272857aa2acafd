//! HTTP review API.
//!
//! Returns a composable `Router` that can be mounted on any axum server:
//! `GET /api/reviews` lists stored reviews, `POST /api/reviews` analyzes and
//! stores a submission, `POST /api/analyze` runs the engine without storing.
//! CORS is permissive — the frontend is served from a different origin.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Deserialize;
use tokio::sync::Mutex;
use tower_http::cors::CorsLayer;
use tracing::error;

use crate::analyzer::{AnalysisResult, Analyzer, Mode};
use crate::store::{NewReview, Review, ReviewStore, StoreError};

/// Shared request context: the analyzer is immutable after construction,
/// the store is serialized behind a mutex.
pub struct AppState {
    pub analyzer: Analyzer,
    pub store: Mutex<ReviewStore>,
}

impl AppState {
    pub fn new(analyzer: Analyzer, store: ReviewStore) -> Self {
        Self {
            analyzer,
            store: Mutex::new(store),
        }
    }
}

/// Build the review API router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/reviews", get(list_reviews).post(create_review))
        .route("/api/analyze", post(analyze_text))
        .with_state(state)
        .layer(CorsLayer::permissive())
}

async fn list_reviews(State(state): State<Arc<AppState>>) -> Json<Vec<Review>> {
    Json(state.store.lock().await.reviews().to_vec())
}

async fn create_review(
    State(state): State<Arc<AppState>>,
    Json(submission): Json<NewReview>,
) -> Result<(StatusCode, Json<Review>), ApiError> {
    let analysis = state.analyzer.analyze(&submission.review_text);
    let review = state.store.lock().await.add(submission, &analysis)?;
    Ok((StatusCode::CREATED, Json(review)))
}

#[derive(Debug, Deserialize)]
struct AnalyzeRequest {
    text: String,
    /// Optional per-request mode; unknown names fall back to `combined`.
    #[serde(default)]
    mode: Option<String>,
}

async fn analyze_text(
    State(state): State<Arc<AppState>>,
    Json(request): Json<AnalyzeRequest>,
) -> Json<AnalysisResult> {
    let result = match request.mode.as_deref() {
        Some(name) => state
            .analyzer
            .analyze_with_mode(&request.text, Mode::parse(name)),
        None => state.analyzer.analyze(&request.text),
    };
    Json(result)
}

/// Store failures surface as 500; everything else in the engine degrades
/// internally and cannot fail a request.
struct ApiError(StoreError);

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error!(error = %self.0, "store operation failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({ "error": self.0.to_string() })),
        )
            .into_response()
    }
}
