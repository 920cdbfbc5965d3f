//! Route definitions for the analysis API.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{analyze, health, tips, AppState};

/// Create the API router.
///
/// # Endpoints
///
/// - `POST /api/analyze` - Run a regret analysis for a decision
/// - `GET /api/tips` - Thinking tips for the loading state
/// - `GET /health` - Liveness probe
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/api/analyze", post(analyze))
        .route("/api/tips", get(tips))
        .route("/health", get(health))
}
