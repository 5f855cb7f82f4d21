//! Axum handlers.
//!
//! Each handler receives [`AppState`] via [`axum::extract::State`] and
//! returns an axum [`Response`]. Every outcome is a well-formed JSON body.

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::json;
use tracing::{debug, warn};

use crate::llm::extract::extract_specialist;

use super::AppState;

// ── Request types ─────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub(super) struct AnalyzeRequest {
    /// Free-text symptom description. Optional so a missing field is our
    /// 400, not an axum deserialization rejection.
    symptoms: Option<String>,
}

// ── Handlers ──────────────────────────────────────────────────────────────────

/// POST /analyze-symptoms
pub(super) async fn analyze_symptoms(
    State(state): State<AppState>,
    Json(req): Json<AnalyzeRequest>,
) -> Response {
    // Presence check only: whitespace-only input is still input.
    let Some(symptoms) = req.symptoms.filter(|s| !s.is_empty()) else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({ "error": "Symptoms input is required" })),
        )
            .into_response();
    };

    match state.llm.generate(&symptoms).await {
        Ok(envelope) => {
            let specialist = extract_specialist(&envelope);
            debug!(%specialist, "symptom analysis complete");
            (StatusCode::OK, Json(json!({ "specialist": specialist }))).into_response()
        }
        Err(e) => {
            warn!("symptom analysis failed: {e}");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": e.to_string() })),
            )
                .into_response()
        }
    }
}

/// GET /health
pub(super) async fn health(State(state): State<AppState>) -> Response {
    (
        StatusCode::OK,
        Json(json!({ "status": "ok", "provider": state.llm.name() })),
    )
        .into_response()
}
