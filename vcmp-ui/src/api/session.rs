//! Session status, run identifier and quit

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use vcmp_common::SessionSummary;

use crate::{ApiResult, AppState};

/// GET /api/session response
#[derive(Debug, Serialize)]
pub struct SessionResponse {
    #[serde(flatten)]
    pub summary: SessionSummary,
    /// Where results will be written on export
    pub result_path: String,
}

/// GET /api/session
pub async fn get_session(State(state): State<AppState>) -> Json<SessionResponse> {
    let session = state.session.lock().await;
    Json(SessionResponse {
        summary: session.summary(),
        result_path: session.result_path().display().to_string(),
    })
}

/// PUT /api/run-id body
#[derive(Debug, Deserialize)]
pub struct RunIdRequest {
    pub run_id: String,
}

/// PUT /api/run-id
pub async fn set_run_id(
    State(state): State<AppState>,
    Json(request): Json<RunIdRequest>,
) -> ApiResult<Json<SessionResponse>> {
    let mut session = state.session.lock().await;
    session.set_run_id(request.run_id.trim())?;

    Ok(Json(SessionResponse {
        summary: session.summary(),
        result_path: session.result_path().display().to_string(),
    }))
}

/// POST /api/quit body
#[derive(Debug, Deserialize)]
pub struct QuitRequest {
    /// Write results before quitting
    #[serde(default)]
    pub export: bool,
}

/// POST /api/quit response
#[derive(Debug, Serialize)]
pub struct QuitResponse {
    pub exported_to: Option<String>,
    pub selections: usize,
}

/// POST /api/quit
///
/// On success the server shuts down once this response is sent. A failed
/// export returns the error and leaves the session running for a retry.
pub async fn quit(
    State(state): State<AppState>,
    Json(request): Json<QuitRequest>,
) -> ApiResult<Json<QuitResponse>> {
    let outcome = {
        let mut session = state.session.lock().await;
        session.quit(request.export)?
    };

    match &outcome.exported_to {
        Some(path) => info!("Results written to {}, quitting", path.display()),
        None => info!("Quitting without writing results"),
    }
    state.shutdown.cancel();

    Ok(Json(QuitResponse {
        exported_to: outcome
            .exported_to
            .map(|p| p.display().to_string()),
        selections: outcome.selections,
    }))
}
