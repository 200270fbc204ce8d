//! Trial presentation and choice submission
//!
//! The browser only ever learns a trial id and two media URLs; which side holds
//! the real video stays on the server.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use vcmp_common::{Error, SessionSummary, Side, Trial};

use crate::{ApiResult, AppState};

/// Pair shown to the rater
#[derive(Debug, Serialize)]
pub struct TrialView {
    pub trial_id: u32,
    pub left_url: String,
    pub right_url: String,
}

impl From<&Trial> for TrialView {
    fn from(trial: &Trial) -> Self {
        Self {
            trial_id: trial.id,
            left_url: media_url(trial.id, Side::Left),
            right_url: media_url(trial.id, Side::Right),
        }
    }
}

fn media_url(trial_id: u32, side: Side) -> String {
    format!("/media/{}/{}", trial_id, side)
}

/// GET /api/trial response
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum TrialResponse {
    Presenting {
        trial: TrialView,
        summary: SessionSummary,
    },
    Exhausted {
        summary: SessionSummary,
    },
}

/// GET /api/trial
///
/// Returns the pending trial, drawing a new one when the previous was answered.
pub async fn get_trial(State(state): State<AppState>) -> ApiResult<Json<TrialResponse>> {
    let mut session = state.session.lock().await;

    match session.next_trial() {
        Ok(trial) => Ok(Json(TrialResponse::Presenting {
            trial: TrialView::from(&trial),
            summary: session.summary(),
        })),
        Err(Error::SequenceExhausted) => {
            info!("No pairs left to present");
            Ok(Json(TrialResponse::Exhausted {
                summary: session.summary(),
            }))
        }
        Err(e) => Err(e.into()),
    }
}

/// POST /api/submit body
#[derive(Debug, Deserialize)]
pub struct SubmitRequest {
    pub trial_id: u32,
    /// "left" or "right"
    pub choice: String,
}

/// POST /api/submit response
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub trial_id: u32,
    /// True when this trial had already been recorded
    pub duplicate: bool,
    pub summary: SessionSummary,
}

/// POST /api/submit
pub async fn submit_choice(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> ApiResult<Json<SubmitResponse>> {
    let chosen: Side = request.choice.parse()?;

    let mut session = state.session.lock().await;
    let outcome = session.submit(request.trial_id, chosen)?;

    Ok(Json(SubmitResponse {
        trial_id: request.trial_id,
        duplicate: outcome.is_duplicate(),
        summary: session.summary(),
    }))
}
