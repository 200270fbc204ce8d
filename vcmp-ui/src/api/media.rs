//! Media streaming for the pending trial

use axum::{
    extract::{Path, Request, State},
    response::{IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::debug;
use vcmp_common::Side;

use crate::{ApiError, ApiResult, AppState};

/// GET /media/:trial_id/:side
///
/// Streams the video displayed on `side` of the pending trial, with range
/// request support for seeking. Anything but the pending trial is 404.
pub async fn serve_media(
    State(state): State<AppState>,
    Path((trial_id, side)): Path<(u32, String)>,
    request: Request,
) -> ApiResult<Response> {
    let side: Side = side.parse()?;

    let path = {
        let session = state.session.lock().await;
        match session.current_trial() {
            Some(trial) if trial.id == trial_id => trial.item_at(side).path.clone(),
            _ => {
                return Err(ApiError::NotFound(format!(
                    "media for trial {} is not available",
                    trial_id
                )))
            }
        }
    };

    debug!("Serving trial {} {} media", trial_id, side);
    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}
