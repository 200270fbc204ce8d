//! vcmp-ui library - browser front end for the comparison survey
//!
//! Serves the survey page, streams the two videos of the pending trial and
//! forwards the rater's choices and quit request to the [`Session`].

use std::sync::Arc;

use axum::Router;
use chrono::{DateTime, Utc};
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;
use vcmp_common::Session;

pub mod api;
pub mod cli;
pub mod error;

pub use crate::error::{ApiError, ApiResult};

/// Application state shared across HTTP handlers
#[derive(Clone)]
pub struct AppState {
    /// The one session of this process; the lock serializes draws and submissions
    pub session: Arc<Mutex<Session>>,
    /// Cancelled when the rater quits, stopping the server
    pub shutdown: CancellationToken,
    /// Service startup timestamp for uptime tracking
    pub startup_time: DateTime<Utc>,
}

impl AppState {
    pub fn new(session: Session, shutdown: CancellationToken) -> Self {
        Self {
            session: Arc::new(Mutex::new(session)),
            shutdown,
            startup_time: Utc::now(),
        }
    }
}

/// Build application router
pub fn build_router(state: AppState) -> Router {
    use axum::routing::{get, post, put};

    Router::new()
        // UI
        .route("/", get(api::serve_index))
        .route("/static/app.js", get(api::serve_app_js))
        // Survey API
        .route("/api/session", get(api::get_session))
        .route("/api/trial", get(api::get_trial))
        .route("/api/submit", post(api::submit_choice))
        .route("/api/run-id", put(api::set_run_id))
        .route("/api/quit", post(api::quit))
        .route("/media/:trial_id/:side", get(api::serve_media))
        .merge(api::health_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
