//! HTTP API handlers for vcmp-ui

pub mod health;
pub mod media;
pub mod session;
pub mod trial;
pub mod ui;

pub use health::health_routes;
pub use media::serve_media;
pub use session::{get_session, quit, set_run_id};
pub use trial::{get_trial, submit_choice};
pub use ui::{serve_app_js, serve_index};
