//! Run identifiers
//!
//! A run identifier names the result file of one session. Generated identifiers
//! look like `20240209_153012_3f2a...` (local timestamp plus a UUIDv4 without dashes).

use chrono::Local;
use uuid::Uuid;

use crate::{Error, Result};

const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S_";

/// Generate a fresh identifier for a session
pub fn generate() -> String {
    format!(
        "{}{}",
        Local::now().format(TIMESTAMP_FORMAT),
        Uuid::new_v4().simple()
    )
}

/// Check that a user supplied identifier can be used as a file name
pub fn validate(run_id: &str) -> Result<()> {
    if run_id.trim().is_empty() {
        return Err(Error::InvalidInput("run id must not be empty".to_string()));
    }
    if run_id == "." || run_id.contains("..") {
        return Err(Error::InvalidInput(format!(
            "run id '{}' must not contain '..'",
            run_id
        )));
    }
    if let Some(bad) = run_id
        .chars()
        .find(|c| !(c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.')))
    {
        return Err(Error::InvalidInput(format!(
            "run id '{}' contains invalid character '{}'",
            run_id, bad
        )));
    }
    Ok(())
}
