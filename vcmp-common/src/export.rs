//! Result export
//!
//! Writes the session log as `<output_dir>/<run_id>.csv`, one header row followed
//! by one row per selection in completion order. An existing file with the same
//! name is replaced.

use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{info, warn};

use crate::recorder::Selection;
use crate::{run_id, Error, Result};

/// Export column names, in [`Selection`] field order
pub const SELECTION_COLUMNS: [&str; 5] = [
    "real_vid",
    "fake_vid",
    "real_selection",
    "real_pos",
    "selected_real",
];

/// Extension of result files
pub const RESULT_EXTENSION: &str = "csv";

/// Writes selection logs into an output directory
#[derive(Debug, Clone)]
pub struct ResultExporter {
    output_dir: PathBuf,
}

impl ResultExporter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Path the results for `run_id` are written to
    pub fn target_path(&self, run_id: &str) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", run_id, RESULT_EXTENSION))
    }

    /// Write `selections` under `run_id`, returning the written path
    ///
    /// The file is first written next to the target and then renamed over it, so a
    /// failure never leaves a truncated result file behind.
    pub fn export(&self, run_id: &str, selections: &[Selection]) -> Result<PathBuf> {
        run_id::validate(run_id)?;
        let target = self.target_path(run_id);

        if !self.output_dir.exists() {
            return Err(Error::export(&target, "output directory does not exist"));
        }
        if !self.output_dir.is_dir() {
            return Err(Error::export(&target, "output path is not a directory"));
        }

        let temp_path = target.with_extension(format!("{}.tmp", RESULT_EXTENSION));
        if let Err(e) = write_csv(&temp_path, selections) {
            if temp_path.exists() {
                if let Err(cleanup) = fs::remove_file(&temp_path) {
                    warn!("Failed to remove {}: {}", temp_path.display(), cleanup);
                }
            }
            return Err(Error::export(&target, e));
        }

        fs::rename(&temp_path, &target).map_err(|e| Error::export(&target, e))?;

        info!(
            "Wrote {} selection(s) to {}",
            selections.len(),
            target.display()
        );
        Ok(target)
    }
}

fn write_csv(path: &Path, selections: &[Selection]) -> std::result::Result<(), csv::Error> {
    let file = File::create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    // Header is written explicitly so an empty log still produces it
    writer.write_record(SELECTION_COLUMNS)?;
    for selection in selections {
        writer.serialize(selection)?;
    }

    let mut file = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    file.flush()?;
    file.sync_all()?;
    Ok(())
}
