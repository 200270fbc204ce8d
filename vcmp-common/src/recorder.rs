//! Response recording
//!
//! Turns a rater's choice for a trial into a [`Selection`] and keeps the
//! append-only session log.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::sequencer::{Side, Trial};

/// Outcome of one completed trial
///
/// Field order is the export column order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    #[serde(rename = "real_vid")]
    pub real_video: PathBuf,
    #[serde(rename = "fake_vid")]
    pub fake_video: PathBuf,
    /// Side the rater picked as real
    #[serde(rename = "real_selection")]
    pub chosen_side: Side,
    /// Side the real video was actually on
    #[serde(rename = "real_pos")]
    pub real_position: Side,
    #[serde(rename = "selected_real")]
    pub is_correct: bool,
    #[serde(skip)]
    pub trial_id: u32,
}

impl Selection {
    pub fn from_trial(trial: &Trial, chosen_side: Side) -> Self {
        Self {
            real_video: trial.real.path.clone(),
            fake_video: trial.fake.path.clone(),
            chosen_side,
            real_position: trial.real_position,
            is_correct: chosen_side == trial.real_position,
            trial_id: trial.id,
        }
    }
}

/// Result of submitting a choice
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// First submission for the trial, appended to the log
    Appended(Selection),
    /// Trial was already recorded; the original selection is returned unchanged
    Duplicate(Selection),
}

impl RecordOutcome {
    pub fn selection(&self) -> &Selection {
        match self {
            RecordOutcome::Appended(s) | RecordOutcome::Duplicate(s) => s,
        }
    }

    pub fn is_duplicate(&self) -> bool {
        matches!(self, RecordOutcome::Duplicate(_))
    }
}

/// Append-only log of selections in completion order
#[derive(Debug, Clone, Default)]
pub struct ResponseRecorder {
    log: Vec<Selection>,
}

impl ResponseRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the rater's choice for `trial`
    ///
    /// Re-submitting the same trial never appends a second row.
    pub fn record(&mut self, trial: &Trial, chosen_side: Side) -> RecordOutcome {
        if let Some(existing) = self.find(trial.id) {
            warn!(
                "Ignoring repeated submission for trial {} (first choice: {})",
                trial.id, existing.chosen_side
            );
            return RecordOutcome::Duplicate(existing.clone());
        }

        let selection = Selection::from_trial(trial, chosen_side);
        info!(
            "Recorded trial {}: chose {}, real on {}",
            trial.id, selection.chosen_side, selection.real_position
        );
        self.log.push(selection.clone());
        RecordOutcome::Appended(selection)
    }

    pub fn find(&self, trial_id: u32) -> Option<&Selection> {
        self.log.iter().rev().find(|s| s.trial_id == trial_id)
    }

    pub fn is_recorded(&self, trial_id: u32) -> bool {
        self.find(trial_id).is_some()
    }

    pub fn selections(&self) -> &[Selection] {
        &self.log
    }

    pub fn len(&self) -> usize {
        self.log.len()
    }

    pub fn is_empty(&self) -> bool {
        self.log.is_empty()
    }

    /// Number of selections where the real video was picked
    pub fn correct_count(&self) -> usize {
        self.log.iter().filter(|s| s.is_correct).count()
    }
}
