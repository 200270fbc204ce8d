//! Comparison session
//!
//! A [`Session`] owns everything one run needs: the trial sequencer, the
//! selection log and where results go. Front ends hold it behind a single lock
//! and drive it through [`Session::next_trial`], [`Session::submit`] and
//! [`Session::quit`].
//!
//! Phases: `Ready -> Presenting <-> Recording -> Exhausted`, and `Quit` from any
//! phase once the rater leaves.

use std::path::{Path, PathBuf};

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::corpus::{Corpus, CorpusLayout, CorpusLoader};
use crate::export::ResultExporter;
use crate::recorder::{RecordOutcome, ResponseRecorder, Selection};
use crate::sequencer::{Side, Trial, TrialSequencer};
use crate::{run_id, Error, Result};

/// Where a session is in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Corpus loaded, nothing drawn yet
    Ready,
    /// A trial is waiting for the rater's choice
    Presenting,
    /// Last trial recorded, next one not drawn yet
    Recording,
    /// No complete pair left
    Exhausted,
    /// Rater quit; no further trials or submissions
    Quit,
}

/// Everything needed to start a session
#[derive(Debug, Clone)]
pub struct SessionConfig {
    pub base_dir: PathBuf,
    pub layout: CorpusLayout,
    pub output_dir: PathBuf,
    /// Generated when absent
    pub run_id: Option<String>,
    /// Fixed seed for reproducible ordering; entropy when absent
    pub shuffle_seed: Option<u64>,
}

/// Snapshot for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSummary {
    pub phase: SessionPhase,
    pub run_id: String,
    pub completed: usize,
    pub correct: usize,
    pub remaining_real: usize,
    pub remaining_fake: usize,
}

/// What happened when the rater quit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuitOutcome {
    /// Result file, when export was requested
    pub exported_to: Option<PathBuf>,
    pub selections: usize,
}

/// One rater's run from corpus load to quit
#[derive(Debug)]
pub struct Session {
    sequencer: TrialSequencer,
    recorder: ResponseRecorder,
    exporter: ResultExporter,
    run_id: String,
    rng: StdRng,
    closed: bool,
}

impl Session {
    /// Shuffle `corpus` and build a session writing to `output_dir`
    pub fn new(
        corpus: Corpus,
        output_dir: impl Into<PathBuf>,
        run_id: String,
        mut rng: StdRng,
    ) -> Result<Self> {
        run_id::validate(&run_id)?;
        let sequencer = TrialSequencer::new(corpus, &mut rng);

        Ok(Self {
            sequencer,
            recorder: ResponseRecorder::new(),
            exporter: ResultExporter::new(output_dir),
            run_id,
            rng,
            closed: false,
        })
    }

    /// Load the corpus described by `config` and start a session
    pub fn start(config: &SessionConfig) -> Result<Self> {
        let corpus = CorpusLoader::new(config.layout.clone()).load(&config.base_dir)?;

        let rng = match config.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        let run_id = config.run_id.clone().unwrap_or_else(run_id::generate);

        let session = Self::new(corpus, &config.output_dir, run_id, rng)?;
        info!(
            "Session {} ready: {} trial(s) available, results to {}",
            session.run_id,
            session
                .sequencer
                .remaining_real()
                .min(session.sequencer.remaining_fake()),
            session.exporter.output_dir().display()
        );
        Ok(session)
    }

    pub fn phase(&self) -> SessionPhase {
        if self.closed {
            SessionPhase::Quit
        } else if self.sequencer.current().is_some() {
            SessionPhase::Presenting
        } else if !self.sequencer.has_next() {
            SessionPhase::Exhausted
        } else if self.recorder.is_empty() {
            SessionPhase::Ready
        } else {
            SessionPhase::Recording
        }
    }

    /// True iff another pair can be drawn
    pub fn has_next(&self) -> bool {
        !self.closed && self.sequencer.has_next()
    }

    /// Trial to present to the rater
    ///
    /// Returns the pending trial while it is unanswered, so asking again (for
    /// example on a page reload) does not consume another pair.
    pub fn next_trial(&mut self) -> Result<Trial> {
        self.ensure_open()?;

        if let Some(pending) = self.sequencer.current() {
            return Ok(pending.clone());
        }
        self.sequencer.next_trial(&mut self.rng)
    }

    /// Pending trial, if any
    pub fn current_trial(&self) -> Option<&Trial> {
        self.sequencer.current()
    }

    /// Record the rater's choice for trial `trial_id`
    ///
    /// Repeating a submission for an already recorded trial returns
    /// [`RecordOutcome::Duplicate`] without touching the log.
    pub fn submit(&mut self, trial_id: u32, chosen: Side) -> Result<RecordOutcome> {
        self.ensure_open()?;

        let pending = self.sequencer.current().map(|t| t.id);
        if pending == Some(trial_id) {
            if let Some(trial) = self.sequencer.take_current() {
                let outcome = self.recorder.record(&trial, chosen);
                if !self.sequencer.has_next() {
                    info!("All pairs completed ({} recorded)", self.recorder.len());
                }
                return Ok(outcome);
            }
        }

        match self.recorder.find(trial_id) {
            Some(existing) => {
                warn!("Trial {} already recorded, ignoring resubmission", trial_id);
                Ok(RecordOutcome::Duplicate(existing.clone()))
            }
            None => Err(Error::NoActiveTrial(trial_id)),
        }
    }

    pub fn selections(&self) -> &[Selection] {
        self.recorder.selections()
    }

    pub fn run_id(&self) -> &str {
        &self.run_id
    }

    /// Change the identifier used for the result file
    pub fn set_run_id(&mut self, run_id: impl Into<String>) -> Result<()> {
        self.ensure_open()?;
        let run_id = run_id.into();
        run_id::validate(&run_id)?;
        info!("Run id changed from {} to {}", self.run_id, run_id);
        self.run_id = run_id;
        Ok(())
    }

    pub fn output_dir(&self) -> &Path {
        self.exporter.output_dir()
    }

    /// Path the results will be written to
    pub fn result_path(&self) -> PathBuf {
        self.exporter.target_path(&self.run_id)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            phase: self.phase(),
            run_id: self.run_id.clone(),
            completed: self.recorder.len(),
            correct: self.recorder.correct_count(),
            remaining_real: self.sequencer.remaining_real(),
            remaining_fake: self.sequencer.remaining_fake(),
        }
    }

    /// Write the selection log; the log is kept either way
    pub fn export(&self) -> Result<PathBuf> {
        self.exporter.export(&self.run_id, self.recorder.selections())
    }

    /// End the session, optionally exporting first
    ///
    /// A failed export leaves the session open so the rater can retry.
    pub fn quit(&mut self, export: bool) -> Result<QuitOutcome> {
        self.ensure_open()?;

        let exported_to = if export {
            match self.export() {
                Ok(path) => Some(path),
                Err(e) => {
                    warn!("Export failed, session stays open: {}", e);
                    return Err(e);
                }
            }
        } else {
            info!("Quitting without writing results");
            None
        };

        if self.sequencer.take_current().is_some() {
            info!("Discarded unanswered trial on quit");
        }
        self.closed = true;
        info!(
            "Session {} closed after {} selection(s)",
            self.run_id,
            self.recorder.len()
        );

        Ok(QuitOutcome {
            exported_to,
            selections: self.recorder.len(),
        })
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    fn ensure_open(&self) -> Result<()> {
        if self.closed {
            Err(Error::SessionClosed)
        } else {
            Ok(())
        }
    }
}
