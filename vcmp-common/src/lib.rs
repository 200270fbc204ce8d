//! # vcmp common library
//!
//! Core of the real-vs-synthetic video comparison survey:
//! - Corpus discovery (real and fake media folders)
//! - Trial sequencing (shuffle once, draw pairs, random placement)
//! - Response recording (selection log)
//! - Result export (CSV per run identifier)
//! - Session lifecycle and configuration

pub mod config;
pub mod corpus;
pub mod error;
pub mod export;
pub mod recorder;
pub mod run_id;
pub mod sequencer;
pub mod session;

pub use corpus::{Corpus, CorpusLayout, CorpusLoader, MediaGroup, MediaItem};
pub use error::{Error, Result};
pub use export::ResultExporter;
pub use recorder::{RecordOutcome, ResponseRecorder, Selection};
pub use sequencer::{Side, Trial, TrialSequencer};
pub use session::{QuitOutcome, Session, SessionConfig, SessionPhase, SessionSummary};
