//! Trial sequencing
//!
//! Both media groups are shuffled once when the sequencer is built and then
//! consumed from the front, which samples pairs uniformly without replacement.
//! Each trial places the real item on a uniformly random side.

use std::collections::VecDeque;
use std::fmt;
use std::str::FromStr;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::corpus::{Corpus, MediaItem};
use crate::{Error, Result};

/// Display position of a video; exported as 0 (left) or 1 (right)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "u8", try_from = "u8")]
pub enum Side {
    Left,
    Right,
}

impl Side {
    pub fn index(self) -> u8 {
        match self {
            Side::Left => 0,
            Side::Right => 1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Side::Left => "left",
            Side::Right => "right",
        }
    }
}

impl From<Side> for u8 {
    fn from(side: Side) -> u8 {
        side.index()
    }
}

impl TryFrom<u8> for Side {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        match value {
            0 => Ok(Side::Left),
            1 => Ok(Side::Right),
            other => Err(format!("side must be 0 or 1, got {}", other)),
        }
    }
}

impl FromStr for Side {
    type Err = Error;

    /// Parses the raw choice coming from a front end ("Left", "right", ...)
    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "left" | "0" => Ok(Side::Left),
            "right" | "1" => Ok(Side::Right),
            other => Err(Error::InvalidInput(format!(
                "choice must be 'left' or 'right', got '{}'",
                other
            ))),
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One real/fake pair and where the real item is displayed
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trial {
    /// 1-based draw number within the session
    pub id: u32,
    pub real: MediaItem,
    pub fake: MediaItem,
    pub real_position: Side,
}

impl Trial {
    /// Item displayed on `side`
    pub fn item_at(&self, side: Side) -> &MediaItem {
        if side == self.real_position {
            &self.real
        } else {
            &self.fake
        }
    }

    pub fn left(&self) -> &MediaItem {
        self.item_at(Side::Left)
    }

    pub fn right(&self) -> &MediaItem {
        self.item_at(Side::Right)
    }
}

/// Draws paired trials from two shrinking queues
#[derive(Debug, Clone)]
pub struct TrialSequencer {
    real: VecDeque<MediaItem>,
    fake: VecDeque<MediaItem>,
    current: Option<Trial>,
    drawn: u32,
}

impl TrialSequencer {
    /// Shuffle both groups once and queue them
    pub fn new<R: Rng>(corpus: Corpus, rng: &mut R) -> Self {
        let Corpus {
            mut real,
            mut fake,
        } = corpus;
        real.shuffle(rng);
        fake.shuffle(rng);

        Self {
            real: real.into(),
            fake: fake.into(),
            current: None,
            drawn: 0,
        }
    }

    /// True iff a trial can be drawn (both queues non-empty)
    pub fn has_next(&self) -> bool {
        !self.real.is_empty() && !self.fake.is_empty()
    }

    /// Pop one item of each group and place the real one at random
    ///
    /// Queues are left untouched when either is empty.
    pub fn next_trial<R: Rng>(&mut self, rng: &mut R) -> Result<Trial> {
        if !self.has_next() {
            return Err(Error::SequenceExhausted);
        }

        let (real, fake) = match (self.real.pop_front(), self.fake.pop_front()) {
            (Some(real), Some(fake)) => (real, fake),
            _ => return Err(Error::SequenceExhausted),
        };
        let real_position = if rng.gen_bool(0.5) {
            Side::Right
        } else {
            Side::Left
        };

        self.drawn += 1;
        let trial = Trial {
            id: self.drawn,
            real,
            fake,
            real_position,
        };
        debug!(
            "Drew trial {} (real on {}), {} real / {} fake remaining",
            trial.id,
            trial.real_position,
            self.real.len(),
            self.fake.len()
        );

        self.current = Some(trial.clone());
        Ok(trial)
    }

    /// Trial most recently drawn and not yet taken
    pub fn current(&self) -> Option<&Trial> {
        self.current.as_ref()
    }

    pub fn take_current(&mut self) -> Option<Trial> {
        self.current.take()
    }

    pub fn remaining_real(&self) -> usize {
        self.real.len()
    }

    pub fn remaining_fake(&self) -> usize {
        self.fake.len()
    }

    /// Number of trials drawn so far
    pub fn drawn(&self) -> u32 {
        self.drawn
    }
}
