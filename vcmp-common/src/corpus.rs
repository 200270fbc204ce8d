//! Corpus discovery
//!
//! Locates the real and synthetic media folders under a base directory and lists
//! the files with the configured extension. Listing is non-recursive and does not
//! inspect file contents.

use std::fmt;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use walkdir::WalkDir;

use crate::{Error, Result};

/// Which side of the comparison a media item belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaGroup {
    Real,
    Fake,
}

impl fmt::Display for MediaGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MediaGroup::Real => write!(f, "real"),
            MediaGroup::Fake => write!(f, "fake"),
        }
    }
}

/// One discovered video file
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MediaItem {
    pub path: PathBuf,
    pub group: MediaGroup,
}

impl MediaItem {
    pub fn new(path: impl Into<PathBuf>, group: MediaGroup) -> Self {
        Self {
            path: path.into(),
            group,
        }
    }
}

/// All media discovered for a session, before any trial is drawn
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    pub real: Vec<MediaItem>,
    pub fake: Vec<MediaItem>,
}

impl Corpus {
    /// Build a corpus from plain paths (used by tests and alternative front ends)
    pub fn from_paths<R, F>(real: R, fake: F) -> Self
    where
        R: IntoIterator,
        R::Item: Into<PathBuf>,
        F: IntoIterator,
        F::Item: Into<PathBuf>,
    {
        Self {
            real: real
                .into_iter()
                .map(|p| MediaItem::new(p, MediaGroup::Real))
                .collect(),
            fake: fake
                .into_iter()
                .map(|p| MediaItem::new(p, MediaGroup::Fake))
                .collect(),
        }
    }

    /// Number of complete pairs the corpus can produce
    pub fn pair_count(&self) -> usize {
        self.real.len().min(self.fake.len())
    }
}

/// Folder names and file extension that make up a corpus
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorpusLayout {
    /// Subdirectory holding real examples
    pub real_dir: String,
    /// Candidate subdirectories for synthetic examples, first existing one wins
    pub fake_dirs: Vec<String>,
    /// File extension, with or without the leading dot
    pub extension: String,
}

impl Default for CorpusLayout {
    fn default() -> Self {
        Self {
            real_dir: "real".to_string(),
            fake_dirs: vec!["fake".to_string(), "synthetic".to_string()],
            extension: ".mp4".to_string(),
        }
    }
}

impl CorpusLayout {
    /// Extension without leading dot, lowercased
    fn normalized_extension(&self) -> String {
        self.extension.trim_start_matches('.').to_lowercase()
    }
}

/// Discovers real and fake media under a base directory
#[derive(Debug, Clone, Default)]
pub struct CorpusLoader {
    layout: CorpusLayout,
}

impl CorpusLoader {
    pub fn new(layout: CorpusLayout) -> Self {
        Self { layout }
    }

    /// Load the corpus rooted at `base_dir`
    ///
    /// Fails with [`Error::InvalidCorpus`] if the real folder or every fake folder
    /// candidate is missing or not a directory.
    pub fn load(&self, base_dir: &Path) -> Result<Corpus> {
        if self.layout.normalized_extension().is_empty() {
            return Err(Error::InvalidInput("file extension must not be empty".to_string()));
        }

        let real_dir = base_dir.join(&self.layout.real_dir);
        require_directory(&real_dir)?;

        let fake_dir = self.locate_fake_dir(base_dir)?;

        let corpus = Corpus {
            real: self.list_media(&real_dir, MediaGroup::Real)?,
            fake: self.list_media(&fake_dir, MediaGroup::Fake)?,
        };

        info!(
            "Loaded corpus from {}: {} real, {} fake, {} pair(s) (*.{})",
            base_dir.display(),
            corpus.real.len(),
            corpus.fake.len(),
            corpus.pair_count(),
            self.layout.normalized_extension()
        );
        if corpus.real.is_empty() {
            warn!("No real media found in {}", real_dir.display());
        }
        if corpus.fake.is_empty() {
            warn!("No fake media found in {}", fake_dir.display());
        }

        Ok(corpus)
    }

    fn locate_fake_dir(&self, base_dir: &Path) -> Result<PathBuf> {
        if self.layout.fake_dirs.is_empty() {
            return Err(Error::InvalidInput(
                "at least one fake directory name must be configured".to_string(),
            ));
        }

        for name in &self.layout.fake_dirs {
            let candidate = base_dir.join(name);
            if candidate.is_dir() {
                debug!("Using fake media folder {}", candidate.display());
                return Ok(candidate);
            }
        }

        // Report against the first candidate, which is the preferred name
        let preferred = base_dir.join(&self.layout.fake_dirs[0]);
        require_directory(&preferred)?;
        Ok(preferred)
    }

    fn list_media(&self, dir: &Path, group: MediaGroup) -> Result<Vec<MediaItem>> {
        let extension = self.layout.normalized_extension();
        let mut items = Vec::new();

        let walker = WalkDir::new(dir).min_depth(1).max_depth(1).follow_links(true);
        for entry in walker {
            let entry = entry.map_err(|e| {
                Error::invalid_corpus(dir, format!("failed to list directory: {}", e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let matches = entry
                .path()
                .extension()
                .map(|ext| ext.to_string_lossy().to_lowercase() == extension)
                .unwrap_or(false);
            if !matches {
                continue;
            }
            // Paths are exported as text, so they must be valid UTF-8
            if entry.path().to_str().is_none() {
                warn!(
                    "Skipping {} media with non UTF-8 name: {}",
                    group,
                    entry.path().display()
                );
                continue;
            }

            debug!("Discovered {} media: {}", group, entry.path().display());
            items.push(MediaItem::new(entry.path(), group));
        }

        items.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(items)
    }
}

fn require_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(Error::invalid_corpus(path, "directory does not exist"));
    }
    if !path.is_dir() {
        return Err(Error::invalid_corpus(path, "not a directory"));
    }
    Ok(())
}
