//! Configuration loading and resolution
//!
//! Settings are resolved in priority order:
//! 1. Command-line argument / environment variable (the front end's overrides)
//! 2. TOML config file
//! 3. Compiled defaults
//!
//! A missing config file is not an error: defaults apply and the binary logs a warning.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::corpus::CorpusLayout;
use crate::session::SessionConfig;
use crate::{Error, Result};

/// Default HTTP port for the comparison UI
pub const DEFAULT_PORT: u16 = 5730;

/// Configuration file contents
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub port: Option<u16>,

    /// Address to bind to (default 127.0.0.1)
    #[serde(default)]
    pub bind: Option<String>,

    /// Folder result files are written to
    #[serde(default)]
    pub output_dir: Option<PathBuf>,

    /// Fixed run identifier; generated per session when absent
    #[serde(default)]
    pub run_id: Option<String>,

    #[serde(default)]
    pub shuffle_seed: Option<u64>,

    #[serde(default)]
    pub corpus: CorpusConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// `[corpus]` table
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CorpusConfig {
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    #[serde(default)]
    pub extension: Option<String>,
    #[serde(default)]
    pub real_dir: Option<String>,
    #[serde(default)]
    pub fake_dirs: Option<Vec<String>>,
}

/// `[logging]` table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Values supplied on the command line or through the environment
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_dir: Option<PathBuf>,
    pub extension: Option<String>,
    pub output_dir: Option<PathBuf>,
    pub run_id: Option<String>,
    pub port: Option<u16>,
    pub bind: Option<String>,
    pub shuffle_seed: Option<u64>,
}

/// Fully resolved settings for one run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub session: SessionConfig,
    pub port: u16,
    pub bind: String,
    pub log_level: String,
}

impl ResolvedConfig {
    /// Merge overrides over the file contents over compiled defaults
    pub fn resolve(toml: TomlConfig, overrides: ConfigOverrides) -> Result<Self> {
        let base_dir = overrides
            .base_dir
            .or(toml.corpus.base_dir)
            .ok_or_else(|| {
                Error::Config(
                    "no corpus base directory configured (use --base-dir, VCMP_BASE_DIR \
                     or corpus.base_dir in the config file)"
                        .to_string(),
                )
            })?;

        let defaults = CorpusLayout::default();
        let layout = CorpusLayout {
            real_dir: toml.corpus.real_dir.unwrap_or(defaults.real_dir),
            fake_dirs: toml.corpus.fake_dirs.unwrap_or(defaults.fake_dirs),
            extension: overrides
                .extension
                .or(toml.corpus.extension)
                .unwrap_or(defaults.extension),
        };
        if layout.fake_dirs.is_empty() {
            return Err(Error::Config("corpus.fake_dirs must not be empty".to_string()));
        }

        let session = SessionConfig {
            base_dir,
            layout,
            output_dir: overrides
                .output_dir
                .or(toml.output_dir)
                .unwrap_or_else(|| PathBuf::from(".")),
            run_id: overrides.run_id.or(toml.run_id),
            shuffle_seed: overrides.shuffle_seed.or(toml.shuffle_seed),
        };

        Ok(Self {
            session,
            port: overrides.port.or(toml.port).unwrap_or(DEFAULT_PORT),
            bind: overrides
                .bind
                .or(toml.bind)
                .unwrap_or_else(|| "127.0.0.1".to_string()),
            log_level: toml.logging.level,
        })
    }
}

/// Default config file location: `<config dir>/vcmp/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("vcmp").join("config.toml"))
}

/// Load the TOML config file
///
/// A missing file yields defaults; an unreadable or malformed file is an error.
/// Runs before logging is set up, so the caller reports which case applied.
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    if !path.exists() {
        return Ok(TomlConfig::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;

    Ok(config)
}
