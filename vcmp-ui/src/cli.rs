//! Command-line arguments for vcmp-ui

use std::path::PathBuf;

use clap::Parser;
use vcmp_common::config::ConfigOverrides;

/// Command-line arguments for vcmp-ui
#[derive(Parser, Debug)]
#[command(name = "vcmp-ui")]
#[command(about = "Browser survey comparing real and synthetic videos")]
#[command(version)]
pub struct Args {
    /// TOML config file (default: <config dir>/vcmp/config.toml)
    #[arg(short, long, env = "VCMP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Base directory containing the real and fake/synthetic folders
    #[arg(short, long, env = "VCMP_BASE_DIR")]
    pub base_dir: Option<PathBuf>,

    /// Video file extension (e.g. .mp4, .avi)
    #[arg(short, long, env = "VCMP_EXTENSION")]
    pub extension: Option<String>,

    /// Folder the result CSV is written to
    #[arg(short, long, env = "VCMP_OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Run identifier used as the result file name
    #[arg(short, long, env = "VCMP_RUN_ID")]
    pub run_id: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "VCMP_PORT")]
    pub port: Option<u16>,

    /// Address to bind to
    #[arg(long, env = "VCMP_BIND")]
    pub bind: Option<String>,

    /// Seed for a reproducible trial order
    #[arg(long, env = "VCMP_SEED")]
    pub seed: Option<u64>,
}

impl Args {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_dir: self.base_dir.clone(),
            extension: self.extension.clone(),
            output_dir: self.output_dir.clone(),
            run_id: self.run_id.clone(),
            port: self.port,
            bind: self.bind.clone(),
            shuffle_seed: self.seed,
        }
    }
}
