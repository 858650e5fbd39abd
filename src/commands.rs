//! CLI command definitions
//!
//! Defines the clap commands for the validation CLI.

use clap::{Args, Subcommand};
use std::path::PathBuf;

use crate::common::config::EnvConfig;

#[derive(Subcommand)]
pub enum Commands {
    /// Run validation cases against RxTxApp
    Run {
        /// Only run cases whose id contains this text
        filter: Option<String>,

        /// Additional YAML suite file(s) with more cases
        #[arg(long)]
        suite: Vec<PathBuf>,

        /// Skip the built-in cases (use with --suite)
        #[arg(long)]
        no_builtin: bool,

        /// Print the generated configurations instead of launching RxTxApp
        #[arg(long)]
        dry_run: bool,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// List available cases
    #[command(alias = "ls")]
    List {
        /// Only list cases whose id contains this text
        filter: Option<String>,

        /// Additional YAML suite file(s) with more cases
        #[arg(long)]
        suite: Vec<PathBuf>,
    },

    /// Print the RxTxApp JSON configuration a case would run
    Config {
        /// Case id, e.g. 'test_multicast[PCM24]'
        case: String,

        /// Additional YAML suite file(s) with more cases
        #[arg(long)]
        suite: Vec<PathBuf>,

        #[command(flatten)]
        env: EnvArgs,
    },

    /// Show the media file registry
    Media {
        /// Print the registry as JSON
        #[arg(long)]
        json: bool,
    },
}

/// Overrides for the `[env]` table of the configuration file
#[derive(Args, Debug, Default)]
pub struct EnvArgs {
    /// Root of the media transport library build
    #[arg(long)]
    pub build: Option<PathBuf>,

    /// Directory with the media files
    #[arg(long)]
    pub media: Option<PathBuf>,

    /// NIC port to use; repeat for each port (first transmits, second receives)
    #[arg(long = "nic")]
    pub nic_port_list: Vec<String>,

    /// Seconds RxTxApp runs per case
    #[arg(long)]
    pub test_time: Option<u64>,
}

impl EnvArgs {
    /// Apply the given overrides on top of the configured environment
    pub fn apply(&self, env: &mut EnvConfig) {
        if let Some(build) = &self.build {
            env.build = Some(build.clone());
        }
        if let Some(media) = &self.media {
            env.media = Some(media.clone());
        }
        if !self.nic_port_list.is_empty() {
            env.nic_port_list = self.nic_port_list.clone();
        }
        if let Some(test_time) = self.test_time {
            env.test_time = test_time;
        }
    }
}
