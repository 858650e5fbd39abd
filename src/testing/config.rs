//! Test case definitions
//!
//! A case definition describes one parametrized validation test: a session
//! template plus the list of format tags it runs with. Expanding a
//! definition yields one independent [`TestCase`] per format. Definitions
//! come from the built-in table or from YAML suite files.

use serde::Deserialize;
use std::path::Path;

use crate::common::{Error, Result};
use crate::executor::ExecuteRequest;
use crate::media::{media_path, MediaRegistry};
use crate::session::{add_st30p_sessions, add_video_sessions, create_empty_config, Configuration};

use super::runner::HarnessEnv;

/// A suite file with one or more case definitions
#[derive(Deserialize, Debug)]
pub struct TestSuite {
    /// Name of the suite
    pub name: String,
    /// Optional description of what the suite covers
    pub description: Option<String>,
    /// Parametrized case definitions
    pub cases: Vec<TestCaseDef>,
}

impl TestSuite {
    /// Load a suite from a YAML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            Error::Config(format!(
                "Failed to read test suite '{}': {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self> {
        serde_yaml::from_str(content)
            .map_err(|e| Error::Config(format!("Failed to parse test suite: {}", e)))
    }

    /// All cases of the suite, one per definition and format
    pub fn expand(&self) -> Vec<TestCase> {
        self.cases.iter().flat_map(TestCaseDef::expand).collect()
    }
}

/// A parametrized test: one session template run once per format tag
#[derive(Deserialize, Debug, Clone)]
pub struct TestCaseDef {
    /// Test function name, e.g. `test_multicast`
    pub name: String,
    /// Optional description
    pub description: Option<String>,
    /// Format tags to run with (video formats or audio formats, per session kind)
    pub formats: Vec<String>,
    /// Run with RxTxApp's RX timing parser
    #[serde(default)]
    pub rx_timing_parser: bool,
    /// The session every run configures
    pub session: SessionTemplate,
}

impl TestCaseDef {
    pub fn expand(&self) -> Vec<TestCase> {
        self.formats
            .iter()
            .map(|format| TestCase {
                name: self.name.clone(),
                format: format.clone(),
                session: self.session.clone(),
                rx_timing_parser: self.rx_timing_parser,
            })
            .collect()
    }
}

/// Session parameters shared by every format of a case definition
#[derive(Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionTemplate {
    /// A video session; the format tag selects video format and media file
    Video {
        #[serde(default = "default_test_mode")]
        test_mode: String,
        /// Transport type: "frame", "rtp" or "slice"
        #[serde(rename = "type", default = "default_video_type")]
        type_: String,
    },
    /// An st30p audio session; the format tag selects audio format and media file
    St30p {
        #[serde(default = "default_test_mode")]
        test_mode: String,
        #[serde(default = "default_audio_channel")]
        audio_channel: Vec<String>,
        #[serde(default = "default_audio_sampling")]
        audio_sampling: String,
        #[serde(default = "default_audio_ptime")]
        audio_ptime: String,
    },
}

fn default_test_mode() -> String {
    "multicast".to_string()
}

fn default_video_type() -> String {
    "frame".to_string()
}

fn default_audio_channel() -> Vec<String> {
    vec!["U02".to_string()]
}

fn default_audio_sampling() -> String {
    "48kHz".to_string()
}

fn default_audio_ptime() -> String {
    "1".to_string()
}

/// One runnable test: a case definition bound to a single format tag
#[derive(Debug, Clone, PartialEq)]
pub struct TestCase {
    pub name: String,
    pub format: String,
    pub session: SessionTemplate,
    pub rx_timing_parser: bool,
}

impl TestCase {
    /// Identifier in the `name[format]` form
    pub fn id(&self) -> String {
        format!("{}[{}]", self.name, self.format)
    }

    /// Build the configuration this case runs
    ///
    /// The registry lookup happens first, so an unknown format fails before
    /// any session is built.
    pub fn build_config(&self, registry: &MediaRegistry, env: &HarnessEnv) -> Result<Configuration> {
        match &self.session {
            SessionTemplate::Video { test_mode, type_ } => {
                let video_file = registry.yuv_file(&self.format)?;
                add_video_sessions(
                    create_empty_config(),
                    &env.nic_port_list,
                    test_mode,
                    type_,
                    &self.format,
                    &video_file.format,
                    media_path(&env.media, &video_file.filename),
                )
            }
            SessionTemplate::St30p {
                test_mode,
                audio_channel,
                audio_sampling,
                audio_ptime,
            } => {
                let audio_file = registry.audio_file(&self.format)?;
                add_st30p_sessions(
                    create_empty_config(),
                    &env.nic_port_list,
                    test_mode,
                    &self.format,
                    audio_channel,
                    audio_sampling,
                    audio_ptime,
                    media_path(&env.media, &audio_file.filename),
                )
            }
        }
    }

    /// The execution request for this case
    pub fn request(&self, env: &HarnessEnv) -> ExecuteRequest {
        ExecuteRequest::new(&env.build, env.test_time)
            .with_rx_timing_parser(self.rx_timing_parser)
            .named(self.id())
    }
}
