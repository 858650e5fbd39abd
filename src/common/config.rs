//! Configuration file handling

use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::Ipv4Addr;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::paths::config_path;
use super::Result;
use crate::media::{AudioFile, VideoFile};

/// Main configuration structure
#[derive(Debug, Deserialize, Default)]
pub struct Config {
    /// Harness environment (the values test cases receive as fixtures)
    #[serde(default)]
    pub env: EnvConfig,

    /// RxTxApp launch settings
    #[serde(default)]
    pub rxtxapp: RxTxAppConfig,

    /// Addresses and ports written into generated session configs
    #[serde(default)]
    pub network: NetworkConfig,

    /// Timeout settings
    #[serde(default)]
    pub timeouts: Timeouts,

    /// RX timing checks
    #[serde(default)]
    pub timing: TimingConfig,

    /// Extra or replacement entries for the video media registry
    #[serde(default)]
    pub yuv_files: BTreeMap<String, VideoFile>,

    /// Extra or replacement entries for the audio media registry
    #[serde(default)]
    pub audio_files: BTreeMap<String, AudioFile>,
}

/// Harness environment
#[derive(Debug, Deserialize, Clone)]
pub struct EnvConfig {
    /// Root of the media transport library build
    pub build: Option<PathBuf>,

    /// Directory containing the media files named in the registry
    pub media: Option<PathBuf>,

    /// NIC ports handed to every session (first transmits, second receives)
    #[serde(default)]
    pub nic_port_list: Vec<String>,

    /// How long RxTxApp runs per test case, in seconds
    #[serde(default = "default_test_time")]
    pub test_time: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            build: None,
            media: None,
            nic_port_list: Vec::new(),
            test_time: default_test_time(),
        }
    }
}

fn default_test_time() -> u64 {
    30
}

/// RxTxApp launch settings
#[derive(Debug, Deserialize, Clone)]
pub struct RxTxAppConfig {
    /// Explicit path to the RxTxApp binary (skips the build tree search)
    pub binary: Option<PathBuf>,

    /// Additional arguments appended to every invocation
    #[serde(default)]
    pub extra_args: Vec<String>,

    /// Save captured RxTxApp output to the log directory
    #[serde(default = "default_log_output")]
    pub log_output: bool,
}

impl Default for RxTxAppConfig {
    fn default() -> Self {
        Self {
            binary: None,
            extra_args: Vec::new(),
            log_output: default_log_output(),
        }
    }
}

fn default_log_output() -> bool {
    true
}

/// Addresses, ports and payload types used when rendering sessions
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct NetworkConfig {
    /// IP of the first (transmitting) interface
    #[serde(default = "default_tx_ip")]
    pub tx_ip: Ipv4Addr,

    /// IP of the second (receiving) interface
    #[serde(default = "default_rx_ip")]
    pub rx_ip: Ipv4Addr,

    /// Multicast group for multicast sessions
    #[serde(default = "default_multicast_ip")]
    pub multicast_ip: Ipv4Addr,

    /// UDP port of the first video session
    #[serde(default = "default_video_start_port")]
    pub video_start_port: u16,

    /// UDP port of the first st30p session
    #[serde(default = "default_audio_start_port")]
    pub audio_start_port: u16,

    /// RTP payload type of video sessions
    #[serde(default = "default_video_payload_type")]
    pub video_payload_type: u8,

    /// RTP payload type of st30p sessions
    #[serde(default = "default_audio_payload_type")]
    pub audio_payload_type: u8,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            tx_ip: default_tx_ip(),
            rx_ip: default_rx_ip(),
            multicast_ip: default_multicast_ip(),
            video_start_port: default_video_start_port(),
            audio_start_port: default_audio_start_port(),
            video_payload_type: default_video_payload_type(),
            audio_payload_type: default_audio_payload_type(),
        }
    }
}

fn default_tx_ip() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 17, 101)
}
fn default_rx_ip() -> Ipv4Addr {
    Ipv4Addr::new(192, 168, 17, 102)
}
fn default_multicast_ip() -> Ipv4Addr {
    Ipv4Addr::new(239, 168, 85, 20)
}
fn default_video_start_port() -> u16 {
    20000
}
fn default_audio_start_port() -> u16 {
    30000
}
fn default_video_payload_type() -> u8 {
    112
}
fn default_audio_payload_type() -> u8 {
    111
}

/// Timeout settings in seconds
#[derive(Debug, Deserialize, Clone)]
pub struct Timeouts {
    /// Grace period on top of the test time before RxTxApp is torn down
    #[serde(default = "default_process_margin")]
    pub process_margin_secs: u64,

    /// Time between SIGINT and SIGKILL during teardown
    #[serde(default = "default_teardown_grace")]
    pub teardown_grace_secs: u64,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            process_margin_secs: default_process_margin(),
            teardown_grace_secs: default_teardown_grace(),
        }
    }
}

impl Timeouts {
    pub fn process_margin(&self) -> Duration {
        Duration::from_secs(self.process_margin_secs)
    }

    pub fn teardown_grace(&self) -> Duration {
        Duration::from_secs(self.teardown_grace_secs)
    }
}

fn default_process_margin() -> u64 {
    60
}
fn default_teardown_grace() -> u64 {
    5
}

/// RX timing check settings
#[derive(Debug, Deserialize, Clone)]
pub struct TimingConfig {
    /// Allowed deviation of the measured RX frame rate from nominal, in percent
    #[serde(default = "default_fps_tolerance")]
    pub fps_tolerance_pct: f64,
}

impl Default for TimingConfig {
    fn default() -> Self {
        Self {
            fps_tolerance_pct: default_fps_tolerance(),
        }
    }
}

fn default_fps_tolerance() -> f64 {
    5.0
}

impl Config {
    /// Load configuration from the default config file
    ///
    /// Returns default configuration if file doesn't exist
    pub fn load() -> Result<Self> {
        if let Some(path) = config_path() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }
        Ok(Self::default())
    }

    /// Load configuration from an explicit file, which must exist
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| super::Error::FileRead {
            path: path.display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse configuration from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| super::Error::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.env.test_time == 0 {
            return Err(super::Error::Config("env.test_time must be positive".to_string()));
        }
        if !(self.timing.fps_tolerance_pct > 0.0 && self.timing.fps_tolerance_pct < 100.0) {
            return Err(super::Error::Config(format!(
                "timing.fps_tolerance_pct must be between 0 and 100, got {}",
                self.timing.fps_tolerance_pct
            )));
        }
        Ok(())
    }
}
