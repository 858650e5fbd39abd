//! Session descriptors
//!
//! A descriptor holds everything needed to configure one media stream on
//! both ends: RxTxApp runs the transmitter on the first NIC port and the
//! receiver on the second.

use std::path::{Path, PathBuf};

use super::format::{
    AudioChannel, AudioFormat, AudioPtime, AudioSampling, PgFormat, TestMode, TransportType,
    VideoFormat,
};
use crate::common::{Error, Result};

/// Number of NIC ports a loopback session occupies (one tx, one rx)
pub const PORTS_PER_SESSION: usize = 2;

/// An ST 2110-20 video session
#[derive(Debug, Clone, PartialEq)]
pub struct VideoSession {
    pub nic_port_list: Vec<String>,
    pub test_mode: TestMode,
    pub transport: TransportType,
    pub video_format: VideoFormat,
    pub pg_format: PgFormat,
    pub video_url: PathBuf,
}

/// An ST 2110-30 audio session using the pipeline (st30p) API
#[derive(Debug, Clone, PartialEq)]
pub struct St30pSession {
    pub nic_port_list: Vec<String>,
    pub test_mode: TestMode,
    pub audio_format: AudioFormat,
    pub audio_channel: Vec<AudioChannel>,
    pub audio_sampling: AudioSampling,
    pub audio_ptime: AudioPtime,
    pub filename: PathBuf,
}

impl St30pSession {
    /// Total number of audio channels across the channel layout
    pub fn channel_count(&self) -> u32 {
        self.audio_channel.iter().map(AudioChannel::channel_count).sum()
    }
}

/// Kind of session, used to index RxTxApp's per-kind result lines
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum SessionKind {
    Video,
    St30p,
}

impl SessionKind {
    /// The key RxTxApp uses for this kind, both in config groups and in
    /// its result lines
    pub fn as_str(&self) -> &'static str {
        match self {
            SessionKind::Video => "video",
            SessionKind::St30p => "st30p",
        }
    }
}

/// One session descriptor in a configuration
#[derive(Debug, Clone, PartialEq)]
pub enum Session {
    Video(VideoSession),
    St30p(St30pSession),
}

impl Session {
    pub fn kind(&self) -> SessionKind {
        match self {
            Session::Video(_) => SessionKind::Video,
            Session::St30p(_) => SessionKind::St30p,
        }
    }

    pub fn nic_port_list(&self) -> &[String] {
        match self {
            Session::Video(v) => &v.nic_port_list,
            Session::St30p(a) => &a.nic_port_list,
        }
    }

    pub fn test_mode(&self) -> TestMode {
        match self {
            Session::Video(v) => v.test_mode,
            Session::St30p(a) => a.test_mode,
        }
    }

    /// Source media file the transmitter reads
    pub fn media_path(&self) -> &Path {
        match self {
            Session::Video(v) => &v.video_url,
            Session::St30p(a) => &a.filename,
        }
    }

    /// Check the port list can carry a loopback session
    pub(crate) fn check_ports(nic_port_list: &[String]) -> Result<()> {
        if nic_port_list.len() < PORTS_PER_SESSION {
            return Err(Error::NotEnoughPorts {
                required: PORTS_PER_SESSION,
                available: nic_port_list.len(),
            });
        }
        if nic_port_list[0] == nic_port_list[1] {
            return Err(Error::invalid_parameter("nic_port_list", &nic_port_list.join(",")));
        }
        Ok(())
    }
}
