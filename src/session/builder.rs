//! Configuration accumulation
//!
//! A [`Configuration`] starts empty and grows by value: every `add_*`
//! function consumes the configuration and hands back the extended one, so
//! a test reads as a straight chain of rebindings.

use std::path::Path;

use super::descriptor::{Session, SessionKind, St30pSession, VideoSession};
use super::format::{AudioChannel, AudioFormat, AudioPtime, AudioSampling, PgFormat, VideoFormat};
use crate::common::{Error, Result};

/// An ordered collection of session descriptors
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Configuration {
    sessions: Vec<Session>,
}

impl Configuration {
    pub fn sessions(&self) -> &[Session] {
        &self.sessions
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Video sessions in insertion order
    pub fn video_sessions(&self) -> impl Iterator<Item = &VideoSession> {
        self.sessions.iter().filter_map(|s| match s {
            Session::Video(v) => Some(v),
            _ => None,
        })
    }

    /// st30p sessions in insertion order
    pub fn st30p_sessions(&self) -> impl Iterator<Item = &St30pSession> {
        self.sessions.iter().filter_map(|s| match s {
            Session::St30p(a) => Some(a),
            _ => None,
        })
    }

    /// Number of sessions of the given kind
    pub fn count(&self, kind: SessionKind) -> usize {
        self.sessions.iter().filter(|s| s.kind() == kind).count()
    }

    /// Append an already-validated video session
    pub fn with_video(mut self, session: VideoSession) -> Result<Self> {
        Session::check_ports(&session.nic_port_list)?;
        self.sessions.push(Session::Video(session));
        Ok(self)
    }

    /// Append an already-validated st30p session
    pub fn with_st30p(mut self, session: St30pSession) -> Result<Self> {
        Session::check_ports(&session.nic_port_list)?;
        if session.audio_channel.is_empty() {
            return Err(Error::invalid_parameter("audio_channel", "[]"));
        }
        self.sessions.push(Session::St30p(session));
        Ok(self)
    }
}

/// Create a configuration with no sessions
pub fn create_empty_config() -> Configuration {
    Configuration::default()
}

/// Append one video session built from RxTxApp string tags
///
/// Tags are validated here; the media file is only checked when the
/// configuration is executed.
pub fn add_video_sessions<S: AsRef<str>>(
    config: Configuration,
    nic_port_list: &[S],
    test_mode: &str,
    type_: &str,
    video_format: &str,
    pg_format: &str,
    video_url: impl AsRef<Path>,
) -> Result<Configuration> {
    let session = VideoSession {
        nic_port_list: nic_port_list.iter().map(|p| p.as_ref().to_string()).collect(),
        test_mode: test_mode.parse()?,
        transport: type_.parse()?,
        video_format: video_format.parse::<VideoFormat>()?,
        pg_format: pg_format.parse::<PgFormat>()?,
        video_url: video_url.as_ref().to_path_buf(),
    };
    tracing::debug!(
        video_format = %session.video_format,
        pg_format = session.pg_format.as_str(),
        mode = session.test_mode.as_str(),
        "Adding video session"
    );
    config.with_video(session)
}

/// Append one st30p audio session built from RxTxApp string tags
#[allow(clippy::too_many_arguments)]
pub fn add_st30p_sessions<S: AsRef<str>, C: AsRef<str>>(
    config: Configuration,
    nic_port_list: &[S],
    test_mode: &str,
    audio_format: &str,
    audio_channel: &[C],
    audio_sampling: &str,
    audio_ptime: &str,
    filename: impl AsRef<Path>,
) -> Result<Configuration> {
    let session = St30pSession {
        nic_port_list: nic_port_list.iter().map(|p| p.as_ref().to_string()).collect(),
        test_mode: test_mode.parse()?,
        audio_format: audio_format.parse::<AudioFormat>()?,
        audio_channel: audio_channel
            .iter()
            .map(|c| c.as_ref().parse::<AudioChannel>())
            .collect::<Result<Vec<_>>>()?,
        audio_sampling: audio_sampling.parse::<AudioSampling>()?,
        audio_ptime: audio_ptime.parse::<AudioPtime>()?,
        filename: filename.as_ref().to_path_buf(),
    };
    tracing::debug!(
        audio_format = session.audio_format.as_str(),
        channels = session.channel_count(),
        mode = session.test_mode.as_str(),
        "Adding st30p session"
    );
    config.with_st30p(session)
}
