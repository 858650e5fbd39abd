//! Media file registry
//!
//! Maps a format tag (`i1080p60`, `PCM24`) to the media file used as the
//! transmit source for that format. The registry is built once from the
//! built-in table, optionally extended from the configuration file, and
//! then passed around by reference.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::common::{Error, Result};

/// A raw video file and the pixel group format it is stored in
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VideoFile {
    /// Pixel group format tag passed to RxTxApp (`YUV_422_10bit`)
    pub format: String,
    /// On-disk layout of the file
    pub file_format: String,
    pub filename: String,
    pub width: u32,
    pub height: u32,
    /// Frame rate tag (`p60`)
    pub fps: String,
}

/// A raw PCM audio file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AudioFile {
    /// Audio format tag passed to RxTxApp (`PCM24`)
    pub format: String,
    pub filename: String,
}

/// Format tag to media file lookup tables
///
/// Serializes to the same `yuv_files` / `audio_files` tables the
/// configuration file uses for overrides.
#[derive(Debug, Clone, Default, Serialize)]
pub struct MediaRegistry {
    yuv_files: BTreeMap<String, VideoFile>,
    audio_files: BTreeMap<String, AudioFile>,
}

fn video_entry(width: u32, height: u32, rate: &str) -> VideoFile {
    VideoFile {
        format: "YUV_422_10bit".to_string(),
        file_format: "YUV422RFC4175PG2BE10".to_string(),
        filename: format!("Pedestrian_{}x{}_10bit_{}Hz_P422.yuv", width, height, rate),
        width,
        height,
        fps: format!("p{}", rate),
    }
}

fn audio_entry(format: &str, bits: u32) -> AudioFile {
    AudioFile {
        format: format.to_string(),
        filename: format!("voice_{}b_48k_2ch.pcm", bits),
    }
}

impl MediaRegistry {
    /// The registry shipped with the harness
    pub fn builtin() -> Self {
        let mut yuv_files = BTreeMap::new();
        for (width, height, rates) in [
            (1280, 720, &["25", "29", "30", "50", "59", "60"][..]),
            (1920, 1080, &["25", "29", "30", "50", "59", "60", "100", "120"][..]),
            (3840, 2160, &["25", "29", "30", "50", "59", "60"][..]),
        ] {
            for rate in rates {
                yuv_files.insert(format!("i{}p{}", height, rate), video_entry(width, height, rate));
            }
        }

        let audio_files = [("PCM8", 8), ("PCM16", 16), ("PCM24", 24)]
            .into_iter()
            .map(|(format, bits)| (format.to_string(), audio_entry(format, bits)))
            .collect();

        Self {
            yuv_files,
            audio_files,
        }
    }

    /// Add or replace entries, typically from the configuration file
    pub fn merge(
        &mut self,
        yuv_files: &BTreeMap<String, VideoFile>,
        audio_files: &BTreeMap<String, AudioFile>,
    ) {
        for (key, file) in yuv_files {
            tracing::debug!(key = %key, filename = %file.filename, "Overriding video media entry");
            self.yuv_files.insert(key.clone(), file.clone());
        }
        for (key, file) in audio_files {
            tracing::debug!(key = %key, filename = %file.filename, "Overriding audio media entry");
            self.audio_files.insert(key.clone(), file.clone());
        }
    }

    /// Look up the video file for a format tag
    pub fn yuv_file(&self, video_format: &str) -> Result<&VideoFile> {
        self.yuv_files.get(video_format).ok_or_else(|| {
            let known: Vec<&str> = self.yuv_files.keys().map(String::as_str).collect();
            Error::unknown_media_format("yuv_files", video_format, &known)
        })
    }

    /// Look up the audio file for a format tag
    pub fn audio_file(&self, audio_format: &str) -> Result<&AudioFile> {
        self.audio_files.get(audio_format).ok_or_else(|| {
            let known: Vec<&str> = self.audio_files.keys().map(String::as_str).collect();
            Error::unknown_media_format("audio_files", audio_format, &known)
        })
    }

    pub fn yuv_files(&self) -> impl Iterator<Item = (&String, &VideoFile)> {
        self.yuv_files.iter()
    }

    pub fn audio_files(&self) -> impl Iterator<Item = (&String, &AudioFile)> {
        self.audio_files.iter()
    }
}

/// Full path of a registry file inside the media directory
pub fn media_path(media: &Path, filename: &str) -> PathBuf {
    media.join(filename)
}
