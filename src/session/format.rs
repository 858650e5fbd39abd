//! Format tags understood by RxTxApp
//!
//! Each type parses from and prints as the exact string tag RxTxApp reads
//! from its JSON configuration, so a parsed value always round-trips to a
//! tag the application accepts.

use std::fmt;
use std::str::FromStr;

use crate::common::{Error, Result};

/// How a session is addressed on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TestMode {
    Unicast,
    Multicast,
}

impl TestMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TestMode::Unicast => "unicast",
            TestMode::Multicast => "multicast",
        }
    }
}

impl FromStr for TestMode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "unicast" => Ok(TestMode::Unicast),
            "multicast" => Ok(TestMode::Multicast),
            _ => Err(Error::invalid_parameter("test_mode", s)),
        }
    }
}

/// Video transport granularity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportType {
    Frame,
    Rtp,
    Slice,
}

impl TransportType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransportType::Frame => "frame",
            TransportType::Rtp => "rtp",
            TransportType::Slice => "slice",
        }
    }
}

impl FromStr for TransportType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "frame" => Ok(TransportType::Frame),
            "rtp" => Ok(TransportType::Rtp),
            "slice" => Ok(TransportType::Slice),
            _ => Err(Error::invalid_parameter("type", s)),
        }
    }
}

/// Nominal frame rate of a video format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameRate {
    P23_98,
    P24,
    P25,
    P29_97,
    P30,
    P50,
    P59_94,
    P60,
    P100,
    P119_88,
    P120,
}

impl FrameRate {
    /// The rate suffix used in format tags (`59` for 59.94, `60` for 60)
    pub fn tag(&self) -> &'static str {
        match self {
            FrameRate::P23_98 => "23",
            FrameRate::P24 => "24",
            FrameRate::P25 => "25",
            FrameRate::P29_97 => "29",
            FrameRate::P30 => "30",
            FrameRate::P50 => "50",
            FrameRate::P59_94 => "59",
            FrameRate::P60 => "60",
            FrameRate::P100 => "100",
            FrameRate::P119_88 => "119",
            FrameRate::P120 => "120",
        }
    }

    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "23" => FrameRate::P23_98,
            "24" => FrameRate::P24,
            "25" => FrameRate::P25,
            "29" => FrameRate::P29_97,
            "30" => FrameRate::P30,
            "50" => FrameRate::P50,
            "59" => FrameRate::P59_94,
            "60" => FrameRate::P60,
            "100" => FrameRate::P100,
            "119" => FrameRate::P119_88,
            "120" => FrameRate::P120,
            _ => return None,
        })
    }

    /// Rate as a rational number of frames per second
    pub fn ratio(&self) -> (u32, u32) {
        match self {
            FrameRate::P23_98 => (24000, 1001),
            FrameRate::P24 => (24, 1),
            FrameRate::P25 => (25, 1),
            FrameRate::P29_97 => (30000, 1001),
            FrameRate::P30 => (30, 1),
            FrameRate::P50 => (50, 1),
            FrameRate::P59_94 => (60000, 1001),
            FrameRate::P60 => (60, 1),
            FrameRate::P100 => (100, 1),
            FrameRate::P119_88 => (120000, 1001),
            FrameRate::P120 => (120, 1),
        }
    }

    pub fn fps(&self) -> f64 {
        let (num, den) = self.ratio();
        num as f64 / den as f64
    }

    /// Duration of one frame in nanoseconds
    pub fn frame_period_ns(&self) -> f64 {
        let (num, den) = self.ratio();
        1_000_000_000.0 * den as f64 / num as f64
    }
}

/// A video format tag such as `i1080p60` or `i1080i59`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VideoFormat {
    pub height: u32,
    pub interlaced: bool,
    pub rate: FrameRate,
}

impl VideoFormat {
    pub fn width(&self) -> u32 {
        match self.height {
            480 | 576 => 720,
            720 => 1280,
            1080 => 1920,
            2160 => 3840,
            _ => 7680,
        }
    }

    pub fn fps(&self) -> f64 {
        self.rate.fps()
    }

    fn is_supported(height: u32, interlaced: bool, rate: FrameRate) -> bool {
        if interlaced {
            matches!(
                (height, rate),
                (1080, FrameRate::P50)
                    | (1080, FrameRate::P59_94)
                    | (480, FrameRate::P59_94)
                    | (576, FrameRate::P50)
            )
        } else {
            matches!(height, 720 | 1080 | 2160 | 4320)
        }
    }
}

impl fmt::Display for VideoFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let scan = if self.interlaced { 'i' } else { 'p' };
        write!(f, "i{}{}{}", self.height, scan, self.rate.tag())
    }
}

impl FromStr for VideoFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::invalid_parameter("video_format", s);

        let body = s.strip_prefix('i').ok_or_else(invalid)?;
        let scan_pos = body.find(['p', 'i']).ok_or_else(invalid)?;
        let (height, rest) = body.split_at(scan_pos);
        let interlaced = rest.starts_with('i');

        let height: u32 = height.parse().map_err(|_| invalid())?;
        let rate = FrameRate::from_tag(&rest[1..]).ok_or_else(invalid)?;

        if !Self::is_supported(height, interlaced, rate) {
            return Err(invalid());
        }

        Ok(Self {
            height,
            interlaced,
            rate,
        })
    }
}

/// Pixel group format of a video session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PgFormat {
    Yuv422_8bit,
    Yuv422_10bit,
    Yuv422_12bit,
    Yuv422_16bit,
    Yuv420_8bit,
    Yuv420_10bit,
    Yuv420_12bit,
    Rgb8bit,
    Rgb10bit,
    Rgb12bit,
    Rgb16bit,
}

impl PgFormat {
    pub const ALL: [PgFormat; 11] = [
        PgFormat::Yuv422_8bit,
        PgFormat::Yuv422_10bit,
        PgFormat::Yuv422_12bit,
        PgFormat::Yuv422_16bit,
        PgFormat::Yuv420_8bit,
        PgFormat::Yuv420_10bit,
        PgFormat::Yuv420_12bit,
        PgFormat::Rgb8bit,
        PgFormat::Rgb10bit,
        PgFormat::Rgb12bit,
        PgFormat::Rgb16bit,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PgFormat::Yuv422_8bit => "YUV_422_8bit",
            PgFormat::Yuv422_10bit => "YUV_422_10bit",
            PgFormat::Yuv422_12bit => "YUV_422_12bit",
            PgFormat::Yuv422_16bit => "YUV_422_16bit",
            PgFormat::Yuv420_8bit => "YUV_420_8bit",
            PgFormat::Yuv420_10bit => "YUV_420_10bit",
            PgFormat::Yuv420_12bit => "YUV_420_12bit",
            PgFormat::Rgb8bit => "RGB_8bit",
            PgFormat::Rgb10bit => "RGB_10bit",
            PgFormat::Rgb12bit => "RGB_12bit",
            PgFormat::Rgb16bit => "RGB_16bit",
        }
    }
}

impl FromStr for PgFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|f| f.as_str() == s)
            .ok_or_else(|| Error::invalid_parameter("pg_format", s))
    }
}

/// PCM sample encoding of an st30p session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Pcm8,
    Pcm16,
    Pcm24,
    Am824,
}

impl AudioFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Pcm8 => "PCM8",
            AudioFormat::Pcm16 => "PCM16",
            AudioFormat::Pcm24 => "PCM24",
            AudioFormat::Am824 => "AM824",
        }
    }

    pub fn bytes_per_sample(&self) -> usize {
        match self {
            AudioFormat::Pcm8 => 1,
            AudioFormat::Pcm16 => 2,
            AudioFormat::Pcm24 => 3,
            AudioFormat::Am824 => 4,
        }
    }
}

impl FromStr for AudioFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "PCM8" => Ok(AudioFormat::Pcm8),
            "PCM16" => Ok(AudioFormat::Pcm16),
            "PCM24" => Ok(AudioFormat::Pcm24),
            "AM824" => Ok(AudioFormat::Am824),
            _ => Err(Error::invalid_parameter("audio_format", s)),
        }
    }
}

/// One entry of an st30p channel layout
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AudioChannel {
    /// Mono
    M,
    /// Dual mono
    Dm,
    /// Standard stereo
    St,
    /// Matrix stereo
    LtRt,
    /// AES3 transparent pair
    Aes3,
    /// 5.1 surround
    S51,
    /// 7.1 surround
    S71,
    /// 22.2 surround
    S222,
    /// SDI audio group
    Sgrp,
    /// Undefined grouping of 1..=64 channels (`U01`..`U64`)
    Undefined(u8),
}

impl AudioChannel {
    pub fn channel_count(&self) -> u32 {
        match self {
            AudioChannel::M => 1,
            AudioChannel::Dm | AudioChannel::St | AudioChannel::LtRt | AudioChannel::Aes3 => 2,
            AudioChannel::S51 => 6,
            AudioChannel::S71 => 8,
            AudioChannel::S222 => 24,
            AudioChannel::Sgrp => 4,
            AudioChannel::Undefined(n) => *n as u32,
        }
    }
}

impl fmt::Display for AudioChannel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AudioChannel::M => f.write_str("M"),
            AudioChannel::Dm => f.write_str("DM"),
            AudioChannel::St => f.write_str("ST"),
            AudioChannel::LtRt => f.write_str("LtRt"),
            AudioChannel::Aes3 => f.write_str("AES3"),
            AudioChannel::S51 => f.write_str("51"),
            AudioChannel::S71 => f.write_str("71"),
            AudioChannel::S222 => f.write_str("222"),
            AudioChannel::Sgrp => f.write_str("SGRP"),
            AudioChannel::Undefined(n) => write!(f, "U{:02}", n),
        }
    }
}

impl FromStr for AudioChannel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Ok(match s {
            "M" => AudioChannel::M,
            "DM" => AudioChannel::Dm,
            "ST" => AudioChannel::St,
            "LtRt" => AudioChannel::LtRt,
            "AES3" => AudioChannel::Aes3,
            "51" => AudioChannel::S51,
            "71" => AudioChannel::S71,
            "222" => AudioChannel::S222,
            "SGRP" => AudioChannel::Sgrp,
            _ => {
                // Exactly two digits after the U, value 1..=64
                let digits = s
                    .strip_prefix('U')
                    .filter(|d| d.len() == 2 && d.bytes().all(|b| b.is_ascii_digit()))
                    .ok_or_else(|| Error::invalid_parameter("audio_channel", s))?;
                match digits.parse::<u8>() {
                    Ok(n @ 1..=64) => AudioChannel::Undefined(n),
                    _ => return Err(Error::invalid_parameter("audio_channel", s)),
                }
            }
        })
    }
}

/// Audio sampling rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioSampling {
    S48k,
    S96k,
    S44_1k,
}

impl AudioSampling {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioSampling::S48k => "48kHz",
            AudioSampling::S96k => "96kHz",
            AudioSampling::S44_1k => "44.1kHz",
        }
    }

    pub fn hz(&self) -> u32 {
        match self {
            AudioSampling::S48k => 48_000,
            AudioSampling::S96k => 96_000,
            AudioSampling::S44_1k => 44_100,
        }
    }
}

impl FromStr for AudioSampling {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "48kHz" => Ok(AudioSampling::S48k),
            "96kHz" => Ok(AudioSampling::S96k),
            "44.1kHz" => Ok(AudioSampling::S44_1k),
            _ => Err(Error::invalid_parameter("audio_sampling", s)),
        }
    }
}

/// Audio packet time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioPtime {
    /// 1 ms
    P1ms,
    /// 125 us
    P125us,
    /// 80 us
    P80us,
    /// 1.09 ms (44.1kHz)
    P1_09ms,
    /// 0.14 ms (44.1kHz)
    P0_14ms,
    /// 0.09 ms (44.1kHz)
    P0_09ms,
}

impl AudioPtime {
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioPtime::P1ms => "1",
            AudioPtime::P125us => "0.12",
            AudioPtime::P80us => "0.08",
            AudioPtime::P1_09ms => "1.09",
            AudioPtime::P0_14ms => "0.14",
            AudioPtime::P0_09ms => "0.09",
        }
    }
}

impl FromStr for AudioPtime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "1" => Ok(AudioPtime::P1ms),
            "0.12" => Ok(AudioPtime::P125us),
            "0.08" => Ok(AudioPtime::P80us),
            "1.09" => Ok(AudioPtime::P1_09ms),
            "0.14" => Ok(AudioPtime::P0_14ms),
            "0.09" => Ok(AudioPtime::P0_09ms),
            _ => Err(Error::invalid_parameter("audio_ptime", s)),
        }
    }
}
