//! RxTxApp output parsing
//!
//! RxTxApp prints one result line per session when it shuts down, e.g.
//!
//! ```text
//! MT: 2024-05-10 10:01:22, app_rx_video_result(0), OK, fps 59.98, 1799 frames received
//! MT: 2024-05-10 10:01:22, app_tx_st30p_result(0), FAILED, fps 0.00, 0 frames sent
//! ```
//!
//! and, with `--rx_timing_parser`, one compliance summary per RX video
//! session:
//!
//! ```text
//! rx_video_tp_dump(0), COMPLIANT NARROW 1790 WIDE 9 FAILED 0
//! ```

use std::fmt;

use crate::common::{Error, Result};
use crate::session::{Configuration, SessionKind};

macro_rules! regex {
    ($re:literal $(,)?) => {{
        static RE: std::sync::OnceLock<regex::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex::Regex::new($re).unwrap())
    }};
}

/// Which end of a session a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Tx,
    Rx,
}

impl Direction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Tx => "tx",
            Direction::Rx => "rx",
        }
    }
}

/// Identifies one end of one session, e.g. `rx video 0`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionId {
    pub direction: Direction,
    pub kind: SessionKind,
    pub index: usize,
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.direction.as_str(), self.kind.as_str(), self.index)
    }
}

/// A parsed `app_*_result` line
#[derive(Debug, Clone, PartialEq)]
pub struct SessionResult {
    pub id: SessionId,
    pub ok: bool,
    pub fps: Option<f64>,
    pub frames: Option<u64>,
    pub line: String,
}

/// A parsed `rx_video_tp_dump` line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimingDump {
    pub index: usize,
    pub narrow: u64,
    pub wide: u64,
    pub failed: u64,
}

impl TimingDump {
    pub fn compliant(&self) -> u64 {
        self.narrow + self.wide
    }
}

/// Everything the harness extracted from one RxTxApp run
#[derive(Debug, Clone, Default)]
pub struct RunOutput {
    pub results: Vec<SessionResult>,
    pub timing: Vec<TimingDump>,
}

impl RunOutput {
    /// Parse captured output lines; unrelated lines are ignored
    pub fn parse<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut output = Self::default();
        for line in lines {
            let line = line.as_ref();
            if let Some(result) = parse_result_line(line) {
                output.results.push(result);
            } else if let Some(dump) = parse_timing_line(line) {
                output.timing.push(dump);
            }
        }
        output
    }

    /// Last reported result for a session end (RxTxApp may repeat lines)
    pub fn result(&self, id: SessionId) -> Option<&SessionResult> {
        self.results.iter().rev().find(|r| r.id == id)
    }

    /// Last timing summary for an RX video session
    pub fn timing(&self, index: usize) -> Option<&TimingDump> {
        self.timing.iter().rev().find(|t| t.index == index)
    }
}

fn parse_result_line(line: &str) -> Option<SessionResult> {
    let re = regex!(
        r"app_(tx|rx)_(video|st30p)_result\((\d+)\),\s*(OK|FAILED)(?:,\s*fps\s+([0-9]+(?:\.[0-9]+)?))?(?:,\s*(\d+)\s+frames?)?"
    );
    let caps = re.captures(line)?;

    let direction = match &caps[1] {
        "tx" => Direction::Tx,
        _ => Direction::Rx,
    };
    let kind = match &caps[2] {
        "video" => SessionKind::Video,
        _ => SessionKind::St30p,
    };

    Some(SessionResult {
        id: SessionId {
            direction,
            kind,
            index: caps[3].parse().ok()?,
        },
        ok: &caps[4] == "OK",
        fps: caps.get(5).and_then(|m| m.as_str().parse().ok()),
        frames: caps.get(6).and_then(|m| m.as_str().parse().ok()),
        line: line.trim().to_string(),
    })
}

fn parse_timing_line(line: &str) -> Option<TimingDump> {
    let re = regex!(
        r"rx_video_tp_dump\((\d+)\),\s*COMPLIANT\s+NARROW\s+(\d+)\s+WIDE\s+(\d+)\s+FAILED\s+(\d+)"
    );
    let caps = re.captures(line)?;
    Some(TimingDump {
        index: caps[1].parse().ok()?,
        narrow: caps[2].parse().ok()?,
        wide: caps[3].parse().ok()?,
        failed: caps[4].parse().ok()?,
    })
}

/// Every session end the configuration launches, in report order
pub fn expected_sessions(config: &Configuration) -> Vec<SessionId> {
    let mut ids = Vec::new();
    for kind in [SessionKind::Video, SessionKind::St30p] {
        for index in 0..config.count(kind) {
            for direction in [Direction::Tx, Direction::Rx] {
                ids.push(SessionId {
                    direction,
                    kind,
                    index,
                });
            }
        }
    }
    ids
}

/// Liveness check: every session end reported a result and none failed
pub fn check_results(config: &Configuration, output: &RunOutput) -> Result<()> {
    for id in expected_sessions(config) {
        match output.result(id) {
            None => {
                return Err(Error::session_failed(&id.to_string(), "no result reported"));
            }
            Some(result) if !result.ok => {
                return Err(Error::session_failed(&id.to_string(), &result.line));
            }
            Some(result) => {
                tracing::debug!(session = %id, fps = ?result.fps, frames = ?result.frames, "Session OK");
            }
        }
    }
    Ok(())
}
