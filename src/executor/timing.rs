//! RX timing checks
//!
//! Applied when a run was started with the RX timing parser. Each RX video
//! session must have a compliance summary with no failed frames, and its
//! measured frame rate must stay close to the nominal rate of its format.

use super::output::{Direction, RunOutput, SessionId};
use crate::common::{Error, Result};
use crate::session::{Configuration, Session, SessionKind};

/// Timing figures for one RX video session that passed the checks
#[derive(Debug, Clone, PartialEq)]
pub struct TimingSummary {
    pub index: usize,
    pub video_format: String,
    pub expected_fps: f64,
    pub observed_fps: f64,
    pub compliant_frames: u64,
}

/// Check every RX video session against its format's real-time constraints
pub fn check_rx_timing(
    config: &Configuration,
    output: &RunOutput,
    fps_tolerance_pct: f64,
) -> Result<Vec<TimingSummary>> {
    let mut summaries = Vec::new();

    let videos = config.rxtxapp_order().into_iter().filter_map(|session| match session {
        Session::Video(video) => Some(video),
        Session::St30p(_) => None,
    });

    for (index, video) in videos.enumerate() {
        let id = SessionId {
            direction: Direction::Rx,
            kind: SessionKind::Video,
            index,
        };
        let session = id.to_string();

        let dump = output.timing(index).ok_or_else(|| {
            Error::timing_violation(&session, "an RX timing summary".into(), "none".into())
        })?;

        if dump.failed > 0 {
            return Err(Error::timing_violation(
                &session,
                "0 non-compliant frames".into(),
                format!(
                    "{} non-compliant (narrow {}, wide {})",
                    dump.failed, dump.narrow, dump.wide
                ),
            ));
        }
        if dump.compliant() == 0 {
            return Err(Error::timing_violation(
                &session,
                "at least 1 compliant frame".into(),
                "0".into(),
            ));
        }

        let expected_fps = video.video_format.fps();
        let observed_fps = output.result(id).and_then(|r| r.fps).ok_or_else(|| {
            Error::timing_violation(
                &session,
                format!("{:.2} fps", expected_fps),
                "no fps reported".into(),
            )
        })?;

        let deviation_pct = (observed_fps - expected_fps).abs() / expected_fps * 100.0;
        if deviation_pct > fps_tolerance_pct {
            return Err(Error::timing_violation(
                &session,
                format!(
                    "{:.2} fps ({}) within {}%",
                    expected_fps, video.video_format, fps_tolerance_pct
                ),
                format!("{:.2} fps", observed_fps),
            ));
        }

        tracing::info!(
            session = %session,
            format = %video.video_format,
            expected_fps,
            observed_fps,
            narrow = dump.narrow,
            wide = dump.wide,
            "RX timing compliant"
        );

        summaries.push(TimingSummary {
            index,
            video_format: video.video_format.to_string(),
            expected_fps,
            observed_fps,
            compliant_frames: dump.compliant(),
        });
    }

    Ok(summaries)
}
