//! Built-in validation cases
//!
//! The table the harness runs by default. Each definition expands to one
//! case per format tag, and every tag must be present in the built-in media
//! registry.

use super::config::{SessionTemplate, TestCase, TestCaseDef};

/// Video formats covered by the RX timing test
pub const RX_TIMING_VIDEO_FORMATS: [&str; 7] = [
    "i1080p25", "i1080p30", "i1080p50", "i1080p60", "i1080p100", "i1080p120", "i2160p60",
];

/// Audio formats covered by the st30p multicast test
pub const ST30P_MULTICAST_FORMATS: [&str; 3] = ["PCM8", "PCM16", "PCM24"];

/// The built-in case definitions
pub fn builtin_definitions() -> Vec<TestCaseDef> {
    vec![
        TestCaseDef {
            name: "test_rx_timing_video_video_format".to_string(),
            description: Some("RX timing compliance of a multicast frame session".to_string()),
            formats: RX_TIMING_VIDEO_FORMATS.iter().map(|f| f.to_string()).collect(),
            rx_timing_parser: true,
            session: SessionTemplate::Video {
                test_mode: "multicast".to_string(),
                type_: "frame".to_string(),
            },
        },
        TestCaseDef {
            name: "test_multicast".to_string(),
            description: Some("st30p multicast audio".to_string()),
            formats: ST30P_MULTICAST_FORMATS.iter().map(|f| f.to_string()).collect(),
            rx_timing_parser: false,
            session: SessionTemplate::St30p {
                test_mode: "multicast".to_string(),
                audio_channel: vec!["U02".to_string()],
                audio_sampling: "48kHz".to_string(),
                audio_ptime: "1".to_string(),
            },
        },
    ]
}

/// All built-in cases
pub fn builtin_cases() -> Vec<TestCase> {
    builtin_definitions().iter().flat_map(TestCaseDef::expand).collect()
}

/// Cases whose id contains `filter` (all cases when there is no filter)
pub fn select<'a>(cases: &'a [TestCase], filter: Option<&str>) -> Vec<&'a TestCase> {
    cases
        .iter()
        .filter(|c| filter.map_or(true, |f| c.id().contains(f)))
        .collect()
}

/// Find a case by its exact id
pub fn find<'a>(cases: &'a [TestCase], id: &str) -> Option<&'a TestCase> {
    cases.iter().find(|c| c.id() == id)
}
