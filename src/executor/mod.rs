//! Test execution
//!
//! Launches RxTxApp with a rendered configuration, waits for it with a
//! bounded timeout, and turns its output into a verdict. The
//! [`TestExecutor`] trait is the seam the suite runner drives, so cases can
//! be exercised against a recording executor as well as the real binary.

mod dry_run;
pub mod output;
mod rxtxapp;
pub mod timing;

use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::common::Result;
use crate::session::Configuration;

pub use dry_run::DryRunExecutor;
pub use output::RunOutput;
pub use rxtxapp::RxTxAppExecutor;
pub use timing::TimingSummary;

/// Parameters of one execution
#[derive(Debug, Clone, PartialEq)]
pub struct ExecuteRequest {
    /// Root of the media transport library build
    pub build: PathBuf,
    /// How long RxTxApp should run
    pub test_time: Duration,
    /// Enable RxTxApp's RX timing parser and check its results
    pub rx_timing_parser: bool,
    /// Name used for the captured output log
    pub name: Option<String>,
}

impl ExecuteRequest {
    pub fn new(build: impl Into<PathBuf>, test_time: Duration) -> Self {
        Self {
            build: build.into(),
            test_time,
            rx_timing_parser: false,
            name: None,
        }
    }

    pub fn with_rx_timing_parser(mut self, enabled: bool) -> Self {
        self.rx_timing_parser = enabled;
        self
    }

    pub fn named(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}

/// Lifecycle of one execution
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecState {
    NotStarted,
    Running,
    /// Finished and cleaned up with a passing verdict
    TornDown,
    /// Finished and cleaned up with a failing verdict
    Failed,
}

impl fmt::Display for ExecState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecState::NotStarted => "not started",
            ExecState::Running => "running",
            ExecState::TornDown => "torn down",
            ExecState::Failed => "failed",
        };
        f.write_str(s)
    }
}

/// Outcome of a passing execution
#[derive(Debug, Clone)]
pub struct ExecutionReport {
    pub state: ExecState,
    pub exit_code: Option<i32>,
    pub elapsed: Duration,
    pub output: RunOutput,
    /// Per-session timing figures, empty unless the timing parser ran
    pub timing: Vec<TimingSummary>,
    /// Where the captured RxTxApp output was saved
    pub log_file: Option<PathBuf>,
}

/// Something that can run a configuration to a verdict
///
/// Failures (launch problems, failed sessions, timing violations) are
/// returned as errors; a returned report always describes a passing run.
#[async_trait]
pub trait TestExecutor: Send + Sync {
    async fn execute_test(
        &self,
        config: &Configuration,
        request: &ExecuteRequest,
    ) -> Result<ExecutionReport>;
}

/// Run a configuration with the default RxTxApp executor
pub async fn execute_test(
    config: &Configuration,
    build: impl AsRef<Path>,
    test_time: u64,
    rx_timing_parser: bool,
) -> Result<ExecutionReport> {
    let request = ExecuteRequest::new(build.as_ref(), Duration::from_secs(test_time))
        .with_rx_timing_parser(rx_timing_parser);
    RxTxAppExecutor::default().execute_test(config, &request).await
}
