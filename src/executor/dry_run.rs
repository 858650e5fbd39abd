//! Executor that renders configurations without launching anything

use async_trait::async_trait;
use std::time::Duration;

use super::{ExecState, ExecuteRequest, ExecutionReport, RunOutput, TestExecutor};
use crate::common::config::NetworkConfig;
use crate::common::Result;
use crate::session::Configuration;

/// Prints the RxTxApp JSON and the command-line flags a real run would use
#[derive(Debug, Clone, Default)]
pub struct DryRunExecutor {
    network: NetworkConfig,
}

impl DryRunExecutor {
    pub fn new(network: NetworkConfig) -> Self {
        Self { network }
    }
}

#[async_trait]
impl TestExecutor for DryRunExecutor {
    async fn execute_test(
        &self,
        config: &Configuration,
        request: &ExecuteRequest,
    ) -> Result<ExecutionReport> {
        let json = config.to_json_string(&self.network)?;
        println!(
            "# RxTxApp --test_time {}{}",
            request.test_time.as_secs().max(1),
            if request.rx_timing_parser {
                " --rx_timing_parser"
            } else {
                ""
            }
        );
        println!("{}", json);

        Ok(ExecutionReport {
            state: ExecState::TornDown,
            exit_code: None,
            elapsed: Duration::ZERO,
            output: RunOutput::default(),
            timing: Vec::new(),
            log_file: None,
        })
    }
}
