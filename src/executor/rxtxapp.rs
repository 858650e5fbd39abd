//! Executor that runs the real RxTxApp binary

use async_trait::async_trait;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use std::time::Instant;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;
use tokio::time::timeout;

use super::output::{check_results, RunOutput};
use super::timing::check_rx_timing;
use super::{ExecState, ExecuteRequest, ExecutionReport, TestExecutor};
use crate::common::config::{Config, NetworkConfig, RxTxAppConfig, Timeouts, TimingConfig};
use crate::common::{paths, Error, Result};
use crate::session::Configuration;

/// Name of the application binary in the build tree
const BINARY_NAME: &str = "RxTxApp";

/// Runs configurations through RxTxApp
#[derive(Debug, Clone, Default)]
pub struct RxTxAppExecutor {
    rxtxapp: RxTxAppConfig,
    network: NetworkConfig,
    timeouts: Timeouts,
    timing: TimingConfig,
    log_dir: Option<PathBuf>,
}

impl RxTxAppExecutor {
    /// Build an executor from the loaded configuration file
    pub fn from_config(config: &Config) -> Self {
        let log_dir = if config.rxtxapp.log_output {
            paths::log_dir()
        } else {
            None
        };
        Self {
            rxtxapp: config.rxtxapp.clone(),
            network: config.network.clone(),
            timeouts: config.timeouts.clone(),
            timing: config.timing.clone(),
            log_dir,
        }
    }

    /// Use an explicit RxTxApp binary instead of searching the build tree
    pub fn with_binary(mut self, binary: impl Into<PathBuf>) -> Self {
        self.rxtxapp.binary = Some(binary.into());
        self
    }

    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn with_timing(mut self, timing: TimingConfig) -> Self {
        self.timing = timing;
        self
    }

    /// Directory for captured output logs; `None` disables capture files
    pub fn with_log_dir(mut self, log_dir: Option<PathBuf>) -> Self {
        self.log_dir = log_dir;
        self
    }

    /// Find the RxTxApp binary for a build tree
    ///
    /// Search order: configured binary (relative paths are resolved against
    /// the build), `build/app/RxTxApp` under the build root, `app/RxTxApp`,
    /// the build root itself, then `PATH`.
    pub fn resolve_binary(&self, build: &Path) -> Result<PathBuf> {
        if let Some(binary) = &self.rxtxapp.binary {
            let binary = if binary.is_relative() {
                build.join(binary)
            } else {
                binary.clone()
            };
            if binary.is_file() {
                return Ok(binary);
            }
            return Err(Error::rxtxapp_not_found(&[binary.display().to_string()]));
        }

        let candidates = [
            build.join("build").join("app").join(BINARY_NAME),
            build.join("app").join(BINARY_NAME),
            build.join(BINARY_NAME),
        ];
        if let Some(found) = candidates.iter().find(|p| p.is_file()) {
            return Ok(found.clone());
        }

        if let Ok(path) = which::which(BINARY_NAME) {
            return Ok(path);
        }

        let mut searched: Vec<String> = candidates.iter().map(|p| p.display().to_string()).collect();
        searched.push("$PATH".to_string());
        Err(Error::rxtxapp_not_found(&searched))
    }

    fn command_args(&self, config_file: &Path, request: &ExecuteRequest) -> Vec<String> {
        let mut args = vec![
            "--config_file".to_string(),
            config_file.display().to_string(),
            "--test_time".to_string(),
            request.test_time.as_secs().max(1).to_string(),
        ];
        if request.rx_timing_parser {
            args.push("--rx_timing_parser".to_string());
        }
        args.extend(self.rxtxapp.extra_args.iter().cloned());
        args
    }

    /// Stop RxTxApp: SIGINT to its process group, then kill after the grace period
    async fn teardown(&self, child: &mut Child) {
        #[cfg(unix)]
        {
            if let Some(pid) = child.id() {
                // Negative pid addresses the whole process group
                let pgid = -(pid as i32);
                unsafe {
                    libc::kill(pgid, libc::SIGINT);
                }
                if let Ok(Ok(status)) = timeout(self.timeouts.teardown_grace(), child.wait()).await
                {
                    tracing::debug!(%status, "RxTxApp stopped after SIGINT");
                    return;
                }
                unsafe {
                    libc::kill(pgid, libc::SIGKILL);
                }
            }
        }

        if let Err(e) = child.kill().await {
            tracing::warn!("Failed to kill RxTxApp: {}", e);
        }
    }

    /// Spawn RxTxApp and collect its output until it exits or times out
    ///
    /// Returns the exit status (`None` on timeout) and all output lines.
    async fn run_process(
        &self,
        binary: &Path,
        args: &[String],
        request: &ExecuteRequest,
    ) -> Result<(Option<ExitStatus>, Vec<String>)> {
        let mut cmd = Command::new(binary);
        cmd.args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if request.build.is_dir() {
            cmd.current_dir(&request.build);
        }
        #[cfg(unix)]
        cmd.process_group(0);

        let mut child = cmd
            .spawn()
            .map_err(|e| Error::SpawnFailed(format!("{}: {}", binary.display(), e)))?;

        let stdout = child
            .stdout
            .take()
            .ok_or_else(|| Error::Internal("Failed to get RxTxApp stdout".to_string()))?;
        let stderr = child
            .stderr
            .take()
            .ok_or_else(|| Error::Internal("Failed to get RxTxApp stderr".to_string()))?;

        let (tx, mut rx) = mpsc::unbounded_channel();
        let readers = [
            tokio::spawn(forward_lines(stdout, tx.clone())),
            tokio::spawn(forward_lines(stderr, tx)),
        ];

        let deadline = request.test_time + self.timeouts.process_margin();
        let status = match timeout(deadline, child.wait()).await {
            Ok(Ok(status)) => Some(status),
            Ok(Err(e)) => {
                self.teardown(&mut child).await;
                return Err(Error::Io(e));
            }
            Err(_) => {
                tracing::warn!(
                    timeout_secs = deadline.as_secs(),
                    "RxTxApp still running at deadline, tearing down"
                );
                self.teardown(&mut child).await;
                None
            }
        };

        // Pipes may be held open by stray grandchildren; don't wait forever
        for mut reader in readers {
            if timeout(self.timeouts.teardown_grace(), &mut reader).await.is_err() {
                tracing::warn!("RxTxApp output reader did not finish");
                reader.abort();
            }
        }

        let mut lines = Vec::new();
        while let Ok(line) = rx.try_recv() {
            lines.push(line);
        }

        Ok((status, lines))
    }

    fn save_output(&self, request: &ExecuteRequest, lines: &[String]) -> Option<PathBuf> {
        let dir = self.log_dir.as_ref()?;
        let name = request.name.as_deref().unwrap_or(BINARY_NAME);
        let path = dir.join(format!("{}.log", paths::log_file_stem(name)));

        let result = std::fs::create_dir_all(dir)
            .and_then(|_| std::fs::write(&path, lines.join("\n") + "\n"));
        match result {
            Ok(()) => Some(path),
            Err(e) => {
                tracing::warn!("Could not save RxTxApp output to {}: {}", path.display(), e);
                None
            }
        }
    }

    fn evaluate(
        &self,
        config: &Configuration,
        request: &ExecuteRequest,
        status: Option<ExitStatus>,
        lines: &[String],
    ) -> Result<(Option<i32>, RunOutput, Vec<super::TimingSummary>)> {
        let deadline = request.test_time + self.timeouts.process_margin();
        let status = status.ok_or(Error::ExecutionTimeout(deadline.as_secs()))?;

        if !status.success() {
            return Err(Error::ProcessFailed {
                code: status.code(),
                detail: failure_detail(lines),
            });
        }

        let output = RunOutput::parse(lines);
        check_results(config, &output)?;

        let timing = if request.rx_timing_parser {
            check_rx_timing(config, &output, self.timing.fps_tolerance_pct)?
        } else {
            Vec::new()
        };

        Ok((status.code(), output, timing))
    }
}

#[async_trait]
impl TestExecutor for RxTxAppExecutor {
    async fn execute_test(
        &self,
        config: &Configuration,
        request: &ExecuteRequest,
    ) -> Result<ExecutionReport> {
        let mut state = ExecState::NotStarted;
        if config.is_empty() {
            return Err(Error::EmptyConfiguration);
        }

        let binary = self.resolve_binary(&request.build)?;
        for session in config.sessions() {
            let media = session.media_path();
            if !media.is_file() {
                return Err(Error::MediaNotFound(media.to_path_buf()));
            }
        }

        // Temp file lives until the end of this call, covering teardown
        let json = config.to_json_string(&self.network)?;
        let mut config_file = tempfile::Builder::new()
            .prefix("rxtxapp-")
            .suffix(".json")
            .tempfile()?;
        config_file.write_all(json.as_bytes())?;
        config_file.flush()?;

        let args = self.command_args(config_file.path(), request);
        tracing::info!(
            binary = %binary.display(),
            sessions = config.len(),
            test_time_secs = request.test_time.as_secs(),
            rx_timing_parser = request.rx_timing_parser,
            "Launching RxTxApp"
        );
        tracing::debug!(args = ?args, config = %json, "RxTxApp invocation");

        let started = Instant::now();
        tracing::debug!(from = %state, to = %ExecState::Running, "Execution state");
        state = ExecState::Running;

        let (status, lines) = match self.run_process(&binary, &args, request).await {
            Ok(result) => result,
            Err(e) => {
                tracing::debug!(from = %state, to = %ExecState::Failed, "Execution state");
                return Err(e);
            }
        };
        let elapsed = started.elapsed();
        let log_file = self.save_output(request, &lines);

        match self.evaluate(config, request, status, &lines) {
            Ok((exit_code, output, timing)) => {
                tracing::debug!(from = %state, to = %ExecState::TornDown, "Execution state");
                tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "RxTxApp run passed");
                Ok(ExecutionReport {
                    state: ExecState::TornDown,
                    exit_code,
                    elapsed,
                    output,
                    timing,
                    log_file,
                })
            }
            Err(e) => {
                tracing::debug!(from = %state, to = %ExecState::Failed, "Execution state");
                tracing::warn!(error = %e, log = ?log_file, "RxTxApp run failed");
                Err(e)
            }
        }
    }
}

/// Forward output lines until EOF; invalid UTF-8 is replaced, not fatal
async fn forward_lines<R: AsyncRead + Unpin>(reader: R, tx: mpsc::UnboundedSender<String>) {
    let mut reader = BufReader::new(reader);
    let mut buf = Vec::new();
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => break,
            Ok(_) => {}
            Err(e) => {
                tracing::warn!("Failed to read RxTxApp output: {}", e);
                break;
            }
        }
        let line = String::from_utf8_lossy(&buf)
            .trim_end_matches(['\n', '\r'])
            .to_string();
        tracing::trace!(target: "rxtxapp::output", "{}", line);
        if tx.send(line).is_err() {
            break;
        }
    }
}

/// Pick the most useful line to explain a failed run
fn failure_detail(lines: &[String]) -> String {
    lines
        .iter()
        .rev()
        .find(|l| {
            let lower = l.to_ascii_lowercase();
            lower.contains("error") || lower.contains("fail")
        })
        .or_else(|| lines.last())
        .map(|l| l.trim().to_string())
        .unwrap_or_else(|| "no output".to_string())
}
