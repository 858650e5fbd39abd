//! End-to-end integration tests for the validation harness
//!
//! These tests verify the complete validation workflow by:
//! 1. Building configurations for the built-in cases
//! 2. Running them through a recording executor or a fake RxTxApp
//! 3. Verifying the verdicts, the generated JSON and the CLI output

use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use rxtxapp::common::config::{EnvConfig, Timeouts};
use rxtxapp::executor::{ExecState, RunOutput, RxTxAppExecutor};
use rxtxapp::session::format::{AudioChannel, AudioPtime, AudioSampling, TestMode, TransportType};
use rxtxapp::session::Session;
use rxtxapp::testing::{cases, run_case, run_suite, HarnessEnv, TestCase};
use rxtxapp::{
    Configuration, Error, ExecuteRequest, ExecutionReport, MediaRegistry, Result, TestExecutor,
};

const NIC_PORTS: [&str; 2] = ["0000:4b:01.0", "0000:4b:01.1"];

/// Test context with paths and cleanup
struct TestContext {
    /// Temporary directory for this test
    temp_dir: tempfile::TempDir,
    /// Fake build tree; RxTxApp lives in build/app
    build_dir: PathBuf,
    /// Media directory holding the registry files
    media_dir: PathBuf,
}

impl TestContext {
    /// Create a new test context with an empty build tree and media files
    /// for every registry entry
    fn new() -> Self {
        let temp_dir = tempfile::tempdir().expect("Failed to create temp dir");
        let build_dir = temp_dir.path().join("mtl");
        let media_dir = temp_dir.path().join("media");
        fs::create_dir_all(build_dir.join("app")).expect("Failed to create build dir");
        fs::create_dir_all(&media_dir).expect("Failed to create media dir");

        let registry = MediaRegistry::builtin();
        for (_, file) in registry.yuv_files() {
            fs::write(media_dir.join(&file.filename), b"").expect("Failed to create media file");
        }
        for (_, file) in registry.audio_files() {
            fs::write(media_dir.join(&file.filename), b"").expect("Failed to create media file");
        }

        Self {
            temp_dir,
            build_dir,
            media_dir,
        }
    }

    /// Harness environment pointing at this context
    fn env(&self, test_time_secs: u64) -> HarnessEnv {
        HarnessEnv {
            build: self.build_dir.clone(),
            media: self.media_dir.clone(),
            nic_port_list: NIC_PORTS.iter().map(|p| p.to_string()).collect(),
            test_time: Duration::from_secs(test_time_secs),
        }
    }

    fn app_dir(&self) -> PathBuf {
        self.build_dir.join("app")
    }

    /// Install the fake RxTxApp with canned output and exit code
    fn install_fake_rxtxapp(&self, output: &[&str], exit_code: i32) {
        let mut text = output.join("\n");
        text.push('\n');
        self.install_fake_rxtxapp_bytes(text.as_bytes(), exit_code);
    }

    /// Install the fake RxTxApp with raw output bytes
    fn install_fake_rxtxapp_bytes(&self, output: &[u8], exit_code: i32) {
        let manifest_dir = env!("CARGO_MANIFEST_DIR");
        let script = PathBuf::from(manifest_dir)
            .join("tests")
            .join("fixtures")
            .join("fake_rxtxapp.sh");
        let binary = self.app_dir().join("RxTxApp");
        fs::copy(&script, &binary).expect("Failed to install fake RxTxApp");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&binary, fs::Permissions::from_mode(0o755))
                .expect("Failed to make fake RxTxApp executable");
        }

        fs::write(self.app_dir().join("output"), output).expect("Failed to write output");
        fs::write(self.app_dir().join("exit_code"), exit_code.to_string())
            .expect("Failed to write exit code");
    }

    /// Make the fake RxTxApp hang before printing anything
    fn make_fake_rxtxapp_hang(&self, secs: u64) {
        fs::write(self.app_dir().join("sleep"), secs.to_string()).expect("Failed to write sleep");
    }

    /// Leave a background child holding the output pipes after exit
    fn make_fake_rxtxapp_linger(&self, secs: u64) {
        fs::write(self.app_dir().join("linger"), secs.to_string()).expect("Failed to write linger");
    }

    /// The JSON config the fake RxTxApp received last
    fn last_config(&self) -> serde_json::Value {
        let text = fs::read_to_string(self.app_dir().join("last_config.json"))
            .expect("Fake RxTxApp did not receive a config");
        serde_json::from_str(&text).expect("Config is not valid JSON")
    }

    /// The arguments the fake RxTxApp received last
    fn last_args(&self) -> String {
        fs::read_to_string(self.app_dir().join("last_args"))
            .expect("Fake RxTxApp was not started")
            .trim()
            .to_string()
    }

    /// Write a configuration file for the CLI and return its path
    fn write_config(&self, content: &str) -> PathBuf {
        let path = self.temp_dir.path().join("config.toml");
        fs::write(&path, content).expect("Failed to write config");
        path
    }
}

/// Executor that records every call and reports success
#[derive(Default)]
struct RecordingExecutor {
    calls: Mutex<Vec<(Configuration, ExecuteRequest)>>,
}

impl RecordingExecutor {
    fn calls(&self) -> Vec<(Configuration, ExecuteRequest)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TestExecutor for RecordingExecutor {
    async fn execute_test(
        &self,
        config: &Configuration,
        request: &ExecuteRequest,
    ) -> Result<ExecutionReport> {
        self.calls.lock().unwrap().push((config.clone(), request.clone()));
        Ok(ExecutionReport {
            state: ExecState::TornDown,
            exit_code: Some(0),
            elapsed: Duration::ZERO,
            output: RunOutput::default(),
            timing: Vec::new(),
            log_file: None,
        })
    }
}

fn builtin_case(id: &str) -> TestCase {
    let all = cases::builtin_cases();
    cases::find(&all, id)
        .unwrap_or_else(|| panic!("No built-in case '{}'", id))
        .clone()
}

/// Output of a passing single video session run with RX timing enabled
fn passing_video_output(rx_fps: &str) -> Vec<String> {
    vec![
        "MT: 2024-05-10 10:01:00, Init: dev 0000:4b:01.0 started".to_string(),
        "MT: 2024-05-10 10:01:22, app_tx_video_result(0), OK, fps 60.00, 120 frames sent".to_string(),
        format!("MT: 2024-05-10 10:01:22, app_rx_video_result(0), OK, fps {}, 119 frames received", rx_fps),
        "rx_video_tp_dump(0), COMPLIANT NARROW 110 WIDE 9 FAILED 0".to_string(),
    ]
}

fn executor_without_logs() -> RxTxAppExecutor {
    RxTxAppExecutor::default().with_log_dir(None)
}

// ============== Scenarios with a recording executor ==============

#[tokio::test]
async fn test_rx_timing_case_runs_one_video_session() {
    let ctx = TestContext::new();
    let executor = RecordingExecutor::default();
    let case = builtin_case("test_rx_timing_video_video_format[i1080p60]");

    let result = run_case(&case, &MediaRegistry::builtin(), &ctx.env(30), &executor).await;
    assert!(result.passed, "case failed: {:?}", result.error);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    let (config, request) = &calls[0];

    assert_eq!(config.len(), 1);
    match &config.sessions()[0] {
        Session::Video(video) => {
            assert_eq!(video.video_format.to_string(), "i1080p60");
            assert_eq!(video.test_mode, TestMode::Multicast);
            assert_eq!(video.transport, TransportType::Frame);
            assert_eq!(video.pg_format.as_str(), "YUV_422_10bit");
            assert_eq!(
                video.video_url,
                ctx.media_dir.join("Pedestrian_1920x1080_10bit_60Hz_P422.yuv")
            );
            assert_eq!(video.nic_port_list, NIC_PORTS);
        }
        other => panic!("Expected a video session, got {:?}", other),
    }

    assert!(request.rx_timing_parser);
    assert_eq!(request.test_time, Duration::from_secs(30));
    assert_eq!(request.build, ctx.build_dir);
}

#[tokio::test]
async fn test_st30p_multicast_case_runs_one_audio_session() {
    let ctx = TestContext::new();
    let executor = RecordingExecutor::default();
    let case = builtin_case("test_multicast[PCM24]");

    let result = run_case(&case, &MediaRegistry::builtin(), &ctx.env(10), &executor).await;
    assert!(result.passed, "case failed: {:?}", result.error);

    let calls = executor.calls();
    assert_eq!(calls.len(), 1);
    let (config, request) = &calls[0];

    match &config.sessions()[0] {
        Session::St30p(audio) => {
            assert_eq!(audio.audio_format.as_str(), "PCM24");
            assert_eq!(audio.audio_channel, vec![AudioChannel::Undefined(2)]);
            assert_eq!(audio.audio_sampling, AudioSampling::S48k);
            assert_eq!(audio.audio_ptime, AudioPtime::P1ms);
            assert_eq!(audio.test_mode, TestMode::Multicast);
            assert_eq!(audio.filename, ctx.media_dir.join("voice_24b_48k_2ch.pcm"));
        }
        other => panic!("Expected an st30p session, got {:?}", other),
    }
    assert!(!request.rx_timing_parser);
}

#[tokio::test]
async fn test_unknown_format_fails_before_execution() {
    let ctx = TestContext::new();
    let executor = RecordingExecutor::default();
    let mut case = builtin_case("test_rx_timing_video_video_format[i1080p60]");
    case.format = "i1080p999".to_string();

    let result = run_case(&case, &MediaRegistry::builtin(), &ctx.env(30), &executor).await;

    assert!(!result.passed);
    assert!(result.config_error);
    assert!(result.error.unwrap().contains("i1080p999"));
    assert!(executor.calls().is_empty());
}

#[tokio::test]
async fn test_builtin_suite_runs_every_case_once() {
    let ctx = TestContext::new();
    let executor = RecordingExecutor::default();
    let all = cases::builtin_cases();
    let selected = cases::select(&all, None);

    let report = run_suite(&selected, &MediaRegistry::builtin(), &ctx.env(5), &executor, false).await;

    assert_eq!(report.results.len(), 10);
    assert!(report.all_passed());
    assert_eq!(executor.calls().len(), 10);
    assert!(executor.calls().iter().all(|(config, _)| config.len() == 1));
}

#[tokio::test]
async fn test_single_port_fails_case_without_execution() {
    let ctx = TestContext::new();
    let executor = RecordingExecutor::default();
    let mut env = ctx.env(5);
    env.nic_port_list.truncate(1);

    let case = builtin_case("test_multicast[PCM8]");
    let result = run_case(&case, &MediaRegistry::builtin(), &env, &executor).await;

    assert!(!result.passed);
    assert!(result.config_error);
    assert!(executor.calls().is_empty());
}

#[test]
fn test_harness_env_requires_build_and_media() {
    let env = EnvConfig::default();
    assert!(matches!(HarnessEnv::from_config(&env), Err(Error::Config(_))));

    let env = EnvConfig {
        build: Some(PathBuf::from("/opt/mtl")),
        media: Some(PathBuf::from("/mnt/media")),
        ..EnvConfig::default()
    };
    let harness = HarnessEnv::from_config(&env).unwrap();
    assert_eq!(harness.test_time, Duration::from_secs(30));
}

// ============== End-to-end with the fake RxTxApp ==============

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_passing_run() {
    let ctx = TestContext::new();
    let lines = passing_video_output("59.94");
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    ctx.install_fake_rxtxapp(&lines, 0);

    let case = builtin_case("test_rx_timing_video_video_format[i1080p60]");
    let env = ctx.env(2);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let report = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap();

    assert_eq!(report.state, ExecState::TornDown);
    assert_eq!(report.exit_code, Some(0));
    assert_eq!(report.output.results.len(), 2);
    assert_eq!(report.timing.len(), 1);
    assert_eq!(report.timing[0].compliant_frames, 119);

    let args = ctx.last_args();
    assert!(args.contains("--test_time 2"));
    assert!(args.ends_with("--rx_timing_parser"));

    let json = ctx.last_config();
    assert_eq!(json["interfaces"][0]["name"], NIC_PORTS[0]);
    assert_eq!(json["interfaces"][1]["name"], NIC_PORTS[1]);
    assert_eq!(json["tx_sessions"][0]["video"][0]["video_format"], "i1080p60");
    assert_eq!(json["rx_sessions"][0]["video"][0]["video_format"], "i1080p60");
}

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_failed_session() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(
        &[
            "app_tx_st30p_result(0), OK, fps 1000.00, 10000 frames sent",
            "app_rx_st30p_result(0), FAILED, fps 0.00, 0 frames received",
        ],
        0,
    );

    let case = builtin_case("test_multicast[PCM16]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let err = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();

    match err {
        Error::SessionFailed { session, detail } => {
            assert_eq!(session, "rx st30p 0");
            assert!(detail.contains("FAILED"));
        }
        other => panic!("Expected SessionFailed, got {:?}", other),
    }

    let json = ctx.last_config();
    assert_eq!(json["tx_sessions"][0]["st30p"][0]["audio_format"], "PCM16");
    assert_eq!(json["tx_sessions"][0]["st30p"][0]["audio_channel"], serde_json::json!(["U02"]));
}

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_missing_result_line() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(&["app_tx_st30p_result(0), OK"], 0);

    let case = builtin_case("test_multicast[PCM8]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let err = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::SessionFailed { .. }));
    assert!(err.to_string().contains("no result"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_invalid_utf8_line_keeps_capture() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp_bytes(
        b"MT: dev name \xff\xfe\n\
          app_tx_st30p_result(0), OK, fps 1000.00, 10000 frames sent\n\
          app_rx_st30p_result(0), OK, fps 1000.00, 9998 frames received\n",
        0,
    );

    let case = builtin_case("test_multicast[PCM16]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let report = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap();
    assert_eq!(report.output.results.len(), 2);
    assert!(report.output.results.iter().all(|r| r.ok));
}

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_nonzero_exit() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(&["Error: mtl_init failed, no hugepages"], 1);

    let case = builtin_case("test_multicast[PCM24]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let err = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();

    match err {
        Error::ProcessFailed { code, detail } => {
            assert_eq!(code, Some(1));
            assert!(detail.contains("hugepages"));
        }
        other => panic!("Expected ProcessFailed, got {:?}", other),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_timing_violation() {
    let ctx = TestContext::new();
    let lines = passing_video_output("41.20");
    let lines: Vec<&str> = lines.iter().map(String::as_str).collect();
    ctx.install_fake_rxtxapp(&lines, 0);

    let case = builtin_case("test_rx_timing_video_video_format[i1080p60]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let err = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::TimingViolation { .. }));
    assert!(err.to_string().contains("41.20"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_fake_rxtxapp_timeout_is_torn_down() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(&["app_tx_st30p_result(0), OK"], 0);
    ctx.make_fake_rxtxapp_hang(60);

    let case = builtin_case("test_multicast[PCM8]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let executor = executor_without_logs().with_timeouts(Timeouts {
        process_margin_secs: 0,
        teardown_grace_secs: 1,
    });

    let started = std::time::Instant::now();
    let err = executor
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::ExecutionTimeout(1)));
    assert!(started.elapsed() < Duration::from_secs(30));
}

#[cfg(unix)]
#[tokio::test]
async fn test_stray_child_holding_pipes_does_not_block_verdict() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(
        &[
            "app_tx_st30p_result(0), OK, fps 1000.00, 1000 frames sent",
            "app_rx_st30p_result(0), OK, fps 1000.00, 1000 frames received",
        ],
        0,
    );
    ctx.make_fake_rxtxapp_linger(20);

    let case = builtin_case("test_multicast[PCM8]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let executor = executor_without_logs().with_timeouts(Timeouts {
        process_margin_secs: 30,
        teardown_grace_secs: 1,
    });

    let started = std::time::Instant::now();
    let report = executor
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap();

    assert_eq!(report.output.results.len(), 2);
    assert!(started.elapsed() < Duration::from_secs(15));
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_media_file_fails_before_launch() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(&[], 0);
    fs::remove_file(ctx.media_dir.join("voice_8b_48k_2ch.pcm")).unwrap();

    let case = builtin_case("test_multicast[PCM8]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let err = executor_without_logs()
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::MediaNotFound(_)));
    assert!(!ctx.app_dir().join("last_args").exists());
}

#[tokio::test]
async fn test_missing_binary_is_reported() {
    let ctx = TestContext::new();
    let case = builtin_case("test_multicast[PCM8]");
    let env = ctx.env(1);
    let config = case.build_config(&MediaRegistry::builtin(), &env).unwrap();

    let executor = executor_without_logs().with_binary(ctx.build_dir.join("nope").join("RxTxApp"));
    let err = executor
        .execute_test(&config, &case.request(&env))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::RxTxAppNotFound { .. }));
}

// ============== CLI ==============

fn cli(ctx: &TestContext, args: &[&str]) -> std::process::Output {
    let config = ctx.write_config("[env]\ntest_time = 5\n\n[rxtxapp]\nlog_output = false\n");
    Command::new(env!("CARGO_BIN_EXE_rxtxapp-validate"))
        .arg("--config")
        .arg(&config)
        .args(args)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to run rxtxapp-validate")
}

fn stdout_of(output: &std::process::Output) -> String {
    String::from_utf8_lossy(&output.stdout).to_string()
}

#[test]
fn test_cli_list_shows_builtin_cases() {
    let ctx = TestContext::new();
    let output = cli(&ctx, &["list"]);
    assert!(output.status.success());

    let stdout = stdout_of(&output);
    for format in cases::RX_TIMING_VIDEO_FORMATS {
        assert!(stdout.contains(&format!("test_rx_timing_video_video_format[{}]", format)));
    }
    assert!(stdout.contains("test_multicast[PCM24]"));
}

#[test]
fn test_cli_config_prints_rxtxapp_json() {
    let ctx = TestContext::new();
    let media = ctx.media_dir.display().to_string();
    let output = cli(
        &ctx,
        &[
            "config",
            "test_multicast[PCM24]",
            "--nic",
            NIC_PORTS[0],
            "--nic",
            NIC_PORTS[1],
            "--media",
            &media,
        ],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    let tx = &json["tx_sessions"][0];
    assert_eq!(tx["dip"], serde_json::json!(["239.168.85.20"]));
    assert_eq!(tx["st30p"][0]["audio_format"], "PCM24");
    assert_eq!(tx["st30p"][0]["audio_sampling"], "48kHz");
    assert_eq!(tx["st30p"][0]["audio_ptime"], "1");
    assert_eq!(
        Path::new(tx["st30p"][0]["audio_url"].as_str().unwrap()),
        ctx.media_dir.join("voice_24b_48k_2ch.pcm")
    );
}

#[test]
fn test_cli_media_json_includes_config_overrides() {
    let ctx = TestContext::new();
    let config = ctx.write_config(
        "[audio_files.PCM24]\nformat = \"PCM24\"\nfilename = \"studio_24b.pcm\"\n",
    );
    let output = Command::new(env!("CARGO_BIN_EXE_rxtxapp-validate"))
        .arg("--config")
        .arg(&config)
        .args(["media", "--json"])
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to run rxtxapp-validate");
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_str(&stdout_of(&output)).unwrap();
    assert_eq!(json["audio_files"]["PCM24"]["filename"], "studio_24b.pcm");
    assert_eq!(json["audio_files"]["PCM8"]["filename"], "voice_8b_48k_2ch.pcm");
    assert_eq!(json["yuv_files"]["i1080p60"]["width"], 1920);
}

#[test]
fn test_cli_config_unknown_case_fails() {
    let ctx = TestContext::new();
    let output = cli(&ctx, &["config", "test_multicast[PCM32]"]);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Unknown test case"));
}

#[test]
fn test_cli_dry_run_passes_without_rxtxapp() {
    let ctx = TestContext::new();
    let output = cli(
        &ctx,
        &["run", "PCM", "--dry-run", "--nic", NIC_PORTS[0], "--nic", NIC_PORTS[1]],
    );
    assert!(output.status.success(), "{}", String::from_utf8_lossy(&output.stderr));

    let stdout = stdout_of(&output);
    assert!(stdout.contains("test_multicast[PCM8]"));
    assert!(stdout.contains("3 passed, 0 failed, 3 total"));
}

#[cfg(unix)]
#[test]
fn test_cli_run_reports_failures() {
    let ctx = TestContext::new();
    ctx.install_fake_rxtxapp(&["app_tx_st30p_result(0), OK"], 0);

    let build = ctx.build_dir.display().to_string();
    let media = ctx.media_dir.display().to_string();
    let output = cli(
        &ctx,
        &[
            "run",
            "test_multicast[PCM8]",
            "--build",
            &build,
            "--media",
            &media,
            "--nic",
            NIC_PORTS[0],
            "--nic",
            NIC_PORTS[1],
            "--test-time",
            "1",
        ],
    );

    assert!(!output.status.success());
    assert!(stdout_of(&output).contains("0 passed, 1 failed, 1 total"));
    assert!(String::from_utf8_lossy(&output.stderr).contains("1 of 1 test cases failed"));
}
