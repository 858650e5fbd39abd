//! Suite runner
//!
//! Runs cases one after another against a [`TestExecutor`]. Each case builds
//! a fresh configuration and gets exactly one execution; a failing case is
//! recorded and the next case still runs.

use std::path::PathBuf;
use std::time::{Duration, Instant};

use colored::Colorize;

use crate::common::config::EnvConfig;
use crate::common::{Error, Result};
use crate::executor::TestExecutor;
use crate::media::MediaRegistry;

use super::config::TestCase;

/// The environment every case receives
#[derive(Debug, Clone, PartialEq)]
pub struct HarnessEnv {
    /// Root of the media transport library build
    pub build: PathBuf,
    /// Directory holding the registry's media files
    pub media: PathBuf,
    /// NIC ports available to sessions
    pub nic_port_list: Vec<String>,
    /// RxTxApp run time per case
    pub test_time: Duration,
}

impl HarnessEnv {
    /// Build the environment from the `[env]` table, which must name a
    /// build and a media directory
    pub fn from_config(env: &EnvConfig) -> Result<Self> {
        let build = env
            .build
            .clone()
            .ok_or_else(|| Error::Config("No build directory. Set env.build or pass --build".to_string()))?;
        let media = env
            .media
            .clone()
            .ok_or_else(|| Error::Config("No media directory. Set env.media or pass --media".to_string()))?;
        Ok(Self {
            build,
            media,
            nic_port_list: env.nic_port_list.clone(),
            test_time: Duration::from_secs(env.test_time),
        })
    }
}

/// Result of one case
#[derive(Debug, Clone)]
pub struct CaseResult {
    pub id: String,
    pub passed: bool,
    pub elapsed: Duration,
    pub error: Option<String>,
    /// Whether the failure happened before anything was executed
    pub config_error: bool,
}

/// Results of a suite run
#[derive(Debug, Clone, Default)]
pub struct SuiteReport {
    pub results: Vec<CaseResult>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.results.iter().filter(|r| r.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.results.len() - self.passed()
    }

    pub fn all_passed(&self) -> bool {
        self.results.iter().all(|r| r.passed)
    }
}

/// Run one case: build its configuration, then execute it once
pub async fn run_case(
    case: &TestCase,
    registry: &MediaRegistry,
    env: &HarnessEnv,
    executor: &dyn TestExecutor,
) -> CaseResult {
    let id = case.id();
    let started = Instant::now();

    let config = match case.build_config(registry, env) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!(case = %id, error = %e, "Case configuration failed");
            return CaseResult {
                id,
                passed: false,
                elapsed: started.elapsed(),
                error: Some(e.to_string()),
                config_error: true,
            };
        }
    };

    let request = case.request(env);
    let result = executor.execute_test(&config, &request).await;

    match result {
        Ok(report) => {
            tracing::info!(case = %id, state = %report.state, "Case passed");
            CaseResult {
                id,
                passed: true,
                elapsed: started.elapsed(),
                error: None,
                config_error: false,
            }
        }
        Err(e) => {
            tracing::warn!(case = %id, error = %e, "Case failed");
            CaseResult {
                id,
                passed: false,
                elapsed: started.elapsed(),
                error: Some(e.to_string()),
                config_error: e.is_configuration_error(),
            }
        }
    }
}

/// Run cases sequentially and print progress
pub async fn run_suite(
    cases: &[&TestCase],
    registry: &MediaRegistry,
    env: &HarnessEnv,
    executor: &dyn TestExecutor,
    verbose: bool,
) -> SuiteReport {
    let mut report = SuiteReport::default();

    for case in cases {
        println!(
            "\n{} {}",
            "Running Test:".blue().bold(),
            case.id().white().bold()
        );
        if verbose {
            println!(
                "  {}",
                format!(
                    "build={} media={} ports={} test_time={}s",
                    env.build.display(),
                    env.media.display(),
                    env.nic_port_list.join(","),
                    env.test_time.as_secs()
                )
                .dimmed()
            );
        }

        let result = run_case(case, registry, env, executor).await;
        match &result.error {
            None => println!(
                "  {} {} ({:.1}s)",
                "✓".green(),
                "passed".green(),
                result.elapsed.as_secs_f64()
            ),
            Some(error) => println!("  {} {}", "✗".red(), error),
        }
        report.results.push(result);
    }

    report
}

/// Print the final summary table
pub fn print_summary(report: &SuiteReport) {
    println!("\n{}", "Summary:".cyan());
    for result in &report.results {
        if result.passed {
            println!("  {} {}", "✓".green(), result.id);
        } else {
            println!("  {} {}", "✗".red(), result.id);
        }
    }

    let line = format!(
        "{} passed, {} failed, {} total",
        report.passed(),
        report.failed(),
        report.results.len()
    );
    if report.all_passed() {
        println!("\n{}\n", line.green().bold());
    } else {
        println!("\n{}\n", line.red().bold());
    }
}
