//! CLI command handling
//!
//! Loads configuration, assembles the case list and dispatches commands.

use colored::Colorize;
use std::path::{Path, PathBuf};

use crate::commands::Commands;
use crate::common::config::{Config, EnvConfig};
use crate::common::{Error, Result};
use crate::executor::{DryRunExecutor, RxTxAppExecutor};
use crate::media::MediaRegistry;
use crate::testing::{cases, print_summary, run_suite, HarnessEnv, SessionTemplate, TestCase, TestSuite};

/// Dispatch a CLI command
pub async fn dispatch(command: Commands, config_path: Option<&Path>, verbose: bool) -> Result<()> {
    let config = match config_path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    let mut registry = MediaRegistry::builtin();
    registry.merge(&config.yuv_files, &config.audio_files);

    match command {
        Commands::Run {
            filter,
            suite,
            no_builtin,
            dry_run,
            env,
        } => {
            let all_cases = load_cases(&suite, !no_builtin)?;
            let selected = cases::select(&all_cases, filter.as_deref());
            if selected.is_empty() {
                return Err(Error::Config(format!(
                    "No test cases match '{}'",
                    filter.unwrap_or_default()
                )));
            }

            let mut env_config = config.env.clone();
            env.apply(&mut env_config);
            if dry_run {
                default_dirs(&mut env_config);
            }
            let harness = HarnessEnv::from_config(&env_config)?;

            tracing::info!(cases = selected.len(), dry_run, "Starting validation run");

            let report = if dry_run {
                let executor = DryRunExecutor::new(config.network.clone());
                run_suite(&selected, &registry, &harness, &executor, verbose).await
            } else {
                let executor = RxTxAppExecutor::from_config(&config);
                run_suite(&selected, &registry, &harness, &executor, verbose).await
            };

            print_summary(&report);

            if report.all_passed() {
                Ok(())
            } else {
                Err(Error::SuiteFailed {
                    failed: report.failed(),
                    total: report.results.len(),
                })
            }
        }

        Commands::List { filter, suite } => {
            let all_cases = load_cases(&suite, true)?;
            let selected = cases::select(&all_cases, filter.as_deref());

            if selected.is_empty() {
                println!("No test cases");
            } else {
                for case in selected {
                    print_case(case);
                }
            }
            Ok(())
        }

        Commands::Config { case, suite, env } => {
            let all_cases = load_cases(&suite, true)?;
            let case = cases::find(&all_cases, &case).ok_or(Error::UnknownTestCase(case))?;

            let mut env_config = config.env.clone();
            env.apply(&mut env_config);
            default_dirs(&mut env_config);
            let harness = HarnessEnv::from_config(&env_config)?;

            let session_config = case.build_config(&registry, &harness)?;
            println!("{}", session_config.to_json_string(&config.network)?);
            Ok(())
        }

        Commands::Media { json } => {
            if json {
                println!("{}", serde_json::to_string_pretty(&registry)?);
                return Ok(());
            }
            println!("{}", "yuv_files:".cyan());
            for (key, file) in registry.yuv_files() {
                println!(
                    "  {:<12} {:<14} {}x{} {:<5} {}",
                    key, file.format, file.width, file.height, file.fps, file.filename
                );
            }
            println!("{}", "audio_files:".cyan());
            for (key, file) in registry.audio_files() {
                println!("  {:<12} {:<14} {}", key, file.format, file.filename);
            }
            Ok(())
        }
    }
}

/// Nothing is launched, so missing directories fall back to the working directory
fn default_dirs(env: &mut EnvConfig) {
    env.build.get_or_insert_with(|| PathBuf::from("."));
    env.media.get_or_insert_with(|| PathBuf::from("."));
}

/// Built-in cases (optionally) followed by the cases of each suite file
fn load_cases(suites: &[PathBuf], include_builtin: bool) -> Result<Vec<TestCase>> {
    let mut all = if include_builtin {
        cases::builtin_cases()
    } else {
        Vec::new()
    };

    for path in suites {
        let suite = TestSuite::load(path)?;
        let expanded = suite.expand();
        tracing::debug!(suite = %suite.name, cases = expanded.len(), "Loaded test suite");
        all.extend(expanded);
    }

    Ok(all)
}

fn print_case(case: &TestCase) {
    let kind = match case.session {
        SessionTemplate::Video { .. } => "video",
        SessionTemplate::St30p { .. } => "st30p",
    };
    if case.rx_timing_parser {
        println!("{}  {} {}", case.id(), kind.dimmed(), "rx-timing".dimmed());
    } else {
        println!("{}  {}", case.id(), kind.dimmed());
    }
}
