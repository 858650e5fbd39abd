//! Validation test suite
//!
//! The parametrized RxTxApp validation tests as an explicit table of cases,
//! optional YAML suites with more cases, and a runner that executes each
//! case independently through a [`crate::executor::TestExecutor`].

pub mod cases;
mod config;
mod runner;

pub use config::*;
pub use runner::{print_summary, run_case, run_suite, CaseResult, HarnessEnv, SuiteReport};
