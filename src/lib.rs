//! RxTxApp validation harness
//!
//! Models RxTxApp media-transport session configurations, runs them through
//! RxTxApp for a bounded time and checks the results, including RX timing
//! compliance of video sessions.

pub mod cli;
pub mod commands;
pub mod common;
pub mod executor;
pub mod media;
pub mod session;
pub mod testing;

// Re-export commonly used types for tests
pub use common::{Error, Result};
pub use executor::{execute_test, ExecuteRequest, ExecutionReport, TestExecutor};
pub use media::MediaRegistry;
pub use session::{add_st30p_sessions, add_video_sessions, create_empty_config, Configuration};
