//! Error types for the RxTxApp validation harness
//!
//! Messages carry enough detail (expected vs observed values, searched
//! locations) to diagnose a failed validation run from the log alone.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for the validation harness
#[derive(Error, Debug)]
pub enum Error {
    // === Lookup Errors ===
    #[error("Unknown {registry} format '{key}'. Known formats: {known}")]
    UnknownMediaFormat {
        registry: &'static str,
        key: String,
        known: String,
    },

    #[error("Unknown test case '{0}'. Use 'rxtxapp-validate list' to see available cases")]
    UnknownTestCase(String),

    // === Session Configuration Errors ===
    #[error("Invalid {field} '{value}'")]
    InvalidSessionParameter { field: &'static str, value: String },

    #[error("Session needs at least {required} NIC ports, got {available}")]
    NotEnoughPorts { required: usize, available: usize },

    #[error("Configuration has no sessions")]
    EmptyConfiguration,

    // === Execution Errors ===
    #[error("RxTxApp binary not found. Searched: {searched}")]
    RxTxAppNotFound { searched: String },

    #[error("Media file not found: {}", .0.display())]
    MediaNotFound(PathBuf),

    #[error("Failed to spawn RxTxApp: {0}")]
    SpawnFailed(String),

    #[error("RxTxApp did not finish within {0} seconds")]
    ExecutionTimeout(u64),

    #[error("RxTxApp exited with {}: {detail}", .code.map(|c| format!("code {c}")).unwrap_or_else(|| "a signal".to_string()))]
    ProcessFailed { code: Option<i32>, detail: String },

    #[error("Session {session} failed: {detail}")]
    SessionFailed { session: String, detail: String },

    #[error("RX timing violation on {session}: expected {expected}, observed {observed}")]
    TimingViolation {
        session: String,
        expected: String,
        observed: String,
    },

    #[error("{failed} of {total} test cases failed")]
    SuiteFailed { failed: usize, total: usize },

    // === Configuration Errors ===
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid configuration file: {0}")]
    ConfigParse(String),

    // === IO Errors ===
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    #[error("Failed to read file '{path}': {error}")]
    FileRead { path: String, error: String },

    // === Serialization Errors ===
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // === Internal Errors ===
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create an unknown media format error listing the registry keys
    pub fn unknown_media_format<S: AsRef<str>>(
        registry: &'static str,
        key: &str,
        known: &[S],
    ) -> Self {
        Self::UnknownMediaFormat {
            registry,
            key: key.to_string(),
            known: known.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", "),
        }
    }

    /// Create an invalid session parameter error
    pub fn invalid_parameter(field: &'static str, value: &str) -> Self {
        Self::InvalidSessionParameter {
            field,
            value: value.to_string(),
        }
    }

    /// Create a binary not found error with search paths
    pub fn rxtxapp_not_found<S: AsRef<str>>(paths: &[S]) -> Self {
        Self::RxTxAppNotFound {
            searched: paths.iter().map(|s| s.as_ref()).collect::<Vec<_>>().join(", "),
        }
    }

    /// Create a session failed error
    pub fn session_failed(session: &str, detail: &str) -> Self {
        Self::SessionFailed {
            session: session.to_string(),
            detail: detail.to_string(),
        }
    }

    /// Create a timing violation error
    pub fn timing_violation(session: &str, expected: String, observed: String) -> Self {
        Self::TimingViolation {
            session: session.to_string(),
            expected,
            observed,
        }
    }

    /// Whether this error was raised while building a configuration,
    /// before anything was launched
    pub fn is_configuration_error(&self) -> bool {
        matches!(
            self,
            Error::UnknownMediaFormat { .. }
                | Error::InvalidSessionParameter { .. }
                | Error::NotEnoughPorts { .. }
                | Error::EmptyConfiguration
        )
    }
}
