//! CLI-specific error types and exit code mapping

use logscope_core::error::{AnalysisError, LogScopeError};
use logscope_log_analysis::LogAnalysisError;

/// CLI-specific error type.
///
/// Each variant carries enough context for a user-friendly message.
/// The `exit_code()` method maps errors to standard Unix exit codes.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Configuration loading or validation failure.
    #[error("configuration error: {0}")]
    Config(String),

    /// A subcommand-specific operation failed.
    #[error("{0}")]
    Command(String),

    /// JSON serialisation failed during output rendering.
    #[error("json output error: {0}")]
    JsonSerialize(#[from] serde_json::Error),

    /// IO error (stdout write, etc.).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Wrapped domain error from logscope-core.
    #[error("{0}")]
    Core(#[from] LogScopeError),

    /// Log analysis domain error (source read, CSV write).
    #[error("{0}")]
    Analysis(#[from] LogAnalysisError),
}

impl CliError {
    /// Map the error to a process exit code.
    ///
    /// | Code | Meaning                              |
    /// |------|--------------------------------------|
    /// | 0    | Success                              |
    /// | 1    | General / command error               |
    /// | 2    | Configuration error                   |
    /// | 10   | IO error / log source unavailable     |
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Config(_) => 2,
            Self::Io(_) => 10,
            Self::Core(LogScopeError::Config(_)) => 2,
            Self::Core(LogScopeError::Io(_)) => 10,
            Self::Core(LogScopeError::Analysis(AnalysisError::SourceUnavailable(_))) => 10,
            Self::Analysis(LogAnalysisError::SourceUnavailable { .. }) => 10,
            Self::JsonSerialize(_) | Self::Command(_) | Self::Core(_) | Self::Analysis(_) => 1,
        }
    }
}
