use thiserror::Error;

use crate::engine::Diagnostic;

/// Invocation syntax shown by the usage error.
pub const USAGE: &str = "Usage: cycle-video <input-file>\n\nExample:\n  cycle-video clip.mp4";

/// Main error type for the cycle-video library
#[derive(Error, Debug)]
pub enum CycleError {
    /// No input path was given.
    #[error("missing input file argument")]
    Usage,

    #[error("Input file not found: {path}")]
    InputNotFound { path: String },

    #[error("Input is not a regular file: {path}")]
    InputNotAFile { path: String },

    #[error("Input file is not readable: {path}: {reason}")]
    InputNotReadable { path: String, reason: String },

    /// The engine ran (or failed to start) and reported failure.
    #[error("{engine} failed: {diagnostic}")]
    Engine { engine: String, diagnostic: Diagnostic },

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-specific errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to parse configuration file: {path}: {reason}")]
    ParseFailed { path: String, reason: String },

    #[error("Invalid configuration value: {key} = {value}")]
    InvalidValue { key: String, value: String },

    #[error("Configuration file not found: {path}")]
    FileNotFound { path: String },
}

/// Convenience type alias for Results using CycleError
pub type Result<T> = std::result::Result<T, CycleError>;

impl CycleError {
    /// Process exit code for this error.
    ///
    /// Usage errors, precondition failures and engine failures all share
    /// code 1; the message text is what tells them apart.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// True for errors raised before anything touched the filesystem or the engine.
    pub fn is_precondition(&self) -> bool {
        matches!(
            self,
            Self::InputNotFound { .. } | Self::InputNotAFile { .. } | Self::InputNotReadable { .. }
        )
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            Self::Usage => USAGE.to_string(),
            Self::InputNotFound { path } => {
                format!("Input file '{}' not found. Please check the path and try again.", path)
            }
            Self::InputNotAFile { path } => {
                format!("Input '{}' is not a regular file. Please pass a video file.", path)
            }
            Self::InputNotReadable { path, reason } => {
                format!("Input file '{}' cannot be read ({}). Please check its permissions.", path, reason)
            }
            // The diagnostic stays in the debug log.
            Self::Engine { .. } => "Video processing failed".to_string(),
            Self::Config(ConfigError::FileNotFound { path }) => {
                format!("Configuration file '{}' not found.", path)
            }
            _ => self.to_string(),
        }
    }
}
