//! Error types for pwlctl CLI

use pwl_codec::PwlError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("Config file not found: {0}")]
    ConfigNotFound(String),

    #[error("Unsupported config format '{0}', expected .yaml, .yml or .json")]
    UnsupportedFormat(String),

    #[error("Verification failed: {failed} of {total} scenario runs out of bounds")]
    VerificationFailed { failed: usize, total: usize },

    #[error("Codec error: {0}")]
    Codec(#[from] PwlError),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::VerificationFailed { .. } => 2,
            Self::ConfigNotFound(_)
            | Self::UnsupportedFormat(_)
            | Self::JsonError(_)
            | Self::YamlError(_) => 3,
            Self::Codec(PwlError::MisalignedStream { .. } | PwlError::BufferLengthMismatch { .. }) => 4,
            Self::Codec(_) => 3,
            Self::IoError(_) => 5,
        }
    }

    /// Stable name used in JSON error output.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ConfigNotFound(_) => "config_not_found",
            Self::UnsupportedFormat(_) => "unsupported_format",
            Self::VerificationFailed { .. } => "verification_failed",
            Self::Codec(_) => "codec",
            Self::IoError(_) => "io",
            Self::JsonError(_) => "json",
            Self::YamlError(_) => "yaml",
        }
    }
}
