//! Error types for rowdiff operations

use thiserror::Error;

pub type Result<T> = std::result::Result<T, RowdiffError>;

#[derive(Error, Debug)]
pub enum RowdiffError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Format error: {message}")]
    Format { message: String },

    #[error("Spreadsheet codec unavailable: {message}")]
    CodecUnavailable { message: String },

    #[error("Invalid input: {message}")]
    InvalidInput { message: String },

    #[error("Generic error: {0}")]
    Generic(#[from] anyhow::Error),
}

impl RowdiffError {
    pub fn format_error(msg: impl Into<String>) -> Self {
        Self::Format {
            message: msg.into(),
        }
    }

    pub fn codec_unavailable(msg: impl Into<String>) -> Self {
        Self::CodecUnavailable {
            message: msg.into(),
        }
    }

    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput {
            message: msg.into(),
        }
    }

    /// True when the content could not be interpreted as tabular data,
    /// including the codec-unavailable case for spreadsheet inputs.
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            Self::Format { .. } | Self::CodecUnavailable { .. }
        )
    }
}
