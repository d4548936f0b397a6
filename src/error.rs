use crate::models::GenerationMode;
use thiserror::Error;

/// Input problems detected before any network call is made.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Please enter some content first")]
    NoContentProvided,

    #[error("Please enter a value for {0} mode")]
    EmptyInput(GenerationMode),

    #[error("Please select at least one social platform and enter a URL")]
    NoPlatformSelected,

    #[error("Please enter an image URL or upload a file")]
    MissingImageSource,
}

#[derive(Debug, Error)]
pub enum QrError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Upload failed at {endpoint}: {message}. Make sure the backend is running and reachable")]
    UploadFailed { endpoint: String, message: String },

    #[error("Failed to generate QR code at {endpoint}: {message}. Make sure the backend is running and reachable")]
    RenderFailed { endpoint: String, message: String },

    #[error("A QR code generation is already in progress")]
    GenerationInProgress,

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl QrError {
    pub fn upload_failed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        QrError::UploadFailed {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    pub fn render_failed(endpoint: impl Into<String>, message: impl Into<String>) -> Self {
        QrError::RenderFailed {
            endpoint: endpoint.into(),
            message: message.into(),
        }
    }

    /// Detected locally, before the network was touched.
    pub fn is_validation(&self) -> bool {
        matches!(self, QrError::Validation(_))
    }

    /// Reported by (or while reaching) one of the remote services.
    pub fn is_boundary(&self) -> bool {
        matches!(
            self,
            QrError::UploadFailed { .. } | QrError::RenderFailed { .. }
        )
    }

    pub fn endpoint(&self) -> Option<&str> {
        match self {
            QrError::UploadFailed { endpoint, .. } | QrError::RenderFailed { endpoint, .. } => {
                Some(endpoint)
            }
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, QrError>;
