use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading the artifact or scoring vitals.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// An artifact file was absent at load time. Deployment fault.
    #[error("Model artifact missing: {}", path.display())]
    ArtifactMissing { path: PathBuf },

    /// An artifact file exists but could not be parsed or is inconsistent.
    #[error("Model artifact invalid: {}: {reason}", path.display())]
    ArtifactInvalid { path: PathBuf, reason: String },

    /// Reading an artifact file failed for a reason other than absence.
    #[error("Failed to read model artifact {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Scaling or prediction produced an unusable value.
    #[error("Scoring failed: {0}")]
    Scoring(String),
}

impl GatewayError {
    /// Returns true if the error comes from a missing or broken deployment artifact.
    pub fn is_artifact_fault(&self) -> bool {
        matches!(
            self,
            GatewayError::ArtifactMissing { .. } | GatewayError::ArtifactInvalid { .. }
        )
    }
}

/// Result type for gateway operations.
pub type Result<T> = std::result::Result<T, GatewayError>;
