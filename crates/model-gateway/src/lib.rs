//! Model gateway for the vitals risk classifier.
//!
//! Wraps an externally trained binary classifier and its fitted feature
//! scaler. The pair is read from disk on first use and cached for the
//! lifetime of the process.

pub mod artifact;
pub mod error;
pub mod gateway;

pub use artifact::{
    ArtifactPaths, DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE, LogisticRegression, ModelArtifact,
    StandardScaler,
};
pub use error::{GatewayError, Result};
pub use gateway::ModelGateway;
