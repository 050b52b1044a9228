//! Classifier and scaler artifact documents.
//!
//! Both halves of the artifact are exported from the training pipeline as
//! JSON. The scaler is a fitted standardization (`(x - mean) / scale`) and
//! the classifier a fitted binary logistic regression.

use std::path::{Path, PathBuf};

use common::FEATURE_COUNT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::error::{GatewayError, Result};

/// Default file name of the exported classifier.
pub const DEFAULT_MODEL_FILE: &str = "risk_model.json";

/// Default file name of the exported feature scaler.
pub const DEFAULT_SCALER_FILE: &str = "scaler.json";

/// Filesystem locations of the two artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl ArtifactPaths {
    /// Creates paths from explicit file locations.
    pub fn new(model: impl Into<PathBuf>, scaler: impl Into<PathBuf>) -> Self {
        Self {
            model: model.into(),
            scaler: scaler.into(),
        }
    }

    /// Uses the default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self::new(dir.join(DEFAULT_MODEL_FILE), dir.join(DEFAULT_SCALER_FILE))
    }
}

impl Default for ArtifactPaths {
    fn default() -> Self {
        Self::new(DEFAULT_MODEL_FILE, DEFAULT_SCALER_FILE)
    }
}

/// Fitted standardization applied to raw features before classification.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    pub mean: Vec<f64>,
    pub scale: Vec<f64>,
}

impl StandardScaler {
    pub fn new(mean: Vec<f64>, scale: Vec<f64>) -> Self {
        Self { mean, scale }
    }

    /// Standardizes a feature vector.
    pub fn transform(&self, features: &[f64; FEATURE_COUNT]) -> Result<[f64; FEATURE_COUNT]> {
        if self.mean.len() != FEATURE_COUNT || self.scale.len() != FEATURE_COUNT {
            return Err(GatewayError::Scoring(format!(
                "scaler has {} means and {} scales, expected {FEATURE_COUNT}",
                self.mean.len(),
                self.scale.len()
            )));
        }

        let mut scaled = [0.0; FEATURE_COUNT];
        let params = self.mean.iter().zip(&self.scale);
        for (i, (value, (mean, scale))) in features.iter().zip(params).enumerate() {
            let z = (value - mean) / scale;
            if !z.is_finite() {
                return Err(GatewayError::Scoring(format!(
                    "scaled feature {i} is not finite"
                )));
            }
            scaled[i] = z;
        }
        Ok(scaled)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        check_len("mean", self.mean.len())?;
        check_len("scale", self.scale.len())?;
        if self.mean.iter().any(|m| !m.is_finite()) {
            return Err("mean contains a non-finite value".to_string());
        }
        if self.scale.iter().any(|s| !s.is_finite() || *s == 0.0) {
            return Err("scale must be finite and non-zero".to_string());
        }
        Ok(())
    }
}

/// Fitted binary logistic regression over scaled features.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogisticRegression {
    pub coefficients: Vec<f64>,
    pub intercept: f64,
}

impl LogisticRegression {
    pub fn new(coefficients: Vec<f64>, intercept: f64) -> Self {
        Self {
            coefficients,
            intercept,
        }
    }

    /// Returns the probability of the positive (high-risk) class.
    pub fn predict_probability(&self, scaled: &[f64; FEATURE_COUNT]) -> f64 {
        let logit = self.intercept
            + self
                .coefficients
                .iter()
                .zip(scaled)
                .map(|(w, x)| w * x)
                .sum::<f64>();
        sigmoid(logit)
    }

    fn validate(&self) -> std::result::Result<(), String> {
        check_len("coefficients", self.coefficients.len())?;
        if !self.intercept.is_finite() || self.coefficients.iter().any(|w| !w.is_finite()) {
            return Err("weights must be finite".to_string());
        }
        Ok(())
    }
}

fn sigmoid(x: f64) -> f64 {
    1.0 / (1.0 + (-x).exp())
}

fn check_len(field: &str, len: usize) -> std::result::Result<(), String> {
    if len == FEATURE_COUNT {
        Ok(())
    } else {
        Err(format!("{field} has {len} entries, expected {FEATURE_COUNT}"))
    }
}

/// Immutable classifier and scaler pair.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelArtifact {
    classifier: LogisticRegression,
    scaler: StandardScaler,
}

impl ModelArtifact {
    /// Builds an artifact from in-memory parts, validating their shapes.
    pub fn new(classifier: LogisticRegression, scaler: StandardScaler) -> Result<Self> {
        classifier
            .validate()
            .map_err(|reason| invalid(DEFAULT_MODEL_FILE, reason))?;
        scaler
            .validate()
            .map_err(|reason| invalid(DEFAULT_SCALER_FILE, reason))?;
        Ok(Self { classifier, scaler })
    }

    /// Reads and validates both artifact files.
    pub async fn load(paths: &ArtifactPaths) -> Result<Self> {
        let classifier: LogisticRegression = read_document(&paths.model).await?;
        classifier
            .validate()
            .map_err(|reason| invalid(&paths.model, reason))?;

        let scaler: StandardScaler = read_document(&paths.scaler).await?;
        scaler
            .validate()
            .map_err(|reason| invalid(&paths.scaler, reason))?;

        Ok(Self { classifier, scaler })
    }

    /// Writes both halves to the given paths.
    pub async fn save(&self, paths: &ArtifactPaths) -> Result<()> {
        write_document(&paths.model, &self.classifier).await?;
        write_document(&paths.scaler, &self.scaler).await
    }

    pub fn classifier(&self) -> &LogisticRegression {
        &self.classifier
    }

    pub fn scaler(&self) -> &StandardScaler {
        &self.scaler
    }

    /// Scales the features and returns the positive-class probability.
    pub fn predict(&self, features: &[f64; FEATURE_COUNT]) -> Result<f64> {
        let scaled = self.scaler.transform(features)?;
        let probability = self.classifier.predict_probability(&scaled);
        if !(0.0..=1.0).contains(&probability) {
            return Err(GatewayError::Scoring(format!(
                "probability {probability} outside [0, 1]"
            )));
        }
        Ok(probability)
    }
}

fn invalid(path: impl Into<PathBuf>, reason: String) -> GatewayError {
    GatewayError::ArtifactInvalid {
        path: path.into(),
        reason,
    }
}

async fn read_document<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let bytes = tokio::fs::read(path).await.map_err(|source| {
        if source.kind() == std::io::ErrorKind::NotFound {
            GatewayError::ArtifactMissing {
                path: path.to_path_buf(),
            }
        } else {
            GatewayError::Io {
                path: path.to_path_buf(),
                source,
            }
        }
    })?;
    serde_json::from_slice(&bytes).map_err(|e| invalid(path, e.to_string()))
}

async fn write_document<T: Serialize>(path: &Path, document: &T) -> Result<()> {
    let bytes = serde_json::to_vec_pretty(document).map_err(|e| invalid(path, e.to_string()))?;
    tokio::fs::write(path, bytes)
        .await
        .map_err(|source| GatewayError::Io {
            path: path.to_path_buf(),
            source,
        })
}
