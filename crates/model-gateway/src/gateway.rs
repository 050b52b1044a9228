//! Lazily loaded, process-wide model gateway.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use common::Vitals;
use tokio::sync::OnceCell;

use crate::artifact::{ArtifactPaths, ModelArtifact};
use crate::error::Result;

/// Scores vitals against the trained classifier.
///
/// The artifact is read on the first call to [`ModelGateway::ensure_loaded`]
/// (or [`ModelGateway::score`]) and cached afterwards. Concurrent first
/// callers wait on the same load, so the files are read at most once. A
/// failed load leaves the cache empty and the next call checks the
/// filesystem again.
#[derive(Debug)]
pub struct ModelGateway {
    paths: ArtifactPaths,
    artifact: OnceCell<ModelArtifact>,
    load_attempts: AtomicUsize,
}

impl ModelGateway {
    /// Creates an unloaded gateway reading from `paths`.
    pub fn new(paths: ArtifactPaths) -> Self {
        Self {
            paths,
            artifact: OnceCell::new(),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Creates a gateway around an artifact that is already in memory.
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            paths: ArtifactPaths::default(),
            artifact: OnceCell::new_with(Some(artifact)),
            load_attempts: AtomicUsize::new(0),
        }
    }

    /// Returns the configured artifact paths.
    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    /// Returns true once the artifact is cached.
    pub fn is_loaded(&self) -> bool {
        self.artifact.initialized()
    }

    /// Number of times the artifact files have been read from disk.
    pub fn load_attempts(&self) -> usize {
        self.load_attempts.load(Ordering::SeqCst)
    }

    /// Loads the artifact if it is not cached yet.
    pub async fn ensure_loaded(&self) -> Result<&ModelArtifact> {
        self.artifact
            .get_or_try_init(|| async {
                self.load_attempts.fetch_add(1, Ordering::SeqCst);
                match ModelArtifact::load(&self.paths).await {
                    Ok(artifact) => {
                        metrics::counter!("model_artifact_loads_total").increment(1);
                        tracing::info!(
                            model = %self.paths.model.display(),
                            scaler = %self.paths.scaler.display(),
                            "model artifact loaded"
                        );
                        Ok(artifact)
                    }
                    Err(e) => {
                        tracing::warn!(error = %e, "model artifact load failed");
                        Err(e)
                    }
                }
            })
            .await
    }

    /// Returns the positive-class probability for the given vitals.
    pub async fn score(&self, vitals: &Vitals) -> Result<f64> {
        let artifact = self.ensure_loaded().await?;

        let start = Instant::now();
        let result = artifact.predict(&vitals.features());
        metrics::histogram!("model_score_duration_seconds").record(start.elapsed().as_secs_f64());

        if let Err(ref e) = result {
            tracing::warn!(error = %e, "scoring failed");
            tracing::debug!(?vitals, "vitals for failed score");
        }
        result
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::{LogisticRegression, StandardScaler};
    use crate::error::GatewayError;

    fn artifact() -> ModelArtifact {
        ModelArtifact::new(
            LogisticRegression::new(vec![1.5, 0.6, 0.4], -0.5),
            StandardScaler::new(vec![120.0, 72.0, 32.0], vec![30.0, 12.0, 7.0]),
        )
        .unwrap()
    }

    #[tokio::test]
    async fn from_artifact_is_preloaded() {
        let gateway = ModelGateway::from_artifact(artifact());
        assert!(gateway.is_loaded());

        let p = gateway.score(&Vitals::new(220.0, 90.0, 27.0)).await.unwrap();
        assert!(p > 0.9 && p <= 1.0);
        assert_eq!(gateway.load_attempts(), 0);
    }

    #[tokio::test]
    async fn score_is_deterministic() {
        let gateway = ModelGateway::from_artifact(artifact());
        let vitals = Vitals::new(125.0, 72.0, 32.0);
        let first = gateway.score(&vitals).await.unwrap();
        let second = gateway.score(&vitals).await.unwrap();
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn missing_artifact_fails_every_call() {
        let gateway = ModelGateway::new(ArtifactPaths::in_dir("/nonexistent/risk-artifacts"));

        for attempt in 1..=3 {
            let err = gateway
                .score(&Vitals::new(100.0, 80.0, 25.0))
                .await
                .unwrap_err();
            assert!(matches!(err, GatewayError::ArtifactMissing { .. }));
            assert_eq!(gateway.load_attempts(), attempt);
        }
        assert!(!gateway.is_loaded());
    }

    #[tokio::test]
    async fn overflowing_input_is_scoring_fault() {
        let gateway = ModelGateway::from_artifact(artifact());
        let err = gateway
            .score(&Vitals::new(f64::INFINITY, 80.0, 25.0))
            .await
            .unwrap_err();
        assert!(matches!(err, GatewayError::Scoring(_)));
    }
}
