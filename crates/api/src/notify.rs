//! ASHA alert side-channel for high-risk screenings.
//!
//! Alerts are fire-and-forget: [`dispatch`] hands the alert to a spawned
//! task and returns immediately, so a slow or failing channel never affects
//! the prediction response.

use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use common::{RiskAssessment, Vitals};
use serde::Serialize;
use thiserror::Error;
use tokio::task::JoinHandle;
use uuid::Uuid;

/// Errors raised by a notification channel.
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("Notification channel unavailable: {0}")]
    Unavailable(String),
}

/// Alert sent to a community health worker for a high-risk patient.
#[derive(Debug, Clone, Serialize)]
pub struct AshaAlert {
    pub alert_id: Uuid,
    pub raised_at: DateTime<Utc>,
    pub vitals: Vitals,
    pub probability: f64,
}

impl AshaAlert {
    pub fn new(vitals: Vitals, assessment: &RiskAssessment) -> Self {
        Self {
            alert_id: Uuid::new_v4(),
            raised_at: Utc::now(),
            vitals,
            probability: assessment.probability,
        }
    }
}

/// Channel that delivers ASHA alerts.
#[async_trait]
pub trait AlertNotifier: Send + Sync {
    async fn notify(&self, alert: &AshaAlert) -> Result<(), NotifyError>;
}

/// Writes alerts to the log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl AlertNotifier for LogNotifier {
    async fn notify(&self, alert: &AshaAlert) -> Result<(), NotifyError> {
        tracing::warn!(
            alert_id = %alert.alert_id,
            raised_at = %alert.raised_at.to_rfc3339(),
            probability = alert.probability,
            glucose = alert.vitals.glucose,
            blood_pressure = alert.vitals.blood_pressure,
            bmi = alert.vitals.bmi,
            "ALERT: patient high risk, notify ASHA"
        );
        Ok(())
    }
}

#[derive(Debug, Default)]
struct InMemoryNotifierState {
    alerts: Vec<AshaAlert>,
    calls: usize,
    fail: bool,
}

/// Records alerts in memory. Used in tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryNotifier {
    state: Arc<RwLock<InMemoryNotifierState>>,
}

impl InMemoryNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the notifier to reject every alert.
    pub fn set_fail(&self, fail: bool) {
        self.state.write().unwrap().fail = fail;
    }

    pub fn alerts(&self) -> Vec<AshaAlert> {
        self.state.read().unwrap().alerts.clone()
    }

    pub fn alert_count(&self) -> usize {
        self.state.read().unwrap().alerts.len()
    }

    /// Number of delivery attempts, including rejected ones.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls
    }
}

#[async_trait]
impl AlertNotifier for InMemoryNotifier {
    async fn notify(&self, alert: &AshaAlert) -> Result<(), NotifyError> {
        let mut state = self.state.write().unwrap();
        state.calls += 1;
        if state.fail {
            return Err(NotifyError::Unavailable("notifier disabled".to_string()));
        }
        state.alerts.push(alert.clone());
        Ok(())
    }
}

/// Sends the alert on a background task.
pub fn dispatch(notifier: Arc<dyn AlertNotifier>, alert: AshaAlert) -> JoinHandle<()> {
    tokio::spawn(async move {
        match notifier.notify(&alert).await {
            Ok(()) => {
                metrics::counter!("asha_alerts_total").increment(1);
            }
            Err(e) => {
                metrics::counter!("asha_alert_failures_total").increment(1);
                tracing::error!(alert_id = %alert.alert_id, error = %e, "failed to deliver ASHA alert");
            }
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn high_risk_alert() -> AshaAlert {
        let assessment = RiskAssessment::from_probability(0.93);
        AshaAlert::new(Vitals::new(220.0, 90.0, 27.0), &assessment)
    }

    #[tokio::test]
    async fn test_dispatch_delivers_alert() {
        let notifier = InMemoryNotifier::new();
        dispatch(Arc::new(notifier.clone()), high_risk_alert())
            .await
            .unwrap();

        let alerts = notifier.alerts();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].probability, 0.93);
        assert_eq!(alerts[0].vitals.glucose, 220.0);
    }

    #[tokio::test]
    async fn test_dispatch_swallows_failure() {
        let notifier = InMemoryNotifier::new();
        notifier.set_fail(true);

        let result = dispatch(Arc::new(notifier.clone()), high_risk_alert()).await;
        assert!(result.is_ok());
        assert_eq!(notifier.call_count(), 1);
        assert_eq!(notifier.alert_count(), 0);
    }

    #[tokio::test]
    async fn test_log_notifier_succeeds() {
        assert!(LogNotifier.notify(&high_risk_alert()).await.is_ok());
    }

    #[test]
    fn test_alert_ids_are_unique() {
        assert_ne!(high_risk_alert().alert_id, high_risk_alert().alert_id);
    }
}
