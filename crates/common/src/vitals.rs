use serde::{Deserialize, Serialize};

/// Number of features the classifier is trained on.
pub const FEATURE_COUNT: usize = 3;

/// Vital measurements for one patient screening.
///
/// Values are taken as-is: there is no physiological range check, only the
/// type check performed during deserialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Vitals {
    /// Plasma glucose in mg/dL.
    pub glucose: f64,
    /// Blood pressure in mmHg.
    pub blood_pressure: f64,
    /// Body-mass index in kg/m².
    pub bmi: f64,
}

impl Vitals {
    /// Creates a new vitals triple.
    pub fn new(glucose: f64, blood_pressure: f64, bmi: f64) -> Self {
        Self {
            glucose,
            blood_pressure,
            bmi,
        }
    }

    /// Returns the feature vector in training order.
    ///
    /// The scaler and classifier were fitted on `[glucose, blood_pressure, bmi]`;
    /// any other order silently produces wrong predictions.
    pub fn features(&self) -> [f64; FEATURE_COUNT] {
        [self.glucose, self.blood_pressure, self.bmi]
    }
}
