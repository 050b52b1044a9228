//! Risk categories and the probability-to-category policy.

use serde::{Deserialize, Serialize};

/// Probability at which a screening moves from Low to Medium risk.
pub const MEDIUM_RISK_THRESHOLD: f64 = 0.40;

/// Probability at which a screening moves from Medium to High risk.
pub const HIGH_RISK_THRESHOLD: f64 = 0.70;

/// Discrete risk band reported to health workers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskCategory {
    #[serde(rename = "Low Risk")]
    Low,
    #[serde(rename = "Medium Risk")]
    Medium,
    #[serde(rename = "High Risk")]
    High,
}

impl RiskCategory {
    /// Returns the label used on the wire.
    pub fn label(&self) -> &'static str {
        match self {
            RiskCategory::Low => "Low Risk",
            RiskCategory::Medium => "Medium Risk",
            RiskCategory::High => "High Risk",
        }
    }

    /// Returns the traffic-light color for this band.
    pub fn color(&self) -> RiskColor {
        match self {
            RiskCategory::Low => RiskColor::Green,
            RiskCategory::Medium => RiskColor::Amber,
            RiskCategory::High => RiskColor::Red,
        }
    }
}

impl std::fmt::Display for RiskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Traffic-light color shown alongside the category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskColor {
    Green,
    Amber,
    Red,
}

impl std::fmt::Display for RiskColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RiskColor::Green => "Green",
            RiskColor::Amber => "Amber",
            RiskColor::Red => "Red",
        };
        f.write_str(s)
    }
}

/// Maps a positive-class probability to its risk band and color.
///
/// Lower bounds are inclusive: `0.40` is Medium and `0.70` is High.
/// NaN fails both comparisons and lands in High.
pub fn categorize(probability: f64) -> (RiskCategory, RiskColor) {
    let category = if probability < MEDIUM_RISK_THRESHOLD {
        RiskCategory::Low
    } else if probability < HIGH_RISK_THRESHOLD {
        RiskCategory::Medium
    } else {
        RiskCategory::High
    };
    (category, category.color())
}

/// Rounds a probability to two decimal places.
pub fn round_probability(probability: f64) -> f64 {
    (probability * 100.0).round() / 100.0
}

/// Response body for a single risk prediction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RiskAssessment {
    pub risk_category: RiskCategory,
    pub probability: f64,
    pub color: RiskColor,
}

impl RiskAssessment {
    /// Builds an assessment from a raw classifier probability.
    ///
    /// The probability is rounded first and the rounded value is categorized,
    /// so the reported probability and band never disagree.
    pub fn from_probability(probability: f64) -> Self {
        let probability = round_probability(probability);
        let (risk_category, color) = categorize(probability);
        Self {
            risk_category,
            probability,
            color,
        }
    }

    /// Returns true if this assessment should alert a health worker.
    pub fn is_high_risk(&self) -> bool {
        self.risk_category == RiskCategory::High
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categorize_boundaries() {
        assert_eq!(categorize(0.39999), (RiskCategory::Low, RiskColor::Green));
        assert_eq!(categorize(0.4), (RiskCategory::Medium, RiskColor::Amber));
        assert_eq!(categorize(0.69999), (RiskCategory::Medium, RiskColor::Amber));
        assert_eq!(categorize(0.7), (RiskCategory::High, RiskColor::Red));
    }

    #[test]
    fn categorize_extremes() {
        assert_eq!(categorize(0.0).0, RiskCategory::Low);
        assert_eq!(categorize(1.0).0, RiskCategory::High);
        assert_eq!(categorize(-3.0).0, RiskCategory::Low);
        assert_eq!(categorize(f64::INFINITY).0, RiskCategory::High);
        assert_eq!(categorize(f64::NAN).0, RiskCategory::High);
    }

    #[test]
    fn categorize_color_always_matches_category() {
        for i in 0..=1000 {
            let p = f64::from(i) / 1000.0;
            let (category, color) = categorize(p);
            assert_eq!(category.color(), color);
        }
    }

    #[test]
    fn round_probability_two_decimals() {
        assert_eq!(round_probability(0.8765), 0.88);
        assert_eq!(round_probability(0.123), 0.12);
        assert_eq!(round_probability(1.0), 1.0);
        assert_eq!(round_probability(0.0), 0.0);
    }

    #[test]
    fn assessment_categorizes_rounded_probability() {
        let assessment = RiskAssessment::from_probability(0.397);
        assert_eq!(assessment.probability, 0.40);
        assert_eq!(assessment.risk_category, RiskCategory::Medium);
        assert_eq!(assessment.color, RiskColor::Amber);
    }

    #[test]
    fn assessment_serializes_wire_labels() {
        let assessment = RiskAssessment::from_probability(0.91);
        let json = serde_json::to_value(assessment).unwrap();
        assert_eq!(json["risk_category"], "High Risk");
        assert_eq!(json["probability"], 0.91);
        assert_eq!(json["color"], "Red");
        assert!(assessment.is_high_risk());
    }

    #[test]
    fn category_display_uses_label() {
        assert_eq!(RiskCategory::Medium.to_string(), "Medium Risk");
        assert_eq!(RiskColor::Amber.to_string(), "Amber");
    }
}
