//! Shared types for the vitals risk service.
//!
//! Holds the request payload ([`Vitals`]), the response shape
//! ([`RiskAssessment`]) and the probability-to-category policy that the
//! API applies to every score.

pub mod risk;
pub mod vitals;

pub use risk::{RiskAssessment, RiskCategory, RiskColor, categorize, round_probability};
pub use vitals::{FEATURE_COUNT, Vitals};
