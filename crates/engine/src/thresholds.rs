//! Clinical threshold catalog.
//!
//! One scalar per clinical cut point. The defaults are the evidence-based
//! values the evaluation rules were validated against; a deployment may
//! deserialize an overriding catalog at startup, but the engine itself never
//! mutates it.

use serde::{Deserialize, Serialize};

/// Fixed table of clinical cut points consumed by every evaluation component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ThresholdCatalog {
    /// Systolic pressure at or above which hypertension is flagged (mmHg).
    pub systolic_high: u16,
    /// Systolic pressure at or above which hypertension is severe (mmHg).
    pub systolic_severe: u16,
    /// Systolic pressure at or below which hypotension is flagged (mmHg).
    pub systolic_low: u16,

    pub diastolic_high: u16,
    pub diastolic_severe: u16,
    pub diastolic_low: u16,

    /// Heart rate high/severe/low cut points (bpm).
    pub heart_rate_high: u16,
    pub heart_rate_severe: u16,
    pub heart_rate_low: u16,

    /// Respiratory rate high/severe/low cut points (breaths per minute).
    pub respiratory_rate_high: u16,
    pub respiratory_rate_severe: u16,
    pub respiratory_rate_low: u16,

    /// Temperature high/severe/low cut points (°C).
    pub temperature_high: f64,
    pub temperature_severe: f64,
    pub temperature_low: f64,

    /// Gestational age below which labor is premature (completed weeks).
    pub premature_weeks: u16,
    /// Gestational age below which labor is very premature (completed weeks).
    pub very_premature_weeks: u16,

    /// Maximum healthy weight gain per week (kg).
    pub weekly_weight_gain_high: f64,
}

impl Default for ThresholdCatalog {
    fn default() -> Self {
        Self {
            systolic_high: 140,
            systolic_severe: 160,
            systolic_low: 90,
            diastolic_high: 90,
            diastolic_severe: 110,
            diastolic_low: 60,
            heart_rate_high: 100,
            heart_rate_severe: 120,
            heart_rate_low: 60,
            respiratory_rate_high: 24,
            respiratory_rate_severe: 30,
            respiratory_rate_low: 12,
            temperature_high: 38.0,
            temperature_severe: 39.0,
            temperature_low: 36.0,
            premature_weeks: 37,
            very_premature_weeks: 32,
            weekly_weight_gain_high: 1.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_carries_reference_values() {
        let catalog = ThresholdCatalog::default();
        assert_eq!(catalog.systolic_high, 140);
        assert_eq!(catalog.diastolic_severe, 110);
        assert_eq!(catalog.heart_rate_severe, 120);
        assert_eq!(catalog.respiratory_rate_high, 24);
        assert_eq!(catalog.temperature_high, 38.0);
        assert_eq!(catalog.very_premature_weeks, 32);
        assert_eq!(catalog.weekly_weight_gain_high, 1.0);
    }

    #[test]
    fn test_partial_override_keeps_remaining_defaults() {
        let catalog: ThresholdCatalog =
            serde_json::from_str(r#"{"temperature_high":37.8}"#)
                .expect("partial catalog should deserialize");
        assert_eq!(catalog.temperature_high, 37.8);
        assert_eq!(catalog.systolic_high, 140);
    }
}
