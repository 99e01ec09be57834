//! Longitudinal risk profiles.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Risk stratum derived from a 0–100 score by fixed cutoffs.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Direction of the risk-score change over the last three visits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Ascending,
    Descending,
    Stable,
}

/// Per-patient aggregate of current and historical risk.
///
/// Computed on demand from scratch on every call; the engine never persists
/// or caches profiles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskProfile {
    pub patient_id: Uuid,

    /// Final risk score in `[0, 100]`, rounded to the nearest integer.
    pub score: u8,

    pub risk_level: RiskLevel,

    /// Named active risk factors, deduplicated, in detection order.
    pub risk_factors: Vec<String>,

    pub trend: TrendDirection,

    /// Number of historical visits considered.
    pub visits_considered: usize,

    /// Number of historical alerts considered.
    pub alerts_considered: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_risk_level_ordering() {
        assert!(RiskLevel::Critical > RiskLevel::High);
        assert!(RiskLevel::Medium > RiskLevel::Low);
    }

    #[test]
    fn test_profile_round_trip() {
        let profile = RiskProfile {
            patient_id: Uuid::new_v4(),
            score: 72,
            risk_level: RiskLevel::High,
            risk_factors: vec!["hipertension".into(), "taquicardia".into()],
            trend: TrendDirection::Ascending,
            visits_considered: 5,
            alerts_considered: 2,
        };

        let json = serde_json::to_string(&profile).expect("profile should serialize");
        let back: RiskProfile =
            serde_json::from_str(&json).expect("profile should deserialize");
        assert_eq!(back, profile);
        assert!(json.contains(r#""trend":"ascending""#));
    }
}
