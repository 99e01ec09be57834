//! # ALMA engine
//!
//! Clinical alarm evaluation and risk scoring for maternal-health case
//! management:
//! - Ordered, first-match-wins alarm cascade over an observation + reported
//!   symptoms
//! - Additive 0–100 risk scoring with short-horizon trend analysis
//! - Longitudinal per-patient risk profiles combining current and historical
//!   data
//!
//! The engine consumes read-only snapshots and produces result values; it
//! performs no I/O of its own. **No service concerns**: persistence,
//! authentication, transport and notification delivery belong to the
//! surrounding service layer, which supplies history through the
//! [`profile::HistoryStore`] seam.

pub mod cascade;
pub mod classifier;
pub mod config;
pub mod profile;
pub mod recommendations;
pub mod score;
pub mod thresholds;
pub mod trend;

pub use alma_types::{
    AlarmResult, AlarmType, AlertRecord, Observation, PatientAttributes, PatientHistory,
    PriorityLevel, RiskLevel, RiskProfile, SymptomSet, TrendDirection, VisitRecord,
};
pub use config::{ScoringConfig, SharedScoringConfig};
pub use profile::{HistoryStore, HistoryStoreError, ProfileError, ProfileResult, RiskProfileService};
pub use thresholds::ThresholdCatalog;

/// Alarm evaluation entry point.
///
/// Holds the threshold catalog resolved at startup and exposes the pure
/// evaluation contracts. Stateless beyond the catalog: safe to share and to
/// call concurrently without synchronisation.
#[derive(Debug, Clone, Default)]
pub struct AlarmService {
    thresholds: ThresholdCatalog,
}

impl AlarmService {
    /// Creates a service with the evidence-based default catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a service with an overriding catalog.
    pub fn with_thresholds(thresholds: ThresholdCatalog) -> Self {
        Self { thresholds }
    }

    pub fn thresholds(&self) -> &ThresholdCatalog {
        &self.thresholds
    }

    /// Runs the alarm cascade over one observation + symptom set.
    ///
    /// # Returns
    ///
    /// The highest-priority matching alarm with its score and
    /// recommendations folded in, or a null result when no rule matches.
    /// Missing observation fields never fail the evaluation.
    pub fn evaluate(&self, observation: &Observation, symptoms: &SymptomSet) -> AlarmResult {
        cascade::run_cascade(observation, symptoms, &self.thresholds)
    }

    /// Computes the additive 0–100 risk score, independent of the cascade.
    ///
    /// # Arguments
    ///
    /// * `history` - Optional most-recent-first slice of prior visits; when
    ///   present the trend bonus applies.
    pub fn score(
        &self,
        observation: &Observation,
        symptoms: &SymptomSet,
        history: Option<&[VisitRecord]>,
    ) -> u8 {
        score::risk_score(observation, symptoms, history, &self.thresholds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_inputs_produce_null_alarm_and_zero_score() {
        let service = AlarmService::new();
        let result = service.evaluate(&Observation::default(), &SymptomSet::default());
        assert_eq!(result.alarm_type, None);
        assert_eq!(result.priority, None);
        assert_eq!(service.score(&Observation::default(), &SymptomSet::default(), None), 0);
    }

    #[test]
    fn test_evaluate_and_score_diverge_by_design() {
        // The cascade reports the matched rule's score; the calculator sums
        // contributions. HR 105 alone: tier score 45, additive score 10.
        let service = AlarmService::new();
        let obs = Observation {
            heart_rate: Some(105),
            ..Default::default()
        };
        let result = service.evaluate(&obs, &SymptomSet::default());
        assert_eq!(result.alarm_type, Some(AlarmType::VitalAlteration));
        assert_eq!(result.score, 45);
        assert_eq!(service.score(&obs, &SymptomSet::default(), None), 10);
    }

    #[test]
    fn test_cascade_priority_dominates_additive_severity() {
        let service = AlarmService::new();
        let obs = Observation {
            heart_rate: Some(130),
            temperature: Some(39.5),
            ..Default::default()
        };
        let symptoms = SymptomSet::new(["sangrado_masivo"]);
        let result = service.evaluate(&obs, &symptoms);
        assert_eq!(result.alarm_type, Some(AlarmType::ObstetricEmergency));
        assert_eq!(result.priority, Some(PriorityLevel::Critical));
        assert_eq!(result.score, 100);
    }

    #[test]
    fn test_symptom_order_does_not_change_results() {
        let service = AlarmService::new();
        let obs = Observation {
            systolic: Some(165),
            diastolic: Some(100),
            ..Default::default()
        };
        let forward = SymptomSet::new(["dolor_cabeza_severo", "vision_borrosa"]);
        let reversed = SymptomSet::new(["vision_borrosa", "dolor_cabeza_severo"]);

        let a = service.evaluate(&obs, &forward);
        let b = service.evaluate(&obs, &reversed);
        assert_eq!(a.alarm_type, b.alarm_type);
        assert_eq!(a.score, b.score);
        assert_eq!(
            service.score(&obs, &forward, None),
            service.score(&obs, &reversed, None)
        );
    }

    #[test]
    fn test_repeated_evaluation_is_bit_identical() {
        let service = AlarmService::new();
        let obs = Observation {
            temperature: Some(38.6),
            heart_rate: Some(112),
            ..Default::default()
        };
        let symptoms = SymptomSet::new(["escalofrios", "confusion_mental"]);

        let first = service.evaluate(&obs, &symptoms);
        let second = service.evaluate(&obs, &symptoms);
        assert_eq!(first, second);
        assert_eq!(
            service.score(&obs, &symptoms, None),
            service.score(&obs, &symptoms, None)
        );
    }

    #[test]
    fn test_custom_catalog_shifts_the_rules() {
        let thresholds = ThresholdCatalog {
            heart_rate_high: 90,
            ..Default::default()
        };
        let service = AlarmService::with_thresholds(thresholds);
        let obs = Observation {
            heart_rate: Some(95),
            ..Default::default()
        };
        let result = service.evaluate(&obs, &SymptomSet::default());
        assert_eq!(result.alarm_type, Some(AlarmType::VitalAlteration));
    }
}
