//! Scoring configuration shared across concurrent evaluations.
//!
//! The weights, cutoffs and multipliers used by the risk profile aggregator
//! can be replaced wholesale by an administrative update while evaluations
//! are in flight. The contract is snapshot semantics: a reader observes
//! either the entirely-old or the entirely-new configuration, never a
//! half-applied mix. [`SharedScoringConfig`] therefore hands out `Arc`
//! snapshots and `replace` swaps the whole `Arc` under a short-lived write
//! lock; the configuration value itself is immutable.

use alma_types::{PriorityLevel, RiskLevel};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// Extra points granted from a patient's alert and visit history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HistoryWeights {
    /// Points when recent alerts reach [`Self::frequent_alerts_count`].
    pub frequent_alerts_bonus: u8,
    /// Rolling window for the recent-alert count, in days.
    pub frequent_alerts_window_days: i64,
    /// Recent alerts needed inside the window.
    pub frequent_alerts_count: usize,

    /// Points when the mean gap between visits exceeds the limit.
    pub spaced_visits_bonus: u8,
    /// Mean inter-visit gap limit, in days.
    pub spaced_visits_gap_days: f64,

    /// Points when historical critical alerts reach the count below.
    pub critical_history_bonus: u8,
    pub critical_history_count: usize,
}

impl Default for HistoryWeights {
    fn default() -> Self {
        Self {
            frequent_alerts_bonus: 15,
            frequent_alerts_window_days: 30,
            frequent_alerts_count: 3,
            spaced_visits_bonus: 8,
            spaced_visits_gap_days: 35.0,
            critical_history_bonus: 12,
            critical_history_count: 2,
        }
    }
}

/// Score cutoffs shared by risk levels and score-derived priorities.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskCutoffs {
    pub critical: u8,
    pub high: u8,
    pub medium: u8,
}

impl Default for RiskCutoffs {
    fn default() -> Self {
        Self {
            critical: 80,
            high: 60,
            medium: 30,
        }
    }
}

impl RiskCutoffs {
    /// Risk level for a 0–100 score.
    pub fn level_for(&self, score: u8) -> RiskLevel {
        if score >= self.critical {
            RiskLevel::Critical
        } else if score >= self.high {
            RiskLevel::High
        } else if score >= self.medium {
            RiskLevel::Medium
        } else {
            RiskLevel::Low
        }
    }

    /// Priority for a 0–100 score; the same cutoffs apply.
    pub fn priority_for(&self, score: u8) -> PriorityLevel {
        if score >= self.critical {
            PriorityLevel::Critical
        } else if score >= self.high {
            PriorityLevel::High
        } else if score >= self.medium {
            PriorityLevel::Medium
        } else {
            PriorityLevel::Low
        }
    }
}

/// Multiplicative risk factors derived from patient attributes.
///
/// Only the extreme-age multiplier is applied by the aggregator; the other
/// slots are configuration surface for factors the reference behaviour
/// defines but does not wire up.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskMultipliers {
    pub extreme_age: f64,
    pub multiple_gestation: f64,
    pub obstetric_history: f64,
    pub comorbidity: f64,

    /// Ages below this are extreme (years).
    pub young_age_limit: u16,
    /// Ages above this are extreme (years).
    pub advanced_age_limit: u16,
}

impl Default for RiskMultipliers {
    fn default() -> Self {
        Self {
            extreme_age: 1.3,
            multiple_gestation: 1.2,
            obstetric_history: 1.15,
            comorbidity: 1.1,
            young_age_limit: 18,
            advanced_age_limit: 35,
        }
    }
}

impl RiskMultipliers {
    /// Whether an age falls in the extreme band (<18 or >35 by default).
    pub fn is_extreme_age(&self, age_years: u16) -> bool {
        age_years < self.young_age_limit || age_years > self.advanced_age_limit
    }
}

/// The full scoring configuration consumed by the risk profile aggregator.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    pub history: HistoryWeights,
    pub cutoffs: RiskCutoffs,
    pub multipliers: RiskMultipliers,
}

/// Process-wide handle to the current [`ScoringConfig`].
///
/// Readers call [`snapshot`](Self::snapshot) once per evaluation and keep
/// using that `Arc` for the whole call; administrative updates call
/// [`replace`](Self::replace). A poisoned lock is recovered rather than
/// propagated — the stored value is always a complete configuration.
#[derive(Debug, Default)]
pub struct SharedScoringConfig {
    current: RwLock<Arc<ScoringConfig>>,
}

impl SharedScoringConfig {
    pub fn new(config: ScoringConfig) -> Self {
        Self {
            current: RwLock::new(Arc::new(config)),
        }
    }

    /// The current configuration as an immutable snapshot.
    pub fn snapshot(&self) -> Arc<ScoringConfig> {
        self.current
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the configuration wholesale.
    pub fn replace(&self, config: ScoringConfig) {
        let mut guard = self
            .current
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(config);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_cutoffs_match_reference_values() {
        let cutoffs = RiskCutoffs::default();
        assert_eq!(cutoffs.level_for(80), RiskLevel::Critical);
        assert_eq!(cutoffs.level_for(79), RiskLevel::High);
        assert_eq!(cutoffs.level_for(60), RiskLevel::High);
        assert_eq!(cutoffs.level_for(59), RiskLevel::Medium);
        assert_eq!(cutoffs.level_for(30), RiskLevel::Medium);
        assert_eq!(cutoffs.level_for(29), RiskLevel::Low);
        assert_eq!(cutoffs.level_for(0), RiskLevel::Low);
    }

    #[test]
    fn test_priority_uses_the_same_cutoffs() {
        let cutoffs = RiskCutoffs::default();
        assert_eq!(cutoffs.priority_for(85), PriorityLevel::Critical);
        assert_eq!(cutoffs.priority_for(65), PriorityLevel::High);
        assert_eq!(cutoffs.priority_for(45), PriorityLevel::Medium);
        assert_eq!(cutoffs.priority_for(10), PriorityLevel::Low);
    }

    #[test]
    fn test_extreme_age_band() {
        let multipliers = RiskMultipliers::default();
        assert!(multipliers.is_extreme_age(17));
        assert!(!multipliers.is_extreme_age(18));
        assert!(!multipliers.is_extreme_age(35));
        assert!(multipliers.is_extreme_age(36));
    }

    #[test]
    fn test_snapshot_is_stable_across_replace() {
        let shared = SharedScoringConfig::default();
        let before = shared.snapshot();

        let mut updated = ScoringConfig::default();
        updated.history.frequent_alerts_bonus = 20;
        updated.cutoffs.critical = 85;
        shared.replace(updated.clone());

        // The old snapshot is untouched; a new one sees the whole update.
        assert_eq!(before.history.frequent_alerts_bonus, 15);
        assert_eq!(before.cutoffs.critical, 80);
        let after = shared.snapshot();
        assert_eq!(after.history.frequent_alerts_bonus, 20);
        assert_eq!(after.cutoffs.critical, 85);
        assert_eq!(*after, updated);
    }

    #[test]
    fn test_concurrent_readers_see_complete_configs() {
        use std::sync::Arc as StdArc;
        use std::thread;

        let shared = StdArc::new(SharedScoringConfig::default());
        let mut handles = Vec::new();

        for i in 0..4u8 {
            let shared = StdArc::clone(&shared);
            handles.push(thread::spawn(move || {
                for _ in 0..200 {
                    if i % 2 == 0 {
                        let mut config = ScoringConfig::default();
                        config.history.frequent_alerts_bonus = 20;
                        config.history.critical_history_bonus = 17;
                        shared.replace(config);
                    } else {
                        let snap = shared.snapshot();
                        // Either entirely default or entirely updated.
                        let pair = (
                            snap.history.frequent_alerts_bonus,
                            snap.history.critical_history_bonus,
                        );
                        assert!(pair == (15, 12) || pair == (20, 17));
                    }
                }
            }));
        }

        for handle in handles {
            handle.join().expect("reader/writer thread should not panic");
        }
    }

    #[test]
    fn test_config_deserializes_partially() {
        let config: ScoringConfig =
            serde_json::from_str(r#"{"cutoffs":{"critical":85}}"#)
                .expect("partial config should deserialize");
        assert_eq!(config.cutoffs.critical, 85);
        assert_eq!(config.cutoffs.high, 60);
        assert_eq!(config.history.frequent_alerts_bonus, 15);
    }
}
