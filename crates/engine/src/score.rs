//! Additive risk scoring.
//!
//! Independent of the alarm cascade: every contribution that applies is
//! summed, nothing short-circuits, and the total is clamped to `[0, 100]`.
//! The function is pure — identical inputs always produce the identical
//! score.

use crate::classifier::{self, SymptomCategory};
use crate::thresholds::ThresholdCatalog;
use crate::trend;
use alma_types::{Observation, SymptomSet, VisitRecord};

const BP_SEVERE_POINTS: u32 = 25;
const BP_HIGH_POINTS: u32 = 15;
const HR_SEVERE_POINTS: u32 = 15;
const HR_HIGH_POINTS: u32 = 10;
const TEMP_SEVERE_POINTS: u32 = 20;
const TEMP_HIGH_POINTS: u32 = 10;

const EMERGENCY_WEIGHT: u32 = 25;
const HEMORRHAGE_WEIGHT: u32 = 20;
const SEPSIS_WEIGHT: u32 = 15;
const PREECLAMPSIA_WEIGHT: u32 = 10;

const MOVEMENTS_ABSENT_POINTS: u32 = 15;
const EDEMA_POINTS: u32 = 8;

const MAX_SCORE: u32 = 100;

/// Computes the 0–100 risk score for one observation + symptom set, with an
/// optional most-recent-first history slice feeding the trend bonus.
///
/// Absent observation fields contribute nothing. Symptom-category weights
/// count occurrences, not mere presence.
pub fn risk_score(
    observation: &Observation,
    symptoms: &SymptomSet,
    history: Option<&[VisitRecord]>,
    thresholds: &ThresholdCatalog,
) -> u8 {
    let mut total: u32 = 0;

    let systolic_severe = observation
        .systolic
        .is_some_and(|s| s >= thresholds.systolic_severe);
    let diastolic_severe = observation
        .diastolic
        .is_some_and(|d| d >= thresholds.diastolic_severe);
    let systolic_high = observation
        .systolic
        .is_some_and(|s| s >= thresholds.systolic_high);
    let diastolic_high = observation
        .diastolic
        .is_some_and(|d| d >= thresholds.diastolic_high);

    if systolic_severe || diastolic_severe {
        total += BP_SEVERE_POINTS;
    } else if systolic_high || diastolic_high {
        total += BP_HIGH_POINTS;
    }

    if let Some(heart_rate) = observation.heart_rate {
        if heart_rate >= thresholds.heart_rate_severe {
            total += HR_SEVERE_POINTS;
        } else if heart_rate >= thresholds.heart_rate_high {
            total += HR_HIGH_POINTS;
        }
    }

    if let Some(temperature) = observation.temperature {
        if temperature >= thresholds.temperature_severe {
            total += TEMP_SEVERE_POINTS;
        } else if temperature >= thresholds.temperature_high {
            total += TEMP_HIGH_POINTS;
        }
    }

    total += EMERGENCY_WEIGHT
        * classifier::category_count(symptoms, SymptomCategory::Emergency) as u32;
    total += HEMORRHAGE_WEIGHT
        * classifier::category_count(symptoms, SymptomCategory::Hemorrhage) as u32;
    total +=
        SEPSIS_WEIGHT * classifier::category_count(symptoms, SymptomCategory::Sepsis) as u32;
    total += PREECLAMPSIA_WEIGHT
        * classifier::category_count(symptoms, SymptomCategory::Preeclampsia) as u32;

    if observation.fetal_movements == Some(false) {
        total += MOVEMENTS_ABSENT_POINTS;
    }
    if observation.edema == Some(true) {
        total += EDEMA_POINTS;
    }

    if let Some(history) = history {
        total += u32::from(trend::trend_bonus(observation, history, thresholds));
    }

    total.min(MAX_SCORE) as u8
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn catalog() -> ThresholdCatalog {
        ThresholdCatalog::default()
    }

    #[test]
    fn test_empty_inputs_score_zero() {
        let score = risk_score(
            &Observation::default(),
            &SymptomSet::default(),
            None,
            &catalog(),
        );
        assert_eq!(score, 0);
    }

    #[test]
    fn test_high_heart_rate_alone_scores_ten() {
        let obs = Observation {
            heart_rate: Some(105),
            ..Default::default()
        };
        assert_eq!(risk_score(&obs, &SymptomSet::default(), None, &catalog()), 10);
    }

    #[test]
    fn test_severe_tiers_replace_high_tiers() {
        let high = Observation {
            systolic: Some(145),
            ..Default::default()
        };
        let severe = Observation {
            systolic: Some(165),
            ..Default::default()
        };
        let empty = SymptomSet::default();
        assert_eq!(risk_score(&high, &empty, None, &catalog()), 15);
        assert_eq!(risk_score(&severe, &empty, None, &catalog()), 25);
    }

    #[test]
    fn test_symptom_occurrences_each_count() {
        let single = SymptomSet::new(["escalofrios"]);
        let double = SymptomSet::new(["escalofrios", "confusion_mental"]);
        let obs = Observation::default();
        assert_eq!(risk_score(&obs, &single, None, &catalog()), 15);
        assert_eq!(risk_score(&obs, &double, None, &catalog()), 30);
    }

    #[test]
    fn test_flags_contribute() {
        let obs = Observation {
            fetal_movements: Some(false),
            edema: Some(true),
            ..Default::default()
        };
        assert_eq!(risk_score(&obs, &SymptomSet::default(), None, &catalog()), 23);
    }

    #[test]
    fn test_movements_present_contribute_nothing() {
        let obs = Observation {
            fetal_movements: Some(true),
            ..Default::default()
        };
        assert_eq!(risk_score(&obs, &SymptomSet::default(), None, &catalog()), 0);
    }

    #[test]
    fn test_score_is_clamped_to_one_hundred() {
        let obs = Observation {
            systolic: Some(170),
            diastolic: Some(115),
            heart_rate: Some(130),
            temperature: Some(39.5),
            fetal_movements: Some(false),
            edema: Some(true),
            ..Default::default()
        };
        let symptoms = SymptomSet::new([
            "convulsiones",
            "sangrado_masivo",
            "hemorragia_vaginal",
            "escalofrios",
            "dolor_cabeza_severo",
        ]);
        assert_eq!(risk_score(&obs, &symptoms, None, &catalog()), 100);
    }

    #[test]
    fn test_trend_bonus_respects_overall_cap() {
        let obs = Observation {
            systolic: Some(170),
            diastolic: Some(115),
            heart_rate: Some(130),
            temperature: Some(39.5),
            weight_kg: Some(75.0),
            fetal_movements: Some(false),
            edema: Some(true),
            ..Default::default()
        };
        let symptoms = SymptomSet::new(["convulsiones", "hemorragia_vaginal"]);
        let history = vec![
            VisitRecord {
                date: Utc.with_ymd_and_hms(2026, 5, 20, 9, 0, 0).unwrap(),
                systolic: Some(120),
                diastolic: Some(80),
                heart_rate: None,
                temperature: None,
                weight_kg: Some(70.0),
            },
            VisitRecord {
                date: Utc.with_ymd_and_hms(2026, 5, 13, 9, 0, 0).unwrap(),
                systolic: Some(118),
                diastolic: Some(79),
                heart_rate: None,
                temperature: None,
                weight_kg: Some(69.0),
            },
        ];
        assert_eq!(risk_score(&obs, &symptoms, Some(&history), &catalog()), 100);
    }

    #[test]
    fn test_monotonic_as_thresholds_are_crossed() {
        let empty = SymptomSet::default();
        let base = Observation {
            heart_rate: Some(90),
            temperature: Some(37.2),
            ..Default::default()
        };
        let crossed = Observation {
            heart_rate: Some(101),
            temperature: Some(37.2),
            ..Default::default()
        };
        assert!(
            risk_score(&crossed, &empty, None, &catalog())
                >= risk_score(&base, &empty, None, &catalog())
        );
    }

    #[test]
    fn test_identical_inputs_identical_score() {
        let obs = Observation {
            systolic: Some(150),
            diastolic: Some(95),
            heart_rate: Some(104),
            ..Default::default()
        };
        let symptoms = SymptomSet::new(["vision_borrosa"]);
        let first = risk_score(&obs, &symptoms, None, &catalog());
        let second = risk_score(&obs, &symptoms, None, &catalog());
        assert_eq!(first, second);
    }
}
