//! Short-horizon trend analysis.
//!
//! Compares the current observation against a most-recent-first slice of
//! prior visits and produces a small additive bonus for the risk score. The
//! bonus is never negative and is capped at 20 here; the overall score cap
//! lives in the calculator.

use crate::thresholds::ThresholdCatalog;
use alma_types::{Observation, VisitRecord};

const MAX_BONUS: u8 = 20;
const PRESSURE_RISE_BONUS: u8 = 10;
const WEIGHT_GAIN_BONUS: u8 = 5;

const SYSTOLIC_RISE_LIMIT: i32 = 20;
const DIASTOLIC_RISE_LIMIT: i32 = 10;

/// Computes the trend bonus for `observation` against `history`.
///
/// The pressure rule needs at least two prior readings with both pressure
/// values and a complete current reading; the rise is measured against the
/// most recent complete prior reading. The weight rule needs any prior
/// weight and fires when the gain exceeds the weekly threshold.
pub fn trend_bonus(
    observation: &Observation,
    history: &[VisitRecord],
    thresholds: &ThresholdCatalog,
) -> u8 {
    let mut bonus = 0u8;

    if let (Some(systolic), Some(diastolic)) = (observation.systolic, observation.diastolic) {
        let complete: Vec<&VisitRecord> = history
            .iter()
            .filter(|v| v.systolic.is_some() && v.diastolic.is_some())
            .collect();

        if complete.len() >= 2 {
            // Slice is most recent first, so the anchor is the first
            // complete prior reading.
            let anchor = complete[0];
            let systolic_rise =
                i32::from(systolic) - i32::from(anchor.systolic.unwrap_or_default());
            let diastolic_rise =
                i32::from(diastolic) - i32::from(anchor.diastolic.unwrap_or_default());

            if systolic_rise > SYSTOLIC_RISE_LIMIT || diastolic_rise > DIASTOLIC_RISE_LIMIT {
                bonus += PRESSURE_RISE_BONUS;
            }
        }
    }

    if let Some(weight) = observation.weight_kg {
        if let Some(prior_weight) = history.iter().find_map(|v| v.weight_kg) {
            if weight - prior_weight > thresholds.weekly_weight_gain_high {
                bonus += WEIGHT_GAIN_BONUS;
            }
        }
    }

    bonus.min(MAX_BONUS)
}
