//! Clinical observation snapshots.

use serde::{Deserialize, Serialize};

/// A snapshot of clinical measurements taken at one point in time.
///
/// Every field is independently optional: `None` means the measurement was
/// not taken at this visit. Absence is "unknown", never "normal" — consumers
/// must not substitute defaults for missing readings.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Observation {
    /// Systolic blood pressure in mmHg.
    pub systolic: Option<u16>,

    /// Diastolic blood pressure in mmHg.
    pub diastolic: Option<u16>,

    /// Heart rate in beats per minute.
    pub heart_rate: Option<u16>,

    /// Respiratory rate in breaths per minute.
    pub respiratory_rate: Option<u16>,

    /// Body temperature in degrees Celsius.
    pub temperature: Option<f64>,

    /// Body weight in kilograms.
    pub weight_kg: Option<f64>,

    /// Gestational age in completed weeks.
    pub gestational_weeks: Option<u16>,

    /// Fundal height in centimetres.
    pub fundal_height_cm: Option<f64>,

    /// Whether fetal movements were perceived. `Some(false)` is a positive
    /// report of absent movements; `None` means the question was not asked.
    pub fetal_movements: Option<bool>,

    /// Whether edema was observed.
    pub edema: Option<bool>,
}

impl Observation {
    /// Returns `true` when no measurement at all was recorded.
    pub fn is_empty(&self) -> bool {
        self.systolic.is_none()
            && self.diastolic.is_none()
            && self.heart_rate.is_none()
            && self.respiratory_rate.is_none()
            && self.temperature.is_none()
            && self.weight_kg.is_none()
            && self.gestational_weeks.is_none()
            && self.fundal_height_cm.is_none()
            && self.fetal_movements.is_none()
            && self.edema.is_none()
    }

    /// Returns `true` when both blood-pressure values are present.
    pub fn has_blood_pressure(&self) -> bool {
        self.systolic.is_some() && self.diastolic.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_observation_is_empty() {
        let obs = Observation::default();
        assert!(obs.is_empty());
        assert!(!obs.has_blood_pressure());
    }

    #[test]
    fn test_partial_observation_is_not_empty() {
        let obs = Observation {
            heart_rate: Some(82),
            ..Default::default()
        };
        assert!(!obs.is_empty());
        assert!(!obs.has_blood_pressure());
    }

    #[test]
    fn test_deserialize_tolerates_missing_fields() {
        let obs: Observation = serde_json::from_str(r#"{"systolic":120}"#)
            .expect("partial observation should deserialize");
        assert_eq!(obs.systolic, Some(120));
        assert_eq!(obs.diastolic, None);
        assert_eq!(obs.fetal_movements, None);
    }
}
