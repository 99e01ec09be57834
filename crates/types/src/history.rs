//! Historical visit and alert records.
//!
//! These records are fetched by an external data-access collaborator and
//! handed to the engine read-only. History slices are ordered most recent
//! first.

use crate::alarm::PriorityLevel;
use crate::observation::Observation;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Vitals recorded at one past visit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub date: DateTime<Utc>,
    pub systolic: Option<u16>,
    pub diastolic: Option<u16>,
    pub heart_rate: Option<u16>,
    pub temperature: Option<f64>,
    pub weight_kg: Option<f64>,
}

impl VisitRecord {
    /// Views the recorded vitals as an [`Observation`] snapshot, leaving
    /// measurements the visit did not capture as unknown.
    pub fn to_observation(&self) -> Observation {
        Observation {
            systolic: self.systolic,
            diastolic: self.diastolic,
            heart_rate: self.heart_rate,
            temperature: self.temperature,
            weight_kg: self.weight_kg,
            ..Default::default()
        }
    }
}

/// A previously raised alert.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertRecord {
    pub priority: PriorityLevel,
    pub created_at: DateTime<Utc>,
}

/// Per-patient attributes feeding the risk multipliers.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PatientAttributes {
    /// Age in completed years, when known.
    pub age_years: Option<u16>,

    pub multiple_gestation: bool,

    pub prior_obstetric_complications: bool,

    pub comorbidities: Vec<String>,
}

/// Everything the data-access collaborator returns for one patient.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PatientHistory {
    /// Past visits, most recent first.
    pub visits: Vec<VisitRecord>,

    /// Past alerts, most recent first.
    pub alerts: Vec<AlertRecord>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn test_visit_to_observation_keeps_unmeasured_fields_unknown() {
        let visit = VisitRecord {
            date: Utc.with_ymd_and_hms(2026, 3, 10, 9, 0, 0).unwrap(),
            systolic: Some(128),
            diastolic: None,
            heart_rate: Some(88),
            temperature: None,
            weight_kg: Some(64.5),
        };

        let obs = visit.to_observation();
        assert_eq!(obs.systolic, Some(128));
        assert_eq!(obs.diastolic, None);
        assert_eq!(obs.heart_rate, Some(88));
        assert_eq!(obs.gestational_weeks, None);
        assert_eq!(obs.fetal_movements, None);
    }
}
