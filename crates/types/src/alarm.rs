//! Alarm classification results.

use serde::{Deserialize, Serialize};

/// The clinical condition an alarm classifies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlarmType {
    /// An emergency-category symptom was reported.
    ObstetricEmergency,
    /// Absence of fetal movements confirmed by the specific reported code.
    ConfirmedFetalInactivity,
    /// Sepsis criteria met with altered vitals.
    Sepsis,
    /// Sepsis-compatible symptoms with fever, vitals still compensated.
    SepsisSuspicion,
    /// Abnormal bleeding with haemodynamic compromise.
    SevereHemorrhage,
    /// Abnormal bleeding, haemodynamically compensated.
    Hemorrhage,
    /// Severe hypertension together with preeclampsia symptoms.
    SeverePreeclampsia,
    /// Severe hypertension without preeclampsia symptoms.
    SevereHypertension,
    /// Ordinary hypertension together with preeclampsia symptoms.
    SuspectedPreeclampsia,
    /// Ordinary hypertension alone.
    Hypertension,
    /// Labor symptoms before the very-premature gestational cutoff.
    VeryPrematureLabor,
    /// Labor symptoms before the premature gestational cutoff.
    PrematureLabor,
    /// At least one vital sign past its severe threshold.
    SevereVitalAlteration,
    /// At least one vital sign past its high threshold.
    VitalAlteration,
    /// Edema observed at the visit.
    Edema,
    /// Patient reports absent fetal movements (boolean observation).
    AbsentFetalMovements,
}

/// Priority of an alarm, ordered from lowest to highest.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum PriorityLevel {
    Low,
    Medium,
    High,
    Critical,
}

/// Outcome of one alarm cascade evaluation.
///
/// Immutable once produced; a new evaluation yields a new result and is never
/// merged with previous ones. `alarm_type`, `priority` and `message` are all
/// `None` when no rule matched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlarmResult {
    pub alarm_type: Option<AlarmType>,
    pub priority: Option<PriorityLevel>,

    /// Human-readable description interpolating the triggering readings,
    /// for audit trails.
    pub message: Option<String>,

    /// Echo of the reported symptom codes this evaluation saw (input, not
    /// derived).
    pub detected_symptoms: Vec<String>,

    /// Alarm score in `[0, 100]`.
    pub score: u8,

    pub recommendations: Vec<String>,
}

impl AlarmResult {
    /// A no-alarm result echoing the evaluated symptom codes.
    pub fn none(detected_symptoms: Vec<String>) -> Self {
        Self {
            alarm_type: None,
            priority: None,
            message: None,
            detected_symptoms,
            score: 0,
            recommendations: Vec::new(),
        }
    }

    pub fn is_alarm(&self) -> bool {
        self.alarm_type.is_some()
    }
}
