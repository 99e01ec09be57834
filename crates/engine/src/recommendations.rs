//! Recommendation generation.
//!
//! A deterministic, additive mapping from triggering conditions to canned
//! care recommendations. Conditions are non-exclusive: each one that holds
//! appends its own strings. This module never deduplicates; callers that
//! combine several sources may.

use crate::classifier::{self, SymptomCategory};
use crate::thresholds::ThresholdCatalog;
use alma_types::{Observation, SymptomSet};

pub(crate) const TRANSFER: &str = "Traslado inmediato a centro de mayor complejidad";
pub(crate) const EMERGENCY_PROTOCOL: &str = "Activar protocolo de emergencia obstétrica";
pub(crate) const URGENT_EVALUATION: &str =
    "Evaluación médica urgente en las próximas 24 horas";

pub(crate) fn for_hypertension() -> Vec<String> {
    vec![
        "Control frecuente de presión arterial".into(),
        "Dieta baja en sodio".into(),
        "Reposo relativo".into(),
    ]
}

pub(crate) fn for_fever() -> Vec<String> {
    vec![
        "Hidratación abundante".into(),
        "Control de temperatura cada 4 horas".into(),
        "Buscar foco infeccioso".into(),
    ]
}

pub(crate) fn for_preeclampsia() -> Vec<String> {
    vec![
        "Urianálisis para descartar proteinuria".into(),
        "Laboratorio de función renal y hepática".into(),
    ]
}

pub(crate) fn for_labor() -> Vec<String> {
    vec![
        "Reposo absoluto".into(),
        "Monitoreo de frecuencia de contracciones".into(),
    ]
}

pub(crate) fn for_hemorrhage() -> Vec<String> {
    vec![
        "Canalizar vía venosa periférica".into(),
        "Control estricto de sangrado y signos vitales".into(),
    ]
}

pub(crate) fn for_fetal_surveillance() -> Vec<String> {
    vec![
        "Conteo de movimientos fetales".into(),
        "Monitoreo fetal electrónico".into(),
    ]
}

pub(crate) fn for_emergency() -> Vec<String> {
    vec![TRANSFER.into(), EMERGENCY_PROTOCOL.into()]
}

pub(crate) fn for_vital_monitoring() -> Vec<String> {
    vec!["Control de signos vitales en las próximas horas".into()]
}

pub(crate) fn for_close_vital_monitoring() -> Vec<String> {
    vec!["Control continuo de signos vitales".into()]
}

pub(crate) fn for_edema() -> Vec<String> {
    vec![
        "Reposo con miembros inferiores elevados".into(),
        "Control de edema y presión arterial".into(),
    ]
}

/// Score-tier additions: transfer at 80, urgent evaluation at 60.
pub(crate) fn for_score(score: u8) -> Vec<String> {
    if score >= 80 {
        vec![TRANSFER.into(), EMERGENCY_PROTOCOL.into()]
    } else if score >= 60 {
        vec![URGENT_EVALUATION.into()]
    } else {
        Vec::new()
    }
}

/// Derives the full recommendation list for an observation + symptom set and
/// an already-computed score.
///
/// Conditions checked: hypertension (either pressure at its high threshold),
/// fever, preeclampsia-category symptoms, labor-category symptoms, and the
/// score tiers. Duplicates are preserved.
pub fn recommend(
    observation: &Observation,
    symptoms: &SymptomSet,
    score: u8,
    thresholds: &ThresholdCatalog,
) -> Vec<String> {
    let mut out = Vec::new();

    let hypertensive = observation
        .systolic
        .is_some_and(|s| s >= thresholds.systolic_high)
        || observation
            .diastolic
            .is_some_and(|d| d >= thresholds.diastolic_high);
    if hypertensive {
        out.extend(for_hypertension());
    }

    if observation
        .temperature
        .is_some_and(|t| t >= thresholds.temperature_high)
    {
        out.extend(for_fever());
    }

    if classifier::is_category_present(symptoms, SymptomCategory::Preeclampsia) {
        out.extend(for_preeclampsia());
    }

    if classifier::is_category_present(symptoms, SymptomCategory::Labor) {
        out.extend(for_labor());
    }

    out.extend(for_score(score));
    out
}

/// Removes later duplicates while keeping first-occurrence order.
pub fn dedup_preserving_order(recommendations: Vec<String>) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(recommendations.len());
    for rec in recommendations {
        if !out.contains(&rec) {
            out.push(rec);
        }
    }
    out
}
