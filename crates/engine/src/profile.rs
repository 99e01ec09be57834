//! Longitudinal risk profile aggregation.
//!
//! Combines the current snapshot score with a patient's visit and alert
//! history, applies the configured multiplicative risk factors and
//! classifies the score trend over the last three visits. Profiles are
//! recomputed from scratch on every call; nothing is cached or persisted
//! here.
//!
//! History retrieval is an external I/O boundary behind [`HistoryStore`]:
//! one fetch per call, and a fetch failure fails the whole evaluation — a
//! partial profile would read as a falsely low risk.

use crate::classifier::{self, SymptomCategory};
use crate::config::{ScoringConfig, SharedScoringConfig};
use crate::score;
use crate::thresholds::ThresholdCatalog;
use alma_types::{
    AlertRecord, Observation, PatientAttributes, PatientHistory, PriorityLevel, RiskProfile,
    SymptomSet, TrendDirection, VisitRecord,
};
use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use uuid::Uuid;

/// Failure reported by the external history collaborator.
#[derive(Debug, thiserror::Error)]
#[error("history retrieval failed: {reason}")]
pub struct HistoryStoreError {
    reason: String,
}

impl HistoryStoreError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Errors surfaced by [`RiskProfileService`], unmodified from their cause.
#[derive(Debug, thiserror::Error)]
pub enum ProfileError {
    /// The identifier resolved to no history at all. Treating such a
    /// patient as risk-free would be unsafe, so this is an error.
    #[error("no resolvable history for patient {patient_id}")]
    PatientNotFound { patient_id: Uuid },

    #[error(transparent)]
    History(#[from] HistoryStoreError),
}

pub type ProfileResult<T> = std::result::Result<T, ProfileError>;

/// External data-access collaborator supplying visit and alert history.
///
/// Implementations live in the surrounding service layer; the engine calls
/// [`fetch`](Self::fetch) exactly once per profile evaluation. `Ok(None)`
/// means the patient identifier is unknown to the store.
pub trait HistoryStore: Send + Sync {
    fn fetch(&self, patient_id: Uuid) -> Result<Option<PatientHistory>, HistoryStoreError>;
}

/// Computes longitudinal risk profiles for single patients.
pub struct RiskProfileService {
    thresholds: ThresholdCatalog,
    config: Arc<SharedScoringConfig>,
    store: Arc<dyn HistoryStore>,
}

impl RiskProfileService {
    pub fn new(store: Arc<dyn HistoryStore>, config: Arc<SharedScoringConfig>) -> Self {
        Self {
            thresholds: ThresholdCatalog::default(),
            config,
            store,
        }
    }

    pub fn with_thresholds(
        store: Arc<dyn HistoryStore>,
        config: Arc<SharedScoringConfig>,
        thresholds: ThresholdCatalog,
    ) -> Self {
        Self {
            thresholds,
            config,
            store,
        }
    }

    /// Computes the risk profile for one patient.
    ///
    /// Fetches the patient's history once, takes one configuration snapshot
    /// for the whole evaluation and aggregates per the configured weights.
    ///
    /// # Errors
    ///
    /// Returns [`ProfileError::PatientNotFound`] when the store cannot
    /// resolve the identifier, and [`ProfileError::History`] when the fetch
    /// itself fails. No partial profile is ever returned.
    pub fn risk_profile(
        &self,
        patient_id: Uuid,
        observation: &Observation,
        symptoms: &SymptomSet,
        attributes: &PatientAttributes,
    ) -> ProfileResult<RiskProfile> {
        let history = self
            .store
            .fetch(patient_id)?
            .ok_or(ProfileError::PatientNotFound { patient_id })?;

        let profile = self.profile_from_slices(
            patient_id,
            observation,
            symptoms,
            &history.visits,
            &history.alerts,
            attributes,
        );

        tracing::debug!(
            %patient_id,
            score = profile.score,
            visits = profile.visits_considered,
            "risk profile computed"
        );

        Ok(profile)
    }

    /// Aggregates a profile from already-fetched history slices.
    pub fn profile_from_slices(
        &self,
        patient_id: Uuid,
        observation: &Observation,
        symptoms: &SymptomSet,
        visits: &[VisitRecord],
        alerts: &[AlertRecord],
        attributes: &PatientAttributes,
    ) -> RiskProfile {
        let config = self.config.snapshot();
        build_profile(
            patient_id,
            observation,
            symptoms,
            visits,
            alerts,
            attributes,
            &config,
            &self.thresholds,
            Utc::now(),
        )
    }
}

/// Pure profile aggregation at a fixed evaluation instant.
///
/// `visits` and `alerts` are most recent first. `now` anchors the rolling
/// recent-alert window, which keeps the function referentially transparent.
#[allow(clippy::too_many_arguments)]
pub fn build_profile(
    patient_id: Uuid,
    observation: &Observation,
    symptoms: &SymptomSet,
    visits: &[VisitRecord],
    alerts: &[AlertRecord],
    attributes: &PatientAttributes,
    config: &ScoringConfig,
    thresholds: &ThresholdCatalog,
    now: DateTime<Utc>,
) -> RiskProfile {
    let mut factors: Vec<String> = Vec::new();

    let base = score::risk_score(observation, symptoms, Some(visits), thresholds);
    let mut total = u32::from(base);

    push_unique_all(&mut factors, clinical_risk_factors(observation, thresholds));
    push_unique_all(&mut factors, category_risk_factors(symptoms));

    let weights = &config.history;

    let window_start = now - Duration::days(weights.frequent_alerts_window_days);
    let recent_alerts = alerts
        .iter()
        .filter(|a| a.created_at >= window_start)
        .count();
    if recent_alerts >= weights.frequent_alerts_count {
        total += u32::from(weights.frequent_alerts_bonus);
        push_unique(&mut factors, "alertas_frecuentes");
    }

    if let Some(mean_gap) = mean_visit_gap_days(visits) {
        if mean_gap > weights.spaced_visits_gap_days {
            total += u32::from(weights.spaced_visits_bonus);
            push_unique(&mut factors, "controles_espaciados");
        }
    }

    let critical_alerts = alerts
        .iter()
        .filter(|a| a.priority == PriorityLevel::Critical)
        .count();
    if critical_alerts >= weights.critical_history_count {
        total += u32::from(weights.critical_history_bonus);
        push_unique(&mut factors, "antecedente_alertas_criticas");
    }

    let mut multiplier = 1.0;
    if let Some(age) = attributes.age_years {
        if config.multipliers.is_extreme_age(age) {
            multiplier = config.multipliers.extreme_age;
            push_unique(&mut factors, "edad_de_riesgo");
        }
    }

    let final_score = (f64::from(total) * multiplier).min(100.0).round() as u8;

    RiskProfile {
        patient_id,
        score: final_score,
        risk_level: config.cutoffs.level_for(final_score),
        risk_factors: factors,
        trend: classify_trend(visits, thresholds),
        visits_considered: visits.len(),
        alerts_considered: alerts.len(),
    }
}

/// Trend over the last three visits: the newest of the three against the
/// oldest. A difference above 10 ascends, below −10 descends; fewer than
/// three visits is stable by definition.
fn classify_trend(visits: &[VisitRecord], thresholds: &ThresholdCatalog) -> TrendDirection {
    if visits.len() < 3 {
        return TrendDirection::Stable;
    }

    let last_three = &visits[..3];
    let newest = i32::from(visit_score(&last_three[0], thresholds));
    let oldest = i32::from(visit_score(&last_three[2], thresholds));
    let delta = newest - oldest;

    if delta > 10 {
        TrendDirection::Ascending
    } else if delta < -10 {
        TrendDirection::Descending
    } else {
        TrendDirection::Stable
    }
}

/// Score of one historical visit, from its recorded vitals alone.
fn visit_score(visit: &VisitRecord, thresholds: &ThresholdCatalog) -> u8 {
    score::risk_score(
        &visit.to_observation(),
        &SymptomSet::default(),
        None,
        thresholds,
    )
}

/// Mean gap in days between consecutive visits; `None` below two visits.
fn mean_visit_gap_days(visits: &[VisitRecord]) -> Option<f64> {
    if visits.len() < 2 {
        return None;
    }

    let total_seconds: i64 = visits
        .windows(2)
        .map(|pair| (pair[0].date - pair[1].date).num_seconds().abs())
        .sum();
    let gaps = (visits.len() - 1) as f64;

    Some(total_seconds as f64 / 86_400.0 / gaps)
}

/// Hard clinical thresholds crossed by the current snapshot, as named
/// factors.
fn clinical_risk_factors(
    observation: &Observation,
    thresholds: &ThresholdCatalog,
) -> Vec<&'static str> {
    let mut factors = Vec::new();

    let systolic_severe = observation
        .systolic
        .is_some_and(|v| v >= thresholds.systolic_severe);
    let diastolic_severe = observation
        .diastolic
        .is_some_and(|v| v >= thresholds.diastolic_severe);
    let systolic_high = observation
        .systolic
        .is_some_and(|v| v >= thresholds.systolic_high);
    let diastolic_high = observation
        .diastolic
        .is_some_and(|v| v >= thresholds.diastolic_high);

    if systolic_severe || diastolic_severe {
        factors.push("hipertension_severa");
    } else if systolic_high || diastolic_high {
        factors.push("hipertension");
    }

    let hypotensive = observation
        .systolic
        .is_some_and(|v| v <= thresholds.systolic_low)
        || observation
            .diastolic
            .is_some_and(|v| v <= thresholds.diastolic_low);
    if hypotensive {
        factors.push("hipotension");
    }

    if let Some(hr) = observation.heart_rate {
        if hr >= thresholds.heart_rate_severe {
            factors.push("taquicardia_severa");
        } else if hr >= thresholds.heart_rate_high {
            factors.push("taquicardia");
        } else if hr <= thresholds.heart_rate_low {
            factors.push("bradicardia");
        }
    }

    if let Some(rr) = observation.respiratory_rate {
        if rr >= thresholds.respiratory_rate_severe {
            factors.push("taquipnea_severa");
        } else if rr >= thresholds.respiratory_rate_high {
            factors.push("taquipnea");
        } else if rr <= thresholds.respiratory_rate_low {
            factors.push("bradipnea");
        }
    }

    if let Some(temp) = observation.temperature {
        if temp >= thresholds.temperature_severe {
            factors.push("fiebre_alta");
        } else if temp >= thresholds.temperature_high {
            factors.push("fiebre");
        } else if temp <= thresholds.temperature_low {
            factors.push("hipotermia");
        }
    }

    if observation.edema == Some(true) {
        factors.push("edema");
    }
    if observation.fetal_movements == Some(false) {
        factors.push("ausencia_movimientos_fetales");
    }

    factors
}

/// Symptom-category hits, as named factors.
fn category_risk_factors(symptoms: &SymptomSet) -> Vec<&'static str> {
    let mut factors = Vec::new();
    let labelled = [
        (SymptomCategory::Emergency, "sintomas_emergencia"),
        (SymptomCategory::Hemorrhage, "sintomas_hemorragia"),
        (SymptomCategory::Sepsis, "sintomas_sepsis"),
        (SymptomCategory::Labor, "sintomas_trabajo_parto"),
        (SymptomCategory::Preeclampsia, "sintomas_preeclampsia"),
    ];
    for (category, label) in labelled {
        if classifier::is_category_present(symptoms, category) {
            factors.push(label);
        }
    }
    factors
}

fn push_unique(factors: &mut Vec<String>, factor: &str) {
    if !factors.iter().any(|f| f == factor) {
        factors.push(factor.to_string());
    }
}

fn push_unique_all(factors: &mut Vec<String>, new: Vec<&'static str>) {
    for factor in new {
        push_unique(factors, factor);
    }
}
