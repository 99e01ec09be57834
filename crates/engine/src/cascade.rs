//! Alarm decision cascade.
//!
//! A strict, ordered, first-match-wins rule evaluation: the rules model
//! triage priority, so the most dangerous condition that matches must
//! dominate even when milder conditions also apply. The ordering is held in
//! one static table so it can be unit-tested independently of the evaluation
//! logic.
//!
//! Two properties of the reference behaviour are preserved on purpose and
//! must not be "fixed":
//! - the confirmed fetal-inactivity rule sits at position 2 although its
//!   code is also an emergency-category member, so position 1 shadows it;
//! - the absent-movements rule at position 11 scores 55, numerically above
//!   the edema rule at position 10 (score 40) that is evaluated before it.
//!   Rule order decides which rule fires, not score magnitude.
//!
//! Comparisons against absent observation fields are simply false; the
//! cascade has no failure modes.

use crate::classifier::{self, SymptomCategory, CONFIRMED_FETAL_INACTIVITY};
use crate::recommendations;
use crate::thresholds::ThresholdCatalog;
use alma_types::{AlarmResult, AlarmType, Observation, PriorityLevel, SymptomSet};

// ============================================================================
// Rule table
// ============================================================================

/// Everything a rule may inspect.
pub struct RuleContext<'a> {
    pub observation: &'a Observation,
    pub symptoms: &'a SymptomSet,
    pub thresholds: &'a ThresholdCatalog,
}

/// What a matching rule produces.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleOutcome {
    pub alarm_type: AlarmType,
    pub priority: PriorityLevel,
    pub score: u8,
    pub message: String,
    pub recommendations: Vec<String>,
}

/// One entry of the ordered cascade.
pub struct CascadeRule {
    pub name: &'static str,
    eval: fn(&RuleContext<'_>) -> Option<RuleOutcome>,
}

static RULES: [CascadeRule; 11] = [
    CascadeRule {
        name: "emergency_symptom",
        eval: emergency_symptom,
    },
    CascadeRule {
        name: "confirmed_fetal_inactivity",
        eval: confirmed_fetal_inactivity,
    },
    CascadeRule {
        name: "sepsis",
        eval: sepsis,
    },
    CascadeRule {
        name: "hemorrhage",
        eval: hemorrhage,
    },
    CascadeRule {
        name: "hypertensive_disorders",
        eval: hypertensive_disorders,
    },
    CascadeRule {
        name: "premature_labor",
        eval: premature_labor,
    },
    CascadeRule {
        name: "severe_vital_alteration",
        eval: severe_vital_alteration,
    },
    CascadeRule {
        name: "hypertension",
        eval: hypertension,
    },
    CascadeRule {
        name: "moderate_vital_alteration",
        eval: moderate_vital_alteration,
    },
    CascadeRule {
        name: "edema",
        eval: edema,
    },
    CascadeRule {
        name: "absent_fetal_movements",
        eval: absent_fetal_movements,
    },
];

/// The cascade in evaluation order.
pub fn rules() -> &'static [CascadeRule] {
    &RULES
}

/// Runs the cascade over one observation + symptom set.
///
/// The first matching rule decides the result; later rules are never
/// evaluated. The result carries the matched rule's score and its fixed
/// recommendation set plus the score-tier additions, deduplicated. When no
/// rule matches the result has a null alarm type, null priority and an empty
/// message.
pub fn run_cascade(
    observation: &Observation,
    symptoms: &SymptomSet,
    thresholds: &ThresholdCatalog,
) -> AlarmResult {
    let ctx = RuleContext {
        observation,
        symptoms,
        thresholds,
    };

    for rule in &RULES {
        if let Some(outcome) = (rule.eval)(&ctx) {
            tracing::debug!(
                rule = rule.name,
                score = outcome.score,
                "alarm cascade rule matched"
            );

            let mut recommendations = outcome.recommendations;
            recommendations.extend(recommendations::for_score(outcome.score));

            return AlarmResult {
                alarm_type: Some(outcome.alarm_type),
                priority: Some(outcome.priority),
                message: Some(outcome.message),
                detected_symptoms: symptoms.codes().to_vec(),
                score: outcome.score,
                recommendations: recommendations::dedup_preserving_order(recommendations),
            };
        }
    }

    AlarmResult::none(symptoms.codes().to_vec())
}

// ============================================================================
// Context helpers
// ============================================================================

impl RuleContext<'_> {
    fn has(&self, category: SymptomCategory) -> bool {
        classifier::is_category_present(self.symptoms, category)
    }

    fn systolic_at_least(&self, limit: u16) -> bool {
        self.observation.systolic.is_some_and(|v| v >= limit)
    }

    fn systolic_at_most(&self, limit: u16) -> bool {
        self.observation.systolic.is_some_and(|v| v <= limit)
    }

    fn diastolic_at_least(&self, limit: u16) -> bool {
        self.observation.diastolic.is_some_and(|v| v >= limit)
    }

    fn heart_rate_at_least(&self, limit: u16) -> bool {
        self.observation.heart_rate.is_some_and(|v| v >= limit)
    }

    fn respiratory_rate_at_least(&self, limit: u16) -> bool {
        self.observation.respiratory_rate.is_some_and(|v| v >= limit)
    }

    fn temperature_at_least(&self, limit: f64) -> bool {
        self.observation.temperature.is_some_and(|v| v >= limit)
    }

    fn severe_hypertension(&self) -> bool {
        self.systolic_at_least(self.thresholds.systolic_severe)
            || self.diastolic_at_least(self.thresholds.diastolic_severe)
    }

    fn ordinary_hypertension(&self) -> bool {
        self.systolic_at_least(self.thresholds.systolic_high)
            || self.diastolic_at_least(self.thresholds.diastolic_high)
    }

    /// Blood pressure for messages, missing sides rendered as `--`.
    fn blood_pressure_text(&self) -> String {
        let side = |v: Option<u16>| v.map_or_else(|| "--".to_string(), |v| v.to_string());
        format!(
            "{}/{}",
            side(self.observation.systolic),
            side(self.observation.diastolic)
        )
    }

    /// Readings at or above the given cut points, rendered for messages.
    fn vital_details(&self, hr_limit: u16, rr_limit: u16, temp_limit: f64) -> String {
        let mut parts = Vec::new();
        if let Some(hr) = self.observation.heart_rate {
            if hr >= hr_limit {
                parts.push(format!("FC {hr}"));
            }
        }
        if let Some(rr) = self.observation.respiratory_rate {
            if rr >= rr_limit {
                parts.push(format!("FR {rr}"));
            }
        }
        if let Some(temp) = self.observation.temperature {
            if temp >= temp_limit {
                parts.push(format!("temperatura {temp:.1} °C"));
            }
        }
        parts.join(", ")
    }
}

// ============================================================================
// Rules, in cascade order
// ============================================================================

fn emergency_symptom(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if !ctx.has(SymptomCategory::Emergency) {
        return None;
    }

    let members = classifier::codes_for(SymptomCategory::Emergency);
    let detected: Vec<&str> = ctx
        .symptoms
        .codes()
        .iter()
        .filter(|code| members.contains(code.as_str()))
        .map(String::as_str)
        .collect();

    Some(RuleOutcome {
        alarm_type: AlarmType::ObstetricEmergency,
        priority: PriorityLevel::Critical,
        score: 100,
        message: format!("Emergencia obstétrica: {}", detected.join(", ")),
        recommendations: recommendations::for_emergency(),
    })
}

fn confirmed_fetal_inactivity(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if !ctx.symptoms.contains(CONFIRMED_FETAL_INACTIVITY) {
        return None;
    }

    let mut recs = recommendations::for_emergency();
    recs.extend(recommendations::for_fetal_surveillance());

    Some(RuleOutcome {
        alarm_type: AlarmType::ConfirmedFetalInactivity,
        priority: PriorityLevel::Critical,
        score: 95,
        message: "Ausencia de movimientos fetales confirmada por la paciente".into(),
        recommendations: recs,
    })
}

fn sepsis(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let febrile = ctx.temperature_at_least(ctx.thresholds.temperature_high);
    if !(ctx.has(SymptomCategory::Sepsis) && febrile) {
        return None;
    }

    // Field checked above.
    let temperature = ctx.observation.temperature.unwrap_or_default();

    let systemic = ctx.heart_rate_at_least(ctx.thresholds.heart_rate_high)
        || ctx.respiratory_rate_at_least(ctx.thresholds.respiratory_rate_high);

    if systemic {
        let detail = ctx.vital_details(
            ctx.thresholds.heart_rate_high,
            ctx.thresholds.respiratory_rate_high,
            f64::INFINITY,
        );
        Some(RuleOutcome {
            alarm_type: AlarmType::Sepsis,
            priority: PriorityLevel::Critical,
            score: 90,
            message: format!(
                "Sospecha de sepsis con respuesta sistémica: temperatura {temperature:.1} °C, {detail}"
            ),
            recommendations: recommendations::for_fever(),
        })
    } else {
        Some(RuleOutcome {
            alarm_type: AlarmType::SepsisSuspicion,
            priority: PriorityLevel::High,
            score: 75,
            message: format!(
                "Sospecha de sepsis: temperatura {temperature:.1} °C con síntomas compatibles"
            ),
            recommendations: recommendations::for_fever(),
        })
    }
}

fn hemorrhage(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if !ctx.has(SymptomCategory::Hemorrhage) {
        return None;
    }

    let hypotensive = ctx.systolic_at_most(ctx.thresholds.systolic_low);
    let tachycardic = ctx.heart_rate_at_least(ctx.thresholds.heart_rate_high);

    if hypotensive || tachycardic {
        let mut parts = Vec::new();
        if let Some(systolic) = ctx.observation.systolic {
            if systolic <= ctx.thresholds.systolic_low {
                parts.push(format!("PA sistólica {systolic}"));
            }
        }
        if let Some(hr) = ctx.observation.heart_rate {
            if hr >= ctx.thresholds.heart_rate_high {
                parts.push(format!("FC {hr}"));
            }
        }

        let mut recs = recommendations::for_emergency();
        recs.extend(recommendations::for_hemorrhage());

        Some(RuleOutcome {
            alarm_type: AlarmType::SevereHemorrhage,
            priority: PriorityLevel::Critical,
            score: 85,
            message: format!(
                "Hemorragia con compromiso hemodinámico: {}",
                parts.join(", ")
            ),
            recommendations: recs,
        })
    } else {
        Some(RuleOutcome {
            alarm_type: AlarmType::Hemorrhage,
            priority: PriorityLevel::High,
            score: 70,
            message: "Sangrado anormal reportado por la paciente".into(),
            recommendations: recommendations::for_hemorrhage(),
        })
    }
}

/// Tiers 5a–5c as one sub-cascade: severe hypertension with preeclampsia
/// symptoms, severe hypertension alone, then ordinary hypertension with
/// preeclampsia symptoms. Ordinary hypertension alone falls through to the
/// lower-priority `hypertension` rule.
fn hypertensive_disorders(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let preeclampsia = ctx.has(SymptomCategory::Preeclampsia);
    let bp = ctx.blood_pressure_text();

    if ctx.severe_hypertension() {
        if preeclampsia {
            let mut recs = recommendations::for_preeclampsia();
            recs.extend(recommendations::for_hypertension());
            return Some(RuleOutcome {
                alarm_type: AlarmType::SeverePreeclampsia,
                priority: PriorityLevel::Critical,
                score: 88,
                message: format!(
                    "Preeclampsia severa: presión arterial {bp} con síntomas de alarma"
                ),
                recommendations: recs,
            });
        }
        return Some(RuleOutcome {
            alarm_type: AlarmType::SevereHypertension,
            priority: PriorityLevel::High,
            score: 80,
            message: format!("Hipertensión severa: presión arterial {bp}"),
            recommendations: recommendations::for_hypertension(),
        });
    }

    if ctx.ordinary_hypertension() && preeclampsia {
        let mut recs = recommendations::for_preeclampsia();
        recs.extend(recommendations::for_hypertension());
        return Some(RuleOutcome {
            alarm_type: AlarmType::SuspectedPreeclampsia,
            priority: PriorityLevel::High,
            score: 75,
            message: format!(
                "Sospecha de preeclampsia: presión arterial {bp} con síntomas de alarma"
            ),
            recommendations: recs,
        });
    }

    None
}

fn premature_labor(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if !ctx.has(SymptomCategory::Labor) {
        return None;
    }
    let weeks = ctx.observation.gestational_weeks?;

    if weeks < ctx.thresholds.very_premature_weeks {
        Some(RuleOutcome {
            alarm_type: AlarmType::VeryPrematureLabor,
            priority: PriorityLevel::Critical,
            score: 85,
            message: format!("Trabajo de parto muy prematuro: {weeks} semanas de gestación"),
            recommendations: recommendations::for_labor(),
        })
    } else if weeks < ctx.thresholds.premature_weeks {
        Some(RuleOutcome {
            alarm_type: AlarmType::PrematureLabor,
            priority: PriorityLevel::High,
            score: 70,
            message: format!("Trabajo de parto prematuro: {weeks} semanas de gestación"),
            recommendations: recommendations::for_labor(),
        })
    } else {
        None
    }
}

fn severe_vital_alteration(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let altered = ctx.heart_rate_at_least(ctx.thresholds.heart_rate_severe)
        || ctx.respiratory_rate_at_least(ctx.thresholds.respiratory_rate_severe)
        || ctx.temperature_at_least(ctx.thresholds.temperature_severe);
    if !altered {
        return None;
    }

    let detail = ctx.vital_details(
        ctx.thresholds.heart_rate_severe,
        ctx.thresholds.respiratory_rate_severe,
        ctx.thresholds.temperature_severe,
    );

    Some(RuleOutcome {
        alarm_type: AlarmType::SevereVitalAlteration,
        priority: PriorityLevel::High,
        score: 65,
        message: format!("Alteración severa de signos vitales: {detail}"),
        recommendations: recommendations::for_close_vital_monitoring(),
    })
}

fn hypertension(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if !ctx.ordinary_hypertension() {
        return None;
    }

    Some(RuleOutcome {
        alarm_type: AlarmType::Hypertension,
        priority: PriorityLevel::Medium,
        score: 50,
        message: format!("Hipertensión: presión arterial {}", ctx.blood_pressure_text()),
        recommendations: recommendations::for_hypertension(),
    })
}

fn moderate_vital_alteration(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    let altered = ctx.heart_rate_at_least(ctx.thresholds.heart_rate_high)
        || ctx.respiratory_rate_at_least(ctx.thresholds.respiratory_rate_high)
        || ctx.temperature_at_least(ctx.thresholds.temperature_high);
    if !altered {
        return None;
    }

    let detail = ctx.vital_details(
        ctx.thresholds.heart_rate_high,
        ctx.thresholds.respiratory_rate_high,
        ctx.thresholds.temperature_high,
    );

    Some(RuleOutcome {
        alarm_type: AlarmType::VitalAlteration,
        priority: PriorityLevel::Medium,
        score: 45,
        message: format!("Alteración de signos vitales: {detail}"),
        recommendations: recommendations::for_vital_monitoring(),
    })
}

fn edema(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if ctx.observation.edema != Some(true) {
        return None;
    }

    Some(RuleOutcome {
        alarm_type: AlarmType::Edema,
        priority: PriorityLevel::Medium,
        score: 40,
        message: "Edema presente en el control".into(),
        recommendations: recommendations::for_edema(),
    })
}

fn absent_fetal_movements(ctx: &RuleContext<'_>) -> Option<RuleOutcome> {
    if ctx.observation.fetal_movements != Some(false) {
        return None;
    }

    Some(RuleOutcome {
        alarm_type: AlarmType::AbsentFetalMovements,
        priority: PriorityLevel::Medium,
        score: 55,
        message: "Paciente reporta ausencia de movimientos fetales".into(),
        recommendations: recommendations::for_fetal_surveillance(),
    })
}
