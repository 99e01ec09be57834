//! # ALMA domain types
//!
//! Shared data model for the ALMA maternal-health alarm and risk engine:
//! clinical observations, reported symptom sets, alarm evaluation results and
//! longitudinal risk profiles.
//!
//! This crate holds data only. Evaluation logic (the alarm cascade, risk
//! scoring and profile aggregation) lives in `alma-engine`; persistence,
//! transport and notification delivery belong to the surrounding service
//! layer and have no representation here.

pub mod alarm;
pub mod history;
pub mod observation;
pub mod profile;
pub mod symptoms;

pub use alarm::{AlarmResult, AlarmType, PriorityLevel};
pub use history::{AlertRecord, PatientAttributes, PatientHistory, VisitRecord};
pub use observation::Observation;
pub use profile::{RiskLevel, RiskProfile, TrendDirection};
pub use symptoms::SymptomSet;
