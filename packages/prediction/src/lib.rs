#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Form state and result shaping for the severity prediction screen.
//!
//! The remote model was trained on log-transformed ages, so the payload
//! builder replaces the two age fields with their natural logarithm. Label
//! mapping and the fixed fallback table live here as well so the view layer
//! only orchestrates.

use drive_smart_api_models::{PredictionRequest, PredictionResponse};
use rand::Rng;

/// Driver age substituted when the field is empty or non-numeric.
pub const DEFAULT_DRIVER_AGE: u32 = 30;

/// Vehicle age substituted when the field is empty or non-numeric.
pub const DEFAULT_VEHICLE_AGE: u32 = 5;

/// Engine size substituted when the field is empty or non-numeric.
pub const DEFAULT_ENGINE_CC: f64 = 1500.0;

/// Speed limit substituted when the field is empty or non-numeric.
pub const DEFAULT_SPEED_LIMIT: f64 = 40.0;

/// One of the three fixed incident outcome classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Severity {
    /// Fatal outcome.
    Fatal,
    /// Serious injury outcome.
    Serious,
    /// Slight injury outcome.
    Slight,
}

impl Severity {
    /// Color tag used by the UI for this severity.
    #[must_use]
    pub const fn color_tag(self) -> &'static str {
        match self {
            Self::Fatal => "red",
            Self::Serious => "orange",
            Self::Slight => "yellow",
        }
    }

    /// Static recommended-actions list for this severity.
    #[must_use]
    pub const fn recommended_actions(self) -> &'static [&'static str] {
        match self {
            Self::Fatal => &[
                "Deploy maximum emergency response units",
                "Alert nearby hospitals for critical care",
                "Implement immediate traffic diversion",
            ],
            Self::Serious => &[
                "Dispatch ambulance and police units",
                "Prepare for potential injuries",
                "Monitor traffic flow closely",
            ],
            Self::Slight => &[
                "Standard response protocol",
                "Document incident for analysis",
                "Monitor for escalation",
            ],
        }
    }
}

/// Maps a raw model label to a severity class.
///
/// Exact `"1"` or any case-insensitive `fatal` substring is Fatal, `"2"` or
/// `serious` is Serious, everything else is Slight.
#[must_use]
pub fn classify_label(label: &str) -> Severity {
    let lower = label.to_lowercase();
    if label == "1" || lower.contains("fatal") {
        Severity::Fatal
    } else if label == "2" || lower.contains("serious") {
        Severity::Serious
    } else {
        Severity::Slight
    }
}

/// Editable form state for the prediction screen.
///
/// All fields are kept as entered text; parsing and defaulting happen only
/// when the payload is built, matching input-field semantics.
#[derive(Debug, Clone)]
pub struct PredictionForm {
    /// Free-text location (filled by the geolocation flow).
    pub location: String,
    /// Whether a police officer attended (`"0"` / `"1"`).
    pub did_police_officer_attend: String,
    /// Driver age in years.
    pub age_of_driver: String,
    /// Vehicle type code.
    pub vehicle: String,
    /// Vehicle age in years.
    pub age_of_vehicle: String,
    /// Engine size in cc.
    pub engine_cc: String,
    /// Day-of-week code.
    pub day: String,
    /// Weather code.
    pub weather: String,
    /// Light condition code.
    pub light: String,
    /// Road surface code.
    pub roadsc: String,
    /// Gender code.
    pub gender: String,
    /// Speed limit in km/h.
    pub speedl: String,
}

impl Default for PredictionForm {
    fn default() -> Self {
        Self {
            location: String::new(),
            did_police_officer_attend: "1".to_string(),
            age_of_driver: "34".to_string(),
            vehicle: "car".to_string(),
            age_of_vehicle: "10".to_string(),
            engine_cc: "1500".to_string(),
            day: "1".to_string(),
            weather: "clear".to_string(),
            light: "1".to_string(),
            roadsc: "dry".to_string(),
            gender: "1".to_string(),
            speedl: "30".to_string(),
        }
    }
}

/// Builds the predict payload from form state.
///
/// The two age fields are parsed as non-negative integers (falling back to
/// [`DEFAULT_DRIVER_AGE`] / [`DEFAULT_VEHICLE_AGE`]) and sent as their
/// natural logarithm.
#[must_use]
pub fn build_payload(form: &PredictionForm) -> PredictionRequest {
    PredictionRequest {
        did_police_officer_attend: form.did_police_officer_attend.clone(),
        age_of_driver: log_age(&form.age_of_driver, DEFAULT_DRIVER_AGE),
        vehicle: form.vehicle.clone(),
        age_of_vehicle: log_age(&form.age_of_vehicle, DEFAULT_VEHICLE_AGE),
        engine_cc: parse_float(&form.engine_cc, DEFAULT_ENGINE_CC),
        day: form.day.clone(),
        weather: form.weather.clone(),
        light: form.light.clone(),
        roadsc: form.roadsc.clone(),
        gender: form.gender.clone(),
        speedl: parse_float(&form.speedl, DEFAULT_SPEED_LIMIT),
    }
}

fn log_age(field: &str, default: u32) -> f64 {
    let age = field.trim().parse::<u32>().unwrap_or(default);
    f64::from(age).ln()
}

fn parse_float(field: &str, default: f64) -> f64 {
    field.trim().parse::<f64>().unwrap_or(default)
}

/// A prediction shown to the user, whether real or substituted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PredictionOutcome {
    /// Mapped severity class.
    pub severity: Severity,
    /// Confidence in whole percent, when the model exposed one.
    pub confidence: Option<u32>,
    /// True when this outcome came from the fallback table instead of the
    /// backend. Callers should label such results as placeholders.
    pub fallback: bool,
}

/// Maps a backend response to an outcome.
///
/// Returns `None` when the response carries no prediction, in which case
/// the caller substitutes a fallback outcome.
#[must_use]
pub fn outcome_from_response(response: &PredictionResponse) -> Option<PredictionOutcome> {
    let label = response.prediction.as_ref()?.as_text();
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let confidence = response.confidence.map(|c| c.round() as u32);
    Some(PredictionOutcome {
        severity: classify_label(&label),
        confidence,
        fallback: false,
    })
}

/// The fixed three-outcome fallback table.
pub const FALLBACK_OUTCOMES: [(Severity, u32); 3] = [
    (Severity::Fatal, 92),
    (Severity::Serious, 87),
    (Severity::Slight, 78),
];

/// Picks a uniformly random entry from the fallback table.
///
/// Used when the predict call fails for any reason; the outcome is marked
/// as a fallback so the UI can label it.
#[must_use]
pub fn fallback_outcome() -> PredictionOutcome {
    let index = rand::thread_rng().gen_range(0..FALLBACK_OUTCOMES.len());
    fallback_outcome_at(index)
}

/// The fallback outcome at a fixed table index.
#[must_use]
pub fn fallback_outcome_at(index: usize) -> PredictionOutcome {
    let (severity, confidence) = FALLBACK_OUTCOMES[index % FALLBACK_OUTCOMES.len()];
    PredictionOutcome {
        severity,
        confidence: Some(confidence),
        fallback: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drive_smart_api_models::PredictionLabel;

    #[test]
    fn ages_are_log_transformed() {
        let form = PredictionForm {
            age_of_driver: "34".to_string(),
            age_of_vehicle: "10".to_string(),
            ..PredictionForm::default()
        };
        let payload = build_payload(&form);
        assert_eq!(payload.age_of_driver.to_bits(), 34.0_f64.ln().to_bits());
        assert_eq!(payload.age_of_vehicle.to_bits(), 10.0_f64.ln().to_bits());
    }

    #[test]
    fn empty_or_bad_ages_use_defaults() {
        let form = PredictionForm {
            age_of_driver: String::new(),
            age_of_vehicle: "old".to_string(),
            ..PredictionForm::default()
        };
        let payload = build_payload(&form);
        assert_eq!(payload.age_of_driver.to_bits(), 30.0_f64.ln().to_bits());
        assert_eq!(payload.age_of_vehicle.to_bits(), 5.0_f64.ln().to_bits());
    }

    #[test]
    fn numeric_field_defaults() {
        let form = PredictionForm {
            engine_cc: String::new(),
            speedl: "fast".to_string(),
            ..PredictionForm::default()
        };
        let payload = build_payload(&form);
        assert!((payload.engine_cc - DEFAULT_ENGINE_CC).abs() < f64::EPSILON);
        assert!((payload.speedl - DEFAULT_SPEED_LIMIT).abs() < f64::EPSILON);
    }

    #[test]
    fn label_mapping_covers_all_classes() {
        assert_eq!(classify_label("1"), Severity::Fatal);
        assert_eq!(classify_label("FATAL crash"), Severity::Fatal);
        assert_eq!(classify_label("2"), Severity::Serious);
        assert_eq!(classify_label("serious injury"), Severity::Serious);
        assert_eq!(classify_label("3"), Severity::Slight);
        assert_eq!(classify_label(""), Severity::Slight);
        assert_eq!(classify_label("anything else"), Severity::Slight);
    }

    #[test]
    fn severity_color_tags() {
        assert_eq!(Severity::Fatal.color_tag(), "red");
        assert_eq!(Severity::Serious.color_tag(), "orange");
        assert_eq!(Severity::Slight.color_tag(), "yellow");
    }

    #[test]
    fn confidence_is_rounded_to_whole_percent() {
        let response = PredictionResponse {
            prediction: Some(PredictionLabel::Number(2.0)),
            confidence: Some(87.6),
        };
        let outcome = outcome_from_response(&response).unwrap();
        assert_eq!(outcome.severity, Severity::Serious);
        assert_eq!(outcome.confidence, Some(88));
        assert!(!outcome.fallback);
    }

    #[test]
    fn missing_prediction_yields_no_outcome() {
        assert!(outcome_from_response(&PredictionResponse::default()).is_none());
    }

    #[test]
    fn fallback_outcomes_come_from_fixed_table() {
        for index in 0..FALLBACK_OUTCOMES.len() {
            let outcome = fallback_outcome_at(index);
            assert!(outcome.fallback);
            assert!(FALLBACK_OUTCOMES
                .iter()
                .any(|&(severity, confidence)| outcome.severity == severity
                    && outcome.confidence == Some(confidence)));
        }
        // The random pick stays within the table too.
        for _ in 0..32 {
            let outcome = fallback_outcome();
            assert!(outcome.fallback);
            assert!(FALLBACK_OUTCOMES
                .iter()
                .any(|&(severity, confidence)| outcome.severity == severity
                    && outcome.confidence == Some(confidence)));
        }
    }

    #[test]
    fn recommended_actions_match_severity() {
        assert_eq!(
            Severity::Fatal.recommended_actions()[0],
            "Deploy maximum emergency response units"
        );
        assert_eq!(
            Severity::Serious.recommended_actions()[0],
            "Dispatch ambulance and police units"
        );
        assert_eq!(
            Severity::Slight.recommended_actions()[0],
            "Standard response protocol"
        );
    }
}
