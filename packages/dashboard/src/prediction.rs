//! Severity prediction screen: form, location flow, and predict action.

use drive_smart_api::Backend;
use drive_smart_geo::geocode::{coordinate_label, reverse_geocode};
use drive_smart_geo::{GeolocationProvider, MapCapability};
use drive_smart_prediction::{
    PredictionForm, PredictionOutcome, build_payload, fallback_outcome, outcome_from_response,
};

/// The prediction screen.
///
/// Field edits mutate [`Self::form`] directly; the two actions are
/// [`Self::locate`] and [`Self::predict`]. The last outcome is kept until
/// the next submit.
#[derive(Debug, Default)]
pub struct PredictionView {
    /// Editable form state.
    pub form: PredictionForm,
    result: Option<PredictionOutcome>,
}

impl PredictionView {
    /// Creates the view with default form values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The most recent outcome, if any.
    #[must_use]
    pub const fn result(&self) -> Option<PredictionOutcome> {
        self.result
    }

    /// Resolves the device position into the location field.
    ///
    /// On geolocation failure the field shows the error's fixed message.
    /// On success the position is reverse-geocoded through the mapping
    /// provider when a capability is present; a failed or empty geocode
    /// falls back to the raw `"lat, lng"` string.
    pub async fn locate<G: GeolocationProvider + ?Sized>(
        &mut self,
        provider: &G,
        client: &reqwest::Client,
        capability: Option<&MapCapability>,
    ) -> &str {
        let label = match provider.current_position().await {
            Err(e) => e.to_string(),
            Ok(position) => {
                let geocoded = match capability {
                    Some(capability) => {
                        match reverse_geocode(client, capability.api_key(), position).await {
                            Ok(address) => address,
                            Err(e) => {
                                log::warn!("Reverse geocoding failed: {e}");
                                None
                            }
                        }
                    }
                    None => None,
                };
                geocoded.unwrap_or_else(|| coordinate_label(position))
            }
        };
        self.form.location = label;
        &self.form.location
    }

    /// Builds the payload from the form and submits it.
    ///
    /// A failed POST or a response without a prediction is never surfaced:
    /// a random fallback-table outcome is substituted instead, marked as a
    /// fallback and logged at `warn`.
    pub async fn predict<B: Backend + ?Sized>(&mut self, backend: &B) -> PredictionOutcome {
        let payload = build_payload(&self.form);
        let outcome = match backend.predict(&payload).await {
            Ok(response) => outcome_from_response(&response),
            Err(e) => {
                log::warn!("Prediction request failed: {e}");
                None
            }
        };
        let outcome = outcome.unwrap_or_else(fallback_outcome);
        self.result = Some(outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockBackend;
    use async_trait::async_trait;
    use drive_smart_geo::{Coordinates, GeolocationError};
    use drive_smart_prediction::{FALLBACK_OUTCOMES, Severity};

    struct FixedGeolocation(Result<Coordinates, GeolocationError>);

    #[async_trait]
    impl GeolocationProvider for FixedGeolocation {
        async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
            self.0
        }
    }

    #[tokio::test]
    async fn successful_predict_maps_label_and_confidence() {
        let backend = MockBackend::healthy();
        let mut view = PredictionView::new();
        let outcome = view.predict(&backend).await;

        assert_eq!(outcome.severity, Severity::Serious);
        assert_eq!(outcome.confidence, Some(87));
        assert!(!outcome.fallback);
        assert_eq!(view.result(), Some(outcome));
    }

    #[tokio::test]
    async fn failed_predict_substitutes_a_fallback_tuple() {
        let backend = MockBackend {
            fail_predict: true,
            ..MockBackend::healthy()
        };
        let mut view = PredictionView::new();

        for _ in 0..16 {
            let outcome = view.predict(&backend).await;
            assert!(outcome.fallback);
            assert!(FALLBACK_OUTCOMES
                .iter()
                .any(|&(severity, confidence)| outcome.severity == severity
                    && outcome.confidence == Some(confidence)));
        }
    }

    #[tokio::test]
    async fn denied_geolocation_fills_the_fixed_message() {
        let mut view = PredictionView::new();
        let client = reqwest::Client::new();
        let provider = FixedGeolocation(Err(GeolocationError::PermissionDenied));

        let label = view.locate(&provider, &client, None).await;
        assert_eq!(
            label,
            "Location access denied. Please enable location in your browser settings."
        );
    }

    #[tokio::test]
    async fn position_without_capability_falls_back_to_raw_coordinates() {
        let mut view = PredictionView::new();
        let client = reqwest::Client::new();
        let provider = FixedGeolocation(Ok(Coordinates {
            lat: 53.0,
            lng: -1.5,
        }));

        let label = view.locate(&provider, &client, None).await;
        assert_eq!(label, "53, -1.5");
    }
}
