//! Reverse geocoding through the external mapping provider.
//!
//! Turns a coordinate pair into a human-readable address for the prediction
//! form's location field. Any failure (transport, non-OK provider status,
//! missing address) degrades to the raw `"lat, lng"` string; the form
//! never blocks on the geocoder.

use thiserror::Error;

use crate::Coordinates;

/// Reverse geocoding endpoint of the mapping provider.
pub const GEOCODE_URL: &str = "https://maps.googleapis.com/maps/api/geocode/json";

/// Errors from reverse geocoding.
#[derive(Debug, Error)]
pub enum GeocodeError {
    /// HTTP request or body decoding failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Resolves a coordinate pair to a formatted address.
///
/// Returns `Ok(None)` when the provider answers with a non-OK status or an
/// empty result list; callers fall back to [`coordinate_label`].
///
/// # Errors
///
/// Returns [`GeocodeError`] if the HTTP request or response parsing fails.
pub async fn reverse_geocode(
    client: &reqwest::Client,
    api_key: &str,
    position: Coordinates,
) -> Result<Option<String>, GeocodeError> {
    let latlng = format!("{}, {}", position.lat, position.lng);
    let resp = client
        .get(GEOCODE_URL)
        .query(&[("latlng", latlng.as_str()), ("key", api_key)])
        .send()
        .await?;

    let body: serde_json::Value = resp.json().await?;
    Ok(parse_response(&body))
}

/// The raw coordinate label used when geocoding fails or returns nothing.
#[must_use]
pub fn coordinate_label(position: Coordinates) -> String {
    format!("{}, {}", position.lat, position.lng)
}

/// Extracts the first formatted address from a provider response.
///
/// Anything other than `status: "OK"` with a non-empty result list yields
/// `None`.
fn parse_response(body: &serde_json::Value) -> Option<String> {
    if body["status"].as_str() != Some("OK") {
        return None;
    }
    body["results"]
        .as_array()?
        .first()?
        .get("formatted_address")?
        .as_str()
        .map(String::from)
}
