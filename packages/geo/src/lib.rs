#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Location services for the DriveSmart dashboard.
//!
//! Three concerns live here:
//!
//! 1. **Device geolocation** behind the [`GeolocationProvider`] trait, with
//!    the three failure classes (denied, unavailable, timeout) mapped to
//!    fixed user-facing messages.
//! 2. **Reverse geocoding** through the external mapping provider's HTTP
//!    API, keyed by the API key the backend hands out.
//! 3. **Heatmap shaping**: bucketing the backend's point list into a
//!    density grid the terminal can shade.
//!
//! The mapping provider itself stays an opaque external service; the
//! [`MapCapability`] object is the explicit "provider is usable" token that
//! the coordinator creates once and passes down to the map view.

pub mod geocode;
pub mod heatmap;

use async_trait::async_trait;
use drive_smart_api_models::MapData;
use thiserror::Error;

/// A WGS84 coordinate pair.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    /// Latitude.
    pub lat: f64,
    /// Longitude.
    pub lng: f64,
}

/// Geolocation failures, one per browser-style error class.
///
/// The display strings are fixed UI copy and must not change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    /// The user (or platform) refused the location request.
    #[error("Location access denied. Please enable location in your browser settings.")]
    PermissionDenied,

    /// No position could be determined.
    #[error("Location information is unavailable.")]
    PositionUnavailable,

    /// The position request did not complete in time.
    #[error("Location request timed out. Please try again.")]
    Timeout,
}

/// Source of the device's current position.
///
/// The real device facility is permission-gated and asynchronous; fakes in
/// tests return each failure class directly.
#[async_trait]
pub trait GeolocationProvider: Send + Sync {
    /// Resolves the device's current position.
    ///
    /// # Errors
    ///
    /// Returns a [`GeolocationError`] for denial, unavailability, or
    /// timeout.
    async fn current_position(&self) -> Result<Coordinates, GeolocationError>;
}

/// Geolocation from `DRIVE_SMART_LAT` / `DRIVE_SMART_LNG`.
///
/// The terminal has no permission-gated positioning facility, so the
/// operator supplies coordinates through the environment; anything missing
/// or unparseable reports as unavailable.
#[derive(Debug, Clone, Copy, Default)]
pub struct EnvGeolocation;

#[async_trait]
impl GeolocationProvider for EnvGeolocation {
    async fn current_position(&self) -> Result<Coordinates, GeolocationError> {
        let lat = env_coord("DRIVE_SMART_LAT")?;
        let lng = env_coord("DRIVE_SMART_LNG")?;
        Ok(Coordinates { lat, lng })
    }
}

fn env_coord(var: &str) -> Result<f64, GeolocationError> {
    std::env::var(var)
        .ok()
        .and_then(|value| value.trim().parse().ok())
        .ok_or(GeolocationError::PositionUnavailable)
}

/// Proof that the external mapping provider is usable.
///
/// Created once by the top-level coordinator from the backend's map data
/// and passed down immutably; a view holding no capability renders nothing
/// rather than erroring.
#[derive(Debug, Clone)]
pub struct MapCapability {
    api_key: String,
}

impl MapCapability {
    /// Builds the capability when the backend supplied a non-empty API key.
    #[must_use]
    pub fn from_map_data(data: &MapData) -> Option<Self> {
        let api_key = data.api_key.as_deref()?.trim();
        if api_key.is_empty() {
            return None;
        }
        Some(Self {
            api_key: api_key.to_string(),
        })
    }

    /// The mapping provider API key.
    #[must_use]
    pub fn api_key(&self) -> &str {
        &self.api_key
    }
}
