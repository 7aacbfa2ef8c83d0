#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! View-state units for the DriveSmart dashboard.
//!
//! Each screen is a small state machine over one or more backend fetches:
//! activation moves the view to loading, issues the request, and applies the
//! result unless a newer activation superseded it. The sequence counter in
//! every view acts as a cancellation token: a response arriving for a stale
//! activation is dropped, never rendered.
//!
//! Views hold no shared mutable state. The one cross-view concern, whether
//! the external mapping provider is usable, is an explicit
//! [`drive_smart_geo::MapCapability`] created once by [`init_map_capability`]
//! and passed down immutably.

pub mod analytics;
pub mod map;
pub mod prediction;
pub mod reports;
pub mod summary;

#[cfg(test)]
pub(crate) mod test_support;

use drive_smart_api::Backend;
use drive_smart_geo::MapCapability;

/// Lifecycle of a fetch-backed view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ViewState<T> {
    /// A fetch is outstanding.
    #[default]
    Loading,
    /// The fetch resolved and its payload is ready to render.
    Ready(T),
    /// The fetch rejected; terminal for this activation (no retry).
    Error(String),
}

impl<T> ViewState<T> {
    /// The ready payload, if any.
    #[must_use]
    pub const fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            Self::Loading | Self::Error(_) => None,
        }
    }

    /// The error message, if any.
    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Error(message) => Some(message),
            Self::Loading | Self::Ready(_) => None,
        }
    }
}

/// Fetches the backend's map data once and derives the map capability.
///
/// A fetch failure or missing API key yields `None`: map-dependent views
/// then render nothing, without surfacing an error.
pub async fn init_map_capability<B: Backend + ?Sized>(backend: &B) -> Option<MapCapability> {
    match backend.map_data().await {
        Ok(data) => {
            let capability = MapCapability::from_map_data(&data);
            if capability.is_none() {
                log::warn!("Mapping provider API key missing; map will not render");
            }
            capability
        }
        Err(e) => {
            log::warn!("Failed to fetch map data: {e}");
            None
        }
    }
}
