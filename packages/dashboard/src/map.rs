//! Hotspot map: heatmap layer over the backend's point list.

use drive_smart_api::Backend;
use drive_smart_geo::MapCapability;
use drive_smart_geo::heatmap::{HeatGrid, MapConfig};

/// Everything needed to draw the map once.
#[derive(Debug, Clone)]
pub struct MapScene {
    /// Center and zoom derived from the first point.
    pub config: MapConfig,
    /// Shaded density grid over all points.
    pub grid: HeatGrid,
    /// Number of heatmap points in the layer.
    pub point_count: usize,
}

/// Lifecycle of the map view.
///
/// There is no error variant on purpose: a missing capability or a failed
/// fetch leaves the map blank without a user-visible error, and an empty
/// point list only logs a warning.
#[derive(Debug, Clone, Default)]
pub enum MapState {
    /// No capability or the map data fetch failed; render nothing.
    #[default]
    Unavailable,
    /// Backend returned no points; render nothing, warning logged.
    Empty,
    /// Map is ready to draw.
    Ready(MapScene),
}

/// The hotspot map view.
#[derive(Debug, Default)]
pub struct MapView {
    state: MapState,
    /// API key identity of the last activation; re-activation happens only
    /// when this changes.
    activated_key: Option<String>,
}

impl MapView {
    /// Creates the view with no map loaded.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current lifecycle state.
    #[must_use]
    pub const fn state(&self) -> &MapState {
        &self.state
    }

    /// Fetches the point list and builds the heatmap scene.
    ///
    /// Skips work when the capability identity is unchanged since the last
    /// activation. `grid_width` x `grid_height` sizes the density grid.
    pub async fn activate<B: Backend + ?Sized>(
        &mut self,
        backend: &B,
        capability: Option<&MapCapability>,
        grid_width: usize,
        grid_height: usize,
    ) {
        let Some(capability) = capability else {
            log::warn!("Mapping provider not ready or API key missing");
            self.state = MapState::Unavailable;
            self.activated_key = None;
            return;
        };

        if self.activated_key.as_deref() == Some(capability.api_key())
            && matches!(self.state, MapState::Ready(_))
        {
            return;
        }
        self.activated_key = Some(capability.api_key().to_string());

        let data = match backend.map_data().await {
            Ok(data) => data,
            Err(e) => {
                log::error!("Failed to init map: {e}");
                self.state = MapState::Unavailable;
                return;
            }
        };

        if data.locations.is_empty() {
            log::warn!("No heatmap locations received from backend");
            self.state = MapState::Empty;
            return;
        }

        let Some(config) = MapConfig::centered_on_first(&data.locations) else {
            self.state = MapState::Empty;
            return;
        };
        let Some(grid) = HeatGrid::from_points(&data.locations, grid_width, grid_height) else {
            self.state = MapState::Empty;
            return;
        };

        self.state = MapState::Ready(MapScene {
            config,
            grid,
            point_count: data.locations.len(),
        });
    }
}
