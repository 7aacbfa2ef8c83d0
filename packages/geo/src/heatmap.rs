//! Heatmap density grid.
//!
//! The external map renders point density as a color gradient; the terminal
//! analog buckets the points into a fixed-size cell grid and shades each
//! cell by count. The map is centered on the first point at a fixed zoom,
//! matching the original map configuration.

use drive_smart_api_models::HeatmapPoint;

/// Fixed map zoom level.
pub const DEFAULT_ZOOM: u8 = 6;

/// Shade ramp from sparse to dense; empty cells render as a space.
const SHADES: [char; 5] = ['·', '░', '▒', '▓', '█'];

/// Map construction parameters derived from the point list.
#[derive(Debug, Clone, Copy)]
pub struct MapConfig {
    /// Map center: the first heatmap point.
    pub center: HeatmapPoint,
    /// Zoom level.
    pub zoom: u8,
}

impl MapConfig {
    /// Centers on the first point, or `None` for an empty list.
    #[must_use]
    pub fn centered_on_first(points: &[HeatmapPoint]) -> Option<Self> {
        points.first().map(|&center| Self {
            center,
            zoom: DEFAULT_ZOOM,
        })
    }
}

/// A density grid over the bounding box of the heatmap points.
#[derive(Debug, Clone)]
pub struct HeatGrid {
    width: usize,
    height: usize,
    cells: Vec<u32>,
    max: u32,
}

impl HeatGrid {
    /// Buckets the points into a `width` x `height` grid.
    ///
    /// Returns `None` for an empty point list or a zero-sized grid.
    #[must_use]
    pub fn from_points(points: &[HeatmapPoint], width: usize, height: usize) -> Option<Self> {
        if points.is_empty() || width == 0 || height == 0 {
            return None;
        }

        let mut min_lat = f64::INFINITY;
        let mut max_lat = f64::NEG_INFINITY;
        let mut min_lng = f64::INFINITY;
        let mut max_lng = f64::NEG_INFINITY;
        for point in points {
            min_lat = min_lat.min(point.lat);
            max_lat = max_lat.max(point.lat);
            min_lng = min_lng.min(point.lng);
            max_lng = max_lng.max(point.lng);
        }

        let mut cells = vec![0_u32; width * height];
        for point in points {
            // North at the top: high latitudes map to low rows.
            let row = bucket(max_lat - point.lat, max_lat - min_lat, height);
            let col = bucket(point.lng - min_lng, max_lng - min_lng, width);
            cells[row * width + col] += 1;
        }

        let max = cells.iter().copied().max().unwrap_or(0);
        Some(Self {
            width,
            height,
            cells,
            max,
        })
    }

    /// Number of grid columns.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Number of grid rows.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Count in the cell at `(row, col)`.
    #[must_use]
    pub fn cell(&self, row: usize, col: usize) -> u32 {
        self.cells[row * self.width + col]
    }

    /// Renders the grid as shaded text rows, north at the top.
    #[must_use]
    pub fn render(&self) -> Vec<String> {
        (0..self.height)
            .map(|row| {
                (0..self.width)
                    .map(|col| shade(self.cell(row, col), self.max))
                    .collect()
            })
            .collect()
    }
}

/// Maps an offset within a span onto a bucket index, clamped to the grid.
fn bucket(offset: f64, span: f64, buckets: usize) -> usize {
    if span <= 0.0 {
        return 0;
    }
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (offset / span * buckets as f64) as usize;
    index.min(buckets - 1)
}

/// Shade character for a cell count relative to the densest cell.
fn shade(count: u32, max: u32) -> char {
    if count == 0 || max == 0 {
        return ' ';
    }
    let ratio = f64::from(count) / f64::from(max);
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let index = (ratio * SHADES.len() as f64).ceil() as usize;
    SHADES[index.clamp(1, SHADES.len()) - 1]
}
