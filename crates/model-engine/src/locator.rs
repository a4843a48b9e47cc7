//! Locates the grid cell enclosing a point in the local frame.
//!
//! Depth layers are numbered from the bottom: layer `nz - 1` is the surface
//! and layer 0 the deepest. A cell spans horizontal nodes `ix..=ix+1`,
//! `iy..=iy+1` and depth layers `iz` (upper) and `iz - 1` (lower).

use model_common::{GridLayout, ModelConfiguration};
use thiserror::Error;
use tracing::debug;

/// The eight grid nodes surrounding a point, and where the point sits
/// between them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    /// Grid coordinates of the upper-plane origin node.
    pub origin: (i64, i64, i64),
    /// Linear indices in corner order: origin, +x, +y, +x+y on the upper
    /// plane, then the same four on the lower plane. `None` marks a node
    /// outside the stored values.
    pub indices: [Option<u64>; 8],
    pub x_percent: f64,
    pub y_percent: f64,
    pub z_percent: f64,
}

/// Corner offsets `(dx, dy, dz)` in [`Cell::indices`] order.
pub const CORNER_OFFSETS: [(i64, i64, i64); 8] = [
    (0, 0, 0),
    (1, 0, 0),
    (0, 1, 0),
    (1, 1, 0),
    (0, 0, -1),
    (1, 0, -1),
    (0, 1, -1),
    (1, 1, -1),
];

/// Why a point has no enclosing cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Rejection {
    /// The local coordinate is NaN or infinite.
    #[error("coordinate is not finite")]
    NonFinite,
    /// Outside the footprint, or on its last row/column of nodes.
    #[error("point lies outside the model footprint")]
    OutsideFootprint,
    /// Not enough depth layers below the point.
    #[error("point lies below the deepest interpolable layer")]
    BelowModel,
}

/// Maps local coordinates and depth to grid cells.
#[derive(Debug, Clone)]
pub struct GridLocator {
    layout: GridLayout,
    total_width_m: f64,
    total_height_m: f64,
    depth: f64,
    depth_interval: f64,
    x_interval: f64,
    y_interval: f64,
}

impl GridLocator {
    pub fn new(
        layout: GridLayout,
        total_width_m: f64,
        total_height_m: f64,
        depth: f64,
        depth_interval: f64,
    ) -> Self {
        let nx = layout.dims.nx;
        let ny = layout.dims.ny;

        // Single-sample axes span the full extent
        let x_interval = if nx > 1 {
            total_width_m / (nx - 1) as f64
        } else {
            total_width_m
        };
        let y_interval = if ny > 1 {
            total_height_m / (ny - 1) as f64
        } else {
            total_height_m
        };

        Self {
            layout,
            total_width_m,
            total_height_m,
            depth,
            depth_interval,
            x_interval,
            y_interval,
        }
    }

    /// Create a locator for a model whose footprint measures
    /// `total_width_m` by `total_height_m`.
    pub fn from_config(config: &ModelConfiguration, total_width_m: f64, total_height_m: f64) -> Self {
        Self::new(
            config.layout(),
            total_width_m,
            total_height_m,
            config.depth,
            config.depth_interval,
        )
    }

    pub fn layout(&self) -> &GridLayout {
        &self.layout
    }

    /// Horizontal node spacing `(x, y)` in meters.
    pub fn intervals(&self) -> (f64, f64) {
        (self.x_interval, self.y_interval)
    }

    /// Upper depth layer for a depth below the surface.
    pub fn depth_layer(&self, depth: f64) -> i64 {
        ((self.depth / self.depth_interval - 1.0) - (depth / self.depth_interval).floor()) as i64
    }

    /// Find the cell containing local point `(e, n)` at `depth`.
    pub fn locate(&self, e: f64, n: f64, depth: f64) -> Result<Cell, Rejection> {
        if !(e.is_finite() && n.is_finite() && depth.is_finite()) {
            return Err(Rejection::NonFinite);
        }

        let nx = self.layout.dims.nx as i64;
        let ny = self.layout.dims.ny as i64;

        let ix = (e / self.total_width_m * (nx - 1) as f64).floor() as i64;
        let iy = (n / self.total_height_m * (ny - 1) as f64).floor() as i64;
        let iz = self.depth_layer(depth);

        // Interpolation needs both ix and ix + 1 (likewise iy)
        if ix < 0 || iy < 0 || ix > nx - 2 || iy > ny - 2 {
            debug!(e, n, ix, iy, "Point outside model footprint");
            return Err(Rejection::OutsideFootprint);
        }

        if iz < 1 {
            debug!(depth, iz, "Point below supported depth range");
            return Err(Rejection::BelowModel);
        }

        let indices = CORNER_OFFSETS.map(|(dx, dy, dz)| {
            self.layout.linear_index(ix + dx, iy + dy, iz + dz)
        });

        Ok(Cell {
            origin: (ix, iy, iz),
            indices,
            x_percent: (e % self.x_interval) / self.x_interval,
            y_percent: (n % self.y_interval) / self.y_interval,
            z_percent: (depth % self.depth_interval) / self.depth_interval,
        })
    }
}
