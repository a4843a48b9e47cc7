//! Grid dimensions and the on-disk ordering of grid values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Number of samples along each grid axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridDims {
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
}

impl GridDims {
    pub fn new(nx: usize, ny: usize, nz: usize) -> Self {
        Self { nx, ny, nz }
    }

    /// Total number of grid points.
    pub fn len(&self) -> usize {
        self.nx * self.ny * self.nz
    }

    /// Total number of grid points, saturating at `u64::MAX`.
    pub fn len_u64(&self) -> u64 {
        self.checked_len().unwrap_or(u64::MAX)
    }

    /// Total number of grid points, or `None` if it does not fit in a `u64`.
    pub fn checked_len(&self) -> Option<u64> {
        (self.nx as u64)
            .checked_mul(self.ny as u64)?
            .checked_mul(self.nz as u64)
    }

    /// Check if grid is empty.
    pub fn is_empty(&self) -> bool {
        self.nx == 0 || self.ny == 0 || self.nz == 0
    }
}

/// Which horizontal axis varies fastest in a property file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisOrder {
    /// Consecutive values step along x.
    FastX,
    /// Consecutive values step along y.
    FastY,
}

impl AxisOrder {
    /// Parse a `seek_axis` value (`fast-x`/`fast-X`, `fast-y`/`fast-Y`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "fast-x" | "fast-X" => Some(Self::FastX),
            "fast-y" | "fast-Y" => Some(Self::FastY),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FastX => "fast-X",
            Self::FastY => "fast-Y",
        }
    }
}

impl fmt::Display for AxisOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Order in which depth layers appear in a property file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SeekDirection {
    TopDown,
    BottomUp,
}

impl SeekDirection {
    /// Parse a `seek_direction` value (`top-down`, `bottom-up`).
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "top-down" => Some(Self::TopDown),
            "bottom-up" => Some(Self::BottomUp),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TopDown => "top-down",
            Self::BottomUp => "bottom-up",
        }
    }
}

impl fmt::Display for SeekDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Maps absolute grid coordinates to positions in a flat property file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridLayout {
    pub dims: GridDims,
    pub axis_order: AxisOrder,
    pub seek_direction: SeekDirection,
}

impl GridLayout {
    pub fn new(dims: GridDims, axis_order: AxisOrder, seek_direction: SeekDirection) -> Self {
        Self {
            dims,
            axis_order,
            seek_direction,
        }
    }

    /// Raw linear index for grid coordinate `(x, y, z)`.
    ///
    /// The four layouts are kept exactly as existing model files were
    /// written, including the `nz - z` plane offset of fast-X/bottom-up,
    /// which differs from the `nz - 1 - z` used by fast-Y/bottom-up. The
    /// result may fall outside the file; see [`GridLayout::linear_index`].
    pub fn raw_index(&self, x: i64, y: i64, z: i64) -> i64 {
        let nx = self.dims.nx as i64;
        let ny = self.dims.ny as i64;
        let nz = self.dims.nz as i64;
        let plane = nx * ny;

        match (self.axis_order, self.seek_direction) {
            (AxisOrder::FastY, SeekDirection::TopDown) => z * plane + x * ny + y,
            (AxisOrder::FastY, SeekDirection::BottomUp) => (nz - 1 - z) * plane + x * ny + y,
            (AxisOrder::FastX, SeekDirection::TopDown) => z * plane + y * nx + x,
            (AxisOrder::FastX, SeekDirection::BottomUp) => (nz - z) * plane + y * nx + x,
        }
    }

    /// Linear index for `(x, y, z)`, or `None` when it lies outside the
    /// `nx * ny * nz` values of a property file.
    pub fn linear_index(&self, x: i64, y: i64, z: i64) -> Option<u64> {
        let index = self.raw_index(x, y, z);
        if index < 0 || index as u64 >= self.dims.len_u64() {
            return None;
        }
        Some(index as u64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(axis_order: AxisOrder, seek_direction: SeekDirection) -> GridLayout {
        GridLayout::new(GridDims::new(4, 3, 5), axis_order, seek_direction)
    }

    #[test]
    fn test_parse_axis_order() {
        assert_eq!(AxisOrder::parse("fast-x"), Some(AxisOrder::FastX));
        assert_eq!(AxisOrder::parse("fast-X"), Some(AxisOrder::FastX));
        assert_eq!(AxisOrder::parse("fast-y"), Some(AxisOrder::FastY));
        assert_eq!(AxisOrder::parse("fast-Y"), Some(AxisOrder::FastY));
        assert_eq!(AxisOrder::parse("fast-z"), None);
    }

    #[test]
    fn test_parse_seek_direction() {
        assert_eq!(SeekDirection::parse("top-down"), Some(SeekDirection::TopDown));
        assert_eq!(SeekDirection::parse("bottom-up"), Some(SeekDirection::BottomUp));
        assert_eq!(SeekDirection::parse("sideways"), None);
    }

    #[test]
    fn test_fast_y_top_down() {
        let l = layout(AxisOrder::FastY, SeekDirection::TopDown);
        // z * nx * ny + x * ny + y
        assert_eq!(l.raw_index(2, 1, 3), 3 * 12 + 2 * 3 + 1);
        assert_eq!(l.linear_index(0, 0, 0), Some(0));
    }

    #[test]
    fn test_fast_y_bottom_up() {
        let l = layout(AxisOrder::FastY, SeekDirection::BottomUp);
        // (nz - 1 - z) * nx * ny + x * ny + y
        assert_eq!(l.raw_index(2, 1, 3), 12 + 2 * 3 + 1);
        assert_eq!(l.linear_index(0, 0, 4), Some(0));
    }

    #[test]
    fn test_fast_x_top_down() {
        let l = layout(AxisOrder::FastX, SeekDirection::TopDown);
        // z * nx * ny + y * nx + x
        assert_eq!(l.raw_index(2, 1, 3), 3 * 12 + 4 + 2);
    }

    #[test]
    fn test_fast_x_bottom_up_keeps_plane_offset() {
        let l = layout(AxisOrder::FastX, SeekDirection::BottomUp);
        // (nz - z) * nx * ny + y * nx + x
        assert_eq!(l.raw_index(2, 1, 3), 2 * 12 + 4 + 2);
        // z = 0 addresses one plane past the end of the file
        assert_eq!(l.raw_index(0, 0, 0), 60);
        assert_eq!(l.linear_index(0, 0, 0), None);
        assert_eq!(l.linear_index(3, 2, 1), Some(4 * 12 + 2 * 4 + 3));
    }

    #[test]
    fn test_out_of_range_index() {
        let l = layout(AxisOrder::FastY, SeekDirection::BottomUp);
        assert_eq!(l.linear_index(0, 0, 5), None);
        let l = layout(AxisOrder::FastY, SeekDirection::TopDown);
        assert_eq!(l.linear_index(0, 0, 5), None);
        assert_eq!(l.linear_index(3, 2, 4), Some(59));
    }

    #[test]
    fn test_grid_dims_len() {
        let dims = GridDims::new(4, 3, 5);
        assert_eq!(dims.len(), 60);
        assert_eq!(dims.len_u64(), 60);
        assert!(!dims.is_empty());
        assert!(GridDims::new(0, 3, 5).is_empty());
    }

    #[test]
    fn test_grid_dims_len_overflow() {
        let huge = GridDims::new(1 << 22, 1 << 22, 1 << 22);
        assert_eq!(huge.checked_len(), None);
        assert_eq!(huge.len_u64(), u64::MAX);
        assert_eq!(GridDims::new(1 << 21, 1 << 21, 1 << 21).checked_len(), Some(1 << 63));
    }
}
