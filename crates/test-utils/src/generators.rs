//! Property grid generators.
//!
//! These create predictable, verifiable grids laid out exactly as a model's
//! property files are, so tests can check which byte a query read.

use anyhow::{Context, Result};
use model_common::GridLayout;
use std::fs;
use std::path::Path;

/// Value used for file slots that no grid coordinate maps to.
pub const UNADDRESSED_VALUE: f32 = 0.0;

/// Creates a property grid in file order from a per-node function.
///
/// `value(x, y, z)` is stored at `layout.linear_index(x, y, z)`. Nodes that
/// map outside the file are skipped.
///
/// # Example
///
/// ```
/// use model_common::{AxisOrder, GridDims, GridLayout, SeekDirection};
/// use test_utils::create_property_grid;
///
/// let layout = GridLayout::new(GridDims::new(2, 3, 4), AxisOrder::FastY, SeekDirection::TopDown);
/// let grid = create_property_grid(&layout, |x, y, z| (x * 100 + y * 10 + z) as f32);
/// assert_eq!(grid.len(), 24);
/// assert_eq!(grid[1], 10.0); // x=0, y=1, z=0
/// ```
pub fn create_property_grid<F>(layout: &GridLayout, value: F) -> Vec<f32>
where
    F: Fn(usize, usize, usize) -> f32,
{
    let dims = layout.dims;
    let mut data = vec![UNADDRESSED_VALUE; dims.len()];

    for z in 0..dims.nz {
        for y in 0..dims.ny {
            for x in 0..dims.nx {
                if let Some(index) = layout.linear_index(x as i64, y as i64, z as i64) {
                    data[index as usize] = value(x, y, z);
                }
            }
        }
    }

    data
}

/// Creates a grid holding the same value at every node.
pub fn create_uniform_grid(layout: &GridLayout, value: f32) -> Vec<f32> {
    create_property_grid(layout, |_, _, _| value)
}

/// Creates a grid that changes linearly along each axis:
/// `base + x * dx + y * dy + z * dz`.
///
/// Trilinear interpolation reproduces such a field exactly, which makes it
/// useful for checking interpolation at arbitrary points.
pub fn create_linear_grid(layout: &GridLayout, base: f32, dx: f32, dy: f32, dz: f32) -> Vec<f32> {
    create_property_grid(layout, |x, y, z| {
        base + x as f32 * dx + y as f32 * dy + z as f32 * dz
    })
}

/// Write values as a flat native-endian `f32` property file.
pub fn write_property_file(path: &Path, values: &[f32]) -> Result<()> {
    fs::write(path, bytemuck::cast_slice::<f32, u8>(values))
        .with_context(|| format!("writing property file {}", path.display()))
}
