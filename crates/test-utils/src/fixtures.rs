//! On-disk model installations for tests.
//!
//! A [`ModelFixture`] writes a complete installation into a temporary
//! directory: `<root>/model/<label>/data/config` plus property files in
//! `<root>/model/<label>/data/<model_dir>/`. The footprint is built from a
//! geographic origin, a node spacing and a rotation, so tests can address
//! points by local grid position.

use crate::generators::{create_uniform_grid, write_property_file};
use crate::paths::{temp_model_root, write_config_file};
use anyhow::{Context, Result};
use model_common::{
    AxisOrder, Footprint, GridDims, GridLayout, ModelConfiguration, PlanarPoint, QueryPoint,
    SeekDirection,
};
use projection::{LocalFrame, TransverseMercator};
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Common model geometries for testing.
pub mod geometry {
    /// UTM zone of every fixture unless overridden.
    pub const UTM_ZONE: u32 = 11;

    /// Geographic origin (bottom-left corner) in degrees, near Los Angeles.
    pub const ORIGIN: (f64, f64) = (-118.0, 34.0);

    /// Horizontal node spacing in meters.
    pub const NODE_SPACING_M: f64 = 1000.0;

    /// Vertical layer spacing in meters.
    pub const DEPTH_INTERVAL_M: f64 = 1000.0;

    /// Label the fixture installs its model under.
    pub const LABEL: &str = "test-model";

    /// Name of the data directory inside the installation.
    pub const MODEL_DIR: &str = "grid";
}

/// Builder for [`ModelFixture`].
#[derive(Debug, Clone)]
pub struct ModelFixtureBuilder {
    dims: GridDims,
    node_spacing_m: f64,
    depth_interval_m: f64,
    rotation: f64,
    utm_zone: u32,
    origin: (f64, f64),
    axis_order: AxisOrder,
    seek_direction: SeekDirection,
    properties: Vec<(&'static str, Vec<f32>)>,
}

impl Default for ModelFixtureBuilder {
    fn default() -> Self {
        Self {
            dims: GridDims::new(2, 2, 2),
            node_spacing_m: geometry::NODE_SPACING_M,
            depth_interval_m: geometry::DEPTH_INTERVAL_M,
            rotation: 0.0,
            utm_zone: geometry::UTM_ZONE,
            origin: geometry::ORIGIN,
            axis_order: AxisOrder::FastY,
            seek_direction: SeekDirection::TopDown,
            properties: Vec::new(),
        }
    }
}

impl ModelFixtureBuilder {
    pub fn dims(mut self, nx: usize, ny: usize, nz: usize) -> Self {
        self.dims = GridDims::new(nx, ny, nz);
        self
    }

    pub fn node_spacing(mut self, meters: f64) -> Self {
        self.node_spacing_m = meters;
        self
    }

    pub fn depth_interval(mut self, meters: f64) -> Self {
        self.depth_interval_m = meters;
        self
    }

    /// Rotate the footprint clockwise about its bottom-left corner.
    pub fn rotation(mut self, radians: f64) -> Self {
        self.rotation = radians;
        self
    }

    pub fn layout(mut self, axis_order: AxisOrder, seek_direction: SeekDirection) -> Self {
        self.axis_order = axis_order;
        self.seek_direction = seek_direction;
        self
    }

    /// The grid layout property files must follow.
    pub fn grid_layout(&self) -> GridLayout {
        GridLayout::new(self.dims, self.axis_order, self.seek_direction)
    }

    /// Add a property file (e.g. `"vp.dat"`) with values in file order.
    pub fn property(mut self, file_name: &'static str, values: Vec<f32>) -> Self {
        self.properties.push((file_name, values));
        self
    }

    /// Add `vp.dat`, `vs.dat` and `density.dat`, all holding `value`.
    pub fn uniform(self, value: f32) -> Self {
        let grid = create_uniform_grid(&self.grid_layout(), value);
        self.property("vp.dat", grid.clone())
            .property("vs.dat", grid.clone())
            .property("density.dat", grid)
    }

    /// Build the model configuration this fixture installs.
    pub fn configuration(&self) -> Result<ModelConfiguration> {
        let projection = TransverseMercator::utm(self.utm_zone)?;
        let (easting, northing) = projection.forward(self.origin.0, self.origin.1);
        let origin = PlanarPoint::new(easting, northing);

        let width = self.node_spacing_m * (self.dims.nx.max(2) - 1) as f64;
        let height = self.node_spacing_m * (self.dims.ny.max(2) - 1) as f64;
        let (sin, cos) = self.rotation.sin_cos();
        let at = |x: f64, y: f64| {
            PlanarPoint::new(
                origin.easting + x * cos + y * sin,
                origin.northing - x * sin + y * cos,
            )
        };

        Ok(ModelConfiguration {
            utm_zone: self.utm_zone,
            model_dir: geometry::MODEL_DIR.to_string(),
            nx: self.dims.nx,
            ny: self.dims.ny,
            nz: self.dims.nz,
            depth: self.depth_interval_m * self.dims.nz as f64,
            depth_interval: self.depth_interval_m,
            footprint: Footprint {
                bottom_left: at(0.0, 0.0),
                bottom_right: at(width, 0.0),
                top_left: at(0.0, height),
                top_right: at(width, height),
            },
            axis_order: self.axis_order,
            seek_direction: self.seek_direction,
        })
    }

    /// Write the installation into a fresh temporary directory.
    pub fn build(self) -> Result<ModelFixture> {
        let dir = temp_model_root()?;
        let config = self.configuration()?;

        write_config_file(dir.path(), geometry::LABEL, &config.to_config_string())?;
        let data_dir = config.data_dir(dir.path(), geometry::LABEL);
        fs::create_dir_all(&data_dir)
            .with_context(|| format!("creating {}", data_dir.display()))?;

        for (file_name, values) in &self.properties {
            write_property_file(&data_dir.join(file_name), values)?;
        }

        let frame = LocalFrame::from_config(&config)?;

        Ok(ModelFixture {
            dir,
            config,
            frame,
        })
    }
}

/// A model installed in a temporary directory.
pub struct ModelFixture {
    dir: TempDir,
    pub config: ModelConfiguration,
    pub frame: LocalFrame,
}

impl ModelFixture {
    pub fn builder() -> ModelFixtureBuilder {
        ModelFixtureBuilder::default()
    }

    /// Installation root to pass to `init`.
    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    pub fn label(&self) -> &'static str {
        geometry::LABEL
    }

    /// Replace the installed configuration file with `text`.
    pub fn rewrite_config(&self, text: &str) -> Result<()> {
        write_config_file(self.root(), geometry::LABEL, text).map(|_| ())
    }

    /// Directory holding the property files.
    pub fn data_dir(&self) -> PathBuf {
        self.config.data_dir(self.dir.path(), geometry::LABEL)
    }

    /// Geographic query point at local frame position `(e, n)`.
    pub fn point_at_local(&self, e: f64, n: f64, depth: f64) -> QueryPoint {
        let (lon, lat) = self.frame.local_to_geographic(e, n);
        QueryPoint::new(lon, lat, depth)
    }

    /// Geographic query point at fractional grid position `(gx, gy)`.
    pub fn point_at_grid(&self, gx: f64, gy: f64, depth: f64) -> QueryPoint {
        let (x_interval, y_interval) = self.node_intervals();
        self.point_at_local(gx * x_interval, gy * y_interval, depth)
    }

    /// Horizontal node spacing `(x, y)` in meters.
    pub fn node_intervals(&self) -> (f64, f64) {
        let x = if self.config.nx > 1 {
            self.frame.total_width_m() / (self.config.nx - 1) as f64
        } else {
            self.frame.total_width_m()
        };
        let y = if self.config.ny > 1 {
            self.frame.total_height_m() / (self.config.ny - 1) as f64
        } else {
            self.frame.total_height_m()
        };
        (x, y)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use model_common::config::config_path;

    #[test]
    fn test_fixture_layout_on_disk() {
        let fixture = ModelFixture::builder().uniform(1000.0).build().unwrap();
        let data_dir = fixture.data_dir();

        assert!(config_path(fixture.root(), fixture.label()).is_file());
        for name in ["vp.dat", "vs.dat", "density.dat"] {
            let len = fs::metadata(data_dir.join(name)).unwrap().len();
            assert_eq!(len, 8 * 4, "{} should hold 8 floats", name);
        }
        assert!(!data_dir.join("qp.dat").exists());
    }

    #[test]
    fn test_fixture_configuration_reloads() {
        let fixture = ModelFixture::builder().dims(4, 3, 5).build().unwrap();
        let reloaded = ModelConfiguration::load(fixture.root(), fixture.label()).unwrap();
        assert_eq!(reloaded.dims(), GridDims::new(4, 3, 5));
        assert_eq!(reloaded.depth, 5000.0);
        assert!((fixture.frame.total_width_m() - 3000.0).abs() < 1e-6);
        assert!((fixture.frame.total_height_m() - 2000.0).abs() < 1e-6);
    }

    #[test]
    fn test_point_at_grid_maps_back() {
        let fixture = ModelFixture::builder()
            .dims(4, 4, 2)
            .rotation(0.35)
            .build()
            .unwrap();
        let point = fixture.point_at_grid(1.5, 2.25, 10.0);
        let (e, n) = fixture.frame.geographic_to_local(point.longitude, point.latitude);
        assert!((e - 1500.0).abs() < 1e-3, "e = {}", e);
        assert!((n - 2250.0).abs() < 1e-3, "n = {}", n);
        assert_eq!(point.depth, 10.0);
    }
}
