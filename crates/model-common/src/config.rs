//! Model configuration file.
//!
//! Each model installation carries a plain `key = value` file at
//! `<root>/model/<label>/data/config`. Lines starting with `#` or a space,
//! and blank lines, are ignored. Unknown keys are ignored.

use crate::error::{ModelError, ModelResult};
use crate::grid::{AxisOrder, GridDims, GridLayout, SeekDirection};
use crate::types::{Footprint, PlanarPoint};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Location of the configuration file inside an installation.
pub fn config_path(root: impl AsRef<Path>, label: &str) -> PathBuf {
    model_data_root(root, label).join("config")
}

/// `<root>/model/<label>/data`
pub fn model_data_root(root: impl AsRef<Path>, label: &str) -> PathBuf {
    root.as_ref().join("model").join(label).join("data")
}

/// Immutable description of a gridded velocity model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfiguration {
    /// UTM zone the corner coordinates are expressed in.
    pub utm_zone: u32,
    /// Directory (relative to the data root) holding the property files.
    pub model_dir: String,
    pub nx: usize,
    pub ny: usize,
    pub nz: usize,
    /// Total depth of the model in meters.
    pub depth: f64,
    /// Vertical spacing between depth layers in meters.
    pub depth_interval: f64,
    /// Corner coordinates in UTM meters.
    pub footprint: Footprint,
    pub axis_order: AxisOrder,
    pub seek_direction: SeekDirection,
}

impl ModelConfiguration {
    /// Read and validate the configuration of an installed model.
    pub fn load(root: impl AsRef<Path>, label: &str) -> ModelResult<Self> {
        Self::from_file(config_path(root, label))
    }

    /// Read and validate a configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> ModelResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ModelError::ConfigUnreadable {
            path: path.to_path_buf(),
            source,
        })?;
        text.parse()
    }

    /// Grid dimensions.
    pub fn dims(&self) -> GridDims {
        GridDims::new(self.nx, self.ny, self.nz)
    }

    /// File layout used to address property values.
    pub fn layout(&self) -> GridLayout {
        GridLayout::new(self.dims(), self.axis_order, self.seek_direction)
    }

    /// Directory holding the property files of an installed model.
    pub fn data_dir(&self, root: impl AsRef<Path>, label: &str) -> PathBuf {
        model_data_root(root, label).join(&self.model_dir)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> ModelResult<()> {
        if self.utm_zone == 0 {
            return Err(ModelError::config_invalid("utm_zone", "must be > 0"));
        }
        if self.model_dir.is_empty() {
            return Err(ModelError::config_invalid("model_dir", "must not be empty"));
        }
        for (key, value) in [("nx", self.nx), ("ny", self.ny), ("nz", self.nz)] {
            if value == 0 {
                return Err(ModelError::config_invalid(key, "must be > 0"));
            }
        }
        // Linear indices are computed in i64
        match self.dims().checked_len() {
            Some(len) if len <= i64::MAX as u64 => {}
            _ => {
                return Err(ModelError::config_invalid(
                    "nx/ny/nz",
                    format!(
                        "{} x {} x {} grid points exceed the addressable range",
                        self.nx, self.ny, self.nz
                    ),
                ))
            }
        }
        if !(self.depth > 0.0) {
            return Err(ModelError::config_invalid("depth", "must be > 0"));
        }
        if !(self.depth_interval > 0.0) {
            return Err(ModelError::config_invalid("depth_interval", "must be > 0"));
        }

        let corners = self.footprint.corners();
        for i in 0..corners.len() {
            for j in (i + 1)..corners.len() {
                if corners[i] == corners[j] {
                    return Err(ModelError::config_invalid(
                        "corners",
                        "footprint corners must be distinct",
                    ));
                }
            }
        }
        if !(self.footprint.area() > 0.0) {
            return Err(ModelError::config_invalid(
                "corners",
                "footprint must have positive area",
            ));
        }

        Ok(())
    }

    /// Render the configuration in the `key = value` file format.
    pub fn to_config_string(&self) -> String {
        let fp = &self.footprint;
        let entries = [
            ("utm_zone", self.utm_zone.to_string()),
            ("model_dir", self.model_dir.clone()),
            ("nx", self.nx.to_string()),
            ("ny", self.ny.to_string()),
            ("nz", self.nz.to_string()),
            ("depth", self.depth.to_string()),
            ("depth_interval", self.depth_interval.to_string()),
            ("top_left_corner_e", fp.top_left.easting.to_string()),
            ("top_left_corner_n", fp.top_left.northing.to_string()),
            ("top_right_corner_e", fp.top_right.easting.to_string()),
            ("top_right_corner_n", fp.top_right.northing.to_string()),
            ("bottom_left_corner_e", fp.bottom_left.easting.to_string()),
            ("bottom_left_corner_n", fp.bottom_left.northing.to_string()),
            ("bottom_right_corner_e", fp.bottom_right.easting.to_string()),
            ("bottom_right_corner_n", fp.bottom_right.northing.to_string()),
            ("seek_axis", self.axis_order.to_string()),
            ("seek_direction", self.seek_direction.to_string()),
        ];

        let mut out = String::from("# Velocity model configuration\n");
        for (key, value) in entries {
            out.push_str(&format!("{} = {}\n", key, value));
        }
        out
    }
}

impl FromStr for ModelConfiguration {
    type Err = ModelError;

    fn from_str(text: &str) -> ModelResult<Self> {
        let entries = parse_entries(text);

        let footprint = Footprint {
            top_left: PlanarPoint::new(
                number(&entries, "top_left_corner_e")?,
                number(&entries, "top_left_corner_n")?,
            ),
            top_right: PlanarPoint::new(
                number(&entries, "top_right_corner_e")?,
                number(&entries, "top_right_corner_n")?,
            ),
            bottom_left: PlanarPoint::new(
                number(&entries, "bottom_left_corner_e")?,
                number(&entries, "bottom_left_corner_n")?,
            ),
            bottom_right: PlanarPoint::new(
                number(&entries, "bottom_right_corner_e")?,
                number(&entries, "bottom_right_corner_n")?,
            ),
        };

        let seek_axis = required(&entries, "seek_axis")?;
        let axis_order = AxisOrder::parse(seek_axis).ok_or_else(|| {
            ModelError::config_invalid("seek_axis", format!("unknown axis order '{}'", seek_axis))
        })?;

        let direction = required(&entries, "seek_direction")?;
        let seek_direction = SeekDirection::parse(direction).ok_or_else(|| {
            ModelError::config_invalid(
                "seek_direction",
                format!("unknown seek direction '{}'", direction),
            )
        })?;

        let config = Self {
            utm_zone: number(&entries, "utm_zone")?,
            model_dir: required(&entries, "model_dir")?.to_string(),
            nx: number(&entries, "nx")?,
            ny: number(&entries, "ny")?,
            nz: number(&entries, "nz")?,
            depth: number(&entries, "depth")?,
            depth_interval: number(&entries, "depth_interval")?,
            footprint,
            axis_order,
            seek_direction,
        };

        config.validate()?;
        Ok(config)
    }
}

/// Collect `key = value` pairs, keeping the last occurrence of a key.
fn parse_entries(text: &str) -> HashMap<&str, &str> {
    let mut entries = HashMap::new();

    for line in text.lines() {
        if line.is_empty() || line.starts_with('#') || line.starts_with(' ') {
            continue;
        }
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();
        let value = value.split_whitespace().next().unwrap_or("");
        if !key.is_empty() && !value.is_empty() {
            entries.insert(key, value);
        }
    }

    entries
}

fn required<'a>(entries: &HashMap<&str, &'a str>, key: &str) -> ModelResult<&'a str> {
    entries
        .get(key)
        .copied()
        .ok_or_else(|| ModelError::config_incomplete(key))
}

fn number<T: FromStr>(entries: &HashMap<&str, &str>, key: &str) -> ModelResult<T> {
    let value = required(entries, key)?;
    value
        .parse()
        .map_err(|_| ModelError::config_invalid(key, format!("'{}' is not a valid number", value)))
}
