//! Common types and utilities shared across the velocity-model crates.

pub mod config;
pub mod error;
pub mod grid;
pub mod types;

pub use config::ModelConfiguration;
pub use error::{ModelError, ModelResult};
pub use grid::{AxisOrder, GridDims, GridLayout, SeekDirection};
pub use types::{Footprint, PlanarPoint, PropertySample, QueryPoint, SENTINEL};
