//! Point query engine for gridded seismic velocity models.
//!
//! A model is a regular `nx * ny * nz` grid of Vp, Vs and density laid over
//! a (possibly rotated) rectangular footprint in a UTM zone. Queries give a
//! longitude, latitude and depth; the engine projects the point into the
//! model's local frame, finds the enclosing grid cell, reads its eight
//! corners and interpolates trilinearly. Qp and Qs are derived from Vs.
//!
//! # Architecture
//!
//! ```text
//! ModelContext::init(root, label)
//!      │
//!      ├─► ModelConfiguration::load  (<root>/model/<label>/data/config)
//!      ├─► ModelStorage::open        (memory or disk, per property)
//!      └─► LocalFrame::from_config   (UTM + rotation)
//!
//! ModelContext::query(points)
//!      │
//!      └─► QueryEngine::query_point (per point, in order)
//! ```
//!
//! # Example
//!
//! ```ignore
//! use model_engine::{ModelContext, VelocityModel};
//! use model_common::QueryPoint;
//!
//! let model = ModelContext::init("/opt/ucvm", "socal-basin")?;
//! let samples = model.query(&[QueryPoint::new(-118.2, 34.0, 500.0)]);
//! model.finalize()?;
//! ```

pub mod config;
pub mod interpolation;
pub mod locator;
pub mod query;
pub mod service;
pub mod storage;

// Re-export commonly used types at crate root
pub use config::EngineConfig;
pub use interpolation::{bilinear_interpolation, linear_interpolation, trilinear_interpolation};
pub use locator::{Cell, GridLocator, Rejection};
pub use model_common::{ModelConfiguration, ModelError, ModelResult, PropertySample, QueryPoint};
pub use query::{derive_attenuation, QueryEngine};
pub use service::{ModelContext, VelocityModel, MODEL_VERSION};
pub use storage::{ModelStorage, Property, PropertyStore, StorageReadiness, StorageTier};
