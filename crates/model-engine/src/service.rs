//! Model lifecycle: initialize, query, finalize.

use crate::config::EngineConfig;
use crate::locator::GridLocator;
use crate::query::QueryEngine;
use crate::storage::{ModelStorage, StorageReadiness};
use model_common::{ModelConfiguration, ModelError, ModelResult, PropertySample, QueryPoint};
use projection::{GeometryDerived, LocalFrame};
use std::path::Path;
use tracing::info;

/// Version string reported to the host.
pub const MODEL_VERSION: &str = "CS173";

/// The interface a host uses to drive a velocity model.
pub trait VelocityModel: Sized {
    /// Initialize the model installed under `root` as `label`.
    fn init(root: &Path, label: &str) -> ModelResult<Self>;

    /// Query a batch of points. Never fails: points without data are
    /// answered with [`PropertySample::NO_DATA`].
    fn query(&self, points: &[QueryPoint]) -> Vec<PropertySample>;

    /// Release the model's memory and file handles.
    fn finalize(self) -> ModelResult<()>;

    /// Version information.
    fn version(&self) -> &'static str;
}

/// An initialized model, ready for queries.
///
/// Holds the configuration, derived geometry and open property stores.
/// There is no process-wide state; every query goes through a context.
#[derive(Debug)]
pub struct ModelContext {
    config: ModelConfiguration,
    engine: QueryEngine,
}

impl ModelContext {
    /// Initialize the model installed at `<root>/model/<label>`, with the
    /// storage policy taken from the environment.
    pub fn init(root: impl AsRef<Path>, label: &str) -> ModelResult<Self> {
        Self::init_with(root, label, &EngineConfig::from_env())
    }

    /// Initialize an installed model with an explicit storage policy.
    pub fn init_with(root: impl AsRef<Path>, label: &str, engine_config: &EngineConfig) -> ModelResult<Self> {
        let root = root.as_ref();
        let config = ModelConfiguration::load(root, label)?;
        let data_dir = config.data_dir(root, label);
        Self::from_parts(config, &data_dir, engine_config)
    }

    /// Build a context from an already parsed configuration and the
    /// directory holding its property files.
    pub fn from_parts(
        config: ModelConfiguration,
        data_dir: &Path,
        engine_config: &EngineConfig,
    ) -> ModelResult<Self> {
        config.validate()?;
        engine_config
            .validate()
            .map_err(|msg| ModelError::config_invalid("engine", msg))?;

        let storage = ModelStorage::open(data_dir, config.dims(), engine_config)?;

        let frame = LocalFrame::from_config(&config)
            .map_err(|e| ModelError::projection_setup_failed(e.to_string()))?;

        let locator =
            GridLocator::from_config(&config, frame.total_width_m(), frame.total_height_m());

        info!(
            nx = config.nx,
            ny = config.ny,
            nz = config.nz,
            utm_zone = config.utm_zone,
            axis_order = %config.axis_order,
            seek_direction = %config.seek_direction,
            width_m = frame.total_width_m(),
            height_m = frame.total_height_m(),
            rotation = frame.geometry().rotation_angle,
            readiness = ?storage.readiness(),
            "Model initialized"
        );

        Ok(Self {
            config,
            engine: QueryEngine::new(frame, locator, storage),
        })
    }

    pub fn config(&self) -> &ModelConfiguration {
        &self.config
    }

    pub fn geometry(&self) -> &GeometryDerived {
        self.engine.frame().geometry()
    }

    pub fn engine(&self) -> &QueryEngine {
        &self.engine
    }

    /// Whether every property is served from memory.
    pub fn readiness(&self) -> StorageReadiness {
        self.engine.storage().readiness()
    }

    /// Query a single point.
    pub fn query_point(&self, point: &QueryPoint) -> PropertySample {
        self.engine.query_point(point)
    }
}

impl VelocityModel for ModelContext {
    fn init(root: &Path, label: &str) -> ModelResult<Self> {
        ModelContext::init(root, label)
    }

    fn query(&self, points: &[QueryPoint]) -> Vec<PropertySample> {
        self.engine.query(points)
    }

    fn finalize(self) -> ModelResult<()> {
        info!(data_dir = %self.engine.storage().data_dir().display(), "Model finalized");
        drop(self);
        Ok(())
    }

    fn version(&self) -> &'static str {
        MODEL_VERSION
    }
}
