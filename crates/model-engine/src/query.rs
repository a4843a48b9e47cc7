//! Per-point query pipeline.
//!
//! ```text
//! QueryPoint
//!      │
//!      ├─► depth < 0 ──────────────► no data
//!      │
//!      ├─► LocalFrame::geographic_to_local
//!      │
//!      ├─► GridLocator::locate ─────► rejected: no data
//!      │
//!      ├─► ModelStorage::read_cell (8 corners)
//!      │
//!      ├─► trilinear_interpolation
//!      │
//!      └─► derive_attenuation
//! ```

use crate::interpolation::trilinear_interpolation;
use crate::locator::GridLocator;
use crate::storage::ModelStorage;
use model_common::{PropertySample, QueryPoint};
use projection::LocalFrame;

/// Vs below which the low attenuation factor applies (m/s).
pub const QS_VS_THRESHOLD: f64 = 1500.0;

/// Set Qs from Vs and Qp from Qs, replacing any interpolated values.
pub fn derive_attenuation(sample: &mut PropertySample) {
    sample.qs = if sample.vs < QS_VS_THRESHOLD {
        sample.vs * 0.02
    } else {
        sample.vs * 0.10
    };
    sample.qp = sample.qs * 1.5;
}

/// Answers point queries against one model.
#[derive(Debug)]
pub struct QueryEngine {
    frame: LocalFrame,
    locator: GridLocator,
    storage: ModelStorage,
}

impl QueryEngine {
    pub fn new(frame: LocalFrame, locator: GridLocator, storage: ModelStorage) -> Self {
        Self {
            frame,
            locator,
            storage,
        }
    }

    pub fn frame(&self) -> &LocalFrame {
        &self.frame
    }

    pub fn locator(&self) -> &GridLocator {
        &self.locator
    }

    pub fn storage(&self) -> &ModelStorage {
        &self.storage
    }

    /// Query a batch of points. The output has one sample per point, in
    /// order; points without data get [`PropertySample::NO_DATA`].
    pub fn query(&self, points: &[QueryPoint]) -> Vec<PropertySample> {
        points.iter().map(|point| self.query_point(point)).collect()
    }

    /// Query a single geographic point.
    pub fn query_point(&self, point: &QueryPoint) -> PropertySample {
        // Must be below the surface
        if point.depth < 0.0 {
            return PropertySample::NO_DATA;
        }

        let (e, n) = self.frame.geographic_to_local(point.longitude, point.latitude);
        self.sample_local(e, n, point.depth)
    }

    /// Sample the model at local frame coordinates `(e, n)` and `depth`.
    pub fn sample_local(&self, e: f64, n: f64, depth: f64) -> PropertySample {
        if depth < 0.0 {
            return PropertySample::NO_DATA;
        }

        let Ok(cell) = self.locator.locate(e, n, depth) else {
            return PropertySample::NO_DATA;
        };

        let corners = self.storage.read_cell(&cell);
        let mut sample =
            trilinear_interpolation(cell.x_percent, cell.y_percent, cell.z_percent, &corners);
        derive_attenuation(&mut sample);
        sample
    }
}
