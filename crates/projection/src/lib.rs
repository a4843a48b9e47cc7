//! Coordinate reference system transformations.
//!
//! Map projections are implemented directly, without binding to PROJ.
//! [`TransverseMercator`] projects WGS84 geographic coordinates into a UTM
//! zone; [`LocalFrame`] then places them in a model's rotated local frame.

pub mod frame;
pub mod utm;

pub use frame::{GeometryDerived, LocalFrame};
pub use utm::{Ellipsoid, TransverseMercator};

use thiserror::Error;

/// Errors raised while constructing a projection.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectionError {
    /// UTM zones are numbered 1 to 60.
    #[error("UTM zone {0} is outside 1..=60")]
    InvalidZone(u32),

    /// The model footprint cannot define a rotated frame.
    #[error("degenerate footprint: {0}")]
    DegenerateFootprint(String),
}
