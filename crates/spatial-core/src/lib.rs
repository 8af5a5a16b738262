//! Spatial Core Library
//!
//! Geometry model, WKT codec, validation and the feature service layer.

pub mod envelope;
pub mod error;
pub mod feature;
pub mod geometry;
pub mod validation;

pub use envelope::Envelope;
pub use error::{SpatialError, SpatialResult};
pub use geometry::{Coord, Geometry, GeometryKind, ParseError};
