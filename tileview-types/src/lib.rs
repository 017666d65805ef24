//! Geometry helpers used by `tileview` to rank map features under a cursor.
//!
//! All geometries are [`geo_types`] geometries in WGS84 longitude/latitude (`x` is longitude,
//! `y` is latitude). The crate provides:
//!
//! * [`GeometryFamily`] - classification of geometries into points, lines and polygons, used to
//!   decide which features win when several overlap under the pointer;
//! * [`distance`](distance::distance) - geodesic distance from a cursor to a geometry, used to
//!   order features of the same family.

pub mod distance;
pub mod geometry_type;
mod point;

pub use distance::{distance, CursorDistance};
pub use geometry_type::{geometry_type_name, GeometryFamily};

// Reexport geo_types
pub use geo_types;
