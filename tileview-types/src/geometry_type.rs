//! See documentation for [`GeometryFamily`].
use geo_types::{CoordNum, Geometry};
use serde::{Deserialize, Serialize};

/// Coarse classification of geometries by the size of their on-screen target.
///
/// The variants are declared in priority order: when features of several families are found under
/// the pointer, the family that comes first wins. Points and lines are hard to hit with a mouse,
/// while polygons usually cover large areas and would otherwise always take over the selection.
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Eq, Ord, Hash, Deserialize, Serialize)]
pub enum GeometryFamily {
    /// `Point` and `MultiPoint` geometries.
    Point,
    /// `LineString` and `MultiLineString` geometries.
    Line,
    /// `Polygon` and `MultiPolygon` geometries.
    Polygon,
}

impl GeometryFamily {
    /// All families, from the highest selection priority to the lowest.
    pub const PRIORITY: [GeometryFamily; 3] = [
        GeometryFamily::Point,
        GeometryFamily::Line,
        GeometryFamily::Polygon,
    ];

    /// Returns the family of the geometry, or `None` if the geometry is not one of the six
    /// GeoJSON geometry types (for example `Rect` or `GeometryCollection`).
    pub fn of<T: CoordNum>(geometry: &Geometry<T>) -> Option<Self> {
        match geometry {
            Geometry::Point(_) | Geometry::MultiPoint(_) => Some(Self::Point),
            Geometry::LineString(_) | Geometry::MultiLineString(_) => Some(Self::Line),
            Geometry::Polygon(_) | Geometry::MultiPolygon(_) => Some(Self::Polygon),
            _ => None,
        }
    }
}

/// GeoJSON name of the geometry type, as shown to the user.
///
/// Geometries that have no GeoJSON counterpart are reported as `"Unknown"`.
pub fn geometry_type_name<T: CoordNum>(geometry: &Geometry<T>) -> &'static str {
    match geometry {
        Geometry::Point(_) => "Point",
        Geometry::MultiPoint(_) => "MultiPoint",
        Geometry::LineString(_) => "LineString",
        Geometry::MultiLineString(_) => "MultiLineString",
        Geometry::Polygon(_) => "Polygon",
        Geometry::MultiPolygon(_) => "MultiPolygon",
        _ => "Unknown",
    }
}
