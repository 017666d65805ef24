//! Geodesic distance between a cursor position and a geometry.
//!
//! Distances are great-circle (haversine) distances in meters on a sphere with the mean earth
//! radius. The values are only ever compared with each other to order features, so the choice of
//! the earth model does not matter as long as it is the same for all geometries.

use geo::{Closest, HaversineClosestPoint, HaversineDistance, Intersects};
use geo_types::{
    Geometry, LineString, MultiLineString, MultiPoint, MultiPolygon, Point, Polygon,
};

/// Distance from a cursor (longitude/latitude point) to a geometry.
///
/// The returned value is never negative. Geometries that cannot be measured (empty ones, or types
/// that are not supported) return `f64::INFINITY`, so that they are ordered after everything else
/// instead of failing the whole selection.
pub trait CursorDistance {
    /// Returns distance in meters from `cursor` to the closest point of `self`.
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64;
}

/// Distance from `cursor` to `geometry`. See [`CursorDistance`].
///
/// ```
/// use tileview_types::{distance, lonlat};
///
/// let geometry = lonlat!(10.0, 20.0).into();
/// assert_eq!(distance(&geometry, &lonlat!(10.0, 20.0)), 0.0);
/// ```
pub fn distance(geometry: &Geometry<f64>, cursor: &Point<f64>) -> f64 {
    geometry.cursor_distance(cursor)
}

impl CursorDistance for Geometry<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        match self {
            Geometry::Point(v) => v.cursor_distance(cursor),
            Geometry::MultiPoint(v) => v.cursor_distance(cursor),
            Geometry::LineString(v) => v.cursor_distance(cursor),
            Geometry::MultiLineString(v) => v.cursor_distance(cursor),
            Geometry::Polygon(v) => v.cursor_distance(cursor),
            Geometry::MultiPolygon(v) => v.cursor_distance(cursor),
            _ => f64::INFINITY,
        }
    }
}

impl CursorDistance for Point<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        cursor.haversine_distance(self)
    }
}

impl CursorDistance for MultiPoint<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        min_distance(self.iter().map(|point| point.cursor_distance(cursor)))
    }
}

impl CursorDistance for LineString<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        match self.0.as_slice() {
            [] => return f64::INFINITY,
            [single] => return Point::from(*single).cursor_distance(cursor),
            _ => {}
        }

        // Segments are measured one by one: a cursor lying on a segment yields an intersection,
        // which the line string implementation does not handle.
        min_distance(self.lines().map(|segment| {
            match segment.haversine_closest_point(cursor) {
                Closest::Intersection(_) => 0.0,
                Closest::SinglePoint(closest) => cursor.haversine_distance(&closest),
                Closest::Indeterminate => f64::INFINITY,
            }
        }))
    }
}

impl CursorDistance for MultiLineString<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        min_distance(self.iter().map(|line| line.cursor_distance(cursor)))
    }
}

impl CursorDistance for Polygon<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        if self.exterior().0.is_empty() {
            return f64::INFINITY;
        }

        // Boundary counts as inside.
        if self.intersects(cursor) {
            return 0.0;
        }

        // Outside of the polygon or inside one of its holes.
        min_distance(
            std::iter::once(self.exterior())
                .chain(self.interiors())
                .map(|ring| ring.cursor_distance(cursor)),
        )
    }
}

impl CursorDistance for MultiPolygon<f64> {
    fn cursor_distance(&self, cursor: &Point<f64>) -> f64 {
        min_distance(self.iter().map(|polygon| polygon.cursor_distance(cursor)))
    }
}

fn min_distance(distances: impl Iterator<Item = f64>) -> f64 {
    distances.fold(f64::INFINITY, f64::min)
}
