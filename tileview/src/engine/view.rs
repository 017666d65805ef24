use std::f64::consts::PI;

use geo_types::{Coord, Point, Rect};
use nalgebra::{Point2, Vector2};

use super::PixelBox;

/// Size of a tile in pixels at integer zoom levels.
const TILE_SIZE: f64 = 512.0;
/// Latitude limit of the web mercator projection.
const MAX_LATITUDE: f64 = 85.051_128_779_806_59;

/// Position of a web mercator map on the screen: center, zoom level and viewport size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView {
    center: Point<f64>,
    zoom: f64,
    size: Vector2<f64>,
}

impl Default for MapView {
    fn default() -> Self {
        Self {
            center: Point::new(0.0, 0.0),
            zoom: 0.0,
            size: Vector2::zeros(),
        }
    }
}

impl MapView {
    /// Creates a new view centered at the given longitude/latitude point.
    pub fn new(center: Point<f64>, zoom: f64) -> Self {
        Self {
            center,
            zoom,
            ..Default::default()
        }
    }

    /// Center of the view.
    pub fn center(&self) -> Point<f64> {
        self.center
    }

    /// Zoom level.
    pub fn zoom(&self) -> f64 {
        self.zoom
    }

    /// Viewport size in pixels.
    pub fn size(&self) -> Vector2<f64> {
        self.size
    }

    /// Returns a copy of the view with a different center.
    pub fn with_center(&self, center: Point<f64>) -> Self {
        Self { center, ..*self }
    }

    /// Returns a copy of the view with a different zoom level.
    pub fn with_zoom(&self, zoom: f64) -> Self {
        Self { zoom, ..*self }
    }

    /// Returns a copy of the view with a different viewport size.
    pub fn with_size(&self, width: f64, height: f64) -> Self {
        Self {
            size: Vector2::new(width, height),
            ..*self
        }
    }

    fn world_size(&self) -> f64 {
        TILE_SIZE * 2f64.powf(self.zoom)
    }

    fn project(&self, lonlat: &Point<f64>) -> Point2<f64> {
        let world_size = self.world_size();
        let lat = lonlat.y().clamp(-MAX_LATITUDE, MAX_LATITUDE).to_radians();

        let x = (lonlat.x() + 180.0) / 360.0 * world_size;
        let y = (1.0 - (PI / 4.0 + lat / 2.0).tan().ln() / PI) / 2.0 * world_size;

        Point2::new(x, y)
    }

    fn unproject(&self, world: Point2<f64>) -> Point<f64> {
        let world_size = self.world_size();
        let lon = world.x / world_size * 360.0 - 180.0;
        let lat = (PI * (1.0 - 2.0 * world.y / world_size))
            .sinh()
            .atan()
            .to_degrees();

        Point::new(lon, lat)
    }

    /// Screen pixel of a longitude/latitude point.
    pub fn lonlat_to_screen(&self, lonlat: &Point<f64>) -> Point2<f64> {
        let offset = self.project(lonlat) - self.project(&self.center);
        Point2::new(self.size.x / 2.0, self.size.y / 2.0) + offset
    }

    /// Longitude/latitude point shown at the screen pixel.
    ///
    /// Returns `None` if the view has no size.
    pub fn screen_to_lonlat(&self, px_position: Point2<f64>) -> Option<Point<f64>> {
        if self.size.x <= 0.0 || self.size.y <= 0.0 || !self.size.x.is_finite() {
            return None;
        }

        let offset = px_position - Point2::new(self.size.x / 2.0, self.size.y / 2.0);
        Some(self.unproject(self.project(&self.center) + offset))
    }

    /// Geographic rectangle covered by the screen area.
    pub fn screen_box_to_rect(&self, area: &PixelBox) -> Option<Rect<f64>> {
        let min = self.screen_to_lonlat(area.min)?;
        let max = self.screen_to_lonlat(area.max)?;

        Some(Rect::new(
            Coord {
                x: min.x(),
                y: min.y(),
            },
            Coord {
                x: max.x(),
                y: max.y(),
            },
        ))
    }
}
