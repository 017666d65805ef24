//! See [`ViewerConfig`].

use serde::{Deserialize, Serialize};

use crate::color::Color;

const DEFAULT_SOURCE_ID: &str = "sourdough";
const DEFAULT_QUERY_TOLERANCE: f64 = 5.0;
const DEFAULT_GLYPHS: &str = "https://tiles.openstreetmap.us/fonts/{fontstack}/{range}.pbf";
const DEFAULT_BACKGROUND: Color = Color::from_hex("#000b16");

/// Configuration of a [`Viewer`](crate::viewer::Viewer).
///
/// All fields have defaults, so a partial JSON document can be deserialized into a complete
/// configuration:
///
/// ```
/// use tileview::ViewerConfig;
///
/// let config: ViewerConfig = serde_json::from_str(r#"{"query_tolerance": 8.0}"#).unwrap();
/// assert_eq!(config.query_tolerance(), 8.0);
/// assert_eq!(config.source_id(), "sourdough");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    source_id: String,
    query_tolerance: f64,
    glyphs: String,
    background_color: Color,
    /// Styling of feature name labels.
    pub labels: LabelConfig,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            source_id: DEFAULT_SOURCE_ID.to_string(),
            query_tolerance: DEFAULT_QUERY_TOLERANCE,
            glyphs: DEFAULT_GLYPHS.to_string(),
            background_color: DEFAULT_BACKGROUND,
            labels: LabelConfig::default(),
        }
    }
}

impl ViewerConfig {
    /// Id of the vector source in the map style. Also used as the prefix of all style layer ids.
    pub fn source_id(&self) -> &str {
        &self.source_id
    }

    /// Sets id of the vector source in the map style.
    pub fn with_source_id(mut self, source_id: impl Into<String>) -> Self {
        self.source_id = source_id.into();
        self
    }

    /// Sets id of the vector source in the map style.
    pub fn set_source_id(&mut self, source_id: impl Into<String>) {
        self.source_id = source_id.into();
    }

    /// Half-size in pixels of the square around the pointer in which features are looked up.
    pub fn query_tolerance(&self) -> f64 {
        self.query_tolerance
    }

    /// Sets half-size in pixels of the square around the pointer in which features are looked up.
    pub fn with_query_tolerance(mut self, tolerance: f64) -> Self {
        self.query_tolerance = tolerance;
        self
    }

    /// Sets half-size in pixels of the square around the pointer in which features are looked up.
    pub fn set_query_tolerance(&mut self, tolerance: f64) {
        self.query_tolerance = tolerance;
    }

    /// URL template of the label glyphs.
    pub fn glyphs(&self) -> &str {
        &self.glyphs
    }

    /// Sets URL template of the label glyphs.
    pub fn with_glyphs(mut self, glyphs: impl Into<String>) -> Self {
        self.glyphs = glyphs.into();
        self
    }

    /// Map background color.
    pub fn background_color(&self) -> Color {
        self.background_color
    }

    /// Sets map background color.
    pub fn with_background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }
}

/// Label styling.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LabelConfig {
    /// Font stack.
    pub font: Vec<String>,
    /// Color of the halo around label text.
    pub halo_color: Color,
    /// Width of the halo in pixels.
    pub halo_width: f64,
    /// Blur of the halo in pixels.
    pub halo_blur: f64,
    /// Text size of point labels.
    pub point_size: f64,
    /// Text size of line labels.
    pub line_size: f64,
    /// Text size of polygon labels.
    pub polygon_size: f64,
}

impl Default for LabelConfig {
    fn default() -> Self {
        Self {
            font: vec!["Noto Sans Regular".to_string()],
            halo_color: DEFAULT_BACKGROUND,
            halo_width: 1.0,
            halo_blur: 0.0,
            point_size: 9.0,
            line_size: 8.0,
            polygon_size: 10.0,
        }
    }
}
