//! Map style generated from a [`LayerCatalog`].
//!
//! Every vector layer of the catalog is drawn by six style layers: polygon fills, lines, point
//! circles and one label layer per geometry family. All of them use the catalog color of the
//! vector layer. Highlighted features (see [`FeatureState`](crate::engine::FeatureState)) are
//! drawn with a stronger fill, a wider line or a circle outline.

use serde::ser::Serializer;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tileview_types::GeometryFamily;

use crate::catalog::LayerCatalog;
use crate::color::Color;
use crate::config::ViewerConfig;
use crate::engine::RenderingEngine;
use crate::feature::RenderedFeature;

/// Type of a style layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LayerKind {
    /// Solid map background.
    Background,
    /// Polygon fill.
    Fill,
    /// Line stroke.
    Line,
    /// Point circle.
    Circle,
    /// Text label.
    Symbol,
}

impl LayerKind {
    /// Drawing order of style layers: fills are drawn first and labels last.
    pub fn draw_order(&self) -> u8 {
        match self {
            Self::Background => 0,
            Self::Fill => 1,
            Self::Line => 2,
            Self::Circle => 3,
            Self::Symbol => 4,
        }
    }
}

/// Role of a style layer generated for a vector layer.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum LayerRole {
    /// Polygon fills.
    Polygons,
    /// Line strokes.
    Lines,
    /// Point circles.
    Points,
    /// Names of points.
    PointLabels,
    /// Names of lines.
    LineLabels,
    /// Names of polygons, placed along the polygon outline.
    PolygonLabels,
}

impl LayerRole {
    /// All roles in the order layers are created.
    pub const ALL: [LayerRole; 6] = [
        LayerRole::Polygons,
        LayerRole::Lines,
        LayerRole::Points,
        LayerRole::PointLabels,
        LayerRole::LineLabels,
        LayerRole::PolygonLabels,
    ];

    /// Roles whose layers are used to find features under the pointer.
    pub const QUERYABLE: [LayerRole; 3] =
        [LayerRole::Polygons, LayerRole::Lines, LayerRole::Points];

    /// Suffix of the style layer id.
    pub fn suffix(&self) -> &'static str {
        match self {
            Self::Polygons => "polygons",
            Self::Lines => "lines",
            Self::Points => "points",
            Self::PointLabels => "point_labels",
            Self::LineLabels => "line_labels",
            Self::PolygonLabels => "polygon_labels",
        }
    }

    /// Style layer type.
    pub fn kind(&self) -> LayerKind {
        match self {
            Self::Polygons => LayerKind::Fill,
            Self::Lines => LayerKind::Line,
            Self::Points => LayerKind::Circle,
            _ => LayerKind::Symbol,
        }
    }

    /// Filter selecting the features drawn by the layer.
    pub fn filter(&self) -> LayerFilter {
        let family = match self {
            Self::Polygons | Self::PolygonLabels => GeometryFamily::Polygon,
            Self::Lines | Self::LineLabels => GeometryFamily::Line,
            Self::Points | Self::PointLabels => GeometryFamily::Point,
        };
        let required_property = match self.kind() {
            LayerKind::Symbol => Some("name".to_string()),
            _ => None,
        };

        LayerFilter {
            family,
            required_property,
        }
    }
}

/// Id of the style layer drawing `vector_layer` of `source` in the given role.
pub fn layer_id(source: &str, vector_layer: &str, role: LayerRole) -> String {
    format!("{source}_{vector_layer}_{}", role.suffix())
}

/// Ids of all style layers generated for a vector layer.
pub fn layer_ids_for(source: &str, vector_layer: &str) -> Vec<String> {
    LayerRole::ALL
        .iter()
        .map(|role| layer_id(source, vector_layer, *role))
        .collect()
}

/// Feature filter of a style layer.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LayerFilter {
    /// Geometry family of the drawn features.
    pub family: GeometryFamily,
    /// If set, only features having this property are drawn.
    pub required_property: Option<String>,
}

impl LayerFilter {
    /// Returns true if the layer draws the feature.
    pub fn matches(&self, feature: &RenderedFeature) -> bool {
        feature.family() == Some(self.family)
            && self
                .required_property
                .as_ref()
                .map_or(true, |key| feature.properties.contains_key(key))
    }

    /// Filter as a style expression.
    pub fn to_expression(&self) -> Value {
        let geometry_type = match self.family {
            GeometryFamily::Point => "Point",
            GeometryFamily::Line => "LineString",
            GeometryFamily::Polygon => "Polygon",
        };
        let type_check = json!(["==", ["geometry-type"], geometry_type]);

        match &self.required_property {
            Some(key) => json!(["all", type_check, ["has", key]]),
            None => type_check,
        }
    }
}

impl Serialize for LayerFilter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.to_expression().serialize(serializer)
    }
}

/// A layer of the map style.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleLayer {
    /// Unique layer id.
    pub id: String,
    /// Layer type.
    #[serde(rename = "type")]
    pub kind: LayerKind,
    /// Source id.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    /// Vector layer inside the source.
    #[serde(rename = "source-layer", skip_serializing_if = "Option::is_none")]
    pub source_layer: Option<String>,
    /// Feature filter.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<LayerFilter>,
    /// Layout properties.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub layout: Map<String, Value>,
    /// Paint properties.
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub paint: Map<String, Value>,
}

impl StyleLayer {
    /// Solid background layer.
    pub fn background(color: Color) -> Self {
        Self {
            id: "background".to_string(),
            kind: LayerKind::Background,
            source: None,
            source_layer: None,
            filter: None,
            layout: Map::new(),
            paint: object(json!({ "background-color": color })),
        }
    }

    /// Returns true if the layer draws the feature.
    pub fn draws(&self, feature: &RenderedFeature) -> bool {
        self.source.as_deref() == Some(feature.source.as_str())
            && self.source_layer.as_deref() == Some(feature.source_layer.as_str())
            && self
                .filter
                .as_ref()
                .is_some_and(|filter| filter.matches(feature))
    }
}

/// Expression choosing between two values depending on the feature highlight state.
fn when_highlighted(highlighted: Value, normal: Value) -> Value {
    json!([
        "case",
        ["boolean", ["feature-state", "hover"], false],
        highlighted,
        normal
    ])
}

fn object(value: Value) -> Map<String, Value> {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

fn build_layer(
    source: &str,
    vector_layer: &str,
    color: Color,
    role: LayerRole,
    config: &ViewerConfig,
) -> StyleLayer {
    let labels = &config.labels;
    let text_paint = || {
        object(json!({
            "text-color": color,
            "text-halo-color": labels.halo_color,
            "text-halo-width": labels.halo_width,
            "text-halo-blur": labels.halo_blur,
        }))
    };

    let (layout, paint) = match role {
        LayerRole::Polygons => (
            Map::new(),
            object(json!({
                "fill-color": color,
                "fill-opacity": when_highlighted(json!(0.4), json!(0.15)),
            })),
        ),
        LayerRole::Lines => (
            Map::new(),
            object(json!({
                "line-color": color,
                "line-width": when_highlighted(json!(2), json!(0.5)),
            })),
        ),
        LayerRole::Points => (
            Map::new(),
            object(json!({
                "circle-color": color,
                "circle-radius": ["interpolate", ["linear"], ["zoom"], 4, 1.5, 12, 2.5],
                "circle-opacity": 0.8,
                "circle-stroke-color": "white",
                "circle-stroke-width": when_highlighted(json!(3), json!(0)),
            })),
        ),
        LayerRole::PointLabels => (
            object(json!({
                "text-field": ["get", "name"],
                "text-font": labels.font,
                "text-size": labels.point_size,
                "text-offset": [0, -0.5],
                "text-anchor": "bottom",
            })),
            text_paint(),
        ),
        LayerRole::LineLabels => (
            object(json!({
                "text-field": ["get", "name"],
                "text-font": labels.font,
                "text-size": labels.line_size,
                "symbol-placement": "line",
                "text-rotation-alignment": "map",
            })),
            text_paint(),
        ),
        LayerRole::PolygonLabels => (
            object(json!({
                "text-field": ["get", "name"],
                "text-font": labels.font,
                "text-size": labels.polygon_size,
                "text-max-angle": 85,
                "text-offset": [0, 1],
                "text-rotation-alignment": "map",
                "text-keep-upright": true,
                "symbol-placement": "line",
                "symbol-spacing": 250,
            })),
            text_paint(),
        ),
    };

    StyleLayer {
        id: layer_id(source, vector_layer, role),
        kind: role.kind(),
        source: Some(source.to_string()),
        source_layer: Some(vector_layer.to_string()),
        filter: Some(role.filter()),
        layout,
        paint,
    }
}

/// Builds the style layers for all vector layers of the catalog.
///
/// Layers are ordered by type (fills, lines, circles, labels) and by catalog position inside
/// each type, so that labels of any layer are never covered by geometries of another one.
pub fn build_style_layers(catalog: &LayerCatalog, config: &ViewerConfig) -> Vec<StyleLayer> {
    let source = config.source_id();
    let mut layers: Vec<StyleLayer> = catalog
        .iter()
        .flat_map(|(_, name, color)| {
            LayerRole::ALL
                .iter()
                .map(move |role| build_layer(source, name, color, *role, config))
        })
        .collect();

    layers.sort_by_key(|layer| layer.kind.draw_order());
    layers
}

/// Ids of the style layers that exist in the engine and should be queried for features under
/// the pointer, in catalog order.
pub fn query_layer_ids(
    catalog: &LayerCatalog,
    config: &ViewerConfig,
    engine: &dyn RenderingEngine,
) -> Vec<String> {
    catalog
        .names()
        .flat_map(|name| {
            LayerRole::QUERYABLE
                .iter()
                .map(move |role| layer_id(config.source_id(), name, *role))
        })
        .filter(|id| engine.has_layer(id))
        .collect()
}

/// Complete map style document.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StyleDocument {
    /// Style specification version.
    pub version: u8,
    /// URL template of label glyphs.
    pub glyphs: String,
    /// Map sources by id.
    pub sources: Map<String, Value>,
    /// Layers in drawing order.
    pub layers: Vec<StyleLayer>,
}

impl StyleDocument {
    /// Creates a style with a single vector source described by the TileJSON at `tilejson_url`.
    pub fn new(catalog: &LayerCatalog, config: &ViewerConfig, tilejson_url: &str) -> Self {
        let mut sources = Map::new();
        sources.insert(
            config.source_id().to_string(),
            json!({ "type": "vector", "url": tilejson_url }),
        );

        let mut layers = vec![StyleLayer::background(config.background_color())];
        layers.extend(build_style_layers(catalog, config));

        Self {
            version: 8,
            glyphs: config.glyphs().to_string(),
            sources,
            layers,
        }
    }

    /// Style as a JSON value.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}

#[cfg(test)]
mod tests {
    use tileview_types::lonlat;

    use super::*;
    use crate::color::PALETTE;

    fn catalog() -> LayerCatalog {
        LayerCatalog::new(["water", "roads"])
    }

    #[test]
    fn six_layers_per_vector_layer_ordered_by_kind() {
        let layers = build_style_layers(&catalog(), &ViewerConfig::default());
        assert_eq!(layers.len(), 12);

        let ids: Vec<_> = layers.iter().map(|l| l.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "sourdough_water_polygons",
                "sourdough_roads_polygons",
                "sourdough_water_lines",
                "sourdough_roads_lines",
                "sourdough_water_points",
                "sourdough_roads_points",
                "sourdough_water_point_labels",
                "sourdough_water_line_labels",
                "sourdough_water_polygon_labels",
                "sourdough_roads_point_labels",
                "sourdough_roads_line_labels",
                "sourdough_roads_polygon_labels",
            ]
        );
    }

    #[test]
    fn layers_use_catalog_colors() {
        let layers = build_style_layers(&catalog(), &ViewerConfig::default());
        let roads_lines = layers
            .iter()
            .find(|l| l.id == "sourdough_roads_lines")
            .unwrap();
        assert_eq!(roads_lines.paint["line-color"], json!(PALETTE[1]));
        assert_eq!(
            roads_lines.paint["line-width"],
            json!(["case", ["boolean", ["feature-state", "hover"], false], 2, 0.5])
        );
    }

    #[test]
    fn filter_expressions() {
        assert_eq!(
            LayerRole::Polygons.filter().to_expression(),
            json!(["==", ["geometry-type"], "Polygon"])
        );
        assert_eq!(
            LayerRole::PointLabels.filter().to_expression(),
            json!(["all", ["==", ["geometry-type"], "Point"], ["has", "name"]])
        );
    }

    #[test]
    fn label_layers_require_name() {
        let filter = LayerRole::PointLabels.filter();
        let feature = RenderedFeature::new(lonlat!(0.0, 0.0), "sourdough", "pois");
        assert!(!filter.matches(&feature));
        assert!(filter.matches(&feature.with_property("name", "Cafe")));
    }

    #[test]
    fn style_document_json() {
        let style = StyleDocument::new(
            &catalog(),
            &ViewerConfig::default(),
            "https://example.com/tiles.json",
        );
        let json = style.to_json();

        assert_eq!(json["version"], json!(8));
        assert_eq!(
            json["sources"]["sourdough"],
            json!({"type": "vector", "url": "https://example.com/tiles.json"})
        );
        assert_eq!(json["layers"][0]["id"], json!("background"));
        assert_eq!(
            json["layers"][0]["paint"]["background-color"],
            json!("#000b16")
        );
        assert_eq!(json["layers"][1]["source-layer"], json!("water"));
        assert_eq!(json["layers"][1]["type"], json!("fill"));
        assert!(json["layers"][0].get("source").is_none());
    }
}
