//! Features returned by the rendering engine and the keys used to attach state to them.

use std::fmt::{Display, Formatter};

use geo_types::Geometry;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tileview_types::{geometry_type_name, GeometryFamily};

/// Numeric feature identifier as stored in vector tiles.
pub type FeatureId = u64;

/// A feature as rendered by the map engine.
///
/// Geometry is in WGS84 longitude/latitude. A feature without an `id` can still be selected and
/// shown in the info panel, but the engine cannot store a highlight state for it.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedFeature {
    /// Feature geometry.
    pub geometry: Geometry<f64>,
    /// Id of the map source the feature comes from.
    pub source: String,
    /// Name of the vector layer inside the source.
    pub source_layer: String,
    /// Feature id, if the tile provides one.
    pub id: Option<FeatureId>,
    /// Feature attributes.
    pub properties: Map<String, Value>,
}

impl RenderedFeature {
    /// Creates a new feature without id and properties.
    pub fn new(
        geometry: impl Into<Geometry<f64>>,
        source: impl Into<String>,
        source_layer: impl Into<String>,
    ) -> Self {
        Self {
            geometry: geometry.into(),
            source: source.into(),
            source_layer: source_layer.into(),
            id: None,
            properties: Map::new(),
        }
    }

    /// Sets the feature id.
    pub fn with_id(mut self, id: FeatureId) -> Self {
        self.id = Some(id);
        self
    }

    /// Adds a property to the feature.
    pub fn with_property(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.properties.insert(key.into(), value.into());
        self
    }

    /// Key to address the feature state in the engine, or `None` if the feature has no id.
    pub fn key(&self) -> Option<FeatureKey> {
        self.id.map(|id| FeatureKey {
            source: self.source.clone(),
            source_layer: self.source_layer.clone(),
            id,
        })
    }

    /// Geometry family of the feature. `None` for geometries that are not one of the GeoJSON
    /// types.
    pub fn family(&self) -> Option<GeometryFamily> {
        GeometryFamily::of(&self.geometry)
    }

    /// GeoJSON name of the geometry type.
    pub fn geometry_type(&self) -> &'static str {
        geometry_type_name(&self.geometry)
    }

    /// OpenStreetMap element the feature id refers to.
    pub fn external_ref(&self) -> ExternalRef {
        ExternalRef::decode(self.id)
    }
}

/// Address of a feature in the engine feature state store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FeatureKey {
    /// Source id.
    pub source: String,
    /// Vector layer name inside the source.
    pub source_layer: String,
    /// Feature id.
    pub id: FeatureId,
}

/// Type of an OpenStreetMap element.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsmElementType {
    /// Node (type code 1).
    Node,
    /// Way (type code 2).
    Way,
    /// Relation (type code 3).
    Relation,
}

impl OsmElementType {
    /// Element type for the type code stored in the last decimal digit of a feature id.
    pub fn from_code(code: u64) -> Option<Self> {
        match code {
            1 => Some(Self::Node),
            2 => Some(Self::Way),
            3 => Some(Self::Relation),
            _ => None,
        }
    }

    /// Lowercase name as used in OpenStreetMap URLs.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Way => "way",
            Self::Relation => "relation",
        }
    }
}

/// Reference to the source element a feature was generated from.
///
/// Tile generators encode OpenStreetMap elements into feature ids as `element_id * 10 + type_code`.
/// The decoded value is a display aid only: nothing guarantees that the tiles were produced with
/// this encoding.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ExternalRef {
    /// Decoded OpenStreetMap element.
    Osm {
        /// Element type.
        element_type: OsmElementType,
        /// Element id.
        id: u64,
    },
    /// The feature has an id, but its type code is not known.
    Unknown(FeatureId),
    /// The feature has no id.
    Missing,
}

impl ExternalRef {
    /// Decodes a feature id.
    pub fn decode(id: Option<FeatureId>) -> Self {
        let Some(raw) = id else {
            return Self::Missing;
        };

        match OsmElementType::from_code(raw % 10) {
            Some(element_type) => Self::Osm {
                element_type,
                id: raw / 10,
            },
            None => Self::Unknown(raw),
        }
    }

    /// Link to the element on openstreetmap.org.
    pub fn url(&self) -> Option<String> {
        match self {
            Self::Osm { element_type, id } => Some(format!(
                "https://www.openstreetmap.org/{}/{id}",
                element_type.as_str()
            )),
            _ => None,
        }
    }
}

impl Display for ExternalRef {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Osm { element_type, id } => write!(f, "{}/{id}", element_type.as_str()),
            Self::Unknown(raw) => write!(f, "{raw} (unknown type)"),
            Self::Missing => write!(f, "No ID"),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use tileview_types::lonlat;

    use super::*;

    #[test]
    fn decodes_osm_references() {
        assert_eq!(
            ExternalRef::decode(Some(21)),
            ExternalRef::Osm {
                element_type: OsmElementType::Node,
                id: 2
            }
        );
        assert_eq!(ExternalRef::decode(Some(21)).to_string(), "node/2");

        assert_eq!(
            ExternalRef::decode(Some(33)),
            ExternalRef::Osm {
                element_type: OsmElementType::Relation,
                id: 3
            }
        );
        assert_eq!(ExternalRef::decode(Some(33)).to_string(), "relation/3");

        assert_eq!(
            ExternalRef::decode(Some(1234562)).url().as_deref(),
            Some("https://www.openstreetmap.org/way/123456")
        );
    }

    #[test]
    fn unknown_type_code_keeps_raw_value() {
        assert_eq!(ExternalRef::decode(Some(20)), ExternalRef::Unknown(20));
        assert_eq!(ExternalRef::decode(Some(20)).to_string(), "20 (unknown type)");
        assert_eq!(ExternalRef::decode(Some(7)).to_string(), "7 (unknown type)");
        assert_eq!(ExternalRef::decode(Some(7)).url(), None);
    }

    #[test]
    fn missing_id() {
        assert_eq!(ExternalRef::decode(None), ExternalRef::Missing);
        assert_eq!(ExternalRef::Missing.to_string(), "No ID");
    }

    #[test]
    fn feature_without_id_has_no_key() {
        let feature = RenderedFeature::new(lonlat!(1.0, 2.0), "tiles", "poi");
        assert_eq!(feature.key(), None);
        assert_eq!(feature.external_ref(), ExternalRef::Missing);

        let feature = feature.with_id(42);
        assert_matches!(feature.key(), Some(FeatureKey { id: 42, .. }));
        assert_eq!(feature.geometry_type(), "Point");
        assert_eq!(feature.family(), Some(GeometryFamily::Point));
    }
}
