//! TileJSON descriptor of a vector tile service and loaders for it.

use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::TileviewError;

/// TileJSON document. Only the fields the viewer uses are typed; everything else is kept in
/// `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TileJson {
    /// TileJSON version.
    #[serde(default)]
    pub tilejson: Option<String>,
    /// Service name.
    #[serde(default)]
    pub name: Option<String>,
    /// Tile URL templates.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub tiles: Vec<String>,
    /// Vector layers available in the tiles, in rendering order.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vector_layers: Vec<VectorLayer>,
    /// Attribution HTML.
    #[serde(default)]
    pub attribution: Option<String>,
    /// Minimum zoom level of the tiles.
    #[serde(default)]
    pub minzoom: Option<f64>,
    /// Maximum zoom level of the tiles.
    #[serde(default)]
    pub maxzoom: Option<f64>,
    /// Bounds as `[west, south, east, north]`.
    #[serde(default)]
    pub bounds: Option<[f64; 4]>,
    /// Default center as `[longitude, latitude, zoom]`.
    #[serde(default)]
    pub center: Option<Vec<f64>>,
    /// Other fields.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Entry of the `vector_layers` array.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VectorLayer {
    /// Layer name as used in the tiles.
    pub id: String,
    /// Human readable description.
    #[serde(default)]
    pub description: Option<String>,
    /// Minimum zoom level at which the layer is present.
    #[serde(default)]
    pub minzoom: Option<f64>,
    /// Maximum zoom level at which the layer is present.
    #[serde(default)]
    pub maxzoom: Option<f64>,
    /// Attribute names and their types.
    #[serde(default)]
    pub fields: serde_json::Map<String, Value>,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

impl FromStr for TileJson {
    type Err = TileviewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s)?;
        if !value.is_object() {
            return Err(TileviewError::InvalidDescriptor(
                "descriptor must be a JSON object".into(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }
}

impl TileJson {
    /// Ids of the vector layers in the order they are listed.
    pub fn layer_ids(&self) -> impl Iterator<Item = &str> + '_ {
        self.vector_layers.iter().map(|layer| layer.id.as_str())
    }

    /// Default view center as a longitude/latitude point and zoom, if set.
    pub fn default_center(&self) -> Option<(geo_types::Point<f64>, Option<f64>)> {
        match self.center.as_deref()? {
            [lon, lat] => Some((geo_types::Point::new(*lon, *lat), None)),
            [lon, lat, zoom, ..] => Some((geo_types::Point::new(*lon, *lat), Some(*zoom))),
            _ => None,
        }
    }
}

/// Loads a tile descriptor.
#[async_trait]
pub trait TileJsonLoader {
    /// Loads and parses the descriptor.
    async fn load(&self) -> Result<TileJson, TileviewError>;
}

/// Loads a descriptor over HTTP.
#[cfg(feature = "http")]
#[derive(Debug, Clone)]
pub struct UrlTileJsonLoader {
    url: String,
    client: reqwest::Client,
}

#[cfg(feature = "http")]
impl UrlTileJsonLoader {
    /// Creates a new loader for the URL.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }

    /// Descriptor URL.
    pub fn url(&self) -> &str {
        &self.url
    }
}

#[cfg(feature = "http")]
#[async_trait]
impl TileJsonLoader for UrlTileJsonLoader {
    async fn load(&self) -> Result<TileJson, TileviewError> {
        log::debug!("Loading tile descriptor from {}", self.url);

        let response = self
            .client
            .get(&self.url)
            .send()
            .await?
            .error_for_status()?;
        let text = response.text().await?;

        text.parse()
    }
}

/// Loads a descriptor from a local file.
#[derive(Debug, Clone)]
pub struct FileTileJsonLoader {
    path: PathBuf,
}

impl FileTileJsonLoader {
    /// Creates a new loader for the file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl TileJsonLoader for FileTileJsonLoader {
    async fn load(&self) -> Result<TileJson, TileviewError> {
        log::debug!("Loading tile descriptor from {}", self.path.display());

        let text = tokio::fs::read_to_string(&self.path).await?;
        text.parse()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;

    const DESCRIPTOR: &str = r#"{
        "tilejson": "3.0.0",
        "name": "Planet",
        "tiles": ["https://example.com/{z}/{x}/{y}.mvt"],
        "minzoom": 0,
        "maxzoom": 14,
        "center": [-1.86, 53.73, 12],
        "vector_layers": [
            {"id": "water", "fields": {"class": "String"}},
            {"id": "roads", "description": "Road network", "maxzoom": 14},
            {"id": "pois"}
        ],
        "planetiler:version": "0.8"
    }"#;

    #[test]
    fn parses_vector_layers_in_order() {
        let tilejson: TileJson = DESCRIPTOR.parse().unwrap();
        assert_eq!(
            tilejson.layer_ids().collect::<Vec<_>>(),
            vec!["water", "roads", "pois"]
        );
        assert_eq!(
            tilejson.vector_layers[1].description.as_deref(),
            Some("Road network")
        );
        assert!(tilejson.extra.contains_key("planetiler:version"));
    }

    #[test]
    fn default_center() {
        let tilejson: TileJson = DESCRIPTOR.parse().unwrap();
        let (center, zoom) = tilejson.default_center().unwrap();
        assert_eq!(center.x(), -1.86);
        assert_eq!(zoom, Some(12.0));
    }

    #[test]
    fn missing_vector_layers_is_empty() {
        let tilejson: TileJson = r#"{"tiles": []}"#.parse().unwrap();
        assert!(tilejson.vector_layers.is_empty());
    }

    #[test]
    fn null_vector_layers_is_empty() {
        let tilejson: TileJson =
            r#"{"tiles": null, "vector_layers": null}"#.parse().unwrap();
        assert!(tilejson.vector_layers.is_empty());
        assert!(tilejson.tiles.is_empty());
    }

    #[test]
    fn rejects_non_object() {
        assert_matches!(
            "[1, 2]".parse::<TileJson>(),
            Err(TileviewError::InvalidDescriptor(_))
        );
        assert_matches!("{".parse::<TileJson>(), Err(TileviewError::Decoding(_)));
    }

    #[test]
    fn loads_from_file() {
        let path = std::env::temp_dir().join(format!("tileview-{}.json", std::process::id()));
        std::fs::write(&path, DESCRIPTOR).unwrap();

        let tilejson = tokio_test::block_on(FileTileJsonLoader::new(&path).load()).unwrap();
        assert_eq!(tilejson.vector_layers.len(), 3);

        std::fs::remove_file(&path).unwrap();
    }

    #[test]
    fn missing_file_is_io_error() {
        let result = tokio_test::block_on(
            FileTileJsonLoader::new("/definitely/not/here/tiles.json").load(),
        );
        assert_matches!(result, Err(TileviewError::FsIo(_)));
    }
}
