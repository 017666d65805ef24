//! Layer catalog built from the tile descriptor.

use crate::color::{color_for_index, Color};
use crate::tilejson::TileJson;

/// Ordered list of the vector layers of a tile source.
///
/// The position of a layer in the catalog defines its drawing order, its place in the legend and
/// its color (see [`color_for_index`]).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LayerCatalog {
    layers: Vec<String>,
}

impl LayerCatalog {
    /// Creates a catalog from layer names. Empty and repeated names are skipped.
    pub fn new<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        let mut layers: Vec<String> = vec![];
        for name in names {
            let name = name.into();
            if name.is_empty() {
                log::warn!("Skipping vector layer with empty id");
                continue;
            }

            if layers.contains(&name) {
                log::warn!("Skipping repeated vector layer {name}");
                continue;
            }

            layers.push(name);
        }

        Self { layers }
    }

    /// Creates a catalog from the `vector_layers` of a tile descriptor.
    pub fn from_tilejson(tilejson: &TileJson) -> Self {
        Self::new(tilejson.layer_ids())
    }

    /// Number of layers.
    pub fn len(&self) -> usize {
        self.layers.len()
    }

    /// Returns true if the catalog has no layers.
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Position of the layer in the catalog.
    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.layers.iter().position(|layer| layer == name)
    }

    /// Name of the layer at the position.
    pub fn name(&self, index: usize) -> Option<&str> {
        self.layers.get(index).map(String::as_str)
    }

    /// Color of the layer, or [`Color::NEUTRAL`] if the layer is not in the catalog.
    pub fn color_of(&self, name: &str) -> Color {
        self.index_of(name)
            .map(color_for_index)
            .unwrap_or(Color::NEUTRAL)
    }

    /// Layer names in catalog order.
    pub fn names(&self) -> impl Iterator<Item = &str> + '_ {
        self.layers.iter().map(String::as_str)
    }

    /// Iterates over `(index, name, color)` of all layers.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &str, Color)> + '_ {
        self.layers
            .iter()
            .enumerate()
            .map(|(index, name)| (index, name.as_str(), color_for_index(index)))
    }
}
