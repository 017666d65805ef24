//! Feature info panel.
//!
//! The panel lists the selected features in selection order. Each entry shows the vector layer
//! with its catalog color, the decoded OpenStreetMap reference, the geometry type and the feature
//! properties sorted by key.

use std::fmt::{Display, Formatter};

use maybe_sync::MaybeSend;
use serde_json::Value;

use crate::catalog::LayerCatalog;
use crate::color::Color;
use crate::feature::{ExternalRef, RenderedFeature};

/// Surface the feature info is displayed on.
pub trait InfoPanel: MaybeSend {
    /// Replaces the panel content and makes the panel visible.
    fn show(&mut self, content: PanelContent);
    /// Hides the panel.
    fn hide(&mut self);
}

/// Content of the info panel.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelContent {
    /// The panel has a close control. Set for pinned selections.
    pub closable: bool,
    /// One entry per selected feature.
    pub entries: Vec<PanelEntry>,
}

/// Info about one feature.
#[derive(Debug, Clone, PartialEq)]
pub struct PanelEntry {
    /// Vector layer name.
    pub layer: String,
    /// Color of the layer in the legend.
    pub swatch: Color,
    /// Source element reference decoded from the feature id.
    pub reference: ExternalRef,
    /// GeoJSON geometry type name.
    pub geometry_type: &'static str,
    /// Properties sorted by key. Values are JSON encoded, so strings are shown quoted.
    pub properties: Vec<(String, String)>,
}

/// Item of the panel layout.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum PanelItem<'a> {
    /// Feature entry.
    Entry(&'a PanelEntry),
    /// Separator between two consecutive entries.
    Separator,
}

impl PanelEntry {
    /// Creates an entry for the feature.
    pub fn new(feature: &RenderedFeature, catalog: &LayerCatalog) -> Self {
        let mut properties: Vec<(String, String)> = feature
            .properties
            .iter()
            .map(|(key, value)| (key.clone(), encode_value(value)))
            .collect();
        properties.sort();

        Self {
            layer: feature.source_layer.clone(),
            swatch: catalog.color_of(&feature.source_layer),
            reference: feature.external_ref(),
            geometry_type: feature.geometry_type(),
            properties,
        }
    }
}

fn encode_value(value: &Value) -> String {
    serde_json::to_string(value).unwrap_or_else(|_| value.to_string())
}

impl PanelContent {
    /// Creates the panel content for the selected features.
    pub fn new(selection: &[RenderedFeature], catalog: &LayerCatalog, closable: bool) -> Self {
        Self {
            closable,
            entries: selection
                .iter()
                .map(|feature| PanelEntry::new(feature, catalog))
                .collect(),
        }
    }

    /// Entries with a separator between each two of them.
    pub fn separated(&self) -> impl Iterator<Item = PanelItem<'_>> + '_ {
        self.entries.iter().enumerate().flat_map(|(index, entry)| {
            let separator = (index > 0).then_some(PanelItem::Separator);
            separator.into_iter().chain([PanelItem::Entry(entry)])
        })
    }
}

impl Display for PanelEntry {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "[{}] {}", self.swatch, self.layer)?;
        writeln!(f, "{} • {}", self.reference, self.geometry_type)?;
        for (key, value) in &self.properties {
            writeln!(f, "{key} = {value}")?;
        }

        Ok(())
    }
}

impl Display for PanelContent {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.closable {
            writeln!(f, "[×]")?;
        }

        for item in self.separated() {
            match item {
                PanelItem::Entry(entry) => write!(f, "{entry}")?,
                PanelItem::Separator => writeln!(f, "---")?,
            }
        }

        Ok(())
    }
}

/// Shows the selection in the panel, or hides the panel if nothing is selected.
pub fn render(
    selection: &[RenderedFeature],
    panel: &mut dyn InfoPanel,
    catalog: &LayerCatalog,
    closable: bool,
) {
    if selection.is_empty() {
        panel.hide();
        return;
    }

    panel.show(PanelContent::new(selection, catalog, closable));
}

/// Panel keeping its content as plain text.
#[derive(Debug, Clone, Default)]
pub struct TextPanel {
    content: Option<PanelContent>,
}

impl TextPanel {
    /// Creates a hidden panel.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns true if the panel is shown.
    pub fn is_visible(&self) -> bool {
        self.content.is_some()
    }

    /// Current content, if the panel is shown.
    pub fn content(&self) -> Option<&PanelContent> {
        self.content.as_ref()
    }

    /// Current content as text, if the panel is shown.
    pub fn text(&self) -> Option<String> {
        self.content.as_ref().map(PanelContent::to_string)
    }
}

impl InfoPanel for TextPanel {
    fn show(&mut self, content: PanelContent) {
        self.content = Some(content);
    }

    fn hide(&mut self) {
        self.content = None;
    }
}
