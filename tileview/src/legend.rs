//! Layer legend with visibility checkboxes.

use crate::catalog::LayerCatalog;
use crate::color::Color;
use crate::config::ViewerConfig;
use crate::engine::RenderingEngine;
use crate::error::TileviewError;
use crate::style::layer_ids_for;

/// State of the "All" checkbox.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum AllState {
    /// All layers are visible.
    Checked,
    /// No layer is visible.
    Unchecked,
    /// Some layers are visible.
    Indeterminate,
}

/// Legend entry of a vector layer.
#[derive(Debug, Clone, PartialEq)]
pub struct LegendItem {
    name: String,
    color: Color,
    checked: bool,
    style_layers: Vec<String>,
}

impl LegendItem {
    /// Vector layer name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Accent color of the checkbox, same as the layer color on the map.
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns true if the layer is shown.
    pub fn is_checked(&self) -> bool {
        self.checked
    }

    /// Ids of the style layers drawing this vector layer.
    pub fn style_layers(&self) -> &[String] {
        &self.style_layers
    }
}

/// Legend of all vector layers of the catalog. All layers start checked.
#[derive(Debug, Clone, PartialEq)]
pub struct Legend {
    items: Vec<LegendItem>,
    last_clicked: Option<usize>,
}

impl Legend {
    /// Creates a legend for the catalog.
    pub fn new(catalog: &LayerCatalog, config: &ViewerConfig) -> Self {
        let items = catalog
            .iter()
            .map(|(_, name, color)| LegendItem {
                name: name.to_string(),
                color,
                checked: true,
                style_layers: layer_ids_for(config.source_id(), name),
            })
            .collect();

        Self {
            items,
            last_clicked: None,
        }
    }

    /// Legend items in catalog order.
    pub fn items(&self) -> &[LegendItem] {
        &self.items
    }

    /// State of the "All" checkbox.
    pub fn all_state(&self) -> AllState {
        let checked = self.items.iter().filter(|item| item.checked).count();
        if checked == 0 {
            AllState::Unchecked
        } else if checked == self.items.len() {
            AllState::Checked
        } else {
            AllState::Indeterminate
        }
    }

    /// Applies a change of the checkbox at `index`.
    ///
    /// If `shift` is set and another checkbox was changed before, every checkbox between the two
    /// (inclusive) gets the new state. Index out of range is ignored.
    pub fn toggle(
        &mut self,
        index: usize,
        checked: bool,
        shift: bool,
        engine: &mut dyn RenderingEngine,
    ) -> Result<(), TileviewError> {
        if index >= self.items.len() {
            return Ok(());
        }

        let range = match self.last_clicked {
            Some(last) if shift => last.min(index)..=last.max(index),
            _ => index..=index,
        };

        for i in range {
            self.set_checked(i, checked, engine)?;
        }

        self.last_clicked = Some(index);
        Ok(())
    }

    /// Applies a change of the "All" checkbox.
    pub fn set_all(
        &mut self,
        checked: bool,
        engine: &mut dyn RenderingEngine,
    ) -> Result<(), TileviewError> {
        for i in 0..self.items.len() {
            self.set_checked(i, checked, engine)?;
        }

        Ok(())
    }

    fn set_checked(
        &mut self,
        index: usize,
        checked: bool,
        engine: &mut dyn RenderingEngine,
    ) -> Result<(), TileviewError> {
        let Some(item) = self.items.get_mut(index) else {
            return Ok(());
        };

        item.checked = checked;
        for layer_id in &item.style_layers {
            if engine.has_layer(layer_id) {
                engine.set_layer_visibility(layer_id, checked)?;
            }
        }

        log::debug!("Layer {} visibility set to {checked}", item.name);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PALETTE;
    use crate::engine::MemoryEngine;
    use crate::style::build_style_layers;

    fn setup(names: &[&str]) -> (Legend, MemoryEngine) {
        let catalog = LayerCatalog::new(names.iter().copied());
        let config = ViewerConfig::default();
        let mut engine = MemoryEngine::default();
        for layer in build_style_layers(&catalog, &config) {
            engine.add_layer(layer).unwrap();
        }

        (Legend::new(&catalog, &config), engine)
    }

    fn checked(legend: &Legend) -> Vec<bool> {
        legend.items().iter().map(LegendItem::is_checked).collect()
    }

    #[test]
    fn items_follow_catalog() {
        let (legend, _) = setup(&["water", "roads"]);
        assert_eq!(legend.items()[1].name(), "roads");
        assert_eq!(legend.items()[1].color(), PALETTE[1]);
        assert_eq!(legend.items()[0].style_layers().len(), 6);
        assert_eq!(legend.all_state(), AllState::Checked);
    }

    #[test]
    fn toggle_hides_all_style_layers_of_the_layer() {
        let (mut legend, mut engine) = setup(&["water", "roads"]);
        legend.toggle(0, false, false, &mut engine).unwrap();

        assert!(!engine.is_layer_visible("sourdough_water_polygons"));
        assert!(!engine.is_layer_visible("sourdough_water_polygon_labels"));
        assert!(engine.is_layer_visible("sourdough_roads_lines"));
        assert_eq!(legend.all_state(), AllState::Indeterminate);
    }

    #[test]
    fn similar_names_are_independent() {
        let (mut legend, mut engine) = setup(&["road", "roads"]);
        legend.toggle(0, false, false, &mut engine).unwrap();

        assert!(!engine.is_layer_visible("sourdough_road_lines"));
        assert!(engine.is_layer_visible("sourdough_roads_lines"));
    }

    #[test]
    fn shift_toggles_range() {
        let (mut legend, mut engine) = setup(&["a", "b", "c", "d", "e"]);

        legend.toggle(3, false, false, &mut engine).unwrap();
        legend.toggle(1, false, true, &mut engine).unwrap();
        assert_eq!(checked(&legend), vec![true, false, false, false, true]);
        assert!(!engine.is_layer_visible("sourdough_c_points"));

        legend.toggle(4, true, true, &mut engine).unwrap();
        assert_eq!(checked(&legend), vec![true, true, true, true, true]);
    }

    #[test]
    fn shift_without_previous_click_toggles_one() {
        let (mut legend, mut engine) = setup(&["a", "b", "c"]);
        legend.toggle(2, false, true, &mut engine).unwrap();
        assert_eq!(checked(&legend), vec![true, true, false]);
    }

    #[test]
    fn set_all() {
        let (mut legend, mut engine) = setup(&["a", "b"]);

        legend.set_all(false, &mut engine).unwrap();
        assert_eq!(legend.all_state(), AllState::Unchecked);
        assert!(engine
            .layer_ids()
            .iter()
            .all(|id| !engine.is_layer_visible(id)));

        legend.set_all(true, &mut engine).unwrap();
        assert_eq!(legend.all_state(), AllState::Checked);
    }
}
