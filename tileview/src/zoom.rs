//! Zoom level indicator.

use crate::engine::RenderingEngine;

/// Text indicator of the current zoom level.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoomIndicator {
    text: String,
}

impl ZoomIndicator {
    /// Label for the zoom level, with two decimal digits.
    pub fn label(zoom: f64) -> String {
        format!("Z = {zoom:.2}")
    }

    /// Updates the label from the engine zoom level.
    pub fn update(&mut self, engine: &dyn RenderingEngine) -> &str {
        self.text = Self::label(engine.zoom());
        &self.text
    }

    /// Last label.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[cfg(test)]
mod tests {
    use tileview_types::lonlat;

    use super::*;
    use crate::engine::{MapView, MemoryEngine};

    #[test]
    fn label_format() {
        assert_eq!(ZoomIndicator::label(12.346), "Z = 12.35");
        assert_eq!(ZoomIndicator::label(0.0), "Z = 0.00");
    }

    #[test]
    fn update_from_engine() {
        let engine = MemoryEngine::new(MapView::new(lonlat!(0.0, 0.0), 3.5));
        let mut indicator = ZoomIndicator::default();
        assert_eq!(indicator.update(&engine), "Z = 3.50");
        assert_eq!(indicator.text(), "Z = 3.50");
    }
}
