//! This example loads a tile descriptor, prints the generated map style and simulates pointer
//! interaction over a few synthetic features, printing what the info panel would show.
//!
//! Usage: `cargo run --example inspect -- <tilejson url or file>`

use nalgebra::Point2;
use tileview::control::{MouseButton, RawUserEvent};
use tileview::engine::{MapView, MemoryEngine, RenderingEngine};
use tileview::info_panel::{InfoPanel, PanelContent};
use tileview::tilejson::{FileTileJsonLoader, TileJsonLoader, UrlTileJsonLoader};
use tileview::tileview_types::lonlat;
use tileview::{RenderedFeature, Viewer, ViewerConfig};

const DEFAULT_DESCRIPTOR: &str = "https://tiles.openstreetmap.us/vector/openmaptiles.json";

struct StdoutPanel;

impl InfoPanel for StdoutPanel {
    fn show(&mut self, content: PanelContent) {
        println!("{content}");
    }

    fn hide(&mut self) {
        println!("(panel hidden)");
    }
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let descriptor = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_DESCRIPTOR.to_string());
    let loader: Box<dyn TileJsonLoader> = if descriptor.starts_with("http") {
        Box::new(UrlTileJsonLoader::new(&descriptor))
    } else {
        Box::new(FileTileJsonLoader::new(&descriptor))
    };

    let tilejson = loader.load().await.expect("failed to load tile descriptor");
    let (center, zoom) = tilejson
        .default_center()
        .unwrap_or((lonlat!(0.0, 0.0), None));

    let view = MapView::new(center, zoom.unwrap_or(14.0)).with_size(1024.0, 768.0);
    let features = tilejson.layer_ids().enumerate().map(|(index, layer)| {
        let offset = index as f64 * 0.000_01;
        RenderedFeature::new(lonlat!(center.x() + offset, center.y()), "sourdough", layer)
            .with_id(index as u64 * 10 + 1)
            .with_property("name", format!("{layer} sample"))
    });
    let engine = MemoryEngine::new(view).with_features(features.collect::<Vec<_>>());

    let mut viewer = Viewer::new(tilejson, engine, StdoutPanel, ViewerConfig::default())
        .expect("failed to create viewer");

    println!(
        "{}",
        serde_json::to_string_pretty(&viewer.style(&descriptor).to_json())
            .expect("style is valid JSON")
    );

    for item in viewer.legend().items() {
        println!("[{}] {}", item.color(), item.name());
    }
    println!("{}", viewer.zoom_label());

    let center_px = Point2::new(512.0, 384.0);
    println!("\n== hover ==");
    viewer.handle_event(RawUserEvent::PointerMoved(center_px));

    println!("\n== click ==");
    viewer.handle_event(RawUserEvent::ButtonPressed(MouseButton::Left));
    viewer.handle_event(RawUserEvent::ButtonReleased(MouseButton::Left));

    println!("\n== close ==");
    viewer.handle_event(RawUserEvent::PanelCloseRequested);

    let engine = viewer.dispose();
    println!("layers in engine: {}", engine.layer_ids().len());
}
