// ============================================================================
// HOTSPOT MAP - Markers handed to the page's map script
// ============================================================================
// The page may define `window.renderHotspots(containerId, json)`; without
// it the hotspots are listed as plain text.
// ============================================================================

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::Element;

use crate::config::MapConfig;
use crate::dom::ElementBuilder;
use crate::models::Hotspot;

pub const MAP_CONTAINER_ID: &str = "hotspot-map";
const RENDER_HOOK: &str = "renderHotspots";

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct HotspotMarker {
    pub lat: f64,
    pub lng: f64,
    pub popup: String,
}

#[derive(Serialize)]
struct MapPayload<'a> {
    center: [f64; 2],
    zoom: f64,
    markers: &'a [HotspotMarker],
}

pub fn hotspot_markers(hotspots: &[Hotspot]) -> Vec<HotspotMarker> {
    hotspots
        .iter()
        .map(|spot| HotspotMarker {
            lat: spot.latitude,
            lng: spot.longitude,
            popup: format!("Risk Score: {:.1}%", spot.risk_percent()),
        })
        .collect()
}

pub fn map_payload_json(markers: &[HotspotMarker], map: &MapConfig) -> Result<String, serde_json::Error> {
    serde_json::to_string(&MapPayload {
        center: [map.default_center_lat, map.default_center_lng],
        zoom: map.default_zoom,
        markers,
    })
}

/// Builds the map container. The JS hook runs once the container is
/// attached, see [`draw_hotspots`].
pub fn render_hotspot_map(hotspots: &[Hotspot]) -> Result<Element, JsValue> {
    let container = ElementBuilder::new("div")?
        .id(MAP_CONTAINER_ID)?
        .class("hotspot-map")
        .build();

    if render_hook().is_none() {
        let mut items = Vec::new();
        for marker in hotspot_markers(hotspots) {
            let text = format!("{:.2}°, {:.2}° - {}", marker.lat, marker.lng, marker.popup);
            items.push(ElementBuilder::new("li")?.text(&text).build());
        }
        let list = ElementBuilder::new("ul")?
            .class("hotspot-list")
            .children(items)?
            .build();
        container.append_child(&list)?;
    }

    Ok(container)
}

/// Hands the markers to `window.renderHotspots`, if the page defines it.
pub fn draw_hotspots(hotspots: &[Hotspot], map: &MapConfig) {
    let Some((window, hook)) = render_hook() else {
        return;
    };
    let markers = hotspot_markers(hotspots);
    let json = match map_payload_json(&markers, map) {
        Ok(json) => json,
        Err(e) => {
            log::error!("❌ [MAP] Could not serialize markers: {}", e);
            return;
        }
    };
    match hook.call2(&window, &JsValue::from_str(MAP_CONTAINER_ID), &JsValue::from_str(&json)) {
        Ok(_) => log::info!("🗺️ [MAP] {} hotspots drawn", markers.len()),
        Err(e) => log::error!("❌ [MAP] {} failed: {:?}", RENDER_HOOK, e),
    }
}

fn render_hook() -> Option<(JsValue, js_sys::Function)> {
    let window: JsValue = web_sys::window()?.into();
    let hook = js_sys::Reflect::get(&window, &JsValue::from_str(RENDER_HOOK)).ok()?;
    let hook = hook.dyn_into::<js_sys::Function>().ok()?;
    Some((window, hook))
}
