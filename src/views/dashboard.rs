// ============================================================================
// DASHBOARD VIEW - Map, ranked table and upload panel
// ============================================================================

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::config::AppConfig;
use crate::dom::{on_click, ElementBuilder};
use crate::viewmodels::DashboardViewModel;
use crate::views::hotspot_map::render_hotspot_map;
use crate::views::notification_toast::render_toast;
use crate::views::prediction_table::render_prediction_table;
use crate::views::upload_panel::render_upload_panel;

pub fn render_dashboard(vm: &DashboardViewModel, config: &AppConfig) -> Result<Element, JsValue> {
    if vm.state.get_loading() {
        return Ok(ElementBuilder::new("div")?
            .class("loading-screen")
            .text("Loading...")
            .build());
    }

    let logout = ElementBuilder::new("button")?
        .class("logout-button")
        .text("Logout")
        .build();
    {
        let vm = vm.clone();
        on_click(&logout, move |_| vm.logout())?;
    }

    let header = ElementBuilder::new("header")?
        .class("dashboard-header")
        .child(ElementBuilder::new("h1")?.text("WildGuard Dashboard").build())?
        .child(logout)?
        .build();

    let map_card = card("Poaching Risk Map", render_hotspot_map(&vm.state.get_hotspots())?)?;
    let table_card = card(
        "Risk Predictions",
        render_prediction_table(&vm.state.get_predictions(), config.prediction_table_limit)?,
    )?;
    let grid = ElementBuilder::new("div")?
        .class("dashboard-grid")
        .child(map_card)?
        .child(table_card)?
        .build();

    let upload_card = card(
        "Upload Incident Data",
        render_upload_panel(vm, &config.sample_csv_path, config.max_upload_bytes)?,
    )?;

    let page = ElementBuilder::new("div")?
        .class("dashboard")
        .child(header)?
        .child(grid)?
        .child(upload_card)?
        .build();

    if let Some(toast) = render_toast(&vm.notifications)? {
        page.append_child(&toast)?;
    }
    Ok(page)
}

fn card(title: &str, body: Element) -> Result<Element, JsValue> {
    Ok(ElementBuilder::new("section")?
        .class("card")
        .child(ElementBuilder::new("h2")?.text(title).build())?
        .child(body)?
        .build())
}
