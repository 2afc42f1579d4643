// ============================================================================
// VIEWS - Render functions, no logic
// ============================================================================

pub mod auth;
pub mod dashboard;
pub mod hotspot_map;
pub mod notification_toast;
pub mod prediction_table;
pub mod upload_panel;

use wasm_bindgen::prelude::*;
use web_sys::Element;

use crate::app::AppContext;
use crate::routing::Route;

pub fn render_route(route: Route, ctx: &AppContext) -> Result<Element, JsValue> {
    match route {
        Route::Login => auth::render_login(&ctx.auth),
        Route::Register => auth::render_register(&ctx.auth),
        Route::Dashboard => dashboard::render_dashboard(&ctx.dashboard, &ctx.config),
    }
}
