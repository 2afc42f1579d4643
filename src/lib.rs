// ============================================================================
// WILDGUARD DASHBOARD - MVVM FRONTEND (PURE RUST)
// ============================================================================
// - Views: functions that render DOM (no logic)
// - ViewModels: UI state + orchestration
// - Services: HTTP only
// - State: shared Rc<RefCell> state
// - Models: wire structures shared with the backend
// ============================================================================

pub mod config;
pub mod error;
pub mod models;
pub mod routing;
pub mod services;
pub mod state;
pub mod utils;
pub mod viewmodels;

mod app;
mod dom;
mod views;

#[cfg(test)]
mod testing;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;
use wasm_logger::Config;

use crate::app::App;
use crate::config::CONFIG;
use crate::dom::{on_window_event, window};

thread_local! {
    static APP: RefCell<Option<App>> = RefCell::new(None);
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let level = if CONFIG.is_logging_enabled() {
        log::Level::Debug
    } else {
        log::Level::Warn
    };
    wasm_logger::init(Config::new(level));
    log::info!("🚀 WildGuard Dashboard - Rust + MVVM");

    let mut app = App::new()?;
    app.render()?;
    APP.with(|cell| *cell.borrow_mut() = Some(app));

    // Registered once; the hash drives navigation.
    if let Some(win) = window() {
        on_window_event(&win, "hashchange", |_| rerender_app())?;
    }

    Ok(())
}

pub fn rerender_app() {
    APP.with(|cell| {
        let Ok(mut app) = cell.try_borrow_mut() else {
            log::warn!("⚠️ [RERENDER] Render already in progress");
            return;
        };
        match app.as_mut() {
            Some(app) => {
                if let Err(e) = app.render() {
                    log::error!("❌ [RERENDER] {:?}", e);
                }
            }
            None => log::warn!("⚠️ [RERENDER] App is not initialized"),
        }
    });
}
