// ============================================================================
// APP - Wiring and top-level render
// ============================================================================

use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::callback::Timeout;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::Element;

use crate::config::{AppConfig, CONFIG};
use crate::dom::{append_child, get_element_by_id, release_element_listeners, set_inner_html};
use crate::routing::{BrowserNavigator, GuardDecision, Navigator, Route, RouteGuard};
use crate::services::{ApiClient, BrowserTransport};
use crate::state::{ChangeNotifier, SessionStore};
use crate::utils::{BrowserScheduler, BrowserStorage};
use crate::viewmodels::{AuthViewModel, DashboardViewModel};
use crate::views::hotspot_map::draw_hotspots;
use crate::views::render_route;
use crate::views::upload_panel::update_progress_bar;

/// Everything views need, built once at startup.
pub struct AppContext {
    pub config: AppConfig,
    pub session: SessionStore,
    pub navigator: Rc<dyn Navigator>,
    pub auth: AuthViewModel,
    pub dashboard: DashboardViewModel,
}

impl AppContext {
    pub fn browser(config: AppConfig) -> Self {
        let session = SessionStore::new(Rc::new(BrowserStorage), config.session_storage_key.clone());
        let client = ApiClient::new(config.api_base_url(), Rc::new(BrowserTransport), session.clone());
        let navigator: Rc<dyn Navigator> = Rc::new(BrowserNavigator);

        let notifier = ChangeNotifier::new();
        notifier.subscribe(schedule_rerender);

        let dashboard = DashboardViewModel::new(
            client.clone(),
            session.clone(),
            navigator.clone(),
            Rc::new(BrowserScheduler),
            &config,
            notifier,
        );
        dashboard.uploads.on_progress(update_progress_bar);
        let auth = AuthViewModel::new(client, session.clone(), navigator.clone());

        Self {
            config,
            session,
            navigator,
            auth,
            dashboard,
        }
    }
}

pub struct App {
    ctx: AppContext,
    root: Element,
    current: Option<Route>,
}

impl App {
    pub fn new() -> Result<Self, JsValue> {
        let root = get_element_by_id("app").ok_or_else(|| JsValue::from_str("No #app element found"))?;
        log::info!(
            "⚙️ [APP] API at {}, session key '{}'",
            CONFIG.api_base_url(),
            CONFIG.session_storage_key
        );
        Ok(Self {
            ctx: AppContext::browser(CONFIG.clone()),
            root,
            current: None,
        })
    }

    /// Resolves the hash route through the guard and redraws the page.
    pub fn render(&mut self) -> Result<(), JsValue> {
        let route = self.resolve_route();

        if route == Route::Dashboard {
            if self.current != Some(Route::Dashboard) || !self.ctx.dashboard.is_active() {
                let dashboard = self.ctx.dashboard.clone();
                dashboard.state.set_loading(true);
                spawn_local(async move { dashboard.activate().await });
            }
        } else {
            self.ctx.dashboard.deactivate();
        }
        self.current = Some(route);

        let released = release_element_listeners();
        log::debug!("🧹 [APP] Released {} listeners of the previous tree", released);
        let view = render_route(route, &self.ctx)?;
        set_inner_html(&self.root, "");
        append_child(&self.root, &view)?;

        if route == Route::Dashboard && !self.ctx.dashboard.state.get_loading() {
            draw_hotspots(&self.ctx.dashboard.state.get_hotspots(), &self.ctx.config.map_config);
        }
        Ok(())
    }

    fn resolve_route(&self) -> Route {
        let requested = match BrowserNavigator::current_route() {
            Some(route) => route,
            None => {
                log::warn!("⚠️ [APP] Unknown route, falling back to the dashboard");
                self.ctx.navigator.navigate(Route::Dashboard);
                Route::Dashboard
            }
        };

        match RouteGuard::resolve(requested, &self.ctx.session) {
            GuardDecision::Allow(route) => route,
            GuardDecision::Redirect(target) => {
                self.ctx.navigator.navigate(target);
                target
            }
        }
    }
}

thread_local! {
    static RERENDER_PENDING: Cell<bool> = Cell::new(false);
}

/// Batches state changes of the same tick into one render.
fn schedule_rerender() {
    if RERENDER_PENDING.with(|pending| pending.replace(true)) {
        return;
    }
    Timeout::new(0, || {
        RERENDER_PENDING.with(|pending| pending.set(false));
        crate::rerender_app();
    })
    .forget();
}
