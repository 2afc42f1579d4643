// ============================================================================
// ROUTING - Hash routes, session guard and navigation
// ============================================================================

use crate::state::SessionStore;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Route {
    Login,
    Register,
    Dashboard,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
        }
    }

    /// Accepts `"/login"`, `"#/login"`, ... The root path is the dashboard.
    pub fn from_path(path: &str) -> Option<Route> {
        let path = path.trim_start_matches('#').trim_end_matches('/');
        match path {
            "" | "/dashboard" => Some(Route::Dashboard),
            "/login" => Some(Route::Login),
            "/register" => Some(Route::Register),
            _ => None,
        }
    }

    pub fn is_protected(self) -> bool {
        matches!(self, Route::Dashboard)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    Allow(Route),
    Redirect(Route),
}

/// Capability check run before a view is rendered.
pub struct RouteGuard;

impl RouteGuard {
    pub fn resolve(route: Route, session: &SessionStore) -> GuardDecision {
        if route.is_protected() && !session.is_present() {
            log::info!("🔒 [ROUTER] {} requires a session, redirecting to login", route.path());
            GuardDecision::Redirect(Route::Login)
        } else {
            GuardDecision::Allow(route)
        }
    }
}

pub trait Navigator {
    fn navigate(&self, route: Route);
}

/// Drives `location.hash`; the app re-renders on `hashchange`.
#[derive(Clone, Copy, Debug, Default)]
pub struct BrowserNavigator;

impl BrowserNavigator {
    pub fn current_route() -> Option<Route> {
        let hash = web_sys::window()?.location().hash().ok()?;
        Route::from_path(&hash)
    }
}

impl Navigator for BrowserNavigator {
    fn navigate(&self, route: Route) {
        let Some(window) = web_sys::window() else {
            return;
        };
        log::info!("🧭 [ROUTER] Navigating to {}", route.path());
        if let Err(e) = window.location().set_hash(route.path()) {
            log::error!("❌ [ROUTER] Could not navigate: {:?}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::MemoryStorage;
    use std::rc::Rc;

    fn session(token: Option<&str>) -> SessionStore {
        let store = SessionStore::new(Rc::new(MemoryStorage::new()), "token");
        if let Some(token) = token {
            store.set(token);
        }
        store
    }

    #[test]
    fn parses_hash_paths() {
        assert_eq!(Route::from_path("#/login"), Some(Route::Login));
        assert_eq!(Route::from_path("/register"), Some(Route::Register));
        assert_eq!(Route::from_path(""), Some(Route::Dashboard));
        assert_eq!(Route::from_path("#/"), Some(Route::Dashboard));
        assert_eq!(Route::from_path("/admin"), None);
    }

    #[test]
    fn dashboard_without_session_redirects_to_login() {
        assert_eq!(
            RouteGuard::resolve(Route::Dashboard, &session(None)),
            GuardDecision::Redirect(Route::Login)
        );
        assert_eq!(
            RouteGuard::resolve(Route::Dashboard, &session(Some("jwt"))),
            GuardDecision::Allow(Route::Dashboard)
        );
    }

    #[test]
    fn public_routes_are_always_allowed() {
        let anonymous = session(None);
        assert_eq!(RouteGuard::resolve(Route::Login, &anonymous), GuardDecision::Allow(Route::Login));
        assert_eq!(RouteGuard::resolve(Route::Register, &anonymous), GuardDecision::Allow(Route::Register));
    }
}
