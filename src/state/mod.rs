// ============================================================================
// STATE MODULE - Shared Rc<RefCell> state + change notifications
// ============================================================================

pub mod reactivity;
pub mod session_store;
pub mod dashboard_state;

pub use reactivity::{ChangeNotifier, LiveToken, Liveness};
pub use session_store::SessionStore;
pub use dashboard_state::DashboardState;
