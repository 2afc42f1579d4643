// ============================================================================
// DASHBOARD VIEWMODEL - Data orchestration for the dashboard view
// ============================================================================
// Owns fetch lifecycle, upload hand-off and the reaction to 401s.
// Views only read state and forward user events here.
// ============================================================================

use std::rc::Rc;

use crate::config::AppConfig;
use crate::error::{ApiError, IntakeError};
use crate::models::{FileMeta, Notification, UploadFile};
use crate::routing::{Navigator, Route};
use crate::services::ApiClient;
use crate::state::{ChangeNotifier, DashboardState, LiveToken, Liveness, SessionStore};
use crate::utils::Scheduler;
use crate::viewmodels::{CsvIntake, NotificationCenter, UploadCoordinator, UploadOutcome};

pub const LOAD_FAILED_MESSAGE: &str = "Could not load dashboard data.";

#[derive(Clone)]
pub struct DashboardViewModel {
    client: ApiClient,
    session: SessionStore,
    navigator: Rc<dyn Navigator>,
    pub state: DashboardState,
    pub intake: CsvIntake,
    pub uploads: UploadCoordinator,
    pub notifications: NotificationCenter,
    live: Liveness,
}

impl DashboardViewModel {
    pub fn new(
        client: ApiClient,
        session: SessionStore,
        navigator: Rc<dyn Navigator>,
        scheduler: Rc<dyn Scheduler>,
        config: &AppConfig,
        notifier: ChangeNotifier,
    ) -> Self {
        let notifications =
            NotificationCenter::new(scheduler, config.notification_ttl_ms, notifier.clone());
        Self {
            client,
            session,
            navigator,
            state: DashboardState::new(notifier.clone()),
            intake: CsvIntake::new(config.max_upload_bytes, config.csv_preview_rows, notifier.clone()),
            uploads: UploadCoordinator::new(notifications.clone(), notifier),
            notifications,
            live: Liveness::new(),
        }
    }

    /// Opens a new activation and performs the initial load. Work still
    /// pending from an earlier activation can no longer touch state.
    pub async fn activate(&self) {
        log::info!("📊 [DASHBOARD] Activated");
        let token = self.live.begin();
        self.load(&token, true).await;
    }

    /// Reloads both lists. The loading flag is only raised when there is
    /// nothing on screen yet.
    pub async fn refresh(&self) {
        let token = self.live.token();
        if !token.is_current() {
            return;
        }
        let show_loading = !self.state.has_data();
        self.load(&token, show_loading).await;
    }

    /// Late results arriving after this call are dropped.
    pub fn deactivate(&self) {
        if self.live.is_live() {
            log::info!("📊 [DASHBOARD] Deactivated");
        }
        self.live.end();
    }

    pub fn is_active(&self) -> bool {
        self.live.is_live()
    }

    async fn load(&self, token: &LiveToken, show_loading: bool) {
        if show_loading {
            self.state.set_loading(true);
        }

        let (predictions, hotspots) =
            futures::join!(self.client.get_predictions(), self.client.get_hotspots());

        if !token.is_current() {
            log::info!("🛑 [DASHBOARD] Dropping results of a closed activation");
            return;
        }

        let mut unauthorized = false;
        let mut failed = false;

        match predictions {
            Ok(list) => self.state.set_predictions(list),
            Err(e) => self.note_fetch_error("predictions", e, &mut unauthorized, &mut failed),
        }
        match hotspots {
            Ok(list) => self.state.set_hotspots(list),
            Err(e) => self.note_fetch_error("hotspots", e, &mut unauthorized, &mut failed),
        }
        self.state.set_loading(false);

        if unauthorized {
            self.handle_unauthorized(token);
        } else if failed {
            self.notifications.show(Notification::error(LOAD_FAILED_MESSAGE));
        }
    }

    fn note_fetch_error(&self, what: &str, err: ApiError, unauthorized: &mut bool, failed: &mut bool) {
        if err.is_unauthorized() {
            *unauthorized = true;
        } else {
            log::error!("❌ [DASHBOARD] Loading {} failed: {}", what, err);
            *failed = true;
        }
    }

    /// Checks count, type and size from file metadata alone, before any
    /// bytes are read. A rejection is shown like any other intake error.
    pub fn screen_files(&self, files: &[FileMeta]) -> Result<(), IntakeError> {
        self.intake.screen(files, self.uploads.is_in_flight())
    }

    pub fn select_files(&self, files: Vec<UploadFile>) -> Result<(), IntakeError> {
        self.intake.select(files, self.uploads.is_in_flight())?;
        self.uploads.reset_if_terminal();
        Ok(())
    }

    /// Drops the selected file. Refused while its upload is in flight.
    pub fn remove_selection(&self) {
        if self.uploads.is_in_flight() {
            return;
        }
        self.intake.clear();
    }

    /// Uploads the selected file; a no-op when nothing is selected or an
    /// upload is already running.
    pub async fn submit_upload(&self) {
        let token = self.live.token();
        if !token.is_current() {
            return;
        }
        let Some(file) = self.intake.submit(self.uploads.is_in_flight()) else {
            return;
        };

        match self.uploads.run(&self.client, file, &token).await {
            UploadOutcome::Succeeded { .. } => self.refresh().await,
            UploadOutcome::Unauthorized => self.handle_unauthorized(&token),
            UploadOutcome::Failed | UploadOutcome::Rejected => {}
        }
    }

    pub fn logout(&self) {
        log::info!("👋 [DASHBOARD] Logout");
        self.session.clear();
        self.deactivate();
        self.notifications.dismiss();
        self.navigator.navigate(Route::Login);
    }

    /// Clears the session and sends the user to login. Ending the
    /// activation makes every later 401 of the same activation stale, so
    /// this runs once per activation.
    fn handle_unauthorized(&self, token: &LiveToken) {
        if !token.is_current() {
            return;
        }
        log::warn!("🔒 [DASHBOARD] Session rejected by the server, back to login");
        self.session.clear();
        self.deactivate();
        self.navigator.navigate(Route::Login);
    }
}
