// ============================================================================
// UPLOAD COORDINATOR - Idle -> InFlight -> Succeeded | Failed -> Idle
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Notification, UploadFile, UploadStatus, UploadTask};
use crate::services::ApiClient;
use crate::state::{ChangeNotifier, LiveToken};
use crate::viewmodels::NotificationCenter;

pub const UPLOAD_FAILED_MESSAGE: &str = "Upload failed. Please try again.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum UploadOutcome {
    Succeeded { filename: String },
    Failed,
    /// 401: the caller owns the session reaction.
    Unauthorized,
    /// Another upload was already in flight; nothing was sent.
    Rejected,
}

type ProgressListener = Rc<dyn Fn(u8)>;

#[derive(Clone)]
pub struct UploadCoordinator {
    task: Rc<RefCell<UploadTask>>,
    notifications: NotificationCenter,
    notifier: ChangeNotifier,
    /// Progress ticks go here instead of through `notifier`.
    progress_listeners: Rc<RefCell<Vec<ProgressListener>>>,
}

impl UploadCoordinator {
    pub fn new(notifications: NotificationCenter, notifier: ChangeNotifier) -> Self {
        Self {
            task: Rc::new(RefCell::new(UploadTask::default())),
            notifications,
            notifier,
            progress_listeners: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn on_progress<F>(&self, listener: F)
    where
        F: Fn(u8) + 'static,
    {
        self.progress_listeners.borrow_mut().push(Rc::new(listener));
    }

    /// Sends `file` and drives the task to a terminal state. Effects after
    /// the network call are skipped once `live` belongs to a closed
    /// activation, except that the task is put back to `Idle`.
    pub async fn run(&self, client: &ApiClient, file: UploadFile, live: &LiveToken) -> UploadOutcome {
        if self.is_in_flight() {
            log::warn!("⚠️ [UPLOAD] {} ignored, an upload is already in flight", file.name);
            return UploadOutcome::Rejected;
        }
        self.begin(&file.name);

        let result = client
            .upload_csv(&file, |percent| {
                if live.is_current() {
                    self.report_progress(percent);
                }
            })
            .await;

        if !live.is_current() {
            log::info!("🛑 [UPLOAD] View closed before {} settled", file.name);
            self.reset();
            return match result {
                Err(e) if e.is_unauthorized() => UploadOutcome::Unauthorized,
                Ok(response) => UploadOutcome::Succeeded {
                    filename: response.filename,
                },
                Err(_) => UploadOutcome::Failed,
            };
        }

        match result {
            Ok(response) => {
                log::info!("✅ [UPLOAD] {} stored as {}", file.name, response.filename);
                self.finish(UploadStatus::Succeeded);
                self.notifications.show(Notification::success(format!(
                    "{} uploaded successfully.",
                    response.filename
                )));
                UploadOutcome::Succeeded {
                    filename: response.filename,
                }
            }
            Err(e) if e.is_unauthorized() => {
                self.reset();
                UploadOutcome::Unauthorized
            }
            Err(e) => {
                log::error!("❌ [UPLOAD] {} failed: {}", file.name, e);
                self.finish(UploadStatus::Failed);
                self.notifications.show(Notification::error(UPLOAD_FAILED_MESSAGE));
                UploadOutcome::Failed
            }
        }
    }

    fn begin(&self, file_name: &str) {
        self.notifications.dismiss();
        *self.task.borrow_mut() = UploadTask {
            file_name: Some(file_name.to_string()),
            progress_percent: 0,
            status: UploadStatus::InFlight,
        };
        log::info!("📤 [UPLOAD] Sending {}", file_name);
        self.notifier.notify();
    }

    /// Ignored outside `InFlight` and for values that would move backwards.
    /// Only progress listeners hear about it; the page is not re-rendered.
    pub fn report_progress(&self, percent: u8) {
        let percent = {
            let mut task = self.task.borrow_mut();
            if task.status != UploadStatus::InFlight || percent <= task.progress_percent {
                return;
            }
            task.progress_percent = percent.min(100);
            task.progress_percent
        };
        let listeners = self.progress_listeners.borrow().clone();
        for listener in listeners {
            listener(percent);
        }
    }

    fn finish(&self, status: UploadStatus) {
        self.task.borrow_mut().status = status;
        self.notifier.notify();
    }

    /// Back to `Idle`, forgetting the last file name and progress.
    pub fn reset(&self) {
        *self.task.borrow_mut() = UploadTask::default();
        self.notifier.notify();
    }

    /// Called on a new file selection.
    pub fn reset_if_terminal(&self) {
        if self.status().is_terminal() {
            self.reset();
        }
    }

    pub fn task(&self) -> UploadTask {
        self.task.borrow().clone()
    }

    pub fn status(&self) -> UploadStatus {
        self.task.borrow().status
    }

    pub fn progress(&self) -> u8 {
        self.task.borrow().progress_percent
    }

    pub fn is_in_flight(&self) -> bool {
        self.status() == UploadStatus::InFlight
    }
}
