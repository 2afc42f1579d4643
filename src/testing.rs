// ============================================================================
// TEST DOUBLES - Scripted transport, virtual clock, recording navigator
// ============================================================================

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::{Rc, Weak};

use async_trait::async_trait;
use futures::channel::mpsc::UnboundedSender;
use futures::channel::oneshot;
use futures::future::{FutureExt, Shared};

use crate::error::TransportError;
use crate::models::TransferProgress;
use crate::routing::{Navigator, Route};
use crate::services::transport::{HttpRequest, HttpResponse, HttpTransport, UploadRequest};
use crate::utils::{Scheduler, TimerHandle};

type Gate = Shared<oneshot::Receiver<()>>;

/// Answers by URL suffix (`"/predict"`, `"/upload"`, ...). Unknown URLs
/// fail at transport level.
#[derive(Default)]
pub struct FakeTransport {
    responses: RefCell<HashMap<String, HttpResponse>>,
    requests: RefCell<Vec<HttpRequest>>,
    uploads: RefCell<Vec<UploadRequest>>,
    upload_events: RefCell<Vec<(u64, u64)>>,
    request_gate: RefCell<Option<Gate>>,
    upload_gate: RefCell<Option<Gate>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, path: &str, status: u16, body: &str) {
        self.responses
            .borrow_mut()
            .insert(path.to_string(), HttpResponse::new(status, body));
    }

    pub fn set_upload_events(&self, events: Vec<(u64, u64)>) {
        *self.upload_events.borrow_mut() = events;
    }

    /// JSON requests stall until the returned sender fires (or drops).
    pub fn hold_requests(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.request_gate.borrow_mut() = Some(rx.shared());
        tx
    }

    /// Uploads emit their progress events, then stall until released.
    pub fn hold_uploads(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.upload_gate.borrow_mut() = Some(rx.shared());
        tx
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    pub fn uploads(&self) -> Vec<UploadRequest> {
        self.uploads.borrow().clone()
    }

    pub fn count(&self, path: &str) -> usize {
        self.requests
            .borrow()
            .iter()
            .filter(|request| request.url.ends_with(path))
            .count()
    }

    fn response_for(&self, url: &str) -> Result<HttpResponse, TransportError> {
        self.responses
            .borrow()
            .iter()
            .find(|(path, _)| url.ends_with(path.as_str()))
            .map(|(_, response)| response.clone())
            .ok_or_else(|| TransportError(format!("connection refused: {}", url)))
    }
}

#[async_trait(?Send)]
impl HttpTransport for FakeTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        // Answered as configured when the request was made.
        let response = self.response_for(&request.url);
        self.requests.borrow_mut().push(request);

        let gate = self.request_gate.borrow().clone();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        response
    }

    async fn upload(
        &self,
        request: UploadRequest,
        progress: UnboundedSender<TransferProgress>,
    ) -> Result<HttpResponse, TransportError> {
        let response = self.response_for(&request.url);
        self.uploads.borrow_mut().push(request);

        let events = self.upload_events.borrow().clone();
        for (loaded, total) in events {
            let _ = progress.unbounded_send(TransferProgress { loaded, total });
        }

        let gate = self.upload_gate.borrow().clone();
        if let Some(gate) = gate {
            let _ = gate.await;
        }
        drop(progress);
        response
    }
}

struct PendingTask {
    id: u64,
    due_ms: u64,
    task: Box<dyn FnOnce()>,
}

#[derive(Default)]
struct Clock {
    now_ms: u64,
    next_id: u64,
    tasks: Vec<PendingTask>,
}

/// Virtual clock: tasks only run inside [`ManualScheduler::advance`].
#[derive(Clone, Default)]
pub struct ManualScheduler {
    clock: Rc<RefCell<Clock>>,
}

struct CancelOnDrop {
    id: u64,
    clock: Weak<RefCell<Clock>>,
}

impl Drop for CancelOnDrop {
    fn drop(&mut self) {
        if let Some(clock) = self.clock.upgrade() {
            if let Ok(mut clock) = clock.try_borrow_mut() {
                clock.tasks.retain(|task| task.id != self.id);
            }
        }
    }
}

impl ManualScheduler {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.clock.borrow().tasks.len()
    }

    /// Moves the clock forward, running due tasks in order.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now_ms + ms;
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .tasks
                    .iter()
                    .enumerate()
                    .filter(|(_, task)| task.due_ms <= target)
                    .min_by_key(|(_, task)| (task.due_ms, task.id))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let task = clock.tasks.remove(index);
                    clock.now_ms = task.due_ms;
                    task
                })
            };
            match next {
                Some(pending) => (pending.task)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now_ms = target;
    }
}

impl Scheduler for ManualScheduler {
    fn schedule(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerHandle {
        let mut clock = self.clock.borrow_mut();
        let id = clock.next_id;
        clock.next_id += 1;
        let due_ms = clock.now_ms + u64::from(delay_ms);
        clock.tasks.push(PendingTask { id, due_ms, task });

        TimerHandle::new(CancelOnDrop {
            id,
            clock: Rc::downgrade(&self.clock),
        })
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    visits: RefCell<Vec<Route>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visits(&self) -> Vec<Route> {
        self.visits.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: Route) {
        self.visits.borrow_mut().push(route);
    }
}
