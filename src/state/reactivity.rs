// ============================================================================
// REACTIVITY - Subscribers notified whenever shared state changes
// ============================================================================

use std::cell::{Cell, RefCell};
use std::rc::Rc;

type Callback = Rc<dyn Fn()>;

/// Fan-out of "something changed" signals. Clones share subscribers.
#[derive(Clone, Default)]
pub struct ChangeNotifier {
    subscribers: Rc<RefCell<Vec<Callback>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&self, callback: F)
    where
        F: Fn() + 'static,
    {
        self.subscribers.borrow_mut().push(Rc::new(callback));
    }

    pub fn notify(&self) {
        // Snapshot first: a subscriber may subscribe again while running.
        let callbacks: Vec<Callback> = self.subscribers.borrow().clone();
        for callback in callbacks {
            callback();
        }
    }
}

/// Activation counter of a view. Every `begin` opens a new activation;
/// work started under an older one is stale even if the view is open again.
#[derive(Clone, Debug, Default)]
pub struct Liveness {
    generation: Rc<Cell<u64>>,
    live: Rc<Cell<bool>>,
}

impl Liveness {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn begin(&self) -> LiveToken {
        self.generation.set(self.generation.get() + 1);
        self.live.set(true);
        self.token()
    }

    pub fn end(&self) {
        self.generation.set(self.generation.get() + 1);
        self.live.set(false);
    }

    pub fn is_live(&self) -> bool {
        self.live.get()
    }

    /// Token of the current activation. Stale at once if nothing is live.
    pub fn token(&self) -> LiveToken {
        LiveToken {
            generation: self.generation.get(),
            source: self.clone(),
        }
    }
}

/// Captured before an await, checked after it.
#[derive(Clone, Debug)]
pub struct LiveToken {
    generation: u64,
    source: Liveness,
}

impl LiveToken {
    pub fn is_current(&self) -> bool {
        self.source.is_live() && self.source.generation.get() == self.generation
    }
}
