// ============================================================================
// DASHBOARD STATE - Predictions, hotspots and loading flag
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{Hotspot, Prediction};
use crate::state::ChangeNotifier;

/// Data slices rendered by the dashboard. Each list is swapped in one
/// assignment so consumers never see a partial update.
#[derive(Clone)]
pub struct DashboardState {
    pub predictions: Rc<RefCell<Vec<Prediction>>>,
    pub hotspots: Rc<RefCell<Vec<Hotspot>>>,
    pub loading: Rc<RefCell<bool>>,
    notifier: ChangeNotifier,
}

impl DashboardState {
    pub fn new(notifier: ChangeNotifier) -> Self {
        Self {
            predictions: Rc::new(RefCell::new(Vec::new())),
            hotspots: Rc::new(RefCell::new(Vec::new())),
            loading: Rc::new(RefCell::new(false)),
            notifier,
        }
    }

    pub fn set_predictions(&self, predictions: Vec<Prediction>) {
        *self.predictions.borrow_mut() = predictions;
        self.notifier.notify();
    }

    pub fn get_predictions(&self) -> Vec<Prediction> {
        self.predictions.borrow().clone()
    }

    pub fn set_hotspots(&self, hotspots: Vec<Hotspot>) {
        *self.hotspots.borrow_mut() = hotspots;
        self.notifier.notify();
    }

    pub fn get_hotspots(&self) -> Vec<Hotspot> {
        self.hotspots.borrow().clone()
    }

    pub fn set_loading(&self, loading: bool) {
        *self.loading.borrow_mut() = loading;
        self.notifier.notify();
    }

    pub fn get_loading(&self) -> bool {
        *self.loading.borrow()
    }

    pub fn has_data(&self) -> bool {
        !self.predictions.borrow().is_empty() || !self.hotspots.borrow().is_empty()
    }
}
