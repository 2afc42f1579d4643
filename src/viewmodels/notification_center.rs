// ============================================================================
// NOTIFICATION CENTER - Single transient toast with auto-dismiss
// ============================================================================

use std::cell::RefCell;
use std::rc::Rc;

use crate::models::Notification;
use crate::state::ChangeNotifier;
use crate::utils::{Scheduler, TimerHandle};

#[derive(Default)]
struct ToastSlot {
    current: Option<Notification>,
    generation: u64,
    timer: Option<TimerHandle>,
}

/// At most one notification is visible and at most one dismiss timer is
/// pending. Clones share the slot.
#[derive(Clone)]
pub struct NotificationCenter {
    slot: Rc<RefCell<ToastSlot>>,
    scheduler: Rc<dyn Scheduler>,
    ttl_ms: u32,
    notifier: ChangeNotifier,
}

impl NotificationCenter {
    pub fn new(scheduler: Rc<dyn Scheduler>, ttl_ms: u32, notifier: ChangeNotifier) -> Self {
        Self {
            slot: Rc::new(RefCell::new(ToastSlot::default())),
            scheduler,
            ttl_ms,
            notifier,
        }
    }

    /// Replaces the visible notification and restarts the countdown.
    pub fn show(&self, notification: Notification) {
        log::info!("🔔 [NOTIFY] {:?}: {}", notification.kind, notification.message);

        let generation = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            slot.current = Some(notification);
            slot.generation
        };

        let slot = Rc::downgrade(&self.slot);
        let notifier = self.notifier.clone();
        let timer = self.scheduler.schedule(
            self.ttl_ms,
            Box::new(move || {
                let Some(slot) = slot.upgrade() else {
                    return;
                };
                // A newer show() owns the slot now.
                let expired = {
                    let mut slot = slot.borrow_mut();
                    if slot.generation == generation {
                        slot.current = None;
                        true
                    } else {
                        false
                    }
                };
                if expired {
                    notifier.notify();
                }
            }),
        );

        // Dropping the previous handle cancels its timer.
        let previous = self.slot.borrow_mut().timer.replace(timer);
        drop(previous);
        self.notifier.notify();
    }

    pub fn dismiss(&self) {
        let (had_notification, timer) = {
            let mut slot = self.slot.borrow_mut();
            slot.generation += 1;
            (slot.current.take().is_some(), slot.timer.take())
        };
        drop(timer);
        if had_notification {
            self.notifier.notify();
        }
    }

    pub fn current(&self) -> Option<Notification> {
        self.slot.borrow().current.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ManualScheduler;

    fn center() -> (NotificationCenter, ManualScheduler) {
        let scheduler = ManualScheduler::new();
        let center = NotificationCenter::new(Rc::new(scheduler.clone()), 5_000, ChangeNotifier::new());
        (center, scheduler)
    }

    #[test]
    fn expires_after_ttl() {
        let (center, clock) = center();
        center.show(Notification::success("incidents.csv uploaded successfully."));

        clock.advance(4_999);
        assert!(center.current().is_some());
        clock.advance(1);
        assert_eq!(center.current(), None);
    }

    #[test]
    fn replacing_restarts_the_countdown() {
        let (center, clock) = center();
        center.show(Notification::error("Upload failed. Please try again."));
        clock.advance(3_000);
        center.show(Notification::success("b.csv uploaded successfully."));

        assert_eq!(clock.pending(), 1);
        clock.advance(3_000);
        assert_eq!(
            center.current().map(|n| n.message),
            Some("b.csv uploaded successfully.".to_string())
        );
        clock.advance(2_000);
        assert_eq!(center.current(), None);
    }

    #[test]
    fn dismiss_cancels_the_timer() {
        let (center, clock) = center();
        center.show(Notification::success("done"));
        center.dismiss();

        assert_eq!(center.current(), None);
        assert_eq!(clock.pending(), 0);
    }

    #[test]
    fn subscribers_hear_show_and_expiry() {
        let scheduler = ManualScheduler::new();
        let notifier = ChangeNotifier::new();
        let hits = Rc::new(std::cell::Cell::new(0));
        {
            let hits = hits.clone();
            notifier.subscribe(move || hits.set(hits.get() + 1));
        }
        let center = NotificationCenter::new(Rc::new(scheduler.clone()), 5_000, notifier);

        center.show(Notification::success("done"));
        scheduler.advance(5_000);
        assert_eq!(hits.get(), 2);
    }
}
