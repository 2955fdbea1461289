use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use gloo_timers::callback::Timeout;

use crate::clock::{self, Timestamp};

/// Keeps at most one wake-up armed for a controller's next due task.
///
/// The browser timer lives in the pump, so re-arming, cancelling or dropping
/// the pump clears the previous one.
#[derive(Default)]
pub struct TaskPump {
    timer: RefCell<Option<Timeout>>,
    armed_for: Cell<Option<Timestamp>>,
}

impl TaskPump {
    pub fn arm(self: &Rc<Self>, due: Option<Timestamp>, on_due: impl FnOnce() + 'static) {
        if due.is_some() && self.armed_for.get() == due {
            return;
        }

        self.armed_for.set(due);
        let Some(due) = due else {
            self.timer.borrow_mut().take();
            return;
        };

        let wait = due.millis_until(clock::now());
        let pump: Weak<Self> = Rc::downgrade(self);
        let timer = Timeout::new(wait, move || {
            let Some(pump) = pump.upgrade() else {
                return;
            };
            pump.armed_for.set(None);
            // Released before `on_due`, which usually re-arms.
            let fired = pump.timer.borrow_mut().take();
            on_due();
            drop(fired);
        });
        self.timer.replace(Some(timer));
    }

    pub fn cancel(&self) {
        self.timer.borrow_mut().take();
        self.armed_for.set(None);
    }
}
