use std::time::Duration;

/// What a state machine wants done with its timer after an operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TimerDirective {
    /// Drop any running timer and start a fresh one with the full period.
    Restart(Duration),
    Cancel,
    Unchanged,
}

/// A running recurring timer that can be torn down.
pub trait TimerHandle {
    fn cancel(self);
}

/// Owns at most one live timer handle for a component.
///
/// The previous handle is always cancelled before a replacement is started,
/// so a stale interval can never fire after a manual navigation.
pub struct TimerSlot<H: TimerHandle> {
    active: Option<H>,
}

impl<H: TimerHandle> Default for TimerSlot<H> {
    fn default() -> Self {
        Self { active: None }
    }
}

impl<H: TimerHandle> TimerSlot<H> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self) -> bool {
        self.active.is_some()
    }

    pub fn clear(&mut self) {
        if let Some(handle) = self.active.take() {
            handle.cancel();
        }
    }

    /// Applies `directive`, calling `start` to create the replacement timer on restart.
    /// `start` may return `None` when the host refuses to schedule.
    pub fn apply<F>(&mut self, directive: TimerDirective, start: F)
    where
        F: FnOnce(Duration) -> Option<H>,
    {
        match directive {
            TimerDirective::Unchanged => {}
            TimerDirective::Cancel => self.clear(),
            TimerDirective::Restart(period) => {
                self.clear();
                self.active = start(period);
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
impl TimerHandle for tokio::task::JoinHandle<()> {
    fn cancel(self) {
        self.abort();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    struct CountingHandle {
        live: Rc<Cell<i32>>,
    }

    impl CountingHandle {
        fn start(live: &Rc<Cell<i32>>) -> Self {
            live.set(live.get() + 1);
            Self { live: live.clone() }
        }
    }

    impl TimerHandle for CountingHandle {
        fn cancel(self) {
            self.live.set(self.live.get() - 1);
        }
    }

    #[test]
    fn test_restart_never_leaves_two_live_timers() {
        let live = Rc::new(Cell::new(0));
        let mut slot = TimerSlot::new();

        for _ in 0..5 {
            slot.apply(TimerDirective::Restart(Duration::from_secs(5)), |_| {
                Some(CountingHandle::start(&live))
            });
            assert_eq!(live.get(), 1);
        }
        assert!(slot.is_running());
    }

    #[test]
    fn test_cancel_and_unchanged() {
        let live = Rc::new(Cell::new(0));
        let mut slot = TimerSlot::new();

        slot.apply(TimerDirective::Restart(Duration::from_secs(1)), |_| {
            Some(CountingHandle::start(&live))
        });
        slot.apply(TimerDirective::Unchanged, |_| -> Option<CountingHandle> {
            panic!("unchanged must not start a timer")
        });
        assert_eq!(live.get(), 1);

        slot.apply(TimerDirective::Cancel, |_| -> Option<CountingHandle> { None });
        assert_eq!(live.get(), 0);
        assert!(!slot.is_running());

        // cancelling an empty slot is harmless
        slot.clear();
        assert_eq!(live.get(), 0);
    }

    #[test]
    fn test_restart_passes_period_through() {
        let seen = Cell::new(Duration::ZERO);
        let mut slot: TimerSlot<CountingHandle> = TimerSlot::new();
        slot.apply(TimerDirective::Restart(Duration::from_millis(7000)), |period| {
            seen.set(period);
            None
        });
        assert_eq!(seen.get(), Duration::from_millis(7000));
        assert!(!slot.is_running());
    }
}
