use std::time::{Duration, Instant};

/// Coalesces bursts of calls into one delivery after `interval` of quiet.
///
/// The caller owns the clock: it arms a timer on [`Debouncer::deadline`] and
/// collects the action with [`Debouncer::take_due`] from the UI loop.
#[derive(Debug)]
pub struct Debouncer<A> {
    interval: Duration,
    pending: Option<Pending<A>>,
}

#[derive(Debug)]
struct Pending<A> {
    action: A,
    deadline: Instant,
}

impl<A> Debouncer<A> {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            pending: None,
        }
    }

    /// Replaces any pending action and restarts the interval from `now`.
    pub fn schedule(&mut self, action: A, now: Instant) {
        self.pending = Some(Pending {
            action,
            deadline: now + self.interval,
        });
    }

    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.pending.as_ref().map(|pending| pending.deadline)
    }

    pub fn take_due(&mut self, now: Instant) -> Option<A> {
        let due = self
            .pending
            .as_ref()
            .is_some_and(|pending| now >= pending.deadline);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.action)
    }
}
