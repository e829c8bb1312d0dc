//! One-shot cancellable deadline.
//!
//! Follows the same "host polls with `now`" contract as [`crate::TickerSlot`]:
//! nothing fires on its own, the owner checks [`Deadline::fire_if_due`] from
//! its tick and reports [`Deadline::due_at`] for wait scheduling.

use web_time::{Duration, Instant};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Deadline {
    due: Option<Instant>,
}

impl Deadline {
    pub const fn new() -> Self {
        Self { due: None }
    }

    /// Arms the deadline `delay` after `now`, replacing any pending one.
    pub fn schedule(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Disarms the deadline. Returns `true` if one was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.due.is_some()
    }

    pub fn due_at(&self) -> Option<Instant> {
        self.due
    }

    /// Disarms and returns `true` once `now` reaches the deadline.
    pub fn fire_if_due(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if now >= due => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fires_once_at_deadline() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(start, Duration::from_secs(3));

        assert!(!deadline.fire_if_due(start + Duration::from_secs(2)));
        assert!(deadline.fire_if_due(start + Duration::from_secs(3)));
        assert!(!deadline.fire_if_due(start + Duration::from_secs(4)));
        assert!(!deadline.is_pending());
    }

    #[test]
    fn cancel_disarms() {
        let start = Instant::now();
        let mut deadline = Deadline::new();
        deadline.schedule(start, Duration::from_millis(10));
        assert!(deadline.cancel());
        assert!(!deadline.fire_if_due(start + Duration::from_secs(1)));
    }
}
