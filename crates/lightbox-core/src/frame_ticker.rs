//! Owned, cancellable repeating frame ticks.
//!
//! Engines never register callbacks with a platform timer. Instead each engine
//! owns a [`TickerSlot`]; the host asks for the earliest deadline, sleeps until
//! then, and calls back in with the current time. Replacing the ticker in a
//! slot cancels the previous one, so a slot can never drive two animations.

use web_time::{Duration, Instant};

/// Upper bound on frames replayed by a single poll after the host stalled.
pub const MAX_CATCH_UP_FRAMES: u32 = 4;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TickerId(u64);

impl std::fmt::Display for TickerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "ticker#{}", self.0)
    }
}

/// A repeating tick at a fixed frame rate.
#[derive(Clone, Debug)]
pub struct FrameTicker {
    id: TickerId,
    interval: Duration,
    next_due: Instant,
}

impl FrameTicker {
    fn new(id: TickerId, now: Instant, frame_rate: f32) -> Self {
        let interval = frame_interval(frame_rate);
        Self {
            id,
            interval,
            next_due: now + interval,
        }
    }

    pub fn id(&self) -> TickerId {
        self.id
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    pub fn next_due(&self) -> Instant {
        self.next_due
    }

    /// Returns how many frames elapsed since the last poll, at most
    /// [`MAX_CATCH_UP_FRAMES`]. Frames beyond the cap are dropped rather than
    /// replayed later.
    pub fn poll(&mut self, now: Instant) -> u32 {
        if now < self.next_due {
            return 0;
        }
        let behind = now.saturating_duration_since(self.next_due);
        let elapsed = 1 + (behind.as_nanos() / self.interval.as_nanos().max(1)) as u64;
        let frames = elapsed.min(MAX_CATCH_UP_FRAMES as u64) as u32;
        if elapsed > MAX_CATCH_UP_FRAMES as u64 {
            self.next_due = now + self.interval;
        } else {
            self.next_due += self.interval * frames;
        }
        frames
    }
}

/// Converts a frame rate into a tick interval; non-positive rates clamp to 1 fps.
pub fn frame_interval(frame_rate: f32) -> Duration {
    let rate = if frame_rate.is_finite() && frame_rate > 0.0 {
        frame_rate
    } else {
        1.0
    };
    Duration::from_secs_f64(1.0 / rate as f64)
}

/// Holds at most one active [`FrameTicker`].
#[derive(Debug, Default)]
pub struct TickerSlot {
    active: Option<FrameTicker>,
    next_id: u64,
}

impl TickerSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a ticker, cancelling whatever the slot held before.
    pub fn replace(&mut self, now: Instant, frame_rate: f32) -> TickerId {
        self.next_id += 1;
        let id = TickerId(self.next_id);
        if let Some(previous) = self.active.take() {
            log::trace!("{} replaced by {}", previous.id, id);
        }
        self.active = Some(FrameTicker::new(id, now, frame_rate));
        id
    }

    /// Cancels the active ticker. Returns `true` if one was running.
    pub fn cancel(&mut self) -> bool {
        match self.active.take() {
            Some(ticker) => {
                log::trace!("{} cancelled", ticker.id);
                true
            }
            None => false,
        }
    }

    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    pub fn active_id(&self) -> Option<TickerId> {
        self.active.as_ref().map(FrameTicker::id)
    }

    pub fn next_due(&self) -> Option<Instant> {
        self.active.as_ref().map(FrameTicker::next_due)
    }

    /// Frames due at `now`; zero when nothing is scheduled.
    pub fn poll(&mut self, now: Instant) -> u32 {
        self.active.as_mut().map_or(0, |ticker| ticker.poll(now))
    }
}
