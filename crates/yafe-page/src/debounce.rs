//! Trailing-edge debounce.
//!
//! Search input and scroll-spy recomputation both run on a debounce: a
//! burst of triggers results in one firing, `delay_ms` after the last
//! trigger. Callers poll [`Debouncer::ready`] from their tick.

#[derive(Debug, Clone)]
pub struct Debouncer {
    delay_ms: u64,
    deadline: Option<u64>,
}

impl Debouncer {
    pub fn new(delay_ms: u64) -> Self {
        Debouncer {
            delay_ms,
            deadline: None,
        }
    }

    /// Arm (or re-arm) the debounce at `now_ms`. Each trigger pushes the
    /// deadline back by the full delay.
    pub fn trigger(&mut self, now_ms: u64) {
        self.deadline = Some(now_ms + self.delay_ms);
    }

    /// True exactly once, the first poll at or past the deadline.
    pub fn ready(&mut self, now_ms: u64) -> bool {
        match self.deadline {
            Some(deadline) if now_ms >= deadline => {
                self.deadline = None;
                true
            },
            _ => false,
        }
    }

    /// Whether a firing is armed and not yet consumed.
    pub fn pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// Disarm without firing.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }
}
