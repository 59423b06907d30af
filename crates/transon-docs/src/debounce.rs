//! Quiet-window debounce keyed on a tracked value.
//!
//! Used for the playground's scroll-into-view: the request is only issued once the
//! container reference has stopped changing for the configured window. Every `track`
//! re-arms the window and supersedes the previous arm; only the latest arm can fire.

/// Identifies one arm of a `Debounce`. Stale tokens never fire.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DebounceToken(u64);

#[derive(Debug)]
struct Pending<T> {
    value: T,
    due_at_ms: u64,
    token: DebounceToken,
}

#[derive(Debug)]
pub struct Debounce<T> {
    delay_ms: u64,
    generation: u64,
    pending: Option<Pending<T>>,
}

impl<T> Debounce<T> {
    pub fn new(delay_ms: u64) -> Self {
        Self {
            delay_ms,
            generation: 0,
            pending: None,
        }
    }

    pub fn delay_ms(&self) -> u64 {
        self.delay_ms
    }

    /// Record a new value of the tracked input, restarting the quiet window.
    pub fn track(&mut self, value: T, now_ms: u64) -> DebounceToken {
        self.generation += 1;
        let token = DebounceToken(self.generation);
        self.pending = Some(Pending {
            value,
            due_at_ms: now_ms + self.delay_ms,
            token,
        });
        token
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    pub fn due_at_ms(&self) -> Option<u64> {
        self.pending.as_ref().map(|pending| pending.due_at_ms)
    }

    /// Take the settled value if the quiet window has elapsed.
    pub fn take_due(&mut self, now_ms: u64) -> Option<T> {
        let due = matches!(&self.pending, Some(pending) if pending.due_at_ms <= now_ms);
        if !due {
            return None;
        }
        self.pending.take().map(|pending| pending.value)
    }

    /// Like `take_due`, but only for the arm identified by `token`.
    ///
    /// This is what a timer started for one arm calls when it wakes up.
    pub fn fire(&mut self, token: DebounceToken, now_ms: u64) -> Option<T> {
        let current = matches!(&self.pending, Some(pending) if pending.token == token);
        if !current {
            return None;
        }
        self.take_due(now_ms)
    }

    /// Drop the pending arm, e.g. when the owner is torn down.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}
