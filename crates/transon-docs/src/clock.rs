//! Time sources for the debounced side effects.
//!
//! The browser viewer reads wall-clock time; tests and the CLI use `VirtualClock`,
//! which only advances when told to, so timer behaviour is fast and deterministic.

use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

pub trait Clock {
    /// Current time in milliseconds.
    fn now_ms(&self) -> u64;
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimerId(u64);

/// Entry for a pending one-shot timer.
#[derive(Debug, Clone)]
struct TimerEntry {
    fire_at_ms: u64,
    id: TimerId,
}

impl PartialEq for TimerEntry {
    fn eq(&self, other: &Self) -> bool {
        self.fire_at_ms == other.fire_at_ms && self.id == other.id
    }
}

impl Eq for TimerEntry {}

impl PartialOrd for TimerEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for TimerEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: earlier deadline first, then scheduling order
        other
            .fire_at_ms
            .cmp(&self.fire_at_ms)
            .then_with(|| other.id.0.cmp(&self.id.0))
    }
}

/// Controllable virtual time with one-shot timers.
#[derive(Debug, Default)]
pub struct VirtualClock {
    current_time_ms: u64,
    next_id: u64,
    pending_timers: BinaryHeap<TimerEntry>,
    cancelled: HashSet<TimerId>,
}

impl VirtualClock {
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedule a one-shot timer `delay_ms` from now.
    pub fn schedule(&mut self, delay_ms: u64) -> TimerId {
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.pending_timers.push(TimerEntry {
            fire_at_ms: self.current_time_ms + delay_ms,
            id,
        });
        id
    }

    pub fn cancel(&mut self, id: TimerId) {
        if self.pending_timers.iter().any(|entry| entry.id == id) {
            self.cancelled.insert(id);
        }
    }

    /// Advance virtual time and return the timers that fired, in firing order.
    pub fn advance_by(&mut self, ms: u64) -> Vec<TimerId> {
        let target_time = self.current_time_ms + ms;
        let mut fired = Vec::new();
        while let Some(entry) = self.pending_timers.peek() {
            if entry.fire_at_ms > target_time {
                break;
            }
            let Some(entry) = self.pending_timers.pop() else {
                break;
            };
            if !self.cancelled.remove(&entry.id) {
                fired.push(entry.id);
            }
        }
        self.current_time_ms = target_time;
        fired
    }

    pub fn has_pending_timers(&self) -> bool {
        self.pending_timers
            .iter()
            .any(|entry| !self.cancelled.contains(&entry.id))
    }

    /// Time until the next live timer fires, if any.
    pub fn time_to_next_timer(&self) -> Option<u64> {
        self.pending_timers
            .iter()
            .filter(|entry| !self.cancelled.contains(&entry.id))
            .map(|entry| entry.fire_at_ms.saturating_sub(self.current_time_ms))
            .min()
    }
}

impl Clock for VirtualClock {
    fn now_ms(&self) -> u64 {
        self.current_time_ms
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clock_starts_at_zero() {
        let clock = VirtualClock::new();
        assert_eq!(clock.now_ms(), 0);
    }

    #[test]
    fn advance_increases_time() {
        let mut clock = VirtualClock::new();
        clock.advance_by(1000);
        clock.advance_by(500);
        assert_eq!(clock.now_ms(), 1500);
    }

    #[test]
    fn timer_fires_once_at_deadline() {
        let mut clock = VirtualClock::new();
        let timer = clock.schedule(500);

        assert!(clock.advance_by(499).is_empty());
        assert_eq!(clock.advance_by(1), vec![timer]);
        assert!(!clock.has_pending_timers());
        assert!(clock.advance_by(1000).is_empty());
    }

    #[test]
    fn cancelled_timer_never_fires() {
        let mut clock = VirtualClock::new();
        let first = clock.schedule(500);
        clock.advance_by(200);
        clock.cancel(first);
        let second = clock.schedule(500);

        assert_eq!(clock.time_to_next_timer(), Some(500));
        assert!(clock.advance_by(300).is_empty());
        assert_eq!(clock.advance_by(200), vec![second]);
    }

    #[test]
    fn timers_fire_in_deadline_order() {
        let mut clock = VirtualClock::new();
        let late = clock.schedule(300);
        let early = clock.schedule(100);
        assert_eq!(clock.advance_by(1000), vec![early, late]);
    }
}
