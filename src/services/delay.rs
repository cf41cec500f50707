//! One-shot delays polled from the event loop tick
//!
//! Simulated network latency is modelled as a [`Delay`] owned by whoever
//! scheduled it. The owner polls it on `Action::Tick` and cancels it on
//! teardown, so a late firing can never touch state that has gone away.

use std::time::{Duration, Instant};

/// A cancellable one-shot timer
#[derive(Debug, Clone)]
pub struct Delay {
    deadline: Instant,
    state: DelayState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DelayState {
    Pending,
    Fired,
    Cancelled,
}

impl Delay {
    /// Schedule a delay starting now
    pub fn after(duration: Duration) -> Self {
        Self::starting_at(Instant::now(), duration)
    }

    /// Schedule a delay starting at `start`
    pub fn starting_at(start: Instant, duration: Duration) -> Self {
        Self {
            deadline: start + duration,
            state: DelayState::Pending,
        }
    }

    /// Cancel the delay. Has no effect once it has fired.
    pub fn cancel(&mut self) {
        if self.state == DelayState::Pending {
            self.state = DelayState::Cancelled;
        }
    }

    /// Returns true exactly once, on the first poll at or after the deadline
    pub fn poll(&mut self, now: Instant) -> bool {
        if self.state == DelayState::Pending && now >= self.deadline {
            self.state = DelayState::Fired;
            return true;
        }
        false
    }
}

/// Poll an optional delay slot, clearing it when it fires
pub fn poll_slot(slot: &mut Option<Delay>, now: Instant) -> bool {
    let fired = slot.as_mut().is_some_and(|d| d.poll(now));
    if fired {
        *slot = None;
    }
    fired
}

/// Cancel and clear an optional delay slot
pub fn cancel_slot(slot: &mut Option<Delay>) {
    if let Some(mut delay) = slot.take() {
        delay.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_delay_fires_once_after_deadline() {
        let start = Instant::now();
        let mut delay = Delay::starting_at(start, Duration::from_millis(500));

        assert!(!delay.poll(start));
        assert!(!delay.poll(start + Duration::from_millis(499)));
        assert!(delay.poll(start + Duration::from_millis(500)));
        assert!(!delay.poll(start + Duration::from_millis(900)));
    }

    #[test]
    fn test_cancelled_delay_never_fires() {
        let start = Instant::now();
        let mut delay = Delay::starting_at(start, Duration::from_millis(10));
        delay.cancel();

        assert!(!delay.poll(start + Duration::from_secs(5)));
        // Cancelling again after the deadline changes nothing
        delay.cancel();
        assert!(!delay.poll(start + Duration::from_secs(6)));
    }

    #[test]
    fn test_poll_slot_clears_on_fire() {
        let start = Instant::now();
        let mut slot = Some(Delay::starting_at(start, Duration::from_millis(10)));

        assert!(!poll_slot(&mut slot, start));
        assert!(slot.is_some());
        assert!(poll_slot(&mut slot, start + Duration::from_millis(10)));
        assert!(slot.is_none());
        assert!(!poll_slot(&mut slot, start + Duration::from_millis(20)));
    }

    #[test]
    fn test_cancel_slot() {
        let mut slot = Some(Delay::after(Duration::from_millis(10)));
        cancel_slot(&mut slot);
        assert!(slot.is_none());
    }
}
