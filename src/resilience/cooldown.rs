//! Elapsed-time cooldown gate.
//!
//! After a cache failure the gate holds the cache "absent" for a fixed
//! interval before the next attempt is allowed. This is deliberately not a
//! full circuit breaker: no success/failure rates are tracked, only the
//! time since the last failure.

use std::sync::Mutex;
use std::time::{Duration, Instant};

/// Gate in front of an unreliable collaborator.
#[derive(Debug)]
pub struct CooldownGate {
    cooldown: Duration,
    failed_at: Mutex<Option<Instant>>,
}

impl CooldownGate {
    pub fn new(cooldown: Duration) -> Self {
        Self {
            cooldown,
            failed_at: Mutex::new(None),
        }
    }

    /// Whether an attempt is currently allowed.
    pub fn available(&self) -> bool {
        match *self.failed_at.lock().expect("cooldown gate poisoned") {
            Some(failed_at) => failed_at.elapsed() >= self.cooldown,
            None => true,
        }
    }

    /// Record a failed attempt, closing the gate for the cooldown interval.
    pub fn record_failure(&self) {
        *self.failed_at.lock().expect("cooldown gate poisoned") = Some(Instant::now());
    }

    /// Record a successful attempt, fully reopening the gate.
    pub fn record_success(&self) {
        *self.failed_at.lock().expect("cooldown gate poisoned") = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_open() {
        let gate = CooldownGate::new(Duration::from_secs(5));
        assert!(gate.available());
    }

    #[test]
    fn closes_on_failure_and_reopens_after_cooldown() {
        let gate = CooldownGate::new(Duration::from_millis(20));
        gate.record_failure();
        assert!(!gate.available());
        std::thread::sleep(Duration::from_millis(25));
        assert!(gate.available());
    }

    #[test]
    fn success_reopens_immediately() {
        let gate = CooldownGate::new(Duration::from_secs(60));
        gate.record_failure();
        assert!(!gate.available());
        gate.record_success();
        assert!(gate.available());
    }
}
