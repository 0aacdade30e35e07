use callguard_application::ports::CallCapacityPort;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Counts ringing and dialing calls. Whoever owns the call lifecycle reports
/// starts and ends; the counter only answers capacity queries.
#[derive(Debug, Default)]
pub struct ActiveCallCounter {
    ringing: AtomicUsize,
    dialing: AtomicUsize,
}

impl ActiveCallCounter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ringing_started(&self) {
        self.ringing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn ringing_ended(&self) {
        let _ = self
            .ringing
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }

    pub fn dialing_started(&self) {
        self.dialing.fetch_add(1, Ordering::Relaxed);
    }

    pub fn dialing_ended(&self) {
        let _ = self
            .dialing
            .fetch_update(Ordering::Relaxed, Ordering::Relaxed, |n| n.checked_sub(1));
    }
}

impl CallCapacityPort for ActiveCallCounter {
    fn ringing_calls(&self) -> usize {
        self.ringing.load(Ordering::Relaxed)
    }

    fn dialing_calls(&self) -> usize {
        self.dialing.load(Ordering::Relaxed)
    }
}
