use async_trait::async_trait;
use callguard_application::ports::{
    CallCapacityPort, CallFilter, CallFilterResultCallback, FilterSession,
};
use callguard_domain::{Call, CallerAddress, Verdict};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub fn make_call(id: u64) -> Call {
    Call::new(id, CallerAddress::tel("+15551234567"))
}

/// Resolves to a fixed verdict after an optional delay.
pub struct StaticFilter {
    verdict: Verdict,
    delay: Duration,
    calls: AtomicUsize,
    sessions: Mutex<Vec<FilterSession>>,
}

impl StaticFilter {
    pub fn new(verdict: Verdict) -> Self {
        Self::delayed(verdict, Duration::ZERO)
    }

    pub fn delayed(verdict: Verdict, delay: Duration) -> Self {
        Self {
            verdict,
            delay,
            calls: AtomicUsize::new(0),
            sessions: Mutex::new(Vec::new()),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn sessions(&self) -> Vec<FilterSession> {
        self.sessions.lock().unwrap().clone()
    }
}

#[async_trait]
impl CallFilter for StaticFilter {
    async fn evaluate(&self, _call: &Call, session: &FilterSession) -> Verdict {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.sessions.lock().unwrap().push(*session);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        self.verdict
    }

    fn name(&self) -> &'static str {
        "static"
    }
}

/// Never resolves.
pub struct HangingFilter;

#[async_trait]
impl CallFilter for HangingFilter {
    async fn evaluate(&self, _call: &Call, _session: &FilterSession) -> Verdict {
        std::future::pending::<Verdict>().await
    }

    fn name(&self) -> &'static str {
        "hanging"
    }
}

pub struct PanickingFilter;

#[async_trait]
impl CallFilter for PanickingFilter {
    async fn evaluate(&self, _call: &Call, _session: &FilterSession) -> Verdict {
        panic!("filter exploded")
    }

    fn name(&self) -> &'static str {
        "panicking"
    }
}

#[derive(Default)]
pub struct RecordingCallback {
    results: Mutex<Vec<(Call, Verdict)>>,
}

impl RecordingCallback {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn invocations(&self) -> usize {
        self.results.lock().unwrap().len()
    }

    pub fn results(&self) -> Vec<(Call, Verdict)> {
        self.results.lock().unwrap().clone()
    }
}

impl CallFilterResultCallback for RecordingCallback {
    fn on_call_filtering_complete(&self, call: &Call, verdict: Verdict) {
        self.results.lock().unwrap().push((call.clone(), verdict));
    }
}

pub struct MockCallCapacity {
    ringing: AtomicUsize,
    dialing: AtomicUsize,
}

impl MockCallCapacity {
    pub fn new(ringing: usize, dialing: usize) -> Self {
        Self {
            ringing: AtomicUsize::new(ringing),
            dialing: AtomicUsize::new(dialing),
        }
    }
}

impl CallCapacityPort for MockCallCapacity {
    fn ringing_calls(&self) -> usize {
        self.ringing.load(Ordering::SeqCst)
    }

    fn dialing_calls(&self) -> usize {
        self.dialing.load(Ordering::SeqCst)
    }
}
