use super::incoming_call_filter::{FilterRunHandle, IncomingCallFilter};
use crate::ports::{CallFilter, CallFilterResultCallback, FilterSession, FilterTimeoutProvider};
use callguard_domain::Call;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Entry point for incoming calls: builds one [`IncomingCallFilter`] per call
/// over the configured decision sources.
pub struct FilterIncomingCallUseCase {
    filters: Vec<Arc<dyn CallFilter>>,
    timeouts: Arc<dyn FilterTimeoutProvider>,
    next_run_id: AtomicU64,
}

impl FilterIncomingCallUseCase {
    pub fn new(timeouts: Arc<dyn FilterTimeoutProvider>) -> Self {
        Self {
            filters: Vec::new(),
            timeouts,
            next_run_id: AtomicU64::new(1),
        }
    }

    pub fn with_filter(mut self, filter: Arc<dyn CallFilter>) -> Self {
        self.filters.push(filter);
        self
    }

    pub fn filter_names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Starts filtering `call` and returns immediately. `callback` fires once.
    pub fn execute(
        &self,
        call: Call,
        callback: Arc<dyn CallFilterResultCallback>,
    ) -> FilterRunHandle {
        let run_id = self.next_run_id.fetch_add(1, Ordering::Relaxed);
        let session = FilterSession::new(call.id, run_id);
        let timeout = self.timeouts.call_filter_timeout();

        IncomingCallFilter::new(call, self.filters.clone(), callback, timeout, session)
            .perform_filtering()
    }
}
