use async_trait::async_trait;
use callguard_domain::{Call, CallId, Verdict};

/// Correlation context for one filtering run.
///
/// Handed to every source and echoed back with its report. Only used to tie
/// log lines together; nothing branches on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FilterSession {
    pub call_id: CallId,
    pub run_id: u64,
}

impl FilterSession {
    pub fn new(call_id: CallId, run_id: u64) -> Self {
        Self { call_id, run_id }
    }
}

impl std::fmt::Display for FilterSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/run-{}", self.call_id, self.run_id)
    }
}

/// A decision source consulted for every incoming call.
///
/// Implementations resolve to exactly one verdict per call and must fold
/// their own failures into [`Verdict::PERMISSIVE_DEFAULT`]. A source that
/// never resolves is tolerated; the filtering deadline masks it.
#[async_trait]
pub trait CallFilter: Send + Sync {
    async fn evaluate(&self, call: &Call, session: &FilterSession) -> Verdict;

    fn name(&self) -> &'static str;
}
