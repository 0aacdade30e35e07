use callguard_domain::{Call, Verdict};

/// Receives the final verdict of a filtering run. Invoked at most once per run.
pub trait CallFilterResultCallback: Send + Sync {
    fn on_call_filtering_complete(&self, call: &Call, verdict: Verdict);
}
