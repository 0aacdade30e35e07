use async_trait::async_trait;
use callguard_application::ports::{BlockCheckerPort, CallFilter, FilterSession};
use callguard_domain::{Call, Verdict};
use std::sync::Arc;
use tracing::{debug, info, warn};

const BLOCKED: Verdict = Verdict::new(false, true, false, false);

/// Checks the caller against the local block list.
///
/// The block list query is blocking, so it runs on the blocking pool.
pub struct AsyncBlockCheckFilter {
    checker: Arc<dyn BlockCheckerPort>,
}

impl AsyncBlockCheckFilter {
    pub fn new(checker: Arc<dyn BlockCheckerPort>) -> Self {
        Self { checker }
    }
}

#[async_trait]
impl CallFilter for AsyncBlockCheckFilter {
    async fn evaluate(&self, call: &Call, session: &FilterSession) -> Verdict {
        let number = call.handle.scheme_specific_part().trim().to_string();
        if number.is_empty() {
            debug!(%session, "No number to check against the block list");
            return Verdict::PERMISSIVE_DEFAULT;
        }

        let checker = Arc::clone(&self.checker);
        match tokio::task::spawn_blocking(move || checker.is_blocked(&number)).await {
            Ok(Ok(true)) => {
                info!(%session, "Caller is on the block list");
                BLOCKED
            }
            Ok(Ok(false)) => {
                debug!(%session, "Caller is not blocked");
                Verdict::PERMISSIVE_DEFAULT
            }
            Ok(Err(e)) => {
                warn!(%session, error = %e, "Block list query failed; allowing call");
                Verdict::PERMISSIVE_DEFAULT
            }
            Err(e) => {
                warn!(%session, error = %e, "Block list task failed; allowing call");
                Verdict::PERMISSIVE_DEFAULT
            }
        }
    }

    fn name(&self) -> &'static str {
        "block_check"
    }
}
