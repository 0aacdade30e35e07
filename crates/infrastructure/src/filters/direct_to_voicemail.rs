use async_trait::async_trait;
use callguard_application::ports::{
    CallFilter, CallerInfoListener, CallerInfoLookupPort, FilterSession,
};
use callguard_domain::{Call, CallerAddress, CallerInfo, Verdict};
use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::{debug, info};

const SEND_TO_VOICEMAIL: Verdict = Verdict::new(false, true, true, true);

/// Rejects callers whose contact entry is marked "send to voicemail".
pub struct DirectToVoicemailFilter {
    lookup: Arc<dyn CallerInfoLookupPort>,
}

impl DirectToVoicemailFilter {
    pub fn new(lookup: Arc<dyn CallerInfoLookupPort>) -> Self {
        Self { lookup }
    }
}

/// Hands the first caller info for the expected address to the waiting filter.
struct FirstInfoListener {
    handle: CallerAddress,
    reply: Mutex<Option<oneshot::Sender<CallerInfo>>>,
}

impl CallerInfoListener for FirstInfoListener {
    fn on_caller_info_query_complete(&self, handle: &CallerAddress, info: &CallerInfo) {
        if handle != &self.handle {
            debug!("Caller info for a different address; ignoring");
            return;
        }
        let sender = match self.reply.lock() {
            Ok(mut slot) => slot.take(),
            Err(poisoned) => poisoned.into_inner().take(),
        };
        if let Some(sender) = sender {
            let _ = sender.send(info.clone());
        }
    }

    fn on_contact_photo_query_complete(&self, _handle: &CallerAddress, _info: &CallerInfo) {}
}

#[async_trait]
impl CallFilter for DirectToVoicemailFilter {
    async fn evaluate(&self, call: &Call, session: &FilterSession) -> Verdict {
        let (tx, rx) = oneshot::channel();
        let listener = Arc::new(FirstInfoListener {
            handle: call.handle.clone(),
            reply: Mutex::new(Some(tx)),
        });

        if !self.lookup.start_lookup(&call.handle, listener) {
            debug!(%session, "No caller info lookup possible; allowing call");
            return Verdict::PERMISSIVE_DEFAULT;
        }

        match rx.await {
            Ok(info) if info.should_send_to_voicemail => {
                info!(%session, "Contact is set to go straight to voicemail");
                SEND_TO_VOICEMAIL
            }
            Ok(_) => Verdict::PERMISSIVE_DEFAULT,
            Err(_) => {
                // The lookup was abandoned; leave it to the run deadline.
                debug!(%session, "Caller info lookup dropped without a result");
                std::future::pending().await
            }
        }
    }

    fn name(&self) -> &'static str {
        "direct_to_voicemail"
    }
}
