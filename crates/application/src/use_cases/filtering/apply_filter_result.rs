use crate::ports::CallCapacityPort;
use callguard_domain::{Call, CallDisposition, LogAction, Verdict};
use std::sync::Arc;
use tracing::{info, warn};

/// Turns a final verdict into what happens to the call.
pub struct ApplyFilterResultUseCase {
    capacity: Arc<dyn CallCapacityPort>,
    max_ringing_calls: usize,
    max_dialing_calls: usize,
}

impl ApplyFilterResultUseCase {
    pub fn new(
        capacity: Arc<dyn CallCapacityPort>,
        max_ringing_calls: usize,
        max_dialing_calls: usize,
    ) -> Self {
        Self {
            capacity,
            max_ringing_calls,
            max_dialing_calls,
        }
    }

    pub fn execute(&self, call: &Call, verdict: Verdict) -> CallDisposition {
        let at_capacity = self.has_maximum_ringing_calls() || self.has_maximum_dialing_calls();
        let disposition = CallDisposition::from_verdict(verdict, at_capacity);

        match disposition {
            CallDisposition::Ring => {
                info!(call_id = %call.id, "Incoming call allowed")
            }
            CallDisposition::RejectedAtCapacity => {
                info!(
                    call_id = %call.id,
                    ringing = self.capacity.ringing_calls(),
                    dialing = self.capacity.dialing_calls(),
                    "Call rejected: too many ringing or dialing calls"
                )
            }
            CallDisposition::Blocked { reject, log } => {
                if reject {
                    info!(call_id = %call.id, "Blocked call, rejecting");
                }
                match log {
                    LogAction::MissedCallLogged { notify } => {
                        info!(call_id = %call.id, notify, "Blocked call, adding to call log")
                    }
                    LogAction::NotifyOnly => {
                        info!(call_id = %call.id, "Blocked call, showing notification")
                    }
                    LogAction::None => {}
                }
                if !reject && !verdict.allow_call {
                    warn!(call_id = %call.id, "Call disallowed without reject; leaving it unanswered");
                }
            }
        }

        disposition
    }

    fn has_maximum_ringing_calls(&self) -> bool {
        self.capacity.ringing_calls() >= self.max_ringing_calls
    }

    fn has_maximum_dialing_calls(&self) -> bool {
        self.capacity.dialing_calls() >= self.max_dialing_calls
    }
}
