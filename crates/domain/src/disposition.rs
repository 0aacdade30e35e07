use crate::Verdict;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LogAction {
    None,
    MissedCallLogged { notify: bool },
    NotifyOnly,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CallDisposition {
    /// Call is let through and starts ringing.
    Ring,
    /// Allowed by the filters but there is no room for another ringing or dialing call.
    RejectedAtCapacity,
    Blocked { reject: bool, log: LogAction },
}

impl CallDisposition {
    pub fn from_verdict(verdict: Verdict, at_capacity: bool) -> Self {
        if verdict.allow_call && !verdict.reject {
            return if at_capacity {
                CallDisposition::RejectedAtCapacity
            } else {
                CallDisposition::Ring
            };
        }

        let log = if verdict.add_to_call_log {
            LogAction::MissedCallLogged {
                notify: verdict.show_notification,
            }
        } else if verdict.show_notification {
            LogAction::NotifyOnly
        } else {
            LogAction::None
        };

        CallDisposition::Blocked {
            reject: verdict.reject,
            log,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CallDisposition::Ring => "RING",
            CallDisposition::RejectedAtCapacity => "REJECTED_AT_CAPACITY",
            CallDisposition::Blocked { .. } => "BLOCKED",
        }
    }
}
