use serde::{Deserialize, Serialize};

/// Outcome of screening an incoming call.
///
/// The four flags are independent. `reject` is authoritative: a verdict with
/// both `allow_call` and `reject` set must still be rejected by the consumer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Verdict {
    pub allow_call: bool,
    pub reject: bool,
    pub add_to_call_log: bool,
    pub show_notification: bool,
}

impl Verdict {
    /// Identity element of [`Verdict::combine`].
    pub const PASS: Verdict = Verdict::new(true, false, false, false);

    /// Fail-open verdict used when a source is unavailable or the run times out.
    pub const PERMISSIVE_DEFAULT: Verdict = Verdict::new(true, false, true, true);

    pub const fn new(
        allow_call: bool,
        reject: bool,
        add_to_call_log: bool,
        show_notification: bool,
    ) -> Self {
        Self {
            allow_call,
            reject,
            add_to_call_log,
            show_notification,
        }
    }

    /// Merges two verdicts. Any disallow wins; any reject, log or notify wins.
    pub const fn combine(self, other: Verdict) -> Verdict {
        Verdict {
            allow_call: self.allow_call && other.allow_call,
            reject: self.reject || other.reject,
            add_to_call_log: self.add_to_call_log || other.add_to_call_log,
            show_notification: self.show_notification || other.show_notification,
        }
    }

    pub fn combine_all<I>(verdicts: I) -> Verdict
    where
        I: IntoIterator<Item = Verdict>,
    {
        verdicts.into_iter().fold(Verdict::PASS, Verdict::combine)
    }

    pub fn is_blocking(&self) -> bool {
        self.reject || !self.allow_call
    }
}

impl Default for Verdict {
    fn default() -> Self {
        Self::PASS
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[allow={}, reject={}, log={}, notify={}]",
            self.allow_call, self.reject, self.add_to_call_log, self.show_notification
        )
    }
}
