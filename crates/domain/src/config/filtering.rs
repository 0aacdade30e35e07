use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilteringConfig {
    /// Overall budget for one filtering run, in milliseconds. When it runs out
    /// the call is let through with logging and notification enabled.
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    #[serde(default = "default_true")]
    pub direct_to_voicemail_enabled: bool,

    #[serde(default = "default_true")]
    pub call_screening_enabled: bool,

    /// Ringing calls allowed at once before new calls are rejected.
    #[serde(default = "default_max_ringing_calls")]
    pub max_ringing_calls: usize,

    #[serde(default = "default_max_dialing_calls")]
    pub max_dialing_calls: usize,
}

impl FilteringConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for FilteringConfig {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            direct_to_voicemail_enabled: true,
            call_screening_enabled: true,
            max_ringing_calls: default_max_ringing_calls(),
            max_dialing_calls: default_max_dialing_calls(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    5000
}

fn default_true() -> bool {
    true
}

fn default_max_ringing_calls() -> usize {
    1
}

fn default_max_dialing_calls() -> usize {
    1
}
