use callguard_domain::config::FilteringConfig;
use std::time::Duration;

pub trait FilterTimeoutProvider: Send + Sync {
    fn call_filter_timeout(&self) -> Duration;
}

impl FilterTimeoutProvider for FilteringConfig {
    fn call_filter_timeout(&self) -> Duration {
        self.timeout()
    }
}

impl FilterTimeoutProvider for Duration {
    fn call_filter_timeout(&self) -> Duration {
        *self
    }
}
