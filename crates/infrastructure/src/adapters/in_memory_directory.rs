use super::number::normalize_number;
use async_trait::async_trait;
use callguard_application::ports::DirectoryQueryPort;
use callguard_domain::config::DirectoryConfig;
use callguard_domain::{CallerAddress, CallerInfo, DomainError};
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;
use tracing::debug;

/// Contact directory keyed by normalized number.
pub struct InMemoryDirectory {
    contacts: DashMap<String, CallerInfo, FxBuildHasher>,
    query_delay: Duration,
    queries: AtomicU64,
}

impl InMemoryDirectory {
    pub fn new() -> Self {
        Self {
            contacts: DashMap::with_hasher(FxBuildHasher),
            query_delay: Duration::ZERO,
            queries: AtomicU64::new(0),
        }
    }

    pub fn from_config(config: &DirectoryConfig) -> Self {
        let directory = Self::new().with_query_delay(Duration::from_millis(config.query_delay_ms));
        for contact in &config.contacts {
            directory.insert(
                &contact.number,
                CallerInfo {
                    name: contact.name.clone(),
                    phone_number: Some(contact.number.clone()),
                    contact_exists: true,
                    contact_display_photo_uri: contact.photo_uri.clone(),
                    should_send_to_voicemail: contact.send_to_voicemail,
                    cached_photo: None,
                },
            );
        }
        directory
    }

    pub fn with_query_delay(mut self, delay: Duration) -> Self {
        self.query_delay = delay;
        self
    }

    pub fn insert(&self, number: &str, info: CallerInfo) {
        self.contacts.insert(normalize_number(number), info);
    }

    pub fn query_count(&self) -> u64 {
        self.queries.load(Ordering::Relaxed)
    }
}

impl Default for InMemoryDirectory {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl DirectoryQueryPort for InMemoryDirectory {
    async fn query_caller_info(&self, handle: &CallerAddress) -> Result<CallerInfo, DomainError> {
        self.queries.fetch_add(1, Ordering::Relaxed);
        if !self.query_delay.is_zero() {
            tokio::time::sleep(self.query_delay).await;
        }

        let key = normalize_number(handle.scheme_specific_part());
        match self.contacts.get(&key) {
            Some(info) => Ok(info.clone()),
            None => {
                debug!("No contact for caller");
                Ok(CallerInfo::empty())
            }
        }
    }
}
