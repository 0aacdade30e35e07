use super::number::normalize_number;
use callguard_application::ports::BlockCheckerPort;
use callguard_domain::config::BlockingConfig;
use callguard_domain::DomainError;
use std::collections::HashSet;
use std::sync::RwLock;

/// Block list held in memory, seeded from configuration.
pub struct StaticBlockList {
    enabled: bool,
    numbers: RwLock<HashSet<String>>,
}

impl StaticBlockList {
    pub fn new<I, S>(numbers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            enabled: true,
            numbers: RwLock::new(
                numbers
                    .into_iter()
                    .map(|n| normalize_number(n.as_ref()))
                    .collect(),
            ),
        }
    }

    pub fn from_config(config: &BlockingConfig) -> Self {
        Self {
            enabled: config.enabled,
            ..Self::new(&config.blocked_numbers)
        }
    }

    pub fn block(&self, number: &str) -> Result<bool, DomainError> {
        let mut numbers = self
            .numbers
            .write()
            .map_err(|e| DomainError::BlockCheckFailed(e.to_string()))?;
        Ok(numbers.insert(normalize_number(number)))
    }

    pub fn unblock(&self, number: &str) -> Result<bool, DomainError> {
        let mut numbers = self
            .numbers
            .write()
            .map_err(|e| DomainError::BlockCheckFailed(e.to_string()))?;
        Ok(numbers.remove(&normalize_number(number)))
    }

    pub fn len(&self) -> usize {
        self.numbers.read().map(|n| n.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl BlockCheckerPort for StaticBlockList {
    fn is_blocked(&self, number: &str) -> Result<bool, DomainError> {
        if !self.enabled {
            return Ok(false);
        }
        let numbers = self
            .numbers
            .read()
            .map_err(|e| DomainError::BlockCheckFailed(e.to_string()))?;
        Ok(numbers.contains(&normalize_number(number)))
    }
}
