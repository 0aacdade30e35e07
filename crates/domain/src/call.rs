use crate::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CallId(pub u64);

impl std::fmt::Display for CallId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "TC@{}", self.0)
    }
}

/// URI-like caller address such as `tel:+15551234567` or `sip:alice@example.org`.
///
/// Equality and hashing use the full text, so `tel:123` and `sip:123` are
/// distinct lookup keys even though they share a scheme-specific part.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CallerAddress(Arc<str>);

impl CallerAddress {
    pub fn new(uri: impl Into<Arc<str>>) -> Self {
        Self(uri.into())
    }

    pub fn tel(number: &str) -> Self {
        Self(Arc::from(format!("tel:{}", number)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn scheme(&self) -> Option<&str> {
        self.0.split_once(':').map(|(scheme, _)| scheme)
    }

    /// Part after the scheme separator; the whole text when no scheme is present.
    pub fn scheme_specific_part(&self) -> &str {
        match self.0.split_once(':') {
            Some((_, ssp)) => ssp,
            None => &self.0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.scheme_specific_part().trim().is_empty()
    }
}

impl FromStr for CallerAddress {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DomainError::InvalidCallerAddress(s.to_string()));
        }
        Ok(Self::new(trimmed))
    }
}

impl std::fmt::Display for CallerAddress {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An incoming call as seen by the filtering core. Never mutated by it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub id: CallId,
    pub handle: CallerAddress,
}

impl Call {
    pub fn new(id: u64, handle: CallerAddress) -> Self {
        Self {
            id: CallId(id),
            handle,
        }
    }
}
