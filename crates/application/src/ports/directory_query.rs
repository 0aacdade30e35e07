use async_trait::async_trait;
use callguard_domain::{CallerAddress, CallerInfo, DomainError};

#[async_trait]
pub trait DirectoryQueryPort: Send + Sync {
    /// Looks up the contact for `handle`. A miss is `Ok(CallerInfo::empty())`.
    async fn query_caller_info(&self, handle: &CallerAddress) -> Result<CallerInfo, DomainError>;
}
