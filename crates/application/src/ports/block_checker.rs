use callguard_domain::DomainError;

/// Blocking query against the local block list.
///
/// Callers must not invoke this on an async worker thread.
pub trait BlockCheckerPort: Send + Sync {
    fn is_blocked(&self, number: &str) -> Result<bool, DomainError>;
}
