//! callguard infrastructure: decision sources, the caller info lookup cache
//! and in-memory adapters for the collaborator ports.
pub mod adapters;
pub mod caller_info;
pub mod filters;

pub use caller_info::CallerInfoLookupCache;
pub use filters::{AsyncBlockCheckFilter, CallScreeningServiceFilter, DirectToVoicemailFilter};
