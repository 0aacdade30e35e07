//! callguard domain layer
pub mod call;
pub mod caller_info;
pub mod config;
pub mod disposition;
pub mod errors;
pub mod verdict;

pub use call::{Call, CallId, CallerAddress};
pub use caller_info::{CallerInfo, PhotoData};
pub use config::{CliOverrides, Config, ConfigError};
pub use disposition::{CallDisposition, LogAction};
pub use errors::DomainError;
pub use verdict::Verdict;
