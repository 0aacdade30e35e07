pub mod apply_filter_result;
pub mod filter_incoming_call;
pub mod incoming_call_filter;

pub use apply_filter_result::ApplyFilterResultUseCase;
pub use filter_incoming_call::FilterIncomingCallUseCase;
pub use incoming_call_filter::{FilterRunHandle, IncomingCallFilter};
