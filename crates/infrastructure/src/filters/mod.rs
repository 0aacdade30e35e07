pub mod block_check;
pub mod call_screening;
pub mod direct_to_voicemail;

pub use block_check::AsyncBlockCheckFilter;
pub use call_screening::CallScreeningServiceFilter;
pub use direct_to_voicemail::DirectToVoicemailFilter;
