mod block_checker;
mod call_capacity;
mod call_filter;
mod caller_info_lookup;
mod directory_query;
mod filter_result_callback;
mod filter_timeout;
mod photo_loader;
mod screening_transport;

pub use block_checker::BlockCheckerPort;
pub use call_capacity::CallCapacityPort;
pub use call_filter::{CallFilter, FilterSession};
pub use caller_info_lookup::{CallerInfoListener, CallerInfoLookupPort};
pub use directory_query::DirectoryQueryPort;
pub use filter_result_callback::CallFilterResultCallback;
pub use filter_timeout::FilterTimeoutProvider;
pub use photo_loader::PhotoLoaderPort;
pub use screening_transport::{
    ScreeningComponent, ScreeningResponse, ScreeningServiceTransport,
    BIND_SCREENING_SERVICE_PERMISSION,
};
