use callguard_domain::{CallerAddress, CallerInfo};
use std::sync::Arc;

/// Notified as a caller lookup progresses.
///
/// Callbacks run on the lookup cache's dispatch task, or synchronously
/// inside `start_lookup` when the info is already known. They must not block.
pub trait CallerInfoListener: Send + Sync {
    fn on_caller_info_query_complete(&self, handle: &CallerAddress, info: &CallerInfo);

    /// `info.cached_photo` is `None` when the photo could not be loaded.
    fn on_contact_photo_query_complete(&self, handle: &CallerAddress, info: &CallerInfo);
}

pub trait CallerInfoLookupPort: Send + Sync {
    /// Registers `listener` for updates about `handle` and returns immediately.
    ///
    /// Returns `false` without registering when `handle` carries no number.
    fn start_lookup(&self, handle: &CallerAddress, listener: Arc<dyn CallerInfoListener>) -> bool;
}
