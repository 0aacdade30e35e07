use callguard_domain::Config;
use callguard_infrastructure::adapters::{
    ActiveCallCounter, FilePhotoLoader, InMemoryDirectory, StaticBlockList,
    StaticScreeningTransport,
};
use callguard_infrastructure::CallerInfoLookupCache;
use std::sync::Arc;
use tracing::info;

pub struct Adapters {
    pub block_list: Arc<StaticBlockList>,
    pub lookup_cache: Arc<CallerInfoLookupCache>,
    pub screening: Arc<StaticScreeningTransport>,
    pub call_counter: Arc<ActiveCallCounter>,
}

impl Adapters {
    pub fn new(config: &Config) -> Self {
        let block_list = Arc::new(StaticBlockList::from_config(&config.blocking));
        let directory = Arc::new(InMemoryDirectory::from_config(&config.directory));
        let lookup_cache = Arc::new(CallerInfoLookupCache::new(
            directory,
            Arc::new(FilePhotoLoader::new()),
        ));
        let screening = Arc::new(StaticScreeningTransport::from_config(&config.screening));

        info!(
            blocked_numbers = block_list.len(),
            contacts = config.directory.contacts.len(),
            screening_components = config.screening.components.len(),
            "Adapters initialized"
        );

        Self {
            block_list,
            lookup_cache,
            screening,
            call_counter: Arc::new(ActiveCallCounter::new()),
        }
    }
}
