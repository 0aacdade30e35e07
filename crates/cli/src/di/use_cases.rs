use super::Adapters;
use callguard_application::use_cases::{ApplyFilterResultUseCase, FilterIncomingCallUseCase};
use callguard_domain::Config;
use callguard_infrastructure::{
    AsyncBlockCheckFilter, CallScreeningServiceFilter, DirectToVoicemailFilter,
};
use std::sync::Arc;
use tracing::info;

pub struct UseCases {
    pub filter_incoming_call: Arc<FilterIncomingCallUseCase>,
    pub apply_filter_result: Arc<ApplyFilterResultUseCase>,
}

impl UseCases {
    pub fn new(config: &Config, adapters: &Adapters) -> Self {
        let mut filter_incoming_call =
            FilterIncomingCallUseCase::new(Arc::new(config.filtering.clone()))
                .with_filter(Arc::new(AsyncBlockCheckFilter::new(
                    adapters.block_list.clone(),
                )));

        if config.filtering.direct_to_voicemail_enabled {
            filter_incoming_call = filter_incoming_call.with_filter(Arc::new(
                DirectToVoicemailFilter::new(adapters.lookup_cache.clone()),
            ));
        }
        if config.filtering.call_screening_enabled {
            filter_incoming_call = filter_incoming_call.with_filter(Arc::new(
                CallScreeningServiceFilter::new(adapters.screening.clone()),
            ));
        }

        info!(
            filters = ?filter_incoming_call.filter_names(),
            timeout_ms = config.filtering.timeout_ms,
            "Call filtering configured"
        );

        Self {
            filter_incoming_call: Arc::new(filter_incoming_call),
            apply_filter_result: Arc::new(ApplyFilterResultUseCase::new(
                adapters.call_counter.clone(),
                config.filtering.max_ringing_calls,
                config.filtering.max_dialing_calls,
            )),
        }
    }
}
