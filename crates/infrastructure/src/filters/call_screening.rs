use async_trait::async_trait;
use callguard_application::ports::{
    CallFilter, FilterSession, ScreeningResponse, ScreeningServiceTransport,
};
use callguard_domain::{Call, DomainError, Verdict};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Asks the default dialer's screening service about the call.
///
/// Every way the service can be unavailable, and every remote fault, ends in
/// [`Verdict::PERMISSIVE_DEFAULT`]. A component without the bind permission is
/// treated the same as no component at all.
pub struct CallScreeningServiceFilter {
    transport: Arc<dyn ScreeningServiceTransport>,
}

impl CallScreeningServiceFilter {
    pub fn new(transport: Arc<dyn ScreeningServiceTransport>) -> Self {
        Self { transport }
    }
}

#[async_trait]
impl CallFilter for CallScreeningServiceFilter {
    async fn evaluate(&self, call: &Call, session: &FilterSession) -> Verdict {
        let Some(package) = self.transport.default_handler_package() else {
            let reason = DomainError::ScreeningServiceUnavailable("no default dialer".to_string());
            debug!(%session, error = %reason, "Skipping call screening");
            return Verdict::PERMISSIVE_DEFAULT;
        };

        let Some(component) = self.transport.resolve_screening_component(&package) else {
            let reason = DomainError::ScreeningServiceUnavailable(format!(
                "{} has no screening service",
                package
            ));
            debug!(%session, error = %reason, "Skipping call screening");
            return Verdict::PERMISSIVE_DEFAULT;
        };

        if !component.holds_bind_permission() {
            let reason = DomainError::ScreeningServiceUnavailable(format!(
                "{} does not require the bind permission",
                component
            ));
            warn!(%session, error = %reason, "Ignoring screening service");
            return Verdict::PERMISSIVE_DEFAULT;
        }

        match self.transport.screen(&component, call).await {
            Ok(ScreeningResponse::Allow) => {
                debug!(%session, component = %component, "Screening service allowed call");
                Verdict::PERMISSIVE_DEFAULT
            }
            Ok(ScreeningResponse::Disallow {
                reject,
                add_to_call_log,
                show_notification,
            }) => {
                info!(
                    %session,
                    component = %component,
                    reject,
                    add_to_call_log,
                    show_notification,
                    "Screening service disallowed call"
                );
                Verdict::new(false, reject, add_to_call_log, show_notification)
            }
            Err(e) => {
                warn!(%session, error = %e, "Call screening failed; allowing call");
                Verdict::PERMISSIVE_DEFAULT
            }
        }
    }

    fn name(&self) -> &'static str {
        "call_screening"
    }
}
