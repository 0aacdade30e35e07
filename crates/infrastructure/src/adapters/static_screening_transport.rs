use async_trait::async_trait;
use callguard_application::ports::{
    ScreeningComponent, ScreeningResponse, ScreeningServiceTransport,
    BIND_SCREENING_SERVICE_PERMISSION,
};
use callguard_domain::config::{ScreeningConfig, ScreeningResponseConfig};
use callguard_domain::{Call, DomainError};
use std::collections::HashMap;
use tracing::debug;

/// Screening transport that answers from configuration instead of binding a
/// real service.
pub struct StaticScreeningTransport {
    default_handler: Option<String>,
    components: HashMap<String, (ScreeningComponent, ScreeningResponseConfig)>,
}

impl StaticScreeningTransport {
    pub fn from_config(config: &ScreeningConfig) -> Self {
        let components = config
            .components
            .iter()
            .map(|c| {
                let component = ScreeningComponent {
                    package: c.package.clone(),
                    class_name: c.class_name.clone(),
                    permission: c
                        .has_bind_permission
                        .then(|| BIND_SCREENING_SERVICE_PERMISSION.to_string()),
                };
                (c.package.clone(), (component, c.response))
            })
            .collect();

        Self {
            default_handler: config.default_handler.clone(),
            components,
        }
    }
}

#[async_trait]
impl ScreeningServiceTransport for StaticScreeningTransport {
    fn default_handler_package(&self) -> Option<String> {
        self.default_handler.clone()
    }

    fn resolve_screening_component(&self, package: &str) -> Option<ScreeningComponent> {
        self.components.get(package).map(|(c, _)| c.clone())
    }

    async fn screen(
        &self,
        component: &ScreeningComponent,
        call: &Call,
    ) -> Result<ScreeningResponse, DomainError> {
        let (_, response) = self.components.get(&component.package).ok_or_else(|| {
            DomainError::ScreeningBindFailed {
                component: component.to_string(),
            }
        })?;

        debug!(call_id = %call.id, component = %component, "Screening call");
        match *response {
            ScreeningResponseConfig::Allow => Ok(ScreeningResponse::Allow),
            ScreeningResponseConfig::Disallow {
                reject,
                add_to_call_log,
                show_notification,
            } => Ok(ScreeningResponse::Disallow {
                reject,
                add_to_call_log,
                show_notification,
            }),
            ScreeningResponseConfig::Fault => Err(DomainError::ScreeningRemoteFault {
                component: component.to_string(),
                reason: "configured fault".to_string(),
            }),
        }
    }
}
