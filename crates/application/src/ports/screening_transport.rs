use async_trait::async_trait;
use callguard_domain::{Call, DomainError};

pub const BIND_SCREENING_SERVICE_PERMISSION: &str = "android.permission.BIND_SCREENING_SERVICE";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreeningComponent {
    pub package: String,
    pub class_name: String,
    pub permission: Option<String>,
}

impl ScreeningComponent {
    pub fn holds_bind_permission(&self) -> bool {
        self.permission.as_deref() == Some(BIND_SCREENING_SERVICE_PERMISSION)
    }
}

impl std::fmt::Display for ScreeningComponent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.package, self.class_name)
    }
}

/// Reply of a remote screening service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScreeningResponse {
    Allow,
    Disallow {
        reject: bool,
        add_to_call_log: bool,
        show_notification: bool,
    },
}

/// Binding and IPC to the default dialer's screening service.
#[async_trait]
pub trait ScreeningServiceTransport: Send + Sync {
    fn default_handler_package(&self) -> Option<String>;

    fn resolve_screening_component(&self, package: &str) -> Option<ScreeningComponent>;

    /// Binds `component` and forwards the call.
    ///
    /// Fails with `ScreeningBindFailed` when the bind is refused and with
    /// `ScreeningRemoteFault` when the remote end faults mid-call.
    async fn screen(
        &self,
        component: &ScreeningComponent,
        call: &Call,
    ) -> Result<ScreeningResponse, DomainError>;
}
