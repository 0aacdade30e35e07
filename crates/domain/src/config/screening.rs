use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ScreeningResponseConfig {
    #[default]
    Allow,
    Disallow {
        #[serde(default = "default_true")]
        reject: bool,
        #[serde(default = "default_true")]
        add_to_call_log: bool,
        #[serde(default = "default_true")]
        show_notification: bool,
    },
    /// The remote end faults while screening.
    Fault,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScreeningComponentConfig {
    pub package: String,

    pub class_name: String,

    #[serde(default = "default_true")]
    pub has_bind_permission: bool,

    #[serde(default)]
    pub response: ScreeningResponseConfig,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScreeningConfig {
    /// Package name of the default dialer, if any.
    #[serde(default)]
    pub default_handler: Option<String>,

    #[serde(default)]
    pub components: Vec<ScreeningComponentConfig>,
}

fn default_true() -> bool {
    true
}
