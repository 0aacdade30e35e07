use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BlockingConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Numbers compared against the caller's scheme-specific part.
    #[serde(default)]
    pub blocked_numbers: Vec<String>,
}

impl Default for BlockingConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            blocked_numbers: vec![],
        }
    }
}

fn default_true() -> bool {
    true
}
