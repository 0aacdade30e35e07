use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContactConfig {
    pub number: String,

    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub send_to_voicemail: bool,

    /// `file://` URI of the contact photo.
    #[serde(default)]
    pub photo_uri: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DirectoryConfig {
    #[serde(default)]
    pub contacts: Vec<ContactConfig>,

    /// Artificial latency applied to every directory query, for exercising timeouts.
    #[serde(default)]
    pub query_delay_ms: u64,
}
