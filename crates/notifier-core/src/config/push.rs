//! Push delivery transport configuration.

use serde::{Deserialize, Serialize};

/// Settings for the FCM HTTP v1 push transport.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PushConfig {
    /// Firebase project that owns the registered device tokens.
    pub project_id: String,
    /// Base URL of the FCM API.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    /// Where OAuth access tokens for the API come from.
    pub credentials: CredentialsConfig,
    /// HTTPS origin of the web app; when set, web notifications carry a
    /// click-through link built from the payload's `type` discriminator.
    #[serde(default)]
    pub web_app_url: Option<String>,
    /// Upper bound on concurrent per-token requests within one batch.
    #[serde(default = "default_max_concurrent_sends")]
    pub max_concurrent_sends: usize,
}

/// Source of the bearer token used to authenticate against FCM.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum CredentialsConfig {
    /// A pre-issued access token, typically injected through the environment.
    Static {
        /// The OAuth 2.0 access token.
        access_token: String,
    },
    /// Tokens fetched from the compute metadata server and cached until expiry.
    Metadata {
        /// Token endpoint of the metadata server.
        #[serde(default = "default_metadata_url")]
        url: String,
    },
}

fn default_endpoint() -> String {
    "https://fcm.googleapis.com".to_string()
}

fn default_max_concurrent_sends() -> usize {
    16
}

fn default_metadata_url() -> String {
    "http://metadata.google.internal/computeMetadata/v1/instance/service-accounts/default/token"
        .to_string()
}
