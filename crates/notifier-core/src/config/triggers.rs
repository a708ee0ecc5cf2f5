//! Change-event feed configuration.

use serde::{Deserialize, Serialize};

/// Settings for the document-change notification feed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    /// PostgreSQL NOTIFY channel the change triggers publish on.
    #[serde(default = "default_channel")]
    pub channel: String,
    /// Maximum number of handler invocations running at once.
    #[serde(default = "default_max_in_flight")]
    pub max_in_flight: usize,
}

impl Default for TriggerConfig {
    fn default() -> Self {
        Self {
            channel: default_channel(),
            max_in_flight: default_max_in_flight(),
        }
    }
}

fn default_channel() -> String {
    "marketplace_events".to_string()
}

fn default_max_in_flight() -> usize {
    32
}
