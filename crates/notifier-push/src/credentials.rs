//! OAuth access tokens for the FCM API.

use chrono::{DateTime, Duration, Utc};
use reqwest::Client;
use serde::Deserialize;
use tokio::sync::RwLock;
use tracing::debug;

use notifier_core::config::CredentialsConfig;
use notifier_core::error::{AppError, ErrorKind};
use notifier_core::result::AppResult;

/// Refresh this long before the reported expiry.
const EXPIRY_MARGIN_SECONDS: i64 = 60;

/// Token endpoint response of the metadata server.
#[derive(Debug, Deserialize)]
struct MetadataToken {
    access_token: String,
    expires_in: i64,
}

#[derive(Debug, Clone)]
struct CachedToken {
    value: String,
    refresh_at: DateTime<Utc>,
}

impl CachedToken {
    fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.refresh_at
    }
}

/// Supplies bearer tokens for FCM requests.
#[derive(Debug)]
pub struct AccessTokenProvider {
    source: CredentialsConfig,
    client: Client,
    cached: RwLock<Option<CachedToken>>,
}

impl AccessTokenProvider {
    /// Create a provider for the configured credential source.
    pub fn new(source: CredentialsConfig, client: Client) -> Self {
        Self {
            source,
            client,
            cached: RwLock::new(None),
        }
    }

    /// Return a usable access token, fetching a new one if needed.
    pub async fn access_token(&self) -> AppResult<String> {
        let url = match &self.source {
            CredentialsConfig::Static { access_token } => {
                if access_token.trim().is_empty() {
                    return Err(AppError::configuration("Static FCM access token is empty"));
                }
                return Ok(access_token.clone());
            }
            CredentialsConfig::Metadata { url } => url,
        };

        let now = Utc::now();
        if let Some(token) = self.cached.read().await.as_ref() {
            if token.is_fresh(now) {
                return Ok(token.value.clone());
            }
        }

        let mut cached = self.cached.write().await;
        if let Some(token) = cached.as_ref() {
            if token.is_fresh(Utc::now()) {
                return Ok(token.value.clone());
            }
        }

        let token = self.fetch_metadata_token(url).await?;
        let value = token.value.clone();
        *cached = Some(token);
        Ok(value)
    }

    async fn fetch_metadata_token(&self, url: &str) -> AppResult<CachedToken> {
        debug!("Fetching FCM access token from metadata server");

        let response = self
            .client
            .get(url)
            .header("Metadata-Flavor", "Google")
            .send()
            .await
            .map_err(|e| {
                AppError::with_source(
                    ErrorKind::ExternalService,
                    "Metadata server unreachable",
                    e,
                )
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::external_service(format!(
                "Metadata server returned {status}"
            )));
        }

        let token: MetadataToken = response.json().await.map_err(|e| {
            AppError::with_source(
                ErrorKind::ExternalService,
                "Malformed metadata token response",
                e,
            )
        })?;

        Ok(CachedToken {
            value: token.access_token,
            refresh_at: refresh_deadline(Utc::now(), token.expires_in),
        })
    }
}

fn refresh_deadline(issued: DateTime<Utc>, expires_in: i64) -> DateTime<Utc> {
    issued + Duration::seconds((expires_in - EXPIRY_MARGIN_SECONDS).max(0))
}
