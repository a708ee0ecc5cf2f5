//! FCM HTTP v1 transport.
//!
//! The v1 API accepts one token per request, so a batch is fanned out as
//! concurrent requests whose results are collected back in token order.

use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use reqwest::{Client, StatusCode};
use tracing::{debug, warn};

use notifier_core::config::PushConfig;
use notifier_core::error::{AppError, ErrorKind};
use notifier_core::models::{DeliveryOutcome, DeliveryReport, PushMessage};
use notifier_core::result::AppResult;
use notifier_core::traits::PushTransport;

use crate::credentials::AccessTokenProvider;
use crate::wire::{self, ErrorResponse, SendRequest, SendResponse};

/// Result of one per-token request before batch-level classification.
#[derive(Debug)]
enum Attempt {
    /// The API answered for this token.
    Answered(DeliveryOutcome),
    /// The request never got an answer.
    Unreachable(String),
    /// The API rejected our credentials; applies to the whole batch.
    Unauthorized(StatusCode),
}

/// Push transport backed by Firebase Cloud Messaging.
#[derive(Debug)]
pub struct FcmTransport {
    client: Client,
    send_url: String,
    web_app_url: Option<String>,
    credentials: AccessTokenProvider,
    max_concurrent_sends: usize,
}

impl FcmTransport {
    /// Build a transport from configuration.
    pub fn new(config: &PushConfig) -> AppResult<Self> {
        if config.project_id.trim().is_empty() {
            return Err(AppError::configuration("push.project_id must be set"));
        }

        let client = Client::builder()
            .user_agent(concat!("marketplace-notifier/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| {
                AppError::with_source(ErrorKind::Configuration, "Failed to build HTTP client", e)
            })?;

        Ok(Self {
            send_url: send_url(&config.endpoint, &config.project_id),
            web_app_url: config.web_app_url.clone(),
            credentials: AccessTokenProvider::new(config.credentials.clone(), client.clone()),
            max_concurrent_sends: config.max_concurrent_sends.max(1),
            client,
        })
    }

    async fn send_one(
        &self,
        access_token: &str,
        message: &PushMessage,
        token: &str,
        link: Option<&str>,
    ) -> Attempt {
        let response = match self
            .client
            .post(&self.send_url)
            .bearer_auth(access_token)
            .json(&SendRequest::new(message, token, link))
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => return Attempt::Unreachable(e.to_string()),
        };

        let status = response.status();
        if status.is_success() {
            let message_id = response
                .json::<SendResponse>()
                .await
                .ok()
                .and_then(|r| r.name);
            return Attempt::Answered(DeliveryOutcome::Delivered { message_id });
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Attempt::Unauthorized(status);
        }

        let (code, detail) = match response.json::<ErrorResponse>().await {
            Ok(body) => (
                body.error.code().unwrap_or_else(|| status.as_str().to_string()),
                body.error.message.unwrap_or_default(),
            ),
            Err(_) => (status.as_str().to_string(), String::new()),
        };
        Attempt::Answered(DeliveryOutcome::failed(code, detail))
    }
}

#[async_trait]
impl PushTransport for FcmTransport {
    async fn send_batch(&self, message: &PushMessage) -> AppResult<DeliveryReport> {
        if message.tokens.is_empty() {
            return Ok(DeliveryReport::default());
        }

        let access_token = self.credentials.access_token().await?;
        let link = self
            .web_app_url
            .as_deref()
            .and_then(|base| wire::click_link(base, message));

        let sends: Vec<_> = message
            .tokens
            .iter()
            .map(|token| self.send_one(&access_token, message, token, link.as_deref()))
            .collect();
        let attempts: Vec<Attempt> = stream::iter(sends)
            .buffered(self.max_concurrent_sends)
            .collect()
            .await;

        let report = classify(attempts)?;
        debug!(
            tokens = report.outcomes.len(),
            succeeded = report.success_count(),
            failed = report.failure_count(),
            "FCM batch finished"
        );
        Ok(report)
    }

    fn name(&self) -> &str {
        "fcm"
    }
}

/// Turn per-token attempts into a report, or fail the batch as a whole
/// when credentials were rejected or any request went unanswered.
/// Unanswered requests are never reported as per-token failures.
fn classify(attempts: Vec<Attempt>) -> AppResult<DeliveryReport> {
    let mut outcomes = Vec::with_capacity(attempts.len());
    for attempt in attempts {
        match attempt {
            Attempt::Answered(outcome) => outcomes.push(outcome),
            Attempt::Unauthorized(status) => {
                return Err(AppError::external_service(format!(
                    "FCM rejected credentials ({status})"
                )));
            }
            Attempt::Unreachable(reason) => {
                warn!(error = %reason, "FCM request got no answer");
                return Err(AppError::external_service(format!(
                    "FCM unreachable: {reason}"
                )));
            }
        }
    }
    Ok(DeliveryReport::new(outcomes))
}

fn send_url(endpoint: &str, project_id: &str) -> String {
    format!(
        "{}/v1/projects/{}/messages:send",
        endpoint.trim_end_matches('/'),
        project_id
    )
}
