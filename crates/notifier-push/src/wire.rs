//! FCM HTTP v1 request and response bodies.

use std::collections::BTreeMap;

use reqwest::Url;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use notifier_core::models::{NotificationType, PushMessage};

/// Body of `POST /v1/projects/{project}/messages:send`.
#[derive(Debug, Serialize)]
pub struct SendRequest<'a> {
    /// The single-token message.
    pub message: Message<'a>,
}

/// A message addressed to one device token.
#[derive(Debug, Serialize)]
pub struct Message<'a> {
    /// Target registration token.
    pub token: &'a str,
    /// Display part rendered by the OS or service worker.
    pub notification: Notification<'a>,
    /// Data part handed to the client app.
    pub data: &'a BTreeMap<String, String>,
    /// Web-specific options.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub webpush: Option<Webpush<'a>>,
}

/// Title and body.
#[derive(Debug, Serialize)]
pub struct Notification<'a> {
    /// Title line.
    pub title: &'a str,
    /// Body text.
    pub body: &'a str,
}

/// Web push options.
#[derive(Debug, Serialize)]
pub struct Webpush<'a> {
    /// FCM options for web clients.
    pub fcm_options: WebpushFcmOptions<'a>,
}

/// Click-through link for web notifications.
#[derive(Debug, Serialize)]
pub struct WebpushFcmOptions<'a> {
    /// Absolute HTTPS link opened on click.
    pub link: &'a str,
}

impl<'a> SendRequest<'a> {
    /// Build the request for one token of `message`.
    pub fn new(message: &'a PushMessage, token: &'a str, link: Option<&'a str>) -> Self {
        Self {
            message: Message {
                token,
                notification: Notification {
                    title: &message.title,
                    body: &message.body,
                },
                data: &message.data,
                webpush: link.map(|link| Webpush {
                    fcm_options: WebpushFcmOptions { link },
                }),
            },
        }
    }
}

/// Successful send response.
#[derive(Debug, Deserialize)]
pub struct SendResponse {
    /// Message resource name, `projects/*/messages/{id}`.
    pub name: Option<String>,
}

/// Error envelope returned for rejected sends.
#[derive(Debug, Deserialize)]
pub struct ErrorResponse {
    /// The error body.
    pub error: ErrorBody,
}

/// Google API error body.
#[derive(Debug, Deserialize)]
pub struct ErrorBody {
    /// Human-readable detail.
    #[serde(default)]
    pub message: Option<String>,
    /// Canonical status, e.g. `NOT_FOUND`.
    #[serde(default)]
    pub status: Option<String>,
    /// Typed details; FCM adds one carrying `errorCode`.
    #[serde(default)]
    pub details: Vec<Value>,
}

impl ErrorBody {
    /// The most specific error code available: the FCM `errorCode`
    /// (e.g. `UNREGISTERED`) when present, else the canonical status.
    pub fn code(&self) -> Option<String> {
        self.details
            .iter()
            .filter(|d| {
                d.get("@type")
                    .and_then(Value::as_str)
                    .is_some_and(|t| t.ends_with("google.firebase.fcm.v1.FcmError"))
            })
            .find_map(|d| d.get("errorCode").and_then(Value::as_str))
            .map(str::to_string)
            .or_else(|| self.status.clone())
    }
}

/// Click-through link for a payload, routed on its `type` discriminator.
pub fn click_link(base: &str, message: &PushMessage) -> Option<String> {
    let (path, key) = match message.notification_type()? {
        NotificationType::Order => ("orders", "orderId"),
        NotificationType::Chat => ("chat", "chatId"),
        NotificationType::Specialist => ("specialists", "specialistId"),
    };
    let id = message.data.get(key)?;

    let mut url = Url::parse(base).ok()?;
    url.path_segments_mut()
        .ok()?
        .pop_if_empty()
        .push(path)
        .push(id);
    Some(url.into())
}
