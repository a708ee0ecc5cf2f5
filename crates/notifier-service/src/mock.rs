//! In-memory collaborators for development and testing.
//!
//! Enabled with the `mock` feature. Every double records what it was asked
//! to do so tests can assert on side effects.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;

use notifier_core::error::AppError;
use notifier_core::models::{
    Chat, DeliveryOutcome, DeliveryReport, NotificationPreferences, PushMessage, UserProfile,
};
use notifier_core::result::AppResult;
use notifier_core::traits::{ChatStore, ProfileStore, PushTransport};
use notifier_core::types::{ChatId, UserId};

/// Profile store backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryProfileStore {
    profiles: Mutex<HashMap<UserId, UserProfile>>,
    failing: Mutex<HashSet<UserId>>,
    writes: Mutex<Vec<(UserId, Vec<String>)>>,
    read_only: AtomicBool,
}

impl InMemoryProfileStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a profile with push enabled by default.
    pub fn profile(id: &str, name: Option<&str>, tokens: &[&str]) -> UserProfile {
        UserProfile {
            id: UserId::new(id),
            name: name.map(str::to_string),
            device_tokens: tokens.iter().map(|t| t.to_string()).collect(),
            notification_preferences: NotificationPreferences::default(),
        }
    }

    /// Store or replace a profile.
    pub fn insert(&self, profile: UserProfile) {
        let mut profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        profiles.insert(profile.id.clone(), profile);
    }

    /// Make every read of `id` fail with a database error.
    pub fn fail_lookups_for(&self, id: &str) {
        let mut failing = self.failing.lock().unwrap_or_else(|e| e.into_inner());
        failing.insert(UserId::new(id));
    }

    /// Make every token write fail.
    pub fn fail_writes(&self, fail: bool) {
        self.read_only.store(fail, Ordering::SeqCst);
    }

    /// Current state of a stored profile.
    pub fn get_profile(&self, id: &str) -> Option<UserProfile> {
        let profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        profiles.get(&UserId::new(id)).cloned()
    }

    /// Every token list written so far, in call order.
    pub fn token_writes(&self) -> Vec<(UserId, Vec<String>)> {
        self.writes.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl ProfileStore for InMemoryProfileStore {
    async fn get(&self, id: &UserId) -> AppResult<Option<UserProfile>> {
        if self
            .failing
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains(id)
        {
            return Err(AppError::database(format!("Profile '{id}' is unreadable")));
        }
        let profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        Ok(profiles.get(id).cloned())
    }

    async fn set_device_tokens(&self, id: &UserId, tokens: &[String]) -> AppResult<()> {
        if self.read_only.load(Ordering::SeqCst) {
            return Err(AppError::database(format!("Profile '{id}' is read-only")));
        }
        let mut profiles = self.profiles.lock().unwrap_or_else(|e| e.into_inner());
        let profile = profiles
            .get_mut(id)
            .ok_or_else(|| AppError::not_found(format!("Profile '{id}' not found")))?;
        profile.device_tokens = tokens.to_vec();

        let mut writes = self.writes.lock().unwrap_or_else(|e| e.into_inner());
        writes.push((id.clone(), tokens.to_vec()));
        Ok(())
    }
}

/// Chat store backed by a map.
#[derive(Debug, Default)]
pub struct InMemoryChatStore {
    chats: Mutex<HashMap<ChatId, Chat>>,
    unavailable: AtomicBool,
}

impl InMemoryChatStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store a chat with the given participants.
    pub fn insert(&self, id: &str, participants: &[&str]) {
        let chat = Chat {
            id: ChatId::new(id),
            participants: participants.iter().map(|p| UserId::new(*p)).collect(),
        };
        let mut chats = self.chats.lock().unwrap_or_else(|e| e.into_inner());
        chats.insert(chat.id.clone(), chat);
    }

    /// Make every read fail.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }
}

#[async_trait]
impl ChatStore for InMemoryChatStore {
    async fn get(&self, id: &ChatId) -> AppResult<Option<Chat>> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::service_unavailable("Chat store unavailable"));
        }
        let chats = self.chats.lock().unwrap_or_else(|e| e.into_inner());
        Ok(chats.get(id).cloned())
    }
}

/// Transport that records every batch instead of sending it.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    sent: Mutex<Vec<PushMessage>>,
    failing_tokens: Mutex<HashSet<String>>,
    unavailable: AtomicBool,
}

impl RecordingTransport {
    /// Create a transport where every token succeeds.
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `token` as unregistered on every send.
    pub fn fail_token(&self, token: &str) {
        let mut failing = self.failing_tokens.lock().unwrap_or_else(|e| e.into_inner());
        failing.insert(token.to_string());
    }

    /// Fail whole batches instead of sending them.
    pub fn set_unavailable(&self, unavailable: bool) {
        self.unavailable.store(unavailable, Ordering::SeqCst);
    }

    /// Every batch accepted so far.
    pub fn sent(&self) -> Vec<PushMessage> {
        self.sent.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[async_trait]
impl PushTransport for RecordingTransport {
    async fn send_batch(&self, message: &PushMessage) -> AppResult<DeliveryReport> {
        if self.unavailable.load(Ordering::SeqCst) {
            return Err(AppError::external_service("Push transport unavailable"));
        }

        let failing = self.failing_tokens.lock().unwrap_or_else(|e| e.into_inner());
        let outcomes = message
            .tokens
            .iter()
            .enumerate()
            .map(|(idx, token)| {
                if failing.contains(token) {
                    DeliveryOutcome::failed(
                        "UNREGISTERED",
                        "Requested entity was not found.",
                    )
                } else {
                    DeliveryOutcome::Delivered {
                        message_id: Some(format!("mock/{idx}")),
                    }
                }
            })
            .collect();
        drop(failing);

        self.sent
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(message.clone());
        Ok(DeliveryReport::new(outcomes))
    }

    fn name(&self) -> &str {
        "recording"
    }
}
