//! # notifier-push
//!
//! Push delivery transport for the marketplace notifier. [`FcmTransport`]
//! implements [`notifier_core::traits::PushTransport`] on top of the
//! Firebase Cloud Messaging HTTP v1 API.

pub mod credentials;
pub mod fcm;
pub mod wire;

pub use credentials::AccessTokenProvider;
pub use fcm::FcmTransport;
