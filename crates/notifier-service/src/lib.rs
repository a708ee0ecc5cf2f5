//! # notifier-service
//!
//! The notification protocol shared by every trigger: resolve the
//! recipient, run the guard sequence, compose the payload, send it, and
//! prune device tokens that failed delivery.
//!
//! Components follow constructor injection: stores and the transport are
//! handed in as `Arc<dyn ...>` at construction time, never reached through
//! global state.

pub mod composer;
pub mod content;
pub mod dispatcher;
pub mod guard;
pub mod handlers;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod outcome;
pub mod profiles;
pub mod reconciler;
pub mod resolver;

pub use composer::NotificationComposer;
pub use dispatcher::DeliveryDispatcher;
pub use handlers::NotificationHandlers;
pub use outcome::{DeliverySummary, HandlerOutcome, SkipReason};
pub use profiles::{DisplayName, ProfileAccessor};
pub use reconciler::TokenReconciler;
pub use resolver::{RecipientResolver, Resolution};
