//! Traits for the external collaborators of the notification handlers.
//!
//! Defined in `notifier-core` and implemented by `notifier-database`
//! (stores) and `notifier-push` (transport). Handlers receive them as
//! `Arc<dyn ...>` so they can be exercised against in-memory doubles.

pub mod chat_store;
pub mod profile_store;
pub mod push_transport;

pub use chat_store::ChatStore;
pub use profile_store::ProfileStore;
pub use push_transport::PushTransport;
