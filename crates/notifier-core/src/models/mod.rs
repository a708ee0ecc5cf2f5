//! Domain models read and written by the notification handlers.

pub mod chat;
pub mod order;
pub mod profile;
pub mod push;
pub mod review;

pub use chat::{Chat, ChatMessage};
pub use order::{Order, OrderStatus};
pub use profile::{NotificationPreferences, UserProfile};
pub use push::{DeliveryOutcome, DeliveryReport, NotificationType, PushMessage};
pub use review::Review;
