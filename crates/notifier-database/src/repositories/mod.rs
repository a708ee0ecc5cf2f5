//! Concrete repository implementations of the collaborator traits.

pub mod chat;
pub mod profile;

pub use chat::ChatRepository;
pub use profile::ProfileRepository;
