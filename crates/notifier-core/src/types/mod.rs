//! Core type definitions used across the notifier workspace.

pub mod id;

pub use id::*;
