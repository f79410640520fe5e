//! Shared Kernel - Domain-crossing minimal core
//!
//! This crate contains the "smallest core" of vocabulary shared by every
//! task module talking to the live-streaming platform:
//! - Common error classification and result aliases
//! - Typed numeric identifiers (rooms, users)
//! - The platform-wide `{ code, message, data }` response envelope
//!
//! **Design Principle**: Only include things that are "hard to change"
//! and have consistent meaning across all domains.

pub mod error {
    pub mod app_error;
    pub mod kind;
}
pub mod envelope;
pub mod id;
