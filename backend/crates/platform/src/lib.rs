//! Platform Crate - Technical Infrastructure
//!
//! This crate provides shared technical foundations:
//! - Cryptographic utilities (HMAC chains over MD5 / SHA-1 / SHA-2)
//! - Cookie string parsing
//! - Retry with fixed delay
//! - HTTP client construction

pub mod client;
pub mod cookie;
pub mod crypto;
pub mod retry;
