//! Application Layer - Use Cases
//!
//! This layer drives the domain against the live-site collaborator.

pub mod collect_targets;
pub mod config;
pub mod room_session;
pub mod run_all;
