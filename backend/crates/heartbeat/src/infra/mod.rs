//! Infrastructure Layer
//!
//! HTTP implementation of the live-site collaborator.

pub mod dto;
pub mod http;
