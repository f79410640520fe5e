//! Live Room Heartbeat Module
//!
//! Clean Architecture structure:
//! - `domain/` - Protocol entities, auth-code service, live-site trait
//! - `application/` - Use cases (room session, run orchestration, targets)
//! - `infra/` - HTTP implementation of the live-site trait
//!
//! ## Protocol Model
//! - A session enters a room once, then sends in-room beacons until its
//!   accumulated interval time reaches the target duration
//! - Each in-room beacon is signed with a keyed-hash chain whose key and
//!   rules come from the previous response
//! - A failed session is retried from scratch, never resumed

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;

// Re-exports for convenience
pub use application::collect_targets::CollectTargetsUseCase;
pub use application::config::{HeartbeatConfig, Topology};
pub use application::run_all::{RoomOutcome, RoomStatus, RunHeartbeatsUseCase, RunReport};
pub use domain::entities::RoomTarget;
pub use domain::value_objects::AuthCookies;
pub use error::{HeartbeatError, HeartbeatResult};
pub use infra::http::HttpLiveApi;

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};
