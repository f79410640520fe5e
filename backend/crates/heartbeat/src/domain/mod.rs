//! Domain Layer - Protocol rules and entities
//!
//! This layer contains:
//! - Domain entities (RoomTarget, SessionState, BeaconGrant)
//! - Domain value objects (AuthCookies, DeviceIdentity, beacon requests)
//! - Domain services (auth code computation)
//! - Repository traits (the live-site collaborator)

pub mod entities;
pub mod repository;
pub mod services;
pub mod value_objects;
