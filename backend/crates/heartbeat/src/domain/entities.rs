//! Domain Entities
//!
//! Rooms, fan medals and the rolling state of one heartbeat session.

use kernel::id::{RoomId, UserId};

use crate::domain::value_objects::RoomTuple;
use crate::error::{HeartbeatError, HeartbeatResult};

/// A room to watch, as supplied by the caller
///
/// `origin_room_id` may be a short id; it is only ever used for the room
/// lookup and for log lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomTarget {
    pub origin_room_id: RoomId,
    pub target_user_id: UserId,
    pub target_name: String,
}

impl RoomTarget {
    pub fn new(origin_room_id: RoomId, target_user_id: UserId, target_name: impl Into<String>) -> Self {
        Self {
            origin_room_id,
            target_user_id,
            target_name: target_name.into(),
        }
    }

    /// Pin this target to the room the lookup returned
    pub fn resolve(&self, info: &RoomInfo) -> ResolvedRoom {
        ResolvedRoom {
            origin_room_id: self.origin_room_id,
            room_id: info.room_id,
            parent_area_id: info.parent_area_id,
            area_id: info.area_id,
            target_user_id: self.target_user_id,
        }
    }
}

/// Result of the room-info lookup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomInfo {
    pub room_id: RoomId,
    pub parent_area_id: i64,
    pub area_id: i64,
    pub owner_id: UserId,
}

/// A target after lookup. Every beacon uses `room_id`, never the origin id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedRoom {
    pub origin_room_id: RoomId,
    pub room_id: RoomId,
    pub parent_area_id: i64,
    pub area_id: i64,
    pub target_user_id: UserId,
}

impl ResolvedRoom {
    /// `[parent_area_id, area_id, sequence, room_id]`
    pub fn tuple(&self, sequence: u64) -> RoomTuple {
        RoomTuple {
            parent_area_id: self.parent_area_id,
            area_id: self.area_id,
            sequence,
            room_id: self.room_id,
        }
    }
}

/// Beacon response: what the server wants for the next beat
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BeaconGrant {
    pub interval_secs: i64,
    pub server_timestamp: i64,
    pub secret_key: String,
    pub secret_rules: Vec<i64>,
}

impl BeaconGrant {
    fn checked(self) -> HeartbeatResult<Self> {
        if self.interval_secs <= 0 {
            return Err(HeartbeatError::ProtocolDesync(format!(
                "non-positive heartbeat_interval {}",
                self.interval_secs
            )));
        }
        Ok(self)
    }
}

/// Rolling state of one session
///
/// Never mutated in place: each beacon response produces a new value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionState {
    /// Sequence number of the next beacon to send
    pub sequence: u64,
    pub secret_key: String,
    pub secret_rules: Vec<i64>,
    pub next_interval_secs: i64,
    pub server_timestamp: i64,
    pub elapsed_secs: i64,
}

impl SessionState {
    /// State after the enter beacon (sequence 0) was accepted
    pub fn entered(grant: BeaconGrant) -> HeartbeatResult<Self> {
        let grant = grant.checked()?;
        Ok(Self {
            sequence: 1,
            secret_key: grant.secret_key,
            secret_rules: grant.secret_rules,
            next_interval_secs: grant.interval_secs,
            server_timestamp: grant.server_timestamp,
            elapsed_secs: 0,
        })
    }

    /// State after the in-room beacon for `self.sequence` was accepted
    pub fn advance(&self, grant: BeaconGrant) -> HeartbeatResult<Self> {
        let grant = grant.checked()?;
        Ok(Self {
            sequence: self.sequence + 1,
            secret_key: grant.secret_key,
            secret_rules: grant.secret_rules,
            next_interval_secs: grant.interval_secs,
            server_timestamp: grant.server_timestamp,
            elapsed_secs: self.elapsed_secs + self.next_interval_secs,
        })
    }

    pub fn is_complete(&self, target_secs: i64) -> bool {
        self.elapsed_secs >= target_secs
    }
}

/// What a completed session achieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSummary {
    pub room_id: RoomId,
    /// In-room beacons sent (the enter beacon is not counted)
    pub beats: u64,
    pub elapsed_secs: i64,
}

/// One fan medal from the user's medal list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FanMedal {
    pub medal_name: String,
    pub level: u32,
    pub room_id: RoomId,
    pub target_user_id: UserId,
    pub target_name: String,
}

impl FanMedal {
    pub fn to_target(&self) -> RoomTarget {
        RoomTarget::new(self.room_id, self.target_user_id, self.target_name.clone())
    }
}

/// One page of the medal list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MedalPage {
    pub current_page: u32,
    pub total_pages: u32,
    pub medals: Vec<FanMedal>,
}
