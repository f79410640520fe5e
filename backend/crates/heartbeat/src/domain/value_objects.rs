//! Domain Value Objects
//!
//! Immutable value types exchanged with the beacon endpoints.

use kernel::id::{RoomId, UserId};
use serde::Serialize;
use uuid::Uuid;

use crate::error::{HeartbeatError, HeartbeatResult};

/// Raw cookie string plus the device id and CSRF token extracted from it
///
/// Shared read-only by every session of a run.
#[derive(Debug, Clone)]
pub struct AuthCookies {
    raw: String,
    buvid: String,
    csrf: String,
}

impl AuthCookies {
    /// Fails with `MissingDeviceIdentity` when `LIVE_BUVID` is absent and
    /// with `MissingCsrfToken` when `bili_jct` is absent
    pub fn parse(raw: impl Into<String>) -> HeartbeatResult<Self> {
        let raw = raw.into();
        let buvid = platform::cookie::extract_device_id(&raw)
            .ok_or(HeartbeatError::MissingDeviceIdentity)?;
        let csrf = platform::cookie::extract_csrf(&raw).ok_or(HeartbeatError::MissingCsrfToken)?;
        Ok(Self { raw, buvid, csrf })
    }

    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// Value of `bili_jct`, echoed as `csrf` / `csrf_token`
    pub fn csrf(&self) -> &str {
        &self.csrf
    }

    /// Fresh device identity for one session
    pub fn new_device(&self) -> DeviceIdentity {
        DeviceIdentity::new(self.buvid.clone())
    }
}

/// `buvid` plus a per-session random id
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DeviceIdentity {
    pub buvid: String,
    pub session_uuid: String,
}

impl DeviceIdentity {
    pub fn new(buvid: String) -> Self {
        Self {
            buvid,
            session_uuid: Uuid::new_v4().to_string(),
        }
    }

    /// `["<buvid>","<uuid>"]`
    pub fn to_json(&self) -> String {
        serde_json::json!([self.buvid, self.session_uuid]).to_string()
    }
}

/// Room/area/sequence tuple sent as the beacon `id` field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoomTuple {
    pub parent_area_id: i64,
    pub area_id: i64,
    pub sequence: u64,
    pub room_id: RoomId,
}

impl RoomTuple {
    /// `[parent_area_id,area_id,sequence,room_id]`
    pub fn to_json(&self) -> String {
        serde_json::json!([
            self.parent_area_id,
            self.area_id,
            self.sequence,
            self.room_id.value()
        ])
        .to_string()
    }
}

/// Payload the auth code is computed over
///
/// Field order is part of the protocol: the server hashes the same JSON text.
#[derive(Debug, Clone, Serialize)]
pub struct BeaconPayload<'a> {
    platform: &'static str,
    parent_id: i64,
    area_id: i64,
    seq_id: u64,
    room_id: i64,
    buvid: &'a str,
    uuid: &'a str,
    ets: i64,
    time: i64,
    ts: i64,
}

impl<'a> BeaconPayload<'a> {
    pub fn new(room: &RoomTuple, device: &'a DeviceIdentity, ets: i64, time: i64, ts: i64) -> Self {
        Self {
            platform: "web",
            parent_id: room.parent_area_id,
            area_id: room.area_id,
            seq_id: room.sequence,
            room_id: room.room_id.value(),
            buvid: &device.buvid,
            uuid: &device.session_uuid,
            ets,
            time,
            ts,
        }
    }

    /// Compact JSON text in declaration order
    pub fn to_canonical_json(&self) -> HeartbeatResult<String> {
        serde_json::to_string(self)
            .map_err(|e| HeartbeatError::Internal(format!("payload serialization failed: {}", e)))
    }
}

/// Enter-room beacon (sequence 0)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnterBeacon {
    pub room: RoomTuple,
    pub device: DeviceIdentity,
    pub target_user_id: UserId,
    pub timestamp_ms: i64,
    pub is_patch: u8,
    /// Always an empty JSON array
    pub heart_beat: String,
}

impl EnterBeacon {
    pub fn new(room: RoomTuple, device: DeviceIdentity, target_user_id: UserId, timestamp_ms: i64) -> Self {
        Self {
            room,
            device,
            target_user_id,
            timestamp_ms,
            is_patch: 0,
            heart_beat: "[]".to_string(),
        }
    }
}

/// In-room beacon carrying the rolling auth code
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InRoomBeacon {
    pub auth_code: String,
    pub room: RoomTuple,
    pub device: DeviceIdentity,
    pub target_user_id: UserId,
    /// Server timestamp from the previous response
    pub ets: i64,
    /// Secret key from the previous response, sent as `benchmark`
    pub secret_key: String,
    /// Interval that was waited before this beat
    pub interval_secs: i64,
    pub timestamp_ms: i64,
}
