//! Room Session Use Case
//!
//! One heartbeat session against one room:
//! `Created -> Entering -> Active -> Completed`, or `Failed` from any phase.
//! A session is never resumed; retries build a new one.

use std::time::Duration;

use platform::crypto::is_known_rule;

use crate::domain::entities::{ResolvedRoom, RoomTarget, SessionState, SessionSummary};
use crate::domain::repository::LiveApi;
use crate::domain::services::sign_beacon;
use crate::domain::value_objects::{
    AuthCookies, BeaconPayload, DeviceIdentity, EnterBeacon, InRoomBeacon,
};
use crate::error::{HeartbeatError, HeartbeatResult};

/// Phase of a room session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Created,
    Entering,
    Active,
    Completed,
    Failed,
}

/// Unknown rule codes are skipped when signing; surface them once per grant
fn warn_unknown_rules(room: &ResolvedRoom, rules: &[i64]) {
    let unknown: Vec<i64> = rules.iter().copied().filter(|r| !is_known_rule(*r)).collect();
    if !unknown.is_empty() {
        tracing::warn!(room_id = %room.room_id, ?unknown, "Secret rules contain unknown codes");
    }
}

/// Wall-clock milliseconds
fn now_ms() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

/// One heartbeat session
pub struct RoomSession<'a, A>
where
    A: LiveApi,
{
    api: &'a A,
    cookies: &'a AuthCookies,
    target: &'a RoomTarget,
    target_duration_secs: i64,
    phase: SessionPhase,
}

impl<'a, A> RoomSession<'a, A>
where
    A: LiveApi + Sync,
{
    pub fn new(
        api: &'a A,
        cookies: &'a AuthCookies,
        target: &'a RoomTarget,
        target_duration_secs: i64,
    ) -> Self {
        Self {
            api,
            cookies,
            target,
            target_duration_secs,
            phase: SessionPhase::Created,
        }
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    /// Run to completion, consuming the session
    pub async fn run_to_end(mut self) -> HeartbeatResult<SessionSummary> {
        self.run().await
    }

    /// Run until the target duration is reached or a call fails
    pub async fn run(&mut self) -> HeartbeatResult<SessionSummary> {
        let result = self.drive().await;
        match &result {
            Ok(summary) => {
                self.transition(SessionPhase::Completed);
                tracing::info!(
                    room_id = %summary.room_id,
                    beats = summary.beats,
                    elapsed_secs = summary.elapsed_secs,
                    "Room session completed"
                );
            }
            Err(e) => {
                self.transition(SessionPhase::Failed);
                e.log();
            }
        }
        result
    }

    async fn drive(&mut self) -> HeartbeatResult<SessionSummary> {
        let origin = self.target.origin_room_id;
        let info = self
            .api
            .room_info(self.cookies, origin)
            .await
            .map_err(|e| match e {
                err @ HeartbeatError::RoomResolutionFailed { .. } => err,
                other => HeartbeatError::room_resolution(origin, other),
            })?;
        let room = self.target.resolve(&info);
        tracing::debug!(
            origin_room_id = %origin,
            room_id = %room.room_id,
            short_id = origin.is_short(),
            "Resolved room"
        );
        let device = self.cookies.new_device();
        tracing::info!(
            room_id = %room.room_id,
            origin_room_id = %origin,
            target = %self.target.target_name,
            "Room session started"
        );

        self.transition(SessionPhase::Entering);
        let mut state = self.enter(&room, &device).await?;

        self.transition(SessionPhase::Active);
        let mut beats = 0u64;
        while !state.is_complete(self.target_duration_secs) {
            state = self.beat(&room, &device, &state).await?;
            beats += 1;
        }

        Ok(SessionSummary {
            room_id: room.room_id,
            beats,
            elapsed_secs: state.elapsed_secs,
        })
    }

    async fn enter(
        &self,
        room: &ResolvedRoom,
        device: &DeviceIdentity,
    ) -> HeartbeatResult<SessionState> {
        let beacon = EnterBeacon::new(room.tuple(0), device.clone(), room.target_user_id, now_ms());
        let grant = self.api.enter_room(self.cookies, &beacon).await?;
        tracing::debug!(
            room_id = %room.room_id,
            interval_secs = grant.interval_secs,
            "Entered room"
        );
        warn_unknown_rules(room, &grant.secret_rules);
        SessionState::entered(grant)
    }

    async fn beat(
        &self,
        room: &ResolvedRoom,
        device: &DeviceIdentity,
        state: &SessionState,
    ) -> HeartbeatResult<SessionState> {
        tokio::time::sleep(Duration::from_secs(state.next_interval_secs.unsigned_abs())).await;

        let tuple = room.tuple(state.sequence);
        let ts = now_ms();
        let payload = BeaconPayload::new(
            &tuple,
            device,
            state.server_timestamp,
            state.next_interval_secs,
            ts,
        );
        let auth_code = sign_beacon(&payload, &state.secret_key, &state.secret_rules)?;

        let beacon = InRoomBeacon {
            auth_code,
            room: tuple,
            device: device.clone(),
            target_user_id: room.target_user_id,
            ets: state.server_timestamp,
            secret_key: state.secret_key.clone(),
            interval_secs: state.next_interval_secs,
            timestamp_ms: ts,
        };
        let grant = self.api.in_room(self.cookies, &beacon).await?;
        tracing::debug!(
            room_id = %room.room_id,
            sequence = state.sequence,
            elapsed_secs = state.elapsed_secs + state.next_interval_secs,
            "Heartbeat sent"
        );
        warn_unknown_rules(room, &grant.secret_rules);
        state.advance(grant)
    }

    fn transition(&mut self, next: SessionPhase) {
        tracing::trace!(from = ?self.phase, to = ?next, room_id = %self.target.origin_room_id, "Session phase");
        self.phase = next;
    }
}
