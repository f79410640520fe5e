//! Run Heartbeats Use Case
//!
//! Runs one session per target with retries, in the configured topology,
//! and gathers a report. One failing room never stops the others.

use std::sync::Arc;

use kernel::error::{app_error::AppError, kind::ErrorKind};
use platform::retry::{SuccessMessage, retry};

use crate::application::config::{HeartbeatConfig, Topology};
use crate::application::room_session::RoomSession;
use crate::domain::entities::{RoomTarget, SessionSummary};
use crate::domain::repository::LiveApi;
use crate::domain::value_objects::AuthCookies;
use crate::error::{HeartbeatError, HeartbeatResult};

/// How one room ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoomStatus {
    Completed(SessionSummary),
    Failed { kind: ErrorKind, message: String },
}

/// Outcome for one target
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomOutcome {
    pub target: RoomTarget,
    pub status: RoomStatus,
}

impl RoomOutcome {
    fn failed(target: RoomTarget, err: AppError) -> Self {
        Self {
            target,
            status: RoomStatus::Failed {
                kind: err.kind(),
                message: err.message().to_string(),
            },
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self.status, RoomStatus::Completed(_))
    }

    /// One human-readable line for the run summary
    pub fn describe(&self) -> String {
        match &self.status {
            RoomStatus::Completed(summary) => format!(
                "{} (room {}): {} heartbeats, {}s watched",
                self.target.target_name, summary.room_id, summary.beats, summary.elapsed_secs
            ),
            RoomStatus::Failed { kind, message } => format!(
                "{} (room {}): {} {}",
                self.target.target_name, self.target.origin_room_id, kind, message
            ),
        }
    }
}

/// Outcomes of one run, in target order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    pub outcomes: Vec<RoomOutcome>,
}

impl RunReport {
    pub fn is_all_success(&self) -> bool {
        self.outcomes.iter().all(RoomOutcome::is_success)
    }

    pub fn succeeded(&self) -> impl Iterator<Item = &RoomOutcome> {
        self.outcomes.iter().filter(|o| o.is_success())
    }

    pub fn failed(&self) -> impl Iterator<Item = &RoomOutcome> {
        self.outcomes.iter().filter(|o| !o.is_success())
    }
}

/// Run Heartbeats Use Case
pub struct RunHeartbeatsUseCase<A>
where
    A: LiveApi,
{
    api: Arc<A>,
    config: Arc<HeartbeatConfig>,
}

impl<A> RunHeartbeatsUseCase<A>
where
    A: LiveApi + Sync + 'static,
{
    pub fn new(api: Arc<A>, config: Arc<HeartbeatConfig>) -> Self {
        Self { api, config }
    }

    /// Watch every target
    ///
    /// Only missing cookies fail the whole run; they are detected before
    /// any call is made.
    pub async fn execute(&self, cookies: &str, targets: Vec<RoomTarget>) -> HeartbeatResult<RunReport> {
        let cookies = Arc::new(AuthCookies::parse(cookies)?);
        Ok(self.run(cookies, targets).await)
    }

    /// Watch every target with already-validated cookies
    pub async fn run(&self, cookies: Arc<AuthCookies>, targets: Vec<RoomTarget>) -> RunReport {
        tracing::info!(
            rooms = targets.len(),
            topology = ?self.config.topology,
            target_secs = self.config.target_duration_secs(),
            "Starting heartbeat run"
        );

        let outcomes = match self.config.topology {
            Topology::Concurrent => self.run_concurrent(cookies, targets).await,
            Topology::Sequential => self.run_sequential(cookies, targets).await,
        };

        RunReport { outcomes }
    }

    async fn run_concurrent(&self, cookies: Arc<AuthCookies>, targets: Vec<RoomTarget>) -> Vec<RoomOutcome> {
        let mut handles = Vec::with_capacity(targets.len());
        for (index, target) in targets.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.session_stagger).await;
            }
            let handle = tokio::spawn(watch_room(
                self.api.clone(),
                self.config.clone(),
                cookies.clone(),
                target.clone(),
            ));
            handles.push((target, handle));
        }

        let mut outcomes = Vec::with_capacity(handles.len());
        for (target, handle) in handles {
            let outcome = match handle.await {
                Ok(outcome) => outcome,
                Err(e) => {
                    let err = HeartbeatError::Internal(format!("session task aborted: {}", e));
                    RoomOutcome::failed(target, err.into())
                }
            };
            outcomes.push(outcome);
        }
        outcomes
    }

    async fn run_sequential(&self, cookies: Arc<AuthCookies>, targets: Vec<RoomTarget>) -> Vec<RoomOutcome> {
        let mut outcomes = Vec::with_capacity(targets.len());
        for (index, target) in targets.into_iter().enumerate() {
            if index > 0 {
                tokio::time::sleep(self.config.session_stagger).await;
            }
            outcomes.push(
                watch_room(self.api.clone(), self.config.clone(), cookies.clone(), target).await,
            );
        }
        outcomes
    }
}

/// One target, retried as whole fresh sessions
async fn watch_room<A>(
    api: Arc<A>,
    config: Arc<HeartbeatConfig>,
    cookies: Arc<AuthCookies>,
    target: RoomTarget,
) -> RoomOutcome
where
    A: LiveApi + Sync + 'static,
{
    let api_ref: &A = &api;
    let cookies_ref: &AuthCookies = &cookies;
    let target_ref = &target;
    let target_secs = config.target_duration_secs();

    let result = retry(
        move || RoomSession::new(api_ref, cookies_ref, target_ref, target_secs).run_to_end(),
        &config.retry_policy(),
        SuccessMessage::render_with(|summary: &SessionSummary| {
            format!("Room {} session finished with {} heartbeats", summary.room_id, summary.beats)
        }),
        "Room session attempt failed",
    )
    .await;

    let outcome = match result {
        Ok(summary) => RoomOutcome {
            target: target.clone(),
            status: RoomStatus::Completed(summary),
        },
        Err(e) => RoomOutcome::failed(target.clone(), e.into()),
    };

    if outcome.is_success() {
        tracing::info!(room_id = %target.origin_room_id, "{}", outcome.describe());
    } else {
        tracing::error!(room_id = %target.origin_room_id, "{}", outcome.describe());
    }
    outcome
}
