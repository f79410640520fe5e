//! Application Configuration
//!
//! Configuration for the heartbeat application layer.

use std::str::FromStr;
use std::time::Duration;

use kernel::id::RoomId;
use platform::retry::RetryPolicy;

/// How sessions of one run are scheduled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Topology {
    /// Sessions overlap, started one stagger apart
    #[default]
    Concurrent,
    /// Each session finishes before the next one starts
    Sequential,
}

impl FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "concurrent" => Ok(Topology::Concurrent),
            "sequential" => Ok(Topology::Sequential),
            other => Err(format!("unknown topology: {}", other)),
        }
    }
}

/// Heartbeat application configuration
#[derive(Debug, Clone)]
pub struct HeartbeatConfig {
    /// Watch time each session accumulates before it completes
    pub target_duration: Duration,
    /// Attempts per session, including the first
    pub max_attempts: u32,
    /// Flat delay between session attempts
    pub retry_delay: Duration,
    /// Delay between starting consecutive sessions
    pub session_stagger: Duration,
    pub topology: Topology,
    /// Medals at or above this level are skipped
    pub medal_level_cap: u32,
    pub medal_page_size: u32,
    /// Rooms watched in addition to the medal rooms
    pub extra_room_ids: Vec<RoomId>,
}

impl Default for HeartbeatConfig {
    fn default() -> Self {
        Self {
            target_duration: Duration::from_secs(25 * 60),
            max_attempts: 3,
            retry_delay: Duration::from_secs(1),
            session_stagger: Duration::from_secs(1),
            topology: Topology::Concurrent,
            medal_level_cap: 20,
            medal_page_size: 10,
            extra_room_ids: Vec::new(),
        }
    }
}

impl HeartbeatConfig {
    /// Saturates at `i64::MAX`
    pub fn target_duration_secs(&self) -> i64 {
        i64::try_from(self.target_duration.as_secs()).unwrap_or(i64::MAX)
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            delay: self.retry_delay,
        }
    }
}
