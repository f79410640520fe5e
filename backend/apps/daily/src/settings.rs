//! Runtime settings
//!
//! Read from the environment (after `.env` is loaded). Optional values that
//! fail to parse fall back to their defaults with a warning.

use std::str::FromStr;
use std::time::Duration;

use heartbeat::{HeartbeatConfig, Topology};
use kernel::id::RoomId;
use platform::client::HttpClientConfig;

pub struct Settings {
    pub cookies: String,
    pub heartbeat: HeartbeatConfig,
    pub http: HttpClientConfig,
}

fn parsed<T: FromStr>(lookup: &impl Fn(&str) -> Option<String>, key: &str) -> Option<T> {
    let raw = lookup(key)?;
    match raw.trim().parse() {
        Ok(value) => Some(value),
        Err(_) => {
            tracing::warn!(key, value = %raw, "Ignoring unparsable setting, using default");
            None
        }
    }
}

fn room_ids(raw: &str) -> Vec<RoomId> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| match part.parse::<i64>() {
            Ok(id) if id > 0 => Some(RoomId::new(id)),
            _ => {
                tracing::warn!(value = %part, "Ignoring invalid ROOM_ID entry");
                None
            }
        })
        .collect()
}

impl Settings {
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> anyhow::Result<Self> {
        let cookies = lookup("BILIBILI_COOKIES")
            .filter(|value| !value.trim().is_empty())
            .ok_or_else(|| anyhow::anyhow!("BILIBILI_COOKIES must be set in environment"))?;

        let defaults = HeartbeatConfig::default();
        let heartbeat = HeartbeatConfig {
            target_duration: parsed(&lookup, "HEARTBEAT_DURATION_SECS")
                .map(Duration::from_secs)
                .unwrap_or(defaults.target_duration),
            max_attempts: parsed(&lookup, "HEARTBEAT_MAX_ATTEMPTS").unwrap_or(defaults.max_attempts),
            retry_delay: parsed(&lookup, "HEARTBEAT_RETRY_DELAY_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.retry_delay),
            session_stagger: parsed(&lookup, "HEARTBEAT_STAGGER_MS")
                .map(Duration::from_millis)
                .unwrap_or(defaults.session_stagger),
            topology: parsed::<Topology>(&lookup, "HEARTBEAT_TOPOLOGY").unwrap_or(defaults.topology),
            medal_level_cap: parsed(&lookup, "MEDAL_LEVEL_CAP").unwrap_or(defaults.medal_level_cap),
            medal_page_size: defaults.medal_page_size,
            extra_room_ids: lookup("ROOM_ID").map(|raw| room_ids(&raw)).unwrap_or_default(),
        };

        let http_defaults = HttpClientConfig::default();
        let http = HttpClientConfig {
            timeout: parsed(&lookup, "HTTP_TIMEOUT_SECS")
                .map(Duration::from_secs)
                .unwrap_or(http_defaults.timeout),
            ..http_defaults
        };

        Ok(Self {
            cookies,
            heartbeat,
            http,
        })
    }
}
