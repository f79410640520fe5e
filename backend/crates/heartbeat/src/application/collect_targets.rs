//! Collect Targets Use Case
//!
//! Builds the room list for a run: every medal below the level cap, plus
//! extra rooms from configuration, without duplicates.

use std::collections::HashSet;
use std::sync::Arc;

use kernel::id::RoomId;
use platform::retry::{SuccessMessage, retry};

use crate::application::config::HeartbeatConfig;
use crate::domain::entities::{FanMedal, MedalPage, RoomInfo, RoomTarget};
use crate::domain::repository::LiveApi;
use crate::domain::value_objects::AuthCookies;
use crate::error::HeartbeatResult;

/// Collect Targets Use Case
pub struct CollectTargetsUseCase<A>
where
    A: LiveApi,
{
    api: Arc<A>,
    config: Arc<HeartbeatConfig>,
}

impl<A> CollectTargetsUseCase<A>
where
    A: LiveApi + Sync,
{
    pub fn new(api: Arc<A>, config: Arc<HeartbeatConfig>) -> Self {
        Self { api, config }
    }

    /// Validate `cookies`, then collect
    pub async fn execute(&self, cookies: &str) -> HeartbeatResult<Vec<RoomTarget>> {
        let cookies = AuthCookies::parse(cookies)?;
        self.collect(&cookies).await
    }

    pub async fn collect(&self, cookies: &AuthCookies) -> HeartbeatResult<Vec<RoomTarget>> {
        let medals = self.all_medals(cookies).await?;
        let cap = self.config.medal_level_cap;

        let mut seen = HashSet::new();
        let mut targets: Vec<RoomTarget> = medals
            .iter()
            .filter(|medal| {
                if medal.level >= cap {
                    tracing::debug!(medal = %medal.medal_name, level = medal.level, "Skipping capped medal");
                }
                medal.level < cap
            })
            .map(FanMedal::to_target)
            .filter(|target| seen.insert(target.origin_room_id))
            .collect();
        tracing::info!(
            medals = medals.len(),
            below_cap = targets.len(),
            level_cap = cap,
            "Collected medal rooms"
        );

        for &room_id in &self.config.extra_room_ids {
            if !seen.insert(room_id) {
                continue;
            }
            let info = self.room_info(cookies, room_id).await?;
            targets.push(RoomTarget::new(room_id, info.owner_id, format!("room {}", room_id)));
        }

        Ok(targets)
    }

    async fn all_medals(&self, cookies: &AuthCookies) -> HeartbeatResult<Vec<FanMedal>> {
        let first = self.medal_page(cookies, 1).await?;
        let total_pages = first.total_pages;
        let mut medals = first.medals;
        for page in 2..=total_pages {
            medals.extend(self.medal_page(cookies, page).await?.medals);
        }
        Ok(medals)
    }

    async fn medal_page(&self, cookies: &AuthCookies, page: u32) -> HeartbeatResult<MedalPage> {
        let api: &A = &self.api;
        let page_size = self.config.medal_page_size;
        retry(
            move || api.medal_page(cookies, page, page_size),
            &self.config.retry_policy(),
            SuccessMessage::render_with(|p: &MedalPage| {
                format!("Fetched medal page {}/{}", p.current_page, p.total_pages)
            }),
            "Medal list request failed",
        )
        .await
    }

    async fn room_info(&self, cookies: &AuthCookies, room_id: RoomId) -> HeartbeatResult<RoomInfo> {
        let api: &A = &self.api;
        retry(
            move || api.room_info(cookies, room_id),
            &self.config.retry_policy(),
            SuccessMessage::render_with(move |info: &RoomInfo| {
                format!("Resolved room {} to {}", room_id, info.room_id)
            }),
            "Room info request failed",
        )
        .await
    }
}
