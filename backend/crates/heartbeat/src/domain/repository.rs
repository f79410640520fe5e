//! Repository Traits
//!
//! Interface to the live site. The HTTP implementation is in the infra layer.

use kernel::id::RoomId;

use crate::domain::entities::{BeaconGrant, MedalPage, RoomInfo};
use crate::domain::value_objects::{AuthCookies, EnterBeacon, InRoomBeacon};
use crate::error::HeartbeatResult;

/// Live-site collaborator
///
/// Every call carries the parsed cookies of the account.
#[trait_variant::make(LiveApi: Send)]
pub trait LocalLiveApi {
    /// Look up the real room id and area of a (possibly short) room id
    async fn room_info(&self, cookies: &AuthCookies, room_id: RoomId) -> HeartbeatResult<RoomInfo>;

    /// Send the enter-room beacon
    async fn enter_room(&self, cookies: &AuthCookies, beacon: &EnterBeacon) -> HeartbeatResult<BeaconGrant>;

    /// Send one in-room beacon
    async fn in_room(&self, cookies: &AuthCookies, beacon: &InRoomBeacon) -> HeartbeatResult<BeaconGrant>;

    /// Fetch one page of the account's fan medals (pages start at 1)
    async fn medal_page(&self, cookies: &AuthCookies, page: u32, page_size: u32) -> HeartbeatResult<MedalPage>;
}
