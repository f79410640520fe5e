//! HTTP Live API
//!
//! `reqwest` implementation of [`LiveApi`]. Every request carries the
//! account cookies, a desktop User-Agent and a site Referer.

use kernel::envelope::ApiEnvelope;
use kernel::id::RoomId;
use reqwest::header;
use serde::de::DeserializeOwned;

use crate::domain::entities::{BeaconGrant, MedalPage, RoomInfo};
use crate::domain::repository::LiveApi;
use crate::domain::value_objects::{AuthCookies, EnterBeacon, InRoomBeacon};
use crate::error::{HeartbeatError, HeartbeatResult};
use crate::infra::dto::{GrantDto, MedalListDto, RoomInfoDto};

const ROOM_INFO_URL: &str = "https://api.live.bilibili.com/room/v1/Room/get_info";
const MEDALS_URL: &str = "https://api.live.bilibili.com/xlive/app-ucenter/v1/user/GetMyMedals";
const ENTER_URL: &str = "https://live-trace.bilibili.com/xlive/data-interface/v1/x25Kn/E";
const IN_ROOM_URL: &str = "https://live-trace.bilibili.com/xlive/data-interface/v1/x25Kn/X";

const LIVE_REFERER: &str = "https://live.bilibili.com/";
const SITE_REFERER: &str = "https://www.bilibili.com/";

type Form = Vec<(&'static str, String)>;

/// Form body of the enter beacon
pub fn enter_form(beacon: &EnterBeacon, user_agent: &str, csrf: &str) -> Form {
    vec![
        ("id", beacon.room.to_json()),
        ("device", beacon.device.to_json()),
        ("ruid", beacon.target_user_id.to_string()),
        ("ts", beacon.timestamp_ms.to_string()),
        ("is_patch", beacon.is_patch.to_string()),
        ("heart_beat", beacon.heart_beat.clone()),
        ("ua", user_agent.to_string()),
        ("visit_id", String::new()),
        ("csrf", csrf.to_string()),
        ("csrf_token", csrf.to_string()),
    ]
}

/// Form body of an in-room beacon
pub fn in_room_form(beacon: &InRoomBeacon, user_agent: &str, csrf: &str) -> Form {
    vec![
        ("s", beacon.auth_code.clone()),
        ("id", beacon.room.to_json()),
        ("device", beacon.device.to_json()),
        ("ruid", beacon.target_user_id.to_string()),
        ("ets", beacon.ets.to_string()),
        ("benchmark", beacon.secret_key.clone()),
        ("time", beacon.interval_secs.to_string()),
        ("ts", beacon.timestamp_ms.to_string()),
        ("ua", user_agent.to_string()),
        ("visit_id", String::new()),
        ("csrf", csrf.to_string()),
        ("csrf_token", csrf.to_string()),
    ]
}

/// Decode `{ code, message, data }` into `data`
async fn decode<T: DeserializeOwned>(response: reqwest::Response) -> HeartbeatResult<T> {
    let text = response.error_for_status()?.text().await?;
    let envelope = ApiEnvelope::<T>::from_json(&text)?;
    Ok(envelope.into_data()?)
}

/// Live API over HTTP
#[derive(Clone)]
pub struct HttpLiveApi {
    client: reqwest::Client,
    user_agent: String,
}

impl HttpLiveApi {
    pub fn new(client: reqwest::Client, user_agent: impl Into<String>) -> Self {
        Self {
            client,
            user_agent: user_agent.into(),
        }
    }

    fn get(&self, url: &str, cookies: &str, referer: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::COOKIE, cookies)
            .header(header::REFERER, referer)
    }

    fn post_form(&self, url: &str, cookies: &str, form: &Form) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header(header::USER_AGENT, &self.user_agent)
            .header(header::COOKIE, cookies)
            .header(header::REFERER, SITE_REFERER)
            .form(form)
    }

    async fn send_beacon(&self, url: &str, cookies: &str, form: Form) -> HeartbeatResult<BeaconGrant> {
        let response = self.post_form(url, cookies, &form).send().await?;
        let dto: GrantDto = decode(response).await?;
        BeaconGrant::try_from(dto)
    }
}

impl LiveApi for HttpLiveApi {
    async fn room_info(&self, cookies: &AuthCookies, room_id: RoomId) -> HeartbeatResult<RoomInfo> {
        let request = self
            .get(ROOM_INFO_URL, cookies.raw(), LIVE_REFERER)
            .query(&[("room_id", room_id.to_string()), ("from", "room".to_string())]);

        let result: HeartbeatResult<RoomInfoDto> = match request.send().await {
            Ok(response) => decode(response).await,
            Err(e) => Err(e.into()),
        };
        result
            .map(RoomInfo::from)
            .map_err(|e| HeartbeatError::room_resolution(room_id, e))
    }

    async fn enter_room(&self, cookies: &AuthCookies, beacon: &EnterBeacon) -> HeartbeatResult<BeaconGrant> {
        let form = enter_form(beacon, &self.user_agent, cookies.csrf());
        self.send_beacon(ENTER_URL, cookies.raw(), form).await
    }

    async fn in_room(&self, cookies: &AuthCookies, beacon: &InRoomBeacon) -> HeartbeatResult<BeaconGrant> {
        let form = in_room_form(beacon, &self.user_agent, cookies.csrf());
        self.send_beacon(IN_ROOM_URL, cookies.raw(), form).await
    }

    async fn medal_page(&self, cookies: &AuthCookies, page: u32, page_size: u32) -> HeartbeatResult<MedalPage> {
        let response = self
            .get(MEDALS_URL, cookies.raw(), LIVE_REFERER)
            .query(&[("page", page), ("page_size", page_size)])
            .send()
            .await?;
        let dto: MedalListDto = decode(response).await?;
        Ok(dto.into())
    }
}
