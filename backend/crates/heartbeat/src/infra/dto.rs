//! Wire DTOs
//!
//! Shapes of the `data` payloads the live site returns, and their
//! conversion into domain types.

use kernel::id::{RoomId, UserId};
use serde::Deserialize;

use crate::domain::entities::{BeaconGrant, FanMedal, MedalPage, RoomInfo};
use crate::error::HeartbeatError;

/// `data` of the room info endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct RoomInfoDto {
    pub room_id: i64,
    #[serde(default)]
    pub parent_area_id: i64,
    #[serde(default)]
    pub area_id: i64,
    #[serde(default)]
    pub uid: i64,
}

impl From<RoomInfoDto> for RoomInfo {
    fn from(dto: RoomInfoDto) -> Self {
        RoomInfo {
            room_id: RoomId::new(dto.room_id),
            parent_area_id: dto.parent_area_id,
            area_id: dto.area_id,
            owner_id: UserId::new(dto.uid),
        }
    }
}

/// `data` of both beacon endpoints
///
/// Every field is required by the protocol; absence is a desync.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GrantDto {
    pub heartbeat_interval: Option<i64>,
    pub timestamp: Option<i64>,
    pub secret_key: Option<String>,
    pub secret_rule: Option<Vec<i64>>,
}

fn required<T>(value: Option<T>, field: &str) -> Result<T, HeartbeatError> {
    value.ok_or_else(|| HeartbeatError::ProtocolDesync(format!("beacon response has no {}", field)))
}

impl TryFrom<GrantDto> for BeaconGrant {
    type Error = HeartbeatError;

    fn try_from(dto: GrantDto) -> Result<Self, Self::Error> {
        Ok(BeaconGrant {
            interval_secs: required(dto.heartbeat_interval, "heartbeat_interval")?,
            server_timestamp: required(dto.timestamp, "timestamp")?,
            secret_key: required(dto.secret_key, "secret_key")?,
            secret_rules: required(dto.secret_rule, "secret_rule")?,
        })
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageInfoDto {
    #[serde(default)]
    pub cur_page: u32,
    #[serde(default)]
    pub total_page: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FanMedalDto {
    #[serde(default)]
    pub medal_name: String,
    #[serde(default)]
    pub level: u32,
    pub roomid: i64,
    pub target_id: i64,
    #[serde(default)]
    pub target_name: String,
}

/// `data` of the medal list endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct MedalListDto {
    #[serde(default)]
    pub page_info: PageInfoDto,
    #[serde(default)]
    pub items: Vec<FanMedalDto>,
}

impl From<MedalListDto> for MedalPage {
    fn from(dto: MedalListDto) -> Self {
        MedalPage {
            current_page: dto.page_info.cur_page,
            total_pages: dto.page_info.total_page,
            medals: dto
                .items
                .into_iter()
                .map(|item| FanMedal {
                    medal_name: item.medal_name,
                    level: item.level,
                    room_id: RoomId::new(item.roomid),
                    target_user_id: UserId::new(item.target_id),
                    target_name: item.target_name,
                })
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kernel::envelope::ApiEnvelope;
    use kernel::error::kind::ErrorKind;

    #[test]
    fn test_grant_from_envelope() {
        let text = r#"{"code":0,"message":"0","data":{"heartbeat_interval":60,"timestamp":1700000000,"secret_key":"seacasdgyijfhofiuxoannn","secret_rule":[2,5,1,4],"patch_status":2}}"#;
        let dto = ApiEnvelope::<GrantDto>::from_json(text).unwrap().into_data().unwrap();
        let grant = BeaconGrant::try_from(dto).unwrap();

        assert_eq!(grant.interval_secs, 60);
        assert_eq!(grant.server_timestamp, 1700000000);
        assert_eq!(grant.secret_key, "seacasdgyijfhofiuxoannn");
        assert_eq!(grant.secret_rules, vec![2, 5, 1, 4]);
    }

    #[test]
    fn test_grant_missing_field_is_desync() {
        let dto = GrantDto {
            heartbeat_interval: Some(60),
            timestamp: Some(1),
            secret_key: None,
            secret_rule: Some(vec![0]),
        };
        let err = BeaconGrant::try_from(dto).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ProtocolDesync);
        assert!(err.to_string().contains("secret_key"));
    }

    #[test]
    fn test_room_info_dto() {
        let text = r#"{"code":0,"msg":"ok","message":"ok","data":{"uid":9617619,"room_id":21452505,"short_id":0,"parent_area_id":9,"area_id":371}}"#;
        let info: RoomInfo = ApiEnvelope::<RoomInfoDto>::from_json(text)
            .unwrap()
            .into_data()
            .unwrap()
            .into();

        assert_eq!(info.room_id, RoomId::new(21452505));
        assert_eq!(info.parent_area_id, 9);
        assert_eq!(info.area_id, 371);
        assert_eq!(info.owner_id, UserId::new(9617619));
    }

    #[test]
    fn test_medal_list_dto() {
        let text = r#"{"code":0,"message":"0","data":{"count":2,"items":[
            {"medal_name":"A","level":21,"roomid":100,"target_id":1,"target_name":"alpha"},
            {"medal_name":"B","level":7,"roomid":200,"target_id":2,"target_name":"beta"}
        ],"page_info":{"cur_page":1,"total_page":3}}}"#;
        let page: MedalPage = ApiEnvelope::<MedalListDto>::from_json(text)
            .unwrap()
            .into_data()
            .unwrap()
            .into();

        assert_eq!(page.total_pages, 3);
        assert_eq!(page.medals.len(), 2);
        assert_eq!(page.medals[1].room_id, RoomId::new(200));
        assert_eq!(page.medals[1].target_name, "beta");
    }
}
