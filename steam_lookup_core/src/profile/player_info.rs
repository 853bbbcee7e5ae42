use serde::Serialize;
use steamid_ng::SteamID;

use super::serialize_steamid_as_string;
use crate::steam::api::PlayerSummary;

/// Online status reported in a player summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaState {
    Offline,
    Online,
    Busy,
    Away,
    Snooze,
    LookingToTrade,
    LookingToPlay,
    Unknown,
}

impl From<i64> for PersonaState {
    fn from(value: i64) -> Self {
        match value {
            0 => Self::Offline,
            1 => Self::Online,
            2 => Self::Busy,
            3 => Self::Away,
            4 => Self::Snooze,
            5 => Self::LookingToTrade,
            6 => Self::LookingToPlay,
            _ => Self::Unknown,
        }
    }
}

impl PersonaState {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Offline => "离线",
            Self::Online => "在线",
            Self::Busy => "忙碌",
            Self::Away => "离开",
            Self::Snooze => "snooze",
            Self::LookingToTrade => "looking to trade",
            Self::LookingToPlay => "looking to play",
            Self::Unknown => "未知",
        }
    }

    /// Style tag used by the web client to colour the status badge.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::Online | Self::LookingToTrade | Self::LookingToPlay => "online",
            Self::Busy => "busy",
            Self::Away | Self::Snooze => "away",
            Self::Offline | Self::Unknown => "offline",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerInfo {
    #[serde(serialize_with = "serialize_steamid_as_string")]
    pub steam_id: SteamID,
    pub persona_name: String,
    pub profile_url: String,
    pub avatar: String,
    pub avatar_medium: String,
    pub avatar_small: String,
    pub persona_state: i64,
    pub persona_state_text: &'static str,
    pub persona_state_color: &'static str,
    pub community_visibility_state: i64,
    pub profile_state: i64,
    pub last_logoff: i64,
    pub comment_permission: i64,
    pub real_name: String,
    pub primary_clan_id: String,
    pub time_created: i64,
    pub game_id: String,
    pub game_server_ip: String,
    pub game_extra_info: String,
    pub city_id: i64,
    pub loc_country_code: String,
    pub loc_state_code: String,
    pub loc_city_id: i64,
}

impl PlayerInfo {
    #[must_use]
    pub fn new(steamid: SteamID, summary: PlayerSummary) -> Self {
        let persona_state = summary.personastate.unwrap_or(0);
        let state = PersonaState::from(persona_state);

        Self {
            steam_id: steamid,
            persona_name: summary.personaname.unwrap_or_else(|| "Unknown".into()),
            profile_url: summary.profileurl.unwrap_or_default(),
            avatar: summary.avatarfull.unwrap_or_default(),
            avatar_medium: summary.avatarmedium.unwrap_or_default(),
            avatar_small: summary.avatar.unwrap_or_default(),
            persona_state,
            persona_state_text: state.label(),
            persona_state_color: state.color(),
            community_visibility_state: summary.communityvisibilitystate.unwrap_or(0),
            profile_state: summary.profilestate.unwrap_or(0),
            last_logoff: summary.lastlogoff.unwrap_or(0),
            comment_permission: summary.commentpermission.unwrap_or(0),
            real_name: summary.realname.unwrap_or_default(),
            primary_clan_id: summary.primaryclanid.unwrap_or_default(),
            time_created: summary.timecreated.unwrap_or(0),
            game_id: summary.gameid.unwrap_or_default(),
            game_server_ip: summary.gameserverip.unwrap_or_default(),
            game_extra_info: summary.gameextrainfo.unwrap_or_default(),
            city_id: summary.cityid.unwrap_or(0),
            loc_country_code: summary.loccountrycode.unwrap_or_default(),
            loc_state_code: summary.locstatecode.unwrap_or_default(),
            loc_city_id: summary.loccityid.unwrap_or(0),
        }
    }
}
