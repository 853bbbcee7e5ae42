use std::time::Duration;

use serde::{de::DeserializeOwned, Deserialize, Deserializer};
use steamid_ng::SteamID;
use thiserror::Error;

use crate::settings::Settings;

pub const USER_AGENT: &str = concat!("steam_lookup/", env!("CARGO_PKG_VERSION"));

const PLAYER_SUMMARIES: &str = "ISteamUser/GetPlayerSummaries/v0002/";
const OWNED_GAMES: &str = "IPlayerService/GetOwnedGames/v0001/";

#[derive(Debug, Error)]
pub enum SteamAPIError {
    #[error("Request failed: {0}")]
    Http(reqwest::Error),
    #[error("Unexpected status {0}")]
    Status(reqwest::StatusCode),
    #[error(transparent)]
    Serde(#[from] serde_json::Error),
}

// The request URL carries the API key, strip it before the error can be logged.
impl From<reqwest::Error> for SteamAPIError {
    fn from(value: reqwest::Error) -> Self {
        Self::Http(value.without_url())
    }
}

// Wire types *************************
// Every field is optional, the Steam Web API omits whatever the profile hides.
// A field of an unexpected type decodes as `None` instead of failing the
// whole response.

fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Keeps the entries that decode and drops the rest.
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    let serde_json::Value::Array(entries) = value else {
        return Ok(Vec::new());
    };
    Ok(entries
        .into_iter()
        .filter_map(|entry| serde_json::from_value(entry).ok())
        .collect())
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    #[serde(default)]
    response: T,
}

#[derive(Debug, Deserialize, Default)]
struct PlayerSummaries {
    #[serde(default, deserialize_with = "lenient_list")]
    players: Vec<PlayerSummary>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct PlayerSummary {
    #[serde(deserialize_with = "lenient")]
    pub steamid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub personaname: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub profileurl: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub avatar: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub avatarmedium: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub avatarfull: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub personastate: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub communityvisibilitystate: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub profilestate: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub lastlogoff: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub commentpermission: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub realname: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub primaryclanid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub timecreated: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub gameid: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub gameserverip: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub gameextrainfo: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub cityid: Option<i64>,
    #[serde(deserialize_with = "lenient")]
    pub loccountrycode: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub locstatecode: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub loccityid: Option<i64>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OwnedGames {
    #[serde(deserialize_with = "lenient")]
    pub game_count: Option<u64>,
    #[serde(deserialize_with = "lenient_list")]
    pub games: Vec<OwnedGame>,
}

#[derive(Debug, Clone, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct OwnedGame {
    #[serde(deserialize_with = "lenient")]
    pub appid: Option<u32>,
    #[serde(deserialize_with = "lenient")]
    pub name: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub playtime_forever: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub img_icon_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub img_logo_url: Option<String>,
    #[serde(deserialize_with = "lenient")]
    pub has_community_visible_stats: Option<bool>,
    #[serde(deserialize_with = "lenient")]
    pub playtime_windows_forever: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub playtime_mac_forever: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub playtime_linux_forever: Option<u64>,
    #[serde(deserialize_with = "lenient")]
    pub rtime_last_played: Option<u64>,
}

// Client *************************

#[derive(Debug, Clone)]
pub struct SteamAPI {
    client: reqwest::Client,
    host: String,
    key: String,
}

impl SteamAPI {
    /// Builds a client using the transport policy and key from [Settings].
    ///
    /// # Errors
    /// If the TLS backend could not be initialised
    pub fn new(settings: &Settings) -> Result<Self, SteamAPIError> {
        if settings.accept_invalid_certs {
            tracing::warn!("TLS certificate validation is disabled for Steam API requests.");
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .user_agent(USER_AGENT)
            .danger_accept_invalid_certs(settings.accept_invalid_certs)
            .build()?;

        Ok(Self {
            client,
            host: settings.steam_api_host.trim_end_matches('/').to_owned(),
            key: settings.steam_api_key.clone(),
        })
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        query: &[(&str, &str)],
    ) -> Result<T, SteamAPIError> {
        let response = self
            .client
            .get(format!("{}/{endpoint}", self.host))
            .query(&[("key", self.key.as_str())])
            .query(query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(SteamAPIError::Status(status));
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Requests the profile summary of a single account.
    /// `Ok(None)` means the API answered but knows no such player.
    ///
    /// # Errors
    /// If the request failed, returned a non-success status or could not be
    /// decoded.
    pub async fn request_player_summary(
        &self,
        steamid: SteamID,
    ) -> Result<Option<PlayerSummary>, SteamAPIError> {
        let id = u64::from(steamid).to_string();
        tracing::debug!("Requesting player summary for {id}");

        let envelope: Envelope<PlayerSummaries> = self
            .get(PLAYER_SUMMARIES, &[("steamids", id.as_str())])
            .await?;
        Ok(envelope.response.players.into_iter().next())
    }

    /// Requests the owned game library of an account, including free games.
    ///
    /// # Errors
    /// If the request failed, returned a non-success status or could not be
    /// decoded.
    pub async fn request_owned_games(&self, steamid: SteamID) -> Result<OwnedGames, SteamAPIError> {
        let id = u64::from(steamid).to_string();
        tracing::debug!("Requesting owned games for {id}");

        let envelope: Envelope<OwnedGames> = self
            .get(
                OWNED_GAMES,
                &[
                    ("steamid", id.as_str()),
                    ("format", "json"),
                    ("include_appinfo", "1"),
                    ("include_played_free_games", "1"),
                ],
            )
            .await?;
        Ok(envelope.response)
    }

    /// Fail-soft profile lookup. Upstream failures are logged and reported the
    /// same way as an unknown player.
    pub async fn fetch_profile(&self, steamid: SteamID) -> Option<PlayerSummary> {
        match self.request_player_summary(steamid).await {
            Ok(summary) => summary,
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch player summary for {}: {e}",
                    u64::from(steamid)
                );
                None
            }
        }
    }

    /// Fail-soft library lookup. `None` means the library could not be
    /// retrieved at all, as opposed to an account that owns nothing.
    pub async fn fetch_owned_games(&self, steamid: SteamID) -> Option<OwnedGames> {
        match self.request_owned_games(steamid).await {
            Ok(games) => Some(games),
            Err(e) => {
                tracing::warn!(
                    "Failed to fetch owned games for {}: {e}",
                    u64::from(steamid)
                );
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_sparse_summaries() {
        let envelope: Envelope<PlayerSummaries> = serde_json::from_str(
            r#"{"response":{"players":[{"steamid":"76561197960287930","personaname":"Rabscuttle","personastate":1}]}}"#,
        )
        .expect("valid json");

        let player = envelope.response.players.first().expect("one player");
        assert_eq!(player.personaname.as_deref(), Some("Rabscuttle"));
        assert_eq!(player.personastate, Some(1));
        assert_eq!(player.timecreated, None);
        assert_eq!(player.avatarfull, None);
    }

    #[test]
    fn decodes_missing_player_list() {
        let envelope: Envelope<PlayerSummaries> =
            serde_json::from_str(r#"{"response":{}}"#).expect("valid json");
        assert!(envelope.response.players.is_empty());

        let envelope: Envelope<PlayerSummaries> =
            serde_json::from_str("{}").expect("valid json");
        assert!(envelope.response.players.is_empty());
    }

    #[test]
    fn decodes_private_library() {
        let envelope: Envelope<OwnedGames> =
            serde_json::from_str(r#"{"response":{}}"#).expect("valid json");
        assert_eq!(envelope.response, OwnedGames::default());
    }

    #[test]
    fn bad_fields_decode_as_missing() {
        let envelope: Envelope<PlayerSummaries> = serde_json::from_str(
            r#"{"response":{"players":[{"steamid":"76561197960287930","personaname":"Rabscuttle","timecreated":1.5e9,"personastate":"busy"}]}}"#,
        )
        .expect("valid json");

        let player = envelope.response.players.first().expect("one player");
        assert_eq!(player.personaname.as_deref(), Some("Rabscuttle"));
        assert_eq!(player.timecreated, None);
        assert_eq!(player.personastate, None);
    }

    #[test]
    fn bad_game_does_not_empty_library() {
        let envelope: Envelope<OwnedGames> = serde_json::from_str(
            r#"{"response":{"game_count":"three","games":[{"appid":10,"playtime_forever":650},{"appid":20,"playtime_forever":-1},{"appid":"x"},7]}}"#,
        )
        .expect("valid json");

        let games = envelope.response.games;
        assert_eq!(envelope.response.game_count, None);
        assert_eq!(games.len(), 3);
        assert_eq!(games[0].appid, Some(10));
        assert_eq!(games[0].playtime_forever, Some(650));
        assert_eq!(games[1].appid, Some(20));
        assert_eq!(games[1].playtime_forever, None);
        assert_eq!(games[2].appid, None);
    }

    #[test]
    fn decodes_owned_games() {
        let envelope: Envelope<OwnedGames> = serde_json::from_str(
            r#"{"response":{"game_count":1,"games":[{"appid":440,"name":"Team Fortress 2","playtime_forever":6000,"img_icon_url":"e3f5","has_community_visible_stats":true,"playtime_linux_forever":12,"rtime_last_played":1700000000}]}}"#,
        )
        .expect("valid json");

        assert_eq!(envelope.response.game_count, Some(1));
        let game = envelope.response.games.first().expect("one game");
        assert_eq!(game.appid, Some(440));
        assert_eq!(game.playtime_forever, Some(6000));
        assert_eq!(game.img_logo_url, None);
        assert_eq!(game.playtime_linux_forever, Some(12));
        assert_eq!(game.playtime_mac_forever, None);
    }
}
