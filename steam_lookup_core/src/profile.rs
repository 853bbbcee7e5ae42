use chrono::{DateTime, Utc};
use serde::{Serialize, Serializer};
use steamid_ng::SteamID;

use crate::steam::api::{OwnedGames, PlayerSummary};

use self::{account::AccountAge, library::Library, player_info::PlayerInfo};

pub mod account;
pub mod library;
pub mod player_info;

/// Everything the web client shows for one looked up account.
#[derive(Debug, Clone, Serialize)]
pub struct Profile {
    pub success: bool,
    pub player: PlayerInfo,
    pub account: AccountAge,
    pub games: Library,
}

impl Profile {
    /// Shapes the upstream records into the response document. A library that
    /// could not be fetched is reported as an empty one.
    #[must_use]
    pub fn new(
        steamid: SteamID,
        summary: PlayerSummary,
        owned: Option<OwnedGames>,
        now: DateTime<Utc>,
    ) -> Self {
        let seed = u64::from(steamid);
        let account = AccountAge::new(steamid, summary.timecreated, now);
        let games = Library::new(owned.unwrap_or_default(), seed);

        Self {
            success: true,
            player: PlayerInfo::new(steamid, summary),
            account,
            games,
        }
    }
}

#[allow(clippy::trivially_copy_pass_by_ref, clippy::missing_errors_doc)]
pub fn serialize_steamid_as_string<S: Serializer>(
    steamid: &SteamID,
    s: S,
) -> Result<S::Ok, S::Error> {
    format!("{}", u64::from(*steamid)).serialize(s)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::steam::api::OwnedGame;

    #[test]
    fn document_shape() {
        let steamid = SteamID::from(76_561_197_960_287_930);
        let summary = PlayerSummary {
            personaname: Some("Rabscuttle".into()),
            personastate: Some(1),
            ..Default::default()
        };
        let owned = OwnedGames {
            game_count: Some(2),
            games: vec![
                OwnedGame {
                    appid: Some(20),
                    playtime_forever: Some(30),
                    ..Default::default()
                },
                OwnedGame {
                    appid: Some(10),
                    playtime_forever: Some(650),
                    ..Default::default()
                },
            ],
        };

        let profile = Profile::new(steamid, summary, Some(owned), Utc::now());
        let json = serde_json::to_value(&profile).expect("serializable");

        assert_eq!(json["success"], true);
        assert_eq!(json["player"]["personaName"], "Rabscuttle");
        assert_eq!(json["player"]["personaStateText"], "在线");
        assert_eq!(json["games"]["totalCount"], 2);
        assert_eq!(json["games"]["totalPlaytime"], 680);
        assert_eq!(json["games"]["totalPlaytimeHours"], 11.3);
        assert_eq!(json["games"]["list"][0]["appId"], 10);
        assert_eq!(json["games"]["list"][1]["appId"], 20);
        assert_eq!(json["account"]["estimated"], true);
    }

    #[test]
    fn missing_library_is_empty() {
        let steamid = SteamID::from(76_561_197_960_287_930);
        let profile = Profile::new(steamid, PlayerSummary::default(), None, Utc::now());
        assert_eq!(profile.games.total_count, 0);
        assert!(profile.games.list.is_empty());
    }
}
