use serde::Serialize;

use crate::{
    commentary::{self, Genre, GenreTally},
    steam::{
        api::{OwnedGame, OwnedGames},
        app_image_url,
    },
};

const MINUTES_PER_HOUR: u64 = 60;
const MINUTES_PER_DAY: u64 = 1440;

/// Rounds to a single decimal place.
#[must_use]
pub fn round_tenths(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[allow(clippy::cast_precision_loss)]
fn hours(minutes: u64) -> f64 {
    round_tenths(minutes as f64 / MINUTES_PER_HOUR as f64)
}

#[allow(clippy::cast_precision_loss)]
fn days(minutes: u64) -> f64 {
    round_tenths(minutes as f64 / MINUTES_PER_DAY as f64)
}

/// Formats a duration in minutes using the largest two units, dropping the
/// smaller one when it is zero.
#[must_use]
pub fn format_playtime(minutes: u64) -> String {
    if minutes < MINUTES_PER_HOUR {
        format!("{minutes} 分钟")
    } else if minutes < MINUTES_PER_DAY {
        let hours = minutes / MINUTES_PER_HOUR;
        match minutes % MINUTES_PER_HOUR {
            0 => format!("{hours} 小时"),
            mins => format!("{hours} 小时 {mins} 分钟"),
        }
    } else {
        let days = minutes / MINUTES_PER_DAY;
        match (minutes % MINUTES_PER_DAY) / MINUTES_PER_HOUR {
            0 => format!("{days} 天"),
            hours => format!("{days} 天 {hours} 小时"),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameInfo {
    pub app_id: u32,
    pub name: String,
    /// Total playtime in minutes.
    pub playtime: u64,
    pub playtime_hours: f64,
    pub playtime_days: f64,
    pub playtime_text: String,
    pub icon_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    pub has_community_visible_stats: bool,
    pub playtime_windows: u64,
    pub playtime_mac: u64,
    pub playtime_linux: u64,
    pub rtime_last_played: u64,
}

impl From<OwnedGame> for GameInfo {
    fn from(game: OwnedGame) -> Self {
        let app_id = game.appid.unwrap_or(0);
        let playtime = game.playtime_forever.unwrap_or(0);

        Self {
            app_id,
            name: game.name.unwrap_or_else(|| "Unknown Game".into()),
            playtime,
            playtime_hours: hours(playtime),
            playtime_days: days(playtime),
            playtime_text: format_playtime(playtime),
            icon_url: app_image_url(app_id, game.img_icon_url.as_deref().unwrap_or_default()),
            logo_url: game
                .img_logo_url
                .filter(|hash| !hash.is_empty())
                .map(|hash| app_image_url(app_id, &hash)),
            has_community_visible_stats: game.has_community_visible_stats.unwrap_or(false),
            playtime_windows: game.playtime_windows_forever.unwrap_or(0),
            playtime_mac: game.playtime_mac_forever.unwrap_or(0),
            playtime_linux: game.playtime_linux_forever.unwrap_or(0),
            rtime_last_played: game.rtime_last_played.unwrap_or(0),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Library {
    pub total_count: u64,
    pub total_playtime: u64,
    pub total_playtime_hours: f64,
    pub total_playtime_days: f64,
    pub total_playtime_text: String,
    pub playtime_comment: &'static str,
    pub gaming_style: &'static str,
    /// Sorted by playtime, most played first.
    pub list: Vec<GameInfo>,
}

impl Library {
    #[must_use]
    pub fn new(owned: OwnedGames, seed: u64) -> Self {
        let total_count = owned.game_count.unwrap_or(0);

        let mut tally = GenreTally::default();
        let mut list: Vec<GameInfo> = owned
            .games
            .into_iter()
            .map(GameInfo::from)
            .inspect(|game| tally.add(Genre::classify(&game.name), game.playtime))
            .collect();
        list.sort_by(|a, b| b.playtime.cmp(&a.playtime));

        let total_playtime = list.iter().map(|g| g.playtime).sum();

        Self {
            total_count,
            total_playtime,
            total_playtime_hours: hours(total_playtime),
            total_playtime_days: days(total_playtime),
            total_playtime_text: format_playtime(total_playtime),
            playtime_comment: commentary::playtime_comment(total_playtime, seed),
            gaming_style: tally.gaming_style(total_playtime),
            list,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn game(appid: u32, minutes: u64) -> OwnedGame {
        OwnedGame {
            appid: Some(appid),
            playtime_forever: Some(minutes),
            ..Default::default()
        }
    }

    #[test]
    fn playtime_text() {
        assert_eq!(format_playtime(0), "0 分钟");
        assert_eq!(format_playtime(59), "59 分钟");
        assert_eq!(format_playtime(60), "1 小时");
        assert_eq!(format_playtime(90), "1 小时 30 分钟");
        assert_eq!(format_playtime(1439), "23 小时 59 分钟");
        assert_eq!(format_playtime(1440), "1 天");
        assert_eq!(format_playtime(1500), "1 天 1 小时");
        assert_eq!(format_playtime(1499), "1 天");
        assert_eq!(format_playtime(3 * 1440 + 5 * 60 + 59), "3 天 5 小时");
    }

    #[test]
    fn rounding() {
        assert!((hours(680) - 11.3).abs() < f64::EPSILON);
        assert!((hours(90) - 1.5).abs() < f64::EPSILON);
        assert!((days(2160) - 1.5).abs() < f64::EPSILON);
        assert!(hours(0).abs() < f64::EPSILON);
    }

    #[test]
    fn game_urls() {
        let info = GameInfo::from(OwnedGame {
            appid: Some(440),
            img_icon_url: Some("icon".into()),
            img_logo_url: Some("logo".into()),
            ..Default::default()
        });
        assert!(info.icon_url.ends_with("/apps/440/icon.jpg"));
        assert_eq!(
            info.logo_url.as_deref(),
            Some("https://steamcdn-a.akamaihd.net/steamcommunity/public/images/apps/440/logo.jpg")
        );

        let info = GameInfo::from(OwnedGame {
            appid: Some(440),
            img_logo_url: Some(String::new()),
            ..Default::default()
        });
        assert_eq!(info.logo_url, None);
        let json = serde_json::to_value(&info).expect("serializable");
        assert!(json.get("logoUrl").is_none());
        assert_eq!(json["name"], "Unknown Game");
    }

    #[test]
    fn sorted_by_playtime() {
        let owned = OwnedGames {
            game_count: Some(4),
            games: vec![game(1, 5), game(2, 500), game(3, 0), game(4, 120)],
        };
        let library = Library::new(owned, 0);

        let order: Vec<u32> = library.list.iter().map(|g| g.app_id).collect();
        assert_eq!(order, vec![2, 4, 1, 3]);
        assert!(library
            .list
            .windows(2)
            .all(|pair| pair[0].playtime >= pair[1].playtime));
        assert_eq!(library.total_count, 4);
        assert_eq!(library.total_playtime, 625);
        assert_eq!(library.total_playtime_text, "10 小时 25 分钟");
    }

    #[test]
    fn empty_library() {
        let library = Library::new(OwnedGames::default(), 0);
        assert_eq!(library.total_count, 0);
        assert_eq!(library.total_playtime, 0);
        assert_eq!(library.total_playtime_text, "0 分钟");
        assert_eq!(library.gaming_style, commentary::EMPTY_LIBRARY_STYLE);
        assert!(library.list.is_empty());
    }

    #[test]
    fn style_follows_top_genre() {
        let mut dota = game(570, 900);
        dota.name = Some("Dota 2".into());
        let mut portal = game(620, 100);
        portal.name = Some("Portal 2".into());

        let library = Library::new(
            OwnedGames {
                game_count: Some(2),
                games: vec![portal, dota],
            },
            0,
        );
        assert!(library.gaming_style.contains("MOBA"));
    }
}
