use chrono::{DateTime, Duration, Utc};
use serde::Serialize;
use steamid_ng::SteamID;

use crate::{commentary, steam::account_sequence};

/// 2003-09-12T00:00:00Z, when Steam opened to the public.
pub const STEAM_LAUNCH_TIMESTAMP: i64 = 1_063_324_800;

/// Rough number of account identifiers handed out per second since launch.
const REGISTRATIONS_PER_SECOND: u64 = 10;

const DAYS_PER_MONTH: i64 = 30;
const DAYS_PER_YEAR: i64 = 365;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountAge {
    /// `YYYY-MM-DD`
    pub date: String,
    pub timestamp: i64,
    /// Age in whole days.
    pub age: i64,
    pub age_text: String,
    /// False when the profile reported its own creation time.
    pub estimated: bool,
    pub comment: &'static str,
}

impl AccountAge {
    /// Uses the creation time from the profile when it is usable, otherwise
    /// falls back to [`estimate_creation`].
    #[must_use]
    pub fn new(steamid: SteamID, time_created: Option<i64>, now: DateTime<Utc>) -> Self {
        let reported = time_created
            .filter(|&t| t > 0)
            .and_then(|t| DateTime::from_timestamp(t, 0))
            .filter(|created| *created <= now);

        let (created, estimated) = match reported {
            Some(created) => (created, false),
            None => (estimate_creation(steamid, now), true),
        };

        let age = (now - created).num_days();

        Self {
            date: created.format("%Y-%m-%d").to_string(),
            timestamp: created.timestamp(),
            age,
            age_text: format_age(age),
            estimated,
            comment: commentary::account_comment(age / DAYS_PER_YEAR, u64::from(steamid)),
        }
    }
}

/// Guesses when an account was registered from its position in the ID
/// sequence. Never later than `now`: impossible guesses become a year ago.
#[must_use]
pub fn estimate_creation(steamid: SteamID, now: DateTime<Utc>) -> DateTime<Utc> {
    i64::try_from(account_sequence(steamid) / REGISTRATIONS_PER_SECOND)
        .ok()
        .and_then(|seconds| STEAM_LAUNCH_TIMESTAMP.checked_add(seconds))
        .and_then(|timestamp| DateTime::from_timestamp(timestamp, 0))
        .filter(|estimate| *estimate <= now)
        .unwrap_or_else(|| now - Duration::days(DAYS_PER_YEAR))
}

/// Months are 30 days and years 365, no calendar arithmetic.
#[must_use]
pub fn format_age(days: i64) -> String {
    let years = days / DAYS_PER_YEAR;
    let remaining = days % DAYS_PER_YEAR;

    if years > 0 {
        if remaining > DAYS_PER_MONTH {
            format!("{years} 年 {} 个月", remaining / DAYS_PER_MONTH)
        } else {
            format!("{years} 年")
        }
    } else {
        match days / DAYS_PER_MONTH {
            0 => format!("{days} 天"),
            months => format!("{months} 个月"),
        }
    }
}
