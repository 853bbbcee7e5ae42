use std::sync::OnceLock;

use regex::Regex;
use steamid_ng::SteamID;

pub mod api;

/// Added to a short-form friend code to obtain the full Steam ID64.
#[allow(clippy::unreadable_literal)]
pub const BASE_OFFSET: u64 = 76561197960265728;

/// Number of digits in a full Steam ID64.
pub const STEAMID64_LEN: usize = 17;

pub const CDN_APP_IMAGES: &str = "https://steamcdn-a.akamaihd.net/steamcommunity/public/images/apps";

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ConversionError {
    #[error("Friend code {0:?} is not a number")]
    NotNumeric(String),
    #[error("Friend code {0:?} is too large to be a Steam ID")]
    Overflow(String),
}

#[allow(clippy::unwrap_used)]
fn digits_only() -> &'static Regex {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    DIGITS.get_or_init(|| Regex::new(r"^\d+$").unwrap())
}

/// Whether the friend code consists solely of ASCII digits.
#[must_use]
pub fn is_friend_code(code: &str) -> bool {
    digits_only().is_match(code) && code.is_ascii()
}

/// Converts a friend code into the full 64-bit account identifier.
///
/// A 17 digit code that is already past [`BASE_OFFSET`] is treated as a
/// Steam ID64 and returned unchanged, anything else is an offset from it.
///
/// # Errors
/// * `NotNumeric` - the code does not parse as an unsigned integer
/// * `Overflow` - the resulting identifier does not fit in 64 bits
pub fn friend_code_to_steamid(code: &str) -> Result<SteamID, ConversionError> {
    let value: u64 = code
        .parse()
        .map_err(|_| ConversionError::NotNumeric(code.to_owned()))?;

    if code.len() == STEAMID64_LEN && value > BASE_OFFSET {
        return Ok(SteamID::from(value));
    }

    value
        .checked_add(BASE_OFFSET)
        .map(SteamID::from)
        .ok_or_else(|| ConversionError::Overflow(code.to_owned()))
}

/// Position of the account in registration order.
#[must_use]
pub fn account_sequence(steamid: SteamID) -> u64 {
    u64::from(steamid).saturating_sub(BASE_OFFSET)
}

#[must_use]
pub fn app_image_url(appid: u32, hash: &str) -> String {
    format!("{CDN_APP_IMAGES}/{appid}/{hash}.jpg")
}
