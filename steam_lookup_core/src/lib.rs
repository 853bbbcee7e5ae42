pub mod commentary;
pub mod profile;
pub mod server;
pub mod settings;
pub mod steam;

use settings::AppDetails;

pub const APP: AppDetails<'static> = AppDetails {
    qualifier: "com.steamlookup",
    organization: "SteamLookup",
    application: "SteamLookup",
};
