use std::path::PathBuf;

use clap::{ArgAction, Parser};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Load settings from this file instead of the default config location
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Override the address to bind the lookup API to
    #[arg(long)]
    pub host: Option<String>,
    /// Override the port to host the lookup API on
    #[arg(long)]
    pub port: Option<u16>,

    /// Steam Web API key (https://steamcommunity.com/dev/apikey). Not written
    /// back to the config file.
    #[arg(long, env = "STEAM_API_KEY", hide_env_values = true)]
    pub steam_api_key: Option<String>,
    /// Skip TLS certificate validation when contacting the Steam API (insecure)
    #[arg(long, action = ArgAction::SetTrue, default_value_t = false)]
    pub accept_invalid_certs: bool,
}
