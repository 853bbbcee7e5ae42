use std::{net::SocketAddr, path::Path};

use anyhow::Context;
use args::Args;
use clap::Parser;
use steam_lookup_core::{
    server::{web_main, AppState},
    settings::{self, Settings},
    APP,
};

mod args;
mod tracing_setup;

fn main() -> anyhow::Result<()> {
    let _guard = tracing_setup::init_tracing(Path::new(tracing_setup::LOG_FILE_NAME));

    let args = Args::parse();

    let config_path = args.config.clone().unwrap_or_else(|| {
        Settings::default_file_location(APP).unwrap_or_else(|e| {
            tracing::error!("Failed to find a suitable location to store settings ({e}). Settings will be written to {}", settings::CONFIG_FILE_NAME);
            settings::CONFIG_FILE_NAME.into()
        })
    });

    let mut settings = Settings::load_or_create(config_path)
        .context("Failed to load settings. Please fix any issues mentioned and try again.")?;
    match settings.save() {
        Ok(()) => tracing::debug!("Saved settings to {:?}", settings.config_path),
        Err(e) => tracing::error!("Failed to save settings to {:?}: {e}", settings.config_path),
    }

    // Command line overrides are not persisted
    apply_overrides(&mut settings, args);

    if !settings.has_api_key() {
        tracing::warn!(
            "No Steam API key is set, lookups will be refused. Add one to {:?} or set STEAM_API_KEY. Keys can be requested at https://steamcommunity.com/dev/apikey",
            settings.config_path
        );
    }

    let addr: SocketAddr = format!("{}:{}", settings.host, settings.port)
        .parse()
        .with_context(|| format!("Invalid bind address {}:{}", settings.host, settings.port))?;

    let state = AppState::new(settings).context("Failed to build Steam API client")?;

    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Failed to build async runtime")?
        .block_on(async move { web_main(state, addr, shutdown_signal()).await })
        .context("Lookup API server failed")?;

    tracing::info!("Shut down.");
    Ok(())
}

fn apply_overrides(settings: &mut Settings, args: Args) {
    if let Some(host) = args.host {
        settings.host = host;
    }
    if let Some(port) = args.port {
        settings.port = port;
    }
    if let Some(key) = args.steam_api_key {
        tracing::debug!("Using Steam API key from the command line or environment");
        settings.steam_api_key = key;
    }
    if args.accept_invalid_certs {
        settings.accept_invalid_certs = true;
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Error with Ctrl+C handler: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Received Ctrl+C, shutting down.");
}
