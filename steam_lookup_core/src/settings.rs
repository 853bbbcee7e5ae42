use std::{
    io::{self, ErrorKind, Write},
    path::PathBuf,
};

use atomic_write_file::AtomicWriteFile;
use directories_next::ProjectDirs;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// Value shipped in old configuration templates. Treated the same as an unset
/// key.
pub const PLACEHOLDER_API_KEY: &str = "YOUR_STEAM_API_KEY_HERE";

pub const DEFAULT_STEAM_API_HOST: &str = "https://api.steampowered.com";

#[derive(Debug, Clone, Copy)]
pub struct AppDetails<'a> {
    pub qualifier: &'a str,
    pub organization: &'a str,
    pub application: &'a str,
}

#[derive(Debug, Error)]
pub enum ConfigFilesError {
    #[error("No valid home directory found")]
    NoValidHome,
    #[error("IO({0})")]
    IO(#[from] io::Error),
    #[error("Yaml{0}")]
    Yaml(#[from] serde_yaml::Error),
    #[error("No config file path is set")]
    NoConfigSet,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    #[serde(skip)]
    pub config_path: Option<PathBuf>,

    pub steam_api_key: String,
    pub steam_api_host: String,
    pub request_timeout_secs: u64,
    /// Skip TLS certificate validation on outbound Steam API requests.
    pub accept_invalid_certs: bool,

    pub host: String,
    pub port: u16,
}

impl Settings {
    /// Whether a usable Steam API key has been provided.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        let key = self.steam_api_key.trim();
        !key.is_empty() && key != PLACEHOLDER_API_KEY
    }

    /// Attempts to locate the default file location for the settings config file
    ///
    /// # Errors
    /// If an appropriate location could not be found
    pub fn default_file_location(app_details: AppDetails) -> Result<PathBuf, ConfigFilesError> {
        Ok(Self::locate_config_directory(app_details)?.join(CONFIG_FILE_NAME))
    }

    /// Attempts to load the [Settings] at the specified location.
    /// If it cannot be found, new [Settings] will be
    /// created at that location.
    ///
    /// # Errors
    /// * `IO` - If the file could not be loaded from some reason
    /// * `Yaml` - If the contents of the file were not valid
    pub fn load_or_create(config_file_path: PathBuf) -> Result<Self, ConfigFilesError> {
        match Self::load_from(config_file_path.clone()) {
            Ok(settings) => Ok(settings),
            Err(ConfigFilesError::IO(e)) if e.kind() == ErrorKind::NotFound => {
                tracing::warn!("Could not locate {config_file_path:?}, creating new file.");
                Ok(Self {
                    config_path: Some(config_file_path),
                    ..Default::default()
                })
            }
            Err(e) => Err(e),
        }
    }

    /// # Errors
    /// If the file could not be read or did not contain valid settings
    pub fn load_from(config_file_path: PathBuf) -> Result<Self, ConfigFilesError> {
        let contents = std::fs::read_to_string(&config_file_path)?;
        let mut settings = serde_yaml::from_str::<Self>(&contents)?;
        tracing::debug!("Successfully loaded {config_file_path:?}");
        settings.config_path = Some(config_file_path);
        Ok(settings)
    }

    /// Attempt to save the settings back to the loaded configuration file
    ///
    /// # Errors
    /// If the settings could not be serialized or written back to disk
    pub fn save(&self) -> Result<(), ConfigFilesError> {
        let config_path = self
            .config_path
            .as_ref()
            .ok_or(ConfigFilesError::NoConfigSet)?;

        let mut file = AtomicWriteFile::open(config_path)?;
        write!(&mut file, "{}", serde_yaml::to_string(self)?)?;
        file.commit()?;

        Ok(())
    }

    /// Attempts to find (and create) a directory to be used for configuration
    /// files
    ///
    /// # Errors
    /// If a valid config file directory could not be found (usually because a
    /// valid home directory was not found)
    pub fn locate_config_directory(app_details: AppDetails) -> Result<PathBuf, ConfigFilesError> {
        let dirs = ProjectDirs::from(
            app_details.qualifier,
            app_details.organization,
            app_details.application,
        )
        .ok_or(ConfigFilesError::NoValidHome)?;
        let dir = dirs.config_dir();
        std::fs::create_dir_all(dir)?;
        Ok(PathBuf::from(dir))
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            config_path: None,
            steam_api_key: String::new(),
            steam_api_host: DEFAULT_STEAM_API_HOST.into(),
            request_timeout_secs: 30,
            accept_invalid_certs: false,
            host: "0.0.0.0".into(),
            port: 8080,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_file(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("steam_lookup_settings_{}", std::process::id()));
        std::fs::create_dir_all(&dir).expect("temp dir");
        let path = dir.join(name);
        let _ = std::fs::remove_file(&path);
        path
    }

    #[test]
    fn api_key_presence() {
        let mut settings = Settings::default();
        assert!(!settings.has_api_key());

        settings.steam_api_key = PLACEHOLDER_API_KEY.into();
        assert!(!settings.has_api_key());

        settings.steam_api_key = "   ".into();
        assert!(!settings.has_api_key());

        settings.steam_api_key = "0123456789ABCDEF".into();
        assert!(settings.has_api_key());
    }

    #[test]
    fn defaults_are_strict() {
        let settings = Settings::default();
        assert!(!settings.accept_invalid_certs);
        assert_eq!(settings.request_timeout_secs, 30);
        assert_eq!(settings.steam_api_host, DEFAULT_STEAM_API_HOST);
    }

    #[test]
    fn partial_yaml_fills_defaults() {
        let settings: Settings =
            serde_yaml::from_str("steam_api_key: abc\nport: 9000\n").expect("valid yaml");
        assert_eq!(settings.steam_api_key, "abc");
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.host, "0.0.0.0");
        assert!(!settings.accept_invalid_certs);
    }

    #[test]
    fn missing_file_is_created_on_save() {
        let path = scratch_file("missing.yaml");
        let settings = Settings::load_or_create(path.clone()).expect("defaults");
        assert_eq!(settings.config_path.as_deref(), Some(path.as_path()));
        assert!(!path.exists());

        settings.save().expect("saved");
        let reloaded = Settings::load_from(path.clone()).expect("reloaded");
        assert_eq!(reloaded, settings);
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        let path = scratch_file("invalid.yaml");
        std::fs::write(&path, "port: [not a port").expect("written");
        assert!(matches!(
            Settings::load_or_create(path.clone()),
            Err(ConfigFilesError::Yaml(_))
        ));
        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn save_without_path_fails() {
        assert!(matches!(
            Settings::default().save(),
            Err(ConfigFilesError::NoConfigSet)
        ));
    }
}
