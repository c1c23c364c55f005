use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{env, fs, path::PathBuf};

/// Environment variable consulted when the config file carries no API key.
pub const API_KEY_ENV: &str = "OPENWEATHER_API_KEY";

fn default_port() -> u16 {
    8000
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// api_key = "..."
/// port = 8000
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// OpenWeather API key. Falls back to `OPENWEATHER_API_KEY` when unset.
    pub api_key: Option<String>,

    /// Port the HTTP server binds to.
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            port: default_port(),
        }
    }
}

impl Config {
    /// The OpenWeather API key: config file first, then the environment.
    pub fn openweather_api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| env::var(API_KEY_ENV).ok().filter(|v| !v.is_empty()))
    }

    pub fn set_api_key(&mut self, api_key: String) {
        self.api_key = Some(api_key);
    }

    /// Load config from disk, or return the default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        let path = Self::config_file_path()?;
        if !path.exists() {
            // First run: no config file, rely on defaults plus environment.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        let path = Self::config_file_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(&path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "forecast-service", "forecast-server")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_has_standard_port_and_no_key() {
        let cfg = Config::default();
        assert_eq!(cfg.port, 8000);
        assert!(cfg.api_key.is_none());
    }

    #[test]
    fn file_key_takes_precedence_over_environment() {
        let mut cfg = Config::default();
        cfg.set_api_key("FILE_KEY".to_string());
        assert_eq!(cfg.openweather_api_key().as_deref(), Some("FILE_KEY"));
    }

    #[test]
    fn port_defaults_when_absent_from_toml() {
        let cfg: Config = toml::from_str(r#"api_key = "K""#).unwrap();
        assert_eq!(cfg.port, 8000);
        assert_eq!(cfg.api_key.as_deref(), Some("K"));
    }

    #[test]
    fn config_roundtrips_through_toml() {
        let mut cfg = Config::default();
        cfg.set_api_key("K".to_string());
        cfg.port = 9001;

        let text = toml::to_string_pretty(&cfg).unwrap();
        let parsed: Config = toml::from_str(&text).unwrap();
        assert_eq!(parsed.port, 9001);
        assert_eq!(parsed.api_key.as_deref(), Some("K"));
    }
}
