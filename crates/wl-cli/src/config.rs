//! Configuration loading and management.

use std::fmt;
use std::path::{Path, PathBuf};

use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};
use wl_core::{InvalidRate, WageConfig};
use wl_core::pairing::DEFAULT_HOURLY_RATE;

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Commute log written by the recorder.
    pub log_path: PathBuf,
    /// Where `wl export` writes the CSV report.
    pub report_path: PathBuf,
    /// Pay per hour worked.
    pub hourly_rate: f64,
    /// SmartThings virtual device that mirrors the phone battery.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub device_id: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("log_path", &self.log_path)
            .field("report_path", &self.report_path)
            .field("hourly_rate", &self.hourly_rate)
            .field("device_id", &self.device_id.as_ref().map(|_| "[SET]"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            log_path: data_dir.join("commute.txt"),
            report_path: data_dir.join("commute_report.csv"),
            hourly_rate: DEFAULT_HOURLY_RATE,
            device_id: None,
        }
    }
}

impl Config {
    /// Loads configuration, optionally from a specific file.
    #[expect(
        clippy::result_large_err,
        reason = "figment::Error is large but only returned at startup"
    )]
    pub fn load_from(config_path: Option<&Path>) -> Result<Self, figment::Error> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Load from default config location
        if let Some(config_dir) = dirs_config_path() {
            figment = figment.merge(Toml::file(config_dir.join("config.toml")));
        }

        // Load from specified config file
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Load from environment variables (WL_*)
        figment = figment.merge(Env::prefixed("WL_"));

        let config: Self = figment.extract()?;
        config
            .wage()
            .map_err(|e| figment::Error::from(format!("invalid hourly_rate: {e}")))?;
        Ok(config)
    }

    /// Pay settings for the core pipeline.
    pub fn wage(&self) -> Result<WageConfig, InvalidRate> {
        WageConfig::new(self.hourly_rate)
    }
}

/// Returns the platform-specific config directory for wl.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("wl"))
}

/// Returns the platform-specific data directory for wl.
///
/// On Linux: `~/.local/share/wl`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("wl"))
}
