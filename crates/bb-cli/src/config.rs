//! Configuration loading and timezone resolution.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono_tz::Tz;
use figment::Figment;
use figment::providers::{Env, Format, Serialized, Toml};
use serde::{Deserialize, Serialize};

/// Application configuration.
#[derive(Clone, Serialize, Deserialize)]
pub struct Config {
    /// Path to the database file.
    pub database_path: PathBuf,

    /// IANA timezone override. When unset, the system timezone is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_path", &self.database_path)
            .field("timezone", &self.timezone)
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs_data_path().unwrap_or_else(|| PathBuf::from("."));
        Self {
            database_path: data_dir.join("bb.db"),
            timezone: None,
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

        // Load from environment variables (BB_*)
        figment = figment.merge(Env::prefixed("BB_"));

        figment.extract()
    }
}

/// Resolves the timezone for day-boundary computation.
///
/// Priority: explicit flag, config file, system timezone. Anything missing
/// or unresolvable falls back to UTC with a warning rather than failing
/// the command.
pub fn resolve_timezone(flag: Option<&str>, config: &Config) -> Tz {
    let name = flag
        .map(ToString::to_string)
        .or_else(|| config.timezone.clone())
        .or_else(|| iana_time_zone::get_timezone().ok());

    let Some(name) = name else {
        tracing::warn!("could not determine system timezone; using UTC");
        return Tz::UTC;
    };

    match bb_core::resolve_timezone(&name) {
        Ok(tz) => tz,
        Err(err) => {
            tracing::warn!(%err, "using UTC");
            Tz::UTC
        }
    }
}

/// Returns the platform-specific config directory for bb.
fn dirs_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("bb"))
}

/// Returns the platform-specific data directory for bb.
///
/// On Linux: `~/.local/share/bb`
pub fn dirs_data_path() -> Option<PathBuf> {
    dirs::data_dir().map(|p| p.join("bb"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_uses_data_dir_for_db() {
        let config = Config::default();
        let data_dir = dirs_data_path().unwrap();
        assert_eq!(config.database_path, data_dir.join("bb.db"));
        assert_eq!(config.timezone, None);
    }

    #[test]
    fn flag_beats_config_timezone() {
        let config = Config {
            timezone: Some("Asia/Tokyo".to_string()),
            ..Config::default()
        };
        let tz = resolve_timezone(Some("America/New_York"), &config);
        assert_eq!(tz.name(), "America/New_York");
    }

    #[test]
    fn config_timezone_is_used_without_flag() {
        let config = Config {
            timezone: Some("Asia/Tokyo".to_string()),
            ..Config::default()
        };
        assert_eq!(resolve_timezone(None, &config).name(), "Asia/Tokyo");
    }

    #[test]
    fn unresolvable_timezone_falls_back_to_utc() {
        let config = Config::default();
        assert_eq!(resolve_timezone(Some("Not/AZone"), &config), Tz::UTC);
    }
}
