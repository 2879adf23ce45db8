//! Configuration management for mincopy
//!
//! Two kinds of configuration live here:
//!
//! - **[`SyncConfig`]**: what to mirror, built once from command line input by
//!   [`SyncConfigBuilder`] (roots resolved to absolute paths, glob lists parsed
//!   with documented fallbacks)
//! - **[`Settings`]**: tunables (cache limits, report interval, log level)
//!   layered from defaults, an optional YAML/TOML/JSON file and `MINCOPY__*`
//!   environment variables
//!
//! # Examples
//!
//! ```rust,no_run
//! use mincopy_config::{SettingsBuilder, SyncConfigBuilder};
//!
//! let settings = SettingsBuilder::new()
//!     .add_source_file("mincopy.toml")
//!     .add_env_prefix("MINCOPY")
//!     .build()
//!     .expect("Failed to load settings");
//!
//! let config = SyncConfigBuilder::new("src", "dist")
//!     .globs(Some(r#"["**/*.js", "**/*.css"]"#))
//!     .build()
//!     .expect("Invalid roots");
//!
//! println!("Cache holds {} files", settings.cache.max_entries);
//! println!("Mirroring {}", config.source_root.display());
//! ```

#![deny(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use serde::{Deserialize, Serialize};
use std::time::Duration;

pub mod builder;
pub mod error;
pub mod globs;
pub mod loader;
pub mod sync_config;

pub use builder::SettingsBuilder;
pub use error::{ConfigError, ConfigResult};
pub use globs::{parse_glob_list, resolve_excludes, resolve_includes};
pub use loader::SettingsLoader;
pub use mincopy_types::SyncConfig;
pub use sync_config::SyncConfigBuilder;

/// Tunable settings for a mincopy run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Destination content cache
    pub cache: CacheSettings,
    /// Activity summaries
    pub reporting: ReportingSettings,
    /// Logging
    pub logging: LoggingSettings,
}

/// Destination content cache settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Maximum number of cached destination files
    pub max_entries: usize,
    /// Seconds a cached entry stays valid
    pub ttl_secs: u64,
}

impl CacheSettings {
    /// Entry lifetime as a duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: 100,
            ttl_secs: 60 * 60,
        }
    }
}

/// Activity summary settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportingSettings {
    /// Seconds between two summaries
    pub interval_secs: u64,
}

impl ReportingSettings {
    /// Interval as a duration
    pub fn interval(&self) -> Duration {
        Duration::from_secs(self.interval_secs)
    }
}

impl Default for ReportingSettings {
    fn default() -> Self {
        Self { interval_secs: 5 }
    }
}

/// Logging settings
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoggingSettings {
    /// Default log level when neither `RUST_LOG` nor a CLI flag overrides it
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.cache.max_entries, 100);
        assert_eq!(settings.cache.ttl(), Duration::from_secs(3600));
        assert_eq!(settings.reporting.interval(), Duration::from_secs(5));
        assert_eq!(settings.logging.level, "info");
    }
}
