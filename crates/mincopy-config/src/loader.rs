//! Settings loader utilities

use crate::{ConfigError, ConfigResult, Settings, SettingsBuilder};
use std::path::{Path, PathBuf};

/// Environment prefix for settings overrides, e.g. `MINCOPY__CACHE__MAX_ENTRIES`
pub const ENV_PREFIX: &str = "MINCOPY";

/// Settings loader with common loading patterns
pub struct SettingsLoader;

impl SettingsLoader {
    /// Load settings from the first settings file found in `dir`
    pub fn load_default_in<P: AsRef<Path>>(dir: P) -> ConfigResult<Settings> {
        let mut builder = SettingsBuilder::new();

        if let Some(path) = Self::find_settings_file(dir.as_ref()) {
            tracing::debug!("Loading settings from {}", path.display());
            builder = builder.add_source_file(path);
        }

        builder.add_env_prefix(ENV_PREFIX).build()
    }

    /// Load settings from a specific file, which must exist
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Settings> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "Settings file not found",
                ),
            });
        }

        SettingsBuilder::new()
            .add_source_file(path)
            .add_env_prefix(ENV_PREFIX)
            .build()
    }

    /// Candidate settings files in `dir`, in lookup order
    pub fn default_paths(dir: &Path) -> Vec<PathBuf> {
        ["mincopy.toml", "mincopy.yaml", "mincopy.yml", "mincopy.json"]
            .iter()
            .map(|name| dir.join(name))
            .collect()
    }

    fn find_settings_file(dir: &Path) -> Option<PathBuf> {
        Self::default_paths(dir).into_iter().find(|path| path.exists())
    }
}
