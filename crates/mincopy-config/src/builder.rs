//! Settings builder for layered configuration loading

use crate::{ConfigError, ConfigResult, Settings};
use config::{ConfigBuilder as ConfigBuilderInner, Environment, File, FileFormat};
use std::path::{Path, PathBuf};

/// Separator between nested keys in environment variable names
const ENV_SEPARATOR: &str = "__";

/// Builder loading [`Settings`] from defaults, files and environment variables
#[derive(Debug)]
pub struct SettingsBuilder {
    inner: ConfigBuilderInner<config::builder::DefaultState>,
    sources: Vec<SettingsSource>,
}

#[derive(Debug, Clone)]
enum SettingsSource {
    File { path: PathBuf, format: FileFormat },
    Environment { prefix: String },
}

impl SettingsBuilder {
    /// Create a new settings builder
    pub fn new() -> Self {
        Self {
            inner: config::Config::builder(),
            sources: Vec::new(),
        }
    }

    /// Add a settings file; missing files are skipped
    pub fn add_source_file<P: AsRef<Path>>(mut self, path: P) -> Self {
        let path = path.as_ref().to_path_buf();
        let format = Self::detect_format(&path);
        self.sources.push(SettingsSource::File { path, format });
        self
    }

    /// Add environment variables starting with `prefix`
    pub fn add_env_prefix<S: Into<String>>(mut self, prefix: S) -> Self {
        self.sources.push(SettingsSource::Environment {
            prefix: prefix.into(),
        });
        self
    }

    /// Build and validate the settings
    pub fn build(mut self) -> ConfigResult<Settings> {
        // Defaults are always the base layer
        self.inner = self
            .inner
            .add_source(config::Config::try_from(&Settings::default())?);

        for source in &self.sources {
            match source {
                SettingsSource::File { path, format } => {
                    if path.exists() {
                        self.inner = self
                            .inner
                            .add_source(File::from(path.clone()).format(*format));
                    }
                }
                SettingsSource::Environment { prefix } => {
                    self.inner = self.inner.add_source(
                        Environment::with_prefix(prefix)
                            .separator(ENV_SEPARATOR)
                            .try_parsing(true),
                    );
                }
            }
        }

        let settings: Settings = self.inner.build()?.try_deserialize()?;
        Self::validate(&settings)?;

        Ok(settings)
    }

    fn detect_format(path: &Path) -> FileFormat {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => FileFormat::Toml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Yaml, // Default to YAML
        }
    }

    /// Validate the settings
    fn validate(settings: &Settings) -> ConfigResult<()> {
        if settings.cache.max_entries == 0 {
            return Err(ConfigError::validation(
                "Cache capacity must be greater than 0",
            ));
        }

        if settings.cache.ttl_secs == 0 {
            return Err(ConfigError::validation(
                "Cache TTL must be greater than 0 seconds",
            ));
        }

        if settings.reporting.interval_secs == 0 {
            return Err(ConfigError::validation(
                "Report interval must be greater than 0 seconds",
            ));
        }

        if !["trace", "debug", "info", "warn", "error"].contains(&settings.logging.level.as_str()) {
            return Err(ConfigError::validation(
                "Log level must be one of: trace, debug, info, warn, error",
            ));
        }

        Ok(())
    }
}

impl Default for SettingsBuilder {
    fn default() -> Self {
        Self::new()
    }
}
