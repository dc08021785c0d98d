//! Configuration system for luagen.
//!
//! Settings are resolved in the following order of precedence (highest to lowest):
//! 1. **Environment Variables**: `LUAGEN__*`, with `__` separating nested keys
//!    (e.g. `LUAGEN__LAYOUT__SOURCE_DIR=engine/src/engine`).
//! 2. **Configuration File**: `luagen.toml` in the working directory, or the
//!    file passed explicitly.
//! 3. **Default Values**: the engine layout and sol2 idioms the tool was built for.
//!
//! # Configuration File Example
//!
//! ```toml
//! [layout]
//! source_dir = "apps/abyssengine/src/engine"
//! transitive_includes = false
//!
//! [bindings]
//! host_class = "ScriptHost"
//! node_aggregate = "Node"
//!
//! [stub]
//! module_name = "abyss"
//! version = "0.1"
//!
//! [output]
//! dir = "library"
//!
//! [logging]
//! level = "debug"
//! format = "pretty"
//! ```

pub mod logging;

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use luagen_core::{BindingIdioms, GeneratorSettings, SourceLayout, StubSettings};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Default configuration file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "luagen.toml";

/// Prefix of environment variable overrides.
pub const ENV_PREFIX: &str = "LUAGEN__";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct AppConfig {
    /// Where the native sources live.
    pub layout: SourceLayout,
    /// Registration idioms recognized in the host source.
    pub bindings: BindingIdioms,
    /// Stub naming and header.
    pub stub: StubSettings,
    pub output: OutputConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory the stub files are written to.
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("library"),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    /// trace, debug, info, warn or error
    pub level: String,
    pub format: LogFormat,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            format: LogFormat::Pretty,
        }
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl AppConfig {
    /// Loads configuration from defaults, the config file and the environment.
    ///
    /// With `config_path` set the file must exist; otherwise `luagen.toml` in
    /// the working directory is used when present.
    pub fn load(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        let file = match config_path {
            Some(path) if !path.is_file() => return Err(ConfigError::NotFound(path.to_path_buf())),
            Some(path) => path.to_path_buf(),
            None => PathBuf::from(DEFAULT_CONFIG_FILE),
        };

        tracing::debug!(path = %file.display(), "Loading configuration");

        let config: AppConfig = Figment::from(Serialized::defaults(AppConfig::default()))
            .merge(Toml::file(&file))
            .merge(Env::prefixed(ENV_PREFIX).split("__"))
            .extract()?;

        config.validate()?;
        Ok(config)
    }

    /// Engine settings derived from this configuration.
    pub fn generator_settings(&self) -> GeneratorSettings {
        GeneratorSettings {
            layout: self.layout.clone(),
            bindings: self.bindings.clone(),
            stub: self.stub.clone(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let required = [
            ("layout.host_header", self.layout.host_header.as_os_str().is_empty()),
            ("layout.host_source", self.layout.host_source.as_os_str().is_empty()),
            ("layout.node_header", self.layout.node_header.as_os_str().is_empty()),
            ("bindings.module_variable", self.bindings.module_variable.is_empty()),
            ("bindings.host_class", self.bindings.host_class.is_empty()),
            ("bindings.usertype_call", self.bindings.usertype_call.is_empty()),
            ("bindings.node_usertype_call", self.bindings.node_usertype_call.is_empty()),
            ("bindings.property_wrapper", self.bindings.property_wrapper.is_empty()),
            ("bindings.node_aggregate", self.bindings.node_aggregate.is_empty()),
            ("bindings.node_variable", self.bindings.node_variable.is_empty()),
            ("bindings.node_placeholder", self.bindings.node_placeholder.is_empty()),
            ("stub.module_name", self.stub.module_name.is_empty()),
        ];
        if let Some((key, _)) = required.iter().find(|(_, empty)| *empty) {
            return Err(ConfigError::Invalid(format!("'{key}' cannot be empty")));
        }

        if !VALID_LOG_LEVELS.contains(&self.logging.level.as_str()) {
            return Err(ConfigError::Invalid(format!(
                "Invalid log level '{}', must be one of: {}",
                self.logging.level,
                VALID_LOG_LEVELS.join(", ")
            )));
        }

        Ok(())
    }
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Figment error: {0}")]
    Figment(#[from] figment::Error),

    #[error("Configuration file not found: {0}")]
    NotFound(PathBuf),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

impl From<ConfigError> for figment::Error {
    fn from(err: ConfigError) -> figment::Error {
        use figment::error::Kind;
        figment::Error::from(Kind::Message(err.to_string()))
    }
}
