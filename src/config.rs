use std::path::{Path, PathBuf};
use serde::{Deserialize, Serialize};

use crate::{
    engine::FfmpegEngine,
    error::{ConfigError, Result},
};

/// Log levels understood by ffmpeg's `-loglevel`.
const ENGINE_LOG_LEVELS: &[&str] = &[
    "quiet", "panic", "fatal", "error", "warning", "info", "verbose", "debug", "trace",
];

/// Main configuration for cycle-video
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Media engine settings
    pub engine: EngineConfig,

    /// Output placement
    pub output: OutputConfig,
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .map_err(|_| ConfigError::FileNotFound { path: path.display().to_string() })?;

        let config: Config = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Render the configuration as TOML
    pub fn to_toml(&self) -> Result<String> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| ConfigError::InvalidValue {
                key: "config".to_string(),
                value: e.to_string()
            })?;
        Ok(content)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.engine.validate()?;
        Ok(())
    }
}

/// Media engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Executable invoked as the engine
    pub program: PathBuf,

    /// Replace an existing output file (`-y`) or refuse (`-n`)
    pub overwrite: bool,

    /// ffmpeg `-loglevel`
    pub log_level: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            program: PathBuf::from("ffmpeg"),
            overwrite: true,
            log_level: "error".to_string(),
        }
    }
}

impl EngineConfig {
    fn validate(&self) -> Result<()> {
        if self.program.as_os_str().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "engine.program".to_string(),
                value: String::new()
            }.into());
        }

        if !ENGINE_LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(ConfigError::InvalidValue {
                key: "engine.log_level".to_string(),
                value: self.log_level.clone()
            }.into());
        }

        Ok(())
    }

    /// Build the ffmpeg engine described by this section.
    pub fn build_engine(&self) -> FfmpegEngine {
        FfmpegEngine::new(self.program.clone()).with_log_level(self.log_level.clone())
    }
}

/// Output placement configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory receiving output files; the working directory when unset
    #[serde(skip_serializing_if = "Option::is_none")]
    pub directory: Option<PathBuf>,
}
