use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::{
    error::{ConfigError, Result},
    filter::FilterKind,
};

/// Main configuration for the Photo-Booth
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Countdown and capture settings
    pub capture: CaptureConfig,

    /// Filter settings
    pub filter: FilterConfig,

    /// Output settings
    pub output: OutputConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capture: CaptureConfig::default(),
            filter: FilterConfig::default(),
            output: OutputConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|_| ConfigError::FileNotFound {
            path: path.display().to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|_| ConfigError::ParseFailed {
            path: path.display().to_string(),
        })?;
        Ok(config)
    }

    /// Save configuration to a TOML file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = toml::to_string_pretty(self).map_err(|e| ConfigError::InvalidValue {
            key: "config".to_string(),
            value: e.to_string(),
        })?;

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.capture.validate()?;
        self.output.validate()?;
        Ok(())
    }
}

/// Countdown and capture configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CaptureConfig {
    /// Countdown start value (ticks emitted before the capture)
    pub start_count: u32,

    /// Interval between countdown ticks in milliseconds
    pub tick_interval_ms: u64,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        Self {
            start_count: 3,
            tick_interval_ms: 1000,
        }
    }
}

impl CaptureConfig {
    fn validate(&self) -> Result<()> {
        if self.start_count == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capture.start_count".to_string(),
                value: self.start_count.to_string(),
            }
            .into());
        }

        if self.tick_interval_ms == 0 {
            return Err(ConfigError::InvalidValue {
                key: "capture.tick_interval_ms".to_string(),
                value: self.tick_interval_ms.to_string(),
            }
            .into());
        }

        Ok(())
    }
}

/// Filter configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Filter active when the booth starts
    pub default: FilterKind,
}

/// Output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Directory where captured photos are stored
    pub directory: PathBuf,

    /// File name for the captured photo
    pub file_name: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("photos"),
            file_name: "captured_image.png".to_string(),
        }
    }
}

impl OutputConfig {
    fn validate(&self) -> Result<()> {
        if self.file_name.is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "output.file_name".to_string(),
                value: self.file_name.clone(),
            }
            .into());
        }

        Ok(())
    }
}
