//! Configuration system
//!
//! Any `serde` type with a `Default` can be loaded from and saved to TOML or RON
//! through the [`Config`] trait; the format follows the file extension.

use std::path::Path;
use std::time::Duration;

pub use serde::{Deserialize, Serialize};

use crate::core::LoopPolicy;

/// Configuration trait
pub trait Config: Serialize + for<'de> Deserialize<'de> + Default {
    /// Load configuration from file
    ///
    /// # Errors
    /// I/O failures, parse failures and unsupported extensions.
    fn load_from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path)?;
        let contents = std::fs::read_to_string(path)?;

        match format {
            ConfigFormat::Toml => toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
            ConfigFormat::Ron => ron::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string())),
        }
    }

    /// Load configuration, falling back to defaults when the file does not exist
    ///
    /// # Errors
    /// Same as [`Config::load_from_file`], except for a missing file.
    fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::load_from_file(path)
        } else {
            log::info!("No config at {}, using defaults", path.display());
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    ///
    /// # Errors
    /// Serialization failures, I/O failures and unsupported extensions.
    fn save_to_file(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let path = path.as_ref();
        let contents = match ConfigFormat::from_path(path)? {
            ConfigFormat::Toml => toml::to_string_pretty(self).map_err(|e| ConfigError::Serialize(e.to_string()))?,
            ConfigFormat::Ron => ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
                .map_err(|e| ConfigError::Serialize(e.to_string()))?,
        };

        std::fs::write(path, contents).map_err(ConfigError::Io)
    }
}

enum ConfigFormat {
    Toml,
    Ron,
}

impl ConfigFormat {
    fn from_path(path: &Path) -> Result<Self, ConfigError> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("toml") => Ok(Self::Toml),
            Some("ron") => Ok(Self::Ron),
            _ => Err(ConfigError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Configuration errors
#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Parse error
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialize(String),

    /// Unsupported format
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Engine behaviour settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Application name used in logs
    pub app_name: String,

    /// Default `env_logger` filter when `RUST_LOG` is unset
    pub log_level: String,

    /// Stop after this many frames
    pub max_frames: Option<u64>,

    /// Stop after this many seconds of wall-clock time
    pub max_duration_secs: Option<f64>,

    /// Advance time by this many seconds per frame instead of reading the clock
    pub fixed_timestep: Option<f32>,

    /// Directory scene files are resolved against
    pub scene_dir: String,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            app_name: "Ember".to_string(),
            log_level: "info".to_string(),
            max_frames: None,
            max_duration_secs: None,
            fixed_timestep: None,
            scene_dir: "scenes".to_string(),
        }
    }
}

impl Config for EngineConfig {}

impl EngineConfig {
    /// Loop policy honouring `max_frames` and `max_duration_secs`.
    ///
    /// With both set the loop stops at whichever limit is reached first; with
    /// neither it runs until the state stack empties. A duration too large to
    /// represent is ignored.
    pub fn loop_policy(&self) -> LoopPolicy {
        let mut limits = Vec::new();
        if let Some(frames) = self.max_frames {
            limits.push(LoopPolicy::frames(frames));
        }
        if let Some(secs) = self.max_duration_secs {
            match Duration::try_from_secs_f64(secs.max(0.0)) {
                Ok(duration) => limits.push(LoopPolicy::timed(duration)),
                Err(err) => log::warn!("Ignoring max_duration_secs = {secs}: {err}"),
            }
        }
        match limits.len() {
            0 => LoopPolicy::forever(),
            1 => limits.remove(0),
            _ => LoopPolicy::all(limits),
        }
    }

    /// Resolve a scene file name against `scene_dir`
    pub fn scene_path(&self, file_name: &str) -> std::path::PathBuf {
        Path::new(&self.scene_dir).join(file_name)
    }
}
