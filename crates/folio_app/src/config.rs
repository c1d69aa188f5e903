// SPDX-License-Identifier: MIT OR Apache-2.0
//! Page configuration.
//!
//! This module manages the settings of a page session:
//! - Viewport size and frame rate
//! - Intro, parallax and scroll reveal timing
//! - Asset paths

use folio_sequencer::{IntroSettings, ParallaxSettings, ScrollRevealSettings};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Current configuration format version
pub const CONFIG_FORMAT_VERSION: u32 = 1;

/// Configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "folio.ron";

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File could not be read or written
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// File is not valid RON
    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),

    /// Settings could not be serialized
    #[error("Serialization error: {0}")]
    Serialize(#[from] ron::Error),

    /// Written by a newer version
    #[error("Config version {found} is newer than supported version {supported}")]
    UnsupportedVersion {
        /// Version in the file
        found: u32,
        /// Newest supported version
        supported: u32,
    },

    /// A value is out of range
    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Initial viewport size
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewportSettings {
    /// Width in pixels
    pub width: f32,
    /// Height in pixels
    pub height: f32,
}

impl Default for ViewportSettings {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Image sources used by the page
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssetSettings {
    /// Intro mask image and landing background layer
    pub background: String,
    /// Landing sky layer
    pub sky: String,
    /// Character cut-out
    pub character: String,
    /// Contact section backdrop
    pub contact_background: String,
}

impl Default for AssetSettings {
    fn default() -> Self {
        Self {
            background: "./bg.png".to_string(),
            sky: "./bg.png".to_string(),
            character: "./mebg.png".to_string(),
            contact_background: "bg2.png".to_string(),
        }
    }
}

/// An asset path that looks like a typo
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetWarning {
    /// Which asset
    pub slot: &'static str,
    /// Path as configured
    pub path: String,
    /// Path actually used
    pub normalized: String,
}

/// Normalize an asset path. Returns the path to use and whether the input
/// looked broken (a leading `.` with no separator, as in `.bg.png`).
pub fn normalize_asset_path(path: &str) -> (String, bool) {
    if let Some(rest) = path.strip_prefix("./") {
        return (rest.to_string(), false);
    }
    match path.strip_prefix('.') {
        Some(rest) if !rest.starts_with('.') && !rest.is_empty() => (rest.to_string(), true),
        _ => (path.to_string(), false),
    }
}

impl AssetSettings {
    /// Normalized copy of the settings plus a warning per suspicious path
    pub fn normalized(&self) -> (AssetSettings, Vec<AssetWarning>) {
        let mut warnings = Vec::new();
        let mut fix = |slot: &'static str, path: &str| {
            let (normalized, suspicious) = normalize_asset_path(path);
            if suspicious {
                warnings.push(AssetWarning {
                    slot,
                    path: path.to_string(),
                    normalized: normalized.clone(),
                });
            }
            normalized
        };

        let assets = AssetSettings {
            background: fix("background", &self.background),
            sky: fix("sky", &self.sky),
            character: fix("character", &self.character),
            contact_background: fix("contact_background", &self.contact_background),
        };
        (assets, warnings)
    }
}

/// Complete page configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PortfolioConfig {
    /// Format version
    pub version: u32,
    /// Initial viewport
    pub viewport: ViewportSettings,
    /// Animation frames per second
    pub frame_rate: f32,
    /// Intro entrance
    pub intro: IntroSettings,
    /// Pointer parallax
    pub parallax: ParallaxSettings,
    /// About panel scroll reveal
    pub about: ScrollRevealSettings,
    /// Image sources
    pub assets: AssetSettings,
}

impl Default for PortfolioConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_FORMAT_VERSION,
            viewport: ViewportSettings::default(),
            frame_rate: 60.0,
            intro: IntroSettings::default(),
            parallax: ParallaxSettings::default(),
            about: ScrollRevealSettings::default(),
            assets: AssetSettings::default(),
        }
    }
}

impl PortfolioConfig {
    /// Parse from RON text
    pub fn from_ron(text: &str) -> Result<Self, ConfigError> {
        let config: PortfolioConfig = ron::from_str(text)?;

        if config.version > CONFIG_FORMAT_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: config.version,
                supported: CONFIG_FORMAT_VERSION,
            });
        }
        config.validate()?;
        Ok(config)
    }

    /// Load from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_ron(&content)?;
        tracing::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Render as pretty RON
    pub fn to_ron(&self) -> Result<String, ConfigError> {
        let pretty = ron::ser::PrettyConfig::default()
            .struct_names(true)
            .enumerate_arrays(false);
        Ok(ron::ser::to_string_pretty(self, pretty)?)
    }

    /// Save to a file
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        std::fs::write(path, self.to_ron()?)?;
        tracing::info!("Saved config to {}", path.display());
        Ok(())
    }

    /// Reject values the session cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.frame_rate > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "frame_rate must be positive, got {}",
                self.frame_rate
            )));
        }
        if !(self.viewport.width > 0.0 && self.viewport.height > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport must be non-empty, got {}x{}",
                self.viewport.width, self.viewport.height
            )));
        }
        if !(0.0..=1.0).contains(&self.intro.threshold) {
            return Err(ConfigError::Invalid(format!(
                "intro threshold must be within 0..=1, got {}",
                self.intro.threshold
            )));
        }
        Ok(())
    }
}
