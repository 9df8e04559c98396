//! TextLoop configuration
//!
//! Every field has a default, so a configuration file only needs to name
//! what it changes:
//!
//! ```toml
//! interval_ms = 2000
//!
//! [spring]
//! stiffness = 260
//!
//! [style]
//! color = "#333"
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;
use textloop_animation::SpringConfig;
use textloop_core::{Result, Size, TextLoopError};

use crate::style::BoxStyle;

fn default_interval_ms() -> u64 {
    3000
}

fn default_adjusting_ms() -> u32 {
    150
}

fn default_stiffness() -> f32 {
    340.0
}

fn default_damping() -> f32 {
    30.0
}

/// Spring used by the entering item
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SpringSettings {
    #[serde(default = "default_stiffness")]
    pub stiffness: f32,
    #[serde(default = "default_damping")]
    pub damping: f32,
}

impl Default for SpringSettings {
    fn default() -> Self {
        Self {
            stiffness: default_stiffness(),
            damping: default_damping(),
        }
    }
}

impl SpringSettings {
    pub fn to_config(self) -> SpringConfig {
        SpringConfig::new(self.stiffness, self.damping, 1.0)
    }
}

/// Options for a [`TextLoop`](crate::TextLoop)
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TextLoopConfig {
    /// Milliseconds between automatic advances
    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,
    /// Duration of the box width transition
    #[serde(default = "default_adjusting_ms")]
    pub adjusting_ms: u32,
    /// Size used before the first measurement; a zero width means unknown
    #[serde(default)]
    pub initial_width: f32,
    #[serde(default)]
    pub initial_height: f32,
    /// Outer container style
    #[serde(default)]
    pub style: BoxStyle,
    #[serde(default)]
    pub spring: SpringSettings,
}

impl Default for TextLoopConfig {
    fn default() -> Self {
        Self {
            interval_ms: default_interval_ms(),
            adjusting_ms: default_adjusting_ms(),
            initial_width: 0.0,
            initial_height: 0.0,
            style: BoxStyle::default(),
            spring: SpringSettings::default(),
        }
    }
}

impl TextLoopConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn interval_ms(mut self, ms: u64) -> Self {
        self.interval_ms = ms;
        self
    }

    pub fn adjusting_ms(mut self, ms: u32) -> Self {
        self.adjusting_ms = ms;
        self
    }

    pub fn initial_size(mut self, width: f32, height: f32) -> Self {
        self.initial_width = width;
        self.initial_height = height;
        self
    }

    pub fn style(mut self, style: BoxStyle) -> Self {
        self.style = style;
        self
    }

    pub fn spring(mut self, stiffness: f32, damping: f32) -> Self {
        self.spring = SpringSettings { stiffness, damping };
        self
    }

    pub fn initial(&self) -> Size {
        Size::new(self.initial_width, self.initial_height)
    }

    /// Reject values the widget cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.interval_ms == 0 {
            return Err(TextLoopError::InvalidInterval(self.interval_ms));
        }
        if !self.initial().is_valid() {
            return Err(TextLoopError::InvalidSize {
                width: self.initial_width,
                height: self.initial_height,
            });
        }
        if !self.spring.to_config().is_valid() {
            return Err(TextLoopError::InvalidSpring {
                stiffness: self.spring.stiffness,
                damping: self.spring.damping,
            });
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(input: &str) -> Result<Self> {
        let config: Self =
            toml::from_str(input).map_err(|e| TextLoopError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a TOML file
    pub fn from_path(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)
            .map_err(|e| TextLoopError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&raw)
    }
}
