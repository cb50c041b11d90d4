#![forbid(unsafe_code)]

//! Overlay configuration as data.
//!
//! Every tunable the controller uses lives in [`OverlayConfig`]. With the
//! `config` feature it can be loaded from TOML or JSON; missing keys keep
//! their defaults.
//!
//! ```toml
//! margin = 8.0
//! preferred_side = "above"
//! base_z = 100
//!
//! [estimated_root_size]
//! width = 240.0
//! height = 320.0
//! ```
//!
//! ```rust,ignore
//! let config = OverlayConfig::from_toml_file("perch.toml")?;
//! ```
//!
//! # Defaults
//!
//! The defaults reproduce the editor's hard-coded values: a 10px margin,
//! panels below their anchor, z-index 50 for the root panel and 60 for a
//! submenu, and size estimates of 200x400 (menu) and 120x100 (submenu)
//! used before the first measurement.

#[cfg(feature = "config")]
use std::path::Path;

#[cfg(feature = "config")]
use serde::{Deserialize, Serialize};

use perch_core::geometry::Size;
use perch_layout::{DEFAULT_MARGIN, Side};

/// Tunables for an [`OverlayController`](crate::OverlayController).
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "config", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "config", serde(default))]
pub struct OverlayConfig {
    /// Minimum distance from the viewport edges and from the anchor.
    pub margin: f32,

    /// Side the root panel tries first.
    pub preferred_side: Side,

    /// Side submenus try first (`left` for right-to-left layouts).
    pub submenu_side: Side,

    /// z-index of the root panel.
    pub base_z: u32,

    /// Added to `base_z` for a submenu.
    pub submenu_z_step: u32,

    /// Root panel size assumed before it has been measured.
    pub estimated_root_size: Size,

    /// Submenu size assumed before it has been measured.
    pub estimated_submenu_size: Size,

    /// Consecutive layout-changing reposition passes allowed without a new
    /// event before the layout is frozen.
    pub max_settle_passes: u32,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            margin: DEFAULT_MARGIN,
            preferred_side: Side::Below,
            submenu_side: Side::Right,
            base_z: 50,
            submenu_z_step: 10,
            estimated_root_size: Size::new(200.0, 400.0),
            estimated_submenu_size: Size::new(120.0, 100.0),
            max_settle_passes: 3,
        }
    }
}

impl OverlayConfig {
    /// Set the margin.
    #[must_use]
    pub fn margin(mut self, margin: f32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the root panel's preferred side.
    #[must_use]
    pub fn preferred_side(mut self, side: Side) -> Self {
        self.preferred_side = side;
        self
    }

    /// Set the side submenus try first.
    #[must_use]
    pub fn submenu_side(mut self, side: Side) -> Self {
        self.submenu_side = side;
        self
    }

    /// Set the root z-index and the submenu step above it.
    #[must_use]
    pub fn z_index(mut self, base: u32, submenu_step: u32) -> Self {
        self.base_z = base;
        self.submenu_z_step = submenu_step;
        self
    }

    /// Set the pre-measurement size estimates.
    #[must_use]
    pub fn estimated_sizes(mut self, root: Size, submenu: Size) -> Self {
        self.estimated_root_size = root;
        self.estimated_submenu_size = submenu;
        self
    }

    /// Set the settle pass cap.
    #[must_use]
    pub fn max_settle_passes(mut self, passes: u32) -> Self {
        self.max_settle_passes = passes;
        self
    }

    /// z-index assigned to submenus.
    #[must_use]
    pub fn submenu_z(&self) -> u32 {
        self.base_z.saturating_add(self.submenu_z_step)
    }

    /// Load from a TOML string and validate.
    #[cfg(feature = "config")]
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(s).map_err(ConfigError::Toml)?;
        config.validated()
    }

    /// Load from a TOML file on disk.
    #[cfg(feature = "config")]
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_toml_str(&content)
    }

    /// Load from a JSON string and validate.
    #[cfg(feature = "config")]
    pub fn from_json_str(s: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(s).map_err(ConfigError::Json)?;
        config.validated()
    }

    /// Load from a JSON file on disk.
    #[cfg(feature = "config")]
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path.as_ref()).map_err(ConfigError::Io)?;
        Self::from_json_str(&content)
    }

    /// Validate all parameters are within acceptable ranges.
    ///
    /// Returns a list of validation errors. An empty list means the config
    /// is valid.
    #[must_use]
    pub fn validate(&self) -> Vec<String> {
        let mut errors = Vec::new();

        if !self.margin.is_finite() || self.margin < 0.0 {
            errors.push(format!("margin must be finite and >= 0, got {}", self.margin));
        }

        if self.submenu_side.is_vertical() {
            errors.push(format!(
                "submenu_side must be left or right, got {}",
                self.submenu_side
            ));
        }

        if self.submenu_z_step == 0 {
            errors.push("submenu_z_step must be > 0 so submenus stack above the root".into());
        }

        if !self.estimated_root_size.is_valid() {
            errors.push(format!(
                "estimated_root_size must be finite and non-negative, got {}x{}",
                self.estimated_root_size.width, self.estimated_root_size.height
            ));
        }

        if !self.estimated_submenu_size.is_valid() {
            errors.push(format!(
                "estimated_submenu_size must be finite and non-negative, got {}x{}",
                self.estimated_submenu_size.width, self.estimated_submenu_size.height
            ));
        }

        if self.max_settle_passes == 0 {
            errors.push("max_settle_passes must be > 0".into());
        }

        errors
    }

    /// `self` if it validates, otherwise [`ConfigError::Validation`].
    pub fn validated(self) -> Result<Self, ConfigError> {
        let errors = self.validate();
        if errors.is_empty() {
            Ok(self)
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

/// Errors that can occur when loading an overlay configuration.
#[derive(Debug)]
pub enum ConfigError {
    /// I/O error reading a file.
    Io(std::io::Error),
    /// TOML parse error.
    #[cfg(feature = "config")]
    Toml(toml::de::Error),
    /// JSON parse error.
    #[cfg(feature = "config")]
    Json(serde_json::Error),
    /// Validation errors.
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io(e) => write!(f, "I/O error: {e}"),
            #[cfg(feature = "config")]
            Self::Toml(e) => write!(f, "TOML parse error: {e}"),
            #[cfg(feature = "config")]
            Self::Json(e) => write!(f, "JSON parse error: {e}"),
            Self::Validation(errors) => {
                write!(f, "validation errors: {}", errors.join("; "))
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Toml(e) => Some(e),
            #[cfg(feature = "config")]
            Self::Json(e) => Some(e),
            Self::Validation(_) => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
