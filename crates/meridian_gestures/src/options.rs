//! Handler manager options
//!
//! Options are plain data and can be loaded from a TOML table:
//!
//! ```toml
//! interactive = true
//! bearing_snap = 7.0
//! pitch_rotate_key = "control"
//!
//! [pan_inertia]
//! deceleration = 2500.0
//! max_speed = 1400.0
//! ```

use std::fs;
use std::path::Path;

use meridian_animation::InertiaOptions;
use meridian_platform::Modifiers;
use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Modifier key that turns a drag into pitch/rotate
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PitchRotateKey {
    Control,
    Alt,
    Shift,
    Meta,
}

impl PitchRotateKey {
    /// Whether this key is held in `modifiers`
    pub fn is_held(self, modifiers: &Modifiers) -> bool {
        match self {
            PitchRotateKey::Control => modifiers.ctrl,
            PitchRotateKey::Alt => modifiers.alt,
            PitchRotateKey::Shift => modifiers.shift,
            PitchRotateKey::Meta => modifiers.meta,
        }
    }
}

/// Construction-time settings
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HandlerManagerOptions {
    /// Whether input events are processed at all
    pub interactive: bool,
    /// Couple pitch changes to rotate gestures
    pub pitch_with_rotate: bool,
    /// Pixels a pointer may travel before a press stops being a click
    pub click_tolerance: f64,
    /// Bearings within this many degrees of north snap back to 0
    pub bearing_snap: f64,
    /// Optional modifier key for pitch-via-rotate
    pub pitch_rotate_key: Option<PitchRotateKey>,
    /// Momentum parameters for panning
    pub pan_inertia: InertiaOptions,
}

impl Default for HandlerManagerOptions {
    fn default() -> Self {
        Self {
            interactive: true,
            pitch_with_rotate: true,
            click_tolerance: 3.0,
            bearing_snap: 7.0,
            pitch_rotate_key: None,
            pan_inertia: InertiaOptions::pan(),
        }
    }
}

impl HandlerManagerOptions {
    /// Parse and validate options from a TOML string
    pub fn from_toml_str(source: &str) -> Result<Self> {
        let options: Self = toml::from_str(source)?;
        options.validate()?;
        Ok(options)
    }

    /// Read options from a TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let source = fs::read_to_string(path)?;
        let options = Self::from_toml_str(&source)?;
        tracing::debug!(path = %path.display(), "loaded handler manager options");
        Ok(options)
    }

    /// Reject values the manager cannot work with
    pub fn validate(&self) -> Result<()> {
        if !self.bearing_snap.is_finite() || self.bearing_snap < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "bearing_snap must be a non-negative number of degrees, got {}",
                self.bearing_snap
            )));
        }
        if !self.click_tolerance.is_finite() || self.click_tolerance < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "click_tolerance must be a non-negative number of pixels, got {}",
                self.click_tolerance
            )));
        }
        if !self.pan_inertia.is_valid() {
            return Err(ConfigError::Invalid(
                "pan_inertia parameters must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
