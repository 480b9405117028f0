//! Engine configuration parsed from environment variables.
//!
//! Every field has a default taken from [`crate::consts`]. `from_env` never
//! fails: unset or unparsable variables fall back to the default. Call
//! [`EngineConfig::validate`] to reject inverted or non-positive ranges;
//! constructors that take a config go through [`EngineConfig::validated`].

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::consts::{
    ICON_SIZE, MAX_IMAGE_BYTES, MAX_SCALE, MIN_SCALE, PINCH_STEP_MAX, PINCH_STEP_MIN, RESIZE_WIDTH,
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("icon size must be positive, got {0}")]
    InvalidIconSize(f64),
    #[error("invalid scale range: {min}..={max}")]
    InvalidScaleRange { min: f64, max: f64 },
    #[error("invalid pinch step range: {min}..={max}")]
    InvalidPinchStep { min: f64, max: f64 },
    #[error("resize width must be positive")]
    InvalidResizeWidth,
}

impl ConfigError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidIconSize(_) => "E_CONFIG_ICON_SIZE",
            Self::InvalidScaleRange { .. } => "E_CONFIG_SCALE_RANGE",
            Self::InvalidPinchStep { .. } => "E_CONFIG_PINCH_STEP",
            Self::InvalidResizeWidth => "E_CONFIG_RESIZE_WIDTH",
        }
    }
}

/// Tunable limits for the transform store, session tracker, and image intake.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Sticker edge length at scale 1.0, used for centering and bounds clamping.
    pub icon_size: f64,
    /// Lower bound of the absolute sticker scale.
    pub min_scale: f64,
    /// Upper bound of the absolute sticker scale.
    pub max_scale: f64,
    /// Lower bound of the per-event pinch ratio.
    pub pinch_step_min: f64,
    /// Upper bound of the per-event pinch ratio.
    pub pinch_step_max: f64,
    /// Picked images above this size in bytes are resized.
    pub max_image_bytes: u64,
    /// Target width for resized images.
    pub resize_width: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            icon_size: ICON_SIZE,
            min_scale: MIN_SCALE,
            max_scale: MAX_SCALE,
            pinch_step_min: PINCH_STEP_MIN,
            pinch_step_max: PINCH_STEP_MAX,
            max_image_bytes: MAX_IMAGE_BYTES,
            resize_width: RESIZE_WIDTH,
        }
    }
}

impl EngineConfig {
    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `STICKER_ICON_SIZE`: default 40
    /// - `STICKER_MIN_SCALE` / `STICKER_MAX_SCALE`: default 0.5 / 3.0
    /// - `STICKER_PINCH_STEP_MIN` / `STICKER_PINCH_STEP_MAX`: default 0.8 / 1.25
    /// - `STICKER_MAX_IMAGE_BYTES`: default 5 MiB
    /// - `STICKER_RESIZE_WIDTH`: default 1200
    #[must_use]
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            icon_size: env_parse("STICKER_ICON_SIZE", defaults.icon_size),
            min_scale: env_parse("STICKER_MIN_SCALE", defaults.min_scale),
            max_scale: env_parse("STICKER_MAX_SCALE", defaults.max_scale),
            pinch_step_min: env_parse("STICKER_PINCH_STEP_MIN", defaults.pinch_step_min),
            pinch_step_max: env_parse("STICKER_PINCH_STEP_MAX", defaults.pinch_step_max),
            max_image_bytes: env_parse("STICKER_MAX_IMAGE_BYTES", defaults.max_image_bytes),
            resize_width: env_parse("STICKER_RESIZE_WIDTH", defaults.resize_width),
        }
    }

    /// Check that every range is non-empty and positive.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.icon_size.is_finite() && self.icon_size > 0.0) {
            return Err(ConfigError::InvalidIconSize(self.icon_size));
        }
        if !(self.min_scale > 0.0 && self.min_scale <= self.max_scale && self.max_scale.is_finite()) {
            return Err(ConfigError::InvalidScaleRange { min: self.min_scale, max: self.max_scale });
        }
        if !(self.pinch_step_min > 0.0 && self.pinch_step_min <= self.pinch_step_max && self.pinch_step_max.is_finite())
        {
            return Err(ConfigError::InvalidPinchStep { min: self.pinch_step_min, max: self.pinch_step_max });
        }
        if self.resize_width == 0 {
            return Err(ConfigError::InvalidResizeWidth);
        }
        Ok(())
    }

    /// This config if it validates, otherwise the defaults.
    #[must_use]
    pub fn validated(self) -> Self {
        match self.validate() {
            Ok(()) => self,
            Err(e) => {
                warn!(error = %e, code = e.error_code(), "invalid engine config; using defaults");
                Self::default()
            }
        }
    }
}

pub(crate) fn env_parse<T>(key: &str, default: T) -> T
where
    T: std::str::FromStr + Copy,
{
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse::<T>().unwrap_or(default),
        Err(_) => default,
    }
}
