//! Desktop configuration loaded from TOML.
//!
//! Every field has a default, so an empty document yields [`DesktopConfig::default`].

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::{Point, Size};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse desktop config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("invalid desktop config: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// First z-index handed out by the window manager.
    pub z_index_base: u64,
    pub min_width: i32,
    pub min_height: i32,
    pub default_width: i32,
    pub default_height: i32,
    pub cascade_origin: i32,
    pub cascade_step: i32,
    pub cascade_slots: u32,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            z_index_base: 1000,
            min_width: 300,
            min_height: 200,
            default_width: 800,
            default_height: 600,
            cascade_origin: 50,
            cascade_step: 20,
            cascade_slots: 6,
        }
    }
}

impl WindowConfig {
    pub fn default_size(&self) -> Size {
        Size::new(self.default_width, self.default_height)
    }

    /// Position for the `nth` window opened by the launcher, cycling through the cascade slots.
    /// Saturates at `i32::MAX` instead of overflowing for extreme cascade settings.
    pub fn cascade_position(&self, nth: usize) -> Point {
        let slots = usize::try_from(self.cascade_slots.max(1)).unwrap_or(usize::MAX);
        let slot = i32::try_from(nth % slots).unwrap_or(i32::MAX);
        let offset = self
            .cascade_origin
            .saturating_add(slot.saturating_mul(self.cascade_step));
        Point::new(offset, offset)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LauncherConfig {
    /// Wallet public keys allowed to open admin-only apps.
    pub admin_wallets: Vec<String>,
}

impl LauncherConfig {
    pub fn is_admin_wallet(&self, public_key: &str) -> bool {
        self.admin_wallets.iter().any(|w| w == public_key)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DesktopConfig {
    pub windows: WindowConfig,
    pub launcher: LauncherConfig,
}

impl DesktopConfig {
    /// Parses and validates a TOML document.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed TOML and [`ConfigError::Invalid`] when the
    /// window geometry settings are inconsistent.
    pub fn from_toml_str(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = &self.windows;
        if w.min_width <= 0 || w.min_height <= 0 {
            return Err(ConfigError::Invalid(format!(
                "minimum window size must be positive, got {}x{}",
                w.min_width, w.min_height
            )));
        }
        if w.default_width < w.min_width || w.default_height < w.min_height {
            return Err(ConfigError::Invalid(format!(
                "default window size {}x{} is below the minimum {}x{}",
                w.default_width, w.default_height, w.min_width, w.min_height
            )));
        }
        if w.cascade_slots == 0 {
            return Err(ConfigError::Invalid(
                "cascade_slots must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}
