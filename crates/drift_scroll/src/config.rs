//! Auto-scroll configuration

use crate::error::{ConfigError, Result};

/// Default gutter width in distance units
pub const DEFAULT_SIZE: f32 = 50.0;

/// Default speed scale factor
pub const DEFAULT_INTENSITY: f32 = 0.2;

/// Configuration for edge auto-scrolling
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoScrollConfig {
    /// Whether the loop is armed (default: false)
    pub enabled: bool,
    /// Width of each edge gutter, measured inward from the container edge
    pub size: f32,
    /// Scroll distance per frame per unit of gutter penetration
    pub intensity: f32,
}

impl Default for AutoScrollConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            size: DEFAULT_SIZE,
            intensity: DEFAULT_INTENSITY,
        }
    }
}

impl AutoScrollConfig {
    /// Default configuration, armed
    pub fn enabled() -> Self {
        Self {
            enabled: true,
            ..Default::default()
        }
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }

    pub fn with_intensity(mut self, intensity: f32) -> Self {
        self.intensity = intensity;
        self
    }

    /// Check the values for use at a trust boundary (config files, CLI flags)
    ///
    /// The loop itself accepts any value; this is for callers that want to
    /// reject nonsense before it reaches the loop.
    pub fn validate(&self) -> Result<()> {
        if !self.size.is_finite() || self.size < 0.0 {
            return Err(ConfigError::InvalidSize(self.size));
        }
        if !self.intensity.is_finite() {
            return Err(ConfigError::InvalidIntensity(self.intensity));
        }
        Ok(())
    }
}
