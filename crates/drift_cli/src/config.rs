//! Scenario file handling
//!
//! A scenario describes one scroll container, the auto-scroll settings and
//! a timeline of input steps keyed by frame number:
//!
//! ```toml
//! frames = 30
//!
//! [container]
//! bounds = [0.0, 0.0, 500.0, 300.0]   # left, top, right, bottom
//! scroll_size = [2000.0, 1200.0]
//!
//! [auto_scroll]
//! size = 50.0
//! intensity = 0.2
//!
//! [[input]]
//! frame = 0
//! kind = "pointer"
//! x = 520.0
//! y = 150.0
//! ```

use anyhow::{Context, Result};
use drift_core::{Point, Rect, Size};
use drift_scroll::AutoScrollConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A complete auto-scroll scenario
#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    /// Number of display frames to run
    #[serde(default = "default_frames")]
    pub frames: u64,
    #[serde(default)]
    pub container: ContainerConfig,
    #[serde(default)]
    pub auto_scroll: AutoScrollSection,
    /// Input timeline, in file order within a frame
    #[serde(default)]
    pub input: Vec<InputStep>,
}

fn default_frames() -> u64 {
    60
}

/// The scroll container the subject lives in
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ContainerConfig {
    /// Window-space edges: left, top, right, bottom
    #[serde(default = "default_bounds")]
    pub bounds: [f32; 4],
    /// Total content size: width, height
    #[serde(default = "default_scroll_size")]
    pub scroll_size: [f32; 2],
    /// Initial scroll offset: x, y
    #[serde(default)]
    pub scroll_offset: [f32; 2],
    /// Window size the container sits in
    #[serde(default = "default_viewport")]
    pub viewport: [f32; 2],
}

impl Default for ContainerConfig {
    fn default() -> Self {
        Self {
            bounds: default_bounds(),
            scroll_size: default_scroll_size(),
            scroll_offset: [0.0, 0.0],
            viewport: default_viewport(),
        }
    }
}

fn default_bounds() -> [f32; 4] {
    [0.0, 0.0, 500.0, 300.0]
}

fn default_scroll_size() -> [f32; 2] {
    [2000.0, 1200.0]
}

fn default_viewport() -> [f32; 2] {
    [1280.0, 720.0]
}

impl ContainerConfig {
    pub fn bounds(&self) -> Rect {
        let [left, top, right, bottom] = self.bounds;
        Rect::from_edges(left, top, right, bottom)
    }

    pub fn scroll_size(&self) -> Size {
        Size::new(self.scroll_size[0], self.scroll_size[1])
    }

    pub fn scroll_offset(&self) -> Point {
        Point::new(self.scroll_offset[0], self.scroll_offset[1])
    }

    pub fn viewport(&self) -> Size {
        Size::new(self.viewport[0], self.viewport[1])
    }
}

/// `[auto_scroll]` table
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AutoScrollSection {
    /// Armed from the first frame (default: true)
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_size")]
    pub size: f32,
    #[serde(default = "default_intensity")]
    pub intensity: f32,
}

impl Default for AutoScrollSection {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            size: default_size(),
            intensity: default_intensity(),
        }
    }
}

fn default_enabled() -> bool {
    true
}

fn default_size() -> f32 {
    drift_scroll::DEFAULT_SIZE
}

fn default_intensity() -> f32 {
    drift_scroll::DEFAULT_INTENSITY
}

impl From<&AutoScrollSection> for AutoScrollConfig {
    fn from(section: &AutoScrollSection) -> Self {
        AutoScrollConfig {
            enabled: section.enabled,
            size: section.size,
            intensity: section.intensity,
        }
    }
}

/// What an input step does
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StepKind {
    /// Mouse/pen moved to `x`, `y`
    Pointer,
    /// Touch `id` went down at `x`, `y`
    TouchStart,
    /// Touch `id` moved to `x`, `y`
    TouchMove,
    /// Touch `id` lifted at `x`, `y`
    TouchEnd,
    /// Application went to the background; no frames until `resume`
    Suspend,
    Resume,
    /// Turn auto-scroll off
    Disable,
    /// Turn auto-scroll on
    Enable,
}

/// One `[[input]]` entry
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct InputStep {
    /// Frame before which the step is applied
    pub frame: u64,
    pub kind: StepKind,
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    /// Touch identifier
    #[serde(default)]
    pub id: u64,
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;

        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse and check a scenario from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        scenario.validate()?;
        Ok(scenario)
    }

    /// Reject scenarios the loop cannot meaningfully run
    pub fn validate(&self) -> Result<()> {
        self.config()
            .validate()
            .context("Invalid [auto_scroll] settings")?;

        let bounds = self.container.bounds();
        if !(bounds.width() >= 0.0 && bounds.height() >= 0.0) {
            anyhow::bail!(
                "Container bounds {:?} have right < left or bottom < top",
                self.container.bounds
            );
        }

        if let Some(step) = self.input.iter().find(|step| step.frame >= self.frames) {
            anyhow::bail!(
                "Input step {:?} at frame {} is past the last frame ({})",
                step.kind,
                step.frame,
                self.frames.saturating_sub(1)
            );
        }
        Ok(())
    }

    pub fn config(&self) -> AutoScrollConfig {
        AutoScrollConfig::from(&self.auto_scroll)
    }

    /// Input steps scheduled before `frame`, in file order
    pub fn steps_at(&self, frame: u64) -> impl Iterator<Item = &InputStep> {
        self.input.iter().filter(move |step| step.frame == frame)
    }
}
