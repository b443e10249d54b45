// tokio-marquee/src/widgets/marquee/marquee_config.rs
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use super::Direction;

pub const DEFAULT_SCROLL_SPEED: Duration = Duration::from_millis(250);

/// Serializable marquee settings, e.g. loaded from a JSON settings file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarqueeConfig {
    pub scroll_speed_ms: u64,
    pub direction: Direction,
    pub continuous: bool,
    /// Viewport width in cells; the text width is used when absent.
    pub width: Option<usize>,
    pub text: Option<String>,
}

impl Default for MarqueeConfig {
    fn default() -> Self {
        Self {
            scroll_speed_ms: DEFAULT_SCROLL_SPEED.as_millis() as u64,
            direction: Direction::Forward,
            continuous: false,
            width: None,
            text: None,
        }
    }
}

impl MarqueeConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).context("Invalid marquee config")
    }

    pub fn scroll_speed(&self) -> Duration {
        Duration::from_millis(self.scroll_speed_ms)
    }
}
