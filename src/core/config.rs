use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const CONFIG_FILE: &str = "config.yml";

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    #[serde(default = "default_hero_rotation")]
    pub hero_rotation_ms: u64,

    #[serde(default = "default_character_autoplay")]
    pub character_autoplay_ms: u64,

    #[serde(default = "default_gesture_threshold")]
    pub gesture_threshold: f64,

    #[serde(default = "default_navbar_threshold")]
    pub navbar_scroll_threshold: f64,

    #[serde(default = "default_anchor_offset")]
    pub anchor_offset: f64,

    #[serde(default = "default_fade_in_threshold")]
    pub fade_in_threshold: f64,
}

fn default_hero_rotation() -> u64 {
    5000
}
fn default_character_autoplay() -> u64 {
    7000
}
fn default_gesture_threshold() -> f64 {
    50.0
}
fn default_navbar_threshold() -> f64 {
    100.0
}
fn default_anchor_offset() -> f64 {
    80.0
}
fn default_fade_in_threshold() -> f64 {
    0.1
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hero_rotation_ms: default_hero_rotation(),
            character_autoplay_ms: default_character_autoplay(),
            gesture_threshold: default_gesture_threshold(),
            navbar_scroll_threshold: default_navbar_threshold(),
            anchor_offset: default_anchor_offset(),
            fade_in_threshold: default_fade_in_threshold(),
        }
    }
}

impl Config {
    /// Loads `config.yml` from the working directory, or the defaults if there is none.
    pub fn load() -> Result<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("{} not found, using built-in defaults", path.display());
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let config: Config = serde_yaml_ng::from_str(&content)
            .with_context(|| format!("Failed to parse {}", path.display()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.hero_rotation_ms == 0 {
            anyhow::bail!("hero_rotation_ms must be positive");
        }
        if self.character_autoplay_ms <= self.hero_rotation_ms {
            anyhow::bail!(
                "character_autoplay_ms ({}) must be longer than hero_rotation_ms ({})",
                self.character_autoplay_ms,
                self.hero_rotation_ms
            );
        }
        if !(self.gesture_threshold > 0.0 && self.gesture_threshold.is_finite()) {
            anyhow::bail!("gesture_threshold must be a positive number, got {}", self.gesture_threshold);
        }
        if !(self.fade_in_threshold > 0.0 && self.fade_in_threshold <= 1.0) {
            anyhow::bail!("fade_in_threshold must be in (0, 1], got {}", self.fade_in_threshold);
        }
        Ok(())
    }

    pub fn hero_period(&self) -> Duration {
        Duration::from_millis(self.hero_rotation_ms)
    }

    pub fn character_period(&self) -> Duration {
        Duration::from_millis(self.character_autoplay_ms)
    }
}
