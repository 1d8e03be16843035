//! Game settings
//!
//! Supplied by the host page as JSON (or a file for the native demo). Every
//! field has a default, so a partial document only overrides what it names.

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Colours used for the canvas background and every game object
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: String,
    pub foreground: String,
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: "#1a1a1a".to_string(),
            foreground: "#f0f0f0".to_string(),
        }
    }
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Session ===
    /// Asteroids spawned when a game starts
    pub initial_asteroids: usize,
    /// Fixed RNG seed (random per session when absent)
    pub seed: Option<u64>,

    // === Ship ===
    /// Minimum wall-clock time between shots (ms)
    pub fire_interval_ms: f64,
    /// Ship spawns this far above the bottom edge
    pub ship_spawn_offset: f32,

    // === Asteroids ===
    pub asteroid_radius_min: f32,
    pub asteroid_radius_max: f32,

    // === Layout ===
    /// Height reserved for the score bar
    pub hud_height: f32,
    pub palette: Palette,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            initial_asteroids: INITIAL_ASTEROIDS,
            seed: None,

            fire_interval_ms: FIRE_INTERVAL_MS,
            ship_spawn_offset: SHIP_SPAWN_OFFSET,

            asteroid_radius_min: ASTEROID_SEED_RADIUS_MIN,
            asteroid_radius_max: ASTEROID_SEED_RADIUS_MAX,

            hud_height: HUD_HEIGHT,
            palette: Palette::default(),
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let settings: Settings = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.fire_interval_ms >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "fire_interval_ms",
                reason: format!("must be >= 0, got {}", self.fire_interval_ms),
            });
        }
        if !(self.asteroid_radius_min > 0.0) {
            return Err(ConfigError::Invalid {
                field: "asteroid_radius_min",
                reason: format!("must be > 0, got {}", self.asteroid_radius_min),
            });
        }
        if !(self.asteroid_radius_max >= self.asteroid_radius_min) {
            return Err(ConfigError::Invalid {
                field: "asteroid_radius_max",
                reason: format!(
                    "must be >= asteroid_radius_min ({}), got {}",
                    self.asteroid_radius_min, self.asteroid_radius_max
                ),
            });
        }
        if !(self.hud_height >= 0.0) {
            return Err(ConfigError::Invalid {
                field: "hud_height",
                reason: format!("must be >= 0, got {}", self.hud_height),
            });
        }
        Ok(())
    }

    /// Parse settings, logging and falling back to defaults on any error
    pub fn from_json_or_default(json: Option<&str>) -> Self {
        match json {
            Some(json) => match Self::from_json(json) {
                Ok(settings) => {
                    log::info!("Loaded settings");
                    settings
                }
                Err(err) => {
                    log::warn!("{err}; using default settings");
                    Self::default()
                }
            },
            None => {
                log::info!("Using default settings");
                Self::default()
            }
        }
    }
}
