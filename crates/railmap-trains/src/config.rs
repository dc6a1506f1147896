use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

use railmap_engine::paint::Color;
use serde::Deserialize;

use crate::error::ConfigError;

/// Longest transition applied to a moving car, in seconds.
const MAX_TRANSITION_SECS: f64 = 1.0;

/// Largest `tileScale` / `mapZoomOut` accepted.
const MAX_PROJECTION_SHIFT: u32 = 30;

const DEFAULT_TRAIN_RGB: [u8; 3] = [0x2a, 0x6f, 0xdb];
const DEFAULT_LEAD_CAR_RGB: [u8; 3] = [0xe8, 0xa3, 0x3d];

fn hex([r, g, b]: [u8; 3]) -> String {
    format!("#{r:02x}{g:02x}{b:02x}")
}

fn opaque([r, g, b]: [u8; 3]) -> Color {
    Color::from_srgb(r as f32 / 255.0, g as f32 / 255.0, b as f32 / 255.0, 1.0)
}

/// Dynmap tile projection parameters, as published per map in dynmap's
/// `world.json` (`worldtomap`, `tilescale`, `mapzoomout`).
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProjectionConfig {
    pub world_to_map: [f64; 9],
    pub tile_scale: u32,
    pub map_zoom_out: u32,
}

impl Default for ProjectionConfig {
    /// Dynmap's flat top-down map.
    fn default() -> Self {
        Self {
            world_to_map: [4.0, 0.0, 0.0, 0.0, 0.0, -4.0, 0.0, 1.0, 0.0],
            tile_scale: 0,
            map_zoom_out: 6,
        }
    }
}

/// JSON shape of the config file, before validation.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawConfig {
    worlds: HashMap<String, String>,
    train_width: f64,
    update_interval: f64,
    train_color: String,
    lead_car_color: String,
    projection: ProjectionConfig,
}

impl Default for RawConfig {
    fn default() -> Self {
        Self {
            worlds: HashMap::from([("world".to_string(), "minecraft:overworld".to_string())]),
            train_width: 2.0,
            update_interval: 2.0,
            train_color: hex(DEFAULT_TRAIN_RGB),
            lead_car_color: hex(DEFAULT_LEAD_CAR_RGB),
            projection: ProjectionConfig::default(),
        }
    }
}

/// Validated renderer configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    /// Map world name -> simulation dimension id.
    pub worlds: HashMap<String, String>,
    /// Car width in blocks.
    pub train_width: f64,
    /// Seconds between snapshot polls.
    pub update_interval: f64,
    pub train_color: Color,
    pub lead_car_color: Color,
    pub projection: ProjectionConfig,
}

impl Config {
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = serde_json::from_str(json).map_err(ConfigError::Parse)?;
        Self::try_from(raw)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&json)
    }

    /// Dimension rendered on the map world `world`, if one is configured.
    pub fn dimension_for(&self, world: &str) -> Option<&str> {
        self.worlds.get(world).map(String::as_str)
    }

    /// Length of the glide between two snapshots: the poll interval, capped at one second.
    pub fn transition(&self) -> Duration {
        Duration::try_from_secs_f64(self.update_interval.min(MAX_TRANSITION_SECS)).unwrap_or_default()
    }

    /// Time between snapshot polls. Saturates for intervals too long to represent.
    pub fn poll_interval(&self) -> Duration {
        Duration::try_from_secs_f64(self.update_interval).unwrap_or(Duration::MAX)
    }
}

impl Default for Config {
    fn default() -> Self {
        let raw = RawConfig::default();
        Self {
            worlds: raw.worlds,
            train_width: raw.train_width,
            update_interval: raw.update_interval,
            train_color: opaque(DEFAULT_TRAIN_RGB),
            lead_car_color: opaque(DEFAULT_LEAD_CAR_RGB),
            projection: raw.projection,
        }
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, ConfigError> {
        let train_width = positive("trainWidth", raw.train_width)?;
        let update_interval = positive("updateInterval", raw.update_interval)?;
        if Duration::try_from_secs_f64(update_interval).is_err() {
            return Err(ConfigError::InvalidValue {
                key: "updateInterval",
                value: update_interval,
                reason: "is too long to schedule",
            });
        }
        shift("projection.tileScale", raw.projection.tile_scale)?;
        shift("projection.mapZoomOut", raw.projection.map_zoom_out)?;

        let train_color = Color::parse(&raw.train_color)
            .map_err(|source| ConfigError::InvalidColor { key: "trainColor", source })?;
        let lead_car_color = Color::parse(&raw.lead_car_color)
            .map_err(|source| ConfigError::InvalidColor { key: "leadCarColor", source })?;

        if raw.worlds.is_empty() {
            log::warn!("config maps no worlds to dimensions; nothing will be drawn");
        }

        Ok(Self {
            worlds: raw.worlds,
            train_width,
            update_interval,
            train_color,
            lead_car_color,
            projection: raw.projection,
        })
    }
}

fn positive(key: &'static str, value: f64) -> Result<f64, ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue { key, value, reason: "must be a positive number" })
    }
}

fn shift(key: &'static str, value: u32) -> Result<u32, ConfigError> {
    if value <= MAX_PROJECTION_SHIFT {
        Ok(value)
    } else {
        Err(ConfigError::InvalidValue { key, value: value.into(), reason: "must be at most 30" })
    }
}
