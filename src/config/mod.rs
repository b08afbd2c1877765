// SPDX-License-Identifier: MPL-2.0
//! This module handles the coordinator's configuration, including loading and saving
//! tuning values to a `preview.toml` file.
//!
//! Every field is optional; missing or out-of-range values fall back to the
//! constants in [`defaults`].
//!
//! # Examples
//!
//! ```no_run
//! use preview_coord::config::{self, Config};
//! use std::path::PathBuf;
//!
//! // Load existing configuration
//! let mut config = config::load().unwrap_or_default();
//!
//! // Modify a setting
//! config.autoplay_ratio = Some(0.6);
//!
//! // Save the modified configuration
//! config::save(&config).expect("Failed to save config");
//!
//! // Build the runtime settings used by preview instances
//! let settings = config.preview_settings();
//! assert_eq!(settings.autoplay_ratio.value(), 0.6);
//!
//! // To load/save from a specific path (e.g., for testing)
//! let temp_dir = PathBuf::from("./temp_config_dir");
//! std::fs::create_dir_all(&temp_dir).unwrap();
//! let temp_file = temp_dir.join("test_preview.toml");
//! config::save_to_path(&config, &temp_file).expect("Failed to save to path");
//! let loaded_config = config::load_from_path(&temp_file).expect("Failed to load from path");
//! assert_eq!(loaded_config.autoplay_ratio, Some(0.6));
//! std::fs::remove_dir_all(&temp_dir).unwrap();
//! ```

pub mod defaults;

use crate::domain::preview::{
    AutoplayRatio, ScrubThrottleTable, Size, ThrottleStep, DEFAULT_VELOCITY_EPSILON,
};
use crate::error::Result;
use crate::preview::PreviewSettings;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub use defaults::*;

const CONFIG_FILE: &str = "preview.toml";
const APP_NAME: &str = "PreviewCoord";

/// One `[[scrub_steps]]` row: drags up to `max_velocity` timeline seconds per
/// second keep at least `interval_ms` between seeks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThrottleStepConfig {
    pub max_velocity: f64,
    pub interval_ms: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub autoplay_ratio: Option<f32>,
    #[serde(default)]
    pub max_display_width: Option<f32>,
    #[serde(default)]
    pub max_display_height: Option<f32>,
    #[serde(default)]
    pub velocity_epsilon_ms: Option<f64>,
    #[serde(default)]
    pub scrub_fallback_interval_ms: Option<f64>,
    // Array of tables, must stay last for TOML output.
    #[serde(default)]
    pub scrub_steps: Option<Vec<ThrottleStepConfig>>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            autoplay_ratio: Some(DEFAULT_AUTOPLAY_RATIO),
            max_display_width: Some(DEFAULT_MAX_DISPLAY_WIDTH),
            max_display_height: Some(DEFAULT_MAX_DISPLAY_HEIGHT),
            velocity_epsilon_ms: Some(DEFAULT_VELOCITY_EPSILON_MS),
            scrub_fallback_interval_ms: None,
            scrub_steps: None,
        }
    }
}

impl Config {
    /// Resolves this file-level configuration into runtime settings.
    ///
    /// Invalid values are replaced by their defaults and logged at `warn`.
    #[must_use]
    pub fn preview_settings(&self) -> PreviewSettings {
        let autoplay_ratio = self
            .autoplay_ratio
            .map_or_else(AutoplayRatio::default, AutoplayRatio::new);

        let display_envelope = Size::new(
            envelope_dimension(self.max_display_width, DEFAULT_MAX_DISPLAY_WIDTH),
            envelope_dimension(self.max_display_height, DEFAULT_MAX_DISPLAY_HEIGHT),
        );

        let velocity_epsilon = self
            .velocity_epsilon_ms
            .and_then(millis)
            .unwrap_or(DEFAULT_VELOCITY_EPSILON);

        PreviewSettings {
            autoplay_ratio,
            display_envelope,
            throttle: self.throttle_table(),
            velocity_epsilon,
        }
    }

    fn throttle_table(&self) -> ScrubThrottleTable {
        if self.scrub_steps.is_none() && self.scrub_fallback_interval_ms.is_none() {
            return ScrubThrottleTable::default();
        }

        let default = ScrubThrottleTable::default();
        let steps = match &self.scrub_steps {
            Some(rows) => {
                let mut steps = Vec::with_capacity(rows.len());
                for (row, step) in rows.iter().enumerate() {
                    let Some(interval) = millis(step.interval_ms) else {
                        log::warn!("preview.toml: scrub_steps row {row} has an invalid interval, using default table");
                        return default;
                    };
                    steps.push(ThrottleStep::new(step.max_velocity, interval));
                }
                steps
            }
            None => default.steps().to_vec(),
        };
        let fallback = match self.scrub_fallback_interval_ms {
            Some(ms) => match millis(ms) {
                Some(interval) => interval,
                None => {
                    log::warn!("preview.toml: invalid scrub_fallback_interval_ms {ms}, using default table");
                    return default;
                }
            },
            None => default.fallback(),
        };

        ScrubThrottleTable::new(steps, fallback).unwrap_or_else(|err| {
            log::warn!("preview.toml: invalid scrub throttle table ({err}), using default table");
            default
        })
    }
}

fn envelope_dimension(value: Option<f32>, default: f32) -> f32 {
    match value {
        Some(v) if v.is_finite() && v >= MIN_DISPLAY_DIMENSION => v,
        Some(v) => {
            log::warn!("preview.toml: display dimension {v} is out of range, using {default}");
            default
        }
        None => default,
    }
}

fn millis(ms: f64) -> Option<Duration> {
    if !ms.is_finite() || ms < 0.0 {
        return None;
    }
    let nanos = (ms * 1_000_000.0).round();
    if nanos > u64::MAX as f64 {
        return None;
    }
    Some(Duration::from_nanos(nanos as u64))
}

fn get_default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|mut path| {
        path.push(APP_NAME);
        path.push(CONFIG_FILE);
        path
    })
}

pub fn load() -> Result<Config> {
    if let Some(path) = get_default_config_path() {
        if path.exists() {
            return load_from_path(&path);
        }
    }
    Ok(Config::default())
}

pub fn save(config: &Config) -> Result<()> {
    if let Some(path) = get_default_config_path() {
        return save_to_path(config, &path);
    }
    Ok(())
}

pub fn load_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    match toml::from_str(&content) {
        Ok(config) => Ok(config),
        Err(err) => {
            log::warn!("ignoring unreadable {}: {err}", path.display());
            Ok(Config::default())
        }
    }
}

pub fn save_to_path(config: &Config, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let content = toml::to_string_pretty(config)?;
    fs::write(path, content)?;
    Ok(())
}
