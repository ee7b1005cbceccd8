//! Startup settings
//!
//! Read once from an optional JSON file before the game is created; the
//! simulation never sees them change afterwards.

use std::path::Path;

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Grid;

/// Reasons settings can be rejected
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings file: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed settings: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("viewport must be positive, got {width}x{height}")]
    Viewport { width: f32, height: f32 },
    #[error("grid needs at least one cell per side")]
    EmptyGrid,
    #[error("{traps} traps leave no free cell on a {cells}x{cells} grid")]
    TooManyTraps { traps: usize, cells: u32 },
}

/// Game settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// Viewport width in pixels
    pub screen_width: f32,
    /// Viewport height in pixels
    pub screen_height: f32,
    /// Cells per grid side
    pub cells: u32,
    /// RNG seed for trap placement
    pub seed: u64,
    /// Frame rate the host loop should pace itself to
    pub target_fps: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,
            cells: CELLS_LIMIT,
            seed: DEFAULT_SEED,
            target_fps: TARGET_FPS,
        }
    }
}

impl Settings {
    /// Parse and validate settings from JSON; missing fields take defaults
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let settings = Self::from_json(&json)?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Load settings, falling back to defaults on any problem
    pub fn load_or_default(path: impl AsRef<Path>) -> Self {
        match Self::load(path.as_ref()) {
            Ok(settings) => settings,
            Err(e) => {
                log::warn!("Using default settings ({})", e);
                Self::default()
            }
        }
    }

    /// Check the invariants the simulation relies on
    ///
    /// Safe-zone placement loops until it finds a trap-free cell, so there
    /// must always be more cells than traps.
    pub fn validate(&self) -> Result<(), SettingsError> {
        if !(self.screen_width > 0.0 && self.screen_height > 0.0) {
            return Err(SettingsError::Viewport {
                width: self.screen_width,
                height: self.screen_height,
            });
        }
        if self.cells == 0 {
            return Err(SettingsError::EmptyGrid);
        }
        if TRAPS_AMOUNT as u64 >= u64::from(self.cells) * u64::from(self.cells) {
            return Err(SettingsError::TooManyTraps {
                traps: TRAPS_AMOUNT,
                cells: self.cells,
            });
        }
        Ok(())
    }

    /// Viewport size in pixels
    pub fn viewport(&self) -> Vec2 {
        Vec2::new(self.screen_width, self.screen_height)
    }

    /// Board geometry for these settings
    pub fn grid(&self) -> Grid {
        Grid::new(self.viewport(), self.cells)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.grid().cell_size, Vec2::new(160.0, 120.0));
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "cells": 6 }"#).unwrap();
        assert_eq!(settings.seed, 7);
        assert_eq!(settings.cells, 6);
        assert_eq!(settings.screen_width, SCREEN_WIDTH);
    }

    #[test]
    fn test_rejects_too_many_traps() {
        // 3x3 = 9 cells, fewer than one free cell past 10 traps
        let err = Settings::from_json(r#"{ "cells": 3 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::TooManyTraps { cells: 3, .. }));
    }

    #[test]
    fn test_rejects_bad_viewport() {
        let err = Settings::from_json(r#"{ "screen_width": 0.0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Viewport { .. }));
    }

    #[test]
    fn test_rejects_empty_grid() {
        let err = Settings::from_json(r#"{ "cells": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::EmptyGrid));
    }

    #[test]
    fn test_malformed_json() {
        let err = Settings::from_json("{ cells: ").unwrap_err();
        assert!(matches!(err, SettingsError::Parse(_)));
    }

    #[test]
    fn test_missing_file_falls_back() {
        let settings = Settings::load_or_default("/nonexistent/aigame-settings.json");
        assert_eq!(settings, Settings::default());
    }
}
