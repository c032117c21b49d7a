// src/config.rs

//! Configuration structures for the prime visualizer.
//!
//! The configuration is deserialized from a JSON file and groups settings
//! into logical sections: grid geometry, the tag color palette, and
//! application behavior. Every field has a default, so a partial (or
//! missing) file is always usable.
//!
//! Validation happens here, before the core pipeline runs: the classifier,
//! grid builder, and renderer treat bad dimensions as precondition
//! violations rather than recoverable states.

use crate::color::Color;
use crate::render::Palette;
use anyhow::{bail, Context, Result};
use log::warn;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Complete configuration, root of the config file.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    /// Grid geometry and background.
    pub grid: GridConfig,
    /// Color per prime tag.
    pub colors: Palette,
    /// Application-level behavior.
    pub application: ApplicationConfig,
}

/// Grid geometry settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GridConfig {
    /// Number of dots along the x-axis.
    pub columns: u32,
    /// Number of dots along the y-axis.
    pub rows: u32,
    /// Edge length of each dot block in pixels.
    pub dot_size: u32,
    /// Background pixels between neighboring dot blocks.
    pub spacing: u32,
    /// First integer of the row-major value sequence.
    pub base_offset: u64,
    /// Color of composite cells and spacing.
    pub background_color: Color,
}

impl Default for GridConfig {
    fn default() -> Self {
        GridConfig {
            columns: 100,
            rows: 100,
            dot_size: 8,
            spacing: 2,
            base_offset: 2,
            background_color: Color::WHITE,
        }
    }
}

/// Application-level settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ApplicationConfig {
    /// Output path used when the CLI does not supply one.
    pub default_output_file: String,
    /// Print the classification summary after rendering.
    pub enable_statistics: bool,
}

impl Default for ApplicationConfig {
    fn default() -> Self {
        ApplicationConfig {
            default_output_file: "prime_visualization.png".to_string(),
            enable_statistics: true,
        }
    }
}

impl Config {
    /// Loads configuration from a JSON file.
    ///
    /// A missing file yields the defaults with a logged warning; a present
    /// but malformed file is an error.
    pub fn load(path: &Path) -> Result<Config> {
        if !path.exists() {
            warn!(
                "Configuration file not found: {}. Using defaults.",
                path.display()
            );
            return Ok(Config::default());
        }
        let text = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_json::from_str(&text)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        Ok(config)
    }

    /// Rejects settings the core pipeline treats as precondition violations.
    pub fn validate(&self) -> Result<()> {
        if self.grid.columns == 0 {
            bail!("grid.columns must be positive");
        }
        if self.grid.rows == 0 {
            bail!("grid.rows must be positive");
        }
        if self.grid.dot_size == 0 {
            bail!("grid.dot_size must be positive");
        }
        // Guard the pixel math: columns * (dot_size + spacing) and the
        // row-major value range must stay in u32/u64 respectively.
        let pitch = self
            .grid
            .dot_size
            .checked_add(self.grid.spacing)
            .ok_or_else(|| anyhow::anyhow!("dot_size + spacing overflows"))?;
        if self.grid.columns.checked_mul(pitch).is_none()
            || self.grid.rows.checked_mul(pitch).is_none()
        {
            bail!(
                "image dimensions overflow: {}x{} cells at {} px pitch",
                self.grid.columns,
                self.grid.rows,
                pitch
            );
        }
        // The row-major sequence ends at rows*columns - 1 + base_offset.
        let cells = self.grid.rows as u64 * self.grid.columns as u64;
        if (cells - 1).checked_add(self.grid.base_offset).is_none() {
            bail!(
                "base_offset {} puts the value range past u64::MAX for a {}x{} grid",
                self.grid.base_offset,
                self.grid.columns,
                self.grid.rows
            );
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_log::test;

    #[test]
    fn defaults_validate() {
        Config::default().validate().unwrap();
    }

    #[test]
    fn zero_dimensions_are_rejected() {
        let mut config = Config::default();
        config.grid.columns = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("columns"));

        let mut config = Config::default();
        config.grid.rows = 0;
        assert!(config.validate().is_err());

        let mut config = Config::default();
        config.grid.dot_size = 0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn value_range_past_u64_max_is_rejected() {
        let mut config = Config::default();
        config.grid.rows = 1;
        config.grid.columns = 2;
        config.grid.base_offset = u64::MAX;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_offset"));

        // The largest offset where every value still fits is accepted.
        config.grid.base_offset = u64::MAX - 1;
        config.validate().unwrap();
    }

    #[test]
    fn partial_json_fills_in_defaults() {
        let config: Config = serde_json::from_str(
            r#"{ "grid": { "columns": 12, "rows": 5 },
                 "colors": { "twin": [1, 2, 3] } }"#,
        )
        .unwrap();
        assert_eq!(config.grid.columns, 12);
        assert_eq!(config.grid.rows, 5);
        assert_eq!(config.grid.dot_size, 8);
        assert_eq!(config.colors.twin, Color::rgb(1, 2, 3));
        assert_eq!(config.grid.background_color, Color::WHITE);
        assert!(config.application.enable_statistics);
    }

    #[test]
    fn config_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string_pretty(&config).unwrap();
        let back: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(config, back);
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let config = Config::load(Path::new("/nonexistent/prime-vis.json")).unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.json");
        std::fs::write(&path, "{ not json").unwrap();
        assert!(Config::load(&path).is_err());
    }
}
