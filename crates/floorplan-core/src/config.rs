//! Editor configuration.

use crate::history::MAX_HISTORY;
use crate::interaction::InteractionConfig;
use crate::snap::{GRID_SIZE, SnapMode, SnapStrategy};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid config value for {field}: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("Config parse error: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Config IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Tunables for one editing session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EditorConfig {
    /// Grid cell used by the grid snap strategy.
    pub grid_size: f64,
    pub snap_mode: SnapMode,
    /// Resize floor.
    pub min_width: f64,
    pub min_height: f64,
    /// Snapshots kept for undo/redo.
    pub max_history: usize,
    /// Loaded layouts are enlarged to at least this size.
    pub min_canvas_width: f64,
    pub min_canvas_height: f64,
    /// Keep gesture output inside the canvas.
    pub clamp_to_canvas: bool,
    /// Colors handed out to new zones in turn. Empty leaves zones uncolored.
    pub zone_colors: Vec<String>,
}

/// Default zone palette: soft status tints, then their borders.
const ZONE_COLORS: [&str; 8] = [
    "#dcfce7", "#dbeafe", "#fef3c7", "#fee2e2", "#86efac", "#93c5fd", "#fcd34d", "#fca5a5",
];

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            grid_size: GRID_SIZE,
            snap_mode: SnapMode::Grid,
            min_width: 40.0,
            min_height: 40.0,
            max_history: MAX_HISTORY,
            min_canvas_width: 1000.0,
            min_canvas_height: 800.0,
            clamp_to_canvas: false,
            zone_colors: ZONE_COLORS.iter().map(|c| c.to_string()).collect(),
        }
    }
}

fn check_positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::Invalid {
            field,
            reason: format!("expected a positive number, got {value}"),
        })
    }
}

impl EditorConfig {
    /// Reject sizes that would break the geometry invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_positive("gridSize", self.grid_size)?;
        check_positive("minWidth", self.min_width)?;
        check_positive("minHeight", self.min_height)?;
        check_positive("minCanvasWidth", self.min_canvas_width)?;
        check_positive("minCanvasHeight", self.min_canvas_height)?;
        if self.max_history == 0 {
            return Err(ConfigError::Invalid {
                field: "maxHistory",
                reason: "must keep at least one snapshot".to_string(),
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn interaction(&self) -> InteractionConfig {
        InteractionConfig {
            min_width: self.min_width,
            min_height: self.min_height,
        }
    }

    /// Snap strategy selected by `snap_mode`.
    pub fn snap_strategy(&self) -> Box<dyn SnapStrategy> {
        self.snap_mode.strategy(self.grid_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Point;

    #[test]
    fn test_defaults_are_valid() {
        let config = EditorConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.max_history, 50);
        assert!(!config.clamp_to_canvas);
        assert_eq!(config.zone_colors.len(), 8);
    }

    #[test]
    fn test_zone_palette_override() {
        let config = EditorConfig::from_json(r##"{"zoneColors": ["#123456"]}"##).unwrap();
        assert_eq!(config.zone_colors, vec!["#123456".to_string()]);
        let config = EditorConfig::from_json(r#"{"zoneColors": []}"#).unwrap();
        assert!(config.zone_colors.is_empty());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = EditorConfig::from_json(r#"{"gridSize": 10, "snapMode": "none"}"#).unwrap();
        assert!((config.grid_size - 10.0).abs() < f64::EPSILON);
        assert_eq!(config.snap_mode, SnapMode::None);
        assert!((config.min_width - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = EditorConfig::from_json(r#"{"gridSize": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "gridSize", .. }));

        let err = EditorConfig::from_json(r#"{"maxHistory": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "maxHistory", .. }));

        let err = EditorConfig::from_json(r#"{"minHeight": -1}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "minHeight", .. }));

        assert!(matches!(EditorConfig::from_json("{"), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_from_missing_file() {
        let err = EditorConfig::from_file("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, ConfigError::Io(_)));
    }

    #[test]
    fn test_snap_strategy_follows_mode() {
        let config = EditorConfig {
            grid_size: 25.0,
            ..EditorConfig::default()
        };
        assert_eq!(config.snap_strategy().snap_point(Point::new(30.0, 40.0)), Point::new(25.0, 50.0));

        let config = EditorConfig {
            snap_mode: SnapMode::None,
            ..config
        };
        assert_eq!(config.snap_strategy().snap_point(Point::new(30.0, 40.0)), Point::new(30.0, 40.0));
    }
}
