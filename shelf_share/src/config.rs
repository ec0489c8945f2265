//! Configuration for the estimator and its overlay.
//!
//! All keys are optional; a missing file section falls back to the 4 x 6 grid and
//! the default overlay style.
//!
//! ```toml
//! [grid]
//! rows = 4
//! cols = 6
//!
//! [overlay]
//! line_color = [255, 255, 255, 255]
//! selection_color = [0, 160, 255, 255]
//! selection_opacity = 0.45
//! line_width = 2
//! ```

use crate::core_modules::grid::{DEFAULT_COLS, DEFAULT_ROWS, Grid};
use crate::core_modules::overlay::OverlayStyle;
use crate::error::{ConfigError, EstimatorError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Grid resolution as written in a config file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridConfig {
    pub rows: u32,
    pub cols: u32,
}

impl GridConfig {
    pub fn to_grid(&self) -> Result<Grid, EstimatorError> {
        Grid::new(self.rows, self.cols)
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_ROWS,
            cols: DEFAULT_COLS,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShelfShareConfig {
    pub grid: GridConfig,
    pub overlay: OverlayStyle,
}

impl ShelfShareConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.grid.to_grid()?;
        let opacity = self.overlay.selection_opacity;
        if !(0.0..=1.0).contains(&opacity) {
            return Err(ConfigError::InvalidOpacity(opacity));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn empty_document_yields_defaults() {
        let config = ShelfShareConfig::from_toml_str("").unwrap();
        assert_eq!(config, ShelfShareConfig::default());
        assert_eq!(config.grid.to_grid().unwrap().total_cells(), 24);
    }

    #[test]
    fn partial_sections_keep_remaining_defaults() {
        let config = ShelfShareConfig::from_toml_str(
            r#"
            [grid]
            cols = 8

            [overlay]
            line_width = 4
            "#,
        )
        .unwrap();
        assert_eq!(config.grid, GridConfig { rows: 4, cols: 8 });
        assert_eq!(config.overlay.line_width, 4);
        assert_eq!(config.overlay.selection_color, OverlayStyle::default().selection_color);
    }

    #[test]
    fn zero_rows_are_rejected_at_load_time() {
        let err = ShelfShareConfig::from_toml_str("[grid]\nrows = 0\n").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::InvalidGrid(EstimatorError::InvalidConfiguration { rows: 0, cols: 6 })
        ));
    }

    #[test]
    fn opacity_must_be_a_fraction() {
        let err = ShelfShareConfig::from_toml_str("[overlay]\nselection_opacity = 1.5\n").unwrap_err();
        assert!(matches!(err, ConfigError::InvalidOpacity(_)));
    }

    #[test]
    fn malformed_toml_is_a_parse_error() {
        assert!(matches!(
            ShelfShareConfig::from_toml_str("[grid\nrows = 4"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn load_reports_missing_files_with_their_path() {
        let err = ShelfShareConfig::load("/definitely/not/here.toml").unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.toml"));
    }
}
