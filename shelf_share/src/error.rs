//! Error types for the shelf-share estimator.
//!
//! - `EstimatorError`: contract violations on the grid and selection
//! - `OverlayError`: problems reading, sizing or writing the shelf photo
//! - `ConfigError`: unreadable or invalid configuration files

use std::path::PathBuf;

/// Failures raised by the estimator, its event queue and its session.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EstimatorError {
    /// A grid dimension was zero.
    #[error("invalid grid configuration {rows}x{cols}: rows and cols must both be at least 1")]
    InvalidConfiguration {
        /// Requested number of rows.
        rows: u32,
        /// Requested number of columns.
        cols: u32,
    },

    /// A cell coordinate lies outside `[0, rows) x [0, cols)`.
    #[error("cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    InvalidCell {
        /// Requested row.
        row: u32,
        /// Requested column.
        col: u32,
        /// Rows of the grid at the time of the call.
        rows: u32,
        /// Columns of the grid at the time of the call.
        cols: u32,
    },

    /// A cell was toggled while the grid was hidden.
    #[error("the grid is hidden; show it before marking cells")]
    GridHidden,

    /// The session task has stopped and can no longer take requests.
    #[error("estimator session is closed")]
    SessionClosed,
}

/// A stored shelf-share percentage above 100.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("share {0}% is outside [0, 100]")]
pub struct ShareOutOfRange(pub u8);

/// Failures around the photo the grid is drawn over.
#[derive(Debug, thiserror::Error)]
pub enum OverlayError {
    /// Decoding or encoding the image failed.
    #[error("image error: {0}")]
    Image(#[from] image::ImageError),

    /// The photo has no area to lay a grid over.
    #[error("image has no area ({width}x{height})")]
    EmptyImage { width: u32, height: u32 },

    /// The pixels handed to the renderer do not match the overlay's image.
    #[error("photo is {actual_width}x{actual_height} but the overlay was built for {expected_width}x{expected_height}")]
    DimensionMismatch {
        expected_width: u32,
        expected_height: u32,
        actual_width: u32,
        actual_height: u32,
    },

    /// Writing the rendered overlay failed.
    #[error("failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Failures while loading a `ShelfShareConfig`.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid grid in config: {0}")]
    InvalidGrid(#[from] EstimatorError),

    /// Selection opacity must lie in `[0.0, 1.0]`.
    #[error("selection_opacity {0} is outside [0.0, 1.0]")]
    InvalidOpacity(f32),
}
