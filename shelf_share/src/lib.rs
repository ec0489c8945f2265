// THEORY:
// This file is the main entry point for the `shelf_share` library crate.
// It follows the standard Rust convention of using `lib.rs` to define the public
// API that will be exposed to external consumers (a field-sales UI, the
// `shelf_share_tester` harness).
//
// The primary goal is to export the `ShelfShareEstimator` and its associated data
// structures (`Grid`, `Cell`, `ShareResult`, etc.) as the interface for manual
// shelf-share estimation. The geometry and rendering helpers live in
// `core_modules` and are re-exported here where callers need them.

pub mod config;
pub mod core_modules;
pub mod error;
pub mod estimator;
pub mod events;
pub mod session;

pub use config::{GridConfig, ShelfShareConfig};
pub use core_modules::grid::{Cell, Grid, PercentRect, DEFAULT_COLS, DEFAULT_ROWS};
pub use core_modules::image_ref::ImageRef;
pub use core_modules::overlay::{Overlay, OverlayStyle, PixelRect};
pub use core_modules::selection::Selection;
pub use core_modules::share::ShareResult;
pub use core_modules::utils::image_helper::image_helper;
pub use error::{ConfigError, EstimatorError, OverlayError, ShareOutOfRange};
pub use estimator::{EstimatorSnapshot, EstimatorState, ListenerId, ShareListener, ShelfShareEstimator};
pub use events::{EventOutcome, EventQueue, GridEvent};
pub use session::{EstimatorSession, SessionHandle};
