// THEORY:
// An `ImageRef` is the caller's shelf photo as far as the estimator cares: its
// natural pixel dimensions. The estimator never stores or transforms the photo.
// The dimensions only tell us the overlay is renderable and let the `overlay`
// module map grid cells to pixels and clicks back to cells. The percentage
// itself is purely cell-count based and never looks at them.

use crate::error::OverlayError;
use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Natural dimensions of a caller-owned photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ImageRef {
    width: u32,
    height: u32,
}

impl ImageRef {
    /// Rejects photos with no area.
    pub fn new(width: u32, height: u32) -> Result<Self, OverlayError> {
        if width == 0 || height == 0 {
            return Err(OverlayError::EmptyImage { width, height });
        }
        Ok(Self { width, height })
    }

    /// Reads the dimensions from the file header without decoding the pixels.
    pub fn probe(path: impl AsRef<Path>) -> Result<Self, OverlayError> {
        let (width, height) = image::image_dimensions(path)?;
        Self::new(width, height)
    }

    pub fn of(photo: &DynamicImage) -> Result<Self, OverlayError> {
        let (width, height) = photo.dimensions();
        Self::new(width, height)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }
}
