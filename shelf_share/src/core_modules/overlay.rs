// THEORY:
// The `Overlay` is the bridge between the abstract grid and a concrete shelf
// photo. It answers two questions for a UI: "where on the photo is this cell?"
// (for drawing) and "which cell is under this pixel?" (for turning a click into
// a toggle). It also renders an annotated copy of the photo for review.
//
// Key architectural principles:
// 1.  **Exact Tiling**: Cell edges sit at `ceil(i * size / n)` pixels. Adjacent
//     cells share an edge, the last edge is exactly the image size, and no pixel
//     is covered twice or left out, whatever the remainder of `size / n`.
// 2.  **Consistent Hit-Testing**: `cell_at(x, y)` uses `floor(x * n / size)`,
//     which is the exact inverse of the ceiling edges above. A pixel inside
//     `cell_rect(c)` always hit-tests back to `c`.
// 3.  **Non-Destructive Rendering**: The photo is borrowed; rendering produces a
//     new RGBA buffer with selected cells tinted and grid lines drawn on top.

use crate::core_modules::grid::{Cell, Grid};
use crate::core_modules::image_ref::ImageRef;
use crate::core_modules::selection::Selection;
use crate::error::OverlayError;
use image::{DynamicImage, GenericImageView, Rgba, RgbaImage};
use serde::{Deserialize, Serialize};

/// A cell's rectangle in image pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub fn contains(&self, x: u32, y: u32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.width && y < self.y + self.height
    }
}

/// How the overlay is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    /// RGBA colour of the grid lines.
    pub line_color: [u8; 4],
    /// RGBA colour blended over selected cells.
    pub selection_color: [u8; 4],
    /// Blend factor of `selection_color`, in `[0.0, 1.0]`.
    pub selection_opacity: f32,
    /// Grid line thickness in pixels. Zero disables lines.
    pub line_width: u32,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            line_color: [255, 255, 255, 255],
            selection_color: [0, 160, 255, 255],
            selection_opacity: 0.45,
            line_width: 2,
        }
    }
}

/// A grid laid over one concrete photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Overlay {
    image: ImageRef,
    grid: Grid,
}

impl Overlay {
    pub fn new(image: ImageRef, grid: Grid) -> Self {
        Self { image, grid }
    }

    pub fn image(&self) -> ImageRef {
        self.image
    }

    pub fn grid(&self) -> Grid {
        self.grid
    }

    /// Pixel rectangle of `cell`, or `None` if the cell is not on the grid.
    /// On photos narrower than the grid some cells have zero width.
    pub fn cell_rect(&self, cell: Cell) -> Option<PixelRect> {
        if !self.grid.contains(cell) {
            return None;
        }
        let (width, height) = (self.image.width(), self.image.height());
        let (rows, cols) = (self.grid.rows(), self.grid.cols());
        let left = edge(cell.col, width, cols);
        let right = edge(cell.col + 1, width, cols);
        let top = edge(cell.row, height, rows);
        let bottom = edge(cell.row + 1, height, rows);
        Some(PixelRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }

    /// The cell under image pixel `(x, y)`, or `None` outside the photo.
    pub fn cell_at(&self, x: u32, y: u32) -> Option<Cell> {
        let (width, height) = (self.image.width(), self.image.height());
        if x >= width || y >= height {
            return None;
        }
        let col = u64::from(x) * u64::from(self.grid.cols()) / u64::from(width);
        let row = u64::from(y) * u64::from(self.grid.rows()) / u64::from(height);
        // x < width keeps col < cols, and likewise for rows.
        Some(Cell::new(row as u32, col as u32))
    }

    /// Draws the grid over a copy of `photo`, tinting every selected cell.
    pub fn render(
        &self,
        photo: &DynamicImage,
        selection: &Selection,
        style: &OverlayStyle,
    ) -> Result<RgbaImage, OverlayError> {
        let (actual_width, actual_height) = photo.dimensions();
        if (actual_width, actual_height) != (self.image.width(), self.image.height()) {
            return Err(OverlayError::DimensionMismatch {
                expected_width: self.image.width(),
                expected_height: self.image.height(),
                actual_width,
                actual_height,
            });
        }

        let mut canvas = photo.to_rgba8();

        // --- 1. Tint selected cells ---
        let opacity = style.selection_opacity.clamp(0.0, 1.0);
        for cell in selection.iter() {
            let Some(rect) = self.cell_rect(cell) else {
                continue;
            };
            for y in rect.y..rect.y + rect.height {
                for x in rect.x..rect.x + rect.width {
                    let pixel = canvas.get_pixel_mut(x, y);
                    *pixel = blend(*pixel, style.selection_color, opacity);
                }
            }
        }

        // --- 2. Draw grid lines on every cell edge, borders included ---
        if style.line_width > 0 {
            let color = Rgba(style.line_color);
            for col in 0..=self.grid.cols() {
                let x = edge(col, actual_width, self.grid.cols());
                let start = line_start(x, style.line_width, actual_width);
                for y in 0..actual_height {
                    for lx in start..(start + style.line_width).min(actual_width) {
                        canvas.put_pixel(lx, y, color);
                    }
                }
            }
            for row in 0..=self.grid.rows() {
                let y = edge(row, actual_height, self.grid.rows());
                let start = line_start(y, style.line_width, actual_height);
                for ly in start..(start + style.line_width).min(actual_height) {
                    for x in 0..actual_width {
                        canvas.put_pixel(x, ly, color);
                    }
                }
            }
        }

        Ok(canvas)
    }
}

/// Pixel position of the `index`-th edge when `size` pixels are split into `parts`.
fn edge(index: u32, size: u32, parts: u32) -> u32 {
    let numerator = u64::from(index) * u64::from(size);
    let parts = u64::from(parts);
    // index <= parts keeps the result <= size.
    numerator.div_ceil(parts) as u32
}

/// Centres a line of `line_width` on `position`, keeping it inside `[0, size)`.
fn line_start(position: u32, line_width: u32, size: u32) -> u32 {
    position
        .saturating_sub(line_width / 2)
        .min(size.saturating_sub(line_width))
}

fn blend(base: Rgba<u8>, tint: [u8; 4], opacity: f32) -> Rgba<u8> {
    let mix = |b: u8, t: u8| -> u8 {
        (f32::from(b) * (1.0 - opacity) + f32::from(t) * opacity).round() as u8
    };
    let [r, g, b, a] = base.0;
    Rgba([mix(r, tint[0]), mix(g, tint[1]), mix(b, tint[2]), a])
}
