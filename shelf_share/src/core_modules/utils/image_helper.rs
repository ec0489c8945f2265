pub mod image_helper {
    use crate::error::OverlayError;
    use image::{DynamicImage, ImageEncoder, RgbaImage};
    use std::path::Path;

    /// Decodes a shelf photo in any format the `image` crate recognises.
    pub fn load(path: impl AsRef<Path>) -> Result<DynamicImage, OverlayError> {
        Ok(image::open(path)?)
    }

    /// Writes an RGBA buffer as a PNG file.
    pub fn save_png(path: impl AsRef<Path>, buffer: &RgbaImage) -> Result<(), OverlayError> {
        let path = path.as_ref();
        let output = std::fs::File::create(path).map_err(|source| OverlayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let encoder = image::codecs::png::PngEncoder::new(std::io::BufWriter::new(output));

        encoder.write_image(
            buffer.as_raw(),
            buffer.width(),
            buffer.height(),
            image::ExtendedColorType::Rgba8,
        )?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::image_helper::*;
    use image::{Rgba, RgbaImage};

    #[test]
    fn saved_png_loads_back_with_same_pixels() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("gradient.png");
        let mut buffer = RgbaImage::new(40, 30);
        for (x, y, pixel) in buffer.enumerate_pixels_mut() {
            *pixel = Rgba([(x * 6) as u8, (y * 8) as u8, 128, 255]);
        }

        save_png(&path, &buffer).expect("Error Saving File.");
        let loaded = load(&path).expect("Error Loading File.").to_rgba8();

        assert_eq!(loaded.dimensions(), (40, 30));
        assert_eq!(loaded.get_pixel(39, 29), buffer.get_pixel(39, 29));
    }

    #[test]
    fn saving_into_a_missing_directory_reports_the_path() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("missing").join("out.png");
        let err = save_png(&path, &RgbaImage::new(2, 2)).unwrap_err();
        assert!(err.to_string().contains("out.png"));
    }
}
