//! Image decoding into floating-point pixel grids

use crate::io::configuration::MAX_GRID_DIMENSION;
use crate::io::error::{GlyphError, Result, invalid_parameter};
use ndarray::Array3;
use std::path::Path;

/// Load an image file into a pixel grid
///
/// The result has shape `(height, width, 3)` with channels in RGB order and
/// values in `0.0..=255.0`. Computation downstream happens in `f64` so block
/// means and gradients keep full precision.
///
/// # Errors
///
/// Returns an error if the file cannot be opened or decoded, or if either
/// image dimension exceeds [`MAX_GRID_DIMENSION`].
pub fn load_pixel_grid<P: AsRef<Path>>(path: P) -> Result<Array3<f64>> {
    let path_buf = path.as_ref().to_path_buf();
    let img = image::open(&path_buf).map_err(|e| GlyphError::ImageLoad {
        path: path_buf,
        source: e,
    })?;
    let rgb = img.to_rgb8();

    let (width, height) = (rgb.width() as usize, rgb.height() as usize);
    if width > MAX_GRID_DIMENSION || height > MAX_GRID_DIMENSION {
        return Err(invalid_parameter(
            "image dimensions",
            &format!("{width}x{height}"),
            &format!("each dimension must be at most {MAX_GRID_DIMENSION}"),
        ));
    }

    let mut pixels = Array3::zeros((height, width, 3));
    for (x, y, pixel) in rgb.enumerate_pixels() {
        for (c, &value) in pixel.0.iter().enumerate() {
            if let Some(slot) = pixels.get_mut((y as usize, x as usize, c)) {
                *slot = f64::from(value);
            }
        }
    }

    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage};

    #[test]
    fn test_loads_rgb_channels_in_row_major_order() {
        let dir = tempfile::tempdir().unwrap_or_else(|e| unreachable!("tempdir: {e}"));
        let path = dir.path().join("sample.png");

        let mut img = RgbImage::new(2, 1);
        img.put_pixel(0, 0, Rgb([10, 20, 30]));
        img.put_pixel(1, 0, Rgb([200, 100, 50]));
        img.save(&path).unwrap_or_else(|e| unreachable!("save: {e}"));

        let grid = load_pixel_grid(&path).unwrap_or_else(|e| unreachable!("load: {e}"));
        assert_eq!(grid.dim(), (1, 2, 3));
        assert!((grid[(0, 0, 0)] - 10.0).abs() < f64::EPSILON);
        assert!((grid[(0, 0, 2)] - 30.0).abs() < f64::EPSILON);
        assert!((grid[(0, 1, 0)] - 200.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_missing_file_reports_image_load_error() {
        let result = load_pixel_grid("definitely/not/a/file.png");
        assert!(matches!(result, Err(GlyphError::ImageLoad { .. })));
    }
}
