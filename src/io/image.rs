//! Grayscale image rasters where each pixel value is a category

use crate::io::error::{AnalysisError, Result};
use crate::io::raster::CategoryRaster;
use image::DynamicImage;
use ndarray::Array2;
use std::path::Path;

/// File extensions read through the image decoder
pub const IMAGE_EXTENSIONS: [&str; 5] = ["png", "tif", "tiff", "bmp", "pgm"];

/// Whether `path` names an image raster rather than an ASCII grid
pub fn is_image_path(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| {
            IMAGE_EXTENSIONS
                .iter()
                .any(|known| known.eq_ignore_ascii_case(ext))
        })
}

/// Load a single-channel image as a category raster
///
/// 8- and 16-bit gray values are used as categories unchanged. With a gray +
/// alpha layout, fully transparent pixels are null.
///
/// # Errors
///
/// Returns an error if:
/// - The file cannot be opened or decoded
/// - The image has color channels, since colors carry no category value
pub fn read_category_image(path: &Path) -> Result<CategoryRaster> {
    let img = image::open(path).map_err(|e| AnalysisError::RasterLoad {
        path: path.to_path_buf(),
        source: e,
    })?;
    categories_from_image(&img).ok_or_else(|| AnalysisError::UnsupportedFormat {
        path: path.to_path_buf(),
        reason: format!(
            "expected a single-channel gray image, found {:?}",
            img.color()
        ),
    })
}

/// Convert a decoded image; `None` if its pixel layout isn't gray
pub fn categories_from_image(img: &DynamicImage) -> Option<CategoryRaster> {
    let (width, height) = (img.width() as usize, img.height() as usize);

    let cells = match img {
        DynamicImage::ImageLuma8(buffer) => Array2::from_shape_fn((height, width), |(y, x)| {
            buffer
                .get_pixel_checked(x as u32, y as u32)
                .map(|p| i32::from(p.0[0]))
        }),
        DynamicImage::ImageLuma16(buffer) => Array2::from_shape_fn((height, width), |(y, x)| {
            buffer
                .get_pixel_checked(x as u32, y as u32)
                .map(|p| i32::from(p.0[0]))
        }),
        DynamicImage::ImageLumaA8(buffer) => Array2::from_shape_fn((height, width), |(y, x)| {
            buffer
                .get_pixel_checked(x as u32, y as u32)
                .filter(|p| p.0[1] > 0)
                .map(|p| i32::from(p.0[0]))
        }),
        DynamicImage::ImageLumaA16(buffer) => Array2::from_shape_fn((height, width), |(y, x)| {
            buffer
                .get_pixel_checked(x as u32, y as u32)
                .filter(|p| p.0[1] > 0)
                .map(|p| i32::from(p.0[0]))
        }),
        _ => return None,
    };

    Some(CategoryRaster::new(cells))
}
