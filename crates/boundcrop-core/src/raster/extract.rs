//! Region extraction from the source raster.
//!
//! Crop regions arrive in display units, measured from the image's own
//! top-left corner along its own axes. Dividing by the image's displayed
//! size maps them onto the source raster, so the image's rotation never
//! enters the pixel math.

use super::{FilterType, RasterError, RasterImage};
use crate::finalize::CropRegion;
use crate::geometry::RectTransform;

/// A crop rectangle in source pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

/// Copy a pixel rectangle out of a raster.
///
/// # Behavior
///
/// - The rectangle is clamped to the raster bounds
/// - Minimum output dimension is 1x1 pixels
/// - A rectangle covering the whole raster returns a copy
///
/// # Errors
///
/// Returns `RasterError::InvalidDimensions` for an empty raster,
/// `RasterError::BufferSizeMismatch` when the pixel buffer does not match
/// the dimensions, and `RasterError::RegionOutOfBounds` when the rectangle
/// starts past the raster's right or bottom edge.
pub fn crop_pixels(image: &RasterImage, rect: PixelRect) -> Result<RasterImage, RasterError> {
    if image.is_empty() {
        return Err(RasterError::InvalidDimensions {
            width: image.width,
            height: image.height,
        });
    }
    let expected = image.width as usize * image.height as usize * 4;
    if image.pixels.len() != expected {
        return Err(RasterError::BufferSizeMismatch {
            expected,
            actual: image.pixels.len(),
        });
    }
    if rect.x >= image.width || rect.y >= image.height {
        return Err(RasterError::RegionOutOfBounds {
            width: image.width,
            height: image.height,
        });
    }

    if rect.x == 0 && rect.y == 0 && rect.width >= image.width && rect.height >= image.height {
        return Ok(image.clone());
    }

    let right = rect.x.saturating_add(rect.width).min(image.width);
    let bottom = rect.y.saturating_add(rect.height).min(image.height);
    let out_width = right.saturating_sub(rect.x).max(1);
    let out_height = bottom.saturating_sub(rect.y).max(1);

    let stride = image.width as usize * 4;
    let row_len = out_width as usize * 4;
    let mut pixels = Vec::with_capacity(row_len * out_height as usize);
    for y in rect.y..rect.y + out_height {
        let start = y as usize * stride + rect.x as usize * 4;
        pixels.extend_from_slice(&image.pixels[start..start + row_len]);
    }

    Ok(RasterImage {
        width: out_width,
        height: out_height,
        pixels,
    })
}

/// Resize a raster to exact dimensions.
///
/// # Errors
///
/// Returns `RasterError::InvalidDimensions` if either target dimension is
/// zero, or `RasterError::BufferSizeMismatch` if the source buffer is
/// inconsistent with its dimensions.
pub fn resize(
    image: &RasterImage,
    width: u32,
    height: u32,
    filter: FilterType,
) -> Result<RasterImage, RasterError> {
    if width == 0 || height == 0 {
        return Err(RasterError::InvalidDimensions { width, height });
    }

    if image.width == width && image.height == height {
        return Ok(image.clone());
    }

    let rgba = image
        .to_rgba_image()
        .ok_or(RasterError::BufferSizeMismatch {
            expected: image.width as usize * image.height as usize * 4,
            actual: image.pixels.len(),
        })?;

    let resized = image::imageops::resize(&rgba, width, height, filter.to_image_filter());

    Ok(RasterImage::from_rgba_image(resized))
}

/// Extract a display-space crop region from the image's source raster.
///
/// # Arguments
///
/// * `source` - Unrotated source raster of the image
/// * `image` - The image's display transform (size and scale)
/// * `region` - Crop region in display units
/// * `multiplier` - Resolution multiplier applied to the output size
/// * `filter` - Resampling filter for the final resize
///
/// # Returns
///
/// A raster of `round(width * multiplier)` by `round(height * multiplier)`
/// pixels.
pub fn extract_region(
    source: &RasterImage,
    image: &RectTransform,
    region: &CropRegion,
    multiplier: f64,
    filter: FilterType,
) -> Result<RasterImage, RasterError> {
    if region.width == 0 || region.height == 0 {
        return Err(RasterError::EmptyRegion {
            width: region.width,
            height: region.height,
        });
    }

    let display_w = image.scaled_width().abs();
    let display_h = image.scaled_height().abs();
    if source.is_empty() || !(display_w > 0.0 && display_h > 0.0) {
        return Err(RasterError::InvalidDimensions {
            width: source.width,
            height: source.height,
        });
    }

    // Source pixels per display unit on each axis.
    let per_unit_x = source.width as f64 / display_w;
    let per_unit_y = source.height as f64 / display_h;

    let rect = PixelRect {
        x: (region.left as f64 * per_unit_x).round() as u32,
        y: (region.top as f64 * per_unit_y).round() as u32,
        width: (region.width as f64 * per_unit_x).round().max(1.0) as u32,
        height: (region.height as f64 * per_unit_y).round().max(1.0) as u32,
    };
    let cropped = crop_pixels(source, rect)?;

    let (out_w, out_h) = region.output_size(multiplier);
    resize(&cropped, out_w, out_h, filter)
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Strategy for generating raster dimensions (keep reasonable for speed).
    fn dimensions_strategy() -> impl Strategy<Value = (u32, u32)> {
        (4u32..=64, 4u32..=64)
    }

    fn create_test_image(width: u32, height: u32) -> RasterImage {
        let mut pixels = Vec::with_capacity((width * height * 4) as usize);
        for y in 0..height {
            for x in 0..width {
                let v = ((y * width + x) % 256) as u8;
                pixels.extend_from_slice(&[v, v, v, 255]);
            }
        }
        RasterImage {
            width,
            height,
            pixels,
        }
    }

    proptest! {
        /// Property: a crop inside the raster never exceeds its bounds and is
        /// never empty.
        #[test]
        fn prop_crop_stays_within_source(
            (width, height) in dimensions_strategy(),
            x in 0u32..64,
            y in 0u32..64,
            w in 0u32..80,
            h in 0u32..80,
        ) {
            prop_assume!(x < width && y < height);
            let image = create_test_image(width, height);
            let out = crop_pixels(&image, PixelRect { x, y, width: w, height: h }).unwrap();

            prop_assert!(out.width >= 1 && out.height >= 1);
            prop_assert!(x + out.width <= width);
            prop_assert!(y + out.height <= height);
            prop_assert_eq!(out.pixels.len(), (out.width * out.height * 4) as usize);
        }

        /// Property: the first output pixel is the source pixel at the
        /// crop origin.
        #[test]
        fn prop_crop_origin_pixel_matches(
            (width, height) in dimensions_strategy(),
            x in 0u32..64,
            y in 0u32..64,
        ) {
            prop_assume!(x < width && y < height);
            let image = create_test_image(width, height);
            let out = crop_pixels(&image, PixelRect { x, y, width: 2, height: 2 }).unwrap();

            let src = ((y * width + x) * 4) as usize;
            prop_assert_eq!(&out.pixels[0..4], &image.pixels[src..src + 4]);
        }

        /// Property: extraction output size is the region size times the
        /// multiplier.
        #[test]
        fn prop_extract_output_size(
            left in 0u32..40,
            top in 0u32..40,
            width in 1u32..20,
            height in 1u32..20,
            multiplier in 1.0f64..3.0,
        ) {
            let source = create_test_image(64, 64);
            let image = RectTransform::new(0.0, 0.0, 64.0, 64.0);
            let region = CropRegion { left, top, width, height };

            let out = extract_region(&source, &image, &region, multiplier, FilterType::Nearest)
                .unwrap();
            prop_assert_eq!((out.width, out.height), region.output_size(multiplier));
        }
    }
}
