//! WASM bindings for crop region extraction.
//!
//! Hosts that drive the constraint resolvers themselves use this to cut the
//! planned region out of the image's source raster.

use crate::types::{filter_from_u8, js_error, JsRaster};
use boundcrop_core::finalize::CropPlan;
use boundcrop_core::geometry::RectTransform;
use boundcrop_core::raster::{self, PixelRect};
use wasm_bindgen::prelude::*;

/// Extract a planned crop region from a source raster.
///
/// # Arguments
///
/// * `source` - Unrotated source raster of the image
/// * `image_transform` - The image's `RectTransform`-shaped display geometry
/// * `plan` - A plan returned by `plan_crop`
/// * `filter` - 0 = nearest, 1 = bilinear, 2 = lanczos3
///
/// # Returns
///
/// New `JsRaster` of `round(width * multiplier)` by
/// `round(height * multiplier)` pixels.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const plan = plan_crop(cropBox, image);
/// const cropped = extract_region(source, image.transform, plan, 2);
/// ```
#[wasm_bindgen]
pub fn extract_region(
    source: &JsRaster,
    image_transform: JsValue,
    plan: JsValue,
    filter: u8,
) -> Result<JsRaster, JsValue> {
    let image: RectTransform = serde_wasm_bindgen::from_value(image_transform).map_err(js_error)?;
    let plan: CropPlan = serde_wasm_bindgen::from_value(plan).map_err(js_error)?;

    let source = source.to_raster().map_err(js_error)?;

    plan.extract(&source, &image, filter_from_u8(filter))
        .map(JsRaster::from_raster)
        .map_err(js_error)
}

/// Copy a pixel rectangle out of a raster, clamped to its bounds.
#[wasm_bindgen]
pub fn crop_pixels(
    source: &JsRaster,
    x: u32,
    y: u32,
    width: u32,
    height: u32,
) -> Result<JsRaster, JsValue> {
    let rect = PixelRect {
        x,
        y,
        width,
        height,
    };
    let source = source.to_raster().map_err(js_error)?;
    raster::crop_pixels(&source, rect)
        .map(JsRaster::from_raster)
        .map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_crop_matches_binding_input() {
        let source = JsRaster::new(10, 10, vec![50u8; 10 * 10 * 4]);
        let rect = PixelRect {
            x: 2,
            y: 2,
            width: 4,
            height: 3,
        };
        let out = raster::crop_pixels(&source.to_raster().unwrap(), rect).unwrap();
        let js = JsRaster::from_raster(out);
        assert_eq!((js.width(), js.height()), (4, 3));
        assert_eq!(js.byte_length(), 48);
    }
}

/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use boundcrop_core::finalize::{plan_crop, ImageObject};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_extract_region() {
        let image = ImageObject::new(RectTransform::new(0.0, 0.0, 100.0, 100.0));
        let plan = plan_crop(&RectTransform::new(20.0, 30.0, 40.0, 25.0), &image);
        let source = JsRaster::new(100, 100, vec![128u8; 100 * 100 * 4]);

        let out = extract_region(
            &source,
            serde_wasm_bindgen::to_value(&image.transform).unwrap(),
            serde_wasm_bindgen::to_value(&plan).unwrap(),
            0,
        )
        .unwrap();
        assert_eq!((out.width(), out.height()), (40, 25));
    }

    #[wasm_bindgen_test]
    fn test_crop_pixels_outside_fails() {
        let source = JsRaster::new(10, 10, vec![0u8; 10 * 10 * 4]);
        assert!(crop_pixels(&source, 20, 0, 5, 5).is_err());
    }

    #[wasm_bindgen_test]
    fn test_short_source_buffer_fails() {
        let source = JsRaster::new(10, 10, vec![0u8; 40]);
        assert!(crop_pixels(&source, 2, 2, 4, 4).is_err());
    }
}
