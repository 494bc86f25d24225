//! Image encoding WASM bindings.
//!
//! Encodes a cropped raster for download or for loading into an `<img>`.
//!
//! # Example
//!
//! ```typescript
//! const png = encode_png(cropped);
//! const jpeg = encode_jpeg(cropped, 90);
//! const url = URL.createObjectURL(new Blob([png], { type: 'image/png' }));
//! ```

use crate::types::{js_error, JsRaster};
use boundcrop_core::raster;
use wasm_bindgen::prelude::*;

/// Encode a raster to PNG bytes.
#[wasm_bindgen]
pub fn encode_png(image: &JsRaster) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster().map_err(js_error)?;
    raster::encode_png(&raster).map_err(js_error)
}

/// Encode a raster to JPEG bytes.
///
/// # Arguments
///
/// * `image` - The raster to encode; alpha is discarded
/// * `quality` - JPEG quality (1-100, where 100 is highest quality)
///
/// # Errors
///
/// Returns an error if the pixel data length doesn't match
/// width * height * 4, or if either dimension is zero.
#[wasm_bindgen]
pub fn encode_jpeg(image: &JsRaster, quality: u8) -> Result<Vec<u8>, JsValue> {
    let raster = image.to_raster().map_err(js_error)?;
    raster::encode_jpeg(&raster, quality).map_err(js_error)
}
