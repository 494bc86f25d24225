//! Boundcrop WASM - WebAssembly bindings for Boundcrop
//!
//! This crate exposes the boundcrop-core crop geometry and crop sessions to
//! JavaScript/TypeScript canvas editors.
//!
//! # Module Structure
//!
//! - `types` - WASM-compatible wrapper type for RGBA rasters
//! - `geometry` - Kernel functions, constraint resolvers and crop planning
//! - `transform` - Crop region extraction
//! - `encode` - PNG/JPEG encoding of cropped rasters
//! - `session` - Interactive crop sessions over a JS canvas adapter
//!
//! # Usage
//!
//! ```typescript
//! import init, { JsCropSession, JsRaster } from '@boundcrop/wasm';
//!
//! await init();
//!
//! const data = ctx.getImageData(0, 0, img.width, img.height);
//! const source = new JsRaster(data.width, data.height, data.data);
//! const session = new JsCropSession(adapter, imageId, image, source, { format: { type: 'png' } });
//! ```

use wasm_bindgen::prelude::*;

mod encode;
mod geometry;
mod session;
mod transform;
mod types;

// Re-export public types
pub use encode::{encode_jpeg, encode_png};
pub use geometry::{
    anchored_position, intersect, plan_crop, point_to_line_distance, rect_corners, resolve_move,
    resolve_scale,
};
pub use session::JsCropSession;
pub use transform::{crop_pixels, extract_region};
pub use types::JsRaster;

/// Initialize the WASM module (called automatically on load)
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::debug_1(&JsValue::from_str(&format!(
        "boundcrop-wasm {} loaded",
        version()
    )));
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
        assert_eq!(version(), env!("CARGO_PKG_VERSION"));
    }
}
