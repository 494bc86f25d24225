//! Raster buffers, region extraction and export encoding.
//!
//! This module provides functionality for:
//! - Holding RGBA pixel data for the image being cropped
//! - Extracting a display-space crop region at a resolution multiplier
//! - Encoding the extracted region as PNG or JPEG
//!
//! # Architecture
//!
//! Everything here is synchronous. The asynchronous boundary of a crop lives
//! in the session's image loader, which receives the already-extracted
//! raster.

mod encode;
mod extract;
mod types;

pub use encode::{encode, encode_jpeg, encode_png, EncodeError, ExportFormat};
pub use extract::{crop_pixels, extract_region, resize, PixelRect};
pub use types::{FilterType, RasterError, RasterImage};
