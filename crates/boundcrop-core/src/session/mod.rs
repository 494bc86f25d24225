//! Interactive crop sessions.
//!
//! A [`CropSession`] puts a crop box over one canvas image, keeps the box
//! inside the image while the user drags it, and on apply replaces the image
//! with the cropped raster. The canvas and the image loader are host
//! collaborators behind the [`Canvas`] and [`ImageLoader`] traits.

mod config;
mod crop_box;
mod host;
mod state;

pub use config::{
    ButtonAction, ButtonSpec, CropConfig, CropRectStyle, IconSource, OverlayStyle,
};
pub use crop_box::CropBox;
pub use host::{Canvas, EncodedImage, EncodedLoader, ImageLoader, LoadedImage, RasterLoader};
pub use state::{CropEvent, CropSession, SessionState};
