//! Boundcrop Core - bounded crop boxes for rotated, scaled images
//!
//! This crate provides the geometry behind an interactive crop tool: a crop
//! box dragged over an image on a 2D canvas is kept inside the image's
//! rotated bounds while it moves and resizes, and on apply the covered
//! region is extracted and handed back as a replacement image.

pub mod constraint;
pub mod error;
pub mod finalize;
pub mod geometry;
pub mod raster;
pub mod session;

pub use constraint::{resolve_move, resolve_scale, BoxPlacement, Control, HandleKind};
pub use error::CropError;
pub use finalize::{plan_crop, CropPlan, CropRegion, ImageObject, PlacementOptions};
pub use geometry::{OrientedRect, Point, RectTransform};
pub use raster::{ExportFormat, FilterType, RasterImage};
pub use session::{Canvas, CropConfig, CropEvent, CropSession, ImageLoader, SessionState};
