//! Host collaborators of a crop session: the canvas scene graph and the
//! image loader that turns an extracted raster into a canvas image.

use super::config::{ButtonAction, ButtonSpec, CropRectStyle, OverlayStyle};
use crate::error::CropError;
use crate::finalize::PlacementOptions;
use crate::geometry::RectTransform;
use crate::raster::{encode, ExportFormat, RasterImage};
use std::fmt;
use std::future::{ready, Future};

/// The scene graph a crop session draws into.
///
/// The session only holds ids handed out by the canvas; the canvas owns the
/// objects.
pub trait Canvas {
    /// Handle of an object on the canvas.
    type Id: Copy + Eq + fmt::Debug;
    /// Image asset type accepted by [`Canvas::add_image`].
    type Image;

    fn add_crop_rect(&mut self, rect: &RectTransform, style: &CropRectStyle) -> Self::Id;
    fn add_overlay(&mut self, rect: &RectTransform, style: &OverlayStyle) -> Self::Id;
    /// Attach a button control to an object.
    fn add_button(&mut self, owner: Self::Id, action: ButtonAction, spec: &ButtonSpec);
    /// Detach a button control from an object.
    fn remove_button(&mut self, owner: Self::Id, action: ButtonAction);
    fn remove(&mut self, id: Self::Id);
    /// Select an object, or clear the selection with `None`.
    fn set_active(&mut self, id: Option<Self::Id>);
    fn add_image(&mut self, image: Self::Image);
    fn request_render(&mut self);
}

/// Produces the replacement image from the extracted raster.
///
/// This is the only asynchronous step of a crop; hosts that decode through
/// the browser or a worker implement it with their own future.
pub trait ImageLoader {
    type Asset;

    fn load(
        &self,
        raster: RasterImage,
        placement: PlacementOptions,
    ) -> impl Future<Output = Result<Self::Asset, CropError>>;
}

/// A raster ready to be placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct LoadedImage {
    pub raster: RasterImage,
    pub placement: PlacementOptions,
}

/// Loader that hands the raster through untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct RasterLoader;

impl ImageLoader for RasterLoader {
    type Asset = LoadedImage;

    fn load(
        &self,
        raster: RasterImage,
        placement: PlacementOptions,
    ) -> impl Future<Output = Result<LoadedImage, CropError>> {
        ready(Ok(LoadedImage { raster, placement }))
    }
}

/// An encoded image file ready to be placed on the canvas.
#[derive(Debug, Clone, PartialEq)]
pub struct EncodedImage {
    pub bytes: Vec<u8>,
    pub format: ExportFormat,
    pub width: u32,
    pub height: u32,
    pub placement: PlacementOptions,
}

/// Loader that encodes the raster as PNG or JPEG.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncodedLoader {
    pub format: ExportFormat,
}

impl EncodedLoader {
    pub fn new(format: ExportFormat) -> Self {
        Self { format }
    }
}

impl ImageLoader for EncodedLoader {
    type Asset = EncodedImage;

    fn load(
        &self,
        raster: RasterImage,
        placement: PlacementOptions,
    ) -> impl Future<Output = Result<EncodedImage, CropError>> {
        let result = encode(&raster, self.format)
            .map(|bytes| EncodedImage {
                bytes,
                format: self.format,
                width: raster.width,
                height: raster.height,
                placement,
            })
            .map_err(CropError::from);
        ready(result)
    }
}
