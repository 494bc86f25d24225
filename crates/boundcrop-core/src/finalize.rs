//! Crop finalization: from box and image geometry to a crop plan.
//!
//! The plan is computed in the image's own unrotated frame. Distances from
//! the box's top-left corner to the image's left and top edges do not change
//! under rotation, so the extracted region ignores the image's angle and the
//! replacement image picks the angle back up through its placement.

use crate::geometry::{point_to_line_distance, RectTransform};
use crate::raster::{extract_region, FilterType, RasterError, RasterImage};
use serde::{Deserialize, Serialize};

/// An image on the canvas together with the identity carried over to its
/// cropped replacement.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ImageObject {
    /// Displayed geometry of the image.
    pub transform: RectTransform,
    /// Existing source crop offset, in unscaled image units.
    pub crop_x: f64,
    pub crop_y: f64,
    pub id: Option<String>,
    pub name: Option<String>,
    pub drawing_type: Option<String>,
}

impl ImageObject {
    pub fn new(transform: RectTransform) -> Self {
        Self {
            transform,
            ..Default::default()
        }
    }
}

/// Crop rectangle in display units of the unrotated image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CropRegion {
    pub left: u32,
    pub top: u32,
    pub width: u32,
    pub height: u32,
}

impl CropRegion {
    /// Pixel size of the extracted raster at the given multiplier.
    pub fn output_size(&self, multiplier: f64) -> (u32, u32) {
        (
            (self.width as f64 * multiplier).round().max(1.0) as u32,
            (self.height as f64 * multiplier).round().max(1.0) as u32,
        )
    }
}

/// Where and how the replacement image is placed.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct PlacementOptions {
    pub left: f64,
    pub top: f64,
    pub angle: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    pub id: Option<String>,
    pub name: Option<String>,
    pub drawing_type: Option<String>,
}

/// Everything needed to turn the current crop box into a replacement image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CropPlan {
    pub region: CropRegion,
    /// Extraction resolution multiplier, never below 1.
    pub multiplier: f64,
    pub placement: PlacementOptions,
}

impl CropPlan {
    /// Extract the planned region from the image's source raster.
    pub fn extract(
        &self,
        source: &RasterImage,
        image: &RectTransform,
        filter: FilterType,
    ) -> Result<RasterImage, RasterError> {
        extract_region(source, image, &self.region, self.multiplier, filter)
    }
}

/// Extraction multiplier that keeps the crop at source resolution for
/// downscaled images: `max(1 / min(scale_x, scale_y), 1)`.
pub fn resolution_multiplier(scale_x: f64, scale_y: f64) -> f64 {
    (1.0 / scale_x.min(scale_y)).max(1.0)
}

/// Compute the crop plan for a crop box over an image.
///
/// # Arguments
///
/// * `crop_box` - Final crop box geometry
/// * `image` - The image being cropped
///
/// # Returns
///
/// The crop region (display units, measured from the image's top-left along
/// its own axes), the resolution multiplier, and the replacement placement.
pub fn plan_crop(crop_box: &RectTransform, image: &ImageObject) -> CropPlan {
    let img = &image.transform;
    let img_corners = img.corners();
    let box_tl = crop_box.corners().tl;

    let left = (point_to_line_distance(box_tl, img_corners.tl, img_corners.bl) - img.padding)
        .abs()
        .round();
    let top = (point_to_line_distance(box_tl, img_corners.tl, img_corners.tr) - img.padding)
        .abs()
        .round();
    let width = crop_box.scaled_width().round().max(0.0);
    let height = crop_box.scaled_height().round().max(0.0);

    let multiplier = resolution_multiplier(img.scale_x, img.scale_y);

    CropPlan {
        region: CropRegion {
            left: left as u32,
            top: top as u32,
            width: width as u32,
            height: height as u32,
        },
        multiplier,
        placement: PlacementOptions {
            left: crop_box.left,
            top: crop_box.top,
            angle: img.angle,
            scale_x: 1.0 / multiplier,
            scale_y: 1.0 / multiplier,
            id: image.id.clone(),
            name: image.name.clone(),
            drawing_type: image.drawing_type.clone(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_image() -> ImageObject {
        let mut image = ImageObject::new(RectTransform::new(0.0, 0.0, 100.0, 100.0));
        image.id = Some("img-1".to_string());
        image.name = Some("photo".to_string());
        image.drawing_type = Some("image".to_string());
        image
    }

    #[test]
    fn test_plan_for_unscaled_image() {
        let crop_box = RectTransform::new(20.0, 30.0, 40.0, 25.0);
        let plan = plan_crop(&crop_box, &unit_image());

        assert_eq!(
            plan.region,
            CropRegion {
                left: 20,
                top: 30,
                width: 40,
                height: 25
            }
        );
        assert_eq!(plan.multiplier, 1.0);
        assert_eq!(plan.placement.left, 20.0);
        assert_eq!(plan.placement.top, 30.0);
        assert_eq!(plan.placement.scale_x, 1.0);
        assert_eq!(plan.placement.id.as_deref(), Some("img-1"));
        assert_eq!(plan.placement.name.as_deref(), Some("photo"));
        assert_eq!(plan.placement.drawing_type.as_deref(), Some("image"));
    }

    #[test]
    fn test_plan_uses_smaller_scale_for_multiplier() {
        let mut image = unit_image();
        image.transform.scale_x = 0.5;
        image.transform.scale_y = 0.25;
        let crop_box = RectTransform::new(10.0, 10.0, 20.0, 10.0);

        let plan = plan_crop(&crop_box, &image);
        assert_eq!(plan.multiplier, 4.0);
        assert_eq!(plan.placement.scale_x, 0.25);
        assert_eq!(plan.placement.scale_y, 0.25);
        assert_eq!(plan.region.output_size(plan.multiplier), (80, 40));
    }

    #[test]
    fn test_multiplier_never_below_one() {
        assert_eq!(resolution_multiplier(2.0, 3.0), 1.0);
        assert_eq!(resolution_multiplier(1.0, 1.0), 1.0);
        assert_eq!(resolution_multiplier(0.5, 2.0), 2.0);
    }

    #[test]
    fn test_plan_box_scale_sets_region_size() {
        let mut crop_box = RectTransform::new(0.0, 0.0, 50.0, 50.0);
        crop_box.scale_x = 1.5;
        crop_box.scale_y = 0.5;
        let plan = plan_crop(&crop_box, &unit_image());
        assert_eq!(plan.region.width, 75);
        assert_eq!(plan.region.height, 25);
    }

    #[test]
    fn test_plan_is_rotation_invariant() {
        let mut image = unit_image();
        image.transform.left = 200.0;
        image.transform.top = 50.0;
        image.transform.angle = 30.0;

        // Box offset (20, 30) along the image's own axes.
        let (u, v) = image.transform.axes();
        let tl = image.transform.corners().tl + u * 20.0 + v * 30.0;
        let mut crop_box = RectTransform::new(tl.x, tl.y, 40.0, 25.0);
        crop_box.angle = 30.0;

        let plan = plan_crop(&crop_box, &image);
        assert_eq!(
            plan.region,
            CropRegion {
                left: 20,
                top: 30,
                width: 40,
                height: 25
            }
        );
        assert_eq!(plan.placement.angle, 30.0);
        assert_eq!(plan.placement.left, tl.x);
    }

    #[test]
    fn test_plan_subtracts_image_padding() {
        let mut image = unit_image();
        image.transform.padding = 5.0;
        let crop_box = RectTransform::new(20.0, 30.0, 40.0, 25.0);

        let plan = plan_crop(&crop_box, &image);
        assert_eq!(plan.region.left, 20);
        assert_eq!(plan.region.top, 30);
    }

    #[test]
    fn test_plan_extracts_from_source() {
        let source = RasterImage {
            width: 100,
            height: 100,
            pixels: vec![200u8; 100 * 100 * 4],
        };
        let image = unit_image();
        let crop_box = RectTransform::new(20.0, 30.0, 40.0, 25.0);
        let plan = plan_crop(&crop_box, &image);

        let out = plan
            .extract(&source, &image.transform, FilterType::Nearest)
            .unwrap();
        assert_eq!((out.width, out.height), (40, 25));
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// The region's origin is the box's offset along the image axes,
        /// whatever the image's rotation.
        #[test]
        fn prop_region_origin_ignores_rotation(
            angle in -180.0f64..180.0,
            dx in 0u32..60,
            dy in 0u32..60,
        ) {
            let image = ImageObject::new(RectTransform {
                left: 100.0,
                top: 100.0,
                angle,
                ..RectTransform::new(0.0, 0.0, 100.0, 100.0)
            });
            let (u, v) = image.transform.axes();
            let tl = image.transform.corners().tl + u * dx as f64 + v * dy as f64;
            let crop_box = RectTransform {
                angle,
                ..RectTransform::new(tl.x, tl.y, 20.0, 20.0)
            };

            let plan = plan_crop(&crop_box, &image);
            prop_assert_eq!(plan.region.left, dx);
            prop_assert_eq!(plan.region.top, dy);
        }

        #[test]
        fn prop_placement_scale_inverts_multiplier(
            sx in 0.05f64..4.0,
            sy in 0.05f64..4.0,
        ) {
            let m = resolution_multiplier(sx, sy);
            let smallest = sx.min(sy);
            if smallest < 1.0 {
                prop_assert!((m * smallest - 1.0).abs() < 1e-9);
            } else {
                prop_assert_eq!(m, 1.0);
            }
        }
    }
}
