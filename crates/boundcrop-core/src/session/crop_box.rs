//! The crop box and its gesture handlers.

use crate::constraint::{resolve_move, resolve_scale, BoxPlacement, HandleKind};
use crate::finalize::ImageObject;
use crate::geometry::{OrientedRect, Point, RectTransform};

/// The draggable crop rectangle of a session.
///
/// `parent_bounds` is captured once when the box is created and never
/// changes; `origin_corners` is the box's own outline at the start of the
/// current drag gesture.
#[derive(Debug, Clone, PartialEq)]
pub struct CropBox {
    transform: RectTransform,
    initial_position: Point,
    parent_bounds: OrientedRect,
    origin_corners: Option<OrientedRect>,
}

impl CropBox {
    /// Create a box covering the image's displayed area.
    ///
    /// The box starts at unit scale with the image's displayed size, shifted
    /// by any existing source crop offset along the image's axes.
    pub fn over_image(image: &ImageObject) -> Self {
        let img = &image.transform;
        let (axis_x, axis_y) = img.axes();
        let origin = Point::new(img.left, img.top)
            + axis_x * (image.crop_x * img.scale_x)
            + axis_y * (image.crop_y * img.scale_y);

        let transform = RectTransform {
            left: origin.x,
            top: origin.y,
            width: img.scaled_width(),
            height: img.scaled_height(),
            scale_x: 1.0,
            scale_y: 1.0,
            angle: img.angle,
            padding: 0.0,
        };

        Self {
            transform,
            initial_position: origin,
            parent_bounds: transform.corners(),
            origin_corners: None,
        }
    }

    pub fn transform(&self) -> &RectTransform {
        &self.transform
    }

    pub fn placement(&self) -> BoxPlacement {
        BoxPlacement::from(&self.transform)
    }

    pub fn initial_position(&self) -> Point {
        self.initial_position
    }

    pub fn parent_bounds(&self) -> &OrientedRect {
        &self.parent_bounds
    }

    pub fn in_gesture(&self) -> bool {
        self.origin_corners.is_some()
    }

    fn begin_gesture(&mut self) -> OrientedRect {
        *self
            .origin_corners
            .get_or_insert_with(|| self.transform.corners())
    }

    /// Forget the gesture snapshot; the next move or scale starts a new one.
    pub fn end_gesture(&mut self) {
        self.origin_corners = None;
    }

    /// Resolve a proposed top-left during a body drag and commit it.
    pub fn on_moving(&mut self, proposed: Point) -> BoxPlacement {
        self.begin_gesture();
        let position = resolve_move(
            &self.parent_bounds,
            self.transform.scaled_width(),
            self.transform.scaled_height(),
            proposed,
        );
        self.transform.left = position.x;
        self.transform.top = position.y;
        self.placement()
    }

    /// Resolve a proposed placement during a handle drag and commit it.
    pub fn on_scaling(&mut self, handle: HandleKind, proposed: BoxPlacement) -> BoxPlacement {
        let gesture_start = self.begin_gesture();
        let mut candidate = self.transform;
        proposed.apply_to(&mut candidate);

        let resolved = resolve_scale(handle, &self.parent_bounds, &gesture_start, &candidate);
        resolved.apply_to(&mut self.transform);
        resolved
    }
}
