//! WASM bindings for the geometry kernel, the constraint resolvers and the
//! crop plan.
//!
//! Rectangles and placements cross the boundary as plain objects through
//! serde_wasm_bindgen, using the core types' snake_case field names.
//!
//! # Example (TypeScript)
//!
//! ```typescript
//! const parent = { tl: {x: 0, y: 0}, tr: {x: 100, y: 0}, bl: {x: 0, y: 100}, br: {x: 100, y: 100} };
//! const pos = resolve_move(parent, 50, 50, 60, 60); // {x: 50, y: 50}
//! ```

use crate::types::js_error;
use boundcrop_core::constraint::{self, Control, HandleKind};
use boundcrop_core::finalize::{self, ImageObject};
use boundcrop_core::geometry::{self as core_geometry, OrientedRect, Point, RectTransform};
use wasm_bindgen::prelude::*;

/// Intersection of line AB with line CD, as `[x, y]`, or undefined when the
/// lines are parallel.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn intersect(
    ax: f64,
    ay: f64,
    bx: f64,
    by: f64,
    cx: f64,
    cy: f64,
    dx: f64,
    dy: f64,
) -> Option<Vec<f64>> {
    core_geometry::intersect(
        Point::new(ax, ay),
        Point::new(bx, by),
        Point::new(cx, cy),
        Point::new(dx, dy),
    )
    .map(|p| vec![p.x, p.y])
}

/// Perpendicular distance from P to the infinite line through A and B.
#[wasm_bindgen]
pub fn point_to_line_distance(px: f64, py: f64, ax: f64, ay: f64, bx: f64, by: f64) -> f64 {
    core_geometry::point_to_line_distance(
        Point::new(px, py),
        Point::new(ax, ay),
        Point::new(bx, by),
    )
}

/// Corners of a rectangle given as a `RectTransform`-shaped object.
#[wasm_bindgen]
pub fn rect_corners(rect: JsValue) -> Result<JsValue, JsValue> {
    let rect: RectTransform = serde_wasm_bindgen::from_value(rect).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&rect.corners()).map_err(js_error)
}

/// Clamp a proposed top-left position so the box stays inside `parent`.
///
/// # Arguments
///
/// * `parent` - Parent corners `{tl, tr, bl, br}`
/// * `scaled_width` / `scaled_height` - The box's displayed size
/// * `left` / `top` - Proposed top-left position
///
/// # Returns
///
/// The legal position as `{x, y}`.
#[wasm_bindgen]
pub fn resolve_move(
    parent: JsValue,
    scaled_width: f64,
    scaled_height: f64,
    left: f64,
    top: f64,
) -> Result<JsValue, JsValue> {
    let parent: OrientedRect = serde_wasm_bindgen::from_value(parent).map_err(js_error)?;
    let position = constraint::resolve_move(
        &parent,
        scaled_width,
        scaled_height,
        Point::new(left, top),
    );
    serde_wasm_bindgen::to_value(&position).map_err(js_error)
}

/// Clamp a proposed scale so the box stays inside `parent`.
///
/// # Arguments
///
/// * `control` - Handle id (`ml`, `mr`, `mt`, `mb`, `tl`, `tr`, `bl`, `br`)
/// * `sign_x` / `sign_y` - Drag direction signs reported by the host
/// * `parent` - Parent corners `{tl, tr, bl, br}`
/// * `gesture_start` - The box's corners when the drag began
/// * `proposed` - The box as a `RectTransform`-shaped object
///
/// # Returns
///
/// The placement `{left, top, scale_x, scale_y}` to write back.
#[wasm_bindgen]
pub fn resolve_scale(
    control: &str,
    sign_x: f64,
    sign_y: f64,
    parent: JsValue,
    gesture_start: JsValue,
    proposed: JsValue,
) -> Result<JsValue, JsValue> {
    let control: Control = control.parse().map_err(js_error)?;
    let parent: OrientedRect = serde_wasm_bindgen::from_value(parent).map_err(js_error)?;
    let gesture_start: OrientedRect =
        serde_wasm_bindgen::from_value(gesture_start).map_err(js_error)?;
    let proposed: RectTransform = serde_wasm_bindgen::from_value(proposed).map_err(js_error)?;

    let handle = HandleKind::from_control(control, sign_x, sign_y);
    let placement = constraint::resolve_scale(handle, &parent, &gesture_start, &proposed);
    serde_wasm_bindgen::to_value(&placement).map_err(js_error)
}

/// Top-left position that keeps the opposite edge or corner of `start`
/// fixed while the handle drags the box to a new scale.
///
/// Returns `{x, y}`.
#[wasm_bindgen]
pub fn anchored_position(
    control: &str,
    sign_x: f64,
    sign_y: f64,
    start: JsValue,
    scale_x: f64,
    scale_y: f64,
) -> Result<JsValue, JsValue> {
    let control: Control = control.parse().map_err(js_error)?;
    let start: RectTransform = serde_wasm_bindgen::from_value(start).map_err(js_error)?;

    let handle = HandleKind::from_control(control, sign_x, sign_y);
    let position = constraint::anchored_position(handle, &start, scale_x, scale_y);
    serde_wasm_bindgen::to_value(&position).map_err(js_error)
}

/// Compute the crop plan for a crop box over an image.
///
/// `image` is an `ImageObject`-shaped object: `{transform, crop_x, crop_y,
/// id, name, drawing_type}`; every field is optional.
#[wasm_bindgen]
pub fn plan_crop(crop_box: JsValue, image: JsValue) -> Result<JsValue, JsValue> {
    let crop_box: RectTransform = serde_wasm_bindgen::from_value(crop_box).map_err(js_error)?;
    let image: ImageObject = serde_wasm_bindgen::from_value(image).map_err(js_error)?;
    serde_wasm_bindgen::to_value(&finalize::plan_crop(&crop_box, &image)).map_err(js_error)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersect_perpendicular() {
        let hit = intersect(100.0, 0.0, 100.0, 100.0, 0.0, 0.0, 150.0, 0.0).unwrap();
        assert_eq!(hit, vec![100.0, 0.0]);
    }

    #[test]
    fn test_intersect_parallel_verticals() {
        assert!(intersect(0.0, 0.0, 0.0, 1.0, 5.0, 0.0, 5.0, 1.0).is_none());
    }

    #[test]
    fn test_point_to_line_distance() {
        assert_eq!(
            point_to_line_distance(0.0, 5.0, 0.0, 0.0, 10.0, 0.0),
            5.0
        );
    }
}
