//! Scale constraint: cap the scale a resize handle may reach.
//!
//! # Algorithm
//!
//! Edge handles intersect the dragged edge's trajectory (the box's current
//! top or left edge line) with the parent edge on the dragged side; the
//! distance from that intersection to the box's opposite edge is the largest
//! legal extent on that axis.
//!
//! Corner handles measure the perpendicular distance from the fixed corner
//! (the one opposite the dragged corner, taken from the gesture-start
//! snapshot) to the two parent edges on the dragged side. When only one axis
//! overflows, the other keeps tracking the drag.
//!
//! Dragging a left or top edge moves the box's top-left anchor, so those
//! cases also return a corrected position.

use super::BoxPlacement;
use crate::error::CropError;
use crate::geometry::{
    distance, intersect, point_to_line_distance, OrientedRect, Point, RectTransform,
};
use std::fmt;
use std::str::FromStr;

/// Handle identifier as reported by the host's scaling event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Control {
    MiddleLeft,
    MiddleRight,
    MiddleTop,
    MiddleBottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl FromStr for Control {
    type Err = CropError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ml" => Ok(Control::MiddleLeft),
            "mr" => Ok(Control::MiddleRight),
            "mt" => Ok(Control::MiddleTop),
            "mb" => Ok(Control::MiddleBottom),
            "tl" => Ok(Control::TopLeft),
            "tr" => Ok(Control::TopRight),
            "bl" => Ok(Control::BottomLeft),
            "br" => Ok(Control::BottomRight),
            other => Err(CropError::UnknownControl(other.to_string())),
        }
    }
}

impl fmt::Display for Control {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let key = match self {
            Control::MiddleLeft => "ml",
            Control::MiddleRight => "mr",
            Control::MiddleTop => "mt",
            Control::MiddleBottom => "mb",
            Control::TopLeft => "tl",
            Control::TopRight => "tr",
            Control::BottomLeft => "bl",
            Control::BottomRight => "br",
        };
        f.write_str(key)
    }
}

/// The box edge or corner actually being dragged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HandleKind {
    Left,
    Right,
    Top,
    Bottom,
    TopLeft,
    TopRight,
    BottomLeft,
    BottomRight,
}

impl HandleKind {
    /// Resolve the dragged side from a control and the drag-direction signs.
    ///
    /// The host may flip a handle mid-drag, so the signs, not the control's
    /// name, decide which side moves. A negative sign is the low side
    /// (left or top).
    pub fn from_control(control: Control, sign_x: f64, sign_y: f64) -> Self {
        let low_x = sign_x < 0.0;
        let low_y = sign_y < 0.0;

        match control {
            Control::MiddleLeft | Control::MiddleRight => {
                if low_x {
                    HandleKind::Left
                } else {
                    HandleKind::Right
                }
            }
            Control::MiddleTop | Control::MiddleBottom => {
                if low_y {
                    HandleKind::Top
                } else {
                    HandleKind::Bottom
                }
            }
            Control::TopLeft | Control::TopRight | Control::BottomLeft | Control::BottomRight => {
                match (low_x, low_y) {
                    (true, true) => HandleKind::TopLeft,
                    (true, false) => HandleKind::BottomLeft,
                    (false, true) => HandleKind::TopRight,
                    (false, false) => HandleKind::BottomRight,
                }
            }
        }
    }
}

/// Which of a corner handle's two maxima a proposal exceeds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Overflow {
    None,
    X,
    Y,
    Both,
}

impl Overflow {
    fn of(placement: &BoxPlacement, max_scale_x: f64, max_scale_y: f64) -> Self {
        match (
            placement.scale_x > max_scale_x,
            placement.scale_y > max_scale_y,
        ) {
            (true, true) => Overflow::Both,
            (true, false) => Overflow::X,
            (false, true) => Overflow::Y,
            (false, false) => Overflow::None,
        }
    }
}

/// Scale that reproduces `extent` for an unscaled size, or `fallback` when
/// the unscaled size is zero.
fn tracked_scale(extent: f64, unscaled: f64, fallback: f64) -> f64 {
    if unscaled > 0.0 {
        extent / unscaled
    } else {
        fallback
    }
}

/// Clamp a proposed scale so the box stays inside `parent`.
///
/// # Arguments
///
/// * `handle` - The dragged edge or corner
/// * `parent` - Fixed parent bounds captured at session start
/// * `gesture_start` - The box's corners when the current drag began
/// * `proposed` - The box with the host's proposed position and scale
///
/// # Returns
///
/// The placement to write back. Scales are only ever reduced; an in-bounds
/// proposal is returned unchanged.
pub fn resolve_scale(
    handle: HandleKind,
    parent: &OrientedRect,
    gesture_start: &OrientedRect,
    proposed: &RectTransform,
) -> BoxPlacement {
    let current = proposed.corners();
    let (width, height) = (proposed.width, proposed.height);
    let mut out = BoxPlacement::from(proposed);

    // Where the box's top-left lands when the left / top edge is pushed onto
    // the parent. `None` leaves that axis unconstrained for this step.
    let left_hit = || intersect(parent.tl, parent.bl, current.tl, current.tr);
    let top_hit = || intersect(parent.tl, parent.tr, current.tl, current.bl);

    match handle {
        HandleKind::Left => {
            if let Some(hit) = left_hit() {
                let max_scale_x = distance(hit, current.tr) / width;
                if out.scale_x > max_scale_x {
                    out.set_position(hit);
                    out.scale_x = max_scale_x;
                }
            }
        }
        HandleKind::Right => {
            if let Some(hit) = intersect(parent.tr, parent.br, current.tl, current.tr) {
                let max_scale_x = distance(hit, current.tl) / width;
                if out.scale_x > max_scale_x {
                    out.scale_x = max_scale_x;
                }
            }
        }
        HandleKind::Top => {
            if let Some(hit) = top_hit() {
                let max_scale_y = distance(hit, current.bl) / height;
                if out.scale_y > max_scale_y {
                    out.set_position(hit);
                    out.scale_y = max_scale_y;
                }
            }
        }
        HandleKind::Bottom => {
            if let Some(hit) = intersect(parent.bl, parent.br, current.tl, current.bl) {
                let max_scale_y = distance(hit, current.tl) / height;
                if out.scale_y > max_scale_y {
                    out.scale_y = max_scale_y;
                }
            }
        }
        HandleKind::TopLeft => {
            let fixed = gesture_start.br;
            let max_scale_x = point_to_line_distance(fixed, parent.tl, parent.bl) / width;
            let max_scale_y = point_to_line_distance(fixed, parent.tl, parent.tr) / height;

            match Overflow::of(&out, max_scale_x, max_scale_y) {
                Overflow::Both => {
                    out.set_position(parent.tl);
                    out.scale_x = max_scale_x;
                    out.scale_y = max_scale_y;
                }
                Overflow::X => {
                    if let Some(hit) = left_hit() {
                        out.set_position(hit);
                        out.scale_x = max_scale_x;
                        out.scale_y = track_y(&current, height, out.scale_y);
                    }
                }
                Overflow::Y => {
                    if let Some(hit) = top_hit() {
                        out.set_position(hit);
                        out.scale_y = max_scale_y;
                        out.scale_x = track_x(&current, width, out.scale_x);
                    }
                }
                Overflow::None => {}
            }
        }
        HandleKind::TopRight => {
            let fixed = gesture_start.bl;
            let max_scale_x = point_to_line_distance(fixed, parent.tr, parent.br) / width;
            let max_scale_y = point_to_line_distance(fixed, parent.tl, parent.tr) / height;

            match Overflow::of(&out, max_scale_x, max_scale_y) {
                Overflow::Both => {
                    if let Some(hit) = top_hit() {
                        out.set_position(hit);
                        out.scale_x = max_scale_x;
                        out.scale_y = max_scale_y;
                    }
                }
                Overflow::X => {
                    out.scale_x = max_scale_x;
                    out.scale_y = track_y(&current, height, out.scale_y);
                }
                Overflow::Y => {
                    if let Some(hit) = top_hit() {
                        out.set_position(hit);
                        out.scale_y = max_scale_y;
                        out.scale_x = track_x(&current, width, out.scale_x);
                    }
                }
                Overflow::None => {}
            }
        }
        HandleKind::BottomLeft => {
            let fixed = gesture_start.tr;
            let max_scale_x = point_to_line_distance(fixed, parent.tl, parent.bl) / width;
            let max_scale_y = point_to_line_distance(fixed, parent.bl, parent.br) / height;

            match Overflow::of(&out, max_scale_x, max_scale_y) {
                Overflow::Both => {
                    if let Some(hit) = left_hit() {
                        out.set_position(hit);
                        out.scale_x = max_scale_x;
                        out.scale_y = max_scale_y;
                    }
                }
                Overflow::X => {
                    if let Some(hit) = left_hit() {
                        out.set_position(hit);
                        out.scale_x = max_scale_x;
                        out.scale_y = track_y(&current, height, out.scale_y);
                    }
                }
                Overflow::Y => {
                    out.scale_y = max_scale_y;
                    out.scale_x = track_x(&current, width, out.scale_x);
                }
                Overflow::None => {}
            }
        }
        HandleKind::BottomRight => {
            let fixed = gesture_start.tl;
            let max_scale_x = point_to_line_distance(fixed, parent.tr, parent.br) / width;
            let max_scale_y = point_to_line_distance(fixed, parent.bl, parent.br) / height;

            match Overflow::of(&out, max_scale_x, max_scale_y) {
                Overflow::Both => {
                    out.scale_x = max_scale_x;
                    out.scale_y = max_scale_y;
                }
                Overflow::X => {
                    out.scale_x = max_scale_x;
                    out.scale_y = track_y(&current, height, out.scale_y);
                }
                Overflow::Y => {
                    out.scale_y = max_scale_y;
                    out.scale_x = track_x(&current, width, out.scale_x);
                }
                Overflow::None => {}
            }
        }
    }

    if out != BoxPlacement::from(proposed) {
        tracing::debug!(
            ?handle,
            scale_x = out.scale_x,
            scale_y = out.scale_y,
            left = out.left,
            top = out.top,
            "clamped box scale"
        );
    }
    out
}

/// Current x scale, read back from the box's bottom edge.
fn track_x(current: &OrientedRect, width: f64, fallback: f64) -> f64 {
    tracked_scale(distance(current.bl, current.br), width, fallback)
}

/// Current y scale, read back from the box's right edge.
fn track_y(current: &OrientedRect, height: f64, fallback: f64) -> f64 {
    tracked_scale(distance(current.tr, current.br), height, fallback)
}

/// Position a box's top-left must have for a given fixed corner.
///
/// Mirrors how an interactive host keeps the opposite corner (or edge) still
/// while a handle is dragged, for callers that only know the target scale.
pub fn anchored_position(
    handle: HandleKind,
    start: &RectTransform,
    scale_x: f64,
    scale_y: f64,
) -> Point {
    let (axis_x, axis_y) = start.axes();
    let shift_x = start.width * (start.scale_x - scale_x);
    let shift_y = start.height * (start.scale_y - scale_y);
    let origin = Point::new(start.left, start.top);

    let moves_left = matches!(
        handle,
        HandleKind::Left | HandleKind::TopLeft | HandleKind::BottomLeft
    );
    let moves_top = matches!(
        handle,
        HandleKind::Top | HandleKind::TopLeft | HandleKind::TopRight
    );

    let mut pos = origin;
    if moves_left {
        pos = pos + axis_x * shift_x;
    }
    if moves_top {
        pos = pos + axis_y * shift_y;
    }
    pos
}


// ============================================================================
// Property-Based Tests
// ============================================================================

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn handle_strategy() -> impl Strategy<Value = HandleKind> {
        prop_oneof![
            Just(HandleKind::Left),
            Just(HandleKind::Right),
            Just(HandleKind::Top),
            Just(HandleKind::Bottom),
            Just(HandleKind::TopLeft),
            Just(HandleKind::TopRight),
            Just(HandleKind::BottomLeft),
            Just(HandleKind::BottomRight),
        ]
    }

    /// Arbitrary angles mixed with exact quarter turns.
    fn angle_strategy() -> impl Strategy<Value = f64> {
        prop_oneof![
            3 => -170.0f64..170.0,
            1 => prop_oneof![Just(90.0), Just(180.0), Just(270.0), Just(-90.0)],
        ]
    }

    /// Strategy for an image rectangle and a box strictly inside it.
    fn scene_strategy() -> impl Strategy<Value = (RectTransform, RectTransform)> {
        (
            (-100.0f64..100.0, -100.0f64..100.0), // image position
            (50.0f64..400.0, 50.0f64..400.0),     // image size
            angle_strategy(),
            (0.0f64..0.5, 0.0f64..0.5),           // box offset fraction
            (0.1f64..0.5, 0.1f64..0.5),           // box size fraction
        )
            .prop_map(|((left, top), (width, height), angle, (ox, oy), (fw, fh))| {
                let image = RectTransform {
                    left,
                    top,
                    width,
                    height,
                    angle,
                    ..Default::default()
                };
                let (axis_x, axis_y) = image.axes();
                let origin = Point::new(left, top) + axis_x * (width * ox) + axis_y * (height * oy);
                let crop = RectTransform {
                    left: origin.x,
                    top: origin.y,
                    width: width * fw,
                    height: height * fh,
                    angle,
                    ..Default::default()
                };
                (image, crop)
            })
    }

    fn proposal(handle: HandleKind, start: &RectTransform, sx: f64, sy: f64) -> RectTransform {
        // Edge handles leave the other axis alone
        let (sx, sy) = match handle {
            HandleKind::Left | HandleKind::Right => (sx, start.scale_y),
            HandleKind::Top | HandleKind::Bottom => (start.scale_x, sy),
            _ => (sx, sy),
        };
        let pos = anchored_position(handle, start, sx, sy);
        RectTransform {
            left: pos.x,
            top: pos.y,
            scale_x: sx,
            scale_y: sy,
            ..*start
        }
    }

    proptest! {
        /// Property: The resolved box never leaves the parent bounds.
        #[test]
        fn prop_scale_keeps_box_inside(
            (image, crop) in scene_strategy(),
            handle in handle_strategy(),
            sx in 0.1f64..8.0,
            sy in 0.1f64..8.0,
        ) {
            let parent = image.corners();
            let proposed = proposal(handle, &crop, sx, sy);
            let out = resolve_scale(handle, &parent, &crop.corners(), &proposed);

            let mut result = proposed;
            out.apply_to(&mut result);
            prop_assert!(
                parent.contains_rect(&result.corners(), 1e-6),
                "{:?} escaped with {:?}",
                handle,
                out
            );
        }

        /// Property: Scales are only ever reduced.
        #[test]
        fn prop_scale_never_grows(
            (image, crop) in scene_strategy(),
            handle in handle_strategy(),
            sx in 0.1f64..8.0,
            sy in 0.1f64..8.0,
        ) {
            let proposed = proposal(handle, &crop, sx, sy);
            let out = resolve_scale(handle, &image.corners(), &crop.corners(), &proposed);

            prop_assert!(out.scale_x <= proposed.scale_x + 1e-9);
            prop_assert!(out.scale_y <= proposed.scale_y + 1e-9);
        }

        /// Property: Resolving a resolved placement again changes nothing.
        #[test]
        fn prop_scale_is_idempotent(
            (image, crop) in scene_strategy(),
            handle in handle_strategy(),
            sx in 0.1f64..8.0,
            sy in 0.1f64..8.0,
        ) {
            let parent = image.corners();
            let proposed = proposal(handle, &crop, sx, sy);
            let once = resolve_scale(handle, &parent, &crop.corners(), &proposed);

            let mut again = proposed;
            once.apply_to(&mut again);
            let twice = resolve_scale(handle, &parent, &crop.corners(), &again);

            prop_assert!((once.scale_x - twice.scale_x).abs() < 1e-6);
            prop_assert!((once.scale_y - twice.scale_y).abs() < 1e-6);
            prop_assert!((once.left - twice.left).abs() < 1e-6);
            prop_assert!((once.top - twice.top).abs() < 1e-6);
        }
    }
}
