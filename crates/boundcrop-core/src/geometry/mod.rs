//! Planar geometry for oriented rectangles.
//!
//! This module provides the value types shared by the constraint resolvers
//! and the crop finalizer, plus a small kernel of pure functions on points.
//!
//! # Coordinate System
//!
//! - All points live in the host surface's space (y grows downward)
//! - Angles are in degrees, positive = clockwise on screen
//! - A rectangle's `left`/`top` is the position of its top-left corner; the
//!   rectangle extends along its rotated local axes from there

mod kernel;
mod rect;

pub use kernel::{
    distance, intersect, point_at_distance_from_b, point_to_line_distance, project_onto_segment,
    same_side_of_two_lines, Side,
};
pub use rect::{OrientedRect, Point, RectTransform};
