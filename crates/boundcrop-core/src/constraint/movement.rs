//! Move constraint: confine a dragged box's top-left corner.
//!
//! # Algorithm
//!
//! Rather than testing all four corners of the moved box, the parent's right
//! and bottom edges are pulled inward by the box's scaled width and height.
//! The resulting [`MoveRegion`] is the set of legal top-left positions, so
//! only the candidate top-left point has to be tested against it:
//!
//! ```text
//!            |         |
//!   Low,High | In,High | High,High
//!  ----------+---------+----------
//!   Low,In   |  In,In  | High,In
//!  ----------+---------+----------
//!   Low,Low  | In,Low  | High,Low
//!            |         |
//! ```
//!
//! The first component is the width-axis side, the second the height-axis
//! side. One axis out projects onto the matching region edge; both axes out
//! snap to the matching region corner.

use crate::geometry::{
    intersect, point_at_distance_from_b, project_onto_segment, same_side_of_two_lines,
    OrientedRect, Point, Side,
};

/// Oriented rectangle of legal top-left positions for a box of a given size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveRegion {
    pub tl: Point,
    pub tr: Point,
    pub bl: Point,
    pub br: Point,
}

impl MoveRegion {
    /// Compute the region for a box of `scaled_width × scaled_height`.
    ///
    /// Returns `None` if the parent is degenerate and the region's far corner
    /// cannot be found.
    pub fn new(parent: &OrientedRect, scaled_width: f64, scaled_height: f64) -> Option<Self> {
        // Box's bottom-left when the box sits in the parent's bottom-right corner
        let max_bl = point_at_distance_from_b(parent.bl, parent.br, scaled_width);
        // Box's top-right in the same position
        let max_tr = point_at_distance_from_b(parent.tr, parent.br, scaled_height);

        let tl = parent.tl;
        let tr = project_onto_segment(parent.tl, parent.tr, max_bl);
        let bl = project_onto_segment(parent.tl, parent.bl, max_tr);
        let br = intersect(bl, max_tr, tr, max_bl)?;

        Some(Self { tl, tr, bl, br })
    }

    /// Classify a point along the width axis, then the height axis.
    pub fn classify(&self, point: Point) -> (Side, Side) {
        let width_side = same_side_of_two_lines(self.tl, self.bl, self.tr, self.br, point);
        let height_side = same_side_of_two_lines(self.tl, self.tr, self.bl, self.br, point);
        (width_side, height_side)
    }

    /// Pull `point` into the region.
    pub fn clamp(&self, point: Point) -> Point {
        match self.classify(point) {
            (Side::Inside, Side::Inside) => point,
            // Both axes out: nearest region corner
            (Side::Low, Side::High) => self.tl,
            (Side::High, Side::High) => self.tr,
            (Side::High, Side::Low) => self.br,
            (Side::Low, Side::Low) => self.bl,
            // One axis out: project onto the crossed edge
            (Side::Inside, Side::High) => project_onto_segment(self.tl, self.tr, point),
            (Side::High, Side::Inside) => project_onto_segment(self.tr, self.br, point),
            (Side::Inside, Side::Low) => project_onto_segment(self.bl, self.br, point),
            (Side::Low, Side::Inside) => project_onto_segment(self.tl, self.bl, point),
        }
    }
}

/// Clamp a proposed top-left position so the whole box stays inside `parent`.
///
/// # Arguments
///
/// * `parent` - Fixed parent bounds captured at session start
/// * `scaled_width` - Box width times its x scale
/// * `scaled_height` - Box height times its y scale
/// * `candidate` - Proposed top-left position
///
/// # Returns
///
/// The candidate itself when it is legal, otherwise the closest legal
/// position on the region boundary.
pub fn resolve_move(
    parent: &OrientedRect,
    scaled_width: f64,
    scaled_height: f64,
    candidate: Point,
) -> Point {
    let Some(region) = MoveRegion::new(parent, scaled_width, scaled_height) else {
        tracing::debug!("degenerate parent bounds, move left unconstrained");
        return candidate;
    };

    let clamped = region.clamp(candidate);
    if clamped != candidate {
        tracing::debug!(
            from_x = candidate.x,
            from_y = candidate.y,
            to_x = clamped.x,
            to_y = clamped.y,
            "clamped box move"
        );
    }
    clamped
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::RectTransform;

    fn square_parent() -> OrientedRect {
        RectTransform::new(0.0, 0.0, 100.0, 100.0).corners()
    }

    #[test]
    fn test_region_for_unrotated_parent() {
        let region = MoveRegion::new(&square_parent(), 50.0, 50.0).unwrap();

        assert_eq!(region.tl, Point::new(0.0, 0.0));
        assert_eq!(region.tr, Point::new(50.0, 0.0));
        assert_eq!(region.bl, Point::new(0.0, 50.0));
        assert_eq!(region.br, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_drag_past_bottom_right_snaps_to_corner() {
        let result = resolve_move(&square_parent(), 50.0, 50.0, Point::new(60.0, 60.0));
        assert_eq!(result, Point::new(50.0, 50.0));
    }

    #[test]
    fn test_inside_candidate_unchanged() {
        let candidate = Point::new(12.5, 33.0);
        let result = resolve_move(&square_parent(), 50.0, 50.0, candidate);
        assert_eq!(result, candidate);
    }

    #[test]
    fn test_each_grid_cell() {
        let parent = square_parent();
        let cases = [
            (Point::new(-10.0, -10.0), Point::new(0.0, 0.0)),
            (Point::new(20.0, -10.0), Point::new(20.0, 0.0)),
            (Point::new(70.0, -10.0), Point::new(50.0, 0.0)),
            (Point::new(70.0, 20.0), Point::new(50.0, 20.0)),
            (Point::new(70.0, 70.0), Point::new(50.0, 50.0)),
            (Point::new(20.0, 70.0), Point::new(20.0, 50.0)),
            (Point::new(-10.0, 70.0), Point::new(0.0, 50.0)),
            (Point::new(-10.0, 20.0), Point::new(0.0, 20.0)),
        ];

        for (candidate, expected) in cases {
            assert_eq!(
                resolve_move(&parent, 50.0, 50.0, candidate),
                expected,
                "candidate {:?}",
                candidate
            );
        }
    }

    #[test]
    fn test_non_square_box() {
        let result = resolve_move(&square_parent(), 80.0, 10.0, Point::new(30.0, 95.0));
        assert_eq!(result, Point::new(20.0, 90.0));
    }

    #[test]
    fn test_zero_size_box_uses_full_parent() {
        let region = MoveRegion::new(&square_parent(), 0.0, 0.0).unwrap();
        assert_eq!(region.br, Point::new(100.0, 100.0));

        let result = resolve_move(&square_parent(), 0.0, 0.0, Point::new(150.0, 40.0));
        assert_eq!(result, Point::new(100.0, 40.0));
    }

    #[test]
    fn test_rotated_parent_keeps_box_inside() {
        let mut parent = RectTransform::new(200.0, 50.0, 300.0, 200.0);
        parent.angle = 30.0;

        let mut crop = parent;
        crop.width = 120.0;
        crop.height = 80.0;
        // Drag far out past the parent's right side
        crop.left += 400.0;
        crop.top += 100.0;

        let pos = resolve_move(
            &parent.corners(),
            crop.scaled_width(),
            crop.scaled_height(),
            Point::new(crop.left, crop.top),
        );
        crop.left = pos.x;
        crop.top = pos.y;

        assert!(parent.corners().contains_rect(&crop.corners(), 1e-6));
    }

    #[test]
    fn test_quarter_turn_parent_keeps_box_inside() {
        for angle in [90.0, 180.0, 270.0, -90.0] {
            let mut image = RectTransform::new(400.0, 100.0, 300.0, 200.0);
            image.angle = angle;
            let parent = image.corners();
            let (axis_x, axis_y) = image.axes();

            // Offsets along the image axes covering all eight outer cells
            for (du, dv) in [
                (-80.0, -60.0),
                (100.0, -60.0),
                (400.0, -60.0),
                (400.0, 50.0),
                (400.0, 300.0),
                (100.0, 300.0),
                (-80.0, 300.0),
                (-80.0, 50.0),
            ] {
                let candidate = parent.tl + axis_x * du + axis_y * dv;
                let pos = resolve_move(&parent, 100.0, 80.0, candidate);

                let crop = RectTransform {
                    left: pos.x,
                    top: pos.y,
                    width: 100.0,
                    height: 80.0,
                    ..image
                };
                assert!(
                    parent.contains_rect(&crop.corners(), 1e-6),
                    "angle {} offset ({}, {}) escaped: {:?}",
                    angle,
                    du,
                    dv,
                    crop.corners()
                );
            }

            // Past the far corner lands exactly on the region corner
            let far = parent.tl + axis_x * 900.0 + axis_y * 900.0;
            let expected = parent.tl + axis_x * 200.0 + axis_y * 120.0;
            let pos = resolve_move(&parent, 100.0, 80.0, far);
            assert!(
                (pos.x - expected.x).abs() < 1e-9 && (pos.y - expected.y).abs() < 1e-9,
                "angle {}: expected {:?}, got {:?}",
                angle,
                expected,
                pos
            );
        }
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================
