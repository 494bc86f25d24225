//! Points, oriented rectangles and host-style rectangle transforms.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Sub};

/// A point (or vector) in the shared surface coordinate space.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Dot product, treating both points as vectors.
    #[inline]
    pub fn dot(self, other: Point) -> f64 {
        self.x * other.x + self.y * other.y
    }

    /// Z component of the 2D cross product `self × other`.
    #[inline]
    pub fn cross(self, other: Point) -> f64 {
        self.x * other.y - self.y * other.x
    }

    /// Euclidean length of the vector.
    #[inline]
    pub fn length(self) -> f64 {
        self.dot(self).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// A rectangle given by its four corners after rotation and scale.
///
/// Corner naming follows the rectangle's own local frame, not the screen:
/// `tl` is always the corner at the rectangle's `left`/`top` origin.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrientedRect {
    pub tl: Point,
    pub tr: Point,
    pub bl: Point,
    pub br: Point,
}

impl OrientedRect {
    /// Check whether `point` lies inside the rectangle or on its boundary,
    /// allowing `tolerance` units of slack on every side.
    pub fn contains(&self, point: Point, tolerance: f64) -> bool {
        let axis_x = self.tr - self.tl;
        let axis_y = self.bl - self.tl;
        let len_x = axis_x.length();
        let len_y = axis_y.length();
        let offset = point - self.tl;

        let along_x = if len_x > 0.0 {
            offset.dot(axis_x) / len_x
        } else {
            offset.length()
        };
        let along_y = if len_y > 0.0 {
            offset.dot(axis_y) / len_y
        } else {
            offset.length()
        };

        along_x >= -tolerance
            && along_x <= len_x + tolerance
            && along_y >= -tolerance
            && along_y <= len_y + tolerance
    }

    /// Check whether all four corners of `other` lie inside this rectangle.
    pub fn contains_rect(&self, other: &OrientedRect, tolerance: f64) -> bool {
        other
            .points()
            .iter()
            .all(|corner| self.contains(*corner, tolerance))
    }

    /// The corners in `tl, tr, br, bl` order.
    pub fn points(&self) -> [Point; 4] {
        [self.tl, self.tr, self.br, self.bl]
    }
}

/// Host-style rectangle placement: position, unscaled size, non-uniform
/// scale, rotation and padding.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RectTransform {
    /// X position of the top-left corner.
    pub left: f64,
    /// Y position of the top-left corner.
    pub top: f64,
    /// Unscaled width.
    pub width: f64,
    /// Unscaled height.
    pub height: f64,
    pub scale_x: f64,
    pub scale_y: f64,
    /// Rotation around the top-left corner, in degrees.
    pub angle: f64,
    /// Extra space pushed outward on every side of the corner points.
    pub padding: f64,
}

impl Default for RectTransform {
    fn default() -> Self {
        Self {
            left: 0.0,
            top: 0.0,
            width: 0.0,
            height: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
            angle: 0.0,
            padding: 0.0,
        }
    }
}

impl RectTransform {
    /// Create an unrotated, unscaled rectangle.
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
            ..Default::default()
        }
    }

    pub fn scaled_width(&self) -> f64 {
        self.width * self.scale_x
    }

    pub fn scaled_height(&self) -> f64 {
        self.height * self.scale_y
    }

    /// Unit vectors of the rectangle's local x and y axes.
    ///
    /// Multiples of 90 degrees snap to exact 0/±1 components so that the
    /// edges of a right-angle rotation are exactly vertical or horizontal.
    pub fn axes(&self) -> (Point, Point) {
        let (sin, cos) = snapped_sin_cos(self.angle);
        (Point::new(cos, sin), Point::new(-sin, cos))
    }

    /// Compute the four corner points in surface space.
    pub fn corners(&self) -> OrientedRect {
        let (axis_x, axis_y) = self.axes();
        let origin = Point::new(self.left, self.top);
        let pad = self.padding;
        let w = self.scaled_width() + pad;
        let h = self.scaled_height() + pad;

        OrientedRect {
            tl: origin - axis_x * pad - axis_y * pad,
            tr: origin + axis_x * w - axis_y * pad,
            bl: origin - axis_x * pad + axis_y * h,
            br: origin + axis_x * w + axis_y * h,
        }
    }
}

/// Sine and cosine of an angle in degrees, exact at quarter turns.
fn snapped_sin_cos(degrees: f64) -> (f64, f64) {
    if degrees % 90.0 == 0.0 {
        match (degrees / 90.0).rem_euclid(4.0) as u8 {
            0 => (0.0, 1.0),
            1 => (1.0, 0.0),
            2 => (0.0, -1.0),
            _ => (-1.0, 0.0),
        }
    } else {
        degrees.to_radians().sin_cos()
    }
}
