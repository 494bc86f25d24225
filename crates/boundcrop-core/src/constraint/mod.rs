//! Constraint resolvers that keep a crop box inside its parent bounds.
//!
//! Both resolvers work on proposals: the host applies the user's drag to the
//! box, hands the proposed geometry to a resolver, and writes back whatever
//! [`BoxPlacement`] comes out. A proposal that already fits passes through
//! unchanged.
//!
//! - [`resolve_move`] clamps the top-left position during a body drag
//! - [`resolve_scale`] clamps scale (and the anchor position, when the
//!   dragged edge is the left or top one) during a handle drag

mod movement;
mod scale;

pub use movement::{resolve_move, MoveRegion};
pub use scale::{anchored_position, resolve_scale, Control, HandleKind};

use crate::geometry::{Point, RectTransform};
use serde::{Deserialize, Serialize};

/// The mutable part of a crop box's geometry.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoxPlacement {
    pub left: f64,
    pub top: f64,
    pub scale_x: f64,
    pub scale_y: f64,
}

impl BoxPlacement {
    /// Top-left position as a point.
    pub fn position(&self) -> Point {
        Point::new(self.left, self.top)
    }

    pub fn set_position(&mut self, point: Point) {
        self.left = point.x;
        self.top = point.y;
    }

    /// Apply this placement to a rectangle, keeping its size and rotation.
    pub fn apply_to(&self, rect: &mut RectTransform) {
        rect.left = self.left;
        rect.top = self.top;
        rect.scale_x = self.scale_x;
        rect.scale_y = self.scale_y;
    }
}

impl From<&RectTransform> for BoxPlacement {
    fn from(rect: &RectTransform) -> Self {
        Self {
            left: rect.left,
            top: rect.top,
            scale_x: rect.scale_x,
            scale_y: rect.scale_y,
        }
    }
}
