//! Session configuration.
//!
//! Every field is optional in serialized form. Nested style objects merge
//! field by field over their defaults, so `{ "ok_button": { "cursor": "grab" } }`
//! only changes the cursor of the apply button.

use crate::geometry::Point;
use crate::raster::{ExportFormat, FilterType};
use serde::{Deserialize, Deserializer, Serialize};

/// Style of the draggable crop rectangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropRectStyle {
    pub fill: String,
    pub corner_color: String,
    pub corner_stroke_color: String,
    pub border_dash: Vec<f64>,
    /// Canvas composite operation used to draw the rectangle.
    pub composite: String,
    pub stroke_width: f64,
    pub padding: f64,
    pub lock_rotation: bool,
    /// Whether the rotation handle is shown.
    pub rotation_control: bool,
}

impl Default for CropRectStyle {
    fn default() -> Self {
        Self {
            fill: "rgba(255, 255, 255, 1)".to_string(),
            corner_color: "rgba(23,101,240,0.5)".to_string(),
            corner_stroke_color: "rgba(23,101,240,0.5)".to_string(),
            border_dash: vec![5.0, 2.0],
            composite: "overlay".to_string(),
            stroke_width: 0.0,
            padding: 0.0,
            lock_rotation: true,
            rotation_control: false,
        }
    }
}

/// Style of the dimming rectangle laid over the image during a session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OverlayStyle {
    pub fill: String,
    pub selectable: bool,
    pub lock_rotation: bool,
}

impl Default for OverlayStyle {
    fn default() -> Self {
        Self {
            fill: "rgba(0, 0, 0, 0.5)".to_string(),
            selectable: false,
            lock_rotation: true,
        }
    }
}

/// Action bound to a button control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ButtonAction {
    Apply,
    Cancel,
}

/// Icon drawn on a button control.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IconSource {
    /// The host's built-in icon for the button's action.
    Builtin,
    /// An image URL (or data URL) supplied by the caller.
    Url(String),
}

/// A button control attached to the crop box.
///
/// Rendering belongs to the host; this only describes where the button sits
/// and how it looks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ButtonSpec {
    pub icon: IconSource,
    pub icon_size: f64,
    /// Anchor relative to the box, in box-size units from its center.
    pub anchor: Point,
    /// Pixel offset from the anchor.
    pub offset: Point,
    pub cursor: String,
    pub corner_size: f64,
}

impl ButtonSpec {
    /// Default apply button.
    pub fn apply() -> Self {
        Self {
            icon: IconSource::Builtin,
            icon_size: 24.0,
            anchor: Point::new(0.5, -0.5),
            offset: Point::new(-50.0, -16.0),
            cursor: "pointer".to_string(),
            corner_size: 24.0,
        }
    }

    /// Default cancel button.
    pub fn cancel() -> Self {
        Self {
            offset: Point::new(-20.0, -16.0),
            ..Self::apply()
        }
    }
}

/// Partial button override as it appears in serialized configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct ButtonPatch {
    icon: Option<IconSource>,
    icon_size: Option<f64>,
    anchor: Option<Point>,
    offset: Option<Point>,
    cursor: Option<String>,
    corner_size: Option<f64>,
}

impl ButtonPatch {
    fn merge(self, base: ButtonSpec) -> ButtonSpec {
        ButtonSpec {
            icon: self.icon.unwrap_or(base.icon),
            icon_size: self.icon_size.unwrap_or(base.icon_size),
            anchor: self.anchor.unwrap_or(base.anchor),
            offset: self.offset.unwrap_or(base.offset),
            cursor: self.cursor.unwrap_or(base.cursor),
            corner_size: self.corner_size.unwrap_or(base.corner_size),
        }
    }
}

fn apply_button<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ButtonSpec, D::Error> {
    Ok(ButtonPatch::deserialize(deserializer)?.merge(ButtonSpec::apply()))
}

fn cancel_button<'de, D: Deserializer<'de>>(deserializer: D) -> Result<ButtonSpec, D::Error> {
    Ok(ButtonPatch::deserialize(deserializer)?.merge(ButtonSpec::cancel()))
}

/// Options for a crop session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CropConfig {
    pub crop_rect: CropRectStyle,
    pub overlay_rect: OverlayStyle,
    #[serde(deserialize_with = "apply_button")]
    pub ok_button: ButtonSpec,
    #[serde(deserialize_with = "cancel_button")]
    pub cancel_button: ButtonSpec,
    /// Resampling filter used when extracting the crop.
    pub filter: FilterType,
    /// Format handed to encoding image loaders.
    pub format: ExportFormat,
}

impl Default for CropConfig {
    fn default() -> Self {
        Self {
            crop_rect: CropRectStyle::default(),
            overlay_rect: OverlayStyle::default(),
            ok_button: ButtonSpec::apply(),
            cancel_button: ButtonSpec::cancel(),
            filter: FilterType::default(),
            format: ExportFormat::Png,
        }
    }
}

impl CropConfig {
    /// Button settings for an action.
    pub fn button(&self, action: ButtonAction) -> &ButtonSpec {
        match action {
            ButtonAction::Apply => &self.ok_button,
            ButtonAction::Cancel => &self.cancel_button,
        }
    }
}
