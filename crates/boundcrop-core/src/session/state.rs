//! The crop session state machine.
//!
//! ```text
//! start ──► Active ──apply──► Applying ──loaded──► Applied
//!             │
//!             └──cancel / deselect──► Cancelled
//! ```
//!
//! Move and scale events are only accepted while Active. A failed apply
//! leaves the session in Applying; the host starts a fresh session.

use super::config::{ButtonAction, CropConfig};
use super::crop_box::CropBox;
use super::host::{Canvas, ImageLoader};
use crate::constraint::{BoxPlacement, Control, HandleKind};
use crate::error::CropError;
use crate::finalize::{plan_crop, CropPlan, ImageObject};
use crate::geometry::Point;
use crate::raster::RasterImage;
use std::fmt;

/// Lifecycle state of a crop session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Active,
    Applying,
    Applied,
    Cancelled,
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SessionState::Active => "active",
            SessionState::Applying => "applying",
            SessionState::Applied => "applied",
            SessionState::Cancelled => "cancelled",
        };
        f.write_str(name)
    }
}

/// An interaction reported by the host while the crop box is dragged.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CropEvent {
    /// The box body was dragged; `left`/`top` is the proposed position.
    Moving { left: f64, top: f64 },
    /// A handle was dragged; the fields are the host's proposed geometry.
    Scaling {
        control: Control,
        sign_x: f64,
        sign_y: f64,
        left: f64,
        top: f64,
        scale_x: f64,
        scale_y: f64,
    },
    /// The pointer was released.
    GestureEnd,
}

/// An interactive crop of one canvas image.
#[derive(Debug)]
pub struct CropSession<Id> {
    state: SessionState,
    image: ImageObject,
    image_id: Id,
    crop_id: Id,
    overlay_id: Id,
    crop_box: CropBox,
    config: CropConfig,
}

impl<Id: Copy + Eq + fmt::Debug> CropSession<Id> {
    /// Start cropping `image`, which lives on `canvas` as `image_id`.
    ///
    /// Adds the overlay and the crop box (with its apply and cancel
    /// buttons), selects the crop box and requests a render.
    pub fn start<C>(canvas: &mut C, image_id: Id, image: ImageObject, config: CropConfig) -> Self
    where
        C: Canvas<Id = Id>,
    {
        let crop_box = CropBox::over_image(&image);

        let overlay_id = canvas.add_overlay(crop_box.transform(), &config.overlay_rect);
        let crop_id = canvas.add_crop_rect(crop_box.transform(), &config.crop_rect);
        for action in [ButtonAction::Apply, ButtonAction::Cancel] {
            canvas.add_button(crop_id, action, config.button(action));
        }
        canvas.set_active(Some(crop_id));
        canvas.request_render();

        tracing::info!(
            image = ?image_id,
            left = crop_box.transform().left,
            top = crop_box.transform().top,
            width = crop_box.transform().width,
            height = crop_box.transform().height,
            "crop session started"
        );

        Self {
            state: SessionState::Active,
            image,
            image_id,
            crop_id,
            overlay_id,
            crop_box,
            config,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn crop_box(&self) -> &CropBox {
        &self.crop_box
    }

    pub fn crop_id(&self) -> Id {
        self.crop_id
    }

    pub fn config(&self) -> &CropConfig {
        &self.config
    }

    fn ensure_active(&self, action: &'static str) -> Result<(), CropError> {
        if self.state == SessionState::Active {
            Ok(())
        } else {
            tracing::warn!(state = %self.state, action, "rejected crop action");
            Err(CropError::InvalidState {
                action,
                state: self.state,
            })
        }
    }

    /// Resolve an interaction event and return the placement the host must
    /// write back to the crop box.
    pub fn handle_event(&mut self, event: CropEvent) -> Result<BoxPlacement, CropError> {
        self.ensure_active("handle events")?;

        let placement = match event {
            CropEvent::Moving { left, top } => self.crop_box.on_moving(Point::new(left, top)),
            CropEvent::Scaling {
                control,
                sign_x,
                sign_y,
                left,
                top,
                scale_x,
                scale_y,
            } => {
                let handle = HandleKind::from_control(control, sign_x, sign_y);
                self.crop_box.on_scaling(
                    handle,
                    BoxPlacement {
                        left,
                        top,
                        scale_x,
                        scale_y,
                    },
                )
            }
            CropEvent::GestureEnd => {
                self.crop_box.end_gesture();
                self.crop_box.placement()
            }
        };
        Ok(placement)
    }

    /// Crop plan for the box's current geometry.
    pub fn plan(&self) -> CropPlan {
        plan_crop(self.crop_box.transform(), &self.image)
    }

    fn teardown<C: Canvas<Id = Id>>(&self, canvas: &mut C) {
        for action in [ButtonAction::Apply, ButtonAction::Cancel] {
            canvas.remove_button(self.crop_id, action);
        }
        canvas.remove(self.crop_id);
        canvas.remove(self.overlay_id);
    }

    /// Abandon the crop: remove the box and overlay and reselect the image.
    ///
    /// Allowed at any point while Active, including mid-gesture.
    pub fn cancel<C: Canvas<Id = Id>>(&mut self, canvas: &mut C) -> Result<(), CropError> {
        self.ensure_active("cancel")?;

        self.teardown(canvas);
        canvas.set_active(Some(self.image_id));
        canvas.request_render();
        self.state = SessionState::Cancelled;

        tracing::info!(image = ?self.image_id, "crop session cancelled");
        Ok(())
    }

    /// The crop box lost selection; equivalent to [`CropSession::cancel`].
    pub fn deselect<C: Canvas<Id = Id>>(&mut self, canvas: &mut C) -> Result<(), CropError> {
        self.cancel(canvas)
    }

    /// Replace the image with its cropped version.
    ///
    /// # Arguments
    ///
    /// * `canvas` - The canvas holding the image
    /// * `source` - Unrotated source raster of the image
    /// * `loader` - Turns the extracted raster into a canvas image
    ///
    /// # Errors
    ///
    /// Extraction and loader failures are returned as-is and leave the
    /// session in [`SessionState::Applying`].
    pub async fn apply<C, L>(
        &mut self,
        canvas: &mut C,
        source: &RasterImage,
        loader: &L,
    ) -> Result<(), CropError>
    where
        C: Canvas<Id = Id>,
        L: ImageLoader<Asset = C::Image>,
    {
        self.ensure_active("apply")?;

        let plan = self.plan();
        self.state = SessionState::Applying;
        tracing::info!(
            image = ?self.image_id,
            left = plan.region.left,
            top = plan.region.top,
            width = plan.region.width,
            height = plan.region.height,
            multiplier = plan.multiplier,
            "applying crop"
        );

        self.teardown(canvas);
        canvas.set_active(None);

        let raster = plan
            .extract(source, &self.image.transform, self.config.filter)
            .inspect_err(|e| tracing::warn!(error = %e, "crop extraction failed"))?;
        canvas.remove(self.image_id);

        let asset = loader
            .load(raster, plan.placement)
            .await
            .inspect_err(|e| tracing::warn!(error = %e, "crop image loading failed"))?;

        canvas.add_image(asset);
        canvas.request_render();
        self.state = SessionState::Applied;

        tracing::info!(image = ?self.image_id, "crop applied");
        Ok(())
    }
}
