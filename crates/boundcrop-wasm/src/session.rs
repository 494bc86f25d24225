//! Crop session WASM bindings.
//!
//! A JavaScript canvas adapter is driven through duck-typed method calls:
//!
//! ```typescript
//! interface CropCanvas {
//!   addCropRect(rect: RectTransform, style: CropRectStyle): number;
//!   addOverlay(rect: RectTransform, style: OverlayStyle): number;
//!   addButton(owner: number, action: 'apply' | 'cancel', spec: ButtonSpec): void;
//!   removeButton(owner: number, action: 'apply' | 'cancel'): void;
//!   remove(id: number): void;
//!   setActive(id: number | null): void;
//!   addImage(asset: CroppedAsset): void;
//!   requestRender(): void;
//! }
//!
//! const session = new JsCropSession(canvas, imageId, image, source, config);
//! canvas.on('object:moving', e => apply(session.handle_event({ kind: 'moving', left, top })));
//! ```

use crate::types::{js_error, JsRaster};
use boundcrop_core::error::CropError;
use boundcrop_core::finalize::{ImageObject, PlacementOptions};
use boundcrop_core::geometry::RectTransform;
use boundcrop_core::raster::{ExportFormat, RasterImage};
use boundcrop_core::session::{
    ButtonAction, ButtonSpec, Canvas, CropConfig, CropEvent, CropRectStyle, CropSession,
    EncodedImage, EncodedLoader, ImageLoader, LoadedImage, OverlayStyle, RasterLoader,
};
use js_sys::{Array, Function, Object, Reflect, Uint8Array};
use serde::{Deserialize, Serialize};
use std::future::Future;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::console;

/// Interaction event as sent from JavaScript, tagged by `kind`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub(crate) enum JsCropEvent {
    Moving {
        left: f64,
        top: f64,
    },
    Scaling {
        control: String,
        sign_x: f64,
        sign_y: f64,
        left: f64,
        top: f64,
        scale_x: f64,
        scale_y: f64,
    },
    GestureEnd,
}

impl JsCropEvent {
    pub(crate) fn into_core(self) -> Result<CropEvent, CropError> {
        Ok(match self {
            JsCropEvent::Moving { left, top } => CropEvent::Moving { left, top },
            JsCropEvent::Scaling {
                control,
                sign_x,
                sign_y,
                left,
                top,
                scale_x,
                scale_y,
            } => CropEvent::Scaling {
                control: control.parse()?,
                sign_x,
                sign_y,
                left,
                top,
                scale_x,
                scale_y,
            },
            JsCropEvent::GestureEnd => CropEvent::GestureEnd,
        })
    }
}

fn action_name(action: ButtonAction) -> &'static str {
    match action {
        ButtonAction::Apply => "apply",
        ButtonAction::Cancel => "cancel",
    }
}

/// [`Canvas`] over a JavaScript adapter object.
///
/// The trait's methods cannot fail, so the first JS exception is parked in
/// `failure` and surfaced by the session method that triggered it.
struct JsCanvas {
    target: JsValue,
    failure: Option<JsValue>,
}

impl JsCanvas {
    fn new(target: JsValue) -> Self {
        Self {
            target,
            failure: None,
        }
    }

    fn record(&mut self, method: &str, error: JsValue) {
        console::error_2(&JsValue::from_str(&format!("canvas.{method} failed")), &error);
        if self.failure.is_none() {
            self.failure = Some(error);
        }
    }

    fn try_call(&self, method: &str, args: &[JsValue]) -> Result<JsValue, JsValue> {
        let func: Function = Reflect::get(&self.target, &JsValue::from_str(method))?
            .dyn_into()
            .map_err(|_| JsValue::from_str(&format!("canvas has no method {method}")))?;
        let args: Array = args.iter().collect();
        func.apply(&self.target, &args)
    }

    fn call(&mut self, method: &str, args: &[JsValue]) -> JsValue {
        match self.try_call(method, args) {
            Ok(value) => value,
            Err(e) => {
                self.record(method, e);
                JsValue::UNDEFINED
            }
        }
    }

    fn value<T: Serialize>(&mut self, method: &str, value: &T) -> JsValue {
        match serde_wasm_bindgen::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                self.record(method, js_error(e));
                JsValue::UNDEFINED
            }
        }
    }

    fn add_object(&mut self, method: &str, rect: JsValue, style: JsValue) -> u32 {
        let id = self.call(method, &[rect, style]);
        match id.as_f64() {
            Some(id) => id as u32,
            None => {
                self.record(method, JsValue::from_str("expected a numeric object id"));
                0
            }
        }
    }

    fn take_failure(&mut self) -> Result<(), JsValue> {
        match self.failure.take() {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }
}

impl Canvas for JsCanvas {
    type Id = u32;
    type Image = JsValue;

    fn add_crop_rect(&mut self, rect: &RectTransform, style: &CropRectStyle) -> u32 {
        let rect = self.value("addCropRect", rect);
        let style = self.value("addCropRect", style);
        self.add_object("addCropRect", rect, style)
    }

    fn add_overlay(&mut self, rect: &RectTransform, style: &OverlayStyle) -> u32 {
        let rect = self.value("addOverlay", rect);
        let style = self.value("addOverlay", style);
        self.add_object("addOverlay", rect, style)
    }

    fn add_button(&mut self, owner: u32, action: ButtonAction, spec: &ButtonSpec) {
        let spec = self.value("addButton", spec);
        self.call(
            "addButton",
            &[owner.into(), JsValue::from_str(action_name(action)), spec],
        );
    }

    fn remove_button(&mut self, owner: u32, action: ButtonAction) {
        self.call(
            "removeButton",
            &[owner.into(), JsValue::from_str(action_name(action))],
        );
    }

    fn remove(&mut self, id: u32) {
        self.call("remove", &[id.into()]);
    }

    fn set_active(&mut self, id: Option<u32>) {
        let id = id.map_or(JsValue::NULL, JsValue::from);
        self.call("setActive", &[id]);
    }

    fn add_image(&mut self, image: JsValue) {
        self.call("addImage", &[image]);
    }

    fn request_render(&mut self) {
        self.call("requestRender", &[]);
    }
}

fn set(target: &Object, key: &str, value: &JsValue) -> Result<(), CropError> {
    Reflect::set(target, &JsValue::from_str(key), value)
        .map(|_| ())
        .map_err(|e| CropError::LoadFailed(format!("{e:?}")))
}

fn placement_value(placement: &PlacementOptions) -> Result<JsValue, CropError> {
    serde_wasm_bindgen::to_value(placement).map_err(|e| CropError::LoadFailed(e.to_string()))
}

fn raster_asset(loaded: LoadedImage) -> Result<JsValue, CropError> {
    let asset = Object::new();
    set(&asset, "width", &loaded.raster.width.into())?;
    set(&asset, "height", &loaded.raster.height.into())?;
    set(
        &asset,
        "pixels",
        &Uint8Array::from(loaded.raster.pixels.as_slice()).into(),
    )?;
    set(&asset, "placement", &placement_value(&loaded.placement)?)?;
    Ok(asset.into())
}

fn encoded_asset(encoded: EncodedImage) -> Result<JsValue, CropError> {
    let asset = Object::new();
    set(&asset, "width", &encoded.width.into())?;
    set(&asset, "height", &encoded.height.into())?;
    set(
        &asset,
        "bytes",
        &Uint8Array::from(encoded.bytes.as_slice()).into(),
    )?;
    set(
        &asset,
        "mime_type",
        &JsValue::from_str(encoded.format.mime_type()),
    )?;
    set(&asset, "placement", &placement_value(&encoded.placement)?)?;
    Ok(asset.into())
}

/// Loader producing the plain object handed to `canvas.addImage`: raw RGBA
/// pixels, or encoded bytes when a format is set.
struct JsAssetLoader {
    format: Option<ExportFormat>,
}

impl ImageLoader for JsAssetLoader {
    type Asset = JsValue;

    fn load(
        &self,
        raster: RasterImage,
        placement: PlacementOptions,
    ) -> impl Future<Output = Result<JsValue, CropError>> {
        let format = self.format;
        async move {
            match format {
                None => raster_asset(RasterLoader.load(raster, placement).await?),
                Some(format) => {
                    encoded_asset(EncodedLoader::new(format).load(raster, placement).await?)
                }
            }
        }
    }
}

/// An interactive crop session for JavaScript.
#[wasm_bindgen]
pub struct JsCropSession {
    inner: CropSession<u32>,
    canvas: JsCanvas,
    source: RasterImage,
}

#[wasm_bindgen]
impl JsCropSession {
    /// Start a crop session.
    ///
    /// # Arguments
    /// * `canvas` - Canvas adapter object (see module docs)
    /// * `image_id` - Id of the image on the canvas
    /// * `image` - `ImageObject`-shaped description of the image
    /// * `source` - The image's unrotated source raster
    /// * `config` - Optional partial `CropConfig`
    #[wasm_bindgen(constructor)]
    pub fn new(
        canvas: JsValue,
        image_id: u32,
        image: JsValue,
        source: &JsRaster,
        config: JsValue,
    ) -> Result<JsCropSession, JsValue> {
        let source = source.to_raster().map_err(js_error)?;
        let image: ImageObject = serde_wasm_bindgen::from_value(image).map_err(js_error)?;
        let config: CropConfig = if config.is_undefined() || config.is_null() {
            CropConfig::default()
        } else {
            serde_wasm_bindgen::from_value(config).map_err(js_error)?
        };

        let mut canvas = JsCanvas::new(canvas);
        let inner = CropSession::start(&mut canvas, image_id, image, config);
        canvas.take_failure()?;

        Ok(Self {
            inner,
            canvas,
            source,
        })
    }

    /// Current state: `active`, `applying`, `applied` or `cancelled`.
    #[wasm_bindgen(getter)]
    pub fn state(&self) -> String {
        self.inner.state().to_string()
    }

    /// Id of the crop rectangle on the canvas.
    #[wasm_bindgen(getter)]
    pub fn crop_id(&self) -> u32 {
        self.inner.crop_id()
    }

    /// Resolve an interaction event.
    ///
    /// Returns the placement `{left, top, scale_x, scale_y}` the host must
    /// write back to the crop rectangle.
    pub fn handle_event(&mut self, event: JsValue) -> Result<JsValue, JsValue> {
        let event: JsCropEvent = serde_wasm_bindgen::from_value(event).map_err(js_error)?;
        let placement = event
            .into_core()
            .and_then(|event| self.inner.handle_event(event))
            .map_err(|e| {
                console::warn_1(&JsValue::from_str(&format!("crop event rejected: {e}")));
                js_error(e)
            })?;
        serde_wasm_bindgen::to_value(&placement).map_err(js_error)
    }

    /// The crop plan for the box's current geometry.
    pub fn plan(&self) -> Result<JsValue, JsValue> {
        serde_wasm_bindgen::to_value(&self.inner.plan()).map_err(js_error)
    }

    /// Abandon the crop and reselect the image.
    pub fn cancel(&mut self) -> Result<(), JsValue> {
        self.inner.cancel(&mut self.canvas).map_err(js_error)?;
        self.canvas.take_failure()
    }

    /// The crop rectangle lost selection; cancels the session.
    pub fn deselect(&mut self) -> Result<(), JsValue> {
        self.inner.deselect(&mut self.canvas).map_err(js_error)?;
        self.canvas.take_failure()
    }

    /// Replace the image with its cropped version.
    ///
    /// With `encode` set, `addImage` receives encoded bytes in the configured
    /// export format; otherwise raw RGBA pixels.
    pub fn apply(&mut self, encode: bool) -> Result<(), JsValue> {
        let loader = JsAssetLoader {
            format: encode.then_some(self.inner.config().format),
        };
        // Both built-in loaders resolve immediately.
        pollster::block_on(self.inner.apply(&mut self.canvas, &self.source, &loader))
            .map_err(js_error)?;
        self.canvas.take_failure()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use boundcrop_core::constraint::Control;

    #[test]
    fn test_moving_event_converts() {
        let event = JsCropEvent::Moving {
            left: 3.0,
            top: 4.0,
        };
        assert_eq!(
            event.into_core().unwrap(),
            CropEvent::Moving {
                left: 3.0,
                top: 4.0
            }
        );
    }

    #[test]
    fn test_scaling_event_parses_control() {
        let event = JsCropEvent::Scaling {
            control: "br".to_string(),
            sign_x: 1.0,
            sign_y: 1.0,
            left: 0.0,
            top: 0.0,
            scale_x: 2.0,
            scale_y: 2.0,
        };
        assert!(matches!(
            event.into_core().unwrap(),
            CropEvent::Scaling {
                control: Control::BottomRight,
                ..
            }
        ));
    }

    #[test]
    fn test_rotation_control_rejected() {
        let event = JsCropEvent::Scaling {
            control: "mtr".to_string(),
            sign_x: 1.0,
            sign_y: 1.0,
            left: 0.0,
            top: 0.0,
            scale_x: 1.0,
            scale_y: 1.0,
        };
        assert!(matches!(
            event.into_core(),
            Err(CropError::UnknownControl(_))
        ));
    }

    #[test]
    fn test_action_names() {
        assert_eq!(action_name(ButtonAction::Apply), "apply");
        assert_eq!(action_name(ButtonAction::Cancel), "cancel");
    }
}
