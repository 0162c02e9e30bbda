//! Browser canvas engine adapter (WASM only)
//!
//! Draws the display list and bodies onto a `<canvas>` 2D context. Physics
//! and hit-testing run in the shared arcade [`World`].

use std::collections::HashMap;

use glam::Vec2;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::config::{GameConfig, TextStyle};
use crate::engine::{
    Anchor, AssetRef, Body, BodySpec, Drawable, Engine, EngineError, ObjectId, Stage, World,
};
use crate::sim::{Command, EntityId};

fn backend_error(context: &str, err: JsValue) -> EngineError {
    EngineError::Backend(format!("{}: {:?}", context, err))
}

pub struct CanvasEngine {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    images: HashMap<String, HtmlImageElement>,
    world: World,
    stage: Stage,
}

impl CanvasEngine {
    /// Size the canvas to the viewport and grab its 2D context
    pub fn new(canvas: HtmlCanvasElement, config: &GameConfig) -> Result<Self, EngineError> {
        canvas.set_width(config.width as u32);
        canvas.set_height(config.height as u32);

        let ctx = canvas
            .get_context("2d")
            .map_err(|e| backend_error("get_context", e))?
            .ok_or_else(|| EngineError::Backend("2D context unavailable".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|e| backend_error("2D context cast", e.into()))?;

        Ok(Self {
            canvas,
            ctx,
            images: HashMap::new(),
            world: World::new(config.gravity_y),
            stage: Stage::new(),
        })
    }

    /// Load and decode every image before the first frame
    pub async fn load_assets<'a>(
        &mut self,
        assets: impl IntoIterator<Item = &'a AssetRef>,
    ) -> Result<(), EngineError> {
        for asset in assets {
            let load_error = |reason: String| EngineError::AssetLoad {
                key: asset.key.to_string(),
                path: asset.path.to_string(),
                reason,
            };

            let img = HtmlImageElement::new().map_err(|e| load_error(format!("{:?}", e)))?;
            img.set_src(asset.path);
            JsFuture::from(img.decode())
                .await
                .map_err(|e| load_error(format!("{:?}", e)))?;

            log::info!(
                "Loaded {} ({}x{})",
                asset.key,
                img.natural_width(),
                img.natural_height()
            );
            self.images.insert(asset.key.to_string(), img);
        }
        Ok(())
    }

    /// Advance physics by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        self.world.step(dt);
    }

    /// Resolve a click given in client (CSS pixel) coordinates
    pub fn click_at_client(&self, client_x: f64, client_y: f64) -> Option<Command> {
        let rect = self.canvas.get_bounding_client_rect();
        if rect.width() <= 0.0 || rect.height() <= 0.0 {
            return None;
        }
        let sx = self.canvas.width() as f64 / rect.width();
        let sy = self.canvas.height() as f64 / rect.height();
        let point = Vec2::new(
            ((client_x - rect.left()) * sx) as f32,
            ((client_y - rect.top()) * sy) as f32,
        );
        self.world.hit_test(point)
    }

    fn image(&self, key: &str) -> Result<&HtmlImageElement, EngineError> {
        self.images
            .get(key)
            .ok_or_else(|| EngineError::MissingAsset(key.to_string()))
    }

    fn image_size(&self, key: &str) -> Result<Vec2, EngineError> {
        let img = self.image(key)?;
        Ok(Vec2::new(img.natural_width() as f32, img.natural_height() as f32))
    }

    fn draw_centered(&self, key: &str, pos: Vec2, size: Vec2) -> Result<(), EngineError> {
        let img = self.image(key)?;
        self.ctx
            .draw_image_with_html_image_element_and_dw_and_dh(
                img,
                (pos.x - size.x / 2.0) as f64,
                (pos.y - size.y / 2.0) as f64,
                size.x as f64,
                size.y as f64,
            )
            .map_err(|e| backend_error("draw_image", e))
    }

    fn draw_text(
        &self,
        text: &str,
        pos: Vec2,
        style: &TextStyle,
        anchor: Anchor,
    ) -> Result<(), EngineError> {
        let (align, baseline) = match anchor {
            Anchor::TopLeft => ("left", "top"),
            Anchor::Center => ("center", "middle"),
        };
        self.ctx.set_font(&style.css_font());
        self.ctx.set_fill_style_str(&style.color);
        self.ctx.set_text_align(align);
        self.ctx.set_text_baseline(baseline);
        self.ctx
            .fill_text(text, pos.x as f64, pos.y as f64)
            .map_err(|e| backend_error("fill_text", e))
    }

    /// Draw one frame: static images, bodies, then text on top
    pub fn render(&self) -> Result<(), EngineError> {
        let (w, h) = (self.canvas.width() as f64, self.canvas.height() as f64);
        self.ctx.clear_rect(0.0, 0.0, w, h);

        for item in self.stage.items() {
            if let Drawable::Image { key, pos } = item {
                self.draw_centered(key, *pos, self.image_size(key)?)?;
            }
        }

        for body in self.world.bodies().iter().filter(|b| b.visible) {
            self.draw_centered(body.texture, body.pos, body.display_size())?;
        }

        for item in self.stage.items() {
            if let Drawable::Text {
                text,
                pos,
                style,
                anchor,
            } = item
            {
                self.draw_text(text, *pos, style, *anchor)?;
            }
        }
        Ok(())
    }
}

impl Engine for CanvasEngine {
    fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    fn add_image(&mut self, key: &str, pos: Vec2) -> Result<ObjectId, EngineError> {
        self.image(key)?;
        Ok(self.stage.add_image(key, pos))
    }

    fn add_text(
        &mut self,
        text: &str,
        pos: Vec2,
        style: &TextStyle,
        anchor: Anchor,
    ) -> Result<ObjectId, EngineError> {
        Ok(self.stage.add_text(text, pos, style, anchor))
    }

    fn set_text(&mut self, id: ObjectId, text: &str) -> Result<(), EngineError> {
        self.stage.set_text(id, text)
    }

    fn spawn_body(&mut self, spec: BodySpec) -> Result<(), EngineError> {
        let size = self.image_size(spec.texture)?;
        self.world.add(Body::from_spec(spec, size));
        Ok(())
    }

    fn set_interactive(&mut self, body: EntityId, on_click: Command) -> Result<(), EngineError> {
        let body = self
            .world
            .get_mut(body)
            .ok_or(EngineError::UnknownObject(body))?;
        body.on_click = Some(on_click);
        Ok(())
    }

    fn disable_body(&mut self, body: EntityId) -> Result<(), EngineError> {
        if self.world.disable(body) {
            Ok(())
        } else {
            Err(EngineError::UnknownObject(body))
        }
    }

    fn pause_physics(&mut self) {
        self.world.pause();
    }

    fn clear_scene(&mut self) {
        self.world.clear();
        self.stage.clear();
    }
}
