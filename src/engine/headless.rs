//! In-memory engine adapter
//!
//! Runs the arcade world and keeps the display list without drawing
//! anything. Used by the native binary and as the test double for scenes.

use std::collections::HashMap;

use glam::Vec2;

use super::stage::{Anchor, ObjectId, Stage};
use super::world::{Body, World};
use super::{AssetRef, BodySpec, Engine, EngineError};
use crate::config::{GameConfig, TextStyle};
use crate::sim::{Command, EntityId};

/// Image size assumed for assets without an explicit size
pub const DEFAULT_IMAGE_SIZE: Vec2 = Vec2::new(200.0, 200.0);

#[derive(Debug, Clone)]
pub struct HeadlessEngine {
    world: World,
    stage: Stage,
    /// Loaded image keys with their pixel size
    images: HashMap<String, Vec2>,
    /// Number of `clear_scene` calls
    scene_switches: u32,
}

impl HeadlessEngine {
    pub fn new(config: &GameConfig) -> Self {
        Self {
            world: World::new(config.gravity_y),
            stage: Stage::new(),
            images: HashMap::new(),
            scene_switches: 0,
        }
    }

    /// Register assets; headless loading cannot fail
    pub fn load_assets<'a>(&mut self, assets: impl IntoIterator<Item = &'a AssetRef>) {
        for asset in assets {
            log::debug!("Loaded {} ({})", asset.key, asset.path);
            self.images
                .entry(asset.key.to_string())
                .or_insert(DEFAULT_IMAGE_SIZE);
        }
    }

    /// Override the pixel size of an image
    pub fn set_image_size(&mut self, key: &str, size: Vec2) {
        self.images.insert(key.to_string(), size);
    }

    /// Advance physics by one frame
    pub fn step(&mut self, dt: f32) {
        self.world.step(dt);
    }

    /// Resolve a click at a viewport point
    pub fn click_at(&self, point: Vec2) -> Option<Command> {
        self.world.hit_test(point)
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn stage(&self) -> &Stage {
        &self.stage
    }

    pub fn body(&self, id: EntityId) -> Option<&Body> {
        self.world.get(id)
    }

    pub fn scene_switches(&self) -> u32 {
        self.scene_switches
    }

    fn image_size(&self, key: &str) -> Result<Vec2, EngineError> {
        self.images
            .get(key)
            .copied()
            .ok_or_else(|| EngineError::MissingAsset(key.to_string()))
    }
}

impl Engine for HeadlessEngine {
    fn has_image(&self, key: &str) -> bool {
        self.images.contains_key(key)
    }

    fn add_image(&mut self, key: &str, pos: Vec2) -> Result<ObjectId, EngineError> {
        self.image_size(key)?;
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
        self.scene_switches += 1;
    }
}
