//! Engine adapter boundary
//!
//! The scene layer talks to rendering, physics and hit-testing only through
//! the [`Engine`] trait. Two adapters share the same arcade [`World`] and
//! display-list [`Stage`]:
//! - [`HeadlessEngine`]: in-memory, used by the native binary and tests
//! - `web::CanvasEngine`: browser canvas (wasm32 only)

pub mod headless;
pub mod stage;
pub mod world;

pub use headless::HeadlessEngine;
pub use stage::{Anchor, Drawable, ObjectId, Stage};
pub use world::{Body, World};

use glam::Vec2;
use thiserror::Error;

use crate::config::TextStyle;
use crate::sim::{Command, EntityId};

/// Engine failures; the game rules themselves never fail
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("failed to load asset '{key}' from {path}: {reason}")]
    AssetLoad {
        key: String,
        path: String,
        reason: String,
    },

    #[error("asset '{0}' was never loaded")]
    MissingAsset(String),

    #[error("unknown scene object {0}")]
    UnknownObject(u32),

    #[error("engine backend error: {0}")]
    Backend(String),
}

/// A named image and where to load it from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AssetRef {
    pub key: &'static str,
    pub path: &'static str,
}

/// Everything an adapter needs to create a physics body for an entity
#[derive(Debug, Clone, PartialEq)]
pub struct BodySpec {
    pub id: EntityId,
    /// Image key
    pub texture: &'static str,
    pub pos: Vec2,
    pub vel: Vec2,
    pub bounce: f32,
    pub scale: f32,
    /// Added to the world gravity
    pub gravity_y: f32,
}

/// Scene-facing engine operations
pub trait Engine {
    /// Whether an image key is loaded and usable
    fn has_image(&self, key: &str) -> bool;

    /// Place a static image centred at `pos`
    fn add_image(&mut self, key: &str, pos: Vec2) -> Result<ObjectId, EngineError>;

    fn add_text(
        &mut self,
        text: &str,
        pos: Vec2,
        style: &TextStyle,
        anchor: Anchor,
    ) -> Result<ObjectId, EngineError>;

    fn set_text(&mut self, id: ObjectId, text: &str) -> Result<(), EngineError>;

    /// Create a physics body for an entity
    fn spawn_body(&mut self, spec: BodySpec) -> Result<(), EngineError>;

    /// Deliver `on_click` when the body is clicked
    fn set_interactive(&mut self, body: EntityId, on_click: Command) -> Result<(), EngineError>;

    /// Disable and hide a body
    fn disable_body(&mut self, body: EntityId) -> Result<(), EngineError>;

    /// Freeze all body motion
    fn pause_physics(&mut self);

    /// Drop every scene object and body (scene switch)
    fn clear_scene(&mut self);
}
