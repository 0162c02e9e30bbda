//! Arcade physics world
//!
//! Axis-aligned bodies under constant gravity, explicit Euler integration,
//! point hit-testing against scaled image bounds. Screen coordinates, y down.

use glam::Vec2;

use super::BodySpec;
use crate::sim::{Command, EntityId};

/// A physics body backing one entity
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub id: EntityId,
    pub texture: &'static str,
    pub pos: Vec2,
    pub vel: Vec2,
    pub bounce: f32,
    pub scale: f32,
    pub gravity_y: f32,
    /// Unscaled image size
    pub size: Vec2,
    /// Disabled bodies neither move nor receive clicks
    pub enabled: bool,
    pub visible: bool,
    pub on_click: Option<Command>,
}

impl Body {
    pub fn from_spec(spec: BodySpec, size: Vec2) -> Self {
        Self {
            id: spec.id,
            texture: spec.texture,
            pos: spec.pos,
            vel: spec.vel,
            bounce: spec.bounce,
            scale: spec.scale,
            gravity_y: spec.gravity_y,
            size,
            enabled: true,
            visible: true,
            on_click: None,
        }
    }

    /// Drawn size
    pub fn display_size(&self) -> Vec2 {
        self.size * self.scale
    }

    /// Whether a point falls inside the drawn bounds (centred on `pos`)
    pub fn contains(&self, point: Vec2) -> bool {
        let half = self.display_size() / 2.0;
        let d = (point - self.pos).abs();
        d.x <= half.x && d.y <= half.y
    }
}

#[derive(Debug, Clone)]
pub struct World {
    pub gravity: Vec2,
    /// Bodies sorted by id (later bodies draw on top)
    bodies: Vec<Body>,
    paused: bool,
}

impl World {
    pub fn new(gravity_y: f32) -> Self {
        Self {
            gravity: Vec2::new(0.0, gravity_y),
            bodies: Vec::new(),
            paused: false,
        }
    }

    /// Keeps bodies ordered by id; entity ids grow with creation time
    pub fn add(&mut self, body: Body) {
        let idx = self.bodies.partition_point(|b| b.id < body.id);
        self.bodies.insert(idx, body);
    }

    pub fn get(&self, id: EntityId) -> Option<&Body> {
        let idx = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(&self.bodies[idx])
    }

    pub fn get_mut(&mut self, id: EntityId) -> Option<&mut Body> {
        let idx = self.bodies.binary_search_by_key(&id, |b| b.id).ok()?;
        Some(&mut self.bodies[idx])
    }

    pub fn bodies(&self) -> &[Body] {
        &self.bodies
    }

    /// Advance every enabled body by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.paused {
            return;
        }
        for body in self.bodies.iter_mut().filter(|b| b.enabled) {
            body.vel.y += (self.gravity.y + body.gravity_y) * dt;
            body.vel.x += self.gravity.x * dt;
            body.pos += body.vel * dt;
        }
    }

    /// Topmost interactive body under `point`
    pub fn hit_test(&self, point: Vec2) -> Option<Command> {
        self.bodies
            .iter()
            .rev()
            .filter(|b| b.enabled && b.visible)
            .find(|b| b.on_click.is_some() && b.contains(point))
            .and_then(|b| b.on_click)
    }

    /// Returns false if the body does not exist
    pub fn disable(&mut self, id: EntityId) -> bool {
        match self.get_mut(id) {
            Some(body) => {
                body.enabled = false;
                body.visible = false;
                true
            }
            None => false,
        }
    }

    pub fn pause(&mut self) {
        self.paused = true;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    /// Remove all bodies and resume
    pub fn clear(&mut self) {
        self.bodies.clear();
        self.paused = false;
    }
}
