//! Entity pool
//!
//! Live balloons and balls with their spawn-time kinematics. Entities are
//! kept sorted by id (ids only ever grow), so lookups are binary searches.

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::Serialize;

use super::state::{Ball, Balloon, EntityId};
use crate::config::{BallConfig, BalloonConfig};

#[derive(Debug, Clone, Serialize)]
pub struct EntityPool {
    /// Live balloons (sorted by id)
    balloons: Vec<Balloon>,
    /// All balls ever spawned (sorted by id)
    balls: Vec<Ball>,
    /// Balloons burst so far
    destroyed: u32,
    /// Ids spawned since the last `take_fresh`
    #[serde(skip)]
    fresh: Vec<EntityId>,
    #[serde(skip)]
    balloon_cfg: BalloonConfig,
    #[serde(skip)]
    ball_cfg: BallConfig,
    #[serde(skip)]
    rng: Pcg32,
    next_id: EntityId,
}

impl EntityPool {
    pub fn new(seed: u64, balloon_cfg: BalloonConfig, ball_cfg: BallConfig) -> Self {
        Self {
            balloons: Vec::new(),
            balls: Vec::new(),
            destroyed: 0,
            fresh: Vec::new(),
            balloon_cfg,
            ball_cfg,
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    fn next_entity_id(&mut self) -> EntityId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Create exactly `n` balloons laid out in a row from one random origin
    pub fn spawn_balloons(&mut self, n: u32) -> Vec<EntityId> {
        if n == 0 {
            return Vec::new();
        }

        let c = &self.balloon_cfg;
        let origin_x = self.rng.random_range(c.x_min..=c.x_max) as f32;
        let (start_y, step_x, speed, gravity_y) = (c.start_y, c.step_x, c.speed_max, c.gravity_y);
        let (bounce_min, bounce_max) = (c.bounce_min, c.bounce_max);
        let (scale_min, scale_max) = (c.scale_pct_min, c.scale_pct_max);

        let mut ids = Vec::with_capacity(n as usize);
        for i in 0..n {
            let id = self.next_entity_id();
            let vel = Vec2::new(
                self.rng.random_range(-speed..=speed) as f32,
                self.rng.random_range(-speed..=speed) as f32,
            );
            let bounce = self.rng.random_range(bounce_min..=bounce_max);
            let scale = self.rng.random_range(scale_min..=scale_max) as f32 / 100.0;

            self.balloons.push(Balloon {
                id,
                pos: Vec2::new(origin_x + step_x * i as f32, start_y),
                vel,
                bounce,
                scale,
                gravity_y,
            });
            ids.push(id);
        }

        log::debug!("Spawned {} balloons at x={}", n, origin_x);
        self.fresh.extend_from_slice(&ids);
        ids
    }

    /// Create one ball at the top edge
    pub fn spawn_ball(&mut self) -> EntityId {
        let id = self.next_entity_id();
        let c = &self.ball_cfg;
        let (x_min, x_max, speed_min, speed_max) = (c.x_min, c.x_max, c.speed_min, c.speed_max);
        let (start_y, bounce, gravity_y) = (c.start_y, c.bounce, c.gravity_y);

        let x = self.rng.random_range(x_min..=x_max) as f32;
        let vel = Vec2::new(
            self.rng.random_range(speed_min..=speed_max) as f32,
            self.rng.random_range(speed_min..=speed_max) as f32,
        );

        self.balls.push(Ball {
            id,
            pos: Vec2::new(x, start_y),
            vel,
            bounce,
            gravity_y,
            hits: 0,
        });
        log::debug!("Spawned ball {} at x={}", id, x);
        self.fresh.push(id);
        id
    }

    /// Remove a live balloon. Returns false if it was already gone.
    pub fn destroy_balloon(&mut self, id: EntityId) -> bool {
        match self.balloons.binary_search_by_key(&id, |b| b.id) {
            Ok(idx) => {
                self.balloons.remove(idx);
                self.destroyed += 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Record a click on a ball. The ball stays in play.
    pub fn register_hit(&mut self, id: EntityId) -> bool {
        match self.balls.binary_search_by_key(&id, |b| b.id) {
            Ok(idx) => {
                self.balls[idx].hits += 1;
                true
            }
            Err(_) => false,
        }
    }

    /// Drain the ids spawned since the previous call (spawn order)
    pub fn take_fresh(&mut self) -> Vec<EntityId> {
        std::mem::take(&mut self.fresh)
    }

    pub fn balloon(&self, id: EntityId) -> Option<&Balloon> {
        self.balloons
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|idx| &self.balloons[idx])
    }

    pub fn ball(&self, id: EntityId) -> Option<&Ball> {
        self.balls
            .binary_search_by_key(&id, |b| b.id)
            .ok()
            .map(|idx| &self.balls[idx])
    }

    pub fn balloons(&self) -> &[Balloon] {
        &self.balloons
    }

    pub fn balls(&self) -> &[Ball] {
        &self.balls
    }

    pub fn live_balloons(&self) -> usize {
        self.balloons.len()
    }

    pub fn ball_count(&self) -> usize {
        self.balls.len()
    }

    pub fn destroyed_balloons(&self) -> u32 {
        self.destroyed
    }
}
