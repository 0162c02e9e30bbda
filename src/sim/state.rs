//! Game state and core rule types
//!
//! Score, hit count and phase live here together with the entity pool, so a
//! session is one owned value handed to each handler.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::pool::EntityPool;
use crate::config::{ConfigError, GameConfig};

/// Entity identifier, unique for the whole session
pub type EntityId = u32;

/// Current phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Active gameplay
    #[default]
    Playing,
    /// Run ended; terminal within a session
    GameOver,
}

/// A balloon (scoring target)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Balloon {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    /// Vertical bounce coefficient
    pub bounce: f32,
    pub scale: f32,
    /// Per-body gravity on top of the world gravity
    pub gravity_y: f32,
}

/// A ball (hazard). Balls are never removed once spawned.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Ball {
    pub id: EntityId,
    pub pos: Vec2,
    pub vel: Vec2,
    pub bounce: f32,
    pub gravity_y: f32,
    /// Clicks this ball has taken
    pub hits: u32,
}

/// A click resolved against an entity, applied atomically to the state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    BurstBalloon(EntityId),
    HitBall(EntityId),
}

/// What applying a command changed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum GameEvent {
    BalloonBurst { id: EntityId, score: u32 },
    BallHit { id: EntityId, hit_count: u32 },
    GameOver { final_score: u32 },
}

/// Complete session state
#[derive(Debug, Clone, Serialize)]
pub struct GameState {
    pub config: GameConfig,
    /// Run seed for the spawn RNG
    pub seed: u64,
    pub score: u32,
    /// Ball clicks over the whole session
    pub hit_count: u32,
    pub phase: GamePhase,
    /// Simulation tick counter
    pub time_ticks: u64,
    pub pool: EntityPool,
    /// Set once the GameOver transition has been handed to the scene layer
    pub(crate) game_over_reported: bool,
}

impl GameState {
    /// Create a fresh session. The pool starts empty; the game scene fills it.
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        let pool = EntityPool::new(seed, config.balloons.clone(), config.balls.clone());
        Ok(Self {
            config,
            seed,
            score: 0,
            hit_count: 0,
            phase: GamePhase::Playing,
            time_ticks: 0,
            pool,
            game_over_reported: false,
        })
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == GamePhase::GameOver
    }

    /// Burst a live balloon and collect its reward
    pub fn on_balloon_burst(&mut self, id: EntityId) -> Option<GameEvent> {
        if self.is_game_over() || !self.pool.destroy_balloon(id) {
            return None;
        }
        self.score = self.score.saturating_add(self.config.points_per_hit);
        log::debug!("Balloon {} burst, score {}", id, self.score);
        Some(GameEvent::BalloonBurst {
            id,
            score: self.score,
        })
    }

    /// Count a click on a ball; too many ends the game
    pub fn on_ball_hit(&mut self, id: EntityId) -> Option<GameEvent> {
        if self.is_game_over() {
            return None;
        }
        if !self.pool.register_hit(id) {
            log::warn!("Hit on unknown ball {}", id);
            return None;
        }
        self.hit_count = self.hit_count.saturating_add(1);
        log::debug!("Ball {} hit, hit count {}", id, self.hit_count);
        if self.hit_count > self.config.max_ball_hit_count {
            self.phase = GamePhase::GameOver;
            log::info!("Game over with score {}", self.score);
        }
        Some(GameEvent::BallHit {
            id,
            hit_count: self.hit_count,
        })
    }

    /// Apply one click command
    pub fn apply(&mut self, command: Command) -> Vec<GameEvent> {
        let was_over = self.is_game_over();
        let event = match command {
            Command::BurstBalloon(id) => self.on_balloon_burst(id),
            Command::HitBall(id) => self.on_ball_hit(id),
        };

        let mut events: Vec<GameEvent> = event.into_iter().collect();
        if !was_over && self.is_game_over() {
            events.push(GameEvent::GameOver {
                final_score: self.score,
            });
        }
        events
    }

    /// Spawn `extra` balloons plus the per-pass baseline. Nothing spawns
    /// once the game is over.
    pub fn manage_balloons(&mut self, extra: u32) -> Vec<EntityId> {
        if self.is_game_over() {
            return Vec::new();
        }
        let count = extra.saturating_add(self.config.balloons.per_tick);
        self.pool.spawn_balloons(count)
    }

    /// Spawn one ball, unless the game is over
    pub fn spawn_ball(&mut self) -> Option<EntityId> {
        if self.is_game_over() {
            return None;
        }
        Some(self.pool.spawn_ball())
    }

    /// Balls join once the score passes the threshold
    pub fn balls_unlocked(&self) -> bool {
        self.score > self.config.score_to_init_balls
    }

    /// Score board text
    pub fn score_label(&self) -> String {
        format!("Hits: {}", self.score)
    }

    /// Game over screen score text
    pub fn final_score_label(&self) -> String {
        format!("You scored: {}", self.score)
    }
}
