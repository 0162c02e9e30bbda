//! Balloon Pop - click the balloons, dodge the balls
//!
//! Core modules:
//! - `sim`: Game rules (entity pool, score/phase state machine, per-frame tick)
//! - `scene`: Scene controller wiring the rules to an engine adapter
//! - `engine`: Engine adapter trait, shared arcade physics world, headless adapter
//! - `config`: Tunable game configuration (defaults are the build-time constants)
//! - `web`: Browser canvas adapter (wasm32 only)

pub mod config;
pub mod engine;
pub mod scene;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use config::{ConfigError, GameConfig, TextStyle};
pub use engine::{Engine, EngineError, HeadlessEngine};
pub use scene::{SceneController, SceneKey};

/// Game configuration constants
pub mod consts {
    /// Fixed frame step (display refresh cadence)
    pub const FRAME_DT: f32 = 1.0 / 60.0;

    /// Viewport dimensions
    pub const SCREEN_WIDTH: f32 = 1024.0;
    pub const SCREEN_HEIGHT: f32 = 720.0;

    /// World gravity (negative = upward)
    pub const GRAVITY_Y: f32 = -100.0;

    /// Balloons in the opening batch
    pub const INIT_BALLOON_COUNT: u32 = 50;
    /// Balloons added by every housekeeping pass on top of the requested extras
    pub const BALLOONS_PER_TICK: u32 = 1;
    /// Extra gravity applied to every balloon
    pub const BALLOON_GRAVITY_Y: f32 = -100.0;
    /// Balloon batch origin range (x) and start height
    pub const BALLOON_X_MIN: i32 = 0;
    pub const BALLOON_X_MAX: i32 = 800;
    pub const BALLOON_START_Y: f32 = 800.0;
    /// Horizontal spacing between balloons of one batch
    pub const BALLOON_STEP_X: f32 = 10.0;
    pub const BALLOON_SPEED_MAX: i32 = 100;
    pub const BALLOON_BOUNCE_MIN: f32 = 0.4;
    pub const BALLOON_BOUNCE_MAX: f32 = 0.8;
    /// Scale is drawn as an integer percentage
    pub const BALLOON_SCALE_PCT_MIN: u32 = 20;
    pub const BALLOON_SCALE_PCT_MAX: u32 = 30;

    /// Score that must be exceeded before balls appear
    pub const SCORE_TO_INIT_BALLS: u32 = 50;
    pub const POINTS_PER_HIT: u32 = 5;
    /// Ball clicks tolerated before the game ends
    pub const MAX_BALL_HIT_COUNT: u32 = 1;

    pub const BALL_X_MIN: i32 = 0;
    pub const BALL_X_MAX: i32 = 400;
    pub const BALL_START_Y: f32 = 0.0;
    pub const BALL_SPEED_MIN: i32 = -200;
    pub const BALL_SPEED_MAX: i32 = 400;
    pub const BALL_BOUNCE: f32 = 2.0;
    pub const BALL_GRAVITY_Y: f32 = 1000.0;

    /// Score board
    pub const SCORE_X: f32 = 900.0;
    pub const SCORE_Y: f32 = 20.0;
    pub const SCORE_COLOR: &str = "#FCC";
    pub const SCORE_FONT_SIZE: u32 = 22;
    pub const SCORE_FONT: &str = "Consolas";

    /// Game over screen
    pub const GAME_OVER_COLOR: &str = "#F00";
    pub const GAME_OVER_FONT_SIZE: u32 = 72;
    pub const GAME_OVER_FONT: &str = "Impact";
}
