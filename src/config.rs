//! Game configuration
//!
//! Every tunable the rules and scenes read. `Default` reproduces the
//! build-time constants in [`crate::consts`]; hosts may layer a partial JSON
//! override on top.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Malformed JSON or wrong field types
    #[error("invalid game config: {0}")]
    Parse(#[from] serde_json::Error),

    /// A range whose lower bound exceeds its upper bound
    #[error("invalid range for {field}: {min} > {max}")]
    Range {
        field: &'static str,
        min: f64,
        max: f64,
    },
}

/// Fails when `min > max` or the bounds are unordered (NaN). Bounds are
/// compared in their own type; `f64` only carries them into the error.
fn check_range<T>(field: &'static str, min: T, max: T) -> Result<(), ConfigError>
where
    T: PartialOrd + Copy + Into<f64>,
{
    match min.partial_cmp(&max) {
        Some(Ordering::Less | Ordering::Equal) => Ok(()),
        _ => Err(ConfigError::Range {
            field,
            min: min.into(),
            max: max.into(),
        }),
    }
}

/// Text styling for score and game-over labels
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub font_size: u32,
    pub font_family: String,
    /// CSS color string
    pub color: String,
}

impl TextStyle {
    pub fn new(font_size: u32, font_family: &str, color: &str) -> Self {
        Self {
            font_size,
            font_family: font_family.to_string(),
            color: color.to_string(),
        }
    }

    /// CSS font shorthand, e.g. `22px Consolas`
    pub fn css_font(&self) -> String {
        format!("{}px {}", self.font_size, self.font_family)
    }
}

/// Balloon spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BalloonConfig {
    pub initial_count: u32,
    pub per_tick: u32,
    pub gravity_y: f32,
    pub x_min: i32,
    pub x_max: i32,
    pub start_y: f32,
    pub step_x: f32,
    /// Velocity components are drawn from [-speed_max, speed_max]
    pub speed_max: i32,
    pub bounce_min: f32,
    pub bounce_max: f32,
    pub scale_pct_min: u32,
    pub scale_pct_max: u32,
}

impl Default for BalloonConfig {
    fn default() -> Self {
        Self {
            initial_count: INIT_BALLOON_COUNT,
            per_tick: BALLOONS_PER_TICK,
            gravity_y: BALLOON_GRAVITY_Y,
            x_min: BALLOON_X_MIN,
            x_max: BALLOON_X_MAX,
            start_y: BALLOON_START_Y,
            step_x: BALLOON_STEP_X,
            speed_max: BALLOON_SPEED_MAX,
            bounce_min: BALLOON_BOUNCE_MIN,
            bounce_max: BALLOON_BOUNCE_MAX,
            scale_pct_min: BALLOON_SCALE_PCT_MIN,
            scale_pct_max: BALLOON_SCALE_PCT_MAX,
        }
    }
}

/// Ball (hazard) spawn parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub x_min: i32,
    pub x_max: i32,
    pub start_y: f32,
    pub speed_min: i32,
    pub speed_max: i32,
    pub bounce: f32,
    pub gravity_y: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            x_min: BALL_X_MIN,
            x_max: BALL_X_MAX,
            start_y: BALL_START_Y,
            speed_min: BALL_SPEED_MIN,
            speed_max: BALL_SPEED_MAX,
            bounce: BALL_BOUNCE,
            gravity_y: BALL_GRAVITY_Y,
        }
    }
}

/// Complete game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub width: f32,
    pub height: f32,
    pub gravity_y: f32,
    pub score_to_init_balls: u32,
    pub points_per_hit: u32,
    pub max_ball_hit_count: u32,
    pub balloons: BalloonConfig,
    pub balls: BallConfig,
    /// Score board position
    pub score_pos: (f32, f32),
    pub score_style: TextStyle,
    pub game_over_style: TextStyle,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            width: SCREEN_WIDTH,
            height: SCREEN_HEIGHT,
            gravity_y: GRAVITY_Y,
            score_to_init_balls: SCORE_TO_INIT_BALLS,
            points_per_hit: POINTS_PER_HIT,
            max_ball_hit_count: MAX_BALL_HIT_COUNT,
            balloons: BalloonConfig::default(),
            balls: BallConfig::default(),
            score_pos: (SCORE_X, SCORE_Y),
            score_style: TextStyle::new(SCORE_FONT_SIZE, SCORE_FONT, SCORE_COLOR),
            game_over_style: TextStyle::new(GAME_OVER_FONT_SIZE, GAME_OVER_FONT, GAME_OVER_COLOR),
        }
    }
}

impl GameConfig {
    /// Parse a (possibly partial) JSON override; missing fields keep defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject empty random ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        let b = &self.balloons;
        let balls = &self.balls;
        check_range("balloons.x", b.x_min, b.x_max)?;
        check_range("balloons.bounce", b.bounce_min, b.bounce_max)?;
        check_range("balloons.scale_pct", b.scale_pct_min, b.scale_pct_max)?;
        // Drawn from [-speed_max, speed_max]
        check_range("balloons.speed", 0, b.speed_max)?;
        check_range("balls.x", balls.x_min, balls.x_max)?;
        check_range("balls.speed", balls.speed_min, balls.speed_max)?;
        Ok(())
    }

    /// Viewport centre
    pub fn center(&self) -> (f32, f32) {
        (self.width / 2.0, self.height / 2.0)
    }

    /// Load the page-embedded override (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        const ELEMENT_ID: &str = "game-config";

        let json = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.get_element_by_id(ELEMENT_ID))
            .and_then(|el| el.text_content());

        match json {
            Some(json) if !json.trim().is_empty() => match Self::from_json(&json) {
                Ok(config) => {
                    log::info!("Loaded game config from #{}", ELEMENT_ID);
                    config
                }
                Err(e) => {
                    log::warn!("Ignoring game config: {}", e);
                    Self::default()
                }
            },
            _ => {
                log::info!("Using default game config");
                Self::default()
            }
        }
    }

    /// Native builds always use the compiled defaults
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}
