//! Scene controller
//!
//! Owns the session state and mirrors it onto an [`Engine`]: the Game scene
//! while playing, then a one-time switch to the static GameOver scene.

use glam::Vec2;
use serde::Serialize;

use crate::config::{ConfigError, GameConfig};
use crate::engine::{Anchor, AssetRef, BodySpec, Engine, EngineError, ObjectId};
use crate::sim::{Command, EntityId, GameState, TickInput, TickOutcome, tick};

/// Which scene is active
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum SceneKey {
    Game,
    GameOver,
}

/// Images used by the Game scene
pub static GAME_ASSETS: [AssetRef; 3] = [
    AssetRef {
        key: "park",
        path: "assets/park.png",
    },
    AssetRef {
        key: "balloon",
        path: "assets/balloon.png",
    },
    AssetRef {
        key: "ball",
        path: "assets/ball.png",
    },
];

/// Images used by the GameOver scene
pub static GAME_OVER_ASSETS: [AssetRef; 1] = [AssetRef {
    key: "sky",
    path: "assets/sky.png",
}];

pub struct SceneController {
    state: GameState,
    active: SceneKey,
    score_text: Option<ObjectId>,
    /// Clicks waiting for the next update
    pending: Vec<Command>,
}

impl SceneController {
    /// Fails if the config holds an empty random range
    pub fn new(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        let state = GameState::new(config, seed)?;
        log::info!("New session with seed {}", seed);
        Ok(Self {
            state,
            active: SceneKey::Game,
            score_text: None,
            pending: Vec::new(),
        })
    }

    /// Every image either scene needs
    pub fn assets() -> impl Iterator<Item = &'static AssetRef> {
        GAME_ASSETS.iter().chain(GAME_OVER_ASSETS.iter())
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn active_scene(&self) -> SceneKey {
        self.active
    }

    /// Build the Game scene: background, opening balloons, score board
    pub fn create(&mut self, engine: &mut impl Engine) -> Result<(), EngineError> {
        let config = &self.state.config;
        let (cx, cy) = config.center();
        let score_pos = Vec2::new(config.score_pos.0, config.score_pos.1);
        let style = config.score_style.clone();
        let initial = config.balloons.initial_count;

        engine.add_image("park", Vec2::new(cx, cy))?;
        self.state.manage_balloons(initial);
        self.bind_fresh(engine)?;

        let label = self.state.score_label();
        self.score_text = Some(engine.add_text(&label, score_pos, &style, Anchor::TopLeft)?);
        log::info!(
            "Game scene created with {} balloons",
            self.state.pool.live_balloons()
        );
        Ok(())
    }

    /// Queue a click for the next update
    pub fn push_command(&mut self, command: Command) {
        if self.active == SceneKey::Game {
            self.pending.push(command);
        }
    }

    /// Run one frame of game logic
    pub fn update(&mut self, engine: &mut impl Engine) -> Result<TickOutcome, EngineError> {
        if self.active == SceneKey::GameOver {
            return Ok(TickOutcome::default());
        }

        let input = TickInput {
            commands: std::mem::take(&mut self.pending),
        };
        let outcome = tick(&mut self.state, &input);

        for &id in &outcome.burst {
            engine.disable_body(id)?;
        }

        if outcome.entered_game_over {
            engine.pause_physics();
            engine.clear_scene();
            self.active = SceneKey::GameOver;
            self.score_text = None;
            log::info!("Switching to GameOver scene");
            self.create_game_over(engine)?;
            return Ok(outcome);
        }

        self.bind_fresh(engine)?;

        if let (Some(id), Some(label)) = (self.score_text, outcome.score_label.as_deref()) {
            engine.set_text(id, label)?;
        }
        Ok(outcome)
    }

    /// Create bodies and click bindings for entities spawned since last time
    fn bind_fresh(&mut self, engine: &mut impl Engine) -> Result<(), EngineError> {
        for id in self.state.pool.take_fresh() {
            let (spec, on_click) = self.body_for(id)?;
            engine.spawn_body(spec)?;
            engine.set_interactive(id, on_click)?;
        }
        Ok(())
    }

    fn body_for(&self, id: EntityId) -> Result<(BodySpec, Command), EngineError> {
        let pool = &self.state.pool;
        if let Some(b) = pool.balloon(id) {
            let spec = BodySpec {
                id,
                texture: "balloon",
                pos: b.pos,
                vel: b.vel,
                bounce: b.bounce,
                scale: b.scale,
                gravity_y: b.gravity_y,
            };
            return Ok((spec, Command::BurstBalloon(id)));
        }
        if let Some(b) = pool.ball(id) {
            let spec = BodySpec {
                id,
                texture: "ball",
                pos: b.pos,
                vel: b.vel,
                bounce: b.bounce,
                scale: 1.0,
                gravity_y: b.gravity_y,
            };
            return Ok((spec, Command::HitBall(id)));
        }
        Err(EngineError::UnknownObject(id))
    }

    /// Static GameOver scene: background, message, final score
    fn create_game_over(&mut self, engine: &mut impl Engine) -> Result<(), EngineError> {
        let config = &self.state.config;
        let (cx, cy) = config.center();
        let offset = config.height / 10.0;
        let style = &config.game_over_style;

        engine.add_image("sky", Vec2::new(cx, cy))?;
        engine.add_text("Game Over!", Vec2::new(cx, cy - offset), style, Anchor::Center)?;
        engine.add_text(
            &self.state.final_score_label(),
            Vec2::new(cx, cy + offset),
            style,
            Anchor::Center,
        )?;
        log::info!("Final score: {}", self.state.score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::FRAME_DT;
    use crate::engine::HeadlessEngine;
    use crate::sim::GamePhase;

    fn setup() -> (SceneController, HeadlessEngine) {
        let config = GameConfig::default();
        let mut engine = HeadlessEngine::new(&config);
        engine.load_assets(SceneController::assets());
        let mut controller = SceneController::new(config, 2024).unwrap();
        controller.create(&mut engine).unwrap();
        (controller, engine)
    }

    #[test]
    fn test_create_builds_game_scene() {
        let (controller, engine) = setup();
        assert_eq!(controller.active_scene(), SceneKey::Game);
        // Opening batch plus the housekeeping baseline
        assert_eq!(controller.state().pool.live_balloons(), 51);
        assert_eq!(engine.world().bodies().len(), 51);
        assert_eq!(engine.stage().images(), vec!["park"]);
        assert_eq!(engine.stage().texts(), vec!["Hits: 0"]);
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let mut config = GameConfig::default();
        config.balloons.scale_pct_min = 90;
        config.balloons.scale_pct_max = 10;
        assert!(matches!(
            SceneController::new(config, 1),
            Err(ConfigError::Range { field: "balloons.scale_pct", .. })
        ));
    }

    #[test]
    fn test_create_fails_without_assets() {
        let config = GameConfig::default();
        let mut engine = HeadlessEngine::new(&config);
        let mut controller = SceneController::new(config, 1).unwrap();
        assert!(matches!(
            controller.create(&mut engine),
            Err(EngineError::MissingAsset(_))
        ));
    }

    #[test]
    fn test_update_binds_only_new_bodies() {
        let (mut controller, mut engine) = setup();
        for _ in 0..3 {
            engine.step(FRAME_DT);
            controller.update(&mut engine).unwrap();
        }
        assert_eq!(engine.world().bodies().len(), 54);
        assert!(engine.world().bodies().iter().all(|b| b.on_click.is_some()));
    }

    #[test]
    fn test_click_bursts_balloon_and_updates_score() {
        let (mut controller, mut engine) = setup();
        let target = engine.world().bodies()[0].clone();

        let command = engine.click_at(target.pos).unwrap();
        controller.push_command(command);
        controller.update(&mut engine).unwrap();

        assert_eq!(controller.state().score, 5);
        assert!(!engine.body(command_id(command)).unwrap().visible);
        assert_eq!(engine.stage().texts(), vec!["Hits: 5"]);
    }

    #[test]
    fn test_second_ball_hit_switches_to_game_over() {
        let (mut controller, mut engine) = setup();
        let ids: Vec<_> = controller
            .state()
            .pool
            .balloons()
            .iter()
            .take(11)
            .map(|b| b.id)
            .collect();
        for id in ids {
            controller.push_command(Command::BurstBalloon(id));
        }
        let outcome = controller.update(&mut engine).unwrap();
        assert_eq!(controller.state().score, 55);
        let ball = outcome.spawned_ball.unwrap();
        assert_eq!(engine.body(ball).unwrap().texture, "ball");

        controller.push_command(Command::HitBall(ball));
        controller.update(&mut engine).unwrap();
        assert_eq!(controller.active_scene(), SceneKey::Game);

        controller.push_command(Command::HitBall(ball));
        let outcome = controller.update(&mut engine).unwrap();
        assert!(outcome.entered_game_over);
        assert_eq!(controller.state().phase, GamePhase::GameOver);
        assert_eq!(controller.active_scene(), SceneKey::GameOver);
        assert_eq!(engine.stage().images(), vec!["sky"]);
        assert_eq!(engine.stage().texts(), vec!["Game Over!", "You scored: 55"]);
        assert!(engine.world().bodies().is_empty());
        assert_eq!(engine.scene_switches(), 1);
    }

    #[test]
    fn test_game_over_scene_is_inert() {
        let (mut controller, mut engine) = setup();
        let ball = controller.state.spawn_ball().unwrap();
        controller.push_command(Command::HitBall(ball));
        controller.push_command(Command::HitBall(ball));
        controller.update(&mut engine).unwrap();
        assert_eq!(controller.active_scene(), SceneKey::GameOver);

        controller.push_command(Command::HitBall(ball));
        let outcome = controller.update(&mut engine).unwrap();
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(controller.state().hit_count, 2);
        assert_eq!(engine.scene_switches(), 1);
        assert_eq!(engine.stage().texts(), vec!["Game Over!", "You scored: 0"]);
    }

    fn command_id(command: Command) -> EntityId {
        match command {
            Command::BurstBalloon(id) | Command::HitBall(id) => id,
        }
    }
}
