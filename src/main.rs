//! Balloon Pop entry point
//!
//! Web: runs the game on the page canvas. Native: plays one headless
//! autoplay session and prints a summary.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{HtmlCanvasElement, PointerEvent};

    use balloon_pop::consts::FRAME_DT;
    use balloon_pop::web::CanvasEngine;
    use balloon_pop::{EngineError, GameConfig, SceneController};

    /// Game instance holding all state
    struct Game {
        controller: SceneController,
        engine: CanvasEngine,
        last_time: f64,
    }

    impl Game {
        /// Physics, game logic, draw
        fn frame(&mut self, time: f64) -> Result<(), EngineError> {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                FRAME_DT
            };
            self.last_time = time;

            self.engine.step(dt.min(0.1));
            self.controller.update(&mut self.engine)?;
            self.engine.render()
        }
    }

    pub async fn run() -> Result<(), EngineError> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| EngineError::Backend(e.to_string()))?;

        log::info!("Balloon Pop starting...");

        let document = web_sys::window()
            .and_then(|w| w.document())
            .ok_or_else(|| EngineError::Backend("no document".into()))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| EngineError::Backend("no #canvas element".into()))?
            .dyn_into()
            .map_err(|_| EngineError::Backend("#canvas is not a canvas".into()))?;

        let config = GameConfig::load();
        let mut engine = CanvasEngine::new(canvas.clone(), &config)?;
        engine.load_assets(SceneController::assets()).await?;

        let seed = js_sys::Date::now() as u64;
        let mut controller = SceneController::new(config, seed)
            .map_err(|e| EngineError::Backend(e.to_string()))?;
        controller.create(&mut engine)?;

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let game = Rc::new(RefCell::new(Game {
            controller,
            engine,
            last_time: 0.0,
        }));

        setup_input_handlers(&canvas, game.clone());
        request_animation_frame(game);

        log::info!("Balloon Pop running!");
        Ok(())
    }

    /// Clicks and taps both arrive as pointer events
    fn setup_input_handlers(canvas: &HtmlCanvasElement, game: Rc<RefCell<Game>>) {
        let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
            event.prevent_default();
            let mut g = game.borrow_mut();
            let hit = g
                .engine
                .click_at_client(event.client_x() as f64, event.client_y() as f64);
            if let Some(command) = hit {
                g.controller.push_command(command);
            }
        });
        let _ = canvas
            .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        let result = game.borrow_mut().frame(time);
        match result {
            Ok(()) => request_animation_frame(game),
            Err(e) => log::error!("Game loop stopped: {}", e),
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Balloon Pop failed to start: {}", e);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod autoplay {
    use glam::Vec2;
    use serde::Serialize;

    use balloon_pop::consts::FRAME_DT;
    use balloon_pop::sim::GamePhase;
    use balloon_pop::{EngineError, GameConfig, HeadlessEngine, SceneController, SceneKey};

    /// Give up after two minutes of game time
    const MAX_FRAMES: u32 = 120 * 60;
    /// Frames between balloon clicks
    const BALLOON_CLICK_EVERY: u32 = 6;
    /// Frames between (accidental) ball clicks once balls are out
    const BALL_CLICK_EVERY: u32 = 45;

    #[derive(Debug, Serialize)]
    pub struct SessionSummary {
        pub seed: u64,
        pub frames: u32,
        pub score: u32,
        pub hit_count: u32,
        pub phase: GamePhase,
        pub balloons_burst: u32,
        pub balls_spawned: usize,
    }

    fn on_screen(config: &GameConfig, pos: Vec2) -> bool {
        (0.0..config.width).contains(&pos.x) && (0.0..config.height).contains(&pos.y)
    }

    /// Play until game over (or the frame limit), clicking like a careless player
    pub fn play(seed: u64) -> Result<SessionSummary, EngineError> {
        let config = GameConfig::load();
        let mut engine = HeadlessEngine::new(&config);
        engine.load_assets(SceneController::assets());

        let mut controller = SceneController::new(config.clone(), seed)
            .map_err(|e| EngineError::Backend(e.to_string()))?;
        controller.create(&mut engine)?;

        let mut frames = 0;
        while frames < MAX_FRAMES && controller.active_scene() == SceneKey::Game {
            frames += 1;
            engine.step(FRAME_DT);

            let texture = if frames % BALL_CLICK_EVERY == 0 {
                Some("ball")
            } else if frames % BALLOON_CLICK_EVERY == 0 {
                Some("balloon")
            } else {
                None
            };
            let target = texture.and_then(|texture| {
                engine
                    .world()
                    .bodies()
                    .iter()
                    .find(|b| b.enabled && b.texture == texture && on_screen(&config, b.pos))
                    .map(|b| b.pos)
            });
            if let Some(command) = target.and_then(|pos| engine.click_at(pos)) {
                controller.push_command(command);
            }

            controller.update(&mut engine)?;
        }

        let state = controller.state();
        Ok(SessionSummary {
            seed,
            frames,
            score: state.score,
            hit_count: state.hit_count,
            phase: state.phase,
            balloons_burst: state.pool.destroyed_balloons(),
            balls_spawned: state.pool.ball_count(),
        })
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Balloon Pop (native) starting headless autoplay...");

    let seed: u64 = rand::random();
    match autoplay::play(seed) {
        Ok(summary) => match serde_json::to_string_pretty(&summary) {
            Ok(json) => println!("{}", json),
            Err(e) => log::error!("Failed to encode summary: {}", e),
        },
        Err(e) => {
            log::error!("Session failed: {}", e);
            std::process::exit(1);
        }
    }
}
