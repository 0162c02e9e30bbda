//! Rule invariants over random click/tick sequences

use balloon_pop::GameConfig;
use balloon_pop::sim::{Command, GamePhase, GameState, TickInput, tick};
use proptest::prelude::*;

#[derive(Debug, Clone)]
enum Action {
    /// Click the n-th live balloon (modulo the live count)
    Burst(usize),
    /// Click the n-th ball
    Hit(usize),
    /// Click an id that was never spawned
    Stray(u32),
    Tick,
}

fn action() -> impl Strategy<Value = Action> {
    prop_oneof![
        6 => any::<usize>().prop_map(Action::Burst),
        1 => any::<usize>().prop_map(Action::Hit),
        1 => (1_000_000u32..2_000_000).prop_map(Action::Stray),
        4 => Just(Action::Tick),
    ]
}

fn new_session(seed: u64) -> GameState {
    let config = GameConfig::default();
    let mut state = GameState::new(config.clone(), seed).unwrap();
    state.manage_balloons(config.balloons.initial_count);
    state
}

fn command_for(state: &GameState, action: &Action) -> Option<Command> {
    match *action {
        Action::Burst(n) => {
            let balloons = state.pool.balloons();
            (!balloons.is_empty()).then(|| Command::BurstBalloon(balloons[n % balloons.len()].id))
        }
        Action::Hit(n) => {
            let balls = state.pool.balls();
            (!balls.is_empty()).then(|| Command::HitBall(balls[n % balls.len()].id))
        }
        Action::Stray(id) => Some(Command::BurstBalloon(id)),
        Action::Tick => None,
    }
}

proptest! {
    #[test]
    fn rules_hold_for_any_sequence(seed in any::<u64>(), actions in prop::collection::vec(action(), 1..200)) {
        let mut state = new_session(seed);
        let mut pending = Vec::new();

        for action in &actions {
            if let Some(command) = command_for(&state, action) {
                pending.push(command);
                continue;
            }

            let score = state.score;
            let hits = state.hit_count;
            let was_over = state.is_game_over();
            let balloons = state.pool.live_balloons();
            let balls = state.pool.ball_count();

            let input = TickInput { commands: std::mem::take(&mut pending) };
            let outcome = tick(&mut state, &input);

            prop_assert!(state.score >= score);
            prop_assert!(state.hit_count >= hits);
            prop_assert_eq!(state.is_game_over(), state.hit_count > 1);
            if was_over {
                prop_assert_eq!(state.phase, GamePhase::GameOver);
                prop_assert_eq!(state.score, score);
                prop_assert_eq!(state.hit_count, hits);
                prop_assert_eq!(state.pool.live_balloons(), balloons);
                prop_assert_eq!(state.pool.ball_count(), balls);
                prop_assert!(!outcome.entered_game_over);
            }
            if outcome.spawned_ball.is_some() {
                prop_assert!(state.score > 50);
            }
            prop_assert_eq!(
                (state.score - score) as usize,
                outcome.burst.len() * 5
            );
        }
    }

    #[test]
    fn spawn_balloons_adds_exactly_n(seed in any::<u64>(), counts in prop::collection::vec(0u32..64, 1..10)) {
        let mut state = GameState::new(GameConfig::default(), seed).unwrap();
        for n in counts {
            let before = state.pool.live_balloons();
            state.pool.spawn_balloons(n);
            prop_assert_eq!(state.pool.live_balloons(), before + n as usize);
        }
    }
}

#[test]
fn final_score_matches_score_at_transition() {
    let mut state = new_session(77);
    let targets: Vec<_> = state.pool.balloons().iter().take(11).map(|b| b.id).collect();
    let commands = targets.into_iter().map(Command::BurstBalloon).collect();
    let ball = tick(&mut state, &TickInput { commands }).spawned_ball.unwrap();

    tick(&mut state, &TickInput { commands: vec![Command::HitBall(ball)] });
    assert_eq!(state.phase, GamePhase::Playing);

    let outcome = tick(&mut state, &TickInput { commands: vec![Command::HitBall(ball)] });
    assert!(outcome.entered_game_over);
    assert_eq!(state.final_score_label(), "You scored: 55");
}
