//! Per-frame rule evaluation
//!
//! One call per rendered frame. Clicks delivered since the previous frame are
//! applied first, then the phase is checked, then spawning runs.

use serde::Serialize;

use super::state::{Command, EntityId, GameEvent, GameState};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Clicks in arrival order
    pub commands: Vec<Command>,
}

/// What a tick did, for the scene layer to mirror onto the engine
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TickOutcome {
    pub events: Vec<GameEvent>,
    /// Balloons burst by this tick's commands
    pub burst: Vec<EntityId>,
    pub spawned_balloons: Vec<EntityId>,
    pub spawned_ball: Option<EntityId>,
    /// True only on the tick that first observes GameOver
    pub entered_game_over: bool,
    /// Score board text, absent once the game is over
    pub score_label: Option<String>,
}

/// Advance the rules by one frame
pub fn tick(state: &mut GameState, input: &TickInput) -> TickOutcome {
    let mut outcome = TickOutcome::default();

    for &command in &input.commands {
        let events = state.apply(command);
        for event in &events {
            if let GameEvent::BalloonBurst { id, .. } = *event {
                outcome.burst.push(id);
            }
        }
        outcome.events.extend(events);
    }

    if state.is_game_over() {
        if !state.game_over_reported {
            state.game_over_reported = true;
            outcome.entered_game_over = true;
        }
        return outcome;
    }

    state.time_ticks += 1;

    // Housekeeping pass: baseline balloon for this frame
    outcome.spawned_balloons = state.manage_balloons(0);

    if state.balls_unlocked() {
        outcome.spawned_ball = state.spawn_ball();
    }

    outcome.score_label = Some(state.score_label());
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GameConfig;
    use crate::sim::GamePhase;

    fn new_state() -> GameState {
        let mut state = GameState::new(GameConfig::default(), 12345).unwrap();
        state.manage_balloons(GameConfig::default().balloons.initial_count);
        state.pool.take_fresh();
        state
    }

    fn clicks(commands: Vec<Command>) -> TickInput {
        TickInput { commands }
    }

    #[test]
    fn test_tick_spawns_one_balloon() {
        let mut state = new_state();
        let before = state.pool.live_balloons();

        let outcome = tick(&mut state, &TickInput::default());
        assert_eq!(outcome.spawned_balloons.len(), 1);
        assert_eq!(outcome.spawned_ball, None);
        assert_eq!(state.pool.live_balloons(), before + 1);
        assert_eq!(outcome.score_label.as_deref(), Some("Hits: 0"));
    }

    #[test]
    fn test_eleven_bursts_unlock_balls() {
        let mut state = new_state();
        let ids: Vec<_> = state.pool.balloons().iter().take(11).map(|b| b.id).collect();

        let commands = ids.iter().map(|id| Command::BurstBalloon(*id)).collect();
        let outcome = tick(&mut state, &clicks(commands));

        assert_eq!(state.score, 55);
        assert_eq!(outcome.burst, ids);
        assert!(outcome.spawned_ball.is_some());
        assert_eq!(state.pool.ball_count(), 1);
        assert_eq!(outcome.score_label.as_deref(), Some("Hits: 55"));
    }

    #[test]
    fn test_no_balls_at_threshold() {
        let mut state = new_state();
        let ids: Vec<_> = state.pool.balloons().iter().take(10).map(|b| b.id).collect();
        let commands = ids.iter().map(|id| Command::BurstBalloon(*id)).collect();

        tick(&mut state, &clicks(commands));
        for _ in 0..20 {
            tick(&mut state, &TickInput::default());
        }
        assert_eq!(state.score, 50);
        assert_eq!(state.pool.ball_count(), 0);
    }

    #[test]
    fn test_second_ball_hit_ends_game_on_same_tick() {
        let mut state = new_state();
        state.score = 55;
        let ball = tick(&mut state, &TickInput::default()).spawned_ball.unwrap();

        let outcome = tick(&mut state, &clicks(vec![Command::HitBall(ball)]));
        assert_eq!(state.phase, GamePhase::Playing);
        assert!(!outcome.entered_game_over);

        let outcome = tick(&mut state, &clicks(vec![Command::HitBall(ball)]));
        assert_eq!(state.phase, GamePhase::GameOver);
        assert!(outcome.entered_game_over);
        assert!(outcome.events.contains(&GameEvent::GameOver { final_score: 55 }));
        assert!(outcome.spawned_balloons.is_empty());
        assert_eq!(outcome.spawned_ball, None);
        assert_eq!(outcome.score_label, None);
    }

    #[test]
    fn test_game_over_is_reported_once_and_freezes() {
        let mut state = new_state();
        let ball = state.spawn_ball().unwrap();
        tick(&mut state, &clicks(vec![Command::HitBall(ball), Command::HitBall(ball)]));
        assert!(state.is_game_over());

        let balloons = state.pool.live_balloons();
        let balls = state.pool.ball_count();
        let ticks = state.time_ticks;
        let target = state.pool.balloons()[0].id;

        let outcome = tick(
            &mut state,
            &clicks(vec![Command::BurstBalloon(target), Command::HitBall(ball)]),
        );
        assert!(!outcome.entered_game_over);
        assert!(outcome.events.is_empty());
        assert_eq!(state.pool.live_balloons(), balloons);
        assert_eq!(state.pool.ball_count(), balls);
        assert_eq!(state.time_ticks, ticks);
        assert_eq!(state.hit_count, 2);
    }
}
