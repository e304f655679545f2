//! Fixed timestep simulation tick
//!
//! One tick per rendered frame, no interpolation. Order within a tick:
//! pad movement, rule resolution, rule application, population top-up,
//! frog updates, miss accounting.

use rand::Rng;

use super::collision::Aabb;
use super::state::{Forces, Frog, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::rules::{LevelRule, RuleSet};

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Steer the pad left
    pub left: bool,
    /// Steer the pad right
    pub right: bool,
    /// Pause toggle
    pub pause: bool,
}

impl TickInput {
    /// Input-driven horizontal pad delta for this tick
    pub fn pad_delta(&self) -> f32 {
        let mut dx = 0.0;
        if self.right {
            dx += PAD_SPEED;
        }
        if self.left {
            dx -= PAD_SPEED;
        }
        dx
    }
}

/// Wind drift on the pad: steady base plus a slow sinusoidal gust
pub fn wind_drift(forces: &Forces, elapsed_secs: f32) -> f32 {
    forces.wind_base + forces.wind_amplitude * (elapsed_secs * WIND_GUST_FREQUENCY).sin()
}

/// Handle pause toggling; returns true if the simulation should advance
pub fn handle_pause(state: &mut GameState, input: &TickInput) -> bool {
    if input.pause {
        match state.phase {
            GamePhase::Playing => state.phase = GamePhase::Paused,
            GamePhase::Paused => state.phase = GamePhase::Playing,
            GamePhase::GameOver => {}
        }
    }
    state.phase == GamePhase::Playing
}

/// Move the pad by input plus wind, clamped to the arena
pub fn move_pad(state: &mut GameState, input: &TickInput) {
    let drift = wind_drift(&state.forces, state.elapsed_secs());
    state.pad.shift(input.pad_delta() + drift);
}

/// Resolve the score against `rules`; reports a level change if the index moved
pub fn resolve_level(
    state: &mut GameState,
    rules: &RuleSet,
    events: &mut Vec<GameEvent>,
) -> (bool, LevelRule) {
    let (index, rule) = rules.resolve(state.score);
    if index == state.level_index {
        return (false, rule);
    }
    log::info!(
        "Level {} -> {} at score {}",
        state.level_index,
        index,
        state.score
    );
    events.push(GameEvent::LevelChanged {
        from: state.level_index,
        to: index,
    });
    state.level_index = index;
    (true, rule)
}

/// Adopt a rule's forces, pad scale and speed range
pub fn apply_rule(state: &mut GameState, rule: &LevelRule) {
    state.forces = Forces {
        current: rule.current,
        wind_base: rule.wind_gust,
        wind_amplitude: rule.wind_gust * WIND_AMPLITUDE_RATIO,
    };
    state.pad.set_scale(rule.pad_scale);
    for frog in &mut state.frogs {
        frog.speed = rule.speed;
    }
}

/// Spawn frogs until the rule's count is met; extra frogs are never removed
pub fn populate(state: &mut GameState, rule: &LevelRule) {
    while state.frogs.len() < rule.frog_count {
        state.spawn_frog(rule.speed);
    }
}

/// Advance one frog; returns true if it was caught by the pad
pub fn step_frog<R: Rng>(frog: &mut Frog, pad: &Aabb, current: f32, rng: &mut R) -> bool {
    frog.vel.x = (frog.vel.x + current).clamp(-FROG_MAX_VX, FROG_MAX_VX);
    frog.pos += frog.vel;

    // Walls: send the frog back into the arena
    if frog.pos.x <= 0.0 {
        frog.vel.x = frog.vel.x.abs();
    } else if frog.pos.x + frog.size.x >= ARENA_WIDTH {
        frog.vel.x = -frog.vel.x.abs();
    }

    // Ceiling
    if frog.pos.y <= 0.0 {
        frog.vel.y = frog.vel.y.abs();
    }

    if frog.vel.y > 0.0 && frog.bounds().overlaps(pad) {
        let (min, max) = frog.speed.bounce_bounds();
        frog.vel.y = -(rng.random_range(min..=max) as f32);
        return true;
    }
    false
}

/// Advance every frog; returns true if any ended up in the water
pub fn step_frogs(state: &mut GameState, events: &mut Vec<GameEvent>) -> bool {
    let pad = state.pad.bounds();
    let current = state.forces.current;
    for frog in &mut state.frogs {
        if step_frog(frog, &pad, current, &mut state.rng) {
            events.push(GameEvent::Caught { frog_id: frog.id });
        }
    }
    state.frogs.iter().any(Frog::in_water)
}

/// Score the tick, or charge a life and reset every frog on a miss
pub fn settle(state: &mut GameState, missed: bool, events: &mut Vec<GameEvent>) {
    if !missed {
        state.score += 1;
        return;
    }

    state.lives = state.lives.saturating_sub(1);
    for frog in &mut state.frogs {
        frog.reset(&mut state.rng);
    }
    events.push(GameEvent::Missed {
        lives_left: state.lives,
    });

    if state.lives == 0 {
        state.phase = GamePhase::GameOver;
        log::info!("Game over with score {}", state.score);
        events.push(GameEvent::GameOver { score: state.score });
    }
}

/// Set up a fresh session against the first applicable rule
pub fn start_session(state: &mut GameState, rules: &RuleSet) {
    let (index, rule) = rules.resolve(state.score);
    state.level_index = index;
    apply_rule(state, &rule);
    populate(state, &rule);
    state.phase = GamePhase::Playing;
}

/// First half of a tick: pause handling, pad movement, rule resolution
///
/// Returns `None` if the simulation doesn't advance this tick, otherwise
/// whether the level changed and the rule to finish the tick with.
pub fn begin_tick(
    state: &mut GameState,
    rules: &RuleSet,
    input: &TickInput,
    events: &mut Vec<GameEvent>,
) -> Option<(bool, LevelRule)> {
    if !handle_pause(state, input) {
        return None;
    }
    state.time_ticks += 1;
    move_pad(state, input);
    Some(resolve_level(state, rules, events))
}

/// Second half of a tick: adopt a changed rule, top up frogs, move them, score
pub fn finish_tick(
    state: &mut GameState,
    changed: bool,
    rule: &LevelRule,
    events: &mut Vec<GameEvent>,
) {
    if changed {
        apply_rule(state, rule);
    }
    populate(state, rule);

    let missed = step_frogs(state, events);
    settle(state, missed, events);
}

/// Advance the game state by one tick against a fixed rule set
///
/// Skin-agnostic; [`crate::Game`] runs the same two halves with a skin
/// auto-cycle in between.
pub fn tick(state: &mut GameState, rules: &RuleSet, input: &TickInput) -> Vec<GameEvent> {
    let mut events = Vec::new();
    if let Some((changed, rule)) = begin_tick(state, rules, input, &mut events) {
        finish_tick(state, changed, &rule, &mut events);
    }
    events
}
