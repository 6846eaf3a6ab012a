//! Simulation tick
//!
//! One call per frame: apply input, then advance the round clock, the ducks
//! and the eggs, resolve hits on the player and compact the egg list.

use glam::Vec2;

use super::duck::{DuckContext, DuckState};
use super::round::advance_round;
use super::state::{GameEvent, GamePhase, GameState};
use crate::clamp_to_playfield;
use crate::consts::*;

/// Input commands for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Crosshair position (from mouse/touch), clamped to the playfield
    pub cursor: Option<Vec2>,
    /// Trigger pulled (click/tap/space/enter)
    pub fire: bool,
    /// Pause toggle
    pub pause: bool,
    /// Abandon the run
    pub quit: bool,
}

impl TickInput {
    /// Clear one-shot inputs after they have been processed
    pub fn clear_one_shots(&mut self) {
        self.fire = false;
        self.pause = false;
        self.quit = false;
    }
}

/// Advance the game state by `dt` seconds
pub fn tick(state: &mut GameState, input: &TickInput, dt: f32) {
    if let Some(cursor) = input.cursor {
        state.cursor = clamp_to_playfield(cursor);
    }

    if input.quit && matches!(state.phase, GamePhase::Playing | GamePhase::Paused) {
        state.end_game();
        return;
    }

    if input.pause {
        match state.phase {
            GamePhase::Playing => {
                state.pause();
                return;
            }
            GamePhase::Paused => state.resume(),
            _ => {}
        }
    }

    if input.fire {
        match state.phase {
            GamePhase::Title | GamePhase::GameOver => state.start_game(),
            GamePhase::Playing => {
                try_shoot(state);
            }
            GamePhase::Paused => {}
        }
    }

    if state.phase == GamePhase::Playing {
        update_playing(state, dt);
    }
}

/// Pull the trigger at the crosshair.
///
/// Returns false when the shot was refused (not playing, or still cooling
/// down). Every flying duck under the crosshair is hit.
pub fn try_shoot(state: &mut GameState) -> bool {
    if state.phase != GamePhase::Playing || state.shot_cooldown > 0.0 {
        return false;
    }
    state.shot_cooldown = SHOT_COOLDOWN;

    let aim = state.cursor;
    let hits: Vec<(u32, Vec2)> = state
        .ducks
        .iter_mut()
        .filter(|duck| duck.hit_test(aim))
        .filter_map(|duck| duck.on_player_shot().then_some((duck.id, duck.pos)))
        .collect();

    if hits.is_empty() {
        let in_grass = aim.y > GROUND_Y - GRASS_BAND;
        state.events.push(GameEvent::ShotMissed { pos: aim, in_grass });
    }
    for (id, pos) in hits {
        log::debug!("Duck {} shot at ({:.0}, {:.0})", id, pos.x, pos.y);
        state.on_duck_shot(id, pos);
    }
    true
}

/// One step of active play. No-op unless playing.
pub fn update_playing(state: &mut GameState, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }

    state.time += dt;
    state.shot_cooldown = (state.shot_cooldown - dt).max(0.0);

    // Escalation: the round moves on whether or not anything was shot
    state.escalation_timer += dt;
    if state.escalation_timer > ESCALATION_PERIOD {
        log::info!("Escalation timer expired in round {}", state.round);
        advance_round(state);
    }

    // Ducks
    let mut resurrected = Vec::new();
    {
        let mut ctx = DuckContext {
            cursor: state.cursor,
            rng: &mut state.rng,
            eggs: &mut state.eggs,
            events: &mut state.events,
        };
        for duck in &mut state.ducks {
            if duck.update(dt, &mut ctx) == Some(DuckState::Resurrect) {
                resurrected.push((duck.id, duck.pos - Vec2::new(0.0, duck.size)));
            }
        }
    }
    for (id, pos) in resurrected {
        state.on_duck_resurrect(id, pos);
    }

    // Eggs
    for egg in &mut state.eggs {
        egg.update(dt);
    }

    // Eggs vs crosshair
    let cursor = state.cursor;
    for i in 0..state.eggs.len() {
        let egg = &mut state.eggs[i];
        if !egg.alive || !egg.collides_with_point(cursor, PLAYER_HIT_RADIUS) {
            continue;
        }
        egg.alive = false;
        state.on_player_hit(cursor);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    state.eggs.retain(|egg| egg.alive);
}
