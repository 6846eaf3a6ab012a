//! Rounds and difficulty tiers
//!
//! A round is a fresh roster of ducks drawn from a tier of the difficulty
//! table. Rounds past the end of the table reuse the last tier.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::duck::Duck;
use super::state::{GameEvent, GameState};
use crate::consts::*;

/// Difficulty settings for one round
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DifficultyTier {
    /// Ducks spawned at round start
    pub ducks: u32,
    /// Egg speed in units/sec
    pub egg_speed: f32,
    /// Seconds between eggs while a duck attacks
    pub fire_rate: f32,
    /// Probability that each spawned duck is elite
    #[serde(default)]
    pub elite_chance: f32,
}

/// Errors loading a difficulty table
#[derive(Debug, Error)]
pub enum TableError {
    #[error("difficulty table has no tiers")]
    Empty,
    #[error("tier {index}: {field} must be positive")]
    NonPositive { index: usize, field: &'static str },
    #[error("invalid difficulty table JSON: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Ordered difficulty tiers, indexed by 1-based round number
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(transparent)]
pub struct RoundTable {
    tiers: Vec<DifficultyTier>,
}

impl Default for RoundTable {
    fn default() -> Self {
        let tier = |ducks, egg_speed, fire_rate, elite_chance| DifficultyTier {
            ducks,
            egg_speed,
            fire_rate,
            elite_chance,
        };
        Self {
            tiers: vec![
                tier(2, 70.0, 0.9, 0.0),
                tier(3, 80.0, 0.8, 0.05),
                tier(4, 95.0, 0.7, 0.07),
                tier(5, 110.0, 0.55, 0.1),
                tier(6, 130.0, 0.45, 0.12),
                tier(6, 140.0, 0.4, 0.15),
            ],
        }
    }
}

impl RoundTable {
    /// Build a table, rejecting empty tables and non-positive speeds/rates
    pub fn new(tiers: Vec<DifficultyTier>) -> Result<Self, TableError> {
        if tiers.is_empty() {
            return Err(TableError::Empty);
        }
        for (index, tier) in tiers.iter().enumerate() {
            if tier.egg_speed.is_nan() || tier.egg_speed <= 0.0 {
                return Err(TableError::NonPositive { index, field: "egg_speed" });
            }
            if tier.fire_rate.is_nan() || tier.fire_rate <= 0.0 {
                return Err(TableError::NonPositive { index, field: "fire_rate" });
            }
        }
        Ok(Self { tiers })
    }

    /// Parse a JSON array of tiers
    pub fn from_json(json: &str) -> Result<Self, TableError> {
        let tiers: Vec<DifficultyTier> = serde_json::from_str(json)?;
        Self::new(tiers)
    }

    /// Tier for a 1-based round. Round 0 maps to the first tier, rounds past
    /// the end clamp to the last.
    pub fn tier(&self, round: u32) -> &DifficultyTier {
        let index = (round.max(1) as usize - 1).min(self.tiers.len() - 1);
        &self.tiers[index]
    }

    pub fn len(&self) -> usize {
        self.tiers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiers.is_empty()
    }

    pub fn tiers(&self) -> &[DifficultyTier] {
        &self.tiers
    }
}

/// Start the next round: bump the counter, reset escalation, rebuild the roster
pub fn advance_round(state: &mut GameState) {
    state.round += 1;
    state.escalation_timer = 0.0;
    state.ducks.clear();

    let tier = *state.table.tier(state.round);
    for _ in 0..tier.ducks {
        let pos = Vec2::new(
            state.rng.range(SPAWN_MIN_X, SPAWN_MAX_X),
            state.rng.range(SPAWN_MIN_Y, SPAWN_MAX_Y),
        );
        let elite = state.rng.chance(tier.elite_chance);
        let id = state.next_entity_id();
        let mut duck = Duck::new(id, pos, elite, &mut state.rng);
        duck.apply_difficulty(&tier, state.round, &mut state.rng);
        state.ducks.push(duck);
    }

    log::info!(
        "Round {}: {} ducks, egg speed {}, fire rate {}s",
        state.round,
        tier.ducks,
        tier.egg_speed,
        tier.fire_rate
    );
    state.events.push(GameEvent::RoundStarted { round: state.round });
}
