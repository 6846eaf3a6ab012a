//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must stay free of rendering and
//! platform dependencies:
//! - Seeded RNG only (`GameRng`)
//! - Stable iteration order (roster order, then egg order)
//! - Side effects leave only as `GameEvent`s

pub mod collision;
pub mod duck;
pub mod egg;
pub mod rng;
pub mod round;
pub mod state;
pub mod tick;

pub use collision::{point_in_box, point_in_circle};
pub use duck::{Duck, DuckContext, DuckState, SignTaunt, TauntStyle, TAUNT_TEXTS};
pub use egg::Egg;
pub use rng::GameRng;
pub use round::{DifficultyTier, RoundTable, TableError, advance_round};
pub use state::{GameEvent, GamePhase, GameState, MusicMode};
pub use tick::{TickInput, tick, try_shoot, update_playing};
