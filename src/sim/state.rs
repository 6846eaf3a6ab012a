//! Session state and simulation events
//!
//! `GameState` owns the roster, the eggs, the score and the phase machine.
//! Everything the outside world should hear about goes into `events`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::duck::{Duck, TAUNT_TEXTS, TauntStyle};
use super::egg::Egg;
use super::rng::GameRng;
use super::round::{RoundTable, advance_round};
use crate::consts::*;

/// Top-level phase of the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title screen, waiting for the first trigger pull
    Title,
    /// Active gameplay
    Playing,
    /// Game is paused
    Paused,
    /// Out of lives
    GameOver,
}

/// Background music mood
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MusicMode {
    /// Cheerful loop until the first duck gets back up
    Calm,
    /// Minor-key loop for the rest of the run
    Tense,
}

/// Something that happened during a tick
#[derive(Debug, Clone, PartialEq)]
pub enum GameEvent {
    GameStarted,
    Paused,
    Resumed,
    GameOver { score: i64, round: u32 },
    RoundStarted { round: u32 },
    /// A flying duck was hit (+points)
    DuckShot { id: u32, pos: Vec2 },
    /// A duck got back up (-points), mocking the player as it does
    DuckResurrected {
        id: u32,
        pos: Vec2,
        bubble: &'static str,
    },
    MusicShift(MusicMode),
    Taunt {
        id: u32,
        pos: Vec2,
        style: TauntStyle,
        bubble: &'static str,
    },
    EggFired { id: u32, pos: Vec2 },
    /// An egg reached the crosshair
    PlayerHit { pos: Vec2, lives: u8 },
    /// Trigger pulled with nothing under the crosshair
    ShotMissed { pos: Vec2, in_grass: bool },
}

/// Complete session state
#[derive(Debug, Clone)]
pub struct GameState {
    pub phase: GamePhase,
    /// Can go negative
    pub score: i64,
    pub lives: u8,
    /// 1-based once a game is running, 0 on the title screen
    pub round: u32,
    /// Seconds since the round started
    pub escalation_timer: f32,
    /// Crosshair position in playfield units
    pub cursor: Vec2,
    /// Seconds until the player may fire again
    pub shot_cooldown: f32,
    /// Set by the first resurrection of a run; gates the music shift
    pub first_resurrection_done: bool,
    /// Seconds of active play (animation clock)
    pub time: f32,
    pub ducks: Vec<Duck>,
    pub eggs: Vec<Egg>,
    /// Events produced since the last drain
    pub events: Vec<GameEvent>,
    pub table: RoundTable,
    pub rng: GameRng,
    next_id: u32,
}

impl GameState {
    /// Title-screen state using the default difficulty table
    pub fn new(seed: u64) -> Self {
        Self::with_table(seed, RoundTable::default())
    }

    pub fn with_table(seed: u64, table: RoundTable) -> Self {
        Self {
            phase: GamePhase::Title,
            score: 0,
            lives: INITIAL_LIVES,
            round: 0,
            escalation_timer: 0.0,
            cursor: Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0),
            shot_cooldown: 0.0,
            first_resurrection_done: false,
            time: 0.0,
            ducks: Vec::new(),
            eggs: Vec::new(),
            events: Vec::new(),
            table,
            rng: GameRng::new(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Take all pending events
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Start (or restart) a run from round 1
    pub fn start_game(&mut self) {
        self.phase = GamePhase::Playing;
        self.score = 0;
        self.lives = INITIAL_LIVES;
        self.round = 0;
        self.shot_cooldown = 0.0;
        self.first_resurrection_done = false;
        self.eggs.clear();
        self.events.push(GameEvent::GameStarted);
        log::info!("Game started (seed {})", self.rng.seed());
        advance_round(self);
    }

    pub fn pause(&mut self) {
        if self.phase == GamePhase::Playing {
            self.phase = GamePhase::Paused;
            self.events.push(GameEvent::Paused);
        }
    }

    pub fn resume(&mut self) {
        if self.phase == GamePhase::Paused {
            self.phase = GamePhase::Playing;
            self.events.push(GameEvent::Resumed);
        }
    }

    pub fn end_game(&mut self) {
        if self.phase == GamePhase::GameOver {
            return;
        }
        self.phase = GamePhase::GameOver;
        log::info!("Game over: score {} at round {}", self.score, self.round);
        self.events.push(GameEvent::GameOver {
            score: self.score,
            round: self.round,
        });
    }

    pub(crate) fn on_duck_shot(&mut self, id: u32, pos: Vec2) {
        self.score += POINTS_SHOT;
        self.events.push(GameEvent::DuckShot { id, pos });
    }

    pub(crate) fn on_duck_resurrect(&mut self, id: u32, pos: Vec2) {
        self.score -= POINTS_RESURRECT_PENALTY;
        if !self.first_resurrection_done {
            self.first_resurrection_done = true;
            log::debug!("First resurrection, music turns tense");
            self.events.push(GameEvent::MusicShift(MusicMode::Tense));
        }
        let bubble = self.rng.pick(&TAUNT_TEXTS).copied().unwrap_or(TAUNT_TEXTS[0]);
        self.events.push(GameEvent::DuckResurrected { id, pos, bubble });
    }

    pub(crate) fn on_player_hit(&mut self, pos: Vec2) {
        self.lives = self.lives.saturating_sub(1);
        self.events.push(GameEvent::PlayerHit {
            pos,
            lives: self.lives,
        });
        if self.lives == 0 {
            self.end_game();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_is_title() {
        let state = GameState::new(1);
        assert_eq!(state.phase, GamePhase::Title);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.round, 0);
        assert!(state.ducks.is_empty());
    }

    #[test]
    fn test_start_game_resets_run() {
        let mut state = GameState::new(1);
        state.score = -4500;
        state.lives = 0;
        state.round = 5;
        state.first_resurrection_done = true;
        state.eggs.push(Egg::new(Vec2::ZERO, Vec2::ONE, 10.0));
        state.phase = GamePhase::GameOver;

        state.start_game();
        assert_eq!(state.phase, GamePhase::Playing);
        assert_eq!(state.score, 0);
        assert_eq!(state.lives, INITIAL_LIVES);
        assert_eq!(state.round, 1);
        assert!(!state.first_resurrection_done);
        assert!(state.eggs.is_empty());
        assert_eq!(state.ducks.len(), 2);
        let events = state.drain_events();
        assert_eq!(events[0], GameEvent::GameStarted);
        assert_eq!(events[1], GameEvent::RoundStarted { round: 1 });
    }

    #[test]
    fn test_pause_only_from_playing() {
        let mut state = GameState::new(1);
        state.pause();
        assert_eq!(state.phase, GamePhase::Title);
        state.start_game();
        state.pause();
        assert_eq!(state.phase, GamePhase::Paused);
        state.resume();
        assert_eq!(state.phase, GamePhase::Playing);
    }

    #[test]
    fn test_resurrection_penalty_and_single_music_shift() {
        let mut state = GameState::new(1);
        state.on_duck_resurrect(1, Vec2::ZERO);
        state.on_duck_resurrect(2, Vec2::ZERO);
        assert_eq!(state.score, -2 * POINTS_RESURRECT_PENALTY);
        let shifts = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::MusicShift(MusicMode::Tense)))
            .count();
        assert_eq!(shifts, 1);
    }

    #[test]
    fn test_player_hit_floor_and_game_over() {
        let mut state = GameState::new(1);
        state.start_game();
        state.lives = 1;
        state.on_player_hit(Vec2::ZERO);
        assert_eq!(state.lives, 0);
        assert_eq!(state.phase, GamePhase::GameOver);
        state.on_player_hit(Vec2::ZERO);
        assert_eq!(state.lives, 0);
        let overs = state
            .drain_events()
            .iter()
            .filter(|e| matches!(e, GameEvent::GameOver { .. }))
            .count();
        assert_eq!(overs, 1);
    }
}
