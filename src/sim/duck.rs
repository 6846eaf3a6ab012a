//! Duck behavior
//!
//! A duck never dies. Shooting one starts the fake-death routine:
//! `Shot -> Ground -> Resurrect -> Taunt -> Attack -> Fly`. A duck left alone
//! in `Fly` for too long escapes offscreen and idles there until the roster
//! is rebuilt at the next round.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::point_in_box;
use super::egg::Egg;
use super::rng::GameRng;
use super::round::DifficultyTier;
use super::state::GameEvent;
use crate::consts::*;

/// Seconds of flight before a duck gives up and escapes
pub const FLY_DURATION: f32 = 8.0;
/// Seconds spent playing dead on the ground
pub const GROUND_DURATION: f32 = 1.1;
/// Seconds spent standing back up
pub const RESURRECT_DURATION: f32 = 0.4;
/// Seconds of taunting before retaliation
pub const TAUNT_DURATION: f32 = 1.0;
/// Seconds of retaliation before rejoining flight
pub const ATTACK_DURATION: f32 = 4.0;
/// How long a held-up sign stays visible
pub const SIGN_DURATION: f32 = 0.9;

/// Downward acceleration while falling after a shot
const SHOT_GRAVITY: f32 = 60.0;
/// Side-to-side sway of the falling-leaf drop
const SHOT_SWAY_FREQ: f32 = 12.0;
const SHOT_SWAY_AMPLITUDE: f32 = 20.0;
/// Per-tick probability of picking a new wander velocity
const WANDER_CHANCE: f32 = 0.01;
const WANDER_SPEED_X: f32 = 40.0;
const WANDER_SPEED_Y: f32 = 20.0;
/// Escape velocity (horizontal follows facing)
const ESCAPE_SPEED_X: f32 = 50.0;
const ESCAPE_SPEED_Y: f32 = 20.0;
/// Dance window inside the taunt, facing flips every DANCE_STEP
const DANCE_START: f32 = 0.12;
const DANCE_END: f32 = 0.8;
const DANCE_STEP: f32 = 0.1;

/// Mocking phrases for signs and taunt bubbles
pub const TAUNT_TEXTS: [&str; 14] = [
    "LOL",
    "U MAD?",
    "NICE AIM",
    ":')",
    "BRUH",
    "TRY AGAIN",
    "PATHETIC",
    "WHIFF",
    "CRY MORE",
    "TOO SLOW",
    "PEW PEW MISS",
    "SKILL ISSUE",
    "GIT GUD",
    "COPE + SEETHE",
];

/// Behavior state of a duck
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DuckState {
    /// Wandering the sky, the only shootable state
    Fly,
    /// Falling after being hit
    Shot,
    /// Playing dead
    Ground,
    /// Getting back up
    Resurrect,
    /// Mocking the player
    Taunt,
    /// Throwing eggs at the crosshair
    Attack,
    /// Flying offscreen for good
    Escape,
}

impl DuckState {
    /// Standing on the ground (feet visible)
    pub fn is_grounded(&self) -> bool {
        matches!(self, DuckState::Ground | DuckState::Resurrect | DuckState::Taunt)
    }
}

/// How a duck taunts after resurrecting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TauntStyle {
    Laugh,
    Sign,
    Dance,
}

/// A sign held up by the duck, cleared by its own timer
#[derive(Debug, Clone, PartialEq)]
pub struct SignTaunt {
    pub text: &'static str,
    pub remaining: f32,
}

/// What a duck may touch while updating
pub struct DuckContext<'a> {
    /// Current crosshair position
    pub cursor: Vec2,
    pub rng: &'a mut GameRng,
    pub eggs: &'a mut Vec<Egg>,
    pub events: &'a mut Vec<GameEvent>,
}

#[derive(Debug, Clone)]
pub struct Duck {
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    /// +1 facing right, -1 facing left
    pub facing: f32,
    pub size: f32,
    /// Elite ducks carry 3 hit points, but shots do not consume them yet
    pub hp: u8,
    pub elite: bool,
    /// Cosmetic only
    pub helmet: bool,
    pub state: DuckState,
    /// Seconds since the last transition
    pub time_in_state: f32,
    /// Seconds between eggs while attacking
    pub fire_rate: f32,
    pub egg_speed: f32,
    pub attack_cooldown: f32,
    pub sign: Option<SignTaunt>,
    pub taunt_style: Option<TauntStyle>,
}

impl Duck {
    pub fn new(id: u32, pos: Vec2, elite: bool, rng: &mut GameRng) -> Self {
        let vel = Vec2::new(rng.range(-20.0, 20.0), rng.range(-10.0, 10.0));
        Self {
            id,
            pos,
            vel,
            facing: if vel.x >= 0.0 { 1.0 } else { -1.0 },
            size: if elite { ELITE_DUCK_SIZE } else { DUCK_SIZE },
            hp: if elite { ELITE_HIT_POINTS } else { 1 },
            elite,
            helmet: false,
            state: DuckState::Fly,
            time_in_state: 0.0,
            fire_rate: 0.8,
            egg_speed: 80.0,
            attack_cooldown: 0.8,
            sign: None,
            taunt_style: None,
        }
    }

    /// Take fire rate and egg speed from the round tier, roll the helmet
    pub fn apply_difficulty(&mut self, tier: &DifficultyTier, round: u32, rng: &mut GameRng) {
        self.fire_rate = tier.fire_rate;
        self.egg_speed = tier.egg_speed;
        self.attack_cooldown = tier.fire_rate;
        self.helmet = round >= HELMET_MIN_ROUND && rng.chance(HELMET_CHANCE);
    }

    /// Crosshair test. Only a flying duck can be hit.
    pub fn hit_test(&self, point: Vec2) -> bool {
        self.state == DuckState::Fly && point_in_box(point, self.pos, self.size)
    }

    /// Start the fake death. Returns false (and does nothing) unless flying.
    pub fn on_player_shot(&mut self) -> bool {
        if self.state != DuckState::Fly {
            return false;
        }
        self.set_state(DuckState::Shot);
        true
    }

    /// Escaped ducks that have left the playfield
    pub fn is_gone(&self) -> bool {
        self.state == DuckState::Escape
            && (self.pos.y < -self.size
                || self.pos.x < -self.size
                || self.pos.x > PLAYFIELD_WIDTH + self.size)
    }

    fn set_state(&mut self, state: DuckState) {
        self.state = state;
        self.time_in_state = 0.0;
    }

    /// Advance one step. Returns the state entered during this step, if any.
    pub fn update(&mut self, dt: f32, ctx: &mut DuckContext) -> Option<DuckState> {
        self.time_in_state += dt;

        if let Some(sign) = self.sign.as_mut() {
            sign.remaining -= dt;
        }
        if self.sign.as_ref().is_some_and(|s| s.remaining <= 0.0) {
            self.sign = None;
        }

        let t = self.time_in_state;
        match self.state {
            DuckState::Fly => {
                self.wander(dt, ctx.rng);
                if t > FLY_DURATION {
                    return self.enter(DuckState::Escape, ctx);
                }
            }
            DuckState::Shot => {
                self.vel.y += SHOT_GRAVITY * dt;
                self.pos.x += (t * SHOT_SWAY_FREQ).sin() * SHOT_SWAY_AMPLITUDE * dt;
                self.pos.y += self.vel.y * dt;
                let rest_y = GROUND_Y - self.size / 2.0;
                if self.pos.y >= rest_y {
                    self.pos.y = rest_y;
                    self.vel = Vec2::ZERO;
                    return self.enter(DuckState::Ground, ctx);
                }
            }
            DuckState::Ground => {
                if t > GROUND_DURATION {
                    return self.enter(DuckState::Resurrect, ctx);
                }
            }
            DuckState::Resurrect => {
                if t > RESURRECT_DURATION {
                    return self.enter(DuckState::Taunt, ctx);
                }
            }
            DuckState::Taunt => {
                if t > DANCE_START && t < DANCE_END {
                    let step = (t / DANCE_STEP) as i32;
                    self.facing = if step % 2 == 0 { 1.0 } else { -1.0 };
                }
                if t > TAUNT_DURATION {
                    return self.enter(DuckState::Attack, ctx);
                }
            }
            DuckState::Attack => {
                self.attack_cooldown -= dt;
                if self.attack_cooldown <= 0.0 {
                    let jitter = Vec2::new(
                        ctx.rng.range(-EGG_AIM_JITTER, EGG_AIM_JITTER),
                        ctx.rng.range(-EGG_AIM_JITTER, EGG_AIM_JITTER),
                    );
                    self.fire_at(ctx.cursor + jitter, ctx);
                    self.attack_cooldown = self.fire_rate;
                }
                if t > ATTACK_DURATION {
                    return self.enter(DuckState::Fly, ctx);
                }
            }
            DuckState::Escape => {
                self.pos += self.vel * dt;
            }
        }
        None
    }

    /// Transition plus entry actions
    fn enter(&mut self, next: DuckState, ctx: &mut DuckContext) -> Option<DuckState> {
        self.set_state(next);
        match next {
            DuckState::Fly => {
                // Rejoin from the ground: always climb
                self.vel = Vec2::new(
                    ctx.rng.range(-WANDER_SPEED_X, WANDER_SPEED_X),
                    -ctx.rng.range(WANDER_SPEED_Y / 2.0, WANDER_SPEED_Y),
                );
                self.facing = if self.vel.x >= 0.0 { 1.0 } else { -1.0 };
            }
            DuckState::Taunt => self.start_taunt(ctx),
            DuckState::Escape => {
                self.vel = Vec2::new(ESCAPE_SPEED_X * self.facing, -ESCAPE_SPEED_Y);
            }
            DuckState::Attack => {
                self.taunt_style = None;
            }
            DuckState::Shot | DuckState::Ground | DuckState::Resurrect => {}
        }
        Some(next)
    }

    fn start_taunt(&mut self, ctx: &mut DuckContext) {
        let roll = ctx.rng.unit();
        let style = if roll < 0.5 {
            TauntStyle::Laugh
        } else if roll < 0.8 {
            TauntStyle::Sign
        } else {
            TauntStyle::Dance
        };
        if style == TauntStyle::Sign {
            let text = ctx.rng.pick(&TAUNT_TEXTS).copied().unwrap_or(TAUNT_TEXTS[0]);
            self.sign = Some(SignTaunt {
                text,
                remaining: SIGN_DURATION,
            });
        }
        self.taunt_style = Some(style);

        let bubble = ctx.rng.pick(&TAUNT_TEXTS).copied().unwrap_or(TAUNT_TEXTS[0]);
        ctx.events.push(GameEvent::Taunt {
            id: self.id,
            pos: self.pos - Vec2::new(0.0, self.size),
            style,
            bubble,
        });
    }

    fn wander(&mut self, dt: f32, rng: &mut GameRng) {
        self.pos += self.vel * dt;
        if self.pos.x < SKY_MIN_X {
            self.vel.x = self.vel.x.abs();
        } else if self.pos.x > SKY_MAX_X {
            self.vel.x = -self.vel.x.abs();
        }
        if self.pos.y < SKY_MIN_Y {
            self.vel.y = self.vel.y.abs();
        } else if self.pos.y > SKY_MAX_Y {
            self.vel.y = -self.vel.y.abs();
        }
        self.facing = if self.vel.x >= 0.0 { 1.0 } else { -1.0 };

        if rng.chance(WANDER_CHANCE) {
            self.vel = Vec2::new(
                rng.range(-WANDER_SPEED_X, WANDER_SPEED_X),
                rng.range(-WANDER_SPEED_Y, WANDER_SPEED_Y),
            );
        }
    }

    fn fire_at(&self, target: Vec2, ctx: &mut DuckContext) {
        ctx.eggs.push(Egg::new(self.pos, target, self.egg_speed));
        ctx.events.push(GameEvent::EggFired { id: self.id, pos: self.pos });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Harness {
        rng: GameRng,
        eggs: Vec<Egg>,
        events: Vec<GameEvent>,
        cursor: Vec2,
    }

    impl Harness {
        fn new() -> Self {
            Self {
                rng: GameRng::new(42),
                eggs: Vec::new(),
                events: Vec::new(),
                cursor: Vec2::new(128.0, 120.0),
            }
        }

        fn step(&mut self, duck: &mut Duck, dt: f32) -> Option<DuckState> {
            let mut ctx = DuckContext {
                cursor: self.cursor,
                rng: &mut self.rng,
                eggs: &mut self.eggs,
                events: &mut self.events,
            };
            duck.update(dt, &mut ctx)
        }

        /// Step until the duck leaves `state` (or give up after `max_secs`)
        fn run_until_leaves(&mut self, duck: &mut Duck, state: DuckState, max_secs: f32) -> f32 {
            let dt = 1.0 / 60.0;
            let mut elapsed = 0.0;
            while duck.state == state && elapsed < max_secs {
                self.step(duck, dt);
                elapsed += dt;
            }
            elapsed
        }
    }

    fn flying_duck(rng: &mut GameRng) -> Duck {
        Duck::new(1, Vec2::new(100.0, 80.0), false, rng)
    }

    #[test]
    fn test_hit_test_only_while_flying() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        assert!(duck.hit_test(duck.pos));
        assert!(!duck.hit_test(duck.pos + Vec2::new(7.0, 0.0)));

        for state in [
            DuckState::Shot,
            DuckState::Ground,
            DuckState::Resurrect,
            DuckState::Taunt,
            DuckState::Attack,
            DuckState::Escape,
        ] {
            duck.state = state;
            assert!(!duck.hit_test(duck.pos), "{state:?} should not be hittable");
        }
    }

    #[test]
    fn test_on_player_shot_only_from_fly() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.time_in_state = 3.0;
        assert!(duck.on_player_shot());
        assert_eq!(duck.state, DuckState::Shot);
        assert_eq!(duck.time_in_state, 0.0);
        // Second shot on a falling duck is ignored
        assert!(!duck.on_player_shot());
        assert_eq!(duck.state, DuckState::Shot);
        assert_eq!(duck.hp, 1);
    }

    #[test]
    fn test_fake_death_cycle_order() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.on_player_shot();

        let mut entered = Vec::new();
        let dt = 1.0 / 60.0;
        for _ in 0..(60 * 12) {
            if let Some(state) = h.step(&mut duck, dt) {
                entered.push(state);
            }
            if duck.state == DuckState::Fly {
                break;
            }
        }
        assert_eq!(
            entered,
            vec![
                DuckState::Ground,
                DuckState::Resurrect,
                DuckState::Taunt,
                DuckState::Attack,
                DuckState::Fly,
            ]
        );
    }

    #[test]
    fn test_shot_falls_to_ground_line() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.on_player_shot();
        h.run_until_leaves(&mut duck, DuckState::Shot, 10.0);
        assert_eq!(duck.state, DuckState::Ground);
        assert_eq!(duck.pos.y, GROUND_Y - duck.size / 2.0);
    }

    #[test]
    fn test_phase_durations() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.on_player_shot();
        h.run_until_leaves(&mut duck, DuckState::Shot, 10.0);

        let ground = h.run_until_leaves(&mut duck, DuckState::Ground, 5.0);
        assert!(ground > GROUND_DURATION && ground < GROUND_DURATION + 0.05);
        let resurrect = h.run_until_leaves(&mut duck, DuckState::Resurrect, 5.0);
        assert!(resurrect > RESURRECT_DURATION && resurrect < RESURRECT_DURATION + 0.05);
        let taunt = h.run_until_leaves(&mut duck, DuckState::Taunt, 5.0);
        assert!(taunt > TAUNT_DURATION && taunt < TAUNT_DURATION + 0.05);
        let attack = h.run_until_leaves(&mut duck, DuckState::Attack, 10.0);
        assert!(attack > ATTACK_DURATION && attack < ATTACK_DURATION + 0.05);
        assert_eq!(duck.state, DuckState::Fly);
    }

    #[test]
    fn test_taunt_entry_runs_once() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.state = DuckState::Resurrect;
        duck.time_in_state = RESURRECT_DURATION;

        // Many tiny steps through the taunt
        for _ in 0..200 {
            h.step(&mut duck, 0.004);
        }
        let taunts = h
            .events
            .iter()
            .filter(|e| matches!(e, GameEvent::Taunt { .. }))
            .count();
        assert_eq!(taunts, 1);
    }

    #[test]
    fn test_taunt_style_odds_and_sign() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        let mut counts = [0u32; 3];

        for _ in 0..600 {
            duck.sign = None;
            duck.taunt_style = None;
            duck.state = DuckState::Resurrect;
            duck.time_in_state = RESURRECT_DURATION;
            h.events.clear();

            assert_eq!(h.step(&mut duck, 0.001), Some(DuckState::Taunt));
            let style = duck.taunt_style.expect("taunt picks a style");
            assert_eq!(style == TauntStyle::Sign, duck.sign.is_some());
            if let Some(sign) = &duck.sign {
                assert_eq!(sign.remaining, SIGN_DURATION);
                assert!(TAUNT_TEXTS.contains(&sign.text));
            }
            assert!(matches!(
                h.events.as_slice(),
                [GameEvent::Taunt { style: s, .. }] if *s == style
            ));

            let slot = match style {
                TauntStyle::Laugh => 0,
                TauntStyle::Sign => 1,
                TauntStyle::Dance => 2,
            };
            counts[slot] += 1;
        }

        // 0.5 / 0.3 / 0.2 of 600 is 300 / 180 / 120
        assert!((240..=360).contains(&counts[0]), "laugh {counts:?}");
        assert!((130..=230).contains(&counts[1]), "sign {counts:?}");
        assert!((80..=160).contains(&counts[2]), "dance {counts:?}");
    }

    #[test]
    fn test_sign_expires() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.sign = Some(SignTaunt {
            text: "LOL",
            remaining: SIGN_DURATION,
        });
        duck.state = DuckState::Ground;
        h.step(&mut duck, 0.5);
        assert!(duck.sign.is_some());
        h.step(&mut duck, 0.5);
        assert!(duck.sign.is_none());
    }

    #[test]
    fn test_attack_fires_on_cooldown() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.state = DuckState::Attack;
        duck.fire_rate = 0.5;
        duck.attack_cooldown = 0.5;
        duck.egg_speed = 100.0;

        // 0.125s steps through 2.0s: shots at 0.5, 1.0, 1.5, 2.0
        for _ in 0..16 {
            h.step(&mut duck, 0.125);
        }
        assert_eq!(h.eggs.len(), 4);
        for egg in &h.eggs {
            assert!((egg.speed() - 100.0).abs() < 1e-3);
            assert_eq!(egg.pos, duck.pos);
        }
    }

    #[test]
    fn test_attack_aims_near_cursor() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        duck.state = DuckState::Attack;
        duck.attack_cooldown = 0.0;
        h.cursor = duck.pos + Vec2::new(100.0, 0.0);
        h.step(&mut duck, 0.01);
        let egg = &h.eggs[0];
        // Jitter is at most 8 units on a 100 unit throw
        assert!(egg.vel.x > 0.0);
        assert!((egg.vel.y / egg.vel.x).abs() < 0.1);
    }

    #[test]
    fn test_fly_escapes_after_timeout() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        let elapsed = h.run_until_leaves(&mut duck, DuckState::Fly, 20.0);
        assert_eq!(duck.state, DuckState::Escape);
        assert!(elapsed > FLY_DURATION);
        assert_eq!(duck.vel.y, -ESCAPE_SPEED_Y);
        assert_eq!(duck.vel.x, ESCAPE_SPEED_X * duck.facing);

        // Escape is terminal and drifts offscreen
        for _ in 0..60 * 20 {
            assert_eq!(h.step(&mut duck, 1.0 / 60.0), None);
        }
        assert_eq!(duck.state, DuckState::Escape);
        assert!(duck.is_gone());
        assert!(!duck.hit_test(duck.pos));
    }

    #[test]
    fn test_fly_stays_in_sky() {
        let mut h = Harness::new();
        let mut duck = flying_duck(&mut h.rng);
        for _ in 0..(60 * 7) {
            h.step(&mut duck, 1.0 / 60.0);
            assert!(duck.pos.x > SKY_MIN_X - 2.0 && duck.pos.x < SKY_MAX_X + 2.0);
            assert!(duck.pos.y > SKY_MIN_Y - 2.0 && duck.pos.y < SKY_MAX_Y + 2.0);
        }
    }

    #[test]
    fn test_elite_keeps_hit_points() {
        let mut rng = GameRng::new(9);
        let mut duck = Duck::new(3, Vec2::new(60.0, 60.0), true, &mut rng);
        assert_eq!(duck.size, ELITE_DUCK_SIZE);
        assert_eq!(duck.hp, ELITE_HIT_POINTS);
        assert!(duck.on_player_shot());
        assert_eq!(duck.hp, ELITE_HIT_POINTS);
    }

    #[test]
    fn test_apply_difficulty_helmet_gate() {
        let tier = DifficultyTier {
            ducks: 1,
            egg_speed: 95.0,
            fire_rate: 0.7,
            elite_chance: 0.0,
        };
        let mut rng = GameRng::new(5);
        let mut duck = Duck::new(1, Vec2::new(60.0, 60.0), false, &mut rng);
        for _ in 0..50 {
            duck.apply_difficulty(&tier, 2, &mut rng);
            assert!(!duck.helmet);
        }
        assert_eq!(duck.fire_rate, 0.7);
        assert_eq!(duck.egg_speed, 95.0);
        assert_eq!(duck.attack_cooldown, 0.7);

        let helmets = (0..200)
            .filter(|_| {
                duck.apply_difficulty(&tier, 3, &mut rng);
                duck.helmet
            })
            .count();
        assert!(helmets > 0 && helmets < 200);
    }
}
