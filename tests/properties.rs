//! Property tests for the simulation core

use glam::Vec2;
use proptest::prelude::*;

use duck_reckoning::FrameClock;
use duck_reckoning::consts::*;
use duck_reckoning::sim::{
    Duck, DuckState, Egg, GamePhase, GameRng, GameState, TickInput, advance_round, tick,
};

fn any_state() -> impl Strategy<Value = DuckState> {
    prop_oneof![
        Just(DuckState::Fly),
        Just(DuckState::Shot),
        Just(DuckState::Ground),
        Just(DuckState::Resurrect),
        Just(DuckState::Taunt),
        Just(DuckState::Attack),
        Just(DuckState::Escape),
    ]
}

fn point() -> impl Strategy<Value = Vec2> {
    (-50.0f32..300.0, -50.0f32..300.0).prop_map(|(x, y)| Vec2::new(x, y))
}

fn input() -> impl Strategy<Value = TickInput> {
    (
        proptest::option::of(point()),
        proptest::bool::weighted(0.2),
        proptest::bool::weighted(0.01),
    )
        .prop_map(|(cursor, fire, pause)| TickInput {
            cursor,
            fire,
            pause,
            quit: false,
        })
}

proptest! {
    #[test]
    fn only_flying_ducks_can_be_hit(state in any_state(), offset in point(), seed in any::<u64>()) {
        let mut rng = GameRng::new(seed);
        let mut duck = Duck::new(1, Vec2::new(120.0, 90.0), false, &mut rng);
        duck.state = state;
        let aim = duck.pos + (offset - Vec2::splat(125.0)) * 0.05;
        if state != DuckState::Fly {
            prop_assert!(!duck.hit_test(aim));
            prop_assert!(!duck.on_player_shot());
            prop_assert_eq!(duck.state, state);
        }
    }

    #[test]
    fn egg_speed_matches_request(origin in point(), aim in point(), speed in 1.0f32..400.0) {
        let egg = Egg::new(origin, aim, speed);
        prop_assert!((egg.speed() - speed).abs() < speed * 1e-4);
        prop_assert!(egg.alive);
    }

    #[test]
    fn rounds_advance_monotonically(seed in any::<u64>(), rounds in 1u32..15) {
        let mut state = GameState::new(seed);
        let mut last_ids: Vec<u32> = Vec::new();
        for expected in 1..=rounds {
            state.escalation_timer = 7.5;
            advance_round(&mut state);
            prop_assert_eq!(state.round, expected);
            prop_assert_eq!(state.escalation_timer, 0.0);
            let tier = *state.table.tier(expected);
            prop_assert_eq!(state.ducks.len(), tier.ducks as usize);
            prop_assert!(state.ducks.iter().all(|d| d.state == DuckState::Fly));
            prop_assert!(state.ducks.iter().all(|d| !last_ids.contains(&d.id)));
            last_ids = state.ducks.iter().map(|d| d.id).collect();
        }
    }

    #[test]
    fn rng_range_stays_in_bounds(seed in any::<u64>(), min in -100.0f32..100.0, width in 0.0f32..50.0) {
        let mut rng = GameRng::new(seed);
        let max = min + width;
        for _ in 0..32 {
            let v = rng.range(min, max);
            if max <= min {
                prop_assert_eq!(v, min);
            } else {
                prop_assert!(v >= min && v < max);
            }
        }
    }

    #[test]
    fn frame_clock_deltas_are_clamped(stamps in proptest::collection::vec(0.0f64..1.0e7, 1..40)) {
        let mut clock = FrameClock::default();
        for (i, stamp) in stamps.iter().enumerate() {
            let dt = clock.advance(*stamp);
            if i == 0 {
                prop_assert_eq!(dt, 0.0);
            }
            prop_assert!((0.0..=MAX_FRAME_DT).contains(&dt));
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn session_invariants_hold_under_random_play(
        seed in any::<u64>(),
        inputs in proptest::collection::vec(input(), 200..600),
    ) {
        let mut state = GameState::new(seed);
        state.start_game();
        let dt = 1.0 / 60.0;
        let mut last_lives = state.lives;
        for input in &inputs {
            let round = state.round;
            tick(&mut state, input, dt);

            prop_assert!(state.lives <= INITIAL_LIVES);
            prop_assert_eq!(state.score % 500, 0);
            prop_assert!(state.cursor.x >= 0.0 && state.cursor.x <= PLAYFIELD_WIDTH);
            prop_assert!(state.cursor.y >= 0.0 && state.cursor.y <= PLAYFIELD_HEIGHT);
            prop_assert!(state.eggs.iter().all(|e| e.alive));
            prop_assert_eq!(state.phase == GamePhase::GameOver, state.lives == 0);

            // Lives only drop while a run is going; a restart refills them
            if state.round >= round && state.phase != GamePhase::Title {
                prop_assert!(state.lives <= last_lives || state.lives == INITIAL_LIVES);
            }
            last_lives = state.lives;
            state.drain_events();
        }
    }
}
