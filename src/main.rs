//! Duck Reckoning entry point
//!
//! On the web this wires the canvas, input, audio and the DOM HUD to the
//! frame driver. Natively it runs a headless autopilot demo.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, MouseEvent, TouchEvent};

    use duck_reckoning::audio::WebAudio;
    use duck_reckoning::consts::*;
    use duck_reckoning::render::CanvasSurface;
    use duck_reckoning::sim::GamePhase;
    use duck_reckoning::{Game, Settings};

    /// Everything the browser callbacks share
    struct App {
        game: Game,
        audio: WebAudio,
        surface: CanvasSurface,
        canvas: HtmlCanvasElement,
        document: Document,
    }

    impl App {
        /// Map a client-space point onto the playfield
        fn to_playfield(&self, client_x: f64, client_y: f64) -> Option<Vec2> {
            let rect = self.canvas.get_bounding_client_rect();
            if rect.width() <= 0.0 || rect.height() <= 0.0 {
                return None;
            }
            let x = (client_x - rect.left()) / rect.width() * PLAYFIELD_WIDTH as f64;
            let y = (client_y - rect.top()) / rect.height() * PLAYFIELD_HEIGHT as f64;
            Some(Vec2::new(x as f32, y as f32))
        }

        fn aim(&mut self, client_x: f64, client_y: f64) {
            if let Some(pos) = self.to_playfield(client_x, client_y) {
                self.game.input.cursor = Some(pos);
            }
        }

        fn fire(&mut self) {
            self.game.input.fire = true;
            // First gesture unlocks audio
            self.audio.resume();
        }

        fn toggle_mute(&mut self) {
            self.game.settings.muted = !self.game.settings.muted;
            self.game.settings.save();
            self.audio.apply_settings(&self.game.settings);
            log::info!("Muted: {}", self.game.settings.muted);
        }

        fn auto_pause(&mut self, reason: &str) {
            if self.game.settings.auto_pause && self.game.state.phase == GamePhase::Playing {
                self.game.input.pause = true;
                log::info!("Auto-paused ({})", reason);
            }
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.document.get_element_by_id(id) {
                let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let state = &self.game.state;
            self.set_text("round", &format!("R={}", state.round));
            self.set_text("score", &format!("SCORE {}", state.score));
            let hearts = "❤".repeat(state.lives as usize)
                + &" ".repeat(INITIAL_LIVES.saturating_sub(state.lives) as usize);
            self.set_text("lives", &hearts);

            self.set_visible("fps", self.game.settings.show_fps);
            if self.game.settings.show_fps {
                self.set_text("fps", &format!("{} FPS", self.game.fps()));
            }

            self.set_visible("title", state.phase == GamePhase::Title);
            self.set_visible("paused", state.phase == GamePhase::Paused);
            self.set_visible("gameover", state.phase == GamePhase::GameOver);
            if state.phase == GamePhase::GameOver {
                self.set_text("final-score", &state.score.to_string());
                self.set_text("final-round", &state.round.to_string());
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Duck Reckoning starting...");

        let Some(window) = web_sys::window() else {
            log::error!("No window");
            return;
        };
        let Some(document) = window.document() else {
            log::error!("No document");
            return;
        };

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let Some(canvas) = document
            .get_element_by_id("canvas")
            .and_then(|el| el.dyn_into::<HtmlCanvasElement>().ok())
        else {
            log::error!("No #canvas element");
            return;
        };

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let Some(ctx) = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .and_then(|ctx| ctx.dyn_into::<CanvasRenderingContext2d>().ok())
        else {
            log::error!("Canvas 2D context unavailable");
            return;
        };

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let audio = WebAudio::new(&settings);
        let app = Rc::new(RefCell::new(App {
            game: Game::new(settings, seed),
            audio,
            surface: CanvasSurface::new(ctx, width, height),
            canvas: canvas.clone(),
            document: document.clone(),
        }));

        setup_input_handlers(&canvas, app.clone());
        setup_auto_pause(app.clone());
        setup_resize(app.clone());

        if let Some(hud) = document.get_element_by_id("hud") {
            let _ = hud.set_attribute("class", "");
        }

        // Start game loop
        request_animation_frame(app);

        log::info!("Duck Reckoning running!");
    }

    fn setup_input_handlers(canvas: &HtmlCanvasElement, app: Rc<RefCell<App>>) {
        // Mouse move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                app.borrow_mut()
                    .aim(event.client_x() as f64, event.client_y() as f64);
            });
            let _ = canvas
                .add_event_listener_with_callback("mousemove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mouse down - aim and fire
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                let mut a = app.borrow_mut();
                a.aim(event.client_x() as f64, event.client_y() as f64);
                a.fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch move
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some(touch) = event.touches().get(0) {
                    app.borrow_mut()
                        .aim(touch.client_x() as f64, touch.client_y() as f64);
                }
            });
            let _ = canvas
                .add_event_listener_with_callback("touchmove", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Touch start - a tap is a shot where the finger lands
        {
            let app = app.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut a = app.borrow_mut();
                if let Some(touch) = event.touches().get(0) {
                    a.aim(touch.client_x() as f64, touch.client_y() as f64);
                }
                a.fire();
            });
            let _ = canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyboard
        {
            let Some(window) = web_sys::window() else {
                return;
            };
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut a = app.borrow_mut();
                match event.key().as_str() {
                    " " | "Enter" => a.fire(),
                    "p" | "P" => a.game.input.pause = true,
                    "Escape" => a.game.input.quit = true,
                    "m" | "M" => a.toggle_mute(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(document) = window.document() else {
            return;
        };

        // Visibility change (tab switch, minimize)
        {
            let app = app.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let mut a = app.borrow_mut();
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    a.auto_pause("tab hidden");
                } else {
                    // Do not count the hidden time as one long frame
                    a.game.reset_clock();
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                app.borrow_mut().auto_pause("window blur");
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let Some(window) = web_sys::window() else {
                return;
            };
            let mut a = app.borrow_mut();
            let dpr = window.device_pixel_ratio();
            let width = (a.canvas.client_width() as f64 * dpr) as u32;
            let height = (a.canvas.client_height() as f64 * dpr) as u32;
            a.canvas.set_width(width);
            a.canvas.set_height(height);
            a.surface.resize(width, height);
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(app: Rc<RefCell<App>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(app, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(app: Rc<RefCell<App>>, time: f64) {
        {
            let mut guard = app.borrow_mut();
            let a = &mut *guard;
            a.game.frame(time, &mut a.audio, &mut a.surface);
            a.update_hud();
        }

        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::fs;
    use std::path::Path;
    use std::path::PathBuf;

    use anyhow::{Context, Result};
    use clap::Parser;
    use glam::Vec2;

    use duck_reckoning::audio::SilentAudio;
    use duck_reckoning::render::DrawList;
    use duck_reckoning::sim::{DuckState, GameEvent, GamePhase, GameState, RoundTable};
    use duck_reckoning::{Game, Settings};

    /// Cursor speed of the autopilot, playfield units/sec
    const AIM_SPEED: f32 = 220.0;

    /// Headless autopilot run of Duck Reckoning
    #[derive(Parser, Debug)]
    #[command(version, about)]
    struct Args {
        /// RNG seed
        #[arg(long, default_value_t = 1)]
        seed: u64,

        /// Seconds of simulated play
        #[arg(long, default_value_t = 60.0)]
        seconds: f32,

        /// Simulated frames per second
        #[arg(long, default_value_t = 60)]
        fps: u32,

        /// Difficulty table JSON (array of tiers)
        #[arg(long)]
        table: Option<PathBuf>,
    }

    #[derive(Debug, Default)]
    struct Tally {
        hits: u32,
        misses: u32,
        resurrections: u32,
        eggs: u32,
        player_hits: u32,
    }

    impl Tally {
        fn record(&mut self, events: &[GameEvent]) {
            for event in events {
                match event {
                    GameEvent::DuckShot { .. } => self.hits += 1,
                    GameEvent::ShotMissed { .. } => self.misses += 1,
                    GameEvent::DuckResurrected { .. } => self.resurrections += 1,
                    GameEvent::EggFired { .. } => self.eggs += 1,
                    GameEvent::PlayerHit { .. } => self.player_hits += 1,
                    _ => {}
                }
            }
        }
    }

    /// Nearest flying duck to the crosshair
    fn pick_target(state: &GameState) -> Option<Vec2> {
        state
            .ducks
            .iter()
            .filter(|d| d.state == DuckState::Fly)
            .map(|d| d.pos)
            .min_by(|a, b| {
                a.distance_squared(state.cursor)
                    .total_cmp(&b.distance_squared(state.cursor))
            })
    }

    fn load_table(path: &Path) -> Result<RoundTable> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("failed reading {}", path.display()))?;
        RoundTable::from_json(&json)
            .with_context(|| format!("invalid difficulty table {}", path.display()))
    }

    pub fn run() -> Result<()> {
        let args = Args::parse();
        let fps = args.fps.max(1);
        let dt = 1.0 / fps as f32;

        let settings = Settings {
            seed: Some(args.seed),
            ..Settings::load()
        };
        let mut game = Game::new(settings, args.seed);
        if let Some(path) = &args.table {
            let table = load_table(path)?;
            log::info!("Loaded {} difficulty tiers", table.len());
            game.state = GameState::with_table(args.seed, table);
        }

        let mut audio = SilentAudio::default();
        let mut surface = DrawList::new();
        let mut tally = Tally::default();

        let frames = (args.seconds.max(0.0) * fps as f32).ceil() as u64;
        for frame in 0..frames {
            let state = &game.state;
            match state.phase {
                GamePhase::Title => game.input.fire = true,
                GamePhase::GameOver => {
                    log::info!("Autopilot out of lives after {:.1}s", frame as f32 * dt);
                    break;
                }
                GamePhase::Playing | GamePhase::Paused => {
                    if let Some(target) = pick_target(state) {
                        let to_target = target - state.cursor;
                        let step = AIM_SPEED * dt;
                        let cursor = if to_target.length() <= step {
                            target
                        } else {
                            state.cursor + to_target.normalize() * step
                        };
                        game.input.cursor = Some(cursor);
                        game.input.fire = state.shot_cooldown <= 0.0
                            && cursor.distance(target) < 3.0;
                    }
                }
            }

            let now_ms = frame as f64 * 1000.0 / fps as f64;
            let events = game.frame(now_ms, &mut audio, &mut surface);
            tally.record(&events);
        }

        let state = &game.state;
        log::info!(
            "Finished: score {} round {} lives {} phase {:?}",
            state.score,
            state.round,
            state.lives,
            state.phase
        );
        log::info!(
            "Shots: {} hits, {} misses; {} resurrections; {} eggs thrown, {} landed",
            tally.hits,
            tally.misses,
            tally.resurrections,
            tally.eggs,
            tally.player_hits
        );
        log::info!(
            "{} cues played, last frame {} draw commands",
            audio.cues_played,
            surface.len()
        );
        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;
        use duck_reckoning::sim::TableError;

        #[test]
        fn test_load_table_missing_file_keeps_source() {
            let path = std::env::temp_dir().join("duck_reckoning_no_such_table.json");
            let err = load_table(&path).unwrap_err();
            assert!(format!("{err}").contains("failed reading"));
            assert!(err.downcast_ref::<std::io::Error>().is_some());
        }

        #[test]
        fn test_load_table_rejects_bad_json() {
            let path = std::env::temp_dir().join("duck_reckoning_bad_table.json");
            fs::write(&path, "[]").unwrap();
            let err = load_table(&path).unwrap_err();
            let _ = fs::remove_file(&path);
            assert!(format!("{err:#}").contains("no tiers"));
            assert!(matches!(
                err.downcast_ref::<TableError>(),
                Some(TableError::Empty)
            ));
        }

        #[test]
        fn test_load_table_reads_tiers() {
            let path = std::env::temp_dir().join("duck_reckoning_good_table.json");
            fs::write(
                &path,
                r#"[{"ducks": 2, "egg_speed": 60.0, "fire_rate": 1.0}]"#,
            )
            .unwrap();
            let table = load_table(&path).unwrap();
            let _ = fs::remove_file(&path);
            assert_eq!(table.len(), 1);
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() -> std::process::ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Duck Reckoning (native) starting headless autopilot...");
    match headless::run() {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(e) => {
            log::error!("Headless run failed: {:#}", e);
            std::process::ExitCode::FAILURE
        }
    }
}
