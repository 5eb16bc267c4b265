//! Piggy Jump entry point
//!
//! Platform-specific initialization and the animation-frame loop. All game
//! rules live in `piggy_jump::sim`; this file wires browser input, the DOM
//! HUD, audio, and persistence to the simulation's events.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent};

    use piggy_jump::audio::AudioManager;
    use piggy_jump::consts::*;
    use piggy_jump::persistence::{self, WebStore};
    use piggy_jump::sim::{
        GameEvent, GameMode, GameState, SimConfig, Sound, TickInput, TutorialKind, tick,
    };
    use piggy_jump::{HighScores, SoundSettings};

    /// Game instance holding all state
    struct Game {
        state: GameState,
        input: TickInput,
        audio: AudioManager,
        settings: SoundSettings,
        records: HighScores,
        store: WebStore,
        /// Music starts on the first user gesture, once
        music_started: bool,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            let store = WebStore;
            let flags = persistence::load_tutorial_flags(&store);
            let records = HighScores::load(&store);
            let settings = SoundSettings::load();

            let config = SimConfig {
                fall_limit: viewport_fall_limit(),
                ..SimConfig::default()
            };

            Self {
                state: GameState::new(seed, config, flags),
                input: TickInput::default(),
                audio: AudioManager::new(settings),
                settings,
                records,
                store,
                music_started: false,
            }
        }

        /// The context only unlocks after a gesture, so the background
        /// track waits for the first key or button press.
        fn start_music_once(&mut self) {
            self.audio.resume();
            if !self.music_started {
                self.music_started = true;
                self.audio.play(Sound::BgMusic);
            }
        }

        /// Run one simulation tick and carry out its side effects
        fn update(&mut self) {
            self.input.now_ms = js_sys::Date::now();
            let input = self.input.clone();
            tick(&mut self.state, &input);

            // Clear one-shot inputs after processing
            self.input.dismiss_overlay = false;
            self.input.restart = false;

            self.handle_events();
        }

        fn handle_events(&mut self) {
            for event in self.state.drain_events() {
                match event {
                    GameEvent::PlaySound(sound) => self.audio.play(sound),
                    GameEvent::StopSound(sound) => self.audio.stop(sound),
                    GameEvent::ShowTutorial(kind) => show_tutorial_overlay(kind),
                    GameEvent::MarkTutorialSeen(kind) => {
                        persistence::mark_tutorial_seen(&mut self.store, kind);
                    }
                    GameEvent::BackgroundChanged { day } => set_background(day),
                    GameEvent::CountdownTick(value) => set_countdown_text(value),
                    GameEvent::RunEnded { score, time_secs } => {
                        let (best_score, best_time) =
                            self.records.record_run(&mut self.store, score, time_secs);
                        if best_score || best_time {
                            log::info!("new record: score {score}, time {time_secs:.2}s");
                        }
                    }
                }
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(
                &document,
                "hud-time",
                &format!("Time: {:.2} s", self.state.elapsed_secs()),
            );
            set_text(
                &document,
                "hud-score",
                &format!("Score: {}", self.state.score),
            );
            set_text(
                &document,
                "hud-best-time",
                &format!("Best: {:.2} s", self.records.best_time_secs),
            );
            set_text(
                &document,
                "hud-best-score",
                &format!("Best: {}", self.records.best_score),
            );

            set_visible(
                &document,
                "tutorial-overlay",
                self.state.mode == GameMode::Paused,
            );
            set_visible(
                &document,
                "countdown",
                self.state.mode == GameMode::Countdown,
            );
            let game_over = self.state.mode == GameMode::GameOver;
            set_visible(&document, "game-over", game_over);
            if game_over {
                set_text(
                    &document,
                    "final-score",
                    &self.state.score.to_string(),
                );
                set_text(
                    &document,
                    "final-time",
                    &format!("{:.2} s", self.state.elapsed_secs()),
                );
            }
        }
    }

    /// The fall limit scales with the viewport, matching what the camera
    /// can see.
    fn viewport_fall_limit() -> f32 {
        web_sys::window()
            .and_then(|w| w.inner_height().ok())
            .and_then(|h| h.as_f64())
            .map(|h| -(h as f32) / 20.0)
            .unwrap_or(DEFAULT_FALL_LIMIT)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = document.get_element_by_id(id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(document: &Document, id: &str, visible: bool) {
        if let Some(el) = document.get_element_by_id(id) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    fn show_tutorial_overlay(kind: TutorialKind) {
        let Some(document) = web_sys::window().and_then(|w| w.document()) else {
            return;
        };
        let class = match kind {
            TutorialKind::SuperJump => "tutorial super-jump",
            TutorialKind::MovingPlatform => "tutorial moving-platform",
            TutorialKind::ProjectileShield => "tutorial projectile-shield",
        };
        if let Some(el) = document.get_element_by_id("tutorial-overlay") {
            let _ = el.set_attribute("data-tutorial", class);
            let _ = el.set_attribute("class", "");
        }
    }

    fn set_countdown_text(value: u8) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            set_text(&document, "countdown", &value.to_string());
        }
    }

    fn set_background(day: bool) {
        if let Some(document) = web_sys::window().and_then(|w| w.document()) {
            if let Some(body) = document.body() {
                let _ = body.set_attribute("class", if day { "day" } else { "night" });
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Piggy Jump starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        // Hide loading indicator
        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_buttons(game.clone());

        request_animation_frame(game);

        log::info!("Piggy Jump running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Held keys: set on keydown, cleared on keyup
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                g.start_music_once();
                match event.key().as_str() {
                    "a" | "A" | "ArrowLeft" => g.input.left = true,
                    "d" | "D" | "ArrowRight" => g.input.right = true,
                    "w" | "W" | "ArrowUp" | " " => g.input.jump = true,
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "a" | "A" | "ArrowLeft" => g.input.left = false,
                    "d" | "D" | "ArrowRight" => g.input.right = false,
                    "w" | "W" | "ArrowUp" | " " => g.input.jump = false,
                    _ => {}
                }
            });
            let _ =
                window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Tutorial continue button kicks off the countdown
        if let Some(btn) = document.get_element_by_id("continue-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.start_music_once();
                g.input.dismiss_overlay = true;
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Mute toggle persists and retunes the mixer in place
        if let Some(btn) = document.get_element_by_id("mute-btn") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.settings.muted = !g.settings.muted;
                g.settings.save();
                let settings = g.settings;
                g.audio.set_settings(settings);
                log::info!("muted: {}", g.settings.muted);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let mut g = game.borrow_mut();
                g.start_music_once();
                g.input.restart = true;
                log::info!("Restart requested");
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |_time: f64| {
            game_loop(game);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.update();
            g.update_hud();
        }

        request_animation_frame(game);
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

/// Headless smoke run: a scripted player that jumps whenever possible,
/// drifting side to side. Useful for eyeballing the difficulty curves from
/// the log output.
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use piggy_jump::sim::{GameEvent, GameMode, GameState, SimConfig, TickInput, TutorialFlags, tick};

    env_logger::init();
    log::info!("Piggy Jump (native) smoke run starting...");

    let seed = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0);

    let flags = TutorialFlags {
        super_jump: true,
        moving_platform: true,
        projectile_shield: true,
    };
    let mut state = GameState::new(seed, SimConfig::default(), flags);

    let tick_ms = 1000.0 / f64::from(piggy_jump::consts::TICK_HZ);
    let mut sounds = 0u32;

    for frame in 0..(60 * 60) {
        let input = TickInput {
            jump: true,
            left: (frame / 120) % 2 == 0,
            right: (frame / 120) % 2 == 1,
            now_ms: f64::from(frame) * tick_ms,
            ..TickInput::default()
        };
        tick(&mut state, &input);

        for event in state.drain_events() {
            if let GameEvent::PlaySound(_) = event {
                sounds += 1;
            }
        }

        if state.mode == GameMode::GameOver {
            break;
        }
    }

    log::info!(
        "smoke run done: seed {seed}, score {}, time {:.2}s, {} sounds, {} platforms",
        state.score,
        state.elapsed_secs(),
        sounds,
        state.platforms.len()
    );
}
