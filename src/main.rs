//! Dinovox Run entry point
//!
//! The browser build wires DOM events and `requestAnimationFrame` to the
//! session driver and hands a JSON snapshot to the page's renderer each
//! frame. The native build plays one headless autopilot run.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, KeyboardEvent, TouchEvent};

    use dinovox_run::consts::SIM_DT;
    use dinovox_run::highscores::LocalStorageStore;
    use dinovox_run::sim::{GamePhase, Intent};
    use dinovox_run::{Game, InputEvent, Key, Presenter, Settings};

    // Hand the frame to the page's renderer, if it registered one
    #[wasm_bindgen(inline_js = "
        export function render_snapshot(json) {
            const render = window.dinovoxRender;
            if (typeof render === 'function') {
                render(JSON.parse(json));
            }
        }
    ")]
    extern "C" {
        fn render_snapshot(json: &str);
    }

    fn document() -> Option<Document> {
        web_sys::window()?.document()
    }

    fn set_text(selector: &str, text: &str) {
        if let Some(el) = document().and_then(|d| d.query_selector(selector).ok().flatten()) {
            el.set_text_content(Some(text));
        }
    }

    fn set_visible(id: &str, visible: bool) {
        if let Some(el) = document().and_then(|d| d.get_element_by_id(id)) {
            let _ = el.set_attribute("class", if visible { "" } else { "hidden" });
        }
    }

    /// HUD and overlays in the page DOM
    struct DomPresenter;

    impl Presenter for DomPresenter {
        fn on_score_changed(&mut self, score: u64) {
            set_text("#hud-score .hud-value", &score.to_string());
        }

        fn on_game_over(&mut self, final_score: u64) {
            set_text("#final-score", &final_score.to_string());
            set_visible("new-record", false);
        }

        fn on_high_score(&mut self, score: u64) {
            set_text("#hud-high .hud-value", &score.to_string());
            set_visible("new-record", true);
        }
    }

    struct Host {
        game: Game<LocalStorageStore, DomPresenter>,
        last_time: f64,
    }

    impl Host {
        fn update(&mut self, time: f64) {
            let dt = if self.last_time > 0.0 {
                ((time - self.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            self.last_time = time;
            self.game.frame(dt);
        }

        fn render(&self) {
            match serde_json::to_string(&self.game.snapshot()) {
                Ok(json) => render_snapshot(&json),
                Err(e) => log::warn!("Snapshot encode failed: {}", e),
            }
        }

        /// Show/hide overlays for the current phase
        fn update_overlays(&self) {
            let phase = self.game.phase();
            set_visible("start-prompt", phase == GamePhase::Ready);
            set_visible("pause-menu", phase == GamePhase::Paused);
            set_visible("game-over", phase == GamePhase::GameOver);
            set_visible("autopilot-badge", self.game.autopilot());
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        if let Err(e) = console_log::init_with_level(log::Level::Info) {
            web_sys::console::warn_1(&format!("Logger init failed: {}", e).into());
        }

        log::info!("Dinovox Run starting...");

        let Some(document) = document() else {
            log::error!("No document; nothing to attach to");
            return;
        };

        if let Some(loading) = document.get_element_by_id("loading") {
            let _ = loading.set_attribute("class", "hidden");
        }

        let settings = Settings::load();
        let seed = js_sys::Date::now() as u64;
        let game = Game::new(settings, seed, LocalStorageStore, DomPresenter);
        let high_score = game.high_score();
        let host = Rc::new(RefCell::new(Host { game, last_time: 0.0 }));

        set_text("#hud-high .hud-value", &high_score.to_string());
        set_text("#hud-score .hud-value", "0");
        set_text("#hud-mode .hud-value", host.borrow().game.mode().as_str());
        log::info!("Game initialized with seed: {}", seed);

        setup_keyboard(&document, host.clone());
        setup_touch(&document, host.clone());
        setup_buttons(&document, host.clone());
        setup_auto_pause(&document, host.clone());

        request_animation_frame(host);

        log::info!("Dinovox Run running!");
    }

    fn setup_keyboard(document: &Document, host: Rc<RefCell<Host>>) {
        {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "KeyI" {
                    if !event.repeat() {
                        host.borrow_mut().game.toggle_autopilot();
                    }
                    return;
                }
                if code == "KeyM" {
                    if !event.repeat() {
                        let mut h = host.borrow_mut();
                        let next = h.game.mode().next();
                        if h.game.set_mode(next) {
                            h.game.settings().save();
                            set_text("#hud-mode .hud-value", next.as_str());
                        }
                    }
                    return;
                }
                if let Some(key) = Key::from_code(&code) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    host.borrow_mut().game.handle_input(InputEvent::KeyDown {
                        key,
                        repeat: event.repeat(),
                    });
                }
            });
            let _ = document
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_code(&event.code()) {
                    host.borrow_mut().game.handle_input(InputEvent::KeyUp { key });
                }
            });
            let _ = document
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// First changed touch point in client coordinates
    fn touch_point(event: &TouchEvent) -> Option<(f32, f32)> {
        let touch = event.changed_touches().get(0)?;
        Some((touch.client_x() as f32, touch.client_y() as f32))
    }

    fn setup_touch(document: &Document, host: Rc<RefCell<Host>>) {
        let handlers: [(&str, fn(f32, f32) -> InputEvent); 3] = [
            ("touchstart", |x, y| InputEvent::TouchStart { x, y }),
            ("touchmove", |x, y| InputEvent::TouchMove { x, y }),
            ("touchend", |x, y| InputEvent::TouchEnd { x, y }),
        ];

        for (name, make) in handlers {
            let host = host.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                if let Some((x, y)) = touch_point(&event) {
                    host.borrow_mut().game.handle_input(make(x, y));
                }
            });
            let _ = document.add_event_listener_with_callback(name, closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let closure = Closure::<dyn FnMut(_)>::new(move |_event: TouchEvent| {
            host.borrow_mut().game.handle_input(InputEvent::TouchCancel);
        });
        let _ = document
            .add_event_listener_with_callback("touchcancel", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn setup_buttons(document: &Document, host: Rc<RefCell<Host>>) {
        let buttons = [
            ("start-btn", Intent::Start),
            ("restart-btn", Intent::Start),
            ("resume-btn", Intent::TogglePause),
        ];

        for (id, intent) in buttons {
            if let Some(btn) = document.get_element_by_id(id) {
                let host = host.clone();
                let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                    host.borrow_mut().game.apply_intent(intent);
                });
                let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
                closure.forget();
            }
        }
    }

    fn setup_auto_pause(document: &Document, host: Rc<RefCell<Host>>) {
        // Visibility change (tab switch, minimize)
        {
            let host = host.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden
                    && host.borrow_mut().game.pause()
                {
                    log::info!("Auto-paused (tab hidden)");
                }
            });
            let _ = document.add_event_listener_with_callback(
                "visibilitychange",
                closure.as_ref().unchecked_ref(),
            );
            closure.forget();
        }

        // Window blur (click outside)
        if let Some(window) = web_sys::window() {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::FocusEvent| {
                if host.borrow_mut().game.pause() {
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ = window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn request_animation_frame(host: Rc<RefCell<Host>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(host, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(host: Rc<RefCell<Host>>, time: f64) {
        {
            let mut h = host.borrow_mut();
            h.update(time);
            h.render();
            h.update_overlays();
        }

        request_animation_frame(host);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

// The browser build starts from `wasm_main`
#[cfg(target_arch = "wasm32")]
fn main() {}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use std::time::{SystemTime, UNIX_EPOCH};

    use dinovox_run::consts::SIM_DT;
    use dinovox_run::highscores::FileStore;
    use dinovox_run::{Game, Presenter, Settings};

    /// Environment variable naming the native high score file
    const HIGHSCORE_ENV: &str = "DINOVOX_HIGHSCORE";
    const DEFAULT_HIGHSCORE_FILE: &str = "dinovox_highscore.txt";
    /// Ten simulated minutes
    const MAX_FRAMES: u32 = 60 * 60 * 10;

    struct LogPresenter;

    impl Presenter for LogPresenter {
        fn on_score_changed(&mut self, score: u64) {
            log::debug!("Score: {}", score);
        }

        fn on_game_over(&mut self, final_score: u64) {
            log::info!("Game over with {} points", final_score);
        }

        fn on_high_score(&mut self, score: u64) {
            log::info!("New record saved: {}", score);
        }
    }

    pub fn run() {
        let settings = Settings::load();
        let path = std::env::var(HIGHSCORE_ENV).unwrap_or_else(|_| DEFAULT_HIGHSCORE_FILE.to_string());
        let seed = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        let mut game = Game::new(settings, seed, FileStore::new(path), LogPresenter);
        game.set_autopilot(true);
        game.start();

        let mut frames = 0;
        while frames < MAX_FRAMES && !game.state().is_game_over() {
            game.frame(SIM_DT);
            frames += 1;
        }

        let state = game.state();
        log::info!(
            "Autopilot run finished after {} frames: score {}, distance {:.1}, best {}",
            frames,
            state.score,
            state.clock.distance(),
            game.high_score()
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dinovox Run (native) starting...");
    log::info!("Playing a headless autopilot run - build for wasm32 to play in the browser");
    headless::run();
}
