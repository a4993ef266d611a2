//! Samurai Jump entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, KeyboardEvent, PointerEvent};

    use samurai_jump::hud::HudView;
    use samurai_jump::persistence::LocalStorage;
    use samurai_jump::platform::SystemClock;
    use samurai_jump::renderer::WebCanvas;
    use samurai_jump::session::RESTART_COOLDOWN_MS;
    use samurai_jump::sim::GamePhase;
    use samurai_jump::{App, InputAction, Tuning};

    type WebApp = App<WebCanvas, LocalStorage, SystemClock>;

    /// Browser-side game instance
    struct Game {
        app: WebApp,
        /// Pending animation frame, if any
        raf: Option<i32>,
        /// Last HUD pushed to the DOM
        shown: Option<HudView>,
    }

    impl Game {
        fn cancel_frame(&mut self) {
            if let (Some(handle), Some(window)) = (self.raf.take(), web_sys::window()) {
                let _ = window.cancel_animation_frame(handle);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&mut self) {
            let hud = self.app.hud();
            if self.shown.as_ref() == Some(&hud) {
                return;
            }
            let Some(document) = web_sys::window().and_then(|w| w.document()) else {
                return;
            };

            set_text(&document, "hud-time", &hud.time);
            set_text(&document, "hud-best", &hud.best);
            set_text(&document, "restart-btn", hud.restart_label());
            if let Some(final_time) = &hud.final_time {
                set_text(&document, "final-time", final_time);
            }

            set_class(&document, "hud", "night", hud.night);
            set_class(&document, "invincible-badge", "hidden", !hud.invincible);
            set_class(&document, "start-screen", "hidden", !hud.show_start);
            set_class(&document, "game-over", "hidden", hud.final_time.is_none());
            set_class(&document, "new-best", "hidden", !hud.new_best);
            set_class(&document, "restart-btn", "disabled", !hud.can_restart);

            self.shown = Some(hud);
        }
    }

    fn element(document: &Document, id: &str) -> Option<Element> {
        document.get_element_by_id(id)
    }

    fn set_text(document: &Document, id: &str, text: &str) {
        if let Some(el) = element(document, id) {
            el.set_text_content(Some(text));
        }
    }

    fn set_class(document: &Document, id: &str, class: &str, on: bool) {
        if let Some(el) = element(document, id) {
            let _ = el.class_list().toggle_with_force(class, on);
        }
    }

    /// Window size in CSS pixels
    fn viewport() -> (u32, u32) {
        let Some(window) = web_sys::window() else {
            return (0, 0);
        };
        let dim = |v: Result<JsValue, JsValue>| v.ok().and_then(|v| v.as_f64()).unwrap_or(0.0) as u32;
        (dim(window.inner_width()), dim(window.inner_height()))
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Samurai Jump starting...");

        let surface = WebCanvas::from_id("canvas");
        if surface.is_none() {
            log::warn!("No 2D canvas found - frames will be dropped");
        }

        let tuning = Tuning::load(&LocalStorage::new());
        let seed = js_sys::Date::now() as u64;
        let mut app = App::new(surface, seed, tuning, LocalStorage::new(), SystemClock::new());
        app.show_start(viewport());

        let game = Rc::new(RefCell::new(Game {
            app,
            raf: None,
            shown: None,
        }));
        game.borrow_mut().update_hud();

        setup_input_handlers(game.clone());
        setup_resize(game);

        log::info!("Samurai Jump ready!");
        Ok(())
    }

    /// Space, the on-screen jump button and the overlay buttons all share one input
    fn handle_press(game: &Rc<RefCell<Game>>) {
        let action = {
            let mut g = game.borrow_mut();
            let action = g.app.press_jump(viewport());
            if action == InputAction::ReturnToStart {
                g.cancel_frame();
            }
            g.update_hud();
            action
        };
        if action == InputAction::StartRun {
            request_animation_frame(game.clone());
        }
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if event.code() == "Space" {
                    event.prevent_default();
                    if !event.repeat() {
                        handle_press(&game);
                    }
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let Some(document) = window.document() else { return };

        // Buttons
        for id in ["jump-btn", "start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: PointerEvent| {
                event.prevent_default();
                handle_press(&game);
            });
            let _ = btn.add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    /// Keep the title screen fitted while no frames are running
    fn setup_resize(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            if g.app.phase() == GamePhase::Start {
                g.app.show_start(viewport());
            }
        });
        let _ = window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let next = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(next);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(handle) => game.borrow_mut().raf = Some(handle),
            Err(e) => log::warn!("requestAnimationFrame failed: {e:?}"),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        let keep_going = {
            let mut g = game.borrow_mut();
            g.raf = None;

            let keep_going = match g.app.frame(viewport()) {
                Ok(keep_going) => keep_going,
                Err(e) => {
                    log::warn!("Dropped frame: {e}");
                    g.app.phase() == GamePhase::Playing
                }
            };
            g.update_hud();

            if g.app.phase() == GamePhase::GameOver {
                refresh_after_cooldown(game.clone());
            }
            keep_going
        };

        if keep_going {
            request_animation_frame(game);
        }
    }

    /// Re-arm the restart button once the cooldown has passed
    fn refresh_after_cooldown(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else { return };
        let closure = Closure::once(move || {
            game.borrow_mut().update_hud();
        });
        let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(
            closure.as_ref().unchecked_ref(),
            RESTART_COOLDOWN_MS as i32,
        );
        closure.forget();
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    wasm_game::run()
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Headless run: the autopilot plays one seeded session against an in-memory canvas
#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use samurai_jump::consts::SIM_DT;
    use samurai_jump::persistence::MemoryStore;
    use samurai_jump::platform::ManualClock;
    use samurai_jump::renderer::RecordingCanvas;
    use samurai_jump::sim::should_jump;
    use samurai_jump::{App, Tuning};

    const VIEW: (u32, u32) = (1280, 720);
    const MAX_FRAMES: usize = 60 * 300;

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Samurai Jump (native) starting...");

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    let clock = ManualClock::new(0.0);
    let mut app = App::new(
        Some(RecordingCanvas::new(VIEW.0, VIEW.1)),
        seed,
        Tuning::default(),
        MemoryStore::new(),
        clock.clone(),
    );
    app.show_start(VIEW);
    app.press_jump(VIEW);

    for _ in 0..MAX_FRAMES {
        if should_jump(app.driver().state()) {
            app.press_jump(VIEW);
        }
        if let Some(canvas) = app.surface_mut() {
            canvas.clear();
        }
        clock.advance(SIM_DT as f64 * 1000.0);
        match app.frame(VIEW) {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => log::warn!("Dropped frame: {e}"),
        }
    }

    let state = app.driver().state();
    log::info!(
        "Autopilot survived {:.2}s (seed {seed}, {} obstacles on screen)",
        state.elapsed(),
        state.obstacles.len()
    );
}
