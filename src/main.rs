//! Canvas Asteroids entry point
//!
//! In the browser this wires the canvas, keyboard and resize events to the
//! simulation and drives it from `requestAnimationFrame`. Natively it runs a
//! short scripted session headlessly and prints the result.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement, KeyboardEvent};

    use canvas_asteroids::Settings;
    use canvas_asteroids::platform::{Key, now_ms};
    use canvas_asteroids::renderer::{Surface, render_frame};
    use canvas_asteroids::sim::{GameEvent, GameState, Keys, TickInput, Viewport, tick};

    const START_MESSAGE: &str = "Press space to start";

    /// Browser session: the simulation plus everything needed to show it
    struct Game {
        state: GameState,
        settings: Settings,
        canvas: HtmlCanvasElement,
        context: CanvasRenderingContext2d,
        document: Document,
        keys: Keys,
        pixel_ratio: f64,
        /// Pending `requestAnimationFrame` id
        frame_request: Option<i32>,
    }

    impl Game {
        /// Match the canvas to the window, minus the HUD strip
        fn resize(&mut self) {
            let Some(window) = web_sys::window() else {
                return;
            };
            let width = window
                .inner_width()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(800.0);
            let height = window
                .inner_height()
                .ok()
                .and_then(|v| v.as_f64())
                .unwrap_or(600.0);
            let height = (height - self.settings.hud_height as f64).max(0.0);

            self.pixel_ratio = window.device_pixel_ratio().max(1.0);
            self.canvas.set_width((width * self.pixel_ratio) as u32);
            self.canvas.set_height((height * self.pixel_ratio) as u32);
            let _ = self
                .canvas
                .set_attribute("style", &format!("width:{width}px;height:{height}px"));

            self.state.viewport = Viewport::new(width as f32, height as f32);
            log::debug!("Viewport resized to {}x{}", width, height);
        }

        fn frame(&mut self) {
            let input = TickInput {
                keys: self.keys,
                viewport: self.state.viewport,
                now_ms: now_ms(),
            };
            tick(&mut self.state, &input);
            self.render();

            for event in self.state.drain_events() {
                match event {
                    GameEvent::Started => self.set_message(""),
                    GameEvent::GameOver { score } => {
                        self.set_message(&format!("Game over! Score: {score}. Press space to restart"));
                    }
                    _ => {}
                }
            }
            self.set_text("score", &self.state.score.to_string());
        }

        fn render(&mut self) {
            let scale = self.pixel_ratio as f32;
            let context = &mut self.context;
            Surface::save(context);
            Surface::scale(context, scale, scale);
            render_frame(&self.state, context, &self.settings.palette);
            Surface::restore(context);
        }

        fn set_message(&self, text: &str) {
            self.set_text("message", text);
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.document.get_element_by_id(id) {
                el.set_text_content(Some(text));
            }
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info)
            .map_err(|e| JsValue::from_str(&e.to_string()))?;

        log::info!("Canvas Asteroids starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or("no canvas")?
            .dyn_into()?;
        let context: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let settings = Settings::from_json_or_default(
            canvas.get_attribute("data-settings").as_deref(),
        );

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(seed, settings.clone(), Viewport::default());
        log::info!("Game initialized with seed: {}", state.seed);

        let game = Rc::new(RefCell::new(Game {
            state,
            settings,
            canvas,
            context,
            document,
            keys: Keys::default(),
            pixel_ratio: 1.0,
            frame_request: None,
        }));

        {
            let mut g = game.borrow_mut();
            g.resize();
            g.render();
            g.set_message(START_MESSAGE);
            g.set_text("score", "0");
        }

        setup_input_handlers(game.clone())?;
        setup_resize_handler(game)?;

        log::info!("Canvas Asteroids ready");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Key down
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let Some(key) = event_key(&event) else {
                    return;
                };
                event.prevent_default();

                let start = {
                    let mut g = game.borrow_mut();
                    g.keys.set(key, true);
                    key == Key::Space && !g.state.is_playing()
                };
                if start {
                    start_game(game.clone());
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Key up
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = event_key(&event) {
                    event.prevent_default();
                    game.borrow_mut().keys.set(key, false);
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Losing focus swallows key-up events
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().keys.release_all();
            });
            window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn setup_resize_handler(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            let mut g = game.borrow_mut();
            g.resize();
            if !g.state.is_playing() {
                g.render();
            }
        });
        window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
        closure.forget();
        Ok(())
    }

    fn event_key(event: &KeyboardEvent) -> Option<Key> {
        Key::from_key_name(&event.key()).or_else(|| Key::from_key_code(event.key_code()))
    }

    /// Start (or restart) a session, replacing any running loop
    fn start_game(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            if let Some(id) = g.frame_request.take() {
                if let Some(window) = web_sys::window() {
                    let _ = window.cancel_animation_frame(id);
                }
            }
            g.state.start();
        }
        request_animation_frame(game);
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let handle = game.clone();
        let closure = Closure::once(move |_time: f64| {
            game_loop(handle);
        });
        match window.request_animation_frame(closure.as_ref().unchecked_ref()) {
            Ok(id) => game.borrow_mut().frame_request = Some(id),
            Err(e) => log::error!("requestAnimationFrame failed: {:?}", e),
        }
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>) {
        {
            let mut g = game.borrow_mut();
            g.frame_request = None;
            g.frame();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() -> Result<(), JsValue> {
    let result = wasm_game::run();
    if let Err(ref e) = result {
        log::error!("Startup failed: {:?}", e);
    }
    result
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Canvas Asteroids (native) starting...");
    log::info!("Native mode runs a headless demo - serve the wasm build to play");

    let path = std::env::args().nth(1);
    let json = path.as_deref().and_then(|path| match std::fs::read_to_string(path) {
        Ok(json) => Some(json),
        Err(err) => {
            log::warn!("Could not read settings file {}: {}", path, err);
            None
        }
    });
    let settings = canvas_asteroids::Settings::from_json_or_default(json.as_deref());

    let summary = headless::run(settings, headless::DEMO_FRAMES);
    println!(
        "\nDemo finished after {} frames: score {}, {} shots, {} asteroids destroyed{}",
        summary.frames,
        summary.score,
        summary.shots,
        summary.asteroids_destroyed,
        if summary.game_over { ", ship lost" } else { "" }
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main
}

/// Scripted headless session for the native build
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use canvas_asteroids::Settings;
    use canvas_asteroids::platform::now_ms;
    use canvas_asteroids::renderer::{RecordingSurface, render_frame};
    use canvas_asteroids::sim::{GameEvent, GameState, Keys, TickInput, Viewport, tick};

    pub const DEMO_FRAMES: u64 = 60 * 30;
    const FRAME_MS: f64 = 1000.0 / 60.0;

    #[derive(Debug, Default, PartialEq)]
    pub struct Summary {
        pub frames: u64,
        pub score: u64,
        pub shots: u32,
        pub asteroids_destroyed: u32,
        pub game_over: bool,
    }

    /// Spin and fire, with short bursts of thrust
    fn scripted_keys(frame: u64) -> Keys {
        Keys {
            up: frame % 120 < 20,
            left: true,
            space: true,
            ..Keys::default()
        }
    }

    pub fn run(settings: Settings, frames: u64) -> Summary {
        let seed = now_ms() as u64;
        let palette = settings.palette.clone();
        let viewport = Viewport::new(1024.0, 768.0);
        let mut state = GameState::new(seed, settings, viewport);
        log::info!("Headless demo with seed {}", state.seed);
        state.start();

        let mut surface = RecordingSurface::new();
        let mut summary = Summary::default();

        for frame in 0..frames {
            let input = TickInput {
                keys: scripted_keys(frame),
                viewport,
                now_ms: frame as f64 * FRAME_MS,
            };
            tick(&mut state, &input);

            surface.clear();
            render_frame(&state, &mut surface, &palette);
            log::trace!("frame {}: {} draw calls", frame, surface.calls.len());

            summary.frames = frame + 1;
            for event in state.drain_events() {
                match event {
                    GameEvent::ShotFired => summary.shots += 1,
                    GameEvent::AsteroidDestroyed { .. } => summary.asteroids_destroyed += 1,
                    GameEvent::GameOver { .. } => summary.game_over = true,
                    GameEvent::Started => {}
                }
            }
            if summary.game_over {
                break;
            }
        }

        summary.score = state.score;
        summary
    }

}
