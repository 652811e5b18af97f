//! Zero Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{
        AddEventListenerOptions, Document, Element, HtmlCanvasElement, KeyboardEvent, TouchEvent,
    };

    use zero_runner::audio::AudioManager;
    use zero_runner::consts::*;
    use zero_runner::driver::{Driver, Frame};
    use zero_runner::platform::{Trigger, handle};
    use zero_runner::renderer::{RenderState, tessellate};
    use zero_runner::sim::{Banner, GameState, Status};
    use zero_runner::{Settings, Tuning};

    /// Status display and message banner elements
    struct Hud {
        state: Option<Element>,
        ones: Option<Element>,
        score: Option<Element>,
        message: Option<Element>,
    }

    impl Hud {
        fn find(document: &Document) -> Self {
            Self {
                state: document.get_element_by_id("state-value"),
                ones: document.get_element_by_id("ones-value"),
                score: document.get_element_by_id("score-value"),
                message: document.get_element_by_id("message"),
            }
        }

        fn update_status(&self, status: &Status) {
            if let Some(el) = &self.state {
                el.set_text_content(Some(&status.current_state.to_string()));
            }
            if let Some(el) = &self.ones {
                el.set_text_content(Some(&status.ones_count.to_string()));
            }
            if let Some(el) = &self.score {
                el.set_text_content(Some(&status.score.to_string()));
            }
        }

        fn show_banner(&self, banner: Banner) {
            let Some(el) = &self.message else { return };
            match banner.text() {
                Some(text) => {
                    el.set_text_content(Some(&text));
                    let _ = el.class_list().remove_1("hidden");
                }
                None => {
                    let _ = el.class_list().add_1("hidden");
                }
            }
        }
    }

    /// Game instance holding all state
    struct Game {
        driver: Driver,
        render_state: Option<RenderState>,
        audio: AudioManager,
        hud: Hud,
    }

    impl Game {
        /// Present one frame: sound, pixels, then DOM
        fn present(&mut self, frame: &Frame) {
            self.audio.play_events(&frame.events);
            self.render(frame);
            self.hud.update_status(&frame.status);
            if let Some(banner) = frame.banner {
                self.hud.show_banner(banner);
            }
        }

        fn render(&mut self, frame: &Frame) {
            if let Some(ref mut render_state) = self.render_state {
                let vertices = tessellate(&frame.cmds);
                match render_state.render(&vertices) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => {
                        render_state.resize(render_state.size.0, render_state.size.1);
                    }
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    /// Optional balance override from `<script id="tuning" type="application/json">`
    fn load_tuning(document: &Document) -> Tuning {
        let Some(json) = document
            .get_element_by_id("tuning")
            .and_then(|el| el.text_content())
        else {
            log::info!("Using default tuning");
            return Tuning::default();
        };

        match Tuning::from_json(&json) {
            Ok(tuning) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Err(e) => {
                log::warn!("Ignoring tuning override: {}", e);
                Tuning::default()
            }
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        let _ = console_log::init_with_level(log::Level::Info);

        log::info!("Zero Runner starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("game")
            .ok_or("no canvas")?
            .dyn_into()?;

        // Backing store at device resolution; the pipeline maps canvas space
        let dpr = window.device_pixel_ratio();
        let width = (CANVAS_WIDTH as f64 * dpr) as u32;
        let height = (CANVAS_HEIGHT as f64 * dpr) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        let settings = Settings::load();
        let tuning = load_tuning(&document);
        let seed = settings.seed.unwrap_or_else(|| js_sys::Date::now() as u64);
        log::info!("Game initialized with seed: {}", seed);

        let state = GameState::with_tuning(seed, tuning);
        let game = Rc::new(RefCell::new(Game {
            driver: Driver::new(state, &settings),
            render_state: None,
            audio: AudioManager::new(settings.muted),
            hud: Hud::find(&document),
        }));

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .map_err(|e| JsValue::from_str(&format!("Failed to create surface: {}", e)))?;

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::LowPower,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to get adapter: {}", e)))?;

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state = RenderState::new(surface, &adapter, width, height)
            .await
            .map_err(|e| JsValue::from_str(&format!("Failed to set up renderer: {}", e)))?;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone())?;

        request_animation_frame(game);

        log::info!("Zero Runner running!");
        Ok(())
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Listeners must not be passive or preventDefault is ignored
        let options = AddEventListenerOptions::new();
        options.set_passive(false);

        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                let key = event.key();
                let mut g = game.borrow_mut();
                let trigger = Trigger::Key {
                    code: &code,
                    key: &key,
                };
                if handle(&mut g.driver.state, trigger) {
                    event.prevent_default();
                }
            });
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "keydown",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        // Touch start
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                let mut g = game.borrow_mut();
                handle(&mut g.driver.state, Trigger::Touch);
            });
            window.add_event_listener_with_callback_and_add_event_listener_options(
                "touchstart",
                closure.as_ref().unchecked_ref(),
                &options,
            )?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();
            let frame = g.driver.frame(time);
            g.present(&frame);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        log::error!("Startup failed: {:?}", e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Zero Runner (native) starting...");
    log::info!("Rendering needs the browser build - run with `trunk serve` for the web version");

    headless::run(0x2e50, 60 * 120);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Fixed-clock run with a simple autopilot, for smoke-testing the simulation
#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use zero_runner::driver::Driver;
    use zero_runner::platform::{Trigger, handle};
    use zero_runner::settings::Settings;
    use zero_runner::sim::{Banner, Bit, GameState};

    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Jump when a one is this many frames of scrolling away
    const JUMP_LEAD_FRAMES: f32 = 6.0;

    /// Jump over ones, walk through zeros
    fn should_jump(state: &GameState) -> bool {
        if !state.player.on_ground {
            return false;
        }
        let front = state.player.rect.right();
        let reach = state.spawner.game_speed * JUMP_LEAD_FRAMES;
        state.obstacles.iter().any(|o| {
            let gap = o.rect.pos.x - front;
            o.bit == Bit::One && gap > 0.0 && gap <= reach
        })
    }

    pub fn run(seed: u64, frames: u32) {
        let mut driver = Driver::new(GameState::new(seed), &Settings::default());
        handle(&mut driver.state, Trigger::Touch);

        let mut t = 0.0;
        let mut spawned = 0u32;
        for _ in 0..frames {
            if should_jump(&driver.state) {
                handle(&mut driver.state, Trigger::Touch);
            }

            t += FRAME_MS;
            let frame = driver.frame(t);
            spawned += frame
                .events
                .iter()
                .filter(|e| matches!(e, zero_runner::sim::GameEvent::Spawned(_)))
                .count() as u32;

            if let Some(Banner::GameOver(reason)) = frame.banner {
                log::info!(
                    "Headless run ended: {} after {:.1}s",
                    reason,
                    t / 1000.0
                );
                break;
            }
        }

        let status = driver.state.status();
        log::info!(
            "Headless result: score={} ones={} state={} spawned={} speed={:.2} interval={}ms",
            status.score,
            status.ones_count,
            status.current_state,
            spawned,
            driver.state.spawner.game_speed,
            driver.state.spawner.interval
        );
    }
}
