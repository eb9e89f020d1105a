//! Flappy entry point
//!
//! Browser: WebGPU canvas driven by requestAnimationFrame.
//! Native: headless autopilot runs, for smoke-testing tuning files.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, HtmlCanvasElement, KeyboardEvent, MouseEvent, TouchEvent};

    use flappy::platform::Signal;
    use flappy::platform::web::AnimationFrameScheduler;
    use flappy::renderer::RenderState;
    use flappy::sim::{GameState, autopilot};
    use flappy::{BestScore, FrameOutcome, HudView, LoopDriver, Tuning};

    /// Game instance holding all state
    struct Game {
        driver: LoopDriver<AnimationFrameScheduler>,
        /// Session best, kept across restarts for the page lifetime
        best: BestScore,
        render_state: RenderState,
        canvas: HtmlCanvasElement,
        document: Document,
        /// Attract mode - autopilot flaps for the player
        autopilot: bool,
    }

    impl Game {
        fn on_frame(&mut self, generation: u64, time: f64) {
            if self.autopilot && autopilot::wants_flap(self.driver.state()) {
                self.driver.flap();
            }
            let outcome = self
                .driver
                .frame(generation, time, &mut self.best, &mut self.render_state);
            if outcome == FrameOutcome::Ignored {
                return;
            }
            self.render_state.present_or_recover();
            self.update_hud();
        }

        fn on_signal(&mut self, signal: Signal<'_>) {
            if self.driver.activate(signal).is_some() {
                self.update_hud();
            }
        }

        fn redraw(&mut self) {
            self.driver.redraw(&mut self.render_state);
            self.render_state.present_or_recover();
        }

        /// The canvas has a fixed logical size; snap it back on viewport changes
        fn on_resize(&mut self) {
            let tuning = self.driver.state().tuning;
            let (w, h) = (tuning.canvas_width as u32, tuning.canvas_height as u32);
            self.canvas.set_width(w);
            self.canvas.set_height(h);
            self.render_state.resize(w, h);
            if !self.driver.is_running() {
                self.redraw();
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let hud = HudView::new(self.driver.state(), &self.best);
            let document = &self.document;

            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&hud.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("start-screen") {
                let class = if hud.show_start_prompt { "screen" } else { "screen hidden" };
                let _ = el.set_attribute("class", class);
            }

            if let Some(el) = document.get_element_by_id("game-over") {
                match hud.game_over {
                    Some(over) => {
                        let _ = el.set_attribute("class", "screen");
                        if let Some(score_el) = document.get_element_by_id("final-score") {
                            score_el.set_text_content(Some(&over.final_score.to_string()));
                        }
                        if let Some(best_el) = document.get_element_by_id("best-score") {
                            best_el.set_text_content(Some(&over.best_score.to_string()));
                        }
                    }
                    None => {
                        let _ = el.set_attribute("class", "screen hidden");
                    }
                }
            }
        }
    }

    fn js_err(msg: impl std::fmt::Display) -> JsValue {
        JsValue::from_str(&msg.to_string())
    }

    /// Optional JSON override in `<canvas data-tuning="...">`
    fn read_tuning(canvas: &HtmlCanvasElement) -> Tuning {
        match canvas.get_attribute("data-tuning").map(|json| Tuning::from_json(&json)) {
            Some(Ok(tuning)) => {
                log::info!("Loaded tuning override");
                tuning
            }
            Some(Err(e)) => {
                log::warn!("Ignoring tuning override: {e}");
                Tuning::default()
            }
            None => Tuning::default(),
        }
    }

    pub async fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).map_err(js_err)?;

        log::info!("Flappy starting...");

        let window = web_sys::window().ok_or_else(|| js_err("no window"))?;
        let document = window.document().ok_or_else(|| js_err("no document"))?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .ok_or_else(|| js_err("no canvas"))?
            .dyn_into()
            .map_err(|_| js_err("not a canvas"))?;

        let tuning = read_tuning(&canvas);
        canvas.set_width(tuning.canvas_width as u32);
        canvas.set_height(tuning.canvas_height as u32);

        let render_state = RenderState::for_canvas(
            canvas.clone(),
            Vec2::new(tuning.canvas_width, tuning.canvas_height),
        )
        .await
        .map_err(js_err)?;

        let seed = js_sys::Date::now() as u64;
        let state = GameState::new(tuning, seed).map_err(js_err)?;
        let game = Rc::new(RefCell::new(Game {
            driver: LoopDriver::new(state, AnimationFrameScheduler::new()),
            best: BestScore::new(),
            render_state,
            canvas: canvas.clone(),
            document: document.clone(),
            autopilot: false,
        }));
        log::info!("Game initialized with seed: {}", seed);

        // Weak handle: the scheduler lives inside the game
        {
            let weak = Rc::downgrade(&game);
            game.borrow_mut()
                .driver
                .scheduler_mut()
                .bind(move |generation: u64, time: f64| {
                    if let Some(game) = weak.upgrade() {
                        game.borrow_mut().on_frame(generation, time);
                    }
                });
        }

        setup_input_handlers(&window, &canvas, game.clone())?;
        setup_buttons(&document, game.clone())?;

        // Start screen
        {
            let mut g = game.borrow_mut();
            g.redraw();
            g.update_hud();
        }

        log::info!("Flappy running!");
        Ok(())
    }

    fn setup_input_handlers(
        window: &web_sys::Window,
        canvas: &HtmlCanvasElement,
        game: Rc<RefCell<Game>>,
    ) -> Result<(), JsValue> {
        // Keyboard
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                let code = event.code();
                if code == "KeyI" {
                    let mut g = game.borrow_mut();
                    g.autopilot = !g.autopilot;
                    log::info!("Autopilot: {}", g.autopilot);
                    return;
                }
                let signal = Signal::Key(&code);
                if signal.is_activate() {
                    // Keep space from scrolling the page
                    event.prevent_default();
                }
                game.borrow_mut().on_signal(signal);
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Mouse click
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: MouseEvent| {
                game.borrow_mut().on_signal(Signal::PointerDown);
            });
            canvas.add_event_listener_with_callback("mousedown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Touch
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: TouchEvent| {
                event.prevent_default();
                game.borrow_mut().on_signal(Signal::TouchStart);
            });
            canvas
                .add_event_listener_with_callback("touchstart", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // Viewport resize
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                game.borrow_mut().on_resize();
            });
            window.add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    /// Start / play-again buttons on the overlay screens
    fn setup_buttons(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        for id in ["start-btn", "restart-btn"] {
            let Some(btn) = document.get_element_by_id(id) else {
                continue;
            };
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: MouseEvent| {
                event.stop_propagation();
                game.borrow_mut().on_signal(Signal::PointerDown);
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        Ok(())
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use flappy::platform::{ManualScheduler, Signal};
    use flappy::renderer::CommandList;
    use flappy::sim::{GameState, autopilot};
    use flappy::{BestScore, FrameOutcome, LoopDriver, Tuning, TuningError};

    /// 60 Hz host refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    const RUNS: u32 = 3;
    /// Give up on a run after five minutes of game time
    const MAX_FRAMES: u32 = 60 * 60 * 5;

    fn clock_seed() -> u64 {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0)
    }

    pub fn run() -> Result<(), TuningError> {
        let tuning = match std::env::args().nth(1) {
            Some(path) => {
                log::info!("Loading tuning from {path}");
                Tuning::load(path)?
            }
            None => Tuning::default(),
        };
        let seed = std::env::var("FLAPPY_SEED")
            .ok()
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);
        log::info!("Headless autopilot, seed {seed}");

        let mut driver = LoopDriver::new(GameState::new(tuning, seed)?, ManualScheduler::new());
        let mut best = BestScore::new();
        let mut canvas = CommandList::new();
        let mut now = 0.0;

        for run in 1..=RUNS {
            driver.start();

            let mut frames = 0;
            while frames < MAX_FRAMES {
                let Some(handle) = driver.scheduler_mut().fire() else {
                    break;
                };
                now += FRAME_MS;
                frames += 1;
                if autopilot::wants_flap(driver.state()) {
                    driver.activate(Signal::Key("Space"));
                }
                if let FrameOutcome::Finished(report) =
                    driver.frame(handle, now, &mut best, &mut canvas)
                {
                    log::debug!("Run {run} ended: {:?}", report.crash);
                }
            }
            if driver.is_running() {
                driver.stop();
                log::info!("Run {run} still alive after {frames} frames");
            }

            println!(
                "run {run}: score {} in {frames} frames",
                driver.state().score
            );
        }

        println!("best: {}", best.get());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    if let Err(e) = wasm_game::run().await {
        web_sys::console::error_1(&e);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    if let Err(e) = headless::run() {
        log::error!("{e}");
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
