//! Ledge Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

    use ledge_runner::renderer::RenderState;
    use ledge_runner::settings::Settings;
    use ledge_runner::sim::{GamePhase, GameState, LevelLayout, PlayArea, step};
    use ledge_runner::tuning::Tuning;

    /// Game instance holding all state
    struct Game {
        state: GameState,
        render_state: Option<RenderState>,
        settings: Settings,
        /// Play area sampled from the canvas each frame
        area: PlayArea,
        /// Previous frame's phase, to spot terminal transitions
        last_phase: GamePhase,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
    }

    impl Game {
        fn new() -> Self {
            Self {
                state: GameState::new(&LevelLayout::default(), Tuning::default()),
                render_state: None,
                settings: Settings::load(),
                area: PlayArea::new(0.0, 0.0),
                last_phase: GamePhase::Idle,
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
            }
        }

        /// Advance the simulation: exactly one fixed step per scheduled frame
        fn update(&mut self, time: f64) {
            step(&mut self.state, self.area);

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;
            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60_000.0 / elapsed).round() as u32;
                }
            }
        }

        /// Render the current frame
        fn render(&mut self) {
            let area = self.area;
            if let Some(ref mut render_state) = self.render_state {
                match render_state.render(&self.state, area) {
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

        /// Update HUD elements in DOM
        fn update_hud(&self, document: &Document) {
            if let Some(el) = document.get_element_by_id("score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if self.settings.show_timer {
                if let Some(el) = document.get_element_by_id("timer") {
                    let seconds = (self.state.elapsed_ms / 1000.0).floor() as u64;
                    el.set_text_content(Some(&format!("{}s", seconds)));
                }
            }

            if self.settings.show_fps {
                if let Some(el) = document.get_element_by_id("fps") {
                    el.set_text_content(Some(&self.fps.to_string()));
                }
            }
        }
    }

    /// Fetch a DOM element by id, creating a bare fallback when the page
    /// doesn't provide one
    fn ensure_element(document: &Document, id: &str, tag: &str) -> Element {
        if let Some(el) = document.get_element_by_id(id) {
            return el;
        }
        log::warn!("Element #{id} not found, creating a default one");
        let el = document
            .create_element(tag)
            .expect("Failed to create element");
        el.set_id(id);
        document
            .body()
            .expect("document has no body")
            .append_child(&el)
            .expect("Failed to append element");
        el
    }

    /// Remove a lingering end-of-run overlay, if any
    fn clear_overlay(document: &Document) {
        if let Some(overlay) = document.query_selector(".run-overlay").ok().flatten() {
            overlay.remove();
        }
    }

    fn set_style(el: &HtmlElement, property: &str, value: &str) {
        let _ = el.style().set_property(property, value);
    }

    /// Build and attach the end-of-run overlay (game over or success)
    fn show_run_overlay(document: &Document, game: &Rc<RefCell<Game>>, won: bool) {
        clear_overlay(document);

        let g = game.borrow();
        let state = &g.state;
        let overlay: HtmlElement = document
            .create_element("div")
            .expect("Failed to create overlay")
            .dyn_into()
            .unwrap();
        overlay.set_class_name("run-overlay");
        set_style(&overlay, "position", "fixed");
        set_style(&overlay, "top", "0");
        set_style(&overlay, "left", "0");
        set_style(&overlay, "width", "100%");
        set_style(&overlay, "height", "100%");
        set_style(&overlay, "background-color", "rgba(0, 0, 0, 0.8)");
        set_style(&overlay, "display", "flex");
        set_style(&overlay, "flex-direction", "column");
        set_style(&overlay, "justify-content", "center");
        set_style(&overlay, "align-items", "center");
        set_style(&overlay, "color", "white");
        set_style(&overlay, "z-index", "9999");

        let title: HtmlElement = document
            .create_element("div")
            .expect("Failed to create title")
            .dyn_into()
            .unwrap();
        title.set_text_content(Some(if won { "You Win!" } else { "Game Over!" }));
        set_style(&title, "font-size", "48px");
        set_style(&title, "font-weight", "bold");
        set_style(&title, "margin-bottom", "20px");
        set_style(&title, "color", if won { "#44FF88" } else { "#FF4444" });

        let final_score: HtmlElement = document
            .create_element("div")
            .expect("Failed to create score line")
            .dyn_into()
            .unwrap();
        final_score.set_text_content(Some(&format!("Final Score: {}", state.score)));
        set_style(&final_score, "font-size", "32px");
        set_style(&final_score, "margin-bottom", "10px");
        set_style(&final_score, "color", "#FFD700");

        let collected = state.collected_count();
        let total = state.collectibles.len();
        let percentage = if total > 0 {
            (collected as f64 / total as f64 * 100.0).round() as u32
        } else {
            100
        };
        let seconds = (state.elapsed_ms / 1000.0).floor() as u64;

        let stats: HtmlElement = document
            .create_element("div")
            .expect("Failed to create stats")
            .dyn_into()
            .unwrap();
        stats.set_text_content(Some(&format!(
            "Collectibles: {collected}/{total} ({percentage}%) | Time Played: {seconds} seconds"
        )));
        set_style(&stats, "font-size", "18px");
        set_style(&stats, "margin-bottom", "30px");
        set_style(&stats, "color", "#CCCCCC");

        let restart: HtmlElement = document
            .create_element("button")
            .expect("Failed to create restart button")
            .dyn_into()
            .unwrap();
        restart.set_text_content(Some("Play Again"));
        set_style(&restart, "padding", "15px 30px");
        set_style(&restart, "font-size", "20px");
        set_style(&restart, "cursor", "pointer");

        {
            let game = game.clone();
            let overlay_el = overlay.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                overlay_el.remove();
                game.borrow_mut().state.start();
                log::info!("Run restarted from overlay");
            });
            let _ = restart
                .add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        let _ = overlay.append_child(&title);
        let _ = overlay.append_child(&final_score);
        let _ = overlay.append_child(&stats);
        let _ = overlay.append_child(&restart);
        let _ = document
            .body()
            .expect("document has no body")
            .append_child(&overlay);
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Ledge Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = ensure_element(&document, "game-canvas", "canvas")
            .dyn_into()
            .expect("#game-canvas is not a canvas");
        ensure_element(&document, "score", "div");
        ensure_element(&document, "timer", "div");
        let start_button = ensure_element(&document, "start-button", "button");
        if start_button.text_content().unwrap_or_default().is_empty() {
            start_button.set_text_content(Some("Start Game"));
        }

        // Physical canvas size from CSS size and device pixel ratio
        let dpr = window.device_pixel_ratio();
        let width = (canvas.client_width() as f64 * dpr) as u32;
        let height = (canvas.client_height() as f64 * dpr) as u32;
        canvas.set_width(width.max(1));
        canvas.set_height(height.max(1));

        let game = Rc::new(RefCell::new(Game::new()));
        game.borrow_mut().area =
            PlayArea::new(canvas.client_width() as f32, canvas.client_height() as f32);
        if game.borrow().settings.show_fps {
            ensure_element(&document, "fps", "div");
        }

        // Initialize WebGPU
        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU,
            ..Default::default()
        });

        let surface = instance
            .create_surface(wgpu::SurfaceTarget::Canvas(canvas.clone()))
            .expect("Failed to create surface");

        let adapter = instance
            .request_adapter(&wgpu::RequestAdapterOptions {
                power_preference: wgpu::PowerPreference::HighPerformance,
                compatible_surface: Some(&surface),
                force_fallback_adapter: false,
            })
            .await
            .expect("Failed to get adapter");

        log::info!("Using adapter: {:?}", adapter.get_info().name);

        let render_state =
            RenderState::new(surface, &adapter, width.max(1), height.max(1)).await;
        game.borrow_mut().render_state = Some(render_state);

        setup_input_handlers(game.clone());
        setup_start_button(&start_button, game.clone());

        request_animation_frame(game, canvas);

        log::info!("Ledge Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();

        // Keydown: horizontal movement and jump; all gated on the running
        // flag inside the state methods
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.state.move_left(),
                    "ArrowRight" => g.state.move_right(),
                    " " => {
                        event.prevent_default();
                        g.state.jump();
                    }
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Keyup: releasing either arrow stops horizontal motion
        {
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" | "ArrowRight" => g.state.stop_horizontal(),
                    _ => {}
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_start_button(button: &Element, game: Rc<RefCell<Game>>) {
        let button_el = button.clone();
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
            let document = web_sys::window().unwrap().document().unwrap();
            clear_overlay(&document);
            game.borrow_mut().state.start();
            button_el.set_text_content(Some("Restart Game"));
            if let Some(btn) = button_el.dyn_ref::<HtmlElement>() {
                btn.blur().ok();
            }
            log::info!("Run started");
        });
        let _ = button.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, canvas, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, canvas: HtmlCanvasElement, time: f64) {
        let document = web_sys::window().unwrap().document().unwrap();

        {
            let mut g = game.borrow_mut();

            // Re-sample the play area every frame; the viewport may resize
            let client_w = canvas.client_width();
            let client_h = canvas.client_height();
            g.area = PlayArea::new(client_w as f32, client_h as f32);

            let dpr = web_sys::window().unwrap().device_pixel_ratio();
            let device_w = ((client_w as f64 * dpr) as u32).max(1);
            let device_h = ((client_h as f64 * dpr) as u32).max(1);
            if let Some(ref mut rs) = g.render_state {
                if rs.size != (device_w, device_h) {
                    canvas.set_width(device_w);
                    canvas.set_height(device_h);
                    rs.resize(device_w, device_h);
                }
            }

            g.update(time);
            g.render();
            g.update_hud(&document);
        }

        // Terminal transitions raise the matching overlay
        let (phase, last_phase) = {
            let g = game.borrow();
            (g.state.phase, g.last_phase)
        };
        if phase != last_phase {
            match phase {
                GamePhase::GameOver => {
                    log::info!("Game over at score {}", game.borrow().state.score);
                    show_run_overlay(&document, &game, false);
                }
                GamePhase::Success => {
                    log::info!("Run complete at score {}", game.borrow().state.score);
                    show_run_overlay(&document, &game, true);
                }
                _ => {}
            }
            game.borrow_mut().last_phase = phase;
        }

        request_animation_frame(game, canvas);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use ledge_runner::sim::{GamePhase, GameState, LevelLayout, PlayArea, step};
    use ledge_runner::tuning::Tuning;

    env_logger::init();
    log::info!("Ledge Runner (native) starting...");
    log::info!("Native mode is headless - run with `trunk serve` for the web version");

    // Scripted demo run: hop toward each coin on a flat floor
    let layout = LevelLayout {
        platforms: vec![ledge_runner::sim::Rect::new(0.0, 400.0, 800.0, 20.0)],
        collectibles: vec![
            ledge_runner::sim::Rect::new(100.0, 350.0, 20.0, 20.0),
            ledge_runner::sim::Rect::new(400.0, 350.0, 20.0, 20.0),
            ledge_runner::sim::Rect::new(700.0, 350.0, 20.0, 20.0),
        ],
    };
    let mut state = GameState::new(&layout, Tuning::default());
    state.start();

    let area = PlayArea::new(800.0, 500.0);
    let mut frames = 0u32;
    while state.is_running() && frames < 10_000 {
        if !state.player.jumping {
            let target = state
                .collectibles
                .iter()
                .find(|c| !c.collected)
                .map(|c| c.rect.center().x);
            if let Some(tx) = target {
                let px = state.player.rect.center().x;
                if (px - tx).abs() < 4.0 {
                    state.stop_horizontal();
                    state.jump();
                } else if tx > px {
                    state.move_right();
                } else {
                    state.move_left();
                }
            }
        }
        step(&mut state, area);
        frames += 1;
    }

    let outcome = match state.phase {
        GamePhase::Success => "success",
        GamePhase::GameOver => "game over",
        _ => "timed out",
    };
    println!(
        "Demo run: {} after {} frames, score {}, {:.1}s played",
        outcome,
        frames,
        state.score,
        state.elapsed_ms / 1000.0
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
