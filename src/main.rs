//! Synx Snake entry point
//!
//! The browser build wires the DOM and WebGPU to a `GameSession`. The native
//! build has no window; it plays one headless game with a simple autopilot.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{Document, Element, HtmlCanvasElement, HtmlElement};

    use synx_snake::hud::{GameOverSummary, HudSnapshot, Presenter, Status, StatusKind};
    use synx_snake::persistence::LocalStorage;
    use synx_snake::renderer::{Palette, RenderState, RenderView, SceneBuilder};
    use synx_snake::settings::Theme;
    use synx_snake::sim::Difficulty;
    use synx_snake::{GameSession, Layout};

    /// Writes HUD values, status line and overlays into the page
    struct DomPresenter {
        document: Document,
    }

    impl DomPresenter {
        fn element(&self, id: &str) -> Option<Element> {
            self.document.get_element_by_id(id)
        }

        fn set_text(&self, id: &str, text: &str) {
            if let Some(el) = self.element(id) {
                el.set_text_content(Some(text));
            }
        }

        fn set_visible(&self, id: &str, visible: bool) {
            if let Some(el) = self.element(id) {
                let classes = el.class_list();
                let _ = if visible {
                    classes.add_1("visible")
                } else {
                    classes.remove_1("visible")
                };
            }
        }
    }

    impl Presenter for DomPresenter {
        fn hud(&mut self, hud: &HudSnapshot) {
            self.set_text("scoreVal", &hud.score.to_string());
            self.set_text("lengthVal", &hud.length.to_string());
            self.set_text("levelVal", &hud.level_label());
            self.set_text("hiVal", &hud.high_score.to_string());

            let pct = hud.completion_percent();
            if let Some(bar) = self
                .element("progressBar")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                let _ = bar.style().set_property("width", &format!("{:.1}%", pct));
            }
            self.set_text("progLabel", &format!("{:.0}%", pct));
        }

        fn status(&mut self, status: &Status) {
            if let Some(dot) = self.element("statusDot") {
                let class = match status.kind.class_name() {
                    "" => "status-dot".to_string(),
                    kind => format!("status-dot {}", kind),
                };
                dot.set_class_name(&class);
            }
            self.set_text("statusText", &status.message);

            self.set_visible("startOverlay", status.kind == StatusKind::Idle);
            self.set_visible("pauseOverlay", status.kind == StatusKind::Paused);
            if status.kind == StatusKind::Running {
                self.set_visible("deadOverlay", false);
                self.set_visible("winOverlay", false);
            }
        }

        fn game_over(&mut self, summary: &GameOverSummary) {
            self.set_text("hiVal", &summary.high_score.to_string());
            let (score_id, overlay_id) = if summary.won {
                ("winScore", "winOverlay")
            } else {
                ("deadScore", "deadOverlay")
            };
            self.set_text(score_id, &summary.score.to_string());
            self.set_visible(overlay_id, true);
        }

        fn scored(&mut self, _score: u64) {
            if let Some(el) = self
                .element("scoreVal")
                .and_then(|el| el.dyn_into::<HtmlElement>().ok())
            {
                // Reading layout restarts the CSS animation
                let _ = el.class_list().remove_1("pulse");
                let _ = el.offset_width();
                let _ = el.class_list().add_1("pulse");
            }
        }

        fn theme_changed(&mut self, theme: Theme) {
            if let Some(root) = self.document.document_element() {
                let _ = root.set_attribute("data-theme", theme.as_str());
            }
            let (icon, label) = match theme {
                Theme::Dark => ("☀", "LIGHT MODE"),
                Theme::Light => ("◑", "DARK MODE"),
            };
            self.set_text("toggleIcon", icon);
            self.set_text("toggleLabel", label);
        }
    }

    /// Everything the browser callbacks share
    struct App {
        session: GameSession,
        scene: SceneBuilder,
        render_state: Option<RenderState>,
        canvas: HtmlCanvasElement,
        wrapper: Option<Element>,
    }

    impl App {
        /// CSS pixel size available to the board
        fn viewport(&self) -> (f32, f32) {
            match &self.wrapper {
                Some(w) => (w.client_width() as f32, w.client_height() as f32),
                None => (
                    self.canvas.client_width() as f32,
                    self.canvas.client_height() as f32,
                ),
            }
        }

        /// Size the canvas backing store for the current layout
        fn fit_canvas(&mut self) {
            let layout = *self.session.layout();
            let dpr = web_sys::window()
                .map(|w| w.device_pixel_ratio())
                .unwrap_or(1.0);
            let width = (layout.width as f64 * dpr) as u32;
            let height = (layout.height as f64 * dpr) as u32;
            self.canvas.set_width(width);
            self.canvas.set_height(height);
            let style = self.canvas.style();
            let _ = style.set_property("width", &format!("{}px", layout.width));
            let _ = style.set_property("height", &format!("{}px", layout.height));

            if let Some(rs) = self.render_state.as_mut() {
                rs.resize(width, height, (layout.width, layout.height));
            }
            self.scene.set_layout(layout);
        }

        fn resize(&mut self) {
            let (w, h) = self.viewport();
            self.session.resize(w, h);
            self.fit_canvas();
        }

        fn toggle_theme(&mut self) {
            let theme = self.session.toggle_theme();
            self.scene.set_palette(Palette::for_theme(theme));
            log::info!("Theme: {}", theme.as_str());
        }

        fn frame(&mut self, now: f64) {
            let report = self.session.frame(now);

            // A restart may have derived a new grid
            if self.scene.layout() != self.session.layout() {
                self.fit_canvas();
            }

            let phase = self.session.phase();
            let vertices = match report.render {
                Some(progress) => {
                    self.scene
                        .build(&RenderView::from_state(self.session.state()), progress, now)
                }
                None => self.scene.idle(),
            };
            let clear = self.scene.clear_color(phase);

            if let Some(rs) = self.render_state.as_mut() {
                match rs.render(&vertices, clear) {
                    Ok(_) => {}
                    Err(wgpu::SurfaceError::Lost) => rs.reconfigure(),
                    Err(wgpu::SurfaceError::OutOfMemory) => {
                        log::error!("Out of memory!");
                    }
                    Err(e) => log::warn!("Render error: {:?}", e),
                }
            }
        }
    }

    pub async fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Synx Snake starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("gameCanvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");
        let wrapper = document.get_element_by_id("canvasWrapper");

        let (client_w, client_h) = match &wrapper {
            Some(w) => (w.client_width() as f32, w.client_height() as f32),
            None => (canvas.client_width() as f32, canvas.client_height() as f32),
        };
        let layout = Layout::from_viewport(client_w, client_h);

        let seed = js_sys::Date::now() as u64;
        let presenter = DomPresenter {
            document: document.clone(),
        };
        let session = GameSession::new(
            layout,
            seed,
            Box::new(LocalStorage::new()),
            Box::new(presenter),
        );
        let scene = SceneBuilder::new(layout, Palette::for_theme(session.settings().theme));

        let app = Rc::new(RefCell::new(App {
            session,
            scene,
            render_state: None,
            canvas: canvas.clone(),
            wrapper,
        }));
        app.borrow_mut().fit_canvas();

        log::info!("Session initialized with seed: {}", seed);

        let instance = wgpu::Instance::new(&wgpu::InstanceDescriptor {
            backends: wgpu::Backends::BROWSER_WEBGPU | wgpu::Backends::GL,
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

        let (width, height) = (canvas.width(), canvas.height());
        match RenderState::new(surface, &adapter, width, height, (layout.width, layout.height)).await
        {
            Ok(rs) => app.borrow_mut().render_state = Some(rs),
            Err(e) => log::error!("Renderer unavailable: {}", e),
        }

        setup_keyboard(app.clone());
        setup_buttons(app.clone());
        setup_resize(app.clone());

        request_animation_frame(app);

        log::info!("Synx Snake running!");
    }

    fn setup_keyboard(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            if app.borrow_mut().session.on_key(&event.key()) {
                // Keep arrows and space from scrolling the page
                event.prevent_default();
            }
        });
        let _ = window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn on_click(document: &Document, id: &str, mut handler: impl FnMut() + 'static) {
        if let Some(btn) = document.get_element_by_id(id) {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                handler();
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_buttons(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        for id in ["startBtn", "restartBtn", "winRestartBtn"] {
            let app = app.clone();
            on_click(&document, id, move || app.borrow_mut().session.on_start());
        }

        {
            let app = app.clone();
            on_click(&document, "themeToggle", move || app.borrow_mut().toggle_theme());
        }

        // Difficulty selector: buttons carry data-diff="easy|normal|hard|insane"
        let Ok(buttons) = document.query_selector_all(".diff-btn") else {
            return;
        };
        for i in 0..buttons.length() {
            let Some(btn) = buttons
                .get(i)
                .and_then(|node| node.dyn_into::<HtmlElement>().ok())
            else {
                continue;
            };
            let Some(difficulty) = btn
                .dataset()
                .get("diff")
                .and_then(|d| Difficulty::from_str(&d))
            else {
                log::warn!("Difficulty button without a valid data-diff");
                continue;
            };

            // Difficulty is remembered between visits
            let classes = btn.class_list();
            let _ = if app.borrow().session.settings().difficulty == difficulty {
                classes.add_1("active")
            } else {
                classes.remove_1("active")
            };

            let app = app.clone();
            let document = document.clone();
            let target = btn.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                if let Ok(all) = document.query_selector_all(".diff-btn") {
                    for j in 0..all.length() {
                        if let Some(el) = all.get(j).and_then(|n| n.dyn_into::<Element>().ok()) {
                            let _ = el.class_list().remove_1("active");
                        }
                    }
                }
                let _ = target.class_list().add_1("active");
                app.borrow_mut().session.set_difficulty(difficulty);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_resize(app: Rc<RefCell<App>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
            app.borrow_mut().resize();
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
        app.borrow_mut().frame(time);
        request_animation_frame(app);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub async fn wasm_main() {
    wasm_game::run().await;
}

#[cfg(not(target_arch = "wasm32"))]
mod headless {
    use synx_snake::hud::LogPresenter;
    use synx_snake::persistence::FileStore;
    use synx_snake::renderer::{Palette, RenderView, SceneBuilder};
    use synx_snake::sim::{Difficulty, Direction, GamePhase, GameState, Position};
    use synx_snake::{GameSession, Layout};

    /// Simulated display refresh
    const FRAME_MS: f64 = 1000.0 / 60.0;
    /// Ten minutes of frames
    const MAX_FRAMES: u64 = 60 * 60 * 10;

    /// Greedy pick: the safe direction that gets closest to the food
    pub fn autopilot(state: &GameState) -> Option<Direction> {
        let head = state.head();
        let body = &state.snake[..state.len().saturating_sub(1)];
        let distance = |p: Position| (p.x - state.food.x).abs() + (p.y - state.food.y).abs();

        Direction::ALL
            .into_iter()
            .filter(|d| !d.is_reverse_of(state.direction))
            .map(|d| (d, head.step(d)))
            .filter(|(_, next)| state.in_bounds(*next) && !body.contains(next))
            .min_by_key(|(_, next)| distance(*next))
            .map(|(d, _)| d)
    }

    pub fn run() {
        let difficulty = std::env::args()
            .nth(1)
            .and_then(|arg| Difficulty::from_str(&arg))
            .unwrap_or_default();

        let store = FileStore::open(std::env::temp_dir().join("synx-snake").join("store.json"));
        let seed = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);

        let mut session = GameSession::new(
            Layout::from_viewport(880.0, 440.0),
            seed,
            Box::new(store),
            Box::new(LogPresenter),
        );
        session.set_difficulty(difficulty);
        let mut scene = SceneBuilder::new(
            *session.layout(),
            Palette::for_theme(session.settings().theme),
        );

        session.on_start();
        let mut now = 0.0;
        let mut frames = 0u64;
        let mut peak_vertices = 0usize;

        while frames < MAX_FRAMES && session.phase() == GamePhase::Running {
            if session.queue().is_empty() {
                if let Some(dir) = autopilot(session.state()) {
                    session.on_direction(dir);
                }
            }

            let report = session.frame(now);
            scene.set_layout(*session.layout());
            let vertices = match report.render {
                Some(progress) => {
                    scene.build(&RenderView::from_state(session.state()), progress, now)
                }
                None => scene.idle(),
            };
            peak_vertices = peak_vertices.max(vertices.len());

            now += FRAME_MS;
            frames += 1;
        }

        let state = session.state();
        println!(
            "{:?} after {} ticks: score {}, length {}, level {}, best {} ({} frames, peak {} vertices)",
            state.phase,
            state.ticks,
            state.score,
            state.len(),
            state.level,
            session.high_score(),
            frames,
            peak_vertices
        );
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Synx Snake (native) starting...");
    log::info!("Native mode runs a headless autopilot game - run with `trunk serve` for the web version");
    headless::run();
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
