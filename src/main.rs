//! Lane Runner entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

    use lane_runner::consts::*;
    use lane_runner::sim::{GamePhase, GameState, TickInput, tick};
    use lane_runner::{HighScores, Settings, camera};

    /// Coin frame palette, one tint per animation frame
    const COIN_FRAMES: [&str; COIN_FRAME_COUNT] = [
        "#ffd700", "#ffde33", "#ffe666", "#fff0a0", "#ffe666", "#ffde33", "#ffc400",
    ];

    /// Game instance holding all state
    struct Game {
        state: GameState,
        settings: Settings,
        highscores: HighScores,
        accumulator: f32,
        last_time: f64,
        input: TickInput,
        // FPS tracking
        frame_times: [f64; 60],
        frame_index: usize,
        fps: u32,
        // Track phase for high-score recording
        last_phase: GamePhase,
    }

    impl Game {
        fn new(seed: u64) -> Self {
            Self {
                state: GameState::new(seed),
                settings: Settings::load(),
                highscores: HighScores::load(),
                accumulator: 0.0,
                last_time: 0.0,
                input: TickInput::default(),
                frame_times: [0.0; 60],
                frame_index: 0,
                fps: 0,
                last_phase: GamePhase::Running,
            }
        }

        /// Run simulation ticks
        fn update(&mut self, dt: f32, time: f64) {
            let dt = dt.min(0.1);
            self.accumulator += dt;

            let mut substeps = 0;
            while self.accumulator >= SIM_DT && substeps < MAX_SUBSTEPS {
                let input = self.input.clone();
                tick(&mut self.state, &input, SIM_DT);
                self.accumulator -= SIM_DT;
                substeps += 1;

                // Clear one-shot inputs after processing
                self.input = TickInput::default();
            }

            // Track frame times for FPS
            self.frame_times[self.frame_index] = time;
            self.frame_index = (self.frame_index + 1) % 60;

            let oldest_time = self.frame_times[self.frame_index];
            if oldest_time > 0.0 {
                let elapsed = time - oldest_time;
                if elapsed > 0.0 {
                    self.fps = (60000.0 / elapsed).round() as u32;
                }
            }

            // Record the run on the game-over transition
            let phase = self.state.phase;
            if phase == GamePhase::GameOver && self.last_phase != GamePhase::GameOver {
                let rank = self.highscores.add_score(
                    self.state.score,
                    self.state.distance() as u32,
                    self.state.coins_collected,
                    js_sys::Date::now(),
                );
                if let Some(rank) = rank {
                    log::info!("new high score, rank {}", rank);
                    self.highscores.save();
                }
            }
            self.last_phase = phase;
        }

        /// Reset game state for restart
        fn restart(&mut self, seed: u64) {
            self.state = GameState::new(seed);
            self.accumulator = 0.0;
            self.input = TickInput::default();
        }

        /// Project a world point to canvas coordinates through the follow
        /// camera. Returns None for points behind the camera.
        fn project(
            view: &glam::Mat4,
            p: glam::Vec3,
            w: f64,
            h: f64,
        ) -> Option<(f64, f64, f64)> {
            let v = view.transform_point3(p);
            if v.z > -0.1 {
                return None;
            }
            let focal = h * 1.2;
            let sx = w / 2.0 + focal * (v.x / -v.z) as f64;
            let sy = h / 2.0 - focal * (v.y / -v.z) as f64;
            // Perspective scale for sizing sprites
            let scale = focal / (-v.z) as f64;
            Some((sx, sy, scale))
        }

        /// Draw the simulation state. This is a HUD-grade projection of the
        /// state, not a rendering pipeline: flat rects for obstacles, squashed
        /// discs for spinning coins, lane guides for the ground.
        fn draw(&self, ctx: &CanvasRenderingContext2d, w: f64, h: f64) {
            use glam::Vec3;

            let (sky, ground, lane_line) = if self.settings.high_contrast {
                ("#000000", "#222222", "#ffffff")
            } else {
                ("#0b0e1a", "#30343f", "#6b7280")
            };

            ctx.set_fill_style_str(sky);
            ctx.fill_rect(0.0, 0.0, w, h);

            let pose = camera::follow(&self.state.player);
            let view = pose.view_matrix();
            let player_z = self.state.player.z;

            // Ground strip
            ctx.set_fill_style_str(ground);
            ctx.fill_rect(0.0, h / 2.0, w, h / 2.0);

            // Lane guide lines from just behind the player to the horizon
            ctx.set_stroke_style_str(lane_line);
            for edge in [-6.0f32, -2.0, 2.0, 6.0] {
                let near = Vec3::new(edge, 0.0, player_z - 5.0);
                let far = Vec3::new(edge, 0.0, player_z + HORIZON_SPAN);
                if let (Some((x0, y0, _)), Some((x1, y1, _))) = (
                    Self::project(&view, near, w, h),
                    Self::project(&view, far, w, h),
                ) {
                    ctx.begin_path();
                    ctx.move_to(x0, y0);
                    ctx.line_to(x1, y1);
                    ctx.stroke();
                }
            }

            // Obstacles, far to near
            ctx.set_fill_style_str("#e03131");
            for obstacle in self.state.obstacles.iter().rev() {
                let center = Vec3::new(obstacle.x(), ENTITY_Y, obstacle.z);
                if let Some((sx, sy, scale)) = Self::project(&view, center, w, h) {
                    let half = OBSTACLE_HALF as f64 * scale;
                    ctx.fill_rect(sx - half, sy - half, half * 2.0, half * 2.0);
                }
            }

            // Coins: squash the disc by the spin angle to fake rotation
            for coin in self.state.coins.iter().rev() {
                let center = Vec3::new(coin.x(), ENTITY_Y, coin.z);
                if let Some((sx, sy, scale)) = Self::project(&view, center, w, h) {
                    let r = COIN_HALF as f64 * scale;
                    let squash = coin.rotation_deg.to_radians().cos().abs().max(0.15) as f64;
                    ctx.set_fill_style_str(COIN_FRAMES[coin.frame]);
                    ctx.begin_path();
                    let _ = ctx.ellipse(sx, sy, r * squash, r, 0.0, 0.0, std::f64::consts::TAU);
                    ctx.fill();
                }
            }

            // Player
            let p = &self.state.player;
            if let Some((sx, sy, scale)) =
                Self::project(&view, Vec3::new(p.x, p.y + 1.0, p.z), w, h)
            {
                let half_w = 0.5 * scale;
                let half_h = 1.0 * scale;
                ctx.set_fill_style_str("#f1f3f5");
                ctx.fill_rect(sx - half_w, sy - half_h, half_w * 2.0, half_h * 2.0);
            }
        }

        /// Update HUD elements in DOM
        fn update_hud(&self) {
            let window = web_sys::window().unwrap();
            let document = window.document().unwrap();

            if let Some(el) = document.get_element_by_id("hud-score") {
                el.set_text_content(Some(&self.state.score.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-coins") {
                el.set_text_content(Some(&self.state.coins_collected.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-best") {
                let best = self.highscores.top_score().unwrap_or(0);
                el.set_text_content(Some(&best.to_string()));
            }

            if let Some(el) = document.get_element_by_id("hud-fps") {
                if self.settings.show_fps {
                    el.set_text_content(Some(&self.fps.to_string()));
                    let _ = el.set_attribute("class", "hud-item");
                } else {
                    let _ = el.set_attribute("class", "hud-item hidden");
                }
            }

            // Show/hide pause overlay
            if let Some(el) = document.get_element_by_id("paused") {
                if self.state.phase == GamePhase::Paused {
                    let _ = el.set_attribute("class", "");
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }

            // Show/hide game over overlay and restart button
            if let Some(el) = document.get_element_by_id("game-over") {
                if self.state.phase == GamePhase::GameOver {
                    let _ = el.set_attribute("class", "");
                    if let Some(score_el) = document.get_element_by_id("final-score") {
                        score_el.set_text_content(Some(&self.state.score.to_string()));
                    }
                    if let Some(coins_el) = document.get_element_by_id("final-coins") {
                        coins_el.set_text_content(Some(&self.state.coins_collected.to_string()));
                    }
                } else {
                    let _ = el.set_attribute("class", "hidden");
                }
            }
        }
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Lane Runner starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        // Set canvas size
        let dpr = window.device_pixel_ratio();
        let client_w = canvas.client_width();
        let client_h = canvas.client_height();
        canvas.set_width((client_w as f64 * dpr) as u32);
        canvas.set_height((client_h as f64 * dpr) as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .expect("no 2d context")
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");
        let _ = ctx.scale(dpr, dpr);

        // Initialize game
        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game::new(seed)));
        log::info!("Game initialized with seed: {}", seed);

        setup_input_handlers(game.clone());
        setup_restart_button(game.clone());
        setup_auto_pause(game.clone());

        // Start game loop
        request_animation_frame(game, ctx, client_w as f64, client_h as f64);

        log::info!("Lane Runner running!");
    }

    fn setup_input_handlers(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
            let mut g = game.borrow_mut();
            match event.key().as_str() {
                "a" | "A" | "ArrowLeft" => g.input.steer_left = true,
                "d" | "D" | "ArrowRight" => g.input.steer_right = true,
                " " | "ArrowUp" => g.input.jump = true,
                "r" | "R" => g.input.restart = true,
                "Escape" => g.input.pause = true,
                _ => {}
            }
        });
        let _ =
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn request_animation_frame(
        game: Rc<RefCell<Game>>,
        ctx: CanvasRenderingContext2d,
        w: f64,
        h: f64,
    ) {
        let window = web_sys::window().unwrap();
        let closure = Closure::once(move |time: f64| {
            game_loop(game, ctx, w, h, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, ctx: CanvasRenderingContext2d, w: f64, h: f64, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                ((time - g.last_time) / 1000.0) as f32
            } else {
                SIM_DT
            };
            g.last_time = time;

            g.update(dt, time);
            g.draw(&ctx, w, h);
            g.update_hud();
        }

        request_animation_frame(game, ctx, w, h);
    }

    fn setup_restart_button(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        if let Some(btn) = document.get_element_by_id("restart-btn") {
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                let seed = js_sys::Date::now() as u64;
                game.borrow_mut().restart(seed);
                log::info!("Game restarted with seed: {}", seed);
            });
            let _ = btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }

    fn setup_auto_pause(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().unwrap();
        let document = window.document().unwrap();

        // Visibility change (tab switch, minimize)
        {
            let game = game.clone();
            let document_clone = document.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                if document_clone.visibility_state() == web_sys::VisibilityState::Hidden {
                    let mut g = game.borrow_mut();
                    if g.settings.auto_pause_on_blur && g.state.phase == GamePhase::Running {
                        g.input.pause = true;
                        log::info!("Auto-paused (tab hidden)");
                    }
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
                let mut g = game.borrow_mut();
                if g.settings.auto_pause_on_blur && g.state.phase == GamePhase::Running {
                    g.input.pause = true;
                    log::info!("Auto-paused (window blur)");
                }
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use lane_runner::consts::*;
    use lane_runner::sim::{GamePhase, GameState, TickInput, tick};

    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|s| s.parse().ok())
        .unwrap_or(42);

    log::info!("Lane Runner (native) headless demo, seed {}", seed);
    log::info!("Web version: build with trunk/wasm-pack for the playable game");

    let mut state = GameState::new(seed);

    // Autopilot: steer toward an obstacle-free lane of the nearest wave
    // ahead. The lane constraint guarantees one always exists.
    let max_ticks = 10 * 60 * 120; // 10 minutes of simulated time
    for _ in 0..max_ticks {
        let mut input = TickInput::default();

        let next_wave = state
            .waves
            .iter()
            .filter(|w| w.z > state.player.z)
            .min_by(|a, b| a.z.total_cmp(&b.z));

        if let Some(wave) = next_wave {
            let blocked: Vec<usize> = state
                .obstacles
                .iter()
                .filter(|o| o.wave_id == wave.id)
                .map(|o| o.lane)
                .collect();

            if blocked.contains(&state.player.lane) && state.player.slide.is_none() {
                let target = (0..LANES.len())
                    .filter(|l| !blocked.contains(l))
                    .min_by_key(|l| l.abs_diff(state.player.lane));
                if let Some(target) = target {
                    if target < state.player.lane {
                        input.steer_left = true;
                    } else if target > state.player.lane {
                        input.steer_right = true;
                    }
                }
            }
        }

        tick(&mut state, &input, SIM_DT);
        if state.phase == GamePhase::GameOver {
            break;
        }
    }

    log::info!(
        "demo finished: distance {:.0}, coins {}, score {}, phase {:?}",
        state.distance(),
        state.coins_collected,
        state.score,
        state.phase
    );
    println!(
        "score {} (distance {:.0}, {} coins)",
        state.score,
        state.distance(),
        state.coins_collected
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
