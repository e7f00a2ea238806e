//! Silverball entry point
//!
//! Handles platform-specific initialization and runs the game loop: the
//! canvas-2D render backend, DOM score/lives display, and key/button input
//! on wasm; a headless demo run natively.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;

    use glam::Vec2;
    use wasm_bindgen::JsCast;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, Document, HtmlCanvasElement};

    use silverball::consts::*;
    use silverball::render::{self, Renderer, css_color};
    use silverball::sim::{GameState, Table, TickInput, tick};

    /// Canvas-2D implementation of the render seam
    ///
    /// Every call is failure-tolerant: a context error draws nothing and
    /// the simulation runs on.
    struct CanvasRenderer {
        ctx: CanvasRenderingContext2d,
        width: f64,
        height: f64,
    }

    impl Renderer for CanvasRenderer {
        fn clear(&mut self) {
            self.ctx.clear_rect(0.0, 0.0, self.width, self.height);
        }

        fn draw_circle(&mut self, center: Vec2, radius: f32, color: u32) {
            self.ctx.begin_path();
            if self
                .ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    0.0,
                    std::f64::consts::TAU,
                )
                .is_err()
            {
                return;
            }
            self.ctx.set_fill_style_str(&css_color(color));
            self.ctx.fill();
            self.ctx.close_path();
        }

        fn draw_polygon(&mut self, points: &[Vec2], origin: Vec2, angle: f32, color: u32) {
            let Some(first) = points.first() else {
                return;
            };
            self.ctx.save();
            let _ = self.ctx.translate(origin.x as f64, origin.y as f64);
            let _ = self.ctx.rotate(angle as f64);
            self.ctx.set_fill_style_str(&css_color(color));
            self.ctx.begin_path();
            self.ctx.move_to(first.x as f64, first.y as f64);
            for point in &points[1..] {
                self.ctx.line_to(point.x as f64, point.y as f64);
            }
            self.ctx.close_path();
            self.ctx.fill();
            self.ctx.restore();
        }

        fn draw_line(&mut self, from: Vec2, to: Vec2, width: f32, color: u32) {
            self.ctx.begin_path();
            self.ctx.move_to(from.x as f64, from.y as f64);
            self.ctx.line_to(to.x as f64, to.y as f64);
            self.ctx.set_line_width(width as f64);
            self.ctx.set_stroke_style_str(&css_color(color));
            self.ctx.stroke();
        }

        fn draw_arc(
            &mut self,
            center: Vec2,
            radius: f32,
            start: f32,
            end: f32,
            width: f32,
            color: u32,
        ) {
            self.ctx.begin_path();
            if self
                .ctx
                .arc(
                    center.x as f64,
                    center.y as f64,
                    radius as f64,
                    start as f64,
                    end as f64,
                )
                .is_err()
            {
                return;
            }
            self.ctx.set_line_width(width as f64);
            self.ctx.set_stroke_style_str(&css_color(color));
            self.ctx.stroke();
        }
    }

    /// Game instance holding all state
    struct Game {
        state: GameState,
        table: Table,
        input: TickInput,
        renderer: CanvasRenderer,
        accumulator: f64,
        last_time: f64,
    }

    impl Game {
        /// Run fixed-rate simulation ticks covering the elapsed wall time.
        /// The per-tick physics constants assume 60 Hz, so a faster or
        /// slower display changes how many ticks a frame gets, not how far
        /// each tick moves the ball.
        fn update(&mut self, dt: f64) {
            self.accumulator += dt.min(0.1);

            let mut substeps = 0;
            while self.accumulator >= f64::from(TICK_DT) && substeps < MAX_SUBSTEPS {
                let events = tick(&mut self.state, &self.input, &self.table);
                self.accumulator -= f64::from(TICK_DT);
                substeps += 1;

                // One-shot inputs are consumed by the tick that sees them
                self.input.launch = false;

                if events.score_changed {
                    update_score(self.state.score);
                }
                if events.lives_changed {
                    update_balls(self.state.balls_remaining);
                }
                if events.game_reset {
                    log::info!("last ball drained - table reset");
                }
            }
        }

        fn render(&mut self) {
            render::draw_scene(&self.state, &self.table, &mut self.renderer);
        }
    }

    fn element(id: &str) -> Option<web_sys::Element> {
        web_sys::window()?.document()?.get_element_by_id(id)
    }

    /// Push the score to the display; silently skipped if the output
    /// element is missing
    fn update_score(score: u32) {
        if let Some(el) = element("score") {
            el.set_text_content(Some(&score.to_string()));
        }
    }

    fn update_balls(remaining: u8) {
        if let Some(el) = element("balls") {
            el.set_text_content(Some(&remaining.to_string()));
        }
    }

    pub fn run() -> Result<(), JsValue> {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("failed to init logger");

        log::info!("Silverball starting...");

        let window = web_sys::window().ok_or("no window")?;
        let document = window.document().ok_or("no document")?;

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("table")
            .ok_or("no table canvas")?
            .dyn_into()?;
        canvas.set_width(TABLE_WIDTH as u32);
        canvas.set_height(TABLE_HEIGHT as u32);

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")?
            .ok_or("no 2d context")?
            .dyn_into()?;

        let seed = js_sys::Date::now() as u64;
        let game = Rc::new(RefCell::new(Game {
            state: GameState::new(seed),
            table: Table::standard(),
            input: TickInput::default(),
            renderer: CanvasRenderer {
                ctx,
                width: f64::from(TABLE_WIDTH),
                height: f64::from(TABLE_HEIGHT),
            },
            accumulator: 0.0,
            last_time: 0.0,
        }));

        log::info!("table ready, seed {seed}");

        setup_input_handlers(&document, game.clone())?;

        // Seed the display before the first tick
        {
            let g = game.borrow();
            update_score(g.state.score);
            update_balls(g.state.balls_remaining);
        }

        request_animation_frame(game);
        Ok(())
    }

    fn setup_input_handlers(document: &Document, game: Rc<RefCell<Game>>) -> Result<(), JsValue> {
        let window = web_sys::window().ok_or("no window")?;

        // Keyboard: arrows hold the flippers, space launches
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left_flipper = true,
                    "ArrowRight" => g.input.right_flipper = true,
                    " " => g.input.launch = true,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }
        {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: web_sys::KeyboardEvent| {
                let mut g = game.borrow_mut();
                match event.key().as_str() {
                    "ArrowLeft" => g.input.left_flipper = false,
                    "ArrowRight" => g.input.right_flipper = false,
                    _ => {}
                }
            });
            window.add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        // On-screen buttons mirror the same logical signals
        bind_hold_button(document, "btn-left", game.clone(), |input, held| {
            input.left_flipper = held;
        })?;
        bind_hold_button(document, "btn-right", game.clone(), |input, held| {
            input.right_flipper = held;
        })?;

        if let Some(btn) = document.get_element_by_id("btn-launch") {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                game.borrow_mut().input.launch = true;
            });
            btn.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref())?;
            closure.forget();
        } else {
            log::warn!("missing #btn-launch, keyboard launch only");
        }

        Ok(())
    }

    /// Wire mousedown/mouseup/mouseleave on one button to a held flag.
    /// Leaving the button mid-press counts as release.
    fn bind_hold_button(
        document: &Document,
        id: &str,
        game: Rc<RefCell<Game>>,
        set: impl Fn(&mut TickInput, bool) + Copy + 'static,
    ) -> Result<(), JsValue> {
        let Some(btn) = document.get_element_by_id(id) else {
            log::warn!("missing #{id}, keyboard only for that flipper");
            return Ok(());
        };

        for (event, held) in [("mousedown", true), ("mouseup", false), ("mouseleave", false)] {
            let game = game.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::MouseEvent| {
                set(&mut game.borrow_mut().input, held);
            });
            btn.add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())?;
            closure.forget();
        }

        Ok(())
    }

    fn request_animation_frame(game: Rc<RefCell<Game>>) {
        let window = web_sys::window().expect("no window");
        let closure = Closure::once(move |time: f64| {
            game_loop(game, time);
        });
        let _ = window.request_animation_frame(closure.as_ref().unchecked_ref());
        closure.forget();
    }

    fn game_loop(game: Rc<RefCell<Game>>, time: f64) {
        {
            let mut g = game.borrow_mut();

            let dt = if g.last_time > 0.0 {
                (time - g.last_time) / 1000.0
            } else {
                f64::from(TICK_DT)
            };
            g.last_time = time;

            g.update(dt);
            g.render();
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    if let Err(err) = wasm_game::run() {
        web_sys::console::error_1(&err);
    }
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use silverball::render::{NullRenderer, draw_scene};
    use silverball::sim::{GameState, Table, TickInput, tick};

    env_logger::init();
    log::info!("Silverball (native) starting...");
    log::info!("headless demo - serve the wasm build for the playable table");

    let mut state = GameState::new(0xB411);
    let table = Table::standard();
    let mut renderer = NullRenderer;

    // Launch, then play ten simulated seconds with the left flipper held
    let launch = TickInput {
        launch: true,
        ..Default::default()
    };
    tick(&mut state, &launch, &table);

    let held = TickInput {
        left_flipper: true,
        ..Default::default()
    };
    for _ in 0..600 {
        tick(&mut state, &held, &table);
        draw_scene(&state, &table, &mut renderer);
    }

    log::info!(
        "demo finished: score {}, balls remaining {}",
        state.score,
        state.balls_remaining
    );
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}
