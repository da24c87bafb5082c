//! Space Ping entry point
//!
//! Handles platform-specific initialization and runs the game loop.

#[cfg(target_arch = "wasm32")]
use wasm_bindgen::prelude::*;

#[cfg(target_arch = "wasm32")]
mod wasm_game {
    use std::cell::RefCell;
    use std::rc::Rc;
    use wasm_bindgen::prelude::*;
    use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, KeyboardEvent};

    use space_ping::Settings;
    use space_ping::platform::{EventQueue, FrameInput, InputEvent};
    use space_ping::renderer::{CanvasSurface, DrawOptions, draw_frame};
    use space_ping::sim::{Bounds, Key, ShipId, SimEvent, World, tick};

    /// Game instance holding all state
    struct Game {
        world: World,
        input: FrameInput,
        queue: EventQueue,
        canvas: HtmlCanvasElement,
        surface: CanvasSurface,
        options: DrawOptions,
    }

    impl Game {
        /// Apply queued input and advance one frame
        fn update(&mut self) {
            let previous = self.input.bounds;
            let actions = self.input.begin_frame(&self.queue);

            let bounds = self.input.bounds;
            if bounds != previous {
                self.canvas.set_width(bounds.width as u32);
                self.canvas.set_height(bounds.height as u32);
            }

            tick(&mut self.world, &actions, bounds);

            for event in &self.world.events {
                match event {
                    SimEvent::ShipDestroyed { ship } => {
                        let name = match ship {
                            ShipId::Player => "Player",
                            ShipId::Enemy => "Enemy",
                        };
                        let pos = self.world.ship(*ship).pos;
                        log::info!(
                            "{} destroyed at ({:.0}, {:.0}) on frame {}",
                            name,
                            pos.x,
                            pos.y,
                            self.world.frame
                        );
                    }
                    SimEvent::ShipsCollided => log::debug!("Ships collided"),
                    _ => {}
                }
            }
        }

        /// Render the current frame
        fn render(&mut self, time: f64) {
            draw_frame(
                &mut self.surface,
                &self.world,
                self.input.bounds,
                time,
                self.options,
            );
        }
    }

    fn viewport_size() -> Bounds {
        let window = web_sys::window().expect("no window");
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
        Bounds::new(width as f32, height as f32)
    }

    pub fn run() {
        console_error_panic_hook::set_once();
        console_log::init_with_level(log::Level::Info).expect("Failed to init logger");

        log::info!("Space Ping starting...");

        let window = web_sys::window().expect("no window");
        let document = window.document().expect("no document");

        let canvas: HtmlCanvasElement = document
            .get_element_by_id("canvas")
            .expect("no canvas")
            .dyn_into()
            .expect("not a canvas");

        let ctx: CanvasRenderingContext2d = canvas
            .get_context("2d")
            .ok()
            .flatten()
            .expect("no 2d context")
            .dyn_into()
            .expect("not a 2d context");

        let mut settings = Settings::load();
        if let Ok(query) = window.location().search() {
            if !query.is_empty() {
                // Overrides stick for later visits without the query string
                settings.apply_query(&query);
                settings.save();
            }
        }
        log::info!("Rules: {}", settings.ruleset.as_str());

        let bounds = viewport_size();
        canvas.set_width(bounds.width as u32);
        canvas.set_height(bounds.height as u32);

        let seed = js_sys::Date::now() as u64;
        let world = World::new(seed, settings.ruleset(), bounds, settings.star_count);
        log::info!("World created with seed: {}", world.seed);

        let mut surface = CanvasSurface::new(ctx);
        if settings.show_title {
            surface.load_title("Space-Ping.png");
        }

        let queue = EventQueue::new();
        setup_input_handlers(&queue);

        let game = Rc::new(RefCell::new(Game {
            world,
            input: FrameInput::new(bounds),
            queue,
            canvas,
            surface,
            options: DrawOptions {
                show_stats: settings.show_stats,
                show_title: settings.show_title,
            },
        }));

        request_animation_frame(game);

        log::info!("Space Ping running!");
    }

    fn setup_input_handlers(queue: &EventQueue) {
        let window = web_sys::window().expect("no window");

        // Key down
        {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    // Keep arrows and space from scrolling the page
                    event.prevent_default();
                    queue.push(InputEvent::KeyDown(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keydown", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Key up
        {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |event: KeyboardEvent| {
                if let Some(key) = Key::from_dom_key(&event.key()) {
                    event.prevent_default();
                    queue.push(InputEvent::KeyUp(key));
                }
            });
            let _ = window
                .add_event_listener_with_callback("keyup", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Resize
        {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                let size = viewport_size();
                queue.push(InputEvent::Resize {
                    width: size.width,
                    height: size.height,
                });
            });
            let _ = window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref());
            closure.forget();
        }

        // Window blur - key-up events are lost while unfocused
        {
            let queue = queue.clone();
            let closure = Closure::<dyn FnMut(_)>::new(move |_event: web_sys::Event| {
                queue.push(InputEvent::Blur);
            });
            let _ =
                window.add_event_listener_with_callback("blur", closure.as_ref().unchecked_ref());
            closure.forget();
        }
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
            g.update();
            g.render(time);
        }

        request_animation_frame(game);
    }
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen(start)]
pub fn wasm_main() {
    wasm_game::run();
}

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Space Ping (native) starting...");
    log::info!("Native mode runs a headless demo - run with `trunk serve` for the web version");

    let rules = std::env::args()
        .nth(1)
        .and_then(|arg| space_ping::RulesetKind::from_str(&arg))
        .unwrap_or_default();
    headless_demo(rules);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is wasm_main, this is just to satisfy the compiler
}

/// Play a short scripted match and report the outcome
#[cfg(not(target_arch = "wasm32"))]
fn headless_demo(rules: space_ping::RulesetKind) {
    use space_ping::consts::NUM_STARS;
    use space_ping::platform::{EventQueue, FrameInput, InputEvent};
    use space_ping::sim::{Bounds, Key, Ruleset, SimEvent, World, tick};

    const FRAMES: u64 = 600;

    let bounds = Bounds::new(800.0, 600.0);
    let mut world = World::new(42, Ruleset::from(rules), bounds, NUM_STARS);
    let mut input = FrameInput::new(bounds);
    let queue = EventQueue::new();

    log::info!(
        "Playing {} frames with {} rules (seed {})",
        FRAMES,
        rules.as_str(),
        world.seed
    );

    for frame in 0..FRAMES {
        // Turn toward the enemy, give one nudge of thrust, then hold fire
        match frame {
            0 => queue.push(InputEvent::KeyDown(Key::Right)),
            23 => queue.push(InputEvent::KeyUp(Key::Right)),
            30 => queue.push(InputEvent::KeyDown(Key::Up)),
            31 => queue.push(InputEvent::KeyUp(Key::Up)),
            60 => queue.push(InputEvent::KeyDown(Key::Space)),
            _ => {}
        }

        let actions = input.begin_frame(&queue);
        tick(&mut world, &actions, input.bounds);

        for event in &world.events {
            match event {
                SimEvent::ShieldHit { shields, .. } => {
                    log::debug!("Frame {}: enemy shields {}", world.frame, shields);
                }
                SimEvent::ShipDestroyed { ship } => {
                    let pos = world.ship(*ship).pos;
                    log::info!("Frame {}: {:?} destroyed at {}", world.frame, ship, pos);
                }
                SimEvent::ShipsCollided => log::info!("Frame {}: ships collided", world.frame),
                SimEvent::BulletFired { .. } => {}
            }
        }
    }

    match serde_json::to_string_pretty(&world) {
        Ok(json) => println!("{json}"),
        Err(e) => log::error!("Could not serialize final world: {}", e),
    }
    println!(
        "Player shields: {}, enemy shields: {}",
        world.player.shields, world.enemy.shields
    );
}
