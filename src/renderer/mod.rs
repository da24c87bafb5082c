//! 2D rendering
//!
//! Drawing goes through the [`RenderSurface`] trait so the frame layout can be
//! exercised without a browser. The HTML canvas backend lives in `canvas`.

#[cfg(target_arch = "wasm32")]
pub mod canvas;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;

use glam::Vec2;

use crate::consts::{MAX_BULLETS, TITLE_END_MS, TITLE_START_MS};
use crate::sim::{Bounds, Ship, World};

/// Minimal drawing API the game needs from a 2D raster surface
pub trait RenderSurface {
    /// Fill the whole surface with one color
    fn clear(&mut self, size: Bounds, color: &str);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32);
    /// Closed outline, optionally filled
    fn polygon(&mut self, points: &[Vec2], stroke: &str, fill: Option<&str>, line_width: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: &str, line_width: f32);
    /// Disc filled with a gradient from `inner` color at `inner_radius` to
    /// `outer` color at `outer_radius`
    fn radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: &str,
        outer: &str,
    );
    fn text(&mut self, text: &str, pos: Vec2, color: &str);
    /// Title image centered horizontally, a sixth of the way down.
    /// Surfaces without a loaded image draw nothing.
    fn title_image(&mut self, size: Bounds, alpha: f64);
}

/// What to draw besides the playfield
#[derive(Debug, Clone, Copy)]
pub struct DrawOptions {
    pub show_stats: bool,
    pub show_title: bool,
}

impl Default for DrawOptions {
    fn default() -> Self {
        Self {
            show_stats: true,
            show_title: true,
        }
    }
}

/// Title image opacity at `tick` for a fade window of `[start, end]`.
///
/// The window splits into thirds: fade in, hold, fade out. `None` outside the
/// window.
pub fn title_alpha(tick: f64, start: f64, end: f64) -> Option<f64> {
    if tick < start || tick > end {
        return None;
    }

    let offset = tick - start;
    let duration = end - start;
    let third = (duration / 3.0).trunc();
    let fade_out_offset = duration - third;

    let alpha = if offset < third {
        offset / third
    } else if offset <= fade_out_offset {
        1.0
    } else {
        (third - (offset - fade_out_offset)) / third
    };
    Some(alpha)
}

/// Stats overlay text, one entry per line
pub fn stats_lines(world: &World) -> Vec<String> {
    let shields = |ship: &Ship| {
        if ship.is_dead() {
            "destroyed".to_string()
        } else {
            format!("{:.0}", ship.shields)
        }
    };
    vec![
        format!("Rules: {}", world.ruleset.kind.as_str()),
        format!("Shields: {}", shields(&world.player)),
        format!("Enemy shields: {}", shields(&world.enemy)),
        format!("Bullets: {}/{}", world.bullets.len(), MAX_BULLETS),
    ]
}

fn draw_ship<S: RenderSurface + ?Sized>(surface: &mut S, ship: &Ship) {
    if ship.is_dead() {
        return;
    }

    surface.polygon(&shapes::ship_hull(ship), "lightgreen", Some("darkgreen"), 2.0);

    surface.radial_gradient(
        ship.pos,
        ship.shields * 0.6,
        ship.shields,
        "rgba(173, 216, 230, 0)",
        "rgba(173, 216, 230, 0.25)",
    );
    surface.stroke_circle(ship.pos, ship.shields, "lightblue", 3.0);
}

/// Draw one frame: background, stars, ships, bullets, stats, title
pub fn draw_frame<S: RenderSurface + ?Sized>(
    surface: &mut S,
    world: &World,
    size: Bounds,
    time_ms: f64,
    options: DrawOptions,
) {
    surface.clear(size, "black");

    for star in &world.stars {
        surface.fill_circle(
            Vec2::new(star.x as f32, star.y as f32),
            shapes::star_radius(star),
            &shapes::star_color(star),
        );
    }

    draw_ship(surface, &world.player);
    draw_ship(surface, &world.enemy);

    for bullet in &world.bullets {
        let (from, to) = shapes::bullet_segment(bullet, world.ruleset.bullet_length);
        surface.line(from, to, "yellow", 2.0);
    }

    if options.show_stats {
        for (i, line) in stats_lines(world).iter().enumerate() {
            surface.text(line, Vec2::new(10.0, 20.0 + i as f32 * 16.0), "white");
        }
    }

    if options.show_title {
        if let Some(alpha) = title_alpha(time_ms, TITLE_START_MS, TITLE_END_MS) {
            surface.title_image(size, alpha);
        }
    }
}
