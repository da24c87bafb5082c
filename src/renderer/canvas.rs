//! HTML canvas backend

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use super::RenderSurface;
use crate::sim::Bounds;

/// Draws onto a `CanvasRenderingContext2d`
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    title: Option<HtmlImageElement>,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d) -> Self {
        Self { ctx, title: None }
    }

    /// Start loading the title image; it is drawn once the browser has decoded it
    pub fn load_title(&mut self, src: &str) {
        match HtmlImageElement::new() {
            Ok(image) => {
                image.set_src(src);
                self.title = Some(image);
            }
            Err(e) => log::warn!("Could not create title image: {:?}", e),
        }
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius.max(0.0) as f64, 0.0, TAU);
    }
}

impl RenderSurface for CanvasSurface {
    fn clear(&mut self, size: Bounds, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.ctx
            .fill_rect(0.0, 0.0, size.width as f64, size.height as f64);
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: &str) {
        self.ctx.set_fill_style_str(color);
        self.circle_path(center, radius);
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.circle_path(center, radius);
        self.ctx.stroke();
    }

    fn polygon(&mut self, points: &[Vec2], stroke: &str, fill: Option<&str>, line_width: f32) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();

        if let Some(fill) = fill {
            self.ctx.set_fill_style_str(fill);
            self.ctx.fill();
        }
        self.ctx.set_stroke_style_str(stroke);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.stroke();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: &str, line_width: f32) {
        self.ctx.set_stroke_style_str(color);
        self.ctx.set_line_width(line_width as f64);
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.stroke();
    }

    fn radial_gradient(
        &mut self,
        center: Vec2,
        inner_radius: f32,
        outer_radius: f32,
        inner: &str,
        outer: &str,
    ) {
        let (x, y) = (center.x as f64, center.y as f64);
        let gradient = match self.ctx.create_radial_gradient(
            x,
            y,
            inner_radius.max(0.0) as f64,
            x,
            y,
            outer_radius.max(0.0) as f64,
        ) {
            Ok(gradient) => gradient,
            Err(e) => {
                log::warn!("Radial gradient failed: {:?}", e);
                return;
            }
        };
        let _ = gradient.add_color_stop(0.0, inner);
        let _ = gradient.add_color_stop(1.0, outer);

        self.ctx.save();
        self.ctx.set_fill_style_canvas_gradient(&gradient);
        self.circle_path(center, outer_radius);
        self.ctx.fill();
        self.ctx.restore();
    }

    fn text(&mut self, text: &str, pos: Vec2, color: &str) {
        self.ctx.set_font("14px monospace");
        self.ctx.set_fill_style_str(color);
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }

    fn title_image(&mut self, size: Bounds, alpha: f64) {
        let Some(image) = &self.title else {
            return;
        };
        if !image.complete() || image.natural_width() == 0 {
            return;
        }

        let x = (size.width as f64 - image.natural_width() as f64) / 2.0;
        let y = size.height as f64 / 6.0;

        self.ctx.save();
        self.ctx.set_global_alpha(alpha);
        let _ = self.ctx.draw_image_with_html_image_element(image, x, y);
        self.ctx.restore();
    }
}
