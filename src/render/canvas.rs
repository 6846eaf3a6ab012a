//! Canvas 2D backend

use std::f64::consts::TAU;

use glam::Vec2;
use web_sys::CanvasRenderingContext2d;

use super::surface::{Color, Surface, TextAlign};
use crate::consts::{PLAYFIELD_HEIGHT, PLAYFIELD_WIDTH};

/// Draws playfield units onto a canvas, scaled to its pixel size
pub struct CanvasSurface {
    ctx: CanvasRenderingContext2d,
    /// Device pixels per playfield unit
    scale: f64,
}

impl CanvasSurface {
    pub fn new(ctx: CanvasRenderingContext2d, width: u32, height: u32) -> Self {
        let mut surface = Self { ctx, scale: 1.0 };
        surface.resize(width, height);
        surface
    }

    /// Recompute scale after the canvas backing store changes size
    pub fn resize(&mut self, width: u32, height: u32) {
        let sx = width as f64 / PLAYFIELD_WIDTH as f64;
        let sy = height as f64 / PLAYFIELD_HEIGHT as f64;
        self.scale = sx.min(sy).max(0.01);
        // Crisp pixel art
        self.ctx.set_image_smoothing_enabled(false);
        log::debug!("Canvas {}x{}, scale {:.2}", width, height, self.scale);
    }

    pub fn scale(&self) -> f64 {
        self.scale
    }

    fn circle_path(&self, center: Vec2, radius: f32) {
        self.ctx.begin_path();
        let _ = self
            .ctx
            .arc(center.x as f64, center.y as f64, radius as f64, 0.0, TAU);
    }
}

impl Surface for CanvasSurface {
    fn clear(&mut self, color: Color) {
        let _ = self
            .ctx
            .set_transform(self.scale, 0.0, 0.0, self.scale, 0.0, 0.0);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill_rect(
            0.0,
            0.0,
            PLAYFIELD_WIDTH as f64,
            PLAYFIELD_HEIGHT as f64,
        );
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.ctx.set_fill_style_str(&color.css());
        self.ctx
            .fill_rect(min.x as f64, min.y as f64, size.x as f64, size.y as f64);
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Color, width: f32) {
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        // Half-unit offset keeps 1-unit outlines on the pixel grid
        self.ctx.stroke_rect(
            min.x.floor() as f64 + 0.5,
            min.y.floor() as f64 + 0.5,
            size.x.floor() as f64,
            size.y.floor() as f64,
        );
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.circle_path(center, radius);
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.circle_path(center, radius);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.ctx.begin_path();
        self.ctx.move_to(from.x as f64, from.y as f64);
        self.ctx.line_to(to.x as f64, to.y as f64);
        self.ctx.set_stroke_style_str(&color.css());
        self.ctx.set_line_width(width as f64);
        self.ctx.stroke();
    }

    fn polygon(&mut self, points: &[Vec2], color: Color) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };
        self.ctx.begin_path();
        self.ctx.move_to(first.x as f64, first.y as f64);
        for p in rest {
            self.ctx.line_to(p.x as f64, p.y as f64);
        }
        self.ctx.close_path();
        self.ctx.set_fill_style_str(&color.css());
        self.ctx.fill();
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, align: TextAlign) {
        self.ctx
            .set_font(&format!("{}px \"Press Start 2P\", monospace", size));
        self.ctx.set_text_align(match align {
            TextAlign::Left => "left",
            TextAlign::Center => "center",
        });
        self.ctx.set_fill_style_str(&color.css());
        let _ = self.ctx.fill_text(text, pos.x as f64, pos.y as f64);
    }
}
