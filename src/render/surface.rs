//! Drawing surface abstraction
//!
//! Everything is in playfield units (256x240). Backends scale to pixels.

use glam::Vec2;

/// RGBA color, 8-bit channels with float alpha
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: f32,
}

impl Color {
    pub const BLACK: Color = Color::hex(0x000000);
    pub const WHITE: Color = Color::hex(0xffffff);

    /// Opaque color from 0xRRGGBB
    pub const fn hex(rgb: u32) -> Self {
        Self {
            r: ((rgb >> 16) & 0xff) as u8,
            g: ((rgb >> 8) & 0xff) as u8,
            b: (rgb & 0xff) as u8,
            a: 1.0,
        }
    }

    pub const fn with_alpha(self, a: f32) -> Self {
        Self { a, ..self }
    }

    /// CSS color string for canvas styles
    pub fn css(&self) -> String {
        if self.a >= 1.0 {
            format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
        } else {
            format!(
                "rgba({},{},{},{:.3})",
                self.r,
                self.g,
                self.b,
                self.a.clamp(0.0, 1.0)
            )
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextAlign {
    Left,
    Center,
}

/// Immediate-mode 2D drawing target
pub trait Surface {
    fn clear(&mut self, color: Color);
    /// Axis-aligned rectangle from its top-left corner
    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color);
    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Color, width: f32);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32);
    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32);
    /// Filled closed polygon
    fn polygon(&mut self, points: &[Vec2], color: Color);
    /// Text anchored at its baseline
    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, align: TextAlign);
}

/// A recorded draw call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear(Color),
    FillRect {
        min: Vec2,
        size: Vec2,
        color: Color,
    },
    StrokeRect {
        min: Vec2,
        size: Vec2,
        color: Color,
        width: f32,
    },
    FillCircle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    StrokeCircle {
        center: Vec2,
        radius: f32,
        color: Color,
        width: f32,
    },
    Line {
        from: Vec2,
        to: Vec2,
        color: Color,
        width: f32,
    },
    Polygon {
        points: Vec<Vec2>,
        color: Color,
    },
    Text {
        pos: Vec2,
        text: String,
        size: f32,
        color: Color,
        align: TextAlign,
    },
}

/// Surface that records commands instead of drawing
#[derive(Debug, Clone, Default)]
pub struct DrawList {
    pub commands: Vec<DrawCommand>,
}

impl DrawList {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.commands.len()
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// All text drawn, in order
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.commands.iter().filter_map(|cmd| match cmd {
            DrawCommand::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }

    pub fn reset(&mut self) {
        self.commands.clear();
    }
}

impl Surface for DrawList {
    fn clear(&mut self, color: Color) {
        // Everything before a clear is invisible
        self.commands.clear();
        self.commands.push(DrawCommand::Clear(color));
    }

    fn fill_rect(&mut self, min: Vec2, size: Vec2, color: Color) {
        self.commands.push(DrawCommand::FillRect { min, size, color });
    }

    fn stroke_rect(&mut self, min: Vec2, size: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeRect {
            min,
            size,
            color,
            width,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.commands.push(DrawCommand::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, color: Color, width: f32) {
        self.commands.push(DrawCommand::StrokeCircle {
            center,
            radius,
            color,
            width,
        });
    }

    fn line(&mut self, from: Vec2, to: Vec2, color: Color, width: f32) {
        self.commands.push(DrawCommand::Line {
            from,
            to,
            color,
            width,
        });
    }

    fn polygon(&mut self, points: &[Vec2], color: Color) {
        if points.len() < 3 {
            return;
        }
        self.commands.push(DrawCommand::Polygon {
            points: points.to_vec(),
            color,
        });
    }

    fn text(&mut self, pos: Vec2, text: &str, size: f32, color: Color, align: TextAlign) {
        self.commands.push(DrawCommand::Text {
            pos,
            text: text.to_owned(),
            size,
            color,
            align,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_color_hex_and_css() {
        let c = Color::hex(0x7cd67c);
        assert_eq!((c.r, c.g, c.b), (0x7c, 0xd6, 0x7c));
        assert_eq!(c.css(), "#7cd67c");
        assert_eq!(Color::WHITE.with_alpha(0.5).css(), "rgba(255,255,255,0.500)");
    }

    #[test]
    fn test_clear_discards_earlier_commands() {
        let mut list = DrawList::new();
        list.fill_rect(Vec2::ZERO, Vec2::ONE, Color::BLACK);
        list.clear(Color::WHITE);
        assert_eq!(list.commands, vec![DrawCommand::Clear(Color::WHITE)]);
    }

    #[test]
    fn test_degenerate_polygon_skipped() {
        let mut list = DrawList::new();
        list.polygon(&[Vec2::ZERO, Vec2::ONE], Color::BLACK);
        assert!(list.is_empty());
    }
}
