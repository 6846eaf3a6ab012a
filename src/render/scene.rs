//! Scene drawing
//!
//! Pixel-art shapes built from rects, circles and polygons. Ducks are drawn
//! in local coordinates facing right and mirrored when facing left.

use glam::Vec2;

use super::surface::{Color, Surface, TextAlign};
use crate::consts::*;
use crate::lerp;
use crate::sim::{Duck, DuckState, Egg, GamePhase, GameState};
use crate::ui::{Overlay, SplatKind};

const SKY: Color = Color::hex(0x64b0ff);
const SUN: Color = Color::hex(0xffe27a);
const MOUNTAIN: Color = Color::hex(0x2a5b7f);
const CLOUD: Color = Color::WHITE.with_alpha(0.13);
const GROUND: Color = Color::hex(0x6bb36b);
const GRASS: Color = Color::hex(0x3f8f3f);

const DUCK_BODY: Color = Color::hex(0x7cd67c);
const DUCK_BODY_DOWN: Color = Color::hex(0x9e6b6b);
const DUCK_BODY_ANGRY: Color = Color::hex(0xd9915a);
const DUCK_HEAD: Color = Color::hex(0x5aa85a);
const DUCK_WING: Color = Color::hex(0x6cc46c);
const BEAK: Color = Color::hex(0xf3c066);
const HELMET: Color = Color::hex(0xb0b0b0);
const SIGN_STICK: Color = Color::hex(0x8b5a2b);
const SIGN_BOARD: Color = Color::hex(0xd6b48a);

const EGG_SHELL: Color = Color::hex(0xeed35f);
const EGG_SHINE: Color = Color::hex(0xfff08a);
const YOLK: Color = Color::hex(0xffc21a);
const ALBUMEN: Color = Color::hex(0xfff8e0);
const CRACK: Color = Color::hex(0xfff8b0);

const DOG_BODY: Color = Color::hex(0x8b5a2b);
const DOG_HEAD: Color = Color::hex(0xa46b32);
const DOG_DARK: Color = Color::hex(0x6d431e);

/// Pixel-font size used for signs and bubbles
const SMALL_TEXT: f32 = 6.0;
const SHRUG: &str = "¯\\_(ツ)_/¯";
/// Seconds per side of the grounded twitch
const GROUND_TWITCH_PERIOD: f32 = 0.08;

/// Draw one frame. `time` is wall-clock seconds and only drives decoration.
pub fn draw_scene(state: &GameState, overlay: &Overlay, time: f32, surface: &mut dyn Surface) {
    surface.clear(SKY);
    draw_backdrop(time, surface);

    for duck in &state.ducks {
        draw_duck(duck, time, surface);
    }
    for egg in &state.eggs {
        draw_egg(egg, surface);
    }
    draw_dog(state.phase == GamePhase::GameOver, surface);

    draw_overlay(overlay, surface);
    draw_crosshair(state.cursor, surface);
}

fn draw_backdrop(time: f32, surface: &mut dyn Surface) {
    surface.fill_circle(Vec2::new(30.0, 30.0), 14.0, SUN);

    for (left, peak, right, base) in [
        (0.0, Vec2::new(40.0, 90.0), 80.0, 140.0),
        (60.0, Vec2::new(110.0, 95.0), 160.0, 150.0),
        (130.0, Vec2::new(180.0, 100.0), 230.0, 140.0),
    ] {
        surface.polygon(
            &[Vec2::new(left, base), peak, Vec2::new(right, base)],
            MOUNTAIN,
        );
    }

    // Cloud stripes wrap around with a 60 unit lead-in
    let span = PLAYFIELD_WIDTH + 60.0;
    for i in 0..3 {
        let x = (time * 20.0 + i as f32 * 80.0).rem_euclid(span) - 60.0;
        let y = 30.0 + i as f32 * 20.0;
        surface.fill_rect(Vec2::new(x, y), Vec2::new(40.0, 8.0), CLOUD);
    }

    surface.fill_rect(
        Vec2::new(0.0, GROUND_Y),
        Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT - GROUND_Y),
        GROUND,
    );
    let mut x = 0.0;
    let mut tall = false;
    while x < PLAYFIELD_WIDTH {
        let h = if tall { 4.0 } else { 3.0 };
        surface.fill_rect(Vec2::new(x, GROUND_Y - h), Vec2::new(8.0, h), GRASS);
        x += 8.0;
        tall = !tall;
    }
}

/// Local-space rect (duck facing right) to a world-space min corner and size
fn mirrored_rect(origin: Vec2, facing: f32, min: Vec2, size: Vec2) -> (Vec2, Vec2) {
    let x = if facing < 0.0 { -(min.x + size.x) } else { min.x };
    (origin + Vec2::new(x, min.y), size)
}

fn duck_body_color(state: DuckState) -> Color {
    match state {
        DuckState::Shot | DuckState::Ground => DUCK_BODY_DOWN,
        DuckState::Attack => DUCK_BODY_ANGRY,
        _ => DUCK_BODY,
    }
}

/// Grounded ducks twitch a pixel side to side
fn ground_twitch(duck: &Duck) -> Vec2 {
    if duck.state != DuckState::Ground {
        return Vec2::ZERO;
    }
    let beat = (duck.time_in_state / GROUND_TWITCH_PERIOD) as u32;
    if beat % 2 == 0 {
        Vec2::new(1.0, 0.0)
    } else {
        Vec2::new(-1.0, 0.0)
    }
}

pub fn draw_duck(duck: &Duck, time: f32, surface: &mut dyn Surface) {
    let s = duck.size;
    let origin = duck.pos + ground_twitch(duck);
    let mut part = |min: Vec2, size: Vec2, color: Color, outline: bool| {
        let (min, size) = mirrored_rect(origin, duck.facing, min, size);
        surface.fill_rect(min, size, color);
        if outline {
            surface.stroke_rect(min, size, Color::BLACK, 1.0);
        }
    };

    // Body, head, beak
    part(
        Vec2::new(-s / 2.0, -s / 3.0),
        Vec2::new(s * 0.8, s * 0.6),
        duck_body_color(duck.state),
        true,
    );
    let head_min = Vec2::new(s * 0.1, -s * 0.45);
    let head_size = Vec2::splat(s * 0.35);
    part(head_min, head_size, DUCK_HEAD, true);
    part(
        Vec2::new(s * 0.45, -s * 0.35),
        Vec2::new(s * 0.25, s * 0.12),
        BEAK,
        true,
    );
    part(
        Vec2::new(head_min.x + head_size.x - 4.0, head_min.y + 4.0),
        Vec2::splat(3.0),
        Color::BLACK,
        false,
    );

    // Wing flap only while airborne
    let flap = if duck.state.is_grounded() {
        0.0
    } else {
        (time * 10.0).sin() * 3.0
    };
    part(
        Vec2::new(-s * 0.2, -s * 0.6 + flap),
        Vec2::new(s * 0.5, s * 0.18),
        DUCK_WING,
        false,
    );

    if duck.helmet {
        part(
            Vec2::new(s * 0.05, -s * 0.5),
            Vec2::new(s * 0.35, s * 0.15),
            HELMET,
            true,
        );
    }

    if duck.state.is_grounded() {
        part(Vec2::new(-4.0, s * 0.1), Vec2::splat(3.0), BEAK, false);
        part(Vec2::new(2.0, s * 0.1), Vec2::splat(3.0), BEAK, false);
    }

    if let Some(sign) = &duck.sign {
        part(Vec2::new(-10.0, -s - 10.0), Vec2::new(20.0, 2.0), SIGN_STICK, false);
        let (board_min, board_size) =
            mirrored_rect(origin, duck.facing, Vec2::new(8.0, -s - 16.0), Vec2::new(30.0, 16.0));
        surface.fill_rect(board_min, board_size, SIGN_BOARD);
        surface.text(
            board_min + Vec2::new(2.0, 10.0),
            sign.text,
            SMALL_TEXT,
            Color::BLACK,
            TextAlign::Left,
        );
    }
}

fn draw_egg(egg: &Egg, surface: &mut dyn Surface) {
    surface.fill_circle(egg.pos, egg.radius, EGG_SHELL);
    surface.fill_rect(
        egg.pos + Vec2::new(-0.8, -1.6),
        Vec2::new(1.6, 1.1),
        EGG_SHINE,
    );
}

/// The dog sits in the grass and shrugs when the run is over
fn draw_dog(shrug: bool, surface: &mut dyn Surface) {
    let base = Vec2::new(20.0, GROUND_Y - 2.0);
    let mut rect = |x: f32, y: f32, w: f32, h: f32, color: Color| {
        surface.fill_rect(base + Vec2::new(x, y), Vec2::new(w, h), color);
    };

    rect(-6.0, -10.0, 20.0, 10.0, DOG_BODY);
    rect(12.0, -16.0, 10.0, 10.0, DOG_HEAD);
    // Ear, eye, nose
    rect(12.0, -18.0, 4.0, 4.0, DOG_DARK);
    rect(19.0, -12.0, 2.0, 2.0, Color::BLACK);
    rect(22.0, -9.0, 2.0, 2.0, Color::BLACK);
    // Legs
    rect(-4.0, -2.0, 3.0, 2.0, DOG_DARK);
    rect(4.0, -2.0, 3.0, 2.0, DOG_DARK);

    if shrug {
        rect(28.0, -18.0, 24.0, 12.0, SIGN_BOARD);
        surface.text(
            base + Vec2::new(30.0, -9.0),
            SHRUG,
            SMALL_TEXT,
            Color::BLACK,
            TextAlign::Left,
        );
    }
}

fn draw_overlay(overlay: &Overlay, surface: &mut dyn Surface) {
    for splat in &overlay.splats {
        let alpha = splat.alpha();
        let pos = splat.item.pos;
        match splat.item.kind {
            SplatKind::Yolk => {
                surface.fill_circle(pos, 14.0, ALBUMEN.with_alpha(alpha * 0.9));
                surface.fill_circle(pos + Vec2::new(-2.0, 1.0), 7.0, YOLK.with_alpha(alpha));
            }
            SplatKind::Crack => {
                for &(angle, len) in &splat.item.rays {
                    let tip = pos + Vec2::from_angle(angle) * len;
                    surface.line(pos, tip, CRACK.with_alpha(alpha), 1.0);
                }
            }
        }
    }

    for text in &overlay.texts {
        let pos = text.draw_pos();
        let alpha = lerp(1.0, 0.5, text.progress());
        let width = text.item.text.chars().count() as f32 * SMALL_TEXT + 4.0;
        surface.fill_rect(
            pos - Vec2::new(width / 2.0, SMALL_TEXT + 2.0),
            Vec2::new(width, SMALL_TEXT + 4.0),
            Color::WHITE.with_alpha(alpha * 0.85),
        );
        surface.text(
            pos,
            &text.item.text,
            SMALL_TEXT,
            Color::BLACK.with_alpha(alpha),
            TextAlign::Center,
        );
    }

    if let Some(banner) = &overlay.banner {
        let center = Vec2::new(PLAYFIELD_WIDTH / 2.0, PLAYFIELD_HEIGHT / 2.0);
        let size = Vec2::new(PLAYFIELD_WIDTH - 24.0, 24.0);
        surface.fill_rect(center - size / 2.0, size, Color::BLACK.with_alpha(0.8));
        surface.stroke_rect(center - size / 2.0, size, Color::WHITE, 1.0);
        surface.text(
            center + Vec2::new(0.0, 2.0),
            &banner.item,
            5.0,
            Color::WHITE,
            TextAlign::Center,
        );
    }

    if overlay.flash_remaining > 0.0 {
        surface.fill_rect(
            Vec2::ZERO,
            Vec2::new(PLAYFIELD_WIDTH, PLAYFIELD_HEIGHT),
            Color::WHITE.with_alpha(0.85),
        );
    }
}

fn draw_crosshair(pos: Vec2, surface: &mut dyn Surface) {
    // Dark outline under a thin white cross
    for (color, width) in [(Color::BLACK, 3.0), (Color::WHITE, 1.0)] {
        surface.stroke_circle(pos, 8.0, color, width);
        surface.line(pos - Vec2::X * 10.0, pos + Vec2::X * 10.0, color, width);
        surface.line(pos - Vec2::Y * 10.0, pos + Vec2::Y * 10.0, color, width);
    }
}
