//! Presentation adapter
//!
//! Turns simulation events into sound cues and transient UI. This is the
//! only place that decides what an event looks and sounds like.

use crate::Settings;
use crate::audio::{AudioSink, MusicMode, SoundCue};
use crate::sim::{GameEvent, TauntStyle};
use crate::ui::{SplatKind, UiSink};

/// Full-screen flash when a duck is hit
pub const HIT_FLASH_SECS: f32 = 0.15;
/// Taunt and resurrection bubbles
pub const BUBBLE_SECS: f32 = 1.0;
pub const YOLK_SECS: f32 = 2.0;
pub const CRACK_SECS: f32 = 1.08;
pub const BANNER_SECS: f32 = 1.4;

/// Shown when the player shoots into the grass
pub const CONTRACTOR_BANNER: &str = "HEY! THE DOG IS A CONTRACTOR. HE IS NOT PART OF THE GAME.";

/// Route one frame's events to audio and UI
pub fn dispatch(
    events: &[GameEvent],
    audio: &mut dyn AudioSink,
    ui: &mut dyn UiSink,
    settings: &Settings,
) {
    for event in events {
        match event {
            GameEvent::GameStarted => audio.set_music(Some(MusicMode::Calm)),
            GameEvent::GameOver { .. } => audio.set_music(None),
            GameEvent::Paused | GameEvent::Resumed | GameEvent::RoundStarted { .. } => {}
            GameEvent::DuckShot { .. } => {
                audio.play(SoundCue::Hit);
                audio.play(SoundCue::Oof);
                if settings.hit_flash {
                    ui.flash(HIT_FLASH_SECS);
                }
            }
            GameEvent::DuckResurrected { pos, bubble, .. } => {
                ui.float_text(*pos, bubble, BUBBLE_SECS);
            }
            GameEvent::MusicShift(mode) => {
                audio.play(SoundCue::Scratch);
                audio.set_music(Some(*mode));
            }
            GameEvent::Taunt {
                pos, style, bubble, ..
            } => {
                if *style == TauntStyle::Laugh {
                    audio.play(SoundCue::Laugh);
                }
                ui.float_text(*pos, bubble, BUBBLE_SECS);
            }
            GameEvent::EggFired { .. } => {}
            GameEvent::PlayerHit { pos, .. } => {
                audio.play(SoundCue::Impact);
                ui.splat(*pos, SplatKind::Yolk, YOLK_SECS);
                ui.splat(*pos, SplatKind::Crack, CRACK_SECS);
            }
            GameEvent::ShotMissed { in_grass: true, .. } => {
                audio.play(SoundCue::Dud);
                ui.banner(CONTRACTOR_BANNER, BANNER_SECS);
            }
            GameEvent::ShotMissed { in_grass: false, .. } => audio.play(SoundCue::Miss),
        }
    }
}
