//! Rendering
//!
//! Scene code draws through the `Surface` trait. `DrawList` records calls for
//! tests and headless runs; `CanvasSurface` draws into a browser canvas.

#[cfg(target_arch = "wasm32")]
mod canvas;
mod scene;
mod surface;

#[cfg(target_arch = "wasm32")]
pub use canvas::CanvasSurface;
pub use scene::{draw_duck, draw_scene};
pub use surface::{Color, DrawCommand, DrawList, Surface, TextAlign};
