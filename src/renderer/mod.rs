//! 2D canvas rendering module
//!
//! The simulation never draws; the host calls [`render_frame`] after each
//! tick with whatever [`Surface`] it has (a browser canvas, or a recorder).

pub mod recording;
pub mod shapes;

#[cfg(target_arch = "wasm32")]
pub mod canvas;

pub use recording::{DrawCall, RecordingSurface};

use crate::settings::Palette;
use crate::sim::GameState;

/// The subset of the canvas 2D context the game draws with
///
/// Angles are radians, coordinates are CSS pixels.
pub trait Surface {
    fn save(&mut self);
    fn restore(&mut self);
    fn translate(&mut self, x: f32, y: f32);
    fn rotate(&mut self, radians: f32);
    fn scale(&mut self, x: f32, y: f32);

    fn begin_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn line_to(&mut self, x: f32, y: f32);
    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32);
    fn close_path(&mut self);

    fn set_fill_style(&mut self, colour: &str);
    fn set_stroke_style(&mut self, colour: &str);
    fn set_line_width(&mut self, width: f32);
    fn fill(&mut self);
    fn stroke(&mut self);
    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32);
}

/// Clear the frame and draw every live object in group order
pub fn render_frame(state: &GameState, surface: &mut dyn Surface, palette: &Palette) {
    shapes::background(surface, &state.viewport, palette);
    for object in state.groups.live() {
        shapes::game_object(surface, object, palette);
    }
}
