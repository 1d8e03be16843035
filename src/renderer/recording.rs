//! In-memory surface that records draw calls
//!
//! Used by the native demo and by tests to inspect what a frame would draw.

use super::Surface;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Save,
    Restore,
    Translate(f32, f32),
    Rotate(f32),
    Scale(f32, f32),
    BeginPath,
    MoveTo(f32, f32),
    LineTo(f32, f32),
    Arc { x: f32, y: f32, radius: f32 },
    ClosePath,
    FillStyle(String),
    StrokeStyle(String),
    LineWidth(f32),
    Fill,
    Stroke,
    FillRect(f32, f32, f32, f32),
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
    depth: usize,
    max_depth: usize,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.calls.clear();
        self.depth = 0;
        self.max_depth = 0;
    }

    /// True if every `save` has a matching `restore`
    pub fn is_balanced(&self) -> bool {
        self.depth == 0
    }

    /// Deepest save nesting seen since the last clear
    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn count(&self, predicate: impl Fn(&DrawCall) -> bool) -> usize {
        self.calls.iter().filter(|c| predicate(c)).count()
    }
}

impl Surface for RecordingSurface {
    fn save(&mut self) {
        self.depth += 1;
        self.max_depth = self.max_depth.max(self.depth);
        self.calls.push(DrawCall::Save);
    }

    fn restore(&mut self) {
        if self.depth == 0 {
            log::warn!("restore without matching save");
        }
        self.depth = self.depth.saturating_sub(1);
        self.calls.push(DrawCall::Restore);
    }

    fn translate(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::Translate(x, y));
    }

    fn rotate(&mut self, radians: f32) {
        self.calls.push(DrawCall::Rotate(radians));
    }

    fn scale(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::Scale(x, y));
    }

    fn begin_path(&mut self) {
        self.calls.push(DrawCall::BeginPath);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::MoveTo(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.calls.push(DrawCall::LineTo(x, y));
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, _start: f32, _end: f32) {
        self.calls.push(DrawCall::Arc { x, y, radius });
    }

    fn close_path(&mut self) {
        self.calls.push(DrawCall::ClosePath);
    }

    fn set_fill_style(&mut self, colour: &str) {
        self.calls.push(DrawCall::FillStyle(colour.to_string()));
    }

    fn set_stroke_style(&mut self, colour: &str) {
        self.calls.push(DrawCall::StrokeStyle(colour.to_string()));
    }

    fn set_line_width(&mut self, width: f32) {
        self.calls.push(DrawCall::LineWidth(width));
    }

    fn fill(&mut self) {
        self.calls.push(DrawCall::Fill);
    }

    fn stroke(&mut self) {
        self.calls.push(DrawCall::Stroke);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(DrawCall::FillRect(x, y, width, height));
    }
}
