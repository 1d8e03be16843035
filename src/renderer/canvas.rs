//! Browser canvas backend

use web_sys::CanvasRenderingContext2d;

use super::Surface;

impl Surface for CanvasRenderingContext2d {
    fn save(&mut self) {
        CanvasRenderingContext2d::save(self);
    }

    fn restore(&mut self) {
        CanvasRenderingContext2d::restore(self);
    }

    fn translate(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::translate(self, x as f64, y as f64);
    }

    fn rotate(&mut self, radians: f32) {
        let _ = CanvasRenderingContext2d::rotate(self, radians as f64);
    }

    fn scale(&mut self, x: f32, y: f32) {
        let _ = CanvasRenderingContext2d::scale(self, x as f64, y as f64);
    }

    fn begin_path(&mut self) {
        CanvasRenderingContext2d::begin_path(self);
    }

    fn move_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::move_to(self, x as f64, y as f64);
    }

    fn line_to(&mut self, x: f32, y: f32) {
        CanvasRenderingContext2d::line_to(self, x as f64, y as f64);
    }

    fn arc(&mut self, x: f32, y: f32, radius: f32, start: f32, end: f32) {
        if let Err(e) = CanvasRenderingContext2d::arc(
            self,
            x as f64,
            y as f64,
            radius as f64,
            start as f64,
            end as f64,
        ) {
            log::warn!("arc failed: {:?}", e);
        }
    }

    fn close_path(&mut self) {
        CanvasRenderingContext2d::close_path(self);
    }

    fn set_fill_style(&mut self, colour: &str) {
        self.set_fill_style_str(colour);
    }

    fn set_stroke_style(&mut self, colour: &str) {
        self.set_stroke_style_str(colour);
    }

    fn set_line_width(&mut self, width: f32) {
        CanvasRenderingContext2d::set_line_width(self, width as f64);
    }

    fn fill(&mut self) {
        CanvasRenderingContext2d::fill(self);
    }

    fn stroke(&mut self) {
        CanvasRenderingContext2d::stroke(self);
    }

    fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        CanvasRenderingContext2d::fill_rect(self, x as f64, y as f64, width as f64, height as f64);
    }
}
