//! `Drawer` port (spec §6): the low-level drawing sink the layout engine
//! replays its committed shapes into. No implementation lives in this
//! crate's core — rasterization is an external collaborator.

use crate::layout::types::Color;

pub trait Drawer {
    fn set_text_color(&mut self, color: Color);
    fn draw_text(&mut self, x: f32, y: f32, text: &str);

    fn begin_path(&mut self);
    fn end_path(&mut self);
    fn move_to(&mut self, x: f32, y: f32);
    fn hline_to(&mut self, x: f32);
    fn vline_to(&mut self, y: f32);

    fn stroke(&mut self, color: Color);
    fn fill(&mut self, color: Color);
    fn stroke_width(&mut self, width: f32);
}
