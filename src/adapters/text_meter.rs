//! `TextMeter` implementation backed by the embedded Bravura glyph table
//! (`layout::metrics`). This is the default font adapter native layout
//! callers wire in; WASM/browser callers can supply their own (e.g. one
//! backed by a `CanvasRenderingContext2D`) since `TextMeter` is a trait.

use crate::layout::metrics::get_glyph_bbox;
use crate::ports::text_meter::{CharBounds, FontSelection, TextMeter};

/// Maps a SMuFL codepoint to the glyph name used by `layout::metrics`'s
/// inline table. Only the subset the engravers in this crate emit.
fn glyph_name_for_codepoint(ch: char) -> Option<&'static str> {
    match ch as u32 {
        0xE0A4 => Some("noteheadBlack"),
        0xE0A3 => Some("noteheadHalf"),
        0xE0A2 => Some("noteheadWhole"),
        0xE240 => Some("flag8thUp"),
        0xE241 => Some("flag8thDown"),
        0xE242 => Some("flag16thUp"),
        0xE243 => Some("flag16thDown"),
        0xE050 => Some("gClef"),
        0xE062 => Some("fClef"),
        0xE05C => Some("cClef"),
        0xE262 => Some("accidentalSharp"),
        0xE260 => Some("accidentalFlat"),
        0xE261 => Some("accidentalNatural"),
        0xE4E1 => Some("restWhole"),
        0xE4E2 => Some("restHalf"),
        0xE4E5 => Some("restQuarter"),
        0xE4E6 => Some("rest8th"),
        0xE4E7 => Some("rest16th"),
        _ => None,
    }
}

/// A `TextMeter` that reports glyph extents from the embedded Bravura
/// metrics table, scaled by the currently selected font size. SMuFL glyph
/// metrics are published in staff-space units at a notional 1-staff-space
/// em; `size` here is that em's logical-unit extent.
#[derive(Debug, Clone)]
pub struct BravuraTextMeter {
    current: FontSelection,
}

impl BravuraTextMeter {
    pub fn new() -> Self {
        Self {
            current: FontSelection {
                name: "Bravura".to_string(),
                size: 40.0,
                bold: false,
                italic: false,
            },
        }
    }
}

impl Default for BravuraTextMeter {
    fn default() -> Self {
        Self::new()
    }
}

impl TextMeter for BravuraTextMeter {
    fn select_font(&mut self, selection: FontSelection) {
        self.current = selection;
    }

    fn measure_width(&self, text: &str) -> f32 {
        text.chars()
            .map(|ch| self.bounding_rectangle(ch).width)
            .sum()
    }

    fn get_font_height(&self) -> f32 {
        self.current.size
    }

    fn get_ascender(&self) -> f32 {
        self.current.size * 0.75
    }

    fn bounding_rectangle(&self, ch: char) -> CharBounds {
        let bbox = glyph_name_for_codepoint(ch)
            .map(get_glyph_bbox)
            .unwrap_or(crate::layout::types::BoundingBox {
                x: 0.0,
                y: -0.5,
                width: 1.0,
                height: 1.0,
            });
        let scale = self.current.size;
        CharBounds {
            x: bbox.x * scale,
            y: bbox.y * scale,
            width: bbox.width * scale,
            height: bbox.height * scale,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn notehead_width_scales_with_font_size() {
        let mut meter = BravuraTextMeter::new();
        meter.select_font(FontSelection {
            name: "Bravura".to_string(),
            size: 20.0,
            bold: false,
            italic: false,
        });
        let small = meter.bounding_rectangle('\u{E0A4}').width;
        meter.select_font(FontSelection {
            name: "Bravura".to_string(),
            size: 40.0,
            bold: false,
            italic: false,
        });
        let large = meter.bounding_rectangle('\u{E0A4}').width;
        assert!((large - 2.0 * small).abs() < 0.001);
    }

    #[test]
    fn unknown_glyph_falls_back_to_placeholder() {
        let meter = BravuraTextMeter::new();
        let bounds = meter.bounding_rectangle('A');
        assert_eq!(bounds.width, meter.current.size);
    }
}
