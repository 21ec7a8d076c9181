//! SMuFL font metrics
//!
//! Provides glyph bounding boxes and baseline positions for the subset of
//! Bravura glyphs this crate's engravers emit. Values are in staff spaces,
//! taken from the published Bravura metadata, inlined here (rather than
//! loaded from an external JSON asset) so the crate has no font-file
//! dependency at build time — `ports::text_meter::TextMeter` is the proper
//! seam for a caller that wants a different font's real metrics.

use crate::layout::types::BoundingBox;
use once_cell::sync::Lazy;
use std::collections::HashMap;

struct GlyphMetrics {
    b_box_ne: [f32; 2],
    b_box_sw: [f32; 2],
}

macro_rules! glyph {
    ($ne:expr, $sw:expr) => {
        GlyphMetrics {
            b_box_ne: $ne,
            b_box_sw: $sw,
        }
    };
}

/// Parsed metrics cache, built once from the inline table below.
static METRICS: Lazy<HashMap<&'static str, GlyphMetrics>> = Lazy::new(|| {
    let mut m = HashMap::new();
    m.insert("noteheadBlack", glyph!([1.18, 0.5], [0.0, -0.5]));
    m.insert("noteheadHalf", glyph!([1.18, 0.5], [0.0, -0.5]));
    m.insert("noteheadWhole", glyph!([1.67, 0.5], [0.0, -0.5]));
    m.insert("flag8thUp", glyph!([0.97, 3.27], [0.0, 0.0]));
    m.insert("flag8thDown", glyph!([0.97, 0.0], [0.0, -3.27]));
    m.insert("flag16thUp", glyph!([1.17, 3.27], [0.0, 0.0]));
    m.insert("flag16thDown", glyph!([1.17, 0.0], [0.0, -3.27]));
    m.insert("gClef", glyph!([2.7, 4.4], [0.0, -2.98]));
    m.insert("fClef", glyph!([2.52, 2.0], [0.0, -2.0]));
    m.insert("cClef", glyph!([2.54, 2.0], [0.0, -2.0]));
    m.insert("accidentalSharp", glyph!([0.78, 1.95], [0.0, -1.95]));
    m.insert("accidentalFlat", glyph!([0.82, 1.86], [0.0, -0.95]));
    m.insert("accidentalNatural", glyph!([0.68, 1.95], [0.0, -1.95]));
    m.insert("restWhole", glyph!([1.5, 1.0], [0.0, 0.5]));
    m.insert("restHalf", glyph!([1.5, 0.5], [0.0, 0.0]));
    m.insert("restQuarter", glyph!([1.17, 2.0], [0.0, -2.0]));
    m.insert("rest8th", glyph!([1.0, 1.5], [0.0, -1.0]));
    m.insert("rest16th", glyph!([1.1, 1.5], [0.0, -2.0]));
    m.insert("barlineSingle", glyph!([0.16, 2.0], [0.0, -2.0]));
    m.insert("barlineFinal", glyph!([0.6, 2.0], [0.0, -2.0]));
    m.insert("dynamicPiano", glyph!([1.8, 1.3], [0.0, -0.3]));
    m.insert("dynamicForte", glyph!([1.9, 1.5], [0.0, -0.5]));
    m.insert("dynamicMezzo", glyph!([2.0, 1.2], [0.0, -0.2]));
    m.insert("articAccentAbove", glyph!([0.8, 0.5], [0.0, 0.0]));
    m.insert("articStaccatoAbove", glyph!([0.3, 0.3], [0.0, 0.0]));
    m.insert("fermataAbove", glyph!([1.3, 1.1], [0.0, 0.0]));
    m.insert("ornamentTrill", glyph!([1.5, 1.4], [0.0, 0.0]));
    m
});

/// Get bounding box for a SMuFL glyph name.
///
/// Returns a 1x1 placeholder box if the glyph is not in the table (the
/// Shapes Creator still needs a non-zero extent for spacing purposes).
pub fn get_glyph_bbox(glyph_name: &str) -> BoundingBox {
    METRICS
        .get(glyph_name)
        .map(|metrics| {
            let width = metrics.b_box_ne[0] - metrics.b_box_sw[0];
            let height = metrics.b_box_ne[1] - metrics.b_box_sw[1];
            BoundingBox {
                x: metrics.b_box_sw[0],
                y: metrics.b_box_sw[1],
                width,
                height,
            }
        })
        .unwrap_or(BoundingBox {
            x: 0.0,
            y: -0.5,
            width: 1.0,
            height: 1.0,
        })
}
