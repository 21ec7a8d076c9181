//! Glyph Batching Module (User Story 3)
//!
//! Groups consecutive glyphs with identical drawing properties into GlyphRuns,
//! reducing Canvas draw calls from 800+ to <80 for typical scores.
//!
//! Batching algorithm:
//! 1. Sort glyphs by x-position (left-to-right drawing order)
//! 2. Group consecutive glyphs with matching font_family, font_size, color, opacity
//! 3. Start new run when properties change

use crate::layout::types::{Color, Glyph, GlyphRun};

/// Batch glyphs into runs with identical drawing properties
///
/// Takes a vector of glyphs and groups consecutive glyphs that share
/// font_family, font_size, color, and opacity into GlyphRuns.
///
/// # Arguments
/// * `glyphs` - Vector of positioned glyphs, will be sorted by x-position
///
/// # Returns
/// Vector of GlyphRuns, each containing consecutive glyphs with identical properties
///
/// # Example
/// ```ignore
/// let runs = batch_glyphs(vec![glyph1, glyph2, glyph3]);
/// // Results in 1 run if all glyphs have identical properties,
/// // or multiple runs if properties differ
/// ```
pub fn batch_glyphs(mut glyphs: Vec<Glyph>) -> Vec<GlyphRun> {
    if glyphs.is_empty() {
        return Vec::new();
    }

    // Sort glyphs by x-position for left-to-right drawing order
    glyphs.sort_by(|a, b| {
        a.position
            .x
            .partial_cmp(&b.position.x)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    let mut runs = Vec::new();
    let mut current_run_glyphs = vec![glyphs[0].clone()];

    // Extract properties from first glyph to start first run
    let mut current_props = extract_glyph_properties(&glyphs[0]);

    for glyph in glyphs.into_iter().skip(1) {
        let glyph_props = extract_glyph_properties(&glyph);

        if can_batch(&current_props, &glyph_props) {
            // Same properties - add to current run
            current_run_glyphs.push(glyph);
        } else {
            // Properties changed - finalize current run and start new one
            runs.push(create_glyph_run(current_run_glyphs, current_props));
            current_run_glyphs = vec![glyph.clone()];
            current_props = glyph_props;
        }
    }

    // Add final run
    if !current_run_glyphs.is_empty() {
        runs.push(create_glyph_run(current_run_glyphs, current_props));
    }

    runs
}

/// Drawing properties used for batching decisions
#[derive(Debug, Clone, PartialEq)]
struct GlyphProperties {
    font_family: String,
    font_size: f32,
    color: Color,
    opacity: f32,
    codepoint: String, // Include codepoint to separate different glyphs
}

/// Extract drawing properties from a glyph
///
/// SMuFL standard: font-size = 4 staff spaces (1em = 4 staff spaces).
/// At this font size, noteheads render at their designed 2 staff-space height.
fn extract_glyph_properties(glyph: &Glyph) -> GlyphProperties {
    // SMuFL standard: 1em = 4 staff spaces = 4 × 20 = 80 logical units
    // Noteheads are designed to be 2 staff spaces at this font size
    GlyphProperties {
        font_family: "Bravura".to_string(),
        font_size: 80.0, // SMuFL standard: 1em = 4 staff spaces = 4 × 20 = 80 logical units
        color: Color {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        },
        opacity: 1.0,
        codepoint: glyph.codepoint.clone(),
    }
}

/// T072: Check if two glyphs can be batched together
///
/// Glyphs can batch if they have identical:
/// - font_family
/// - font_size
/// - color (RGBA)
/// - opacity
/// - codepoint
fn can_batch(props1: &GlyphProperties, props2: &GlyphProperties) -> bool {
    props1.font_family == props2.font_family
        && (props1.font_size - props2.font_size).abs() < 0.01
        && props1.color == props2.color
        && (props1.opacity - props2.opacity).abs() < 0.01
        && props1.codepoint == props2.codepoint
}

/// Create a GlyphRun from glyphs and their shared properties
fn create_glyph_run(glyphs: Vec<Glyph>, props: GlyphProperties) -> GlyphRun {
    GlyphRun {
        glyphs,
        font_family: props.font_family,
        font_size: props.font_size,
        color: props.color,
        opacity: props.opacity,
    }
}
