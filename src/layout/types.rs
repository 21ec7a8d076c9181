//! Core layout types
//!
//! Defines all entities in the spatial model hierarchy:
//! GlobalLayout → Systems → StaffGroups → Staves → GlyphRuns → Glyphs
//!
//! Also defines the engraving-level `Shape` tagged sum (spec §3, §9): the
//! geometric entity the Shapes Creator and per-object engravers produce
//! before it is flattened into the `Glyph`/`BarLine`/`StaffLine` rendering
//! primitives above by the score layouter.

use serde::{Deserialize, Serialize, Serializer};

/// Custom serializer for f32 that rounds to 2 decimal places
///
/// This ensures deterministic JSON output by eliminating floating-point
/// precision artifacts (e.g., 10.000000001 → 10.0)
fn round_f32<S>(value: &f32, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let rounded = (value * 100.0).round() / 100.0;
    serializer.serialize_f32(rounded)
}

/// Root container for entire score layout
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlobalLayout {
    /// Ordered array of systems from top to bottom
    pub systems: Vec<System>,
    /// Width of widest system in logical units
    #[serde(serialize_with = "round_f32")]
    pub total_width: f32,
    /// Sum of all system heights + inter-system spacing in logical units
    #[serde(serialize_with = "round_f32")]
    pub total_height: f32,
    /// Scaling factor: how many logical units = 1 staff space (default: 10.0)
    #[serde(serialize_with = "round_f32")]
    pub units_per_space: f32,
}

/// System containing 1-N measures of music arranged horizontally
///
/// Primary virtualization boundary for efficient rendering
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    /// 0-based system number (sequential: 0, 1, 2, ...)
    pub index: usize,
    /// Screen region occupied by system (for viewport intersection checks)
    pub bounding_box: BoundingBox,
    /// Instruments/staff groups in this system
    pub staff_groups: Vec<StaffGroup>,
    /// Musical time span covered by system (in 960 PPQ ticks)
    pub tick_range: TickRange,
}

/// Groups related staves for multi-staff instruments
///
/// Piano has 2 staves (treble + bass), solo instruments have 1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffGroup {
    /// Links to Score.Instrument.id
    pub instrument_id: String,
    /// 1-2 staves per group (MVP limit)
    pub staves: Vec<Staff>,
    /// Visual grouping indicator
    pub bracket_type: BracketType,
}

/// Single 5-line staff with positioned glyphs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Staff {
    /// Exactly 5 horizontal lines (standard music staff)
    pub staff_lines: [StaffLine; 5],
    /// Batched glyphs for efficient rendering
    pub glyph_runs: Vec<GlyphRun>,
    /// Clefs, key signatures, time signatures at staff start (the prolog)
    pub structural_glyphs: Vec<Glyph>,
    /// Bar lines at measure boundaries within this staff
    pub bar_lines: Vec<BarLine>,
}

/// Single horizontal line in a staff
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StaffLine {
    /// Vertical position in logical units (system-relative)
    #[serde(serialize_with = "round_f32")]
    pub y_position: f32,
    /// Left edge of line in logical units
    #[serde(serialize_with = "round_f32")]
    pub start_x: f32,
    /// Right edge of line in logical units
    #[serde(serialize_with = "round_f32")]
    pub end_x: f32,
}

/// Batches consecutive glyphs with identical drawing properties
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GlyphRun {
    /// All glyphs in this batch (non-empty)
    pub glyphs: Vec<Glyph>,
    /// Font name (typically "Bravura" for SMuFL)
    pub font_family: String,
    /// Font size in logical units (typically 40.0 = 4 staff spaces)
    #[serde(serialize_with = "round_f32")]
    pub font_size: f32,
    /// RGBA color for all glyphs
    pub color: Color,
    /// Additional opacity multiplier (range [0.0, 1.0])
    #[serde(serialize_with = "round_f32")]
    pub opacity: f32,
}

/// Single drawable musical symbol with position and source linkage
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Glyph {
    /// (x, y) coordinates in logical units (system-relative)
    pub position: Point,
    /// Hit-testing rectangle including ledger lines
    pub bounding_box: BoundingBox,
    /// SMuFL Unicode codepoint as string (e.g., "\u{E0A4}" = quarter notehead)
    pub codepoint: String,
    /// Link back to domain entity for interaction
    pub source_reference: SourceReference,
}

/// A bar line, positioned between the top and bottom staff line of a staff.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BarLine {
    #[serde(serialize_with = "round_f32")]
    pub x_position: f32,
    #[serde(serialize_with = "round_f32")]
    pub y_start: f32,
    #[serde(serialize_with = "round_f32")]
    pub y_end: f32,
    pub bar_type: BarLineType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarLineType {
    Single,
    Double,
    Final,
    StartRepeat,
    EndRepeat,
}

impl From<crate::domain::events::barline::BarlineType> for BarLineType {
    fn from(t: crate::domain::events::barline::BarlineType) -> Self {
        use crate::domain::events::barline::BarlineType as D;
        match t {
            D::Simple => BarLineType::Single,
            D::Double => BarLineType::Double,
            D::Final => BarLineType::Final,
            D::StartRepeat => BarLineType::StartRepeat,
            D::EndRepeat => BarLineType::EndRepeat,
        }
    }
}

/// 2D coordinate in logical units
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Point {
    /// X-coordinate (left-to-right, positive = rightward)
    #[serde(serialize_with = "round_f32")]
    pub x: f32,
    /// Y-coordinate (top-to-bottom, positive = downward)
    #[serde(serialize_with = "round_f32")]
    pub y: f32,
}

/// Rectangular hit-testing and clipping region
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    /// X-coordinate of top-left corner in logical units
    #[serde(serialize_with = "round_f32")]
    pub x: f32,
    /// Y-coordinate of top-left corner in logical units
    #[serde(serialize_with = "round_f32")]
    pub y: f32,
    /// Width in logical units
    #[serde(serialize_with = "round_f32")]
    pub width: f32,
    /// Height in logical units
    #[serde(serialize_with = "round_f32")]
    pub height: f32,
}

impl BoundingBox {
    /// Check if a point is inside this bounding box (inclusive)
    pub fn contains(&self, point: &Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }

    /// Check if two bounding boxes intersect
    pub fn intersects(&self, other: &BoundingBox) -> bool {
        !(self.x + self.width <= other.x
            || other.x + other.width <= self.x
            || self.y + self.height <= other.y
            || other.y + other.height <= self.y)
    }
}

/// Musical time span using 960 PPQ resolution
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TickRange {
    /// First tick in range (inclusive, 960 PPQ)
    pub start_tick: u32,
    /// Last tick in range (exclusive, 960 PPQ)
    pub end_tick: u32,
}

/// Links layout glyphs back to domain entities
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceReference {
    /// Instrument identifier
    pub instrument_id: String,
    /// Staff number within instrument (0 = treble, 1 = bass for piano)
    pub staff_index: usize,
    /// Voice number within staff (0-3 for polyphonic notation)
    pub voice_index: usize,
    /// Index into voice's event array
    pub event_index: usize,
}

/// Visual grouping indicator for multi-staff instruments
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub enum BracketType {
    /// Curved bracket (piano, harp)
    Brace,
    /// Square bracket (choir, strings)
    Bracket,
    /// No bracket (solo instruments)
    None,
}

/// RGBA color representation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color {
    /// Red component (0-255)
    pub r: u8,
    /// Green component (0-255)
    pub g: u8,
    /// Blue component (0-255)
    pub b: u8,
    /// Alpha component (0-255, 255 = opaque)
    pub a: u8,
}

impl Color {
    /// Standard black color
    pub const BLACK: Color = Color {
        r: 0,
        g: 0,
        b: 0,
        a: 255,
    };
}

/// Paint order layer, back to front (spec §3: "background, staff-lines,
/// notes, aux-objs, top").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ZLayer {
    Background,
    StaffLines,
    Notes,
    AuxObjs,
    Top,
}

/// Common header every shape carries, per spec §3 and §9: bounding
/// rectangle in logical units, color, and z-layer.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ShapeHeader {
    pub origin: Point,
    pub width: f32,
    pub height: f32,
    pub color: Color,
    pub z_layer: ZLayer,
}

impl ShapeHeader {
    pub fn bounding_box(&self) -> BoundingBox {
        BoundingBox {
            x: self.origin.x,
            y: self.origin.y,
            width: self.width,
            height: self.height,
        }
    }
}

/// One segment of a beam, at one beaming level (spec §4.4 step 6). A
/// straight line between two x/y endpoints with a fixed thickness.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BeamSegment {
    pub x_start: f32,
    pub y_start: f32,
    pub x_end: f32,
    pub y_end: f32,
    pub thickness: f32,
}

/// Engraving-level shape: the tagged sum described in spec §9
/// ("polymorphism over shape kinds... expressed as a tagged sum with a
/// z_layer, origin, size, color common header plus per-variant payload").
/// Produced by the Shapes Creator / per-object engravers; flattened into
/// `Glyph`/`BarLine`/`StaffLine` by the score layouter once committed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Shape {
    Glyph(ShapeHeader, Glyph),
    Beam(ShapeHeader, Vec<BeamSegment>),
    BarLine(ShapeHeader, BarLine),
    StaffLine(ShapeHeader, StaffLine),
    /// An invisible placeholder of given width (spacers, go-forward rests).
    Invisible(ShapeHeader),
    /// Owns child shapes (e.g. a chord's accidental column, a time
    /// signature's stacked digits).
    Composite(ShapeHeader, Vec<Shape>),
    /// An unrecoverable-condition message rendered on the page (spec §7).
    ErrorMessage(ShapeHeader, String),
    /// A phrasing curve (tie/slur), as an ordered list of control points.
    Curve(ShapeHeader, Vec<Point>),
}

impl Shape {
    pub fn header(&self) -> &ShapeHeader {
        match self {
            Shape::Glyph(h, _)
            | Shape::Beam(h, _)
            | Shape::BarLine(h, _)
            | Shape::StaffLine(h, _)
            | Shape::Invisible(h)
            | Shape::Composite(h, _)
            | Shape::ErrorMessage(h, _)
            | Shape::Curve(h, _) => h,
        }
    }

    pub fn width(&self) -> f32 {
        self.header().width
    }
}
