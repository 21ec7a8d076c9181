//! Shapes Creator (spec §4.3): a factory dispatching on staff-object kind,
//! plus the three-phase relation-engraver protocol (start/continue/finish)
//! for beams, ties, slurs, and tuplets.

use crate::domain::events::note::NoteBeamType;
use crate::domain::relations::RelationId;
use crate::domain::staff_objs::{StaffObjEntry, StaffObjectKind};
use crate::domain::value_objects::{Clef, KeySignature};
use crate::layout::beams::{self, BeamMember};
use crate::layout::meter::ScoreMeter;
use crate::layout::metrics::get_glyph_bbox;
use crate::layout::types::{Color, Glyph, Point, Shape, ShapeHeader, SourceReference, ZLayer};
use std::collections::HashMap;

fn glyph_name_for_clef(clef: Clef) -> &'static str {
    match clef {
        Clef::Treble => "gClef",
        Clef::Bass => "fClef",
        Clef::Alto | Clef::Tenor => "cClef",
    }
}

fn glyph_name_for_rest(duration_ticks: u32) -> &'static str {
    const Q: u32 = 960;
    match duration_ticks {
        d if d >= Q * 4 => "restWhole",
        d if d >= Q * 2 => "restHalf",
        d if d >= Q => "restQuarter",
        d if d >= Q / 2 => "rest8th",
        _ => "rest16th",
    }
}

/// Tracks a chord's accumulated horizontal extent as its member noteheads
/// are created, so notehead-side reversal and accidental shifts can react
/// immediately (spec §4.3: "creating a note that is a chord member also
/// adds the shape to its chord accumulator immediately").
#[derive(Debug, Clone, Copy, Default)]
pub struct ChordAccumulator {
    pub min_x: f32,
    pub max_x: f32,
    pub count: u32,
}

impl ChordAccumulator {
    fn accumulate(&mut self, header: &ShapeHeader) {
        if self.count == 0 {
            self.min_x = header.origin.x;
            self.max_x = header.origin.x + header.width;
        } else {
            self.min_x = self.min_x.min(header.origin.x);
            self.max_x = self.max_x.max(header.origin.x + header.width);
        }
        self.count += 1;
    }
}

/// Dispatches music objects to their per-kind engraver and returns the
/// produced shape. Holds the chord accumulators that persist across the
/// lifetime of a single layout pass.
pub struct ShapesCreator<'a> {
    meter: &'a ScoreMeter,
    chords: HashMap<u32, ChordAccumulator>,
}

impl<'a> ShapesCreator<'a> {
    pub fn new(meter: &'a ScoreMeter) -> Self {
        Self {
            meter,
            chords: HashMap::new(),
        }
    }

    fn glyph_shape(&self, glyph_name: &str, x: f32, y: f32, instrument: usize, staff: usize, z_layer: ZLayer) -> Shape {
        let bbox = get_glyph_bbox(glyph_name);
        let width = self.meter.tenths_to_logical(bbox.width * 10.0, instrument, staff);
        let height = self.meter.tenths_to_logical(bbox.height * 10.0, instrument, staff);
        let header = ShapeHeader {
            origin: Point { x, y },
            width,
            height,
            color: Color::BLACK,
            z_layer,
        };
        let glyph = Glyph {
            position: Point { x, y },
            bounding_box: header.bounding_box(),
            codepoint: glyph_name.to_string(),
            source_reference: SourceReference {
                instrument_id: instrument.to_string(),
                staff_index: staff,
                voice_index: 0,
                event_index: 0,
            },
        };
        Shape::Glyph(header, glyph)
    }

    /// An invisible placeholder of the given width (spacers, go-forward
    /// rests, and any object marked invisible in the source notation).
    pub fn invisible(&self, x: f32, y: f32, width: f32) -> Shape {
        Shape::Invisible(ShapeHeader {
            origin: Point { x, y },
            width,
            height: 0.0,
            color: Color::BLACK,
            z_layer: ZLayer::Background,
        })
    }

    fn create_note(&mut self, entry: &StaffObjEntry, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        let shape = self.glyph_shape("noteheadBlack", x, y, instrument, staff, ZLayer::Notes);
        if let StaffObjectKind::Note(note) = &entry.kind {
            if let Some(chord_id) = note.chord_id {
                self.chords.entry(chord_id).or_default().accumulate(shape.header());
            }
        }
        shape
    }

    fn create_rest(&self, entry: &StaffObjEntry, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        let glyph_name = glyph_name_for_rest(entry.get_duration());
        self.glyph_shape(glyph_name, x, y, instrument, staff, ZLayer::Notes)
    }

    fn create_clef(&self, clef: Clef, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        self.glyph_shape(glyph_name_for_clef(clef), x, y, instrument, staff, ZLayer::AuxObjs)
    }

    fn create_key_signature(&self, key: KeySignature, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        let sharps = key.sharps();
        if sharps == 0 {
            return self.invisible(x, y, 0.0);
        }
        let glyph_name = if sharps > 0 { "accidentalSharp" } else { "accidentalFlat" };
        let spacing = self.meter.tenths_to_logical(15.0, instrument, staff);
        let children: Vec<Shape> = (0..sharps.unsigned_abs())
            .map(|i| self.glyph_shape(glyph_name, x + spacing * i as f32, y, instrument, staff, ZLayer::AuxObjs))
            .collect();
        let width = spacing * sharps.unsigned_abs() as f32;
        Shape::Composite(
            ShapeHeader {
                origin: Point { x, y },
                width,
                height: 0.0,
                color: Color::BLACK,
                z_layer: ZLayer::AuxObjs,
            },
            children,
        )
    }

    fn create_time_signature(&self, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        // Digits are drawn by the `Drawer`, not looked up as SMuFL glyphs
        // in this crate's embedded table; the shape reserves the space.
        let width = self.meter.tenths_to_logical(20.0, instrument, staff);
        self.invisible(x, y, width)
    }

    fn create_barline(&self, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        let width = self.meter.tenths_to_logical(2.0, instrument, staff);
        Shape::Invisible(ShapeHeader {
            origin: Point { x, y },
            width,
            height: 0.0,
            color: Color::BLACK,
            z_layer: ZLayer::StaffLines,
        })
    }

    /// Factory entry point: dispatches `entry` to the appropriate
    /// per-object engraver (spec §4.3).
    pub fn create_shape(&mut self, entry: &StaffObjEntry, x: f32, y: f32, instrument: usize, staff: usize) -> Shape {
        match &entry.kind {
            StaffObjectKind::Note(_) => self.create_note(entry, x, y, instrument, staff),
            StaffObjectKind::Rest(_) => self.create_rest(entry, x, y, instrument, staff),
            StaffObjectKind::Clef(clef) => self.create_clef(*clef, x, y, instrument, staff),
            StaffObjectKind::KeySignature(key) => self.create_key_signature(*key, x, y, instrument, staff),
            StaffObjectKind::TimeSignature { .. } => self.create_time_signature(x, y, instrument, staff),
            StaffObjectKind::Barline => self.create_barline(x, y, instrument, staff),
        }
    }

    pub fn chord_extent(&self, chord_id: u32) -> Option<ChordAccumulator> {
        self.chords.get(&chord_id).copied()
    }
}

/// In-progress state for a beam relation being built across the
/// start/continue/finish protocol.
#[derive(Debug, Clone, Default)]
struct BeamInProgress {
    members: Vec<BeamMember>,
}

/// A member note/rest handed to the relation protocol: enough geometry to
/// build a [`BeamMember`] once the relation finishes.
#[derive(Debug, Clone)]
pub struct RelationMemberInput {
    pub position_on_staff: f32,
    pub x: f32,
    pub y: f32,
    pub is_rest: bool,
    pub beam_types: [NoteBeamType; beams::MAX_BEAM_LEVELS],
}

/// Indexes in-progress relation engravers by relation identity, per spec
/// §9 ("the storage indexes engravers by the relation object identity").
/// Owns every engraver it holds; `finish_*` consumes and removes it.
#[derive(Default)]
pub struct RelationStorage {
    beams: HashMap<RelationId, BeamInProgress>,
    curves: HashMap<RelationId, Vec<Point>>,
}

impl RelationStorage {
    pub fn new() -> Self {
        Self::default()
    }

    fn to_beam_member(input: RelationMemberInput) -> BeamMember {
        let mut member = if input.is_rest {
            BeamMember::new_rest(input.x)
        } else {
            BeamMember::new_note(input.position_on_staff, input.x, input.y)
        };
        for (level, bt) in input.beam_types.iter().enumerate() {
            member = member.with_beam_type(level, bt.clone());
        }
        member
    }

    /// Phase 1: allocate the beam engraver and record its first member.
    pub fn start_beam(&mut self, id: RelationId, first: RelationMemberInput) {
        self.beams.insert(
            id,
            BeamInProgress {
                members: vec![Self::to_beam_member(first)],
            },
        );
    }

    /// Phase 2: record an intermediate member. Per spec §7, a `continue`
    /// with no matching `start` is an engraver contract failure: logged,
    /// the member silently dropped.
    pub fn continue_beam(&mut self, id: RelationId, member: RelationMemberInput) {
        match self.beams.get_mut(&id) {
            Some(in_progress) => in_progress.members.push(Self::to_beam_member(member)),
            None => log::warn!("beam continue() called without a matching start() for {id}"),
        }
    }

    /// Phase 3: record the last member and run the full beam pipeline
    /// (spec §4.4), returning the committed beam shape. A `finish` with no
    /// matching `start` is an engraver contract failure (spec §7): logged,
    /// no shape produced.
    pub fn finish_beam(&mut self, id: RelationId, last: RelationMemberInput) -> Option<Shape> {
        let Some(mut in_progress) = self.beams.remove(&id) else {
            log::warn!("beam finish() called without a matching start() for {id}");
            return None;
        };
        in_progress.members.push(Self::to_beam_member(last));

        let result = beams::engrave_beam(&mut in_progress.members)?;
        let min_x = in_progress.members.iter().map(|m| m.x).fold(f32::INFINITY, f32::min);
        let max_x = in_progress.members.iter().map(|m| m.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = result
            .segments
            .iter()
            .flat_map(|s| [s.y_start, s.y_end])
            .fold(f32::INFINITY, f32::min);

        Some(Shape::Beam(
            ShapeHeader {
                origin: Point { x: min_x, y: min_y },
                width: (max_x - min_x).max(0.0),
                height: 0.0,
                color: Color::BLACK,
                z_layer: ZLayer::Notes,
            },
            result.segments,
        ))
    }

    /// Shared start/continue/finish sequence for tie and slur relations:
    /// both are phrasing curves over an ordered point list, differing only
    /// in how many members they typically span.
    pub fn start_curve(&mut self, id: RelationId, first: Point) {
        self.curves.insert(id, vec![first]);
    }

    pub fn continue_curve(&mut self, id: RelationId, point: Point) {
        match self.curves.get_mut(&id) {
            Some(points) => points.push(point),
            None => log::warn!("curve continue() called without a matching start() for {id}"),
        }
    }

    pub fn finish_curve(&mut self, id: RelationId, last: Point) -> Option<Shape> {
        let Some(mut points) = self.curves.remove(&id) else {
            log::warn!("curve finish() called without a matching start() for {id}");
            return None;
        };
        points.push(last);

        let min_x = points.iter().map(|p| p.x).fold(f32::INFINITY, f32::min);
        let max_x = points.iter().map(|p| p.x).fold(f32::NEG_INFINITY, f32::max);
        let min_y = points.iter().map(|p| p.y).fold(f32::INFINITY, f32::min);
        let max_y = points.iter().map(|p| p.y).fold(f32::NEG_INFINITY, f32::max);

        Some(Shape::Curve(
            ShapeHeader {
                origin: Point { x: min_x, y: min_y },
                width: max_x - min_x,
                height: max_y - min_y,
                color: Color::BLACK,
                z_layer: ZLayer::Notes,
            },
            points,
        ))
    }
}
