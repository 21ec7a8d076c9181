use crate::domain::{
    ids::NoteId,
    value_objects::{NoteSpelling, Pitch, StemDirection, Tick},
};
use serde::{Deserialize, Serialize};

/// Beam state for serialization through the layout pipeline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NoteBeamType {
    None,
    Begin,
    Continue,
    End,
    ForwardHook,
    BackwardHook,
}

/// Beam annotation on a note for serialization through the layout pipeline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteBeamData {
    /// Beam level (1=8th, 2=16th, 3=32nd, etc.), up to 6 per spec.
    pub number: u8,
    /// Beam state at this note for this level
    pub beam_type: NoteBeamType,
}

/// Note represents a musical note with timing and pitch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    pub id: NoteId,
    pub start_tick: Tick,
    pub duration_ticks: u32,
    pub pitch: Pitch,
    /// Optional enharmonic spelling (e.g., D# vs Eb) preserved from MusicXML import
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spelling: Option<NoteSpelling>,
    /// Beam annotations from MusicXML import (empty if no beams)
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub beams: Vec<NoteBeamData>,
    /// Stem direction forced by the source notation, if any. When set, the
    /// beam engraver must propagate this direction to the rest of the group
    /// instead of computing the average-position rule.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forced_stem: Option<StemDirection>,
    /// True iff this note is tied to the previous note of the same pitch.
    #[serde(default)]
    pub tied_prev: bool,
    /// True iff this note is tied to the next note of the same pitch.
    #[serde(default)]
    pub tied_next: bool,
    /// Notes sharing a `chord_id` sound simultaneously and are engraved as a
    /// single notehead column (accidental/notehead-side reversal applies
    /// across the whole chord, not per note).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chord_id: Option<u32>,
}

impl Note {
    pub fn new(start_tick: Tick, duration_ticks: u32, pitch: Pitch) -> Result<Self, &'static str> {
        if duration_ticks == 0 {
            return Err("duration_ticks must be greater than 0");
        }

        Ok(Self {
            id: NoteId::new(),
            start_tick,
            duration_ticks,
            pitch,
            spelling: None,
            beams: Vec::new(),
            forced_stem: None,
            tied_prev: false,
            tied_next: false,
            chord_id: None,
        })
    }

    /// Set the enharmonic spelling for this note (builder pattern)
    pub fn with_spelling(mut self, spelling: NoteSpelling) -> Self {
        self.spelling = Some(spelling);
        self
    }

    /// Set beam annotations for this note (builder pattern)
    pub fn with_beams(mut self, beams: Vec<NoteBeamData>) -> Self {
        self.beams = beams;
        self
    }

    /// Force a stem direction, overriding the beam engraver's own decision
    /// (builder pattern)
    pub fn with_forced_stem(mut self, direction: StemDirection) -> Self {
        self.forced_stem = Some(direction);
        self
    }

    /// Mark tie state relative to neighboring notes of the same pitch
    /// (builder pattern)
    pub fn with_ties(mut self, tied_prev: bool, tied_next: bool) -> Self {
        self.tied_prev = tied_prev;
        self.tied_next = tied_next;
        self
    }

    /// Assign this note to a chord group (builder pattern)
    pub fn with_chord_id(mut self, chord_id: u32) -> Self {
        self.chord_id = Some(chord_id);
        self
    }

    pub fn end_tick(&self) -> Tick {
        self.start_tick.add(self.duration_ticks)
    }

    pub fn overlaps_with(&self, other: &Note) -> bool {
        // Two notes overlap if one starts before the other ends
        self.start_tick < other.end_tick() && other.start_tick < self.end_tick()
    }

    /// Beam type for this note at a given level (1-based), if it
    /// participates in a beam at that level.
    pub fn beam_type_at(&self, level: u8) -> NoteBeamType {
        self.beams
            .iter()
            .find(|b| b.number == level)
            .map(|b| b.beam_type.clone())
            .unwrap_or(NoteBeamType::None)
    }

    pub fn is_beamed(&self) -> bool {
        self.beams
            .iter()
            .any(|b| !matches!(b.beam_type, NoteBeamType::None))
    }

    pub fn is_end_of_beam(&self) -> bool {
        self.beams
            .iter()
            .any(|b| matches!(b.beam_type, NoteBeamType::End))
    }
}
