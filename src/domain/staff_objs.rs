//! Staff-objects cursor: flattens a `Score` into a strict total order of
//! staff-object events, one per `(timepos, instrument, voice, staff)`
//! quadruple, as required by the Column Breaker and Shapes Creator.

use crate::domain::{
    events::note::{Note, NoteBeamType},
    events::rest::Rest,
    score::Score,
    value_objects::{Clef, KeySignature, StemDirection, Tick},
};

/// Duration, in ticks, of one quarter note at this crate's fixed 960-PPQ
/// resolution (matches `domain::value_objects::Tick`'s documented unit).
pub const TICKS_PER_QUARTER: u32 = 960;

/// The payload of a single staff-object emission.
#[derive(Debug, Clone, PartialEq)]
pub enum StaffObjectKind {
    Note(Note),
    Rest(Rest),
    Clef(Clef),
    KeySignature(KeySignature),
    TimeSignature { numerator: u8, denominator: u8 },
    Barline,
}

/// One emission of the staff-objects cursor: a staff-object together with
/// its full address `(timepos, instr, staff, voice)` and the measure
/// duration in effect at that time.
#[derive(Debug, Clone)]
pub struct StaffObjEntry {
    pub timepos: Tick,
    pub instrument: usize,
    pub staff: usize,
    pub voice: usize,
    pub kind: StaffObjectKind,
    measure_duration_ticks: u32,
}

impl StaffObjEntry {
    pub fn is_note(&self) -> bool {
        matches!(self.kind, StaffObjectKind::Note(_))
    }

    pub fn is_rest(&self) -> bool {
        matches!(self.kind, StaffObjectKind::Rest(_))
    }

    pub fn is_barline(&self) -> bool {
        matches!(self.kind, StaffObjectKind::Barline)
    }

    pub fn is_note_rest(&self) -> bool {
        self.is_note() || self.is_rest()
    }

    pub fn is_time_signature(&self) -> bool {
        matches!(self.kind, StaffObjectKind::TimeSignature { .. })
    }

    pub fn is_beamed(&self) -> bool {
        match &self.kind {
            StaffObjectKind::Note(n) => n.is_beamed(),
            _ => false,
        }
    }

    pub fn is_end_of_beam(&self) -> bool {
        match &self.kind {
            StaffObjectKind::Note(n) => n.is_end_of_beam(),
            _ => false,
        }
    }

    pub fn is_tied_prev(&self) -> bool {
        match &self.kind {
            StaffObjectKind::Note(n) => n.tied_prev,
            _ => false,
        }
    }

    pub fn is_tied_next(&self) -> bool {
        match &self.kind {
            StaffObjectKind::Note(n) => n.tied_next,
            _ => false,
        }
    }

    pub fn get_duration(&self) -> u32 {
        match &self.kind {
            StaffObjectKind::Note(n) => n.duration_ticks,
            StaffObjectKind::Rest(r) => r.duration_ticks,
            _ => 0,
        }
    }

    pub fn get_voice(&self) -> usize {
        self.voice
    }

    pub fn get_stem_direction(&self) -> Option<StemDirection> {
        match &self.kind {
            StaffObjectKind::Note(n) => n.forced_stem,
            _ => None,
        }
    }

    pub fn get_beam_type(&self, level: u8) -> NoteBeamType {
        match &self.kind {
            StaffObjectKind::Note(n) => n.beam_type_at(level),
            _ => NoteBeamType::None,
        }
    }

    pub fn get_measure_duration(&self) -> u32 {
        self.measure_duration_ticks
    }
}

fn measure_ticks(numerator: u8, denominator: u8) -> u32 {
    let whole_note = TICKS_PER_QUARTER * 4;
    (whole_note / denominator.max(1) as u32) * numerator as u32
}

/// Build the full staff-objects stream for a score, already sorted in the
/// strict total order required by section 5: `(timepos, instrument, voice,
/// staff)`, with a stable per-tick kind ordering (prolog-like structural
/// events before notes/rests, barlines last) so identical inputs always
/// yield identical streams.
pub fn build_staff_objs(score: &Score) -> Vec<StaffObjEntry> {
    let mut entries = Vec::new();

    for (instr_idx, instrument) in score.instruments.iter().enumerate() {
        for (staff_idx, staff) in instrument.staves.iter().enumerate() {
            for event in &staff.staff_structural_events {
                use crate::domain::events::staff::StaffStructuralEvent as SSE;
                match event {
                    SSE::Clef(c) => entries.push(raw_entry(
                        score,
                        c.tick,
                        instr_idx,
                        staff_idx,
                        0,
                        StaffObjectKind::Clef(c.clef),
                        0,
                    )),
                    SSE::KeySignature(k) => entries.push(raw_entry(
                        score,
                        k.tick,
                        instr_idx,
                        staff_idx,
                        0,
                        StaffObjectKind::KeySignature(k.key),
                        0,
                    )),
                    SSE::Barline(b) => entries.push(raw_entry(
                        score,
                        b.tick,
                        instr_idx,
                        staff_idx,
                        0,
                        StaffObjectKind::Barline,
                        2,
                    )),
                }
            }

            for event in &score.global_structural_events {
                use crate::domain::events::global::GlobalStructuralEvent as GSE;
                if let GSE::TimeSignature(t) = event {
                    entries.push(raw_entry(
                        score,
                        t.tick,
                        instr_idx,
                        staff_idx,
                        0,
                        StaffObjectKind::TimeSignature {
                            numerator: t.numerator,
                            denominator: t.denominator,
                        },
                        0,
                    ));
                }
            }

            for (voice_idx, voice) in staff.voices.iter().enumerate() {
                for note in &voice.interval_events {
                    entries.push(raw_entry(
                        score,
                        note.start_tick,
                        instr_idx,
                        staff_idx,
                        voice_idx,
                        StaffObjectKind::Note(note.clone()),
                        1,
                    ));
                }
                for rest in &voice.rests {
                    entries.push(raw_entry(
                        score,
                        rest.start_tick,
                        instr_idx,
                        staff_idx,
                        voice_idx,
                        StaffObjectKind::Rest(rest.clone()),
                        1,
                    ));
                }
            }
        }
    }

    entries.sort_by_key(|e| {
        (
            e.timepos.value(),
            e.instrument,
            e.voice,
            e.staff,
            kind_rank(e),
        )
    });

    entries
}

fn kind_rank(e: &StaffObjEntry) -> u8 {
    match e.kind {
        StaffObjectKind::Clef(_) | StaffObjectKind::KeySignature(_) | StaffObjectKind::TimeSignature { .. } => 0,
        StaffObjectKind::Note(_) | StaffObjectKind::Rest(_) => 1,
        StaffObjectKind::Barline => 2,
    }
}

#[allow(clippy::too_many_arguments)]
fn raw_entry(
    score: &Score,
    timepos: Tick,
    instrument: usize,
    staff: usize,
    voice: usize,
    kind: StaffObjectKind,
    _rank_hint: u8,
) -> StaffObjEntry {
    let measure_duration_ticks = score
        .get_time_signature_at(timepos)
        .map(|t| measure_ticks(t.numerator, t.denominator))
        .unwrap_or_else(|| measure_ticks(4, 4));

    StaffObjEntry {
        timepos,
        instrument,
        staff,
        voice,
        kind,
        measure_duration_ticks,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::events::note::Note;
    use crate::domain::value_objects::Pitch;

    #[test]
    fn stream_is_sorted_by_timepos_then_instrument_then_voice() {
        let mut score = Score::new();
        let note_a = Note::new(Tick::new(960), 960, Pitch::new(60).unwrap()).unwrap();
        let note_b = Note::new(Tick::new(0), 960, Pitch::new(62).unwrap()).unwrap();
        score.instruments[0].staves[0].voices[0]
            .add_note(note_b)
            .unwrap();
        score.instruments[0].staves[0].voices[0]
            .add_note(note_a)
            .unwrap();

        let entries = build_staff_objs(&score);
        let note_positions: Vec<u32> = entries
            .iter()
            .filter(|e| e.is_note())
            .map(|e| e.timepos.value())
            .collect();
        assert_eq!(note_positions, vec![0, 960]);
    }

    #[test]
    fn measure_duration_reflects_time_signature_in_effect() {
        let score = Score::new();
        let entries = build_staff_objs(&score);
        let ts = entries.iter().find(|e| e.is_time_signature()).unwrap();
        assert_eq!(ts.get_measure_duration(), 3840);
    }
}
