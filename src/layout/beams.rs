//! Beam Engraver — the hardest per-object engraver (spec §4.4).
//!
//! Operates on an already-spaced, already-positioned group of note/rest
//! shapes (x known, notehead-side y known) and decides stem direction,
//! adjusts stem lengths so they line up along a single slope, repositions
//! rests inside the group, and emits the beam's line segments.
//!
//! Inputs/outputs are in logical units; converting from tenths is the
//! caller's job (via `ScoreMeter`), same as every other engraver in this
//! crate.

use crate::domain::events::note::NoteBeamType;
use crate::domain::value_objects::StemDirection;
use crate::layout::types::BeamSegment;

/// Beaming constants in tenths per spec §6, already tenths-to-logical
/// converted by the caller before being passed in here (this module never
/// touches a `ScoreMeter`).
pub const BEAM_THICKNESS: f32 = 5.0;
pub const BEAM_SPACING: f32 = 3.0;
pub const BEAM_HOOK_LENGTH: f32 = 11.0;

/// Rendered thickness of a stem stroke, in tenths — a `begin`/`end` (or
/// `backward-hook`) segment's end point is extended past the stem's own x
/// so the beam visually covers the full stem width, per spec §4.4 step 6
/// ("extended by stem width to cover the stem"), grounded on
/// `lomse_beam_engraver.cpp`'s `uxEnd += pShapeNote->get_stem_width()`.
pub const STEM_WIDTH: f32 = 1.2;

/// Number of beaming levels the spec enumerates (8th through 128th note).
pub const MAX_BEAM_LEVELS: usize = 6;

/// One member of a beam group: a note or a rest, with enough geometry for
/// the engraver to position stems and rests. Mutated in place by
/// [`engrave_beam`] to carry its resolved direction and final stem length.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BeamMember {
    /// Position on the 5-line staff: line 1 (bottom) = 0 ... top line = 8,
    /// per the glossary. Used for stem-direction averaging and rest
    /// repositioning; meaningless (and ignored) for rests.
    pub position_on_staff: f32,
    /// Horizontal position of the stem, in logical units.
    pub x: f32,
    /// Y of the notehead-side end of the stem (where it meets the head).
    pub notehead_y: f32,
    /// True if this member is a rest rather than a note. A "member that is
    /// not a note-shape" per spec §4.4's failure-mode clause is treated
    /// identically: no stem contribution, rest positioning only.
    pub is_rest: bool,
    /// Stem direction forced by the source notation, if any.
    pub forced_stem: Option<StemDirection>,
    /// Extra length, at the flag side, contributed by e.g. a chord's
    /// farthest notehead — subtracted from the raw stem length before the
    /// floor/ceiling adjustment (spec §4.4 step 4).
    pub chord_extra: f32,
    /// Beam type at each of up to six levels.
    pub beam_types: [NoteBeamType; MAX_BEAM_LEVELS],

    /// Resolved stem direction, filled in by `engrave_beam`.
    pub resolved_stem: StemDirection,
    /// Resolved stem-end (flag-side) y, filled in by `engrave_beam`.
    pub stem_end_y: f32,
    /// Resolved rest-center y (tenths, staff-relative), filled in for rests.
    pub rest_y: f32,
}

impl BeamMember {
    pub fn new_note(position_on_staff: f32, x: f32, notehead_y: f32) -> Self {
        Self {
            position_on_staff,
            x,
            notehead_y,
            is_rest: false,
            forced_stem: None,
            chord_extra: 0.0,
            beam_types: [NoteBeamType::None, NoteBeamType::None, NoteBeamType::None,
                         NoteBeamType::None, NoteBeamType::None, NoteBeamType::None],
            resolved_stem: StemDirection::Up,
            stem_end_y: 0.0,
            rest_y: 0.0,
        }
    }

    pub fn new_rest(x: f32) -> Self {
        Self {
            position_on_staff: 0.0,
            x,
            notehead_y: 0.0,
            is_rest: true,
            forced_stem: None,
            chord_extra: 0.0,
            beam_types: [NoteBeamType::None, NoteBeamType::None, NoteBeamType::None,
                         NoteBeamType::None, NoteBeamType::None, NoteBeamType::None],
            resolved_stem: StemDirection::Up,
            stem_end_y: 0.0,
            rest_y: 0.0,
        }
    }

    pub fn with_beam_type(mut self, level: usize, beam_type: NoteBeamType) -> Self {
        self.beam_types[level] = beam_type;
        self
    }

    pub fn with_forced_stem(mut self, direction: StemDirection) -> Self {
        self.forced_stem = Some(direction);
        self
    }
}

/// Standard (un-adjusted) stem length, in logical units — grounded in
/// `layout::stems::Stem::STEM_LENGTH`, the same nominal length the simple
/// per-notehead stem engraver uses.
pub const STD_STEM_LENGTH: f32 = crate::layout::stems::Stem::STEM_LENGTH;

/// Step 1: decide the group's stem direction.
///
/// Per spec: if any member has a forced direction, propagate it to the
/// whole group (the group is *mixed* iff forced members disagree —
/// reported back to the caller but does not change the propagated
/// direction, which is simply the first forced direction seen). Otherwise
/// stems point down iff the average position-on-staff is `> 6`.
pub fn decide_stem_direction(members: &[BeamMember]) -> (StemDirection, bool) {
    let forced: Vec<StemDirection> = members.iter().filter_map(|m| m.forced_stem).collect();
    if let Some(&first) = forced.first() {
        let mixed = forced.iter().any(|d| *d != first);
        return (first, mixed);
    }

    let notes: Vec<&BeamMember> = members.iter().filter(|m| !m.is_rest).collect();
    if notes.is_empty() {
        return (StemDirection::Up, false);
    }
    let avg: f32 = notes.iter().map(|m| m.position_on_staff).sum::<f32>() / notes.len() as f32;
    let direction = if avg > 6.0 {
        StemDirection::Down
    } else {
        StemDirection::Up
    };
    (direction, false)
}

/// Step 2: the beam sits above the noteheads iff stems point up.
pub fn beam_is_above(direction: StemDirection) -> bool {
    direction == StemDirection::Up
}

/// Steps 3-4: apply the resolved direction to every member not already
/// forced, then fit a line through the first and last stem-ends and
/// re-project every intermediate one onto it, finally enforcing the
/// stem-length floor/ceiling.
pub fn apply_stems_and_adjust_lengths(members: &mut [BeamMember], direction: StemDirection) {
    if members.is_empty() {
        return;
    }

    for m in members.iter_mut() {
        m.resolved_stem = m.forced_stem.unwrap_or(direction);
    }

    let sign = match direction {
        StemDirection::Up => -1.0,
        StemDirection::Down => 1.0,
    };

    // Initial (un-adjusted) flag-side y for every member, at the nominal
    // standard stem length.
    let mut y_flag: Vec<f32> = members
        .iter()
        .map(|m| m.notehead_y + sign * STD_STEM_LENGTH)
        .collect();

    let n = members.len();
    let (x0, y0) = (members[0].x, y_flag[0]);
    let (xn, yn) = (members[n - 1].x, y_flag[n - 1]);
    let dx = xn - x0;
    let slope = if dx.abs() > f32::EPSILON { (yn - y0) / dx } else { 0.0 };

    for i in 0..n {
        y_flag[i] = y0 + slope * (members[i].x - x0);
    }

    let mut lengths: Vec<f32> = members
        .iter()
        .zip(y_flag.iter())
        .map(|(m, yf)| (m.notehead_y - yf).abs() - m.chord_extra)
        .collect();

    let min_len = lengths.iter().cloned().fold(f32::INFINITY, f32::min);
    let std_len = (lengths[0] + lengths[n - 1]) / 2.0;
    let dy_min = (2.0 / 3.0) * std_len;

    if min_len < dy_min {
        let delta = dy_min - min_len;
        for yf in y_flag.iter_mut() {
            *yf += sign * delta;
        }
        for l in lengths.iter_mut() {
            *l += delta;
        }
    } else if min_len > std_len {
        let delta = min_len - std_len;
        for yf in y_flag.iter_mut() {
            *yf -= sign * delta;
        }
        for l in lengths.iter_mut() {
            *l -= delta;
        }
    }

    for (i, m) in members.iter_mut().enumerate() {
        m.stem_end_y = y_flag[i];
    }
}

/// Canonical rest position on a standard 5-line staff, in tenths (the
/// middle line, staff-line 35 in the convention this crate's positioner
/// uses for a quarter rest).
pub const CANONICAL_REST_TENTHS: f32 = 35.0;

/// Step 5: reposition rests inside the group so they sit near the average
/// notehead position, converted `tenths = 5 * avg_pos` and shifted
/// relative to the canonical rest line.
pub fn reposition_rests(members: &mut [BeamMember]) {
    let notes: Vec<&BeamMember> = members.iter().filter(|m| !m.is_rest).collect();
    if notes.is_empty() {
        return;
    }
    let avg_pos: f32 = notes.iter().map(|m| m.position_on_staff).sum::<f32>() / notes.len() as f32;
    let tenths = 5.0 * avg_pos;
    let shift = tenths - CANONICAL_REST_TENTHS;

    for m in members.iter_mut() {
        if m.is_rest {
            m.rest_y = CANONICAL_REST_TENTHS + shift;
        }
    }
}

/// Step 6: walk the beam-type state machine at each level and emit
/// segments. `beam_above` controls the sign of the inter-level offset.
pub fn compute_beam_segments(members: &[BeamMember], beam_above: bool) -> Vec<BeamSegment> {
    let mut segments = Vec::new();
    let level_sign: f32 = if beam_above { -1.0 } else { 1.0 };

    for level in 0..MAX_BEAM_LEVELS {
        let level_offset = level_sign * (level as f32) * (BEAM_SPACING + BEAM_THICKNESS);
        let mut pending_start: Option<(f32, f32)> = None;
        let mut pending_hook_start: Option<(f32, f32)> = None;

        for (i, m) in members.iter().enumerate() {
            let y_here = m.stem_end_y + level_offset;
            match m.beam_types[level] {
                NoteBeamType::Begin => {
                    pending_start = Some((m.x, y_here));
                }
                NoteBeamType::End => {
                    if let Some((xs, ys)) = pending_start.take() {
                        segments.push(BeamSegment {
                            x_start: xs,
                            y_start: ys,
                            x_end: m.x + STEM_WIDTH,
                            y_end: y_here,
                            thickness: BEAM_THICKNESS,
                        });
                    }
                }
                NoteBeamType::ForwardHook => {
                    pending_hook_start = Some((m.x, y_here));
                }
                NoteBeamType::BackwardHook => {
                    let slope = if i > 0 {
                        let prev = &members[i - 1];
                        let dx = m.x - prev.x;
                        if dx.abs() > f32::EPSILON {
                            ((m.stem_end_y + level_offset) - (prev.stem_end_y + level_offset)) / dx
                        } else {
                            0.0
                        }
                    } else {
                        0.0
                    };
                    let x_start = m.x - BEAM_HOOK_LENGTH;
                    let y_start = y_here - slope * BEAM_HOOK_LENGTH;
                    segments.push(BeamSegment {
                        x_start,
                        y_start,
                        x_end: m.x + STEM_WIDTH,
                        y_end: y_here,
                        thickness: BEAM_THICKNESS,
                    });
                }
                NoteBeamType::Continue | NoteBeamType::None => {}
            }

            if let Some((xs, ys)) = pending_hook_start.take() {
                let next_x = members.get(i + 1).map(|n| n.x).unwrap_or(xs + BEAM_HOOK_LENGTH);
                let dx = (next_x - xs).min(BEAM_HOOK_LENGTH).max(0.0);
                let slope = if i + 1 < members.len() {
                    let next = &members[i + 1];
                    let full_dx = next.x - xs;
                    if full_dx.abs() > f32::EPSILON {
                        ((next.stem_end_y + level_offset) - ys) / full_dx
                    } else {
                        0.0
                    }
                } else {
                    0.0
                };
                segments.push(BeamSegment {
                    x_start: xs,
                    y_start: ys,
                    x_end: xs + dx,
                    y_end: ys + slope * dx,
                    thickness: BEAM_THICKNESS,
                });
            }
        }
    }

    segments
}

/// Result of engraving a beam group: per-member resolved stems/lengths are
/// written back into `members` in place; the beam's line segments and
/// whether the group came out mixed-direction are returned.
#[derive(Debug, Clone)]
pub struct BeamEngraveResult {
    pub direction: StemDirection,
    pub mixed: bool,
    pub beam_above: bool,
    pub segments: Vec<BeamSegment>,
}

/// Runs the full pipeline (spec §4.4 steps 1-7) over a beam group. Empty
/// groups are ignored per the documented failure mode.
pub fn engrave_beam(members: &mut [BeamMember]) -> Option<BeamEngraveResult> {
    if members.is_empty() {
        return None;
    }

    let (direction, mixed) = decide_stem_direction(members);
    let beam_above = beam_is_above(direction);
    apply_stems_and_adjust_lengths(members, direction);
    reposition_rests(members);
    let segments = compute_beam_segments(members, beam_above);

    Some(BeamEngraveResult {
        direction,
        mixed,
        beam_above,
        segments,
    })
}
