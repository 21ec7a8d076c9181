//! Gourlay-style horizontal spacing algorithm (spec §4.5).
//!
//! Distinct from the teacher's original linear `layout::spacer` (kept
//! as-is for the legacy JSON-driven `compute_layout` pipeline): this module
//! implements the spec's logarithmic spacing function and the column-width
//! contract the line breaker and system layouter consume.

/// A reference duration, in ticks, the spacing function is calibrated
/// against — one quarter note at this crate's 960-PPQ resolution.
pub const DELTA_T_REF: f32 = 960.0;

/// Minimum horizontal separation between two symbols, in logical units,
/// regardless of how small their time difference is.
pub const MIN_SYMBOL_SEPARATION: f32 = 10.0;

/// The spacing function `f(Δt) = k·log2(Δt/Δt_ref) + c`, bounded below by
/// `MIN_SYMBOL_SEPARATION`. `k` and `c` are calibration constants: `c` is
/// the width at the reference duration, `k` controls how much extra width
/// a doubling of duration buys.
#[derive(Debug, Clone, Copy)]
pub struct SpacingFunction {
    pub k: f32,
    pub c: f32,
}

impl Default for SpacingFunction {
    fn default() -> Self {
        // A quarter note (Δt = Δt_ref) gets 40 logical units; each
        // halving/doubling of duration adds/removes 15 units.
        Self { k: 15.0, c: 40.0 }
    }
}

impl SpacingFunction {
    /// Width, in logical units, this function assigns to a time interval
    /// of `delta_t` ticks. `delta_t <= 0` is clamped to the reference
    /// duration's own minimum (there is no such thing as a non-positive
    /// gap between two distinct musical events).
    pub fn width_for(&self, delta_t: f32) -> f32 {
        let delta_t = delta_t.max(1.0);
        let raw = self.k * (delta_t / DELTA_T_REF).log2() + self.c;
        raw.max(MIN_SYMBOL_SEPARATION)
    }
}

/// A concurrent voice's contribution to a column's width: the time gap to
/// its next event in that same voice (or `None` if it has no successor in
/// the column, e.g. the column ends at a barline).
#[derive(Debug, Clone, Copy)]
pub struct VoiceGap {
    pub delta_t: f32,
}

/// Computes a column's intrinsic width: the spacing function evaluated per
/// concurrent voice, with the minimum taken across voices (spec §4.5: "the
/// minimum is taken over concurrent voices within the column").
pub fn intrinsic_width(function: &SpacingFunction, voice_gaps: &[VoiceGap]) -> f32 {
    voice_gaps
        .iter()
        .map(|g| function.width_for(g.delta_t))
        .fold(f32::INFINITY, f32::min)
        .max(MIN_SYMBOL_SEPARATION)
}

/// A column's spacing contract, per spec §4.5: its intrinsic width plus a
/// penalty function reporting how bad it is to stretch/compress to a
/// different width. Columns below `intrinsic_width` are penalized harder
/// than columns stretched above it, modeling real engraving aesthetics
/// (compression reads worse than modest extra whitespace).
#[derive(Debug, Clone, Copy)]
pub struct ColumnSpacing {
    pub intrinsic_width: f32,
}

impl ColumnSpacing {
    pub fn new(intrinsic_width: f32) -> Self {
        Self { intrinsic_width }
    }

    pub fn get_column_width(&self) -> f32 {
        self.intrinsic_width
    }

    /// Penalty for stretching/compressing this column to `actual_width`.
    /// Zero at the intrinsic width; grows quadratically either side, with
    /// compression penalized three times as steeply as stretching.
    pub fn penalty_for_width(&self, actual_width: f32) -> f32 {
        let diff = actual_width - self.intrinsic_width;
        if diff >= 0.0 {
            diff * diff / self.intrinsic_width.max(1.0)
        } else {
            3.0 * diff * diff / self.intrinsic_width.max(1.0)
        }
    }
}

/// Sums the penalty of fitting columns `[first, last]` (inclusive) of a
/// candidate system into `target_width`, per spec §4.5's
/// `determine_penalty_for_line(iSystem, iFirstCol, iLastCol)`. Returns
/// `f32::INFINITY` if the columns' combined intrinsic width already
/// exceeds `target_width` (no amount of compression helps).
pub fn determine_penalty_for_line(columns: &[ColumnSpacing], first: usize, last: usize, target_width: f32) -> f32 {
    if first > last || last >= columns.len() {
        return f32::INFINITY;
    }
    let slice = &columns[first..=last];
    let total_intrinsic: f32 = slice.iter().map(|c| c.intrinsic_width).sum();
    if total_intrinsic > target_width {
        return f32::INFINITY;
    }
    let share = target_width / slice.len() as f32;
    slice.iter().map(|c| c.penalty_for_width(share)).sum()
}

/// Compares two candidate penalties for extending a break from `i` to `j`,
/// per spec §4.5's `is_better_option`. Lower total (reaching-here +
/// this-line) penalty wins; ties keep the existing best (stable, so the
/// earliest-found optimum is preferred).
pub fn is_better_option(prev_penalty: f32, new_line_penalty: f32, current_best: f32) -> bool {
    if new_line_penalty.is_infinite() {
        return false;
    }
    let candidate = prev_penalty + new_line_penalty;
    candidate < current_best
}
