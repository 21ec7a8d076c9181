//! Column Layouter (spec §4.6, first half).
//!
//! A column owns its four horizontal edges (start, first-symbol,
//! last-symbol, final) reduced here to the three measurements spec §3
//! actually needs downstream: `start_hook`, `body` (first-symbol to
//! last-symbol), and `end_hook`. `trimmed_width = body + end_hook`;
//! `full_width = start_hook + trimmed_width`.

/// A column's horizontal measurements, independent of its position in a
/// system (that's `system::column_start`/`system::column_size`'s job).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Column {
    pub start_hook: f32,
    pub body: f32,
    pub end_hook: f32,
    /// If the column ends in a visible barline, `end_hook` includes it and
    /// is rigid (not compressible) — spec §3.
    pub ends_in_visible_barline: bool,
}

impl Column {
    pub fn new(start_hook: f32, body: f32, end_hook: f32) -> Self {
        Self {
            start_hook,
            body,
            end_hook,
            ends_in_visible_barline: false,
        }
    }

    pub fn with_visible_barline(mut self) -> Self {
        self.ends_in_visible_barline = true;
        self
    }

    pub fn trimmed_width(&self) -> f32 {
        self.body + self.end_hook
    }

    pub fn full_width(&self) -> f32 {
        self.start_hook + self.trimmed_width()
    }
}

/// Start position of the first column in a system: simply the system
/// cursor x (already past the left indent).
pub fn first_column_start(system_cursor_x: f32) -> f32 {
    system_cursor_x
}

/// Start position of a non-first column: `prev_end_x + max(0, prev_end_hook
/// − this_start_hook)` (spec §4.6).
pub fn column_start(prev_end_x: f32, prev_end_hook: f32, this_start_hook: f32) -> f32 {
    prev_end_x + (prev_end_hook - this_start_hook).max(0.0)
}

/// Size of the first column in a system (spec §4.6, resolved against
/// §8's literal scenario and `lomse_test_system_layouter.cpp`'s
/// `Size(0) = 1800` for `body=1800, end_hook=500`): the column's width up
/// to, but not including, its end hook — `start_hook + body`, equivalently
/// `full_width() - end_hook`.
pub fn first_column_size(column: &Column) -> f32 {
    column.full_width() - column.end_hook
}

/// Size of a non-first column: `trimmed_width + max(0, prev_end_hook −
/// this_start_hook)` if `prev_end_hook > this_start_hook`, else just
/// `trimmed_width` (spec §4.6).
pub fn column_size(column: &Column, prev_end_hook: f32) -> f32 {
    let overlap = prev_end_hook - column.start_hook;
    if overlap > 0.0 {
        column.trimmed_width() + overlap
    } else {
        column.trimmed_width()
    }
}

/// Justifies a system's trimmed column widths against `free` leftover
/// space (`system_width − Σ used`), redistributing proportionally to each
/// column's trimmed width (spec §4.6). Widths are left unchanged when
/// `free <= 0`.
pub fn justify_widths(trimmed: &[f32], free: f32) -> Vec<f32> {
    if free <= 0.0 {
        return trimmed.to_vec();
    }
    let sum: f32 = trimmed.iter().sum();
    if sum <= 0.0 {
        return trimmed.to_vec();
    }
    trimmed.iter().map(|w| w * (1.0 + free / sum)).collect()
}
