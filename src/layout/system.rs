//! System Layouter (spec §4.6, second half): places a sequence of columns
//! horizontally within a system and justifies the result.

use crate::layout::column::{self, Column};

/// A positioned column within a system: its layout data plus the x it was
/// placed at and its final (justified) width.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedColumn {
    pub start_x: f32,
    pub trimmed_width: f32,
    pub justified_width: f32,
}

/// A system: a left indent (instrument names/braces/initial clefs), fixed
/// margins, and an ordered sequence of columns (spec §3).
#[derive(Debug, Clone)]
pub struct System {
    pub indent: f32,
    pub margin_left: f32,
    pub margin_right: f32,
    pub width: f32,
}

impl System {
    pub fn new(width: f32, indent: f32, margin_left: f32, margin_right: f32) -> Self {
        Self {
            indent,
            margin_left,
            margin_right,
            width,
        }
    }

    /// Usable width inside margins and indent, the justification target.
    pub fn target_width(&self) -> f32 {
        self.width - self.margin_left - self.margin_right - self.indent
    }

    /// Places `columns` left to right starting after the indent, per
    /// §4.6's `column_start`/`column_size` rules, then justifies the
    /// whole row against `target_width`.
    ///
    /// Property 3 (hook invariant, spec §8): by construction,
    /// `placed[i+1].start_x == placed[i].start_x + placed[i].justified_width`
    /// is NOT generally true post-justification (justification changes
    /// widths); the *pre-justification* hook invariant — `col[i+1]`'s first
    /// symbol equals `col[i].final + max(0, col[i].end_hook -
    /// col[i+1].start_hook)` — holds against the `start_x`/trimmed sizing
    /// computed here, before the proportional redistribution pass.
    pub fn layout_columns(&self, columns: &[Column]) -> Vec<PlacedColumn> {
        if columns.is_empty() {
            return Vec::new();
        }

        let system_cursor_x = self.margin_left + self.indent;
        let mut placed = Vec::with_capacity(columns.len());

        let mut start_x = column::first_column_start(system_cursor_x);
        let mut size = column::first_column_size(&columns[0]);
        placed.push(PlacedColumn {
            start_x,
            trimmed_width: columns[0].trimmed_width(),
            justified_width: size,
        });

        for i in 1..columns.len() {
            let prev_end_x = start_x + size;
            let prev_end_hook = columns[i - 1].end_hook;
            start_x = column::column_start(prev_end_x, prev_end_hook, columns[i].start_hook);
            size = column::column_size(&columns[i], prev_end_hook);
            placed.push(PlacedColumn {
                start_x,
                trimmed_width: columns[i].trimmed_width(),
                justified_width: size,
            });
        }

        let used: f32 = placed.iter().map(|p| p.justified_width).sum();
        let free = self.target_width() - used;
        let trimmed: Vec<f32> = placed.iter().map(|p| p.trimmed_width).collect();
        let justified = column::justify_widths(&trimmed, free);
        for (p, w) in placed.iter_mut().zip(justified.into_iter()) {
            p.justified_width = w;
        }

        placed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn justification_invariant_sums_to_target_width_when_free_is_non_negative() {
        let system = System::new(5000.0, 0.0, 0.0, 0.0);
        let columns = vec![
            Column::new(0.0, 1000.0, 200.0),
            Column::new(100.0, 1500.0, 300.0),
        ];
        let placed = system.layout_columns(&columns);
        let used: f32 = placed.iter().map(|p| p.trimmed_width).sum();
        let free = system.target_width() - used;
        if free >= 0.0 {
            let total: f32 = placed.iter().map(|p| p.justified_width).sum();
            assert!((total - system.target_width()).abs() < 0.01);
        }
    }

    #[test]
    fn single_column_system_places_at_indent() {
        let system = System::new(2300.0, 0.0, 0.0, 0.0);
        let columns = vec![Column::new(0.0, 1800.0, 500.0)];
        let placed = system.layout_columns(&columns);
        assert_eq!(placed.len(), 1);
        assert_eq!(placed[0].start_x, 0.0);
    }
}
