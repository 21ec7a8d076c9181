//! Score Meter
//!
//! Converts score-relative tenths (1 tenth = 1/10 of a staff's interline
//! space) into logical output units, per staff. A tenth is always defined
//! relative to the *referenced* staff's own size, so two staves of
//! different physical size (e.g. a cue-size staff) convert the same tenth
//! value to different logical extents.

use std::collections::HashMap;

/// Tenths per staff space, by definition.
pub const TENTHS_PER_STAFF_SPACE: f32 = 10.0;

/// Pure, read-only conversion from tenths to logical units, scoped per
/// `(instrument, staff)`. Built once from the score's declared staff sizes
/// and never mutated afterwards, matching the "no mutable state after
/// construction" rule of the engraving spec.
#[derive(Debug, Clone)]
pub struct ScoreMeter {
    /// Logical units per staff space, for the default-size staff.
    default_units_per_space: f32,
    /// Per-`(instrument_index, staff_index)` override, for staves whose
    /// size differs from the default (e.g. cue staves at 0.75 scale).
    overrides: HashMap<(usize, usize), f32>,
}

impl ScoreMeter {
    pub fn new(default_units_per_space: f32) -> Self {
        Self {
            default_units_per_space,
            overrides: HashMap::new(),
        }
    }

    /// Register a non-default staff size scale (e.g. `0.75` for a cue
    /// staff) for a specific instrument/staff pair.
    pub fn with_staff_scale(mut self, instrument: usize, staff: usize, scale: f32) -> Self {
        self.overrides
            .insert((instrument, staff), self.default_units_per_space * scale);
        self
    }

    fn units_per_space(&self, instrument: usize, staff: usize) -> f32 {
        self.overrides
            .get(&(instrument, staff))
            .copied()
            .unwrap_or(self.default_units_per_space)
    }

    /// Convert a tenths value to logical units for the given staff.
    pub fn tenths_to_logical(&self, tenths: f32, instrument: usize, staff: usize) -> f32 {
        tenths * (self.units_per_space(instrument, staff) / TENTHS_PER_STAFF_SPACE)
    }

    /// The default staff size, in logical units per staff space.
    pub fn default_units_per_space(&self) -> f32 {
        self.default_units_per_space
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_staff_converts_ten_tenths_to_one_space() {
        let meter = ScoreMeter::new(20.0);
        assert_eq!(meter.tenths_to_logical(10.0, 0, 0), 20.0);
    }

    #[test]
    fn overridden_staff_scales_independently() {
        let meter = ScoreMeter::new(20.0).with_staff_scale(0, 1, 0.75);
        assert_eq!(meter.tenths_to_logical(10.0, 0, 0), 20.0);
        assert_eq!(meter.tenths_to_logical(10.0, 0, 1), 15.0);
    }
}
