use crate::domain::value_objects::Tick;
use serde::{Deserialize, Serialize};

/// Barline kinds relevant to layout: `Final` and `EndRepeat` are rigid,
/// non-compressible end-hook content per the column invariants; the rest
/// lay out identically but are kept distinct for rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarlineType {
    Simple,
    Double,
    Final,
    StartRepeat,
    EndRepeat,
}

/// Barline event marks a measure boundary on a staff at a specific tick.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarlineEvent {
    pub tick: Tick,
    pub barline_type: BarlineType,
}

impl BarlineEvent {
    pub fn new(tick: Tick, barline_type: BarlineType) -> Self {
        Self { tick, barline_type }
    }

    pub fn is_visible(&self) -> bool {
        true
    }
}
