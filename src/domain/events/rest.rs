use crate::domain::ids::NoteId;
use crate::domain::value_objects::Tick;
use serde::{Deserialize, Serialize};

/// Rest represents a silent duration on a staff. Shares an ID space with
/// `Note` so relation objects (beams, tuplets) can reference either kind of
/// staff-object uniformly via `NoteId`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rest {
    pub id: NoteId,
    pub start_tick: Tick,
    pub duration_ticks: u32,
    /// True for a "go-forward" rest used purely as a spacer (invisible,
    /// zero-width placeholder in the Shapes Creator).
    #[serde(default)]
    pub is_spacer: bool,
}

impl Rest {
    pub fn new(start_tick: Tick, duration_ticks: u32) -> Result<Self, &'static str> {
        if duration_ticks == 0 {
            return Err("duration_ticks must be greater than 0");
        }

        Ok(Self {
            id: NoteId::new(),
            start_tick,
            duration_ticks,
            is_spacer: false,
        })
    }

    /// Build an invisible go-forward rest (builder pattern)
    pub fn spacer(start_tick: Tick, duration_ticks: u32) -> Result<Self, &'static str> {
        Ok(Self::new(start_tick, duration_ticks)?.as_spacer())
    }

    pub fn as_spacer(mut self) -> Self {
        self.is_spacer = true;
        self
    }

    pub fn end_tick(&self) -> Tick {
        self.start_tick.add(self.duration_ticks)
    }
}
