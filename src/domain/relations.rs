use crate::domain::ids::NoteId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Unique identifier for a relation object (beam, tie, slur, tuplet).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RelationId(uuid::Uuid);

impl RelationId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for RelationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for RelationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A beam relation: an ordered group of note/rest members sharing one or
/// more beaming levels. Per-level beam types live on the member notes
/// themselves (`Note::beams`); this object exists so the Shapes Creator's
/// three-phase protocol has something addressable to key its
/// engraver-in-progress storage by.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Beam {
    pub id: RelationId,
    pub members: Vec<NoteId>,
}

impl Beam {
    pub fn new(members: Vec<NoteId>) -> Self {
        Self {
            id: RelationId::new(),
            members,
        }
    }
}

/// A tie relation: links two notes of the same pitch across a duration
/// boundary. `Note::tied_prev`/`tied_next` carry the per-note flag used
/// during layout; this object is the addressable relation instance.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tie {
    pub id: RelationId,
    pub from: NoteId,
    pub to: NoteId,
}

impl Tie {
    pub fn new(from: NoteId, to: NoteId) -> Self {
        Self {
            id: RelationId::new(),
            from,
            to,
        }
    }
}

/// A slur relation: a phrasing curve spanning two or more notes, not
/// necessarily contiguous or same-pitch.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slur {
    pub id: RelationId,
    pub members: Vec<NoteId>,
}

impl Slur {
    pub fn new(members: Vec<NoteId>) -> Self {
        Self {
            id: RelationId::new(),
            members,
        }
    }
}

/// A tuplet relation: `actual_notes` played in the time of `normal_notes`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tuplet {
    pub id: RelationId,
    pub members: Vec<NoteId>,
    pub actual_notes: u8,
    pub normal_notes: u8,
}

impl Tuplet {
    pub fn new(members: Vec<NoteId>, actual_notes: u8, normal_notes: u8) -> Self {
        Self {
            id: RelationId::new(),
            members,
            actual_notes,
            normal_notes,
        }
    }
}
