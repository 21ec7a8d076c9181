//! Layout engine error taxonomy.
//!
//! Per the engine's recovery policy, this is intentionally small: model
//! inconsistencies and engraver contract failures degrade gracefully in
//! place (logged via `log::warn!`, offending member ignored or shape
//! omitted) rather than surfacing here. Only unrecoverable resource
//! exhaustion propagates as an error.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LayoutError {
    /// A page cannot contain even a single system: layout cannot proceed.
    #[error("page too small to contain a single system (available height {available:.1}, required {required:.1})")]
    PageTooSmall { available: f32, required: f32 },
}
