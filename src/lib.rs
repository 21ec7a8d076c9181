//! MusiCore engraving and layout engine.
//!
//! `domain` is the read-only music object model (instruments, staves,
//! voices, staff-objects, relations). `layout` is the engraving pipeline
//! that turns a `domain::score::Score` into a geometric `GlobalLayout`
//! (see `layout::score_layouter` for the spec-complete pipeline and
//! `layout::compute_layout` for the simplified JSON-driven entry point
//! used by the WASM bindings). `ports` declares the external collaborator
//! traits (persistence, import, text measurement, drawing). `adapters`
//! implements those ports for the native backend and for WASM.

pub mod adapters;
pub mod domain;
pub mod layout;
pub mod ports;
