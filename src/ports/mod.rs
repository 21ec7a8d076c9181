//! External collaborator interfaces (spec §6): persistence, import, and
//! the two rendering-side seams the layout engine treats as opaque —
//! glyph metrics (`TextMeter`) and the drawing sink (`Drawer`).

pub mod drawer;
pub mod importers;
pub mod persistence;
pub mod text_meter;
