pub mod barline;
pub mod clef;
pub mod global;
pub mod key_signature;
pub mod note;
pub mod rest;
pub mod staff;
pub mod tempo;
pub mod time_signature;
