pub mod errors;
pub mod events;
pub mod ids;
pub mod instrument;
pub mod relations;
pub mod staff;
pub mod staff_objs;
pub mod value_objects;
pub mod voice;

// Score module
pub mod score;

// Importers module
pub mod importers;
