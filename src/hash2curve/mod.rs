//! Hash-to-curve: `expand_message` primitives and `map_to_curve` (spec
//! §4.2, component 2).

pub mod expand;
pub mod map;

pub use map::hash_to_curve;
