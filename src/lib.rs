/// Drunk Chase core: field, entities, movement rules and the chase AI.
///
/// The terminal driver (`main.rs` + `ui/`) only reads from this crate and
/// calls `sim::step::tick`; it never decides a move itself.

pub mod config;
pub mod domain;
pub mod sim;
