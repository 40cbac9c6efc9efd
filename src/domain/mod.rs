pub mod ai;
pub mod direction;
pub mod entity;
pub mod error;
pub mod field;
pub mod rules;
