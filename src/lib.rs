//! Conway-style cellular automaton engine for ambient visual animations.

pub mod config;
pub mod field;

pub use config::{
    AnimationSpeed, FieldConfig, GridMode, RespawnMode, Rgba, SquareSize, StartingPattern, Timings,
};
pub use field::{CellEvent, LifeEngine};
