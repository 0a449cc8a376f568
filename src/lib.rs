//! Animated rings of regular polygons.
//!
//! `engine` computes per-tick ring geometry from declarative scene
//! descriptions, `renderer` rasterizes it onto a terminal cell grid, and
//! `player` drives either a compiled presentation or a live sketch.

pub mod engine;
pub mod player;
pub mod random;
pub mod renderer;
pub mod types;
