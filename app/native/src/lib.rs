//! Bento - A grid tile-layout engine.
//!
//! This library provides the layout engine and the CLI that drives it. The
//! engine arranges a fixed set of named tiles on a bounded integer board and
//! keeps the board valid through interactive moves, resizes, shuffles and
//! viewport changes.

pub mod cli;
pub mod config;
pub mod error;
pub mod modules;
pub mod schema;

pub use modules::grid;
