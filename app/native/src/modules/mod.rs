//! Application feature modules for Bento.
//!
//! - [`grid`] - The bento grid layout engine

pub mod grid;
