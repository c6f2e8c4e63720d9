#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

//! A layer-by-layer solver for the 3x3x3 cube.
//!
//! The solver works the way a person learning the beginner's method does:
//! white edges, white corners, the middle layer, then four passes over the
//! yellow layer. Every step is a short conjugate or commutator written
//! relative to a chosen orientation of the cube, so the output is long but
//! easy to follow by hand.

pub mod commutator;
pub mod geometry;
pub mod notation;
pub mod placement;
pub mod scramble;
pub mod solver;
mod stages;
pub mod state;

pub use geometry::Face;
pub use solver::{LayerSolver, Solution, SolveError, Stage};
pub use state::CubeState;

#[macro_export]
macro_rules! start {
    ($msg:expr) => {
        concat!("⏳ ", $msg)
    };
}

#[macro_export]
macro_rules! working {
    ($msg:expr) => {
        concat!("🛠  ", $msg)
    };
}

#[macro_export]
macro_rules! success {
    ($msg:expr) => {
        concat!("✅ ", $msg)
    };
}
