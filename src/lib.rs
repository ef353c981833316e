//! Optimal solver for N×M sliding-tile puzzles (the 8-puzzle, 15-puzzle and
//! their rectangular relatives).
//!
//! [`solve`] runs A* with an admissible Manhattan + linear-conflict heuristic
//! after an inversion-parity check rejects unsolvable boards.

pub mod board;
pub mod heuristic;
pub mod pqueue;
pub mod puzzles;
pub mod scramble;
pub mod solvability;
pub mod solver;

#[cfg(test)]
mod test_util;

pub use board::{Board, BoardError, Move};
pub use heuristic::heuristic;
pub use solvability::is_solvable;
pub use solver::{SolveResult, Solver, solve};
