//! Rod puzzle engine: a square picture is cut into straight rectangular rods,
//! the rods are scrambled across the board and the player drags them home.
//!
//! The crate partitions the grid, shuffles pieces off their home cells, runs
//! the drag-and-lock state machine and scatters loose pieces on demand.
//! Rendering, pointer input and advisory hints sit around that core.

#![forbid(unsafe_code)]

/// Advisory hint requests that never touch puzzle state
pub mod hint;
/// Pointer events, viewport mapping and scripted solving
pub mod input;
/// Input/output operations, configuration and error handling
pub mod io;
/// Core puzzle model: partitioning, shuffling, sessions and scatter
pub mod puzzle;
/// Renderer-facing layout of a session
pub mod render;

pub use io::error::{PuzzleError, Result};
