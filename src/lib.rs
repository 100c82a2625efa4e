//! Shortest-route engine for a tile grid.
//!
//! This crate is the computational core of a route visualizer: the caller
//! builds a [`Grid`], marks walls plus one start and one end tile, and hands
//! it to [`find::run`]. The run mutates the tiles in place and returns the
//! order in which tiles were examined together with the reconstructed route.
//! The caller replays those sequences however it likes — one visual update
//! per element, stopping early to cancel — without calling back into the
//! engine.
//!
//! Editing a grid while a run executes is ruled out by the `&mut` borrow;
//! the surrounding application keeps its own "run in progress" flag for its
//! UI state.

pub mod find;
pub mod frontier;
pub mod grid;
pub mod util;

pub use find::{reconstruct_path, run, InvalidGrid, SearchError, SearchResult};
pub use frontier::Frontier;
pub use grid::{Grid, Point, Tile};
