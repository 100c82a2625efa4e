//! Shortest-route search over a [`Grid`].
//!
//! The search is Dijkstra's algorithm specialised to unit edge weights,
//! which on a tile grid behaves like a breadth-first expansion with a
//! deterministic frontier order. It runs to completion synchronously and
//! returns the visitation order alongside the reconstructed route; callers
//! that animate the search replay those sequences at their own pace and may
//! simply stop consuming them to cancel.

use log::debug;
use thiserror::Error;

use crate::frontier::Frontier;
use crate::grid::{Grid, Point};

/// The grid cannot be searched as handed over. Raised by validation before
/// any tile is mutated.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum InvalidGrid {
    #[error("no tile in the grid is marked as start")]
    MissingStart,
    #[error("no tile in the grid is marked as end")]
    MissingEnd,
    #[error("tile {0:?} lies outside the grid")]
    OutOfBounds(Point),
    #[error("tile {0:?} is not marked as the start")]
    NotStart(Point),
    #[error("tile {0:?} is not marked as the end")]
    NotEnd(Point),
    #[error("start tile {0:?} is a wall")]
    StartIsWall(Point),
    #[error("end tile {0:?} is a wall")]
    EndIsWall(Point),
}

/// Failure modes of [`run`].
#[derive(Copy, Clone, Debug, Eq, PartialEq, Error)]
pub enum SearchError {
    #[error(transparent)]
    InvalidGrid(#[from] InvalidGrid),
    /// A wall tile was popped from the frontier even though neighbor
    /// resolution filters walls out. The run aborts instead of returning a
    /// route that may be wrong.
    #[error("wall tile {0:?} reached the frontier")]
    WallInFrontier(Point),
}

/// The two output sequences of a completed run.
///
/// `traversed` holds every tile finalized by the search, in visitation
/// order; `path` holds the reconstructed route from start to end inclusive,
/// and is empty when the end is unreachable. Both are tile identities into
/// the caller's grid — the tiles themselves carry the matching
/// `is_traversed` / `is_path` flags.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SearchResult {
    pub traversed: Vec<Point>,
    pub path: Vec<Point>,
}

fn validate(grid: &Grid, start: Point, end: Point) -> Result<(), InvalidGrid> {
    grid.start().ok_or(InvalidGrid::MissingStart)?;
    grid.end().ok_or(InvalidGrid::MissingEnd)?;

    if !grid.is_valid(start) {
        return Err(InvalidGrid::OutOfBounds(start));
    }
    if !grid.is_valid(end) {
        return Err(InvalidGrid::OutOfBounds(end));
    }

    let s = grid.tile(start);
    if !s.is_start {
        return Err(InvalidGrid::NotStart(start));
    }
    if s.is_wall {
        return Err(InvalidGrid::StartIsWall(start));
    }

    let e = grid.tile(end);
    if !e.is_end {
        return Err(InvalidGrid::NotEnd(end));
    }
    if e.is_wall {
        return Err(InvalidGrid::EndIsWall(end));
    }

    Ok(())
}

/// Compute a shortest route from `start` to `end`, mutating tile state in
/// place (distances, traversal and route flags, parent links).
///
/// `start` and `end` must be the tiles already flagged as such in the grid;
/// anything else fails with [`InvalidGrid`] before the grid is touched. An
/// unreachable end is not an error — the returned `path` is empty and the
/// caller decides how to present "no route found". Run a grid a second time
/// only after [`Grid::reset_search`].
pub fn run(grid: &mut Grid, start: Point, end: Point) -> Result<SearchResult, SearchError> {
    validate(grid, start, end)?;

    let mut traversed = Vec::new();
    let mut frontier = Frontier::new();

    grid.tile_mut(start).distance = Some(0);
    frontier.push(start, 0);

    while let Some((current, distance)) = frontier.pop_min() {
        if grid.tile(current).is_wall {
            return Err(SearchError::WallInFrontier(current));
        }

        grid.tile_mut(current).is_traversed = true;
        traversed.push(current);

        if current == end {
            // uniform weights: the first finalization of the end is optimal
            break;
        }

        let neighbors: Vec<Point> = grid.neighbors_of(current).collect();
        for neighbor in neighbors {
            let candidate = distance + 1;
            let tile = grid.tile_mut(neighbor);

            // only a strict improvement relaxes, so equal-distance offers
            // never displace an earlier parent
            if tile.distance.map_or(false, |d| d <= candidate) {
                continue;
            }

            tile.distance = Some(candidate);
            tile.parent = Some(current);

            // drop the stale entry from an earlier relaxation, if any
            frontier.remove(neighbor);
            frontier.push(neighbor, candidate);
        }
    }

    let path = reconstruct_path(grid, end);
    debug!(
        "search done: {} tiles traversed, route length {}",
        traversed.len(),
        path.len()
    );

    Ok(SearchResult { traversed, path })
}

/// Walk the parent links back from `end`, marking each route tile, and
/// return the route ordered start→end.
///
/// An end tile the search never reached yields an empty route; the parent
/// chain is not followed in that case.
pub fn reconstruct_path(grid: &mut Grid, end: Point) -> Vec<Point> {
    if !grid.is_valid(end) || !grid.tile(end).is_traversed {
        return Vec::new();
    }

    let mut path = Vec::new();
    let mut current = Some(end);
    while let Some(point) = current {
        let tile = grid.tile_mut(point);
        tile.is_path = true;
        path.push(point);
        current = tile.parent;
    }

    path.reverse();
    path
}
