//! # treasure_hunt
//!
//! A boat navigates a rectangular grid of sea (`.`) and island (`+`) cells looking for a
//! hidden treasure. Sonar pings reveal whether the treasure lies within range of the boat,
//! after which the shortest route to it is computed with
//! [A*](https://en.wikipedia.org/wiki/A*_search_algorithm) on an 8-connected grid and can be
//! plotted onto the map.
//!
//! Costs follow the octile metric: [ORTHOGONAL_COST] per straight step and [DIAGONAL_COST]
//! per diagonal step. The same metric serves as the (admissible and consistent) heuristic,
//! so every path returned is a shortest one, although it may not be the only shortest one.
//! Ties in the open queue are broken first-in first-out, which makes results reproducible.
//!
//! The game layer lives in [hunt::TreasureHunt], which consumes `GO <dir>`, `SONAR`, `PLOT`
//! and `QUIT` commands and reports the resulting [hunt::GameState].
pub mod astar;
pub mod direction;
pub mod error;
pub mod grid;
pub mod hunt;
pub mod node;
pub mod queue;

use grid_util::point::Point;
use itertools::Itertools;

pub use direction::Direction;
pub use error::{CommandError, EmptyQueueError, GridError, PathError};
pub use grid::{Grid, DEFAULT_MAP};
pub use hunt::{Command, Event, GameState, TreasureHunt, Turn};
pub use node::{Cost, Node};
pub use queue::PriorityQueue;

/// Cost of a straight (cardinal) step.
pub const ORTHOGONAL_COST: u32 = 10;
/// Cost of a diagonal step, roughly `ORTHOGONAL_COST * sqrt(2)`.
pub const DIAGONAL_COST: u32 = 14;

pub(crate) const N_SMALLVEC_SIZE: usize = 8;

/// Octile distance between two cells: take as many diagonal steps as possible, then go
/// straight. For neighbouring cells this is exactly the edge cost.
pub fn octile_distance(p1: &Point, p2: &Point) -> u32 {
    let dx = p1.x.abs_diff(p2.x);
    let dy = p1.y.abs_diff(p2.y);
    if dx > dy {
        DIAGONAL_COST * dy + ORTHOGONAL_COST * (dx - dy)
    } else {
        DIAGONAL_COST * dx + ORTHOGONAL_COST * (dy - dx)
    }
}

/// Sums the step costs along a path as returned by [Grid::retrace_path].
pub fn path_cost(path: &[Point]) -> u32 {
    path.iter()
        .tuple_windows()
        .map(|(a, b)| octile_distance(a, b))
        .sum()
}
