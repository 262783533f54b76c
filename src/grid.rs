use core::fmt;
use std::fs;
use std::path::Path;
use std::str::FromStr;

use grid_util::grid::{Grid as ValueGrid, SimpleGrid};
use grid_util::point::Point;
use itertools::{iproduct, Itertools};
use log::debug;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

use crate::direction::Direction;
use crate::error::GridError;
use crate::node::Node;
use crate::N_SMALLVEC_SIZE;

pub const SEA: char = '.';
pub const ISLAND: char = '+';
pub const BOAT: char = 'B';
pub const TREASURE: char = 'T';
pub const PATH: char = '*';

/// Map used when no grid file is given.
pub const DEFAULT_MAP: [&str; 5] = ["..+..++", "++.B..+", ".....++", "++.....", ".T....+"];

/// The playing field. Owns every [Node] in a [SimpleGrid], so boat, treasure and parent
/// links are plain coordinates into it.
///
/// Navigability never changes after construction, which lets the 8-connected components of
/// the sea be computed once with a [UnionFind] and used to reject unreachable targets before
/// searching.
#[derive(Clone, Debug)]
pub struct Grid {
    pub(crate) nodes: SimpleGrid<Node>,
    boat: Point,
    treasure: Point,
    components: UnionFind<usize>,
}

impl Grid {
    /// Builds a grid from rows of `.`, `+`, `B` and `T`. Row `y` holds the cells with
    /// y-coordinate `y`, the character at index `x` the cell with x-coordinate `x`.
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Grid, GridError> {
        let rows: Vec<Vec<char>> = rows.iter().map(|r| r.as_ref().chars().collect()).collect();
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.len());
        if width == 0 {
            return Err(GridError::Empty);
        }
        if let Some((row, r)) = rows.iter().find_position(|r| r.len() != width) {
            return Err(GridError::Ragged {
                row,
                expected: width,
                found: r.len(),
            });
        }

        let mut nodes = SimpleGrid::new(width, height, Node::new(false, 0, 0));
        let mut boat = None;
        let mut treasure = None;
        for x in 0..width {
            for y in 0..height {
                let glyph = rows[y][x];
                let pos = Point::new(x as i32, y as i32);
                let navigable = match glyph {
                    SEA => true,
                    ISLAND => false,
                    BOAT => {
                        if boat.replace(pos).is_some() {
                            return Err(GridError::MultipleBoats);
                        }
                        true
                    }
                    TREASURE => {
                        if treasure.replace(pos).is_some() {
                            return Err(GridError::MultipleTreasures);
                        }
                        true
                    }
                    _ => return Err(GridError::UnknownGlyph { glyph, x, y }),
                };
                nodes.set(x, y, Node::new(navigable, pos.x, pos.y));
            }
        }

        let mut grid = Grid {
            nodes,
            boat: boat.ok_or(GridError::MissingBoat)?,
            treasure: treasure.ok_or(GridError::MissingTreasure)?,
            components: UnionFind::new(width * height),
        };
        grid.generate_components();
        debug!(
            "Loaded {}x{} grid, boat at {}, treasure at {}",
            width, height, grid.boat, grid.treasure
        );
        Ok(grid)
    }

    /// Reads a grid file, one row per line.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Grid, GridError> {
        fs::read_to_string(path)?.parse()
    }

    pub fn width(&self) -> usize {
        self.nodes.width()
    }
    pub fn height(&self) -> usize {
        self.nodes.height()
    }
    pub fn boat(&self) -> Node {
        self.nodes.get_point(self.boat)
    }
    pub fn treasure(&self) -> Node {
        self.nodes.get_point(self.treasure)
    }
    pub fn boat_pos(&self) -> Point {
        self.boat
    }
    pub fn treasure_pos(&self) -> Point {
        self.treasure
    }

    /// Copy of the node at `point`, or `None` off the map.
    pub fn node(&self, point: Point) -> Option<Node> {
        self.nodes
            .point_in_bounds(point)
            .then(|| self.nodes.get_point(point))
    }

    /// Applies `f` to the node at `point`, which must lie on the map.
    pub(crate) fn update_node<F: FnOnce(&mut Node)>(&mut self, point: Point, f: F) {
        let mut node = self.nodes.get_point(point);
        f(&mut node);
        self.nodes.set_point(point, node);
    }

    /// Whether `(x, y)` lies on the grid and is open sea.
    pub fn check_valid_move(&self, x: i32, y: i32) -> bool {
        self.node(Point::new(x, y)).is_some_and(|n| n.navigable())
    }

    /// Navigable cells of the 3x3 block around `point`, excluding `point` itself.
    pub fn neighborhood_points(&self, point: &Point) -> SmallVec<[Point; N_SMALLVEC_SIZE]> {
        iproduct!(-1..=1, -1..=1)
            .filter(|&(dx, dy)| (dx, dy) != (0, 0))
            .map(|(dx, dy)| Point::new(point.x + dx, point.y + dy))
            .filter(|p| self.check_valid_move(p.x, p.y))
            .collect()
    }

    /// Sails the boat one cell in `direction`. Moving onto an island or off the map leaves
    /// the boat where it is. Returns whether the boat moved.
    pub fn move_boat(&mut self, direction: Direction) -> bool {
        let target = direction.step(self.boat);
        if self.check_valid_move(target.x, target.y) {
            self.boat = target;
            true
        } else {
            debug!("Boat at {} cannot sail {}", self.boat, direction);
            false
        }
    }

    /// Returns the treasure node if it lies within `s_range` (octile distance) of the boat.
    pub fn get_treasure(&self, s_range: u32) -> Option<Node> {
        let treasure = self.treasure();
        if self.boat().distance(&treasure) <= s_range {
            Some(treasure)
        } else {
            None
        }
    }

    /// Checks if start and goal are on the same connected component of the sea.
    pub fn reachable(&self, start: &Point, goal: &Point) -> bool {
        self.check_valid_move(start.x, start.y)
            && self.check_valid_move(goal.x, goal.y)
            && self
                .components
                .equiv(self.nodes.get_ix_point(start), self.nodes.get_ix_point(goal))
    }

    /// Links every navigable cell to its navigable neighbours. Looking only east and south
    /// covers each of the eight adjacency directions exactly once.
    fn generate_components(&mut self) {
        self.components = UnionFind::new(self.width() * self.height());
        for (x, y) in iproduct!(0..self.width() as i32, 0..self.height() as i32) {
            if !self.check_valid_move(x, y) {
                continue;
            }
            let ix = self.nodes.get_ix_point(&Point::new(x, y));
            for (dx, dy) in [(1, -1), (1, 0), (1, 1), (0, 1)] {
                let neighbour = Point::new(x + dx, y + dy);
                if self.check_valid_move(neighbour.x, neighbour.y) {
                    let n_ix = self.nodes.get_ix_point(&neighbour);
                    self.components.union(ix, n_ix);
                }
            }
        }
    }

    fn glyph(&self, point: Point, show_path: bool) -> char {
        if point == self.boat {
            BOAT
        } else if point == self.treasure {
            TREASURE
        } else {
            let node = self.nodes.get_point(point);
            if !node.navigable() {
                ISLAND
            } else if show_path && node.in_path() {
                PATH
            } else {
                SEA
            }
        }
    }

    fn rows(&self, show_path: bool) -> Vec<String> {
        (0..self.height() as i32)
            .map(|y| {
                (0..self.width() as i32)
                    .map(|x| self.glyph(Point::new(x, y), show_path))
                    .collect()
            })
            .collect()
    }

    /// The map as text rows, in the same alphabet it was loaded from.
    pub fn text_rows(&self) -> Vec<String> {
        self.rows(false)
    }

    /// Like [text_rows](Self::text_rows), with cells of the last retraced path drawn as `*`.
    pub fn path_rows(&self) -> Vec<String> {
        self.rows(true)
    }
}

impl FromStr for Grid {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rows: Vec<&str> = s.lines().map(|l| l.trim_end_matches('\r')).collect();
        while rows.last().is_some_and(|r| r.is_empty()) {
            rows.pop();
        }
        Grid::from_rows(&rows)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.text_rows().join("\n"))
    }
}
