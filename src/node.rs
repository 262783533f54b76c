use core::fmt;
use std::cmp::Ordering;

use grid_util::point::Point;

use crate::octile_distance;

/// Path cost bookkeeping for a [Node]. [Cost::Unvisited] orders after every finite cost,
/// so it behaves as infinity in comparisons without being confused with a large real cost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Cost {
    Finite(u32),
    #[default]
    Unvisited,
}

impl Cost {
    pub fn finite(self) -> Option<u32> {
        match self {
            Cost::Finite(c) => Some(c),
            Cost::Unvisited => None,
        }
    }

    pub fn is_unvisited(self) -> bool {
        self == Cost::Unvisited
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Cost::Finite(c) => write!(f, "{}", c),
            Cost::Unvisited => write!(f, "inf"),
        }
    }
}

/// A single grid cell. Navigability and coordinates are fixed at construction; the parent
/// link, costs and `in_path` flag are search bookkeeping owned by the [Grid](crate::Grid).
///
/// The parent is stored as the coordinate of the predecessor cell rather than a reference,
/// so chains always resolve through the grid's node arena.
///
/// Two nodes are equal when their coordinates are equal, regardless of costs or parent.
/// Ordering by cost is a separate concern, see [Node::by_f_cost].
#[derive(Clone, Copy, Debug)]
pub struct Node {
    navigable: bool,
    pos: Point,
    parent: Option<Point>,
    in_path: bool,
    g_cost: Cost,
    h_cost: Cost,
}

impl Node {
    pub fn new(navigable: bool, x: i32, y: i32) -> Node {
        Node {
            navigable,
            pos: Point::new(x, y),
            parent: None,
            in_path: false,
            g_cost: Cost::Unvisited,
            h_cost: Cost::Unvisited,
        }
    }

    pub fn navigable(&self) -> bool {
        self.navigable
    }
    pub fn pos(&self) -> Point {
        self.pos
    }
    pub fn x(&self) -> i32 {
        self.pos.x
    }
    pub fn y(&self) -> i32 {
        self.pos.y
    }
    pub fn parent(&self) -> Option<Point> {
        self.parent
    }
    pub fn set_parent(&mut self, parent: Option<Point>) {
        self.parent = parent;
    }
    pub fn in_path(&self) -> bool {
        self.in_path
    }
    pub fn set_in_path(&mut self, in_path: bool) {
        self.in_path = in_path;
    }
    pub fn g_cost(&self) -> Cost {
        self.g_cost
    }
    pub fn set_g_cost(&mut self, g_cost: u32) {
        self.g_cost = Cost::Finite(g_cost);
    }
    pub fn h_cost(&self) -> Cost {
        self.h_cost
    }
    pub fn set_h_cost(&mut self, h_cost: u32) {
        self.h_cost = Cost::Finite(h_cost);
    }

    /// `g_cost + h_cost`, unvisited if either half is.
    pub fn f_cost(&self) -> Cost {
        match (self.g_cost, self.h_cost) {
            (Cost::Finite(g), Cost::Finite(h)) => Cost::Finite(g.saturating_add(h)),
            _ => Cost::Unvisited,
        }
    }

    /// Octile distance to `other`. Used both as the edge cost between neighbours and as the
    /// A* heuristic.
    pub fn distance(&self, other: &Node) -> u32 {
        octile_distance(&self.pos, &other.pos)
    }

    /// Forgets everything a previous search wrote into this node.
    pub fn reset_search(&mut self) {
        self.parent = None;
        self.g_cost = Cost::Unvisited;
        self.h_cost = Cost::Unvisited;
    }

    /// Comparator for the open queue: lowest `f_cost` first.
    pub fn by_f_cost(a: &Node, b: &Node) -> Ordering {
        a.f_cost().cmp(&b.f_cost())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.pos == other.pos
    }
}

impl Eq for Node {}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} g={} h={}",
            self.pos.x,
            self.pos.y,
            if self.navigable { "sea" } else { "island" },
            self.g_cost,
            self.h_cost
        )
    }
}
