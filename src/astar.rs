//! A* search over the grid's node arena, plus walking and drawing the resulting parent chain.
//!
//! The open set is a [PriorityQueue] of node snapshots ordered by `f_cost` (first-in first-out
//! among ties), so the same cell may be queued several times with different costs. The arena
//! always holds the best known costs and parent of every cell; queued snapshots that no longer
//! match it are skipped when popped.
use fxhash::FxBuildHasher;
use grid_util::grid::Grid as ValueGrid;
use grid_util::point::Point;
use indexmap::IndexMap;
use log::{debug, info, warn};

use crate::error::PathError;
use crate::grid::Grid;
use crate::node::{Cost, Node};
use crate::queue::PriorityQueue;

type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

impl Grid {
    fn reset_search(&mut self) {
        for node in self.nodes.values.iter_mut() {
            node.reset_search();
        }
    }

    fn endpoint(&self, point: Point) -> Result<Node, PathError> {
        match self.node(point) {
            Some(node) if node.navigable() => Ok(node),
            _ => Err(PathError::InvalidEndpoint(point)),
        }
    }

    /// Computes a shortest path from `start` to `target` and records it as parent links in
    /// the node arena, to be read back with [retrace_path](Self::retrace_path). Returns the
    /// cost of the path, which is also the target's final `g_cost`.
    ///
    /// Parent links and costs from any earlier search are cleared first. If no path exists
    /// the target is left without a parent and [PathError::NoPathFound] is returned.
    ///
    /// Expansions are limited to one per cell. Closed cells are never expanded again, so a
    /// well-formed grid always finishes first.
    pub fn find_path(&mut self, start: Point, target: Point) -> Result<u32, PathError> {
        let max_expansions = self.width() * self.height();
        self.find_path_within(start, target, max_expansions)
    }

    /// Like [find_path](Self::find_path), but gives up with [PathError::ExpansionLimit] once
    /// `max_expansions` cells have been expanded without reaching `target`.
    pub fn find_path_within(
        &mut self,
        start: Point,
        target: Point,
        max_expansions: usize,
    ) -> Result<u32, PathError> {
        let start_node = self.endpoint(start)?;
        let target_node = self.endpoint(target)?;
        self.reset_search();

        if start == target {
            self.update_node(start, |node| {
                node.set_g_cost(0);
                node.set_h_cost(0);
            });
            return Ok(0);
        }
        if !self.reachable(&start, &target) {
            info!("{} is not reachable from {}", target, start);
            return Err(PathError::NoPathFound { start, target });
        }
        debug!("{} is reachable from {}, computing path", target, start);

        let mut first = start_node;
        first.set_g_cost(0);
        first.set_h_cost(first.distance(&target_node));
        self.nodes.set_point(start, first);

        let mut open = PriorityQueue::new(Node::by_f_cost);
        open.add(first);
        let mut closed: FxIndexMap<Point, Cost> = FxIndexMap::default();

        while !open.is_empty() {
            let q = open.remove_min()?;
            // The same cell may have been queued again with a lower cost since this snapshot
            // was added; only the best one gets expanded.
            let stale = q.g_cost() > self.nodes.get_point(q.pos()).g_cost();
            if stale || closed.contains_key(&q.pos()) {
                continue;
            }
            if closed.len() >= max_expansions {
                warn!(
                    "Search from {} to {} exceeded {} expansions",
                    start, target, max_expansions
                );
                return Err(PathError::ExpansionLimit {
                    start,
                    target,
                    limit: max_expansions,
                });
            }
            let q_cost = q.g_cost().finite().unwrap_or_default();

            for pos in self.neighborhood_points(&q.pos()) {
                let mut successor = Node::new(true, pos.x, pos.y);
                let g_cost = q_cost + q.distance(&successor);
                successor.set_g_cost(g_cost);
                successor.set_h_cost(successor.distance(&target_node));
                successor.set_parent(Some(q.pos()));
                if pos == target {
                    self.nodes.set_point(pos, successor);
                    debug!(
                        "Found path from {} to {} with cost {} after {} expansions",
                        start,
                        target,
                        g_cost,
                        closed.len() + 1
                    );
                    return Ok(g_cost);
                }

                let known = open.contains(&successor) || closed.contains_key(&pos);
                if known && self.nodes.get_point(pos).f_cost() <= successor.f_cost() {
                    continue;
                }
                self.nodes.set_point(pos, successor);
                open.add(successor);
            }
            closed.insert(q.pos(), q.f_cost());
        }
        Err(PathError::NoPathFound { start, target })
    }

    /// Follows parent links back from `target` and returns the cells from `start` to
    /// `target`, marking exactly those cells as `in_path`. Returns an empty path if the chain
    /// does not lead back to `start`.
    pub fn retrace_path(&mut self, start: Point, target: Point) -> Vec<Point> {
        for node in self.nodes.values.iter_mut() {
            node.set_in_path(false);
        }
        let mut path = vec![target];
        let mut current = target;
        // A chain can visit each cell at most once.
        let max_len = self.width() * self.height();
        while current != start {
            match self.node(current).and_then(|n| n.parent()) {
                Some(parent) if path.len() < max_len => {
                    path.push(parent);
                    current = parent;
                }
                _ => return Vec::new(),
            }
        }
        if self.node(start).is_none() {
            return Vec::new();
        }
        path.reverse();
        for p in path.iter() {
            self.update_node(*p, |node| node.set_in_path(true));
        }
        path
    }

    /// Draws the map with the path found by the last [find_path](Self::find_path) from
    /// `start` to `target` marked with `*`. Boat and treasure keep their own glyphs. Without
    /// a path no markers are drawn.
    pub fn plot_path(&mut self, start: Point, target: Point) -> String {
        self.retrace_path(start, target);
        self.path_rows().join("\n")
    }
}
