//! Weighted A* over a cost [`Grid`].

use std::collections::BinaryHeap;
use std::fmt;

use gridpath_core::{Adjacency, Grid, Point};

use crate::distance::octile;

/// Sentinel parent index for the start of a path.
const NO_PARENT: usize = usize::MAX;

// ---------------------------------------------------------------------------
// Scratch state
// ---------------------------------------------------------------------------

/// Per-cell search state, addressed by flat grid index.
///
/// A node belongs to the current search only when its `generation` matches
/// the finder's; bumping the generation invalidates every node at once.
#[derive(Clone)]
struct Node {
    g: i32,
    h: i32,
    parent: usize,
    /// Order of first entry into the open set within one search.
    seq: u32,
    generation: u32,
    open: bool,
}

impl Default for Node {
    fn default() -> Self {
        Self {
            g: 0,
            h: 0,
            parent: NO_PARENT,
            seq: 0,
            generation: 0,
            open: false,
        }
    }
}

/// Reference into the node array, ordered for the open-set heap.
#[derive(Clone, Copy, Eq, PartialEq)]
struct OpenRef {
    f: i32,
    h: i32,
    seq: u32,
    idx: usize,
}

impl Ord for OpenRef {
    fn cmp(&self, other: &Self) -> std::cmp::Ordering {
        // Reverse so BinaryHeap (max-heap) pops smallest f first, ties
        // broken by smallest h, remaining ties by earliest discovery.
        other
            .f
            .cmp(&self.f)
            .then_with(|| other.h.cmp(&self.h))
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for OpenRef {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        Some(self.cmp(other))
    }
}

// ---------------------------------------------------------------------------
// PathFinder
// ---------------------------------------------------------------------------

/// Weighted A* search with reusable scratch state.
///
/// The finder owns the per-cell node arena, so repeated searches incur no
/// allocations once the arena fits the grid. Searches borrow the grid
/// read-only and the finder mutably: a single finder runs one search at a
/// time, while any number of finders may share one grid.
pub struct PathFinder {
    nodes: Vec<Node>,
    generation: u32,
}

impl PathFinder {
    /// Create a finder with empty scratch state.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generation: 0,
        }
    }

    /// Find the cheapest path from `start` to `target`.
    ///
    /// Returns the coordinates from the step after `start` through `target`
    /// inclusive. The path is empty when `start == target` or when no route
    /// exists; both are normal outcomes. Out-of-bounds endpoints are
    /// reported as [`PathError::OutOfBounds`].
    ///
    /// The cost of entering a neighbor is `octile(current, neighbor)`
    /// multiplied by `⌊10 · neighbor cost⌋`, or by 1 when `ignore_costs` is
    /// set (every walkable cell then counts the same, yielding the
    /// geometrically shortest route). Expansion order is deterministic:
    /// minimum f, ties by minimum h, remaining ties by discovery order.
    /// Equal inputs therefore always reproduce the same path, even when
    /// several routes share the minimum cost.
    ///
    /// Walkability of the endpoints themselves is not checked: a
    /// non-walkable target is simply never reached, and a search may step
    /// out of a non-walkable start.
    pub fn find_path(
        &mut self,
        grid: &Grid,
        start: Point,
        target: Point,
        adjacency: Adjacency,
        ignore_costs: bool,
    ) -> Result<Vec<Point>, PathError> {
        let start_idx = grid.index_of(start).ok_or(PathError::OutOfBounds(start))?;
        let goal_idx = grid.index_of(target).ok_or(PathError::OutOfBounds(target))?;

        if start_idx == goal_idx {
            return Ok(Vec::new());
        }

        if self.nodes.len() < grid.len() {
            self.nodes.clear();
            self.nodes.resize(grid.len(), Node::default());
            self.generation = 0;
        }
        // Bump generation to lazily invalidate all nodes.
        self.generation = self.generation.wrapping_add(1);
        let cur_gen = self.generation;
        let mut seq: u32 = 0;

        {
            let node = &mut self.nodes[start_idx];
            node.g = 0;
            node.h = 0;
            node.parent = NO_PARENT;
            node.seq = seq;
            node.generation = cur_gen;
            node.open = true;
        }

        let mut open: BinaryHeap<OpenRef> = BinaryHeap::new();
        open.push(OpenRef {
            f: 0,
            h: 0,
            seq: 0,
            idx: start_idx,
        });

        let mut expanded: usize = 0;

        let found = 'search: loop {
            let Some(current) = open.pop() else {
                break 'search false;
            };
            let ci = current.idx;

            // Skip entries made stale by a later, cheaper re-discovery.
            if self.nodes[ci].generation != cur_gen || !self.nodes[ci].open {
                continue;
            }

            if ci == goal_idx {
                break 'search true;
            }

            self.nodes[ci].open = false;
            expanded += 1;
            let current_g = self.nodes[ci].g;
            let current_point = grid.point_of(ci);

            for np in grid.neighbors(current_point, adjacency) {
                let Some(ni) = grid.index_of(np) else {
                    continue;
                };
                let cell = grid.cell(ni);
                let visited = self.nodes[ni].generation == cur_gen;
                let settled = visited && !self.nodes[ni].open;
                if !cell.walkable() || settled {
                    continue;
                }

                let multiplier = if ignore_costs {
                    1
                } else {
                    (10.0 * cell.cost) as i32
                };
                let tentative = current_g + octile(current_point, np) * multiplier;
                if visited && tentative >= self.nodes[ni].g {
                    continue;
                }

                let node = &mut self.nodes[ni];
                if !visited {
                    seq += 1;
                    node.seq = seq;
                    node.generation = cur_gen;
                }
                node.g = tentative;
                node.h = octile(np, target);
                node.parent = ci;
                node.open = true;
                open.push(OpenRef {
                    f: node.g + node.h,
                    h: node.h,
                    seq: node.seq,
                    idx: ni,
                });
            }
        };

        if !found {
            log::trace!("no path {start} -> {target}, {expanded} nodes expanded");
            return Ok(Vec::new());
        }

        // Walk predecessors back from the target, excluding the start.
        let mut path = Vec::new();
        let mut ci = goal_idx;
        while ci != start_idx {
            path.push(grid.point_of(ci));
            ci = self.nodes[ci].parent;
        }
        path.reverse();
        log::trace!(
            "path {start} -> {target}: {} steps, {expanded} nodes expanded",
            path.len()
        );
        Ok(path)
    }
}

impl Default for PathFinder {
    fn default() -> Self {
        Self::new()
    }
}

/// One-shot search with fresh scratch state.
///
/// Equivalent to [`PathFinder::find_path`] on a new finder; prefer keeping a
/// [`PathFinder`] around when querying repeatedly.
pub fn find_path(
    grid: &Grid,
    start: Point,
    target: Point,
    adjacency: Adjacency,
    ignore_costs: bool,
) -> Result<Vec<Point>, PathError> {
    PathFinder::new().find_path(grid, start, target, adjacency, ignore_costs)
}

// ---------------------------------------------------------------------------
// PathError
// ---------------------------------------------------------------------------

/// Errors from a pathfinding query.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathError {
    /// The start or target coordinate lies outside the grid.
    OutOfBounds(Point),
}

impl fmt::Display for PathError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OutOfBounds(p) => write!(f, "pathfinding: {p} is out of bounds"),
        }
    }
}

impl std::error::Error for PathError {}
