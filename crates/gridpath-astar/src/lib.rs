//! **gridpath-astar** — weighted A* search over 2D cost grids.
//!
//! Given a [`Grid`](gridpath_core::Grid) of per-cell traversal costs, a
//! search returns the ordered coordinates from the step after the start
//! through the target, or an empty path when the target is unreachable
//! (a normal outcome, not an error). Movement is 4-way or 8-way per
//! [`Adjacency`](gridpath_core::Adjacency), and per-cell costs can be
//! ignored to get the geometrically shortest route.
//!
//! [`PathFinder`] owns reusable scratch state so repeated queries incur no
//! allocations after warm-up; [`find_path`] is the one-shot convenience
//! entry point.
//!
//! ```
//! use gridpath_astar::PathFinder;
//! use gridpath_core::{Adjacency, Grid, Point};
//!
//! let open = Grid::from_walkable(&vec![vec![true; 5]; 5])?;
//! let mut finder = PathFinder::new();
//! let path = finder.find_path(
//!     &open,
//!     Point::new(0, 0),
//!     Point::new(4, 4),
//!     Adjacency::Diagonal,
//!     false,
//! )?;
//! assert_eq!(path.len(), 4);
//! assert_eq!(path.last(), Some(&Point::new(4, 4)));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

mod astar;
mod distance;

pub use astar::{PathError, PathFinder, find_path};
pub use distance::octile;
