//! **gridpath-core** — cost-grid primitives for weighted pathfinding.
//!
//! This crate provides the data model shared across the *gridpath* crates:
//! integer [`Point`]s, [`Cell`]s carrying a traversal cost, the rectangular
//! [`Grid`] built from cost or walkability matrices, and adjacency-aware
//! neighbor enumeration.

pub mod geom;
pub mod grid;

pub use geom::Point;
pub use grid::{Adjacency, Cell, Grid, GridError, NeighborIter};
