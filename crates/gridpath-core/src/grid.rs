//! The cost grid: [`Cell`]s, [`Adjacency`] modes, and neighbor enumeration.
//!
//! A [`Grid`] is built from a matrix of traversal costs (or a boolean
//! walkability matrix) and stays fixed-size until an explicit update call.
//! Matrix inputs are slices of rows: `rows[y][x]` is the cell at `(x, y)`.

use std::fmt;

use crate::geom::Point;

// ---------------------------------------------------------------------------
// Cell
// ---------------------------------------------------------------------------

/// A single grid cell carrying its traversal cost.
///
/// A cost of exactly `0.0` marks the cell as non-walkable; any positive cost
/// is walkable. Walkability is always derived from the cost, never stored
/// separately.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Cell {
    pub cost: f32,
}

impl Cell {
    /// Create a cell with the given traversal cost.
    #[inline]
    pub const fn new(cost: f32) -> Self {
        Self { cost }
    }

    /// Whether the cell can be stepped on.
    #[inline]
    pub fn walkable(self) -> bool {
        self.cost != 0.0
    }
}

impl From<f32> for Cell {
    fn from(cost: f32) -> Self {
        Self::new(cost)
    }
}

impl From<bool> for Cell {
    /// `true` maps to cost `1.0`, `false` to the non-walkable cost `0.0`.
    fn from(walkable: bool) -> Self {
        Self::new(if walkable { 1.0 } else { 0.0 })
    }
}

// ---------------------------------------------------------------------------
// Adjacency
// ---------------------------------------------------------------------------

/// Movement adjacency: which neighbor set defines reachable steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Adjacency {
    /// The four axis-aligned neighbors (Manhattan movement).
    Cardinal,
    /// All eight neighbors within a one-cell Chebyshev radius
    /// (Euclidean movement, diagonals allowed).
    #[default]
    Diagonal,
}

// The offset order is part of the search contract: expansion order feeds the
// tie-break, so reordering these tables changes returned paths.
const CARDINAL_OFFSETS: [Point; 4] = [
    Point::new(-1, 0),
    Point::new(1, 0),
    Point::new(0, -1),
    Point::new(0, 1),
];

const DIAGONAL_OFFSETS: [Point; 8] = [
    Point::new(-1, -1),
    Point::new(-1, 0),
    Point::new(-1, 1),
    Point::new(0, -1),
    Point::new(0, 1),
    Point::new(1, -1),
    Point::new(1, 0),
    Point::new(1, 1),
];

impl Adjacency {
    /// Candidate step offsets for this adjacency, in enumeration order.
    #[inline]
    pub fn offsets(self) -> &'static [Point] {
        match self {
            Self::Cardinal => &CARDINAL_OFFSETS,
            Self::Diagonal => &DIAGONAL_OFFSETS,
        }
    }
}

// ---------------------------------------------------------------------------
// Grid
// ---------------------------------------------------------------------------

/// A rectangular grid of cost [`Cell`]s.
///
/// Construct it from a cost matrix ([`from_costs`](Self::from_costs)) or a
/// walkability matrix ([`from_walkable`](Self::from_walkable)). Dimensions
/// are fixed until an update call: updating with a same-shaped matrix
/// refreshes cells in place, while a differently-shaped matrix reallocates
/// the grid. Cells are stored row-major, `(x, y)` at index `y * width + x`.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    cells: Vec<Cell>,
    width: usize,
    height: usize,
}

impl Grid {
    /// Build a grid from a matrix of non-negative traversal costs.
    ///
    /// `rows[y][x]` becomes the cell at `(x, y)`. A cost of `0.0` marks a
    /// non-walkable cell.
    pub fn from_costs(rows: &[Vec<f32>]) -> Result<Self, GridError> {
        let mut grid = Self {
            cells: Vec::new(),
            width: 0,
            height: 0,
        };
        grid.update_costs(rows)?;
        Ok(grid)
    }

    /// Build a grid from a walkability matrix.
    ///
    /// `true` maps to cost `1.0`, `false` to the non-walkable cost `0.0`.
    pub fn from_walkable(rows: &[Vec<bool>]) -> Result<Self, GridError> {
        let mut grid = Self {
            cells: Vec::new(),
            width: 0,
            height: 0,
        };
        grid.update_walkable(rows)?;
        Ok(grid)
    }

    /// Replace the grid contents from a cost matrix.
    ///
    /// If the matrix has the grid's current dimensions, cells are refreshed
    /// in place; otherwise the grid is reallocated to the new dimensions.
    /// On error the grid is left unchanged. Updating twice with the same
    /// matrix is equivalent to updating once.
    pub fn update_costs(&mut self, rows: &[Vec<f32>]) -> Result<(), GridError> {
        self.rebuild(rows, |&cost| Cell::new(cost))
    }

    /// Replace the grid contents from a walkability matrix.
    ///
    /// Same shape rules as [`update_costs`](Self::update_costs).
    pub fn update_walkable(&mut self, rows: &[Vec<bool>]) -> Result<(), GridError> {
        self.rebuild(rows, |&walkable| Cell::from(walkable))
    }

    fn rebuild<T>(
        &mut self,
        rows: &[Vec<T>],
        to_cell: impl Fn(&T) -> Cell,
    ) -> Result<(), GridError> {
        let width = rows.first().map_or(0, Vec::len);
        let height = rows.len();

        // Validate the whole matrix before touching the grid.
        let mut cells = Vec::with_capacity(width * height);
        for (y, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(GridError::InconsistentRowLength {
                    row: y,
                    len: row.len(),
                    expected: width,
                });
            }
            for (x, v) in row.iter().enumerate() {
                let cell = to_cell(v);
                if cell.cost < 0.0 {
                    return Err(GridError::NegativeCost {
                        pos: Point::new(x as i32, y as i32),
                        cost: cell.cost,
                    });
                }
                cells.push(cell);
            }
        }

        if width == self.width && height == self.height {
            self.cells.copy_from_slice(&cells);
        } else {
            if !self.cells.is_empty() {
                log::debug!(
                    "grid resized from {}x{} to {width}x{height}",
                    self.width,
                    self.height
                );
            }
            self.cells = cells;
            self.width = width;
            self.height = height;
        }
        Ok(())
    }

    /// Update the cost of a single cell.
    pub fn set_cost(&mut self, p: Point, cost: f32) -> Result<(), GridError> {
        if cost < 0.0 {
            return Err(GridError::NegativeCost { pos: p, cost });
        }
        let idx = self.index_of(p).ok_or(GridError::OutOfBounds(p))?;
        self.cells[idx] = Cell::new(cost);
        Ok(())
    }

    /// Width of the grid.
    #[inline]
    pub fn width(&self) -> i32 {
        self.width as i32
    }

    /// Height of the grid.
    #[inline]
    pub fn height(&self) -> i32 {
        self.height as i32
    }

    /// Total number of cells.
    #[inline]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Whether the grid has no cells.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Whether `p` is inside the grid.
    #[inline]
    pub fn contains(&self, p: Point) -> bool {
        p.x >= 0 && p.y >= 0 && (p.x as usize) < self.width && (p.y as usize) < self.height
    }

    /// The cell at `p`, or `None` if out of bounds.
    #[inline]
    pub fn at(&self, p: Point) -> Option<Cell> {
        self.index_of(p).map(|i| self.cells[i])
    }

    /// Convert a point to its flat row-major index, or `None` if out of
    /// bounds.
    #[inline]
    pub fn index_of(&self, p: Point) -> Option<usize> {
        if self.contains(p) {
            Some(p.y as usize * self.width + p.x as usize)
        } else {
            None
        }
    }

    /// Convert a flat index (below [`len`](Self::len)) back to a point.
    #[inline]
    pub fn point_of(&self, idx: usize) -> Point {
        Point::new((idx % self.width) as i32, (idx / self.width) as i32)
    }

    /// The cell at flat index `idx`.
    ///
    /// Panics if `idx` is not below [`len`](Self::len).
    #[inline]
    pub fn cell(&self, idx: usize) -> Cell {
        self.cells[idx]
    }

    /// In-bounds neighbors of `p` under the given adjacency, in a fixed
    /// enumeration order.
    ///
    /// Out-of-bounds candidates are silently skipped and `p` itself is never
    /// yielded. Walkability is not considered here; non-walkable neighbors
    /// are yielded and left to the caller to filter. Each call returns a
    /// fresh iterator.
    #[inline]
    pub fn neighbors(&self, p: Point, adjacency: Adjacency) -> NeighborIter<'_> {
        NeighborIter {
            grid: self,
            origin: p,
            offsets: adjacency.offsets(),
            next: 0,
        }
    }

    /// Row-major iterator over `(Point, Cell)` pairs.
    pub fn iter(&self) -> GridIter<'_> {
        GridIter { grid: self, idx: 0 }
    }
}

impl<'a> IntoIterator for &'a Grid {
    type Item = (Point, Cell);
    type IntoIter = GridIter<'a>;

    fn into_iter(self) -> GridIter<'a> {
        self.iter()
    }
}

// ---------------------------------------------------------------------------
// Iterators
// ---------------------------------------------------------------------------

/// Iterator over the in-bounds neighbors of a point. See
/// [`Grid::neighbors`].
pub struct NeighborIter<'a> {
    grid: &'a Grid,
    origin: Point,
    offsets: &'static [Point],
    next: usize,
}

impl Iterator for NeighborIter<'_> {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        while self.next < self.offsets.len() {
            let p = self.origin + self.offsets[self.next];
            self.next += 1;
            if self.grid.contains(p) {
                return Some(p);
            }
        }
        None
    }
}

/// Row-major iterator over `(Point, Cell)` pairs of a [`Grid`].
pub struct GridIter<'a> {
    grid: &'a Grid,
    idx: usize,
}

impl Iterator for GridIter<'_> {
    type Item = (Point, Cell);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.idx >= self.grid.len() {
            return None;
        }
        let i = self.idx;
        self.idx += 1;
        Some((self.grid.point_of(i), self.grid.cell(i)))
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.grid.len() - self.idx;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for GridIter<'_> {}

// ---------------------------------------------------------------------------
// GridError
// ---------------------------------------------------------------------------

/// Errors from grid construction and updates.
#[derive(Debug, Clone, PartialEq)]
pub enum GridError {
    /// A matrix row does not match the width of the first row.
    InconsistentRowLength {
        row: usize,
        len: usize,
        expected: usize,
    },
    /// A cell cost was negative.
    NegativeCost { pos: Point, cost: f32 },
    /// A coordinate lies outside the grid.
    OutOfBounds(Point),
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InconsistentRowLength { row, len, expected } => {
                write!(f, "grid: row {row} has length {len}, expected {expected}")
            }
            Self::NegativeCost { pos, cost } => {
                write!(f, "grid: negative cost {cost} at {pos}")
            }
            Self::OutOfBounds(p) => write!(f, "grid: {p} is out of bounds"),
        }
    }
}

impl std::error::Error for GridError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn costs(rows: &[&[f32]]) -> Vec<Vec<f32>> {
        rows.iter().map(|r| r.to_vec()).collect()
    }

    // -----------------------------------------------------------------------
    // Construction
    // -----------------------------------------------------------------------

    #[test]
    fn from_costs_basics() {
        let g = Grid::from_costs(&costs(&[&[1.0, 2.0, 0.0], &[0.5, 1.0, 1.0]])).unwrap();
        assert_eq!(g.width(), 3);
        assert_eq!(g.height(), 2);
        assert_eq!(g.len(), 6);
        assert_eq!(g.at(Point::new(1, 0)), Some(Cell::new(2.0)));
        assert_eq!(g.at(Point::new(0, 1)), Some(Cell::new(0.5)));
        assert_eq!(g.at(Point::new(3, 0)), None);
        assert_eq!(g.at(Point::new(0, -1)), None);
    }

    #[test]
    fn zero_cost_is_non_walkable() {
        let g = Grid::from_costs(&costs(&[&[1.0, 0.0]])).unwrap();
        assert!(g.at(Point::new(0, 0)).unwrap().walkable());
        assert!(!g.at(Point::new(1, 0)).unwrap().walkable());
    }

    #[test]
    fn from_walkable_maps_to_unit_costs() {
        let g = Grid::from_walkable(&[vec![true, false], vec![false, true]]).unwrap();
        assert_eq!(g.at(Point::new(0, 0)), Some(Cell::new(1.0)));
        assert_eq!(g.at(Point::new(1, 0)), Some(Cell::new(0.0)));
        assert!(!g.at(Point::new(0, 1)).unwrap().walkable());
    }

    #[test]
    fn ragged_matrix_rejected() {
        let err = Grid::from_costs(&costs(&[&[1.0, 1.0], &[1.0]])).unwrap_err();
        assert_eq!(
            err,
            GridError::InconsistentRowLength {
                row: 1,
                len: 1,
                expected: 2
            }
        );
    }

    #[test]
    fn negative_cost_rejected() {
        let err = Grid::from_costs(&costs(&[&[1.0, -0.5]])).unwrap_err();
        assert!(matches!(err, GridError::NegativeCost { .. }));
    }

    #[test]
    fn empty_matrix_gives_empty_grid() {
        let g = Grid::from_costs(&[]).unwrap();
        assert!(g.is_empty());
        assert_eq!(g.at(Point::ZERO), None);
    }

    // -----------------------------------------------------------------------
    // Updates
    // -----------------------------------------------------------------------

    #[test]
    fn update_same_shape_matches_fresh_grid() {
        let first = costs(&[&[1.0, 1.0], &[1.0, 1.0]]);
        let second = costs(&[&[2.0, 0.0], &[1.0, 0.5]]);
        let mut g = Grid::from_costs(&first).unwrap();
        g.update_costs(&second).unwrap();
        assert_eq!(g, Grid::from_costs(&second).unwrap());
    }

    #[test]
    fn update_is_idempotent() {
        let rows = costs(&[&[2.0, 0.0, 1.0], &[1.0, 0.5, 1.0]]);
        let mut once = Grid::from_costs(&costs(&[&[1.0, 1.0, 1.0], &[1.0, 1.0, 1.0]])).unwrap();
        once.update_costs(&rows).unwrap();
        let mut twice = once.clone();
        twice.update_costs(&rows).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn update_with_new_shape_reallocates() {
        let mut g = Grid::from_costs(&costs(&[&[1.0, 1.0]])).unwrap();
        g.update_costs(&costs(&[&[1.0], &[2.0], &[3.0]])).unwrap();
        assert_eq!(g.width(), 1);
        assert_eq!(g.height(), 3);
        assert_eq!(g.at(Point::new(0, 2)), Some(Cell::new(3.0)));
    }

    #[test]
    fn failed_update_leaves_grid_unchanged() {
        let rows = costs(&[&[1.0, 2.0]]);
        let mut g = Grid::from_costs(&rows).unwrap();
        let before = g.clone();
        assert!(g.update_costs(&costs(&[&[1.0, -1.0]])).is_err());
        assert!(g.update_costs(&costs(&[&[1.0, 1.0], &[1.0]])).is_err());
        assert_eq!(g, before);
    }

    #[test]
    fn set_cost_partial_update() {
        let mut g = Grid::from_walkable(&[vec![true, true]]).unwrap();
        g.set_cost(Point::new(1, 0), 0.0).unwrap();
        assert!(!g.at(Point::new(1, 0)).unwrap().walkable());
        assert_eq!(
            g.set_cost(Point::new(5, 0), 1.0),
            Err(GridError::OutOfBounds(Point::new(5, 0)))
        );
        assert!(matches!(
            g.set_cost(Point::new(0, 0), -2.0),
            Err(GridError::NegativeCost { .. })
        ));
    }

    // -----------------------------------------------------------------------
    // Neighbor enumeration
    // -----------------------------------------------------------------------

    #[test]
    fn cardinal_neighbors_in_order() {
        let g = Grid::from_walkable(&vec![vec![true; 3]; 3]).unwrap();
        let ns: Vec<_> = g.neighbors(Point::new(1, 1), Adjacency::Cardinal).collect();
        assert_eq!(
            ns,
            vec![
                Point::new(0, 1),
                Point::new(2, 1),
                Point::new(1, 0),
                Point::new(1, 2),
            ]
        );
    }

    #[test]
    fn diagonal_neighbors_in_order() {
        let g = Grid::from_walkable(&vec![vec![true; 3]; 3]).unwrap();
        let ns: Vec<_> = g.neighbors(Point::new(1, 1), Adjacency::Diagonal).collect();
        assert_eq!(
            ns,
            vec![
                Point::new(0, 0),
                Point::new(0, 1),
                Point::new(0, 2),
                Point::new(1, 0),
                Point::new(1, 2),
                Point::new(2, 0),
                Point::new(2, 1),
                Point::new(2, 2),
            ]
        );
    }

    #[test]
    fn corner_neighbors_skip_out_of_bounds() {
        let g = Grid::from_walkable(&vec![vec![true; 3]; 3]).unwrap();
        let diag: Vec<_> = g.neighbors(Point::ZERO, Adjacency::Diagonal).collect();
        assert_eq!(
            diag,
            vec![Point::new(0, 1), Point::new(1, 0), Point::new(1, 1)]
        );
        let card: Vec<_> = g.neighbors(Point::ZERO, Adjacency::Cardinal).collect();
        assert_eq!(card, vec![Point::new(1, 0), Point::new(0, 1)]);
    }

    #[test]
    fn neighbors_include_non_walkable_cells() {
        let g = Grid::from_costs(&costs(&[&[1.0, 0.0], &[1.0, 1.0]])).unwrap();
        let ns: Vec<_> = g.neighbors(Point::ZERO, Adjacency::Cardinal).collect();
        assert!(ns.contains(&Point::new(1, 0)));
    }

    #[test]
    fn neighbors_restart_fresh_each_call() {
        let g = Grid::from_walkable(&vec![vec![true; 2]; 2]).unwrap();
        let first: Vec<_> = g.neighbors(Point::ZERO, Adjacency::Diagonal).collect();
        let second: Vec<_> = g.neighbors(Point::ZERO, Adjacency::Diagonal).collect();
        assert_eq!(first, second);
    }

    // -----------------------------------------------------------------------
    // Iteration & indexing
    // -----------------------------------------------------------------------

    #[test]
    fn iter_row_major() {
        let g = Grid::from_costs(&costs(&[&[1.0, 2.0], &[3.0, 4.0]])).unwrap();
        let items: Vec<_> = g.iter().collect();
        assert_eq!(items.len(), 4);
        assert_eq!(items[0], (Point::new(0, 0), Cell::new(1.0)));
        assert_eq!(items[1], (Point::new(1, 0), Cell::new(2.0)));
        assert_eq!(items[2], (Point::new(0, 1), Cell::new(3.0)));
        assert_eq!(items[3], (Point::new(1, 1), Cell::new(4.0)));
    }

    #[test]
    fn index_round_trip() {
        let g = Grid::from_walkable(&vec![vec![true; 4]; 3]).unwrap();
        for (p, _) in g.iter() {
            let idx = g.index_of(p).unwrap();
            assert_eq!(g.point_of(idx), p);
        }
        assert_eq!(g.index_of(Point::new(4, 0)), None);
        assert_eq!(g.index_of(Point::new(-1, 2)), None);
    }
}
