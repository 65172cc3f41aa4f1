//! Min-cut on a 4-connected grid graph.
//!
//! The seam code only depends on the [`CutSolver`] contract: build a grid,
//! weight its edges through an [`EdgeCost`], pin one source and one sink
//! cell, solve, then read back a [`Label`] per cell. [`GridCut`] is the
//! bundled implementation.

mod grid;

pub use grid::GridCut;

use crate::error::Result;

/// Direction of a grid edge, seen from the cell it leaves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    South,
    East,
    West,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::East,
        Direction::West,
    ];

    /// `(dy, dx)` offset of the neighbor in this direction.
    pub fn offset(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::East => (0, 1),
            Self::West => (0, -1),
        }
    }

    pub fn opposite(self) -> Direction {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::East => Self::West,
            Self::West => Self::East,
        }
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Self::North | Self::South)
    }
}

/// Side of the cut a cell ends up on.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Label {
    /// Connected to the source: keeps image 1's pixel.
    Source,
    /// Separated from the source: takes image 2's pixel.
    Sink,
}

/// A `(row, col)` cell of the grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridCell {
    pub row: usize,
    pub col: usize,
}

impl GridCell {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Neighbor in `dir`, or `None` when it falls outside a `height x width` grid.
    pub fn neighbor(self, dir: Direction, height: usize, width: usize) -> Option<GridCell> {
        let (dy, dx) = dir.offset();
        let row = self.row.checked_add_signed(dy)?;
        let col = self.col.checked_add_signed(dx)?;
        (row < height && col < width).then_some(GridCell { row, col })
    }
}

/// Weight of the directed edge leaving `(row, col)` towards `dir`.
///
/// Implementations must be pure: the solver may query any edge any number
/// of times in any order.
pub trait EdgeCost {
    fn cost(&self, row: usize, col: usize, dir: Direction) -> f64;
}

impl<F> EdgeCost for F
where
    F: Fn(usize, usize, Direction) -> f64,
{
    fn cost(&self, row: usize, col: usize, dir: Direction) -> f64 {
        self(row, col, dir)
    }
}

/// Max-flow / min-cut engine over a fixed-size grid.
pub trait CutSolver {
    /// `(height, width)` of the grid.
    fn dims(&self) -> (usize, usize);

    fn set_source(&mut self, cell: GridCell);

    fn set_sink(&mut self, cell: GridCell);

    /// Compute the max flow from source to sink with edge capacities taken
    /// from `cost`. Returns the flow value, i.e. the weight of the min cut.
    fn solve(&mut self, cost: &dyn EdgeCost) -> Result<f64>;

    /// Side of the cut for `(row, col)`. Only valid after [`CutSolver::solve`].
    fn label(&self, row: usize, col: usize) -> Result<Label>;
}
