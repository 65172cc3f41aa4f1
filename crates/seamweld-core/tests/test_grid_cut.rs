use approx::assert_abs_diff_eq;

use seamweld_core::cut::{CutSolver, Direction, GridCell, GridCut, Label};
use seamweld_core::error::{ErrorKind, SeamError};

fn solved(height: usize, width: usize, source: GridCell, sink: GridCell, cost: impl Fn(usize, usize, Direction) -> f64) -> (GridCut, f64) {
    let mut grid = GridCut::new(height, width).unwrap();
    grid.set_source(source);
    grid.set_sink(sink);
    let flow = grid.solve(&cost).unwrap();
    (grid, flow)
}

#[test]
fn test_empty_grid_rejected() {
    let err = GridCut::new(0, 3).err().unwrap();
    assert!(matches!(err, SeamError::Solver(_)));
    assert_eq!(err.kind(), ErrorKind::Solver);
    assert!(GridCut::new(3, 0).is_err());
}

#[test]
fn test_dims() {
    let grid = GridCut::new(4, 7).unwrap();
    assert_eq!(grid.dims(), (4, 7));
}

#[test]
fn test_label_before_solve_is_error() {
    let grid = GridCut::new(2, 2).unwrap();
    assert!(matches!(grid.label(0, 0), Err(SeamError::Solver(_))));
}

#[test]
fn test_missing_terminals_rejected() {
    let mut grid = GridCut::new(2, 2).unwrap();
    let cost = |_: usize, _: usize, _: Direction| 1.0;
    assert!(grid.solve(&cost).is_err());

    grid.set_source(GridCell::new(0, 0));
    assert!(grid.solve(&cost).is_err());
}

#[test]
fn test_same_source_and_sink_rejected() {
    let mut grid = GridCut::new(3, 1).unwrap();
    grid.set_source(GridCell::new(0, 0));
    grid.set_sink(GridCell::new(0, 0));
    let err = grid.solve(&|_: usize, _: usize, _: Direction| 1.0).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Solver);
}

#[test]
fn test_terminal_outside_grid_rejected() {
    let mut grid = GridCut::new(2, 2).unwrap();
    grid.set_source(GridCell::new(0, 0));
    grid.set_sink(GridCell::new(5, 0));
    assert!(grid.solve(&|_: usize, _: usize, _: Direction| 1.0).is_err());
}

#[test]
fn test_negative_weight_rejected() {
    let mut grid = GridCut::new(1, 2).unwrap();
    grid.set_source(GridCell::new(0, 0));
    grid.set_sink(GridCell::new(0, 1));
    let err = grid
        .solve(&|_: usize, _: usize, _: Direction| -1.0)
        .unwrap_err();
    assert!(matches!(err, SeamError::Solver(_)));
}

#[test]
fn test_chain_cuts_weakest_link() {
    let cost = |_: usize, c: usize, dir: Direction| match (c, dir) {
        (0, Direction::East) | (1, Direction::West) => 5.0,
        (1, Direction::East) | (2, Direction::West) => 2.0,
        _ => 0.0,
    };
    let (grid, flow) = solved(1, 3, GridCell::new(0, 0), GridCell::new(0, 2), cost);

    assert_abs_diff_eq!(flow, 2.0, epsilon = 1e-9);
    assert_eq!(grid.label(0, 0).unwrap(), Label::Source);
    assert_eq!(grid.label(0, 1).unwrap(), Label::Source);
    assert_eq!(grid.label(0, 2).unwrap(), Label::Sink);
}

#[test]
fn test_parallel_paths_add_up() {
    // Direct edge (0,0)->(0,1) carries 1; the detour through row 1 carries 2.
    let cost = |r: usize, c: usize, dir: Direction| match (r, c, dir) {
        (0, 0, Direction::East) => 1.0,
        (0, 0, Direction::South) => 3.0,
        (1, 0, Direction::East) => 2.0,
        (1, 1, Direction::North) => 4.0,
        _ => 0.0,
    };
    let (grid, flow) = solved(2, 2, GridCell::new(0, 0), GridCell::new(0, 1), cost);

    assert_abs_diff_eq!(flow, 3.0, epsilon = 1e-9);
    assert_eq!(grid.label(0, 0).unwrap(), Label::Source);
    assert_eq!(grid.label(1, 0).unwrap(), Label::Source);
    assert_eq!(grid.label(1, 1).unwrap(), Label::Sink);
    assert_eq!(grid.label(0, 1).unwrap(), Label::Sink);
}

#[test]
fn test_arc_direction_matters() {
    // Only the source-to-sink direction limits the flow.
    let cost = |_: usize, _: usize, dir: Direction| match dir {
        Direction::East => 1.5,
        Direction::West => 100.0,
        _ => 0.0,
    };
    let (_, flow) = solved(1, 2, GridCell::new(0, 0), GridCell::new(0, 1), cost);
    assert_abs_diff_eq!(flow, 1.5, epsilon = 1e-9);
}

#[test]
fn test_disconnected_sink_has_zero_flow() {
    let (grid, flow) = solved(
        3,
        3,
        GridCell::new(0, 0),
        GridCell::new(2, 2),
        |_: usize, _: usize, _: Direction| 0.0,
    );
    assert_eq!(flow, 0.0);
    assert_eq!(grid.label(0, 0).unwrap(), Label::Source);
    assert_eq!(grid.label(1, 1).unwrap(), Label::Sink);
}

#[test]
fn test_uniform_grid_flow_matches_column_cut() {
    // 6x5 grid, unit weights, terminal columns tied together by heavy
    // vertical edges: the cheapest cut severs one edge per row.
    let cost = |_: usize, c: usize, dir: Direction| {
        if dir.is_vertical() && (c == 0 || c == 4) {
            1e6
        } else {
            1.0
        }
    };
    let (grid, flow) = solved(6, 5, GridCell::new(0, 0), GridCell::new(0, 4), cost);

    assert_abs_diff_eq!(flow, 6.0, epsilon = 1e-6);
    for row in 0..6 {
        assert_eq!(grid.label(row, 0).unwrap(), Label::Source);
        assert_eq!(grid.label(row, 4).unwrap(), Label::Sink);
    }
}

#[test]
fn test_label_out_of_range_is_error() {
    let (grid, _) = solved(
        2,
        2,
        GridCell::new(0, 0),
        GridCell::new(0, 1),
        |_: usize, _: usize, _: Direction| 1.0,
    );
    assert!(grid.label(2, 0).is_err());
}

#[test]
fn test_neighbor_bounds() {
    let cell = GridCell::new(0, 0);
    assert_eq!(cell.neighbor(Direction::North, 3, 3), None);
    assert_eq!(cell.neighbor(Direction::West, 3, 3), None);
    assert_eq!(cell.neighbor(Direction::South, 3, 3), Some(GridCell::new(1, 0)));
    assert_eq!(GridCell::new(2, 2).neighbor(Direction::East, 3, 3), None);
    assert_eq!(Direction::North.opposite(), Direction::South);
    assert_eq!(Direction::East.opposite(), Direction::West);
}
