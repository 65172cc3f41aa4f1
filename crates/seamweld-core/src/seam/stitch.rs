use std::time::Instant;

use ndarray::Array2;
use tracing::{debug, info};

use crate::cut::{CutSolver, GridCell, GridCut, Label};
use crate::error::Result;
use crate::field::SeamElement;

use super::cost::OverlapCost;
use super::reconstruct::reconstruct;
use super::SeamLabels;

/// Find the min-cut seam through the overlap using the bundled [`GridCut`].
pub fn find_seam<T: SeamElement>(
    image1: &Array2<T>,
    image2: &Array2<T>,
    margin: usize,
) -> Result<SeamLabels> {
    find_seam_with(image1, image2, margin, GridCut::new)
}

/// Find the min-cut seam with a solver built by `make_solver(height, margin)`.
///
/// The overlap is validated before the solver is built. The source is
/// pinned to overlap cell `(0, 0)` and the sink to `(0, margin - 1)`; the
/// boundary edge costs tie the rest of both outer columns to them.
pub fn find_seam_with<T, S, F>(
    image1: &Array2<T>,
    image2: &Array2<T>,
    margin: usize,
    make_solver: F,
) -> Result<SeamLabels>
where
    T: SeamElement,
    S: CutSolver,
    F: FnOnce(usize, usize) -> Result<S>,
{
    let cost = OverlapCost::new(image1, image2, margin)?;
    let height = image1.nrows();

    let mut solver = make_solver(height, margin)?;
    solver.set_source(GridCell::new(0, 0));
    solver.set_sink(GridCell::new(0, margin - 1));

    let start = Instant::now();
    let cut_cost = solver.solve(&cost)?;
    debug!(
        elapsed_ms = start.elapsed().as_millis() as u64,
        "Min-cut solve finished"
    );

    let mut labels = Array2::from_elem((height, margin), Label::Source);
    for row in 0..height {
        for col in 0..margin {
            labels[[row, col]] = solver.label(row, col)?;
        }
    }

    let seam = SeamLabels::new(labels, cut_cost);
    info!(
        height,
        margin,
        cut_cost,
        source_cells = seam.source_count(),
        "Seam found"
    );
    Ok(seam)
}

/// Find the seam and compose the two fields across it.
pub fn stitch_fields<T: SeamElement>(
    image1: &Array2<T>,
    image2: &Array2<T>,
    margin: usize,
) -> Result<(Array2<T>, SeamLabels)> {
    let seam = find_seam(image1, image2, margin)?;
    let composite = reconstruct(image1, image2, margin, &seam)?;
    Ok((composite, seam))
}
