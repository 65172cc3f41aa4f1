use std::cell::Cell;

use approx::assert_abs_diff_eq;
use ndarray::Array2;

use seamweld_core::cut::{GridCut, Label};
use seamweld_core::error::{ErrorKind, SeamError};
use seamweld_core::field::gradient::gradient;
use seamweld_core::seam::{
    find_seam, find_seam_with, reconstruct, stitch_fields, validate_overlap, SeamLabels,
};

mod common;

/// Every row must read Source..Source Sink..Sink, and neighboring rows
/// must switch at columns at most one apart.
fn assert_connected_seam(seam: &SeamLabels) {
    let (h, margin) = seam.dim();
    let columns = seam.seam_columns();
    for row in 0..h {
        let switch = columns[row];
        assert!(switch > 0 && switch < margin, "row {row} switches at {switch}");
        for col in 0..margin {
            let expected = if col < switch { Label::Source } else { Label::Sink };
            assert_eq!(seam.label(row, col), expected, "row {row} col {col}");
        }
    }
    for pair in columns.windows(2) {
        assert!(
            pair[0].abs_diff(pair[1]) <= 1,
            "seam jumps from {} to {}",
            pair[0],
            pair[1]
        );
    }
}

// ---------------------------------------------------------------------------
// End-to-end field scenarios
// ---------------------------------------------------------------------------

#[test]
fn test_identical_gray_fields() {
    let image1 = common::uniform(10, 10, 0.5);
    let image2 = common::uniform(10, 10, 0.5);

    let (composite, seam) = stitch_fields(&image1, &image2, 4).unwrap();

    assert_eq!(composite.dim(), (10, 16));
    assert!(composite.iter().all(|&v| v == 0.5));
    assert_eq!(seam.cut_cost(), 0.0);
}

#[test]
fn test_black_white_seam_is_single_connected_cut() {
    let image1 = common::uniform(5, 6, 0.0);
    let image2 = common::uniform(5, 6, 1.0);

    let seam = find_seam(&image1, &image2, 4).unwrap();

    assert_eq!(seam.dim(), (5, 4));
    assert_connected_seam(&seam);
    // One severed horizontal edge per row, each costing |0-1| + |0-1|.
    assert_abs_diff_eq!(seam.cut_cost(), 10.0, epsilon = 1e-6);
}

#[test]
fn test_seam_follows_low_cost_column() {
    // Image 1 and image 2 agree only in overlap column 2; everywhere else
    // they differ, so the cheapest seam passes through that column.
    let h = 8;
    let image1 = common::uniform(h, 6, 0.0);
    let mut image2 = common::uniform(h, 6, 1.0);
    for row in 0..h {
        image2[[row, 2]] = 0.0;
        image2[[row, 3]] = 0.0;
    }
    // overlap = image1 cols 1..6, image2 cols 0..5
    let seam = find_seam(&image1, &image2, 5).unwrap();

    assert_connected_seam(&seam);
    let columns = seam.seam_columns();
    assert!(columns.iter().all(|&c| c == 3), "got {columns:?}");
}

#[test]
fn test_composite_dimensions_scalar_and_vector() {
    let image1 = common::pattern(7, 12);
    let image2 = common::pattern(7, 9);

    let (scalar, _) = stitch_fields(&image1, &image2, 5).unwrap();
    assert_eq!(scalar.dim(), (7, 12 + 9 - 5));

    let (vector, _) = stitch_fields(&gradient(&image1), &gradient(&image2), 5).unwrap();
    assert_eq!(vector.dim(), (7, 12 + 9 - 5));
}

#[test]
fn test_gradient_domain_identical_images() {
    let field = common::pattern(6, 8);
    let grad = gradient(&field);

    let (composite, seam) = stitch_fields(&grad, &grad, 3).unwrap();

    assert_eq!(composite.dim(), (6, 13));
    for row in 0..6 {
        for col in 0..5 {
            assert_eq!(composite[[row, col]], grad[[row, col]]);
        }
    }
    assert!(seam.cut_cost() >= 0.0);
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

#[test]
fn test_margin_equal_to_width_is_valid() {
    let image1 = common::uniform(4, 4, 0.2);
    let image2 = common::uniform(4, 6, 0.2);

    let (composite, _) = stitch_fields(&image1, &image2, 4).unwrap();
    assert_eq!(composite.dim(), (4, 6));
}

#[test]
fn test_margin_larger_than_either_width_rejected() {
    let image1 = common::uniform(4, 4, 0.2);
    let image2 = common::uniform(4, 6, 0.2);

    for margin in [5, 7] {
        let err = find_seam(&image1, &image2, margin).unwrap_err();
        assert!(matches!(err, SeamError::InvalidMargin { .. }), "got: {err}");
        assert_eq!(err.kind(), ErrorKind::Validation);
    }
    let err = find_seam(&image2, &image1, 5).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Validation);
}

#[test]
fn test_zero_margin_rejected() {
    let image = common::uniform(3, 3, 0.0);
    let err = validate_overlap(&image, &image, 0).unwrap_err();
    assert!(matches!(err, SeamError::InvalidMargin { margin: 0, .. }));
}

#[test]
fn test_height_mismatch_rejected() {
    let image1 = common::uniform(4, 5, 0.0);
    let image2 = common::uniform(5, 5, 0.0);
    let err = find_seam(&image1, &image2, 2).unwrap_err();
    assert!(matches!(
        err,
        SeamError::HeightMismatch {
            height1: 4,
            height2: 5
        }
    ));
}

#[test]
fn test_validation_runs_before_solver_is_built() {
    let image1 = common::uniform(4, 5, 0.0);
    let image2 = common::uniform(5, 5, 0.0);
    let built = Cell::new(0);

    let result = find_seam_with(&image1, &image2, 2, |h, w| {
        built.set(built.get() + 1);
        GridCut::new(h, w)
    });

    assert!(result.is_err());
    assert_eq!(built.get(), 0);
}

#[test]
fn test_solver_sized_to_overlap() {
    let image1 = common::uniform(3, 8, 0.0);
    let image2 = common::uniform(3, 6, 1.0);
    let dims = Cell::new((0, 0));

    find_seam_with(&image1, &image2, 4, |h, w| {
        dims.set((h, w));
        GridCut::new(h, w)
    })
    .unwrap();

    assert_eq!(dims.get(), (3, 4));
}

#[test]
fn test_single_column_margin_is_solver_error() {
    let image = common::uniform(3, 3, 0.5);
    let err = find_seam(&image, &image, 1).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Solver);
}

// ---------------------------------------------------------------------------
// Reconstruction
// ---------------------------------------------------------------------------

#[test]
fn test_reconstruct_takes_each_side() {
    let image1 = Array2::from_shape_fn((2, 4), |(_, c)| c as f32);
    let image2 = Array2::from_shape_fn((2, 5), |(_, c)| 10.0 + c as f32);
    let labels = Array2::from_shape_vec(
        (2, 2),
        vec![Label::Source, Label::Sink, Label::Sink, Label::Sink],
    )
    .unwrap();
    let seam = SeamLabels::new(labels, 0.0);

    let output = reconstruct(&image1, &image2, 2, &seam).unwrap();

    assert_eq!(output.dim(), (2, 7));
    let row0: Vec<f32> = output.row(0).to_vec();
    let row1: Vec<f32> = output.row(1).to_vec();
    assert_eq!(row0, vec![0.0, 1.0, 2.0, 11.0, 12.0, 13.0, 14.0]);
    assert_eq!(row1, vec![0.0, 1.0, 10.0, 11.0, 12.0, 13.0, 14.0]);
}

#[test]
fn test_reconstruct_rejects_wrong_label_shape() {
    let image = common::uniform(3, 4, 0.0);
    let seam = SeamLabels::new(Array2::from_elem((3, 3), Label::Source), 0.0);
    let err = reconstruct(&image, &image, 2, &seam).unwrap_err();
    assert!(matches!(
        err,
        SeamError::LabelShape {
            expected: (3, 2),
            actual: (3, 3)
        }
    ));
}

#[test]
fn test_all_source_keeps_image1_overlap() {
    let image1 = common::uniform(2, 3, 0.25);
    let image2 = common::uniform(2, 3, 0.75);
    let seam = SeamLabels::new(Array2::from_elem((2, 2), Label::Source), 0.0);

    let output = reconstruct(&image1, &image2, 2, &seam).unwrap();
    assert_eq!(output.row(0).to_vec(), vec![0.25, 0.25, 0.25, 0.75]);
}

// ---------------------------------------------------------------------------
// SeamLabels helpers
// ---------------------------------------------------------------------------

#[test]
fn test_seam_columns_and_counts() {
    let labels = Array2::from_shape_vec(
        (3, 3),
        vec![
            Label::Source, Label::Sink, Label::Sink,
            Label::Source, Label::Source, Label::Sink,
            Label::Source, Label::Source, Label::Source,
        ],
    )
    .unwrap();
    let seam = SeamLabels::new(labels, 1.5);

    assert_eq!(seam.seam_columns(), vec![1, 2, 3]);
    assert_eq!(seam.source_count(), 6);
    assert_eq!(seam.cut_cost(), 1.5);
}

#[test]
fn test_mask_buffer() {
    let labels = Array2::from_shape_vec((1, 2), vec![Label::Source, Label::Sink]).unwrap();
    let mask = SeamLabels::new(labels, 0.0).mask_buffer();

    assert_eq!((mask.width, mask.height), (2, 1));
    assert_eq!(mask.pixel(0, 0), [255, 255, 255, 255]);
    assert_eq!(mask.pixel(0, 1), [0, 0, 0, 255]);
}
