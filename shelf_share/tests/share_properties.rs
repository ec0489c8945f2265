use proptest::prelude::*;
use shelf_share::{EstimatorError, Grid, ShareResult, ShelfShareEstimator};

/// A grid resolution together with a list of in-range toggles on it.
fn grid_and_toggles() -> impl Strategy<Value = (u32, u32, Vec<(u32, u32)>)> {
    (1u32..=12, 1u32..=12).prop_flat_map(|(rows, cols)| {
        (
            Just(rows),
            Just(cols),
            prop::collection::vec((0..rows, 0..cols), 0..40),
        )
    })
}

fn shown(rows: u32, cols: u32) -> ShelfShareEstimator {
    let mut estimator = ShelfShareEstimator::new(Grid::new(rows, cols).unwrap());
    estimator.show();
    estimator
}

proptest! {
    #[test]
    fn empty_selection_is_zero_for_every_grid(rows in 1u32..=64, cols in 1u32..=64) {
        let estimator = shown(rows, cols);
        prop_assert_eq!(estimator.grid().total_cells(), u64::from(rows) * u64::from(cols));
        prop_assert_eq!(estimator.current_share(), ShareResult::ZERO);
    }

    #[test]
    fn share_matches_the_rounded_ratio_and_complements_to_100(
        (rows, cols, toggles) in grid_and_toggles()
    ) {
        let mut estimator = shown(rows, cols);
        for (row, col) in toggles {
            estimator.toggle_cell(row, col).unwrap();
            let k = estimator.selection().len() as f64;
            let n = f64::from(rows * cols);
            let expected = (100.0 * k / n + 0.5).floor() as u8;
            let share = estimator.current_share();
            prop_assert_eq!(share.percent(), expected);
            prop_assert_eq!(u32::from(share.percent()) + u32::from(estimator.competitor_share()), 100);
        }
    }

    #[test]
    fn toggling_twice_restores_the_prior_state(
        (rows, cols, toggles) in grid_and_toggles(),
        pick in any::<prop::sample::Index>(),
    ) {
        let mut estimator = shown(rows, cols);
        for (row, col) in toggles {
            estimator.toggle_cell(row, col).unwrap();
        }
        let before_selection = estimator.selection().clone();
        let before_share = estimator.current_share();

        let cell = pick.index((rows * cols) as usize);
        let (row, col) = (cell as u32 / cols, cell as u32 % cols);
        estimator.toggle_cell(row, col).unwrap();
        estimator.toggle_cell(row, col).unwrap();

        prop_assert_eq!(estimator.selection(), &before_selection);
        prop_assert_eq!(estimator.current_share(), before_share);
    }

    #[test]
    fn toggle_order_does_not_change_the_final_selection(
        (rows, cols, toggles) in grid_and_toggles()
    ) {
        let mut forward = shown(rows, cols);
        let mut backward = shown(rows, cols);
        for &(row, col) in &toggles {
            forward.toggle_cell(row, col).unwrap();
        }
        for &(row, col) in toggles.iter().rev() {
            backward.toggle_cell(row, col).unwrap();
        }
        prop_assert_eq!(forward.selection(), backward.selection());
        prop_assert_eq!(forward.current_share(), backward.current_share());
    }

    #[test]
    fn show_and_reset_always_return_to_zero(
        (rows, cols, toggles) in grid_and_toggles(),
        hide_first in any::<bool>(),
    ) {
        let mut estimator = shown(rows, cols);
        for &(row, col) in &toggles {
            estimator.toggle_cell(row, col).unwrap();
        }
        estimator.reset();
        prop_assert_eq!(estimator.current_share(), ShareResult::ZERO);

        for &(row, col) in &toggles {
            estimator.toggle_cell(row, col).unwrap();
        }
        if hide_first {
            estimator.hide();
        }
        estimator.show();
        prop_assert_eq!(estimator.current_share(), ShareResult::ZERO);
    }

    #[test]
    fn out_of_range_rows_never_mutate(
        (rows, cols, toggles) in grid_and_toggles(),
        extra in 0u32..5,
        col in 0u32..12,
    ) {
        let mut estimator = shown(rows, cols);
        for (row, col) in toggles {
            estimator.toggle_cell(row, col).unwrap();
        }
        let size_before = estimator.selection().len();

        let result = estimator.toggle_cell(rows + extra, col);

        let is_invalid_cell = matches!(result, Err(EstimatorError::InvalidCell { .. }));
        prop_assert!(is_invalid_cell);
        prop_assert_eq!(estimator.selection().len(), size_before);
    }
}
