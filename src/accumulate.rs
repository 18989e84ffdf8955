//! Prefix sums from increments to positions.

use ndarray::{Array2, Axis, s};

use crate::matrix::{PositionMatrix, StepMatrix};

/// Converts step increments to cumulative positions.
///
/// The result has one more column than `steps`: column 0 is the origin and
/// column `j` is the sum of the first `j` increments of each walk.
pub fn cumulative_positions(steps: &StepMatrix) -> PositionMatrix {
    let (walks, n_steps) = steps.shape();
    let mut positions = Array2::<i64>::zeros((walks, n_steps + 1));
    positions
        .slice_mut(s![.., 1..])
        .assign(&steps.as_array().mapv(i64::from));
    positions.accumulate_axis_inplace(Axis(1), |&prev, curr| *curr += prev);
    PositionMatrix::from_array_unchecked(positions)
}
