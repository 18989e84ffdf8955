//! Walk-major matrices of step increments and cumulative positions.
//!
//! Row `i` of either matrix is walk `i`; column `j` is time step `j`. Both
//! types can only be built through validating constructors, so a value in
//! hand always satisfies its shape and content invariants.

use ndarray::{Array2, ArrayView1, Axis};

use crate::error::WalkError;

/// Step increments of shape `(walks, steps)`, every entry exactly -1 or +1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StepMatrix(Array2<i8>);

impl StepMatrix {
    /// Wraps an existing array after checking its shape and entries.
    ///
    /// # Errors
    ///
    /// [`WalkError::EmptyShape`] if either dimension is zero,
    /// [`WalkError::InvalidStep`] for the first entry that is not ±1.
    pub fn from_array(steps: Array2<i8>) -> Result<Self, WalkError> {
        let (walks, n_steps) = steps.dim();
        if walks == 0 || n_steps == 0 {
            return Err(WalkError::EmptyShape {
                walks,
                steps: n_steps,
            });
        }
        if let Some(((walk, step), &value)) = steps
            .indexed_iter()
            .find(|&(_, &v)| v != 1 && v != -1)
        {
            return Err(WalkError::InvalidStep { walk, step, value });
        }
        Ok(Self(steps))
    }

    /// Builds a matrix from one `Vec` per walk.
    ///
    /// # Errors
    ///
    /// As [`StepMatrix::from_array`], plus [`WalkError::RaggedRows`] when the
    /// rows differ in length.
    pub fn from_rows(rows: &[Vec<i8>]) -> Result<Self, WalkError> {
        let n_steps = rows.first().map_or(0, Vec::len);
        if let Some((row, r)) = rows.iter().enumerate().find(|(_, r)| r.len() != n_steps) {
            return Err(WalkError::RaggedRows {
                row,
                expected: n_steps,
                got: r.len(),
            });
        }
        let flat: Vec<i8> = rows.iter().flatten().copied().collect();
        let steps = Array2::from_shape_vec((rows.len(), n_steps), flat).map_err(|_| {
            WalkError::EmptyShape {
                walks: rows.len(),
                steps: n_steps,
            }
        })?;
        Self::from_array(steps)
    }

    /// Wraps an array the caller has already checked.
    pub(crate) fn from_array_unchecked(steps: Array2<i8>) -> Self {
        debug_assert!(steps.iter().all(|&v| v == 1 || v == -1));
        Self(steps)
    }

    pub fn n_walks(&self) -> usize {
        self.0.nrows()
    }

    pub fn n_steps(&self) -> usize {
        self.0.ncols()
    }

    /// `(walks, steps)`.
    pub fn shape(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Increments of walk `i`.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_walks()`.
    pub fn walk(&self, i: usize) -> ArrayView1<'_, i8> {
        self.0.index_axis(Axis(0), i)
    }

    pub fn as_array(&self) -> &Array2<i8> {
        &self.0
    }
}

/// Cumulative positions of shape `(walks, steps + 1)`.
///
/// Column 0 is the origin of every walk and consecutive columns differ by
/// exactly one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PositionMatrix(Array2<i64>);

impl PositionMatrix {
    /// Wraps an existing array after checking the walk invariants.
    ///
    /// # Errors
    ///
    /// [`WalkError::EmptyShape`] if there are no walks or no columns,
    /// [`WalkError::NonZeroOrigin`] if a walk does not start at 0,
    /// [`WalkError::InvalidIncrement`] if two consecutive positions differ by
    /// anything other than one.
    pub fn from_array(positions: Array2<i64>) -> Result<Self, WalkError> {
        let (walks, cols) = positions.dim();
        if walks == 0 || cols == 0 {
            return Err(WalkError::EmptyShape {
                walks,
                steps: cols.saturating_sub(1),
            });
        }
        for (walk, row) in positions.outer_iter().enumerate() {
            if row[0] != 0 {
                return Err(WalkError::NonZeroOrigin {
                    walk,
                    value: row[0],
                });
            }
            for step in 1..cols {
                // saturates far from ±1 when the true difference overflows
                let delta = row[step].saturating_sub(row[step - 1]);
                if delta != 1 && delta != -1 {
                    return Err(WalkError::InvalidIncrement { walk, step, delta });
                }
            }
        }
        Ok(Self(positions))
    }

    pub(crate) fn from_array_unchecked(positions: Array2<i64>) -> Self {
        debug_assert!(positions.column(0).iter().all(|&p| p == 0));
        Self(positions)
    }

    pub fn n_walks(&self) -> usize {
        self.0.nrows()
    }

    /// Number of steps taken, one less than the number of columns.
    pub fn n_steps(&self) -> usize {
        self.0.ncols() - 1
    }

    /// `(walks, steps + 1)`.
    pub fn shape(&self) -> (usize, usize) {
        self.0.dim()
    }

    /// Trajectory of walk `i`, origin included.
    ///
    /// # Panics
    ///
    /// Panics if `i >= self.n_walks()`.
    pub fn walk(&self, i: usize) -> ArrayView1<'_, i64> {
        self.0.index_axis(Axis(0), i)
    }

    /// Position of every walk after the last step.
    pub fn final_positions(&self) -> ArrayView1<'_, i64> {
        self.0.index_axis(Axis(1), self.n_steps())
    }

    pub fn as_array(&self) -> &Array2<i64> {
        &self.0
    }

    pub fn into_array(self) -> Array2<i64> {
        self.0
    }
}
