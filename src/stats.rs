//! Summary statistics over a [`PositionMatrix`].

use ndarray::Axis;

use crate::error::WalkError;
use crate::matrix::PositionMatrix;

/// Final position of every walk, as floats.
pub fn final_positions(positions: &PositionMatrix) -> Vec<f64> {
    positions.final_positions().iter().map(|&p| p as f64).collect()
}

/// Population variance (ddof = 0) of the positions at each time step.
///
/// Returns `n_steps + 1` values; the first is always 0 because every walk
/// starts at the origin. With a single walk every entry is 0.
pub fn variance_by_step(positions: &PositionMatrix) -> Vec<f64> {
    positions
        .as_array()
        .mapv(|p| p as f64)
        .var_axis(Axis(0), 0.0)
        .to_vec()
}

/// Equal-width histogram normalised to a probability density.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram {
    edges: Vec<f64>,
    heights: Vec<f64>,
}

impl Histogram {
    /// Bins `samples` into `bins` equal-width bins spanning their range.
    ///
    /// Bins are half-open except the last, which also holds the maximum.
    /// A degenerate range (all samples equal) is widened by 0.5 on each
    /// side. Heights are `count / (n * width)`, so the bar areas sum to one.
    ///
    /// # Errors
    ///
    /// [`WalkError::EmptySamples`] for an empty slice, [`WalkError::ZeroBins`]
    /// when `bins == 0`.
    pub fn density(samples: &[f64], bins: usize) -> Result<Self, WalkError> {
        if samples.is_empty() {
            return Err(WalkError::EmptySamples);
        }
        if bins == 0 {
            return Err(WalkError::ZeroBins);
        }

        let (mut lo, mut hi) = samples
            .iter()
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &x| {
                (lo.min(x), hi.max(x))
            });
        if lo == hi {
            lo -= 0.5;
            hi += 0.5;
        }

        let width = (hi - lo) / bins as f64;
        let edges: Vec<f64> = (0..=bins).map(|i| lo + i as f64 * width).collect();

        let mut counts = vec![0usize; bins];
        for &x in samples {
            let mut idx = (((x - lo) / width).floor() as usize).min(bins - 1);
            // the division can round across an edge; the edges decide
            while idx > 0 && x < edges[idx] {
                idx -= 1;
            }
            while idx < bins - 1 && x >= edges[idx + 1] {
                idx += 1;
            }
            counts[idx] += 1;
        }

        let norm = samples.len() as f64 * width;
        let heights = counts.into_iter().map(|c| c as f64 / norm).collect();

        Ok(Self { edges, heights })
    }

    /// `bins + 1` ascending bin edges.
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Density of each bin.
    pub fn heights(&self) -> &[f64] {
        &self.heights
    }

    pub fn bins(&self) -> usize {
        self.heights.len()
    }

    /// Total bar area; one up to rounding.
    pub fn area(&self) -> f64 {
        self.edges
            .windows(2)
            .zip(&self.heights)
            .map(|(e, h)| (e[1] - e[0]) * h)
            .sum()
    }
}
