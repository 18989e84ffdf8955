//! Drawing symmetric ±1 increments.

use ndarray::Array2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::error::WalkError;
use crate::matrix::StepMatrix;

/// Builds the generator for a run.
///
/// `Some(seed)` gives a reproducible stream; `None` seeds from the operating
/// system.
pub fn rng_from_seed(seed: Option<u64>) -> StdRng {
    match seed {
        Some(s) => StdRng::seed_from_u64(s),
        None => StdRng::from_os_rng(),
    }
}

/// Simulates `n_walks` independent symmetric walks of `n_steps` steps each.
///
/// Every increment is an independent fair draw from {-1, +1}. Entries are
/// drawn walk by walk, so the same generator state and shape always give
/// the same matrix.
///
/// # Errors
///
/// Returns [`WalkError::EmptyShape`] if either count is zero.
#[tracing::instrument(skip(rng))]
pub fn simulate_walks(
    n_steps: usize,
    n_walks: usize,
    rng: &mut impl Rng,
) -> Result<StepMatrix, WalkError> {
    if n_steps == 0 || n_walks == 0 {
        return Err(WalkError::EmptyShape {
            walks: n_walks,
            steps: n_steps,
        });
    }
    let steps = Array2::from_shape_simple_fn((n_walks, n_steps), || {
        if rng.random::<bool>() { 1 } else { -1 }
    });
    debug!(n_walks, n_steps, "drew step increments");
    Ok(StepMatrix::from_array_unchecked(steps))
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn shape_is_walks_by_steps() {
        let mut rng = StdRng::seed_from_u64(7);
        let steps = simulate_walks(10, 3, &mut rng).unwrap();
        assert_eq!(steps.shape(), (3, 10));
    }

    #[test]
    fn entries_are_unit_steps() {
        let mut rng = StdRng::seed_from_u64(1);
        let steps = simulate_walks(200, 50, &mut rng).unwrap();
        assert!(steps.as_array().iter().all(|&v| v == 1 || v == -1));
    }

    #[test]
    fn deterministic_with_seed() {
        let a = simulate_walks(4, 2, &mut rng_from_seed(Some(0))).unwrap();
        let b = simulate_walks(4, 2, &mut rng_from_seed(Some(0))).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn seed_zero_stream_is_pinned() {
        // StdRng (ChaCha12) seeded with 0; a change here means the step
        // stream, and every seeded run, has changed
        let steps = simulate_walks(4, 2, &mut rng_from_seed(Some(0))).unwrap();
        assert_eq!(steps.as_array(), &array![[1, 1, 1, 1], [1, -1, 1, 1]]);
    }

    #[test]
    fn different_seeds_differ() {
        let a = simulate_walks(500, 4, &mut rng_from_seed(Some(1))).unwrap();
        let b = simulate_walks(500, 4, &mut rng_from_seed(Some(2))).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn roughly_balanced() {
        let mut rng = StdRng::seed_from_u64(42);
        let steps = simulate_walks(1000, 100, &mut rng).unwrap();
        let up = steps.as_array().iter().filter(|&&v| v == 1).count() as f64;
        let frac = up / 100_000.0;
        assert!((frac - 0.5).abs() < 0.01, "fraction of +1 steps: {frac}");
    }

    #[test]
    fn zero_steps_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = simulate_walks(0, 5, &mut rng).unwrap_err();
        assert_eq!(err, WalkError::EmptyShape { walks: 5, steps: 0 });
    }

    #[test]
    fn zero_walks_rejected() {
        let mut rng = StdRng::seed_from_u64(0);
        let err = simulate_walks(5, 0, &mut rng).unwrap_err();
        assert_eq!(err, WalkError::EmptyShape { walks: 0, steps: 5 });
    }

    #[test]
    fn unseeded_generator_produces_valid_steps() {
        let steps = simulate_walks(20, 2, &mut rng_from_seed(None)).unwrap();
        assert_eq!(steps.shape(), (2, 20));
    }
}
