//! The full run: simulate, accumulate, then the three plots.

use tracing::info;

use crate::{
    accumulate::cumulative_positions,
    chart::ChartSink,
    config::RunConfig,
    error::WalkError,
    matrix::PositionMatrix,
    plots::{PlotError, plot_final_positions_binned, plot_variance_growth, plot_walks},
    simulate::{rng_from_seed, simulate_walks},
};

/// Simulates the configured walks and returns their positions.
pub fn simulate_positions(config: &RunConfig) -> Result<PositionMatrix, WalkError> {
    config.validate()?;
    let mut rng = rng_from_seed(config.seed());
    let steps = simulate_walks(config.n_steps(), config.n_walks(), &mut rng)?;
    let positions = cumulative_positions(&steps);
    info!(
        n_walks = positions.n_walks(),
        n_steps = positions.n_steps(),
        seed = ?config.seed(),
        "walks simulated"
    );
    Ok(positions)
}

/// Simulates, then shows the sample paths, final-position histogram and
/// variance growth, in that order. Returns the positions that were plotted.
pub fn run<S: ChartSink>(
    config: &RunConfig,
    sink: &mut S,
) -> Result<PositionMatrix, PlotError<S::Error>> {
    let positions = simulate_positions(config)?;

    plot_walks(sink, &positions, config.max_walks()).map_err(PlotError::Sink)?;
    plot_final_positions_binned(sink, &positions, config.bins())?;
    plot_variance_growth(sink, &positions).map_err(PlotError::Sink)?;

    Ok(positions)
}
