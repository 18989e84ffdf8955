//! The three diagnostic plots.
//!
//! Each plot has a pure builder that turns a [`PositionMatrix`] into a
//! [`Chart`], and a `plot_*` function that hands the chart to a sink.

use tracing::info;

use crate::{
    chart::{Chart, ChartSink, DataLayer, palette_color},
    error::WalkError,
    matrix::PositionMatrix,
    stats::{Histogram, final_positions, variance_by_step},
};

pub const WALKS_TITLE: &str = "Sample Random Walk Paths";
pub const FINAL_POSITIONS_TITLE: &str = "Distribution of Final Positions";
pub const VARIANCE_TITLE: &str = "Variance Growth of Random Walks";

/// Trajectories drawn by [`plot_walks`] unless told otherwise.
pub const DEFAULT_MAX_WALKS: usize = 20;
/// Histogram bins used by [`plot_final_positions`].
pub const DEFAULT_BINS: usize = 30;

const LINE_WIDTH: f64 = 1.0;

/// Error from a plot: either the data could not be summarised or the sink
/// failed.
#[derive(Debug, thiserror::Error)]
pub enum PlotError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Walk(#[from] WalkError),

    #[error("could not show chart: {0}")]
    Sink(#[source] E),
}

fn time_axis(positions: &PositionMatrix) -> Vec<f64> {
    (0..=positions.n_steps()).map(|t| t as f64).collect()
}

/// Chart of the first `min(max_walks, n_walks)` trajectories.
pub fn walks_chart(positions: &PositionMatrix, max_walks: usize) -> Chart {
    let xs = time_axis(positions);
    let n_plot = max_walks.min(positions.n_walks());
    (0..n_plot).fold(
        Chart::new(WALKS_TITLE)
            .with_x_label("Time step")
            .with_y_label("Position"),
        |chart, i| {
            chart.with_layer(DataLayer::Line {
                xs: xs.clone(),
                ys: positions.walk(i).iter().map(|&p| p as f64).collect(),
                color: palette_color(i),
                width: LINE_WIDTH,
            })
        },
    )
}

/// Density histogram of final positions over `bins` bins.
///
/// # Errors
///
/// [`WalkError::ZeroBins`] when `bins == 0`.
pub fn final_positions_chart(positions: &PositionMatrix, bins: usize) -> Result<Chart, WalkError> {
    let histogram = Histogram::density(&final_positions(positions), bins)?;
    let xs = histogram
        .edges()
        .windows(2)
        .map(|e| (e[0], e[1]))
        .collect();
    Ok(Chart::new(FINAL_POSITIONS_TITLE)
        .with_x_label("Final position")
        .with_y_label("Density")
        .with_layer(DataLayer::Bar {
            xs,
            ys: histogram.heights().to_vec(),
            color: palette_color(0),
        }))
}

/// Population variance of position at each time step.
pub fn variance_growth_chart(positions: &PositionMatrix) -> Chart {
    Chart::new(VARIANCE_TITLE)
        .with_x_label("Time step")
        .with_y_label("Variance")
        .with_layer(DataLayer::Line {
            xs: time_axis(positions),
            ys: variance_by_step(positions),
            color: palette_color(0),
            width: LINE_WIDTH,
        })
}

/// Shows up to `max_walks` sample paths. Asking for more walks than exist
/// shows them all.
pub fn plot_walks<S: ChartSink>(
    sink: &mut S,
    positions: &PositionMatrix,
    max_walks: usize,
) -> Result<(), S::Error> {
    let chart = walks_chart(positions, max_walks);
    info!(
        shown = chart.data_layers.len(),
        n_walks = positions.n_walks(),
        "plotting sample paths"
    );
    sink.render(&chart)
}

/// Shows the density histogram of final positions with [`DEFAULT_BINS`] bins.
pub fn plot_final_positions<S: ChartSink>(
    sink: &mut S,
    positions: &PositionMatrix,
) -> Result<(), PlotError<S::Error>> {
    plot_final_positions_binned(sink, positions, DEFAULT_BINS)
}

/// As [`plot_final_positions`] with a chosen bin count.
pub fn plot_final_positions_binned<S: ChartSink>(
    sink: &mut S,
    positions: &PositionMatrix,
    bins: usize,
) -> Result<(), PlotError<S::Error>> {
    let chart = final_positions_chart(positions, bins)?;
    info!(bins, "plotting final position distribution");
    sink.render(&chart).map_err(PlotError::Sink)
}

/// Shows how the variance across walks grows with time.
pub fn plot_variance_growth<S: ChartSink>(
    sink: &mut S,
    positions: &PositionMatrix,
) -> Result<(), S::Error> {
    let chart = variance_growth_chart(positions);
    info!(n_steps = positions.n_steps(), "plotting variance growth");
    sink.render(&chart)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use ndarray::array;
    use std::convert::Infallible;

    #[derive(Default)]
    struct Recorder {
        charts: Vec<Chart>,
    }

    impl ChartSink for Recorder {
        type Error = Infallible;

        fn render(&mut self, chart: &Chart) -> Result<(), Infallible> {
            self.charts.push(chart.clone());
            Ok(())
        }
    }

    fn positions() -> PositionMatrix {
        PositionMatrix::from_array(array![[0, 1, 0, 1, 2], [0, -1, -2, -1, -2], [0, 1, 2, 3, 4]])
            .unwrap()
    }

    fn line_ys(layer: &DataLayer) -> &[f64] {
        match layer {
            DataLayer::Line { ys, .. } => ys,
            DataLayer::Bar { .. } => panic!("expected a line"),
        }
    }

    #[test]
    fn walks_chart_labels() {
        let chart = walks_chart(&positions(), 20);
        assert_eq!(chart.title, "Sample Random Walk Paths");
        assert_eq!(chart.x_label, "Time step");
        assert_eq!(chart.y_label, "Position");
    }

    #[test]
    fn walks_chart_caps_at_max() {
        let chart = walks_chart(&positions(), 2);
        assert_eq!(chart.data_layers.len(), 2);
        assert_eq!(line_ys(&chart.data_layers[1]), &[0.0, -1.0, -2.0, -1.0, -2.0]);
    }

    #[test]
    fn walks_chart_more_than_available() {
        let chart = walks_chart(&positions(), 100);
        assert_eq!(chart.data_layers.len(), 3);
        match &chart.data_layers[2] {
            DataLayer::Line { xs, ys, .. } => {
                assert_eq!(xs, &vec![0.0, 1.0, 2.0, 3.0, 4.0]);
                assert_eq!(ys, &vec![0.0, 1.0, 2.0, 3.0, 4.0]);
            }
            DataLayer::Bar { .. } => panic!("expected a line"),
        }
    }

    #[test]
    fn walks_chart_zero_max_is_empty() {
        let chart = walks_chart(&positions(), 0);
        assert!(chart.data_layers.is_empty());
        assert!(chart.data_bounds().is_none());
    }

    #[test]
    fn final_positions_chart_is_density() {
        let chart = final_positions_chart(&positions(), 30).unwrap();
        assert_eq!(chart.title, "Distribution of Final Positions");
        assert_eq!(chart.x_label, "Final position");
        assert_eq!(chart.y_label, "Density");
        assert_eq!(chart.data_layers.len(), 1);
        match &chart.data_layers[0] {
            DataLayer::Bar { xs, ys, .. } => {
                assert_eq!(xs.len(), 30);
                assert_eq!(ys.len(), 30);
                assert_abs_diff_eq!(xs[0].0, -2.0);
                assert_abs_diff_eq!(xs[29].1, 4.0, epsilon = 1e-12);
                let area: f64 = xs.iter().zip(ys).map(|(&(a, b), h)| (b - a) * h).sum();
                assert_abs_diff_eq!(area, 1.0, epsilon = 1e-9);
            }
            DataLayer::Line { .. } => panic!("expected bars"),
        }
    }

    #[test]
    fn final_positions_chart_zero_bins() {
        let err = final_positions_chart(&positions(), 0).unwrap_err();
        assert_eq!(err, WalkError::ZeroBins);
    }

    #[test]
    fn variance_chart_values() {
        let chart = variance_growth_chart(&positions());
        assert_eq!(chart.title, "Variance Growth of Random Walks");
        assert_eq!(chart.x_label, "Time step");
        assert_eq!(chart.y_label, "Variance");
        let ys = line_ys(&chart.data_layers[0]);
        assert_eq!(ys.len(), 5);
        assert_eq!(ys[0], 0.0);
        // step 1: [1, -1, 1] -> mean 1/3, var 8/9
        assert_abs_diff_eq!(ys[1], 8.0 / 9.0, epsilon = 1e-12);
    }

    #[test]
    fn plots_reach_sink_in_order() {
        let mut sink = Recorder::default();
        let p = positions();
        plot_walks(&mut sink, &p, DEFAULT_MAX_WALKS).unwrap();
        plot_final_positions(&mut sink, &p).unwrap();
        plot_variance_growth(&mut sink, &p).unwrap();
        let titles: Vec<&str> = sink.charts.iter().map(|c| c.title.as_str()).collect();
        assert_eq!(titles, vec![WALKS_TITLE, FINAL_POSITIONS_TITLE, VARIANCE_TITLE]);
    }

    #[test]
    fn sink_error_is_wrapped() {
        #[derive(Debug, thiserror::Error)]
        #[error("no display")]
        struct NoDisplay;

        struct Broken;
        impl ChartSink for Broken {
            type Error = NoDisplay;
            fn render(&mut self, _: &Chart) -> Result<(), NoDisplay> {
                Err(NoDisplay)
            }
        }

        let err = plot_final_positions(&mut Broken, &positions()).unwrap_err();
        assert!(matches!(err, PlotError::Sink(NoDisplay)));
        assert_eq!(err.to_string(), "could not show chart: no display");
        assert!(plot_walks(&mut Broken, &positions(), 1).is_err());
    }
}
