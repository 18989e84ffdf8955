//! Symmetric one-dimensional random walks and their diagnostic plots.
//!
//! ```text
//!  ┌──────────┐    ┌────────────┐    ┌───────────────────────────────┐
//!  │ simulate │───▶│ accumulate │───▶│ plots (paths, final, variance)│──▶ ChartSink
//!  └──────────┘    └────────────┘    └───────────────────────────────┘
//! ```
//!
//! ```rust
//! use pearson::{cumulative_positions, rng_from_seed, simulate_walks, variance_by_step};
//!
//! let steps = simulate_walks(100, 50, &mut rng_from_seed(Some(42))).unwrap();
//! let positions = cumulative_positions(&steps);
//!
//! assert_eq!(positions.shape(), (50, 101));
//! assert_eq!(variance_by_step(&positions)[0], 0.0);
//! ```

pub mod accumulate;
pub mod chart;
pub mod config;
pub mod error;
pub mod layout;
pub mod matrix;
pub mod pipeline;
pub mod plots;
mod scene;
pub mod simulate;
pub mod stats;
pub mod text;
mod winit;

pub use accumulate::cumulative_positions;
pub use chart::{Chart, ChartSink, DataLayer, LogSink};
pub use config::RunConfig;
pub use error::{DisplayError, WalkError};
pub use layout::{Bounds, Interval, Padding, PlotLayout};
pub use matrix::{PositionMatrix, StepMatrix};
pub use pipeline::{run, simulate_positions};
pub use plots::{
    PlotError, final_positions_chart, plot_final_positions, plot_final_positions_binned,
    plot_variance_growth, plot_walks, variance_growth_chart, walks_chart,
};
pub use simulate::{rng_from_seed, simulate_walks};
pub use stats::{Histogram, final_positions, variance_by_step};
pub use text::Typeface;
pub use self::winit::WindowSink;
