//! Run configuration.

use std::path::{Path, PathBuf};

use crate::error::WalkError;
use crate::layout::PlotLayout;
use crate::plots::{DEFAULT_BINS, DEFAULT_MAX_WALKS};

/// Steps per walk in the default run.
pub const DEFAULT_STEPS: usize = 1_000;
/// Number of walks in the default run.
pub const DEFAULT_WALKS: usize = 5_000;
/// Seed of the default run.
pub const DEFAULT_SEED: u64 = 42;

/// Parameters of one simulate-and-plot run.
///
/// # Example
///
/// ```
/// use pearson::RunConfig;
///
/// let config = RunConfig::new()
///     .with_steps(100)
///     .with_walks(10)
///     .with_seed(Some(7));
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    n_steps: usize,
    n_walks: usize,
    seed: Option<u64>,
    max_walks: usize,
    bins: usize,
    width: f64,
    height: f64,
    font: Option<PathBuf>,
}

impl RunConfig {
    /// Defaults: 1000 steps, 5000 walks, seed 42, 20 paths shown, 30 bins,
    /// 800 x 600 windows, system font.
    pub fn new() -> Self {
        let layout = PlotLayout::default();
        Self {
            n_steps: DEFAULT_STEPS,
            n_walks: DEFAULT_WALKS,
            seed: Some(DEFAULT_SEED),
            max_walks: DEFAULT_MAX_WALKS,
            bins: DEFAULT_BINS,
            width: layout.width,
            height: layout.height,
            font: None,
        }
    }

    pub fn with_steps(mut self, n_steps: usize) -> Self {
        self.n_steps = n_steps;
        self
    }

    pub fn with_walks(mut self, n_walks: usize) -> Self {
        self.n_walks = n_walks;
        self
    }

    /// `None` seeds from the operating system.
    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_max_walks(mut self, max_walks: usize) -> Self {
        self.max_walks = max_walks;
        self
    }

    pub fn with_bins(mut self, bins: usize) -> Self {
        self.bins = bins;
        self
    }

    pub fn with_window_size(mut self, width: f64, height: f64) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_font(mut self, font: Option<PathBuf>) -> Self {
        self.font = font;
        self
    }

    pub fn n_steps(&self) -> usize {
        self.n_steps
    }

    pub fn n_walks(&self) -> usize {
        self.n_walks
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    pub fn max_walks(&self) -> usize {
        self.max_walks
    }

    pub fn bins(&self) -> usize {
        self.bins
    }

    pub fn font(&self) -> Option<&Path> {
        self.font.as_deref()
    }

    /// Window layout for the configured size.
    pub fn layout(&self) -> PlotLayout {
        PlotLayout::new()
            .with_width(self.width)
            .with_height(self.height)
    }

    /// Rejects zero-sized simulations, zero bins and windows too small to
    /// hold the axes.
    pub fn validate(&self) -> Result<(), WalkError> {
        let invalid = |reason: String| Err(WalkError::InvalidConfig { reason });
        if self.n_steps < 1 {
            return invalid("steps must be at least 1".to_string());
        }
        if self.n_walks < 1 {
            return invalid("walks must be at least 1".to_string());
        }
        if self.bins < 1 {
            return invalid("bins must be at least 1".to_string());
        }
        let padding = PlotLayout::default().padding;
        let min_width = padding.left + padding.right + 1.0;
        let min_height = padding.top + padding.bottom + 1.0;
        if !self.width.is_finite() || self.width < min_width {
            return invalid(format!(
                "window width {} is below the minimum of {min_width}",
                self.width
            ));
        }
        if !self.height.is_finite() || self.height < min_height {
            return invalid(format!(
                "window height {} is below the minimum of {min_height}",
                self.height
            ));
        }
        Ok(())
    }
}

impl Default for RunConfig {
    fn default() -> Self {
        Self::new()
    }
}
