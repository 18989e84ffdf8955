use std::path::PathBuf;

use clap::Parser;

use pearson::config::{DEFAULT_SEED, DEFAULT_STEPS, DEFAULT_WALKS};
use pearson::plots::{DEFAULT_BINS, DEFAULT_MAX_WALKS};

/// Simulate symmetric random walks and plot their paths, final positions
/// and variance growth.
#[derive(Parser, Debug)]
#[command(name = "pearson", version, about = "Symmetric random walk diagnostics")]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Steps per walk.
    #[arg(long, default_value_t = DEFAULT_STEPS)]
    pub steps: usize,

    /// Number of walks.
    #[arg(long, default_value_t = DEFAULT_WALKS)]
    pub walks: usize,

    /// Generator seed.
    #[arg(long, default_value_t = DEFAULT_SEED, conflicts_with = "unseeded")]
    pub seed: u64,

    /// Seed from the operating system instead (results are not reproducible).
    #[arg(long)]
    pub unseeded: bool,

    /// Sample paths drawn in the first plot.
    #[arg(long, default_value_t = DEFAULT_MAX_WALKS)]
    pub max_walks: usize,

    /// Histogram bins for the final-position plot.
    #[arg(long, default_value_t = DEFAULT_BINS)]
    pub bins: usize,

    /// Window width in logical pixels.
    #[arg(long, default_value_t = 800.0)]
    pub width: f64,

    /// Window height in logical pixels.
    #[arg(long, default_value_t = 600.0)]
    pub height: f64,

    /// Font file for titles and labels (defaults to a system font).
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Log chart summaries instead of opening windows.
    #[arg(long)]
    pub headless: bool,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn no_flags_gives_defaults() {
        let cli = Cli::try_parse_from(["pearson"]).unwrap();
        assert_eq!(cli.steps, 1000);
        assert_eq!(cli.walks, 5000);
        assert_eq!(cli.seed, 42);
        assert!(!cli.unseeded);
        assert_eq!(cli.max_walks, 20);
        assert_eq!(cli.bins, 30);
        assert!(!cli.headless);
        assert_eq!(cli.verbose, 0);
    }

    #[test]
    fn overrides_parse() {
        let cli = Cli::try_parse_from([
            "pearson", "-vv", "--steps", "4", "--walks", "2", "--seed", "0", "--headless",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.steps, 4);
        assert_eq!(cli.walks, 2);
        assert_eq!(cli.seed, 0);
        assert!(cli.headless);
    }

    #[test]
    fn seed_conflicts_with_unseeded() {
        assert!(Cli::try_parse_from(["pearson", "--seed", "1", "--unseeded"]).is_err());
    }
}
