mod cli;
mod logging;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use pearson::{LogSink, RunConfig, Typeface, WindowSink};

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let config = RunConfig::new()
        .with_steps(cli.steps)
        .with_walks(cli.walks)
        .with_seed((!cli.unseeded).then_some(cli.seed))
        .with_max_walks(cli.max_walks)
        .with_bins(cli.bins)
        .with_window_size(cli.width, cli.height)
        .with_font(cli.font);
    config.validate().context("invalid arguments")?;

    if cli.headless {
        let mut sink = LogSink::new();
        pearson::run(&config, &mut sink).context("headless run failed")?;
        info!(charts = sink.rendered(), "done");
        return Ok(());
    }

    let typeface = match config.font() {
        Some(path) => Some(
            Typeface::load(path)
                .with_context(|| format!("failed to load font {}", path.display()))?,
        ),
        None => {
            let found = Typeface::find_system();
            if found.is_none() {
                warn!("no system font found; titles and labels will be omitted");
            }
            found
        }
    };
    if let Some(face) = &typeface {
        info!(font = %face.path().display(), "drawing labels");
    }

    let mut sink = WindowSink::new(config.layout(), typeface).context("failed to open display")?;
    pearson::run(&config, &mut sink).context("plotting failed")?;
    Ok(())
}
