use anyhow::{Context, Result};
use clap::Parser;
use cubolife_lib::app::{App, RunOptions};
use cubolife_lib::model::config::SimConfig;
use cubolife_lib::model::metrics::init_logging;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Custom config file path
    #[arg(short, long, default_value = "cubolife.toml")]
    config: String,

    /// Number of automaton ticks to run
    #[arg(short, long, default_value_t = 20)]
    ticks: u64,

    /// Simulated frames per second
    #[arg(long, default_value_t = 30)]
    fps: u32,

    /// RNG seed (overrides the config file)
    #[arg(long)]
    seed: Option<u64>,

    /// Shell count (overrides the config file)
    #[arg(long)]
    shells: Option<u32>,

    /// Vertex spacing (overrides the config file)
    #[arg(long)]
    spacing: Option<f64>,

    /// Keep running after every cell has died
    #[arg(long)]
    keep_running: bool,

    /// Print the final lattice snapshot as JSON
    #[arg(long)]
    json: bool,

    /// Log level used when RUST_LOG is unset
    #[arg(long, default_value = "info")]
    log_level: String,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(&args.log_level);

    let mut config = SimConfig::load(&args.config)?;
    if let Some(seed) = args.seed {
        config.seed = Some(seed);
    }
    if let Some(shells) = args.shells {
        config.structure.shells = shells;
    }
    if let Some(spacing) = args.spacing {
        config.structure.spacing = spacing;
    }

    let options = RunOptions {
        max_ticks: args.ticks,
        fps: args.fps,
        stop_on_extinction: !args.keep_running,
    };
    let mut app = App::new(config, options).context("starting simulation")?;
    let summary = app.run()?;

    if args.json {
        let snapshot = app.controller.snapshot();
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    } else {
        println!(
            "Ran {} ticks over {:.1}s simulated ({} frames)",
            summary.ticks, summary.simulated_seconds, summary.frames
        );
        println!(
            "{}/{} cells alive, {} births, {} deaths{}",
            summary.alive,
            summary.cells,
            summary.total_births,
            summary.total_deaths,
            if summary.extinct { ", extinct" } else { "" }
        );
    }

    Ok(())
}
