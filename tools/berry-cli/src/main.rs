//! 标注工具的命令行入口.

use clap::{Parser, Subcommand};
use log::LevelFilter;
use simple_logger::SimpleLogger;
use std::path::PathBuf;
use std::process::ExitCode;

mod report;
mod runner;

#[derive(Parser)]
#[command(name = "berry")]
#[command(version, about = "Seabed stroke annotation tools", long_about = None)]
struct Cli {
    /// Configuration file (JSON)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Print debug logs
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Rasterize a stroke record into a class matrix
    Rasterize {
        /// Stroke record (`<prefix>_annot.json`)
        #[arg(value_name = "STROKES")]
        strokes: PathBuf,

        /// Full-resolution height
        #[arg(long, value_name = "PIXELS")]
        height: usize,

        /// Full-resolution width
        #[arg(long, value_name = "PIXELS")]
        width: usize,

        /// Output `.npy` (default: `<prefix>_output.npy` next to the record)
        #[arg(short, long, value_name = "FILE")]
        out: Option<PathBuf>,

        /// Also write a color-coded PNG
        #[arg(long, value_name = "FILE")]
        png: Option<PathBuf>,
    },

    /// Normalize a layer for display and write it as a grayscale PNG
    Normalize {
        /// Layer file (`.npy` or `.tif`)
        #[arg(value_name = "LAYER")]
        layer: PathBuf,

        /// Output PNG
        #[arg(short, long, value_name = "FILE")]
        out: PathBuf,

        /// Upper clipping percentile (0-100)
        #[arg(short, long, value_name = "PERCENT", default_value = "100")]
        quantile: u8,

        /// Apply a log transform first
        #[arg(long)]
        log: bool,
    },

    /// List the sonar, bathy and tri layers sharing a file prefix
    Discover {
        /// Any one of the layer files
        #[arg(value_name = "FILE")]
        selected: PathBuf,
    },

    /// Re-rasterize an existing session and save both outputs
    Resave {
        /// Any one of the layer files
        #[arg(value_name = "FILE")]
        selected: PathBuf,

        /// Output directory (default: config, `$SONAR_BERRY_OUTPUT_DIR` or `$HOME/annotations`)
        #[arg(short, long, value_name = "DIR")]
        out_dir: Option<PathBuf>,
    },
}

fn run(cli: Cli) -> runner::RunResult {
    let config = runner::config_or_default(cli.config.as_deref())?;
    match cli.command {
        Commands::Rasterize {
            strokes,
            height,
            width,
            out,
            png,
        } => runner::run_rasterize(&strokes, (height, width), &config, out, png),
        Commands::Normalize {
            layer,
            out,
            quantile,
            log,
        } => runner::run_normalize(&layer, &out, quantile, log, &config),
        Commands::Discover { selected } => runner::run_discover(&selected),
        Commands::Resave { selected, out_dir } => {
            let out_dir = out_dir
                .or_else(|| config.resolved_output_dir())
                .ok_or("cannot determine an output directory")?;
            runner::run_resave(&selected, &out_dir, &config)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let level = if cli.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    SimpleLogger::new().with_level(level).init().ok();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
