use std::path::PathBuf;

use anyhow::Context as _;
use clap::{ArgAction, Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "slitscan", version)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Slice and stitch timelapse frames into a directional mosaic.
    Compose(ComposeArgs),
    /// Print the band partition for a canvas size as JSON.
    Plan(PlanArgs),
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Directory containing frames.
    directory: PathBuf,

    /// Total number of frames to use in the mosaic.
    #[arg(long)]
    total: usize,

    /// Sampling interval: 0 or 1 = every file; 2 = every other; etc.
    #[arg(long, default_value_t = 1)]
    interval: usize,

    /// Direction angle in degrees: 90=left->right, 270=right->left, 0=bottom->top, 180=top->bottom.
    #[arg(long, default_value_t = 90.0, allow_negative_numbers = true)]
    angle: f64,

    /// Output file path (extension respected if possible).
    #[arg(long, default_value = "output.png")]
    output: PathBuf,

    /// Resize frames whose dimensions differ from the first frame instead of failing.
    #[arg(long)]
    resize_mismatched: bool,

    /// Fill the canvas on a rayon thread pool.
    #[arg(long)]
    parallel: bool,

    /// Override rayon worker threads (parallel mode only).
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct PlanArgs {
    /// Canvas width in pixels.
    #[arg(long)]
    width: u32,

    /// Canvas height in pixels.
    #[arg(long)]
    height: u32,

    /// Number of frames (bands).
    #[arg(long)]
    total: usize,

    /// Direction angle in degrees.
    #[arg(long, default_value_t = 90.0, allow_negative_numbers = true)]
    angle: f64,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    match cli.cmd {
        Command::Compose(args) => cmd_compose(args),
        Command::Plan(args) => cmd_plan(args),
    }
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::INFO,
        2 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn cmd_compose(args: ComposeArgs) -> anyhow::Result<()> {
    let cfg = slitscan::RunConfig {
        input_dir: args.directory,
        total: args.total,
        interval: args.interval,
        angle_deg: args.angle,
        output: args.output,
        load: slitscan::LoadOpts {
            resize_mismatched: args.resize_mismatched,
        },
        composite: slitscan::CompositeOpts {
            parallel: args.parallel,
            threads: args.threads,
        },
    };

    let report = slitscan::run(&cfg)
        .with_context(|| format!("compose mosaic from '{}'", cfg.input_dir.display()))?;

    if report.written.fallback {
        eprintln!(
            "unrecognized extension; wrote PNG data to {}",
            report.written.path.display()
        );
    }
    eprintln!("wrote {}", report.written.path.display());
    Ok(())
}

fn cmd_plan(args: PlanArgs) -> anyhow::Result<()> {
    let plan = slitscan::plan_for_dimensions(args.width, args.height, args.angle, args.total)
        .context("partition canvas")?;
    let json = serde_json::to_string_pretty(&plan).context("serialize band plan")?;
    println!("{json}");
    Ok(())
}
