use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::{Parser, Subcommand};
use heatworld_common::Format;
use heatworld_kernel::{StepParams, World};
use heatworld_tools::{WorldInspector, WorldSpec};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(
    name = "heatworld",
    version,
    about = "Step, generate and inspect 2-D heat diffusion worlds"
)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print version info
    Info,
    /// Load a world, advance it by N steps of DT, and save it
    #[command(allow_negative_numbers = true)]
    Step {
        /// Time increment per step (large values are unstable)
        #[arg(default_value_t = StepParams::default().dt)]
        dt: f32,
        /// Number of steps
        #[arg(default_value_t = StepParams::default().iterations)]
        n: u32,
        /// Output format flag: 0 for text, anything else for binary
        #[arg(default_value_t = 0)]
        binary: u32,
        /// Read the world from this file instead of stdin
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Write the world to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Generate a world with a fixed border, heat sources and insulators
    Make {
        #[arg(long, default_value_t = WorldSpec::default().width)]
        width: u32,
        #[arg(long, default_value_t = WorldSpec::default().height)]
        height: u32,
        /// Diffusion coefficient
        #[arg(long, default_value_t = WorldSpec::default().alpha)]
        alpha: f32,
        /// Seed for feature placement
        #[arg(long, default_value_t = WorldSpec::default().seed)]
        seed: u64,
        /// Number of fixed heat sources
        #[arg(long, default_value_t = WorldSpec::default().sources)]
        sources: usize,
        /// Number of insulator cells
        #[arg(long, default_value_t = WorldSpec::default().insulators)]
        insulators: usize,
        /// Write the compact binary format
        #[arg(long)]
        binary: bool,
        /// Write the world to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Render a world as ASCII art
    Render {
        #[arg(short, long)]
        input: Option<PathBuf>,
    },
    /// Print a summary of a world
    Inspect {
        #[arg(short, long)]
        input: Option<PathBuf>,
        /// Emit the summary as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Info => {
            println!("heatworld v{}", env!("CARGO_PKG_VERSION"));
        }
        Commands::Step {
            dt,
            n,
            binary,
            input,
            output,
        } => {
            let mut world = read_world(input.as_deref())?;
            tracing::info!(w = world.width(), h = world.height(), "loaded world");

            let params = StepParams { dt, iterations: n };
            tracing::info!(dt, n, "stepping");
            world.step(params);

            write_world(output.as_deref(), &world, Format::from_flag(binary))?;
        }
        Commands::Make {
            width,
            height,
            alpha,
            seed,
            sources,
            insulators,
            binary,
            output,
        } => {
            let spec = WorldSpec {
                width,
                height,
                alpha,
                seed,
                sources,
                insulators,
            };
            let world = heatworld_tools::generate(&spec).context("failed to generate world")?;
            let format = if binary { Format::Binary } else { Format::Text };
            tracing::info!(width, height, seed, %format, "generated world");
            write_world(output.as_deref(), &world, format)?;
        }
        Commands::Render { input } => {
            let world = read_world(input.as_deref())?;
            let mut stdout = std::io::stdout().lock();
            stdout.write_all(heatworld_tools::render_ascii(&world).as_bytes())?;
            stdout.flush()?;
        }
        Commands::Inspect { input, json } => {
            let world = read_world(input.as_deref())?;
            let summary = WorldInspector::summary(&world);
            if json {
                println!("{}", serde_json::to_string_pretty(&summary)?);
            } else {
                println!("{summary}");
            }
        }
    }

    Ok(())
}

fn read_world(path: Option<&Path>) -> anyhow::Result<World> {
    match path {
        Some(path) => heatworld_persist::load_world_from_path(path)
            .with_context(|| format!("failed to load world from {}", path.display())),
        None => heatworld_persist::load_world(std::io::stdin().lock())
            .context("failed to load world from stdin"),
    }
}

fn write_world(path: Option<&Path>, world: &World, format: Format) -> anyhow::Result<()> {
    match path {
        Some(path) => heatworld_persist::save_world_to_path(path, world, format)
            .with_context(|| format!("failed to save world to {}", path.display())),
        None => {
            let stdout = std::io::BufWriter::new(std::io::stdout().lock());
            heatworld_persist::save_world(stdout, world, format)
                .context("failed to save world to stdout")
        }
    }
}
