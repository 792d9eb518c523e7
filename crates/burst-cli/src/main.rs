//! Burst CLI - run and inspect particle burst effects without a renderer

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{diff, presets, simulate};

#[derive(Parser)]
#[command(name = "burst")]
#[command(about = "Headless driver for spring-physics burst effects", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List built-in presets (or the effects of a config file)
    Presets {
        /// Effects file with [effects.<name>] tables
        #[arg(long)]
        config: Option<String>,
    },

    /// Simulate an effect frame by frame with a synthetic clock
    Simulate {
        /// Preset or effect name
        #[arg(long, default_value = "rise")]
        preset: String,

        /// Effects file with [effects.<name>] tables
        #[arg(long)]
        config: Option<String>,

        /// Number of impulses to deliver
        #[arg(long, default_value = "1")]
        impulses: u32,

        /// Frames between impulses
        #[arg(long, default_value = "10")]
        interval: u32,

        /// Launch velocity carried by each impulse
        #[arg(long)]
        velocity: Option<f32>,

        /// Display refresh rate in Hz
        #[arg(long, default_value = "60")]
        fps: f64,

        /// Give up after this many frames
        #[arg(long, default_value = "1200")]
        max_frames: u32,

        /// First particle identity (identities are sequential from here)
        #[arg(long, default_value = "1")]
        seed: u128,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },

    /// Show which particles a reaction-map change would spawn
    Diff {
        /// Previous reaction map (TOML `[entity] reaction = count`, or a
        /// `.json` file of `{"entity": {"reaction": count}}`)
        old: String,

        /// New reaction map, same formats
        new: String,

        /// Preset or effect name
        #[arg(long, default_value = "reactions")]
        preset: String,

        /// Effects file with [effects.<name>] tables
        #[arg(long)]
        config: Option<String>,

        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();

    match cli.command {
        Commands::Presets { config } => presets::run(config.as_deref()),
        Commands::Simulate {
            preset,
            config,
            impulses,
            interval,
            velocity,
            fps,
            max_frames,
            seed,
            format,
        } => simulate::run(simulate::SimulateArgs {
            preset,
            config,
            impulses,
            interval,
            velocity,
            fps,
            max_frames,
            seed,
            format,
        }),
        Commands::Diff {
            old,
            new,
            preset,
            config,
            format,
        } => diff::run(&old, &new, &preset, config.as_deref(), &format),
    }
}
