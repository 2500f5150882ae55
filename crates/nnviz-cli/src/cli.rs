//! CLI argument definitions for `nnviz`.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use nnviz_model::ArchitectureKind;

#[derive(Parser)]
#[command(
    name = "nnviz",
    version,
    about = "Neural network architecture visualizer - drive the state store from the terminal",
    long_about = "Drive the neural network visualizer's state store without a renderer.\n\n\
                  Lists the built-in architecture templates, prints the generated Keras \
                  program and parameter summary, runs the simulated training loop and \
                  replays scripted edit sessions."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Store settings file (TOML).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the built-in architecture templates.
    Templates,

    /// Print the generated Keras program for an architecture.
    Code(ArchArgs),

    /// Print the layer table with output shapes and parameter counts.
    Params(ArchArgs),

    /// Run the simulated training loop and print the learning curves.
    Simulate(SimulateArgs),

    /// Print the full store snapshot as JSON.
    Snapshot(ArchArgs),

    /// Apply a JSON list of store actions, then print the summary.
    Apply(ApplyArgs),
}

#[derive(Args)]
pub struct ArchArgs {
    /// Architecture template to load (default: the configured initial one).
    #[arg(long = "arch", value_name = "KIND")]
    pub arch: Option<ArchitectureKind>,
}

#[derive(Args)]
pub struct SimulateArgs {
    #[command(flatten)]
    pub arch: ArchArgs,

    /// Number of epochs to simulate (default: the configured epoch count).
    #[arg(long = "epochs", value_name = "N")]
    pub epochs: Option<u32>,

    /// Seed for the simulator noise, for reproducible curves.
    #[arg(long = "seed", value_name = "N")]
    pub seed: Option<u64>,
}

#[derive(Args)]
pub struct ApplyArgs {
    /// Script file holding a JSON array of actions.
    #[arg(value_name = "SCRIPT")]
    pub script: PathBuf,

    /// Also print the snapshot JSON after the summary.
    #[arg(long = "snapshot")]
    pub snapshot: bool,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
