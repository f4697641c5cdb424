//! CLI argument definitions and shared statics.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;
use std::sync::OnceLock;

/// Whether the user asked for JSON output (controls structured error output).
pub static JSON_MODE: OnceLock<bool> = OnceLock::new();

pub const DEFAULT_CONFIG: &str = "etc/sysid_config.toml";

#[derive(Parser, Debug)]
#[command(
    name = "sysid",
    version,
    about = "Identify feedforward gains (kS, kV, kA) from actuator sample logs"
)]
pub struct Cli {
    /// Path to config TOML (typed). A missing default file means built-in defaults.
    #[arg(long, value_name = "FILE", default_value = DEFAULT_CONFIG)]
    pub config: PathBuf,

    /// Print results and errors as JSON; log as JSON lines
    #[arg(long, action = ArgAction::SetTrue)]
    pub json: bool,

    /// Console log level (error|warn|info|debug|trace)
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    pub log_level: String,

    /// Command to execute
    #[command(subcommand)]
    pub cmd: Commands,
}

/// Term selection shared by every command that fits a model.
#[derive(clap::Args, Debug, Clone)]
pub struct ModelArgs {
    /// Sample log CSV (Timestamp,Voltage,Velocity[,Acceleration])
    #[arg(long, value_name = "FILE")]
    pub samples: PathBuf,
    /// Drop the kS*sign(v) term
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_static_friction: bool,
    /// Drop the kA*a term
    #[arg(long, action = ArgAction::SetTrue)]
    pub no_acceleration: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fit the feedforward model and print the report
    Identify {
        #[command(flatten)]
        model: ModelArgs,
        /// Also write the recorded samples to this CSV
        #[arg(long, value_name = "FILE")]
        export: Option<PathBuf>,
    },
    /// Fit the model, then predict the voltage for a velocity/acceleration
    Predict {
        #[command(flatten)]
        model: ModelArgs,
        /// Target velocity
        #[arg(long, allow_negative_numbers = true)]
        velocity: f64,
        /// Target acceleration
        #[arg(long, default_value_t = 0.0, allow_negative_numbers = true)]
        acceleration: f64,
    },
}
