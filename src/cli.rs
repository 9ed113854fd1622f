//! Command line interface for the housing price predictor
//!
//! Commands:
//! - `housing-predictor serve` - Run the HTTP prediction service (default)
//! - `housing-predictor predict` - Score one record from the command line
//! - `housing-predictor models` - Report which model artifacts load

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::AppConfig;

#[derive(Parser, Debug)]
#[command(name = "housing-predictor")]
#[command(author, version, about = "Serve property price predictions from pre-trained models")]
pub struct Cli {
    /// Directory containing default.toml and per-environment config files
    #[arg(long, global = true, default_value = "config", env = "HOUSING_CONFIG_DIR")]
    pub config_dir: PathBuf,

    /// Override the model artifact directory
    #[arg(long, global = true)]
    pub models_dir: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the HTTP prediction service
    Serve(ServeArgs),

    /// Run one record through all four models and print the response JSON
    Predict(PredictArgs),

    /// Load the model artifacts and report their status
    Models,
}

#[derive(Args, Debug, Default, Clone)]
pub struct ServeArgs {
    /// Bind address
    #[arg(long)]
    pub host: Option<String>,

    /// Listen port
    #[arg(short, long)]
    pub port: Option<u16>,
}

#[derive(Args, Debug, Clone)]
#[command(group(ArgGroup::new("source").required(true).args(["input", "file"])))]
pub struct PredictArgs {
    /// Record as inline JSON
    #[arg(long)]
    pub input: Option<String>,

    /// Path to a JSON file holding the record
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl Cli {
    /// Apply command line overrides on top of the loaded configuration
    pub fn apply_overrides(&self, config: &mut AppConfig) {
        if let Some(dir) = &self.models_dir {
            config.models.dir = dir.clone();
        }
        if let Some(Commands::Serve(args)) = &self.command {
            if let Some(host) = &args.host {
                config.server.host = host.clone();
            }
            if let Some(port) = args.port {
                config.server.port = port;
            }
        }
    }
}
