//! Command-line argument parsing for Monte Carlo runs

use clap::Parser;

/// Zero-temperature Monte Carlo relaxation of a 2D spin lattice
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the YAML configuration file
    #[arg(short, long, default_value = "config.yaml")]
    pub config_file: String,

    /// Override the number of Monte Carlo iterations
    #[arg(short = 'n', long)]
    pub iterations: Option<usize>,

    /// Override the spin perturbation scale
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Override the random seed
    #[arg(long)]
    pub seed: Option<u64>,

    /// Evaluate the energy in parallel
    #[arg(long)]
    pub parallel: bool,

    /// Override output file: (default stdout)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Write the final spin configuration to this file
    #[arg(long)]
    pub spins_out: Option<String>,
}
