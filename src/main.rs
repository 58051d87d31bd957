//! Monte Carlo Command-Line Interface
//!
//! Entry point for relaxing a spin lattice from a YAML configuration.

use color_eyre::eyre::Result;

mod app;

use app::SimApplication;

fn main() -> Result<()> {
    color_eyre::install()?;
    SimApplication::from_cli()?.run()
}
