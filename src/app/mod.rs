mod report;
mod runner;

pub use runner::{build_honeycomb, build_square, run_simulation};

use self::report::{report_lattice, report_summary};
use color_eyre::eyre::{bail, Result, WrapErr};
use mcsim::config::{Args, Config, LatticeKind};
use mcsim::io::setup_output;
use mcsim::spins::Boundary;
use clap::Parser;
use std::path::Path;
use tracing::info;

pub struct SimApplication {
    args: Args,
    config: Config,
}

impl SimApplication {
    pub fn from_cli() -> Result<Self> {
        let args = Args::parse();
        let mut config = load_config(&args)?;
        config.apply_args(&args);
        Ok(Self { args, config })
    }

    pub fn run(self) -> Result<()> {
        let log_path = self.args.output.as_deref().map(Path::new);
        setup_output(log_path)
            .wrap_err_with(|| format!("Unable to create output file: {}", self.args.output.as_deref().unwrap_or("")))?;
        info!("Configuration loaded:\n{:?}", self.config);

        match self.config.lattice_kind() {
            LatticeKind::Square => {
                let mut system = build_square(&self.config)?;
                report_lattice("square", &system);
                let report = run_simulation(&mut system, &self.config)?;
                report_summary(&system, &report);
                self.write_spins(system.spins())?;
            }
            LatticeKind::Honeycomb => {
                if self.config.boundary() == Boundary::Periodic {
                    bail!("periodic boundaries are only available on the square lattice");
                }
                let mut system = build_honeycomb(&self.config)?;
                report_lattice("honeycomb", &system);
                let report = run_simulation(&mut system, &self.config)?;
                report_summary(&system, &report);
                self.write_spins(system.spins())?;
            }
        }

        Ok(())
    }

    fn write_spins<L: mcsim::Lattice>(&self, lattice: &L) -> Result<()> {
        if let Some(ref path) = self.args.spins_out {
            let mut file = std::fs::File::create(path)
                .wrap_err_with(|| format!("Unable to create spin output file: {}", path))?;
            mcsim::io::write_spins(&mut file, lattice)?;
            info!("Final spin configuration written to: {}", path);
        }
        Ok(())
    }
}

fn load_config(args: &Args) -> Result<Config> {
    let config_content = std::fs::read_to_string(&args.config_file)
        .wrap_err_with(|| format!("Unable to read configuration file: {}", args.config_file))?;

    Config::from_yaml(&config_content).wrap_err("Failed to parse configuration file")
}
