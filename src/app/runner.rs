use color_eyre::eyre::{Result, WrapErr};
use mcsim::config::Config;
use mcsim::spins::dims_from_slice;
use mcsim::vector::vector_from_slice;
use mcsim::{DriveReport, Driver, HoneycombSpins, Lattice, Spins, System};
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

pub fn build_square(config: &Config) -> Result<System<Spins>> {
    let n = dims_from_slice(config.dims())?;
    let value = vector_from_slice(config.initial_value(), "initial spin value")?;
    let spins = Spins::with_boundary(n, value, config.boundary())?;
    build_system(spins, config)
}

pub fn build_honeycomb(config: &Config) -> Result<System<HoneycombSpins>> {
    let spins = HoneycombSpins::from_slices(config.dims(), config.initial_value())?;
    build_system(spins, config)
}

fn build_system<L: Lattice>(spins: L, config: &Config) -> Result<System<L>> {
    let system = System::from_slices(
        spins,
        config.field(),
        config.anisotropy_constant(),
        config.anisotropy_axis(),
        config.exchange_constant(),
        config.dmi_constant(),
    )?;
    Ok(system.with_parallel(config.is_parallel()))
}

/// Randomise the lattice if requested, then drive it for the configured
/// number of iterations.
pub fn run_simulation<L: Lattice>(system: &mut System<L>, config: &Config) -> Result<DriveReport> {
    let mut rng = match config.seed() {
        Some(seed) => {
            info!("Seeding random number generator with {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    if config.randomise() {
        info!("Randomising initial spin configuration");
        system.spins_mut().randomise(&mut rng);
    }

    let mut driver = Driver::new(config.alpha())?;
    driver.set_report_interval(config.report_interval());

    let n = config.iterations();
    if n == 0 {
        info!("Zero iterations requested, lattice left unchanged");
    }

    info!("\nStarting Monte Carlo relaxation: {} iterations, alpha = {}", n, driver.alpha());
    driver
        .drive(system, n, &mut rng)
        .wrap_err("Monte Carlo relaxation failed")
}
