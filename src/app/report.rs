use mcsim::{DriveReport, Lattice, System};
use tracing::info;

pub fn report_lattice<L: Lattice>(kind: &str, system: &System<L>) {
    let (nx, ny) = system.spins().dims();
    info!(
        "Lattice: {} {} x {} ({} spins, {} bonds)",
        kind,
        nx,
        ny,
        system.spins().n_sites(),
        system.spins().bonds().len()
    );
    let b = system.field();
    let u = system.anisotropy_axis();
    info!("  B = [{:+.6}, {:+.6}, {:+.6}]", b.x, b.y, b.z);
    info!(
        "  K = {:.6}, u = [{:+.6}, {:+.6}, {:+.6}]",
        system.anisotropy_constant(),
        u.x,
        u.y,
        u.z
    );
    info!(
        "  J = {:.6}, D = {:.6}",
        system.exchange_constant(),
        system.dmi_constant()
    );
}

pub fn report_summary<L: Lattice>(system: &System<L>, report: &DriveReport) {
    info!("\nMonte Carlo relaxation finished.");
    info!(
        "  Iterations: {} ({} accepted, {} rejected, {:.2}%)",
        report.iterations,
        report.accepted,
        report.rejected(),
        100.0 * report.acceptance_rate()
    );
    info!("  Initial energy: {:.10}", report.initial_energy);
    info!("  Final energy:   {:.10}", report.final_energy);

    let terms = system.terms();
    info!("\nEnergy terms:");
    info!("  Zeeman:     {:.10}", terms.zeeman);
    info!("  Anisotropy: {:.10}", terms.anisotropy);
    info!("  Exchange:   {:.10}", terms.exchange);
    info!("  DMI:        {:.10}", terms.dmi);

    let mean = system.spins().mean();
    info!(
        "\nMean spin: [{:+.6}, {:+.6}, {:+.6}] |m| = {:.6}",
        mean.x,
        mean.y,
        mean.z,
        mean.norm()
    );
}
