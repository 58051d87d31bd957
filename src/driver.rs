//! Zero-temperature Metropolis Monte Carlo driver.

use crate::error::{Result, SpinError};
use crate::spins::Lattice;
use crate::system::System;
use crate::vector::unit;
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use tracing::{debug, info};

/// Default perturbation scale.
pub const DEFAULT_ALPHA: f64 = 0.1;

/// Propose a new spin close to `s0`.
///
/// Each component of `s0` is shifted by an independent draw from
/// `[-alpha, alpha]` and the result is normalised. `alpha = 0` returns the
/// normalised `s0`.
pub fn random_spin<R: Rng + ?Sized>(s0: &Vector3<f64>, alpha: f64, rng: &mut R) -> Result<Vector3<f64>> {
    check_alpha(alpha)?;
    if s0.norm() == 0.0 {
        return Err(SpinError::DegenerateVector(
            "spin to perturb has zero norm".to_string(),
        ));
    }

    let component = Uniform::new_inclusive(-1.0, 1.0);
    let delta = Vector3::new(
        component.sample(rng),
        component.sample(rng),
        component.sample(rng),
    ) * alpha;

    unit(&(s0 + delta), "perturbed spin")
}

fn check_alpha(alpha: f64) -> Result<()> {
    if alpha.is_finite() && alpha >= 0.0 {
        Ok(())
    } else {
        Err(SpinError::InvalidInput(format!(
            "alpha must be a finite non-negative number, got {alpha}"
        )))
    }
}

/// Outcome of a [`Driver::drive`] run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DriveReport {
    pub iterations: usize,
    pub accepted: usize,
    pub initial_energy: f64,
    pub final_energy: f64,
}

impl DriveReport {
    pub fn rejected(&self) -> usize {
        self.iterations - self.accepted
    }

    pub fn acceptance_rate(&self) -> f64 {
        if self.iterations == 0 {
            return 0.0;
        }
        self.accepted as f64 / self.iterations as f64
    }
}

/// Runs the T=0 limit of the Metropolis algorithm: a random spin is nudged
/// and the move is kept only if it strictly lowers the total energy.
#[derive(Debug, Clone)]
pub struct Driver {
    alpha: f64,
    /// Log progress every `report_interval` iterations; 0 disables it
    report_interval: usize,
}

impl Default for Driver {
    fn default() -> Self {
        Driver {
            alpha: DEFAULT_ALPHA,
            report_interval: 0,
        }
    }
}

impl Driver {
    pub fn new(alpha: f64) -> Result<Self> {
        check_alpha(alpha)?;
        Ok(Driver {
            alpha,
            ..Default::default()
        })
    }

    pub fn set_report_interval(&mut self, interval: usize) {
        self.report_interval = interval;
    }

    pub fn alpha(&self) -> f64 {
        self.alpha
    }

    /// Run exactly `n` trial moves on `system`, mutating its lattice in
    /// place. `n = 0` leaves the lattice untouched.
    ///
    /// A trial spin that cannot be normalised aborts the run before it is
    /// written to the lattice.
    pub fn drive<L, R>(&self, system: &mut System<L>, n: usize, rng: &mut R) -> Result<DriveReport>
    where
        L: Lattice,
        R: Rng + ?Sized,
    {
        let initial_energy = system.energy();
        let mut e0 = initial_energy;
        let mut accepted = 0;

        for step in 0..n {
            let site = system.spins().random_site(rng);
            let s0 = system.spins().spin(site);
            let s1 = random_spin(&s0, self.alpha, rng)?;

            system.spins_mut().set_spin(site, s1);
            let e1 = system.energy();

            if e1 - e0 < 0.0 {
                e0 = e1;
                accepted += 1;
            } else {
                system.spins_mut().set_spin(site, s0);
            }

            if self.report_interval > 0 && (step + 1) % self.report_interval == 0 {
                info!(
                    "Step {:>10}: E = {:.10}, accepted {} ({:.2}%)",
                    step + 1,
                    e0,
                    accepted,
                    100.0 * accepted as f64 / (step + 1) as f64
                );
            }
        }

        debug!("Driver finished {} iterations, {} accepted", n, accepted);

        Ok(DriveReport {
            iterations: n,
            accepted,
            initial_energy,
            final_energy: e0,
        })
    }
}
