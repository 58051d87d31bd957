//! Energy model of a classical Heisenberg spin lattice.
//!
//! The total energy is the sum of four independent terms:
//!
//! ```text
//! E_z   = -Σ s · B
//! E_a   = -K Σ (s · û)^2
//! E_ex  = -J Σ_<p,q> s_p · s_q
//! E_dmi = -D (-Σ_<p,q> r̂_pq · (s_p × s_q))
//! ```
//!
//! where `<p,q>` runs over the nearest-neighbour bonds of the lattice, each
//! counted once, and `r̂_pq` is the bond direction.

use crate::error::Result;
use crate::spins::Lattice;
use crate::vector::{ensure_finite, unit, vector_from_slice};
use nalgebra::Vector3;
use rayon::prelude::*;

/// Individual contributions to the total energy.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EnergyTerms {
    pub zeeman: f64,
    pub anisotropy: f64,
    pub exchange: f64,
    pub dmi: f64,
}

impl EnergyTerms {
    pub fn total(&self) -> f64 {
        self.zeeman + self.anisotropy + self.exchange + self.dmi
    }
}

/// Spin lattice together with the physical parameters of the Hamiltonian.
#[derive(Debug, Clone)]
pub struct System<L: Lattice> {
    s: L,
    /// External magnetic field
    b: Vector3<f64>,
    /// Uniaxial anisotropy constant
    k: f64,
    /// Uniaxial anisotropy axis, unit length
    u: Vector3<f64>,
    /// Exchange constant
    j: f64,
    /// Dzyaloshinskii-Moriya constant
    d: f64,
    parallel: bool,
}

impl<L: Lattice> System<L> {
    /// Build a system around `s`.
    ///
    /// The anisotropy axis is normalised here; a zero axis is rejected.
    pub fn new(s: L, b: Vector3<f64>, k: f64, u: Vector3<f64>, j: f64, d: f64) -> Result<Self> {
        ensure_finite(&b, "magnetic field B")?;
        ensure_finite(&u, "anisotropy axis u")?;
        ensure_finite(&Vector3::new(k, j, d), "constants (K, J, D)")?;
        let u = unit(&u, "anisotropy axis u")?;

        Ok(Self {
            s,
            b,
            k,
            u,
            j,
            d,
            parallel: false,
        })
    }

    /// Same as [`System::new`] with field and axis given as slices.
    pub fn from_slices(s: L, b: &[f64], k: f64, u: &[f64], j: f64, d: f64) -> Result<Self> {
        let b = vector_from_slice(b, "magnetic field B")?;
        let u = vector_from_slice(u, "anisotropy axis u")?;
        Self::new(s, b, k, u, j, d)
    }

    /// Evaluate [`System::energy`] with rayon reductions.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn is_parallel(&self) -> bool {
        self.parallel
    }

    pub fn spins(&self) -> &L {
        &self.s
    }

    pub fn spins_mut(&mut self) -> &mut L {
        &mut self.s
    }

    pub fn into_spins(self) -> L {
        self.s
    }

    pub fn field(&self) -> Vector3<f64> {
        self.b
    }

    pub fn anisotropy_constant(&self) -> f64 {
        self.k
    }

    /// The normalised anisotropy axis.
    pub fn anisotropy_axis(&self) -> Vector3<f64> {
        self.u
    }

    pub fn exchange_constant(&self) -> f64 {
        self.j
    }

    pub fn dmi_constant(&self) -> f64 {
        self.d
    }

    /// Total energy of the system.
    pub fn energy(&self) -> f64 {
        if self.parallel {
            self.parallel_energy()
        } else {
            self.zeeman() + self.anisotropy() + self.exchange() + self.dmi()
        }
    }

    pub fn terms(&self) -> EnergyTerms {
        EnergyTerms {
            zeeman: self.zeeman(),
            anisotropy: self.anisotropy(),
            exchange: self.exchange(),
            dmi: self.dmi(),
        }
    }

    pub fn zeeman(&self) -> f64 {
        -self.s.as_slice().iter().map(|s| s.dot(&self.b)).sum::<f64>()
    }

    pub fn anisotropy(&self) -> f64 {
        -self.k
            * self
                .s
                .as_slice()
                .iter()
                .map(|s| s.dot(&self.u).powi(2))
                .sum::<f64>()
    }

    pub fn exchange(&self) -> f64 {
        let spins = self.s.as_slice();
        -self.j
            * self
                .s
                .bonds()
                .iter()
                .map(|bond| spins[bond.a].dot(&spins[bond.b]))
                .sum::<f64>()
    }

    pub fn dmi(&self) -> f64 {
        let spins = self.s.as_slice();
        let chirality: f64 = self
            .s
            .bonds()
            .iter()
            .map(|bond| -bond.r.dot(&spins[bond.a].cross(&spins[bond.b])))
            .sum();
        -self.d * chirality
    }

    /// Total energy with every term reduced in parallel.
    pub fn parallel_energy(&self) -> f64 {
        let spins = self.s.as_slice();
        let bonds = self.s.bonds();
        let (b, k, u, j, d) = (self.b, self.k, self.u, self.j, self.d);

        let (site_terms, bond_terms) = rayon::join(
            || {
                spins
                    .par_iter()
                    .map(|s| -s.dot(&b) - k * s.dot(&u).powi(2))
                    .sum::<f64>()
            },
            || {
                bonds
                    .par_iter()
                    .map(|bond| {
                        let (sp, sq) = (&spins[bond.a], &spins[bond.b]);
                        -j * sp.dot(sq) + d * bond.r.dot(&sp.cross(sq))
                    })
                    .sum::<f64>()
            },
        );

        site_terms + bond_terms
    }
}

#[cfg(test)]
mod tests;
