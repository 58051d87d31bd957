//! Spin lattices.
//!
//! A lattice stores one unit 3-vector per addressable site in a flat array,
//! together with a table of nearest-neighbour bonds that is built once at
//! construction (the dimensions never change afterwards). The energy model and
//! the Monte Carlo driver only talk to lattices through the [`Lattice`] trait,
//! so the square and honeycomb layouts share every algorithm.

pub mod honeycomb;
pub mod square;

pub use honeycomb::{HoneycombSpins, Sublattice};
pub use square::{dims_from_slice, Spins};

use crate::error::{Result, SpinError};
use nalgebra::Vector3;
use rand::Rng;
use rand_distr::{Distribution, Uniform};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Boundary condition used when building the bond table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Boundary {
    /// Neighbour sums stop one short of the edge; no wraparound.
    #[default]
    Open,
    /// Wraparound bonds along every axis longer than two sites.
    Periodic,
}

/// A nearest-neighbour pair `(a, b)` in flat storage order and the unit
/// vector `r` pointing from site `a` to site `b`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bond {
    pub a: usize,
    pub b: usize,
    pub r: Vector3<f64>,
}

impl Bond {
    pub fn new(a: usize, b: usize, r: Vector3<f64>) -> Self {
        Self { a, b, r }
    }
}

/// Number of spins in an `nx` by `ny` grid of cells holding `per_cell` spins
/// each. Zero dimensions, and grids whose spin or bond storage would not fit
/// in memory, are rejected.
pub(crate) fn site_count(nx: usize, ny: usize, per_cell: usize) -> Result<usize> {
    if nx == 0 || ny == 0 {
        return Err(SpinError::InvalidDimension(format!(
            "elements of n must be positive integers, got ({nx}, {ny})"
        )));
    }
    // Every lattice carries at most two bonds per spin.
    let bytes_per_site = std::mem::size_of::<Vector3<f64>>() + 2 * std::mem::size_of::<Bond>();
    nx.checked_mul(ny)
        .and_then(|cells| cells.checked_mul(per_cell))
        .filter(|&sites| {
            sites
                .checked_mul(bytes_per_site)
                .is_some_and(|bytes| bytes <= isize::MAX as usize)
        })
        .ok_or_else(|| {
            SpinError::InvalidDimension(format!("lattice of ({nx}, {ny}) cells is too large"))
        })
}

pub trait Lattice {
    /// Address of a single spin, e.g. `(i, j)` on the square lattice.
    type Site: Copy + fmt::Debug + PartialEq;

    /// Number of unit cells `(nx, ny)`.
    fn dims(&self) -> (usize, usize);

    /// Number of spins held by each unit cell.
    fn sublattices(&self) -> usize;

    fn index(&self, site: Self::Site) -> usize;

    fn site(&self, index: usize) -> Self::Site;

    fn as_slice(&self) -> &[Vector3<f64>];

    fn as_mut_slice(&mut self) -> &mut [Vector3<f64>];

    fn bonds(&self) -> &[Bond];

    /// Draw a site uniformly from every addressable site.
    fn random_site<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Site;

    fn n_sites(&self) -> usize {
        self.as_slice().len()
    }

    fn spin(&self, site: Self::Site) -> Vector3<f64> {
        self.as_slice()[self.index(site)]
    }

    /// Overwrite one spin without normalising it.
    fn set_spin(&mut self, site: Self::Site, value: Vector3<f64>) {
        let idx = self.index(site);
        self.as_mut_slice()[idx] = value;
    }

    /// Euclidean norm of the spin at `site`.
    fn magnitude(&self, site: Self::Site) -> f64 {
        self.spin(site).norm()
    }

    /// Norm of every spin, in storage order.
    fn norms(&self) -> Vec<f64> {
        self.as_slice().iter().map(|s| s.norm()).collect()
    }

    /// Sum of all spins (net magnetization).
    fn magnetization(&self) -> Vector3<f64> {
        self.as_slice().iter().sum()
    }

    /// Mean spin `(<sx>, <sy>, <sz>)` over the whole lattice.
    fn mean(&self) -> Vector3<f64> {
        self.magnetization() / self.n_sites() as f64
    }

    /// Scale every spin to unit length.
    ///
    /// Fails without touching the lattice if any spin has zero norm.
    fn normalise(&mut self) -> Result<()> {
        if let Some(idx) = self
            .as_slice()
            .iter()
            .position(|s| s.norm() == 0.0 || !s.norm().is_finite())
        {
            return Err(SpinError::DegenerateVector(format!(
                "spin at {:?} cannot be normalised",
                self.site(idx)
            )));
        }
        for s in self.as_mut_slice() {
            let norm = s.norm();
            *s /= norm;
        }
        Ok(())
    }

    /// Replace every spin by an independent uniform draw from `[-1, 1]^3`,
    /// normalised to unit length.
    fn randomise<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let component = Uniform::new_inclusive(-1.0, 1.0);
        for s in self.as_mut_slice() {
            // Redraw the (measure-zero) origin rather than divide by zero.
            let v = loop {
                let v = Vector3::new(
                    component.sample(rng),
                    component.sample(rng),
                    component.sample(rng),
                );
                if v.norm() > 0.0 {
                    break v;
                }
            };
            *s = v / v.norm();
        }
    }
}
