use super::square::dims_from_slice;
use super::{site_count, Bond, Lattice};
use crate::error::Result;
use crate::vector::{ensure_finite, is_unit, unit, vector_from_slice};
use itertools::iproduct;
use nalgebra::Vector3;
use rand::Rng;

/// One of the two atoms in a honeycomb unit cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sublattice {
    A,
    B,
}

impl Sublattice {
    pub fn index(self) -> usize {
        match self {
            Sublattice::A => 0,
            Sublattice::B => 1,
        }
    }

    fn from_index(index: usize) -> Self {
        if index % 2 == 0 {
            Sublattice::A
        } else {
            Sublattice::B
        }
    }
}

/// Spins on a honeycomb lattice: an `nx x ny` grid of unit cells, each
/// holding an A and a B spin.
///
/// Site `(i, j, s)` is stored at `(i * ny + j) * 2 + s`. With A at the cell
/// origin and B displaced by `(0, 1)`, every A has up to three B neighbours:
///
/// * `B(i, j)` along `(0, 1, 0)`
/// * `B(i, j - 1)` along `(√3/2, -1/2, 0)`
/// * `B(i - 1, j)` along `(-√3/2, -1/2, 0)`
///
/// Bonds leaving the grid are dropped (open boundary).
#[derive(Debug, Clone, PartialEq)]
pub struct HoneycombSpins {
    n: (usize, usize),
    array: Vec<Vector3<f64>>,
    bonds: Vec<Bond>,
}

impl HoneycombSpins {
    pub fn new(n: (usize, usize), value: Vector3<f64>) -> Result<Self> {
        let (nx, ny) = n;
        let sites = site_count(nx, ny, 2)?;
        ensure_finite(&value, "initial spin value")?;
        let value = if is_unit(&value) {
            value
        } else {
            unit(&value, "initial spin value")?
        };

        Ok(Self {
            n,
            array: vec![value; sites],
            bonds: honeycomb_bonds(nx, ny),
        })
    }

    pub fn from_slices(n: &[i64], value: &[f64]) -> Result<Self> {
        let n = dims_from_slice(n)?;
        let value = vector_from_slice(value, "initial spin value")?;
        Self::new(n, value)
    }

    /// Mean spin of a single sublattice.
    pub fn sublattice_mean(&self, sublattice: Sublattice) -> Vector3<f64> {
        let offset = sublattice.index();
        let sum: Vector3<f64> = self.array.iter().skip(offset).step_by(2).sum();
        sum / (self.n.0 * self.n.1) as f64
    }
}

impl Lattice for HoneycombSpins {
    type Site = (usize, usize, Sublattice);

    fn dims(&self) -> (usize, usize) {
        self.n
    }

    fn sublattices(&self) -> usize {
        2
    }

    #[inline]
    fn index(&self, (i, j, s): Self::Site) -> usize {
        debug_assert!(i < self.n.0 && j < self.n.1);
        (i * self.n.1 + j) * 2 + s.index()
    }

    fn site(&self, index: usize) -> Self::Site {
        let cell = index / 2;
        (cell / self.n.1, cell % self.n.1, Sublattice::from_index(index))
    }

    fn as_slice(&self) -> &[Vector3<f64>] {
        &self.array
    }

    fn as_mut_slice(&mut self) -> &mut [Vector3<f64>] {
        &mut self.array
    }

    fn bonds(&self) -> &[Bond] {
        &self.bonds
    }

    fn random_site<R: Rng + ?Sized>(&self, rng: &mut R) -> Self::Site {
        let i = rng.gen_range(0..self.n.0);
        let j = rng.gen_range(0..self.n.1);
        let s = if rng.gen_bool(0.5) {
            Sublattice::A
        } else {
            Sublattice::B
        };
        (i, j, s)
    }
}

fn honeycomb_bonds(nx: usize, ny: usize) -> Vec<Bond> {
    let a = |i: usize, j: usize| (i * ny + j) * 2;
    let b = |i: usize, j: usize| (i * ny + j) * 2 + 1;
    let half_sqrt3 = 3.0_f64.sqrt() / 2.0;
    let d1 = Vector3::new(0.0, 1.0, 0.0);
    let d2 = Vector3::new(half_sqrt3, -0.5, 0.0);
    let d3 = Vector3::new(-half_sqrt3, -0.5, 0.0);

    let mut bonds = Vec::with_capacity(3 * nx * ny);
    for (i, j) in iproduct!(0..nx, 0..ny) {
        bonds.push(Bond::new(a(i, j), b(i, j), d1));
        if j > 0 {
            bonds.push(Bond::new(a(i, j), b(i, j - 1), d2));
        }
        if i > 0 {
            bonds.push(Bond::new(a(i, j), b(i - 1, j), d3));
        }
    }
    bonds
}
