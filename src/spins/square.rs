use super::{site_count, Boundary, Bond, Lattice};
use crate::error::{Result, SpinError};
use crate::vector::{ensure_finite, is_unit, unit, vector_from_slice};
use itertools::iproduct;
use nalgebra::Vector3;
use rand::Rng;

/// Field of spins on a two-dimensional square lattice.
///
/// Spin `(i, j)` lives at flat index `i * ny + j`, with `i` running along the
/// first dimension (`nx`) and `j` along the second (`ny`). Bonds along `j`
/// point in `x = (1, 0, 0)` and bonds along `i` point in `y = (0, 1, 0)`.
#[derive(Debug, Clone, PartialEq)]
pub struct Spins {
    n: (usize, usize),
    boundary: Boundary,
    array: Vec<Vector3<f64>>,
    bonds: Vec<Bond>,
}

impl Spins {
    /// Create an `nx x ny` lattice with every spin set to `value`.
    ///
    /// `value` is normalised if it is not already of unit length.
    pub fn new(n: (usize, usize), value: Vector3<f64>) -> Result<Self> {
        Self::with_boundary(n, value, Boundary::Open)
    }

    /// Same as [`Spins::new`] with an explicit boundary condition.
    pub fn with_boundary(n: (usize, usize), value: Vector3<f64>, boundary: Boundary) -> Result<Self> {
        let (nx, ny) = n;
        let sites = site_count(nx, ny, 1)?;
        ensure_finite(&value, "initial spin value")?;
        let value = if is_unit(&value) {
            value
        } else {
            unit(&value, "initial spin value")?
        };

        Ok(Self {
            n,
            boundary,
            array: vec![value; sites],
            bonds: square_bonds(nx, ny, boundary),
        })
    }

    /// Build a lattice from untyped dimensions and value, as read from a
    /// configuration file.
    pub fn from_slices(n: &[i64], value: &[f64]) -> Result<Self> {
        let n = dims_from_slice(n)?;
        let value = vector_from_slice(value, "initial spin value")?;
        Self::new(n, value)
    }

    pub fn boundary(&self) -> Boundary {
        self.boundary
    }
}

impl Lattice for Spins {
    type Site = (usize, usize);

    fn dims(&self) -> (usize, usize) {
        self.n
    }

    fn sublattices(&self) -> usize {
        1
    }

    #[inline]
    fn index(&self, (i, j): Self::Site) -> usize {
        debug_assert!(i < self.n.0 && j < self.n.1);
        i * self.n.1 + j
    }

    fn site(&self, index: usize) -> Self::Site {
        (index / self.n.1, index % self.n.1)
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
        (i, j)
    }
}

/// Validate a length-2 list of positive integers.
pub fn dims_from_slice(n: &[i64]) -> Result<(usize, usize)> {
    if n.len() != 2 {
        return Err(SpinError::InvalidDimension(format!(
            "length of n must be 2, not {}",
            n.len()
        )));
    }
    if n.iter().any(|&d| d <= 0) {
        return Err(SpinError::InvalidDimension(format!(
            "elements of n must be positive integers, got {n:?}"
        )));
    }
    let dim = |d: i64| {
        usize::try_from(d).map_err(|_| {
            SpinError::InvalidDimension(format!("dimension {d} does not fit in memory"))
        })
    };
    Ok((dim(n[0])?, dim(n[1])?))
}

fn square_bonds(nx: usize, ny: usize, boundary: Boundary) -> Vec<Bond> {
    let idx = |i: usize, j: usize| i * ny + j;
    let periodic = boundary == Boundary::Periodic;
    let rx = Vector3::x();
    let ry = Vector3::y();

    let mut bonds = Vec::with_capacity(2 * nx * ny);

    // (i, j) - (i, j + 1)
    bonds.extend(iproduct!(0..nx, 0..ny - 1).map(|(i, j)| Bond::new(idx(i, j), idx(i, j + 1), rx)));
    if periodic && ny > 2 {
        bonds.extend((0..nx).map(|i| Bond::new(idx(i, ny - 1), idx(i, 0), rx)));
    }

    // (i, j) - (i + 1, j)
    bonds.extend(iproduct!(0..ny, 0..nx - 1).map(|(j, i)| Bond::new(idx(i, j), idx(i + 1, j), ry)));
    if periodic && nx > 2 {
        bonds.extend((0..ny).map(|j| Bond::new(idx(nx - 1, j), idx(0, j), ry)));
    }

    bonds
}
