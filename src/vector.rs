//! Small helpers around `nalgebra::Vector3` shared by the lattice, the
//! energy model and the driver.

use crate::error::{Result, SpinError};
use nalgebra::Vector3;

/// Spins whose norm deviates from 1 by more than this are renormalised.
pub const NORM_TOLERANCE: f64 = 1e-9;

/// Build a 3-vector from a dynamically sized slice.
pub fn vector_from_slice(values: &[f64], what: &str) -> Result<Vector3<f64>> {
    if values.len() != 3 {
        return Err(SpinError::InvalidValue(format!(
            "{what} must have exactly 3 components, not {}",
            values.len()
        )));
    }
    let v = Vector3::new(values[0], values[1], values[2]);
    ensure_finite(&v, what)?;
    Ok(v)
}

pub fn ensure_finite(v: &Vector3<f64>, what: &str) -> Result<()> {
    if v.iter().all(|c| c.is_finite()) {
        Ok(())
    } else {
        Err(SpinError::InvalidValue(format!(
            "{what} must have finite components, got [{}, {}, {}]",
            v.x, v.y, v.z
        )))
    }
}

/// Normalise `v` to unit length, refusing zero or non-finite norms instead of
/// producing NaN.
#[inline]
pub fn unit(v: &Vector3<f64>, what: &str) -> Result<Vector3<f64>> {
    let norm = v.norm();
    if norm == 0.0 || !norm.is_finite() {
        return Err(SpinError::DegenerateVector(format!(
            "{what} has norm {norm} and cannot be normalised"
        )));
    }
    Ok(v / norm)
}

#[inline]
pub fn is_unit(v: &Vector3<f64>) -> bool {
    (v.norm_squared() - 1.0).abs() <= NORM_TOLERANCE
}
