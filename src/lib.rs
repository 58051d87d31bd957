//! Library for zero-temperature Monte Carlo relaxation of 2D Heisenberg spin lattices

pub mod config;
pub mod driver;
pub mod error;
pub mod io;
pub mod spins;
pub mod system;
pub mod vector;

pub use driver::{random_spin, DriveReport, Driver, DEFAULT_ALPHA};
pub use error::{Result, SpinError};
pub use spins::{Boundary, Bond, HoneycombSpins, Lattice, Spins, Sublattice};
pub use system::{EnergyTerms, System};
