//! Input/Output operations for Monte Carlo runs
//!
//! This module handles logging setup and dumping spin configurations.

mod output;

pub use output::{setup_output, write_spins};
