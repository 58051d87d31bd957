//! Configuration management for Monte Carlo runs
//!
//! This module handles the YAML run file, its defaults, and the command-line
//! overrides applied on top of it.

mod args;

pub use args::Args;

use crate::spins::Boundary;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

const DEFAULT_DIMS: [i64; 2] = [10, 10];
const DEFAULT_VALUE: [f64; 3] = [0.0, 0.0, 1.0];
const DEFAULT_FIELD: [f64; 3] = [0.0, 0.0, 0.0];
const DEFAULT_AXIS: [f64; 3] = [0.0, 0.0, 1.0];
const DEFAULT_EXCHANGE: f64 = 1.0;
const DEFAULT_ITERATIONS: usize = 1000;
const DEFAULT_REPORT_INTERVAL: usize = 1000;

/// Main configuration structure for a simulation run
#[derive(Debug, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub lattice: LatticeParams,
    #[serde(default)]
    pub system: SystemParams,
    #[serde(default)]
    pub driver: DriverParams,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LatticeKind {
    #[default]
    Square,
    Honeycomb,
}

/// Lattice shape and initial state
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LatticeParams {
    pub kind: Option<LatticeKind>,
    /// Dimensions `[nx, ny]`
    pub n: Option<Vec<i64>>,
    /// Initial value of every spin
    pub value: Option<Vec<f64>>,
    /// Replace the initial value by random spins before driving
    pub randomise: Option<bool>,
    pub boundary: Option<Boundary>,
}

impl Default for LatticeParams {
    fn default() -> Self {
        LatticeParams {
            kind: Some(LatticeKind::Square),
            n: Some(DEFAULT_DIMS.to_vec()),
            value: Some(DEFAULT_VALUE.to_vec()),
            randomise: Some(false),
            boundary: Some(Boundary::Open),
        }
    }
}

impl LatticeParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.kind.is_none() {
            self.kind = defaults.kind;
        }
        if self.n.is_none() {
            self.n = defaults.n;
        }
        if self.value.is_none() {
            self.value = defaults.value;
        }
        if self.randomise.is_none() {
            self.randomise = defaults.randomise;
        }
        if self.boundary.is_none() {
            self.boundary = defaults.boundary;
        }
        self
    }
}

/// Physical parameters of the energy model
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct SystemParams {
    /// External magnetic field
    pub b: Option<Vec<f64>>,
    /// Uniaxial anisotropy constant
    pub k: Option<f64>,
    /// Uniaxial anisotropy axis
    pub u: Option<Vec<f64>>,
    /// Exchange constant
    pub j: Option<f64>,
    /// DMI constant
    pub d: Option<f64>,
}

impl Default for SystemParams {
    fn default() -> Self {
        SystemParams {
            b: Some(DEFAULT_FIELD.to_vec()),
            k: Some(0.0),
            u: Some(DEFAULT_AXIS.to_vec()),
            j: Some(DEFAULT_EXCHANGE),
            d: Some(0.0),
        }
    }
}

impl SystemParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.b.is_none() {
            self.b = defaults.b;
        }
        if self.k.is_none() {
            self.k = defaults.k;
        }
        if self.u.is_none() {
            self.u = defaults.u;
        }
        if self.j.is_none() {
            self.j = defaults.j;
        }
        if self.d.is_none() {
            self.d = defaults.d;
        }
        self
    }
}

/// Monte Carlo driver parameters
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct DriverParams {
    /// Number of trial moves
    pub n: Option<usize>,
    /// Perturbation scale
    pub alpha: Option<f64>,
    /// Seed for a reproducible run; drawn from entropy when absent
    pub seed: Option<u64>,
    /// Evaluate the energy with rayon
    pub parallel: Option<bool>,
    /// Log progress every this many iterations (0 disables)
    pub report_interval: Option<usize>,
}

impl Default for DriverParams {
    fn default() -> Self {
        DriverParams {
            n: Some(DEFAULT_ITERATIONS),
            alpha: Some(crate::driver::DEFAULT_ALPHA),
            seed: None,
            parallel: Some(false),
            report_interval: Some(DEFAULT_REPORT_INTERVAL),
        }
    }
}

impl DriverParams {
    /// Apply default values to any missing parameters
    pub fn with_defaults(mut self) -> Self {
        let defaults = Self::default();
        if self.n.is_none() {
            self.n = defaults.n;
        }
        if self.alpha.is_none() {
            self.alpha = defaults.alpha;
        }
        if self.parallel.is_none() {
            self.parallel = defaults.parallel;
        }
        if self.report_interval.is_none() {
            self.report_interval = defaults.report_interval;
        }
        self
    }
}

impl Config {
    /// Load a configuration from a YAML file, with defaults applied
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, Box<dyn std::error::Error>> {
        let content = fs::read_to_string(path)?;
        Ok(Self::from_yaml(&content)?)
    }

    pub fn from_yaml(content: &str) -> Result<Self, serde_yml::Error> {
        let config: Config = serde_yml::from_str(content)?;
        Ok(config.with_defaults())
    }

    /// Apply defaults to all configuration sections
    pub fn with_defaults(mut self) -> Self {
        self.lattice = self.lattice.with_defaults();
        self.system = self.system.with_defaults();
        self.driver = self.driver.with_defaults();
        self
    }

    /// Override configuration values with the ones given on the command line
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(n) = args.iterations {
            self.driver.n = Some(n);
        }
        if let Some(alpha) = args.alpha {
            self.driver.alpha = Some(alpha);
        }
        if let Some(seed) = args.seed {
            self.driver.seed = Some(seed);
        }
        if args.parallel {
            self.driver.parallel = Some(true);
        }
    }

    // Accessors fall back to the same constants as `with_defaults`, so a
    // config built by hand reads the same as one loaded from a file.

    pub fn lattice_kind(&self) -> LatticeKind {
        self.lattice.kind.unwrap_or_default()
    }

    /// Lattice dimensions `[nx, ny]`, unvalidated
    pub fn dims(&self) -> &[i64] {
        self.lattice.n.as_deref().unwrap_or(&DEFAULT_DIMS)
    }

    pub fn initial_value(&self) -> &[f64] {
        self.lattice.value.as_deref().unwrap_or(&DEFAULT_VALUE)
    }

    pub fn randomise(&self) -> bool {
        self.lattice.randomise.unwrap_or(false)
    }

    pub fn boundary(&self) -> Boundary {
        self.lattice.boundary.unwrap_or_default()
    }

    pub fn field(&self) -> &[f64] {
        self.system.b.as_deref().unwrap_or(&DEFAULT_FIELD)
    }

    pub fn anisotropy_constant(&self) -> f64 {
        self.system.k.unwrap_or(0.0)
    }

    pub fn anisotropy_axis(&self) -> &[f64] {
        self.system.u.as_deref().unwrap_or(&DEFAULT_AXIS)
    }

    pub fn exchange_constant(&self) -> f64 {
        self.system.j.unwrap_or(DEFAULT_EXCHANGE)
    }

    pub fn dmi_constant(&self) -> f64 {
        self.system.d.unwrap_or(0.0)
    }

    pub fn iterations(&self) -> usize {
        self.driver.n.unwrap_or(DEFAULT_ITERATIONS)
    }

    pub fn alpha(&self) -> f64 {
        self.driver.alpha.unwrap_or(crate::driver::DEFAULT_ALPHA)
    }

    pub fn seed(&self) -> Option<u64> {
        self.driver.seed
    }

    pub fn is_parallel(&self) -> bool {
        self.driver.parallel.unwrap_or(false)
    }

    pub fn report_interval(&self) -> usize {
        self.driver.report_interval.unwrap_or(DEFAULT_REPORT_INTERVAL)
    }
}
