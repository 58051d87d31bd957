use super::*;
use crate::error::SpinError;
use crate::spins::{Boundary, HoneycombSpins, Spins, Sublattice};
use approx::*;
use nalgebra::{Rotation3, Unit};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

fn uniform_system(n: (usize, usize), b: Vector3<f64>, k: f64, j: f64, d: f64) -> System<Spins> {
    let spins = Spins::new(n, Vector3::z()).unwrap();
    System::new(spins, b, k, Vector3::z(), j, d).unwrap()
}

#[test]
fn test_zeeman_aligned_lattice() {
    for &(nx, ny) in &[(1, 1), (3, 4), (10, 7)] {
        let system = uniform_system((nx, ny), Vector3::z(), 0.0, 0.0, 0.0);
        assert_eq!(system.zeeman(), -((nx * ny) as f64));
    }
}

#[test]
fn test_zeeman_perpendicular_field() {
    let system = uniform_system((4, 4), Vector3::new(2.5, -1.0, 0.0), 0.0, 0.0, 0.0);
    assert_eq!(system.zeeman(), 0.0);
}

#[test]
fn test_anisotropy() {
    let system = uniform_system((3, 3), Vector3::zeros(), 0.7, 0.0, 0.0);
    assert_relative_eq!(system.anisotropy(), -0.7 * 9.0, epsilon = 1e-12);

    // Spins perpendicular to the easy axis cost nothing.
    let spins = Spins::new((3, 3), Vector3::x()).unwrap();
    let system = System::new(spins, Vector3::zeros(), 0.7, Vector3::z(), 0.0, 0.0).unwrap();
    assert_eq!(system.anisotropy(), 0.0);
}

#[test]
fn test_anisotropy_axis_is_normalised_at_construction() {
    let spins = Spins::new((2, 2), Vector3::z()).unwrap();
    let system = System::new(spins, Vector3::zeros(), 1.0, Vector3::new(0.0, 0.0, 5.0), 0.0, 0.0).unwrap();
    assert_eq!(system.anisotropy_axis(), Vector3::z());
    assert_relative_eq!(system.anisotropy(), -4.0, epsilon = 1e-12);
    // Repeated queries see the same axis.
    assert_eq!(system.anisotropy(), system.anisotropy());
}

#[test]
fn test_zero_anisotropy_axis_is_rejected() {
    let spins = Spins::new((2, 2), Vector3::z()).unwrap();
    let result = System::new(spins, Vector3::zeros(), 1.0, Vector3::zeros(), 1.0, 0.0);
    assert!(matches!(result, Err(SpinError::DegenerateVector(_))));
}

#[test]
fn test_from_slices_validation() {
    let spins = Spins::new((2, 2), Vector3::z()).unwrap();
    assert!(matches!(
        System::from_slices(spins.clone(), &[0.0, 0.0], 0.0, &[0.0, 0.0, 1.0], 1.0, 0.0),
        Err(SpinError::InvalidValue(_))
    ));
    assert!(matches!(
        System::from_slices(spins.clone(), &[0.0, 0.0, 1.0], 0.0, &[0.0, 0.0, 1.0, 0.0], 1.0, 0.0),
        Err(SpinError::InvalidValue(_))
    ));
    assert!(matches!(
        System::from_slices(spins.clone(), &[0.0, 0.0, 1.0], f64::NAN, &[0.0, 0.0, 1.0], 1.0, 0.0),
        Err(SpinError::InvalidValue(_))
    ));
    let system = System::from_slices(spins, &[0.0, 0.0, 1.0], 0.0, &[1.0, 0.0, 0.0], 1.0, 0.0).unwrap();
    assert_eq!(system.field(), Vector3::z());
}

#[test]
fn test_exchange_2x2() {
    // Pairs (0,0)-(0,1), (1,0)-(1,1), (0,0)-(1,0), (0,1)-(1,1).
    let system = uniform_system((2, 2), Vector3::zeros(), 0.0, 1.0, 0.0);
    assert_eq!(system.exchange(), -4.0);
    assert_eq!(system.energy(), -4.0);
}

#[test]
fn test_exchange_open_boundary() {
    let (nx, ny) = (5, 3);
    let system = uniform_system((nx, ny), Vector3::zeros(), 0.0, 2.0, 0.0);
    let pairs = nx * (ny - 1) + (nx - 1) * ny;
    assert_eq!(system.exchange(), -2.0 * pairs as f64);
}

#[test]
fn test_exchange_periodic_boundary() {
    let spins = Spins::with_boundary((4, 4), Vector3::z(), Boundary::Periodic).unwrap();
    let system = System::new(spins, Vector3::zeros(), 0.0, Vector3::z(), 1.0, 0.0).unwrap();
    assert_eq!(system.exchange(), -32.0);
}

#[test]
fn test_exchange_antiparallel_neighbour() {
    let mut spins = Spins::new((3, 3), Vector3::z()).unwrap();
    let before = System::new(spins.clone(), Vector3::zeros(), 0.0, Vector3::z(), 1.0, 0.0)
        .unwrap()
        .exchange();

    // The centre spin has four neighbours; flipping it changes each bond by 2J.
    spins.set_spin((1, 1), -Vector3::z());
    let after = System::new(spins, Vector3::zeros(), 0.0, Vector3::z(), 1.0, 0.0)
        .unwrap()
        .exchange();
    assert_relative_eq!(after - before, 8.0, epsilon = 1e-12);
}

#[test]
fn test_single_site_has_no_pair_energy() {
    let spins = Spins::new((1, 1), Vector3::new(0.3, -0.2, 0.9)).unwrap();
    let system = System::new(spins, Vector3::zeros(), 0.0, Vector3::z(), 3.0, 2.0).unwrap();
    assert_eq!(system.exchange(), 0.0);
    assert_eq!(system.dmi(), 0.0);
}

#[test]
fn test_dmi_chirality() {
    // s(0,0) = z, s(0,1) = y: z × y = -x, so r̂_x · (s × s') = -1.
    let mut spins = Spins::new((1, 2), Vector3::z()).unwrap();
    spins.set_spin((0, 1), Vector3::y());
    let system = System::new(spins.clone(), Vector3::zeros(), 0.0, Vector3::z(), 0.0, 1.5).unwrap();
    assert_relative_eq!(system.dmi(), -1.5, epsilon = 1e-15);

    // Reversing the rotation sense flips the sign.
    spins.set_spin((0, 1), -Vector3::y());
    let system = System::new(spins, Vector3::zeros(), 0.0, Vector3::z(), 0.0, 1.5).unwrap();
    assert_relative_eq!(system.dmi(), 1.5, epsilon = 1e-15);
}

#[test]
fn test_dmi_vertical_bond() {
    // s(0,0) = z, s(1,0) = x: z × x = y, so r̂_y · (s × s') = 1.
    let mut spins = Spins::new((2, 1), Vector3::z()).unwrap();
    spins.set_spin((1, 0), Vector3::x());
    let system = System::new(spins, Vector3::zeros(), 0.0, Vector3::z(), 0.0, 1.0).unwrap();
    assert_relative_eq!(system.dmi(), 1.0, epsilon = 1e-15);
}

#[test]
fn test_dmi_vanishes_for_collinear_spins() {
    let system = uniform_system((6, 6), Vector3::zeros(), 0.0, 0.0, 4.0);
    assert_eq!(system.dmi(), 0.0);
}

#[test]
fn test_energy_is_sum_of_terms() {
    let mut rng = StdRng::seed_from_u64(21);
    let mut spins = Spins::new((7, 5), Vector3::z()).unwrap();
    spins.randomise(&mut rng);
    let system = System::new(
        spins,
        Vector3::new(0.1, -0.3, 0.5),
        0.4,
        Vector3::new(1.0, 1.0, 0.0),
        1.0,
        0.6,
    )
    .unwrap();

    let terms = system.terms();
    assert_relative_eq!(
        system.energy(),
        system.zeeman() + system.anisotropy() + system.exchange() + system.dmi(),
        epsilon = 1e-12
    );
    assert_relative_eq!(terms.total(), system.energy(), epsilon = 1e-12);
}

#[test]
fn test_energy_rotational_covariance() {
    let mut rng = StdRng::seed_from_u64(1234);
    let mut spins = Spins::new((6, 5), Vector3::z()).unwrap();
    spins.randomise(&mut rng);

    let b = Vector3::new(0.2, -0.4, 0.7);
    let u = Vector3::new(0.3, 0.1, -0.9);
    let system = System::new(spins.clone(), b, 0.8, u, 1.3, 0.0).unwrap();

    for _ in 0..5 {
        let axis = Unit::new_normalize(Vector3::new(
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
            rng.gen_range(-1.0..1.0),
        ));
        let rotation = Rotation3::from_axis_angle(&axis, rng.gen_range(0.0..std::f64::consts::TAU));

        let mut rotated = spins.clone();
        for s in rotated.as_mut_slice() {
            *s = rotation * *s;
        }
        let rotated_system = System::new(rotated, rotation * b, 0.8, rotation * u, 1.3, 0.0).unwrap();

        assert_relative_eq!(rotated_system.energy(), system.energy(), epsilon = 1e-10);
    }
}

#[test]
fn test_parallel_energy_matches_serial() {
    let mut rng = StdRng::seed_from_u64(99);
    let mut spins = Spins::new((40, 30), Vector3::z()).unwrap();
    spins.randomise(&mut rng);
    let system = System::new(
        spins,
        Vector3::new(0.0, 0.0, 0.2),
        0.1,
        Vector3::z(),
        1.0,
        0.5,
    )
    .unwrap();

    assert!(!system.is_parallel());
    let serial = system.energy();
    let parallel = system.parallel_energy();
    assert_relative_eq!(serial, parallel, epsilon = 1e-9);

    let system = system.with_parallel(true);
    assert!(system.is_parallel());
    assert_relative_eq!(system.energy(), serial, epsilon = 1e-9);
}

#[test]
fn test_honeycomb_energy() {
    let (nx, ny) = (3, 3);
    let spins = HoneycombSpins::new((nx, ny), Vector3::z()).unwrap();
    let system = System::new(spins, Vector3::z(), 0.0, Vector3::z(), 1.0, 1.0).unwrap();

    let bonds = nx * ny + nx * (ny - 1) + (nx - 1) * ny;
    assert_eq!(system.zeeman(), -((2 * nx * ny) as f64));
    assert_eq!(system.exchange(), -(bonds as f64));
    assert_eq!(system.dmi(), 0.0);
}

#[test]
fn test_honeycomb_intra_cell_dmi() {
    // A = z, B = x on a single cell: z × x = y along the (0, 1, 0) bond.
    let mut spins = HoneycombSpins::new((1, 1), Vector3::z()).unwrap();
    spins.set_spin((0, 0, Sublattice::B), Vector3::x());
    let system = System::new(spins, Vector3::zeros(), 0.0, Vector3::z(), 0.0, 2.0).unwrap();
    assert_relative_eq!(system.dmi(), 2.0, epsilon = 1e-15);
    assert_eq!(system.exchange(), 0.0);
}

#[test]
fn test_into_spins_returns_lattice() {
    let system = uniform_system((2, 3), Vector3::zeros(), 0.0, 1.0, 0.0);
    let spins = system.into_spins();
    assert_eq!(spins.dims(), (2, 3));
}
