//! Integration tests for the signal-to-resolution ranging pipeline.
//!
//! Purpose
//! -------
//! - Validate the end-to-end path: synthesize superposed backscatter
//!   observations, feed them to the ambiguity resolver, and check the
//!   recovered distance, cycle counts, and residuals.
//! - Exercise realistic measurement regimes (dense EDM-style wavelength
//!   combs, coarse multi-channel sets, seeded phase noise, mixed pixels)
//!   rather than toy edge cases only.
//!
//! Coverage
//! --------
//! - `signal`:
//!   - Noiseless and seeded noisy synthesis as resolver input.
//! - `ranging::resolver`:
//!   - Exact round-trip recovery on noiseless observations.
//!   - Stability of the recovered distance under small phase noise.
//!   - Invariance of the optimum under uniform variance rescaling.
//!   - Infeasibility and dimension-mismatch failure paths.
//!   - The mixed-pixel sanity bound against single-surface hypotheses.
//! - `ranging::config` / `ranging::constraints`:
//!   - Distance bounds and node budgets threaded through `ResolverOptions`.
//!
//! Exclusions
//! ----------
//! - Fine-grained behavior of the branch and bound engine (node
//!   accounting, pruning, budget edge cases) — covered by unit tests in
//!   `optimization::milp`.
//! - Python bindings and the CLI front end — thin wrappers over the same
//!   entry points exercised here.
use ndarray::{array, Array1};
use num_complex::Complex64;
use rand::{rngs::StdRng, SeedableRng};
use std::f64::consts::PI;

use multiwave_ranging::{
    ranging::{
        resolve, weighted_l1_objective, Constraint, CycleCounts, RangingError, ResolverOptions,
    },
    signal::{simulate, simulate_noisy},
};

/// Purpose
/// -------
/// Provide a coarse four-channel wavelength set whose pairwise cycle
/// alignments do not repeat inside the test distance window, so every
/// noiseless scenario below has a unique global optimum.
///
/// Returns
/// -------
/// - Wavelengths `[0.5, 0.7, 0.9, 1.1]`; the common alignment period of
///   their half-wavelength lattices is far beyond the `d <= 5` window
///   used by the tests.
fn coarse_wavelengths() -> Array1<f64> {
    array![0.5, 0.7, 0.9, 1.1]
}

/// Purpose
/// -------
/// Synthesize noiseless single-surface observations at unit weight for a
/// given true distance, as the cleanest possible resolver input.
///
/// Parameters
/// ----------
/// - `distance`: True surface distance; must be non-negative.
/// - `wavelengths`: Carrier wavelengths, strictly positive.
///
/// Returns
/// -------
/// - The aggregated observation vector, one complex entry per wavelength.
///
/// Invariants
/// ----------
/// - Panics if the synthesizer rejects its input; the tests only feed it
///   validated scenarios, so a failure here is a test defect.
fn single_surface(distance: f64, wavelengths: &Array1<f64>) -> Array1<Complex64> {
    simulate(&array![1.0], &array![distance], wavelengths)
        .expect("noiseless synthesis should succeed for valid inputs")
        .observations
}

/// Purpose
/// -------
/// Build `ResolverOptions` with a distance cap and an explicit node
/// budget, the configuration every scenario below runs under.
///
/// Parameters
/// ----------
/// - `n_obs`: Number of observation channels.
/// - `max_distance`: Upper bound on the distance variable; the defaults
///   already pin `d >= 0` and every cycle count to be non-negative.
/// - `budget`: Node budget for the branch and bound engine; generous
///   values keep the noiseless scenarios certifiable.
///
/// Returns
/// -------
/// - A validated `ResolverOptions`.
fn bounded_options(n_obs: usize, max_distance: f64, budget: usize) -> ResolverOptions {
    ResolverOptions::build(n_obs, budget, vec![Constraint::distance_le(max_distance)])
        .expect("options should build for positive channel counts and budgets")
}

/// Purpose
/// -------
/// Compute the cycle counts that best explain a hypothesized distance,
/// channel by channel, for objective comparisons against the resolver's
/// own optimum.
///
/// Parameters
/// ----------
/// - `distance`: Hypothesized surface distance.
/// - `observations`: Complex observations whose arguments supply the
///   wrapped phases.
/// - `wavelengths`: Carrier wavelengths paired with the observations.
///
/// Returns
/// -------
/// - `N[i] = round((4π·distance/λ[i] − arg(obs[i])) / 2π)`, the integer
///   lattice point nearest the hypothesis in every channel.
fn consistent_cycles(
    distance: f64, observations: &Array1<Complex64>, wavelengths: &Array1<f64>,
) -> CycleCounts {
    Array1::from_shape_fn(observations.len(), |i| {
        ((4.0 * PI * distance / wavelengths[i] - observations[i].arg()) / (2.0 * PI)).round()
            as i64
    })
}

#[test]
// Purpose
// -------
// Recover a known distance from a dense ten-channel EDM-style wavelength
// comb with a wide search window, and certify the optimum.
//
// Given
// -----
// - A single surface at distance 5.0 with unit weight.
// - Ten wavelengths linearly spaced in [0.01, 0.05], noiseless synthesis.
// - Uniform phase variance 0.05 for weighting, `d <= 20`, and a generous
//   node budget.
//
// Expect
// ------
// - A certified resolution with |d* − 5| < 1e-4.
// - Residuals within floating tolerance of zero in every channel.
// - End-channel cycle counts 1000 (λ = 0.01) and 200 (λ = 0.05).
fn resolves_concrete_ten_wavelength_scenario() {
    // Arrange
    let wavelengths = Array1::linspace(0.01, 0.05, 10);
    let observations = single_surface(5.0, &wavelengths);
    let variances = Array1::from_elem(10, 0.05);
    let options = bounded_options(10, 20.0, 2_000_000);

    // Act
    let resolution = resolve(&observations, &wavelengths, &variances, &options)
        .expect("the noiseless ten-channel scenario should resolve");

    // Assert
    assert!(resolution.certified, "a noiseless scenario should certify its optimum");
    assert!(
        (resolution.distance - 5.0).abs() < 1e-4,
        "the true distance should be recovered, got {}",
        resolution.distance
    );
    assert!(
        resolution.residuals.iter().all(|r| r.abs() < 1e-6),
        "noiseless residuals should vanish, got {:?}",
        resolution.residuals
    );
    assert_eq!(resolution.cycles[0], 1000, "2·5/0.01 full cycles on the finest channel");
    assert_eq!(resolution.cycles[9], 200, "2·5/0.05 full cycles on the coarsest channel");
    assert!(resolution.objective < 1e-6, "the optimum objective should be numerically zero");
}

#[test]
// Purpose
// -------
// Verify exact round-trip recovery across several true distances,
// including zero, on the coarse four-channel set.
//
// Given
// -----
// - True distances {0.0, 1.23, 3.75}, single surface, noiseless.
// - Wavelengths [0.5, 0.7, 0.9, 1.1], uniform variance 0.02, `d <= 5`.
//
// Expect
// ------
// - Every case certifies with |d* − d0| < 1e-4 and vanishing residuals.
fn noiseless_round_trips_recover_the_true_distance() {
    let wavelengths = coarse_wavelengths();
    let variances = Array1::from_elem(4, 0.02);
    for &true_distance in &[0.0, 1.23, 3.75] {
        // Arrange
        let observations = single_surface(true_distance, &wavelengths);
        let options = bounded_options(4, 5.0, 20_000);

        // Act
        let resolution = resolve(&observations, &wavelengths, &variances, &options)
            .unwrap_or_else(|err| panic!("distance {true_distance} should resolve, got {err:?}"));

        // Assert
        assert!(resolution.certified, "noiseless round trips should certify");
        assert!(
            (resolution.distance - true_distance).abs() < 1e-4,
            "expected d* ≈ {true_distance}, got {}",
            resolution.distance
        );
        assert!(
            resolution.residuals.iter().all(|r| r.abs() < 1e-6),
            "residuals should vanish at the true lattice point, got {:?}",
            resolution.residuals
        );
    }
}

#[test]
// Purpose
// -------
// Verify the recovered distance stays near the truth under small seeded
// phase noise, across independent trials.
//
// Given
// -----
// - A single surface at distance 2.0 on the coarse four-channel set.
// - Phase variance 1e-4 per channel (σ = 0.01 rad, far below the 2π
//   granularity of a cycle step), seeds 1 through 5.
// - Matching variances for weighting, `d <= 5`.
//
// Expect
// ------
// - Every trial certifies and lands within 0.05 of the true distance.
fn small_phase_noise_keeps_the_distance_stable() {
    let wavelengths = coarse_wavelengths();
    let variances = Array1::from_elem(4, 1e-4);
    for seed in 1..=5u64 {
        // Arrange
        let mut rng = StdRng::seed_from_u64(seed);
        let observations =
            simulate_noisy(&array![1.0], &array![2.0], &wavelengths, &variances, &mut rng)
                .expect("noisy synthesis should succeed for valid inputs")
                .observations;
        let options = bounded_options(4, 5.0, 20_000);

        // Act
        let resolution = resolve(&observations, &wavelengths, &variances, &options)
            .unwrap_or_else(|err| panic!("seed {seed} should resolve, got {err:?}"));

        // Assert
        assert!(resolution.certified, "small-noise trials should certify (seed {seed})");
        assert!(
            (resolution.distance - 2.0).abs() < 0.05,
            "seed {seed}: expected d* near 2.0, got {}",
            resolution.distance
        );
    }
}

#[test]
// Purpose
// -------
// Verify that rescaling every phase variance by one positive constant
// leaves the optimizer's argmin unchanged and rescales only the
// objective value.
//
// Given
// -----
// - One noisy observation set (seed 7, σ² = 1e-4) on the coarse
//   four-channel set, resolved twice: once weighted with variance 0.02
//   per channel and once with 0.2 (a uniform ×10 rescaling).
//
// Expect
// ------
// - Identical distance and cycle counts from both runs.
// - Objectives in the exact ratio √10.
fn variance_rescaling_leaves_the_optimum_unchanged() {
    // Arrange
    let wavelengths = coarse_wavelengths();
    let synth_variances = Array1::from_elem(4, 1e-4);
    let mut rng = StdRng::seed_from_u64(7);
    let observations =
        simulate_noisy(&array![1.0], &array![1.8], &wavelengths, &synth_variances, &mut rng)
            .expect("noisy synthesis should succeed for valid inputs")
            .observations;
    let options = bounded_options(4, 5.0, 20_000);
    let base_variances = Array1::from_elem(4, 0.02);
    let scaled_variances = Array1::from_elem(4, 0.2);

    // Act
    let base = resolve(&observations, &wavelengths, &base_variances, &options)
        .expect("the base weighting should resolve");
    let scaled = resolve(&observations, &wavelengths, &scaled_variances, &options)
        .expect("the rescaled weighting should resolve");

    // Assert
    assert!(
        (base.distance - scaled.distance).abs() < 1e-8,
        "uniform variance rescaling must not move the optimum: {} vs {}",
        base.distance,
        scaled.distance
    );
    assert_eq!(base.cycles, scaled.cycles, "cycle counts must not change under rescaling");
    assert!(base.objective > 0.0, "a noisy optimum should have a positive objective");
    let ratio = base.objective / scaled.objective;
    assert!(
        (ratio - 10f64.sqrt()).abs() < 1e-6,
        "objectives should rescale by √10, got ratio {ratio}"
    );
}

#[test]
// Purpose
// -------
// Verify contradictory distance bounds are reported as infeasibility,
// never as a numeric answer.
//
// Given
// -----
// - Valid two-channel observations with constraints `d >= 10` and
//   `d <= 5` together.
//
// Expect
// ------
// - Exactly `Err(RangingError::Infeasible)`.
fn contradictory_distance_bounds_are_infeasible() {
    // Arrange
    let wavelengths = array![0.5, 0.7];
    let observations = single_surface(1.0, &wavelengths);
    let variances = array![0.05, 0.05];
    let options = ResolverOptions::build(
        2,
        1_000,
        vec![Constraint::distance_ge(10.0), Constraint::distance_le(5.0)],
    )
    .expect("contradictory bounds are a solve-time matter, not a configuration error");

    // Act
    let result = resolve(&observations, &wavelengths, &variances, &options);

    // Assert
    assert_eq!(
        result,
        Err(RangingError::Infeasible),
        "crossed distance bounds must surface as infeasibility"
    );
}

#[test]
// Purpose
// -------
// Verify a wavelength/observation length mismatch fails up front with a
// shape error rather than reaching the search.
//
// Given
// -----
// - Three observations paired with only two wavelengths.
//
// Expect
// ------
// - `DimensionMismatch` naming the wavelength vector, expected 3, got 2.
fn dimension_mismatch_fails_before_the_search() {
    // Arrange
    let full_wavelengths = array![0.5, 0.7, 0.9];
    let observations = single_surface(1.0, &full_wavelengths);
    let short_wavelengths = array![0.5, 0.7];
    let variances = array![0.05, 0.05, 0.05];
    let options = bounded_options(3, 5.0, 1_000);

    // Act
    let result = resolve(&observations, &short_wavelengths, &variances, &options);

    // Assert
    assert_eq!(
        result,
        Err(RangingError::DimensionMismatch { quantity: "wavelengths", expected: 3, actual: 2 }),
        "the mismatch must be caught during validation"
    );
}

#[test]
// Purpose
// -------
// Sanity-bound the mixed-pixel case: when the observation is a
// superposition of two surfaces, the resolved objective must be at least
// as good as either single-surface hypothesis.
//
// Given
// -----
// - Two surfaces with weights [2, 1] at distances [1, 2].
// - Ten wavelengths linearly spaced in [0.01, 0.05], noiseless synthesis,
//   uniform variance 0.05 for weighting, `d <= 5`, and a generous budget.
//
// Expect
// ------
// - A usable incumbent (certified, or carried by the Suboptimal error).
// - Its objective is at or below the weighted L1 objective of the best
//   cycle assignment at distance 1 and at distance 2.
fn mixed_pixel_objective_beats_single_surface_hypotheses() {
    // Arrange
    let wavelengths = Array1::linspace(0.01, 0.05, 10);
    let observations = simulate(&array![2.0, 1.0], &array![1.0, 2.0], &wavelengths)
        .expect("two-surface synthesis should succeed")
        .observations;
    let variances = Array1::from_elem(10, 0.05);
    let options = bounded_options(10, 5.0, 1_000_000);

    // Act
    let resolution = match resolve(&observations, &wavelengths, &variances, &options) {
        Ok(resolution) => resolution,
        Err(RangingError::Suboptimal { resolution }) => *resolution,
        Err(other) => panic!("the mixed pixel should yield an incumbent, got {other:?}"),
    };

    // Assert
    assert!(
        resolution.distance >= 0.0 && resolution.distance <= 5.0,
        "the incumbent must respect the distance bounds, got {}",
        resolution.distance
    );
    for &hypothesis in &[1.0, 2.0] {
        let cycles = consistent_cycles(hypothesis, &observations, &wavelengths);
        let hypothesis_objective =
            weighted_l1_objective(hypothesis, &cycles, &observations, &wavelengths, &variances)
                .expect("the hypothesis objective should compute");
        assert!(
            resolution.objective <= hypothesis_objective + 1e-9,
            "the optimizer must not lose to the single-surface hypothesis at d = {hypothesis}: \
             {} vs {hypothesis_objective}",
            resolution.objective
        );
    }
}
