//! multiwave_ranging — multi-wavelength ranging ambiguity resolution with
//! Python bindings.
//!
//! Purpose
//! -------
//! Serve as the crate root for Rust callers and as the PyO3 bridge that
//! exposes the ambiguity resolver to Python via the `_multiwave_ranging`
//! extension module. When the `python-bindings` feature is enabled, this
//! module defines the Python-facing classes and submodules used by the
//! `multiwave_ranging` package.
//!
//! Key behaviors
//! -------------
//! - Re-export the core Rust modules (`ranging`, `signal`, and the
//!   `optimization` MILP layer) as the public crate surface.
//! - Define `#[pyclass]` wrappers and the `#[pymodule]` initializer for
//!   the `_multiwave_ranging` Python extension.
//! - Create and register Python submodules (`ranging`, `signal`) under
//!   `multiwave_ranging` so that dot-notation imports work as expected.
//!
//! Invariants & assumptions
//! ------------------------
//! - All numerical work is implemented in the inner Rust modules; this
//!   file performs only FFI glue, input validation, and error mapping.
//! - When `python-bindings` is enabled, the Python-visible types mirror
//!   the invariants and signatures of their Rust counterparts
//!   (`Resolution`, `Superposition`).
//! - On successful conversion from Python objects to Rust types, the
//!   invariants documented in the core modules are assumed to hold.
//!
//! Conventions
//! -----------
//! - Python-exposed classes live under `_multiwave_ranging.<submodule>`
//!   and are typically wrapped by thin pure-Python facades in the
//!   top-level `multiwave_ranging` package.
//! - Units and phase conventions follow the documentation of the
//!   underlying Rust modules (`ranging`, `signal`).
//! - Errors from core Rust code are propagated as rich error types
//!   internally and converted to `PyErr` values at the PyO3 boundary.
//!
//! Downstream usage
//! ----------------
//! - Native Rust code should usually depend directly on the inner modules
//!   and can ignore the PyO3 items guarded by the `python-bindings`
//!   feature.
//! - The Python packaging layer imports the `_multiwave_ranging` module
//!   defined here and wraps its classes in user-facing Python APIs.
//!
//! Testing notes
//! -------------
//! - Core numerical behavior is covered by unit tests in the inner
//!   modules and by the integration suite under `tests/`.
//! - Smoke tests for the PyO3 bindings verify that classes can be
//!   constructed, called, and round-tripped correctly from Python.

pub mod optimization;
pub mod ranging;
pub mod signal;
pub mod utils;

#[cfg(feature = "python-bindings")]
use ndarray::Array1;

#[cfg(feature = "python-bindings")]
use num_complex::Complex64;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use rand::{rngs::StdRng, SeedableRng};

#[cfg(feature = "python-bindings")]
use crate::{
    ranging::{errors::RangingError, outcome::Resolution},
    utils::{build_resolver_options, extract_complex_array, extract_f64_array},
};

/// AmbiguityResolution — Python-facing wrapper for one resolver call.
///
/// Purpose
/// -------
/// Represent the outcome of multi-wavelength ambiguity resolution when
/// called from Python and forward all computation to
/// [`ranging::resolve`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into contiguous Rust arrays.
/// - Build the constraint set from optional distance bounds, run the
///   resolver, and store the outcome internally.
/// - Expose the distance, cycle counts, residuals, and solve diagnostics
///   as Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `AmbiguityResolution(observations, wavelengths, phase_variances,
/// max_iter=None, min_distance=None, max_distance=None,
/// accept_suboptimal=False)`:
/// - `observations`: complex128 array-like, one entry per channel.
/// - `wavelengths`: float64 array-like, strictly positive.
/// - `phase_variances`: float64 array-like, strictly positive.
/// - `max_iter`: optional node budget override (default 300).
/// - `min_distance` / `max_distance`: optional extra bounds on `d`.
/// - `accept_suboptimal`: if `True`, an uncertified incumbent is accepted
///   instead of raising; check `certified` afterwards.
///
/// Fields
/// ------
/// - `inner`: [`Resolution`]
///   Rust-side outcome holding the values used by the accessors.
///
/// Invariants
/// ----------
/// - `inner` is a validated [`Resolution`]; when `certified` is `False`
///   the caller opted into an incumbent via `accept_suboptimal`.
///
/// Notes
/// -----
/// - Native Rust code should prefer calling [`ranging::resolve`]
///   directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "multiwave_ranging.ranging")]
pub struct AmbiguityResolution {
    /// The resolver outcome struct.
    inner: Resolution,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl AmbiguityResolution {
    /// Resolve distance and integer cycle counts from phase-wrapped
    /// complex observations.
    #[new]
    #[pyo3(
        text_signature = "(observations, wavelengths, phase_variances, /, max_iter=None, \
                          min_distance=None, max_distance=None, accept_suboptimal=False)",
        signature = (
            observations,
            wavelengths,
            phase_variances,
            max_iter = None,
            min_distance = None,
            max_distance = None,
            accept_suboptimal = false,
        )
    )]
    pub fn resolve<'py>(
        py: Python<'py>, observations: &Bound<'py, PyAny>, wavelengths: &Bound<'py, PyAny>,
        phase_variances: &Bound<'py, PyAny>, max_iter: Option<usize>, min_distance: Option<f64>,
        max_distance: Option<f64>, accept_suboptimal: bool,
    ) -> PyResult<AmbiguityResolution> {
        let obs_arr = extract_complex_array(py, observations)?;
        let obs_slice = obs_arr.as_slice().map_err(|_| {
            PyValueError::new_err(
                "observations must be a 1-D contiguous complex128 array or sequence",
            )
        })?;
        let observations = Array1::from(obs_slice.to_vec());

        let wl_arr = extract_f64_array(py, wavelengths)?;
        let wl_slice = wl_arr.as_slice().map_err(|_| {
            PyValueError::new_err("wavelengths must be a 1-D contiguous float64 array or sequence")
        })?;
        let wavelengths = Array1::from(wl_slice.to_vec());

        let var_arr = extract_f64_array(py, phase_variances)?;
        let var_slice = var_arr.as_slice().map_err(|_| {
            PyValueError::new_err(
                "phase_variances must be a 1-D contiguous float64 array or sequence",
            )
        })?;
        let variances = Array1::from(var_slice.to_vec());

        let options =
            build_resolver_options(observations.len(), max_iter, min_distance, max_distance)?;

        match ranging::resolve(&observations, &wavelengths, &variances, &options) {
            Ok(resolution) => Ok(AmbiguityResolution { inner: resolution }),
            Err(RangingError::Suboptimal { resolution }) if accept_suboptimal => {
                Ok(AmbiguityResolution { inner: *resolution })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Best-fit distance, in the wavelength unit.
    #[getter]
    pub fn distance(&self) -> f64 {
        self.inner.distance
    }

    /// Best-fit integer cycle counts, one per observation.
    #[getter]
    pub fn cycles(&self) -> Vec<i64> {
        self.inner.cycles.to_vec()
    }

    /// Unweighted phase residuals in radians.
    #[getter]
    pub fn residuals(&self) -> Vec<f64> {
        self.inner.residuals.to_vec()
    }

    /// Residuals as unit-magnitude complex rotations `exp(i r)`.
    #[getter]
    pub fn complex_residuals(&self) -> Vec<Complex64> {
        self.inner.complex_residuals().to_vec()
    }

    /// Weighted L1 objective value at the returned assignment.
    #[getter]
    pub fn objective(&self) -> f64 {
        self.inner.objective
    }

    /// Whether the engine proved optimality.
    #[getter]
    pub fn certified(&self) -> bool {
        self.inner.certified
    }

    /// LP relaxations the engine spent on this call.
    #[getter]
    pub fn nodes_processed(&self) -> usize {
        self.inner.nodes_processed
    }
}

/// Superposition — Python-facing wrapper for backscatter synthesis.
///
/// Purpose
/// -------
/// Expose the multi-surface backscatter simulator to Python callers,
/// forwarding to [`signal::simulate`] / [`signal::simulate_noisy`].
///
/// Key behaviors
/// -------------
/// - Validate and convert Python inputs into contiguous Rust arrays.
/// - Run the noiseless simulation, or the noisy one when variances are
///   given, seeding the generator explicitly when requested.
/// - Expose the aggregated observations and per-surface backscatter
///   matrix as Python properties.
///
/// Parameters
/// ----------
/// Constructed from Python via
/// `Superposition(weights, distances, wavelengths, phase_variances=None,
/// seed=None)`:
/// - `weights` / `distances`: float64 array-likes of equal length, one
///   entry per surface.
/// - `wavelengths`: float64 array-like, strictly positive.
/// - `phase_variances`: optional float64 array-like; enables phase noise.
/// - `seed`: optional integer seed for reproducible noise.
///
/// Fields
/// ------
/// - `inner`: [`signal::Superposition`]
///   Rust-side container holding observations and the backscatter matrix.
///
/// Notes
/// -----
/// - Native Rust code should prefer calling the `signal` module directly.
#[cfg(feature = "python-bindings")]
#[pyclass(module = "multiwave_ranging.signal")]
pub struct Superposition {
    /// The synthesis result struct.
    inner: signal::Superposition,
}

#[cfg(feature = "python-bindings")]
#[pymethods]
impl Superposition {
    /// Simulate superposed backscatter at the given wavelengths.
    #[new]
    #[pyo3(
        text_signature = "(weights, distances, wavelengths, /, phase_variances=None, seed=None)",
        signature = (weights, distances, wavelengths, phase_variances = None, seed = None)
    )]
    pub fn simulate<'py>(
        py: Python<'py>, weights: &Bound<'py, PyAny>, distances: &Bound<'py, PyAny>,
        wavelengths: &Bound<'py, PyAny>, phase_variances: Option<&Bound<'py, PyAny>>,
        seed: Option<u64>,
    ) -> PyResult<Superposition> {
        let weights_arr = extract_f64_array(py, weights)?;
        let weights_slice = weights_arr.as_slice().map_err(|_| {
            PyValueError::new_err("weights must be a 1-D contiguous float64 array or sequence")
        })?;
        let weights = Array1::from(weights_slice.to_vec());

        let dist_arr = extract_f64_array(py, distances)?;
        let dist_slice = dist_arr.as_slice().map_err(|_| {
            PyValueError::new_err("distances must be a 1-D contiguous float64 array or sequence")
        })?;
        let distances = Array1::from(dist_slice.to_vec());

        let wl_arr = extract_f64_array(py, wavelengths)?;
        let wl_slice = wl_arr.as_slice().map_err(|_| {
            PyValueError::new_err("wavelengths must be a 1-D contiguous float64 array or sequence")
        })?;
        let wavelengths = Array1::from(wl_slice.to_vec());

        let inner = match phase_variances {
            Some(raw_variances) => {
                let var_arr = extract_f64_array(py, raw_variances)?;
                let var_slice = var_arr.as_slice().map_err(|_| {
                    PyValueError::new_err(
                        "phase_variances must be a 1-D contiguous float64 array or sequence",
                    )
                })?;
                let variances = Array1::from(var_slice.to_vec());
                let mut rng = match seed {
                    Some(seed) => StdRng::seed_from_u64(seed),
                    None => StdRng::from_entropy(),
                };
                signal::simulate_noisy(&weights, &distances, &wavelengths, &variances, &mut rng)?
            }
            None => signal::simulate(&weights, &distances, &wavelengths)?,
        };

        Ok(Superposition { inner })
    }

    /// Aggregated complex observations, one per wavelength.
    #[getter]
    pub fn observations(&self) -> Vec<Complex64> {
        self.inner.observations.to_vec()
    }

    /// Per-surface backscatter matrix, rows indexed by surface.
    #[getter]
    pub fn backscatter(&self) -> Vec<Vec<Complex64>> {
        let (nrows, _ncols) = self.inner.backscatter.dim();
        let mut out = Vec::with_capacity(nrows);
        for i in 0..nrows {
            out.push(self.inner.backscatter.row(i).to_vec());
        }
        out
    }
}

/// _multiwave_ranging — PyO3 module initializer for the Python extension.
///
/// Creates the `ranging` and `signal` submodules, attaches them to the
/// parent module, and registers them in `sys.modules` so dotted-path
/// imports work from Python. Invoked automatically on import; never
/// called by user code.
#[cfg(feature = "python-bindings")]
#[pymodule]
fn _multiwave_ranging<'py>(_py: Python<'py>, m: &Bound<'py, PyModule>) -> PyResult<()> {
    let ranging_mod = PyModule::new(_py, "ranging")?;
    let signal_mod = PyModule::new(_py, "signal")?;
    ranging(_py, m, &ranging_mod)?;
    signal(_py, m, &signal_mod)?;

    // Manually add submodules into sys.modules to allow for dot notation.
    _py.import("sys")?
        .getattr("modules")?
        .set_item("multiwave_ranging.ranging", ranging_mod)?;

    _py.import("sys")?
        .getattr("modules")?
        .set_item("multiwave_ranging.signal", signal_mod)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn ranging<'py>(
    _py: Python, multiwave_ranging: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<AmbiguityResolution>()?;
    multiwave_ranging.add_submodule(m)?;
    Ok(())
}

#[cfg(feature = "python-bindings")]
fn signal<'py>(
    _py: Python, multiwave_ranging: &Bound<'py, PyModule>, m: &Bound<'py, PyModule>,
) -> PyResult<()> {
    m.add_class::<Superposition>()?;
    multiwave_ranging.add_submodule(m)?;
    Ok(())
}
