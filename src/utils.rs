#[cfg(feature = "python-bindings")]
use num_complex::Complex64;

#[cfg(feature = "python-bindings")]
use pyo3::{exceptions::PyValueError, prelude::*, types::PyAny};

#[cfg(feature = "python-bindings")]
use crate::ranging::{config::ResolverOptions, constraints::Constraint, types::DEFAULT_MAX_ITER};

#[cfg(feature = "python-bindings")]
use numpy::{
    IntoPyArray,    // Vec → PyArray
    PyArrayMethods, // .readonly()
    PyReadonlyArray1,
};

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_f64_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, f64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<f64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<f64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<f64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of float64",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
#[inline]
pub fn extract_complex_array<'py>(
    py: Python<'py>, raw_data: &Bound<'py, PyAny>,
) -> PyResult<PyReadonlyArray1<'py, Complex64>> {
    if let Ok(arr_ro) = raw_data.extract::<PyReadonlyArray1<Complex64>>() {
        if arr_ro.as_slice().is_ok() {
            return Ok(arr_ro);
        }
    }

    if let Ok(obj) = raw_data.call_method("to_numpy", (false,), None) {
        if let Ok(series_ro) = obj.extract::<PyReadonlyArray1<Complex64>>() {
            if series_ro.as_slice().is_ok() {
                return Ok(series_ro);
            }
        }
    }

    let vec: Vec<Complex64> = raw_data.extract().map_err(|_| {
        pyo3::exceptions::PyTypeError::new_err(
            "expected a 1-D numpy.ndarray, pandas.Series, or sequence of complex128",
        )
    })?;
    Ok(vec.into_pyarray(py).readonly())
}

#[cfg(feature = "python-bindings")]
pub fn build_resolver_options(
    n_obs: usize, max_iter: Option<usize>, min_distance: Option<f64>, max_distance: Option<f64>,
) -> PyResult<ResolverOptions> {
    let budget = max_iter.unwrap_or(DEFAULT_MAX_ITER);

    // Optional distance bounds become extra constraints on top of the defaults.
    let mut extras: Vec<Constraint> = Vec::new();
    if let Some(lower) = min_distance {
        if !lower.is_finite() {
            return Err(PyValueError::new_err("min_distance must be finite"));
        }
        extras.push(Constraint::distance_ge(lower));
    }
    if let Some(upper) = max_distance {
        if !upper.is_finite() {
            return Err(PyValueError::new_err("max_distance must be finite"));
        }
        extras.push(Constraint::distance_le(upper));
    }

    let options = ResolverOptions::build(n_obs, budget, extras)?;
    Ok(options)
}
