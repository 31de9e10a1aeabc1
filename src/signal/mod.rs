//! signal — forward models for multi-wavelength backscatter observations.
//!
//! Purpose
//! -------
//! Generate the complex observations that the ambiguity resolver consumes:
//! deterministic superposition of per-surface backscatter and a stochastic
//! variant with per-wavelength phase noise. These are caller-side tools;
//! nothing in [`crate::ranging`] depends on them.
//!
//! Key behaviors
//! -------------
//! - [`synth::simulate`] and [`synth::simulate_noisy`] produce a
//!   [`synth::Superposition`] (observations plus the per-surface backscatter
//!   matrix).
//! - All inputs are validated up front; failures surface as
//!   [`errors::SignalError`] values.
//!
//! Conventions
//! -----------
//! - Round-trip phase: distance `d` at wavelength `λ` contributes `4π·d/λ`.
//! - Randomness is an explicit dependency: noisy simulation takes
//!   `&mut impl rand::Rng`.
//!
//! Testing notes
//! -------------
//! - Unit tests live in [`synth`]; the integration suite feeds these
//!   generators into the resolver end to end.

pub mod errors;
pub mod synth;

pub use self::errors::{SignalError, SignalResult};
pub use self::synth::{simulate, simulate_noisy, Superposition};
