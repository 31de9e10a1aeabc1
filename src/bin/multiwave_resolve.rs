//! multiwave_resolve — command-line front end for the ambiguity resolver.
//!
//! Purpose
//! -------
//! Run distance/cycle-count resolution on a JSON problem description, and
//! synthesize test inputs from the signal model, without writing any Rust.
//!
//! Key behaviors
//! -------------
//! - `resolve`: reads a JSON problem (file path argument or stdin) with
//!   complex observations given either as `{re, im}` or as
//!   `{amplitude, phase}` pairs, optional distance bounds, an optional
//!   node budget, and an optional explicit constraint list; prints the
//!   resolved distance, cycle counts, and residuals.
//! - `simulate`: synthesizes superposed backscatter observations from
//!   per-surface weights and distances, optionally with seeded phase
//!   noise, for feeding back into `resolve`.
//! - Both subcommands print human-readable text by default and JSON with
//!   `--json`.
//!
//! Conventions
//! -----------
//! - Diagnostics and progress go to stderr; results go to stdout.
//! - Errors are funneled into `Box<dyn std::error::Error>` and exit the
//!   process with code 1.

use std::{fs, io, path::PathBuf, process};

use clap::{Parser, Subcommand};
use multiwave_ranging::{
    ranging::{resolve, Constraint, RangingError, Resolution, ResolverOptions, DEFAULT_MAX_ITER},
    signal::{simulate, simulate_noisy, Superposition},
};
use ndarray::Array1;
use num_complex::Complex64;
use rand::{rngs::StdRng, SeedableRng};
use serde::{Deserialize, Serialize};

type CliError = Box<dyn std::error::Error>;

// ---------------------------------------------------------------------------
// Argument surface
// ---------------------------------------------------------------------------

#[derive(Parser)]
#[command(
    name = "multiwave_resolve",
    version,
    about = "Multi-wavelength ranging: mixed-integer L1 ambiguity resolution"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve distance and integer cycle counts from a JSON problem description.
    Resolve {
        /// Path to the JSON problem file; reads stdin when omitted.
        input: Option<PathBuf>,

        /// Override the node budget given in the input (default 300).
        #[arg(long)]
        max_iter: Option<usize>,

        /// Report the best incumbent instead of failing when the budget
        /// runs out before optimality is proven.
        #[arg(long)]
        accept_suboptimal: bool,

        /// Emit the outcome as JSON instead of human-readable text.
        #[arg(long)]
        json: bool,

        /// Print assembly and search progress to stderr.
        #[arg(long)]
        verbose: bool,
    },

    /// Synthesize superposed backscatter observations for test inputs.
    Simulate {
        /// Per-surface reflection weights, comma separated.
        #[arg(long, value_delimiter = ',', required = true)]
        weights: Vec<f64>,

        /// Per-surface distances, comma separated, same length as weights.
        #[arg(long, value_delimiter = ',', required = true)]
        distances: Vec<f64>,

        /// Carrier wavelengths, comma separated.
        #[arg(long, value_delimiter = ',', required = true)]
        wavelengths: Vec<f64>,

        /// Per-wavelength phase variances; enables noise when given.
        #[arg(long, value_delimiter = ',')]
        phase_variances: Option<Vec<f64>>,

        /// Seed for reproducible noise; entropy-seeded when omitted.
        #[arg(long)]
        seed: Option<u64>,

        /// Emit the observations (and backscatter matrix) as JSON.
        #[arg(long)]
        json: bool,
    },
}

// ---------------------------------------------------------------------------
// JSON problem description
// ---------------------------------------------------------------------------

/// One complex observation, entered either in Cartesian or polar form.
#[derive(Debug, Clone, Copy, Deserialize)]
#[serde(untagged)]
enum ObservationInput {
    Cartesian { re: f64, im: f64 },
    Polar { amplitude: f64, phase: f64 },
}

impl ObservationInput {
    fn to_complex(self) -> Complex64 {
        match self {
            ObservationInput::Cartesian { re, im } => Complex64::new(re, im),
            ObservationInput::Polar { amplitude, phase } => Complex64::from_polar(amplitude, phase),
        }
    }
}

/// The `resolve` subcommand's input document.
#[derive(Debug, Deserialize)]
struct ProblemInput {
    observations: Vec<ObservationInput>,
    wavelengths: Vec<f64>,
    phase_variances: Vec<f64>,
    #[serde(default)]
    min_distance: Option<f64>,
    #[serde(default)]
    max_distance: Option<f64>,
    #[serde(default)]
    max_iter: Option<usize>,
    #[serde(default)]
    constraints: Vec<Constraint>,
}

// ---------------------------------------------------------------------------
// JSON output shapes
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
struct ComplexPair {
    re: f64,
    im: f64,
}

impl From<Complex64> for ComplexPair {
    fn from(z: Complex64) -> Self {
        ComplexPair { re: z.re, im: z.im }
    }
}

#[derive(Debug, Serialize)]
struct ResolutionOutput {
    distance: f64,
    cycles: Vec<i64>,
    residuals: Vec<f64>,
    objective: f64,
    certified: bool,
    nodes_processed: usize,
}

impl From<&Resolution> for ResolutionOutput {
    fn from(resolution: &Resolution) -> Self {
        ResolutionOutput {
            distance: resolution.distance,
            cycles: resolution.cycles.to_vec(),
            residuals: resolution.residuals.to_vec(),
            objective: resolution.objective,
            certified: resolution.certified,
            nodes_processed: resolution.nodes_processed,
        }
    }
}

#[derive(Debug, Serialize)]
struct SimulationOutput {
    observations: Vec<ComplexPair>,
    backscatter: Vec<Vec<ComplexPair>>,
}

impl From<&Superposition> for SimulationOutput {
    fn from(superposition: &Superposition) -> Self {
        let observations = superposition.observations.iter().copied().map(Into::into).collect();
        let (nrows, _) = superposition.backscatter.dim();
        let backscatter = (0..nrows)
            .map(|i| superposition.backscatter.row(i).iter().copied().map(Into::into).collect())
            .collect();
        SimulationOutput { observations, backscatter }
    }
}

// ---------------------------------------------------------------------------
// Subcommand drivers
// ---------------------------------------------------------------------------

fn run_resolve(
    input: Option<PathBuf>, max_iter: Option<usize>, accept_suboptimal: bool, json: bool,
    verbose: bool,
) -> Result<(), CliError> {
    let raw = match input {
        Some(path) => fs::read_to_string(path)?,
        None => io::read_to_string(io::stdin())?,
    };
    let problem: ProblemInput = serde_json::from_str(&raw)?;

    let observations: Array1<Complex64> =
        problem.observations.iter().map(|obs| obs.to_complex()).collect();
    let wavelengths = Array1::from(problem.wavelengths);
    let phase_variances = Array1::from(problem.phase_variances);

    // Optional distance bounds become extra constraints on top of the
    // defaults injected by `ResolverOptions::build`.
    let mut extras = problem.constraints;
    if let Some(lower) = problem.min_distance {
        extras.push(Constraint::distance_ge(lower));
    }
    if let Some(upper) = problem.max_distance {
        extras.push(Constraint::distance_le(upper));
    }

    let budget = max_iter.or(problem.max_iter).unwrap_or(DEFAULT_MAX_ITER);
    let mut options = ResolverOptions::build(observations.len(), budget, extras)?;
    options.verbose = verbose;

    let resolution = match resolve(&observations, &wavelengths, &phase_variances, &options) {
        Ok(resolution) => resolution,
        Err(RangingError::Suboptimal { resolution }) if accept_suboptimal => {
            eprintln!(
                "warning: node budget exhausted; reporting best incumbent (optimality unproven)"
            );
            *resolution
        }
        Err(err) => return Err(err.into()),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&ResolutionOutput::from(&resolution))?);
    } else {
        print_resolution(&resolution);
    }
    Ok(())
}

#[allow(clippy::too_many_arguments)]
fn run_simulate(
    weights: Vec<f64>, distances: Vec<f64>, wavelengths: Vec<f64>,
    phase_variances: Option<Vec<f64>>, seed: Option<u64>, json: bool,
) -> Result<(), CliError> {
    let weights = Array1::from(weights);
    let distances = Array1::from(distances);
    let wavelengths_arr = Array1::from(wavelengths);

    let superposition = match phase_variances {
        Some(variances) => {
            let variances = Array1::from(variances);
            let mut rng = match seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };
            simulate_noisy(&weights, &distances, &wavelengths_arr, &variances, &mut rng)?
        }
        None => simulate(&weights, &distances, &wavelengths_arr)?,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&SimulationOutput::from(&superposition))?);
    } else {
        print_superposition(&wavelengths_arr, &superposition);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Human-readable printing
// ---------------------------------------------------------------------------

fn print_resolution(resolution: &Resolution) {
    let status = if resolution.certified {
        "optimal (proven)"
    } else {
        "feasible (optimality unproven)"
    };
    println!("distance:  {:.6}", resolution.distance);
    println!("objective: {:.6}", resolution.objective);
    println!("status:    {status}, {} nodes processed", resolution.nodes_processed);
    let cycles: Vec<String> = resolution.cycles.iter().map(|n| n.to_string()).collect();
    println!("cycles:    [{}]", cycles.join(", "));
    println!("residuals (rad):");
    for (i, r) in resolution.residuals.iter().enumerate() {
        println!("  [{i:>3}] {r:+.6}");
    }
}

fn print_superposition(wavelengths: &Array1<f64>, superposition: &Superposition) {
    println!("observations:");
    for (i, z) in superposition.observations.iter().enumerate() {
        println!(
            "  [{i:>3}] wavelength {:.6}: {:+.6} {:+.6}i  (phase {:+.6})",
            wavelengths[i],
            z.re,
            z.im,
            z.arg()
        );
    }
}

fn run() -> Result<(), CliError> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Resolve { input, max_iter, accept_suboptimal, json, verbose } => {
            run_resolve(input, max_iter, accept_suboptimal, json, verbose)
        }
        Commands::Simulate { weights, distances, wavelengths, phase_variances, seed, json } => {
            run_simulate(weights, distances, wavelengths, phase_variances, seed, json)
        }
    }
}

fn main() {
    if let Err(err) = run() {
        eprintln!("error: {err}");
        process::exit(1);
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    // ------------------------------------------------------------------
    // Scope: JSON problem parsing for the `resolve` subcommand.
    //
    // These tests cover:
    // - Cartesian and polar observation entry producing the same complex
    //   value.
    // - Full problem documents with and without the optional fields.
    //
    // They intentionally DO NOT cover:
    // - End-to-end subcommand runs (the resolver pipeline has its own
    //   integration suite).
    // ------------------------------------------------------------------

    use num_complex::Complex64;

    use super::{ObservationInput, ProblemInput};

    /// Purpose: polar entry is just another spelling of a complex number.
    ///
    /// Given: `{re, im}` and `{amplitude, phase}` forms of the same value.
    ///
    /// Expect: both convert to the same `Complex64` within float tolerance.
    #[test]
    fn polar_and_cartesian_entries_agree() {
        // Arrange
        let z = Complex64::from_polar(2.0, 0.75);
        let cartesian = ObservationInput::Cartesian { re: z.re, im: z.im };
        let polar = ObservationInput::Polar { amplitude: 2.0, phase: 0.75 };

        // Act
        let from_cartesian = cartesian.to_complex();
        let from_polar = polar.to_complex();

        // Assert
        assert!(
            (from_cartesian - from_polar).norm() < 1e-12,
            "the two entry forms should describe the same observation"
        );
    }

    /// Purpose: a full problem document parses with every optional field.
    ///
    /// Given: JSON with mixed observation forms, bounds, a budget, and an
    /// explicit constraint list.
    ///
    /// Expect: all fields land where they should.
    #[test]
    fn full_problem_document_parses() {
        // Arrange
        let raw = r#"{
            "observations": [
                {"re": 1.0, "im": 0.0},
                {"amplitude": 1.0, "phase": 1.5707963267948966}
            ],
            "wavelengths": [0.01, 0.02],
            "phase_variances": [0.05, 0.05],
            "min_distance": 0.5,
            "max_distance": 20.0,
            "max_iter": 5000,
            "constraints": [
                {"var": {"cycle": 1}, "cmp": "ge", "bound": 1.0}
            ]
        }"#;

        // Act
        let problem: ProblemInput = serde_json::from_str(raw).expect("document should parse");

        // Assert
        assert_eq!(problem.observations.len(), 2, "both observation forms should be accepted");
        let second = problem.observations[1].to_complex();
        assert!(second.re.abs() < 1e-12 && (second.im - 1.0).abs() < 1e-12);
        assert_eq!(problem.max_iter, Some(5000));
        assert_eq!(problem.min_distance, Some(0.5));
        assert_eq!(problem.max_distance, Some(20.0));
        assert_eq!(problem.constraints.len(), 1, "explicit constraints should be kept");
    }

    /// Purpose: optional fields really are optional.
    ///
    /// Given: a minimal document with only the three required arrays.
    ///
    /// Expect: parse succeeds with `None`/empty defaults.
    #[test]
    fn minimal_problem_document_parses() {
        // Arrange
        let raw = r#"{
            "observations": [{"re": 1.0, "im": 0.5}],
            "wavelengths": [0.01],
            "phase_variances": [0.1]
        }"#;

        // Act
        let problem: ProblemInput = serde_json::from_str(raw).expect("document should parse");

        // Assert
        assert_eq!(problem.max_iter, None);
        assert_eq!(problem.min_distance, None);
        assert_eq!(problem.max_distance, None);
        assert!(problem.constraints.is_empty(), "constraint list should default to empty");
    }
}
