//! Crate-wide error type.

use std::io;

use crate::config::ConfigErrors;

/// Errors raised while configuring or evaluating a payback model.
///
/// All variants are terminal for the current computation; nothing is retried.
#[derive(Debug, thiserror::Error)]
pub enum PaybackError {
    /// A scenario tag outside `LOW`, `BENCHMARK`, `HIGH`.
    #[error("unknown scenario \"{0}\" (expected LOW, BENCHMARK or HIGH)")]
    UnknownScenario(String),

    /// A system identifier with no registered device provider.
    #[error("unsupported system type \"{0}\"; add a device provider or select an existing system")]
    UnsupportedSystemType(String),

    /// The solved payback time increased somewhere along an alpha0 sweep.
    #[error(
        "solver seed {seed_years} years converged to the wrong root: payback rose from \
         {previous_years} to {current_years} years at alpha0 = {alpha0}; choose another seed"
    )]
    BadSolverSeed {
        seed_years: f64,
        alpha0: f64,
        previous_years: f64,
        current_years: f64,
    },

    /// A piecewise alpha schedule that cannot be evaluated.
    #[error("invalid alpha schedule: {0}")]
    InvalidSchedule(String),

    /// A provider table where LOW <= BENCHMARK <= HIGH does not hold.
    #[error("scenario ordering violated for {term}: low={low}, benchmark={benchmark}, high={high}")]
    ScenarioOrdering {
        term: &'static str,
        low: f64,
        benchmark: f64,
        high: f64,
    },

    #[error(transparent)]
    Config(#[from] ConfigErrors),

    #[error("i/o error: {0}")]
    Io(#[from] io::Error),

    #[error("csv error: {0}")]
    Csv(#[from] csv::Error),
}

impl PaybackError {
    /// Process exit status for this error.
    ///
    /// An unsupported system is a user selection problem and exits with 2;
    /// everything else is an internal-consistency or I/O failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::UnsupportedSystemType(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, PaybackError>;
