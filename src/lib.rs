//! Energy payback time of smart overlay systems.
//!
//! Device providers report the energy cost of an overlay (smart bulbs and
//! hubs, office sensor networks, smart meters); the model weighs it against
//! the energy saved through behaviour change and derives when the overlay
//! pays back.

pub mod cli;
pub mod config;
pub mod devices;
pub mod error;
pub mod io;
/// Formulas, alpha schedule, root solver, sweeps and curves.
pub mod model;
pub mod reporting;
pub mod units;

pub use error::{PaybackError, Result};
