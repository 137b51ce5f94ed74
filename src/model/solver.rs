//! Root solving of the net-gains curve.

use tracing::{debug, warn};

use super::formulas::net_gains;
use super::schedule::AlphaSchedule;
use super::types::{ModelParams, OverlayEnergy, Usage};

/// Result of one Newton run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RootEstimate {
    /// Last iterate (years).
    pub root: f64,
    pub iterations: usize,
    /// `false` when the run stopped on the iteration cap or a flat derivative.
    pub converged: bool,
}

/// Newton iteration with a central-difference derivative.
///
/// Stops once the step is below `x_tolerance` relative to the iterate. A
/// run that does not converge still returns its last iterate; callers guard
/// the result elsewhere.
#[derive(Debug, Clone, Copy)]
pub struct NewtonSolver {
    pub x_tolerance: f64,
    pub max_iterations: usize,
}

impl Default for NewtonSolver {
    fn default() -> Self {
        Self {
            x_tolerance: 1.49012e-8,
            max_iterations: 400,
        }
    }
}

impl NewtonSolver {
    pub fn solve<F>(&self, f: F, seed: f64) -> RootEstimate
    where
        F: Fn(f64) -> f64,
    {
        let mut x = seed;
        for iteration in 1..=self.max_iterations {
            let fx = f(x);
            if fx == 0.0 {
                return RootEstimate {
                    root: x,
                    iterations: iteration,
                    converged: true,
                };
            }

            let h = 1e-7 * (1.0 + x.abs());
            let derivative = (f(x + h) - f(x - h)) / (2.0 * h);
            if derivative == 0.0 || !derivative.is_finite() {
                return RootEstimate {
                    root: x,
                    iterations: iteration,
                    converged: false,
                };
            }

            let step = fx / derivative;
            x -= step;
            if step.abs() <= self.x_tolerance * x.abs().max(self.x_tolerance) {
                return RootEstimate {
                    root: x,
                    iterations: iteration,
                    converged: true,
                };
            }
        }

        RootEstimate {
            root: x,
            iterations: self.max_iterations,
            converged: false,
        }
    }
}

/// `n` evenly spaced points over `[start, end]`, both ends included.
pub fn linspace(start: f64, end: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (end - start) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { end } else { start + step * i as f64 })
                .collect()
        }
    }
}

/// Payback time under a time-varying alpha: the root of the net-gains curve (years).
///
/// If the curve sampled over the horizon never reaches zero the overlay never
/// pays back and `params.infinite_payback_years` is returned instead of the
/// solver output.
pub fn solve_payback(
    overlay: &OverlayEnergy,
    usage: &Usage,
    schedule: &AlphaSchedule,
    seed_years: f64,
    params: &ModelParams,
) -> f64 {
    let g = |t: f64| net_gains(t, overlay, usage, schedule, params);

    let max_gains = linspace(0.0, params.time_horizon_years, params.gains_samples)
        .into_iter()
        .map(&g)
        .fold(f64::NEG_INFINITY, f64::max);
    if max_gains < 0.0 {
        debug!(alpha0 = usage.alpha0, max_gains, "net gains never turn positive");
        return params.infinite_payback_years;
    }

    let estimate = NewtonSolver::default().solve(g, seed_years);
    if !estimate.converged {
        warn!(
            alpha0 = usage.alpha0,
            seed_years,
            root = estimate.root,
            iterations = estimate.iterations,
            "net-gains solver did not converge; keeping last iterate"
        );
    } else {
        debug!(
            alpha0 = usage.alpha0,
            root = estimate.root,
            iterations = estimate.iterations,
            "net-gains root found"
        );
    }
    estimate.root
}
