//! Sensitivity sweeps over alpha0 and fleet size.

use tracing::info;

use crate::devices::ScenarioTable;
use crate::error::{PaybackError, Result};

use super::formulas::payback_time;
use super::report::{PaybackReport, compute_payback_report};
use super::system::SmartSystem;
use super::types::ModelParams;

/// Default alpha0 increment of [`alpha_sweep`].
pub const DEFAULT_ALPHA_STEP: f64 = 0.001;

/// Coarse alpha0 increment used to vet the solver seed when the full sweep is skipped.
pub const SEED_CHECK_STEP: f64 = 0.05;

/// Nodes a single Hue hub can drive.
pub const DEFAULT_MAX_NODES: u32 = 50;

/// Reports for alpha0 = 0, step, 2*step, ... below 1.
#[derive(Debug, Clone)]
pub struct AlphaSweep {
    pub reports: Vec<PaybackReport>,
}

impl AlphaSweep {
    /// Fails if the solved payback ever increases with alpha0.
    ///
    /// More savings can only bring payback earlier, so an increase means the
    /// root solver converged to a different root from its seed.
    ///
    /// # Errors
    ///
    /// Returns [`PaybackError::BadSolverSeed`] at the first increase.
    pub fn check_solver_monotonicity(&self, seed_years: f64) -> Result<()> {
        for pair in self.reports.windows(2) {
            let (previous, current) = (&pair[0], &pair[1]);
            if current.tpb_solved - previous.tpb_solved > 0.0 {
                return Err(PaybackError::BadSolverSeed {
                    seed_years,
                    alpha0: current.alpha0,
                    previous_years: previous.tpb_solved,
                    current_years: current.tpb_solved,
                });
            }
        }
        Ok(())
    }

    /// First alpha0 whose worst-case savings at lifetime are not negative.
    pub fn savings_boundary(&self) -> Option<f64> {
        self.reports
            .iter()
            .find(|r| r.savings.worst_pct >= 0.0)
            .map(|r| r.alpha0)
    }

    pub fn len(&self) -> usize {
        self.reports.len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.is_empty()
    }
}

/// alpha0 values `0, step, 2*step, ...` strictly below 1.
pub fn alpha_grid(step: f64) -> Vec<f64> {
    if step.is_nan() || step <= 0.0 {
        return Vec::new();
    }
    (0u32..)
        .map(|i| f64::from(i) * step)
        .take_while(|&alpha0| alpha0 < 1.0)
        .collect()
}

/// Computes a payback report for every alpha0 on the grid.
///
/// The solved series is not checked here; call
/// [`AlphaSweep::check_solver_monotonicity`] on the result.
pub fn alpha_sweep(system: &SmartSystem, step: f64, params: &ModelParams) -> AlphaSweep {
    let grid = alpha_grid(step);
    info!(system = %system.device, points = grid.len(), step, "alpha sweep started");

    let reports: Vec<PaybackReport> = grid
        .into_iter()
        .map(|alpha0| compute_payback_report(system, alpha0, params))
        .collect();

    let sweep = AlphaSweep { reports };
    info!(
        system = %system.device,
        boundary = ?sweep.savings_boundary(),
        "alpha sweep finished"
    );
    sweep
}

/// Closed-form payback for one fleet size.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FleetPoint {
    pub nodes: u32,
    pub tpb: ScenarioTable<f64>,
}

/// alpha0 used for fleet sweeps: the second configured value, or the first
/// when only one is given.
pub fn fleet_reference_alpha(system: &SmartSystem) -> Option<f64> {
    system
        .alpha0
        .get(1)
        .or_else(|| system.alpha0.first())
        .copied()
}

/// Closed-form payback for node counts `1..=max_nodes` at `alpha0`.
///
/// Each point is evaluated on a derived system; `system` is not modified.
pub fn fleet_sweep(
    system: &SmartSystem,
    alpha0: f64,
    max_nodes: u32,
    params: &ModelParams,
) -> Vec<FleetPoint> {
    info!(system = %system.device, alpha0, max_nodes, "fleet sweep started");
    (1..=max_nodes)
        .map(|nodes| {
            let sized = system.with_nodes(nodes);
            let saved_power_w = sized.usage(alpha0).saved_power_w();
            let energies = sized.overlay_energies(alpha0);
            FleetPoint {
                nodes,
                tpb: ScenarioTable::from_fn(|scenario| {
                    payback_time(&energies.get(scenario), saved_power_w, params)
                }),
            }
        })
        .collect()
}
