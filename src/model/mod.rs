//! Payback-time model: formulas, alpha schedule, root solver and orchestration.

pub mod curves;
pub mod formulas;
pub mod report;
pub mod schedule;
pub mod solver;
pub mod sweep;
pub mod system;
pub mod types;

pub use curves::{EnergyCurves, energy_curves};
pub use formulas::{energy_cost, net_gains, net_gains_series, payback_time};
pub use report::{LifetimeSavings, PaybackReport, compute_payback_report};
pub use schedule::{AlphaSchedule, Phase, PhaseLength};
pub use solver::{NewtonSolver, RootEstimate, solve_payback};
pub use sweep::{AlphaSweep, FleetPoint, alpha_sweep, fleet_reference_alpha, fleet_sweep};
pub use system::SmartSystem;
pub use types::{ModelParams, OverlayEnergy, Usage};
