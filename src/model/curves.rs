//! Sampled energy curves over the time horizon.

use tracing::debug;

use crate::devices::Scenario;
use crate::units::{YEAR_TO_DAYS, YEAR_TO_SEC};

use super::formulas::net_gains_series;
use super::schedule::AlphaSchedule;
use super::solver::linspace;
use super::system::SmartSystem;
use super::types::ModelParams;

/// Time series for one scenario and one alpha0, all energies in joules.
#[derive(Debug, Clone, PartialEq)]
pub struct EnergyCurves {
    pub scenario: Scenario,
    pub alpha0: f64,
    pub times_years: Vec<f64>,
    /// Raw materials, embodied and end-of-life energy plus accrued maintenance.
    pub fixed_and_maintenance_j: Vec<f64>,
    /// Accrued operational energy, in primary energy.
    pub operational_j: Vec<f64>,
    /// Sum of the two above.
    pub overlay_total_j: Vec<f64>,
    /// Energy saved if alpha held its initial value.
    pub saved_constant_j: Vec<f64>,
    /// Energy saved under the configured schedule.
    pub saved_schedule_j: Vec<f64>,
    pub net_gains_j: Vec<f64>,
    pub alpha: Vec<f64>,
}

impl EnergyCurves {
    pub fn len(&self) -> usize {
        self.times_years.len()
    }

    pub fn is_empty(&self) -> bool {
        self.times_years.is_empty()
    }
}

/// Number of curve samples: one per day of the horizon.
pub fn curve_points(time_horizon_years: f64) -> usize {
    (YEAR_TO_DAYS * time_horizon_years).floor().max(0.0) as usize
}

/// Samples every curve a plot of `system` at `alpha0` needs.
pub fn energy_curves(
    system: &SmartSystem,
    scenario: Scenario,
    alpha0: f64,
    params: &ModelParams,
) -> EnergyCurves {
    let horizon = params.time_horizon_years;
    let times = linspace(0.0, horizon, curve_points(horizon));
    let overlay = system.overlay_energies(alpha0).get(scenario);
    let usage = system.usage(alpha0);

    let fixed_and_maintenance_j: Vec<f64> = times
        .iter()
        .map(|t| overlay.fixed_j() + overlay.maintenance_w * YEAR_TO_SEC * t)
        .collect();
    let operational_j: Vec<f64> = times
        .iter()
        .map(|t| params.elec_to_primary * overlay.operational_w * YEAR_TO_SEC * t)
        .collect();
    let overlay_total_j = fixed_and_maintenance_j
        .iter()
        .zip(&operational_j)
        .map(|(fixed, op)| fixed + op)
        .collect();

    let saved_constant_j = AlphaSchedule::constant().energy_saved_series(&times, &usage, params);
    let saved_schedule_j = system.schedule.energy_saved_series(&times, &usage, params);
    let net_gains_j = net_gains_series(&times, &overlay, &usage, &system.schedule, params);
    let alpha = system.schedule.alpha_series(&times, alpha0, horizon);

    debug!(%scenario, alpha0, points = times.len(), "energy curves sampled");

    EnergyCurves {
        scenario,
        alpha0,
        times_years: times,
        fixed_and_maintenance_j,
        operational_j,
        overlay_total_j,
        saved_constant_j,
        saved_schedule_j,
        net_gains_j,
        alpha,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DeviceCounts, DeviceType};

    fn meter() -> SmartSystem {
        SmartSystem::new(
            DeviceType::SmartMeter,
            524.0,
            vec![0.03, 0.08, 0.15],
            AlphaSchedule::from_pairs(&[[1.0, 0.5], [0.0, -1.0]], 50.0).expect("valid"),
            1.0,
            15.0,
            DeviceCounts::default(),
        )
    }

    #[test]
    fn one_point_per_day() {
        assert_eq!(curve_points(50.0), 18262);
        assert_eq!(curve_points(1.0), 365);
    }

    #[test]
    fn curves_start_at_fixed_cost() {
        let params = ModelParams::default();
        let curves = energy_curves(&meter(), Scenario::Benchmark, 0.08, &params);
        assert_eq!(curves.len(), 18262);
        assert_eq!(curves.operational_j[0], 0.0);
        assert_eq!(curves.saved_schedule_j[0], 0.0);
        assert_eq!(curves.net_gains_j[0], -curves.overlay_total_j[0]);
        assert_eq!(curves.times_years[curves.len() - 1], 50.0);
    }

    #[test]
    fn schedule_saves_no_more_than_constant_alpha() {
        let params = ModelParams::default();
        let curves = energy_curves(&meter(), Scenario::High, 0.08, &params);
        for (s, c) in curves.saved_schedule_j.iter().zip(&curves.saved_constant_j) {
            assert!(s <= c);
        }
        assert_eq!(curves.alpha[0], 0.08);
        assert_eq!(curves.alpha[curves.len() - 1], 0.0);
    }
}
