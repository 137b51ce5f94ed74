//! Closed-form payback time, accumulated overlay cost and net gains.

use crate::units::YEAR_TO_SEC;

use super::schedule::AlphaSchedule;
use super::types::{ModelParams, OverlayEnergy, Usage};

/// Payback time assuming a constant savings rate (years).
///
/// Returns `params.infinite_payback_years` when the overlay never saves more
/// primary energy per year than it costs.
///
/// # Examples
///
/// ```
/// use smart_payback::model::formulas::payback_time;
/// use smart_payback::model::types::{ModelParams, OverlayEnergy};
///
/// let params = ModelParams::default();
/// let overlay = OverlayEnergy { embodied_j: 1e6, operational_w: 2.0, ..Default::default() };
/// assert_eq!(payback_time(&overlay, 1.0, &params), params.infinite_payback_years);
/// ```
pub fn payback_time(overlay: &OverlayEnergy, saved_power_w: f64, params: &ModelParams) -> f64 {
    let numerator = overlay.fixed_j();
    let denominator = params.elec_to_primary * YEAR_TO_SEC * (saved_power_w - overlay.operational_w)
        - YEAR_TO_SEC * overlay.maintenance_w;

    if denominator <= 0.0 {
        params.infinite_payback_years
    } else {
        numerator / denominator
    }
}

/// Cumulative primary energy of the overlay at `t_years` (J).
pub fn energy_cost(overlay: &OverlayEnergy, t_years: f64, params: &ModelParams) -> f64 {
    overlay.fixed_j()
        + (params.elec_to_primary * overlay.operational_w + overlay.maintenance_w)
            * YEAR_TO_SEC
            * t_years
}

/// Net gains at `t_years`: energy saved under `schedule` minus overlay cost (J).
pub fn net_gains(
    t_years: f64,
    overlay: &OverlayEnergy,
    usage: &Usage,
    schedule: &AlphaSchedule,
    params: &ModelParams,
) -> f64 {
    schedule.energy_saved(t_years, usage, params) - energy_cost(overlay, t_years, params)
}

/// [`net_gains`] over a sequence of times.
pub fn net_gains_series(
    times_years: &[f64],
    overlay: &OverlayEnergy,
    usage: &Usage,
    schedule: &AlphaSchedule,
    params: &ModelParams,
) -> Vec<f64> {
    times_years
        .iter()
        .map(|&t| net_gains(t, overlay, usage, schedule, params))
        .collect()
}
