//! Core model types: explicit parameters, overlay energy terms and usage inputs.

use crate::devices::{DeviceCounts, DeviceEnergyReport, EnergyProvider, Scenario};
use crate::units::{ELEC_TO_PRIMARY, INFINITE_PAYBACK_YEARS, TIME_HORIZON_YEARS, YEAR_TO_SEC};

/// Immutable parameters handed to every formula entry point.
///
/// # Examples
///
/// ```
/// use smart_payback::model::types::ModelParams;
///
/// let params = ModelParams::default();
/// assert_eq!(params.time_horizon_years, 50.0);
/// assert_eq!(params.infinite_payback_years, 1000.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelParams {
    /// Bound on every time-domain evaluation (years).
    pub time_horizon_years: f64,
    /// Payback reported when the overlay never pays back (years).
    pub infinite_payback_years: f64,
    /// Primary energy per unit of electricity.
    pub elec_to_primary: f64,
    /// Points sampled over the horizon to decide whether net gains ever turn positive.
    pub gains_samples: usize,
}

impl Default for ModelParams {
    fn default() -> Self {
        Self {
            time_horizon_years: TIME_HORIZON_YEARS,
            infinite_payback_years: INFINITE_PAYBACK_YEARS,
            elec_to_primary: ELEC_TO_PRIMARY,
            gains_samples: 1000,
        }
    }
}

/// Energy cost terms of the smart overlay for one scenario.
///
/// Fixed terms are joules; recurring terms are converted to average watts.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct OverlayEnergy {
    pub raw_materials_j: f64,
    pub embodied_j: f64,
    pub end_of_life_j: f64,
    /// Average operational draw (W, electricity).
    pub operational_w: f64,
    /// Average maintenance draw (W, already primary energy).
    pub maintenance_w: f64,
}

impl OverlayEnergy {
    /// Raw materials, manufacturing and disposal (J).
    pub fn fixed_j(&self) -> f64 {
        self.raw_materials_j + self.embodied_j + self.end_of_life_j
    }

    /// Converts the yearly terms of a provider report to power.
    pub fn from_report(report: &DeviceEnergyReport) -> Self {
        Self {
            raw_materials_j: report.raw_materials_j,
            embodied_j: report.embodied_j,
            end_of_life_j: report.end_of_life_j,
            operational_w: report.operational_per_year_j / YEAR_TO_SEC,
            maintenance_w: report.maintenance_per_year_j / YEAR_TO_SEC,
        }
    }

    /// Queries `provider` and converts the result.
    pub fn query(
        provider: &dyn EnergyProvider,
        counts: &DeviceCounts,
        scenario: Scenario,
        replacement_interval_years: f64,
    ) -> Self {
        Self::from_report(&provider.energy_report(counts, scenario, replacement_interval_years))
    }
}

/// Behavioural inputs that drive savings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Usage {
    /// Utilization reduction at the start of the schedule (0..1).
    pub alpha0: f64,
    /// Fraction of the day the baseline load is active (0..=1).
    pub beta: f64,
    /// Baseline power of the whole system (W).
    pub baseline_power_w: f64,
}

impl Usage {
    /// Power saved while alpha holds its initial value (W).
    pub fn saved_power_w(&self) -> f64 {
        self.baseline_power_w * self.alpha0 * self.beta
    }
}
