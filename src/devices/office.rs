//! Office lighting sensor network: occupancy sensors, luminaire nodes and hubs.

use crate::units::{MJ_TO_J, YEAR_TO_HOURS, annual_energy_j};

use super::types::{
    DeviceCounts, EnergyProvider, Scenario, ScenarioTable, amortized_replacement,
    duty_cycle_power_w,
};

/// Rated lifetime of the controlled luminaires (hours).
pub const LIGHT_LIFETIME_HOURS: f64 = 25e3;

const EMBODIED_SENSOR_MJ: ScenarioTable<f64> = ScenarioTable::new(7.092, 9.59, 11.61);
const EMBODIED_NODE_MJ: ScenarioTable<f64> = ScenarioTable::new(4.32, 11.94, 13.45);
const EMBODIED_HUB_MJ: ScenarioTable<f64> = ScenarioTable::new(26.57, 39.21, 57.82);

/// Mean draws (W), identical across scenarios.
const SENSOR_MEAN_W: f64 = 0.25;
const NODE_MEAN_W: f64 = 0.025;
const HUB_MEAN_W: f64 = 2.5;
const HUB_SLEEP_RATIO: f64 = 0.0;

/// Energy to replace one node (MJ); nodes outlive the luminaires.
const NODE_REPLACEMENT_MJ: f64 = 0.0;

/// Provider for office systems counted as `[sensors, nodes, hubs]`.
#[derive(Debug, Clone, Copy, Default)]
pub struct OfficeProvider;

impl EnergyProvider for OfficeProvider {
    fn raw_materials_energy(&self, _scenario: Scenario) -> f64 {
        0.0
    }

    fn embodied_energy(&self, counts: &DeviceCounts, scenario: Scenario) -> f64 {
        let mj = f64::from(counts.sensors) * EMBODIED_SENSOR_MJ.get(scenario)
            + f64::from(counts.nodes) * EMBODIED_NODE_MJ.get(scenario)
            + f64::from(counts.hubs) * EMBODIED_HUB_MJ.get(scenario);
        mj * MJ_TO_J
    }

    fn operational_energy_per_year(&self, counts: &DeviceCounts, _scenario: Scenario) -> f64 {
        let hub_w = duty_cycle_power_w(HUB_SLEEP_RATIO, HUB_MEAN_W, HUB_MEAN_W);
        f64::from(counts.sensors) * annual_energy_j(SENSOR_MEAN_W)
            + f64::from(counts.nodes) * annual_energy_j(NODE_MEAN_W)
            + f64::from(counts.hubs) * annual_energy_j(hub_w)
    }

    fn maintenance_energy_per_year(
        &self,
        replacement_interval_years: f64,
        counts: &DeviceCounts,
        _scenario: Scenario,
    ) -> f64 {
        let mj = f64::from(counts.nodes) * NODE_REPLACEMENT_MJ;
        amortized_replacement(mj, replacement_interval_years) * MJ_TO_J
    }

    fn end_of_life_energy(&self, _scenario: Scenario) -> f64 {
        0.0
    }

    /// Luminaire lifetime stretched by the utilization the overlay avoids.
    fn replacement_interval_years(&self, beta: f64, alpha0: f64) -> f64 {
        LIGHT_LIFETIME_HOURS / (beta * YEAR_TO_HOURS * (1.0 - alpha0))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::units::YEAR_TO_SEC;

    #[test]
    fn operational_power_of_one_sensor_and_four_nodes() {
        let counts = DeviceCounts::new(1, 4, 0);
        let watts =
            OfficeProvider.operational_energy_per_year(&counts, Scenario::Benchmark) / YEAR_TO_SEC;
        assert!((watts - 0.35).abs() < 1e-12);
    }

    #[test]
    fn operational_does_not_depend_on_scenario() {
        let counts = DeviceCounts::new(3, 10, 1);
        let low = OfficeProvider.operational_energy_per_year(&counts, Scenario::Low);
        let high = OfficeProvider.operational_energy_per_year(&counts, Scenario::High);
        assert_eq!(low, high);
    }

    #[test]
    fn node_maintenance_is_free() {
        let counts = DeviceCounts::new(1, 4, 0);
        let interval = OfficeProvider.replacement_interval_years(0.17, 0.35);
        assert!(interval > 0.0);
        assert_eq!(
            OfficeProvider.maintenance_energy_per_year(interval, &counts, Scenario::High),
            0.0
        );
    }

    #[test]
    fn embodied_energy_orders_scenarios() {
        let counts = DeviceCounts::new(1, 4, 1);
        let low = OfficeProvider.embodied_energy(&counts, Scenario::Low);
        let mid = OfficeProvider.embodied_energy(&counts, Scenario::Benchmark);
        let high = OfficeProvider.embodied_energy(&counts, Scenario::High);
        assert!(low <= mid && mid <= high);
    }
}
