//! Residential smart meter.

use crate::units::{MJ_TO_J, YEAR_TO_SEC};

use super::types::{
    DeviceCounts, EnergyProvider, Scenario, ScenarioTable, amortized_replacement,
    duty_cycle_power_w,
};

const EMBODIED_TYPICAL_MJ: f64 = 1511.31;
const EMBODIED_MJ: ScenarioTable<f64> = ScenarioTable::new(
    0.9 * EMBODIED_TYPICAL_MJ,
    EMBODIED_TYPICAL_MJ,
    1.1 * EMBODIED_TYPICAL_MJ,
);

const ACTIVE_W: ScenarioTable<f64> = ScenarioTable::new(1.6, 1.8, 3.0);
/// The meter is always active.
const SLEEP_RATIO: f64 = 0.0;
const SLEEP_W: f64 = 0.0;
/// Extra draw of the data link (W).
const DATA_LINK_W: f64 = 0.0;

const RAW_MATERIALS_MJ: f64 = 0.0;
const END_OF_LIFE_MJ: f64 = 0.0;

/// Meter replacement interval (years); effectively never.
pub const REPLACEMENT_INTERVAL_YEARS: f64 = 1e6;

/// Provider for a single smart meter; device counts are ignored.
#[derive(Debug, Clone, Copy, Default)]
pub struct SmartMeterProvider;

impl EnergyProvider for SmartMeterProvider {
    fn raw_materials_energy(&self, _scenario: Scenario) -> f64 {
        RAW_MATERIALS_MJ * MJ_TO_J
    }

    fn embodied_energy(&self, _counts: &DeviceCounts, scenario: Scenario) -> f64 {
        EMBODIED_MJ.get(scenario) * MJ_TO_J
    }

    fn operational_energy_per_year(&self, _counts: &DeviceCounts, scenario: Scenario) -> f64 {
        let watts = duty_cycle_power_w(SLEEP_RATIO, SLEEP_W, ACTIVE_W.get(scenario) + DATA_LINK_W);
        watts * YEAR_TO_SEC
    }

    fn maintenance_energy_per_year(
        &self,
        replacement_interval_years: f64,
        _counts: &DeviceCounts,
        scenario: Scenario,
    ) -> f64 {
        amortized_replacement(EMBODIED_MJ.get(scenario), replacement_interval_years) * MJ_TO_J
    }

    fn end_of_life_energy(&self, _scenario: Scenario) -> f64 {
        END_OF_LIFE_MJ * MJ_TO_J
    }

    fn replacement_interval_years(&self, _beta: f64, _alpha0: f64) -> f64 {
        REPLACEMENT_INTERVAL_YEARS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embodied_brackets_typical_by_ten_percent() {
        let none = DeviceCounts::default();
        let low = SmartMeterProvider.embodied_energy(&none, Scenario::Low);
        let high = SmartMeterProvider.embodied_energy(&none, Scenario::High);
        assert!((low - 0.9 * 1511.31e6).abs() < 1e-2);
        assert!((high - 1.1 * 1511.31e6).abs() < 1e-2);
    }

    #[test]
    fn maintenance_amortizes_one_meter_over_interval() {
        let none = DeviceCounts::default();
        let e = SmartMeterProvider.maintenance_energy_per_year(
            REPLACEMENT_INTERVAL_YEARS,
            &none,
            Scenario::Benchmark,
        );
        assert!((e - 1511.31).abs() < 1e-9);
    }

    #[test]
    fn operational_is_active_power_all_year() {
        let none = DeviceCounts::default();
        let e = SmartMeterProvider.operational_energy_per_year(&none, Scenario::High);
        assert!((e / YEAR_TO_SEC - 3.0).abs() < 1e-12);
    }
}
