//! Philips Hue hub, smart bulbs and occupancy sensors.

use crate::units::{MJ_TO_J, YEAR_TO_HOURS, annual_energy_j};

use super::types::{
    DeviceCounts, EnergyProvider, NO_REPLACEMENT, Scenario, ScenarioTable, amortized_replacement,
    duty_cycle_power_w,
};

/// Embodied energy per occupancy sensor (MJ).
const EMBODIED_SENSOR_MJ: ScenarioTable<f64> = ScenarioTable::new(7.092, 9.59, 11.61);
/// Embodied energy per smart bulb (MJ).
const EMBODIED_BULB_MJ: ScenarioTable<f64> = ScenarioTable::new(4.32, 11.94, 13.45);
/// Embodied energy per hub (MJ).
const EMBODIED_HUB_MJ: ScenarioTable<f64> = ScenarioTable::new(26.57, 39.21, 57.82);

/// Bulb standby draw while switched off by the overlay (W), datasheet.
const BULB_STANDBY_W: ScenarioTable<f64> = ScenarioTable::new(0.4, 0.5, 0.5);

/// Hub draw from the datasheet (W).
const HUB_SLEEP_SPEC_W: f64 = 0.10;
const HUB_ACTIVE_SPEC_W: f64 = 1.25;
/// Hub active draw measured on a bench multimeter (W).
const HUB_ACTIVE_MEASURED_W: f64 = 1.29;

/// Share of time the hub sleeps under the datasheet assumption.
const HUB_SLEEP_RATIO_SPEC: f64 = 0.99;
/// The measured hub never slept, so no sleep draw was recorded.
const HUB_SLEEP_RATIO_MEASURED: f64 = 0.0;

const RAW_MATERIALS_MJ: f64 = 0.0;
const END_OF_LIFE_MJ: f64 = 0.0;

/// Lamp technology the bulbs replace; only the rated lifetime differs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lamp {
    Led,
    Cfl,
    Incandescent,
}

impl Lamp {
    /// Rated lamp lifetime (hours).
    pub const fn lifetime_hours(self) -> f64 {
        match self {
            Self::Led => 25e3,
            Self::Cfl => 10e3,
            Self::Incandescent => 1e3,
        }
    }
}

/// Provider for Hue systems counted as `[sensors, bulbs, hubs]`.
#[derive(Debug, Clone, Copy)]
pub struct HueProvider {
    pub lamp: Lamp,
}

impl HueProvider {
    pub const fn new(lamp: Lamp) -> Self {
        Self { lamp }
    }

    /// Years between lamp replacements given the remaining utilization.
    ///
    /// Reported for context only; bulb replacement is not charged to the
    /// overlay (see [`EnergyProvider::replacement_interval_years`]).
    pub fn lamp_replacement_years(&self, beta: f64, alpha0: f64) -> f64 {
        self.lamp.lifetime_hours() / (beta * YEAR_TO_HOURS * (1.0 - alpha0))
    }

    fn hub_power_w(scenario: Scenario) -> f64 {
        match scenario {
            Scenario::Low => {
                duty_cycle_power_w(HUB_SLEEP_RATIO_SPEC, HUB_SLEEP_SPEC_W, HUB_ACTIVE_SPEC_W)
            }
            Scenario::Benchmark | Scenario::High => {
                duty_cycle_power_w(HUB_SLEEP_RATIO_MEASURED, 0.0, HUB_ACTIVE_MEASURED_W)
            }
        }
    }
}

impl EnergyProvider for HueProvider {
    fn raw_materials_energy(&self, _scenario: Scenario) -> f64 {
        RAW_MATERIALS_MJ * MJ_TO_J
    }

    fn embodied_energy(&self, counts: &DeviceCounts, scenario: Scenario) -> f64 {
        let mj = f64::from(counts.sensors) * EMBODIED_SENSOR_MJ.get(scenario)
            + f64::from(counts.nodes) * EMBODIED_BULB_MJ.get(scenario)
            + f64::from(counts.hubs) * EMBODIED_HUB_MJ.get(scenario);
        mj * MJ_TO_J
    }

    fn operational_energy_per_year(&self, counts: &DeviceCounts, scenario: Scenario) -> f64 {
        // sensors are battery powered and not counted
        let bulbs = annual_energy_j(BULB_STANDBY_W.get(scenario));
        let hubs = annual_energy_j(Self::hub_power_w(scenario));
        f64::from(counts.nodes) * bulbs + f64::from(counts.hubs) * hubs
    }

    fn maintenance_energy_per_year(
        &self,
        replacement_interval_years: f64,
        counts: &DeviceCounts,
        scenario: Scenario,
    ) -> f64 {
        let bulbs_mj = f64::from(counts.nodes) * EMBODIED_BULB_MJ.get(scenario);
        amortized_replacement(bulbs_mj, replacement_interval_years) * MJ_TO_J
    }

    fn end_of_life_energy(&self, _scenario: Scenario) -> f64 {
        END_OF_LIFE_MJ * MJ_TO_J
    }

    fn replacement_interval_years(&self, _beta: f64, _alpha0: f64) -> f64 {
        NO_REPLACEMENT
    }
}
