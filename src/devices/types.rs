//! Common types and traits for device energy providers.

use std::fmt;
use std::str::FromStr;

use crate::error::PaybackError;

use super::hue::{HueProvider, Lamp};
use super::office::OfficeProvider;
use super::smart_meter::SmartMeterProvider;

/// Which constant table a provider answers from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Scenario {
    Low,
    Benchmark,
    High,
}

impl Scenario {
    /// All scenarios, pessimistic to optimistic table order.
    pub const ALL: [Scenario; 3] = [Scenario::Low, Scenario::Benchmark, Scenario::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "LOW",
            Self::Benchmark => "BENCHMARK",
            Self::High => "HIGH",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = PaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "BENCHMARK" => Ok(Self::Benchmark),
            "HIGH" => Ok(Self::High),
            other => Err(PaybackError::UnknownScenario(other.to_string())),
        }
    }
}

/// One value per scenario.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScenarioTable<T> {
    pub low: T,
    pub benchmark: T,
    pub high: T,
}

impl<T: Copy> ScenarioTable<T> {
    pub const fn new(low: T, benchmark: T, high: T) -> Self {
        Self {
            low,
            benchmark,
            high,
        }
    }

    pub fn get(&self, scenario: Scenario) -> T {
        match scenario {
            Scenario::Low => self.low,
            Scenario::Benchmark => self.benchmark,
            Scenario::High => self.high,
        }
    }

    /// Builds a table by evaluating `f` once per scenario.
    pub fn from_fn(mut f: impl FnMut(Scenario) -> T) -> Self {
        Self::new(f(Scenario::Low), f(Scenario::Benchmark), f(Scenario::High))
    }
}

/// Device counts of one deployment.
///
/// Lighting overlays are made of occupancy sensors, nodes (smart bulbs or
/// luminaire nodes) and hubs. Smart meters carry no counts.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeviceCounts {
    pub sensors: u32,
    pub nodes: u32,
    pub hubs: u32,
}

impl DeviceCounts {
    pub const fn new(sensors: u32, nodes: u32, hubs: u32) -> Self {
        Self {
            sensors,
            nodes,
            hubs,
        }
    }
}

impl From<[u32; 3]> for DeviceCounts {
    fn from([sensors, nodes, hubs]: [u32; 3]) -> Self {
        Self::new(sensors, nodes, hubs)
    }
}

/// Five energy terms of one provider for one scenario, in joules.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviceEnergyReport {
    pub raw_materials_j: f64,
    pub embodied_j: f64,
    /// Operational energy over one year.
    pub operational_per_year_j: f64,
    /// Maintenance energy over one year.
    pub maintenance_per_year_j: f64,
    pub end_of_life_j: f64,
}

/// Replacement interval meaning "no replacement modeled".
pub const NO_REPLACEMENT: f64 = -1.0;

/// Energy data source for one device type.
///
/// Implementations only differ in their constant tables and in how they blend
/// sleep and active power; the query shape is shared.
pub trait EnergyProvider {
    /// Energy to extract raw materials (J).
    fn raw_materials_energy(&self, scenario: Scenario) -> f64;

    /// Manufacturing energy of the whole fleet (J).
    fn embodied_energy(&self, counts: &DeviceCounts, scenario: Scenario) -> f64;

    /// Energy drawn by the overlay over one year (J).
    fn operational_energy_per_year(&self, counts: &DeviceCounts, scenario: Scenario) -> f64;

    /// Replacement energy over one year (J).
    ///
    /// A negative `replacement_interval_years` means no replacement is
    /// modeled and yields zero.
    fn maintenance_energy_per_year(
        &self,
        replacement_interval_years: f64,
        counts: &DeviceCounts,
        scenario: Scenario,
    ) -> f64;

    /// Disposal and recycling energy (J).
    fn end_of_life_energy(&self, scenario: Scenario) -> f64;

    /// Replacement interval fed to [`EnergyProvider::maintenance_energy_per_year`].
    fn replacement_interval_years(&self, beta: f64, alpha0: f64) -> f64;

    /// Initial guess for the net-gains root solver (years).
    fn solver_seed_years(&self) -> f64 {
        DEFAULT_SOLVER_SEED_YEARS
    }

    /// Queries all five terms at once.
    fn energy_report(
        &self,
        counts: &DeviceCounts,
        scenario: Scenario,
        replacement_interval_years: f64,
    ) -> DeviceEnergyReport {
        DeviceEnergyReport {
            raw_materials_j: self.raw_materials_energy(scenario),
            embodied_j: self.embodied_energy(counts, scenario),
            operational_per_year_j: self.operational_energy_per_year(counts, scenario),
            maintenance_per_year_j: self.maintenance_energy_per_year(
                replacement_interval_years,
                counts,
                scenario,
            ),
            end_of_life_j: self.end_of_life_energy(scenario),
        }
    }
}

/// Solver seed shared by the shipped providers (years).
pub const DEFAULT_SOLVER_SEED_YEARS: f64 = 0.234;

/// Average power of a device that sleeps for a fraction of the time.
///
/// `sleep_ratio` is the share of time spent asleep.
pub fn duty_cycle_power_w(sleep_ratio: f64, sleep_w: f64, active_w: f64) -> f64 {
    sleep_ratio * sleep_w + (1.0 - sleep_ratio) * active_w
}

/// Maintenance helper: replaced embodied energy spread over the interval.
pub(crate) fn amortized_replacement(embodied_mj: f64, replacement_interval_years: f64) -> f64 {
    if replacement_interval_years < 0.0 {
        return 0.0;
    }
    embodied_mj / replacement_interval_years
}

/// Smart-overlay system types with a registered provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceType {
    Hue(Lamp),
    OfficeLighting,
    SmartMeter,
}

static HUE_LED: HueProvider = HueProvider::new(Lamp::Led);
static HUE_CFL: HueProvider = HueProvider::new(Lamp::Cfl);
static HUE_INC: HueProvider = HueProvider::new(Lamp::Incandescent);
static OFFICE: OfficeProvider = OfficeProvider;
static SMART_METER: SmartMeterProvider = SmartMeterProvider;

impl DeviceType {
    /// Every registered system identifier.
    pub const IDS: &[&str] = &[
        "PHILIPS-HUE-LED",
        "PHILIPS-HUE-CFL",
        "PHILIPS-HUE-INC",
        "OFFICE-LIGHTNING",
        "SMART-METER",
    ];

    pub fn id(self) -> &'static str {
        match self {
            Self::Hue(Lamp::Led) => "PHILIPS-HUE-LED",
            Self::Hue(Lamp::Cfl) => "PHILIPS-HUE-CFL",
            Self::Hue(Lamp::Incandescent) => "PHILIPS-HUE-INC",
            Self::OfficeLighting => "OFFICE-LIGHTNING",
            Self::SmartMeter => "SMART-METER",
        }
    }

    /// Provider answering energy queries for this system type.
    pub fn provider(self) -> &'static dyn EnergyProvider {
        match self {
            Self::Hue(Lamp::Led) => &HUE_LED,
            Self::Hue(Lamp::Cfl) => &HUE_CFL,
            Self::Hue(Lamp::Incandescent) => &HUE_INC,
            Self::OfficeLighting => &OFFICE,
            Self::SmartMeter => &SMART_METER,
        }
    }

    /// Whether this system is described by a device-count vector.
    pub fn uses_counts(self) -> bool {
        !matches!(self, Self::SmartMeter)
    }

    /// Deployment assumed when a lighting configuration gives no counts.
    pub fn default_counts(self) -> Option<DeviceCounts> {
        match self {
            Self::Hue(_) => Some(DeviceCounts::new(2, 8, 1)),
            Self::OfficeLighting => Some(DeviceCounts::new(1, 4, 0)),
            Self::SmartMeter => None,
        }
    }

    /// Baseline power of the whole system (W).
    ///
    /// Hue baseline power is given per bulb; other systems give it for the
    /// whole installation.
    pub fn baseline_power_system(self, baseline_power_w: f64, counts: &DeviceCounts) -> f64 {
        match self {
            Self::Hue(_) => baseline_power_w * f64::from(counts.nodes),
            Self::OfficeLighting | Self::SmartMeter => baseline_power_w,
        }
    }

    /// Short description of the deployment used in report titles.
    pub fn setup_label(self, counts: &DeviceCounts) -> String {
        match self {
            Self::Hue(_) => format!(
                "{}#OS {}#BULBS {}#HUBS",
                counts.sensors, counts.nodes, counts.hubs
            ),
            Self::OfficeLighting => format!(
                "{}#SENSOR {}#NODES {}#HUBS MODULE",
                counts.sensors, counts.nodes, counts.hubs
            ),
            Self::SmartMeter => "1#LINKY".to_string(),
        }
    }
}

impl fmt::Display for DeviceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id())
    }
}

impl FromStr for DeviceType {
    type Err = PaybackError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "PHILIPS-HUE-LED" => Ok(Self::Hue(Lamp::Led)),
            "PHILIPS-HUE-CFL" => Ok(Self::Hue(Lamp::Cfl)),
            "PHILIPS-HUE-INC" => Ok(Self::Hue(Lamp::Incandescent)),
            "OFFICE-LIGHTNING" => Ok(Self::OfficeLighting),
            "SMART-METER" => Ok(Self::SmartMeter),
            other => Err(PaybackError::UnsupportedSystemType(other.to_string())),
        }
    }
}
