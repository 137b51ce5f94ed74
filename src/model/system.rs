//! A resolved smart-overlay deployment.

use crate::devices::{DeviceCounts, DeviceType, EnergyProvider, Scenario, ScenarioTable};
use crate::error::{PaybackError, Result};

use super::schedule::AlphaSchedule;
use super::types::{OverlayEnergy, Usage};

/// One smart-overlay deployment with its provider already resolved.
///
/// Immutable once built; sweeps derive new systems instead of mutating this one.
#[derive(Debug, Clone, PartialEq)]
pub struct SmartSystem {
    pub device: DeviceType,
    /// Baseline power per unit as configured (W); see [`SmartSystem::baseline_power_system`].
    pub baseline_power_w: f64,
    /// Candidate initial alpha values explored by the reports.
    pub alpha0: Vec<f64>,
    pub schedule: AlphaSchedule,
    /// Fraction of the day the baseline load is active.
    pub beta: f64,
    pub lifetime_years: f64,
    pub counts: DeviceCounts,
    /// Initial guess for the net-gains root (years).
    pub solver_seed_years: f64,
}

impl SmartSystem {
    /// Creates a system seeded with its provider's default solver guess.
    pub fn new(
        device: DeviceType,
        baseline_power_w: f64,
        alpha0: Vec<f64>,
        schedule: AlphaSchedule,
        beta: f64,
        lifetime_years: f64,
        counts: DeviceCounts,
    ) -> Self {
        Self {
            device,
            baseline_power_w,
            alpha0,
            schedule,
            beta,
            lifetime_years,
            counts,
            solver_seed_years: device.provider().solver_seed_years(),
        }
    }

    pub fn provider(&self) -> &'static dyn EnergyProvider {
        self.device.provider()
    }

    /// Baseline power of the whole deployment (W).
    pub fn baseline_power_system(&self) -> f64 {
        self.device
            .baseline_power_system(self.baseline_power_w, &self.counts)
    }

    pub fn setup_label(&self) -> String {
        self.device.setup_label(&self.counts)
    }

    /// Same deployment with a different node (bulb) count.
    pub fn with_nodes(&self, nodes: u32) -> Self {
        Self {
            counts: DeviceCounts {
                nodes,
                ..self.counts
            },
            ..self.clone()
        }
    }

    pub fn usage(&self, alpha0: f64) -> Usage {
        Usage {
            alpha0,
            beta: self.beta,
            baseline_power_w: self.baseline_power_system(),
        }
    }

    /// Overlay energy terms for every scenario at `alpha0`.
    pub fn overlay_energies(&self, alpha0: f64) -> ScenarioTable<OverlayEnergy> {
        let provider = self.provider();
        let replacement = provider.replacement_interval_years(self.beta, alpha0);
        ScenarioTable::from_fn(|scenario| {
            OverlayEnergy::query(provider, &self.counts, scenario, replacement)
        })
    }

    /// Checks LOW <= BENCHMARK <= HIGH for every provider term.
    ///
    /// Maintenance depends on alpha0 through the replacement interval, so it
    /// is checked for each configured value.
    ///
    /// # Errors
    ///
    /// Returns [`PaybackError::ScenarioOrdering`] naming the first term out of order.
    pub fn check_scenario_ordering(&self) -> Result<()> {
        let provider = self.provider();
        let counts = &self.counts;

        let terms: [(&'static str, ScenarioTable<f64>); 4] = [
            (
                "raw materials",
                ScenarioTable::from_fn(|s| provider.raw_materials_energy(s)),
            ),
            (
                "embodied",
                ScenarioTable::from_fn(|s| provider.embodied_energy(counts, s)),
            ),
            (
                "operational",
                ScenarioTable::from_fn(|s| provider.operational_energy_per_year(counts, s)),
            ),
            (
                "end of life",
                ScenarioTable::from_fn(|s| provider.end_of_life_energy(s)),
            ),
        ];
        for (term, table) in terms {
            ensure_ordered(term, table)?;
        }

        for &alpha0 in &self.alpha0 {
            let interval = provider.replacement_interval_years(self.beta, alpha0);
            let table = ScenarioTable::from_fn(|s: Scenario| {
                provider.maintenance_energy_per_year(interval, counts, s)
            });
            ensure_ordered("maintenance", table)?;
        }
        Ok(())
    }
}

fn ensure_ordered(term: &'static str, table: ScenarioTable<f64>) -> Result<()> {
    if table.low <= table.benchmark && table.benchmark <= table.high {
        Ok(())
    } else {
        Err(PaybackError::ScenarioOrdering {
            term,
            low: table.low,
            benchmark: table.benchmark,
            high: table.high,
        })
    }
}
