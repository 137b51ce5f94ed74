//! Three-scenario payback report for one alpha0.

use std::fmt;

use tracing::debug;

use crate::devices::ScenarioTable;

use super::formulas::{energy_cost, net_gains, payback_time};
use super::schedule::AlphaSchedule;
use super::solver::solve_payback;
use super::system::SmartSystem;
use super::types::{ModelParams, OverlayEnergy};

/// Savings at the end of the system lifetime, relative to the overlay cost.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LifetimeSavings {
    /// Net gains with constant alpha, as a percentage of the lifetime overlay energy.
    pub best_pct: f64,
    /// Net gains under the configured schedule, same reference.
    pub worst_pct: f64,
    /// Overlay energy accumulated over the lifetime (J).
    pub overlay_energy_at_lifetime_j: f64,
}

impl LifetimeSavings {
    fn compute(
        system: &SmartSystem,
        overlay: &OverlayEnergy,
        alpha0: f64,
        params: &ModelParams,
    ) -> Self {
        let usage = system.usage(alpha0);
        let lifetime = system.lifetime_years;
        let cost = energy_cost(overlay, lifetime, params);
        let pct = |schedule: &AlphaSchedule| {
            if cost == 0.0 {
                0.0
            } else {
                net_gains(lifetime, overlay, &usage, schedule, params) / cost * 100.0
            }
        };

        Self {
            best_pct: pct(&AlphaSchedule::constant()),
            worst_pct: pct(&system.schedule),
            overlay_energy_at_lifetime_j: cost,
        }
    }
}

/// Everything the orchestrator derives for one system and one alpha0.
#[derive(Debug, Clone, PartialEq)]
pub struct PaybackReport {
    pub alpha0: f64,
    /// Power saved at the initial alpha (W).
    pub saved_power_w: f64,
    /// Closed-form payback per scenario (years).
    pub tpb: ScenarioTable<f64>,
    /// Root of the benchmark net-gains curve under the real schedule (years).
    pub tpb_solved: f64,
    /// Benchmark savings at lifetime.
    pub savings: LifetimeSavings,
    /// Benchmark net gains at lifetime under the real schedule (J).
    pub net_gains_at_lifetime_j: f64,
    /// Overlay energy terms per scenario.
    pub energies: ScenarioTable<OverlayEnergy>,
}

impl PaybackReport {
    pub fn tpb_benchmark(&self) -> f64 {
        self.tpb.benchmark
    }

    /// `[low, high]` closed-form bounds (years).
    pub fn tpb_bounds(&self) -> [f64; 2] {
        [self.tpb.low, self.tpb.high]
    }

    /// Whether the benchmark payback exceeds the system lifetime.
    pub fn pays_back_after(&self, lifetime_years: f64) -> bool {
        self.tpb.benchmark > lifetime_years
    }
}

impl fmt::Display for PaybackReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Payback (alpha0 = {:.1}%) ---", self.alpha0 * 100.0)?;
        writeln!(f, "Saved power:           {:.2} W", self.saved_power_w)?;
        writeln!(
            f,
            "Payback (benchmark):   {:.3} years [{:.3}, {:.3}]",
            self.tpb.benchmark, self.tpb.low, self.tpb.high
        )?;
        writeln!(f, "Payback (varying a):   {:.3} years", self.tpb_solved)?;
        writeln!(
            f,
            "Savings at lifetime:   best {:.2}% | worst {:.2}%",
            self.savings.best_pct, self.savings.worst_pct
        )?;
        writeln!(
            f,
            "Overlay energy:        {:.2} MJ",
            self.savings.overlay_energy_at_lifetime_j / 1e6
        )?;
        write!(
            f,
            "Net gains at lifetime: {:.2} MJ",
            self.net_gains_at_lifetime_j / 1e6
        )
    }
}

/// Runs the three scenarios for `system` at `alpha0`.
///
/// Closed-form payback is computed for LOW, BENCHMARK and HIGH; the root
/// solve and the lifetime savings use the BENCHMARK energies only.
///
/// # Examples
///
/// ```
/// use smart_payback::config::PaybackConfig;
/// use smart_payback::model::report::compute_payback_report;
///
/// let (system, params) = PaybackConfig::default().build().unwrap();
/// let report = compute_payback_report(&system, 0.35, &params);
/// assert!(report.tpb_benchmark() > 0.0);
/// assert!(report.tpb_benchmark() < params.infinite_payback_years);
/// ```
pub fn compute_payback_report(
    system: &SmartSystem,
    alpha0: f64,
    params: &ModelParams,
) -> PaybackReport {
    let usage = system.usage(alpha0);
    let saved_power_w = usage.saved_power_w();
    let energies = system.overlay_energies(alpha0);

    let tpb = ScenarioTable::from_fn(|scenario| {
        payback_time(&energies.get(scenario), saved_power_w, params)
    });

    let benchmark = energies.benchmark;
    let tpb_solved = solve_payback(
        &benchmark,
        &usage,
        &system.schedule,
        system.solver_seed_years,
        params,
    );
    let savings = LifetimeSavings::compute(system, &benchmark, alpha0, params);
    let net_gains_at_lifetime_j = net_gains(
        system.lifetime_years,
        &benchmark,
        &usage,
        &system.schedule,
        params,
    );

    debug!(
        system = %system.device,
        alpha0,
        tpb = tpb.benchmark,
        tpb_low = tpb.low,
        tpb_high = tpb.high,
        tpb_solved,
        "payback report"
    );

    PaybackReport {
        alpha0,
        saved_power_w,
        tpb,
        tpb_solved,
        savings,
        net_gains_at_lifetime_j,
        energies,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::devices::{DeviceCounts, DeviceType};

    fn office() -> SmartSystem {
        SmartSystem::new(
            DeviceType::OfficeLighting,
            100.0,
            vec![0.2, 0.35, 0.5],
            AlphaSchedule::constant(),
            (2500.0 * 0.6 / 365.25) / 24.0,
            15.0,
            DeviceCounts::new(1, 4, 0),
        )
    }

    #[test]
    fn bounds_bracket_benchmark() {
        let params = ModelParams::default();
        let report = compute_payback_report(&office(), 0.35, &params);
        let [low, high] = report.tpb_bounds();
        assert!(low <= report.tpb_benchmark());
        assert!(report.tpb_benchmark() <= high);
    }

    #[test]
    fn constant_schedule_gives_equal_best_and_worst() {
        let params = ModelParams::default();
        let report = compute_payback_report(&office(), 0.35, &params);
        assert_eq!(report.savings.best_pct, report.savings.worst_pct);
        assert!(report.savings.best_pct > 0.0);
    }

    #[test]
    fn zero_alpha_never_pays_back() {
        let params = ModelParams::default();
        let report = compute_payback_report(&office(), 0.0, &params);
        assert_eq!(report.tpb_benchmark(), params.infinite_payback_years);
        assert_eq!(report.tpb_solved, params.infinite_payback_years);
        assert!(report.savings.worst_pct < 0.0);
    }

    #[test]
    fn display_rounds_savings_to_two_decimals() {
        let params = ModelParams::default();
        let report = compute_payback_report(&office(), 0.35, &params);
        let text = report.to_string();
        assert!(text.contains(&format!("best {:.2}%", report.savings.best_pct)));
        assert!(text.starts_with("--- Payback (alpha0 = 35.0%) ---"));
    }

    #[test]
    fn lifetime_comparison() {
        let params = ModelParams::default();
        let report = compute_payback_report(&office(), 0.35, &params);
        assert!(!report.pays_back_after(15.0));
    }
}
