//! Randomized checks of the model properties, driven by a seeded RNG.

mod common;

use rand::{Rng, SeedableRng, rngs::StdRng};

use smart_payback::model::{
    AlphaSchedule, ModelParams, OverlayEnergy, Usage, net_gains, payback_time, solve_payback,
};
use smart_payback::units::{TIME_HORIZON_YEARS, YEAR_TO_SEC};

use common::assert_close;

const CASES: usize = 200;

fn random_overlay(rng: &mut StdRng) -> OverlayEnergy {
    OverlayEnergy {
        raw_materials_j: rng.random_range(0.0..5e6),
        embodied_j: rng.random_range(1e6..2e9),
        end_of_life_j: rng.random_range(0.0..5e6),
        operational_w: rng.random_range(0.0..5.0),
        maintenance_w: rng.random_range(0.0..0.5),
    }
}

fn random_usage(rng: &mut StdRng) -> Usage {
    Usage {
        alpha0: rng.random_range(0.0..1.0),
        beta: rng.random_range(0.0..=1.0),
        baseline_power_w: rng.random_range(0.0..1000.0),
    }
}

/// `[[1, d], [m, d2], ..., [m_last, -1]]` with 1 to 4 phases.
fn random_schedule(rng: &mut StdRng) -> AlphaSchedule {
    let phases = rng.random_range(1..=4);
    let mut pairs = Vec::with_capacity(phases);
    for i in 0..phases {
        let multiplier = if i == 0 { 1.0 } else { rng.random_range(0.0..=1.0) };
        let years = if i == phases - 1 {
            -1.0
        } else {
            rng.random_range(0.1..10.0)
        };
        pairs.push([multiplier, years]);
    }
    match AlphaSchedule::from_pairs(&pairs, TIME_HORIZON_YEARS) {
        Ok(schedule) => schedule,
        Err(e) => panic!("generated schedule {pairs:?} rejected: {e}"),
    }
}

#[test]
fn no_net_savings_means_infinite_payback() {
    let mut rng = StdRng::seed_from_u64(7);
    let params = ModelParams::default();
    for _ in 0..CASES {
        let overlay = random_overlay(&mut rng);
        let saved = rng.random_range(0.0..=1.0) * overlay.operational_w;
        assert_eq!(
            payback_time(&overlay, saved, &params),
            params.infinite_payback_years
        );
    }
}

#[test]
fn payback_never_grows_with_saved_power() {
    let mut rng = StdRng::seed_from_u64(11);
    let params = ModelParams::default();
    for _ in 0..CASES {
        let overlay = random_overlay(&mut rng);
        let p1 = rng.random_range(0.0..100.0);
        let p2 = p1 + rng.random_range(0.0..100.0);
        assert!(payback_time(&overlay, p2, &params) <= payback_time(&overlay, p1, &params));
    }
}

#[test]
fn single_phase_schedule_is_constant_alpha() {
    let mut rng = StdRng::seed_from_u64(13);
    let params = ModelParams::default();
    let schedule = AlphaSchedule::constant();
    for _ in 0..CASES {
        let usage = random_usage(&mut rng);
        let t = rng.random_range(0.0..=params.time_horizon_years);
        let expected = params.elec_to_primary
            * YEAR_TO_SEC
            * usage.beta
            * usage.baseline_power_w
            * usage.alpha0
            * t;
        assert_close(schedule.energy_saved(t, &usage, &params), expected, 1e-9);
    }
}

#[test]
fn nothing_saved_at_time_zero() {
    let mut rng = StdRng::seed_from_u64(17);
    let params = ModelParams::default();
    for _ in 0..CASES {
        let schedule = random_schedule(&mut rng);
        let usage = random_usage(&mut rng);
        assert_eq!(schedule.energy_saved(0.0, &usage, &params), 0.0);
    }
}

#[test]
fn alpha_holds_first_multiplier_during_first_phase() {
    let mut rng = StdRng::seed_from_u64(19);
    let horizon = ModelParams::default().time_horizon_years;
    for _ in 0..CASES {
        let schedule = random_schedule(&mut rng);
        let alpha0 = rng.random_range(0.0..1.0);
        let first_end = schedule.boundaries(horizon)[1];
        let t = rng.random_range(0.0..first_end);
        let m0 = schedule.phases()[0].multiplier;
        assert_eq!(schedule.alpha_at(t, alpha0, horizon), alpha0 * m0);
    }
}

#[test]
fn solved_payback_never_grows_with_alpha0() {
    let mut rng = StdRng::seed_from_u64(23);
    let params = ModelParams::default();
    for _ in 0..20 {
        let overlay = random_overlay(&mut rng);
        let full_effect = rng.random_range(0.5..5.0);
        let fade = rng.random_range(0.0..=1.0);
        let schedule = AlphaSchedule::from_pairs(
            &[[1.0, full_effect], [fade, -1.0]],
            params.time_horizon_years,
        );
        let Ok(schedule) = schedule else {
            panic!("generated schedule rejected");
        };
        let beta = rng.random_range(0.2..=1.0);
        let baseline_power_w = rng.random_range(10.0..1000.0);

        let mut previous = f64::INFINITY;
        for step in 0..50 {
            let usage = Usage {
                alpha0: f64::from(step) * 0.02,
                beta,
                baseline_power_w,
            };
            let t = solve_payback(&overlay, &usage, &schedule, 0.234, &params);
            assert!(t <= previous, "payback rose to {t} from {previous}");
            previous = t;
        }
    }
}

#[test]
fn net_gains_vanish_at_the_solved_root() {
    let mut rng = StdRng::seed_from_u64(29);
    let params = ModelParams::default();
    let schedule = AlphaSchedule::constant();
    let mut checked = 0;
    for _ in 0..CASES {
        let overlay = random_overlay(&mut rng);
        let usage = random_usage(&mut rng);
        let t = solve_payback(&overlay, &usage, &schedule, 0.234, &params);
        if t == params.infinite_payback_years {
            continue;
        }
        checked += 1;
        let g = net_gains(t, &overlay, &usage, &schedule, &params);
        let scale = overlay.fixed_j().max(1.0);
        assert!(g.abs() / scale < 1e-6, "G({t}) = {g}");
    }
    assert!(checked > 0);
}
