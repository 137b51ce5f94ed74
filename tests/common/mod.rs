//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use smart_payback::devices::{DeviceCounts, DeviceType, Lamp};
use smart_payback::model::{AlphaSchedule, ModelParams, SmartSystem};
use smart_payback::units::TIME_HORIZON_YEARS;

/// Office-lighting beta: 2500 h/year of lighting, 60% of it occupied.
pub const OFFICE_BETA: f64 = (2500.0 * 0.6 / 365.25) / 24.0;

/// Hue beta: 1000 h/year of lighting.
pub const HUE_BETA: f64 = (1000.0 / 365.25) / 24.0;

pub fn params() -> ModelParams {
    ModelParams::default()
}

/// Office lighting with one sensor, four nodes, no hub and constant alpha.
pub fn office_system() -> SmartSystem {
    SmartSystem::new(
        DeviceType::OfficeLighting,
        100.0,
        vec![0.2, 0.35, 0.5],
        AlphaSchedule::constant(),
        OFFICE_BETA,
        15.0,
        DeviceCounts::new(1, 4, 0),
    )
}

/// Smart meter whose effect vanishes after six months.
pub fn smart_meter_system() -> SmartSystem {
    SmartSystem::new(
        DeviceType::SmartMeter,
        524.0,
        vec![0.03, 0.08, 0.15],
        meter_schedule(),
        1.0,
        15.0,
        DeviceCounts::default(),
    )
}

/// Hue LED kit: two sensors, eight bulbs, one hub.
pub fn hue_system() -> SmartSystem {
    SmartSystem::new(
        DeviceType::Hue(Lamp::Led),
        9.0,
        vec![0.17, 0.70, 0.35],
        AlphaSchedule::constant(),
        HUE_BETA,
        5.0,
        DeviceCounts::new(2, 8, 1),
    )
}

/// `[[1, 0.5], [0, -1]]`.
pub fn meter_schedule() -> AlphaSchedule {
    match AlphaSchedule::from_pairs(&[[1.0, 0.5], [0.0, -1.0]], TIME_HORIZON_YEARS) {
        Ok(schedule) => schedule,
        Err(e) => panic!("fixture schedule rejected: {e}"),
    }
}

/// Asserts `|a - b| <= tol * max(1, |b|)`.
pub fn assert_close(a: f64, b: f64, tol: f64) {
    let scale = b.abs().max(1.0);
    assert!(
        (a - b).abs() <= tol * scale,
        "expected {a} to be within {tol} of {b}"
    );
}
