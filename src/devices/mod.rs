//! Device energy providers queried by the payback model.

/// Philips Hue hub, bulbs and sensors.
pub mod hue;
/// Office lighting sensor network.
pub mod office;
/// Residential smart meter.
pub mod smart_meter;
pub mod types;

pub use hue::{HueProvider, Lamp};
pub use office::OfficeProvider;
pub use smart_meter::SmartMeterProvider;
pub use types::{
    DeviceCounts, DeviceEnergyReport, DeviceType, EnergyProvider, NO_REPLACEMENT, Scenario,
    ScenarioTable,
};
