//! Unit conversion constants shared by every energy formula.
//!
//! Energies are joules, powers are watts and times are years unless a name
//! says otherwise.

/// Joules per watt-hour.
pub const WH_TO_J: f64 = 3.6e3;
/// Joules per kilowatt-hour.
pub const KWH_TO_J: f64 = WH_TO_J * 1e3;
/// Megajoules per kilowatt-hour.
pub const KWH_TO_MJ: f64 = WH_TO_J / 1e3;
/// Joules per megajoule.
pub const MJ_TO_J: f64 = 1e6;

/// Seconds per day.
pub const DAY_TO_SEC: f64 = 24.0 * 60.0 * 60.0;
/// Days per year.
pub const YEAR_TO_DAYS: f64 = 365.25;
/// Hours per year.
pub const YEAR_TO_HOURS: f64 = 24.0 * YEAR_TO_DAYS;
/// Seconds per year.
pub const YEAR_TO_SEC: f64 = YEAR_TO_DAYS * DAY_TO_SEC;

/// Primary energy spent per unit of delivered electricity.
pub const ELEC_TO_PRIMARY: f64 = 3.0;

/// Default bound on every time-domain evaluation (years).
pub const TIME_HORIZON_YEARS: f64 = 50.0;
/// Payback time reported when the overlay never pays back (years).
pub const INFINITE_PAYBACK_YEARS: f64 = 1e3;

/// Energy drawn over one year by a constant load, in joules.
pub fn annual_energy_j(power_w: f64) -> f64 {
    power_w * YEAR_TO_HOURS / 1e3 * KWH_TO_MJ * MJ_TO_J
}
