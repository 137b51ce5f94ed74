//! TOML-based deployment configuration and preset definitions.

use std::fmt;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::devices::{DeviceCounts, DeviceType};
use crate::error::{PaybackError, Result};
use crate::model::schedule::UNTIL_HORIZON;
use crate::model::sweep::{DEFAULT_ALPHA_STEP, DEFAULT_MAX_NODES};
use crate::model::{AlphaSchedule, ModelParams, SmartSystem};
use crate::units::{ELEC_TO_PRIMARY, INFINITE_PAYBACK_YEARS, TIME_HORIZON_YEARS};

/// Top-level configuration parsed from TOML.
///
/// All fields have defaults matching the office-lighting deployment. Load
/// from TOML with [`PaybackConfig::from_toml_file`] or pick a preset with
/// [`PaybackConfig::from_preset`].
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PaybackConfig {
    /// Global model parameters.
    #[serde(default)]
    pub model: ModelConfig,
    /// The deployment under study.
    #[serde(default)]
    pub system: SystemConfig,
    /// Sweep resolution.
    #[serde(default)]
    pub sweep: SweepConfig,
}

/// Global model parameters.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ModelConfig {
    /// Bound on every time-domain evaluation (years, > 0).
    pub time_horizon_years: f64,
    /// Payback reported when the overlay never pays back (years, > horizon).
    pub infinite_payback_years: f64,
    /// Primary energy per unit of electricity.
    pub elec_to_primary: f64,
    /// Net-gains samples used to detect a never-positive curve (>= 2).
    pub gains_samples: usize,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            time_horizon_years: TIME_HORIZON_YEARS,
            infinite_payback_years: INFINITE_PAYBACK_YEARS,
            elec_to_primary: ELEC_TO_PRIMARY,
            gains_samples: 1000,
        }
    }
}

impl ModelConfig {
    pub fn params(&self) -> ModelParams {
        ModelParams {
            time_horizon_years: self.time_horizon_years,
            infinite_payback_years: self.infinite_payback_years,
            elec_to_primary: self.elec_to_primary,
            gains_samples: self.gains_samples,
        }
    }
}

/// One smart-overlay deployment.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SystemConfig {
    /// System identifier, e.g. `"OFFICE-LIGHTNING"`.
    pub id: String,
    /// Baseline power (W); per bulb for Hue systems.
    pub baseline_power_w: f64,
    /// Candidate initial alpha values, each in [0, 1).
    pub alpha0: Vec<f64>,
    /// `[multiplier, years]` pairs; `-1` years on the last phase runs to the horizon.
    pub schedule: Vec<[f64; 2]>,
    /// Fraction of the day the baseline load is active, in [0, 1].
    pub beta: f64,
    /// Assumed system lifetime (years).
    pub lifetime_years: f64,
    /// `[sensors, nodes, hubs]`; lighting systems only. When absent, a
    /// lighting system takes the default deployment of its type.
    #[serde(default)]
    pub counts: Option<[u32; 3]>,
    /// Overrides the provider's root-solver seed (years).
    pub solver_seed_years: Option<f64>,
}

impl Default for SystemConfig {
    fn default() -> Self {
        Self {
            id: "OFFICE-LIGHTNING".to_string(),
            baseline_power_w: 100.0,
            alpha0: vec![0.2, 0.35, 0.5],
            schedule: vec![[1.0, UNTIL_HORIZON]],
            beta: (2500.0 * 0.6 / 365.25) / 24.0,
            lifetime_years: 15.0,
            counts: Some([1, 4, 0]),
            solver_seed_years: None,
        }
    }
}

/// Sweep resolution.
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SweepConfig {
    /// alpha0 increment of the alpha sweep, in (0, 1).
    pub alpha_step: f64,
    /// Largest node count of the fleet sweep (>= 1).
    pub max_nodes: u32,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            alpha_step: DEFAULT_ALPHA_STEP,
            max_nodes: DEFAULT_MAX_NODES,
        }
    }
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Dotted field path (e.g., `"system.beta"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl ConfigError {
    fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Every problem found in one configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct ConfigErrors(pub Vec<ConfigError>);

impl fmt::Display for ConfigErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, error) in self.0.iter().enumerate() {
            if i > 0 {
                writeln!(f)?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ConfigErrors {}

impl From<ConfigError> for PaybackError {
    fn from(error: ConfigError) -> Self {
        PaybackError::Config(ConfigErrors(vec![error]))
    }
}

impl PaybackConfig {
    /// Office lighting: one sensor module driving four nodes, constant alpha.
    pub fn office_lighting() -> Self {
        Self::default()
    }

    /// Philips Hue with LED bulbs in a home.
    pub fn hue_led() -> Self {
        Self {
            system: SystemConfig {
                id: "PHILIPS-HUE-LED".to_string(),
                baseline_power_w: 9.0,
                alpha0: vec![0.17, 0.70, 0.35],
                schedule: vec![[1.0, UNTIL_HORIZON]],
                beta: (1000.0 / 365.25) / 24.0,
                lifetime_years: 5.0,
                counts: Some([2, 8, 1]),
                solver_seed_years: None,
            },
            ..Self::default()
        }
    }

    /// Smart meter whose behavioural effect fades after six months.
    pub fn smart_meter() -> Self {
        Self {
            system: SystemConfig {
                id: "SMART-METER".to_string(),
                baseline_power_w: 524.0,
                alpha0: vec![0.03, 0.08, 0.15],
                schedule: vec![[1.0, 0.5], [0.0, UNTIL_HORIZON]],
                beta: 1.0,
                lifetime_years: 15.0,
                counts: None,
                solver_seed_years: None,
            },
            ..Self::default()
        }
    }

    /// Available preset names.
    pub const PRESETS: &[&str] = &["office_lighting", "hue_led", "smart_meter"];

    /// Loads a configuration from a named preset.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the preset name is unknown.
    pub fn from_preset(name: &str) -> std::result::Result<Self, ConfigError> {
        match name {
            "office_lighting" => Ok(Self::office_lighting()),
            "hue_led" => Ok(Self::hue_led()),
            "smart_meter" => Ok(Self::smart_meter()),
            _ => Err(ConfigError::new(
                "preset",
                format!(
                    "unknown preset \"{name}\", available: {}",
                    Self::PRESETS.join(", ")
                ),
            )),
        }
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> std::result::Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| {
            ConfigError::new("scenario", format!("cannot read \"{}\": {e}", path.display()))
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid or contains unknown fields.
    pub fn from_toml_str(s: &str) -> std::result::Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::new("toml", e.to_string()))
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if the configuration is valid. The system id
    /// itself is resolved by [`PaybackConfig::build`]; count rules are only
    /// checked for known ids.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        let m = &self.model;
        if !(m.time_horizon_years.is_finite() && m.time_horizon_years > 0.0) {
            errors.push(ConfigError::new("model.time_horizon_years", "must be > 0"));
        }
        if m.infinite_payback_years.is_nan() || m.infinite_payback_years <= m.time_horizon_years {
            errors.push(ConfigError::new(
                "model.infinite_payback_years",
                "must be > model.time_horizon_years",
            ));
        }
        if !(m.elec_to_primary.is_finite() && m.elec_to_primary > 0.0) {
            errors.push(ConfigError::new("model.elec_to_primary", "must be > 0"));
        }
        if m.gains_samples < 2 {
            errors.push(ConfigError::new("model.gains_samples", "must be >= 2"));
        }

        let s = &self.system;
        if s.alpha0.is_empty() {
            errors.push(ConfigError::new("system.alpha0", "must list at least one value"));
        }
        for (i, alpha0) in s.alpha0.iter().enumerate() {
            if !(0.0..1.0).contains(alpha0) {
                errors.push(ConfigError::new(
                    format!("system.alpha0[{i}]"),
                    "must be in [0.0, 1.0)",
                ));
            }
        }
        if !(0.0..=1.0).contains(&s.beta) {
            errors.push(ConfigError::new("system.beta", "must be in [0.0, 1.0]"));
        }
        if !(s.baseline_power_w.is_finite() && s.baseline_power_w >= 0.0) {
            errors.push(ConfigError::new("system.baseline_power_w", "must be >= 0"));
        }
        if !(s.lifetime_years > 0.0 && s.lifetime_years < m.time_horizon_years) {
            errors.push(ConfigError::new(
                "system.lifetime_years",
                "must be > 0 and < model.time_horizon_years",
            ));
        }
        if s
            .solver_seed_years
            .is_some_and(|seed| !(seed.is_finite() && seed >= 0.0))
        {
            errors.push(ConfigError::new("system.solver_seed_years", "must be >= 0"));
        }
        self.validate_schedule(&mut errors);

        let countless = s.id.parse::<DeviceType>().is_ok_and(|d| !d.uses_counts());
        if countless && s.counts.is_some() {
            errors.push(ConfigError::new(
                "system.counts",
                format!("{} takes no device counts", s.id),
            ));
        }

        let w = &self.sweep;
        if !(w.alpha_step > 0.0 && w.alpha_step < 1.0) {
            errors.push(ConfigError::new("sweep.alpha_step", "must be in (0.0, 1.0)"));
        }
        if w.max_nodes == 0 {
            errors.push(ConfigError::new("sweep.max_nodes", "must be >= 1"));
        }

        errors
    }

    fn validate_schedule(&self, errors: &mut Vec<ConfigError>) {
        let horizon = self.model.time_horizon_years;
        if let Err(e) = AlphaSchedule::from_pairs(&self.system.schedule, horizon) {
            errors.push(ConfigError::new("system.schedule", e.to_string()));
        }
    }

    /// Device counts of the configured system, falling back to the default
    /// deployment of `device` when the file gives none.
    fn device_counts(&self, device: DeviceType) -> DeviceCounts {
        self.system
            .counts
            .map(DeviceCounts::from)
            .or_else(|| device.default_counts())
            .unwrap_or_default()
    }

    /// Resolves the configuration into a system and its model parameters.
    ///
    /// # Errors
    ///
    /// Returns [`PaybackError::UnsupportedSystemType`] for an unknown system
    /// id, [`PaybackError::Config`] with every validation failure, and
    /// [`PaybackError::ScenarioOrdering`] if a provider table is out of order.
    pub fn build(&self) -> Result<(SmartSystem, ModelParams)> {
        let device: DeviceType = self.system.id.parse()?;

        let errors = self.validate();
        if !errors.is_empty() {
            return Err(PaybackError::Config(ConfigErrors(errors)));
        }

        let s = &self.system;
        let schedule = AlphaSchedule::from_pairs(&s.schedule, self.model.time_horizon_years)?;
        let counts = self.device_counts(device);
        let mut system = SmartSystem::new(
            device,
            s.baseline_power_w,
            s.alpha0.clone(),
            schedule,
            s.beta,
            s.lifetime_years,
            counts,
        );
        if let Some(seed) = s.solver_seed_years {
            system.solver_seed_years = seed;
        }
        system.check_scenario_ordering()?;

        Ok((system, self.model.params()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_preset_valid() {
        let cfg = PaybackConfig::default();
        let errors = cfg.validate();
        assert!(errors.is_empty(), "default should be valid: {errors:?}");
    }

    #[test]
    fn from_preset_unknown() {
        let err = PaybackConfig::from_preset("nonexistent");
        assert!(err.as_ref().is_err_and(|e| e.message.contains("unknown preset")));
    }

    #[test]
    fn all_presets_build() {
        for name in PaybackConfig::PRESETS {
            let cfg = PaybackConfig::from_preset(name);
            assert!(cfg.is_ok(), "preset \"{name}\" should load");
            let errors = cfg.as_ref().map(|c| c.validate()).unwrap_or_default();
            assert!(
                errors.is_empty(),
                "preset \"{name}\" should be valid: {errors:?}"
            );
            let built = cfg.map_err(PaybackError::from).and_then(|c| c.build());
            assert!(built.is_ok(), "preset \"{name}\" should build: {built:?}");
        }
    }

    #[test]
    fn valid_toml_parses() {
        let toml = r#"
[model]
time_horizon_years = 40.0
gains_samples = 500

[system]
id = "SMART-METER"
baseline_power_w = 400.0
alpha0 = [0.05, 0.1]
schedule = [[1.0, 1.0], [0.5, 2.0], [0.0, -1.0]]
beta = 1.0
lifetime_years = 12.0

[sweep]
alpha_step = 0.01
"#;
        let cfg = PaybackConfig::from_toml_str(toml);
        assert!(cfg.is_ok(), "valid TOML should parse: {:?}", cfg.err());
        let cfg = cfg.ok();
        assert_eq!(cfg.as_ref().map(|c| c.model.gains_samples), Some(500));
        assert_eq!(cfg.as_ref().map(|c| c.system.schedule.len()), Some(3));
        assert_eq!(cfg.as_ref().map(|c| c.system.counts), Some(None));
        assert!(cfg.as_ref().is_some_and(|c| c.validate().is_empty()));
    }

    #[test]
    fn invalid_toml_unknown_field() {
        let toml = r#"
[system]
beta = 0.5
bogus_field = true
"#;
        assert!(PaybackConfig::from_toml_str(toml).is_err());
    }

    #[test]
    fn validation_collects_every_error() {
        let mut cfg = PaybackConfig::default();
        cfg.system.alpha0 = vec![0.5, 1.0];
        cfg.system.beta = 1.5;
        cfg.sweep.max_nodes = 0;
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "system.alpha0[1]"));
        assert!(errors.iter().any(|e| e.field == "system.beta"));
        assert!(errors.iter().any(|e| e.field == "sweep.max_nodes"));
    }

    #[test]
    fn validation_rejects_non_terminal_until_horizon() {
        let mut cfg = PaybackConfig::default();
        cfg.system.schedule = vec![[1.0, -1.0], [0.5, 2.0]];
        let errors = cfg.validate();
        assert!(
            errors
                .iter()
                .any(|e| e.field == "system.schedule" && e.message.contains("phase 0"))
        );
    }

    #[test]
    fn validation_rejects_schedule_beyond_horizon() {
        let mut cfg = PaybackConfig::default();
        cfg.system.schedule = vec![[1.0, 30.0], [0.5, 30.0]];
        let errors = cfg.validate();
        assert!(errors.iter().any(|e| e.field == "system.schedule"));

        cfg.model.time_horizon_years = 70.0;
        cfg.model.infinite_payback_years = 1e3;
        assert!(cfg.validate().is_empty());
    }

    #[test]
    fn schedule_past_horizon_does_not_build() {
        let mut cfg = PaybackConfig::smart_meter();
        cfg.system.schedule = vec![[1.0, 60.0], [0.0, -1.0]];
        let built = cfg.build();
        assert!(built.is_err_and(|e| e.to_string().contains("system.schedule")));
    }

    #[test]
    fn validation_checks_counts_against_device() {
        let mut cfg = PaybackConfig::smart_meter();
        cfg.system.counts = Some([1, 1, 1]);
        assert!(cfg.validate().iter().any(|e| e.field == "system.counts"));

        let mut cfg = PaybackConfig::hue_led();
        cfg.system.counts = None;
        assert!(cfg.validate().is_empty());
        let counts = cfg.build().map(|(system, _)| system.counts);
        assert_eq!(counts.ok(), Some(DeviceCounts::new(2, 8, 1)));
    }

    #[test]
    fn unknown_system_is_unsupported() {
        let mut cfg = PaybackConfig::default();
        cfg.system.id = "other".to_string();
        let err = cfg.build();
        assert!(matches!(err, Err(PaybackError::UnsupportedSystemType(id)) if id == "other"));
    }

    #[test]
    fn seed_override_reaches_system() {
        let mut cfg = PaybackConfig::default();
        cfg.system.solver_seed_years = Some(1.5);
        let seed = cfg.build().map(|(system, _)| system.solver_seed_years);
        assert_eq!(seed.ok(), Some(1.5));
    }

    #[test]
    fn partial_toml_uses_defaults() {
        let toml = r#"
[system]
beta = 0.25
"#;
        let cfg = PaybackConfig::from_toml_str(toml).ok();
        assert_eq!(cfg.as_ref().map(|c| c.system.beta), Some(0.25));
        assert_eq!(cfg.as_ref().map(|c| c.system.lifetime_years), Some(15.0));
        assert_eq!(cfg.as_ref().map(|c| c.sweep.max_nodes), Some(50));
    }

    #[test]
    fn partial_system_table_builds_with_default_counts() {
        let toml = r#"
[system]
beta = 0.25
"#;
        let built = PaybackConfig::from_toml_str(toml)
            .map_err(PaybackError::from)
            .and_then(|c| c.build());
        assert!(built.is_ok(), "partial TOML should build: {built:?}");
        let counts = built.map(|(system, _)| (system.counts, system.beta));
        assert_eq!(counts.ok(), Some((DeviceCounts::new(1, 4, 0), 0.25)));
    }
}
