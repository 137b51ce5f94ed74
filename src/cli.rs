use std::path::PathBuf;

use clap::Parser;

/// Default preset when neither `--scenario` nor `--preset` is given.
pub const DEFAULT_PRESET: &str = "office_lighting";

/// Energy payback time of smart overlay systems.
#[derive(Parser, Debug)]
#[command(name = "smart-payback", version)]
#[command(about = "Energy payback time of smart overlay systems")]
pub struct CliOptions {
    /// Load the deployment from a TOML file
    #[arg(long, value_name = "PATH", conflicts_with = "preset")]
    pub scenario: Option<PathBuf>,

    /// Use a built-in preset (office_lighting, hue_led, smart_meter)
    #[arg(long, value_name = "NAME")]
    pub preset: Option<String>,

    /// Write the alpha sweep to CSV
    #[arg(long, value_name = "PATH")]
    pub alpha_sweep_out: Option<PathBuf>,

    /// Write the fleet-size sweep to CSV (Hue systems)
    #[arg(long, value_name = "PATH")]
    pub fleet_sweep_out: Option<PathBuf>,

    /// Write energy curves to CSV
    #[arg(long, value_name = "PATH")]
    pub curves_out: Option<PathBuf>,

    /// Scenario of the energy curves: LOW, BENCHMARK or HIGH
    #[arg(long, value_name = "TAG", default_value = "BENCHMARK")]
    pub curves_scenario: String,

    /// alpha0 of the energy curves; defaults to the first configured value
    #[arg(long, value_name = "ALPHA")]
    pub curves_alpha: Option<f64>,

    /// Skip the alpha sweep and its solver check
    #[arg(long)]
    pub skip_sweep: bool,

    /// Log at debug level (RUST_LOG overrides)
    #[arg(short, long)]
    pub verbose: bool,
}

impl CliOptions {
    /// Preset to load when no scenario file is given.
    pub fn preset_name(&self) -> &str {
        self.preset.as_deref().unwrap_or(DEFAULT_PRESET)
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }
}
