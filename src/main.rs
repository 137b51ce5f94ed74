//! Smart-payback entry point: CLI wiring and config-driven model runs.

use std::process;

use clap::Parser;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use smart_payback::cli::CliOptions;
use smart_payback::config::{ConfigError, PaybackConfig};
use smart_payback::devices::{DeviceType, Scenario};
use smart_payback::io::export::{export_alpha_sweep, export_curves, export_fleet_sweep};
use smart_payback::model::sweep::SEED_CHECK_STEP;
use smart_payback::model::{
    alpha_sweep, compute_payback_report, energy_curves, fleet_reference_alpha, fleet_sweep,
};
use smart_payback::reporting::{
    print_alpha_sweep_summary, print_fleet_summary, print_specific_alpha, system_header,
};
use smart_payback::{PaybackError, Result};

fn init_logging(opts: &CliOptions) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(opts.log_level()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(opts: &CliOptions) -> Result<PaybackConfig> {
    let cfg = match &opts.scenario {
        Some(path) => PaybackConfig::from_toml_file(path)?,
        None => PaybackConfig::from_preset(opts.preset_name())?,
    };
    Ok(cfg)
}

fn run(opts: &CliOptions) -> Result<()> {
    let cfg = load_config(opts)?;
    let (system, params) = cfg.build()?;
    info!(system = %system.device, setup = %system.setup_label(), "configuration loaded");

    // solved paybacks are only printed once the seed has passed the sweep check
    let full_sweep = !opts.skip_sweep || opts.alpha_sweep_out.is_some();
    let step = if full_sweep {
        cfg.sweep.alpha_step
    } else {
        SEED_CHECK_STEP
    };
    let sweep = alpha_sweep(&system, step, &params);
    sweep.check_solver_monotonicity(system.solver_seed_years)?;

    println!("{}", system_header(&system));
    for &alpha0 in &system.alpha0 {
        let report = compute_payback_report(&system, alpha0, &params);
        print_specific_alpha(&system, &report);
    }

    if full_sweep {
        print_alpha_sweep_summary(&sweep);
        if let Some(path) = &opts.alpha_sweep_out {
            export_alpha_sweep(&sweep, path)?;
            info!(path = %path.display(), "alpha sweep written");
        }
    }

    match (system.device, fleet_reference_alpha(&system)) {
        (DeviceType::Hue(_), Some(alpha0)) => {
            let points = fleet_sweep(&system, alpha0, cfg.sweep.max_nodes, &params);
            print_fleet_summary(&points, alpha0);
            if let Some(path) = &opts.fleet_sweep_out {
                export_fleet_sweep(&points, path)?;
                info!(path = %path.display(), "fleet sweep written");
            }
        }
        _ if opts.fleet_sweep_out.is_some() => {
            warn!(system = %system.device, "fleet sweep only applies to Hue systems; skipped");
        }
        _ => {}
    }

    if let Some(path) = &opts.curves_out {
        let scenario: Scenario = opts.curves_scenario.parse()?;
        let alpha0 = match opts.curves_alpha {
            Some(alpha0) if !(0.0..1.0).contains(&alpha0) => {
                return Err(ConfigError {
                    field: "--curves-alpha".to_string(),
                    message: "must be in [0.0, 1.0)".to_string(),
                }
                .into());
            }
            Some(alpha0) => alpha0,
            None => system.alpha0[0],
        };
        let curves = energy_curves(&system, scenario, alpha0, &params);
        export_curves(&curves, path)?;
        info!(path = %path.display(), %scenario, alpha0, "energy curves written");
    }

    Ok(())
}

fn main() {
    let opts = CliOptions::parse();
    init_logging(&opts);

    if let Err(e) = run(&opts) {
        report_error(&e);
        process::exit(e.exit_code());
    }
}

fn report_error(e: &PaybackError) {
    match e {
        PaybackError::UnsupportedSystemType(_) => {
            eprintln!("\n{e}\n");
        }
        _ => eprintln!("error: {e}"),
    }
}
