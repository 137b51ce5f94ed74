//! CSV export for sweeps and energy curves.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::error::Result;
use crate::model::{AlphaSweep, EnergyCurves, FleetPoint};

/// Column header of the alpha-sweep export.
const ALPHA_SWEEP_HEADER: &str = "alpha0,tpb_low_years,tpb_benchmark_years,tpb_high_years,\
                                  tpb_solved_years,best_savings_pct,worst_savings_pct,\
                                  overlay_energy_at_lifetime_mj,net_gains_at_lifetime_mj";

/// Column header of the fleet-size export.
const FLEET_SWEEP_HEADER: &str = "nodes,tpb_low_years,tpb_benchmark_years,tpb_high_years";

/// Column header of the energy-curve export.
const CURVES_HEADER: &str = "time_years,fixed_and_maintenance_mj,operational_mj,\
                             overlay_total_mj,saved_constant_mj,saved_schedule_mj,\
                             net_gains_mj,alpha";

fn create(path: &Path) -> Result<io::BufWriter<File>> {
    Ok(io::BufWriter::new(File::create(path)?))
}

fn header(line: &str) -> impl Iterator<Item = &str> {
    line.split(',').map(str::trim)
}

/// Exports an alpha sweep to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_alpha_sweep(sweep: &AlphaSweep, path: &Path) -> Result<()> {
    write_alpha_sweep(sweep, create(path)?)
}

/// Writes an alpha sweep as CSV to any writer, one row per alpha0.
///
/// Energies are written in MJ. Output is deterministic for identical inputs.
///
/// # Arguments
///
/// * `sweep` - Reports produced by [`crate::model::alpha_sweep`]
/// * `writer` - Destination implementing `Write`
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_alpha_sweep(sweep: &AlphaSweep, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(ALPHA_SWEEP_HEADER))?;

    for r in &sweep.reports {
        wtr.write_record(&[
            format!("{:.4}", r.alpha0),
            format!("{:.6}", r.tpb.low),
            format!("{:.6}", r.tpb.benchmark),
            format!("{:.6}", r.tpb.high),
            format!("{:.6}", r.tpb_solved),
            format!("{:.4}", r.savings.best_pct),
            format!("{:.4}", r.savings.worst_pct),
            format!("{:.4}", r.savings.overlay_energy_at_lifetime_j / 1e6),
            format!("{:.4}", r.net_gains_at_lifetime_j / 1e6),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports a fleet-size sweep to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_fleet_sweep(points: &[FleetPoint], path: &Path) -> Result<()> {
    write_fleet_sweep(points, create(path)?)
}

/// Writes a fleet-size sweep as CSV to any writer.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_fleet_sweep(points: &[FleetPoint], writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(FLEET_SWEEP_HEADER))?;

    for p in points {
        wtr.write_record(&[
            p.nodes.to_string(),
            format!("{:.6}", p.tpb.low),
            format!("{:.6}", p.tpb.benchmark),
            format!("{:.6}", p.tpb.high),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

/// Exports energy curves to a CSV file at the given path.
///
/// # Errors
///
/// Returns an error if file creation or writing fails.
pub fn export_curves(curves: &EnergyCurves, path: &Path) -> Result<()> {
    write_curves(curves, create(path)?)
}

/// Writes energy curves as CSV to any writer, one row per sample time.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_curves(curves: &EnergyCurves, writer: impl Write) -> Result<()> {
    let mut wtr = csv::WriterBuilder::new().from_writer(writer);
    wtr.write_record(header(CURVES_HEADER))?;

    for i in 0..curves.len() {
        wtr.write_record(&[
            format!("{:.6}", curves.times_years[i]),
            format!("{:.4}", curves.fixed_and_maintenance_j[i] / 1e6),
            format!("{:.4}", curves.operational_j[i] / 1e6),
            format!("{:.4}", curves.overlay_total_j[i] / 1e6),
            format!("{:.4}", curves.saved_constant_j[i] / 1e6),
            format!("{:.4}", curves.saved_schedule_j[i] / 1e6),
            format!("{:.4}", curves.net_gains_j[i] / 1e6),
            format!("{:.6}", curves.alpha[i]),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
