use crate::devices::{DeviceType, HueProvider};
use crate::model::{AlphaSweep, FleetPoint, PaybackReport, SmartSystem};

/// Title block for one deployment.
pub fn system_header(system: &SmartSystem) -> String {
    format!(
        "=== {} | {} ===\nbeta = {:.2} | lifetime = {} years | schedule = {}",
        system.device,
        system.setup_label(),
        system.beta,
        system.lifetime_years,
        system.schedule
    )
}

/// Behavioural interpretation of one alpha0 alongside its payback report.
pub fn specific_alpha_summary(system: &SmartSystem, report: &PaybackReport) -> String {
    let mut text = format!(
        "*** alpha0 = {:.1}% | beta = {:.1} hours/day\n\
         <-> {:.1} hours less utilization needed\n\
         <-> {:.1} W power saved\n",
        report.alpha0 * 100.0,
        system.beta * 24.0,
        report.alpha0 * system.beta * 24.0,
        report.saved_power_w,
    );
    if let DeviceType::Hue(lamp) = system.device {
        let years = HueProvider::new(lamp).lamp_replacement_years(system.beta, report.alpha0);
        text.push_str(&format!("<-> {years:.1} years between lamp replacements
"));
    }
    text.push_str(&report.to_string());
    if report.pays_back_after(system.lifetime_years) {
        text.push_str(&format!(
            "\n!!! payback exceeds the {}-year system lifetime",
            system.lifetime_years
        ));
    }
    text
}

pub fn print_specific_alpha(system: &SmartSystem, report: &PaybackReport) {
    println!("\n{}", specific_alpha_summary(system, report));
}

pub fn print_alpha_sweep_summary(sweep: &AlphaSweep) {
    println!("\n--- Alpha sweep ---");
    println!("Points:                {}", sweep.len());
    match sweep.savings_boundary() {
        Some(alpha0) => println!("W-savings boundary:    alpha0 = {:.1}%", alpha0 * 100.0),
        None => println!("W-savings boundary:    none below 100%"),
    }
}

pub fn print_fleet_summary(points: &[FleetPoint], alpha0: f64) {
    println!("\n--- Fleet size (alpha0 = {:.1}%) ---", alpha0 * 100.0);
    for p in points {
        println!(
            "{:>3} nodes: {:.3} years [{:.3}, {:.3}]",
            p.nodes, p.tpb.benchmark, p.tpb.low, p.tpb.high
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PaybackConfig;
    use crate::model::compute_payback_report;

    #[test]
    fn summary_explains_alpha() {
        let Ok((system, params)) = PaybackConfig::smart_meter().build() else {
            panic!("smart meter preset should build");
        };
        let report = compute_payback_report(&system, 0.08, &params);
        let text = specific_alpha_summary(&system, &report);
        assert!(text.starts_with("*** alpha0 = 8.0% | beta = 24.0 hours/day"));
        assert!(text.contains("1.9 hours less utilization needed"));
        assert!(text.contains("41.9 W power saved"));
        assert!(!text.contains("lamp replacements"));
    }

    #[test]
    fn hue_summary_reports_lamp_replacement_interval() {
        let Ok((system, params)) = PaybackConfig::hue_led().build() else {
            panic!("hue preset should build");
        };
        // 25 000 h LED life over 1000 h/year of lighting, 35% of it avoided
        let report = compute_payback_report(&system, 0.35, &params);
        let text = specific_alpha_summary(&system, &report);
        assert!(text.contains("<-> 38.5 years between lamp replacements"), "{text}");
    }

    #[test]
    fn header_names_setup() {
        let Ok((system, _)) = PaybackConfig::hue_led().build() else {
            panic!("hue preset should build");
        };
        let header = system_header(&system);
        assert!(header.starts_with("=== PHILIPS-HUE-LED | 2#OS 8#BULBS 1#HUBS ==="));
        assert!(header.ends_with("schedule = [[1, -1]]"));
    }
}
