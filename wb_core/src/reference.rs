//! Aircraft reference sheet: limits, geometry, stations and formulas.

use crate::aircraft::{AircraftConfig, Station};
use crate::equations::registry::{all_formulas, FormulaCategory};

fn heading(lines: &mut Vec<String>, title: &str) {
    if !lines.is_empty() {
        lines.push(String::new());
    }
    lines.push(title.to_string());
    lines.push("-".repeat(title.len()));
}

fn entry(label: &str, value: impl std::fmt::Display) -> String {
    format!("  {:<30} {}", label, value)
}

/// Reference data for one aircraft as plain text.
pub fn reference_text(config: &AircraftConfig) -> String {
    let mut lines = Vec::new();

    heading(&mut lines, &format!("{} Aircraft - Weight Limits", config.name));
    lines.push(entry("Max Take-off Weight (MTOW)", format!("{} kg", config.weights.max_takeoff_kg)));
    lines.push(entry("Max Landing Weight (MLW)", format!("{} kg", config.weights.max_landing_kg)));
    lines.push(entry("Max Zero Fuel Weight (MZFW)", format!("{} kg", config.weights.max_zero_fuel_kg)));

    heading(&mut lines, "Mean Aerodynamic Chord");
    lines.push(entry("MAC Length", format!("{} mm", config.mac.length_mm)));
    lines.push(entry("Leading Edge (aft of datum)", format!("{} mm", config.mac.leading_edge_mm)));
    lines.push(entry("Trailing Edge (aft of datum)", format!("{} mm", config.mac.trailing_edge_mm())));

    heading(&mut lines, "CG Range");
    let light = &config.cg_range.light;
    let heavy = &config.cg_range.heavy;
    lines.push(entry(
        &format!("At <= {} kg", light.weight_kg),
        format!("{} - {} mm", light.forward_mm, light.aft_mm),
    ));
    lines.push(entry(
        &format!("At {} kg", heavy.weight_kg),
        format!("{} - {} mm", heavy.forward_mm, heavy.aft_mm),
    ));
    lines.push("  Forward limit varies linearly between these weights.".to_string());

    heading(&mut lines, "Fuel");
    for station in [Station::MainTanks, Station::AuxTanks] {
        if let Some(capacity) = config.tank_capacity_gal(station) {
            lines.push(entry(
                station.display_name(),
                format!("{} USgal @ {} mm", capacity, config.arm(station)),
            ));
        }
    }
    lines.push(entry("Fuel Density (AVGAS)", format!("{} kg/L", config.fuel.density_kg_per_l)));

    heading(&mut lines, "Loading Stations");
    lines.push(format!("  {:<30} {:>9}   {}", "Location", "Arm (mm)", "Max Load"));
    for station in Station::ALL {
        let max_load = match station {
            Station::Row1 | Station::Row2 | Station::Row3 => format!("{} kg per seat", config.max_loads.seat_area_kg),
            Station::MainTanks => format!("{} USgal each", config.max_loads.main_tank_gal),
            Station::AuxTanks => format!("{} USgal each", config.max_loads.aux_tank_gal),
            _ => format!("{} kg", config.max_load_kg(station)),
        };
        lines.push(format!(
            "  {:<30} {:>9}   {}",
            station.display_name(),
            config.arm(station),
            max_load
        ));
    }

    heading(&mut lines, "Formulas");
    let mut current: Option<FormulaCategory> = None;
    for formula in all_formulas(config) {
        if current != Some(formula.category) {
            lines.push(format!("  {}:", formula.category.display_name()));
            current = Some(formula.category);
        }
        lines.push(format!("    {:<28} {}", formula.name, formula.expression));
    }

    lines.join("\n")
}
