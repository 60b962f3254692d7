/*
 * Copyright (c):
 * 2025 zephyrj
 * zephyrj@protonmail.com
 *
 * This file is part of downforce-lab.
 *
 * downforce-lab is free software: you can redistribute it and/or modify
 * it under the terms of the GNU General Public License as published by
 * the Free Software Foundation, either version 3 of the License, or
 * (at your option) any later version.
 *
 * downforce-lab is distributed in the hope that it will be useful,
 * but WITHOUT ANY WARRANTY; without even the implied warranty of
 * MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
 * GNU General Public License for more details.
 *
 * You should have received a copy of the GNU General Public License
 * along with downforce-lab. If not, see <https://www.gnu.org/licenses/>.
 */


use itertools::Itertools;
use utils::units::kw_to_bhp;
use vehicle_catalog::VehicleCatalog;
use crate::report::{Comparison, VehicleRun};

const NOT_AVAILABLE: &'static str = "-";

fn optional_value(value: Option<f64>, decimal_places: usize) -> String {
    match value {
        None => NOT_AVAILABLE.to_string(),
        Some(v) => format!("{:.*}", decimal_places, v)
    }
}

fn render_rows(header: &[&str], rows: Vec<Vec<String>>) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in rows.iter() {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(cell.chars().count());
        }
    }
    let format_row = |cells: Vec<String>| {
        cells.into_iter().enumerate().map(|(idx, cell)| {
            let padding = widths[idx] - cell.chars().count();
            // first column is left aligned, numbers to the right
            if idx == 0 {
                format!("{}{}", cell, " ".repeat(padding))
            } else {
                format!("{}{}", " ".repeat(padding), cell)
            }
        }).join("  ").trim_end().to_string()
    };
    let separator = widths.iter().map(|w| "-".repeat(*w)).join("  ");
    let mut lines = vec![format_row(header.iter().map(|h| h.to_string()).collect()), separator];
    lines.extend(rows.into_iter().map(format_row));
    lines.join("\n")
}

pub fn catalog_table(catalog: &VehicleCatalog) -> String {
    if catalog.is_empty() {
        return "No vehicles in catalog".to_string();
    }
    let header = ["Key", "Name", "Mass (kg)", "Area (m²)", "CL", "CD", "Power (kW)", "Power (bhp)", "Top speed (km/h)"];
    let rows = catalog.iter().map(|(key, spec)| vec![
        key.clone(),
        spec.name.clone(),
        format!("{:.0}", spec.mass_kg),
        format!("{:.2}", spec.frontal_area_m2),
        format!("{:.2}", spec.lift_coefficient),
        optional_value(spec.drag_coefficient, 2),
        optional_value(spec.engine_power_kw, 0),
        optional_value(spec.engine_power_kw.map(kw_to_bhp), 0),
        format!("{:.1}", spec.top_speed_kmh)
    ]).collect();
    render_rows(&header, rows)
}

/// One line per vehicle with the headline figures of its run
pub fn summary_table(comparison: &Comparison) -> String {
    let header = ["Vehicle", "Mass (kg)", "Power (kW)", "Time (s)", "Downforce (N)", "% of weight", "Sag (mm)"];
    let rows = comparison.runs.iter().map(|run| {
        let summary = run.summary.as_ref();
        vec![
            run.vehicle.name.clone(),
            format!("{:.0}", run.vehicle.mass_kg),
            optional_value(run.vehicle.engine_power_kw, 0),
            optional_value(summary.map(|s| s.time_to_target_s), 1),
            optional_value(summary.map(|s| s.peak_downforce_n), 0),
            optional_value(summary.map(|s| s.downforce_weight_ratio_pct), 1),
            optional_value(summary.map(|s| s.peak_sag_mm), 2)
        ]
    }).collect();
    let mut table = render_rows(&header, rows);
    let short: Vec<&str> = comparison.runs.iter()
        .filter(|run| run.summary.as_ref().is_some_and(|s| !s.reached_target))
        .map(|run| run.vehicle.name.as_str())
        .collect();
    if !short.is_empty() {
        table.push_str(&format!("\n\nDid not reach {:.0} km/h: {}", comparison.target_speed_kmh, short.iter().join(", ")));
    }
    table
}

/// Final state of a single vehicle's run
pub fn vehicle_card(run: &VehicleRun) -> String {
    let mut lines = vec![
        run.vehicle.name.clone(),
        format!("  Mass:       {:.0} kg", run.vehicle.mass_kg)
    ];
    match &run.summary {
        None => {
            let reason = match run.vehicle.check_simulatable() {
                Err(e) => e.to_string(),
                Ok(_) => format!("invalid target speed `{}` km/h", run.target_speed_kmh)
            };
            lines.push(format!("  Cannot simulate, {}", reason));
        }
        Some(summary) => {
            lines.push(format!("  Speed:      {:.1} km/h", summary.final_speed_kmh));
            lines.push(format!("  Downforce:  {:.1} kg", summary.final_downforce_kgf));
            lines.push(format!("  Sag:        {:.1} mm", summary.final_sag_mm));
            lines.push(format!("  Time:       {:.2} s", summary.time_to_target_s));
            if !summary.reached_target {
                lines.push(format!("  Target of {:.1} km/h not reached", run.target_speed_kmh));
            }
        }
    }
    lines.join("\n")
}

pub fn sweep_table(run: &VehicleRun) -> String {
    let header = ["Speed (km/h)", "Speed (m/s)", "Downforce (N)", "Downforce (kg)"];
    let rows = run.sweep.iter().map(|p| vec![
        format!("{:.0}", p.speed_kmh),
        format!("{:.2}", p.speed_ms),
        format!("{:.2}", p.downforce_n),
        format!("{:.2}", p.downforce_kgf)
    ]).collect();
    format!("{}\n{}", run.vehicle.name, render_rows(&header, rows))
}

#[cfg(test)]
mod tests {
    use vehicle_catalog::VehicleCatalog;
    use crate::report::{Comparison, VehicleRun};
    use crate::report::table::{catalog_table, summary_table, sweep_table, vehicle_card};

    #[test]
    fn catalog_lists_every_vehicle() {
        let catalog = VehicleCatalog::builtin().unwrap();
        let table = catalog_table(&catalog);
        assert_eq!(table.lines().count(), catalog.len() + 2);
        assert!(table.contains("Bugatti Chiron"));
        assert!(table.lines().next().unwrap().starts_with("Key"));
    }

    #[test]
    fn summary_flags_vehicles_short_of_target() {
        let catalog = VehicleCatalog::builtin().unwrap();
        let keys = vec!["f1_rb19_2023".to_string(), "vaca_aerodinamica".to_string()];
        let comparison = Comparison::run(&catalog, &keys, 150.0).unwrap();
        let table = summary_table(&comparison);
        assert!(table.contains("F1 Red Bull RB19 (2023)"));
        assert!(table.ends_with("Did not reach 150 km/h: Vaca Aerodinámica"));
    }

    #[test]
    fn card_for_incomplete_vehicle() {
        let catalog = VehicleCatalog::from_toml_str("[vehicles.kart]\nname = \"Kart\"\nmass_kg = 150.0\n").unwrap();
        let run = VehicleRun::run("kart", catalog.get("kart").unwrap(), 80.0);
        let card = vehicle_card(&run);
        assert!(card.starts_with("Kart"));
        assert!(card.contains("Cannot simulate, missing vehicle data `lift_coefficient`"));
    }

    #[test]
    fn card_for_invalid_target() {
        let catalog = VehicleCatalog::builtin().unwrap();
        let run = VehicleRun::run("twingo", catalog.get("twingo").unwrap(), f64::NAN);
        let card = vehicle_card(&run);
        assert!(card.contains("Cannot simulate, invalid target speed"));
        assert!(!card.contains("vehicle data"));
    }

    #[test]
    fn empty_catalog_listing() {
        let catalog = VehicleCatalog::from_toml_str("").unwrap();
        assert_eq!(catalog_table(&catalog), "No vehicles in catalog");
    }

    #[test]
    fn sweep_rows() {
        let catalog = VehicleCatalog::builtin().unwrap();
        let run = VehicleRun::run("twingo", catalog.get("twingo").unwrap(), 100.0);
        // name, header, separator, 21 grid points
        assert_eq!(sweep_table(&run).lines().count(), 24);
    }
}
