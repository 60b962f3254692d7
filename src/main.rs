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




mod data;
mod report;
mod settings;

use std::env;
use std::error::Error;
use std::path::PathBuf;
use clap::{Parser, Subcommand};
use tracing_subscriber;
use tracing_appender;
use tracing::{error, info};

use crate::report::{Comparison, VehicleRun};
use crate::report::chart::ChartRenderer;
use crate::report::table;
use crate::settings::GlobalSettings;
use vehicle_catalog::VehicleLookup;

#[derive(Parser, Debug)]
#[command(version, about = "Vehicle aerodynamics and downforce simulator")]
struct Args {
    /// A vehicle catalog file, or a directory of them, to layer over the built-in vehicles
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Directory that chart images are written to
    #[arg(long, global = true)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Command
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the vehicles in the catalog
    List,
    /// Drive one vehicle up to a target speed
    Simulate {
        vehicle: String,
        #[arg(long, value_parser = parse_target_speed)]
        target: Option<f64>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_charts: bool
    },
    /// Drive several vehicles up to the same target speed
    Compare {
        #[arg(required = true)]
        vehicles: Vec<String>,
        #[arg(long, value_parser = parse_target_speed)]
        target: Option<f64>,
        #[arg(long)]
        json: bool,
        #[arg(long)]
        no_charts: bool
    },
    /// Aerodynamic forces over a grid of speeds, ignoring the powertrain
    Sweep {
        vehicle: String,
        #[arg(long, value_parser = parse_target_speed)]
        target: Option<f64>
    }
}

fn parse_target_speed(arg: &str) -> Result<f64, String> {
    let speed: f64 = arg.parse().map_err(|e| format!("`{}` is not a speed. {}", arg, e))?;
    if !speed.is_finite() || speed < 0.0 {
        return Err(format!("target speed must be a finite number of km/h >= 0, got `{}`", arg));
    }
    Ok(speed)
}

fn init_logging() {
    match env::current_dir() {
        Ok(current_dir) => {
            let file_appender = tracing_appender::rolling::never(current_dir, "downforce_lab.log");
            let subscriber = tracing_subscriber::fmt()
                .with_writer(file_appender)
                .with_ansi(false)
                .compact()
                .finish();
            match tracing::subscriber::set_global_default(subscriber) {
                Ok(_) => {
                    info!("Logging initialised");
                }
                Err(e) => {
                    eprintln!("Failed to init logging. {}", e.to_string());
                }
            }
        }
        Err(e) => {
            eprintln!("Failed to init logging. Couldn't determine current dir {}", e.to_string());
        }
    }
}

fn load_settings(args: &Args) -> GlobalSettings {
    let mut settings = GlobalSettings::load().unwrap_or_else(|e| {
        error!("Failed to load settings, using defaults. {}", e.to_string());
        GlobalSettings::default()
    });
    if let Some(catalog) = &args.catalog {
        settings.set_catalog_path(catalog);
    }
    if let Some(output) = &args.output {
        settings.set_output_path(output);
    }
    settings
}

fn print_charts(written: Vec<PathBuf>) {
    for path in written {
        println!("Chart written to {}", path.display());
    }
}

fn main() -> Result<(), Box<dyn Error>> {
    init_logging();
    let args = Args::parse();
    let settings = load_settings(&args);
    let catalog = data::load_catalog(settings.catalog_path().as_deref())?;
    let target_or_default = |target: Option<f64>| target.unwrap_or(settings.default_target_speed_kmh());

    match args.command {
        Command::List => {
            println!("{}", table::catalog_table(&catalog));
        }
        Command::Simulate { vehicle, target, json, no_charts } => {
            let spec = catalog.require(&vehicle)?;
            let run = VehicleRun::run(&vehicle, spec, target_or_default(target));
            if json {
                println!("{}", serde_json::to_string_pretty(&run.rounded())?);
            } else {
                println!("{}", table::vehicle_card(&run));
            }
            if !no_charts && run.can_simulate() {
                let renderer = ChartRenderer::new(&settings.output_path(), settings.chart_size())?;
                print_charts(renderer.render_single(&run)?);
            }
        }
        Command::Compare { vehicles, target, json, no_charts } => {
            let comparison = Comparison::run(&catalog, &vehicles, target_or_default(target))?;
            if json {
                println!("{}", serde_json::to_string_pretty(&comparison.rounded())?);
            } else {
                println!("{}", table::summary_table(&comparison));
            }
            if !no_charts {
                let renderer = ChartRenderer::new(&settings.output_path(), settings.chart_size())?;
                print_charts(renderer.render_comparison(&comparison)?);
            }
        }
        Command::Sweep { vehicle, target } => {
            let spec = catalog.require(&vehicle)?;
            let run = VehicleRun::run(&vehicle, spec, target_or_default(target));
            println!("{}", table::sweep_table(&run));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use crate::{parse_target_speed, Args, Command};

    #[test]
    fn target_speed_must_be_finite_and_non_negative() {
        assert_eq!(parse_target_speed("300"), Ok(300.0));
        assert_eq!(parse_target_speed("0"), Ok(0.0));
        assert!(parse_target_speed("NaN").is_err());
        assert!(parse_target_speed("inf").is_err());
        assert!(parse_target_speed("-20").is_err());
        assert!(parse_target_speed("fast").is_err());
    }

    #[test]
    fn invalid_target_rejected_on_command_line() {
        assert!(Args::try_parse_from(["downforce-lab", "simulate", "twingo", "--target", "NaN"]).is_err());
        let args = Args::try_parse_from(["downforce-lab", "compare", "twingo", "mazda3", "--target", "120"]).unwrap();
        match args.command {
            Command::Compare { vehicles, target, .. } => {
                assert_eq!(vehicles, vec!["twingo".to_string(), "mazda3".to_string()]);
                assert_eq!(target, Some(120.0));
            }
            _ => panic!("expected compare")
        }
    }
}
