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


use std::fs;
use std::path::{Path, PathBuf};
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::{info, warn};

use utils::filesystem::create_safe_filename_in_path;
use utils::numeric::max_of;
use crate::report::{Comparison, ReportError, VehicleRun};

const CHART_FILE_SUFFIX: &'static str = "png";

const PALETTE: [RGBColor; 6] = [
    RGBColor(0xe6, 0x19, 0x4b),
    RGBColor(0x3c, 0xb4, 0x4b),
    RGBColor(0xff, 0xe1, 0x19),
    RGBColor(0x43, 0x63, 0xd8),
    RGBColor(0xf5, 0x82, 0x31),
    RGBColor(0x91, 0x1e, 0xb4)
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    SpeedOverTime,
    DownforceOverTime,
    DownforceOverSpeed,
    SagOverTime,
    SpeedSquaredOverSpeed,
    TraceDownforceOverSpeed,
    SagOverSpeed
}

impl ChartKind {
    pub const COMPARISON: [ChartKind; 4] = [
        ChartKind::SpeedOverTime,
        ChartKind::DownforceOverTime,
        ChartKind::DownforceOverSpeed,
        ChartKind::SagOverTime
    ];
    pub const SINGLE_VEHICLE: [ChartKind; 3] = [
        ChartKind::SpeedSquaredOverSpeed,
        ChartKind::TraceDownforceOverSpeed,
        ChartKind::SagOverSpeed
    ];

    pub fn caption(&self) -> &'static str {
        match self {
            ChartKind::SpeedOverTime => "Speed",
            ChartKind::DownforceOverTime => "Downforce",
            ChartKind::DownforceOverSpeed => "Downforce vs Speed",
            ChartKind::SagOverTime => "Suspension Sag",
            ChartKind::SpeedSquaredOverSpeed => "Speed²",
            ChartKind::TraceDownforceOverSpeed => "Downforce",
            ChartKind::SagOverSpeed => "Suspension Sag"
        }
    }

    pub fn x_desc(&self) -> &'static str {
        match self {
            ChartKind::SpeedOverTime |
            ChartKind::DownforceOverTime |
            ChartKind::SagOverTime => "Time (s)",
            _ => "Speed (km/h)"
        }
    }

    pub fn y_desc(&self) -> &'static str {
        match self {
            ChartKind::SpeedOverTime => "Speed (km/h)",
            ChartKind::DownforceOverTime |
            ChartKind::DownforceOverSpeed |
            ChartKind::TraceDownforceOverSpeed => "Downforce (kg)",
            ChartKind::SagOverTime |
            ChartKind::SagOverSpeed => "Sag (mm)",
            ChartKind::SpeedSquaredOverSpeed => "Speed² (m²/s²)"
        }
    }

    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::SpeedOverTime => "speed_time",
            ChartKind::DownforceOverTime => "downforce_time",
            ChartKind::DownforceOverSpeed => "downforce_speed",
            ChartKind::SagOverTime => "sag_time",
            ChartKind::SpeedSquaredOverSpeed => "speed_squared",
            ChartKind::TraceDownforceOverSpeed => "downforce",
            ChartKind::SagOverSpeed => "sag"
        }
    }

    /// The (x, y) points this chart plots for `run`
    pub fn points(&self, run: &VehicleRun) -> Vec<(f64, f64)> {
        match self {
            ChartKind::SpeedOverTime => run.trace.iter().map(|p| (p.time_s, p.speed_kmh)).collect(),
            ChartKind::DownforceOverTime => run.trace.iter().map(|p| (p.time_s, p.downforce_kgf)).collect(),
            ChartKind::DownforceOverSpeed => run.sweep.iter().map(|p| (p.speed_kmh, p.downforce_kgf)).collect(),
            ChartKind::SagOverTime => run.trace.iter().map(|p| (p.time_s, p.suspension_sag_mm)).collect(),
            ChartKind::SpeedSquaredOverSpeed => run.trace.iter().map(|p| (p.speed_kmh, p.speed_ms * p.speed_ms)).collect(),
            ChartKind::TraceDownforceOverSpeed => run.trace.iter().map(|p| (p.speed_kmh, p.downforce_kgf)).collect(),
            ChartKind::SagOverSpeed => run.trace.iter().map(|p| (p.speed_kmh, p.suspension_sag_mm)).collect()
        }
    }
}

/// Parse a `#rrggbb` colour
pub fn parse_hex_colour(colour: &str) -> Option<RGBColor> {
    let hex = colour.trim().strip_prefix('#')?;
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |idx: usize| u8::from_str_radix(&hex[idx..idx + 2], 16).ok();
    Some(RGBColor(channel(0)?, channel(2)?, channel(4)?))
}

#[derive(Debug, Clone)]
pub struct Series {
    pub label: String,
    pub colour: RGBColor,
    pub points: Vec<(f64, f64)>
}

impl Series {
    /// One series per run that has something to plot. Runs without a usable display colour
    /// take the next palette colour.
    pub fn for_runs(kind: ChartKind, runs: &[VehicleRun]) -> Vec<Series> {
        runs.iter().enumerate().filter_map(|(idx, run)| {
            let points = kind.points(run);
            if points.is_empty() {
                return None;
            }
            let colour = parse_hex_colour(&run.vehicle.display_color).unwrap_or(PALETTE[idx % PALETTE.len()]);
            Some(Series { label: run.vehicle.name.clone(), colour, points })
        }).collect()
    }
}

/// Upper x and y bounds covering every series, both axes starting at zero
fn axis_limits(series: &[Series]) -> (f64, f64) {
    let x_max = max_of(series.iter().flat_map(|s| s.points.iter().map(|(x, _)| *x))).unwrap_or(0.0);
    let y_max = max_of(series.iter().flat_map(|s| s.points.iter().map(|(_, y)| *y))).unwrap_or(0.0);
    let x_limit = if x_max > 0.0 { x_max } else { 1.0 };
    let y_limit = if y_max > 0.0 { y_max * 1.05 } else { 1.0 };
    (x_limit, y_limit)
}

fn drawing_error<E: std::fmt::Display>(kind: ChartKind) -> impl Fn(E) -> ReportError {
    move |e| ReportError::DrawingError(kind.caption().to_string(), e.to_string())
}

/// A single chart image. The canvas owns its drawing area for as long as it lives and
/// `finish` writes it out, so only one chart is ever open per file.
pub struct ChartCanvas<'a> {
    root: DrawingArea<BitMapBackend<'a>, Shift>
}

impl<'a> ChartCanvas<'a> {
    pub fn create(path: &'a Path, size: (u32, u32)) -> Result<ChartCanvas<'a>, ReportError> {
        let root = BitMapBackend::new(path, size).into_drawing_area();
        root.fill(&BLACK).map_err(|e| ReportError::DrawingError(path.display().to_string(), e.to_string()))?;
        Ok(ChartCanvas { root })
    }

    pub fn draw(&self, kind: ChartKind, series: &[Series]) -> Result<(), ReportError> {
        let (x_limit, y_limit) = axis_limits(series);
        let mut context = ChartBuilder::on(&self.root)
            .margin(15)
            .caption(kind.caption(), ("sans-serif", 24).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Bottom, 50)
            .set_label_area_size(LabelAreaPosition::Left, 70)
            .build_cartesian_2d(0f64..x_limit, 0f64..y_limit)
            .map_err(drawing_error(kind))?;

        context
            .configure_mesh()
            .x_labels(10)
            .x_desc(kind.x_desc())
            .y_labels(10)
            .y_desc(kind.y_desc())
            .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
            .label_style(("sans-serif", 14).into_font().color(&WHITE))
            .bold_line_style(&WHITE.mix(0.2))
            .light_line_style(&WHITE.mix(0.1))
            .draw()
            .map_err(drawing_error(kind))?;

        for s in series {
            let colour = s.colour;
            context
                .draw_series(LineSeries::new(s.points.iter().copied(), colour.stroke_width(3)))
                .map_err(drawing_error(kind))?
                .label(s.label.as_str())
                .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], colour.stroke_width(3)));
        }

        context
            .configure_series_labels()
            .position(SeriesLabelPosition::UpperLeft)
            .label_font(("sans-serif", 14).into_font().color(&WHITE))
            .background_style(&BLACK.mix(0.8))
            .border_style(&WHITE)
            .draw()
            .map_err(drawing_error(kind))?;
        Ok(())
    }

    pub fn finish(self) -> Result<(), ReportError> {
        self.root.present().map_err(|e| ReportError::DrawingError("chart".to_string(), e.to_string()))
    }
}

/// Writes chart images into one output directory
pub struct ChartRenderer {
    output_dir: PathBuf,
    size: (u32, u32)
}

impl ChartRenderer {
    pub fn new(output_dir: &Path, size: (u32, u32)) -> Result<ChartRenderer, ReportError> {
        fs::create_dir_all(output_dir)?;
        Ok(ChartRenderer { output_dir: output_dir.to_path_buf(), size })
    }

    /// Draw one chart into a new file named after `name`. Returns `None` if there was
    /// nothing to plot.
    pub fn render(&self, kind: ChartKind, name: &str, series: &[Series]) -> Result<Option<PathBuf>, ReportError> {
        if series.is_empty() {
            warn!("Nothing to plot for {} chart of {}", kind.caption(), name);
            return Ok(None);
        }
        let path = create_safe_filename_in_path(&self.output_dir,
                                                &format!("{} {}", name, kind.file_stem()),
                                                CHART_FILE_SUFFIX);
        {
            let canvas = ChartCanvas::create(&path, self.size)?;
            canvas.draw(kind, series)?;
            canvas.finish()?;
        }
        info!("Wrote {}", path.display());
        Ok(Some(path))
    }

    pub fn render_comparison(&self, comparison: &Comparison) -> Result<Vec<PathBuf>, ReportError> {
        let mut written = Vec::new();
        for kind in ChartKind::COMPARISON {
            let series = Series::for_runs(kind, &comparison.runs);
            if let Some(path) = self.render(kind, "comparison", &series)? {
                written.push(path);
            }
        }
        Ok(written)
    }

    pub fn render_single(&self, run: &VehicleRun) -> Result<Vec<PathBuf>, ReportError> {
        let mut written = Vec::new();
        for kind in ChartKind::SINGLE_VEHICLE {
            let mut series = Series::for_runs(kind, std::slice::from_ref(run));
            for s in series.iter_mut() {
                s.label = kind.y_desc().to_string();
            }
            if let Some(path) = self.render(kind, &run.vehicle.name, &series)? {
                written.push(path);
            }
        }
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use plotters::style::RGBColor;
    use vehicle_catalog::VehicleCatalog;
    use crate::report::chart::{axis_limits, parse_hex_colour, ChartKind, Series, PALETTE};
    use crate::report::{Comparison, VehicleRun};

    #[test]
    fn hex_colours() {
        assert_eq!(parse_hex_colour("#1e41ff"), Some(RGBColor(0x1e, 0x41, 0xff)));
        assert_eq!(parse_hex_colour(" #FFFFFF "), Some(RGBColor(255, 255, 255)));
        assert_eq!(parse_hex_colour("1e41ff"), None);
        assert_eq!(parse_hex_colour("#1e41f"), None);
        assert_eq!(parse_hex_colour("#zz41ff"), None);
        assert_eq!(parse_hex_colour("#ééé"), None);
    }

    #[test]
    fn speed_squared_points() {
        let catalog = VehicleCatalog::builtin().unwrap();
        let run = VehicleRun::run("ferrari_458", catalog.get("ferrari_458").unwrap(), 200.0);
        let points = ChartKind::SpeedSquaredOverSpeed.points(&run);
        assert_eq!(points.len(), run.trace.len());
        let last = run.trace.last().unwrap();
        assert_relative_eq!(points.last().unwrap().1, last.speed_ms * last.speed_ms);
        assert_eq!(ChartKind::DownforceOverSpeed.points(&run).len(), run.sweep.len());
    }

    #[test]
    fn series_skip_unsimulatable_runs() {
        let mut catalog = VehicleCatalog::builtin().unwrap();
        catalog.extend_from(VehicleCatalog::from_toml_str(
            "[vehicles.kart]\nmass_kg = 150.0\nfrontal_area_m2 = 0.6\nlift_coefficient = 0.1\ntop_speed_kmh = 90.0\ndisplay_color = \"teal\"\n"
        ).unwrap());
        let keys = vec!["kart".to_string(), "mazda3".to_string()];
        let comparison = Comparison::run(&catalog, &keys, 80.0).unwrap();

        let over_time = Series::for_runs(ChartKind::SpeedOverTime, &comparison.runs);
        assert_eq!(over_time.len(), 1);
        assert_eq!(over_time[0].colour, RGBColor(0xa0, 0x00, 0x00));

        // the sweep needs no power figure so the kart still shows up, in a palette colour
        let over_speed = Series::for_runs(ChartKind::DownforceOverSpeed, &comparison.runs);
        assert_eq!(over_speed.len(), 2);
        assert_eq!(over_speed[0].colour, PALETTE[0]);
    }

    #[test]
    fn axes_cover_all_series() {
        let series = vec![
            Series { label: "a".to_string(), colour: PALETTE[0], points: vec![(0.0, 0.0), (4.0, 10.0)] },
            Series { label: "b".to_string(), colour: PALETTE[1], points: vec![(0.0, 0.0), (7.0, 2.0)] }
        ];
        let (x, y) = axis_limits(&series);
        assert_eq!(x, 7.0);
        assert_relative_eq!(y, 10.5);
        assert_eq!(axis_limits(&[]), (1.0, 1.0));
    }
}
