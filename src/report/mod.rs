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


pub mod chart;
pub mod table;

use std::io;
use serde::Serialize;
use tracing::{info, warn};

use aero_model::{ObservationPoint, SimulationRequest, SweepPoint, TraceSummary, VehicleSpec};
use vehicle_catalog::{CatalogError, VehicleLookup};


#[derive(thiserror::Error, Debug)]
pub enum ReportError {
    #[error("io error. {0}")]
    IoError(#[from] io::Error),
    #[error("vehicle catalog error. {0}")]
    CatalogError(#[from] CatalogError),
    #[error("at least one vehicle is needed for a comparison")]
    NoVehicles,
    #[error("failed to draw `{0}`. {1}")]
    DrawingError(String, String)
}

/// The simulated run and velocity sweep of one vehicle
#[derive(Debug, Clone, Serialize)]
pub struct VehicleRun {
    pub key: String,
    pub vehicle: VehicleSpec,
    pub target_speed_kmh: f64,
    pub trace: Vec<ObservationPoint>,
    pub sweep: Vec<SweepPoint>,
    pub summary: Option<TraceSummary>
}

impl VehicleRun {
    pub fn run(key: &str, vehicle: &VehicleSpec, target_speed_kmh: f64) -> VehicleRun {
        let request = SimulationRequest::new(vehicle.clone(), target_speed_kmh);
        let trace = request.simulate();
        let sweep = request.sweep();
        let summary = TraceSummary::from_trace(&request, &trace);
        match &summary {
            None => warn!("{} ({}) could not be simulated", key, vehicle.name),
            Some(s) if !s.reached_target => {
                info!("{} only reached {:.1} km/h of {:.1} km/h", vehicle.name, s.final_speed_kmh, request.effective_ceiling_kmh())
            }
            Some(_) => {}
        }
        VehicleRun {
            key: key.to_string(),
            vehicle: request.vehicle,
            target_speed_kmh,
            trace,
            sweep,
            summary
        }
    }

    pub fn can_simulate(&self) -> bool {
        !self.trace.is_empty()
    }

    /// Copy of this run at display precision
    pub fn rounded(&self) -> VehicleRun {
        VehicleRun {
            key: self.key.clone(),
            vehicle: self.vehicle.clone(),
            target_speed_kmh: self.target_speed_kmh,
            trace: self.trace.iter().map(|p| p.rounded()).collect(),
            sweep: self.sweep.iter().map(|p| p.rounded()).collect(),
            summary: self.summary.clone()
        }
    }
}

/// Several vehicles driven up to the same target speed
#[derive(Debug, Clone, Serialize)]
pub struct Comparison {
    pub target_speed_kmh: f64,
    pub runs: Vec<VehicleRun>
}

impl Comparison {
    /// Every key must resolve before anything is simulated. Each run is independent of the
    /// others so the order of `keys` is kept as given.
    pub fn run(lookup: &impl VehicleLookup, keys: &[String], target_speed_kmh: f64) -> Result<Comparison, ReportError> {
        if keys.is_empty() {
            return Err(ReportError::NoVehicles);
        }
        let vehicles = keys.iter()
            .map(|key| lookup.require(key).map(|spec| (key, spec)))
            .collect::<Result<Vec<_>, CatalogError>>()?;
        let runs = vehicles.into_iter()
            .map(|(key, spec)| VehicleRun::run(key, spec, target_speed_kmh))
            .collect();
        Ok(Comparison { target_speed_kmh, runs })
    }

    pub fn rounded(&self) -> Comparison {
        Comparison {
            target_speed_kmh: self.target_speed_kmh,
            runs: self.runs.iter().map(|r| r.rounded()).collect()
        }
    }
}
