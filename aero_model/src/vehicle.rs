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


use serde::{Deserialize, Serialize};
use utils::units::GRAVITY;
use crate::error::{ModelError, Result};
use crate::simulation::{simulate, ObservationPoint};
use crate::sweep::{sweep, SweepPoint};

/// Allowance for the rotational inertia of the wheels, applied on top of the sprung mass
pub const ROTATIONAL_INERTIA_FACTOR: f64 = 1.05;

/// Highest top speed (km/h) accepted for a vehicle
pub const MAX_TOP_SPEED_KMH: f64 = 2000.0;

/// Physical description of a vehicle. Numeric fields that are absent from a data source
/// come through as zero (or `None`) and are rejected by [`VehicleSpec::check_simulatable`]
/// rather than at load time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleSpec {
    pub name: String,
    pub display_color: String,
    pub mass_kg: f64,
    pub frontal_area_m2: f64,
    pub lift_coefficient: f64,
    pub drag_coefficient: Option<f64>,
    pub engine_power_kw: Option<f64>,
    pub top_speed_kmh: f64
}

impl VehicleSpec {
    pub const MASS: &'static str = "mass_kg";
    pub const FRONTAL_AREA: &'static str = "frontal_area_m2";
    pub const LIFT_COEFFICIENT: &'static str = "lift_coefficient";
    pub const DRAG_COEFFICIENT: &'static str = "drag_coefficient";
    pub const ENGINE_POWER: &'static str = "engine_power_kw";
    pub const TOP_SPEED: &'static str = "top_speed_kmh";

    pub fn weight_n(&self) -> f64 {
        self.mass_kg * GRAVITY
    }

    pub fn effective_mass_kg(&self) -> f64 {
        self.mass_kg * ROTATIONAL_INERTIA_FACTOR
    }

    /// Confirm that every value the time-stepped model depends on is present and physical.
    /// Returns the first offending field.
    pub fn check_simulatable(&self) -> Result<()> {
        required_positive(Self::LIFT_COEFFICIENT, self.lift_coefficient)?;
        required_positive(Self::FRONTAL_AREA, self.frontal_area_m2)?;
        required_positive(Self::MASS, self.mass_kg)?;
        required_positive(Self::ENGINE_POWER, self.engine_power_kw.unwrap_or(0.0))?;
        match self.drag_coefficient {
            None => return Err(ModelError::MissingField(Self::DRAG_COEFFICIENT)),
            Some(cd) => non_negative(Self::DRAG_COEFFICIENT, cd)?
        }
        required_positive(Self::TOP_SPEED, self.top_speed_kmh)?;
        top_speed_in_range(self.top_speed_kmh)
    }

    /// Check that no physical value supplied is negative or non-finite. Values that are
    /// missing entirely pass.
    pub fn check_physical(&self) -> Result<()> {
        non_negative(Self::MASS, self.mass_kg)?;
        non_negative(Self::FRONTAL_AREA, self.frontal_area_m2)?;
        non_negative(Self::LIFT_COEFFICIENT, self.lift_coefficient)?;
        if let Some(cd) = self.drag_coefficient {
            non_negative(Self::DRAG_COEFFICIENT, cd)?;
        }
        if let Some(power) = self.engine_power_kw {
            non_negative(Self::ENGINE_POWER, power)?;
        }
        non_negative(Self::TOP_SPEED, self.top_speed_kmh)?;
        top_speed_in_range(self.top_speed_kmh)
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(ModelError::InvalidField(field, value));
    }
    Ok(())
}

fn required_positive(field: &'static str, value: f64) -> Result<()> {
    non_negative(field, value)?;
    if value == 0.0 {
        return Err(ModelError::MissingField(field));
    }
    Ok(())
}

fn top_speed_in_range(top_speed_kmh: f64) -> Result<()> {
    if top_speed_kmh > MAX_TOP_SPEED_KMH {
        return Err(ModelError::InvalidField(VehicleSpec::TOP_SPEED, top_speed_kmh));
    }
    Ok(())
}

/// A vehicle paired with the speed it should be driven up to
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationRequest {
    pub vehicle: VehicleSpec,
    pub target_speed_kmh: f64
}

impl SimulationRequest {
    pub fn new(vehicle: VehicleSpec, target_speed_kmh: f64) -> SimulationRequest {
        SimulationRequest { vehicle, target_speed_kmh }
    }

    /// The requested target can never exceed what the vehicle itself is capable of
    pub fn effective_ceiling_kmh(&self) -> f64 {
        self.target_speed_kmh.min(self.vehicle.top_speed_kmh)
    }

    pub fn simulate(&self) -> Vec<ObservationPoint> {
        simulate(&self.vehicle, self.target_speed_kmh)
    }

    pub fn sweep(&self) -> Vec<SweepPoint> {
        sweep(&self.vehicle, self.target_speed_kmh)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use crate::{ModelError, SimulationRequest, VehicleSpec};

    pub(crate) fn rb19() -> VehicleSpec {
        VehicleSpec {
            name: "F1 Red Bull RB19 (2023)".to_string(),
            display_color: "#1e41ff".to_string(),
            mass_kg: 798.0,
            frontal_area_m2: 1.45,
            lift_coefficient: 4.19,
            drag_coefficient: Some(0.85),
            engine_power_kw: Some(746.0),
            top_speed_kmh: 354.9
        }
    }

    #[test]
    fn complete_vehicle_is_simulatable() {
        assert_eq!(rb19().check_simulatable(), Ok(()));
        assert_eq!(rb19().check_physical(), Ok(()));
    }

    #[test]
    fn missing_fields_reported_in_order() {
        let mut car = rb19();
        car.engine_power_kw = None;
        assert_eq!(car.check_simulatable(), Err(ModelError::MissingField(VehicleSpec::ENGINE_POWER)));
        car.mass_kg = 0.0;
        assert_eq!(car.check_simulatable(), Err(ModelError::MissingField(VehicleSpec::MASS)));
        car.lift_coefficient = 0.0;
        assert_eq!(car.check_simulatable(), Err(ModelError::MissingField(VehicleSpec::LIFT_COEFFICIENT)));

        let mut car = rb19();
        car.drag_coefficient = None;
        assert_eq!(car.check_simulatable(), Err(ModelError::MissingField(VehicleSpec::DRAG_COEFFICIENT)));
        assert_eq!(car.check_physical(), Ok(()));
    }

    #[test]
    fn unphysical_values_rejected() {
        let mut car = rb19();
        car.frontal_area_m2 = -1.45;
        assert_eq!(car.check_physical(), Err(ModelError::InvalidField(VehicleSpec::FRONTAL_AREA, -1.45)));
        assert!(car.check_simulatable().is_err());

        let mut car = rb19();
        car.top_speed_kmh = f64::INFINITY;
        assert!(matches!(car.check_simulatable(), Err(ModelError::InvalidField(VehicleSpec::TOP_SPEED, _))));

        car.top_speed_kmh = 1e12;
        assert_eq!(car.check_physical(), Err(ModelError::InvalidField(VehicleSpec::TOP_SPEED, 1e12)));
        assert!(car.check_simulatable().is_err());
    }

    #[test]
    fn zero_top_speed_is_missing() {
        let mut car = rb19();
        car.top_speed_kmh = 0.0;
        assert_eq!(car.check_simulatable(), Err(ModelError::MissingField(VehicleSpec::TOP_SPEED)));
        assert_eq!(car.check_physical(), Ok(()));
    }

    #[test]
    fn ceiling_is_min_of_target_and_top_speed() {
        assert_eq!(SimulationRequest::new(rb19(), 300.0).effective_ceiling_kmh(), 300.0);
        assert_eq!(SimulationRequest::new(rb19(), 400.0).effective_ceiling_kmh(), 354.9);
    }

    #[test]
    fn missing_fields_deserialise_as_empty() {
        let car: VehicleSpec = toml::from_str("name = \"bare\"\nmass_kg = 700.0\n").unwrap();
        assert_eq!(car.mass_kg, 700.0);
        assert_eq!(car.frontal_area_m2, 0.0);
        assert_eq!(car.engine_power_kw, None);
    }
}
