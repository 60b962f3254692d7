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


use utils::units::{kw_to_w, GRAVITY};
use crate::error::{ModelError, Result};
use crate::force::{downforce, drag};
use crate::vehicle::VehicleSpec;

/// Peak tyre friction coefficient (slick racing compound)
pub const MAX_TRACTION_COEFFICIENT: f64 = 1.5;
pub const ROLLING_RESISTANCE_COEFFICIENT: f64 = 0.015;

/// Below this speed (m/s) power / speed is meaningless and the car is grip limited
pub const LOW_SPEED_THRESHOLD: f64 = 0.5;

/// The longitudinal forces (N) acting on a car at a single instant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForceBalance {
    pub motor: f64,
    pub drag: f64,
    pub rolling_from_downforce: f64,
    pub rolling_base: f64,
    /// The most force the tyres can transmit given the current normal load
    pub traction_limit: f64
}

impl ForceBalance {
    pub fn at_speed(speed_ms: f64, spec: &VehicleSpec) -> Result<ForceBalance> {
        let power_w = kw_to_w(spec.engine_power_kw.ok_or(
            ModelError::MissingField(VehicleSpec::ENGINE_POWER)
        )?);
        let aero_load = downforce(speed_ms, spec);
        Ok(ForceBalance {
            motor: power_w / speed_ms,
            drag: drag(speed_ms, spec)?,
            rolling_from_downforce: ROLLING_RESISTANCE_COEFFICIENT * aero_load,
            rolling_base: ROLLING_RESISTANCE_COEFFICIENT * spec.mass_kg * GRAVITY,
            traction_limit: MAX_TRACTION_COEFFICIENT * (spec.weight_n() + aero_load)
        })
    }

    pub fn resistance(&self) -> f64 {
        self.drag + self.rolling_from_downforce + self.rolling_base
    }

    pub fn net(&self) -> f64 {
        self.motor - self.drag - self.rolling_from_downforce - self.rolling_base
    }

    pub fn is_traction_limited(&self) -> bool {
        self.net() > self.traction_limit
    }
}

/// Net longitudinal acceleration (m/s²) at `speed_ms`.
///
/// Above walking pace this is the constant-power motor force less drag and rolling
/// resistance (which grows with downforce), divided by the effective mass and capped by
/// what the tyres can transmit. Deceleration is returned as-is.
pub fn acceleration(speed_ms: f64, spec: &VehicleSpec) -> Result<f64> {
    if speed_ms < LOW_SPEED_THRESHOLD {
        return Ok(MAX_TRACTION_COEFFICIENT * GRAVITY);
    }
    let forces = ForceBalance::at_speed(speed_ms, spec)?;
    let effective_mass = spec.effective_mass_kg();
    let unconstrained = forces.net() / effective_mass;
    let traction_ceiling = forces.traction_limit / effective_mass;
    Ok(unconstrained.min(traction_ceiling))
}
