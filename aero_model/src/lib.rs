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


mod error;
mod vehicle;
mod force;
mod acceleration;
mod suspension;
mod simulation;
mod sweep;
mod summary;

pub use utils::units::GRAVITY;

pub const AIR_DENSITY: f64 = 1.225; // Air density in kg/m³ (at sea level)

pub use error::{ModelError, Result};
pub use vehicle::{VehicleSpec, SimulationRequest, MAX_TOP_SPEED_KMH};
pub use force::{downforce, drag};
pub use acceleration::{acceleration, ForceBalance, MAX_TRACTION_COEFFICIENT, ROLLING_RESISTANCE_COEFFICIENT};
pub use suspension::{suspension_stiffness, suspension_sag_m, suspension_sag_mm, STATIC_SAG_M, STATIC_SAG_MM};
pub use simulation::{simulate, try_simulate, ObservationPoint, TIME_STEP, OUTPUT_INTERVAL, MAX_SIMULATION_TIME, TARGET_TOLERANCE};
pub use sweep::{sweep, SweepPoint, SWEEP_STEP_KMH};
pub use summary::TraceSummary;
