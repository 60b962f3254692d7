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


use serde::Serialize;
use tracing::{debug, warn};
use utils::numeric::round_float_to;
use utils::units::{kmh_to_ms, ms_to_kmh, newtons_to_kgf};
use crate::acceleration::acceleration;
use crate::error::{ModelError, Result};
use crate::force::downforce;
use crate::suspension::{suspension_sag_mm, STATIC_SAG_MM};
use crate::vehicle::VehicleSpec;

/// Integration step (s)
pub const TIME_STEP: f64 = 0.05;
/// Spacing (s) of the points recorded in a trace
pub const OUTPUT_INTERVAL: f64 = 0.1;
/// Simulated time (s) after which a run that hasn't reached its target is abandoned
pub const MAX_SIMULATION_TIME: f64 = 300.0;
/// How close (m/s) to the target speed counts as having reached it
pub const TARGET_TOLERANCE: f64 = 0.1;
/// Starting speed (m/s). Non-zero so the first force evaluation never divides by zero
const INITIAL_SPEED: f64 = 0.01;

/// The state of the car at one instant of a simulated run
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObservationPoint {
    pub time_s: f64,
    pub speed_kmh: f64,
    pub speed_ms: f64,
    pub downforce_n: f64,
    pub downforce_kgf: f64,
    pub suspension_sag_mm: f64
}

impl ObservationPoint {
    pub fn rest() -> ObservationPoint {
        ObservationPoint {
            time_s: 0.0,
            speed_kmh: 0.0,
            speed_ms: 0.0,
            downforce_n: 0.0,
            downforce_kgf: 0.0,
            suspension_sag_mm: STATIC_SAG_MM
        }
    }

    fn at(time_s: f64, speed_ms: f64, spec: &VehicleSpec) -> ObservationPoint {
        let downforce_n = downforce(speed_ms, spec);
        ObservationPoint {
            time_s,
            speed_kmh: ms_to_kmh(speed_ms),
            speed_ms,
            downforce_n,
            downforce_kgf: newtons_to_kgf(downforce_n),
            suspension_sag_mm: suspension_sag_mm(downforce_n, spec)
        }
    }

    /// Copy of this point at display precision
    pub fn rounded(&self) -> ObservationPoint {
        ObservationPoint {
            time_s: round_float_to(self.time_s, 2),
            speed_kmh: round_float_to(self.speed_kmh, 1),
            speed_ms: round_float_to(self.speed_ms, 2),
            downforce_n: round_float_to(self.downforce_n, 2),
            downforce_kgf: round_float_to(self.downforce_kgf, 2),
            suspension_sag_mm: round_float_to(self.suspension_sag_mm, 2)
        }
    }
}

/// Accelerate `spec` from rest towards `target_speed_kmh` (capped at the car's own top speed).
///
/// Explicit Euler integration at [`TIME_STEP`], recording a point every [`OUTPUT_INTERVAL`]
/// plus a final point once the car is within [`TARGET_TOLERANCE`] of the target. The first
/// point is always the car at rest. If the target can't be reached the trace simply stops
/// at [`MAX_SIMULATION_TIME`].
pub fn try_simulate(spec: &VehicleSpec, target_speed_kmh: f64) -> Result<Vec<ObservationPoint>> {
    spec.check_simulatable()?;
    if target_speed_kmh.is_nan() {
        return Err(ModelError::InvalidTarget(target_speed_kmh));
    }

    let top_speed_ms = kmh_to_ms(spec.top_speed_kmh);
    let target_ms = kmh_to_ms(target_speed_kmh).min(top_speed_ms);
    let max_steps = (MAX_SIMULATION_TIME / TIME_STEP).round() as u32;

    let mut trace = vec![ObservationPoint::rest()];
    let mut speed_ms = INITIAL_SPEED;
    let mut step: u32 = 0;
    let mut next_sample_s = OUTPUT_INTERVAL;
    while speed_ms < target_ms && step < max_steps {
        speed_ms += acceleration(speed_ms, spec)? * TIME_STEP;
        step += 1;
        // derive time from the step count so it can't drift from the sampling grid
        let time_s = step as f64 * TIME_STEP;
        if speed_ms > top_speed_ms {
            speed_ms = top_speed_ms;
        }

        let point = ObservationPoint::at(time_s, speed_ms, spec);
        let mut recorded = false;
        if time_s + TIME_STEP / 2.0 >= next_sample_s {
            trace.push(point);
            next_sample_s += OUTPUT_INTERVAL;
            recorded = true;
        }
        if speed_ms >= target_ms - TARGET_TOLERANCE {
            if !recorded {
                trace.push(point);
            }
            break;
        }
    }

    if let Some(last) = trace.last() {
        debug!("{}: reached {:.1} km/h (target {:.1} km/h) in {:.2}s",
               spec.name, last.speed_kmh, ms_to_kmh(target_ms), last.time_s);
    }
    Ok(trace)
}

/// As [`try_simulate`] but a vehicle that can't be simulated produces an empty trace. The
/// reason is logged; callers should treat an empty trace as "cannot simulate".
pub fn simulate(spec: &VehicleSpec, target_speed_kmh: f64) -> Vec<ObservationPoint> {
    match try_simulate(spec, target_speed_kmh) {
        Ok(trace) => trace,
        Err(e) => {
            warn!("Cannot simulate '{}'. {}", spec.name, e);
            Vec::new()
        }
    }
}
