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
use tracing::warn;
use utils::numeric::round_float_to;
use utils::units::{kmh_to_ms, newtons_to_kgf};
use crate::force::downforce;
use crate::vehicle::{VehicleSpec, MAX_TOP_SPEED_KMH};

/// Spacing (km/h) of the speed grid
pub const SWEEP_STEP_KMH: f64 = 5.0;

/// Downforce produced at one speed, independent of how the car got there
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub speed_kmh: f64,
    pub speed_ms: f64,
    pub downforce_n: f64,
    pub downforce_kgf: f64
}

impl SweepPoint {
    fn at(speed_kmh: f64, spec: &VehicleSpec) -> SweepPoint {
        let speed_ms = kmh_to_ms(speed_kmh);
        let downforce_n = downforce(speed_ms, spec);
        SweepPoint { speed_kmh, speed_ms, downforce_n, downforce_kgf: newtons_to_kgf(downforce_n) }
    }

    pub fn rounded(&self) -> SweepPoint {
        SweepPoint {
            speed_kmh: round_float_to(self.speed_kmh, 1),
            speed_ms: round_float_to(self.speed_ms, 2),
            downforce_n: round_float_to(self.downforce_n, 2),
            downforce_kgf: round_float_to(self.downforce_kgf, 2)
        }
    }
}

/// Evaluate downforce on a fixed grid from standstill up to the lower of `target_speed_kmh`
/// and the car's top speed. Grid points are derived from their index so the ceiling is
/// included whenever it lands exactly on the grid.
pub fn sweep(spec: &VehicleSpec, target_speed_kmh: f64) -> Vec<SweepPoint> {
    if target_speed_kmh.is_nan() {
        warn!("Cannot sweep '{}'. Invalid target speed", spec.name);
        return Vec::new();
    }
    let mut max_speed_kmh = target_speed_kmh.min(spec.top_speed_kmh);
    if !max_speed_kmh.is_finite() || max_speed_kmh < 0.0 {
        warn!("Cannot sweep '{}' up to {} km/h", spec.name, max_speed_kmh);
        return Vec::new();
    }
    if max_speed_kmh > MAX_TOP_SPEED_KMH {
        warn!("Sweep of '{}' capped at {} km/h", spec.name, MAX_TOP_SPEED_KMH);
        max_speed_kmh = MAX_TOP_SPEED_KMH;
    }
    let last_idx = (max_speed_kmh / SWEEP_STEP_KMH).floor() as u32;
    (0..=last_idx).map(|idx| SweepPoint::at(idx as f64 * SWEEP_STEP_KMH, spec)).collect()
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::{sweep, VehicleSpec, MAX_TOP_SPEED_KMH};
    use crate::vehicle::tests::rb19;

    #[test]
    fn grid_to_100() {
        let points = sweep(&rb19(), 100.0);
        assert_eq!(points.len(), 21);
        let speeds: Vec<f64> = points.iter().map(|p| p.speed_kmh).collect();
        let expected: Vec<f64> = (0..=20).map(|i| i as f64 * 5.0).collect();
        assert_eq!(speeds, expected);
        assert_eq!(points[0].downforce_n, 0.0);
    }

    #[test]
    fn grid_capped_by_top_speed() {
        let points = sweep(&rb19(), 500.0);
        assert_eq!(points.len(), 71);
        assert_eq!(points.last().unwrap().speed_kmh, 350.0);
        for pair in points.windows(2) {
            assert!(pair[1].speed_kmh > pair[0].speed_kmh);
        }
    }

    #[test]
    fn doubling_speed_quadruples_downforce() {
        let points = sweep(&rb19(), 200.0);
        for idx in 1..=20 {
            assert_relative_eq!(points[2 * idx].downforce_n, 4.0 * points[idx].downforce_n, max_relative = 1e-12);
            assert_relative_eq!(points[2 * idx].downforce_kgf, 4.0 * points[idx].downforce_kgf, max_relative = 1e-12);
        }
    }

    #[test]
    fn does_not_need_power_or_drag() {
        let car = VehicleSpec {
            name: "Mazda 3 Hatchback".to_string(),
            mass_kg: 1340.0,
            frontal_area_m2: 2.1,
            lift_coefficient: 0.35,
            top_speed_kmh: 220.0,
            ..Default::default()
        };
        let points = sweep(&car, 220.0);
        assert_eq!(points.len(), 45);
        assert!(points.last().unwrap().downforce_kgf > 0.0);
    }

    #[test]
    fn degenerate_ceilings() {
        assert_eq!(sweep(&rb19(), 0.0).len(), 1);
        assert!(sweep(&rb19(), -5.0).is_empty());
        assert!(sweep(&rb19(), f64::NAN).is_empty());
        assert_eq!(sweep(&rb19(), 4.9).len(), 1);
    }

    #[test]
    fn grid_capped_for_absurd_top_speed() {
        let mut car = rb19();
        car.top_speed_kmh = 1e12;
        let points = sweep(&car, f64::INFINITY);
        assert_eq!(points.len(), 401);
        assert_eq!(points.last().unwrap().speed_kmh, MAX_TOP_SPEED_KMH);
    }
}
