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


use crate::AIR_DENSITY;
use crate::error::{ModelError, Result};
use crate::vehicle::VehicleSpec;

/// Aerodynamic force (N) pressing the car onto the road at `speed_ms`
pub fn downforce(speed_ms: f64, spec: &VehicleSpec) -> f64 {
    0.5 * AIR_DENSITY * speed_ms * speed_ms * spec.frontal_area_m2 * spec.lift_coefficient
}

/// Aerodynamic force (N) opposing motion at `speed_ms`. A vehicle without a drag coefficient
/// is a caller error here rather than a drag-free vehicle.
pub fn drag(speed_ms: f64, spec: &VehicleSpec) -> Result<f64> {
    let drag_coefficient = spec.drag_coefficient.ok_or(
        ModelError::MissingField(VehicleSpec::DRAG_COEFFICIENT)
    )?;
    Ok(0.5 * AIR_DENSITY * speed_ms * speed_ms * spec.frontal_area_m2 * drag_coefficient)
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::{downforce, drag, ModelError, VehicleSpec};
    use crate::vehicle::tests::rb19;

    #[test]
    fn downforce_at_speed() {
        let car = rb19();
        assert_eq!(downforce(0.0, &car), 0.0);
        // 0.5 * 1.225 * 100^2 * 1.45 * 4.19
        assert_relative_eq!(downforce(100.0, &car), 37212.4375, epsilon = 1e-6);
    }

    #[test]
    fn forces_scale_with_square_of_speed() {
        let car = rb19();
        for speed in [5.0, 27.7, 61.0] {
            assert_relative_eq!(downforce(2.0 * speed, &car), 4.0 * downforce(speed, &car), max_relative = 1e-12);
            assert_relative_eq!(drag(2.0 * speed, &car).unwrap(), 4.0 * drag(speed, &car).unwrap(), max_relative = 1e-12);
        }
    }

    #[test]
    fn drag_uses_drag_coefficient() {
        let car = rb19();
        let ratio = drag(50.0, &car).unwrap() / downforce(50.0, &car);
        assert_relative_eq!(ratio, 0.85 / 4.19, max_relative = 1e-12);
    }

    #[test]
    fn drag_without_coefficient_is_an_error() {
        let mut car = rb19();
        car.drag_coefficient = None;
        assert_eq!(drag(50.0, &car), Err(ModelError::MissingField(VehicleSpec::DRAG_COEFFICIENT)));
        assert!(downforce(50.0, &car) > 0.0);
    }
}
