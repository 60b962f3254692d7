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


use crate::vehicle::VehicleSpec;

/// Compression of the suspension under the car's own weight
pub const STATIC_SAG_M: f64 = 0.05;
pub const STATIC_SAG_MM: f64 = STATIC_SAG_M * 1000.0;

/// Combined wheel-rate (N/m) of a single lumped linear spring, chosen so that the car's own
/// weight produces [`STATIC_SAG_M`] of compression
pub fn suspension_stiffness(spec: &VehicleSpec) -> f64 {
    spec.weight_n() / STATIC_SAG_M
}

/// Suspension compression (m) with `downforce_n` split evenly over the four contact patches.
/// Linear spring: there's no damping and no bump stop, so the sag keeps growing with load.
pub fn suspension_sag_m(downforce_n: f64, spec: &VehicleSpec) -> f64 {
    let stiffness = suspension_stiffness(spec);
    downforce_n / (4.0 * stiffness) + STATIC_SAG_M
}

pub fn suspension_sag_mm(downforce_n: f64, spec: &VehicleSpec) -> f64 {
    suspension_sag_m(downforce_n, spec) * 1000.0
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::{suspension_sag_mm, suspension_stiffness, GRAVITY, STATIC_SAG_MM};
    use crate::vehicle::tests::rb19;

    #[test]
    fn static_sag_with_no_downforce() {
        assert_relative_eq!(suspension_sag_mm(0.0, &rb19()), STATIC_SAG_MM);
        assert_relative_eq!(STATIC_SAG_MM, 50.0);
    }

    #[test]
    fn downforce_equal_to_weight_adds_a_quarter_of_static_sag() {
        let car = rb19();
        assert_relative_eq!(suspension_stiffness(&car), 798.0 * GRAVITY / 0.05);
        assert_relative_eq!(suspension_sag_mm(car.weight_n(), &car), 62.5, epsilon = 1e-9);
    }

    #[test]
    fn sag_never_decreases_with_downforce() {
        let car = rb19();
        let mut previous = suspension_sag_mm(0.0, &car);
        for step in 1..100 {
            let sag = suspension_sag_mm(step as f64 * 500.0, &car);
            assert!(sag >= previous);
            previous = sag;
        }
    }
}
