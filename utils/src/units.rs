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


pub const GRAVITY: f64 = 9.81; // m/s^2

pub fn kmh_to_ms(speed_kmh: f64) -> f64 {
    speed_kmh / 3.6
}

pub fn ms_to_kmh(speed_ms: f64) -> f64 {
    speed_ms * 3.6
}

/// Express a force as the mass that would weigh the same under standard gravity
pub fn newtons_to_kgf(force_n: f64) -> f64 {
    force_n / GRAVITY
}

pub fn kw_to_w(power_kw: f64) -> f64 {
    power_kw * 1000.0
}

pub fn kw_to_bhp(power_kw: f64) -> f64 {
    power_kw * 1.341
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::units::{kmh_to_ms, kw_to_w, ms_to_kmh, newtons_to_kgf};

    #[test]
    fn speed_conversions() {
        assert_relative_eq!(kmh_to_ms(36.0), 10.0);
        assert_relative_eq!(ms_to_kmh(10.0), 36.0);
        assert_relative_eq!(ms_to_kmh(kmh_to_ms(354.9)), 354.9, epsilon = 1e-9);
        assert_eq!(kmh_to_ms(0.0), 0.0);
    }

    #[test]
    fn force_and_power_conversions() {
        assert_relative_eq!(newtons_to_kgf(981.0), 100.0);
        assert_relative_eq!(newtons_to_kgf(-9.81), -1.0);
        assert_relative_eq!(kw_to_w(746.0), 746000.0);
    }
}
