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


pub fn round_float_to(float: f64, decimal_places: u32) -> f64 {
    let precision_base: u64 = 10;
    let precision_factor = precision_base.pow(decimal_places) as f64;
    (float * precision_factor).round() / precision_factor
}

/// `part` as a percentage of `whole`. A zero whole yields 0 rather than infinity
pub fn percentage_of(part: f64, whole: f64) -> f64 {
    if whole == 0.0 {
        return 0.0;
    }
    part / whole * 100.0
}

/// Largest value produced by `values`, or `None` when there are none
pub fn max_of(values: impl IntoIterator<Item=f64>) -> Option<f64> {
    values.into_iter().fold(None, |acc, val| {
        match acc {
            None => Some(val),
            Some(current) => Some(current.max(val))
        }
    })
}
