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
use utils::numeric::{max_of, percentage_of};
use utils::units::{kmh_to_ms, newtons_to_kgf};
use crate::simulation::{ObservationPoint, TARGET_TOLERANCE};
use crate::vehicle::SimulationRequest;

/// The headline figures of a simulated run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TraceSummary {
    pub time_to_target_s: f64,
    pub final_speed_kmh: f64,
    pub final_downforce_kgf: f64,
    pub final_sag_mm: f64,
    pub peak_downforce_n: f64,
    pub peak_downforce_kgf: f64,
    /// Peak downforce as a percentage of the car's weight
    pub downforce_weight_ratio_pct: f64,
    pub peak_sag_mm: f64,
    pub reached_target: bool
}

impl TraceSummary {
    /// `None` for an empty trace, i.e. a vehicle that couldn't be simulated
    pub fn from_trace(request: &SimulationRequest, trace: &[ObservationPoint]) -> Option<TraceSummary> {
        let last = trace.last()?;
        let peak_downforce_n = max_of(trace.iter().map(|p| p.downforce_n))?;
        let peak_sag_mm = max_of(trace.iter().map(|p| p.suspension_sag_mm))?;
        let target_ms = kmh_to_ms(request.effective_ceiling_kmh());
        Some(TraceSummary {
            time_to_target_s: last.time_s,
            final_speed_kmh: last.speed_kmh,
            final_downforce_kgf: last.downforce_kgf,
            final_sag_mm: last.suspension_sag_mm,
            peak_downforce_n,
            peak_downforce_kgf: newtons_to_kgf(peak_downforce_n),
            downforce_weight_ratio_pct: percentage_of(peak_downforce_n, request.vehicle.weight_n()),
            peak_sag_mm,
            reached_target: last.speed_ms >= target_ms - TARGET_TOLERANCE
        })
    }
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;
    use crate::{SimulationRequest, TraceSummary};
    use crate::vehicle::tests::rb19;

    #[test]
    fn summary_of_rb19_to_300() {
        let request = SimulationRequest::new(rb19(), 300.0);
        let trace = request.simulate();
        let summary = TraceSummary::from_trace(&request, &trace).unwrap();
        let last = trace.last().unwrap();

        assert!(summary.reached_target);
        assert_eq!(summary.time_to_target_s, last.time_s);
        assert_eq!(summary.peak_downforce_n, last.downforce_n);
        assert_eq!(summary.peak_sag_mm, last.suspension_sag_mm);
        assert_relative_eq!(summary.downforce_weight_ratio_pct,
                            summary.peak_downforce_kgf / 798.0 * 100.0, max_relative = 1e-12);
        // an F1 car makes well over its own weight in downforce at 300 km/h
        assert!(summary.downforce_weight_ratio_pct > 300.0);
    }

    #[test]
    fn unreachable_target_not_flagged_as_reached() {
        let mut car = rb19();
        car.engine_power_kw = Some(100.0);
        let request = SimulationRequest::new(car, 300.0);
        let trace = request.simulate();
        let summary = TraceSummary::from_trace(&request, &trace).unwrap();
        assert!(!summary.reached_target);
        assert!(summary.final_speed_kmh < 300.0);
    }

    #[test]
    fn empty_trace_has_no_summary() {
        let request = SimulationRequest::new(rb19(), 300.0);
        assert_eq!(TraceSummary::from_trace(&request, &[]), None);
    }
}
