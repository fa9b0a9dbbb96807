//! Shared Costing Helpers
//!
//! Capital cost is a base installation cost plus a per-m² rate. The Class 4
//! budget band (±40%) is applied to the area-driven part only, so a zero-area
//! unit reports `capex_min == capex_max == capex_base`.
//!
//! Operating cost sums energy, chemical and sludge-handling terms, each of
//! which scales with flow. Zero flow therefore means zero opex.
//!
//! Every input is clamped into an [`InputRange`] before any formula runs, so
//! derived figures stay finite and are never patched up afterwards.

use serde::{Deserialize, Serialize};

use super::benchmarks::BenchmarkParams;

/// Half-width of the AACE Class 4 estimate band
pub const CAPEX_RANGE_FRACTION: f64 = 0.40;

pub const HOURS_PER_DAY: f64 = 24.0;
pub const DAYS_PER_YEAR: f64 = 365.0;
pub const MG_PER_KG: f64 = 1_000_000.0;

/// Closed interval an engine input is clamped into
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputRange {
    pub min: f64,
    pub max: f64,
}

impl InputRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn clamp(&self, value: f64) -> f64 {
        value.clamp(self.min, self.max)
    }
}

// ============================================================================
// Engine input ranges (calculator fields reuse these limits)
// ============================================================================

pub const FLOW_RANGE_M3_HR: InputRange = InputRange::new(0.0, 10_000.0);
pub const TSS_RANGE_MG_L: InputRange = InputRange::new(0.0, 20_000.0);
pub const HLR_RANGE_M_HR: InputRange = InputRange::new(2.0, 15.0);
pub const SLR_RANGE_KG_M2_HR: InputRange = InputRange::new(2.0, 20.0);
pub const SOR_RANGE_M3_M2_DAY: InputRange = InputRange::new(5.0, 60.0);

/// Clamp a measured quantity. Non-finite or negative input counts as zero.
#[inline]
pub fn clamp_input(value: f64, range: InputRange) -> f64 {
    if value.is_finite() && value > 0.0 {
        range.clamp(value)
    } else {
        0.0
    }
}

#[inline]
pub fn clamp_flow(flow_rate_m3_hr: f64) -> f64 {
    clamp_input(flow_rate_m3_hr, FLOW_RANGE_M3_HR)
}

#[inline]
pub fn clamp_tss(tss_mg_l: f64) -> f64 {
    clamp_input(tss_mg_l, TSS_RANGE_MG_L)
}

/// Use the override only when it is a usable loading rate, clamped into `range`
#[inline]
pub fn resolve_rate(override_value: Option<f64>, benchmark: f64, range: InputRange) -> f64 {
    match override_value {
        Some(v) if v.is_finite() && v > 0.0 => range.clamp(v),
        _ => benchmark,
    }
}

/// Capital cost band for a given area
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CapexRange {
    pub min_zar: f64,
    pub point_zar: f64,
    pub max_zar: f64,
}

pub fn capex_range(area_m2: f64, params: &BenchmarkParams) -> CapexRange {
    debug_assert!(area_m2.is_finite() && area_m2 >= 0.0);
    let variable = area_m2 * params.capex_per_m2_zar;
    let base = params.capex_base_zar;

    CapexRange {
        min_zar: base + variable * (1.0 - CAPEX_RANGE_FRACTION),
        point_zar: base + variable,
        max_zar: base + variable * (1.0 + CAPEX_RANGE_FRACTION),
    }
}

/// Annual operating cost split by driver
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OpexBreakdown {
    pub energy_zar: f64,
    pub chemical_zar: f64,
    pub sludge_zar: f64,
    pub total_zar: f64,
}

impl OpexBreakdown {
    pub fn new(energy_zar: f64, chemical_zar: f64, sludge_zar: f64) -> Self {
        Self {
            energy_zar,
            chemical_zar,
            sludge_zar,
            total_zar: energy_zar + chemical_zar + sludge_zar,
        }
    }
}

/// Annual pumping/aeration energy cost for a flow
pub fn annual_energy_cost(flow_m3_hr: f64, params: &BenchmarkParams) -> f64 {
    clamp_flow(flow_m3_hr)
        * HOURS_PER_DAY
        * DAYS_PER_YEAR
        * params.energy_kwh_per_m3
        * params.electricity_zar_per_kwh
}

/// Annual sludge handling cost for a daily dry-solids mass
pub fn annual_sludge_cost(daily_dry_solids_kg: f64, params: &BenchmarkParams) -> f64 {
    daily_dry_solids_kg * DAYS_PER_YEAR * params.sludge_cost_zar_per_kg_ds
}

/// Operating cost per kL treated; zero when there is no flow or no cost
pub fn cost_per_kl(opex_annual_zar: f64, flow_m3_hr: f64) -> f64 {
    let annual_volume_m3 = clamp_flow(flow_m3_hr) * HOURS_PER_DAY * DAYS_PER_YEAR;
    if annual_volume_m3 > 0.0 && opex_annual_zar > 0.0 {
        opex_annual_zar / (annual_volume_m3 / 1_000.0)
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::benchmarks::{benchmark_for, Industry, Technology};
    use approx::assert_relative_eq;

    #[test]
    fn test_clamp_input() {
        assert_eq!(clamp_flow(f64::NAN), 0.0);
        assert_eq!(clamp_flow(f64::INFINITY), 0.0);
        assert_eq!(clamp_flow(-5.0), 0.0);
        assert_eq!(clamp_flow(12.5), 12.5);
        assert_eq!(clamp_flow(1e306), FLOW_RANGE_M3_HR.max);
        assert_eq!(clamp_tss(f64::MAX), TSS_RANGE_MG_L.max);
    }

    #[test]
    fn test_resolve_rate() {
        assert_eq!(resolve_rate(None, 6.0, HLR_RANGE_M_HR), 6.0);
        assert_eq!(resolve_rate(Some(9.0), 6.0, HLR_RANGE_M_HR), 9.0);
        assert_eq!(resolve_rate(Some(0.0), 6.0, HLR_RANGE_M_HR), 6.0);
        assert_eq!(resolve_rate(Some(f64::NAN), 6.0, HLR_RANGE_M_HR), 6.0);
        // A tiny rate would blow the area up; it is held at the range floor
        assert_eq!(resolve_rate(Some(1e-300), 6.0, HLR_RANGE_M_HR), HLR_RANGE_M_HR.min);
        assert_eq!(resolve_rate(Some(500.0), 30.0, SOR_RANGE_M3_M2_DAY), SOR_RANGE_M3_M2_DAY.max);
    }

    #[test]
    fn test_capex_band_around_variable_part() {
        let p = benchmark_for(Industry::FoodBeverage, Technology::Daf);
        let range = capex_range(10.0, &p);
        let variable = 10.0 * p.capex_per_m2_zar;
        assert_relative_eq!(range.point_zar, p.capex_base_zar + variable, epsilon = 1e-6);
        assert_relative_eq!(range.min_zar, p.capex_base_zar + 0.6 * variable, epsilon = 1e-6);
        assert_relative_eq!(range.max_zar, p.capex_base_zar + 1.4 * variable, epsilon = 1e-6);

        let zero = capex_range(0.0, &p);
        assert_eq!(zero.min_zar, p.capex_base_zar);
        assert_eq!(zero.max_zar, p.capex_base_zar);
    }

    #[test]
    fn test_cost_per_kl() {
        // 1 m³/hr → 8760 m³/yr = 8760 kL
        assert_relative_eq!(cost_per_kl(8_760.0, 1.0), 1_000.0, epsilon = 1e-9);
        assert_eq!(cost_per_kl(8_760.0, 0.0), 0.0);
        assert_eq!(cost_per_kl(0.0, 50.0), 0.0);
    }
}
