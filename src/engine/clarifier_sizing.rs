//! Clarifier Sizing (SOR method)
//!
//! area = (Q m³/hr × 24) / SOR m³/m²/day

use super::benchmarks::{get_benchmark_params, BenchmarkParams, Technology};
use super::chemical_dosage::dosage_with;
use super::costing::{
    annual_energy_cost, annual_sludge_cost, capex_range, clamp_flow, resolve_rate, OpexBreakdown,
    HOURS_PER_DAY, SOR_RANGE_M3_M2_DAY,
};
use super::sludge_production::sludge_with;
use super::{SizingBasis, SizingResult};

/// Size a gravity clarifier from flow alone.
///
/// No solids figure is available here, so opex covers drive and pumping
/// energy only. [`crate::engine::estimate`] adds flocculant and sludge costs
/// when TSS is known.
pub fn calculate_clarifier_sizing(
    flow_rate_m3_hr: f64,
    industry: &str,
    override_sor: Option<f64>,
) -> SizingResult {
    let params = get_benchmark_params(industry, Technology::Clarifier);
    clarifier_sizing_with(flow_rate_m3_hr, 0.0, &params, override_sor)
}

pub(crate) fn clarifier_sizing_with(
    flow_rate_m3_hr: f64,
    tss_mg_l: f64,
    params: &BenchmarkParams,
    override_sor: Option<f64>,
) -> SizingResult {
    let flow = clamp_flow(flow_rate_m3_hr);
    let sor = resolve_rate(override_sor, params.sor_m3_m2_day, SOR_RANGE_M3_M2_DAY);

    let (surface_area_m2, basis) = if flow == 0.0 {
        (0.0, SizingBasis::NoFlow)
    } else {
        (flow * HOURS_PER_DAY / sor, SizingBasis::OverflowRate)
    };

    let dosage = dosage_with(flow, tss_mg_l, params);
    let sludge = sludge_with(flow, tss_mg_l, params);
    let opex = OpexBreakdown::new(
        annual_energy_cost(flow, params),
        dosage.annual_cost_zar,
        annual_sludge_cost(sludge.daily_dry_solids_kg, params),
    );

    SizingResult::new(surface_area_m2, basis, capex_range(surface_area_m2, params), opex)
}
