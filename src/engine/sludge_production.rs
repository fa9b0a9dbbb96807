//! Sludge Production Estimation
//!
//! Dry solids captured per day = influent solids mass × removal efficiency.

use serde::{Deserialize, Serialize};

use super::benchmarks::{get_benchmark_params, BenchmarkParams, Technology};
use super::costing::{clamp_flow, clamp_tss, HOURS_PER_DAY, MG_PER_KG};

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SludgeProduction {
    pub daily_dry_solids_kg: f64,
}

/// daily_dry_solids_kg = flow (m³/hr) × 24 × TSS ÷ 1e6 × removal
pub fn estimate_sludge_production(
    flow_rate_m3_hr: f64,
    tss_mg_l: f64,
    industry: &str,
    technology: Technology,
) -> SludgeProduction {
    let params = get_benchmark_params(industry, technology);
    sludge_with(flow_rate_m3_hr, tss_mg_l, &params)
}

pub(crate) fn sludge_with(flow_rate_m3_hr: f64, tss_mg_l: f64, params: &BenchmarkParams) -> SludgeProduction {
    let influent_kg_day = clamp_flow(flow_rate_m3_hr) * HOURS_PER_DAY * clamp_tss(tss_mg_l) / MG_PER_KG;

    SludgeProduction {
        daily_dry_solids_kg: influent_kg_day * params.removal_efficiency,
    }
}
