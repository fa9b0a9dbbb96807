//! Estimation engine
//!
//! Pure functions over an immutable benchmark table. Every formula lives in
//! its own module; `estimate` runs the full set for one technology.

pub mod benchmarks;
pub mod chemical_dosage;
pub mod clarifier_sizing;
pub mod costing;
pub mod daf_sizing;
pub mod sludge_production;
pub mod troubleshooting;

// Re-export engine functions
pub use benchmarks::{benchmark_for, get_benchmark_params, BenchmarkParams, Industry, Technology, DEFAULT_INDUSTRY};
pub use chemical_dosage::{estimate_chemical_dosage, ChemicalDosage};
pub use clarifier_sizing::calculate_clarifier_sizing;
pub use costing::{
    CapexRange, InputRange, OpexBreakdown, FLOW_RANGE_M3_HR, HLR_RANGE_M_HR, SLR_RANGE_KG_M2_HR,
    SOR_RANGE_M3_M2_DAY, TSS_RANGE_MG_L,
};
pub use daf_sizing::{calculate_daf_sizing, daf_areas, DafAreas};
pub use sludge_production::{estimate_sludge_production, SludgeProduction};
pub use troubleshooting::{get_troubleshooting_tips, problem_types, tips_for};

use serde::{Deserialize, Serialize};

/// Which physical limit set the required area
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SizingBasis {
    HydraulicLoading,
    SolidsLoading,
    OverflowRate,
    NoFlow,
}

/// Output of a sizing calculation. Derived on every call, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SizingResult {
    pub surface_area_m2: f64,
    pub capex_min_zar: f64,
    pub capex_point_zar: f64,
    pub capex_max_zar: f64,
    pub opex_annual_zar: f64,
    pub basis: SizingBasis,
    pub opex: OpexBreakdown,
}

impl SizingResult {
    pub(crate) fn new(surface_area_m2: f64, basis: SizingBasis, capex: CapexRange, opex: OpexBreakdown) -> Self {
        Self {
            surface_area_m2,
            capex_min_zar: capex.min_zar,
            capex_point_zar: capex.point_zar,
            capex_max_zar: capex.max_zar,
            opex_annual_zar: opex.total_zar,
            basis,
            opex,
        }
    }
}

/// Inputs for a full estimate
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EstimateRequest {
    pub technology: Technology,
    #[serde(default)]
    pub industry: Option<String>,
    #[serde(alias = "flow_rate_m3_hr")]
    pub flow_rate_m3_hr: f64,
    #[serde(default, alias = "tss_mg_l")]
    pub tss_mg_l: Option<f64>,
    #[serde(default, alias = "override_hlr")]
    pub override_hlr: Option<f64>,
    #[serde(default, alias = "override_slr")]
    pub override_slr: Option<f64>,
    #[serde(default, alias = "override_sor")]
    pub override_sor: Option<f64>,
}

/// Sizing plus operating estimates for one technology
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EstimateSummary {
    pub industry: Industry,
    pub technology: Technology,
    pub flow_rate_m3_hr: f64,
    pub tss_mg_l: Option<f64>,
    pub sizing: SizingResult,
    /// None when TSS was not supplied
    pub chemical_dosage: Option<ChemicalDosage>,
    pub sludge: Option<SludgeProduction>,
    pub cost_per_kl_zar: f64,
    pub benchmark: BenchmarkParams,
}

/// Run every formula that applies to the requested technology.
pub fn estimate(request: &EstimateRequest) -> EstimateSummary {
    let industry_code = request.industry.as_deref().unwrap_or(DEFAULT_INDUSTRY.code());
    let params = get_benchmark_params(industry_code, request.technology);

    let flow = costing::clamp_flow(request.flow_rate_m3_hr);
    let tss = request
        .tss_mg_l
        .map(costing::clamp_tss)
        .filter(|tss| *tss > 0.0);
    let tss_value = tss.unwrap_or(0.0);

    let sizing = match request.technology {
        Technology::Daf => {
            daf_sizing::daf_sizing_with(flow, tss_value, &params, request.override_hlr, request.override_slr)
        }
        Technology::Clarifier => {
            clarifier_sizing::clarifier_sizing_with(flow, tss_value, &params, request.override_sor)
        }
    };

    let chemical_dosage = tss.map(|tss| chemical_dosage::dosage_with(flow, tss, &params));
    let sludge = tss.map(|tss| sludge_production::sludge_with(flow, tss, &params));

    EstimateSummary {
        industry: params.industry,
        technology: request.technology,
        flow_rate_m3_hr: flow,
        tss_mg_l: tss,
        cost_per_kl_zar: costing::cost_per_kl(sizing.opex_annual_zar, flow),
        sizing,
        chemical_dosage,
        sludge,
        benchmark: params,
    }
}
