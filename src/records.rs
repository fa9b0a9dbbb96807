//! Report and lead records
//!
//! Request bodies arrive with every field optional so that a missing value is
//! reported as a validation error listing the field, not as a decode failure.
//! Validation happens before anything is written.

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::engine::{self, EstimateRequest, EstimateSummary};
use crate::error::ValidationError;
use crate::funnel::{calculate_leak, focus_for_problem, simulate_leak, LeakBreakdown, LeakFocus, LeakInputs, SimulatedLeak};

// ============================================================================
// Reports
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct GenerateReportRequest {
    pub industry: Option<String>,
    pub business_name: Option<String>,
    pub website_url: Option<String>,
    pub suburb: Option<String>,
    pub biggest_problem: Option<String>,
    pub concept_focus: Option<String>,
    /// Audit answers. Without them the leak figures are simulated.
    pub diagnostic: Option<LeakInputs>,
    /// Optional engine run stored alongside the leak figures
    pub estimate: Option<EstimateRequest>,
}

/// Validated inputs as stored in `input_params`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReportInputs {
    pub industry: String,
    pub business_name: String,
    pub website_url: String,
    pub suburb: String,
    pub biggest_problem: Option<String>,
    pub diagnostic: Option<LeakInputs>,
    pub estimate: Option<EstimateRequest>,
}

/// Everything the report page renders
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalculatedData {
    /// Tab the report opens on
    pub focus: LeakFocus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub leak: Option<LeakBreakdown>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub simulation: Option<SimulatedLeak>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub estimate: Option<EstimateSummary>,
}

/// A report ready to insert; the store assigns `id` and `created_at`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewReport {
    pub industry: String,
    pub business_name: String,
    pub website_url: String,
    pub suburb: String,
    pub biggest_problem: Option<String>,
    pub concept_focus: String,
    pub input_params: ReportInputs,
    pub calculated_data: CalculatedData,
    pub simulated_review_score: f64,
    pub simulated_competitor_score: Option<f64>,
    pub simulated_meo_rank: Option<u32>,
    pub simulated_competitor_meo_rank: Option<u32>,
    pub simulated_has_title: Option<bool>,
    pub simulated_missed_calls: Option<u32>,
    pub simulated_missed_revenue: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub report: NewReport,
}

/// Validate a generate request and compute the report.
///
/// Audit answers give the deterministic leak score; otherwise the figures
/// are drawn from `rng`.
pub fn build_report<R: Rng + ?Sized>(
    request: &GenerateReportRequest,
    rng: &mut R,
) -> Result<NewReport, ValidationError> {
    let [industry, business_name, website_url, suburb] = require([
        ("industry", &request.industry),
        ("businessName", &request.business_name),
        ("websiteUrl", &request.website_url),
        ("suburb", &request.suburb),
    ])?;

    let biggest_problem = non_empty(&request.biggest_problem);
    let concept_focus = non_empty(&request.concept_focus).unwrap_or_else(|| industry.clone());
    let focus = focus_for_problem(biggest_problem.as_deref());
    let estimate = request.estimate.as_ref().map(engine::estimate);

    let (calculated_data, headline) = match &request.diagnostic {
        Some(answers) => {
            let leak = calculate_leak(answers);
            let headline = Headline {
                review_score: leak.review_rating,
                competitor_score: None,
                meo_rank: None,
                competitor_meo_rank: None,
                has_title: None,
                missed_calls: None,
                missed_revenue: leak.total_leak,
            };
            (
                CalculatedData { focus, leak: Some(leak), simulation: None, estimate },
                headline,
            )
        }
        None => {
            let sim = simulate_leak(rng);
            let headline = Headline {
                review_score: sim.review_score,
                competitor_score: Some(sim.competitor_score),
                meo_rank: Some(sim.meo_rank),
                competitor_meo_rank: Some(sim.competitor_meo_rank),
                has_title: Some(sim.has_title_tag),
                missed_calls: Some(sim.missed_calls),
                missed_revenue: sim.missed_revenue,
            };
            (
                CalculatedData { focus, leak: None, simulation: Some(sim), estimate },
                headline,
            )
        }
    };

    Ok(NewReport {
        input_params: ReportInputs {
            industry: industry.clone(),
            business_name: business_name.clone(),
            website_url: website_url.clone(),
            suburb: suburb.clone(),
            biggest_problem: biggest_problem.clone(),
            diagnostic: request.diagnostic,
            estimate: request.estimate.clone(),
        },
        industry,
        business_name,
        website_url,
        suburb,
        biggest_problem,
        concept_focus,
        calculated_data,
        simulated_review_score: headline.review_score,
        simulated_competitor_score: headline.competitor_score,
        simulated_meo_rank: headline.meo_rank,
        simulated_competitor_meo_rank: headline.competitor_meo_rank,
        simulated_has_title: headline.has_title,
        simulated_missed_calls: headline.missed_calls,
        simulated_missed_revenue: headline.missed_revenue,
    })
}

/// Flat `simulated_*` columns
struct Headline {
    review_score: f64,
    competitor_score: Option<f64>,
    meo_rank: Option<u32>,
    competitor_meo_rank: Option<u32>,
    has_title: Option<bool>,
    missed_calls: Option<u32>,
    missed_revenue: f64,
}

// ============================================================================
// Leads
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LeadCaptureRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub company: Option<String>,
    pub website_url: Option<String>,
    pub report_id: Option<String>,
    pub cta_type: Option<String>,
    pub concept_focus: Option<String>,
    pub project_notes: Option<String>,
    pub context_industry: Option<String>,
    pub context_flow_rate: Option<f64>,
    pub context_tss: Option<f64>,
    pub context_calc_area: Option<f64>,
    pub context_calc_capex_max: Option<f64>,
    pub context_calc_opex: Option<f64>,
    pub context_data: Option<LeakInputs>,
    pub context_total_leak: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewLead {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: Option<String>,
    pub website_url: Option<String>,
    pub report_id: Option<String>,
    pub cta_type: Option<String>,
    pub concept_focus: Option<String>,
    pub project_notes: Option<String>,
    pub context_industry: Option<String>,
    pub context_flow_rate: Option<f64>,
    pub context_tss: Option<f64>,
    pub context_calc_area: Option<f64>,
    pub context_calc_capex_max: Option<f64>,
    pub context_calc_opex: Option<f64>,
    pub context_data: Option<LeakInputs>,
    pub context_total_leak: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeadRecord {
    pub id: String,
    pub created_at: DateTime<Utc>,
    #[serde(flatten)]
    pub lead: NewLead,
}

/// Validate a capture request. Name, email and phone are required; the total
/// leak is derived from the audit answers when the client did not send it.
pub fn validate_lead(request: &LeadCaptureRequest) -> Result<NewLead, ValidationError> {
    let [name, email, phone] = require([
        ("name", &request.name),
        ("email", &request.email),
        ("phone", &request.phone),
    ])?;

    if !is_plausible_email(&email) {
        return Err(ValidationError::InvalidField {
            field: "email",
            reason: "expected an address like name@example.com",
        });
    }

    let context_total_leak = finite(request.context_total_leak)
        .or_else(|| request.context_data.map(|answers| calculate_leak(&answers).total_leak));

    Ok(NewLead {
        name,
        email,
        phone,
        company: non_empty(&request.company),
        website_url: non_empty(&request.website_url),
        report_id: non_empty(&request.report_id),
        cta_type: non_empty(&request.cta_type),
        concept_focus: non_empty(&request.concept_focus),
        project_notes: non_empty(&request.project_notes),
        context_industry: non_empty(&request.context_industry),
        context_flow_rate: finite(request.context_flow_rate),
        context_tss: finite(request.context_tss),
        context_calc_area: finite(request.context_calc_area),
        context_calc_capex_max: finite(request.context_calc_capex_max),
        context_calc_opex: finite(request.context_calc_opex),
        context_data: request.context_data,
        context_total_leak,
    })
}

fn is_plausible_email(email: &str) -> bool {
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

// ============================================================================
// Helpers
// ============================================================================

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

fn finite(value: Option<f64>) -> Option<f64> {
    value.filter(|v| v.is_finite())
}

/// Trimmed values of every required field, or the list of missing names
fn require<const N: usize>(fields: [(&'static str, &Option<String>); N]) -> Result<[String; N], ValidationError> {
    let missing: Vec<&'static str> = fields
        .iter()
        .filter(|(_, value)| non_empty(value).is_none())
        .map(|(name, _)| *name)
        .collect();

    if !missing.is_empty() {
        return Err(ValidationError::MissingFields(missing));
    }
    Ok(fields.map(|(_, value)| non_empty(value).unwrap_or_default()))
}
