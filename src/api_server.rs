// HTTP API Server Module
//
// Purpose: JSON API for the report funnel, lead capture and the estimation
// engine. Handlers validate, call the pure modules, then touch the store.

use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use moka::future::Cache;
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::calculator::{all_spokes, derive_outcome, replay, spoke_by_slug, CalculatorForm};
use crate::config::{Brand, ServerConfig};
use crate::engine::{self, get_benchmark_params, get_troubleshooting_tips, EstimateRequest, Industry, Technology};
use crate::error::{StoreError, ValidationError};
use crate::funnel::{calculate_leak, LeakInputs};
use crate::notify::{LeadNotifier, Mailer, ResendMailer};
use crate::records::{build_report, validate_lead, GenerateReportRequest, LeadCaptureRequest, ReportRecord};
use crate::store::{MemoryStore, RecordStore, SupabaseStore};

const REPORT_CACHE_CAPACITY: u64 = 10_000;

// ============================================================================
// Application State
// ============================================================================

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<RecordStore>,
    pub notifier: Arc<LeadNotifier>,
    /// Reports are immutable once written, so reads can be cached freely
    pub report_cache: Cache<String, ReportRecord>,
    /// Random source for the demo leak simulation
    pub rng: Arc<Mutex<StdRng>>,
    pub brand: Brand,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> anyhow::Result<Self> {
        let store = match &config.supabase {
            Some(supabase) => {
                tracing::info!("Using hosted datastore at {}", supabase.url);
                RecordStore::Supabase(SupabaseStore::new(&supabase.url, &supabase.anon_key)?)
            }
            None => {
                tracing::warn!("SUPABASE_URL not set; records are kept in memory only");
                RecordStore::Memory(MemoryStore::new())
            }
        };

        let mailer = match &config.resend {
            Some(resend) => Mailer::Resend(ResendMailer::new(&resend.api_key, &resend.base_url)?),
            None => {
                tracing::warn!("RESEND_API_KEY not set; lead emails are logged, not sent");
                Mailer::Log
            }
        };

        let notifier = LeadNotifier {
            mailer,
            brand: config.brand,
            from: config.notify_from.clone(),
            to: config.notify_to.clone(),
        };

        Ok(Self::with_parts(
            store,
            notifier,
            config.simulation_seed,
            config.report_cache_ttl_secs,
        ))
    }

    pub fn with_parts(
        store: RecordStore,
        notifier: LeadNotifier,
        simulation_seed: Option<u64>,
        report_cache_ttl_secs: u64,
    ) -> Self {
        let rng = match simulation_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let report_cache = Cache::builder()
            .max_capacity(REPORT_CACHE_CAPACITY)
            .time_to_live(Duration::from_secs(report_cache_ttl_secs))
            .build();

        Self {
            brand: notifier.brand,
            store: Arc::new(store),
            notifier: Arc::new(notifier),
            report_cache,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// In-memory store, log-only mail, seeded simulation
    pub fn in_memory(brand: Brand, seed: u64) -> Self {
        Self::with_parts(
            RecordStore::Memory(MemoryStore::new()),
            LeadNotifier::log_only(brand),
            Some(seed),
            crate::config::DEFAULT_REPORT_CACHE_TTL_SECS,
        )
    }
}

// ============================================================================
// Router
// ============================================================================

pub fn create_router(state: AppState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(health_check))

        // Funnel
        .route("/api/report/generate", post(generate_report))
        .route("/api/reports/:id", get(get_report))
        .route("/api/lead/capture", post(capture_lead))
        .route("/api/leak/score", post(score_leak))

        // Estimation engine
        .route("/api/benchmarks/:industry/:technology", get(get_benchmarks))
        .route("/api/estimate", post(run_estimate))
        .route("/api/troubleshooting", get(get_troubleshooting))

        // Spoke calculators
        .route("/api/spokes", get(list_spokes))
        .route("/api/spokes/:slug", get(get_spoke))
        .route("/api/calculator/:slug", post(run_calculator))

        // Middleware (applied in reverse order)
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// ============================================================================
// Endpoint Handlers
// ============================================================================

async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// POST /api/report/generate
async fn generate_report(
    State(state): State<AppState>,
    payload: Result<Json<GenerateReportRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload?;

    let report = {
        let mut rng = state.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
        build_report(&request, &mut *rng)?
    };

    let record = state
        .store
        .insert_report(report)
        .await
        .map_err(|e| AppError::downstream("Failed to generate report.", e))?;

    tracing::info!(
        report_id = %record.id,
        industry = %record.report.industry,
        missed_revenue = record.report.simulated_missed_revenue,
        "Report generated"
    );

    let report_id = record.id.clone();
    state.report_cache.insert(report_id.clone(), record).await;

    Ok(Json(serde_json::json!({ "reportId": report_id })))
}

/// GET /api/reports/:id
async fn get_report(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<ReportRecord>, AppError> {
    if let Some(cached) = state.report_cache.get(&id).await {
        return Ok(Json(cached));
    }

    let record = match state.store.get_report(&id).await {
        Ok(record) => record,
        Err(StoreError::NotFound(_)) => return Err(AppError::NotFound("Report not found.".to_string())),
        Err(e) => return Err(AppError::downstream("Could not load report.", e)),
    };

    state.report_cache.insert(id, record.clone()).await;
    Ok(Json(record))
}

/// POST /api/lead/capture
///
/// The lead is persisted first; the notification email is best-effort.
async fn capture_lead(
    State(state): State<AppState>,
    payload: Result<Json<LeadCaptureRequest>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(request) = payload?;
    let lead = validate_lead(&request)?;

    let record = state
        .store
        .insert_lead(lead)
        .await
        .map_err(|e| AppError::downstream("An unexpected error occurred.", e))?;

    tracing::info!(
        lead_id = %record.id,
        report_id = ?record.lead.report_id,
        cta_type = ?record.lead.cta_type,
        "Lead captured"
    );

    if let Err(e) = state.notifier.notify(&record).await {
        tracing::warn!(lead_id = %record.id, "Lead email not sent: {}", e);
    }

    Ok(Json(serde_json::json!({
        "message": "Lead captured successfully",
        "data": { "success": true, "lead_id": record.id }
    })))
}

/// POST /api/leak/score
async fn score_leak(
    payload: Result<Json<LeakInputs>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let Json(inputs) = payload?;
    let breakdown = calculate_leak(&inputs);
    Ok(Json(serde_json::json!(breakdown)))
}

/// GET /api/benchmarks/:industry/:technology
async fn get_benchmarks(
    Path((industry, technology)): Path<(String, String)>,
) -> Result<Json<serde_json::Value>, AppError> {
    let technology = Technology::from_code(&technology)
        .ok_or_else(|| ValidationError::UnknownTechnology(technology.clone()))?;
    let params = get_benchmark_params(&industry, technology);

    Ok(Json(serde_json::json!({
        "requested_industry": industry,
        "fallback": Industry::from_code(&industry).is_none(),
        "params": params,
    })))
}

/// POST /api/estimate
async fn run_estimate(
    payload: Result<Json<EstimateRequest>, JsonRejection>,
) -> Result<Json<engine::EstimateSummary>, AppError> {
    let Json(request) = payload?;
    Ok(Json(engine::estimate(&request)))
}

#[derive(Debug, Deserialize)]
struct TroubleshootingQuery {
    #[serde(default)]
    problem_type: String,
    #[serde(default)]
    technology: String,
    /// Context only; tips do not vary by industry
    industry: Option<String>,
}

/// GET /api/troubleshooting?problem_type=&technology=
async fn get_troubleshooting(Query(query): Query<TroubleshootingQuery>) -> impl IntoResponse {
    let tips = get_troubleshooting_tips(&query.problem_type, &query.technology, query.industry.as_deref());
    tracing::debug!(
        problem_type = %query.problem_type,
        technology = %query.technology,
        industry = ?query.industry,
        count = tips.len(),
        "Troubleshooting lookup"
    );

    Json(serde_json::json!({
        "problem_type": query.problem_type,
        "technology": query.technology,
        "tips": tips,
    }))
}

/// GET /api/spokes
async fn list_spokes() -> impl IntoResponse {
    Json(serde_json::json!({
        "count": all_spokes().len(),
        "spokes": all_spokes(),
    }))
}

/// GET /api/spokes/:slug
async fn get_spoke(Path(slug): Path<String>) -> Result<Json<serde_json::Value>, AppError> {
    let spoke = spoke_by_slug(&slug).ok_or_else(|| AppError::NotFound(format!("Spoke {} not found", slug)))?;
    Ok(Json(serde_json::json!(spoke)))
}

/// POST /api/calculator/:slug
///
/// Replays the submitted form through the reducer, so out-of-range values
/// come back clamped alongside the derived engine output.
async fn run_calculator(
    Path(slug): Path<String>,
    payload: Result<Json<CalculatorForm>, JsonRejection>,
) -> Result<Json<serde_json::Value>, AppError> {
    let spoke = spoke_by_slug(&slug).ok_or_else(|| AppError::NotFound(format!("Spoke {} not found", slug)))?;
    let Json(form) = payload?;

    let state = replay(spoke, &form);
    let outcome = derive_outcome(&state);

    Ok(Json(serde_json::json!({
        "state": state,
        "outcome": outcome,
    })))
}

// ============================================================================
// Error Handling
// ============================================================================

#[derive(Debug)]
pub enum AppError {
    /// 400 with the validation message
    Validation(String),
    /// 404 with the given message
    NotFound(String),
    /// 500. `public` goes to the client, `detail` only to the log.
    Downstream { public: &'static str, detail: String },
}

impl AppError {
    fn downstream(public: &'static str, err: impl std::fmt::Display) -> Self {
        AppError::Downstream {
            public,
            detail: err.to_string(),
        }
    }
}

impl From<ValidationError> for AppError {
    fn from(err: ValidationError) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Validation(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg),
            AppError::Downstream { public, detail } => {
                tracing::error!("{}: {}", public, detail);
                (StatusCode::INTERNAL_SERVER_ERROR, public.to_string())
            }
        };

        let body = Json(serde_json::json!({
            "error": message
        }));

        (status, body).into_response()
    }
}
