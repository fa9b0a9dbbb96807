//! Effluentic
//!
//! Benchmark-driven wastewater treatment estimates and the lead funnel that
//! sits around them.
//!
//! - `engine/`: DAF and clarifier sizing, chemical dosage, sludge production,
//!   troubleshooting tips (pure functions over static benchmark tables)
//! - `funnel/`: money-leak audit scoring and the seeded demo simulation
//! - `calculator/`: spoke page configuration and the form reducer
//! - `records`, `store`, `notify`: report/lead persistence and lead emails
//! - `api_server`: axum JSON API (feature `api`)

pub mod calculator;
pub mod config;
pub mod engine;
pub mod error;
pub mod funnel;
pub mod notify;
pub mod records;
pub mod utils;

#[cfg(feature = "api")]
pub mod api_server;
#[cfg(feature = "api")]
pub mod store;

// Re-export commonly used types
pub use config::{Brand, ServerConfig};
pub use engine::{
    calculate_clarifier_sizing, calculate_daf_sizing, estimate, estimate_chemical_dosage,
    estimate_sludge_production, get_benchmark_params, get_troubleshooting_tips, BenchmarkParams,
    EstimateRequest, EstimateSummary, Industry, SizingResult, Technology,
};
pub use error::{MailError, StoreError, ValidationError};
pub use funnel::{calculate_leak, simulate_leak, LeakBreakdown, LeakInputs};

#[cfg(feature = "api")]
pub use api_server::{create_router, AppState};
