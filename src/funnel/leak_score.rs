//! Diagnostic Leak Score
//!
//! Rule-based point system behind the "Money-Leak Audit". Each answer maps to
//! a monthly revenue penalty; the total is the simulated leak.
//!
//! trust    = (5 - review rating) × 4000
//! traffic  = top3: 0 | page1: 7000 | page_2_plus: 15000 | unknown: 10000
//! enquiry  = chatbot: 0 | form_only: 3000 | nothing: 8000

use serde::{Deserialize, Serialize};

pub const TRUST_LEAK_PER_STAR: f64 = 4_000.0;
pub const MAX_REVIEW_RATING: f64 = 5.0;
pub const MIN_REVIEW_RATING: f64 = 1.0;

/// Share of the leak shown as recoverable on the results chart
pub const CAPTURE_SHARE: f64 = 0.4;

/// Where the business appears in local map search
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum MapRank {
    #[serde(rename = "top3")]
    Top3,
    #[serde(rename = "page1")]
    Page1,
    #[default]
    #[serde(rename = "page_2_plus")]
    Page2Plus,
    #[serde(rename = "unknown")]
    Unknown,
}

impl MapRank {
    pub fn monthly_leak(&self) -> f64 {
        match self {
            MapRank::Top3 => 0.0,
            MapRank::Page1 => 7_000.0,
            MapRank::Page2Plus => 15_000.0,
            MapRank::Unknown => 10_000.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            MapRank::Top3 => "top 3",
            MapRank::Page1 => "page 1",
            MapRank::Page2Plus => "page 2 plus",
            MapRank::Unknown => "unknown",
        }
    }
}

/// How out-of-hours enquiries are handled
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnquiryMethod {
    Chatbot,
    #[default]
    FormOnly,
    Nothing,
}

impl EnquiryMethod {
    pub fn monthly_leak(&self) -> f64 {
        match self {
            EnquiryMethod::Chatbot => 0.0,
            EnquiryMethod::FormOnly => 3_000.0,
            EnquiryMethod::Nothing => 8_000.0,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            EnquiryMethod::Chatbot => "chatbot",
            EnquiryMethod::FormOnly => "form only",
            EnquiryMethod::Nothing => "nothing",
        }
    }
}

/// Answers to the three audit questions
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LeakInputs {
    #[serde(alias = "trustLeak_rating")]
    pub review_rating: f64,
    #[serde(alias = "trafficLeak_rank")]
    pub map_rank: MapRank,
    #[serde(alias = "enquiryLeak_method")]
    pub enquiry_method: EnquiryMethod,
}

impl Default for LeakInputs {
    fn default() -> Self {
        Self {
            review_rating: 3.5,
            map_rank: MapRank::default(),
            enquiry_method: EnquiryMethod::default(),
        }
    }
}

/// Monthly leak per category, in ZAR
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LeakBreakdown {
    pub review_rating: f64,
    pub trust_leak: f64,
    pub traffic_leak: f64,
    pub enquiry_leak: f64,
    pub total_leak: f64,
    /// Portion of the leak a fix is expected to win back
    pub captured_estimate: f64,
}

/// Clamp a star rating into [1, 5]; non-finite ratings count as the minimum
pub fn clamp_rating(rating: f64) -> f64 {
    if rating.is_finite() {
        rating.clamp(MIN_REVIEW_RATING, MAX_REVIEW_RATING)
    } else {
        MIN_REVIEW_RATING
    }
}

pub fn calculate_leak(inputs: &LeakInputs) -> LeakBreakdown {
    let review_rating = clamp_rating(inputs.review_rating);
    let trust_leak = (MAX_REVIEW_RATING - review_rating) * TRUST_LEAK_PER_STAR;
    let traffic_leak = inputs.map_rank.monthly_leak();
    let enquiry_leak = inputs.enquiry_method.monthly_leak();
    let total_leak = trust_leak + traffic_leak + enquiry_leak;

    LeakBreakdown {
        review_rating,
        trust_leak,
        traffic_leak,
        enquiry_leak,
        total_leak,
        captured_estimate: total_leak * CAPTURE_SHARE,
    }
}

/// Report tab to open first, from the "biggest problem" answer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeakFocus {
    TrustLeak,
    MeoLeak,
    EnquiryLeak,
}

pub fn focus_for_problem(biggest_problem: Option<&str>) -> LeakFocus {
    match biggest_problem.map(str::trim) {
        Some("bad_reviews") => LeakFocus::TrustLeak,
        Some("not_enough_calls") => LeakFocus::EnquiryLeak,
        _ => LeakFocus::MeoLeak,
    }
}
