//! Lead funnel scoring
//!
//! Two ways to put a rand figure on a business's missed revenue: the
//! deterministic diagnostic score (canonical) and the seeded demo simulation.

pub mod leak_score;
pub mod simulation;

pub use leak_score::{
    calculate_leak, focus_for_problem, EnquiryMethod, LeakBreakdown, LeakFocus, LeakInputs, MapRank,
};
pub use simulation::{simulate_leak, SimulatedLeak};
