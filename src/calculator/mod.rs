//! Spoke calculators
//!
//! - `fields`: numeric/text input specs with clamping
//! - `spokes`: per-page configuration (one template, many pages)
//! - `state`: the `(state, action) -> state` reducer and derived outcome

pub mod fields;
pub mod spokes;
pub mod state;

pub use fields::{FieldSpec, TextFieldSpec};
pub use spokes::{all_spokes, spoke_by_slug, RelatedLink, SpokeConfig, SpokeKind, Supplier};
pub use state::{
    derive_outcome, reduce, replay, CalculatorAction, CalculatorForm, CalculatorOutcome, CalculatorState,
};
