//! Calculator reducer
//!
//! Spoke form state is a plain value. Every user interaction is an action and
//! `reduce` returns the next state; the engine result is derived from state on
//! demand by `derive_outcome` and never stored.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize, Serializer};

use super::fields::{FLOW_RATE, OVERRIDE_HLR, OVERRIDE_SLR, OVERRIDE_SOR, TSS};
use super::spokes::{SpokeConfig, SpokeKind};
use crate::engine::{
    self, benchmark_for, daf_areas, estimate_chemical_dosage, problem_types, tips_for, ChemicalDosage,
    DafAreas, EstimateRequest, EstimateSummary, Industry, Technology,
};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalculatorState {
    #[serde(serialize_with = "serialize_slug")]
    pub spoke: &'static SpokeConfig,
    pub industry: Industry,
    pub values: FxHashMap<String, f64>,
    pub problem_type: Option<String>,
    pub advanced_mode: bool,
    pub submitted: bool,
}

fn serialize_slug<S: Serializer>(spoke: &&'static SpokeConfig, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(spoke.slug)
}

impl CalculatorState {
    /// Fresh form for a spoke: default industry, basic-field defaults, first
    /// problem type for troubleshooting spokes.
    pub fn new(spoke: &'static SpokeConfig) -> Self {
        let values = spoke
            .fields
            .iter()
            .filter_map(|f| f.default.map(|v| (f.name.to_string(), v)))
            .collect();

        let problem_type = match (spoke.kind, spoke.technology) {
            (SpokeKind::Troubleshooting, Some(technology)) => {
                problem_types(technology).first().map(|p| p.to_string())
            }
            _ => None,
        };

        Self {
            spoke,
            industry: spoke.default_industry,
            values,
            problem_type,
            advanced_mode: false,
            submitted: false,
        }
    }

    pub fn value(&self, field: &str) -> Option<f64> {
        self.values.get(field).copied()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CalculatorAction {
    SelectIndustry { industry: String },
    SetValue { field: String, value: Option<f64> },
    SelectProblem { problem_type: String },
    SetAdvancedMode { enabled: bool },
    MarkSubmitted,
    Reset,
}

/// Apply one action.
///
/// - values are clamped to the field's `[min, max]`
/// - clearing (`None` or non-finite) only applies to optional fields
/// - unknown fields and unknown problem types leave the state unchanged
/// - any input change clears `submitted`
pub fn reduce(state: CalculatorState, action: CalculatorAction) -> CalculatorState {
    let spoke = state.spoke;
    match action {
        CalculatorAction::SelectIndustry { industry } => CalculatorState {
            industry: Industry::resolve(&industry),
            submitted: false,
            ..state
        },
        CalculatorAction::SetValue { field, value } => {
            let Some(spec) = spoke.field(&field) else {
                return state;
            };
            let mut values = state.values;
            match value.and_then(|v| spec.clamp(v)) {
                Some(clamped) => {
                    values.insert(field, clamped);
                }
                None if spec.optional => {
                    values.remove(&field);
                }
                None => return CalculatorState { values, ..state },
            }
            CalculatorState {
                values,
                submitted: false,
                ..state
            }
        }
        CalculatorAction::SelectProblem { problem_type } => {
            let known = spoke
                .technology
                .map(|t| !tips_for(&problem_type, t).is_empty())
                .unwrap_or(false);
            if !known {
                return state;
            }
            CalculatorState {
                problem_type: Some(problem_type.trim().to_string()),
                submitted: false,
                ..state
            }
        }
        CalculatorAction::SetAdvancedMode { enabled } => {
            let mut values = state.values;
            if !enabled {
                values.retain(|name, _| !spoke.is_advanced_field(name));
            }
            CalculatorState {
                values,
                advanced_mode: enabled,
                submitted: false,
                ..state
            }
        }
        CalculatorAction::MarkSubmitted => CalculatorState {
            submitted: true,
            ..state
        },
        CalculatorAction::Reset => CalculatorState::new(spoke),
    }
}

/// Engine output for the current form
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CalculatorOutcome {
    DafSizing {
        estimate: EstimateSummary,
        areas: DafAreas,
    },
    ClarifierSizing {
        estimate: EstimateSummary,
    },
    ChemicalDosage {
        dosage: ChemicalDosage,
    },
    Troubleshooting {
        problem_type: String,
        tips: &'static [&'static str],
    },
}

/// Run the engine for the spoke. Trade audits have no engine output.
pub fn derive_outcome(state: &CalculatorState) -> Option<CalculatorOutcome> {
    let flow = state.value(FLOW_RATE).unwrap_or(0.0);
    let tss = state.value(TSS);
    let industry = state.industry.code();

    match state.spoke.kind {
        SpokeKind::DafSizing => {
            let override_hlr = advanced_value(state, OVERRIDE_HLR);
            let override_slr = advanced_value(state, OVERRIDE_SLR);
            let estimate = engine::estimate(&EstimateRequest {
                technology: Technology::Daf,
                industry: Some(industry.to_string()),
                flow_rate_m3_hr: flow,
                tss_mg_l: tss,
                override_hlr,
                override_slr,
                override_sor: None,
            });
            let params = benchmark_for(state.industry, Technology::Daf);
            let areas = daf_areas(flow, tss.unwrap_or(0.0), &params, override_hlr, override_slr);
            Some(CalculatorOutcome::DafSizing { estimate, areas })
        }
        SpokeKind::ClarifierSizing => {
            let estimate = engine::estimate(&EstimateRequest {
                technology: Technology::Clarifier,
                industry: Some(industry.to_string()),
                flow_rate_m3_hr: flow,
                tss_mg_l: tss,
                override_hlr: None,
                override_slr: None,
                override_sor: advanced_value(state, OVERRIDE_SOR),
            });
            Some(CalculatorOutcome::ClarifierSizing { estimate })
        }
        SpokeKind::ChemicalDosage => {
            let technology = state.spoke.technology.unwrap_or(Technology::Daf);
            let dosage = estimate_chemical_dosage(flow, tss.unwrap_or(0.0), industry, technology);
            Some(CalculatorOutcome::ChemicalDosage { dosage })
        }
        SpokeKind::Troubleshooting => {
            let technology = state.spoke.technology?;
            let problem_type = state.problem_type.clone()?;
            let tips = tips_for(&problem_type, technology);
            Some(CalculatorOutcome::Troubleshooting { problem_type, tips })
        }
        SpokeKind::TradeAudit => None,
    }
}

fn advanced_value(state: &CalculatorState, field: &str) -> Option<f64> {
    if state.advanced_mode {
        state.value(field)
    } else {
        None
    }
}

/// A submitted spoke form, replayed through the reducer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CalculatorForm {
    pub industry: Option<String>,
    pub values: FxHashMap<String, Option<f64>>,
    pub problem_type: Option<String>,
    pub advanced_mode: bool,
}

impl CalculatorForm {
    /// Actions equivalent to filling the form in from a fresh state.
    /// Advanced mode goes first so override values are accepted.
    pub fn actions(&self) -> Vec<CalculatorAction> {
        let mut actions = Vec::with_capacity(self.values.len() + 3);
        if self.advanced_mode {
            actions.push(CalculatorAction::SetAdvancedMode { enabled: true });
        }
        if let Some(industry) = &self.industry {
            actions.push(CalculatorAction::SelectIndustry { industry: industry.clone() });
        }
        if let Some(problem_type) = &self.problem_type {
            actions.push(CalculatorAction::SelectProblem { problem_type: problem_type.clone() });
        }

        // Stable order keeps replays deterministic
        let mut fields: Vec<_> = self.values.iter().collect();
        fields.sort_by(|a, b| a.0.cmp(b.0));
        actions.extend(fields.into_iter().map(|(field, value)| CalculatorAction::SetValue {
            field: field.clone(),
            value: *value,
        }));
        actions
    }
}

/// Build the state a form describes
pub fn replay(spoke: &'static SpokeConfig, form: &CalculatorForm) -> CalculatorState {
    form.actions()
        .into_iter()
        .fold(CalculatorState::new(spoke), reduce)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calculator::spokes::spoke_by_slug;
    use approx::assert_relative_eq;

    fn clarifier() -> CalculatorState {
        CalculatorState::new(spoke_by_slug("clarifier-sor-calculator").unwrap())
    }

    fn set(field: &str, value: Option<f64>) -> CalculatorAction {
        CalculatorAction::SetValue { field: field.to_string(), value }
    }

    #[test]
    fn test_initial_state_uses_defaults() {
        let state = clarifier();
        assert_eq!(state.industry, Industry::MiningBeneficiation);
        assert_eq!(state.value(FLOW_RATE), Some(250.0));
        assert_eq!(state.value(TSS), Some(6_000.0));
        assert_eq!(state.value(OVERRIDE_SOR), None);
        assert!(!state.submitted);
    }

    #[test]
    fn test_set_value_clamps() {
        let state = reduce(clarifier(), set(FLOW_RATE, Some(1.0)));
        assert_eq!(state.value(FLOW_RATE), Some(10.0));
        let state = reduce(state, set(FLOW_RATE, Some(50_000.0)));
        assert_eq!(state.value(FLOW_RATE), Some(10_000.0));
    }

    #[test]
    fn test_clearing_respects_optional() {
        // TSS is optional on the clarifier page, flow is not
        let state = reduce(clarifier(), set(TSS, None));
        assert_eq!(state.value(TSS), None);
        let state = reduce(state, set(FLOW_RATE, Some(f64::NAN)));
        assert_eq!(state.value(FLOW_RATE), Some(250.0));
    }

    #[test]
    fn test_unknown_field_is_ignored() {
        let before = clarifier();
        let after = reduce(before.clone(), set("colour", Some(3.0)));
        assert_eq!(before, after);
    }

    #[test]
    fn test_input_change_clears_submitted() {
        let state = reduce(clarifier(), CalculatorAction::MarkSubmitted);
        assert!(state.submitted);
        let state = reduce(state, set(FLOW_RATE, Some(300.0)));
        assert!(!state.submitted);
    }

    #[test]
    fn test_advanced_override_only_counts_in_advanced_mode() {
        let state = reduce(clarifier(), CalculatorAction::SetAdvancedMode { enabled: true });
        let state = reduce(state, set(OVERRIDE_SOR, Some(20.0)));
        match derive_outcome(&state) {
            Some(CalculatorOutcome::ClarifierSizing { estimate }) => {
                assert_relative_eq!(estimate.sizing.surface_area_m2, 250.0 * 24.0 / 20.0, epsilon = 1e-9);
            }
            other => panic!("unexpected outcome {:?}", other),
        }

        let state = reduce(state, CalculatorAction::SetAdvancedMode { enabled: false });
        assert_eq!(state.value(OVERRIDE_SOR), None);
        match derive_outcome(&state) {
            Some(CalculatorOutcome::ClarifierSizing { estimate }) => {
                assert_relative_eq!(estimate.sizing.surface_area_m2, 200.0, epsilon = 1e-9);
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_reset_restores_defaults() {
        let state = reduce(clarifier(), set(FLOW_RATE, Some(900.0)));
        let state = reduce(state, CalculatorAction::SelectIndustry { industry: "dairy_processing".into() });
        let state = reduce(state, CalculatorAction::Reset);
        assert_eq!(state, clarifier());
    }

    #[test]
    fn test_troubleshooting_problem_selection() {
        let spoke = spoke_by_slug("clarifier-troubleshooting").unwrap();
        let state = CalculatorState::new(spoke);
        assert_eq!(state.problem_type.as_deref(), Some("high_tss"));

        let state = reduce(state, CalculatorAction::SelectProblem { problem_type: "floating_sludge".into() });
        let unchanged = reduce(state.clone(), CalculatorAction::SelectProblem { problem_type: "ghosts".into() });
        assert_eq!(state, unchanged);

        match derive_outcome(&state) {
            Some(CalculatorOutcome::Troubleshooting { problem_type, tips }) => {
                assert_eq!(problem_type, "floating_sludge");
                assert!(!tips.is_empty());
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }

    #[test]
    fn test_trade_audit_has_no_outcome() {
        let state = CalculatorState::new(spoke_by_slug("plumbers").unwrap());
        assert!(derive_outcome(&state).is_none());
    }

    #[test]
    fn test_replay_clamps_form_values() {
        let spoke = spoke_by_slug("daf-sizing").unwrap();
        let mut form = CalculatorForm {
            industry: Some("meat_processing".into()),
            advanced_mode: true,
            ..CalculatorForm::default()
        };
        form.values.insert(FLOW_RATE.into(), Some(9_999.0));
        form.values.insert(OVERRIDE_HLR.into(), Some(6.0));

        let state = replay(spoke, &form);
        assert_eq!(state.industry, Industry::MeatProcessing);
        assert_eq!(state.value(FLOW_RATE), Some(500.0));
        assert_eq!(state.value(OVERRIDE_HLR), Some(6.0));

        match derive_outcome(&state) {
            Some(CalculatorOutcome::DafSizing { estimate, areas }) => {
                assert_relative_eq!(areas.by_hlr_m2, 500.0 / 6.0, epsilon = 1e-9);
                assert_relative_eq!(
                    estimate.sizing.surface_area_m2,
                    areas.by_hlr_m2.max(areas.by_slr_m2),
                    epsilon = 1e-9
                );
            }
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
