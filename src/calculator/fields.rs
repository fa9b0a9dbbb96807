//! Calculator field configuration
//!
//! Every numeric input a spoke page shows is described by a `FieldSpec`. The
//! reducer clamps against it before a value reaches the engine.

use serde::Serialize;

/// Field names shared between the spoke configs, the reducer and the engine
pub const FLOW_RATE: &str = "flow_rate_m3_hr";
pub const TSS: &str = "tss_mg_l";
pub const INFLUENT_PH: &str = "influent_ph";
pub const OVERRIDE_HLR: &str = "override_hlr";
pub const OVERRIDE_SLR: &str = "override_slr";
pub const OVERRIDE_SOR: &str = "override_sor";

/// A numeric calculator input
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub unit: Option<&'static str>,
    pub min: f64,
    pub max: f64,
    pub step: f64,
    /// Initial value. `None` leaves the field empty (overrides).
    pub default: Option<f64>,
    /// Optional fields may be cleared; the engine then ignores them
    pub optional: bool,
    pub tooltip: &'static str,
}

impl FieldSpec {
    /// Clamp a value into `[min, max]`. Non-finite input is rejected.
    pub fn clamp(&self, value: f64) -> Option<f64> {
        if value.is_finite() {
            Some(value.clamp(self.min, self.max))
        } else {
            None
        }
    }
}

/// A free-text input on the trade audit pages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TextFieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub placeholder: &'static str,
    pub tooltip: &'static str,
}

#[cfg(test)]
mod tests {
    use super::*;

    const FLOW: FieldSpec = FieldSpec {
        name: FLOW_RATE,
        label: "Flow Rate",
        unit: Some("m³/hr"),
        min: 10.0,
        max: 10_000.0,
        step: 10.0,
        default: Some(250.0),
        optional: false,
        tooltip: "",
    };

    #[test]
    fn test_clamp_bounds() {
        assert_eq!(FLOW.clamp(5.0), Some(10.0));
        assert_eq!(FLOW.clamp(25_000.0), Some(10_000.0));
        assert_eq!(FLOW.clamp(420.0), Some(420.0));
        assert_eq!(FLOW.clamp(f64::NAN), None);
        assert_eq!(FLOW.clamp(f64::NEG_INFINITY), None);
    }
}
