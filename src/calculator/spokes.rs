//! Spoke page configuration
//!
//! One configurable template replaces the per-page copies: each spoke is a
//! static record naming its calculator kind, the industries it offers, its
//! inputs, related reading and supplier list.

use serde::Serialize;

use super::fields::{
    FieldSpec, TextFieldSpec, FLOW_RATE, INFLUENT_PH, OVERRIDE_HLR, OVERRIDE_SLR, OVERRIDE_SOR, TSS,
};
use crate::engine::{
    Industry, Technology, FLOW_RANGE_M3_HR, HLR_RANGE_M_HR, SLR_RANGE_KG_M2_HR, SOR_RANGE_M3_M2_DAY,
    TSS_RANGE_MG_L,
};

/// What a spoke's calculator computes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SpokeKind {
    DafSizing,
    ClarifierSizing,
    ChemicalDosage,
    Troubleshooting,
    /// Trade business audit feeding report generation
    TradeAudit,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct RelatedLink {
    pub href: &'static str,
    pub title: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Supplier {
    pub name: &'static str,
    pub url: &'static str,
    #[serde(rename = "type")]
    pub category: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SpokeConfig {
    pub slug: &'static str,
    pub kind: SpokeKind,
    pub title: &'static str,
    pub description: &'static str,
    pub calculator_title: &'static str,
    /// Stored on leads/reports to say which page produced them
    pub concept_focus: &'static str,
    pub technology: Option<Technology>,
    /// Industry choices offered; empty for trade audits
    pub industries: &'static [Industry],
    pub default_industry: Industry,
    pub fields: &'static [FieldSpec],
    /// Benchmark overrides shown only in advanced mode
    pub advanced_fields: &'static [FieldSpec],
    pub text_fields: &'static [TextFieldSpec],
    pub related: &'static [RelatedLink],
    pub suppliers: &'static [Supplier],
}

impl SpokeConfig {
    /// Look up a numeric field, basic or advanced
    pub fn field(&self, name: &str) -> Option<&'static FieldSpec> {
        self.fields
            .iter()
            .chain(self.advanced_fields.iter())
            .find(|f| f.name == name)
    }

    pub fn is_advanced_field(&self, name: &str) -> bool {
        self.advanced_fields.iter().any(|f| f.name == name)
    }

    /// Industry code submitted with a trade audit report
    pub fn audit_industry(&self) -> Option<&'static str> {
        match self.kind {
            SpokeKind::TradeAudit => Some(self.slug),
            _ => None,
        }
    }
}

// ============================================================================
// Shared field definitions
// ============================================================================

const OVERRIDE_SOR_FIELD: FieldSpec = FieldSpec {
    name: OVERRIDE_SOR,
    label: "Override SOR",
    unit: Some("m³/m²/day"),
    min: SOR_RANGE_M3_M2_DAY.min,
    max: SOR_RANGE_M3_M2_DAY.max,
    step: 1.0,
    default: None,
    optional: true,
    tooltip: "Replace the Surface Overflow Rate benchmark with a figure from settling tests or design criteria.",
};

const DAF_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        name: FLOW_RATE,
        label: "Flow Rate",
        unit: Some("m³/hr"),
        min: 1.0,
        max: 500.0,
        step: 1.0,
        default: Some(50.0),
        optional: false,
        tooltip: "Design flow through the flotation unit.",
    },
    FieldSpec {
        name: TSS,
        label: "FOG & TSS Concentration",
        unit: Some("mg/L"),
        min: 100.0,
        max: 8_000.0,
        step: 100.0,
        default: Some(1_500.0),
        optional: false,
        tooltip: "Combined fats, oils, grease and suspended solids. Drives the solids loading limit.",
    },
];

const DAF_ADVANCED_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        name: OVERRIDE_HLR,
        label: "Override HLR",
        unit: Some("m/hr"),
        min: HLR_RANGE_M_HR.min,
        max: HLR_RANGE_M_HR.max,
        step: 0.5,
        default: None,
        optional: true,
        tooltip: "Replace the hydraulic loading rate benchmark.",
    },
    FieldSpec {
        name: OVERRIDE_SLR,
        label: "Override SLR",
        unit: Some("kg/m²/hr"),
        min: SLR_RANGE_KG_M2_HR.min,
        max: SLR_RANGE_KG_M2_HR.max,
        step: 0.5,
        default: None,
        optional: true,
        tooltip: "Replace the solids loading rate benchmark.",
    },
];

const CLARIFIER_FIELDS: [FieldSpec; 2] = [
    FieldSpec {
        name: FLOW_RATE,
        label: "Process Flow Rate",
        unit: Some("m³/hr"),
        min: 10.0,
        max: FLOW_RANGE_M3_HR.max,
        step: 10.0,
        default: Some(250.0),
        optional: false,
        tooltip: "The volumetric flow rate determines area via SOR.",
    },
    FieldSpec {
        name: TSS,
        label: "Influent TSS (Optional)",
        unit: Some("mg/L"),
        min: 100.0,
        max: TSS_RANGE_MG_L.max,
        step: 100.0,
        default: Some(6_000.0),
        optional: true,
        tooltip: "Used for the sludge and chemical estimates only.",
    },
];

const CHEMICAL_FIELDS: [FieldSpec; 3] = [
    FieldSpec {
        name: FLOW_RATE,
        label: "Flow Rate",
        unit: Some("m³/hr"),
        min: 1.0,
        max: 500.0,
        step: 1.0,
        default: Some(50.0),
        optional: false,
        tooltip: "The volumetric flow rate impacts total chemical consumption.",
    },
    FieldSpec {
        name: TSS,
        label: "FOG & TSS Concentration",
        unit: Some("mg/L"),
        min: 100.0,
        max: 8_000.0,
        step: 100.0,
        default: Some(1_500.0),
        optional: false,
        tooltip: "Combined concentration of fats, oils, grease and suspended solids influencing coagulant demand.",
    },
    FieldSpec {
        name: INFLUENT_PH,
        label: "Influent pH (Optional)",
        unit: None,
        min: 2.0,
        max: 12.0,
        step: 0.1,
        default: Some(6.5),
        optional: true,
        tooltip: "Influent pH affects coagulant choice. Optimal range is often 6-8.",
    },
];

const fn audit_fields(business: &'static str, website: &'static str) -> [TextFieldSpec; 3] {
    [
        TextFieldSpec {
            name: "businessName",
            label: "Your Business Name",
            placeholder: business,
            tooltip: "The name of your business.",
        },
        TextFieldSpec {
            name: "websiteUrl",
            label: "Your Website URL",
            placeholder: website,
            tooltip: "Your business website address.",
        },
        TextFieldSpec {
            name: "suburb",
            label: "Your Main Suburb",
            placeholder: "e.g., Roodepoort",
            tooltip: "The main suburb you serve. This helps check your map ranking.",
        },
    ]
}

const PLUMBER_FIELDS: [TextFieldSpec; 3] = audit_fields("e.g., Sipho's Plumbing", "e.g., siphosplumbing.co.za");
const HVAC_FIELDS: [TextFieldSpec; 3] = audit_fields("e.g., CoolAir Solutions", "e.g., coolair.co.za");
const ROOFER_FIELDS: [TextFieldSpec; 3] = audit_fields("e.g., Jono's Roofing", "e.g., jonosroofing.co.za");
const ELECTRICIAN_FIELDS: [TextFieldSpec; 3] = audit_fields("e.g., Bright Spark Electrical", "e.g., brightspark.co.za");

const CLARIFIER_INDUSTRIES: [Industry; 5] = [
    Industry::MiningBeneficiation,
    Industry::HeavyIndustryMetals,
    Industry::AggregateSandWashing,
    Industry::MunicipalPrimary,
    Industry::GeneralIndustrial,
];

const FLOTATION_INDUSTRIES: [Industry; 3] = [
    Industry::FoodBeverage,
    Industry::MeatProcessing,
    Industry::DairyProcessing,
];

const TROUBLESHOOTING_INDUSTRIES: [Industry; 6] = [
    Industry::MiningBeneficiation,
    Industry::HeavyIndustryMetals,
    Industry::AggregateSandWashing,
    Industry::MunicipalPrimary,
    Industry::FoodBeverage,
    Industry::GeneralIndustrial,
];

const SEPARATION_SUPPLIERS: [Supplier; 6] = [
    Supplier { name: "Veolia Water Technologies", url: "https://www.veolia.co.za/", category: "Clarifiers & DAF" },
    Supplier { name: "A2V", url: "https://www.a2v.co.za/", category: "Clarifiers & DAF" },
    Supplier { name: "PCI Africa", url: "https://pciafrica.com/", category: "Clarifiers & DAF" },
    Supplier { name: "Xylem", url: "https://www.xylem.com/en-za/", category: "Clarifiers & DAF" },
    Supplier { name: "Cube Consolidating", url: "https://cubeconsolidating.com/", category: "Clarifiers & Thickeners" },
    Supplier { name: "FLSmidth (EIMCO/Dorr-Oliver)", url: "https://www.flsmidth.com/", category: "Clarifiers & Thickeners" },
];

const CHEMICAL_SUPPLIERS: [Supplier; 5] = [
    Supplier { name: "BASF", url: "https://www.basf.com/za/en.html", category: "Chemicals" },
    Supplier { name: "AECI Water", url: "https://www.water.aeciworld.com/", category: "Chemicals & Services" },
    Supplier { name: "Buckman", url: "https://buckman.com/za/", category: "Chemicals" },
    Supplier { name: "NCP Chlorchem", url: "https://www.ncp.co.za/", category: "Chemicals (e.g., Ferric Chloride)" },
    Supplier { name: "SNF Floerger", url: "https://www.snf.com/", category: "Polymers/Flocculants" },
];

const FLOCCULANT_GUIDE: RelatedLink = RelatedLink {
    href: "/spokes/guide-to-flocculants-and-coagulants-for-sedimentation",
    title: "Guide to Flocculants & Coagulants",
};

// ============================================================================
// Spoke table
// ============================================================================

static SPOKES: &[SpokeConfig] = &[
    SpokeConfig {
        slug: "daf-sizing",
        kind: SpokeKind::DafSizing,
        title: "DAF Sizing Calculator: Interactive Design Workbench",
        description: "Estimate the surface area, budget capex and running cost of a dissolved air flotation unit from flow and solids load.",
        calculator_title: "DAF Sizing Workbench",
        concept_focus: "daf_sizing",
        technology: Some(Technology::Daf),
        industries: &FLOTATION_INDUSTRIES,
        default_industry: Industry::FoodBeverage,
        fields: &DAF_FIELDS,
        advanced_fields: &DAF_ADVANCED_FIELDS,
        text_fields: &[],
        related: &[
            RelatedLink {
                href: "/spokes/how-to-optimize-chemical-dosage-for-daf-systems",
                title: "How to Optimize Chemical Dosage for DAF Systems",
            },
            RelatedLink {
                href: "/spokes/removing-emulsified-oils-from-industrial-wastewater",
                title: "Removing Emulsified Oils from Industrial Wastewater",
            },
        ],
        suppliers: &SEPARATION_SUPPLIERS,
    },
    SpokeConfig {
        slug: "clarifier-sor-calculator",
        kind: SpokeKind::ClarifierSizing,
        title: "Clarifier SOR Calculator: Interactive Sizing Workbench",
        description: "Calculate the required surface area for a gravity clarifier using the Surface Overflow Rate method.",
        calculator_title: "Clarifier Sizing Workbench (SOR Method)",
        concept_focus: "clarifier_sizing",
        technology: Some(Technology::Clarifier),
        industries: &CLARIFIER_INDUSTRIES,
        default_industry: Industry::MiningBeneficiation,
        fields: &CLARIFIER_FIELDS,
        advanced_fields: &[OVERRIDE_SOR_FIELD],
        text_fields: &[],
        related: &[
            RelatedLink {
                href: "/spokes/how-to-size-a-clarifier-for-mining-wastewater",
                title: "How to Size a Clarifier for Mining Wastewater",
            },
            RelatedLink {
                href: "/spokes/common-operational-problems-with-wastewater-clarifiers",
                title: "Common Problems with Clarifiers",
            },
            FLOCCULANT_GUIDE,
        ],
        suppliers: &SEPARATION_SUPPLIERS,
    },
    SpokeConfig {
        slug: "chemical-dosage-estimator",
        kind: SpokeKind::ChemicalDosage,
        title: "Chemical Treatment for Oil Emulsions: Interactive Dosage Estimator",
        description: "Estimate the preliminary coagulant dosage required to break oil-in-water emulsions in industrial wastewater.",
        calculator_title: "Coagulant Dosage Estimator",
        concept_focus: "chemical_dosing",
        technology: Some(Technology::Daf),
        industries: &FLOTATION_INDUSTRIES,
        default_industry: Industry::FoodBeverage,
        fields: &CHEMICAL_FIELDS,
        advanced_fields: &[],
        text_fields: &[],
        related: &[
            RelatedLink {
                href: "/spokes/how-to-optimize-chemical-dosage-for-daf-systems",
                title: "How to Optimize Chemical Dosage for DAF Systems",
            },
            FLOCCULANT_GUIDE,
        ],
        suppliers: &CHEMICAL_SUPPLIERS,
    },
    SpokeConfig {
        slug: "clarifier-troubleshooting",
        kind: SpokeKind::Troubleshooting,
        title: "Troubleshooting Common Clarifier Problems: Interactive Guide",
        description: "Diagnose common clarifier issues, from high effluent solids to sludge management problems.",
        calculator_title: "Clarifier Troubleshooting Assistant",
        concept_focus: "troubleshooting",
        technology: Some(Technology::Clarifier),
        industries: &TROUBLESHOOTING_INDUSTRIES,
        default_industry: Industry::MiningBeneficiation,
        fields: &[],
        advanced_fields: &[],
        text_fields: &[],
        related: &[
            RelatedLink {
                href: "/spokes/clarifier-surface-overflow-rate-sor-calculator",
                title: "Clarifier SOR Calculator",
            },
            RelatedLink {
                href: "/spokes/troubleshooting-high-total-suspended-solids-in-effluent",
                title: "General High TSS Troubleshooting",
            },
            FLOCCULANT_GUIDE,
        ],
        suppliers: &SEPARATION_SUPPLIERS,
    },
    SpokeConfig {
        slug: "plumbers",
        kind: SpokeKind::TradeAudit,
        title: "Plumber's Money-Leak Audit",
        description: "See how much work slips past your plumbing business every month.",
        calculator_title: "Money-Leak Audit",
        concept_focus: "plumbers_industry",
        technology: None,
        industries: &[],
        default_industry: Industry::GeneralIndustrial,
        fields: &[],
        advanced_fields: &[],
        text_fields: &PLUMBER_FIELDS,
        related: &[],
        suppliers: &[],
    },
    SpokeConfig {
        slug: "hvac",
        kind: SpokeKind::TradeAudit,
        title: "HVAC Contractor's Money-Leak Audit",
        description: "See how much work slips past your HVAC business every month.",
        calculator_title: "Money-Leak Audit",
        concept_focus: "hvac_industry",
        technology: None,
        industries: &[],
        default_industry: Industry::GeneralIndustrial,
        fields: &[],
        advanced_fields: &[],
        text_fields: &HVAC_FIELDS,
        related: &[],
        suppliers: &[],
    },
    SpokeConfig {
        slug: "roofers",
        kind: SpokeKind::TradeAudit,
        title: "Roofer's Money-Leak Audit",
        description: "See how much work slips past your roofing business every month.",
        calculator_title: "Money-Leak Audit",
        concept_focus: "roofers_industry",
        technology: None,
        industries: &[],
        default_industry: Industry::GeneralIndustrial,
        fields: &[],
        advanced_fields: &[],
        text_fields: &ROOFER_FIELDS,
        related: &[],
        suppliers: &[],
    },
    SpokeConfig {
        slug: "electricians",
        kind: SpokeKind::TradeAudit,
        title: "Electrician's Money-Leak Audit",
        description: "See how much work slips past your electrical business every month.",
        calculator_title: "Money-Leak Audit",
        concept_focus: "electricians_industry",
        technology: None,
        industries: &[],
        default_industry: Industry::GeneralIndustrial,
        fields: &[],
        advanced_fields: &[],
        text_fields: &ELECTRICIAN_FIELDS,
        related: &[],
        suppliers: &[],
    },
];

pub fn all_spokes() -> &'static [SpokeConfig] {
    SPOKES
}

pub fn spoke_by_slug(slug: &str) -> Option<&'static SpokeConfig> {
    let slug = slug.trim();
    SPOKES.iter().find(|s| s.slug == slug)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_slugs_are_unique() {
        let slugs: FxHashSet<&str> = all_spokes().iter().map(|s| s.slug).collect();
        assert_eq!(slugs.len(), all_spokes().len());
    }

    #[test]
    fn test_field_bounds_are_sane() {
        for spoke in all_spokes() {
            for field in spoke.fields.iter().chain(spoke.advanced_fields.iter()) {
                assert!(field.min < field.max, "{}:{}", spoke.slug, field.name);
                if let Some(default) = field.default {
                    assert!((field.min..=field.max).contains(&default), "{}:{}", spoke.slug, field.name);
                }
            }
        }
    }

    #[test]
    fn test_field_bounds_sit_inside_engine_ranges() {
        for spoke in all_spokes() {
            for field in spoke.fields.iter().chain(spoke.advanced_fields.iter()) {
                let range = match field.name {
                    FLOW_RATE => FLOW_RANGE_M3_HR,
                    TSS => TSS_RANGE_MG_L,
                    OVERRIDE_HLR => HLR_RANGE_M_HR,
                    OVERRIDE_SLR => SLR_RANGE_KG_M2_HR,
                    OVERRIDE_SOR => SOR_RANGE_M3_M2_DAY,
                    _ => continue,
                };
                assert!(field.min >= range.min && field.max <= range.max, "{}:{}", spoke.slug, field.name);
            }
        }
    }

    #[test]
    fn test_default_industry_is_offered() {
        for spoke in all_spokes().iter().filter(|s| !s.industries.is_empty()) {
            assert!(spoke.industries.contains(&spoke.default_industry), "{}", spoke.slug);
        }
    }

    #[test]
    fn test_lookup() {
        let spoke = spoke_by_slug("clarifier-sor-calculator").unwrap();
        assert_eq!(spoke.kind, SpokeKind::ClarifierSizing);
        assert!(spoke.field(OVERRIDE_SOR).is_some());
        assert!(spoke.is_advanced_field(OVERRIDE_SOR));
        assert!(!spoke.is_advanced_field(FLOW_RATE));
        assert!(spoke_by_slug("nope").is_none());

        let roofers = spoke_by_slug("roofers").unwrap();
        assert_eq!(roofers.audit_industry(), Some("roofers"));
        assert_eq!(roofers.text_fields.len(), 3);
    }
}
