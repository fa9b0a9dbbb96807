//! Sizing Table
//!
//! Prints DAF and clarifier sizing for every industry at one flow and TSS.
//! Quick sanity check of the benchmark table.
//!
//! Run with: cargo run --bin sizing_table -- [flow_m3_hr] [tss_mg_l]

use anyhow::{Context, Result};
use effluentic::engine::{calculate_clarifier_sizing, calculate_daf_sizing, estimate_chemical_dosage, Industry, Technology};
use effluentic::utils::{format_currency, format_number};

const DEFAULT_FLOW: f64 = 100.0;
const DEFAULT_TSS: f64 = 2_000.0;

fn parse_arg(value: Option<String>, name: &str, default: f64) -> Result<f64> {
    match value {
        Some(raw) => raw.parse::<f64>().with_context(|| format!("{} must be a number, got '{}'", name, raw)),
        None => Ok(default),
    }
}

fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let flow = parse_arg(args.next(), "flow_m3_hr", DEFAULT_FLOW)?;
    let tss = parse_arg(args.next(), "tss_mg_l", DEFAULT_TSS)?;

    println!(
        "Flow {} m³/hr, TSS {} mg/L\n",
        format_number(flow, 1),
        format_number(tss, 0)
    );

    for technology in Technology::ALL {
        println!("{}", technology.display_name());
        println!(
            "{:<28} {:>10} {:>16} {:>16} {:>14} {:>10}",
            "Industry", "Area m²", "Capex min", "Capex max", "Opex/yr", "Dose mg/L"
        );

        for industry in Industry::ALL {
            let sizing = match technology {
                Technology::Daf => calculate_daf_sizing(flow, tss, industry.code(), None, None),
                Technology::Clarifier => calculate_clarifier_sizing(flow, industry.code(), None),
            };
            let dosage = estimate_chemical_dosage(flow, tss, industry.code(), technology);

            println!(
                "{:<28} {:>10} {:>16} {:>16} {:>14} {:>10}",
                industry.label(),
                format_number(sizing.surface_area_m2, 1),
                format_currency(sizing.capex_min_zar),
                format_currency(sizing.capex_max_zar),
                format_currency(sizing.opex_annual_zar),
                format_number(dosage.dose_mg_l, 0),
            );
        }
        println!();
    }

    Ok(())
}
