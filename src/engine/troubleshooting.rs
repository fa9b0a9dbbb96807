//! Troubleshooting Lookup
//!
//! Fixed, ordered advisory lists keyed by (problem type, technology).

use super::benchmarks::Technology;

struct TipSet {
    problem: &'static str,
    technology: Technology,
    tips: &'static [&'static str],
}

static TIP_SETS: &[TipSet] = &[
    // ------------------------------------------------------------------
    // Clarifier
    // ------------------------------------------------------------------
    TipSet {
        problem: "high_tss",
        technology: Technology::Clarifier,
        tips: &[
            "Check the surface overflow rate against design: peak flows above the SOR benchmark carry fine floc over the weir.",
            "Run jar tests to confirm flocculant type and dose; pin floc usually means under-dosing or the wrong polymer charge.",
            "Inspect the flocculation zone for excessive shear from pumps or high-velocity inlets breaking floc apart.",
            "Level the effluent weirs so flow leaves evenly around the full circumference.",
            "Confirm the sludge blanket is not approaching the weir level and re-entraining solids.",
        ],
    },
    TipSet {
        problem: "sludge_blanket_high",
        technology: Technology::Clarifier,
        tips: &[
            "Increase the underflow withdrawal rate in small steps and monitor blanket depth each shift.",
            "Verify the underflow pump and lines are not blocked or air-locked.",
            "Check whether influent solids have risen above the design load; a higher TSS needs more withdrawal.",
            "Review rake torque trends: a rising torque with a rising blanket points to consolidation problems.",
        ],
    },
    TipSet {
        problem: "sludge_blanket_low",
        technology: Technology::Clarifier,
        tips: &[
            "Reduce the underflow withdrawal rate; pumping too fast draws clear water through the blanket (rat-holing).",
            "Switch to intermittent withdrawal to let solids consolidate between pumping cycles.",
            "Check underflow density: a thin underflow confirms over-pumping.",
        ],
    },
    TipSet {
        problem: "floating_sludge",
        technology: Technology::Clarifier,
        tips: &[
            "Shorten sludge retention time; septic sludge releases gas that floats solids to the surface.",
            "Look for denitrification bubbles if upstream treatment nitrifies; reduce blanket age to stop it.",
            "Confirm the scum baffle and skimmer are working and emptied regularly.",
            "Check for fats, oils and grease passing upstream pre-treatment.",
        ],
    },
    TipSet {
        problem: "short_circuiting",
        technology: Technology::Clarifier,
        tips: &[
            "Inspect the feed well for damage or missing baffles; flow should enter with low velocity and spread radially.",
            "Check for temperature or density currents, common when warm influent enters a cooler tank.",
            "Level the effluent weirs; uneven weirs draw flow preferentially to one side.",
            "A dye tracer test will confirm short-circuiting and show the dominant flow path.",
        ],
    },
    TipSet {
        problem: "odour_issues",
        technology: Technology::Clarifier,
        tips: &[
            "Reduce sludge age in the tank; anaerobic sludge produces hydrogen sulphide.",
            "Check upstream for septic influent from long rising mains or holding tanks.",
            "Clean weirs, launders and scum boxes where biofilm and scum accumulate.",
        ],
    },
    TipSet {
        problem: "mechanical_issue",
        technology: Technology::Clarifier,
        tips: &[
            "Record drive torque and compare against the alarm and cut-out settings.",
            "Inspect rake arms and scrapers for damage or build-up of heavy solids.",
            "Check drive gearbox oil level and condition against the maintenance schedule.",
            "If the rake has stalled, lift it or reduce blanket depth before restarting to avoid overload.",
        ],
    },
    // ------------------------------------------------------------------
    // DAF
    // ------------------------------------------------------------------
    TipSet {
        problem: "high_tss",
        technology: Technology::Daf,
        tips: &[
            "Check the hydraulic loading rate; flows above the HLR benchmark sweep floc under the float layer.",
            "Confirm the air-to-solids ratio: raise recycle rate or saturator pressure if the float is thin.",
            "Run jar tests to optimise coagulant and polymer doses for the current emulsion.",
            "Adjust pH into the coagulant's working range before dosing.",
        ],
    },
    TipSet {
        problem: "float_carryover",
        technology: Technology::Daf,
        tips: &[
            "Increase skimmer speed or frequency so the float does not build past the beach.",
            "Check the effluent level control; a high water level pushes float over the effluent weir.",
            "Look for float breakup caused by excess polymer or turbulent inlet conditions.",
        ],
    },
    TipSet {
        problem: "poor_bubble_formation",
        technology: Technology::Daf,
        tips: &[
            "Verify saturator pressure is within design (typically 4-6 bar).",
            "Inspect the pressure release valves or nozzles for blockage and scale.",
            "Check the recycle pump flow and the air supply to the saturator.",
        ],
    },
    TipSet {
        problem: "high_chemical_consumption",
        technology: Technology::Daf,
        tips: &[
            "Repeat jar tests; dose requirements drift with production changes.",
            "Add flow-paced dosing so chemical tracks actual flow instead of a fixed rate.",
            "Check influent pH and equalisation; poor equalisation forces dosing for the worst case.",
        ],
    },
];

/// Advisory tips for a problem type and technology code.
///
/// `context` is the caller's industry code. It is accepted for callers that
/// carry one but does not change the lookup. Unknown problem types or
/// technologies return an empty slice.
pub fn get_troubleshooting_tips(
    problem_type: &str,
    technology: &str,
    _context: Option<&str>,
) -> &'static [&'static str] {
    match Technology::from_code(technology) {
        Some(technology) => tips_for(problem_type, technology),
        None => &[],
    }
}

/// Typed variant of [`get_troubleshooting_tips`]
pub fn tips_for(problem_type: &str, technology: Technology) -> &'static [&'static str] {
    let problem_type = problem_type.trim();
    TIP_SETS
        .iter()
        .find(|set| set.technology == technology && set.problem == problem_type)
        .map(|set| set.tips)
        .unwrap_or(&[])
}

/// Problem types that have tips for a technology, in table order
pub fn problem_types(technology: Technology) -> Vec<&'static str> {
    TIP_SETS
        .iter()
        .filter(|set| set.technology == technology)
        .map(|set| set.problem)
        .collect()
}
