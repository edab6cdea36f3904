//! Testing utilities for the dynres workspace
//!
//! Shared fixtures: the shipped reference table, small hand-written
//! record sets, and deliberately broken variants of them.

#![allow(missing_docs)]

use dynres_model::{
    render_records, Complexity, DataFormat, Industry, IndustryRecord, ReferenceData, ScenarioClass,
    ScenarioCurve, ScenarioCurves,
};

pub fn builtin_reference() -> ReferenceData {
    ReferenceData::builtin().unwrap()
}

/// Record with three two-anchor curves: 25% in 2025 falling linearly to
/// the given terminal residuals in 2050
pub fn linear_record(industry: Industry, scope3_share: f64, terminals: [f64; 3]) -> IndustryRecord {
    let curve = |end: f64| ScenarioCurve::from_pairs(&[(2025, 25.0), (2050, end)]);
    IndustryRecord {
        industry,
        name: industry.display_name().to_string(),
        scope3_share,
        cdp_sample_size: 0,
        why_static_fails: String::new(),
        scope3_categories: Vec::new(),
        residual_drivers: Vec::new(),
        complexity: Complexity::default(),
        interventions: Vec::new(),
        curves: ScenarioCurves {
            conservative: Some(curve(terminals[0])),
            ambitious: Some(curve(terminals[1])),
            breakthrough: Some(curve(terminals[2])),
        },
    }
}

/// Five minimal, valid records
pub fn linear_records() -> Vec<IndustryRecord> {
    Industry::ALL
        .into_iter()
        .map(|industry| linear_record(industry, 90.0, [20.0, 15.0, 10.0]))
        .collect()
}

/// Replace one curve in a record set
pub fn with_curve(
    mut records: Vec<IndustryRecord>,
    industry: Industry,
    scenario: ScenarioClass,
    curve: ScenarioCurve,
) -> Vec<IndustryRecord> {
    for record in records.iter_mut().filter(|r| r.industry == industry) {
        record.curves.set(scenario, curve.clone());
    }
    records
}

/// Valid records except for one curve whose years run backwards
pub fn decreasing_years_records() -> Vec<IndustryRecord> {
    with_curve(
        linear_records(),
        Industry::FinancialServices,
        ScenarioClass::Conservative,
        ScenarioCurve::from_pairs(&[(2025, 30.0), (2040, 28.0), (2035, 26.0)]),
    )
}

/// Serialize records as a document without validating them
pub fn document(records: &[IndustryRecord], format: DataFormat) -> String {
    render_records(records, format).unwrap()
}
