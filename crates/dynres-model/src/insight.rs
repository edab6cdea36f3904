//! Cross-industry and per-industry indicators
//!
//! Urgency matrix, complexity metrics and intervention positioning,
//! all derived from the reference tables.

use serde::{Deserialize, Serialize};

use crate::reference::{IndustryRecord, ReferenceData};
use crate::types::{Industry, ScenarioClass};
use crate::STATIC_THRESHOLD_PCT;

/// Scope 3 share above which an industry counts as Scope 3-dominated
pub const DOMINANCE_THRESHOLD: f64 = 80.0;

/// One industry's position in the urgency matrix
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UrgencyPoint {
    /// Industry
    pub industry: Industry,
    /// Scope 3 share of total emissions
    pub scope3_dominance: f64,
    /// Conservative terminal residual minus the static threshold, in points
    pub guidance_gap: f64,
    /// Scope 3-dominated and under-served by the static threshold
    pub urgent: bool,
}

/// Urgency matrix over every industry
#[must_use]
pub fn urgency_matrix(data: &ReferenceData) -> Vec<UrgencyPoint> {
    data.records()
        .map(|record| {
            let residual = 100.0 - record.max_reduction(ScenarioClass::Conservative);
            let guidance_gap = residual - STATIC_THRESHOLD_PCT;
            UrgencyPoint {
                industry: record.industry,
                scope3_dominance: record.scope3_share,
                guidance_gap,
                urgent: record.scope3_share > DOMINANCE_THRESHOLD && guidance_gap > 0.0,
            }
        })
        .collect()
}

/// Value chain complexity scores
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComplexityMetrics {
    /// Supply chain tiers
    pub supply_chain_tiers: f64,
    /// Scope 3 share scaled to 0-10
    pub scope3_dominance: f64,
    /// 2 for limited control, 5 otherwise
    pub control_score: f64,
}

impl ComplexityMetrics {
    /// Derive from a record
    #[must_use]
    pub fn from_record(record: &IndustryRecord) -> Self {
        let limited = record.complexity.control_level.contains("Limited");
        Self {
            supply_chain_tiers: f64::from(record.complexity.supply_chain_tiers),
            scope3_dominance: record.scope3_share / 10.0,
            control_score: if limited { 2.0 } else { 5.0 },
        }
    }
}

/// Intervention placed on the timeline/potential plane
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterventionPoint {
    /// Intervention name
    pub name: String,
    /// Midpoint of the reduction potential, percent
    pub potential_mid: f64,
    /// Midpoint of the implementation timeline, years
    pub timeline_mid: f64,
    /// Scalability label
    pub scalability: String,
}

/// Interventions of a record with numeric midpoints
///
/// Validated records always parse; unparsable entries are skipped.
#[must_use]
pub fn intervention_points(record: &IndustryRecord) -> Vec<InterventionPoint> {
    record
        .interventions
        .iter()
        .filter_map(|i| {
            Some(InterventionPoint {
                name: i.name.clone(),
                potential_mid: i.potential_midpoint()?,
                timeline_mid: i.timeline_midpoint()?,
                scalability: i.scalability.clone(),
            })
        })
        .collect()
}
