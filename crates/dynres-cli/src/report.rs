//! Command reports
//!
//! Each report is `Serialize` for `--json` and `Display` for terminal text.

use std::fmt;

use dynres_model::{
    intervention_points, ComplexityMetrics, ImpactSummary, Industry, IndustryRecord,
    InterventionPoint, Percentage, ReferenceData, RemovalPlan, ScenarioClass,
    ScenarioReductions, ScenarioSnapshot, UrgencyPoint, UserOverride, STATIC_THRESHOLD_PCT,
};
use serde::Serialize;

/// Render as pretty JSON or as text
///
/// # Errors
/// Returns the serializer error when JSON output fails
pub fn render<R>(report: &R, json: bool) -> Result<String, serde_json::Error>
where
    R: Serialize + fmt::Display,
{
    if json {
        serde_json::to_string_pretty(report)
    } else {
        Ok(report.to_string())
    }
}

/// One overview row
#[derive(Debug, Clone, Serialize)]
pub struct IndustryRow {
    pub industry: Industry,
    pub name: String,
    pub scope3_share: f64,
    pub cdp_sample_size: u32,
    pub main_challenge: String,
}

/// Overview of every industry
#[derive(Debug, Clone, Serialize)]
pub struct IndustriesReport {
    pub industries: Vec<IndustryRow>,
}

impl IndustriesReport {
    #[must_use]
    pub fn new(data: &ReferenceData) -> Self {
        let industries = data
            .records()
            .map(|r| IndustryRow {
                industry: r.industry,
                name: r.name.clone(),
                scope3_share: r.scope3_share,
                cdp_sample_size: r.cdp_sample_size,
                main_challenge: r.complexity.main_challenge.clone(),
            })
            .collect();
        Self { industries }
    }
}

impl fmt::Display for IndustriesReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:<26} {:>8} {:>6}  Main challenge",
            "Id", "Name", "Scope 3", "CDP"
        )?;
        for row in &self.industries {
            writeln!(
                f,
                "{:<24} {:<26} {:>7.2}% {:>6}  {}",
                row.industry.id(),
                row.name,
                row.scope3_share,
                row.cdp_sample_size,
                row.main_challenge
            )?;
        }
        Ok(())
    }
}

/// Deep dive into one industry
#[derive(Debug, Clone, Serialize)]
pub struct ProfileReport {
    pub industry: Industry,
    pub name: String,
    pub scope3_share: f64,
    pub why_static_fails: String,
    pub scope3_categories: Vec<String>,
    pub residual_drivers: Vec<String>,
    pub control_level: String,
    pub main_challenge: String,
    pub metrics: ComplexityMetrics,
    pub max_reduction: ScenarioReductions,
    pub interventions: Vec<InterventionPoint>,
}

impl ProfileReport {
    #[must_use]
    pub fn new(record: &IndustryRecord) -> Self {
        Self {
            industry: record.industry,
            name: record.name.clone(),
            scope3_share: record.scope3_share,
            why_static_fails: record.why_static_fails.clone(),
            scope3_categories: record.scope3_categories.clone(),
            residual_drivers: record.residual_drivers.clone(),
            control_level: record.complexity.control_level.clone(),
            main_challenge: record.complexity.main_challenge.clone(),
            metrics: ComplexityMetrics::from_record(record),
            max_reduction: ScenarioReductions::from_record(record),
            interventions: intervention_points(record),
        }
    }
}

impl fmt::Display for ProfileReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} ({})", self.name, self.industry)?;
        writeln!(f, "Scope 3 share: {:.2}%", self.scope3_share)?;
        if !self.why_static_fails.is_empty() {
            writeln!(f, "\nWhy a static threshold fails:\n  {}", self.why_static_fails)?;
        }
        if !self.scope3_categories.is_empty() {
            writeln!(f, "\nScope 3 categories:")?;
            for c in &self.scope3_categories {
                writeln!(f, "  - {c}")?;
            }
        }
        if !self.residual_drivers.is_empty() {
            writeln!(f, "\nResidual drivers:")?;
            for d in &self.residual_drivers {
                writeln!(f, "  - {d}")?;
            }
        }

        writeln!(f, "\nComplexity:")?;
        writeln!(f, "  Control level:      {}", self.control_level)?;
        writeln!(f, "  Main challenge:     {}", self.main_challenge)?;
        writeln!(f, "  Supply chain tiers: {}", self.metrics.supply_chain_tiers)?;
        writeln!(f, "  Scope 3 dominance:  {:.2}", self.metrics.scope3_dominance)?;
        writeln!(f, "  Control score:      {}", self.metrics.control_score)?;

        writeln!(f, "\nMaximum reduction by 2050:")?;
        for s in ScenarioClass::ALL {
            writeln!(f, "  {:<13} {}", s.id(), self.max_reduction.get(s))?;
        }

        if !self.interventions.is_empty() {
            writeln!(f, "\nInterventions:")?;
            writeln!(
                f,
                "  {:<36} {:>10} {:>10}  Scalability",
                "Name", "Potential", "Years"
            )?;
            for i in &self.interventions {
                writeln!(
                    f,
                    "  {:<36} {:>9.1}% {:>10.1}  {}",
                    i.name, i.potential_mid, i.timeline_mid, i.scalability
                )?;
            }
        }
        Ok(())
    }
}

/// Single estimate against the static threshold
#[derive(Debug, Clone, Serialize)]
pub struct EstimateReport {
    pub industry: Industry,
    pub scenario: ScenarioClass,
    pub year: u16,
    pub residual: Percentage,
    pub static_threshold: f64,
    /// Residual minus the static threshold, percentage points
    pub gap: f64,
    pub applied_override: Option<UserOverride>,
}

impl EstimateReport {
    #[must_use]
    pub fn new(
        industry: Industry,
        scenario: ScenarioClass,
        year: u16,
        residual: Percentage,
        applied_override: Option<UserOverride>,
    ) -> Self {
        Self {
            industry,
            scenario,
            year,
            residual,
            static_threshold: STATIC_THRESHOLD_PCT,
            gap: residual.get() - STATIC_THRESHOLD_PCT,
            applied_override,
        }
    }
}

impl fmt::Display for EstimateReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{} / {} / {}: {} residual",
            self.industry, self.scenario, self.year, self.residual
        )?;
        writeln!(
            f,
            "Static threshold {:.2}%, gap {:+.2} points",
            self.static_threshold, self.gap
        )?;
        if let Some(o) = self.applied_override {
            writeln!(f, "Override: max potential {}", o.max_potential)?;
        }
        Ok(())
    }
}

/// Yearly trajectories for one industry
#[derive(Debug, Clone, Serialize)]
#[serde(transparent)]
pub struct TimelineReport {
    pub snapshot: ScenarioSnapshot,
}

impl fmt::Display for TimelineReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = &self.snapshot;
        writeln!(f, "{}", s.industry)?;
        if let Some(o) = s.applied_override {
            writeln!(
                f,
                "Override: max potential {} (ambitious terminal {})",
                o.max_potential,
                o.terminal_residual()
            )?;
        }
        writeln!(
            f,
            "{:<6} {:>9} {:>13} {:>10} {:>13}",
            "Year", "Static", "Conservative", "Ambitious", "Breakthrough"
        )?;
        for p in &s.timeline {
            writeln!(
                f,
                "{:<6} {:>9} {:>13} {:>10} {:>13}",
                p.year,
                p.static_threshold.to_string(),
                p.conservative.to_string(),
                p.ambitious.to_string(),
                p.breakthrough.to_string()
            )?;
        }
        Ok(())
    }
}

/// Removal requirements and headline gap
#[derive(Debug, Clone, Serialize)]
pub struct ImpactReport {
    pub plan: RemovalPlan,
    pub summary: ImpactSummary,
    pub applied_override: Option<UserOverride>,
}

impl fmt::Display for ImpactReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let p = &self.plan;
        writeln!(
            f,
            "{} in {}: baseline {:.0} t, removals at {:.2}/t",
            p.industry, p.year, p.baseline_tonnes, p.cost_per_tonne
        )?;
        if let Some(o) = self.applied_override {
            writeln!(f, "Override: max potential {}", o.max_potential)?;
        }
        writeln!(
            f,
            "{:<13} {:>9} {:>14} {:>16} {:>16} {:>16}",
            "Basis", "Residual", "Removals (t)", "Annual cost", "vs static", "Impact"
        )?;
        for l in &p.lines {
            writeln!(
                f,
                "{:<13} {:>9} {:>14.0} {:>16.2} {:>+16.2} {:>+16.2}",
                l.basis.to_string(),
                l.residual.to_string(),
                l.removals_tonnes,
                l.annual_cost,
                l.delta_vs_static,
                l.impact
            )?;
        }
        writeln!(
            f,
            "\nStatic threshold error: {:.2} points",
            self.summary.static_threshold_error
        )?;
        writeln!(
            f,
            "Planning uncertainty:   {:.2} per year",
            self.summary.planning_uncertainty
        )
    }
}

/// Urgency matrix
#[derive(Debug, Clone, Serialize)]
pub struct UrgencyReport {
    pub points: Vec<UrgencyPoint>,
}

impl fmt::Display for UrgencyReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "{:<24} {:>8} {:>11}  Urgent",
            "Industry", "Scope 3", "Gap (pts)"
        )?;
        for p in &self.points {
            writeln!(
                f,
                "{:<24} {:>7.2}% {:>+11.2}  {}",
                p.industry.id(),
                p.scope3_dominance,
                p.guidance_gap,
                if p.urgent { "yes" } else { "no" }
            )?;
        }
        Ok(())
    }
}

/// Outcome of loading a reference table
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub source: String,
    pub industries: usize,
    pub curves: usize,
    pub anchors: usize,
    pub interventions: usize,
}

impl ValidationReport {
    #[must_use]
    pub fn new(source: impl Into<String>, data: &ReferenceData) -> Self {
        let mut report = Self {
            source: source.into(),
            industries: 0,
            curves: 0,
            anchors: 0,
            interventions: 0,
        };
        for record in data.records() {
            report.industries += 1;
            report.interventions += record.interventions.len();
            for s in ScenarioClass::ALL {
                report.curves += 1;
                report.anchors += record.curve(s).anchors().len();
            }
        }
        report
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}: valid", self.source)?;
        writeln!(
            f,
            "  {} industries, {} curves, {} anchors, {} interventions",
            self.industries, self.curves, self.anchors, self.interventions
        )
    }
}
