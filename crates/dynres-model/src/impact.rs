//! Financial impact of a dynamic residual estimate against the static threshold
//!
//! Recomputed from scratch on every input change; nothing here is cached.

use serde::{Deserialize, Serialize};

use crate::error::{InputError, ModelError};
use crate::session::Session;
use crate::trajectory::TrajectoryModel;
use crate::types::{Industry, Percentage, ScenarioClass, Year};
use crate::STATIC_THRESHOLD_PCT;

/// Removal price used for the planning-uncertainty figure
pub const DEFAULT_REMOVAL_COST: f64 = 400.0;

/// Signed impact of using the static threshold instead of a dynamic estimate
///
/// `(static_threshold_pct - dynamic_estimate_pct) * baseline * cost_per_tonne`.
/// Percentages enter as percentage points, so dividing by 100 gives currency.
///
/// # Errors
/// Returns `InvalidInput` for a negative baseline or any non-finite input
pub fn financial_impact(
    baseline_emissions: f64,
    static_threshold_pct: f64,
    dynamic_estimate_pct: f64,
    cost_per_tonne: f64,
) -> Result<f64, ModelError> {
    finite("baseline emissions", baseline_emissions)?;
    finite("static threshold", static_threshold_pct)?;
    finite("dynamic estimate", dynamic_estimate_pct)?;
    finite("cost per tonne", cost_per_tonne)?;
    if baseline_emissions < 0.0 {
        return Err(InputError::NegativeBaseline(baseline_emissions).into());
    }
    Ok((static_threshold_pct - dynamic_estimate_pct) * baseline_emissions * cost_per_tonne)
}

fn finite(field: &'static str, value: f64) -> Result<(), InputError> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(InputError::NonFinite { field, value })
    }
}

/// Which residual assumption a row describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Basis {
    /// Uniform 11% threshold
    Static,
    /// Industry-specific scenario
    Scenario(ScenarioClass),
}

impl std::fmt::Display for Basis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Static => f.write_str("static"),
            Self::Scenario(s) => write!(f, "{s}"),
        }
    }
}

/// Carbon removals and their cost under one residual assumption
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RemovalLine {
    /// Residual assumption
    pub basis: Basis,
    /// Residual share
    pub residual: Percentage,
    /// Removals needed per year, tCO2e
    pub removals_tonnes: f64,
    /// Annual removal cost
    pub annual_cost: f64,
    /// Cost difference versus the static line
    pub delta_vs_static: f64,
    /// Signed impact from [`financial_impact`], in currency
    pub impact: f64,
}

/// Removal requirements for one industry and year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RemovalPlan {
    /// Industry
    pub industry: Industry,
    /// Year the residuals are read at
    pub year: u16,
    /// Baseline emissions, tCO2e/year
    pub baseline_tonnes: f64,
    /// Removal price per tonne
    pub cost_per_tonne: f64,
    /// Static line first, then one line per scenario class
    pub lines: Vec<RemovalLine>,
}

impl RemovalPlan {
    /// Line for a basis
    #[must_use]
    pub fn line(&self, basis: Basis) -> Option<&RemovalLine> {
        self.lines.iter().find(|l| l.basis == basis)
    }
}

/// Headline gap figures
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ImpactSummary {
    /// |conservative residual - static threshold|, percentage points
    pub static_threshold_error: f64,
    /// |conservative cost - static cost| at [`DEFAULT_REMOVAL_COST`]
    pub planning_uncertainty: f64,
}

fn validate_plan_inputs(baseline: f64, cost: f64) -> Result<(), InputError> {
    finite("baseline emissions", baseline)?;
    finite("cost per tonne", cost)?;
    if baseline < 0.0 {
        return Err(InputError::NegativeBaseline(baseline));
    }
    if cost < 0.0 {
        return Err(InputError::NegativeCost(cost));
    }
    Ok(())
}

impl TrajectoryModel<'_> {
    /// Removals and cost per residual assumption, honoring session overrides
    ///
    /// # Errors
    /// Returns `InvalidInput` for an out-of-range year, negative or
    /// non-finite baseline, or negative or non-finite cost
    pub fn removal_plan(
        &self,
        session: &Session,
        industry: Industry,
        year: i64,
        baseline_tonnes: f64,
        cost_per_tonne: f64,
    ) -> Result<RemovalPlan, ModelError> {
        let year = Year::new(year)?;
        validate_plan_inputs(baseline_tonnes, cost_per_tonne)?;

        let static_pct = Percentage::clamped(STATIC_THRESHOLD_PCT);
        let static_cost = baseline_tonnes * static_pct.get() / 100.0 * cost_per_tonne;

        let mut lines = Vec::with_capacity(1 + ScenarioClass::ALL.len());
        lines.push(RemovalLine {
            basis: Basis::Static,
            residual: static_pct,
            removals_tonnes: baseline_tonnes * static_pct.get() / 100.0,
            annual_cost: static_cost,
            delta_vs_static: 0.0,
            impact: 0.0,
        });

        for scenario in ScenarioClass::ALL {
            let residual = self
                .curve_in(session, industry, scenario)
                .value_at(year.get());
            let removals = baseline_tonnes * residual.get() / 100.0;
            let cost = removals * cost_per_tonne;
            let impact = financial_impact(
                baseline_tonnes,
                STATIC_THRESHOLD_PCT,
                residual.get(),
                cost_per_tonne,
            )? / 100.0;
            lines.push(RemovalLine {
                basis: Basis::Scenario(scenario),
                residual,
                removals_tonnes: removals,
                annual_cost: cost,
                delta_vs_static: cost - static_cost,
                impact,
            });
        }

        Ok(RemovalPlan {
            industry,
            year: year.get(),
            baseline_tonnes,
            cost_per_tonne,
            lines,
        })
    }

    /// Static-threshold error and planning uncertainty for an industry
    ///
    /// # Errors
    /// Returns `InvalidInput` for an out-of-range year or bad baseline
    pub fn impact_summary(
        &self,
        session: &Session,
        industry: Industry,
        year: i64,
        baseline_tonnes: f64,
    ) -> Result<ImpactSummary, ModelError> {
        let plan = self.removal_plan(session, industry, year, baseline_tonnes, DEFAULT_REMOVAL_COST)?;
        let conservative = plan
            .line(Basis::Scenario(ScenarioClass::Conservative))
            .map_or(0.0, |l| l.residual.get());
        let delta = plan
            .line(Basis::Scenario(ScenarioClass::Conservative))
            .map_or(0.0, |l| l.delta_vs_static);
        Ok(ImpactSummary {
            static_threshold_error: (conservative - STATIC_THRESHOLD_PCT).abs(),
            planning_uncertainty: delta.abs(),
        })
    }
}
