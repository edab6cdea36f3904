//! Trajectory model
//!
//! Pure lookups over the reference tables:
//! - `estimate` interpolates one (industry, scenario, year) value
//! - `estimate_in` does the same through a session's overrides
//! - `apply_override` records a what-if and returns the recomputed snapshot

use std::borrow::Cow;

use crate::curve::ScenarioCurve;
use crate::error::{InputError, ModelError};
use crate::reference::ReferenceData;
use crate::session::{ScenarioSnapshot, Session, TimelinePoint};
use crate::types::{Industry, Percentage, ScenarioClass, Year};

/// Scenario class whose terminal anchor a session override replaces
pub const OVERRIDE_SCENARIO: ScenarioClass = ScenarioClass::Ambitious;

/// Read-only view over validated reference data
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryModel<'a> {
    data: &'a ReferenceData,
}

impl<'a> TrajectoryModel<'a> {
    /// Create model over reference data
    #[inline]
    #[must_use]
    pub fn new(data: &'a ReferenceData) -> Self {
        Self { data }
    }

    /// Underlying reference data
    #[inline]
    #[must_use]
    pub fn data(&self) -> &'a ReferenceData {
        self.data
    }

    /// Residual percentage for an industry, scenario and year
    ///
    /// # Errors
    /// Returns `InvalidInput` when `year` is outside 2025..=2050
    pub fn estimate(
        &self,
        industry: Industry,
        scenario: ScenarioClass,
        year: i64,
    ) -> Result<Percentage, ModelError> {
        let year = Year::new(year)?;
        Ok(self.data.curve(industry, scenario).value_at(year.get()))
    }

    /// [`estimate`](Self::estimate) with string identifiers
    ///
    /// # Errors
    /// Returns `InvalidInput` for unknown identifiers or an out-of-range year
    pub fn estimate_named(
        &self,
        industry: &str,
        scenario: &str,
        year: i64,
    ) -> Result<Percentage, ModelError> {
        let industry: Industry = industry.parse()?;
        let scenario: ScenarioClass = scenario.parse()?;
        self.estimate(industry, scenario, year)
    }

    /// Estimate as seen by a session
    ///
    /// # Errors
    /// Returns `InvalidInput` when `year` is outside 2025..=2050
    pub fn estimate_in(
        &self,
        session: &Session,
        industry: Industry,
        scenario: ScenarioClass,
        year: i64,
    ) -> Result<Percentage, ModelError> {
        let year = Year::new(year)?;
        Ok(self.curve_in(session, industry, scenario).value_at(year.get()))
    }

    /// Effective curve for a session
    ///
    /// Borrowed from the reference tables unless an override replaces it.
    #[must_use]
    pub fn curve_in(
        &self,
        session: &Session,
        industry: Industry,
        scenario: ScenarioClass,
    ) -> Cow<'a, ScenarioCurve> {
        let base = self.data.curve(industry, scenario);
        match session.override_for(industry) {
            Some(o) if scenario == OVERRIDE_SCENARIO => {
                Cow::Owned(base.with_terminal(o.terminal_residual()))
            }
            _ => Cow::Borrowed(base),
        }
    }

    /// Record a custom maximum potential and recompute the snapshot
    ///
    /// The ambitious curve's terminal anchor becomes
    /// `100 - custom_max_potential`. Reference data is left untouched.
    ///
    /// # Errors
    /// Returns `InvalidInput` when the value is not finite or outside [0, 100];
    /// the session is unchanged in that case.
    pub fn apply_override(
        &self,
        session: &mut Session,
        industry: Industry,
        custom_max_potential: f64,
    ) -> Result<ScenarioSnapshot, ModelError> {
        let max_potential = Self::check_override(custom_max_potential).map_err(|e| {
            tracing::warn!("Rejected override for {}: {}", industry, e);
            e
        })?;
        session.set_override(industry, max_potential);
        tracing::info!(
            "Applied override for {}: max potential {}",
            industry,
            max_potential
        );
        Ok(self.snapshot(session, industry))
    }

    /// Curves and timeline for an industry as the session sees them
    #[must_use]
    pub fn snapshot(&self, session: &Session, industry: Industry) -> ScenarioSnapshot {
        ScenarioSnapshot::from_curves(
            industry,
            self.curve_in(session, industry, ScenarioClass::Conservative)
                .into_owned(),
            self.curve_in(session, industry, ScenarioClass::Ambitious)
                .into_owned(),
            self.curve_in(session, industry, ScenarioClass::Breakthrough)
                .into_owned(),
            session.override_for(industry),
        )
    }

    /// Yearly rows 2025..=2050 with the static threshold and all three classes
    #[must_use]
    pub fn timeline(&self, session: &Session, industry: Industry) -> Vec<TimelinePoint> {
        self.snapshot(session, industry).timeline
    }

    /// Parse and validate an override value without applying it
    ///
    /// # Errors
    /// Returns `InvalidInput` when the value is not finite or outside [0, 100]
    pub fn check_override(custom_max_potential: f64) -> Result<Percentage, InputError> {
        Percentage::new("custom max potential", custom_max_potential)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> ReferenceData {
        ReferenceData::builtin().unwrap()
    }

    #[test]
    fn estimate_hits_anchor_values() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        let v = model
            .estimate(Industry::CapitalGoods, ScenarioClass::Ambitious, 2035)
            .unwrap();
        assert_eq!(v.get(), 9.46);
    }

    #[test]
    fn estimate_interpolates_between_anchors() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        // 2040 -> 8.85, 2045 -> 8.19
        let v = model
            .estimate(Industry::CapitalGoods, ScenarioClass::Conservative, 2042)
            .unwrap()
            .get();
        assert!((v - (8.85 + (8.19 - 8.85) * 0.4)).abs() < 1e-9);
    }

    #[test]
    fn estimate_rejects_years_outside_horizon() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        for year in [2024, 2051, 0] {
            let err = model
                .estimate(Industry::Retail, ScenarioClass::Conservative, year)
                .unwrap_err();
            assert!(err.is_recoverable());
        }
    }

    #[test]
    fn estimate_named_rejects_unknown_identifiers() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        assert_eq!(
            model
                .estimate_named("steel", "conservative", 2030)
                .unwrap_err(),
            ModelError::InvalidInput(InputError::UnknownIndustry("steel".into()))
        );
        assert!(matches!(
            model.estimate_named("retail", "moonshot", 2030),
            Err(ModelError::InvalidInput(InputError::UnknownScenario(_)))
        ));
        assert_eq!(
            model
                .estimate_named("financial_services", "conservative", 2050)
                .unwrap()
                .get(),
            30.0
        );
    }

    #[test]
    fn override_changes_only_the_session_view() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        let mut session = Session::new();

        let snapshot = model
            .apply_override(&mut session, Industry::Retail, 90.0)
            .unwrap();
        assert_eq!(snapshot.timeline.last().unwrap().ambitious.get(), 10.0);
        assert_eq!(
            snapshot.applied_override.unwrap().max_potential.get(),
            90.0
        );

        let with = model
            .estimate_in(&session, Industry::Retail, ScenarioClass::Ambitious, 2050)
            .unwrap();
        let without = model
            .estimate(Industry::Retail, ScenarioClass::Ambitious, 2050)
            .unwrap();
        assert_eq!(with.get(), 10.0);
        assert_eq!(without.get(), 15.0);
        assert_eq!(data, ReferenceData::builtin().unwrap());
    }

    #[test]
    fn override_leaves_other_classes_and_industries_alone() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        let mut session = Session::new();
        model
            .apply_override(&mut session, Industry::Retail, 90.0)
            .unwrap();

        for scenario in [ScenarioClass::Conservative, ScenarioClass::Breakthrough] {
            assert!(matches!(
                model.curve_in(&session, Industry::Retail, scenario),
                Cow::Borrowed(_)
            ));
        }
        assert!(matches!(
            model.curve_in(&session, Industry::CapitalGoods, ScenarioClass::Ambitious),
            Cow::Borrowed(_)
        ));
    }

    #[test]
    fn invalid_override_keeps_session_intact() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        let mut session = Session::new();
        model
            .apply_override(&mut session, Industry::Retail, 90.0)
            .unwrap();

        for bad in [120.0, -1.0, f64::NAN, f64::INFINITY] {
            assert!(model
                .apply_override(&mut session, Industry::Retail, bad)
                .is_err());
        }
        assert_eq!(
            session.override_for(Industry::Retail).unwrap().max_potential.get(),
            90.0
        );
    }

    #[test]
    fn timeline_covers_the_horizon() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        let rows = model.timeline(&Session::new(), Industry::CapitalGoods);
        assert_eq!(rows.len(), 26);
        assert_eq!(rows[0].year, 2025);
        assert_eq!(rows[25].year, 2050);
        assert_eq!(rows[10].ambitious.get(), 9.46);
        assert_eq!(rows[25].conservative.get(), 8.0);
    }

    #[test]
    fn clearing_restores_reference_curve() {
        let data = data();
        let model = TrajectoryModel::new(&data);
        let mut session = Session::new();
        model
            .apply_override(&mut session, Industry::ConsumerGoods, 95.0)
            .unwrap();
        session.clear();

        assert_eq!(
            model.snapshot(&session, Industry::ConsumerGoods),
            model.snapshot(&Session::new(), Industry::ConsumerGoods)
        );
    }
}
