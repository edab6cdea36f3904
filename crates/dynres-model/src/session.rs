//! Session-local state
//!
//! A [`Session`] is owned by exactly one caller and holds the what-if
//! overrides for that caller. Reference data is never touched; overrides
//! are applied on top of it when curves are read.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::curve::ScenarioCurve;
use crate::reference::ScenarioCurves;
use crate::types::{Industry, Percentage, ScenarioClass, Year};
use crate::STATIC_THRESHOLD_PCT;

/// Custom maximum decarbonization potential for one industry
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UserOverride {
    /// Industry the override applies to
    pub industry: Industry,
    /// Substituted maximum potential
    pub max_potential: Percentage,
}

impl UserOverride {
    /// Residual share implied by the override
    #[inline]
    #[must_use]
    pub fn terminal_residual(&self) -> Percentage {
        self.max_potential.complement()
    }
}

/// Caller-owned override state
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Session {
    overrides: BTreeMap<Industry, Percentage>,
}

impl Session {
    /// Empty session
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set or replace the override for an industry
    ///
    /// Returns the previous value, if any.
    pub fn set_override(&mut self, industry: Industry, max_potential: Percentage) -> Option<Percentage> {
        self.overrides.insert(industry, max_potential)
    }

    /// Override for an industry
    #[inline]
    #[must_use]
    pub fn override_for(&self, industry: Industry) -> Option<UserOverride> {
        self.overrides
            .get(&industry)
            .map(|&max_potential| UserOverride {
                industry,
                max_potential,
            })
    }

    /// Drop the override for one industry
    pub fn clear_override(&mut self, industry: Industry) -> Option<Percentage> {
        let previous = self.overrides.remove(&industry);
        if previous.is_some() {
            tracing::info!("Cleared override for {}", industry);
        }
        previous
    }

    /// Drop every override (session end)
    pub fn clear(&mut self) {
        self.overrides.clear();
    }

    /// Whether any override is active
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Active overrides in industry order
    pub fn overrides(&self) -> impl Iterator<Item = UserOverride> + '_ {
        self.overrides
            .iter()
            .map(|(&industry, &max_potential)| UserOverride {
                industry,
                max_potential,
            })
    }
}

/// One year of a scenario timeline
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    /// Calendar year
    pub year: u16,
    /// Uniform comparison threshold
    pub static_threshold: Percentage,
    /// Conservative residual
    pub conservative: Percentage,
    /// Ambitious residual
    pub ambitious: Percentage,
    /// Breakthrough residual
    pub breakthrough: Percentage,
}

impl TimelinePoint {
    /// Value for a scenario class
    #[inline]
    #[must_use]
    pub fn get(&self, scenario: ScenarioClass) -> Percentage {
        match scenario {
            ScenarioClass::Conservative => self.conservative,
            ScenarioClass::Ambitious => self.ambitious,
            ScenarioClass::Breakthrough => self.breakthrough,
        }
    }
}

/// Curves and full-horizon timeline for one industry as a session sees them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioSnapshot {
    /// Industry
    pub industry: Industry,
    /// Active override, if any
    pub applied_override: Option<UserOverride>,
    /// Effective curves
    pub curves: ScenarioCurves,
    /// Yearly values over the horizon
    pub timeline: Vec<TimelinePoint>,
}

impl ScenarioSnapshot {
    /// Build a snapshot, interpolating every year of the horizon
    #[must_use]
    pub fn from_curves(
        industry: Industry,
        conservative: ScenarioCurve,
        ambitious: ScenarioCurve,
        breakthrough: ScenarioCurve,
        applied_override: Option<UserOverride>,
    ) -> Self {
        let timeline = Year::horizon()
            .map(|year| {
                let y = year.get();
                TimelinePoint {
                    year: y,
                    static_threshold: Percentage::clamped(STATIC_THRESHOLD_PCT),
                    conservative: conservative.value_at(y),
                    ambitious: ambitious.value_at(y),
                    breakthrough: breakthrough.value_at(y),
                }
            })
            .collect();

        Self {
            industry,
            applied_override,
            curves: ScenarioCurves {
                conservative: Some(conservative),
                ambitious: Some(ambitious),
                breakthrough: Some(breakthrough),
            },
            timeline,
        }
    }

    /// Timeline entry for a year
    #[must_use]
    pub fn at(&self, year: Year) -> Option<&TimelinePoint> {
        self.timeline.iter().find(|p| p.year == year.get())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_are_per_industry() {
        let mut session = Session::new();
        assert!(session.is_empty());

        session.set_override(Industry::Retail, Percentage::clamped(90.0));
        assert_eq!(
            session.override_for(Industry::Retail).unwrap().terminal_residual(),
            Percentage::clamped(10.0)
        );
        assert!(session.override_for(Industry::CapitalGoods).is_none());
    }

    #[test]
    fn replacing_returns_previous() {
        let mut session = Session::new();
        assert!(session
            .set_override(Industry::Retail, Percentage::clamped(90.0))
            .is_none());
        assert_eq!(
            session.set_override(Industry::Retail, Percentage::clamped(92.0)),
            Some(Percentage::clamped(90.0))
        );
    }

    #[test]
    fn clear_drops_everything() {
        let mut session = Session::new();
        session.set_override(Industry::Retail, Percentage::clamped(90.0));
        session.set_override(Industry::ConsumerGoods, Percentage::clamped(80.0));
        assert_eq!(session.overrides().count(), 2);

        assert!(session.clear_override(Industry::Retail).is_some());
        assert!(session.clear_override(Industry::Retail).is_none());
        session.clear();
        assert!(session.is_empty());
    }

    #[test]
    fn snapshot_covers_the_horizon() {
        let curve = ScenarioCurve::from_pairs(&[(2025, 25.0), (2050, 10.0)]);
        let snapshot = ScenarioSnapshot::from_curves(
            Industry::Retail,
            curve.clone(),
            curve.clone(),
            curve,
            None,
        );
        assert_eq!(snapshot.timeline.len(), 26);
        let first = snapshot.timeline.first().unwrap();
        assert_eq!(first.year, 2025);
        assert_eq!(first.static_threshold.get(), 11.0);
        assert_eq!(first.conservative.get(), 25.0);
        let last = snapshot.at(Year::new(2050).unwrap()).unwrap();
        assert_eq!(last.get(ScenarioClass::Breakthrough).get(), 10.0);
    }
}
