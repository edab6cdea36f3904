//! Scenario curves
//!
//! A curve is an ordered list of (year, residual %) anchors for one
//! industry/scenario pair. Values between anchors are linearly
//! interpolated; outside the anchored span the nearest anchor holds.

use crate::error::ConfigError;
use crate::types::{Industry, Percentage, ScenarioClass};
use serde::{Deserialize, Serialize};

/// Anchor years used by the shipped reference table
pub const DEFAULT_ANCHOR_YEARS: [u16; 6] = [2025, 2030, 2035, 2040, 2045, 2050];

/// One fixed point on a scenario curve
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AnchorPoint {
    /// Calendar year
    pub year: u16,
    /// Residual emissions percentage
    pub value: f64,
}

impl AnchorPoint {
    /// Create anchor
    #[inline]
    #[must_use]
    pub fn new(year: u16, value: f64) -> Self {
        Self { year, value }
    }
}

/// Ordered anchor sequence for one (industry, scenario) pair
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ScenarioCurve {
    anchors: Vec<AnchorPoint>,
}

impl ScenarioCurve {
    /// Curve without anchors; evaluates to zero everywhere
    pub const EMPTY: ScenarioCurve = ScenarioCurve {
        anchors: Vec::new(),
    };

    /// Wrap anchors without validation
    ///
    /// Use [`ScenarioCurve::validate`] before the curve reaches a model.
    #[inline]
    #[must_use]
    pub fn new(anchors: Vec<AnchorPoint>) -> Self {
        Self { anchors }
    }

    /// Build a curve from `(year, value)` pairs
    #[must_use]
    pub fn from_pairs(pairs: &[(u16, f64)]) -> Self {
        Self::new(
            pairs
                .iter()
                .map(|&(year, value)| AnchorPoint::new(year, value))
                .collect(),
        )
    }

    /// Build a curve by sampling a decay profile towards the floor
    /// implied by `max_reduction`
    ///
    /// The last anchor is pinned to the exact floor.
    #[must_use]
    pub fn from_decay(max_reduction: Percentage, years: &[u16], profile: &DecayProfile) -> Self {
        let floor = max_reduction.complement().get();
        let last = years.len().saturating_sub(1);
        let anchors = years
            .iter()
            .enumerate()
            .map(|(i, &year)| {
                let value = if i == last {
                    floor
                } else {
                    round2(profile.residual_at(year, floor))
                };
                AnchorPoint::new(year, value)
            })
            .collect();
        Self { anchors }
    }

    /// Anchor points in year order
    #[inline]
    #[must_use]
    pub fn anchors(&self) -> &[AnchorPoint] {
        &self.anchors
    }

    /// First anchor
    #[inline]
    #[must_use]
    pub fn first(&self) -> Option<&AnchorPoint> {
        self.anchors.first()
    }

    /// Terminal anchor
    #[inline]
    #[must_use]
    pub fn last(&self) -> Option<&AnchorPoint> {
        self.anchors.last()
    }

    /// Check ordering and value range
    ///
    /// # Errors
    /// Returns the first violation found
    pub fn validate(&self, industry: Industry, scenario: ScenarioClass) -> Result<(), ConfigError> {
        if self.anchors.is_empty() {
            return Err(ConfigError::EmptyCurve { industry, scenario });
        }

        for anchor in &self.anchors {
            if !anchor.value.is_finite() || !(0.0..=100.0).contains(&anchor.value) {
                return Err(ConfigError::AnchorOutOfRange {
                    industry,
                    scenario,
                    year: anchor.year,
                    value: anchor.value,
                });
            }
        }

        for pair in self.anchors.windows(2) {
            if pair[1].year <= pair[0].year {
                return Err(ConfigError::NonMonotonicYears {
                    industry,
                    scenario,
                    previous: pair[0].year,
                    next: pair[1].year,
                });
            }
        }

        Ok(())
    }

    /// Residual percentage at `year`
    ///
    /// Linear between bracketing anchors, held flat outside the anchored
    /// span, clamped to [0, 100].
    #[must_use]
    pub fn value_at(&self, year: u16) -> Percentage {
        let (Some(first), Some(last)) = (self.anchors.first(), self.anchors.last()) else {
            return Percentage::ZERO;
        };
        if year <= first.year {
            return Percentage::clamped(first.value);
        }
        if year >= last.year {
            return Percentage::clamped(last.value);
        }

        // first index whose year exceeds `year`; always in 1..len here
        let idx = self.anchors.partition_point(|a| a.year <= year);
        let lo = self.anchors[idx - 1];
        let hi = self.anchors[idx];
        let t = f64::from(year - lo.year) / f64::from(hi.year - lo.year);
        Percentage::clamped(lo.value + (hi.value - lo.value) * t)
    }

    /// Copy of the curve with the terminal anchor replaced
    #[must_use]
    pub fn with_terminal(&self, value: Percentage) -> Self {
        let mut anchors = self.anchors.clone();
        if let Some(last) = anchors.last_mut() {
            last.value = value.get();
        }
        Self { anchors }
    }
}

/// Exponential decay from a starting residual towards a floor
///
/// The residual holds at `start_pct` for `plateau_years`, then decays
/// at `rate` per year. Floors above `start_pct` stay flat.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DecayProfile {
    /// Residual share before decarbonization takes hold
    pub start_pct: f64,
    /// Year the profile starts
    pub start_year: u16,
    /// Years before decay begins
    pub plateau_years: u16,
    /// Decay rate per year
    pub rate: f64,
}

impl DecayProfile {
    /// Residual at `year` for a given floor
    #[must_use]
    pub fn residual_at(&self, year: u16, floor: f64) -> f64 {
        let t = f64::from(year) - f64::from(self.start_year) - f64::from(self.plateau_years);
        let raw = floor + (self.start_pct - floor) * (-self.rate * t).exp();
        raw.min(self.start_pct).max(floor)
    }
}

impl Default for DecayProfile {
    fn default() -> Self {
        Self {
            start_pct: 25.0,
            start_year: 2025,
            plateau_years: 5,
            rate: 0.3,
        }
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
