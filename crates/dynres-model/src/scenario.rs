//! Scenario builder
//!
//! Rebuilds all three curves of an industry from user-chosen maximum
//! reductions. The reductions must be ordered: a more optimistic class
//! never reduces less than a more constrained one.

use serde::{Deserialize, Serialize};

use crate::curve::{DecayProfile, ScenarioCurve, DEFAULT_ANCHOR_YEARS};
use crate::error::InputError;
use crate::reference::IndustryRecord;
use crate::session::ScenarioSnapshot;
use crate::trajectory::TrajectoryModel;
use crate::types::{Industry, Percentage, ScenarioClass};

/// Lowest conservative maximum reduction accepted
pub const MIN_CONSERVATIVE_REDUCTION: f64 = 60.0;

/// Highest maximum reduction accepted for any class
pub const MAX_REDUCTION: f64 = 98.0;

/// Maximum decarbonization potential per scenario class
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReductions {
    conservative: Percentage,
    ambitious: Percentage,
    breakthrough: Percentage,
}

impl ScenarioReductions {
    /// Validate a set of reductions
    ///
    /// conservative in [60, 98], ambitious in [conservative, 98],
    /// breakthrough in [ambitious, 98].
    ///
    /// # Errors
    /// Returns `InputError` for non-finite, out-of-range or unordered values
    pub fn new(conservative: f64, ambitious: f64, breakthrough: f64) -> Result<Self, InputError> {
        let c = Percentage::new("conservative reduction", conservative)?;
        let a = Percentage::new("ambitious reduction", ambitious)?;
        let b = Percentage::new("breakthrough reduction", breakthrough)?;

        if !(MIN_CONSERVATIVE_REDUCTION..=MAX_REDUCTION).contains(&conservative) {
            return Err(InputError::InvalidReductions(format!(
                "conservative {conservative} outside [{MIN_CONSERVATIVE_REDUCTION}, {MAX_REDUCTION}]"
            )));
        }
        if !(conservative..=MAX_REDUCTION).contains(&ambitious) {
            return Err(InputError::InvalidReductions(format!(
                "ambitious {ambitious} outside [{conservative}, {MAX_REDUCTION}]"
            )));
        }
        if !(ambitious..=MAX_REDUCTION).contains(&breakthrough) {
            return Err(InputError::InvalidReductions(format!(
                "breakthrough {breakthrough} outside [{ambitious}, {MAX_REDUCTION}]"
            )));
        }

        Ok(Self {
            conservative: c,
            ambitious: a,
            breakthrough: b,
        })
    }

    /// Reductions implied by a record's terminal anchors
    ///
    /// Not range-checked; reference data may sit outside the slider bounds.
    #[must_use]
    pub fn from_record(record: &IndustryRecord) -> Self {
        let get = |s| Percentage::clamped(record.max_reduction(s));
        Self {
            conservative: get(ScenarioClass::Conservative),
            ambitious: get(ScenarioClass::Ambitious),
            breakthrough: get(ScenarioClass::Breakthrough),
        }
    }

    /// Reduction for a class
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

impl TrajectoryModel<'_> {
    /// Snapshot with every curve rebuilt from the given reductions
    #[must_use]
    pub fn build_scenarios(
        &self,
        industry: Industry,
        reductions: &ScenarioReductions,
        profile: &DecayProfile,
    ) -> ScenarioSnapshot {
        let build = |s| ScenarioCurve::from_decay(reductions.get(s), &DEFAULT_ANCHOR_YEARS, profile);
        tracing::debug!("Building scenarios for {} from {:?}", industry, reductions);
        ScenarioSnapshot::from_curves(
            industry,
            build(ScenarioClass::Conservative),
            build(ScenarioClass::Ambitious),
            build(ScenarioClass::Breakthrough),
            None,
        )
    }
}
