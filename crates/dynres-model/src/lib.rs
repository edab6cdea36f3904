//! Dynamic residual emissions model
//!
//! Industry-specific residual emissions trajectories, contrasted with a
//! uniform 11% threshold:
//! - Validated reference tables for five Scope 3-heavy industries
//! - Linear interpolation along conservative / ambitious / breakthrough curves
//! - Session-scoped what-if overrides of maximum decarbonization potential
//! - Financial impact and carbon removal requirements
//!
//! # Example
//!
//! ```rust
//! use dynres_model::{Industry, ReferenceData, ScenarioClass, Session, TrajectoryModel};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let data = ReferenceData::builtin()?;
//! let model = TrajectoryModel::new(&data);
//!
//! let residual = model.estimate(Industry::Retail, ScenarioClass::Ambitious, 2040)?;
//! println!("Retail, ambitious, 2040: {residual}");
//!
//! let mut session = Session::new();
//! let snapshot = model.apply_override(&mut session, Industry::Retail, 90.0)?;
//! assert_eq!(snapshot.timeline.len(), 26);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod curve;
pub mod error;
pub mod impact;
pub mod insight;
pub mod reference;
pub mod scenario;
pub mod session;
pub mod trajectory;
pub mod types;

// Re-exports for convenience
pub use curve::{AnchorPoint, DecayProfile, ScenarioCurve, DEFAULT_ANCHOR_YEARS};
pub use error::{ConfigError, InputError, ModelError};
pub use impact::{
    financial_impact, Basis, ImpactSummary, RemovalLine, RemovalPlan, DEFAULT_REMOVAL_COST,
};
pub use insight::{
    intervention_points, urgency_matrix, ComplexityMetrics, InterventionPoint, UrgencyPoint,
};
pub use reference::{
    render_records, Complexity, DataFormat, IndustryRecord, Intervention, ReferenceData,
    ScenarioCurves,
};
pub use scenario::ScenarioReductions;
pub use session::{ScenarioSnapshot, Session, TimelinePoint, UserOverride};
pub use trajectory::{TrajectoryModel, OVERRIDE_SCENARIO};
pub use types::{Industry, Percentage, ScenarioClass, Year};

/// Uniform residual threshold applied across all industries, percent
pub const STATIC_THRESHOLD_PCT: f64 = 11.0;

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for working with the model
    pub use crate::{
        financial_impact, Industry, ModelError, Percentage, ReferenceData, ScenarioClass, Session,
        TrajectoryModel, STATIC_THRESHOLD_PCT,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod integration_tests {
    use super::*;

    #[test]
    fn full_session_flow() {
        let data = ReferenceData::builtin().unwrap();
        let model = TrajectoryModel::new(&data);
        let mut session = Session::new();

        let before = model
            .estimate_in(&session, Industry::ConsumerGoods, ScenarioClass::Ambitious, 2050)
            .unwrap();
        assert_eq!(before.get(), 18.0);

        model
            .apply_override(&mut session, Industry::ConsumerGoods, 89.0)
            .unwrap();
        let plan = model
            .removal_plan(&session, Industry::ConsumerGoods, 2050, 100_000.0, 400.0)
            .unwrap();
        let amb = plan
            .line(Basis::Scenario(ScenarioClass::Ambitious))
            .unwrap();
        assert!((amb.residual.get() - 11.0).abs() < 1e-9);
        assert!(amb.delta_vs_static.abs() < 1e-6);

        session.clear();
        let after = model
            .estimate_in(&session, Industry::ConsumerGoods, ScenarioClass::Ambitious, 2050)
            .unwrap();
        assert_eq!(after, before);
    }

    #[test]
    fn static_threshold_is_shared() {
        let data = ReferenceData::builtin().unwrap();
        let model = TrajectoryModel::new(&data);
        for industry in Industry::ALL {
            let snapshot = model.snapshot(&Session::new(), industry);
            assert!(snapshot
                .timeline
                .iter()
                .all(|p| p.static_threshold.get() == STATIC_THRESHOLD_PCT));
        }
    }
}
