use dynres_model::{
    financial_impact, Industry, ModelError, ReferenceData, ScenarioClass, TrajectoryModel,
};
use dynres_test_utils::builtin_reference;
use proptest::prelude::*;

fn industry_strategy() -> impl Strategy<Value = Industry> {
    prop::sample::select(Industry::ALL.to_vec())
}

fn scenario_strategy() -> impl Strategy<Value = ScenarioClass> {
    prop::sample::select(ScenarioClass::ALL.to_vec())
}

proptest! {
    #[test]
    fn prop_estimate_within_percentage_bounds(
        industry in industry_strategy(),
        scenario in scenario_strategy(),
        year in 2025i64..=2050,
    ) {
        let data = builtin_reference();
        let model = TrajectoryModel::new(&data);
        let value = model.estimate(industry, scenario, year).unwrap().get();
        prop_assert!((0.0..=100.0).contains(&value));
    }

    #[test]
    fn prop_estimate_is_idempotent(
        industry in industry_strategy(),
        scenario in scenario_strategy(),
        year in 2025i64..=2050,
    ) {
        let data = builtin_reference();
        let model = TrajectoryModel::new(&data);
        let first = model.estimate(industry, scenario, year).unwrap();
        let second = model.estimate(industry, scenario, year).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_interior_years_lie_strictly_between_differing_anchors(
        industry in industry_strategy(),
        scenario in scenario_strategy(),
        year in 2026u16..2050,
    ) {
        let data = builtin_reference();
        let model = TrajectoryModel::new(&data);
        let anchors = data.curve(industry, scenario).anchors();
        let idx = anchors.partition_point(|a| a.year <= year);
        prop_assume!(idx > 0 && idx < anchors.len());

        let (lo, hi) = (anchors[idx - 1], anchors[idx]);
        prop_assume!(lo.year < year && lo.value != hi.value);

        let value = model.estimate(industry, scenario, i64::from(year)).unwrap().get();
        prop_assert!(value > lo.value.min(hi.value));
        prop_assert!(value < lo.value.max(hi.value));
    }

    #[test]
    fn prop_years_outside_horizon_are_rejected(
        industry in industry_strategy(),
        scenario in scenario_strategy(),
        year in prop_oneof![-5000i64..2025, 2051i64..10_000],
    ) {
        let data = builtin_reference();
        let model = TrajectoryModel::new(&data);
        let err = model.estimate(industry, scenario, year).unwrap_err();
        prop_assert!(err.is_recoverable());
    }

    #[test]
    fn prop_unknown_industry_is_invalid_input(name in "[a-z]{3,12}") {
        prop_assume!(name.parse::<Industry>().is_err());
        let data = builtin_reference();
        let model = TrajectoryModel::new(&data);
        let err = model.estimate_named(&name, "ambitious", 2030).unwrap_err();
        prop_assert!(matches!(err, ModelError::InvalidInput(_)));
    }
}

#[test]
fn test_anchor_years_return_anchor_values_exactly() {
    let data = builtin_reference();
    let model = TrajectoryModel::new(&data);

    for industry in Industry::ALL {
        for scenario in ScenarioClass::ALL {
            let curve = data.curve(industry, scenario);
            let first = curve.first().unwrap();
            let last = curve.last().unwrap();
            assert_eq!(
                model.estimate(industry, scenario, 2025).unwrap().get(),
                first.value
            );
            assert_eq!(
                model.estimate(industry, scenario, 2050).unwrap().get(),
                last.value
            );
            for anchor in curve.anchors() {
                let value = model
                    .estimate(industry, scenario, i64::from(anchor.year))
                    .unwrap();
                assert_eq!(value.get(), anchor.value, "{industry}/{scenario}");
            }
        }
    }
}

#[test]
fn test_no_discontinuity_at_horizon_end() {
    let data = builtin_reference();
    let model = TrajectoryModel::new(&data);

    for scenario in ScenarioClass::ALL {
        let anchors = data.curve(Industry::FinancialServices, scenario).anchors();
        let [.., prev, last] = anchors else {
            panic!("curve needs two anchors");
        };
        let slope = (last.value - prev.value).abs() / f64::from(last.year - prev.year);

        let y2049 = model
            .estimate_named("financial_services", scenario.id(), 2049)
            .unwrap();
        let y2050 = model
            .estimate_named("financial_services", scenario.id(), 2050)
            .unwrap();
        assert!((y2049.get() - y2050.get()).abs() <= slope + 1e-9);
    }
}

#[test]
fn test_display_names_resolve() {
    let data = ReferenceData::builtin().unwrap();
    let model = TrajectoryModel::new(&data);
    let by_id = model.estimate_named("retail", "breakthrough", 2040).unwrap();
    let by_name = model.estimate_named("Retail", "Breakthrough", 2040).unwrap();
    assert_eq!(by_id, by_name);
}

#[test]
fn test_financial_impact_reference_case() {
    assert_eq!(financial_impact(1000.0, 11.0, 20.0, 50.0).unwrap(), -450_000.0);
    assert_eq!(financial_impact(1000.0, 11.0, 11.0, 50.0).unwrap(), 0.0);
    assert!(financial_impact(-1.0, 11.0, 20.0, 50.0).is_err());
}
