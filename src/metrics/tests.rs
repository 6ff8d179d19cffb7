use super::*;

fn scenario_input() -> EsgInput {
    EsgInput {
        carbon_emissions: Some(1500.0),
        total_revenue: Some(10_000_000.0),
        renewable_electricity_consumption: Some(250_000.0),
        total_electricity_consumption: Some(1_000_000.0),
        female_employees: Some(45.0),
        total_employees: Some(100.0),
        community_investment_spend: Some(500_000.0),
        ..Default::default()
    }
}

#[test]
fn test_calculate_full_scenario() {
    let derived = calculate(&scenario_input());

    assert_eq!(derived.carbon_intensity, Some(0.00015));
    assert_eq!(derived.renewable_electricity_ratio, Some(25.0));
    assert_eq!(derived.diversity_ratio, Some(45.0));
    assert_eq!(derived.community_spend_ratio, Some(5.0));
}

#[test]
fn test_zero_revenue_suppresses_revenue_ratios() {
    let input = EsgInput {
        total_revenue: Some(0.0),
        carbon_emissions: Some(100.0),
        ..Default::default()
    };

    let derived = calculate(&input);
    assert_eq!(derived.carbon_intensity, None);
    assert_eq!(derived.community_spend_ratio, None);
    assert_eq!(derived.renewable_electricity_ratio, None);
    assert_eq!(derived.diversity_ratio, None);
}

#[test]
fn test_empty_input_yields_no_metrics() {
    assert_eq!(calculate(&EsgInput::default()), DerivedMetrics::default());
}

#[test]
fn test_zero_numerator_is_present() {
    let input = EsgInput {
        female_employees: Some(0.0),
        total_employees: Some(100.0),
        ..Default::default()
    };

    assert_eq!(calculate(&input).diversity_ratio, Some(0.0));
}

#[test]
fn test_unrelated_fields_do_not_affect_metrics() {
    let mut input = scenario_input();
    input.total_fuel_consumption = Some(50_000.0);
    input.average_training_hours = Some(40.0);
    input.independent_board_members_percent = Some(60.0);
    input.has_data_privacy_policy = Some(true);

    assert_eq!(calculate(&input), calculate(&scenario_input()));
}

/// Every numerator/denominator pair obeys the same law: computed iff both
/// are present and the denominator is strictly positive.
#[test]
fn test_gating_law_for_every_pair() {
    type Setter = fn(&mut EsgInput, Option<f64>);
    type Getter = fn(&DerivedMetrics) -> Option<f64>;

    let pairs: [(&str, Setter, Setter, Getter, f64); 4] = [
        (
            "carbon_intensity",
            |i, v| i.carbon_emissions = v,
            |i, v| i.total_revenue = v,
            |d| d.carbon_intensity,
            1.0,
        ),
        (
            "renewable_electricity_ratio",
            |i, v| i.renewable_electricity_consumption = v,
            |i, v| i.total_electricity_consumption = v,
            |d| d.renewable_electricity_ratio,
            100.0,
        ),
        (
            "diversity_ratio",
            |i, v| i.female_employees = v,
            |i, v| i.total_employees = v,
            |d| d.diversity_ratio,
            100.0,
        ),
        (
            "community_spend_ratio",
            |i, v| i.community_investment_spend = v,
            |i, v| i.total_revenue = v,
            |d| d.community_spend_ratio,
            100.0,
        ),
    ];

    let values = [None, Some(0.0), Some(8.0), Some(-4.0)];

    for (name, set_num, set_den, get, scale) in pairs {
        for numerator in values {
            for denominator in values {
                let mut input = EsgInput::default();
                set_num(&mut input, numerator);
                set_den(&mut input, denominator);

                let actual = get(&calculate(&input));
                let expected = match (numerator, denominator) {
                    (Some(n), Some(d)) if d > 0.0 => Some(scale * n / d),
                    _ => None,
                };

                assert_eq!(
                    actual, expected,
                    "{name}: numerator={numerator:?} denominator={denominator:?}"
                );
            }
        }
    }
}

#[test]
fn test_negative_numerator_is_computed() {
    let input = EsgInput {
        carbon_emissions: Some(-50.0),
        total_revenue: Some(1000.0),
        ..Default::default()
    };

    assert_eq!(calculate(&input).carbon_intensity, Some(-0.05));
}

#[test]
fn test_overflowing_ratio_is_absent() {
    let input = EsgInput {
        carbon_emissions: Some(1e300),
        total_revenue: Some(1e-300),
        female_employees: Some(f64::MAX),
        total_employees: Some(1.0),
        ..Default::default()
    };

    let derived = calculate(&input);

    assert_eq!(derived.carbon_intensity, None);
    assert_eq!(derived.diversity_ratio, None);
}

#[test]
fn test_derived_metrics_serialize_camel_case() {
    let json = serde_json::to_value(calculate(&scenario_input())).unwrap();
    assert_eq!(json["carbonIntensity"], 0.00015);
    assert_eq!(json["renewableElectricityRatio"], 25.0);
    assert_eq!(json["diversityRatio"], 45.0);
    assert_eq!(json["communitySpendRatio"], 5.0);
}

mod metadata_tests {
    use super::super::metadata::{catalog, FieldType};

    #[test]
    fn test_catalog_groups() {
        let meta = catalog();
        assert_eq!(meta.environmental.len(), 4);
        assert_eq!(meta.social.len(), 4);
        assert_eq!(meta.governance.len(), 3);
        assert_eq!(meta.auto_calculated.len(), 4);
    }

    #[test]
    fn test_catalog_input_keys_match_input_struct() {
        let meta = catalog();
        let input = serde_json::to_value(crate::model::EsgInput::default()).unwrap();
        let fields = input.as_object().unwrap();

        let keys: Vec<&str> = meta.input_keys().collect();
        assert_eq!(keys.len(), fields.len());
        for key in keys {
            assert!(fields.contains_key(key), "catalog key {key} missing from EsgInput");
        }
    }

    #[test]
    fn test_privacy_policy_is_dropdown() {
        let meta = catalog();
        let field = meta
            .governance
            .iter()
            .find(|f| f.key == "hasDataPrivacyPolicy")
            .unwrap();
        assert_eq!(field.field_type, FieldType::Dropdown);
        assert_eq!(field.options, Some(&["Yes", "No"][..]));
    }

    #[test]
    fn test_catalog_serializes_wire_names() {
        let json = serde_json::to_value(catalog()).unwrap();
        assert!(json["autoCalculated"].is_array());
        assert_eq!(json["environmental"][0]["type"], "number");
        assert_eq!(json["environmental"][3]["unit"], "T CO2e");
        assert!(json["environmental"][0].get("options").is_none());
        assert_eq!(json["governance"][1]["options"][0], "Yes");
    }
}
