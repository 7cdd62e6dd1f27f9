// tests/test_filter_rules.rs
// Filtered rules become style selectors evaluated per feature
// Covers the New York/Berlin scenario, negation and operator errors

#[cfg(test)]
mod filter_rules_tests {
    use olstyle::{
        compile_filter, ColorValue, Feature, Filter, NativeStyleEntry, OlStyleParser, Style,
        StyleError, StyleParser,
    };
    use serde_json::json;

    fn selector_for(filter: serde_json::Value) -> NativeStyleEntry {
        let _ = env_logger::builder().is_test(true).try_init();
        let style = Style::from_json(json!({
            "type": "Point",
            "rules": [{
                "symbolizer": {"kind": "Circle", "color": "#FF0000", "radius": 6},
                "filter": filter
            }]
        }))
        .unwrap();
        let mut entries = pollster::block_on(OlStyleParser::new().write_style(&style)).unwrap();
        entries.remove(0)
    }

    #[test]
    fn new_york_scenario() {
        let selector = selector_for(json!([
            "&&",
            ["==", "NAME", "New York"],
            ["<", "POPULATION", 1000000]
        ]));
        assert!(selector.is_dynamic());

        let ok = Feature::from_json(json!({"NAME": "New York", "POPULATION": 1}));
        let style = selector.resolve(&ok, 1.0).expect("rule applies");
        let image = style.image.clone().unwrap();
        assert_eq!(image.radius, Some(6.0));
        assert_eq!(image.fill.unwrap().color, Some(ColorValue::css("#FF0000")));

        let berlin = Feature::from_json(json!({"NAME": "Berlin", "POPULATION": 1}));
        assert!(selector.resolve(&berlin, 1.0).is_none());

        let too_big = Feature::from_json(json!({"NAME": "New York", "POPULATION": 1000000000000u64}));
        assert!(selector.resolve(&too_big, 1.0).is_none());
    }

    #[test]
    fn negation_complements() {
        let plain = selector_for(json!(["==", "A", "x"]));
        let negated = selector_for(json!(["!", ["==", "A", "x"]]));
        for attrs in [
            json!({"A": "x"}),
            json!({"A": "y"}),
            json!({"A": 1}),
            json!({"A": null}),
            json!({}),
        ] {
            let feature = Feature::from_json(attrs);
            assert_ne!(
                plain.resolve(&feature, 1.0).is_some(),
                negated.resolve(&feature, 1.0).is_some()
            );
        }
    }

    #[test]
    fn or_and_between() {
        let selector = selector_for(json!([
            "||",
            ["<=x<=", "POP", 100, 200],
            ["*=", "NAME", "Ber*"]
        ]));
        let hits = [json!({"POP": 150}), json!({"NAME": "Bern"}), json!({"POP": 100})];
        let misses = [json!({"POP": 201}), json!({"NAME": "Hamburg"}), json!({})];
        for attrs in hits {
            assert!(selector.resolve(&Feature::from_json(attrs), 1.0).is_some());
        }
        for attrs in misses {
            assert!(selector.resolve(&Feature::from_json(attrs), 1.0).is_none());
        }
    }

    #[test]
    fn compiled_predicate_is_reusable_across_threads() {
        let predicate = compile_filter(&Filter::gt("POP", 10)).unwrap();
        let handles: Vec<_> = (0..4)
            .map(|i| {
                let predicate = predicate.clone();
                std::thread::spawn(move || {
                    let feature = Feature::from_json(json!({"POP": i * 10}));
                    predicate.matches(&feature)
                })
            })
            .collect();
        let results: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results, vec![false, false, true, true]);
    }

    #[test]
    fn unknown_operator_rejects_style() {
        let err = Style::from_json(json!({
            "type": "Point",
            "rules": [{"symbolizer": {"kind": "Circle"}, "filter": ["~~", "A", 1]}]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            StyleError::UnsupportedFilterOperator { ref operator } if operator == "~~"
        ));

        let err = Style::from_json(json!({
            "type": "Line",
            "rules": [
                {"symbolizer": {"kind": "Line"}},
                {"symbolizer": {"kind": "Line"}, "filter": ["||", ["==", "A", 1], ["<>", "B", 2]]}
            ]
        }))
        .unwrap_err();
        assert!(matches!(
            err,
            StyleError::UnsupportedFilterOperator { ref operator } if operator == "<>"
        ));

        let err = Style::from_json(json!({
            "type": "Line",
            "rules": [{"symbolizer": {"kind": "Line"}, "filter": ["==", "A"]}]
        }))
        .unwrap_err();
        assert!(matches!(err, StyleError::InvalidFilter(_)));

        let err = olstyle::compile_filter_value(&json!(["&&", ["==", "A", 1], ["in", "B", 2]]))
            .unwrap_err();
        match err {
            StyleError::UnsupportedFilterOperator { operator } => assert_eq!(operator, "in"),
            other => panic!("unexpected error {:?}", other),
        }
    }
}
