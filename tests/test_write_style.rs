// tests/test_write_style.rs
// Writing declarative styles into native style entries
// Covers per-kind output, label functions and the default-style fallback

#[cfg(test)]
mod write_style_tests {
    use olstyle::{
        ColorValue, Feature, NativeStyle, NativeStyleEntry, OlStyleParser, Rgba, Style,
        StyleError, StyleParser, Symbolizer,
    };
    use serde_json::json;
    use std::sync::Arc;

    fn write(style: serde_json::Value) -> Result<Vec<NativeStyleEntry>, StyleError> {
        let _ = env_logger::builder().is_test(true).try_init();
        let style = Style::from_json(style)?;
        pollster::block_on(OlStyleParser::new().write_style(&style))
    }

    #[test]
    fn writes_point_style() {
        let entries = write(json!({
            "type": "Point",
            "rules": [{"symbolizer": {"kind": "Circle", "color": "#FF0000", "radius": 6}}]
        }))
        .unwrap();

        let image = entries[0].as_static().unwrap().image.clone().unwrap();
        assert_eq!(image.radius, Some(6.0));
        assert_eq!(image.fill.unwrap().color, Some(ColorValue::css("#FF0000")));
        assert!(image.stroke.is_none());
    }

    #[test]
    fn writes_default_radius() {
        let entries = write(json!({
            "type": "Point",
            "rules": [{"symbolizer": {"kind": "Circle", "color": "#FF0000"}}]
        }))
        .unwrap();
        let image = entries[0].as_static().unwrap().image.clone().unwrap();
        assert_eq!(image.radius, Some(5.0));
    }

    #[test]
    fn writes_line_style() {
        let entries = write(json!({
            "type": "Line",
            "rules": [{"symbolizer": {"kind": "Line", "color": "#000000", "width": 3}}]
        }))
        .unwrap();
        let stroke = entries[0].as_static().unwrap().stroke.clone().unwrap();
        assert_eq!(stroke.color, Some(ColorValue::css("#000000")));
        assert_eq!(stroke.width, Some(3.0));
    }

    #[test]
    fn writes_transparent_polygon() {
        let entries = write(json!({
            "type": "Fill",
            "rules": [{"symbolizer": {
                "kind": "Fill", "color": "#FFFF00", "opacity": 0.5, "outlineColor": "#000000"
            }}]
        }))
        .unwrap();
        let style = entries[0].as_static().unwrap();
        assert_eq!(
            style.fill.as_ref().unwrap().color,
            Some(ColorValue::Rgba(Rgba::new(255, 255, 0, 0.5)))
        );
        assert_eq!(
            style.stroke.as_ref().unwrap().color,
            Some(ColorValue::css("#000000"))
        );
    }

    #[test]
    fn writes_styled_label() {
        let entries = write(json!({
            "type": "Point",
            "rules": [{"symbolizer": {
                "kind": "Text",
                "color": "#000000",
                "field": "name",
                "font": ["Arial"],
                "size": 12,
                "offset": [0, 5]
            }}]
        }))
        .unwrap();
        assert!(entries[0].is_dynamic());

        let feature = Feature::from_json(json!({"name": "GeoStyler"}));
        let style = entries[0].resolve(&feature, 1.0).unwrap();
        let text = style.text.clone().unwrap();
        assert_eq!(text.text.as_deref(), Some("GeoStyler"));
        assert_eq!(text.font.as_deref(), Some("12px Arial"));
        assert_eq!(text.fill.unwrap().color, Some(ColorValue::css("#000000")));
        assert_eq!(text.stroke.unwrap().color, Some(ColorValue::css("#000000")));
        assert_eq!((text.offset_x, text.offset_y), (0.0, 5.0));
    }

    #[test]
    fn label_text_follows_feature_changes() {
        let entries = write(json!({
            "type": "Point",
            "rules": [{"symbolizer": {"kind": "Text", "field": "name"}}]
        }))
        .unwrap();

        let mut feature = Feature::from_json(json!({"name": "first"}));
        let first = entries[0].resolve(&feature, 1.0).unwrap().text.clone().unwrap().text;
        feature.set("name", "second");
        let second = entries[0].resolve(&feature, 1.0).unwrap().text.clone().unwrap().text;

        assert_eq!(first.as_deref(), Some("first"));
        assert_eq!(second.as_deref(), Some("second"));
    }

    #[test]
    fn unknown_kind_falls_back_to_default_style() {
        let entries = write(json!({
            "type": "Point",
            "rules": [
                {"symbolizer": {"kind": "Mark", "wellKnownName": "star"}},
                {"symbolizer": {"kind": "Icon", "image": "marker.png"}}
            ]
        }))
        .unwrap();

        assert_eq!(entries.len(), 2);
        for entry in &entries {
            assert_eq!(entry.as_static(), Some(&NativeStyle::engine_default()));
        }
    }

    #[test]
    fn preserves_rule_order() {
        let entries = write(json!({
            "type": "Line",
            "rules": [
                {"symbolizer": {"kind": "Line", "width": 1}},
                {"symbolizer": {"kind": "Line", "width": 2}, "filter": ["==", "a", 1]},
                {"symbolizer": {"kind": "Line", "width": 3}}
            ]
        }))
        .unwrap();

        let widths: Vec<Option<f64>> = entries
            .iter()
            .map(|e| {
                e.resolve(&Feature::from_json(json!({"a": 1})), 1.0)
                    .and_then(|s| s.stroke.as_ref().and_then(|stroke| stroke.width))
            })
            .collect();
        assert_eq!(widths, vec![Some(1.0), Some(2.0), Some(3.0)]);
        assert!(entries[1].is_dynamic());
    }

    #[test]
    fn each_rule_gets_its_own_style() {
        let style = Style::from_json(json!({
            "type": "Point",
            "rules": [{"symbolizer": {"kind": "Circle"}}, {"symbolizer": {"kind": "Circle"}}]
        }))
        .unwrap();
        assert!(matches!(style.rules[0].symbolizer, Symbolizer::Circle(_)));

        let mut entries = OlStyleParser::new().write(&style).unwrap();
        if let NativeStyleEntry::Static(first) = &mut entries[0] {
            Arc::make_mut(first).image = None;
        }
        assert!(entries[1].as_static().unwrap().image.is_some());
    }
}
