//! Native style model, shaped after the OpenLayers style classes.

use serde::{Deserialize, Serialize};

use super::color::ColorValue;

/// Fill layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FillStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
}

impl FillStyle {
    pub fn new(color: Option<ColorValue>) -> Self {
        Self { color }
    }
}

/// Stroke layer.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<ColorValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

impl StrokeStyle {
    pub fn new(color: Option<ColorValue>, width: Option<f64>) -> Self {
        Self { color, width }
    }
}

/// Circle image used for point rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CircleStyle {
    /// Radius in pixels; may be absent or non-finite on styles built elsewhere.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeStyle>,
}

/// Text layer for labels.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextStyle {
    /// CSS font shorthand, e.g. "bold 12px Arial".
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Label content, resolved per feature.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeStyle>,
    #[serde(default)]
    pub offset_x: f64,
    #[serde(default)]
    pub offset_y: f64,
}

/// A complete native style. Every layer is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NativeStyle {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<CircleStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fill: Option<FillStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke: Option<StrokeStyle>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<TextStyle>,
}

impl NativeStyle {
    pub fn with_image(mut self, image: CircleStyle) -> Self {
        self.image = Some(image);
        self
    }

    pub fn with_fill(mut self, fill: FillStyle) -> Self {
        self.fill = Some(fill);
        self
    }

    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    pub fn with_text(mut self, text: TextStyle) -> Self {
        self.text = Some(text);
        self
    }

    /// The engine's stock style: thin circle, light translucent fill, blue stroke.
    pub fn engine_default() -> Self {
        let fill = FillStyle::new(Some(ColorValue::css("rgba(255,255,255,0.4)")));
        let stroke = StrokeStyle::new(Some(ColorValue::css("#3399CC")), Some(1.25));
        NativeStyle::default()
            .with_image(CircleStyle {
                radius: Some(5.0),
                fill: Some(fill.clone()),
                stroke: Some(stroke.clone()),
            })
            .with_fill(fill)
            .with_stroke(stroke)
    }

    /// JSON rendering used in error reports.
    pub(crate) fn snapshot(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| format!("{:?}", self))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_default_layers() {
        let style = NativeStyle::engine_default();
        let image = style.image.as_ref().unwrap();
        assert_eq!(image.radius, Some(5.0));
        assert_eq!(style.stroke.as_ref().unwrap().width, Some(1.25));
        assert!(style.fill.is_some());
        assert!(style.text.is_none());
    }

    #[test]
    fn test_snapshot_omits_empty_layers() {
        let style = NativeStyle::default().with_stroke(StrokeStyle::new(None, Some(2.0)));
        assert_eq!(style.snapshot(), r#"{"stroke":{"width":2.0}}"#);
    }
}
