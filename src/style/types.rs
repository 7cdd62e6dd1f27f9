//! Declarative style types.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::filter::Filter;

/// Geometry family a style targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleType {
    Point,
    Line,
    Fill,
}

impl fmt::Display for StyleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StyleType::Point => "Point",
            StyleType::Line => "Line",
            StyleType::Fill => "Fill",
        };
        f.write_str(name)
    }
}

/// Complete declarative style.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Style {
    #[serde(rename = "type")]
    pub style_type: StyleType,
    #[serde(default)]
    pub rules: Vec<Rule>,
}

impl Style {
    pub fn new(style_type: StyleType, rules: Vec<Rule>) -> Self {
        Self { style_type, rules }
    }

    /// Decode from the JSON form used by style documents.
    ///
    /// Rule filters are checked first so a bad filter surfaces as its own
    /// error kind rather than a generic decode error.
    pub fn from_json(value: serde_json::Value) -> crate::StyleResult<Self> {
        let filters = value
            .get("rules")
            .and_then(serde_json::Value::as_array)
            .into_iter()
            .flatten()
            .filter_map(|rule| rule.get("filter"))
            .filter(|filter| !filter.is_null());
        for filter in filters {
            Filter::from_value(filter)?;
        }
        Ok(serde_json::from_value(value)?)
    }
}

/// A symbolizer plus the filter deciding where it applies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Rule {
    pub symbolizer: Symbolizer,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter: Option<Filter>,
}

impl Rule {
    pub fn new(symbolizer: impl Into<Symbolizer>) -> Self {
        Self {
            symbolizer: symbolizer.into(),
            filter: None,
        }
    }

    pub fn with_filter(mut self, filter: Filter) -> Self {
        self.filter = Some(filter);
        self
    }
}

/// Symbolizer discriminant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SymbolizerKind {
    Circle,
    Line,
    Fill,
    Text,
    Icon,
    Unknown,
}

impl fmt::Display for SymbolizerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            SymbolizerKind::Circle => "Circle",
            SymbolizerKind::Line => "Line",
            SymbolizerKind::Fill => "Fill",
            SymbolizerKind::Text => "Text",
            SymbolizerKind::Icon => "Icon",
            SymbolizerKind::Unknown => "Unknown",
        };
        f.write_str(name)
    }
}

/// How one kind of geometry is drawn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Symbolizer {
    Circle(CircleSymbolizer),
    Line(LineSymbolizer),
    Fill(FillSymbolizer),
    Text(TextSymbolizer),
    Icon(IconSymbolizer),
    /// Any kind this crate does not know by name.
    #[serde(other)]
    Unknown,
}

impl Symbolizer {
    pub fn kind(&self) -> SymbolizerKind {
        match self {
            Symbolizer::Circle(_) => SymbolizerKind::Circle,
            Symbolizer::Line(_) => SymbolizerKind::Line,
            Symbolizer::Fill(_) => SymbolizerKind::Fill,
            Symbolizer::Text(_) => SymbolizerKind::Text,
            Symbolizer::Icon(_) => SymbolizerKind::Icon,
            Symbolizer::Unknown => SymbolizerKind::Unknown,
        }
    }
}

/// Point rendered as a circle.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircleSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub radius: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stroke_width: Option<f64>,
}

/// Polyline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LineSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
}

/// Polygon fill with an optional outline.
///
/// The outline has a colour only; its opacity is not modelled.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FillSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outline_color: Option<String>,
}

/// Label drawn from a feature attribute.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TextSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
    /// Attribute holding the label text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Font family stack, most preferred first.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<Vec<String>>,
    /// Font size in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_weight: Option<String>,
    /// Pixel offset (x, y) from the anchor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub offset: Option<[f64; 2]>,
}

/// Point rendered from an image. Part of the declarative model, but the
/// native writer has no mapping for it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IconSymbolizer {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,
}

impl From<CircleSymbolizer> for Symbolizer {
    fn from(s: CircleSymbolizer) -> Self {
        Symbolizer::Circle(s)
    }
}

impl From<LineSymbolizer> for Symbolizer {
    fn from(s: LineSymbolizer) -> Self {
        Symbolizer::Line(s)
    }
}

impl From<FillSymbolizer> for Symbolizer {
    fn from(s: FillSymbolizer) -> Self {
        Symbolizer::Fill(s)
    }
}

impl From<TextSymbolizer> for Symbolizer {
    fn from(s: TextSymbolizer) -> Self {
        Symbolizer::Text(s)
    }
}

impl From<IconSymbolizer> for Symbolizer {
    fn from(s: IconSymbolizer) -> Self {
        Symbolizer::Icon(s)
    }
}
