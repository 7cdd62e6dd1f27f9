//! Converters between declarative symbolizers and native styles.

use std::sync::Arc;

use serde_json::Value;

use crate::config::ParserOptions;
use crate::error::{StyleError, StyleResult};
use crate::native::color::{merge, split_color, split_opacity};
use crate::native::{
    CircleStyle, ColorValue, FillStyle, NativeStyle, NativeStyleEntry, StrokeStyle, StyleFunction,
    TextStyle,
};
use crate::style::{
    CircleSymbolizer, FillSymbolizer, LineSymbolizer, StyleType, Symbolizer, SymbolizerKind,
    TextSymbolizer,
};

// ---------- native -> declarative ----------

/// Symbolizer kind a classified style type is read as.
pub fn kind_for_style_type(style_type: StyleType) -> SymbolizerKind {
    match style_type {
        StyleType::Point => SymbolizerKind::Circle,
        StyleType::Line => SymbolizerKind::Line,
        StyleType::Fill => SymbolizerKind::Fill,
    }
}

/// Read one symbolizer of the given kind out of a native style.
pub fn read_symbolizer(
    kind: SymbolizerKind,
    native: &NativeStyle,
    options: &ParserOptions,
) -> StyleResult<Symbolizer> {
    match kind {
        SymbolizerKind::Circle => Ok(circle_from_native(native, options).into()),
        SymbolizerKind::Line => Ok(line_from_native(native).into()),
        SymbolizerKind::Fill => Ok(fill_from_native(native).into()),
        SymbolizerKind::Text => Err(StyleError::unsupported_direction(kind)),
        SymbolizerKind::Icon | SymbolizerKind::Unknown => Err(StyleError::unknown_kind(kind)),
    }
}

/// Circle symbolizer from the native image layer.
pub fn circle_from_native(native: &NativeStyle, options: &ParserOptions) -> CircleSymbolizer {
    let image = native.image.as_ref();
    let fill_color = image.and_then(|i| i.fill.as_ref()).and_then(|f| f.color.as_ref());
    let stroke = image.and_then(|i| i.stroke.as_ref());
    let stroke_color = stroke.and_then(|s| s.color.as_ref());

    CircleSymbolizer {
        color: split_color(fill_color),
        opacity: split_opacity(fill_color),
        radius: Some(
            image
                .and_then(|i| i.radius)
                .filter(|r| r.is_finite())
                .unwrap_or(options.default_radius),
        ),
        stroke_color: split_color(stroke_color),
        stroke_opacity: split_opacity(stroke_color),
        stroke_width: stroke.and_then(|s| s.width),
    }
}

/// Line symbolizer from the native stroke layer.
pub fn line_from_native(native: &NativeStyle) -> LineSymbolizer {
    let stroke = native.stroke.as_ref();
    let color = stroke.and_then(|s| s.color.as_ref());

    LineSymbolizer {
        color: split_color(color),
        opacity: split_opacity(color),
        width: stroke.and_then(|s| s.width),
    }
}

/// Fill symbolizer from the native fill layer, stroke colour as outline.
pub fn fill_from_native(native: &NativeStyle) -> FillSymbolizer {
    let color = native.fill.as_ref().and_then(|f| f.color.as_ref());

    FillSymbolizer {
        color: split_color(color),
        opacity: split_opacity(color),
        outline_color: native
            .stroke
            .as_ref()
            .and_then(|s| s.color.as_ref())
            .map(|c| c.to_css()),
    }
}

// ---------- declarative -> native ----------

/// Translate a symbolizer, failing on kinds with no native mapping.
pub fn try_symbolizer_to_native(
    symbolizer: &Symbolizer,
    options: &ParserOptions,
) -> StyleResult<NativeStyleEntry> {
    let entry = match symbolizer {
        Symbolizer::Circle(s) => circle_to_native(s, options).into(),
        Symbolizer::Line(s) => line_to_native(s).into(),
        Symbolizer::Fill(s) => fill_to_native(s).into(),
        Symbolizer::Text(s) => text_to_native(s, options).into(),
        Symbolizer::Icon(_) | Symbolizer::Unknown => {
            return Err(StyleError::unknown_kind(symbolizer.kind()))
        }
    };
    Ok(entry)
}

/// Translate a symbolizer; kinds with no native mapping get the engine default style.
pub fn symbolizer_to_native(symbolizer: &Symbolizer, options: &ParserOptions) -> NativeStyleEntry {
    match try_symbolizer_to_native(symbolizer, options) {
        Ok(entry) => entry,
        Err(e) => {
            log::warn!("[{}] {}; using the engine default style", e.category(), e);
            NativeStyle::engine_default().into()
        }
    }
}

/// Circle image; the stroke exists only when a stroke colour is set.
pub fn circle_to_native(symbolizer: &CircleSymbolizer, options: &ParserOptions) -> NativeStyle {
    let stroke = symbolizer.stroke_color.as_deref().map(|color| {
        StrokeStyle::new(
            merge(Some(color), symbolizer.stroke_opacity),
            symbolizer.stroke_width,
        )
    });

    NativeStyle::default().with_image(CircleStyle {
        radius: Some(
            symbolizer
                .radius
                .filter(|r| r.is_finite())
                .unwrap_or(options.default_radius),
        ),
        fill: Some(FillStyle::new(merge(
            symbolizer.color.as_deref(),
            symbolizer.opacity,
        ))),
        stroke,
    })
}

/// Stroke-only style; width passes through unchanged.
pub fn line_to_native(symbolizer: &LineSymbolizer) -> NativeStyle {
    NativeStyle::default().with_stroke(StrokeStyle::new(
        merge(symbolizer.color.as_deref(), symbolizer.opacity),
        symbolizer.width,
    ))
}

/// Fill with an optional outline stroke carrying `outline_color` verbatim.
pub fn fill_to_native(symbolizer: &FillSymbolizer) -> NativeStyle {
    let mut style = NativeStyle::default().with_fill(FillStyle::new(merge(
        symbolizer.color.as_deref(),
        symbolizer.opacity,
    )));
    if let Some(outline) = &symbolizer.outline_color {
        style = style.with_stroke(StrokeStyle::new(Some(ColorValue::css(outline.clone())), None));
    }
    style
}

/// Label style function. The label text is looked up on the feature each
/// time the function runs; everything else is fixed at translation time.
pub fn text_to_native(symbolizer: &TextSymbolizer, options: &ParserOptions) -> StyleFunction {
    let color = merge(symbolizer.color.as_deref(), symbolizer.opacity);
    let [offset_x, offset_y] = symbolizer.offset.unwrap_or(options.default_text_offset);
    let template = TextStyle {
        font: Some(text_font(symbolizer, options)),
        text: None,
        fill: Some(FillStyle::new(color.clone())),
        stroke: Some(StrokeStyle::new(color, None)),
        offset_x,
        offset_y,
    };
    let field = symbolizer.field.clone();

    StyleFunction::new(move |feature, _resolution| {
        let mut text = template.clone();
        text.text = field
            .as_deref()
            .and_then(|name| feature.get(name))
            .and_then(label_text);
        Some(Arc::new(NativeStyle::default().with_text(text)))
    })
}

/// CSS font shorthand: `"[style ][weight ]{size}px {family, ...}"`.
pub fn text_font(symbolizer: &TextSymbolizer, options: &ParserOptions) -> String {
    let mut parts: Vec<String> = Vec::with_capacity(4);
    if let Some(style) = &symbolizer.font_style {
        parts.push(style.clone());
    }
    if let Some(weight) = &symbolizer.font_weight {
        parts.push(weight.clone());
    }
    parts.push(format!(
        "{}px",
        symbolizer.size.unwrap_or(options.default_font_size)
    ));
    let families = match &symbolizer.font {
        Some(font) if !font.is_empty() => font.join(", "),
        _ => options.default_font_family.clone(),
    };
    parts.push(families);
    parts.join(" ")
}

fn label_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    }
}
