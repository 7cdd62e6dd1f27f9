//! Style-type inference for the read path.

use crate::error::{StyleError, StyleResult};
use crate::native::NativeStyle;
use crate::style::{StyleType, SymbolizerKind};

/// Infer the declarative style type from the populated native layers.
///
/// Precedence follows rendering order: image, then fill, then stroke. A
/// style with both fill and stroke is a `Fill` whose stroke becomes the
/// outline. A text-only style is a label, which cannot be read back.
pub fn classify(native: &NativeStyle) -> StyleResult<StyleType> {
    let style_type = if native.image.is_some() {
        StyleType::Point
    } else if native.fill.is_some() {
        StyleType::Fill
    } else if native.stroke.is_some() {
        StyleType::Line
    } else if native.text.is_some() {
        return Err(StyleError::unsupported_direction(SymbolizerKind::Text));
    } else {
        return Err(StyleError::Classification {
            snapshot: native.snapshot(),
        });
    };
    log::debug!("classified native style as {}", style_type);
    Ok(style_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::native::{CircleStyle, FillStyle, StrokeStyle, TextStyle};

    #[test]
    fn test_image_wins() {
        let style = NativeStyle::default()
            .with_image(CircleStyle::default())
            .with_fill(FillStyle::default())
            .with_stroke(StrokeStyle::default());
        assert_eq!(classify(&style).unwrap(), StyleType::Point);
    }

    #[test]
    fn test_fill_and_stroke_is_fill() {
        let style = NativeStyle::default()
            .with_stroke(StrokeStyle::default())
            .with_fill(FillStyle::default());
        assert_eq!(classify(&style).unwrap(), StyleType::Fill);
    }

    #[test]
    fn test_stroke_only_is_line() {
        let style = NativeStyle::default().with_stroke(StrokeStyle::default());
        assert_eq!(classify(&style).unwrap(), StyleType::Line);
    }

    #[test]
    fn test_text_only_is_unsupported_direction() {
        let style = NativeStyle::default().with_text(TextStyle::default());
        assert!(matches!(
            classify(&style),
            Err(StyleError::UnsupportedDirection { ref kind }) if kind == "Text"
        ));
    }

    #[test]
    fn test_empty_style_fails() {
        match classify(&NativeStyle::default()) {
            Err(StyleError::Classification { snapshot }) => assert_eq!(snapshot, "{}"),
            other => panic!("unexpected result {:?}", other),
        }
    }
}
